//! Filter tokens and the catalog they are drawn from

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashSet;

/// Token that switches on the upstream `open_now` parameter
pub const OPEN_NOW: &str = "open_now";

/// Sigil prefixing price-tier tokens (`$1`..`$4`)
pub const PRICE_SIGIL: char = '$';

/// One selectable filter, classified by kind
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SearchFilter {
    /// Price tier, carrying the text after the sigil (e.g. `"2"`)
    Price(String),
    /// Only businesses currently open
    OpenNow,
    /// Cuisine, dietary tag, restaurant type or food type
    Category(String),
}

impl SearchFilter {
    /// Classify a raw token.
    ///
    /// Total over all strings: anything that is neither a price tier nor
    /// `open_now` is a category, known to the catalog or not.
    pub fn classify(token: &str) -> Self {
        if let Some(digits) = token.strip_prefix(PRICE_SIGIL) {
            SearchFilter::Price(digits.to_string())
        } else if token == OPEN_NOW {
            SearchFilter::OpenNow
        } else {
            SearchFilter::Category(token.to_string())
        }
    }

    pub fn is_price(&self) -> bool {
        matches!(self, SearchFilter::Price(_))
    }

    pub fn is_category(&self) -> bool {
        matches!(self, SearchFilter::Category(_))
    }
}

/// A titled group of catalog tokens, as offered to the user
#[derive(Debug, Clone, Serialize)]
pub struct CatalogSection {
    pub title: &'static str,
    pub tokens: &'static [&'static str],
}

/// The closed filter catalog
pub static CATALOG: &[CatalogSection] = &[
    CatalogSection {
        title: "OPERATIONAL STATUS",
        tokens: &[OPEN_NOW],
    },
    CatalogSection {
        title: "PRICE RANGE",
        tokens: &["$1", "$2", "$3", "$4"],
    },
    CatalogSection {
        title: "RESTAURANT TYPES",
        tokens: &[
            "Bar",
            "Pizzeria",
            "Steakhouse",
            "Fast Food",
            "Barbeque",
            "Cafe",
            "Pub",
            "Brewery",
            "Diner",
            "Buffet",
            "Deli",
            "Bakery",
            "Food Trucks",
            "Dessert",
        ],
    },
    CatalogSection {
        title: "FOOD TYPES",
        tokens: &[
            "Pizza",
            "Sushi",
            "Tacos",
            "Chicken",
            "Burgers",
            "Seafood",
            "Subs",
            "Steak",
            "Pasta",
            "Sandwiches",
            "Soup",
            "Coffee",
            "Ice Cream",
            "Salad",
            "Bagels",
            "Wings",
        ],
    },
    CatalogSection {
        title: "DIETARY PREFERENCES",
        tokens: &[
            "Gluten-Free",
            "Halal",
            "Vegetarian",
            "Vegan",
            "Organic",
            "Kosher",
        ],
    },
    CatalogSection {
        title: "CUISINES",
        tokens: &[
            "American",
            "Italian",
            "Mexican",
            "Chinese",
            "Japanese",
            "Indian",
            "Mediterranean",
            "French",
            "Thai",
            "Greek",
            "Korean",
            "Southern",
            "Vietnamese",
            "Jamaican",
            "Spanish",
            "Ethiopian",
            "Turkish",
            "Peruvian",
            "Portuguese",
            "Brazilian",
            "Australian",
        ],
    },
];

static KNOWN_TOKENS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    CATALOG
        .iter()
        .flat_map(|section| section.tokens.iter().copied())
        .collect()
});

/// Whether a token belongs to the catalog
pub fn is_known(token: &str) -> bool {
    KNOWN_TOKENS.contains(token)
}
