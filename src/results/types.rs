//! Upstream business records and their display-ready projection

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use url::Url;

/// Response envelope of the business-search endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct BusinessSearchResponse {
    pub businesses: Vec<BusinessRecord>,
}

/// One business as reported by upstream
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub rating: Option<f64>,
    pub price: Option<String>,
    pub location: Option<BusinessLocation>,
    pub coordinates: Option<BusinessCoordinates>,
    pub phone: Option<String>,
    pub display_phone: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub business_hours: Vec<BusinessHours>,
    pub review_count: Option<u32>,
    #[serde(default)]
    pub categories: Vec<BusinessCategory>,
    /// Straight-line meters from the search origin
    pub distance: Option<f64>,
    #[serde(default)]
    pub transactions: Vec<String>,
}

impl BusinessRecord {
    /// Whether the record lies within `radius_meters`.
    ///
    /// Records without a reported distance count as in range.
    pub fn within(&self, radius_meters: u32) -> bool {
        self.distance
            .map_or(true, |d| d <= f64::from(radius_meters))
    }

    /// Open flag from the first hours entry, false when absent
    pub fn is_open_now(&self) -> bool {
        self.business_hours
            .first()
            .map(|h| h.is_open_now)
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessLocation {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
}

impl BusinessLocation {
    /// Single-line address: street, city, state, zip
    pub fn full_address(&self) -> String {
        let parts: Vec<&str> = [&self.address1, &self.city, &self.state, &self.zip_code]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .collect();

        if parts.is_empty() {
            "No address available".to_string()
        } else {
            parts.join(", ")
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BusinessCoordinates {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessCategory {
    pub title: Option<String>,
    pub alias: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessHours {
    #[serde(default)]
    pub open: Vec<OpenHours>,
    pub hours_type: Option<String>,
    #[serde(default)]
    pub is_open_now: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenHours {
    pub is_overnight: bool,
    pub start: String,
    pub end: String,
    pub day: u8,
}

/// Display-ready restaurant.
///
/// Identity is the upstream id alone: equality and hashing ignore every
/// other field.
#[derive(Debug, Clone, Serialize)]
pub struct Restaurant {
    pub id: String,
    pub name: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: Option<String>,
    pub display_phone: Option<String>,
    pub website: Option<Url>,
    pub rating: Option<f64>,
    pub price: Option<String>,
    pub categories: Vec<String>,
    pub image_url: Option<String>,
    pub is_open_now: bool,
    pub review_count: Option<u32>,
    pub distance: Option<f64>,
    pub transactions: Vec<String>,
}

impl From<BusinessRecord> for Restaurant {
    fn from(record: BusinessRecord) -> Self {
        let is_open_now = record.is_open_now();
        let coordinates = record.coordinates.unwrap_or_default();

        Self {
            id: record.id.unwrap_or_default(),
            name: record.name,
            address: record.location.as_ref().map(BusinessLocation::full_address),
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            phone: record.phone,
            display_phone: record.display_phone,
            website: record.url.as_deref().and_then(|u| Url::parse(u).ok()),
            rating: record.rating,
            price: record.price,
            categories: record
                .categories
                .into_iter()
                .filter_map(|c| c.title)
                .collect(),
            image_url: record.image_url,
            is_open_now,
            review_count: record.review_count,
            distance: record.distance,
            transactions: record.transactions,
        }
    }
}

impl PartialEq for Restaurant {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Restaurant {}

impl Hash for Restaurant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
