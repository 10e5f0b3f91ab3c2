//! Ordered result list returned by a search

use super::types::Restaurant;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;

/// The restaurants found by one search, in merge order
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ResultSet {
    restaurants: Vec<Restaurant>,
}

impl ResultSet {
    pub fn new(restaurants: Vec<Restaurant>) -> Self {
        Self { restaurants }
    }

    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Restaurant> {
        self.restaurants.iter()
    }

    pub fn as_slice(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn into_vec(self) -> Vec<Restaurant> {
        self.restaurants
    }

    /// Drop repeated ids, keeping each restaurant's first occurrence
    pub fn dedup_by_id(self) -> Self {
        let mut seen = HashSet::new();
        let restaurants = self
            .restaurants
            .into_iter()
            .filter(|r| seen.insert(r.id.clone()))
            .collect();
        Self { restaurants }
    }

    /// A single random pick (roulette)
    pub fn random_pick(&self) -> Option<&Restaurant> {
        self.random_pick_with(&mut rand::thread_rng())
    }

    pub fn random_pick_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Restaurant> {
        self.restaurants.choose(rng)
    }

    /// A shuffled copy for sequential browsing (card deck)
    pub fn shuffled(&self) -> Vec<Restaurant> {
        self.shuffled_with(&mut rand::thread_rng())
    }

    pub fn shuffled_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Restaurant> {
        let mut deck = self.restaurants.clone();
        deck.shuffle(rng);
        deck
    }
}

impl From<Vec<Restaurant>> for ResultSet {
    fn from(restaurants: Vec<Restaurant>) -> Self {
        Self::new(restaurants)
    }
}

impl IntoIterator for ResultSet {
    type Item = Restaurant;
    type IntoIter = std::vec::IntoIter<Restaurant>;

    fn into_iter(self) -> Self::IntoIter {
        self.restaurants.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Restaurant;
    type IntoIter = std::slice::Iter<'a, Restaurant>;

    fn into_iter(self) -> Self::IntoIter {
        self.restaurants.iter()
    }
}
