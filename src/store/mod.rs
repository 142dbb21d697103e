//! External item/location store contract
//!
//! The store performs exact equality/range filtering only; all fuzzy and
//! substring matching belongs to the result matcher.

pub mod rest;
pub mod types;

use crate::core::error::Result;
use crate::nlp::dates::DateSpan;
use async_trait::async_trait;
use self::types::{Campus, ItemStatus, Location, LostItem};

/// Read contract against the external datastore
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// All active locations registered for a campus
    async fn list_locations(&self, campus: Campus) -> Result<Vec<Location>>;

    /// Candidate items, newest first, capped at `limit`
    ///
    /// An empty `location_ids` slice means no location constraint. The
    /// date span, when present, is an inclusive found-date filter.
    async fn list_items(
        &self,
        location_ids: &[String],
        status: ItemStatus,
        span: Option<DateSpan>,
        limit: usize,
    ) -> Result<Vec<LostItem>>;
}
