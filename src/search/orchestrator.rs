//! Search orchestration
//!
//! Entry point for a search request: cache lookup, date resolution, query
//! interpretation, candidate fetch, matching, response assembly, cache
//! write-through. Owns the response cache and the collaborator handles;
//! there is no module-level mutable state.

use crate::cache::TimedCache;
use crate::core::clock::Clock;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::llm::ChatClient;
use crate::nlp::dates;
use crate::query::router;
use crate::search::matcher;
use crate::search::response::{DateFilter, SearchInfo, SearchResponse};
use crate::store::types::{Campus, ItemStatus, Location};
use crate::store::ItemStore;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

pub struct SearchService {
    store: Arc<dyn ItemStore>,
    model: Option<ChatClient>,
    cache: TimedCache<SearchResponse>,
    clock: Arc<dyn Clock>,
    utc_offset_hours: i32,
    item_limit: usize,
}

impl SearchService {
    pub fn new(
        config: &Config,
        store: Arc<dyn ItemStore>,
        model: Option<ChatClient>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            model,
            cache: TimedCache::new(
                config.cache.max_entries,
                config.cache.ttl_secs,
                clock.clone(),
            ),
            clock,
            utc_offset_hours: config.general.utc_offset_hours,
            item_limit: config.store.item_limit,
        }
    }

    /// Run a search request end to end
    pub async fn search(&self, message: &str, campus: Campus) -> Result<SearchResponse> {
        let start = Instant::now();
        let cache_key = format!("{}_{}", message.trim().to_lowercase(), campus);

        if let Some(cached) = self.cache.get(&cache_key) {
            info!(query = %message, %campus, "cache hit");
            return Ok(cached);
        }

        let today = self.clock.today(self.utc_offset_hours);
        let resolved = dates::resolve(message, today);
        debug!(
            query = %message,
            span = ?resolved.span,
            time_keywords = ?resolved.keywords,
            "date phrases resolved"
        );

        let interpretation =
            router::interpret(message, campus, &resolved, self.model.as_ref()).await;
        let query = &interpretation.query;

        let (location_ids, has_location_filter) = self.location_filter(campus, query).await;

        let items = self
            .store
            .list_items(&location_ids, ItemStatus::Active, resolved.span, self.item_limit)
            .await?;
        debug!(candidates = items.len(), "candidate items fetched");

        let outcome = matcher::match_items(&items, query);
        let exact_count = outcome.exact.len();
        let expanded_count = outcome.expanded.len();

        let response_message = matcher::compose_message(
            message,
            campus.as_str(),
            &query.time_keywords,
            exact_count,
            expanded_count,
        );

        let response = SearchResponse {
            message: response_message,
            items: outcome.combined(),
            search_info: SearchInfo {
                original: message.to_string(),
                campus: campus.to_string(),
                processing_mode: interpretation.mode,
                exact_keywords: query.exact_keywords.clone(),
                expanded_keywords: query.expanded_keywords.clone(),
                location_keywords: query.location_keywords.clone(),
                time_keywords: query.time_keywords.clone(),
                date_filter: DateFilter::from(&resolved),
                has_location_filter,
                exact_matches: exact_count,
                expanded_matches: expanded_count,
                total_results: exact_count + expanded_count,
            },
        };

        self.cache.put(cache_key, response.clone());

        info!(
            query = %message,
            %campus,
            mode = ?interpretation.mode,
            exact = exact_count,
            expanded = expanded_count,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "search completed"
        );

        Ok(response)
    }

    /// Resolve the location-id filter for a campus
    ///
    /// Location keywords narrow the set by case-insensitive name
    /// containment; an over-specific guess that matches nothing falls back
    /// to the full campus set so a search never returns zero results by
    /// construction. A failed location fetch degrades to no filter at all.
    async fn location_filter(
        &self,
        campus: Campus,
        query: &crate::query::StructuredQuery,
    ) -> (Vec<String>, bool) {
        let locations = match self.store.list_locations(campus).await {
            Ok(locations) => locations,
            Err(e) => {
                warn!(error = %e, %campus, "location fetch failed, searching without location filter");
                return (Vec::new(), false);
            }
        };

        if !query.location_keywords.is_empty() {
            let matched: Vec<&Location> = locations
                .iter()
                .filter(|loc| {
                    let name = loc.name.to_lowercase();
                    query
                        .location_keywords
                        .iter()
                        .any(|keyword| name.contains(&keyword.to_lowercase()))
                })
                .collect();

            if !matched.is_empty() {
                return (matched.iter().map(|l| l.id.clone()).collect(), true);
            }
            debug!(
                keywords = ?query.location_keywords,
                "no location matched, falling back to full campus set"
            );
        }

        (locations.into_iter().map(|l| l.id).collect(), false)
    }
}
