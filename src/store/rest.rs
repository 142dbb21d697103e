//! PostgREST-backed item store
//!
//! The production datastore is a hosted Postgres exposed through a
//! PostgREST API (a Supabase project). Filtering here is equality/range
//! only — `eq.`, `in.(...)`, `gte.`/`lte.` operators on indexed columns.

use crate::core::config::StoreConfig;
use crate::core::error::{Error, Result};
use crate::nlp::dates::DateSpan;
use crate::store::types::{Campus, ItemStatus, Location, LostItem};
use crate::store::ItemStore;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Columns selected for item rows, with the found-location join embedded
const ITEM_SELECT: &str = "id,item_name,description,stored_location,found_date,status,created_at,\
                           image_url,finder_name,contact_info,\
                           found_location:locations(name,emoji,campus)";

const LOCATION_SELECT: &str = "id,name,campus,emoji,is_active";

pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl RestStore {
    pub fn new(config: &StoreConfig, api_key: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: config.api_base.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn request(&self, table: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        let mut req = self.client.get(url);
        if let Some(key) = &self.api_key {
            req = req
                .header("apikey", key)
                .header("Authorization", format!("Bearer {}", key));
        }
        req
    }

    fn store_error(context: &str, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::StoreError {
                message: format!("{}: request timed out", context),
            }
        } else {
            Error::StoreError {
                message: format!("{}: {}", context, e),
            }
        }
    }

    async fn check_status(context: &str, res: reqwest::Response) -> Result<reqwest::Response> {
        if res.status().is_success() {
            return Ok(res);
        }
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        Err(Error::StoreError {
            message: format!("{}: HTTP {} - {}", context, status, body),
        })
    }
}

#[async_trait]
impl ItemStore for RestStore {
    async fn list_locations(&self, campus: Campus) -> Result<Vec<Location>> {
        let campus_filter = format!("eq.{}", campus);
        let res = self
            .request("locations")
            .query(&[
                ("select", LOCATION_SELECT),
                ("campus", campus_filter.as_str()),
                ("is_active", "eq.true"),
                ("order", "name"),
            ])
            .send()
            .await
            .map_err(|e| Self::store_error("Location fetch failed", e))?;

        let res = Self::check_status("Location fetch failed", res).await?;
        res.json()
            .await
            .map_err(|e| Self::store_error("Location response parse failed", e))
    }

    async fn list_items(
        &self,
        location_ids: &[String],
        status: ItemStatus,
        span: Option<DateSpan>,
        limit: usize,
    ) -> Result<Vec<LostItem>> {
        let limit = limit.to_string();
        let mut params: Vec<(&str, String)> = vec![
            ("select", ITEM_SELECT.to_string()),
            ("status", format!("eq.{}", status.as_str())),
            ("order", "created_at.desc".to_string()),
            ("limit", limit),
        ];

        if !location_ids.is_empty() {
            params.push(("found_location", format!("in.({})", location_ids.join(","))));
        }

        if let Some(span) = span {
            params.push(("found_date", format!("gte.{}", span.start)));
            params.push(("found_date", format!("lte.{}", span.end)));
        }

        let res = self
            .request("lost_items")
            .query(&params)
            .send()
            .await
            .map_err(|e| Self::store_error("Item fetch failed", e))?;

        let res = Self::check_status("Item fetch failed", res).await?;
        res.json()
            .await
            .map_err(|e| Self::store_error("Item response parse failed", e))
    }
}
