//! Search response payloads
//!
//! Wire casing is mixed by contract: `searchInfo`, `startDate`/`endDate`,
//! and `errorDetails` are camelCase; everything else snake_case.

use crate::nlp::dates::ResolvedDate;
use crate::query::structured::ProcessingMode;
use crate::store::types::LostItem;
use serde::{Deserialize, Serialize};

/// Successful search payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub message: String,
    pub items: Vec<LostItem>,
    #[serde(rename = "searchInfo")]
    pub search_info: SearchInfo,
}

/// Diagnostic echo of every intermediate pipeline product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchInfo {
    pub original: String,
    pub campus: String,
    pub processing_mode: ProcessingMode,
    pub exact_keywords: Vec<String>,
    pub expanded_keywords: Vec<String>,
    pub location_keywords: Vec<String>,
    pub time_keywords: Vec<String>,
    pub date_filter: DateFilter,
    pub has_location_filter: bool,
    pub exact_matches: usize,
    pub expanded_matches: usize,
    pub total_results: usize,
}

/// Resolved date filter as reported to the caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateFilter {
    #[serde(rename = "startDate", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub keywords: Vec<String>,
}

impl From<&ResolvedDate> for DateFilter {
    fn from(resolved: &ResolvedDate) -> Self {
        Self {
            start_date: resolved.span.map(|s| s.start.to_string()),
            end_date: resolved.span.map(|s| s.end.to_string()),
            keywords: resolved.keywords.clone(),
        }
    }
}

/// Body of the 500 response on internal failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub items: Vec<LostItem>,
    pub error: bool,
    #[serde(rename = "errorDetails")]
    pub error_details: String,
}

impl ErrorResponse {
    pub fn internal(details: String) -> Self {
        Self {
            message: "검색 중 오류가 발생했습니다. 다시 시도해주세요.".to_string(),
            items: Vec::new(),
            error: true,
            error_details: details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::dates::DateSpan;
    use chrono::NaiveDate;

    #[test]
    fn test_wire_field_casing() {
        let response = SearchResponse {
            message: "ok".to_string(),
            items: Vec::new(),
            search_info: SearchInfo {
                original: "지갑".to_string(),
                campus: "신촌".to_string(),
                processing_mode: ProcessingMode::Local,
                exact_keywords: vec!["지갑".to_string()],
                expanded_keywords: Vec::new(),
                location_keywords: Vec::new(),
                time_keywords: Vec::new(),
                date_filter: DateFilter::default(),
                has_location_filter: false,
                exact_matches: 0,
                expanded_matches: 0,
                total_results: 0,
            },
        };

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("searchInfo").is_some());
        assert_eq!(json["searchInfo"]["processing_mode"], "Local");

        let error = serde_json::to_value(ErrorResponse::internal("boom".to_string())).unwrap();
        assert_eq!(error["errorDetails"], "boom");
        assert_eq!(error["error"], true);
    }

    #[test]
    fn test_date_filter_from_resolved() {
        let resolved = ResolvedDate {
            span: Some(DateSpan {
                start: NaiveDate::from_ymd_opt(2025, 6, 8).unwrap(),
                end: NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
            }),
            keywords: vec!["저번주".to_string(), "지난주".to_string()],
        };

        let filter = DateFilter::from(&resolved);
        assert_eq!(filter.start_date.as_deref(), Some("2025-06-08"));
        assert_eq!(filter.end_date.as_deref(), Some("2025-06-14"));
        assert_eq!(filter.keywords.len(), 2);

        let empty = DateFilter::from(&ResolvedDate::default());
        assert!(empty.start_date.is_none());
    }
}
