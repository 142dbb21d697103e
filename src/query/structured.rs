//! The normalized, multi-field interpretation of a raw search string

use serde::{Deserialize, Serialize};

/// Structured interpretation of a search message, produced per request
/// either by the rule-based path or by the external model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructuredQuery {
    /// Normalized tokens from the raw input, in input order
    pub exact_keywords: Vec<String>,
    /// Synonym-expanded tokens (colors, item types, location aliases)
    pub expanded_keywords: Vec<String>,
    /// Tokens identifying candidate building/room names
    pub location_keywords: Vec<String>,
    /// Recognized temporal phrases
    pub time_keywords: Vec<String>,
}

impl StructuredQuery {
    /// Exact tokens with temporal tokens removed
    ///
    /// Temporal tokens are already applied as a hard date filter upstream
    /// and must not also gate text matching.
    pub fn non_time_keywords(&self) -> Vec<&str> {
        self.exact_keywords
            .iter()
            .filter(|k| !self.time_keywords.contains(k))
            .map(String::as_str)
            .collect()
    }
}

/// Which interpretation path actually produced the structured query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessingMode {
    #[serde(rename = "AI")]
    Model,
    #[serde(rename = "Local")]
    Local,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_time_keywords_filters_temporal_tokens() {
        let query = StructuredQuery {
            exact_keywords: vec!["6월".into(), "첫째주".into(), "지갑".into()],
            time_keywords: vec!["6월".into(), "첫째주".into()],
            ..Default::default()
        };
        assert_eq!(query.non_time_keywords(), vec!["지갑"]);
    }

    #[test]
    fn test_processing_mode_wire_names() {
        assert_eq!(
            serde_json::to_string(&ProcessingMode::Model).unwrap(),
            "\"AI\""
        );
        assert_eq!(
            serde_json::to_string(&ProcessingMode::Local).unwrap(),
            "\"Local\""
        );
    }
}
