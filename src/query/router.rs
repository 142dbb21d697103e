//! Query routing: rule-based interpretation vs. model escalation
//!
//! Nearly every query is answered by local tokenization plus the lexicon
//! tables. The external model is reserved for long, abstract queries with
//! no recognizable date anchor; the gate is deliberately conservative
//! because each escalation is a paid call. Any failure on the model path
//! falls back to the local path — a fallback, never an error.

use crate::core::error::Result;
use crate::llm::ChatClient;
use crate::nlp::dates::ResolvedDate;
use crate::nlp::lexicon;
use crate::query::structured::{ProcessingMode, StructuredQuery};
use crate::store::types::Campus;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

/// Message length (chars) below which the model is never consulted
const MODEL_MIN_CHARS: usize = 100;

/// Marker phrase indicating a vague similarity query
const VAGUE_MARKER: &str = "같은 느낌의";

/// System instruction for the model path. Strict JSON, the four array
/// fields, plus the nickname and time hints the rule tables encode.
const SYSTEM_PROMPT: &str = r#"JSON: {"exact_keywords":[], "expanded_keywords":[], "location_keywords":[], "time_keywords":[]}
도서관: 신중도→연세삼성학술정보관, 중도→중앙도서관(신촌)/언더우드 기념 도서관(송도), 언기도→언더우드 기념 도서관
시간: 어제,오늘,지난주,이번주,6월,5월"#;

static MONTH_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+월").expect("month pattern is valid"));

static RELATIVE_DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new("어제|오늘|내일|저번주|지난주|이번주").expect("relative-date pattern is valid")
});

/// Interpretation outcome: the structured query plus the path that
/// actually produced it
#[derive(Debug, Clone)]
pub struct Interpretation {
    pub query: StructuredQuery,
    pub mode: ProcessingMode,
}

/// Decide whether a message warrants the external model
///
/// All four conditions must hold: long message, explicit vague-similarity
/// marker, no month pattern, no relative-date marker. Dates are cheaper
/// and more reliable through the deterministic resolver.
pub fn should_use_model(message: &str) -> bool {
    message.chars().count() > MODEL_MIN_CHARS
        && message.contains(VAGUE_MARKER)
        && !MONTH_PATTERN.is_match(message)
        && !RELATIVE_DATE_PATTERN.is_match(message)
}

/// Interpret a message into a structured query
///
/// `resolved` is the Date-Phrase Resolver output for the same message; its
/// keywords are unioned into `time_keywords` on both paths, since the
/// model does not share the resolver's day arithmetic.
pub async fn interpret(
    message: &str,
    campus: Campus,
    resolved: &ResolvedDate,
    model: Option<&ChatClient>,
) -> Interpretation {
    if let Some(client) = model.filter(|_| should_use_model(message)) {
        match interpret_with_model(client, message).await {
            Ok(mut query) => {
                union_time_keywords(&mut query, resolved);
                debug!(?query, "model interpretation succeeded");
                return Interpretation {
                    query,
                    mode: ProcessingMode::Model,
                };
            }
            Err(e) => {
                warn!(error = %e, "model interpretation failed, falling back to local");
            }
        }
    }

    let mut query = interpret_locally(message, campus);
    union_time_keywords(&mut query, resolved);
    Interpretation {
        query,
        mode: ProcessingMode::Local,
    }
}

/// Rule-based path: tokenize and expand through the lexicon tables
pub fn interpret_locally(message: &str, campus: Campus) -> StructuredQuery {
    let tokens = tokenize(message);
    let expansion = lexicon::expand(&tokens, campus);

    StructuredQuery {
        exact_keywords: tokens,
        expanded_keywords: expansion.expanded_keywords,
        location_keywords: expansion.location_keywords,
        time_keywords: Vec::new(),
    }
}

async fn interpret_with_model(client: &ChatClient, message: &str) -> Result<StructuredQuery> {
    let completion = client.complete(SYSTEM_PROMPT, message).await?;
    Ok(parse_model_output(&completion))
}

/// Parse model output into a structured query, tolerating sloppy JSON
///
/// The completion is scrubbed of code fences and control characters, the
/// first balanced object is extracted, and each of the four fields is
/// pulled individually — a missing or non-array field becomes an empty
/// list rather than failing the request.
pub fn parse_model_output(completion: &str) -> StructuredQuery {
    let cleaned = sanitize(completion);
    let object = match extract_object(&cleaned) {
        Some(o) => o,
        None => return StructuredQuery::default(),
    };

    let value: serde_json::Value = match serde_json::from_str(object) {
        Ok(v) => v,
        Err(e) => {
            debug!(error = %e, "model output is not valid JSON");
            return StructuredQuery::default();
        }
    };

    StructuredQuery {
        exact_keywords: string_array(&value, "exact_keywords"),
        expanded_keywords: string_array(&value, "expanded_keywords"),
        location_keywords: string_array(&value, "location_keywords"),
        time_keywords: string_array(&value, "time_keywords"),
    }
}

/// Lowercase, split on whitespace, keep tokens longer than one character
fn tokenize(message: &str) -> Vec<String> {
    message
        .to_lowercase()
        .split_whitespace()
        .filter(|word| word.chars().count() > 1)
        .map(str::to_string)
        .collect()
}

fn union_time_keywords(query: &mut StructuredQuery, resolved: &ResolvedDate) {
    for keyword in &resolved.keywords {
        if !query.time_keywords.contains(keyword) {
            query.time_keywords.push(keyword.clone());
        }
    }
}

/// Strip code-fence markers, stray backticks, and C0/C1 control characters
fn sanitize(text: &str) -> String {
    text.trim()
        .replace("```json", "")
        .replace("```", "")
        .replace('`', "")
        .chars()
        .filter(|c| !c.is_control() && !('\u{7f}'..='\u{9f}').contains(c))
        .collect()
}

/// Extract the first balanced `{...}` substring, string- and escape-aware
fn extract_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

fn string_array(value: &serde_json::Value, field: &str) -> Vec<String> {
    value
        .get(field)
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ModelConfig;
    use crate::nlp::dates;
    use chrono::NaiveDate;

    fn long_vague_message() -> String {
        format!(
            "저기요 혹시 도서관 근처 어딘가에서 제가 예전부터 정말 아끼던 물건을 잃어버렸는데요 {} 둥글고 부드러운 재질에 손잡이가 달려 있고 옆면에 작은 주머니가 있는 물건이에요 어디서 잃어버렸는지 기억이 나지 않아서 너무 속상합니다",
            VAGUE_MARKER
        )
    }

    #[test]
    fn test_model_gate_requires_all_conditions() {
        let long_vague = long_vague_message();
        assert!(long_vague.chars().count() > MODEL_MIN_CHARS);
        assert!(should_use_model(&long_vague));

        // Short message
        assert!(!should_use_model("같은 느낌의 지갑"));

        // Long but no vague marker
        let long_plain = "아".repeat(150);
        assert!(!should_use_model(&long_plain));

        // Month pattern suppresses the model
        let with_month = format!("{} 6월에 잃어버림", long_vague);
        assert!(!should_use_model(&with_month));

        // Relative-date marker suppresses the model
        let with_date = format!("{} 어제 잃어버림", long_vague);
        assert!(!should_use_model(&with_date));
    }

    #[test]
    fn test_tokenize_drops_single_char_words() {
        let tokens = tokenize("저번주 과학관 앞 아이폰 A");
        assert_eq!(tokens, vec!["저번주", "과학관", "아이폰"]);
    }

    #[test]
    fn test_local_interpretation_expands_lexicon() {
        let query = interpret_locally("신중도 블랙 아이폰", Campus::Sinchon);
        assert_eq!(query.exact_keywords, vec!["신중도", "블랙", "아이폰"]);
        assert!(query
            .location_keywords
            .contains(&"연세삼성학술정보관".to_string()));
        assert!(query.expanded_keywords.contains(&"검은색".to_string()));
        assert!(query.expanded_keywords.contains(&"휴대폰".to_string()));
        assert!(query.time_keywords.is_empty());
    }

    #[test]
    fn test_parse_model_output_fenced() {
        let completion = "```json\n{\"exact_keywords\": [\"지갑\"], \"expanded_keywords\": [\"wallet\"], \"location_keywords\": [], \"time_keywords\": [\"어제\"]}\n```";
        let query = parse_model_output(completion);
        assert_eq!(query.exact_keywords, vec!["지갑"]);
        assert_eq!(query.expanded_keywords, vec!["wallet"]);
        assert_eq!(query.time_keywords, vec!["어제"]);
    }

    #[test]
    fn test_parse_model_output_with_prose_and_control_chars() {
        let completion = "Here you go:\u{0001}\n{\"exact_keywords\": [\"우산\"], \"time_keywords\": []} hope that helps";
        let query = parse_model_output(completion);
        assert_eq!(query.exact_keywords, vec!["우산"]);
    }

    #[test]
    fn test_parse_model_output_substitutes_missing_fields() {
        // expanded_keywords malformed, location_keywords absent
        let completion =
            r#"{"exact_keywords": ["지갑"], "expanded_keywords": "wallet", "time_keywords": [1]}"#;
        let query = parse_model_output(completion);
        assert_eq!(query.exact_keywords, vec!["지갑"]);
        assert!(query.expanded_keywords.is_empty());
        assert!(query.location_keywords.is_empty());
        assert!(query.time_keywords.is_empty());
    }

    #[test]
    fn test_parse_model_output_garbage_yields_empty_query() {
        let query = parse_model_output("I could not produce JSON, sorry.");
        assert!(query.exact_keywords.is_empty());
        assert!(query.expanded_keywords.is_empty());
    }

    #[test]
    fn test_extract_object_is_balanced_not_greedy() {
        let text = r#"{"a": {"b": 1}} trailing {"c": 2}"#;
        assert_eq!(extract_object(text), Some(r#"{"a": {"b": 1}}"#));

        // Braces inside strings don't affect depth
        let tricky = r#"{"a": "}{", "b": []}"#;
        assert_eq!(extract_object(tricky), Some(tricky));
    }

    #[tokio::test]
    async fn test_interpret_falls_back_on_transport_failure() {
        let config = ModelConfig {
            api_base: "http://127.0.0.1:1".to_string(),
            timeout_secs: 1,
            ..ModelConfig::default()
        };
        let client = ChatClient::new(&config, "test-key".to_string());

        let message = long_vague_message();
        let today = NaiveDate::from_ymd_opt(2025, 6, 18).unwrap();
        let resolved = dates::resolve(&message, today);

        let interpretation = interpret(&message, Campus::Sinchon, &resolved, Some(&client)).await;
        assert_eq!(interpretation.mode, ProcessingMode::Local);
        // Local token splitting still produced keywords
        assert!(!interpretation.query.exact_keywords.is_empty());
    }

    #[tokio::test]
    async fn test_interpret_skips_model_for_simple_queries() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 18).unwrap();
        let resolved = dates::resolve("저번주 과학관 아이폰", today);

        let interpretation =
            interpret("저번주 과학관 아이폰", Campus::Sinchon, &resolved, None).await;
        assert_eq!(interpretation.mode, ProcessingMode::Local);
        assert_eq!(
            interpretation.query.time_keywords,
            vec!["저번주", "지난주"]
        );
        assert!(interpretation
            .query
            .expanded_keywords
            .contains(&"휴대폰".to_string()));
    }
}
