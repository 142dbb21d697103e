//! Result matching and ranking
//!
//! Two-tier policy: exact matches (every non-temporal token present in the
//! item's searchable text) always rank first; synonym-expanded matches are
//! computed only when exact results are scarce, because fuzzy results are
//! only worth the noise when precise results run out.

use crate::query::structured::StructuredQuery;
use crate::store::types::LostItem;

/// Display cap for exact matches
pub const EXACT_CAP: usize = 15;

/// Display cap for expanded matches
pub const EXPANDED_CAP: usize = 10;

/// Exact-match count below which expansion kicks in
pub const EXPANSION_THRESHOLD: usize = 5;

/// Partitioned, truncated match lists; the two are disjoint
#[derive(Debug, Default)]
pub struct MatchOutcome {
    pub exact: Vec<LostItem>,
    pub expanded: Vec<LostItem>,
}

impl MatchOutcome {
    /// Exact matches first, then expanded
    pub fn combined(&self) -> Vec<LostItem> {
        let mut items = self.exact.clone();
        items.extend(self.expanded.iter().cloned());
        items
    }
}

/// Partition candidates into exact and expanded matches
pub fn match_items(items: &[LostItem], query: &StructuredQuery) -> MatchOutcome {
    let non_time = query.non_time_keywords();

    // A purely temporal/location query matches everything it was given;
    // the date and location filters already did the narrowing.
    if non_time.is_empty() {
        return MatchOutcome {
            exact: items.iter().take(EXACT_CAP).cloned().collect(),
            expanded: Vec::new(),
        };
    }

    let mut exact = Vec::new();
    for item in items {
        let blob = item.search_blob();
        if non_time
            .iter()
            .all(|keyword| blob.contains(&keyword.to_lowercase()))
        {
            exact.push(item.clone());
        }
    }

    let mut expanded = Vec::new();
    if exact.len() < EXPANSION_THRESHOLD && !query.expanded_keywords.is_empty() {
        for item in items {
            if exact.iter().any(|e| e.id == item.id) {
                continue;
            }
            let blob = item.search_blob();
            if query
                .expanded_keywords
                .iter()
                .any(|keyword| blob.contains(&keyword.to_lowercase()))
            {
                expanded.push(item.clone());
            }
        }
    }

    exact.truncate(EXACT_CAP);
    expanded.truncate(EXPANDED_CAP);

    MatchOutcome { exact, expanded }
}

/// Compose the user-facing summary sentence
///
/// Branches over exact+expanded / exact-only / expanded-only / none; the
/// campus name and recognized time phrase are prefixed when present.
pub fn compose_message(
    original: &str,
    campus: &str,
    time_keywords: &[String],
    exact_count: usize,
    expanded_count: usize,
) -> String {
    let campus_text = if campus.is_empty() {
        String::new()
    } else {
        format!("{} 캠퍼스에서 ", campus)
    };
    let time_text = if time_keywords.is_empty() {
        String::new()
    } else {
        format!("{} 기간의 ", time_keywords.join(", "))
    };

    let total = exact_count + expanded_count;
    if total == 0 {
        return format!(
            "{}{}\"{}\"와 관련된 분실물을 찾지 못했습니다. 다른 키워드로 검색해보시거나, 더 구체적인 정보를 입력해주세요.",
            campus_text, time_text, original
        );
    }

    if exact_count > 0 && expanded_count > 0 {
        format!(
            "{}{}\"{}\"와 정확히 일치하는 {}개와 관련된 {}개, 총 {}개의 분실물을 찾았습니다!",
            campus_text, time_text, original, exact_count, expanded_count, total
        )
    } else if exact_count > 0 {
        format!(
            "{}{}\"{}\"와 정확히 일치하는 {}개의 분실물을 찾았습니다!",
            campus_text, time_text, original, exact_count
        )
    } else {
        format!(
            "{}{}\"{}\"와 관련된 {}개의 분실물을 찾았습니다.",
            campus_text, time_text, original, expanded_count
        )
    }
}
