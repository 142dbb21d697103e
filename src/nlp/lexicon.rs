//! Keyword expansion tables
//!
//! Static synonym tables for building nicknames, colors, and item
//! categories. Loaded once; never mutated. Building nicknames are
//! campus-aware because the same nickname can resolve to different
//! buildings on different campuses.

use crate::store::types::Campus;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Expansion output; both sets are deduplicated, first-seen order kept
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    pub expanded_keywords: Vec<String>,
    pub location_keywords: Vec<String>,
}

/// Building nickname -> campus -> canonical building names
static BUILDING_NICKNAMES: Lazy<HashMap<&'static str, HashMap<Campus, Vec<&'static str>>>> =
    Lazy::new(|| {
        let mut map = HashMap::new();
        map.insert(
            "신중도",
            HashMap::from([(Campus::Sinchon, vec!["연세삼성학술정보관"])]),
        );
        map.insert(
            "중도",
            HashMap::from([
                (Campus::Sinchon, vec!["중앙도서관"]),
                (Campus::Songdo, vec!["언더우드 기념 도서관"]),
            ]),
        );
        map.insert(
            "언기도",
            HashMap::from([(Campus::Songdo, vec!["언더우드 기념 도서관"])]),
        );
        map.insert(
            "도서관",
            HashMap::from([
                (Campus::Sinchon, vec!["중앙도서관", "연세삼성학술정보관"]),
                (Campus::Songdo, vec!["언더우드 기념 도서관"]),
            ]),
        );
        map
    });

/// Color canonical -> variant spellings
static COLORS: Lazy<HashMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
    HashMap::from([
        ("검은색", vec!["검은", "검정", "블랙", "black"]),
        ("하얀색", vec!["흰", "흰색", "화이트", "white"]),
        ("빨간색", vec!["빨강", "레드", "red"]),
        ("파란색", vec!["파랑", "블루", "blue"]),
        ("노란색", vec!["노랑", "옐로우", "yellow"]),
        ("초록색", vec!["초록", "그린", "green"]),
    ])
});

/// Item category canonical -> variant names
static ITEM_CATEGORIES: Lazy<HashMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
    HashMap::from([
        ("휴대폰", vec!["핸드폰", "폰", "아이폰", "갤럭시", "스마트폰"]),
        ("지갑", vec!["wallet", "월렛", "카드지갑"]),
        ("우산", vec!["양산", "umbrella"]),
        ("가방", vec!["백팩", "책가방", "숄더백", "토트백"]),
        ("이어폰", vec!["에어팟", "헤드폰", "이어버드", "airpods"]),
        ("충전기", vec!["어댑터", "케이블", "선"]),
    ])
});

/// Expand query tokens into synonym and location sets for a campus
///
/// Matching rules:
/// - building nickname: exact token equality, resolved per campus;
/// - color: token equals the canonical or any variant;
/// - category: token equals a variant, or contains the canonical name
///   as a substring ("카드지갑" matches 지갑 by containment).
pub fn expand(tokens: &[String], campus: Campus) -> Expansion {
    let mut expanded = Vec::new();
    let mut locations = Vec::new();

    for token in tokens {
        if let Some(per_campus) = BUILDING_NICKNAMES.get(token.as_str()) {
            if let Some(buildings) = per_campus.get(&campus) {
                for building in buildings {
                    push_unique(&mut locations, building);
                    push_unique(&mut expanded, building);
                }
            }
        }
    }

    for token in tokens {
        for (canonical, variants) in COLORS.iter() {
            if token == canonical || variants.iter().any(|v| v == token) {
                push_unique(&mut expanded, canonical);
                for variant in variants {
                    push_unique(&mut expanded, variant);
                }
            }
        }
    }

    for token in tokens {
        for (canonical, variants) in ITEM_CATEGORIES.iter() {
            if variants.iter().any(|v| v == token) || token.contains(canonical) {
                push_unique(&mut expanded, canonical);
                for variant in variants {
                    push_unique(&mut expanded, variant);
                }
            }
        }
    }

    Expansion {
        expanded_keywords: expanded,
        location_keywords: locations,
    }
}

fn push_unique(set: &mut Vec<String>, value: &str) {
    if !set.iter().any(|existing| existing == value) {
        set.push(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_nickname_resolves_per_campus() {
        let sinchon = expand(&tokens(&["중도"]), Campus::Sinchon);
        assert_eq!(sinchon.location_keywords, vec!["중앙도서관"]);

        let songdo = expand(&tokens(&["중도"]), Campus::Songdo);
        assert_eq!(songdo.location_keywords, vec!["언더우드 기념 도서관"]);

        // 신중도 only exists on the Sinchon campus
        let missing = expand(&tokens(&["신중도"]), Campus::Songdo);
        assert!(missing.location_keywords.is_empty());
    }

    #[test]
    fn test_color_matches_canonical_and_variants() {
        let from_variant = expand(&tokens(&["블랙"]), Campus::Sinchon);
        assert!(from_variant.expanded_keywords.contains(&"검은색".to_string()));
        assert!(from_variant.expanded_keywords.contains(&"black".to_string()));

        let from_canonical = expand(&tokens(&["검은색"]), Campus::Sinchon);
        assert_eq!(
            from_canonical.expanded_keywords,
            from_variant.expanded_keywords
        );
    }

    #[test]
    fn test_category_matches_by_variant_or_containment() {
        let by_variant = expand(&tokens(&["에어팟"]), Campus::Sinchon);
        assert!(by_variant.expanded_keywords.contains(&"이어폰".to_string()));

        // "카드지갑" contains the canonical "지갑"
        let by_containment = expand(&tokens(&["카드지갑"]), Campus::Sinchon);
        assert!(by_containment.expanded_keywords.contains(&"지갑".to_string()));
        assert!(by_containment.expanded_keywords.contains(&"wallet".to_string()));
    }

    #[test]
    fn test_expansion_is_deduplicated() {
        // Both tokens expand to the same wallet set
        let expansion = expand(&tokens(&["지갑", "카드지갑"]), Campus::Sinchon);
        let wallets = expansion
            .expanded_keywords
            .iter()
            .filter(|k| *k == "지갑")
            .count();
        assert_eq!(wallets, 1);
    }

    #[test]
    fn test_expand_is_idempotent() {
        let input = tokens(&["중도", "블랙", "아이폰"]);
        let first = expand(&input, Campus::Sinchon);
        let second = expand(&input, Campus::Sinchon);
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_tokens_expand_to_nothing() {
        let expansion = expand(&tokens(&["텀블러"]), Campus::Sinchon);
        assert!(expansion.expanded_keywords.is_empty());
        assert!(expansion.location_keywords.is_empty());
    }
}
