//! Japanese address shortening.
//!
//! Maps an upstream address (a structured `address_components` list or a
//! plain formatted string) to a compact locality-plus-neighborhood label
//! such as "港区赤坂", or `None` when no good label can be derived. Never
//! panics; a bad input just yields `None`.

use std::sync::OnceLock;

use regex::Regex;
use tg_domain::place::AddressComponent;

/// Input to [`shorten`]: either the structured component list (with the
/// formatted string as a fallback) or a bare formatted string.
#[derive(Debug, Clone)]
pub enum AddressSource {
    Structured {
        components: Vec<AddressComponent>,
        formatted: Option<String>,
    },
    Formatted {
        text: String,
    },
}

/// Component type tags whose first match supplies the locality token.
const LOCALITY_TYPES: &[&str] = &["locality", "administrative_area_level_2"];

/// Component type tags probed in order for the neighborhood token.
const NEIGHBORHOOD_TYPES: &[&str] = &[
    "sublocality",
    "sublocality_level_1",
    "sublocality_level_2",
    "sublocality_level_3",
    "neighborhood",
    "premise",
];

/// Derive a short label from an address source.
pub fn shorten(source: &AddressSource) -> Option<String> {
    match source {
        AddressSource::Structured {
            components,
            formatted,
        } => shorten_components(components)
            .or_else(|| formatted.as_deref().and_then(shorten_formatted)),
        AddressSource::Formatted { text } => shorten_formatted(text),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Structured path
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn shorten_components(components: &[AddressComponent]) -> Option<String> {
    let locality = components
        .iter()
        .find(|c| c.has_any_type(LOCALITY_TYPES))
        .map(|c| c.preferred_name().to_string())
        .filter(|s| !s.is_empty())?;

    // Probe type tags in order of specificity; within a tag, components keep
    // their upstream (most- to least-specific) order.
    for &tag in NEIGHBORHOOD_TYPES {
        for component in components {
            if !component.has_any_type(&[tag]) {
                continue;
            }
            let token = component.preferred_name();
            if is_usable_token(token) {
                return Some(format!("{locality}{token}"));
            }
        }
    }

    Some(locality)
}

/// A neighborhood token must be non-empty, must not be a block/house number
/// (digits plus an optional 丁目 suffix or hyphens), and must contain at
/// least one CJK or kana character.
fn is_usable_token(token: &str) -> bool {
    if token.is_empty() || numeric_re().is_match(token) {
        return false;
    }
    cjk_re().is_match(token)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// String path
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Shorten a plain formatted address (or a raw area string).
///
/// Strips the "日本、" country prefix, any 〒NNN-NNNN postal code, and a
/// leading prefecture, then extracts the first `{...区|市|町|村}{次の語}`
/// pair.
pub fn shorten_formatted(text: &str) -> Option<String> {
    let mut s = text.trim();
    if let Some(rest) = s.strip_prefix("日本、") {
        s = rest.trim_start();
    }

    let cleaned = postal_re().replace_all(s, "");
    let mut s = cleaned.trim_start();

    if let Some(m) = prefecture_re().find(s) {
        if m.start() == 0 {
            s = &s[m.end()..];
        }
    }

    let caps = core_re().captures(s)?;
    Some(format!("{}{}", &caps[1], &caps[2]))
}

// ── compiled patterns ────────────────────────────────────────────────

fn postal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"〒\d{3}-\d{4}\s*").unwrap())
}

fn prefecture_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(東京都|北海道|京都府|大阪府|[^\s0-9０-９]{2,3}県)").unwrap())
}

fn core_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"([^0-9０-９\s]+?[区市町村])\s*([^0-9０-９\s\-‐－−丁目]+)").unwrap()
    })
}

fn numeric_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9０-９\-‐－−ー]+(?:丁目)?$").unwrap())
}

fn cjk_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\p{Han}\p{Hiragana}\p{Katakana}]").unwrap())
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;

    fn comp(long: &str, types: &[&str]) -> AddressComponent {
        AddressComponent {
            long_name: long.into(),
            short_name: long.into(),
            types: types.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn formatted_akasaka_with_country_and_postal() {
        assert_eq!(
            shorten_formatted("日本、〒107-0052 東京都港区赤坂6丁目10−12").as_deref(),
            Some("港区赤坂")
        );
    }

    #[test]
    fn formatted_jinnan_with_postal() {
        assert_eq!(
            shorten_formatted("〒150-0041 東京都渋谷区神南1-1-1").as_deref(),
            Some("渋谷区神南")
        );
    }

    #[test]
    fn formatted_fujimi_chome() {
        assert_eq!(
            shorten_formatted("東京都千代田区富士見2丁目").as_deref(),
            Some("千代田区富士見")
        );
    }

    #[test]
    fn formatted_strips_generic_prefecture() {
        assert_eq!(
            shorten_formatted("神奈川県鎌倉市雪ノ下2丁目1-31").as_deref(),
            Some("鎌倉市雪ノ下")
        );
    }

    #[test]
    fn short_label_survives_unchanged() {
        // Idempotence: a label that already came out of the shortener maps
        // to itself.
        assert_eq!(shorten_formatted("港区赤坂").as_deref(), Some("港区赤坂"));
        assert_eq!(
            shorten_formatted("千代田区富士見").as_deref(),
            Some("千代田区富士見")
        );
    }

    #[test]
    fn formatted_without_locality_is_none() {
        assert!(shorten_formatted("6丁目10−12").is_none());
        assert!(shorten_formatted("Minato City, Tokyo").is_none());
        assert!(shorten_formatted("").is_none());
    }

    #[test]
    fn structured_locality_plus_sublocality() {
        let source = AddressSource::Structured {
            components: vec![
                comp("10-12", &["premise"]),
                comp("6丁目", &["sublocality_level_2"]),
                comp("赤坂", &["sublocality_level_1"]),
                comp("港区", &["locality"]),
                comp("東京都", &["administrative_area_level_1"]),
            ],
            formatted: None,
        };
        assert_eq!(shorten(&source).as_deref(), Some("港区赤坂"));
    }

    #[test]
    fn structured_rejects_numeric_tokens() {
        // 丁目/house-number components must not win the neighborhood slot.
        let source = AddressSource::Structured {
            components: vec![
                comp("1-1-1", &["premise"]),
                comp("2丁目", &["sublocality_level_2"]),
                comp("千代田区", &["locality"]),
            ],
            formatted: None,
        };
        assert_eq!(shorten(&source).as_deref(), Some("千代田区"));
    }

    #[test]
    fn structured_rejects_non_japanese_tokens() {
        let source = AddressSource::Structured {
            components: vec![
                comp("Block A", &["sublocality_level_1"]),
                comp("渋谷区", &["locality"]),
            ],
            formatted: None,
        };
        assert_eq!(shorten(&source).as_deref(), Some("渋谷区"));
    }

    #[test]
    fn structured_ward_via_admin_level_2() {
        let source = AddressSource::Structured {
            components: vec![
                comp("神南", &["sublocality_level_1"]),
                comp("渋谷区", &["administrative_area_level_2"]),
            ],
            formatted: None,
        };
        assert_eq!(shorten(&source).as_deref(), Some("渋谷区神南"));
    }

    #[test]
    fn structured_without_locality_falls_back_to_formatted() {
        let source = AddressSource::Structured {
            components: vec![comp("赤坂", &["sublocality_level_1"])],
            formatted: Some("東京都港区赤坂6丁目10−12".into()),
        };
        assert_eq!(shorten(&source).as_deref(), Some("港区赤坂"));
    }

    #[test]
    fn structured_without_any_source_is_none() {
        let source = AddressSource::Structured {
            components: vec![],
            formatted: None,
        };
        assert!(shorten(&source).is_none());
    }
}
