//! Parsers for the LLM's answer.
//!
//! Models answer in one of three shapes: a strict JSON object, JSON buried
//! in a fenced block or surrounding prose, or a markdown list with bold
//! names. The attempts run in order and the first that yields at least one
//! named item wins.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use tg_domain::concierge::Recommendation;

/// Parse assistant content into recommendations.
///
/// `None` means no shape applied at all and the caller should fall back;
/// `Some(vec![])` means the model answered in a recognized shape but
/// recommended nothing, which is a valid (empty) plan, not a parse failure.
pub fn parse_plan(content: &str) -> Option<Vec<Recommendation>> {
    parse_strict_json(content)
        .or_else(|| parse_embedded_json(content))
        .or_else(|| parse_markdown_list(content))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Attempt 1: strict JSON
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn parse_strict_json(content: &str) -> Option<Vec<Recommendation>> {
    let value: Value = serde_json::from_str(content.trim()).ok()?;
    normalize_value(&value)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Attempt 2: JSON inside fences or prose
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn parse_embedded_json(content: &str) -> Option<Vec<Recommendation>> {
    if let Some(fenced) = extract_fenced_block(content) {
        if let Ok(value) = serde_json::from_str::<Value>(fenced.trim()) {
            if let Some(recs) = normalize_value(&value) {
                return Some(recs);
            }
        }
    }

    let braced = extract_balanced_object(content)?;
    let value: Value = serde_json::from_str(braced).ok()?;
    normalize_value(&value)
}

/// The body of the first ``` fence (with or without a `json` tag).
fn extract_fenced_block(content: &str) -> Option<&str> {
    let start = content.find("```")?;
    let after = &content[start + 3..];
    // Skip the language tag line, if any.
    let body_start = after.find('\n').map(|i| i + 1).unwrap_or(0);
    let body = &after[body_start..];
    let end = body.find("```")?;
    Some(&body[..end])
}

/// The first balanced `{...}` substring, string-literal aware.
fn extract_balanced_object(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let bytes = content.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&content[start..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Attempt 3: markdown list
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn item_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(?:\d+[.)．]|[-*・])\s*(.+)$").unwrap())
}

fn bold_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*([^*]+)\*\*\s*[:：]?\s*(.*)").unwrap())
}

/// Numbered or bulleted list where each item is `**Name** reason`, or the
/// name on the item line and the reason on the following line(s).
fn parse_markdown_list(content: &str) -> Option<Vec<Recommendation>> {
    let mut recs: Vec<Recommendation> = Vec::new();

    for line in content.lines() {
        if let Some(caps) = item_re().captures(line) {
            let text = caps[1].trim();
            let (name, reason) = match bold_re().captures(text) {
                Some(b) => (b[1].trim().to_string(), b[2].trim().to_string()),
                None => (text.to_string(), String::new()),
            };
            if name.is_empty() {
                continue;
            }
            recs.push(Recommendation {
                name,
                reason,
                ..Default::default()
            });
        } else if let Some(last) = recs.last_mut() {
            // Continuation line: becomes the reason when the item line held
            // only the name.
            let text = line.trim();
            if !text.is_empty() && last.reason.is_empty() {
                last.reason = text.to_string();
            }
        }
    }

    if recs.is_empty() {
        None
    } else {
        Some(recs)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Normalization
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

const NAME_KEYS: &[&str] = &["name", "名称", "神社名"];
const LOCATION_KEYS: &[&str] = &["location", "住所", "場所"];
const REASON_KEYS: &[&str] = &["reason", "特徴", "説明", "description"];

/// Accept `{"recommendations": [...]}` or a bare array; normalize each item
/// through the multi-key lookup. `None` only when the shape itself does not
/// match; an empty list is a successful parse.
fn normalize_value(value: &Value) -> Option<Vec<Recommendation>> {
    let items = match value {
        Value::Object(map) => map.get("recommendations")?.as_array()?,
        Value::Array(items) => items,
        _ => return None,
    };

    Some(items.iter().filter_map(normalize_item).collect())
}

fn normalize_item(item: &Value) -> Option<Recommendation> {
    let name = string_for_keys(item, NAME_KEYS)?;
    let location = string_for_keys(item, LOCATION_KEYS).filter(|s| !is_coordinate_like(s));
    let reason = string_for_keys(item, REASON_KEYS).unwrap_or_default();

    Some(Recommendation {
        name,
        reason,
        location,
        score: None,
        formatted_address: string_for_keys(item, &["formatted_address"]),
        address: None,
    })
}

fn string_for_keys(item: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| item.get(*k))
        .filter_map(|v| v.as_str())
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(String::from)
}

/// True for values like "35.6,139.7": raw coordinates never become a
/// location label.
pub(crate) fn is_coordinate_like(s: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\d\s.,+\-]+$").unwrap()).is_match(s.trim())
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_json_object() {
        let content = r#"{"recommendations":[{"name":"赤坂氷川神社","location":"港区赤坂","reason":"縁結びの名社"}]}"#;
        let recs = parse_plan(content).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].name, "赤坂氷川神社");
        assert_eq!(recs[0].location.as_deref(), Some("港区赤坂"));
    }

    #[test]
    fn japanese_keys_normalize() {
        let content = r#"{"recommendations":[{"神社名":"東京大神宮","住所":"千代田区富士見","特徴":"縁結び"}]}"#;
        let recs = parse_plan(content).unwrap();
        assert_eq!(recs[0].name, "東京大神宮");
        assert_eq!(recs[0].location.as_deref(), Some("千代田区富士見"));
        assert_eq!(recs[0].reason, "縁結び");
    }

    #[test]
    fn fenced_json_block() {
        let content = "おすすめはこちらです。\n```json\n{\"recommendations\":[{\"name\":\"神社A\"}]}\n```\n以上です。";
        let recs = parse_plan(content).unwrap();
        assert_eq!(recs[0].name, "神社A");
    }

    #[test]
    fn generic_fence_without_tag() {
        let content = "```\n{\"recommendations\":[{\"name\":\"神社B\"}]}\n```";
        let recs = parse_plan(content).unwrap();
        assert_eq!(recs[0].name, "神社B");
    }

    #[test]
    fn balanced_object_in_prose() {
        let content = "結果は {\"recommendations\":[{\"name\":\"神社C\",\"reason\":\"静かな\\\"名所\\\"\"}]} となります";
        let recs = parse_plan(content).unwrap();
        assert_eq!(recs[0].name, "神社C");
    }

    #[test]
    fn markdown_numbered_bold_list() {
        let content = "1. **赤坂氷川神社** 縁結びで有名です\n2. **東京大神宮** 恋愛成就の神社";
        let recs = parse_plan(content).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].name, "赤坂氷川神社");
        assert_eq!(recs[0].reason, "縁結びで有名です");
        assert_eq!(recs[1].name, "東京大神宮");
    }

    #[test]
    fn markdown_name_then_reason_line() {
        let content = "- **神田明神**\n  商売繁盛のご利益があります\n- **日枝神社**\n  仕事運で知られます";
        let recs = parse_plan(content).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].reason, "商売繁盛のご利益があります");
        assert_eq!(recs[1].name, "日枝神社");
    }

    #[test]
    fn coordinates_never_become_locations() {
        let content =
            r#"{"recommendations":[{"name":"神社D","location":"35.6812,139.7671"}]}"#;
        let recs = parse_plan(content).unwrap();
        assert!(recs[0].location.is_none());
    }

    #[test]
    fn items_without_names_are_dropped() {
        let content = r#"{"recommendations":[{"reason":"名無し"},{"name":"神社E"}]}"#;
        let recs = parse_plan(content).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].name, "神社E");
    }

    #[test]
    fn prose_without_structure_is_none() {
        assert!(parse_plan("申し訳ありませんが、お答えできません。").is_none());
        assert!(parse_plan("").is_none());
    }

    #[test]
    fn empty_recommendations_array_is_an_empty_plan() {
        // A recognized shape with zero items parses to an empty plan; the
        // caller must not mistake it for "nothing parsable".
        let recs = parse_plan(r#"{"recommendations":[]}"#).unwrap();
        assert!(recs.is_empty());
    }
}
