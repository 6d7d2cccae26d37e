//! Query-intent keyword table.
//!
//! Maps wish keywords in the user's query to canned Japanese reasons. The
//! first matching substring wins; queries with no match get the neutral
//! default.

/// Reason used when no intent keyword matches.
pub const NEUTRAL_REASON: &str = "ご利益で知られる神社です。";

const INTENT_REASONS: &[(&str, &str)] = &[
    ("縁結び", "縁結びのご利益で名高い神社です。"),
    ("学業", "学業成就・合格祈願で知られる神社です。"),
    ("仕事", "仕事運・出世運のご利益があるとされる神社です。"),
    ("金運", "金運上昇のご利益で知られる神社です。"),
    ("健康", "健康長寿のご利益があるとされる神社です。"),
    ("厄除", "厄除け・厄払いで知られる神社です。"),
];

/// The canned reason for the first intent keyword found in `query`.
pub fn reason_for_query(query: &str) -> Option<&'static str> {
    INTENT_REASONS
        .iter()
        .find(|(keyword, _)| query.contains(keyword))
        .map(|(_, reason)| *reason)
}

/// Like [`reason_for_query`], falling back to [`NEUTRAL_REASON`].
pub fn reason_or_default(query: &str) -> &'static str {
    reason_for_query(query).unwrap_or(NEUTRAL_REASON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enmusubi_matches() {
        assert_eq!(
            reason_for_query("縁結び 徒歩").unwrap(),
            "縁結びのご利益で名高い神社です。"
        );
    }

    #[test]
    fn first_keyword_wins() {
        // Both 縁結び and 金運 appear; table order decides.
        let reason = reason_for_query("縁結びと金運").unwrap();
        assert!(reason.contains("縁結び"));
    }

    #[test]
    fn unknown_intent_gets_neutral_default() {
        assert!(reason_for_query("静かな場所").is_none());
        assert_eq!(reason_or_default("静かな場所"), NEUTRAL_REASON);
    }
}
