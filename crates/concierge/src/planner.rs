//! The LLM planning step.
//!
//! One chat round trip per request, three answer shapes accepted, and a
//! deterministic order-based fallback whenever the model is disabled,
//! unreachable, or answers in no recognizable shape.

use serde_json::json;

use tg_domain::concierge::{Candidate, Recommendation};
use tg_providers::{ChatMessage, ChatRequest};

use crate::deps::Deps;
use crate::parse;

/// Reason attached to fallback entries.
pub const FALLBACK_REASON: &str = "暫定（順序ベース）";

/// Role and output contract for the model.
const SYSTEM_PROMPT: &str = "あなたは神社巡りのコンシェルジュです。\
ユーザーの願いごとと候補リストをもとに、訪れるべき神社を最大3件提案してください。\
1件目は最も推す神社にしてください。\
必ず次のJSON形式のみで回答してください: \
{\"recommendations\": [{\"name\": \"神社名\", \"location\": \"場所（例: 港区赤坂）\", \"reason\": \"おすすめの理由\"}]}";

/// Ask the model for a small plan. At most one round trip; never fails,
/// since the worst case is the order-based fallback over `candidates`.
pub async fn suggest(query: &str, candidates: &[Candidate], deps: &Deps) -> Vec<Recommendation> {
    let Some(llm) = &deps.llm else {
        tracing::debug!("llm disabled, using order-based fallback");
        return fallback_plan(candidates);
    };

    let req = ChatRequest {
        messages: vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(build_user_message(query, candidates)),
        ],
        temperature: deps.llm_temperature,
        max_tokens: deps.llm_max_tokens,
        json_mode: false,
        model: None,
    };

    match llm.chat(&req).await {
        Ok(resp) => match parse::parse_plan(&resp.content) {
            // An empty parsed plan is a valid answer; the handler's
            // guaranteed-minimum rule deals with it.
            Some(recs) => recs,
            None => {
                tracing::debug!("no parsable shape in llm answer, falling back");
                fallback_plan(candidates)
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "llm call failed, falling back");
            fallback_plan(candidates)
        }
    }
}

/// The user message: the wish verbatim plus the known candidates as JSON.
fn build_user_message(query: &str, candidates: &[Candidate]) -> String {
    if candidates.is_empty() {
        return format!("願いごと: {query}");
    }
    let list = json!(candidates);
    format!("願いごと: {query}\n候補の神社: {list}")
}

/// Deterministic ordering over the caller's candidates: earlier is better.
pub fn fallback_plan(candidates: &[Candidate]) -> Vec<Recommendation> {
    candidates
        .iter()
        .enumerate()
        .filter_map(|(i, c)| {
            let name = c
                .name
                .clone()
                .or_else(|| c.place_id.clone())
                .filter(|n| !n.trim().is_empty())?;
            Some(Recommendation {
                name,
                reason: FALLBACK_REASON.to_string(),
                location: None,
                score: Some((1.0 - 0.1 * i as f64).max(0.0)),
                formatted_address: None,
                address: None,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Candidate {
        Candidate {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    #[test]
    fn fallback_scores_decay_by_position() {
        let candidates: Vec<Candidate> =
            (0..12).map(|i| named(&format!("神社{i}"))).collect();
        let recs = fallback_plan(&candidates);
        assert_eq!(recs.len(), 12);
        assert!((recs[0].score.unwrap() - 1.0).abs() < 1e-10);
        assert!((recs[1].score.unwrap() - 0.9).abs() < 1e-10);
        // Position 11 would be negative; clamped to zero.
        assert_eq!(recs[11].score, Some(0.0));
        assert!(recs.iter().all(|r| r.reason == FALLBACK_REASON));
    }

    #[test]
    fn fallback_uses_place_id_when_unnamed() {
        let c = Candidate {
            place_id: Some("pid-9".into()),
            ..Default::default()
        };
        let recs = fallback_plan(&[c]);
        assert_eq!(recs[0].name, "pid-9");
    }

    #[test]
    fn fallback_skips_empty_candidates() {
        let recs = fallback_plan(&[Candidate::default(), named("神社A")]);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].name, "神社A");
    }

    #[test]
    fn user_message_carries_candidates_verbatim() {
        let msg = build_user_message("縁結び 徒歩", &[named("赤坂氷川神社")]);
        assert!(msg.contains("縁結び 徒歩"));
        assert!(msg.contains("赤坂氷川神社"));
    }
}
