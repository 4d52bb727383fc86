//! Leaderboard client
//!
//! Thin boundary to the external leaderboard service: submit the final score,
//! fetch the current top list. Ranking, persistence and season handling live
//! on the server; failures here are logged and never cost the player the
//! locally displayed score.

use serde::{Deserialize, Serialize};

/// Entries shown on the end-of-game screen (the service caps the list)
pub const LEADERBOARD_CAP: usize = 10;

/// Score endpoint: POST to submit, GET for the ranked list
pub const SCORES_ENDPOINT: &str = "/api/scores";

/// Payload sent to the leaderboard service at game over
#[derive(Debug, Clone, Serialize)]
pub struct ScoreSubmission {
    pub username: String,
    pub score: u32,
}

/// Service response to a submission
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitOutcome {
    #[serde(default)]
    pub success: bool,
    /// 1-based rank of the submitted score, when the service reports one
    #[serde(default)]
    pub rank: Option<u32>,
}

impl SubmitOutcome {
    /// True when the submitted score landed on the visible leaderboard
    pub fn made_top_ten(&self) -> bool {
        self.success && self.rank.is_some_and(|r| r as usize <= LEADERBOARD_CAP)
    }
}

/// One row of the fetched leaderboard, already ranked by the service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LeaderboardEntry {
    #[serde(default = "anonymous")]
    pub username: String,
    pub score: u32,
}

fn anonymous() -> String {
    "Anonymous".to_string()
}

#[cfg(target_arch = "wasm32")]
mod client {
    use super::*;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, Response};

    async fn fetch_text(request: &Request) -> Result<String, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let response: Response = JsFuture::from(window.fetch_with_request(request))
            .await?
            .dyn_into()?;
        if !response.ok() {
            return Err(JsValue::from_str(&format!(
                "leaderboard service returned {}",
                response.status()
            )));
        }
        let body = JsFuture::from(response.text()?).await?;
        body.as_string()
            .ok_or_else(|| JsValue::from_str("response body was not text"))
    }

    /// POST the final score; returns the parsed outcome
    pub async fn submit_score(submission: &ScoreSubmission) -> Result<SubmitOutcome, JsValue> {
        let body =
            serde_json::to_string(submission).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_body(&JsValue::from_str(&body));
        let request = Request::new_with_str_and_init(SCORES_ENDPOINT, &opts)?;
        request.headers().set("Content-Type", "application/json")?;

        let text = fetch_text(&request).await?;
        serde_json::from_str(&text).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// GET the current leaderboard, in server order
    pub async fn fetch_leaderboard() -> Result<Vec<LeaderboardEntry>, JsValue> {
        let request = Request::new_with_str(SCORES_ENDPOINT)?;
        let text = fetch_text(&request).await?;
        serde_json::from_str(&text).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
pub use client::{fetch_leaderboard, submit_score};

/// Native builds have no HTTP stack; submission is a logged no-op
#[cfg(not(target_arch = "wasm32"))]
pub fn submit_score(submission: &ScoreSubmission) {
    log::info!(
        "score submission skipped (native build): {} -> {}",
        submission.username,
        submission.score
    );
}
