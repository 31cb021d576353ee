//! Best-effort score relay
//!
//! Reports are POSTed as JSON to an optional endpoint. Failures are logged
//! and dropped; progression never waits on the network.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreKind {
    /// Sent after the hall 2 quiz
    Checkpoint,
    /// Sent after the closing stage quiz
    Final,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub kind: ScoreKind,
    pub player_name: String,
    pub total_time_ms: u64,
    pub attempts: u32,
    /// ISO-8601 timestamp
    pub at: String,
}

impl ScoreReport {
    pub fn to_json(&self) -> Result<String, crate::GameError> {
        serde_json::to_string(self).map_err(|e| crate::GameError::Relay(e.to_string()))
    }
}

/// Fire and forget. Without an endpoint nothing is sent.
#[cfg(target_arch = "wasm32")]
pub fn relay(endpoint: Option<String>, report: ScoreReport) {
    let Some(url) = endpoint.filter(|u| !u.is_empty()) else {
        log::info!("No score endpoint configured, skipping {:?} report", report.kind);
        return;
    };
    wasm_bindgen_futures::spawn_local(async move {
        match post(&url, &report).await {
            Ok(()) => log::info!("Score report ({:?}) sent", report.kind),
            Err(e) => log::warn!("{e}"),
        }
    });
}

#[cfg(target_arch = "wasm32")]
async fn post(url: &str, report: &ScoreReport) -> Result<(), crate::GameError> {
    use crate::GameError;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, Response};

    let body = report.to_json()?;
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&JsValue::from_str(&body));
    init.set_keepalive(true);

    let request = Request::new_with_str_and_init(url, &init)
        .map_err(|e| GameError::Relay(format!("{e:?}")))?;
    request
        .headers()
        .set("content-type", "application/json")
        .map_err(|e| GameError::Relay(format!("{e:?}")))?;

    let window = web_sys::window().ok_or_else(|| GameError::Relay("no window".into()))?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| GameError::Relay(format!("{e:?}")))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| GameError::Relay("fetch did not return a Response".into()))?;
    if !response.ok() {
        return Err(GameError::Relay(format!("HTTP {}", response.status())));
    }
    Ok(())
}

/// Native builds have no network path; the report is only logged
#[cfg(not(target_arch = "wasm32"))]
pub fn relay(endpoint: Option<String>, report: ScoreReport) {
    match endpoint.filter(|u| !u.is_empty()) {
        Some(url) => log::info!(
            "Score report ({:?}) for {url} not sent natively: {:?}",
            report.kind,
            report.to_json().ok()
        ),
        None => log::info!("No score endpoint configured, skipping {:?} report", report.kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_shape() {
        let report = ScoreReport {
            kind: ScoreKind::Checkpoint,
            player_name: "Chi".to_string(),
            total_time_ms: 65000,
            attempts: 4,
            at: "2026-01-02T03:04:05.000Z".to_string(),
        };
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["kind"], "checkpoint");
        assert_eq!(json["playerName"], "Chi");
        assert_eq!(json["totalTimeMs"], 65000);
        assert_eq!(json["attempts"], 4);
        assert_eq!(json["at"], "2026-01-02T03:04:05.000Z");
    }

    #[test]
    fn test_relay_without_endpoint_is_silent() {
        let report = ScoreReport {
            kind: ScoreKind::Final,
            player_name: String::new(),
            total_time_ms: 0,
            attempts: 0,
            at: String::new(),
        };
        relay(None, report.clone());
        relay(Some(String::new()), report);
    }
}
