use axum::{body::Bytes, extract::State, http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

use crate::bidding::engine::{decode_bid_request, process_bid_request};
use crate::logging::bid_log::BidLog;
use crate::model::context::BidOutcome;
use crate::AppState;

/// **处理 OpenRTB 竞价请求**
/// - 200：出价成功，返回 `BidResponse`
/// - 204：不出价（原因写入运行日志）
/// - 400：请求体无法解析，返回 `{"error": "..."}`
pub async fn handle_openrtb_request(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Response {
    let runtime_logger = &state.runtime_logger;
    let start = Instant::now();

    runtime_logger
        .log("DEBUG", &format!("Received request: {}", String::from_utf8_lossy(&body)))
        .await;

    let mut buf = body.to_vec();
    let bid_request = match decode_bid_request(&mut buf) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "rejecting malformed bid request");
            let mut log = BidLog::new("");
            log.set_error(&e.to_string());
            runtime_logger.log("ERROR", &log.to_json_string()).await;
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))).into_response();
        }
    };

    // ✅ 每个请求使用同一份只读快照
    let campaigns = state.config.campaigns();
    let aliases = state.config.country_aliases();
    let outcome = process_bid_request(&bid_request, &campaigns, &aliases);

    let log = BidLog::from_outcome(&bid_request.id, &outcome, start.elapsed().as_micros() as u64);
    match outcome {
        BidOutcome::Responded { response, .. } => {
            runtime_logger.log("INFO", &log.to_json_string()).await;
            runtime_logger
                .log("DEBUG", &format!("Sent response: {}", json!(response)))
                .await;
            (StatusCode::OK, Json(response)).into_response()
        }
        BidOutcome::Rejected { .. } => {
            // ❌ 204 - 无广告可填充
            runtime_logger.log("WARN", &log.to_json_string()).await;
            StatusCode::NO_CONTENT.into_response()
        }
    }
}
