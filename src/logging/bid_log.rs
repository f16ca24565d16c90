use serde::{Serialize, Deserialize};
use chrono::Utc;

use crate::model::context::BidOutcome;

/// **单次竞价日志**
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BidLog {
    pub timestamp: String,          // 记录时间
    pub log_type: String,           // 固定为 "bid_request"
    pub request_id: String,         // OpenRTB `BidRequest.id`
    pub status: String,             // "bid" / "no_bid" / "error"
    pub campaign_code: Option<String>, // 获胜广告活动
    pub billing_id: Option<String>,
    pub price: f64,                 // 出价
    pub reasons: Vec<String>,       // 累积的淘汰原因
    pub elapsed_us: u64,
}

impl BidLog {
    pub fn new(request_id: &str) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            log_type: "bid_request".to_string(),
            request_id: request_id.to_string(),
            status: "error".to_string(), // 默认失败，后续更新
            campaign_code: None,
            billing_id: None,
            price: 0.0,
            reasons: Vec::new(),
            elapsed_us: 0,
        }
    }

    /// 根据竞价结果填充日志
    pub fn from_outcome(request_id: &str, outcome: &BidOutcome, elapsed_us: u64) -> Self {
        let mut log = Self::new(request_id);
        log.elapsed_us = elapsed_us;
        log.reasons = outcome.reason_messages();
        match outcome.response().and_then(|r| r.winning_bid()) {
            Some(bid) => {
                log.status = "bid".to_string();
                log.campaign_code = bid.adid.clone();
                log.billing_id = bid.ext.billing_id.clone();
                log.price = bid.price;
            }
            None => log.status = "no_bid".to_string(),
        }
        log
    }

    /// 请求无法解析
    pub fn set_error(&mut self, message: &str) {
        self.status = "error".to_string();
        self.reasons.push(message.to_string());
    }

    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bidding::reason::RejectReason;

    #[test]
    fn no_bid_outcome_keeps_reasons_in_order() {
        let outcome = BidOutcome::Rejected {
            reasons: vec![RejectReason::OsNotCompatible, RejectReason::NoEligibleCampaigns],
        };
        let log = BidLog::from_outcome("req-9", &outcome, 42);
        assert_eq!(log.status, "no_bid");
        assert_eq!(log.reasons, vec!["OS not compatible", "No eligible campaigns found"]);
        assert_eq!(log.elapsed_us, 42);

        let value: serde_json::Value = serde_json::from_str(&log.to_json_string()).unwrap();
        assert_eq!(value["request_id"], "req-9");
        assert_eq!(value["log_type"], "bid_request");
    }

    #[test]
    fn decode_errors_are_recorded() {
        let mut log = BidLog::new("");
        log.set_error("Invalid bid request JSON: eof");
        assert_eq!(log.status, "error");
        assert_eq!(log.reasons.len(), 1);
    }
}
