// src/bidding/reason.rs

use thiserror::Error;

use crate::model::campaign::Dimension;

/// 不出价的原因。Display 输出即为对外暴露的原因文本。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RejectReason {
    #[error("Missing banner impression data")]
    MissingBanner,

    #[error("Missing device information")]
    MissingDevice,

    #[error("Missing bid floor")]
    MissingBidFloor,

    #[error("Campaign price ({price:.2}) below bid floor ({floor:.2})")]
    PriceBelowFloor { price: f64, floor: f64 },

    #[error("Dimension mismatch. Campaign: {campaign}, Request: {request_w}x{request_h}")]
    DimensionMismatch {
        campaign: Dimension,
        request_w: u32,
        request_h: u32,
    },

    #[error("OS not compatible")]
    OsNotCompatible,

    #[error("Geographic targeting mismatch")]
    GeoMismatch,

    #[error("No eligible campaigns found")]
    NoEligibleCampaigns,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_use_two_decimals_and_wxh() {
        let price = RejectReason::PriceBelowFloor { price: 0.5, floor: 1.0 };
        assert_eq!(price.to_string(), "Campaign price (0.50) below bid floor (1.00)");

        let dim = RejectReason::DimensionMismatch {
            campaign: Dimension::new(300, 250),
            request_w: 320,
            request_h: 50,
        };
        assert_eq!(dim.to_string(), "Dimension mismatch. Campaign: 300x250, Request: 320x50");
    }
}
