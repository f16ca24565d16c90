pub mod eligibility;
pub mod engine;
pub mod ranker;
pub mod reason;
pub mod response_builder;
pub mod sanitizer;
pub mod validator;

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{json, Value};

    use crate::bidding::sanitizer::sanitize;
    use crate::model::campaign::{Campaign, Dimension};
    use crate::openrtb::request::BidRequest;

    /// 320x50 banner，底价 1.0，android，无 geo
    pub fn sample_request_json() -> Value {
        json!({
            "id": "req-1",
            "imp": [{
                "id": "imp-1",
                "bidfloor": 1.0,
                "banner": {"w": 320, "h": 50}
            }],
            "device": {"os": "android"}
        })
    }

    pub fn request_from(raw: Value) -> BidRequest {
        serde_json::from_value(sanitize(raw)).expect("fixture should decode")
    }

    pub fn sample_campaign() -> Campaign {
        Campaign {
            price: 2.0,
            dimension: Dimension::new(320, 50),
            hs_os: "android".to_string(),
            country: Some(String::new()),
            code: Some("cmp-001".to_string()),
            url: Some("https://track.example.com/win".to_string()),
            image_url: Some("https://cdn.example.com/creative.png".to_string()),
            creative_id: Some("cr-001".to_string()),
            advertiser: Some("Example Advertiser".to_string()),
            campaignname: Some("Example Campaign".to_string()),
            creative_type: Some("banner".to_string()),
            billing_id: Some("billing-001".to_string()),
            tld: Some("https://advertiser.example.com/landing".to_string()),
        }
    }
}
