// src/bidding/eligibility.rs

use crate::bidding::reason::RejectReason;
use crate::bidding::validator::ValidatedRequest;
use crate::model::campaign::Campaign;
use crate::model::country::CountryAliases;
use crate::openrtb::request::Banner;

/// **广告活动资格评估器**
/// 针对同一个请求评估多个广告活动，依次检查：底价 -> 尺寸 -> 操作系统 -> 地域，
/// 任一检查失败即结束该广告活动的评估。
pub struct EligibilityEvaluator<'a> {
    bidfloor: f64,
    banner: &'a Banner,
    request_os: String,
    request_country: &'a str,
    aliases: &'a CountryAliases,
}

impl<'a> EligibilityEvaluator<'a> {
    pub fn new(request: &ValidatedRequest<'a>, aliases: &'a CountryAliases) -> Self {
        Self {
            bidfloor: request.bidfloor,
            banner: request.banner,
            request_os: request.os.to_lowercase(),
            request_country: request.request.geo_country(),
            aliases,
        }
    }

    pub fn evaluate(&self, campaign: &Campaign) -> Result<(), RejectReason> {
        self.check_price(campaign)?;
        self.check_dimension(campaign)?;
        self.check_os(campaign)?;
        self.check_geo(campaign)
    }

    /// 出价等于底价是允许的
    fn check_price(&self, campaign: &Campaign) -> Result<(), RejectReason> {
        if campaign.price < self.bidfloor {
            return Err(RejectReason::PriceBelowFloor {
                price: campaign.price,
                floor: self.bidfloor,
            });
        }
        Ok(())
    }

    fn check_dimension(&self, campaign: &Campaign) -> Result<(), RejectReason> {
        let dim = campaign.dimension;
        if self.banner.accepts(dim.w, dim.h) {
            return Ok(());
        }
        let (request_w, request_h) = self.banner.size();
        Err(RejectReason::DimensionMismatch {
            campaign: dim,
            request_w,
            request_h,
        })
    }

    fn check_os(&self, campaign: &Campaign) -> Result<(), RejectReason> {
        if campaign.supported_os().any(|os| os == self.request_os) {
            Ok(())
        } else {
            Err(RejectReason::OsNotCompatible)
        }
    }

    fn check_geo(&self, campaign: &Campaign) -> Result<(), RejectReason> {
        match campaign.target_country() {
            Some(country) if !self.aliases.matches(self.request_country, country) => {
                Err(RejectReason::GeoMismatch)
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bidding::fixtures::{request_from, sample_campaign, sample_request_json};
    use crate::bidding::validator::validate;
    use crate::model::campaign::Dimension;
    use crate::openrtb::request::BidRequest;
    use proptest::prelude::*;
    use serde_json::json;

    fn evaluate(req: &BidRequest, campaign: &Campaign) -> Result<(), RejectReason> {
        let validated = validate(req).unwrap();
        EligibilityEvaluator::new(&validated, CountryAliases::builtin()).evaluate(campaign)
    }

    #[test]
    fn price_equal_to_floor_is_eligible() {
        let req = request_from(sample_request_json());
        let mut campaign = sample_campaign();
        campaign.price = 1.0;
        assert_eq!(evaluate(&req, &campaign), Ok(()));

        campaign.price = 0.99;
        assert_eq!(
            evaluate(&req, &campaign).unwrap_err().to_string(),
            "Campaign price (0.99) below bid floor (1.00)"
        );
    }

    #[test]
    fn alternate_formats_satisfy_dimension() {
        let mut raw = sample_request_json();
        raw["imp"][0]["banner"]["format"] = json!([{"w": 300, "h": 250}, {"w": 728, "h": 90}]);
        let req = request_from(raw);

        let mut campaign = sample_campaign();
        campaign.dimension = Dimension::new(728, 90);
        assert_eq!(evaluate(&req, &campaign), Ok(()));

        campaign.dimension = Dimension::new(160, 600);
        assert_eq!(
            evaluate(&req, &campaign).unwrap_err().to_string(),
            "Dimension mismatch. Campaign: 160x600, Request: 320x50"
        );
    }

    #[test]
    fn os_list_is_trimmed_and_case_insensitive() {
        let mut raw = sample_request_json();
        raw["device"]["os"] = json!("iOS");
        let req = request_from(raw);

        let mut campaign = sample_campaign();
        campaign.hs_os = "Android , IOS".to_string();
        assert_eq!(evaluate(&req, &campaign), Ok(()));

        campaign.hs_os = "android".to_string();
        assert_eq!(evaluate(&req, &campaign), Err(RejectReason::OsNotCompatible));
    }

    #[test]
    fn checks_stop_at_first_failure() {
        let req = request_from(sample_request_json());
        let mut campaign = sample_campaign();
        campaign.price = 0.1;
        campaign.dimension = Dimension::new(1, 1);
        campaign.hs_os = "windows".into();
        assert!(matches!(
            evaluate(&req, &campaign),
            Err(RejectReason::PriceBelowFloor { .. })
        ));
    }

    #[test]
    fn empty_country_targets_any_geo() {
        let mut raw = sample_request_json();
        raw["device"]["geo"] = json!({"country": "BGD"});
        let req = request_from(raw);

        let mut campaign = sample_campaign();
        campaign.country = Some(String::new());
        assert_eq!(evaluate(&req, &campaign), Ok(()));
        campaign.country = None;
        assert_eq!(evaluate(&req, &campaign), Ok(()));
        campaign.country = Some("Bangladesh".into());
        assert_eq!(evaluate(&req, &campaign), Ok(()));
    }

    #[test]
    fn targeted_campaign_rejects_request_without_geo() {
        let req = request_from(sample_request_json());
        let mut campaign = sample_campaign();
        campaign.country = Some("USA".into());
        assert_eq!(evaluate(&req, &campaign), Err(RejectReason::GeoMismatch));
    }

    proptest! {
        #[test]
        fn raising_price_keeps_campaign_eligible(floor in 0.0f64..50.0, extra in 0.0f64..100.0, bump in 0.0f64..100.0) {
            let mut raw = sample_request_json();
            raw["imp"][0]["bidfloor"] = json!(floor);
            let req = request_from(raw);

            let mut campaign = sample_campaign();
            campaign.price = floor + extra;
            prop_assert_eq!(evaluate(&req, &campaign), Ok(()));

            campaign.price += bump;
            prop_assert_eq!(evaluate(&req, &campaign), Ok(()));
        }

        #[test]
        fn price_check_matches_floor_comparison(floor in 0.0f64..10.0, price in 0.0f64..10.0) {
            let mut raw = sample_request_json();
            raw["imp"][0]["bidfloor"] = json!(floor);
            let req = request_from(raw);

            let mut campaign = sample_campaign();
            campaign.price = price;
            let eligible = evaluate(&req, &campaign).is_ok();
            prop_assert_eq!(eligible, price >= floor);
        }
    }
}
