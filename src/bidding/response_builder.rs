// src/bidding/response_builder.rs

use url::Url;
use uuid::Uuid;

use crate::bidding::validator::ValidatedRequest;
use crate::model::campaign::Campaign;
use crate::openrtb::response::{Bid, BidExt, BidResponse, SeatBid};

/// 从广告主落地域名中提取 host，解析失败时不报错，返回 None
fn extract_host(tld: Option<&str>) -> Option<String> {
    let parsed = Url::parse(tld?).ok()?;
    parsed.host_str().map(str::to_string)
}

/// **构造 BidResponse**
/// 只包含一个 seat 和一个 bid，尺寸取自广告活动的尺寸。
pub fn build_bid_response(request: &ValidatedRequest<'_>, campaign: &Campaign) -> BidResponse {
    let bid = Bid {
        id: Uuid::new_v4().simple().to_string(),
        impid: request.imp.id.clone(),
        price: campaign.price,
        adid: campaign.code.clone(),
        nurl: campaign.url.clone(),
        iurl: campaign.image_url.clone(),
        cid: campaign.creative_id.clone(),
        crid: campaign.creative_id.clone(),
        adm: None,
        adomain: extract_host(campaign.tld.as_deref()).into_iter().collect(),
        bundle: request.request.app_bundle().to_string(),
        campaignname: campaign.campaignname.clone(),
        advertiser: campaign.advertiser.clone(),
        creative_type: campaign.creative_type.clone(),
        w: campaign.dimension.w,
        h: campaign.dimension.h,
        ext: BidExt {
            billing_id: campaign.billing_id.clone(),
        },
    };

    BidResponse {
        id: request.request.id.clone(),
        bidid: format!("bid_{}", Uuid::new_v4().simple()),
        seatbid: vec![SeatBid { bid: vec![bid] }],
        cur: "USD".to_string(),
    }
}
