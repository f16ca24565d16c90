// src/bidding/validator.rs

use crate::bidding::reason::RejectReason;
use crate::openrtb::request::{Banner, BidRequest, Imp};

/// 通过结构校验的请求视图，后续评估不再需要处理缺失字段
#[derive(Debug, Clone, Copy)]
pub struct ValidatedRequest<'a> {
    pub request: &'a BidRequest,
    pub imp: &'a Imp,
    pub banner: &'a Banner,
    pub os: &'a str,
    pub bidfloor: f64,
}

/// 按顺序校验，遇到第一个失败即返回对应原因：
/// 1. imp[0].banner 存在且非空
/// 2. device.os 存在且非空
/// 3. imp[0].bidfloor 存在（允许为 0）
pub fn validate(request: &BidRequest) -> Result<ValidatedRequest<'_>, RejectReason> {
    let (imp, banner) = request
        .first_imp()
        .and_then(|imp| imp.banner.as_ref().map(|banner| (imp, banner)))
        .filter(|(_, banner)| !banner.is_empty())
        .ok_or(RejectReason::MissingBanner)?;

    let os = request.device_os().ok_or(RejectReason::MissingDevice)?;

    let bidfloor = imp.bidfloor.ok_or(RejectReason::MissingBidFloor)?;

    Ok(ValidatedRequest {
        request,
        imp,
        banner,
        os,
        bidfloor,
    })
}
