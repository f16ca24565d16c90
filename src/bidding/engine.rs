use serde_json::Value;
use tracing::{debug, info};

use crate::bidding::eligibility::EligibilityEvaluator;
use crate::bidding::ranker::rank_by_price;
use crate::bidding::reason::RejectReason;
use crate::bidding::response_builder::build_bid_response;
use crate::bidding::sanitizer::sanitize;
use crate::bidding::validator::{validate, ValidatedRequest};
use crate::error::BidError;
use crate::model::campaign::Campaign;
use crate::model::context::{BidContext, BidOutcome};
use crate::model::country::CountryAliases;
use crate::openrtb::request::BidRequest;

/// 解析请求体：simd-json 解析 -> 清洗所有字符串 -> 反序列化为强类型请求。
/// 非法 JSON 或字段类型错误都属于致命错误，直接返回给调用方。
pub fn decode_bid_request(body: &mut [u8]) -> Result<BidRequest, BidError> {
    let raw: Value = simd_json::serde::from_slice(body)?;
    let bid_request = serde_json::from_value(sanitize(raw))?;
    Ok(bid_request)
}

/// 按目录顺序评估所有广告活动（广告活动之间互不影响，不提前退出），
/// 淘汰原因写入上下文，返回按价格排好序的合格广告活动
pub fn find_eligible_campaigns<'c>(
    validated: &ValidatedRequest<'_>,
    campaigns: &'c [Campaign],
    aliases: &CountryAliases,
    ctx: &mut BidContext<'_>,
) -> Vec<&'c Campaign> {
    let evaluator = EligibilityEvaluator::new(validated, aliases);
    let mut eligible = Vec::new();

    for campaign in campaigns {
        match evaluator.evaluate(campaign) {
            Ok(()) => eligible.push(campaign),
            Err(reason) => {
                debug!(
                    request_id = %validated.request.id,
                    campaign = campaign.code.as_deref().unwrap_or(""),
                    reason = %reason,
                    "campaign rejected"
                );
                ctx.reject(reason);
            }
        }
    }

    rank_by_price(&mut eligible);
    eligible
}

/// **处理竞价请求**
/// 校验 -> 逐个评估广告活动 -> 按价格排序 -> 取最高价 -> 构造响应；
/// 任一阶段失败都以 `Rejected` 结束，并带上累积的全部原因。
pub fn process_bid_request(
    bid_request: &BidRequest,
    campaigns: &[Campaign],
    aliases: &CountryAliases,
) -> BidOutcome {
    let mut ctx = BidContext::new(bid_request);

    let validated = match validate(bid_request) {
        Ok(validated) => validated,
        Err(reason) => {
            debug!(request_id = %bid_request.id, reason = %reason, "bid request failed validation");
            ctx.reject(reason);
            return ctx.into_rejected();
        }
    };

    let eligible = find_eligible_campaigns(&validated, campaigns, aliases, &mut ctx);

    let Some(winner) = eligible.first() else {
        ctx.reject(RejectReason::NoEligibleCampaigns);
        info!(
            request_id = %ctx.bid_request.id,
            evaluated = campaigns.len(),
            elapsed_us = ctx.elapsed().as_micros() as u64,
            "no bid"
        );
        return ctx.into_rejected();
    };

    let response = build_bid_response(&validated, winner);
    info!(
        request_id = %ctx.bid_request.id,
        campaign = winner.code.as_deref().unwrap_or(""),
        price = winner.price,
        eligible = eligible.len(),
        elapsed_us = ctx.elapsed().as_micros() as u64,
        "bid placed"
    );
    ctx.into_responded(response)
}

/// 从原始请求体开始处理
pub fn process_raw_bid_request(
    body: &mut [u8],
    campaigns: &[Campaign],
    aliases: &CountryAliases,
) -> Result<BidOutcome, BidError> {
    let bid_request = decode_bid_request(body)?;
    Ok(process_bid_request(&bid_request, campaigns, aliases))
}
