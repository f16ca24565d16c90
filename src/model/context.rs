// src/model/context.rs

use crate::bidding::reason::RejectReason;
use crate::openrtb::request::BidRequest;
use crate::openrtb::response::BidResponse;
use std::time::{Duration, Instant};

/// 单次竞价调用的上下文，调用结束即丢弃，不跨请求保留任何状态
#[derive(Debug)]
pub struct BidContext<'a> {
    /// 已经过清洗的请求
    pub bid_request: &'a BidRequest,
    /// 按出现顺序累积的不出价原因（不去重）
    pub errors: Vec<RejectReason>,
    /// 请求开始时间，用于计算总耗时
    pub start_time: Instant,
}

/// 竞价流程的终态
#[derive(Debug, Clone, PartialEq)]
pub enum BidOutcome {
    /// 成功出价；`reasons` 中是其他广告活动被淘汰的原因
    Responded {
        response: BidResponse,
        reasons: Vec<RejectReason>,
    },
    /// 不出价
    Rejected { reasons: Vec<RejectReason> },
}

impl<'a> BidContext<'a> {
    pub fn new(bid_request: &'a BidRequest) -> Self {
        Self {
            bid_request,
            errors: Vec::new(),
            start_time: Instant::now(),
        }
    }

    pub fn reject(&mut self, reason: RejectReason) {
        self.errors.push(reason);
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn into_rejected(self) -> BidOutcome {
        BidOutcome::Rejected { reasons: self.errors }
    }

    pub fn into_responded(self, response: BidResponse) -> BidOutcome {
        BidOutcome::Responded { response, reasons: self.errors }
    }
}

impl BidOutcome {
    pub fn response(&self) -> Option<&BidResponse> {
        match self {
            BidOutcome::Responded { response, .. } => Some(response),
            BidOutcome::Rejected { .. } => None,
        }
    }

    pub fn reasons(&self) -> &[RejectReason] {
        match self {
            BidOutcome::Responded { reasons, .. } | BidOutcome::Rejected { reasons } => reasons,
        }
    }

    /// 原因文本列表
    pub fn reason_messages(&self) -> Vec<String> {
        self.reasons().iter().map(ToString::to_string).collect()
    }
}
