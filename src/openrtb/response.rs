use serde::{Deserialize, Serialize};

/// OpenRTB Bid Response
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BidResponse {
    pub id: String,
    pub bidid: String,
    pub seatbid: Vec<SeatBid>,
    pub cur: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SeatBid {
    pub bid: Vec<Bid>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Bid {
    pub id: String,
    pub impid: String,
    pub price: f64,
    pub adid: Option<String>,
    pub nurl: Option<String>,
    pub iurl: Option<String>,
    pub cid: Option<String>,
    pub crid: Option<String>,
    pub adm: Option<String>, // 创意由 nurl/iurl 拉取，不内联
    pub adomain: Vec<String>,
    pub bundle: String,
    pub campaignname: Option<String>,
    pub advertiser: Option<String>,
    pub creative_type: Option<String>,
    pub w: u32,
    pub h: u32,
    pub ext: BidExt,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BidExt {
    pub billing_id: Option<String>,
}

impl BidResponse {
    /// 唯一的获胜出价
    pub fn winning_bid(&self) -> Option<&Bid> {
        self.seatbid.first().and_then(|seat| seat.bid.first())
    }
}
