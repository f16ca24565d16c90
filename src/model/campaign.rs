// src/model/campaign.rs

use serde::{Serialize, Deserialize};
use std::convert::TryFrom;
use std::fmt;

use crate::error::BidError;

/// 广告活动尺寸，目录里写作 "WxH"，加载时解析一次
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Dimension {
    pub w: u32,
    pub h: u32,
}

impl Dimension {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }
}

impl TryFrom<String> for Dimension {
    type Error = BidError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::str::FromStr for Dimension {
    type Err = BidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BidError::InvalidDimension(s.to_string());
        let (w, h) = s.split_once('x').ok_or_else(invalid)?;
        let w: u32 = w.trim().parse().map_err(|_| invalid())?;
        let h: u32 = h.trim().parse().map_err(|_| invalid())?;
        if w == 0 || h == 0 {
            return Err(invalid());
        }
        Ok(Dimension::new(w, h))
    }
}

impl From<Dimension> for String {
    fn from(d: Dimension) -> Self {
        d.to_string()
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

/// **广告活动（Campaign）**
/// 由外部目录加载，引擎只读不写。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Campaign {
    pub price: f64,
    pub dimension: Dimension,
    /// 逗号分隔的操作系统列表，大小写不敏感
    #[serde(default)]
    pub hs_os: String,
    /// 为空或缺失表示不限地域
    #[serde(default)]
    pub country: Option<String>,

    // 以下字段原样透传到 BidResponse
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub creative_id: Option<String>,
    #[serde(default)]
    pub advertiser: Option<String>,
    #[serde(default)]
    pub campaignname: Option<String>,
    #[serde(default)]
    pub creative_type: Option<String>,
    #[serde(default)]
    pub billing_id: Option<String>,
    #[serde(default)]
    pub tld: Option<String>,
}

impl Campaign {
    /// 支持的操作系统（已 trim + 小写）
    pub fn supported_os(&self) -> impl Iterator<Item = String> + '_ {
        self.hs_os.split(',').map(|os| os.trim().to_lowercase())
    }

    /// 地域定向，空字符串视同未设置
    pub fn target_country(&self) -> Option<&str> {
        self.country.as_deref().filter(|c| !c.is_empty())
    }
}
