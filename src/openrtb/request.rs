// src/openrtb/request.rs

use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};

/// OpenRTB BidRequest 结构体（单 imp 竞价所需的字段子集）
/// 只有 `imp[0]` 参与竞价，其余 imp 会被忽略。
/// 可缺省的对象（device / geo / app）都显式声明为 Option。
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct BidRequest {
    #[serde(default)]
    pub id: String,

    /// 广告展示请求列表
    #[serde(default)]
    pub imp: Vec<Imp>,

    /// 设备信息
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<Device>,

    /// 应用信息
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<App>,
}

/// 单个广告展示请求
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Imp {
    #[serde(default)]
    pub id: String,
    /// 底价，允许为 0；缺失时校验失败
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bidfloor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<Banner>,
}

/// Banner 广告位信息
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Banner {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<u32>,
    /// 可接受的备选尺寸；`"format": []` 也算 banner 中出现过的字段
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Vec<Format>>,
    /// 其余未建模的 banner 字段（pos / mimes 等）
    #[serde(flatten)]
    pub ext: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Format {
    pub w: u32,
    pub h: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Device {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Geo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct App {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle: Option<String>,
}

impl Banner {
    /// 没有任何字段的 banner（`{}`）视为空对象
    pub fn is_empty(&self) -> bool {
        self.w.is_none() && self.h.is_none() && self.format.is_none() && self.ext.is_empty()
    }

    pub fn formats(&self) -> &[Format] {
        self.format.as_deref().unwrap_or_default()
    }

    /// 主尺寸，缺失的维度按 0 处理（0 永远不会与广告活动尺寸匹配）
    pub fn size(&self) -> (u32, u32) {
        (self.w.unwrap_or(0), self.h.unwrap_or(0))
    }

    /// 主尺寸或任一备选尺寸与 (w, h) 相同
    pub fn accepts(&self, w: u32, h: u32) -> bool {
        self.size() == (w, h) || self.formats().iter().any(|f| f.w == w && f.h == h)
    }
}

// Getter 方法实现
impl BidRequest {
    pub fn first_imp(&self) -> Option<&Imp> {
        self.imp.first()
    }

    /// 设备操作系统，空字符串视同缺失
    pub fn device_os(&self) -> Option<&str> {
        self.device
            .as_ref()
            .and_then(|d| d.os.as_deref())
            .filter(|os| !os.is_empty())
    }

    /// `device.geo.country`，缺失时返回空字符串
    pub fn geo_country(&self) -> &str {
        self.device
            .as_ref()
            .and_then(|d| d.geo.as_ref())
            .and_then(|g| g.country.as_deref())
            .unwrap_or("")
    }

    /// `app.bundle`，缺失时返回空字符串
    pub fn app_bundle(&self) -> &str {
        self.app
            .as_ref()
            .and_then(|a| a.bundle.as_deref())
            .unwrap_or("")
    }
}
