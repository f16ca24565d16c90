// src/error.rs

use thiserror::Error;

/// 输入无法被解析时的致命错误（请求体或广告活动目录），
/// 在进入资格评估之前就中止处理。
#[derive(Debug, Error)]
pub enum BidError {
    #[error("Invalid bid request JSON: {0}")]
    MalformedRequest(String),

    #[error("Invalid bid request structure: {0}")]
    InvalidRequestShape(#[from] serde_json::Error),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid campaign dimension {0:?}, expected \"WxH\"")]
    InvalidDimension(String),
}

impl From<simd_json::Error> for BidError {
    fn from(err: simd_json::Error) -> Self {
        BidError::MalformedRequest(err.to_string())
    }
}
