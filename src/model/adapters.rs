// src/model/adapters.rs

use crate::error::BidError;
use crate::model::campaign::Campaign;
use crate::model::country::CountryAliases;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;

/// 广告活动目录的数据来源
pub trait CatalogAdapter: Send + Sync {
    fn load_campaigns(&self) -> Result<Vec<Campaign>, BidError>;
    fn load_country_aliases(&self) -> Result<CountryAliases, BidError>;
}

/// 从 JSON 文件读取广告活动与国家别名
pub struct FileCatalogAdapter {
    pub campaign_file: String,
    /// 额外的别名文件（JSON 对象，代码 -> 名称），会合并到内置表之上
    pub alias_file: Option<String>,
}

impl FileCatalogAdapter {
    pub fn new(campaign_file: &str, alias_file: Option<&str>) -> Self {
        Self {
            campaign_file: campaign_file.to_string(),
            alias_file: alias_file.map(str::to_string),
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, BidError> {
    let content = fs::read_to_string(path).map_err(|source| BidError::Io {
        path: path.to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| BidError::Parse {
        path: path.to_string(),
        source,
    })
}

impl CatalogAdapter for FileCatalogAdapter {
    fn load_campaigns(&self) -> Result<Vec<Campaign>, BidError> {
        read_json(&self.campaign_file)
    }

    fn load_country_aliases(&self) -> Result<CountryAliases, BidError> {
        let mut aliases = CountryAliases::default();
        if let Some(path) = &self.alias_file {
            let extra: HashMap<String, String> = read_json(path)?;
            aliases.extend(extra);
        }
        Ok(aliases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("rtb-adapter-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_campaigns_and_extra_aliases() {
        let campaigns = write_temp(
            "campaigns.json",
            r#"[{"price": 2.0, "dimension": "320x50", "hs_os": "android", "country": "", "billing_id": "b-1"}]"#,
        );
        let aliases = write_temp("aliases.json", r#"{"CAN": "Canada"}"#);
        let adapter = FileCatalogAdapter::new(
            campaigns.to_str().unwrap(),
            Some(aliases.to_str().unwrap()),
        );

        let loaded = adapter.load_campaigns().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].billing_id.as_deref(), Some("b-1"));

        let table = adapter.load_country_aliases().unwrap();
        assert!(table.matches("Canada", "can"));
        assert!(table.matches("United States", "USA"));
    }

    #[test]
    fn reports_missing_and_malformed_files() {
        let adapter = FileCatalogAdapter::new("/nonexistent/campaigns.json", None);
        assert!(matches!(adapter.load_campaigns(), Err(BidError::Io { .. })));

        let bad = write_temp("campaigns.json", r#"[{"price": 1.0, "dimension": "wide"}]"#);
        let adapter = FileCatalogAdapter::new(bad.to_str().unwrap(), None);
        assert!(matches!(adapter.load_campaigns(), Err(BidError::Parse { .. })));
    }
}
