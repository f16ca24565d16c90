// src/config/config_manager.rs

use std::sync::{Arc, PoisonError, RwLock};

use crate::error::BidError;
use crate::model::adapters::CatalogAdapter;
use crate::model::campaign::Campaign;
use crate::model::country::CountryAliases;

/// 持有广告活动目录与国家别名表的只读快照。
/// 每次请求拿到的是 `Arc` 快照，重新加载只替换指针，不影响进行中的请求。
#[derive(Debug)]
pub struct ConfigManager {
    campaigns: RwLock<Arc<Vec<Campaign>>>,
    country_aliases: RwLock<Arc<CountryAliases>>,
}

impl ConfigManager {
    pub fn new(campaigns: Vec<Campaign>, country_aliases: CountryAliases) -> Self {
        ConfigManager {
            campaigns: RwLock::new(Arc::new(campaigns)),
            country_aliases: RwLock::new(Arc::new(country_aliases)),
        }
    }

    pub fn from_adapter(adapter: &dyn CatalogAdapter) -> Result<Self, BidError> {
        Ok(ConfigManager::new(
            adapter.load_campaigns()?,
            adapter.load_country_aliases()?,
        ))
    }

    /// 重新加载；任一文件失败时保留旧快照。返回新目录中的广告活动数量
    pub fn reload(&self, adapter: &dyn CatalogAdapter) -> Result<usize, BidError> {
        let campaigns = adapter.load_campaigns()?;
        let aliases = adapter.load_country_aliases()?;
        let count = campaigns.len();
        *self.campaigns.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(campaigns);
        *self.country_aliases.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(aliases);
        Ok(count)
    }

    pub fn campaigns(&self) -> Arc<Vec<Campaign>> {
        self.campaigns.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn country_aliases(&self) -> Arc<CountryAliases> {
        self.country_aliases.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}
