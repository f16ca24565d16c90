// src/model/country.rs

use once_cell::sync::Lazy;
use serde::{Serialize, Deserialize};
use std::collections::HashMap;

/// 内置的国家代码别名
const BUILTIN_ALIASES: [(&str, &str); 3] = [
    ("BGD", "Bangladesh"),
    ("USA", "United States"),
    ("GB", "United Kingdom"),
];

static DEFAULT_ALIASES: Lazy<CountryAliases> = Lazy::new(|| {
    CountryAliases::from_pairs(BUILTIN_ALIASES.iter().map(|(c, n)| (c.to_string(), n.to_string())))
});

/// 国家代码 -> 国家名称 的别名表
/// 代码查找大小写不敏感，未知代码原样返回。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(from = "HashMap<String, String>", into = "HashMap<String, String>")]
pub struct CountryAliases {
    aliases: HashMap<String, String>,
}

impl CountryAliases {
    /// 内置别名表（BGD / USA / GB）
    pub fn builtin() -> &'static CountryAliases {
        &DEFAULT_ALIASES
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut table = Self { aliases: HashMap::new() };
        table.extend(pairs);
        table
    }

    /// 合并额外的别名，同名代码覆盖旧值
    pub fn extend<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (code, name) in pairs {
            self.aliases.insert(code.to_uppercase(), name);
        }
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn normalize<'a>(&'a self, country: &'a str) -> &'a str {
        self.aliases
            .get(&country.to_uppercase())
            .map(String::as_str)
            .unwrap_or(country)
    }

    /// 两侧都归一化后做大小写不敏感比较
    pub fn matches(&self, request_country: &str, campaign_country: &str) -> bool {
        self.normalize(request_country).to_uppercase()
            == self.normalize(campaign_country).to_uppercase()
    }
}

impl Default for CountryAliases {
    fn default() -> Self {
        (*DEFAULT_ALIASES).clone()
    }
}

impl From<HashMap<String, String>> for CountryAliases {
    fn from(map: HashMap<String, String>) -> Self {
        Self::from_pairs(map)
    }
}

impl From<CountryAliases> for HashMap<String, String> {
    fn from(table: CountryAliases) -> Self {
        table.aliases
    }
}
