//! 研究時優先搜尋的可信網域，依內容類別分組。

const TRADING_DOMAINS: &[&str] = &[
    "tradestation.com",
    "cmegroup.com",
    "theice.com",
    "rjofutures.rjobrien.com",
    "bloomberg.com",
    "reuters.com",
];

const CRYPTO_DOMAINS: &[&str] = &[
    "coindesk.com",
    "cointelegraph.com",
    "binance.com",
    "kraken.com",
];

/// 一般搜尋時排除的網域
pub const EXCLUDED_DOMAINS: &[&str] = &["pinterest.com", "facebook.com", "instagram.com"];

pub const CATEGORIES: &[&str] = &["trading", "crypto"];

/// 未知類別回傳空清單
pub fn preferred_domains(category: &str) -> &'static [&'static str] {
    match category {
        "trading" => TRADING_DOMAINS,
        "crypto" => CRYPTO_DOMAINS,
        _ => &[],
    }
}
