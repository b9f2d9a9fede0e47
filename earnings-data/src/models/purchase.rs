use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Store section a purchase was made in
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseType {
    Privileges,
    Promotions,
    Cases,
    Tokens,
    Services,
    Subscription,
}

impl PurchaseType {
    pub const ALL: [PurchaseType; 6] = [
        PurchaseType::Privileges,
        PurchaseType::Promotions,
        PurchaseType::Cases,
        PurchaseType::Tokens,
        PurchaseType::Services,
        PurchaseType::Subscription,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseType::Privileges => "privileges",
            PurchaseType::Promotions => "promotions",
            PurchaseType::Cases => "cases",
            PurchaseType::Tokens => "tokens",
            PurchaseType::Services => "services",
            PurchaseType::Subscription => "subscription",
        }
    }

    /// Display label shown in the dashboard
    pub fn label(&self) -> &'static str {
        match self {
            PurchaseType::Privileges => "Привилегии",
            PurchaseType::Promotions => "Акции",
            PurchaseType::Cases => "Кейсы",
            PurchaseType::Tokens => "Токены",
            PurchaseType::Services => "Услуги",
            PurchaseType::Subscription => "Подписка",
        }
    }
}

impl fmt::Display for PurchaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PurchaseType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PurchaseType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| anyhow!("unknown purchase type: {}", s))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseStatus {
    Completed,
    Pending,
    Refunded,
    Failed,
}

impl PurchaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseStatus::Completed => "completed",
            PurchaseStatus::Pending => "pending",
            PurchaseStatus::Refunded => "refunded",
            PurchaseStatus::Failed => "failed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PurchaseStatus::Completed => "Выполнено",
            PurchaseStatus::Pending => "В ожидании",
            PurchaseStatus::Refunded => "Возврат",
            PurchaseStatus::Failed => "Ошибка",
        }
    }
}

impl fmt::Display for PurchaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single purchase attributed to an affiliate domain
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: String,
    pub username: String,
    /// Display name of the buyer
    pub nickname: String,
    pub domain: String,
    #[serde(rename = "type")]
    pub purchase_type: PurchaseType,
    /// Amount in USD-equivalent units
    pub amount: f64,
    pub currency: String,
    /// Purchase time (ISO 8601)
    pub date: String,
    pub status: PurchaseStatus,
}

impl Purchase {
    pub fn is_completed(&self) -> bool {
        self.status == PurchaseStatus::Completed
    }
}
