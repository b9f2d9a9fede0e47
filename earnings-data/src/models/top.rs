use serde::{Deserialize, Serialize};

use crate::models::PurchaseType;

/// Headline numbers for the current creator. Deltas are percent change
/// against the previous period.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KpiStats {
    pub revenue_today: f64,
    pub revenue_today_delta: f64,
    pub revenue_yesterday_same_time: f64,
    pub revenue_this_week: f64,
    pub revenue_this_week_delta: f64,
    pub revenue_this_month: f64,
    pub revenue_this_month_delta: f64,
    pub attracted_users_week: u32,
    pub attracted_users_week_delta: f64,
    pub revenue_by_domain: f64,
    pub revenue_by_domain_delta: f64,
    /// Percent
    pub domain_conversion: f64,
}

/// A best-selling purchase with its share of the listed revenue
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopPurchase {
    pub id: String,
    pub username: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub purchase_type: PurchaseType,
    /// Section label
    pub name: String,
    pub count: u32,
    pub share_percent: u32,
}

/// A player ranked by total spend
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopUser {
    pub username: String,
    pub total_spent: f64,
    pub purchase_count: u32,
    pub sparkline: Vec<f64>,
}
