use serde::{Deserialize, Serialize};

/// Identifier of the creator viewing the dashboard
pub const CURRENT_CREATOR_ID: &str = "me";

/// Aggregated metrics for one content affiliate
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreatorStats {
    pub id: String,
    pub name: String,
    pub domain: String,
    /// Verified (official) creator
    pub is_official: bool,
    pub revenue_day: f64,
    pub revenue_week: f64,
    pub revenue_month: f64,
    pub purchases_count: u32,
    /// Domain conversion, percent
    pub conversion: f64,
    pub attracted_users: u32,
    pub level: u32,
    /// One point per recent day, oldest first
    pub sparkline: Vec<f64>,
}

impl CreatorStats {
    /// Weekly revenue per purchase, zero when there were no purchases
    pub fn average_check(&self) -> f64 {
        if self.purchases_count > 0 {
            self.revenue_week / self.purchases_count as f64
        } else {
            0.0
        }
    }

    pub fn is_current(&self) -> bool {
        self.id == CURRENT_CREATOR_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creator(revenue_week: f64, purchases_count: u32) -> CreatorStats {
        CreatorStats {
            id: "fonix".to_string(),
            name: "FONIX".to_string(),
            domain: "fonix.funtime.su".to_string(),
            is_official: true,
            revenue_day: 0.0,
            revenue_week,
            revenue_month: 0.0,
            purchases_count,
            conversion: 18.2,
            attracted_users: 4200,
            level: 5,
            sparkline: vec![],
        }
    }

    #[test]
    fn test_average_check_divides_weekly_revenue() {
        assert_eq!(creator(1280.0, 160).average_check(), 8.0);
    }

    #[test]
    fn test_average_check_is_zero_without_purchases() {
        assert_eq!(creator(1280.0, 0).average_check(), 0.0);
    }
}
