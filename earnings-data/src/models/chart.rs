use serde::{Deserialize, Serialize};
use std::fmt;

/// One day of the revenue chart series
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    /// Calendar day, `YYYY-MM-DD`
    pub date: String,
    /// USD-equivalent
    pub revenue: f64,
    pub purchases: u32,
    pub new_players: u32,
    pub total_users_passed: u32,
    pub users_online: u32,
    /// Revenue of the comparison period
    pub compare_revenue: f64,
    pub compare_purchases: u32,
}

/// Series a chart can plot
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum ChartMetric {
    #[default]
    Revenue,
    Purchases,
    NewPlayers,
    TotalUsersPassed,
    UsersOnline,
}

impl ChartMetric {
    pub fn label(&self) -> &'static str {
        match self {
            ChartMetric::Revenue => "Доход",
            ChartMetric::Purchases => "Покупки",
            ChartMetric::NewPlayers => "Новые игроки",
            ChartMetric::TotalUsersPassed => "Всего перешло",
            ChartMetric::UsersOnline => "Онлайн",
        }
    }

    pub fn value(&self, point: &ChartPoint) -> f64 {
        match self {
            ChartMetric::Revenue => point.revenue,
            ChartMetric::Purchases => point.purchases as f64,
            ChartMetric::NewPlayers => point.new_players as f64,
            ChartMetric::TotalUsersPassed => point.total_users_passed as f64,
            ChartMetric::UsersOnline => point.users_online as f64,
        }
    }

    /// Value of the comparison period, for the metrics that carry one
    pub fn compare_value(&self, point: &ChartPoint) -> Option<f64> {
        match self {
            ChartMetric::Revenue => Some(point.compare_revenue),
            ChartMetric::Purchases => Some(point.compare_purchases as f64),
            _ => None,
        }
    }

    /// Revenue is money, everything else is a head count
    pub fn is_money(&self) -> bool {
        matches!(self, ChartMetric::Revenue)
    }
}

impl fmt::Display for ChartMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
