use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::mock::MockDataset;
use crate::models::{ChartPoint, DomainStats, KpiStats, Purchase, TopPurchase, TopUser};
use crate::stats::{
    average_creator, build_leaderboard, summarize_purchases, your_rank, AverageCreator,
    LeaderboardRow, PurchaseSummary, SortDirection, SortKey, YourRank,
};

/// Dataset snapshot written by `earnings export`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EarningsExport {
    pub generated_at: DateTime<Utc>,
    pub summary: PurchaseSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub your_rank: Option<YourRank>,
    pub average_creator: AverageCreator,
    /// Revenue order
    pub leaderboard: Vec<LeaderboardRow>,
    pub domains: Vec<DomainStats>,
    /// Newest first
    pub purchases: Vec<Purchase>,
    pub kpi_stats: KpiStats,
    /// Oldest first
    pub chart_data: Vec<ChartPoint>,
    pub top_purchases: Vec<TopPurchase>,
    pub top_users: Vec<TopUser>,
}

impl EarningsExport {
    pub fn from_dataset(dataset: &MockDataset) -> Self {
        Self {
            generated_at: dataset.generated_at,
            summary: summarize_purchases(&dataset.purchases),
            your_rank: your_rank(&dataset.creators),
            average_creator: average_creator(&dataset.creators),
            leaderboard: build_leaderboard(&dataset.creators, SortKey::Place, SortDirection::Asc),
            domains: dataset.domains.clone(),
            purchases: dataset.purchases.clone(),
            kpi_stats: dataset.kpi_stats.clone(),
            chart_data: dataset.chart_data.clone(),
            top_purchases: dataset.top_purchases.clone(),
            top_users: dataset.top_users.clone(),
        }
    }
}

pub fn write_export(path: &Path, export: &EarningsExport) -> Result<()> {
    let toml_content =
        toml::to_string_pretty(export).context("Failed to serialize export to TOML")?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    fs::write(path, toml_content).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}

/// Load a previous export from a specific path
pub fn load_export(path: &Path) -> Result<EarningsExport> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    let export: EarningsExport = toml::from_str(&content)
        .with_context(|| format!("Failed to parse export TOML in file: {:?}", path))?;
    Ok(export)
}
