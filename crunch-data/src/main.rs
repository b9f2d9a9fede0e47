use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use earnings_data::stats::{msk_date, parse_timestamp};
use earnings_data::{CURRENT_CREATOR_ID, DEFAULT_EXPORT_FILE, DEFAULT_SUMMARY_FILE};
use std::fs;
use std::path::Path;

/// Days of completed revenue kept in the summary
const DAILY_REVENUE_DAYS: usize = 14;
const RECENT_PURCHASES: usize = 10;
const TOP_CREATORS: usize = 10;

fn main() -> Result<()> {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let workspace_root = manifest_dir
        .parent()
        .context("crunch-data must live inside the workspace")?;

    let input_path = workspace_root.join(DEFAULT_EXPORT_FILE);
    let output_path = workspace_root.join(DEFAULT_SUMMARY_FILE);

    let content = fs::read_to_string(&input_path)
        .with_context(|| format!("Failed to read {}. Run `earnings export` first", input_path.display()))?;
    let export: toml::Table = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", input_path.display()))?;

    let summary = crunch(&export);
    let summary_toml = toml::to_string(&summary).context("Failed to serialize summary")?;
    fs::write(&output_path, summary_toml)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;
    println!(
        "✅ Crunched earnings stats written to {}",
        output_path.display()
    );
    Ok(())
}

/// Builds the compact summary table from a full export
fn crunch(export: &toml::Table) -> toml::Table {
    let mut summary = toml::Table::new();

    // Copy the fields the view layer reads as-is
    for key in ["generatedAt", "summary", "yourRank", "averageCreator", "kpiStats"] {
        if let Some(value) = export.get(key) {
            summary.insert(key.to_string(), value.clone());
        }
    }

    let now = export
        .get("generatedAt")
        .and_then(|v| v.as_str())
        .and_then(parse_timestamp)
        .unwrap_or_else(Utc::now);

    if let Some(purchases) = export.get("purchases").and_then(|p| p.as_array()) {
        summary.insert(
            "recentPurchases".to_string(),
            toml::Value::Array(extract_recent_purchases(purchases)),
        );
        summary.insert(
            "dailyRevenue".to_string(),
            toml::Value::Array(
                compute_daily_revenue(purchases, now)
                    .into_iter()
                    .map(toml::Value::Float)
                    .collect(),
            ),
        );
    }

    if let Some(leaderboard) = export.get("leaderboard").and_then(|l| l.as_array()) {
        summary.insert(
            "topCreators".to_string(),
            toml::Value::Array(extract_top_creators(leaderboard)),
        );
    }

    summary
}

fn is_completed(purchase: &toml::Value) -> bool {
    purchase.get("status").and_then(|s| s.as_str()) == Some("completed")
}

fn parse_date(purchase: &toml::Value) -> Option<DateTime<Utc>> {
    parse_timestamp(purchase.get("date")?.as_str()?)
}

/// The most recent completed purchases, newest first
fn extract_recent_purchases(purchases: &[toml::Value]) -> Vec<toml::Value> {
    let mut recent: Vec<_> = purchases
        .iter()
        .filter(|p| is_completed(p))
        .filter_map(|p| parse_date(p).map(|date| (date, p)))
        .collect();

    // Sort by date (most recent first)
    recent.sort_by(|(a, _), (b, _)| b.cmp(a));
    recent.truncate(RECENT_PURCHASES);

    recent
        .into_iter()
        .map(|(_, purchase)| {
            let mut entry = toml::Table::new();
            for key in ["id", "nickname", "domain", "type", "amount", "date"] {
                if let Some(value) = purchase.get(key) {
                    entry.insert(key.to_string(), value.clone());
                }
            }
            toml::Value::Table(entry)
        })
        .collect()
}

/// Completed revenue per Moscow calendar day, oldest first.
/// Index 0 = thirteen days ago, index 13 = today.
fn compute_daily_revenue(purchases: &[toml::Value], now: DateTime<Utc>) -> Vec<f64> {
    let today = msk_date(now);
    let mut daily = vec![0.0; DAILY_REVENUE_DAYS];

    for purchase in purchases.iter().filter(|p| is_completed(p)) {
        let Some(date) = parse_date(purchase) else {
            continue;
        };
        let amount = purchase
            .get("amount")
            .and_then(|a| a.as_float().or_else(|| a.as_integer().map(|i| i as f64)))
            .unwrap_or(0.0);

        let days_ago = (today - msk_date(date)).num_days();
        if days_ago >= 0 && (days_ago as usize) < DAILY_REVENUE_DAYS {
            daily[DAILY_REVENUE_DAYS - 1 - days_ago as usize] += amount;
        }
    }

    daily
        .into_iter()
        .map(|revenue| (revenue * 100.0).round() / 100.0)
        .collect()
}

/// The first leaderboard rows, trimmed to what the podium view shows
fn extract_top_creators(leaderboard: &[toml::Value]) -> Vec<toml::Value> {
    leaderboard
        .iter()
        .take(TOP_CREATORS)
        .filter_map(|row| {
            let mut entry = toml::Table::new();
            entry.insert("rank".to_string(), row.get("rank")?.clone());
            entry.insert("name".to_string(), row.get("name")?.clone());
            entry.insert("revenueWeek".to_string(), row.get("revenueWeek")?.clone());
            if let Some(current) = row.get("id").and_then(|id| id.as_str()) {
                entry.insert(
                    "isCurrent".to_string(),
                    toml::Value::Boolean(current == CURRENT_CREATOR_ID),
                );
            }
            Some(toml::Value::Table(entry))
        })
        .collect()
}
