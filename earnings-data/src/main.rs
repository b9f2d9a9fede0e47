use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use earnings_data::currency::{format_number, format_rubles, FormatOptions};
use earnings_data::export::{write_export, EarningsExport};
use earnings_data::mock::MockDataset;
use earnings_data::models::{
    find_domain_stats, ChartMetric, ChartPoint, Cli, Commands, DomainStats, OutputFormat,
    TopPurchase, TopUser,
};
use earnings_data::stats::{
    average_creator, delta_percent, filter_in_range, filter_purchases, msk_date, paginate,
    resolve_range, search_leaderboard, sort_purchases, top_domains_by_revenue,
    top_domains_by_users, top_users_by_spent, your_rank, DatePreset, DateRange, SortDirection,
};
use earnings_data::state::PurchaseFilters;
use earnings_data::DashboardConfig;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints `value` as JSON or TOML, or runs `text` for the human format
fn emit<T: Serialize>(format: OutputFormat, value: &T, text: impl FnOnce()) -> Result<()> {
    match format {
        OutputFormat::Text => text(),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(value).context("Failed to serialize output to JSON")?
        ),
        OutputFormat::Toml => println!(
            "{}",
            toml::to_string_pretty(value).context("Failed to serialize output to TOML")?
        ),
    }
    Ok(())
}

fn msk_display(instant: DateTime<Utc>) -> String {
    let msk = instant + chrono::Duration::hours(earnings_data::MSK_OFFSET_HOURS);
    format!("{} MSK", msk.format("%Y-%m-%d %H:%M:%S%.3f"))
}

fn rubles(usd: f64) -> String {
    format_rubles(usd, FormatOptions::default())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RangeOutput {
    preset: DatePreset,
    range: DateRange,
    days: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PurchasesOutput<T: Serialize> {
    range: DateRange,
    page: T,
}

#[derive(Serialize)]
struct LeaderboardOutput<T: Serialize> {
    rows: T,
}

#[derive(Serialize)]
struct DomainsOutput<'a> {
    domains: &'a [DomainStats],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartOutput<'a> {
    preset: DatePreset,
    metric: ChartMetric,
    range: DateRange,
    points: &'a [ChartPoint],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TopOutput<'a> {
    domains_by_revenue: Vec<&'a DomainStats>,
    domains_by_users: Vec<&'a DomainStats>,
    users_by_spent: Vec<&'a TopUser>,
    purchases: Vec<&'a TopPurchase>,
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = DashboardConfig::load(cli.config.as_deref())?;
    debug!(?config, "loaded dashboard config");

    let now = Utc::now();
    let dataset = MockDataset::generate(now);
    info!(
        purchases = dataset.purchases.len(),
        creators = dataset.creators.len(),
        "generated dataset"
    );

    match cli.command.unwrap_or(Commands::Rank) {
        Commands::Range { preset, from, to } => {
            let preset = DatePreset::parse(&preset);
            let range = resolve_range(preset, from.as_deref(), to.as_deref(), now);
            let days = (msk_date(range.to) - msk_date(range.from)).num_days() + 1;
            let output = RangeOutput { preset, range, days };
            emit(cli.format, &output, || {
                println!("📅 {} ({} calendar days)", preset, days);
                println!("   from {}", msk_display(range.from));
                println!("   to   {}", msk_display(range.to));
            })?;
        }
        Commands::Purchases {
            range,
            from,
            to,
            domain,
            purchase_type,
            search,
            sort,
            asc,
            page,
        } => {
            let filters = PurchaseFilters {
                date_range: DatePreset::parse(&range),
                purchase_type,
                domain: domain.unwrap_or_default(),
                search,
                custom_from: from,
                custom_to: to,
            };
            let query = filters.to_query(now);
            let mut found = filter_purchases(&dataset.purchases, &query);
            sort_purchases(&mut found, sort, SortDirection::from_ascending(asc));
            let page = paginate(&found, page.saturating_sub(1), config.page_size);

            let output = PurchasesOutput {
                range: query.range,
                page: &page,
            };
            emit(cli.format, &output, || {
                if page.total_items == 0 {
                    println!("🔍 No purchases in {} for these filters", filters.date_range);
                    return;
                }
                println!(
                    "🧾 {} purchases ({}), page {}/{}",
                    page.total_items,
                    filters.date_range,
                    page.page + 1,
                    page.total_pages
                );
                for p in &page.items {
                    println!(
                        "  {} {:<22} {:<18} {:<12} {:>10} {}",
                        p.id,
                        p.nickname,
                        p.domain,
                        p.purchase_type.label(),
                        rubles(p.amount),
                        p.status.label()
                    );
                }
            })?;
        }
        Commands::Leaderboard { sort, asc, search } => {
            let rows = search_leaderboard(
                &dataset.creators,
                &search,
                sort,
                SortDirection::from_ascending(asc),
            );
            emit(cli.format, &LeaderboardOutput { rows: &rows }, || {
                println!("🏆 Creator leaderboard ({} rows)", rows.len());
                for row in &rows {
                    let marker = if row.stats.is_current() { "👉" } else { "  " };
                    println!(
                        "{} #{:<3} {:<12} {:>6} purchases  avg {:>8}  week {:>12}  {:>5}%  {} users",
                        marker,
                        row.rank,
                        row.stats.name,
                        row.stats.purchases_count,
                        rubles(row.average_check),
                        rubles(row.stats.revenue_week),
                        format_number(row.stats.conversion, 1),
                        format_number(row.stats.attracted_users as f64, 0)
                    );
                }
            })?;
        }
        Commands::Chart {
            range,
            from,
            to,
            metric,
        } => {
            let preset = DatePreset::parse(&range);
            let range = resolve_range(preset, from.as_deref(), to.as_deref(), now);
            let points = filter_in_range(&dataset.chart_data, &range);
            let output = ChartOutput {
                preset,
                metric,
                range,
                points: &points,
            };
            emit(cli.format, &output, || {
                if points.is_empty() {
                    println!("📉 No chart data in {}", preset);
                    return;
                }
                let show = |value: f64| {
                    if metric.is_money() {
                        rubles(value)
                    } else {
                        format_number(value, 0)
                    }
                };
                println!("📈 {} by day ({}, {} days)", metric, preset, points.len());
                for point in &points {
                    let compare = metric
                        .compare_value(point)
                        .map(|v| format!("  (compare {})", show(v)))
                        .unwrap_or_default();
                    println!(
                        "  {}  {:>12}{}",
                        point.date,
                        show(metric.value(point)),
                        compare
                    );
                }
            })?;
        }
        Commands::Kpi => {
            let kpi = &dataset.kpi_stats;
            emit(cli.format, kpi, || {
                println!("💰 Headline numbers");
                let rows = [
                    ("Revenue, today", rubles(kpi.revenue_today), Some(kpi.revenue_today_delta)),
                    (
                        "Yesterday, same time",
                        rubles(kpi.revenue_yesterday_same_time),
                        None,
                    ),
                    ("Revenue, week", rubles(kpi.revenue_this_week), Some(kpi.revenue_this_week_delta)),
                    ("Revenue, month", rubles(kpi.revenue_this_month), Some(kpi.revenue_this_month_delta)),
                    (
                        "Attracted users, week",
                        format_number(kpi.attracted_users_week as f64, 0),
                        Some(kpi.attracted_users_week_delta),
                    ),
                    ("Revenue by domain", rubles(kpi.revenue_by_domain), Some(kpi.revenue_by_domain_delta)),
                    (
                        "Domain conversion",
                        format!("{}%", format_number(kpi.domain_conversion, 1)),
                        None,
                    ),
                ];
                for (label, value, delta) in rows {
                    let delta = delta.map(|d| format!("{:+.1}%", d)).unwrap_or_default();
                    println!("  {:<22} {:>12}  {}", label, value, delta);
                }
            })?;
        }
        Commands::Top { limit } => {
            let output = TopOutput {
                domains_by_revenue: top_domains_by_revenue(&dataset.domains, limit),
                domains_by_users: top_domains_by_users(&dataset.domains, limit),
                users_by_spent: top_users_by_spent(&dataset.top_users, limit),
                purchases: dataset.top_purchases.iter().take(limit).collect(),
            };
            emit(cli.format, &output, || {
                println!("🌐 Top domains by revenue");
                for (i, d) in output.domains_by_revenue.iter().enumerate() {
                    println!("  {}. {:<20} {:>12}", i + 1, d.domain, rubles(d.revenue));
                }
                println!("👥 Top domains by attracted players");
                for (i, d) in output.domains_by_users.iter().enumerate() {
                    println!(
                        "  {}. {:<20} {:>12}",
                        i + 1,
                        d.domain,
                        format_number(d.attracted_users as f64, 0)
                    );
                }
                println!("🏆 Top players by spend");
                for (i, u) in output.users_by_spent.iter().enumerate() {
                    println!(
                        "  {}. {:<16} {:>12} ({} purchases)",
                        i + 1,
                        u.username,
                        rubles(u.total_spent),
                        u.purchase_count
                    );
                }
                println!("🛒 Top purchases");
                for p in &output.purchases {
                    println!(
                        "  {:<12} {:<16} {:>10} {:>3}%",
                        p.name,
                        p.username,
                        rubles(p.amount),
                        p.share_percent
                    );
                }
            })?;
        }
        Commands::Rank => {
            let rank = your_rank(&dataset.creators)
                .context("Dataset has no current creator record")?;
            emit(cli.format, &rank, || {
                let medal = match rank.rank {
                    1 => "🥇 ",
                    2 => "🥈 ",
                    3 => "🥉 ",
                    _ => "",
                };
                println!("🏅 Your place: {}{} of {}", medal, rank.rank, rank.total);
                println!(
                    "   Better than {}% of creators by weekly revenue",
                    rank.percent_better
                );
            })?;
        }
        Commands::Compare => {
            let me = dataset
                .current_creator()
                .context("Dataset has no current creator record")?;
            let average = average_creator(&dataset.creators);
            emit(cli.format, &average, || {
                println!("📊 You vs the average creator");
                let metrics = [
                    ("Revenue, day", me.revenue_day, average.revenue_day),
                    ("Revenue, week", me.revenue_week, average.revenue_week),
                    ("Revenue, month", me.revenue_month, average.revenue_month),
                    ("Purchases", me.purchases_count as f64, average.purchases_count),
                    ("Conversion, %", me.conversion, average.conversion),
                    ("Attracted users", me.attracted_users as f64, average.attracted_users),
                ];
                for (label, yours, avg) in metrics {
                    let delta = delta_percent(yours, avg)
                        .map(|d| format!("{:+.1}%", d))
                        .unwrap_or_else(|| "n/a".to_string());
                    println!(
                        "  {:<16} {:>10} vs {:>10}  {}",
                        label,
                        format_number(yours, 1),
                        format_number(avg, 1),
                        delta
                    );
                }
            })?;
        }
        Commands::Domains { domain } => match domain {
            Some(name) => {
                let found = find_domain_stats(&dataset.domains, &name)
                    .with_context(|| format!("Unknown domain: {}", name))?;
                emit(cli.format, found.current, || {
                    println!("🌐 {}", found.current.domain);
                    if found.is_subdomain() {
                        println!("   subdomain of {}", found.main.domain);
                    }
                    println!("   revenue    {}", rubles(found.current.revenue));
                    println!("   users      {}", found.current.attracted_users);
                    println!("   conversion {}%", format_number(found.current.conversion, 1));
                })?;
            }
            None => {
                emit(
                    cli.format,
                    &DomainsOutput {
                        domains: &dataset.domains,
                    },
                    || {
                        println!("🌐 {} domains", dataset.domains.len());
                        for d in &dataset.domains {
                            println!(
                                "  {:<20} {:>12} {:>6} users {:>5}%",
                                d.domain,
                                rubles(d.revenue),
                                d.attracted_users,
                                format_number(d.conversion, 1)
                            );
                            for sub in d.subdomains() {
                                println!(
                                    "    └ {:<16} {:>12} {:>6} users {:>5}%",
                                    sub.domain,
                                    rubles(sub.revenue),
                                    sub.attracted_users,
                                    format_number(sub.conversion, 1)
                                );
                            }
                        }
                    },
                )?;
            }
        },
        Commands::Export { output } => {
            let path = output.unwrap_or_else(|| config.export_path.clone());
            println!("💾 Exporting dataset...");
            let export = EarningsExport::from_dataset(&dataset);
            write_export(&path, &export)?;
            println!("✅ Export complete!");
            println!("📈 Purchases: {}", export.purchases.len());
            println!("🏆 Creators: {}", export.leaderboard.len());
            println!("💰 Completed revenue: {}", rubles(export.summary.revenue));
            println!("💾 Results saved to {}", path.display());
        }
    }

    Ok(())
}
