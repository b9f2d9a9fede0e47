use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::models::{ChartMetric, PurchaseType};
use crate::stats::{PurchaseSortKey, SortKey};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Show detailed progress information
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (defaults to ./earnings.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Toml,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a date preset into a Moscow-time interval
    Range {
        /// today, 24h, week, month, all or custom
        #[arg(default_value = "today")]
        preset: String,
        /// First day of a custom range (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Last day of a custom range (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
    /// List purchases in a period
    Purchases {
        /// today, 24h, week, month, all or custom
        #[arg(long, default_value = "today")]
        range: String,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        /// Only purchases made through this domain
        #[arg(long)]
        domain: Option<String>,
        /// Only purchases of this section
        #[arg(long = "type", value_enum)]
        purchase_type: Option<PurchaseType>,
        /// Match username or nickname
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, value_enum, default_value_t = PurchaseSortKey::Date)]
        sort: PurchaseSortKey,
        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Creator leaderboard by weekly revenue
    Leaderboard {
        #[arg(long, value_enum, default_value_t = SortKey::RevenueWeek)]
        sort: SortKey,
        /// Sort ascending (the default for names)
        #[arg(long)]
        asc: bool,
        /// Match creator name
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Daily chart series in a period
    Chart {
        /// today, 24h, week, month, all or custom
        #[arg(long, default_value = "week")]
        range: String,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        #[arg(long, value_enum, default_value_t = ChartMetric::Revenue)]
        metric: ChartMetric,
    },
    /// Headline revenue numbers with change against the previous period
    Kpi,
    /// Top domains, players and purchases
    Top {
        /// Number of entries per list
        #[arg(long, default_value_t = crate::stats::TOP_LIST_LEN)]
        limit: usize,
    },
    /// Your place among creators
    Rank,
    /// Your metrics against the average creator
    Compare,
    /// Domain revenue and traffic
    Domains {
        /// Show a single domain or subdomain
        domain: Option<String>,
    },
    /// Write the dataset and computed stats to a TOML file
    Export {
        /// Output file (defaults to the configured export path)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}
