use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    ChartPoint, CreatorStats, DomainStats, KpiStats, Purchase, PurchaseStatus, PurchaseType,
    TopPurchase, TopUser, CURRENT_CREATOR_ID,
};
use crate::stats::{assign_share_percent, msk_date, parse_timestamp};

/// Number of generated purchases
pub const MOCK_PURCHASE_COUNT: usize = 48;
/// Generated purchases are spread over this many days before "now"
pub const MOCK_PURCHASE_DAYS: i64 = 30;

/// Days in the revenue chart series
pub const CHART_DAYS: i64 = 14;

/// Domain of the creator viewing the dashboard
pub const CURRENT_CREATOR_DOMAIN: &str = "piona.funtime.su";
const CURRENT_CREATOR_LEVEL: u32 = 4;
const CURRENT_CREATOR_PURCHASES: u32 = 28;
const CURRENT_CREATOR_SPARKLINE: [f64; 7] = [720.0, 765.0, 800.0, 835.0, 865.0, 892.0, 920.0];

const FIRST_NAMES: &[&str] = &[
    "Alex", "Jordan", "Sam", "Taylor", "Casey", "Riley", "Morgan", "Quinn", "Avery", "Reese",
];
const LAST_NAMES: &[&str] = &[
    "Smith", "Lee", "Kim", "Brown", "Garcia", "Wilson", "Chen", "Davis", "Martinez", "Jones",
];
const DOMAIN_SLUGS: &[&str] = &[
    "fonix", "aqua", "fokus1", "nefort", "nsai", "kast", "hardy", "honey", "aks", "anim", "flerni",
    "garou",
];
const STATUSES: &[PurchaseStatus] = &[
    PurchaseStatus::Completed,
    PurchaseStatus::Completed,
    PurchaseStatus::Completed,
    PurchaseStatus::Pending,
    PurchaseStatus::Refunded,
    PurchaseStatus::Failed,
];

fn slug_to_domain(slug: &str) -> String {
    format!("{}.funtime.su", slug)
}

fn at<T: Copy>(items: &[T], i: usize) -> T {
    items[i % items.len()]
}

/// The full in-memory dataset behind the dashboard
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MockDataset {
    pub generated_at: DateTime<Utc>,
    /// Newest first
    pub purchases: Vec<Purchase>,
    /// The current creator first, then the other official creators
    pub creators: Vec<CreatorStats>,
    pub domains: Vec<DomainStats>,
    pub kpi_stats: KpiStats,
    /// Oldest first, one point per Moscow calendar day
    pub chart_data: Vec<ChartPoint>,
    pub top_purchases: Vec<TopPurchase>,
    pub top_users: Vec<TopUser>,
}

impl MockDataset {
    /// Builds the dataset with purchase dates relative to `now`
    pub fn generate(now: DateTime<Utc>) -> Self {
        Self {
            generated_at: now,
            purchases: generate_purchases(now),
            creators: creator_stats(),
            domains: domain_stats(),
            kpi_stats: kpi_stats(),
            chart_data: generate_chart_data(now),
            top_purchases: top_purchases(),
            top_users: top_users(),
        }
    }

    pub fn current_creator(&self) -> Option<&CreatorStats> {
        self.creators.iter().find(|c| c.is_current())
    }
}

/// Deterministic purchases, one every day going back, newest first
pub fn generate_purchases(now: DateTime<Utc>) -> Vec<Purchase> {
    let mut purchases: Vec<Purchase> = (0..MOCK_PURCHASE_COUNT)
        .map(|i| {
            let first = at(FIRST_NAMES, i);
            let last = at(LAST_NAMES, i * 7);
            let amount = 0.4 + (i as f64 * 0.25) % 4.5 + (i % 4) as f64 * 0.05;
            let date = now - Duration::days(i as i64 % MOCK_PURCHASE_DAYS);

            Purchase {
                id: format!("pur-{}", 1000 + i),
                username: format!("{}.{}{}", first.to_lowercase(), last.to_lowercase(), i % 5),
                nickname: format!("{} {}", first, last),
                domain: slug_to_domain(at(DOMAIN_SLUGS, i)),
                purchase_type: at(&PurchaseType::ALL, i),
                amount: (amount * 100.0).round() / 100.0,
                currency: "USD".to_string(),
                date: date.to_rfc3339_opts(SecondsFormat::Millis, true),
                status: at(STATUSES, i),
            }
        })
        .collect();

    purchases.sort_by(|a, b| parse_timestamp(&b.date).cmp(&parse_timestamp(&a.date)));
    purchases
}

/// Daily chart series ending on today's Moscow date, oldest first
pub fn generate_chart_data(now: DateTime<Utc>) -> Vec<ChartPoint> {
    let today = msk_date(now);
    (0..CHART_DAYS)
        .map(|i| {
            let x = i as f64;
            let base_revenue = 95.0 + (x * 0.5).sin() * 35.0 + x * 4.0;
            let purchases = (3 + i % 5 + i / 4) as u32;

            ChartPoint {
                date: (today - Duration::days(CHART_DAYS - 1 - i))
                    .format("%Y-%m-%d")
                    .to_string(),
                revenue: base_revenue.round(),
                purchases,
                new_players: (2 + i % 4 + i / 5) as u32,
                total_users_passed: (50 + i * 8 + (i % 3) * 5) as u32,
                users_online: (1200.0 + (x * 0.3).sin() * 300.0 + x * 20.0).round() as u32,
                compare_revenue: (base_revenue * 0.85).round(),
                compare_purchases: purchases.saturating_sub(2).max(2),
            }
        })
        .collect()
}

pub fn kpi_stats() -> KpiStats {
    KpiStats {
        revenue_today: 145.0,
        revenue_today_delta: 12.4,
        revenue_yesterday_same_time: 129.0,
        revenue_this_week: 920.0,
        revenue_this_week_delta: 18.2,
        revenue_this_month: 4200.0,
        revenue_this_month_delta: 24.8,
        attracted_users_week: 2089,
        attracted_users_week_delta: 12.5,
        revenue_by_domain: 820.0,
        revenue_by_domain_delta: 8.2,
        domain_conversion: 18.2,
    }
}

/// Best-selling purchases, with shares of their combined amount
pub fn top_purchases() -> Vec<TopPurchase> {
    let raw = [
        ("1", "huesos лютый1", 7.9, PurchaseType::Subscription),
        ("2", "jordan.lee", 4.9, PurchaseType::Services),
        ("3", "taylor.kim", 3.9, PurchaseType::Cases),
        ("4", "casey.brown", 2.9, PurchaseType::Privileges),
        ("5", "morgan.wilson", 1.9, PurchaseType::Tokens),
    ];
    let count = raw.len() as u32;

    let mut purchases: Vec<TopPurchase> = raw
        .into_iter()
        .zip(0..)
        .map(|((id, username, amount, purchase_type), i)| TopPurchase {
            id: id.to_string(),
            username: username.to_string(),
            amount,
            purchase_type,
            name: purchase_type.label().to_string(),
            count: count - i,
            share_percent: 0,
        })
        .collect();
    assign_share_percent(&mut purchases);
    purchases
}

pub fn top_users() -> Vec<TopUser> {
    let user = |username: &str, total_spent: f64, purchase_count: u32, sparkline: [f64; 7]| TopUser {
        username: username.to_string(),
        total_spent,
        purchase_count,
        sparkline: sparkline.to_vec(),
    };
    vec![
        user("alex.smith2", 35.0, 8, [12.0, 19.0, 8.0, 24.0, 18.0, 22.0, 28.0]),
        user("jordan.lee", 24.0, 5, [8.0, 14.0, 10.0, 16.0, 12.0, 18.0, 14.0]),
        user("taylor.kim", 20.0, 6, [6.0, 10.0, 14.0, 8.0, 16.0, 12.0, 10.0]),
        user("casey.brown", 17.0, 4, [4.0, 8.0, 6.0, 12.0, 8.0, 10.0, 6.0]),
        user("riley.garcia", 14.0, 3, [2.0, 6.0, 8.0, 4.0, 10.0, 6.0, 8.0]),
    ]
}

#[allow(clippy::too_many_arguments)]
fn creator(
    id: &str,
    name: &str,
    revenue: [f64; 3],
    purchases_count: u32,
    conversion: f64,
    attracted_users: u32,
    level: u32,
    sparkline: [f64; 7],
) -> CreatorStats {
    let domain = if id == CURRENT_CREATOR_ID {
        CURRENT_CREATOR_DOMAIN.to_string()
    } else {
        slug_to_domain(id)
    };

    CreatorStats {
        id: id.to_string(),
        name: name.to_string(),
        domain,
        is_official: true,
        revenue_day: revenue[0],
        revenue_week: revenue[1],
        revenue_month: revenue[2],
        purchases_count,
        conversion,
        attracted_users,
        level,
        sparkline: sparkline.to_vec(),
    }
}

/// The current creator's record, built from the headline numbers
pub fn current_creator_stats(kpi: &KpiStats) -> CreatorStats {
    creator(
        CURRENT_CREATOR_ID,
        "piona",
        [kpi.revenue_today, kpi.revenue_this_week, kpi.revenue_this_month],
        CURRENT_CREATOR_PURCHASES,
        kpi.domain_conversion,
        kpi.attracted_users_week,
        CURRENT_CREATOR_LEVEL,
        CURRENT_CREATOR_SPARKLINE,
    )
}

pub fn creator_stats() -> Vec<CreatorStats> {
    vec![
        current_creator_stats(&kpi_stats()),
        creator("fonix", "FONIX", [185.0, 1280.0, 5200.0], 186, 18.2, 4200, 5, [280.0, 305.0, 320.0, 335.0, 345.0, 355.0, 365.0]),
        creator("aqua", "Akvi4", [150.0, 1050.0, 4280.0], 152, 16.1, 3800, 5, [220.0, 242.0, 258.0, 272.0, 285.0, 298.0, 310.0]),
        creator("fokus1", "Fokus1", [132.0, 920.0, 3680.0], 134, 15.4, 3200, 4, [185.0, 202.0, 218.0, 232.0, 245.0, 258.0, 270.0]),
        creator("nefort", "Нефорт", [114.0, 798.0, 3180.0], 118, 14.8, 2850, 4, [162.0, 178.0, 192.0, 205.0, 218.0, 228.0, 238.0]),
        creator("nsai", "NSAI", [94.0, 658.0, 2620.0], 98, 13.2, 2450, 4, [132.0, 148.0, 162.0, 175.0, 188.0, 198.0, 208.0]),
        creator("kast", "KastroomXD", [78.0, 548.0, 2180.0], 86, 12.5, 2180, 3, [108.0, 122.0, 135.0, 148.0, 158.0, 168.0, 178.0]),
        creator("hardy", "_Dane4ka_", [64.0, 448.0, 1780.0], 72, 11.8, 2165, 3, [88.0, 98.0, 108.0, 118.0, 128.0, 138.0, 148.0]),
        creator("honey", "Honey", [60.0, 418.0, 1650.0], 68, 11.2, 2152, 3, [82.0, 92.0, 100.0, 108.0, 118.0, 126.0, 135.0]),
        creator("aks", "Акс", [47.0, 328.0, 1300.0], 54, 10.5, 2118, 3, [62.0, 72.0, 80.0, 88.0, 96.0, 104.0, 112.0]),
        creator("anim", "Анимчик", [37.0, 258.0, 1020.0], 42, 9.8, 2092, 2, [48.0, 56.0, 64.0, 72.0, 78.0, 84.0, 90.0]),
        creator("flerni", "Флерни", [31.0, 218.0, 858.0], 38, 9.2, 2078, 2, [40.0, 48.0, 54.0, 60.0, 66.0, 72.0, 78.0]),
        creator("garou", "Garou", [21.0, 148.0, 585.0], 28, 8.4, 2052, 2, [26.0, 32.0, 38.0, 42.0, 48.0, 52.0, 58.0]),
    ]
}

fn domain(slug: &str, short: &str, main: (f64, u32, f64), sub: (f64, u32, f64)) -> DomainStats {
    DomainStats {
        domain: slug_to_domain(slug),
        revenue: main.0,
        attracted_users: main.1,
        conversion: main.2,
        subdomains: Some(vec![DomainStats {
            domain: slug_to_domain(short),
            revenue: sub.0,
            attracted_users: sub.1,
            conversion: sub.2,
            subdomains: None,
        }]),
    }
}

pub fn domain_stats() -> Vec<DomainStats> {
    vec![
        domain("fonix", "fx", (820.0, 4200, 18.2), (185.0, 2150, 16.8)),
        domain("aqua", "aq", (645.0, 3800, 16.1), (142.0, 2050, 15.2)),
        domain("fokus1", "fk", (588.0, 3200, 15.4), (128.0, 2080, 14.1)),
        domain("nefort", "nf", (512.0, 2850, 14.8), (108.0, 2040, 13.5)),
        domain("nsai", "ns", (428.0, 2450, 13.2), (92.0, 2030, 12.2)),
        domain("kast", "ka", (365.0, 2180, 12.5), (78.0, 2020, 11.8)),
        domain("hardy", "hd", (298.0, 2165, 11.8), (62.0, 2010, 10.9)),
        domain("honey", "hn", (275.0, 2152, 11.2), (58.0, 2008, 10.5)),
        domain("aks", "ak", (218.0, 2118, 10.5), (46.0, 2005, 9.8)),
        domain("anim", "an", (168.0, 2092, 9.8), (35.0, 2003, 9.2)),
        domain("flerni", "fl", (142.0, 2078, 9.2), (28.0, 2002, 8.6)),
        domain("garou", "gr", (98.0, 2052, 8.4), (18.0, 2000, 7.9)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{filter_in_range, resolve_range, DatePreset};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_generated_purchases_are_newest_first() {
        let purchases = generate_purchases(now());
        assert_eq!(purchases.len(), MOCK_PURCHASE_COUNT);
        let dates: Vec<_> = purchases
            .iter()
            .map(|p| parse_timestamp(&p.date).unwrap())
            .collect();
        assert!(dates.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(purchases[0].date, "2025-03-10T12:00:00.000Z");
    }

    #[test]
    fn test_first_purchase_fields() {
        let purchases = generate_purchases(now());
        let first = purchases.iter().find(|p| p.id == "pur-1000").unwrap();
        assert_eq!(first.username, "alex.smith0");
        assert_eq!(first.nickname, "Alex Smith");
        assert_eq!(first.domain, "fonix.funtime.su");
        assert_eq!(first.purchase_type, PurchaseType::Privileges);
        assert_eq!(first.amount, 0.4);
        assert_eq!(first.status, PurchaseStatus::Completed);
    }

    #[test]
    fn test_today_holds_two_purchases() {
        // i = 0 and i = 30 both land on "now"
        let range = resolve_range(DatePreset::Today, None, None, now());
        let today = filter_in_range(&generate_purchases(now()), &range);
        assert_eq!(today.len(), 2);
    }

    #[test]
    fn test_current_creator_present() {
        let dataset = MockDataset::generate(now());
        let me = dataset.current_creator().unwrap();
        assert_eq!(me.domain, CURRENT_CREATOR_DOMAIN);
        assert_eq!(dataset.domains.len(), 12);
    }

    #[test]
    fn test_current_creator_follows_kpi_stats() {
        let kpi = kpi_stats();
        let me = current_creator_stats(&kpi);
        assert!(me.is_current());
        assert_eq!(me.revenue_day, kpi.revenue_today);
        assert_eq!(me.revenue_week, kpi.revenue_this_week);
        assert_eq!(me.revenue_month, kpi.revenue_this_month);
        assert_eq!(me.attracted_users, kpi.attracted_users_week);
        assert_eq!(me.conversion, kpi.domain_conversion);
        assert_eq!(creator_stats()[0], me);
    }

    #[test]
    fn test_chart_data_ends_today_oldest_first() {
        let chart = generate_chart_data(now());
        assert_eq!(chart.len(), CHART_DAYS as usize);
        assert_eq!(chart[0].date, "2025-02-25");
        assert_eq!(chart[13].date, "2025-03-10");
        assert!(chart.windows(2).all(|w| w[0].date < w[1].date));

        let first = &chart[0];
        assert_eq!(first.revenue, 95.0);
        assert_eq!(first.purchases, 3);
        assert_eq!(first.new_players, 2);
        assert_eq!(first.total_users_passed, 50);
        assert_eq!(first.users_online, 1200);
        assert_eq!(first.compare_revenue, 81.0);
        assert_eq!(first.compare_purchases, 2);
    }

    #[test]
    fn test_chart_data_uses_moscow_date() {
        // 22:00 UTC on March 10 is March 11 in Moscow
        let late = Utc.with_ymd_and_hms(2025, 3, 10, 22, 0, 0).unwrap();
        let chart = generate_chart_data(late);
        assert_eq!(chart[13].date, "2025-03-11");

        let range = resolve_range(DatePreset::Today, None, None, late);
        let today = filter_in_range(&chart, &range);
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].date, "2025-03-11");
    }

    #[test]
    fn test_week_filter_keeps_seven_chart_days() {
        let range = resolve_range(DatePreset::Week, None, None, now());
        let week = filter_in_range(&generate_chart_data(now()), &range);
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].date, "2025-03-04");
    }

    #[test]
    fn test_top_purchases_count_down() {
        let top = top_purchases();
        let counts: Vec<_> = top.iter().map(|p| p.count).collect();
        assert_eq!(counts, vec![5, 4, 3, 2, 1]);
        assert_eq!(top[0].name, "Подписка");
    }
}
