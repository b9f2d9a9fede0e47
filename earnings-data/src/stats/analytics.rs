use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{CreatorStats, DomainStats, Purchase, TopPurchase, TopUser};
use crate::stats::revenue_ranks;

/// Length of the "top" lists
pub const TOP_LIST_LEN: usize = 5;

/// Where the current creator stands by weekly revenue
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct YourRank {
    pub rank: usize,
    pub total: usize,
    /// Share of creators at or below the current creator's place
    pub percent_better: u32,
}

pub fn your_rank(creators: &[CreatorStats]) -> Option<YourRank> {
    let ranks = revenue_ranks(creators);
    let index = creators.iter().position(|c| c.is_current())?;
    let rank = ranks[index];
    let total = creators.len();
    let percent_better = ((total - rank + 1) as f64 / total as f64 * 100.0).round() as u32;

    Some(YourRank {
        rank,
        total,
        percent_better,
    })
}

/// Mean metrics over every creator except the current one
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AverageCreator {
    pub revenue_day: f64,
    pub revenue_week: f64,
    pub revenue_month: f64,
    pub purchases_count: f64,
    /// One decimal place
    pub conversion: f64,
    pub attracted_users: f64,
}

pub fn average_creator(creators: &[CreatorStats]) -> AverageCreator {
    let others: Vec<&CreatorStats> = creators.iter().filter(|c| !c.is_current()).collect();
    if others.is_empty() {
        return AverageCreator::default();
    }

    let n = others.len() as f64;
    let mean = |f: fn(&CreatorStats) -> f64| others.iter().map(|c| f(c)).sum::<f64>() / n;

    AverageCreator {
        revenue_day: mean(|c| c.revenue_day).round(),
        revenue_week: mean(|c| c.revenue_week).round(),
        revenue_month: mean(|c| c.revenue_month).round(),
        purchases_count: mean(|c| c.purchases_count as f64).round(),
        conversion: (mean(|c| c.conversion) * 10.0).round() / 10.0,
        attracted_users: mean(|c| c.attracted_users as f64).round(),
    }
}

/// Percent difference of `yours` against `average`, `None` when the average is zero
pub fn delta_percent(yours: f64, average: f64) -> Option<f64> {
    if average == 0.0 {
        None
    } else {
        Some((yours - average) / average * 100.0)
    }
}

/// Totals over a set of purchases. Revenue counts completed purchases only.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseSummary {
    pub total_purchases: u32,
    pub completed_purchases: u32,
    pub revenue: f64,
    pub average_check: f64,
    /// Keyed by purchase type wire name
    #[serde(default)]
    pub revenue_by_type: BTreeMap<String, f64>,
}

pub fn summarize_purchases(purchases: &[Purchase]) -> PurchaseSummary {
    let mut summary = PurchaseSummary {
        total_purchases: purchases.len() as u32,
        ..Default::default()
    };

    for purchase in purchases.iter().filter(|p| p.is_completed()) {
        summary.completed_purchases += 1;
        summary.revenue += purchase.amount;
        *summary
            .revenue_by_type
            .entry(purchase.purchase_type.as_str().to_string())
            .or_insert(0.0) += purchase.amount;
    }

    summary.revenue = (summary.revenue * 100.0).round() / 100.0;
    if summary.completed_purchases > 0 {
        summary.average_check = summary.revenue / summary.completed_purchases as f64;
    }
    summary
}

/// `part` as a whole percentage of `total`, zero when the total is zero
pub fn share_percent(part: f64, total: f64) -> u32 {
    if total <= 0.0 {
        0
    } else {
        (part / total * 100.0).round() as u32
    }
}

/// Sets each purchase's share of the combined amount of the list
pub fn assign_share_percent(purchases: &mut [TopPurchase]) {
    let total: f64 = purchases.iter().map(|p| p.amount).sum();
    for purchase in purchases.iter_mut() {
        purchase.share_percent = share_percent(purchase.amount, total);
    }
}

/// The first `n` items by descending `key`; ties keep input order
fn top_by<T>(items: &[T], n: usize, key: impl Fn(&T) -> f64) -> Vec<&T> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by(|a, b| key(b).total_cmp(&key(a)));
    sorted.truncate(n);
    sorted
}

/// Top-level domains with the most revenue
pub fn top_domains_by_revenue(domains: &[DomainStats], n: usize) -> Vec<&DomainStats> {
    top_by(domains, n, |d| d.revenue)
}

/// Top-level domains that attracted the most players
pub fn top_domains_by_users(domains: &[DomainStats], n: usize) -> Vec<&DomainStats> {
    top_by(domains, n, |d| d.attracted_users as f64)
}

pub fn top_users_by_spent(users: &[TopUser], n: usize) -> Vec<&TopUser> {
    top_by(users, n, |u| u.total_spent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockDataset;
    use chrono::{TimeZone, Utc};

    fn dataset() -> MockDataset {
        MockDataset::generate(Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_your_rank_on_mock_data() {
        let rank = your_rank(&dataset().creators).unwrap();
        // 920 weekly revenue ties Fokus1, which is listed after the current creator
        assert_eq!(rank.rank, 3);
        assert_eq!(rank.total, 13);
        assert_eq!(rank.percent_better, 85);
    }

    #[test]
    fn test_your_rank_without_current_creator() {
        let others: Vec<_> = dataset()
            .creators
            .into_iter()
            .filter(|c| !c.is_current())
            .collect();
        assert!(your_rank(&others).is_none());
    }

    #[test]
    fn test_average_creator_excludes_current() {
        let average = average_creator(&dataset().creators);
        assert_eq!(average.revenue_week, 589.0);
        assert_eq!(average.purchases_count, 90.0);
        assert_eq!(average.conversion, 12.6);
        assert_eq!(average_creator(&[]), AverageCreator::default());
    }

    #[test]
    fn test_delta_percent() {
        assert_eq!(delta_percent(150.0, 100.0), Some(50.0));
        assert_eq!(delta_percent(10.0, 0.0), None);
    }

    #[test]
    fn test_summarize_counts_completed_revenue() {
        let purchases = dataset().purchases;
        let summary = summarize_purchases(&purchases);
        assert_eq!(summary.total_purchases, 48);
        assert_eq!(summary.completed_purchases, 24);
        let by_type: f64 = summary.revenue_by_type.values().sum();
        assert!((by_type - summary.revenue).abs() < 0.01);
    }

    fn domain(name: &str, revenue: f64, attracted_users: u32) -> DomainStats {
        DomainStats {
            domain: name.to_string(),
            revenue,
            attracted_users,
            conversion: 10.0,
            subdomains: None,
        }
    }

    #[test]
    fn test_top_domains_by_revenue_and_users() {
        let domains = vec![
            domain("a.funtime.su", 100.0, 3000),
            domain("b.funtime.su", 300.0, 1000),
            domain("c.funtime.su", 200.0, 2000),
            domain("d.funtime.su", 300.0, 500),
        ];

        let by_revenue: Vec<_> = top_domains_by_revenue(&domains, 3)
            .into_iter()
            .map(|d| d.domain.as_str())
            .collect();
        assert_eq!(by_revenue, vec!["b.funtime.su", "d.funtime.su", "c.funtime.su"]);

        let by_users: Vec<_> = top_domains_by_users(&domains, 2)
            .into_iter()
            .map(|d| d.domain.as_str())
            .collect();
        assert_eq!(by_users, vec!["a.funtime.su", "c.funtime.su"]);
        assert!(top_domains_by_users(&[], 5).is_empty());
    }

    #[test]
    fn test_top_lists_on_mock_data() {
        let dataset = dataset();
        let by_revenue = top_domains_by_revenue(&dataset.domains, TOP_LIST_LEN);
        assert_eq!(by_revenue.len(), TOP_LIST_LEN);
        assert_eq!(by_revenue[0].domain, "fonix.funtime.su");
        assert_eq!(by_revenue[4].domain, "nsai.funtime.su");

        let users = top_users_by_spent(&dataset.top_users, TOP_LIST_LEN);
        assert_eq!(users[0].username, "alex.smith2");
        assert!(users.windows(2).all(|w| w[0].total_spent >= w[1].total_spent));
    }

    #[test]
    fn test_top_users_sorted_by_spend() {
        let user = |name: &str, total_spent: f64| TopUser {
            username: name.to_string(),
            total_spent,
            purchase_count: 1,
            sparkline: vec![],
        };
        let users = vec![user("low", 5.0), user("high", 40.0), user("mid", 20.0)];
        let top: Vec<_> = top_users_by_spent(&users, 5)
            .into_iter()
            .map(|u| u.username.as_str())
            .collect();
        assert_eq!(top, vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_share_percent_of_top_purchases() {
        let shares: Vec<_> = dataset()
            .top_purchases
            .iter()
            .map(|p| p.share_percent)
            .collect();
        assert_eq!(shares, vec![37, 23, 18, 13, 9]);
        assert_eq!(share_percent(5.0, 0.0), 0);
        assert_eq!(share_percent(1.0, 4.0), 25);
    }
}
