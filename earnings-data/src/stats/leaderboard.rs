use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::models::CreatorStats;
use crate::stats::NameCollator;

/// Leaderboard column to sort by
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Place,
    Name,
    Purchases,
    AverageCheck,
    #[default]
    RevenueWeek,
    Conversion,
    AttractedUsers,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }

    pub fn is_ascending(&self) -> bool {
        *self == SortDirection::Asc
    }

    pub fn toggled(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Orients an ascending comparison
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// A creator with its place and derived average check
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRow {
    #[serde(flatten)]
    pub stats: CreatorStats,
    /// 1-based place by weekly revenue
    pub rank: usize,
    pub average_check: f64,
}

/// Places of `creators` by descending weekly revenue, aligned with the input.
/// Equal revenue keeps input order.
pub fn revenue_ranks(creators: &[CreatorStats]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..creators.len()).collect();
    order.sort_by(|&a, &b| {
        creators[b]
            .revenue_week
            .total_cmp(&creators[a].revenue_week)
    });

    let mut ranks = vec![0; creators.len()];
    for (position, index) in order.into_iter().enumerate() {
        ranks[index] = position + 1;
    }
    ranks
}

/// Pairs every creator with its revenue rank and average check, in input order
pub fn rank_creators(creators: &[CreatorStats]) -> Vec<LeaderboardRow> {
    creators
        .iter()
        .zip(revenue_ranks(creators))
        .map(|(stats, rank)| LeaderboardRow {
            average_check: stats.average_check(),
            stats: stats.clone(),
            rank,
        })
        .collect()
}

fn compare_rows(a: &LeaderboardRow, b: &LeaderboardRow, key: SortKey, collator: &NameCollator) -> Ordering {
    match key {
        SortKey::Place => a.rank.cmp(&b.rank),
        SortKey::Name => collator.compare(&a.stats.name, &b.stats.name),
        SortKey::Purchases => a.stats.purchases_count.cmp(&b.stats.purchases_count),
        SortKey::AverageCheck => a.average_check.total_cmp(&b.average_check),
        SortKey::RevenueWeek => a.stats.revenue_week.total_cmp(&b.stats.revenue_week),
        SortKey::Conversion => a.stats.conversion.total_cmp(&b.stats.conversion),
        SortKey::AttractedUsers => a.stats.attracted_users.cmp(&b.stats.attracted_users),
    }
}

/// Sorts already ranked rows in place. The sort is stable.
pub fn sort_rows(rows: &mut [LeaderboardRow], key: SortKey, direction: SortDirection) {
    let collator = NameCollator::russian();
    rows.sort_by(|a, b| direction.apply(compare_rows(a, b, key, &collator)));
}

/// Ranks creators by weekly revenue, then orders them by `key`.
///
/// The rank never depends on `key`: sorting by [`SortKey::Place`] ascending
/// reproduces the revenue-descending order.
pub fn build_leaderboard(
    creators: &[CreatorStats],
    key: SortKey,
    direction: SortDirection,
) -> Vec<LeaderboardRow> {
    search_leaderboard(creators, "", key, direction)
}

/// Like [`build_leaderboard`], keeping only creators whose name contains
/// `query` (case-insensitive). Rows keep their place in the full list.
pub fn search_leaderboard(
    creators: &[CreatorStats],
    query: &str,
    key: SortKey,
    direction: SortDirection,
) -> Vec<LeaderboardRow> {
    let query = query.trim().to_lowercase();
    let mut rows: Vec<LeaderboardRow> = rank_creators(creators)
        .into_iter()
        .filter(|row| query.is_empty() || row.stats.name.to_lowercase().contains(&query))
        .collect();

    sort_rows(&mut rows, key, direction);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creator(id: &str, name: &str, revenue_week: f64, purchases_count: u32) -> CreatorStats {
        CreatorStats {
            id: id.to_string(),
            name: name.to_string(),
            domain: format!("{}.funtime.su", id),
            is_official: true,
            revenue_day: revenue_week / 7.0,
            revenue_week,
            revenue_month: revenue_week * 4.0,
            purchases_count,
            conversion: 10.0,
            attracted_users: 2000,
            level: 3,
            sparkline: vec![1.0; 7],
        }
    }

    #[test]
    fn test_revenue_ranks_example() {
        let creators = vec![
            creator("me", "piona", 920.0, 28),
            creator("garou", "Garou", 148.0, 28),
            creator("fonix", "FONIX", 1280.0, 186),
        ];
        assert_eq!(revenue_ranks(&creators), vec![2, 3, 1]);
    }

    #[test]
    fn test_equal_revenue_keeps_input_order() {
        let creators = vec![
            creator("a", "A", 100.0, 1),
            creator("b", "B", 100.0, 1),
            creator("c", "C", 200.0, 1),
        ];
        assert_eq!(revenue_ranks(&creators), vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_by_place_matches_revenue_order() {
        let creators = vec![
            creator("garou", "Garou", 148.0, 28),
            creator("fonix", "FONIX", 1280.0, 186),
            creator("me", "piona", 920.0, 28),
        ];
        let by_place = build_leaderboard(&creators, SortKey::Place, SortDirection::Asc);
        let by_revenue = build_leaderboard(&creators, SortKey::RevenueWeek, SortDirection::Desc);
        assert_eq!(by_place, by_revenue);
        assert_eq!(
            by_place.iter().map(|r| r.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_rank_independent_of_sort_key() {
        let creators = vec![
            creator("garou", "Garou", 148.0, 28),
            creator("aks", "Акс", 328.0, 54),
            creator("fonix", "FONIX", 1280.0, 186),
        ];
        let rows = build_leaderboard(&creators, SortKey::Name, SortDirection::Asc);
        let names: Vec<_> = rows.iter().map(|r| r.stats.name.as_str()).collect();
        assert_eq!(names, vec!["Акс", "FONIX", "Garou"]);
        let ranks: Vec<_> = rows.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![2, 1, 3]);
    }

    #[test]
    fn test_average_check_sort_handles_zero_purchases() {
        let creators = vec![
            creator("a", "A", 500.0, 0),
            creator("b", "B", 100.0, 10),
        ];
        let rows = build_leaderboard(&creators, SortKey::AverageCheck, SortDirection::Desc);
        assert_eq!(rows[0].stats.id, "b");
        assert_eq!(rows[0].average_check, 10.0);
        assert_eq!(rows[1].average_check, 0.0);
    }

    #[test]
    fn test_search_keeps_global_rank() {
        let creators = vec![
            creator("fonix", "FONIX", 1280.0, 186),
            creator("flerni", "Флерни", 218.0, 38),
            creator("garou", "Garou", 148.0, 28),
        ];
        let rows = search_leaderboard(&creators, "  gar ", SortKey::RevenueWeek, SortDirection::Desc);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].rank, 3);

        let rows = search_leaderboard(&creators, "ФЛЕР", SortKey::RevenueWeek, SortDirection::Desc);
        assert_eq!(rows[0].stats.id, "flerni");
    }

    #[test]
    fn test_empty_input() {
        assert!(build_leaderboard(&[], SortKey::Name, SortDirection::Asc).is_empty());
    }
}
