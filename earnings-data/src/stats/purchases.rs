use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::models::{Purchase, PurchaseType};
use crate::stats::{is_in_range, parse_timestamp, DateRange, NameCollator, SortDirection};

/// Purchases table column to sort by
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum PurchaseSortKey {
    Id,
    Username,
    Nickname,
    Domain,
    Type,
    Amount,
    #[default]
    Date,
    Status,
}

/// Filters applied to the purchases table
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseQuery {
    pub range: DateRange,
    /// Exact domain match, `None` for every domain
    pub domain: Option<String>,
    /// `None` for every purchase type
    pub purchase_type: Option<PurchaseType>,
    /// Case-insensitive substring of username or nickname
    pub search: String,
}

impl PurchaseQuery {
    pub fn new(range: DateRange) -> Self {
        Self {
            range,
            domain: None,
            purchase_type: None,
            search: String::new(),
        }
    }
}

/// True when `search` is blank or found in the username or nickname
pub fn matches_search(purchase: &Purchase, search: &str) -> bool {
    let needle = search.trim().to_lowercase();
    needle.is_empty()
        || purchase.username.to_lowercase().contains(&needle)
        || purchase.nickname.to_lowercase().contains(&needle)
}

pub fn filter_purchases(purchases: &[Purchase], query: &PurchaseQuery) -> Vec<Purchase> {
    purchases
        .iter()
        .filter(|p| is_in_range(&p.date, &query.range))
        .filter(|p| query.domain.as_deref().is_none_or(|d| d.is_empty() || p.domain == d))
        .filter(|p| query.purchase_type.is_none_or(|t| p.purchase_type == t))
        .filter(|p| matches_search(p, &query.search))
        .cloned()
        .collect()
}

fn compare_purchases(
    a: &Purchase,
    b: &Purchase,
    key: PurchaseSortKey,
    collator: &NameCollator,
) -> Ordering {
    match key {
        PurchaseSortKey::Id => collator.compare(&a.id, &b.id),
        PurchaseSortKey::Username => collator.compare(&a.username, &b.username),
        PurchaseSortKey::Nickname => collator.compare(&a.nickname, &b.nickname),
        PurchaseSortKey::Domain => collator.compare(&a.domain, &b.domain),
        PurchaseSortKey::Type => a.purchase_type.as_str().cmp(b.purchase_type.as_str()),
        PurchaseSortKey::Amount => a.amount.total_cmp(&b.amount),
        // Unparseable dates sort before every valid one
        PurchaseSortKey::Date => parse_timestamp(&a.date).cmp(&parse_timestamp(&b.date)),
        PurchaseSortKey::Status => a.status.as_str().cmp(b.status.as_str()),
    }
}

pub fn sort_purchases(purchases: &mut [Purchase], key: PurchaseSortKey, direction: SortDirection) {
    let collator = NameCollator::russian();
    purchases.sort_by(|a, b| direction.apply(compare_purchases(a, b, key, &collator)));
}

/// One page of a paginated listing. `page` is zero-based.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items: Vec<T>,
}

/// Slices `items` into pages of `page_size`. There is always at least one
/// page; a page past the end is empty.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_pages = items.len().div_ceil(page_size).max(1);
    let start = page.saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());

    Page {
        page,
        total_pages,
        total_items: items.len(),
        items: items[start..end].to_vec(),
    }
}
