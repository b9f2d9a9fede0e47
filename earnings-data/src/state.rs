//! Dashboard view state.
//!
//! Plain values owned by the caller and changed through setters; the view
//! layer receives them by reference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::PurchaseType;
use crate::stats::{resolve_range, DatePreset, PurchaseQuery, SortDirection, SortKey};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Accepts exactly "light" or "dark"
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// Which domain drawer, if any, is open
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DrawerState {
    #[default]
    Closed,
    Domain(String),
    AllDomains,
}

impl DrawerState {
    pub fn open_domain(&mut self, domain: impl Into<String>) {
        *self = DrawerState::Domain(domain.into());
    }

    pub fn open_all_domains(&mut self) {
        *self = DrawerState::AllDomains;
    }

    pub fn close(&mut self) {
        *self = DrawerState::Closed;
    }

    pub fn is_open(&self) -> bool {
        *self != DrawerState::Closed
    }
}

/// Filters above the purchases table
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseFilters {
    pub date_range: DatePreset,
    /// `None` for every section
    pub purchase_type: Option<PurchaseType>,
    /// Empty for every domain
    pub domain: String,
    pub search: String,
    pub custom_from: Option<String>,
    pub custom_to: Option<String>,
}

impl PurchaseFilters {
    /// Search is not counted: it has its own clear control
    pub fn has_active_filters(&self) -> bool {
        let defaults = PurchaseFilters::default();
        self.date_range != defaults.date_range
            || (self.date_range == DatePreset::Custom
                && (self.custom_from.is_some() || self.custom_to.is_some()))
            || self.purchase_type != defaults.purchase_type
            || self.domain != defaults.domain
    }

    /// Restores the defaults, keeping the search text
    pub fn reset(&mut self) {
        *self = PurchaseFilters {
            search: std::mem::take(&mut self.search),
            ..Default::default()
        };
    }

    pub fn set_custom_range(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.date_range = DatePreset::Custom;
        self.custom_from = Some(from.into());
        self.custom_to = Some(to.into());
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    /// Resolves the filters into a table query relative to `now`
    pub fn to_query(&self, now: DateTime<Utc>) -> PurchaseQuery {
        let range = resolve_range(
            self.date_range,
            self.custom_from.as_deref(),
            self.custom_to.as_deref(),
            now,
        );
        PurchaseQuery {
            range,
            domain: (!self.domain.is_empty()).then(|| self.domain.clone()),
            purchase_type: self.purchase_type,
            search: self.search.clone(),
        }
    }
}

/// Search and sort controls of the creator leaderboard
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardState {
    pub search: String,
    pub sort_key: SortKey,
    pub direction: SortDirection,
}

impl LeaderboardState {
    /// Clicking the active column flips the direction; another column becomes
    /// active, ascending only for names.
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.direction = self.direction.toggled();
        } else {
            self.sort_key = key;
            self.direction = SortDirection::from_ascending(key == SortKey::Name);
        }
    }

    pub fn clear(&mut self) {
        *self = LeaderboardState::default();
    }

    pub fn has_active_filters(&self) -> bool {
        !self.search.trim().is_empty()
            || self.sort_key != SortKey::default()
            || self.direction.is_ascending()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardState {
    pub theme: Theme,
    pub drawer: DrawerState,
    pub filters: PurchaseFilters,
    pub leaderboard: LeaderboardState,
}

impl DashboardState {
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}
