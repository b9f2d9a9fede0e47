use serde::{Deserialize, Serialize};

/// Revenue and traffic for an affiliate domain
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DomainStats {
    pub domain: String,
    pub revenue: f64,
    pub attracted_users: u32,
    pub conversion: f64,
    /// Child domains. Only one level of nesting is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdomains: Option<Vec<DomainStats>>,
}

impl DomainStats {
    pub fn subdomains(&self) -> &[DomainStats] {
        self.subdomains.as_deref().unwrap_or_default()
    }
}

/// Result of a domain lookup: the top-level domain and the matched entry,
/// which is either the top-level domain itself or one of its subdomains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainMatch<'a> {
    pub main: &'a DomainStats,
    pub current: &'a DomainStats,
}

impl DomainMatch<'_> {
    pub fn is_subdomain(&self) -> bool {
        !std::ptr::eq(self.main, self.current)
    }
}

pub fn find_domain_stats<'a>(domains: &'a [DomainStats], domain: &str) -> Option<DomainMatch<'a>> {
    for main in domains {
        if main.domain == domain {
            return Some(DomainMatch {
                main,
                current: main,
            });
        }
        if let Some(sub) = main.subdomains().iter().find(|s| s.domain == domain) {
            return Some(DomainMatch { main, current: sub });
        }
    }
    None
}

/// Every domain followed by its subdomains, in listing order
pub fn flatten_domains(domains: &[DomainStats]) -> Vec<&DomainStats> {
    domains
        .iter()
        .flat_map(|d| std::iter::once(d).chain(d.subdomains().iter()))
        .collect()
}

/// Domain names offered in the purchases domain filter
pub fn domain_filter_options(domains: &[DomainStats]) -> Vec<String> {
    flatten_domains(domains)
        .into_iter()
        .map(|d| d.domain.clone())
        .collect()
}

/// Scale maxima for revenue and attracted users bars, never below 1
pub fn domain_maxima(domains: &[DomainStats]) -> (f64, u32) {
    flatten_domains(domains)
        .into_iter()
        .fold((1.0_f64, 1_u32), |(revenue, users), d| {
            (revenue.max(d.revenue), users.max(d.attracted_users))
        })
}
