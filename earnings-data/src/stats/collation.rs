use icu_collator::{Collator, CollatorOptions};
use icu_locid::locale;
use std::cmp::Ordering;
use tracing::warn;

/// String comparison following the ru-RU collation used for display:
/// Cyrillic sorts before Latin and case differences are secondary.
pub struct NameCollator {
    collator: Option<Collator>,
}

impl NameCollator {
    pub fn russian() -> Self {
        let collator = match Collator::try_new(&locale!("ru").into(), CollatorOptions::new()) {
            Ok(collator) => Some(collator),
            Err(e) => {
                warn!(error = ?e, "ru collation data unavailable, comparing case-folded strings");
                None
            }
        };
        Self { collator }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        }
    }
}

impl Default for NameCollator {
    fn default() -> Self {
        Self::russian()
    }
}
