//! Summary resolution across README, fallback datasets and teaser.

use super::fallback::FallbackIndex;
use super::section::{extract_summary, extract_teaser};

/// Everything a summary source may look at.
pub struct SummaryQuery<'a> {
    pub text: &'a str,
    pub name: &'a str,
    pub private: bool,
    pub fallback: &'a FallbackIndex,
}

/// A summary source. `None` or an empty string defers to the next tier.
pub type SummaryTier = fn(&SummaryQuery<'_>) -> Option<String>;

/// Sources in priority order.
pub const TIERS: [SummaryTier; 3] = [readme_summary, dataset_summary, private_teaser];

fn readme_summary(query: &SummaryQuery<'_>) -> Option<String> {
    Some(extract_summary(query.text))
}

fn dataset_summary(query: &SummaryQuery<'_>) -> Option<String> {
    query.fallback.lookup_summary(query.name).map(String::from)
}

/// Teasers are written for private writeups only.
fn private_teaser(query: &SummaryQuery<'_>) -> Option<String> {
    query.private.then(|| extract_teaser(query.text))
}

/// First non-empty summary from [`TIERS`], or `""`.
pub fn resolve(text: &str, name: &str, private: bool, fallback: &FallbackIndex) -> String {
    let query = SummaryQuery {
        text,
        name,
        private,
        fallback,
    };
    TIERS
        .iter()
        .find_map(|tier| tier(&query).filter(|summary| !summary.is_empty()))
        .unwrap_or_default()
}
