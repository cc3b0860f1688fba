//! Merge per-lab presentation data into cards.

use std::path::Path;

use super::card::Card;
use crate::dataset::{EnrichmentTable, LabInfo, load_enrichment};
use crate::log;

const DEFAULT_TIER: &str = "Pro Lab";

/// Load the enrichment file and apply it to `cards`.
///
/// A missing or unparsable file leaves the cards untouched.
pub fn enrich_from_file(cards: &mut [Card], path: &Path) {
    if !path.is_file() {
        log!("warn"; "{} not found, tier/blurb will be empty", path.display());
        return;
    }
    match load_enrichment(path) {
        Ok(table) => {
            enrich_cards(cards, &table);
            log!("yaml"; "enriched {} cards from {}", cards.len(), path.display());
        }
        Err(err) => log!("warn"; "failed to enrich from {}: {}", path.display(), err),
    }
}

/// Apply `table` to every card. Cards without a matching lab are reported
/// and left alone.
pub fn enrich_cards(cards: &mut [Card], table: &EnrichmentTable) {
    for card in cards {
        match table.get(&card.name) {
            Some(lab) => apply(card, lab),
            None => log!("warn"; "no enrichment entry for: {}", card.name),
        }
    }
}

fn apply(card: &mut Card, lab: &LabInfo) {
    let blurb = lab.blurb.clone().unwrap_or_else(|| card.summary.clone());
    if card.summary.is_empty() {
        card.summary = blurb.clone();
    }
    card.tier = Some(lab.tier.clone().unwrap_or_else(|| DEFAULT_TIER.to_string()));
    card.proof_img = Some(lab.proof_img.clone().unwrap_or_default());
    card.blurb = Some(blurb);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str, summary: &str) -> Card {
        Card {
            name: name.into(),
            diff: "Unknown".into(),
            os: String::new(),
            platform: "HackTheBox".into(),
            category: "prolabs".into(),
            status: "✅",
            private: false,
            summary: summary.into(),
            url: String::new(),
            date: String::new(),
            tier: None,
            blurb: None,
            proof_img: None,
        }
    }

    fn lab(name: &str, tier: Option<&str>, blurb: Option<&str>) -> LabInfo {
        LabInfo {
            name: name.into(),
            tier: tier.map(String::from),
            blurb: blurb.map(String::from),
            proof_img: None,
        }
    }

    #[test]
    fn test_summary_filled_from_blurb() {
        let table = EnrichmentTable::from_entries([lab("Dante", Some("Intermediate"), Some("Pivoting lab."))]);
        let mut cards = [card("dante", "")];
        enrich_cards(&mut cards, &table);
        assert_eq!(cards[0].tier.as_deref(), Some("Intermediate"));
        assert_eq!(cards[0].summary, "Pivoting lab.");
        assert_eq!(cards[0].proof_img.as_deref(), Some(""));
    }

    #[test]
    fn test_defaults() {
        let table = EnrichmentTable::from_entries([lab("Offshore", None, None)]);
        let mut cards = [card("Offshore", "From README.")];
        enrich_cards(&mut cards, &table);
        assert_eq!(cards[0].tier.as_deref(), Some(DEFAULT_TIER));
        assert_eq!(cards[0].blurb.as_deref(), Some("From README."));
        assert_eq!(cards[0].summary, "From README.");
    }

    #[test]
    fn test_unmatched_untouched() {
        let mut cards = [card("Zephyr", "")];
        enrich_cards(&mut cards, &EnrichmentTable::default());
        assert!(cards[0].tier.is_none());
    }

    #[test]
    fn test_missing_file_untouched() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut cards = [card("Dante", "")];
        enrich_from_file(&mut cards, &dir.path().join("prolabs.yml"));
        assert!(cards[0].blurb.is_none());
    }
}
