//! Card data consumed by the site's index page (`boxes-data.js`).

use std::fmt::Write as _;

use anyhow::Result;
use serde::Serialize;

use crate::meta::AttributeRecord;
use crate::utils::date::DateTimeUtc;

/// One writeup as shown on the index page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub name: String,
    pub diff: String,
    pub os: String,
    pub platform: String,
    pub category: String,
    pub status: &'static str,
    pub private: bool,
    pub summary: String,
    pub url: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blurb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_img: Option<String>,
}

impl From<&AttributeRecord> for Card {
    fn from(record: &AttributeRecord) -> Self {
        Self {
            name: record.name.clone(),
            diff: record.difficulty.to_string(),
            os: record.os.as_ref().map(ToString::to_string).unwrap_or_default(),
            platform: record.platform.clone(),
            category: record.category.clone(),
            status: if record.pwned { "✅" } else { "⏳" },
            private: record.private,
            summary: record.summary.clone(),
            url: record.url.clone(),
            date: record.date.clone(),
            tier: None,
            blurb: None,
            proof_img: None,
        }
    }
}

/// Cards of one category, in scan order.
#[derive(Debug, Clone, Default)]
pub struct CategoryCards {
    pub category: String,
    pub cards: Vec<Card>,
}

/// `BOXES_<CATEGORY>`, with anything that cannot appear in a JS identifier
/// replaced by `_`.
pub fn js_const_name(category: &str) -> String {
    let ident: String = category
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect();
    format!("BOXES_{ident}")
}

/// Render the whole data file.
pub fn render_cards_js(groups: &[CategoryCards], built: &DateTimeUtc) -> Result<String> {
    let total: usize = groups.iter().map(|group| group.cards.len()).sum();

    let mut js = String::new();
    js.push_str("// AUTO-GENERATED by boxdex — do not edit manually\n");
    let _ = writeln!(js, "// Last built: {} UTC", built.to_timestamp());
    let _ = writeln!(js, "// Total writeups: {total}\n");

    for group in groups {
        let json = serde_json::to_string_pretty(&group.cards)?;
        let _ = writeln!(js, "const {} = {json};\n", js_const_name(&group.category));
    }
    Ok(js)
}
