//! Pull plan details out of a free-text chat message
//!
//! Plain regex matching, first match wins. Nothing checks that the numbers
//! found are plausible, and a message mentioning several prices or carriers
//! only yields the first of each.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::catalog::Catalog;
use crate::recommend::{Hint, RecommendationQuery};

static PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:price|cost)\s*[:\-]?\s*\$?(\d+(?:\.\d+)?)").unwrap()
});

static DATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)data\s*[:\-]?\s*(\d+(?:\.\d+)?)").unwrap()
});

static GB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*GB\b").unwrap()
});

const HINT_WORDS: &[(&str, Hint)] = &[
    ("unlimited", Hint::Unlimited),
    ("stream", Hint::Unlimited),
    ("cheap", Hint::Budget),
    ("budget", Hint::Budget),
    ("family", Hint::Family),
    ("multiple lines", Hint::Family),
];

/// Plan details found in a message. Field names match the chat API payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanDetails {
    #[serde(rename = "plan_price", default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    #[serde(
        rename = "plan_data",
        default,
        deserialize_with = "deserialize_data_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub data_gb: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<Hint>,
}

impl PlanDetails {
    /// True when neither price, data, carrier nor any hint was found
    pub fn is_empty(&self) -> bool {
        self.price.is_none() && self.data_gb.is_none() && self.carrier.is_none() && self.hints.is_empty()
    }

    pub fn to_query(&self) -> RecommendationQuery {
        RecommendationQuery {
            current_price: self.price,
            current_data_gb: self.data_gb,
            current_carrier: self.carrier.clone(),
            hints: self.hints.clone(),
        }
    }
}

/// `plan_data` arrives either as a number or as a string like "10GB"/"512MB"
fn deserialize_data_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) if n.is_finite() && n > 0.0 => Some(n),
        Some(Raw::Number(_)) => Some(0.0),
        Some(Raw::Text(s)) => Some(crate::catalog::plan::parse_data_amount(&s)),
        None => None,
    })
}

fn first_number(re: &Regex, message: &str) -> Option<f64> {
    re.captures(message)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Extract price, data and carrier from a chat message.
///
/// Carriers are matched against the names present in `catalog`, in catalog
/// order, by case-insensitive substring.
pub fn extract_details(message: &str, catalog: &Catalog) -> PlanDetails {
    let price = first_number(&PRICE_RE, message);
    let data_gb = first_number(&DATA_RE, message).or_else(|| first_number(&GB_RE, message));

    let lower = message.to_lowercase();
    let carrier = catalog
        .carriers()
        .into_iter()
        .find(|c| !c.is_empty() && lower.contains(&c.to_lowercase()))
        .map(|c| c.trim().to_string());

    let mut hints = Vec::new();
    for (word, hint) in HINT_WORDS {
        if lower.contains(word) && !hints.contains(hint) {
            hints.push(*hint);
        }
    }

    PlanDetails {
        price,
        data_gb,
        carrier,
        hints,
    }
}
