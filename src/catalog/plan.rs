use serde::{Deserialize, Serialize};
use std::fmt;

use crate::carriers;

/// Billing model of a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    Postpaid,
    Prepaid,
}

impl PlanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Postpaid => "postpaid",
            PlanType::Prepaid => "prepaid",
        }
    }
}

impl std::str::FromStr for PlanType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            // Rows without a type predate the prepaid scrapers
            "" | "postpaid" => Ok(PlanType::Postpaid),
            "prepaid" => Ok(PlanType::Prepaid),
            other => Err(format!("unknown plan type '{}'", other)),
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One carrier offering as served to clients.
///
/// Built once by the loader and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    pub id: String,
    pub carrier: String,
    pub plan_name: String,
    pub price: f64,
    /// Display form of the data allowance ("10", "512MB")
    pub data: String,
    /// Data allowance in GB, used for comparisons
    pub data_gb: f64,
    pub plan_type: PlanType,
    pub features: Vec<String>,
    pub network_speed: &'static str,
    pub terms: &'static str,
    pub logo: String,
}

impl Plan {
    pub fn new(
        id: String,
        carrier: String,
        plan_name: String,
        price: f64,
        data_gb: Option<f64>,
        plan_type: PlanType,
        features: Vec<String>,
    ) -> Self {
        let data = match data_gb {
            Some(gb) => format_data(gb),
            None => "0".to_string(),
        };
        let network_speed = carriers::network_speed(&carrier);
        let logo = format!("carrierlogos/{}", carriers::logo_file(&carrier));

        Self {
            id,
            carrier,
            plan_name,
            price,
            data,
            data_gb: data_gb.unwrap_or(0.0),
            plan_type,
            features,
            network_speed,
            terms: carriers::DEFAULT_TERMS,
            logo,
        }
    }

    pub fn is_postpaid(&self) -> bool {
        self.plan_type == PlanType::Postpaid
    }

    /// Case-insensitive substring match over the name and features
    pub fn mentions(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.plan_name.to_lowercase().contains(&needle)
            || self
                .features
                .iter()
                .any(|f| f.to_lowercase().contains(&needle))
    }
}

/// Render a GB amount for display. Sub-gigabyte plans are shown in MB.
pub fn format_data(gb: f64) -> String {
    if gb < 1.0 {
        format!("{:.0}MB", gb * 1024.0)
    } else {
        format!("{:.0}", gb)
    }
}

/// Parse a data amount string back to GB.
///
/// Accepts plain numbers, an `MB` suffix (divided by 1024) or a `GB` suffix.
/// Anything unparseable counts as 0 GB.
pub fn parse_data_amount(s: &str) -> f64 {
    let upper = s.trim().to_uppercase();
    let (number, divisor) = if let Some(n) = upper.strip_suffix("MB") {
        (n, 1024.0)
    } else if let Some(n) = upper.strip_suffix("GB") {
        (n, 1.0)
    } else {
        (upper.as_str(), 1.0)
    };

    match number.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v / divisor,
        _ => 0.0,
    }
}

/// Split a raw `plan_features` cell into individual feature strings.
///
/// Scraped cells are either bullet lists (one per line) or comma/semicolon
/// separated.
pub fn parse_features(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") || trimmed.eq_ignore_ascii_case("nan")
    {
        return Vec::new();
    }

    trimmed
        .split(|c: char| c == '\n' || c == ',' || c == ';')
        .map(|f| f.trim().trim_start_matches('•').trim())
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_type_parsing() {
        assert_eq!("POSTPAID".parse::<PlanType>().unwrap(), PlanType::Postpaid);
        assert_eq!(" prepaid ".parse::<PlanType>().unwrap(), PlanType::Prepaid);
        assert_eq!("".parse::<PlanType>().unwrap(), PlanType::Postpaid);
        assert!("monthly".parse::<PlanType>().is_err());
    }

    #[test]
    fn test_format_data() {
        assert_eq!(format_data(0.5), "512MB");
        assert_eq!(format_data(10.0), "10");
        assert_eq!(format_data(75.0), "75");
    }

    #[test]
    fn test_parse_data_amount() {
        assert_eq!(parse_data_amount("512MB"), 0.5);
        assert_eq!(parse_data_amount("10"), 10.0);
        assert_eq!(parse_data_amount("20 GB"), 20.0);
        assert_eq!(parse_data_amount("unlimited"), 0.0);
        assert_eq!(parse_data_amount(""), 0.0);
    }

    #[test]
    fn test_parse_features_bullets_and_separators() {
        let features = parse_features("• Canada-wide calling\n• Unlimited texting");
        assert_eq!(features, vec!["Canada-wide calling", "Unlimited texting"]);

        let features = parse_features("5G speeds, US roaming; Data rollover");
        assert_eq!(features, vec!["5G speeds", "US roaming", "Data rollover"]);

        assert!(parse_features("None").is_empty());
        assert!(parse_features("  ").is_empty());
    }

    #[test]
    fn test_plan_new_derives_display_fields() {
        let plan = Plan::new(
            "".to_string(),
            "Public Mobile".to_string(),
            "Basic".to_string(),
            15.0,
            Some(0.25),
            PlanType::Prepaid,
            vec![],
        );
        assert_eq!(plan.data, "256MB");
        assert_eq!(plan.network_speed, "4G LTE");
        assert_eq!(plan.logo, "carrierlogos/public-mobile-logo.png");
        assert!(!plan.is_postpaid());
    }

    #[test]
    fn test_plan_without_data() {
        let plan = Plan::new(
            "".to_string(),
            "Bell".to_string(),
            "Talk & Text".to_string(),
            25.0,
            None,
            PlanType::Postpaid,
            vec![],
        );
        assert_eq!(plan.data, "0");
        assert_eq!(plan.data_gb, 0.0);
    }

    #[test]
    fn test_plan_mentions() {
        let plan = Plan::new(
            "".to_string(),
            "Koodo".to_string(),
            "Family Share".to_string(),
            70.0,
            Some(50.0),
            PlanType::Postpaid,
            vec!["Unlimited Canada-wide minutes".to_string()],
        );
        assert!(plan.mentions("family"));
        assert!(plan.mentions("UNLIMITED"));
        assert!(!plan.mentions("mexico"));
    }
}
