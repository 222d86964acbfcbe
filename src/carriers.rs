//! Carrier naming and per-carrier display metadata
//!
//! Raw carrier keys come from the scraped CSV (`virgin`, `public_mobile`, ...).
//! Everything user-facing goes through [`canonical_name`] first.

/// Raw CSV key -> display name
const CARRIER_NAMES: &[(&str, &str)] = &[
    ("virgin", "Virgin"),
    ("koodo", "Koodo"),
    ("fido", "Fido"),
    ("rogers", "Rogers"),
    ("bell", "Bell"),
    ("telus", "Telus"),
    ("freedom", "Freedom"),
    ("chatr", "Chatr"),
    ("public_mobile", "Public Mobile"),
    ("freedom_prepaid", "Freedom"),
];

/// Carriers running on a 4G LTE network only
const LTE_ONLY: &[&str] = &["Chatr", "Lucky", "Public Mobile"];

const LOGO_FILES: &[(&str, &str)] = &[
    ("virgin", "Virgin_Plus_Web.png"),
    ("fido", "Fido_Solutions_logo.svg.png"),
    ("koodo", "Koodo_Mobile_-_Color.png"),
    ("freedom", "Freedom_Mobile_logo.svg.png"),
    ("bell", "images.png"),
    ("rogers", "Rogers_logo.svg.png"),
    ("telus", "Telus-Logo-1996.png"),
    ("chatr", "chatr-logo.png"),
    ("public mobile", "public-mobile-logo.png"),
    ("public_mobile", "public-mobile-logo.png"),
    ("lucky", "lucky-mobile-logo.png"),
];

/// Carriers whose own site handles bring-your-own-phone signup
const SIGNUP_URLS: &[(&str, &str)] = &[
    (
        "fido",
        "https://www.fido.ca/phones/bring-your-own-device?flowType=byod",
    ),
    (
        "rogers",
        "https://www.rogers.com/phones/bring-your-own-device?flowType=byod",
    ),
    ("koodo", "https://www.koodomobile.com/en/rate-plans"),
    ("telus", "https://www.telus.com/en/mobility/plans"),
    (
        "freedom",
        "https://shop.freedommobile.ca/en-CA/plans?isByopPlanFirstFlow=true",
    ),
    (
        "freedom_prepaid",
        "https://shop.freedommobile.ca/en-CA/prepaid-plans",
    ),
    ("chatr", "https://www.chatrwireless.com/plans"),
    ("public_mobile", "https://publicmobile.ca/en/plans"),
    ("public mobile", "https://publicmobile.ca/en/plans"),
];

pub const DEFAULT_TERMS: &str = "No term contract required. Prices may vary by region.";

/// Map a raw carrier value to its display name.
///
/// Known keys use the fixed table; anything else is title-cased.
pub fn canonical_name(raw: &str) -> String {
    let key = raw.trim().to_lowercase();
    CARRIER_NAMES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| title_case(&key))
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

pub fn network_speed(carrier: &str) -> &'static str {
    if LTE_ONLY.contains(&carrier) {
        "4G LTE"
    } else {
        "5G"
    }
}

/// Logo file name for a carrier, relative to the logo directory
pub fn logo_file(carrier: &str) -> String {
    let key = carrier.trim().to_lowercase();
    LOGO_FILES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, file)| (*file).to_string())
        .unwrap_or_else(|| format!("{}_logo.png", key))
}

pub fn signup_url(carrier: &str) -> Option<&'static str> {
    let key = carrier.trim().to_lowercase();
    SIGNUP_URLS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, url)| *url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_name_known_keys() {
        assert_eq!(canonical_name("public_mobile"), "Public Mobile");
        assert_eq!(canonical_name("  FIDO "), "Fido");
        assert_eq!(canonical_name("freedom_prepaid"), "Freedom");
    }

    #[test]
    fn test_canonical_name_title_cases_unknown() {
        assert_eq!(canonical_name("lucky mobile"), "Lucky Mobile");
        assert_eq!(canonical_name("eastlink"), "Eastlink");
        assert_eq!(canonical_name("big_carrier"), "Big_Carrier");
    }

    #[test]
    fn test_network_speed() {
        assert_eq!(network_speed("Public Mobile"), "4G LTE");
        assert_eq!(network_speed("Bell"), "5G");
    }

    #[test]
    fn test_logo_file() {
        assert_eq!(logo_file("Bell"), "images.png");
        assert_eq!(logo_file("Eastlink"), "eastlink_logo.png");
    }

    #[test]
    fn test_signup_url() {
        assert!(signup_url("Fido").unwrap().contains("fido.ca"));
        assert!(signup_url("Public Mobile").is_some());
        assert!(signup_url("Bell").is_none());
    }
}
