use once_cell::sync::Lazy;
use regex::Regex;

static MILES: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)([0-9]+(?:\.[0-9]+)?)\s*mi").unwrap());

static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?").unwrap());

/// Distance as read from a sale card's distance label
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceLabel {
    pub miles: Option<f64>,
    /// "Nearby", "5.2 mi" or empty
    pub label: String,
}

impl DistanceLabel {
    fn unknown() -> Self {
        Self {
            miles: None,
            label: String::new(),
        }
    }
}

/// Read "Nearby", "Less than 1 mile away" or "5.2 mi away" style labels.
///
/// Nearby and "less than" labels count as zero miles. The display label keeps
/// the digits exactly as the page wrote them.
pub fn parse_distance_label(text: &str) -> DistanceLabel {
    let lower = text.to_lowercase();
    if lower.contains("nearby") || lower.contains("less than") {
        return DistanceLabel {
            miles: Some(0.0),
            label: "Nearby".to_string(),
        };
    }

    let Some(caps) = MILES.captures(text) else {
        return DistanceLabel::unknown();
    };

    match caps[1].parse() {
        Ok(miles) => DistanceLabel {
            miles: Some(miles),
            label: format!("{} mi", &caps[1]),
        },
        Err(_) => DistanceLabel::unknown(),
    }
}

/// First number in text like "5.2 mi" or "12 miles"
pub fn parse_distance(text: &str) -> Option<f64> {
    NUMBER.find(text)?.as_str().parse().ok()
}

/// Unknown distances are kept so a sale is never dropped for a missing label
pub fn is_within(distance: Option<f64>, max_miles: f64) -> bool {
    match distance {
        Some(d) => d <= max_miles,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearby_labels_are_zero_miles() {
        for text in ["Nearby", "NEARBY", "Less than 1 mile away"] {
            let parsed = parse_distance_label(text);
            assert_eq!(parsed.miles, Some(0.0));
            assert_eq!(parsed.label, "Nearby");
        }
    }

    #[test]
    fn mile_labels_keep_page_digits() {
        let parsed = parse_distance_label("5.20 mi away");
        assert_eq!(parsed.miles, Some(5.2));
        assert_eq!(parsed.label, "5.20 mi");

        let parsed = parse_distance_label("12 Miles away");
        assert_eq!(parsed.miles, Some(12.0));
        assert_eq!(parsed.label, "12 mi");
    }

    #[test]
    fn unreadable_label_is_unknown() {
        assert_eq!(parse_distance_label(""), DistanceLabel::unknown());
        assert_eq!(parse_distance_label("Far away"), DistanceLabel::unknown());
        assert_eq!(parse_distance_label("3 km"), DistanceLabel::unknown());
    }

    #[test]
    fn parse_distance_takes_first_number() {
        assert_eq!(parse_distance("5.2 mi"), Some(5.2));
        assert_eq!(parse_distance("about 12 miles, 3 stops"), Some(12.0));
        assert_eq!(parse_distance("far"), None);
    }

    #[test]
    fn within_treats_unknown_as_close() {
        assert!(is_within(None, 15.0));
        assert!(is_within(Some(15.0), 15.0));
        assert!(!is_within(Some(15.1), 15.0));
    }
}
