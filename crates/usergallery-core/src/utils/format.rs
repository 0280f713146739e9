use chrono::{DateTime, Utc};

use crate::models::Location;

/// Format a phone number for display.
/// Normalizes ten digits (or eleven with a leading `1`) to (XXX) XXX-XXXX;
/// anything else is returned unchanged since it cannot be formatted that way.
pub fn format_phone(phone: &str) -> String {
    // Extract just the digits
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    match digits.len() {
        10 => format!(
            "({}) {}-{}",
            &digits[0..3],
            &digits[3..6],
            &digits[6..10]
        ),
        11 if digits.starts_with('1') => format!(
            "({}) {}-{}",
            &digits[1..4],
            &digits[4..7],
            &digits[7..11]
        ),
        _ => phone.to_string(), // Return original if can't format
    }
}

/// Format a location as "number street, city, state, postcode"
pub fn format_address(location: &Location) -> String {
    format!(
        "{} {}, {}, {}, {}",
        location.street.number,
        location.street.name,
        location.city,
        location.state,
        location.postcode
    )
}

/// Format an ISO `YYYY-MM-DDTHH:MM:SS` date as MM/DD/YYYY.
/// Only slices the string; there is no calendar validation.
pub fn format_birthday(iso_date: &str) -> String {
    let parts = (
        iso_date.get(0..4),
        iso_date.get(5..7),
        iso_date.get(8..10),
    );
    match parts {
        (Some(year), Some(month), Some(day)) => format!("{}/{}/{}", month, day, year),
        _ => iso_date.to_string(),
    }
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Describe how long ago `since` was, e.g. "just now", "5m ago", "2h ago"
pub fn format_elapsed(since: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - since).num_minutes();
    if minutes < 1 {
        // Also covers clock skew
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 1440 {
        let hours = minutes / 60;
        if minutes % 60 >= 30 {
            format!("{}h ago", hours + 1)
        } else {
            format!("{}h ago", hours)
        }
    } else {
        let days = minutes / 1440;
        if (minutes % 1440) / 60 >= 12 {
            format!("{}d ago", days + 1)
        } else {
            format!("{}d ago", days)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use crate::models::Street;

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone("123-456-7890"), "(123) 456-7890");
        assert_eq!(format_phone("5551234567"), "(555) 123-4567");
        assert_eq!(format_phone("15551234567"), "(555) 123-4567");
        assert_eq!(format_phone("(555) 123-4567"), "(555) 123-4567");
        assert_eq!(format_phone("(07) 1234 5678"), "(071) 234-5678");
    }

    #[test]
    fn test_format_phone_unformattable() {
        assert_eq!(format_phone("123"), "123"); // Too short, return as-is
        assert_eq!(format_phone("0176-34567890"), "0176-34567890");
        assert_eq!(format_phone(""), "");
    }

    #[test]
    fn test_format_address() {
        let location = Location {
            street: Street {
                number: "42".to_string(),
                name: "Main St".to_string(),
            },
            city: "Portland".to_string(),
            state: "OR".to_string(),
            postcode: "97204".to_string(),
        };
        assert_eq!(format_address(&location), "42 Main St, Portland, OR, 97204");
    }

    #[test]
    fn test_format_birthday() {
        assert_eq!(format_birthday("1990-05-21T10:00:00Z"), "05/21/1990");
        assert_eq!(format_birthday("1975-12-01T03:14:15.926Z"), "12/01/1975");
        // Only slices, so an impossible date passes through
        assert_eq!(format_birthday("2001-13-45"), "13/45/2001");
    }

    #[test]
    fn test_format_birthday_short_input() {
        assert_eq!(format_birthday("1990-05"), "1990-05");
        assert_eq!(format_birthday(""), "");
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
    }

    #[test]
    fn test_format_elapsed() {
        let now = Utc::now();
        assert_eq!(format_elapsed(now, now), "just now");
        assert_eq!(format_elapsed(now + Duration::minutes(5), now), "just now");
        assert_eq!(format_elapsed(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(format_elapsed(now - Duration::minutes(90), now), "2h ago");
        assert_eq!(format_elapsed(now - Duration::minutes(70), now), "1h ago");
        assert_eq!(format_elapsed(now - Duration::days(3), now), "3d ago");
    }
}
