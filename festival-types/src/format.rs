use chrono::{DateTime, FixedOffset, NaiveDateTime};

use crate::UserId;

/// Strips dashes from an 11-digit mobile number. Anything else is returned as given.
pub fn format_phone_number(phone: &str) -> String {
    let cleaned: String = phone.chars().filter(|c| *c != '-').collect();
    if cleaned.len() == 11 && cleaned.chars().all(|c| c.is_ascii_digit()) {
        cleaned
    } else {
        phone.to_string()
    }
}

/// Author ids are shown zero-padded to six digits.
pub fn format_user_id(user_id: &UserId) -> String {
    format!("{:0>6}", user_id.as_str())
}

const KST_OFFSET_SECS: i32 = 9 * 3600;

/// Renders a post timestamp as `YYYY.MM.DD HH:MM:SS`.
///
/// Timestamps with an offset are converted to Korean Standard Time, where the
/// festival runs. Naive timestamps are already local and shown as they are. Values
/// that don't parse are passed through untouched.
pub fn format_created_at(raw: &str) -> String {
    const OUTPUT: &str = "%Y.%m.%d %H:%M:%S";

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return match FixedOffset::east_opt(KST_OFFSET_SECS) {
            Some(kst) => with_offset.with_timezone(&kst).format(OUTPUT).to_string(),
            None => with_offset.format(OUTPUT).to_string(),
        };
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|pattern| NaiveDateTime::parse_from_str(raw, pattern).ok())
        .map(|naive| naive.format(OUTPUT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_numbers_lose_their_dashes() {
        assert_eq!(format_phone_number("010-1234-5678"), "01012345678");
        assert_eq!(format_phone_number("01012345678"), "01012345678");
    }

    #[test]
    fn unusual_phone_numbers_pass_through() {
        assert_eq!(format_phone_number("02-123-4567"), "02-123-4567");
        assert_eq!(format_phone_number("010-abcd-5678"), "010-abcd-5678");
    }

    #[test]
    fn user_ids_are_padded() {
        assert_eq!(format_user_id(&UserId::from(42)), "000042");
        assert_eq!(format_user_id(&UserId::from(1234567)), "1234567");
    }

    #[test]
    fn created_at_formats() {
        assert_eq!(format_created_at("2024-05-22T13:05:09"), "2024.05.22 13:05:09");
        assert_eq!(
            format_created_at("2024-05-22T13:05:09.123456"),
            "2024.05.22 13:05:09"
        );
        assert_eq!(
            format_created_at("2024-05-22T13:05:09+09:00"),
            "2024.05.22 13:05:09"
        );
        assert_eq!(format_created_at("2024-05-22 08:00:00"), "2024.05.22 08:00:00");
    }

    #[test]
    fn offset_timestamps_are_shown_in_korean_time() {
        assert_eq!(format_created_at("2024-05-22T04:05:09Z"), "2024.05.22 13:05:09");
        assert_eq!(
            format_created_at("2024-05-22T23:30:00+00:00"),
            "2024.05.23 08:30:00"
        );
    }

    #[test]
    fn unparseable_created_at_passes_through() {
        assert_eq!(format_created_at("어제"), "어제");
    }
}
