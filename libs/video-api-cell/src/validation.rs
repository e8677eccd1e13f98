// libs/video-api-cell/src/validation.rs
//! Field checks shared by every builder and by the client facade.

use std::fmt::Display;
use std::sync::OnceLock;

use regex::Regex;
use uuid::Uuid;

use crate::error::VideoApiError;

/// Unwraps a mandatory value, treating blank strings as missing.
pub fn require_text(value: Option<String>, field: &'static str) -> Result<String, VideoApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(VideoApiError::missing(field)),
    }
}

pub fn require<T>(value: Option<T>, field: &'static str) -> Result<T, VideoApiError> {
    value.ok_or(VideoApiError::missing(field))
}

pub fn require_non_empty(value: &str, field: &'static str) -> Result<(), VideoApiError> {
    if value.trim().is_empty() {
        return Err(VideoApiError::missing(field));
    }
    Ok(())
}

/// Closed-range check; unset values pass.
pub fn check_range<T>(value: Option<T>, min: T, max: T, field: &'static str) -> Result<(), VideoApiError>
where
    T: PartialOrd + Display + Copy,
{
    match value {
        Some(v) if v < min || v > max => Err(VideoApiError::invalid(
            field,
            format!("{} must be between {} and {}", v, min, max),
        )),
        _ => Ok(()),
    }
}

/// Character-length check; unset values pass.
pub fn check_length(
    value: Option<&str>,
    min: usize,
    max: usize,
    field: &'static str,
) -> Result<(), VideoApiError> {
    if let Some(v) = value {
        let len = v.chars().count();
        if len < min || len > max {
            return Err(VideoApiError::invalid(
                field,
                format!("length {} must be between {} and {} characters", len, min, max),
            ));
        }
    }
    Ok(())
}

pub fn validate_session_id(session_id: &str) -> Result<(), VideoApiError> {
    require_non_empty(session_id, "sessionId")
}

pub fn validate_uuid(id: &str, field: &'static str) -> Result<(), VideoApiError> {
    require_non_empty(id, field)?;
    Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|e| VideoApiError::invalid(field, format!("'{}' is not a valid UUID: {}", id, e)))
}

fn dtmf_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9*#p]+$").expect("static DTMF pattern"))
}

/// Digits 0-9, `*`, `#` and `p` (500ms pause).
pub fn validate_dtmf_digits(digits: &str) -> Result<(), VideoApiError> {
    require_non_empty(digits, "digits")?;
    if !dtmf_pattern().is_match(digits) {
        return Err(VideoApiError::invalid(
            "digits",
            format!("'{}' may only contain 0-9, *, # and p", digits),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_require_text() {
        assert_eq!(require_text(Some("abc".into()), "name").unwrap(), "abc");
        assert_matches!(
            require_text(Some("  ".into()), "name"),
            Err(VideoApiError::MissingField { field: "name" })
        );
        assert_matches!(require_text(None, "name"), Err(VideoApiError::MissingField { .. }));
    }

    #[test]
    fn test_check_range_bounds_inclusive() {
        assert!(check_range(Some(15), 15, 40, "qp").is_ok());
        assert!(check_range(Some(40), 15, 40, "qp").is_ok());
        assert!(check_range(None::<u32>, 15, 40, "qp").is_ok());
        assert_matches!(
            check_range(Some(41), 15, 40, "qp"),
            Err(VideoApiError::InvalidArgument { field: "qp", .. })
        );
        assert!(check_range(Some(14), 15, 40, "qp").is_err());
    }

    #[test]
    fn test_check_length_counts_chars() {
        assert!(check_length(Some("ééé"), 1, 3, "name").is_ok());
        assert!(check_length(Some("éééé"), 1, 3, "name").is_err());
        assert!(check_length(None, 1, 3, "name").is_ok());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("b40ef09b-3811-4726-b508-e41a0f96c68f", "archiveId").is_ok());
        assert_matches!(validate_uuid("", "archiveId"), Err(VideoApiError::MissingField { .. }));
        assert_matches!(
            validate_uuid("not-a-uuid", "archiveId"),
            Err(VideoApiError::InvalidArgument { field: "archiveId", .. })
        );
    }

    #[test]
    fn test_dtmf_digits() {
        assert!(validate_dtmf_digits("1p2#*").is_ok());
        assert!(validate_dtmf_digits("12a").is_err());
        assert!(validate_dtmf_digits("").is_err());
    }
}
