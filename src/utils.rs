// src/utils.rs
use chrono::NaiveDateTime;

/// Sentinel shown when an offer has no usable posting date.
pub const DATE_SENTINEL: &str = "N/A";

/// Reformat the API's `"%Y-%m-%d %H:%M:%S"` timestamps as `"%d-%m-%Y"`.
/// Anything unparseable (including the sentinel itself) maps to `"N/A"`.
pub fn format_posted_date(raw: &str) -> String {
    if raw == DATE_SENTINEL {
        return DATE_SENTINEL.to_string();
    }

    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        Ok(parsed) => parsed.format("%d-%m-%Y").to_string(),
        Err(_) => DATE_SENTINEL.to_string(),
    }
}

/// Public offer page for a job id.
pub fn offer_url(job_id: u64) -> String {
    format!("https://www.itjobs.pt/oferta/{}", job_id)
}

pub fn remote_glyph(allow_remote: bool) -> &'static str {
    if allow_remote {
        "✅"
    } else {
        "❌"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_posted_date() {
        assert_eq!(format_posted_date("2024-03-15 10:30:00"), "15-03-2024");
        assert_eq!(format_posted_date("N/A"), "N/A");
        assert_eq!(format_posted_date("garbage"), "N/A");
        assert_eq!(format_posted_date("2024-03-15"), "N/A");
        assert_eq!(format_posted_date(""), "N/A");
    }

    #[test]
    fn test_offer_url() {
        assert_eq!(offer_url(501234), "https://www.itjobs.pt/oferta/501234");
    }

    #[test]
    fn test_remote_glyph() {
        assert_eq!(remote_glyph(true), "✅");
        assert_eq!(remote_glyph(false), "❌");
    }
}
