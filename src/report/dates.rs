//! Publication date parsing for report ordering.

use chrono::NaiveDate;

/// Parse a metadata `publish_time` value.
///
/// Accepts `2020-03-15`, `2020-03`, `2020 Mar 15`, `2020 March` and `2020`.
/// Partial dates resolve to the first day of the period.
pub fn parse_publish_time(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y %B %d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{raw} 1"), "%Y %B %d") {
        return Some(date);
    }
    if raw.len() == 4 && raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw
            .parse()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn accepts_metadata_formats() {
        assert_eq!(parse_publish_time("2020-03-15"), ymd(2020, 3, 15));
        assert_eq!(parse_publish_time("2020-03"), ymd(2020, 3, 1));
        assert_eq!(parse_publish_time("2020 Mar 15"), ymd(2020, 3, 15));
        assert_eq!(parse_publish_time("2019 December"), ymd(2019, 12, 1));
        assert_eq!(parse_publish_time(" 2018 "), ymd(2018, 1, 1));
    }

    #[test]
    fn rejects_noise() {
        assert_eq!(parse_publish_time(""), None);
        assert_eq!(parse_publish_time("unknown"), None);
        assert_eq!(parse_publish_time("20201"), None);
    }
}
