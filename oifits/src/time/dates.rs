use chrono::{NaiveDate, NaiveDateTime};

/// Parse a `DATE-OBS` value.
///
/// Accepts `YYYY-MM-DD`, the same followed by `Thh:mm:ss[.fff]`, and the
/// legacy two-digit `DD/MM/YY` form, which FITS reserves for 1900-1999.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use oifits::time::parse_date_obs;
///
/// assert_eq!(parse_date_obs("2003-05-17"), NaiveDate::from_ymd_opt(2003, 5, 17));
/// assert_eq!(parse_date_obs("17/05/97"), NaiveDate::from_ymd_opt(1997, 5, 17));
/// assert_eq!(parse_date_obs("yesterday"), None);
/// ```
pub fn parse_date_obs(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(stamp) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(stamp.date());
    }
    parse_legacy(text)
}

fn parse_legacy(text: &str) -> Option<NaiveDate> {
    let mut parts = text.split('/');
    let day: u32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let year = parts.next()?;
    if parts.next().is_some() || year.len() != 2 {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    NaiveDate::from_ymd_opt(1900 + year, month, day)
}
