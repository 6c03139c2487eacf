//! Lenient `cookie-date` parsing (RFC 6265 §5.1.1).
//!
//! Servers send expiry dates in many shapes: IMF-fixdate, RFC 850 with a
//! two-digit year, asctime, or with a `UTC` zone. The algorithm ignores the
//! exact layout and picks the time, day, month and year out of the tokens in
//! whatever order they appear.

use time::{Date, Month, PrimitiveDateTime, Time};

/// Latest expiry a cookie can carry: `Fri, 31-Dec-9999 23:59:59 GMT`.
pub const MAX_TIMESTAMP: i64 = 253_402_300_799;

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Clamp a timestamp into the storable range `0..=MAX_TIMESTAMP`.
pub fn clamp_timestamp(timestamp: i64) -> i64 {
    timestamp.clamp(0, MAX_TIMESTAMP)
}

/// Parse a cookie date into a Unix timestamp. Zones are ignored and the
/// date is read as UTC.
pub fn parse_cookie_date(text: &str) -> Option<i64> {
    let mut time = None;
    let mut day = None;
    let mut month = None;
    let mut year = None;

    for token in text.split(is_delimiter).filter(|t| !t.is_empty()) {
        if time.is_none() {
            if let Some(hms) = parse_time(token) {
                time = Some(hms);
                continue;
            }
        }
        if day.is_none() {
            if let Some(d) = leading_digits(token, 1, 2) {
                day = Some(d);
                continue;
            }
        }
        if month.is_none() {
            if let Some(m) = parse_month(token) {
                month = Some(m);
                continue;
            }
        }
        if year.is_none() {
            if let Some(y) = leading_digits(token, 2, 4) {
                year = Some(y);
            }
        }
    }

    let (hour, minute, second) = time?;
    let year = match year? {
        y @ 70..=99 => y + 1900,
        y @ 0..=69 => y + 2000,
        y => y,
    };
    if year < 1601 {
        return None;
    }

    let month = Month::try_from(month?).ok()?;
    let date = Date::from_calendar_date(year as i32, month, day? as u8).ok()?;
    let time = Time::from_hms(hour as u8, minute as u8, second as u8).ok()?;
    Some(PrimitiveDateTime::new(date, time).assume_utc().unix_timestamp())
}

/// `%x09 / %x20-2F / %x3B-40 / %x5B-60 / %x7B-7E`
fn is_delimiter(c: char) -> bool {
    matches!(c, '\t' | ' '..='/' | ';'..='@' | '['..='`' | '{'..='~')
}

/// Read `min..=max` leading digits. Any non-digit suffix is ignored.
fn leading_digits(token: &str, min: usize, max: usize) -> Option<u32> {
    let len = token.bytes().take_while(u8::is_ascii_digit).count();
    if len < min || len > max {
        return None;
    }
    token[..len].parse().ok()
}

/// `hh:mm:ss`, one or two digits per field.
fn parse_time(token: &str) -> Option<(u32, u32, u32)> {
    let mut fields = token.splitn(3, ':');
    let hour = fields.next()?;
    let minute = fields.next()?;
    let second = fields.next()?;

    let whole = |field: &str| {
        leading_digits(field, 1, 2).filter(|_| field.bytes().all(|b| b.is_ascii_digit()))
    };

    Some((whole(hour)?, whole(minute)?, leading_digits(second, 1, 2)?))
}

fn parse_month(token: &str) -> Option<u8> {
    let prefix = token.as_bytes().get(..3)?;
    MONTHS
        .iter()
        .position(|m| prefix.eq_ignore_ascii_case(m.as_bytes()))
        .map(|i| i as u8 + 1)
}
