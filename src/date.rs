// 📅 Arrival dates - calendar-correct checks without a date library
//
// Stored format is always `YYYY-MM-DD`, zero padded, years 1900-2999.

/// Earliest supported arrival year
pub const MIN_YEAR: u32 = 1900;

/// Latest supported arrival year
pub const MAX_YEAR: u32 = 2999;

/// Gregorian leap year rule
pub fn is_leap_year(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`, `None` for an out of range month
pub fn days_in_month(year: u32, month: u32) -> Option<u32> {
    let days = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => return None,
    };
    Some(days)
}

/// Parse a fixed-width run of ASCII digits
fn parse_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }

    Some(
        bytes
            .iter()
            .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0')),
    )
}

/// Does `date` name a real calendar day in strict `YYYY-MM-DD` form?
///
/// Accepts years 1900-2999 only. Month and day must be zero padded,
/// and the day must exist in that month (Feb 29 only in leap years).
pub fn is_valid_date(date: &str) -> bool {
    let bytes = date.as_bytes();

    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }

    let (year, month, day) = match (
        parse_digits(&bytes[0..4]),
        parse_digits(&bytes[5..7]),
        parse_digits(&bytes[8..10]),
    ) {
        (Some(y), Some(m), Some(d)) => (y, m, d),
        _ => return false,
    };

    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return false;
    }

    match days_in_month(year, month) {
        Some(max_day) => (1..=max_day).contains(&day),
        None => false,
    }
}

/// Build a stored date from separate month / day / year inputs
///
/// Inputs are trimmed and must be exactly 2, 2 and 4 digits. Returns the
/// zero-padded `YYYY-MM-DD` form, or `None` if the pieces don't make a real day.
/// The year range is not checked here; `AnimalRecord::validate` does that.
pub fn compose_date(month: &str, day: &str, year: &str) -> Option<String> {
    let (month, day, year) = (month.trim(), day.trim(), year.trim());

    if month.len() != 2 || day.len() != 2 || year.len() != 4 {
        return None;
    }

    let m = parse_digits(month.as_bytes())?;
    let d = parse_digits(day.as_bytes())?;
    let y = parse_digits(year.as_bytes())?;

    let max_day = days_in_month(y, m)?;
    if d < 1 || d > max_day {
        return None;
    }

    Some(format!("{:04}-{:02}-{:02}", y, m, d))
}
