// 🧮 Normalizer - raw poll fields → comparable values
//
// Pure functions, no I/O. Three conversions:
// 1. Poll window text ("9/30 - 10/3") → start date
// 2. Raw Democrat/Republican numbers → two-party shares summing to 1
// 3. Poll date + election date → months before the election

use crate::error::PollError;
use chrono::NaiveDate;

/// Separator between the start and end of a poll's fielding window
pub const WINDOW_SEPARATOR: &str = " - ";

/// Days per "month" when converting day differences to months
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Months assigned to polls dated on or after election day
///
/// Small and positive: such polls stay inside any reasonable window
/// but never rank as more recent than a poll from the final week.
pub const ELECTION_DAY_MONTHS: f64 = 0.2;

// ============================================================================
// DATES
// ============================================================================

/// Parse a fielding window "M/D - M/D" into the window's START date
///
/// The year is omitted in the source text, so `year` is appended.
/// The end token is discarded: recency is measured from poll start.
///
/// # Examples:
/// ```
/// use poll_aggregator::normalizer::parse_poll_window;
/// use chrono::NaiveDate;
///
/// let date = parse_poll_window("9/30 - 10/3", 2024).unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(2024, 9, 30).unwrap());
/// ```
pub fn parse_poll_window(text: &str, year: i32) -> Result<NaiveDate, PollError> {
    let tokens: Vec<&str> = text.split(WINDOW_SEPARATOR).collect();
    if tokens.len() != 2 {
        return Err(PollError::malformed_date(
            text,
            format!("expected `M/D{}M/D`", WINDOW_SEPARATOR),
        ));
    }

    parse_month_day(tokens[0].trim(), year).ok_or_else(|| {
        PollError::malformed_date(text, format!("start `{}` is not a month/day", tokens[0].trim()))
    })
}

fn parse_month_day(token: &str, year: i32) -> Option<NaiveDate> {
    let (month, day) = token.split_once('/')?;
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Months between a poll and the election, in 30-day units
///
/// Polls dated on or after election day get `ELECTION_DAY_MONTHS`
/// rather than zero or a negative value.
pub fn months_from_election(poll_date: NaiveDate, election_date: NaiveDate) -> f64 {
    months_for_days(days_before_election(poll_date, election_date))
}

/// Whole days from a poll to the election (negative after election day)
pub fn days_before_election(poll_date: NaiveDate, election_date: NaiveDate) -> i64 {
    (election_date - poll_date).num_days()
}

/// Months for a day difference; the one conversion every recency check uses
///
/// Comparing `days <= window * 30.0` instead is not equivalent in floating
/// point (e.g. 123 days at window 123/30), so day counts always go through here.
pub fn months_for_days(days: i64) -> f64 {
    if days <= 0 {
        return ELECTION_DAY_MONTHS;
    }
    days as f64 / DAYS_PER_MONTH
}

// ============================================================================
// SHARES
// ============================================================================

/// Renormalize raw two-party numbers to shares summing to 1
///
/// Third-party and undecided share is discarded: only the ratio of
/// Democrat to Republican survives.
///
/// Returns `(share_dem, share_rep)`.
pub fn normalize_shares(raw_dem: f64, raw_rep: f64) -> Result<(f64, f64), PollError> {
    check_raw_share("democrat", raw_dem)?;
    check_raw_share("republican", raw_rep)?;

    let total = raw_dem + raw_rep;
    if total == 0.0 {
        return Err(PollError::DivisionByZero {
            dem: raw_dem,
            rep: raw_rep,
        });
    }

    // Halve both when the sum overflows; the ratio is unchanged
    let share_dem = if total.is_finite() {
        raw_dem / total
    } else {
        let (dem, rep) = (raw_dem * 0.5, raw_rep * 0.5);
        dem / (dem + rep)
    };
    Ok((share_dem, 1.0 - share_dem))
}

fn check_raw_share(party: &'static str, value: f64) -> Result<(), PollError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PollError::InvalidShare { party, value })
    }
}

// ============================================================================
// TESTS
// ============================================================================
