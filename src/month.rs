//! Resolves month names sent by clients into calendar months.
//!
//! Only the twelve English month names are accepted. Matching ignores case and
//! surrounding whitespace, so "march", " March " and "MARCH" all resolve to
//! [Month::March].

use time::Month;

use crate::Error;

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// The month the dashboard shows when none is selected.
pub(crate) const DEFAULT_MONTH: Month = Month::March;

/// Resolve a month name to a calendar month.
///
/// # Errors
/// Returns [Error::InvalidMonth] if `name` is not one of the twelve English
/// month names.
pub fn parse_month(name: &str) -> Result<Month, Error> {
    let trimmed = name.trim();

    MONTHS
        .into_iter()
        .find(|month| month_name(*month).eq_ignore_ascii_case(trimmed))
        .ok_or_else(|| Error::InvalidMonth(name.to_owned()))
}

/// Resolve the optional `month` query parameter shared by every endpoint.
///
/// # Errors
/// Returns [Error::MissingMonth] if the parameter is absent or blank, or
/// [Error::InvalidMonth] if it does not name a month.
pub(crate) fn require_month(month: Option<&str>) -> Result<Month, Error> {
    match month {
        Some(name) if !name.trim().is_empty() => parse_month(name),
        _ => Err(Error::MissingMonth),
    }
}

/// The full English name of `month`, e.g. "March".
pub(crate) fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "January",
        Month::February => "February",
        Month::March => "March",
        Month::April => "April",
        Month::May => "May",
        Month::June => "June",
        Month::July => "July",
        Month::August => "August",
        Month::September => "September",
        Month::October => "October",
        Month::November => "November",
        Month::December => "December",
    }
}

/// All months in calendar order.
pub(crate) fn all_months() -> [Month; 12] {
    MONTHS
}

#[cfg(test)]
mod tests {
    use time::Month;

    use crate::{
        Error,
        month::{all_months, month_name, parse_month, require_month},
    };

    #[test]
    fn resolves_calendar_months() {
        assert_eq!(parse_month("March").unwrap(), Month::March);
        assert_eq!(parse_month("December").unwrap(), Month::December);
        assert_eq!(u8::from(parse_month("March").unwrap()), 3);
        assert_eq!(u8::from(parse_month("December").unwrap()), 12);
    }

    #[test]
    fn every_month_name_round_trips() {
        for month in all_months() {
            let resolved = parse_month(month_name(month)).unwrap();
            assert_eq!(resolved, month);
            assert_eq!(parse_month(month_name(resolved)).unwrap(), month);
        }
    }

    #[test]
    fn ignores_case_and_whitespace() {
        assert_eq!(parse_month("march").unwrap(), Month::March);
        assert_eq!(parse_month(" SEPTEMBER ").unwrap(), Month::September);
    }

    #[test]
    fn rejects_unknown_names() {
        assert!(matches!(parse_month("Smarch"), Err(Error::InvalidMonth(_))));
        assert!(matches!(parse_month("Mar"), Err(Error::InvalidMonth(_))));
        assert!(matches!(parse_month("3"), Err(Error::InvalidMonth(_))));
    }

    #[test]
    fn missing_or_blank_month_is_missing() {
        assert!(matches!(require_month(None), Err(Error::MissingMonth)));
        assert!(matches!(require_month(Some("  ")), Err(Error::MissingMonth)));
        assert_eq!(require_month(Some("April")).unwrap(), Month::April);
    }
}
