use linker_core::PrecisionDate;
use tracing::warn;

/// Re-validates a date against its claimed precision, dropping it with a
/// warning if any field is out of range (§4.3 "Invalid and out-of-range
/// dates are dropped with a warning"). `context` identifies the row and
/// field in the log line, e.g. `"Q1/birth_date"`.
pub fn validate_date(date: Option<PrecisionDate>, context: &str) -> Option<PrecisionDate> {
    match date {
        Some(d) if d.is_valid() => Some(d),
        Some(d) => {
            warn!(context, year = d.year, month = d.month, day = d.day, "dropping out-of-range date");
            None
        }
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linker_core::{DatePrecision, PrecisionDate};

    #[test]
    fn keeps_valid_date() {
        let date = PrecisionDate::new_year(1980);
        assert_eq!(validate_date(Some(date), "Q1/birth_date"), Some(date));
    }

    #[test]
    fn drops_invalid_date_with_warning() {
        let bad = PrecisionDate { precision: DatePrecision::Day, year: 1980, month: 2, day: 30, hour: 0, minute: 0, second: 0 };
        assert_eq!(validate_date(Some(bad), "Q1/birth_date"), None);
    }

    #[test]
    fn passes_through_missing_date() {
        assert_eq!(validate_date(None, "Q1/birth_date"), None);
    }
}
