use linker_core::PrecisionDate;

/// Compares the `year, month, day, hour, minute, second` attributes of
/// two dates at their shared precision, stopping at the first mismatch
/// (§4.5.4). Returns the count of matched leading attributes.
fn matched_attributes(a: &PrecisionDate, b: &PrecisionDate, shared_index: u8) -> u8 {
    let attrs_a = [a.year as i64, a.month as i64, a.day as i64, a.hour as i64, a.minute as i64, a.second as i64];
    let attrs_b = [b.year as i64, b.month as i64, b.day as i64, b.hour as i64, b.minute as i64, b.second as i64];
    let mut matched = 0u8;
    for i in 0..=shared_index as usize {
        if attrs_a[i] == attrs_b[i] {
            matched += 1;
        } else {
            break;
        }
    }
    matched
}

/// One (source date, target date) comparison: the shared precision is
/// `min(a.precision, b.precision).attribute_index()`; score is
/// `matched_attributes / (shared_index + 1)`.
fn compare_one(a: &PrecisionDate, b: &PrecisionDate) -> f32 {
    let shared_index = a.precision.attribute_index().min(b.precision.attribute_index());
    let matched = matched_attributes(a, b, shared_index);
    matched as f32 / (shared_index as f32 + 1.0)
}

/// Maximizes `compare_one` over the cross-product of `source` dates
/// against a single `target` date (§4.5.4).
pub fn similar_dates(source: &[PrecisionDate], target: &[PrecisionDate]) -> f32 {
    if source.is_empty() || target.is_empty() {
        return 0.0;
    }
    let mut best = 0.0f32;
    for s in source {
        for t in target {
            let score = compare_one(s, t);
            if score > best {
                best = score;
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use linker_core::DatePrecision;

    #[test]
    fn exact_match_at_day_precision_scores_one() {
        let a = PrecisionDate { precision: DatePrecision::Day, year: 1949, month: 3, day: 19, hour: 0, minute: 0, second: 0 };
        let b = a;
        assert_eq!(compare_one(&a, &b), 1.0);
    }

    #[test]
    fn mismatched_day_with_matching_month_scores_at_shared_precision() {
        let a = PrecisionDate { precision: DatePrecision::Day, year: 1949, month: 3, day: 19, hour: 0, minute: 0, second: 0 };
        let b = PrecisionDate { precision: DatePrecision::Month, year: 1949, month: 3, day: 1, hour: 0, minute: 0, second: 0 };
        // shared precision is Month (index 1): year and month both match -> 2/2
        assert_eq!(compare_one(&a, &b), 1.0);
    }

    #[test]
    fn year_mismatch_breaks_immediately() {
        let a = PrecisionDate::new_year(1949);
        let b = PrecisionDate::new_year(1950);
        assert_eq!(compare_one(&a, &b), 0.0);
    }

    #[test]
    fn century_vs_day_precision_compares_only_at_century() {
        let a = PrecisionDate { precision: DatePrecision::Century, year: 1900, month: 1, day: 1, hour: 0, minute: 0, second: 0 };
        let b = PrecisionDate { precision: DatePrecision::Day, year: 1900, month: 7, day: 4, hour: 0, minute: 0, second: 0 };
        assert_eq!(compare_one(&a, &b), 1.0);
    }
}
