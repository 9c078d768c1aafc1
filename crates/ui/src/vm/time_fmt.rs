use chrono::{DateTime, Utc};

/// Calendar date, e.g. "14 Nov 2023".
#[must_use]
pub fn format_date(value: DateTime<Utc>) -> String {
    value.format("%-d %b %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use learn_core::time::fixed_now;

    #[test]
    fn formats_fixed_timestamp() {
        assert_eq!(format_date(fixed_now()), "14 Nov 2023");
    }
}
