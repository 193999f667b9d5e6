//! Shared utility functions for HFA crates.

/// Date utility functions
pub mod dates {
    use anyhow::Context;
    use chrono::{Local, NaiveDate};

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .with_context(|| format!("'{}' is not a YYYY-MM-DD date", s.trim()))
    }

    /// Parse either "YYYY-MM-DD" or the "DD/MM/YYYY" form used on paper
    /// screening sheets.
    pub fn parse_date_lenient(s: &str) -> anyhow::Result<NaiveDate> {
        let trimmed = s.trim();
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
            .with_context(|| format!("'{}' is not a YYYY-MM-DD or DD/MM/YYYY date", trimmed))
    }

    /// Today's date on the local clock. Only the command layer calls this;
    /// the assessment core always takes the date as a parameter.
    pub fn today() -> NaiveDate {
        Local::now().naive_local().date()
    }

}

/// Number formatting for reports and logs
pub mod numbers {
    /// Format a z-score with two decimals and an explicit sign.
    pub fn format_z(z: f64) -> String {
        format!("{:+.2}", z)
    }

    /// Format a measurement with one decimal.
    pub fn format_measure(value: f64) -> String {
        format!("{:.1}", value)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_format_z() {
            assert_eq!(format_z(-0.92593), "-0.93");
            assert_eq!(format_z(1.5), "+1.50");
            assert_eq!(format_z(0.0), "+0.00");
        }

        #[test]
        fn test_format_measure() {
            assert_eq!(format_measure(110.0), "110.0");
            assert_eq!(format_measure(27.26), "27.3");
        }
    }
}
