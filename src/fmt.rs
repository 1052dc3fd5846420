use chrono::{NaiveDate, NaiveDateTime};

/// Format a float as a plain two-decimal amount for import files: 1234.56
pub fn plain_amount(val: f64) -> String {
    // -0.0 would otherwise render as "-0.00"
    let val = if val == 0.0 { 0.0 } else { val };
    format!("{val:.2}")
}

pub fn serialize_amount<S: serde::Serializer>(val: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&plain_amount(*val))
}

/// Parse a European-style amount: `.` thousands separator, `,` decimals.
/// "1.234,56" -> 1234.56
pub fn parse_eu_amount(raw: &str) -> Option<f64> {
    let s = raw.trim().replace('.', "").replace(',', ".");
    s.parse().ok()
}

/// Largest serial Excel accepts (9999-12-31).
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

/// Convert an Excel 1900-system serial (days, fractional time) to a datetime.
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || !(0.0..=MAX_EXCEL_SERIAL + 1.0).contains(&serial) {
        return None;
    }
    // Excel epoch is 1899-12-30 (accounting for the 1900 leap year bug)
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let secs = (serial * 86_400.0).round() as i64;
    base.checked_add_signed(chrono::Duration::seconds(secs))
}

/// Parse the ISO date/time text calamine emits for some date cells.
pub fn parse_iso_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_amount_formatting() {
        assert_eq!(plain_amount(1234.56), "1234.56");
        assert_eq!(plain_amount(12.5), "12.50");
        assert_eq!(plain_amount(0.0), "0.00");
        assert_eq!(plain_amount(-0.0), "0.00");
        assert_eq!(plain_amount(1000000.99), "1000000.99");
    }

    #[test]
    fn test_parse_eu_amount() {
        assert_eq!(parse_eu_amount("12,50"), Some(12.5));
        assert_eq!(parse_eu_amount("1.234,56"), Some(1234.56));
        assert_eq!(parse_eu_amount("1.000.000,00"), Some(1_000_000.0));
        assert_eq!(parse_eu_amount("7"), Some(7.0));
        assert_eq!(parse_eu_amount("1,2,3"), None);
        assert_eq!(parse_eu_amount("."), None);
    }

    #[test]
    fn test_excel_serial_to_datetime() {
        let dt = excel_serial_to_datetime(45047.0).unwrap();
        assert_eq!(dt.format("%d/%m/%Y").to_string(), "01/05/2023");
        let dt = excel_serial_to_datetime(45047.75).unwrap();
        assert_eq!(dt.format("%d/%m/%Y %H:%M").to_string(), "01/05/2023 18:00");
    }

    #[test]
    fn test_excel_serial_out_of_range() {
        assert_eq!(excel_serial_to_datetime(-1.0), None);
        assert_eq!(excel_serial_to_datetime(f64::NAN), None);
        assert_eq!(excel_serial_to_datetime(1e12), None);
    }

    #[test]
    fn test_parse_iso_datetime() {
        let expected = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(parse_iso_datetime("2023-05-01T00:00:00"), Some(expected));
        assert_eq!(parse_iso_datetime("2023-05-01"), Some(expected));
        assert_eq!(parse_iso_datetime("01/05/2023"), None);
    }
}
