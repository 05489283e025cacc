//! Display formatters shared by every dashboard view

use chrono::{DateTime, Utc};

pub const PLACEHOLDER: &str = "—";

/// Round the exact binary value to `decimals` places, like JS `toFixed`.
/// `1.45` is stored just below 1.45 and gives `1.4`; a value exactly halfway
/// (`1.25`) goes to the larger magnitude.
fn to_fixed(value: f64, decimals: usize) -> String {
    if value.is_finite() && is_halfway(value, decimals) {
        let above = f64::from_bits(value.abs().to_bits() + 1);
        let digits = format!("{:.*}", decimals, above);
        return if value < 0.0 { format!("-{}", digits) } else { digits };
    }
    format!("{:.*}", decimals, value)
}

/// True when `value` sits exactly between two `decimals`-place neighbours,
/// i.e. `2 * value * 10^decimals` is an odd integer
fn is_halfway(value: f64, decimals: usize) -> bool {
    let bits = value.abs().to_bits();
    let biased_exp = ((bits >> 52) & 0x7ff) as i64;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if biased_exp == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased_exp - 1075)
    };
    if mantissa == 0 {
        return false;
    }
    // value = odd * 2^e; times 10^d = odd * 5^d * 2^(e + d)
    exponent + mantissa.trailing_zeros() as i64 == -(decimals as i64 + 1)
}

/// Abbreviate a metric: `1.5M`, `1.0K`, `999`
pub fn format_number(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{}M", to_fixed(value / 1_000_000.0, 1))
    } else if value >= 1_000.0 {
        format!("{}K", to_fixed(value / 1_000.0, 1))
    } else {
        to_fixed(value, 0)
    }
}

/// Same thresholds as [`format_number`], prefixed with `$`
pub fn format_currency(value: f64) -> String {
    format!("${}", format_number(value))
}

/// Table cells show a dash for metrics that are absent or zero
pub fn format_optional_metric(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 => format_number(v),
        _ => PLACEHOLDER.to_string(),
    }
}

pub fn format_optional_currency(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 => format_currency(v),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Thousands separators for full-precision totals, e.g. `$5,350,000`
pub fn format_grouped(value: f64) -> String {
    let whole = value.round().max(0.0) as u64;
    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Coarse age label from an ISO-8601 creation time.
///
/// Hours are floored. A creation time in the current hour (or in the future)
/// shows as `1h`; an absent or unparseable timestamp shows as a dash.
pub fn age_label(created_at: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(created) = created_at.and_then(parse_timestamp) else {
        return PLACEHOLDER.to_string();
    };

    let hours = (now - created).num_hours();
    let days = hours / 24;

    if days > 0 {
        format!("{}d", days)
    } else if hours > 0 {
        format!("{}h", hours)
    } else {
        "1h".to_string()
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    // Timestamps without an offset are read as UTC
    chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Shorten a chain address to `0x1234...abcd`
pub fn short_address(address: &str) -> String {
    if address.len() <= 10 || !address.is_ascii() {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_format_number_thresholds() {
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1.0K");
        assert_eq!(format_number(1_500_000.0), "1.5M");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(12_345.0), "12.3K");
    }

    #[test]
    fn test_format_number_rounds_binary_value() {
        // 1.45 is stored as 1.4499999999999999556
        assert_eq!(format_number(1450.0), "1.4K");
        assert_eq!(format_number(1_450_000.0), "1.4M");
        // 2.35 is stored as 2.3500000000000000888
        assert_eq!(format_number(2_350_000.0), "2.4M");
        assert_eq!(format_number(1_049.0), "1.0K");
    }

    #[test]
    fn test_format_number_exact_halves_round_up() {
        // 1.25, 1.75 and 999.5 are exact in binary
        assert_eq!(format_number(1250.0), "1.3K");
        assert_eq!(format_number(1_750_000.0), "1.8M");
        assert_eq!(format_number(999.5), "1000");
        assert_eq!(format_number(0.5), "1");
        assert_eq!(format_number(2.5), "3");
    }

    #[test]
    fn test_to_fixed_halfway_detection() {
        assert!(is_halfway(1.25, 1));
        assert!(is_halfway(2.5, 0));
        assert!(!is_halfway(1.45, 1));
        assert!(!is_halfway(1.25, 2));
        assert!(!is_halfway(0.0, 0));
        assert_eq!(to_fixed(-2.5, 0), "-3");
        assert_eq!(to_fixed(-1.45, 1), "-1.4");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(850_000.0), "$850.0K");
        assert_eq!(format_currency(3_200_000.0), "$3.2M");
        assert_eq!(format_currency(42.0), "$42");
    }

    #[test]
    fn test_optional_metrics_use_placeholder() {
        assert_eq!(format_optional_metric(None), "—");
        assert_eq!(format_optional_metric(Some(0.0)), "—");
        assert_eq!(format_optional_metric(Some(1200.0)), "1.2K");
        assert_eq!(format_optional_currency(Some(450_000.0)), "$450.0K");
        assert_eq!(format_optional_currency(None), "—");
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0.0), "0");
        assert_eq!(format_grouped(999.0), "999");
        assert_eq!(format_grouped(1000.0), "1,000");
        assert_eq!(format_grouped(11_850_000.0), "11,850,000");
    }

    #[test]
    fn test_age_label() {
        let ts = |d: Duration| (now() - d).to_rfc3339();

        assert_eq!(age_label(Some(&ts(Duration::hours(25))), now()), "1d");
        assert_eq!(age_label(Some(&ts(Duration::hours(3))), now()), "3h");
        assert_eq!(age_label(Some(&ts(Duration::days(9))), now()), "9d");
        assert_eq!(age_label(None, now()), "—");
    }

    #[test]
    fn test_age_label_floors_to_one_hour() {
        let recent = (now() - Duration::minutes(20)).to_rfc3339();
        assert_eq!(age_label(Some(&recent), now()), "1h");

        let future = (now() + Duration::hours(2)).to_rfc3339();
        assert_eq!(age_label(Some(&future), now()), "1h");
    }

    #[test]
    fn test_age_label_accepts_naive_and_rejects_garbage() {
        assert_eq!(age_label(Some("2025-06-01T07:30:00"), now()), "4h");
        assert_eq!(age_label(Some("2025-05-30T12:00:00.000Z"), now()), "2d");
        assert_eq!(age_label(Some("yesterday"), now()), "—");
    }

    #[test]
    fn test_short_address() {
        assert_eq!(
            short_address("0x1234567890abcdef1234567890abcdef12345678"),
            "0x1234...5678"
        );
        assert_eq!(short_address("0xabc"), "0xabc");
    }
}
