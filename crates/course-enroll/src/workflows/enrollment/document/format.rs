use chrono::NaiveDate;

/// `"HH:MM"` (24h) to `"h:MM AM|PM"`. Minutes are passed through untouched.
pub fn format_time(raw: &str) -> Option<String> {
    let (hour, minutes) = raw.split_once(':')?;
    if !is_digits(hour, 2) || !is_digits(minutes, 2) {
        return None;
    }
    let hour: u32 = hour.parse().ok()?;

    let (display_hour, period) = match hour {
        0 => (12, "AM"),
        1..=11 => (hour, "AM"),
        12 => (12, "PM"),
        13..=23 => (hour - 12, "PM"),
        _ => return None,
    };

    Some(format!("{display_hour}:{minutes} {period}"))
}

// one or two ASCII digits, no sign or padding
fn is_digits(raw: &str, max_len: usize) -> bool {
    (1..=max_len).contains(&raw.len()) && raw.bytes().all(|byte| byte.is_ascii_digit())
}

pub fn format_timing(start: &str, end: &str) -> Option<String> {
    Some(format!("{} - {}", format_time(start)?, format_time(end)?))
}

/// `DD/MM/YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn format_fees(fees: f64, currency: &str) -> String {
    format!("{}/- {}", format_amount(fees), currency)
}

fn format_amount(fees: f64) -> String {
    if fees.fract() == 0.0 && fees.abs() < 1e15 {
        format!("{}", fees as i64)
    } else {
        format!("{fees}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_boundary_hours() {
        assert_eq!(format_time("00:00").as_deref(), Some("12:00 AM"));
        assert_eq!(format_time("12:00").as_deref(), Some("12:00 PM"));
        assert_eq!(format_time("13:30").as_deref(), Some("1:30 PM"));
        assert_eq!(format_time("23:59").as_deref(), Some("11:59 PM"));
        assert_eq!(format_time("09:05").as_deref(), Some("9:05 AM"));
        assert_eq!(format_time("11:45").as_deref(), Some("11:45 AM"));
    }

    #[test]
    fn minutes_are_not_repadded() {
        assert_eq!(format_time("14:5").as_deref(), Some("2:5 PM"));
        assert_eq!(format_time("7:30").as_deref(), Some("7:30 AM"));
    }

    #[test]
    fn rejects_unparseable_times() {
        assert_eq!(format_time("24:00"), None);
        assert_eq!(format_time("noon"), None);
        assert_eq!(format_time("ab:10"), None);
    }

    #[test]
    fn rejects_signs_padding_and_seconds() {
        assert_eq!(format_time("+9:00"), None);
        assert_eq!(format_time(" 9:00"), None);
        assert_eq!(format_time("9:00 "), None);
        assert_eq!(format_time("9:00:00"), None);
        assert_eq!(format_time("9:"), None);
        assert_eq!(format_time("009:00"), None);
    }

    #[test]
    fn timing_joins_both_ends() {
        assert_eq!(
            format_timing("10:00", "14:30").as_deref(),
            Some("10:00 AM - 2:30 PM")
        );
        assert_eq!(format_timing("10:00", "bad"), None);
    }

    #[test]
    fn formats_dates_and_fees() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 10).expect("valid");
        assert_eq!(format_date(date), "10/01/2025");
        assert_eq!(format_fees(5000.0, "INR"), "5000/- INR");
        assert_eq!(format_fees(4999.5, "INR"), "4999.5/- INR");
    }
}
