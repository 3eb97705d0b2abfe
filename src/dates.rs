use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Days shown on either side of the selected date in the navigation strip.
pub const WINDOW_RADIUS: i64 = 3;

/// Outcome of reading a user-supplied date.
///
/// Parsing never decides what to do with bad input; callers pick the
/// fallback (today, or skipping a write) themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateParse {
    Parsed(NaiveDateTime),
    Fallback(FallbackReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    Missing,
    Malformed(String),
}

impl DateParse {
    pub fn parse(input: Option<&str>) -> Self {
        let Some(raw) = input else {
            return Self::Fallback(FallbackReason::Missing);
        };
        if raw.is_empty() {
            return Self::Fallback(FallbackReason::Missing);
        }
        match parse_iso(raw) {
            Some(value) => Self::Parsed(value),
            None => Self::Fallback(FallbackReason::Malformed(raw.to_string())),
        }
    }

    /// The parsed value at midnight, if parsing succeeded.
    pub fn normalized(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Parsed(value) => Some(midnight(*value)),
            Self::Fallback(_) => None,
        }
    }
}

/// Zeroes the time of day.
pub fn midnight(value: NaiveDateTime) -> NaiveDateTime {
    value.date().and_time(NaiveTime::MIN)
}

pub fn today_at_midnight() -> NaiveDateTime {
    midnight(Local::now().naive_local())
}

/// Seven consecutive dates centered on `center`, ascending. Days beyond the
/// representable calendar are left out.
pub fn date_range(center: NaiveDate) -> Vec<NaiveDate> {
    (-WINDOW_RADIUS..=WINDOW_RADIUS)
        .filter_map(|offset| center.checked_add_signed(Duration::days(offset)))
        .collect()
}

/// Parses an ISO-8601 calendar date with an optional time of day.
///
/// Dates are `YYYY-MM-DD` or `YYYYMMDD` with exactly four year digits and
/// two-digit month and day. A time follows a `T` or space separator and may
/// stop at the hour, minute or second, in extended (`14:30:00`) or basic
/// (`143000`) form, with an optional `.`/`,` fraction after the seconds.
/// A trailing `Z` or `+HH[:MM[:SS]]` offset is validated and then ignored, so
/// offset values keep their own wall-clock date.
pub fn parse_iso(input: &str) -> Option<NaiveDateTime> {
    let mut cursor = Cursor::new(input);
    let date = cursor.date()?;
    if cursor.is_done() {
        return Some(date.and_time(NaiveTime::MIN));
    }
    if !(cursor.eat(b'T') || cursor.eat(b' ')) {
        return None;
    }
    let time = cursor.time()?;
    if !cursor.is_done() {
        cursor.offset()?;
    }
    cursor.is_done().then(|| date.and_time(time))
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    fn is_done(&self) -> bool {
        self.pos == self.bytes.len()
    }

    fn peek_digit(&self) -> bool {
        self.bytes.get(self.pos).is_some_and(u8::is_ascii_digit)
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.bytes.get(self.pos) == Some(&byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Exactly `count` ASCII digits.
    fn digits(&mut self, count: usize) -> Option<u32> {
        let chunk = self.bytes.get(self.pos..self.pos + count)?;
        if !chunk.iter().all(u8::is_ascii_digit) {
            return None;
        }
        self.pos += count;
        Some(chunk.iter().fold(0, |acc, byte| acc * 10 + u32::from(byte - b'0')))
    }

    fn date(&mut self) -> Option<NaiveDate> {
        let year = self.digits(4)? as i32;
        let (month, day) = if self.eat(b'-') {
            let month = self.digits(2)?;
            if !self.eat(b'-') {
                return None;
            }
            (month, self.digits(2)?)
        } else {
            (self.digits(2)?, self.digits(2)?)
        };
        NaiveDate::from_ymd_opt(year, month, day)
    }

    fn time(&mut self) -> Option<NaiveTime> {
        let hour = self.digits(2)?;
        let mut minute = 0;
        let mut second = 0;
        let mut nanos = 0;
        let mut has_seconds = false;

        if self.eat(b':') {
            minute = self.digits(2)?;
            if self.eat(b':') {
                second = self.digits(2)?;
                has_seconds = true;
            }
        } else if self.peek_digit() {
            minute = self.digits(2)?;
            if self.peek_digit() {
                second = self.digits(2)?;
                has_seconds = true;
            }
        }

        if has_seconds && (self.eat(b'.') || self.eat(b',')) {
            nanos = self.fraction()?;
        }

        NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)
    }

    // 1 to 9 digits, as nanoseconds.
    fn fraction(&mut self) -> Option<u32> {
        let start = self.pos;
        while self.peek_digit() {
            self.pos += 1;
        }
        let len = self.pos - start;
        if len == 0 || len > 9 {
            return None;
        }
        let value = self.bytes[start..self.pos]
            .iter()
            .fold(0u32, |acc, byte| acc * 10 + u32::from(byte - b'0'));
        Some(value * 10u32.pow((9 - len) as u32))
    }

    fn offset(&mut self) -> Option<()> {
        if self.eat(b'Z') || self.eat(b'z') {
            return Some(());
        }
        if !(self.eat(b'+') || self.eat(b'-')) {
            return None;
        }
        let hours = self.digits(2)?;
        let mut minutes = 0;
        let mut seconds = 0;
        let extended = self.eat(b':');
        if extended || self.peek_digit() {
            minutes = self.digits(2)?;
            if (extended && self.eat(b':')) || (!extended && self.peek_digit()) {
                seconds = self.digits(2)?;
            }
        }
        (hours < 24 && minutes < 60 && seconds < 60).then_some(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn date_range_spans_three_days_each_side() {
        let range = date_range(ymd(2024, 3, 5));
        let expected: Vec<NaiveDate> = (2..=8).map(|day| ymd(2024, 3, day)).collect();
        assert_eq!(range, expected);
    }

    #[test]
    fn date_range_crosses_month_boundary() {
        let range = date_range(ymd(2024, 3, 1));
        assert_eq!(range.first(), Some(&ymd(2024, 2, 27)));
        assert_eq!(range.last(), Some(&ymd(2024, 3, 4)));
        assert_eq!(range.len(), 7);
    }

    #[test]
    fn midnight_zeroes_time_of_day() {
        let value = ymd(2024, 3, 5).and_hms_milli_opt(17, 42, 9, 250).unwrap();
        assert_eq!(midnight(value), ymd(2024, 3, 5).and_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn same_day_instants_normalize_equal() {
        let morning = ymd(2024, 3, 5).and_hms_opt(6, 0, 0).unwrap();
        let night = ymd(2024, 3, 5).and_hms_opt(23, 59, 59).unwrap();
        assert_eq!(midnight(morning), midnight(night));
    }

    #[test]
    fn today_at_midnight_has_no_time_component() {
        let today = today_at_midnight();
        assert_eq!(today.time(), NaiveTime::MIN);
        assert_eq!(today.date(), Local::now().date_naive());
    }

    #[test]
    fn parses_date_and_datetime_forms() {
        let midnight_value = ymd(2024, 3, 5).and_hms_opt(0, 0, 0).unwrap();
        let afternoon = ymd(2024, 3, 5).and_hms_opt(14, 30, 0).unwrap();

        assert_eq!(parse_iso("2024-03-05"), Some(midnight_value));
        assert_eq!(parse_iso("20240305"), Some(midnight_value));
        assert_eq!(parse_iso("2024-03-05T14:30"), Some(afternoon));
        assert_eq!(parse_iso("2024-03-05 14:30:00"), Some(afternoon));
        assert_eq!(
            parse_iso("2024-03-05T14:30:00.125").map(|value| value.date()),
            Some(ymd(2024, 3, 5))
        );
        assert_eq!(parse_iso("2024-03-05T14:30:00+05:00"), Some(afternoon));
        assert_eq!(parse_iso("2024-03-05T14:30Z"), Some(afternoon));
        assert_eq!(parse_iso("2024-03-05T14:30+05:00"), Some(afternoon));
        assert_eq!(parse_iso("2024-03-05T14:30-0330"), Some(afternoon));
        assert_eq!(parse_iso("20240305T143000"), Some(afternoon));
        assert_eq!(parse_iso("20240305T1430"), Some(afternoon));
        assert_eq!(
            parse_iso("2024-03-05T14"),
            Some(ymd(2024, 3, 5).and_hms_opt(14, 0, 0).unwrap())
        );
        assert_eq!(
            parse_iso("2024-03-05T14:30:00,5"),
            Some(ymd(2024, 3, 5).and_hms_milli_opt(14, 30, 0, 500).unwrap())
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse_iso("not-a-date"), None);
        assert_eq!(parse_iso("2024-13-01"), None);
        assert_eq!(parse_iso("2024-02-30"), None);
        assert_eq!(parse_iso("05/03/2024"), None);
        assert_eq!(parse_iso("2024-3-5"), None);
        assert_eq!(parse_iso("2024-03-5"), None);
        assert_eq!(parse_iso("+262142-12-31"), None);
        assert_eq!(parse_iso("2024-03-05T"), None);
        assert_eq!(parse_iso("2024-03-05T25:00"), None);
        assert_eq!(parse_iso("2024-03-05T14:30+25:00"), None);
        assert_eq!(parse_iso("2024-03-05T14:30.5"), None);
        assert_eq!(parse_iso("2024-03-05T14:30:00 junk"), None);
        assert_eq!(parse_iso("2024-03-05é"), None);
    }

    #[test]
    fn date_range_stops_at_calendar_limits() {
        let last = date_range(NaiveDate::MAX);
        assert_eq!(last.len(), 4);
        assert_eq!(last.last(), Some(&NaiveDate::MAX));

        let first = date_range(NaiveDate::MIN);
        assert_eq!(first.len(), 4);
        assert_eq!(first.first(), Some(&NaiveDate::MIN));
    }

    #[test]
    fn parse_reports_fallback_reason() {
        assert_eq!(DateParse::parse(None), DateParse::Fallback(FallbackReason::Missing));
        assert_eq!(DateParse::parse(Some("")), DateParse::Fallback(FallbackReason::Missing));
        assert_eq!(
            DateParse::parse(Some("not-a-date")),
            DateParse::Fallback(FallbackReason::Malformed("not-a-date".to_string()))
        );
    }

    #[test]
    fn normalized_drops_time_of_day() {
        let parsed = DateParse::parse(Some("2024-03-05T23:10:00"));
        assert_eq!(
            parsed.normalized(),
            Some(ymd(2024, 3, 5).and_hms_opt(0, 0, 0).unwrap())
        );
        assert_eq!(DateParse::parse(Some("nope")).normalized(), None);
    }
}
