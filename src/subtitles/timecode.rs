//! Conversions between SRT timecodes, milliseconds, and player clock labels.

/// Parse a strict `HH:MM:SS,mmm` SRT timecode into milliseconds.
///
/// Both the hour and minute/second fields must be exactly two digits and the
/// millisecond field exactly three; anything else returns `None`. Surrounding
/// whitespace is tolerated.
pub fn parse_timecode(text: &str) -> Option<u64> {
    let text = text.trim();
    let (clock, millis) = text.split_once(',')?;
    if millis.len() != 3 || !millis.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut fields = clock.split(':');
    let hours = two_digit_field(fields.next()?)?;
    let minutes = two_digit_field(fields.next()?)?;
    let seconds = two_digit_field(fields.next()?)?;
    if fields.next().is_some() {
        return None;
    }

    let millis: u64 = millis.parse().ok()?;
    Some(((hours * 60 + minutes) * 60 + seconds) * 1000 + millis)
}

fn two_digit_field(field: &str) -> Option<u64> {
    if field.len() != 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Format a second offset as a player clock label.
///
/// Negative and NaN inputs are treated as zero. The hour block only appears
/// once the offset reaches a full hour: `05:07` vs `01:02:03`.
pub fn format_clock(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}
