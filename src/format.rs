use chrono::{DateTime, Utc};

/// Relative age label, e.g. `42s ago`, `3h ago`, `2mo ago`.
///
/// Months are 30 days and years 12 months. Timestamps in the future count as
/// zero seconds.
pub fn time_ago(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - created_at).num_seconds().max(0);
    if seconds < 60 {
        return format!("{seconds}s ago");
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{minutes}m ago");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }

    let days = hours / 24;
    if days < 30 {
        return format!("{days}d ago");
    }

    let months = days / 30;
    if months < 12 {
        return format!("{months}mo ago");
    }

    format!("{}y ago", months / 12)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn ago(delta: Duration) -> String {
        let now = DateTime::from_timestamp(1_800_000_000, 0).unwrap();
        time_ago(now - delta, now)
    }

    #[test]
    fn buckets() {
        assert_eq!(ago(Duration::seconds(0)), "0s ago");
        assert_eq!(ago(Duration::seconds(59)), "59s ago");
        assert_eq!(ago(Duration::seconds(60)), "1m ago");
        assert_eq!(ago(Duration::minutes(59)), "59m ago");
        assert_eq!(ago(Duration::hours(1)), "1h ago");
        assert_eq!(ago(Duration::hours(23)), "23h ago");
        assert_eq!(ago(Duration::days(1)), "1d ago");
        assert_eq!(ago(Duration::days(29)), "29d ago");
        assert_eq!(ago(Duration::days(30)), "1mo ago");
        assert_eq!(ago(Duration::days(359)), "11mo ago");
        assert_eq!(ago(Duration::days(360)), "1y ago");
        assert_eq!(ago(Duration::days(800)), "2y ago");
    }

    #[test]
    fn sub_second_parts_are_floored() {
        assert_eq!(ago(Duration::milliseconds(61_999)), "1m ago");
    }

    #[test]
    fn future_timestamps_clamp_to_zero() {
        assert_eq!(ago(Duration::seconds(-30)), "0s ago");
    }
}
