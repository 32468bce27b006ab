//! Date range for filtering stored events.

use chrono::{DateTime, Utc};

/// Half-open query window over stored `start_time` values: `[from, to)`.
///
/// The window applies to the stored event only; occurrences generated from
/// a matching recurring event are not filtered against it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateRange {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        DateRange { from, to }
    }

    /// Whether a stored event's start falls inside the window.
    pub fn contains_start(&self, start: DateTime<Utc>) -> bool {
        self.from <= start && start < self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn window_is_half_open() {
        let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let range = DateRange::new(from, to);

        assert!(range.contains_start(from));
        assert!(range.contains_start(Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()));
        assert!(!range.contains_start(to));
        assert!(!range.contains_start(from - chrono::Duration::seconds(1)));
    }
}
