//! Read-time expansion of recurring events.
//!
//! Expands a stored event into the bounded, ascending sequence of
//! occurrences returned to callers. Occurrences share the stored event's id
//! and differ only in their timestamps; they are never persisted.

use chrono::{Datelike, Duration, NaiveDate, Utc};

use crate::event::EventRecord;

/// Occurrences generated per recurrence kind.
pub const DAILY_OCCURRENCES: usize = 100;
pub const WEEKLY_OCCURRENCES: usize = 25;
pub const MONTHLY_OCCURRENCES: usize = 10;

/// The recurrence kinds the service understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recurrence {
    /// Single, non-recurring event.
    None,
    Daily,
    Weekly,
    Monthly,
}

impl Recurrence {
    /// Interpret a stored recurrence tag. Absent, empty and `"none"` all
    /// mean a single event; an unrecognized tag maps to no kind at all.
    pub fn parse(raw: Option<&str>) -> Option<Recurrence> {
        let raw = raw.unwrap_or("");
        if raw.is_empty() {
            return Some(Recurrence::None);
        }
        match raw.to_lowercase().as_str() {
            "none" => Some(Recurrence::None),
            "daily" => Some(Recurrence::Daily),
            "weekly" => Some(Recurrence::Weekly),
            "monthly" => Some(Recurrence::Monthly),
            _ => None,
        }
    }
}

/// Expand a stored event into its occurrence sequence.
///
/// A single event passes through unchanged; a recurring event produces a
/// fixed number of time-shifted copies; an unrecognized recurrence tag
/// yields no occurrences at all. Total over any stored event.
pub fn expand_event(event: &EventRecord) -> Vec<EventRecord> {
    match Recurrence::parse(event.recurrence.as_deref()) {
        None => Vec::new(),
        Some(Recurrence::None) => vec![event.clone()],
        Some(Recurrence::Daily) => shifted_by_days(event, 1, DAILY_OCCURRENCES),
        Some(Recurrence::Weekly) => shifted_by_days(event, 7, WEEKLY_OCCURRENCES),
        Some(Recurrence::Monthly) => shifted_by_months(event, MONTHLY_OCCURRENCES),
    }
}

/// Occurrence `i` shifts both timestamps by `step * i` days, preserving the
/// original duration.
fn shifted_by_days(event: &EventRecord, step: i64, count: usize) -> Vec<EventRecord> {
    (0..count)
        .map(|i| {
            let offset = Duration::days(step * i as i64);
            let mut occurrence = event.clone();
            occurrence.start_time = event.start_time + offset;
            occurrence.end_time = event.end_time + offset;
            occurrence
        })
        .collect()
}

/// Occurrence `i` advances the start month by `i` (rolling over into later
/// years) and keeps the original duration.
fn shifted_by_months(event: &EventRecord, count: usize) -> Vec<EventRecord> {
    let duration = event.end_time - event.start_time;

    (0..count)
        .map(|i| {
            let start = month_shifted(event.start_time, i as u32);
            let mut occurrence = event.clone();
            occurrence.start_time = start;
            occurrence.end_time = start + duration;
            occurrence
        })
        .collect()
}

/// Advance a timestamp by whole months, keeping day-of-month and
/// time-of-day. When the target month is shorter than the original
/// day-of-month, the day clamps to the last day of that month.
fn month_shifted(start: chrono::DateTime<Utc>, months: u32) -> chrono::DateTime<Utc> {
    let month_index = start.month0() + months;
    let year = start.year() + (month_index / 12) as i32;
    let month = month_index % 12 + 1;
    let day = start.day().min(days_in_month(year, month));

    // Valid by construction: the day is clamped to the month's length
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_time(start.time())
        .and_utc()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap()
        .pred_opt()
        .unwrap()
        .day()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::oid::ObjectId;
    use chrono::{DateTime, TimeZone};

    fn make_event(start: DateTime<Utc>, end: DateTime<Utc>) -> EventRecord {
        EventRecord {
            id: Some(ObjectId::new()),
            user_id: ObjectId::new(),
            title: "Test Event".to_string(),
            description: "".to_string(),
            start_time: start,
            end_time: end,
            event_type: "task".to_string(),
            color: "#007BFF".to_string(),
            recurrence: None,
        }
    }

    fn hour_event() -> EventRecord {
        make_event(
            Utc.with_ymd_and_hms(2024, 3, 20, 15, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 20, 16, 0, 0).unwrap(),
        )
    }

    #[test]
    fn parse_treats_absent_empty_and_none_as_single() {
        assert_eq!(Recurrence::parse(None), Some(Recurrence::None));
        assert_eq!(Recurrence::parse(Some("")), Some(Recurrence::None));
        assert_eq!(Recurrence::parse(Some("none")), Some(Recurrence::None));
        assert_eq!(Recurrence::parse(Some("NONE")), Some(Recurrence::None));
    }

    #[test]
    fn parse_is_case_insensitive_on_kinds() {
        assert_eq!(Recurrence::parse(Some("Daily")), Some(Recurrence::Daily));
        assert_eq!(Recurrence::parse(Some("WEEKLY")), Some(Recurrence::Weekly));
        assert_eq!(Recurrence::parse(Some("monthly")), Some(Recurrence::Monthly));
    }

    #[test]
    fn parse_rejects_unknown_tags() {
        assert_eq!(Recurrence::parse(Some("yearly")), None);
        assert_eq!(Recurrence::parse(Some("every other week")), None);
    }

    #[test]
    fn single_event_passes_through_unchanged() {
        let event = hour_event();
        assert_eq!(expand_event(&event), vec![event.clone()]);

        let mut tagged = event.clone();
        tagged.recurrence = Some("none".to_string());
        assert_eq!(expand_event(&tagged), vec![tagged.clone()]);
    }

    #[test]
    fn unrecognized_tag_yields_no_occurrences() {
        let mut event = hour_event();
        event.recurrence = Some("yearly".to_string());
        assert!(expand_event(&event).is_empty());
    }

    #[test]
    fn daily_shifts_both_timestamps_by_index_days() {
        let mut event = hour_event();
        event.recurrence = Some("daily".to_string());

        let occurrences = expand_event(&event);
        assert_eq!(occurrences.len(), DAILY_OCCURRENCES);

        for (i, occurrence) in occurrences.iter().enumerate() {
            let offset = Duration::days(i as i64);
            assert_eq!(occurrence.start_time, event.start_time + offset);
            assert_eq!(occurrence.end_time, event.end_time + offset);
            assert_eq!(occurrence.id, event.id);
            assert_eq!(occurrence.title, event.title);
        }
    }

    #[test]
    fn weekly_shifts_in_seven_day_steps() {
        let mut event = hour_event();
        event.recurrence = Some("weekly".to_string());

        let occurrences = expand_event(&event);
        assert_eq!(occurrences.len(), WEEKLY_OCCURRENCES);
        assert_eq!(
            occurrences[3].start_time,
            event.start_time + Duration::days(21)
        );
        assert_eq!(
            occurrences[24].end_time,
            event.end_time + Duration::days(7 * 24)
        );
    }

    #[test]
    fn monthly_rolls_over_into_the_next_year() {
        let mut event = make_event(
            Utc.with_ymd_and_hms(2024, 11, 15, 9, 30, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 11, 15, 10, 30, 0).unwrap(),
        );
        event.recurrence = Some("monthly".to_string());

        let occurrences = expand_event(&event);
        assert_eq!(occurrences.len(), MONTHLY_OCCURRENCES);
        assert_eq!(
            occurrences[3].start_time,
            Utc.with_ymd_and_hms(2025, 2, 15, 9, 30, 0).unwrap()
        );
        assert_eq!(
            occurrences[9].start_time,
            Utc.with_ymd_and_hms(2025, 8, 15, 9, 30, 0).unwrap()
        );
    }

    #[test]
    fn monthly_clamps_to_short_months() {
        let mut event = make_event(
            Utc.with_ymd_and_hms(2025, 1, 31, 12, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 1, 31, 13, 0, 0).unwrap(),
        );
        event.recurrence = Some("monthly".to_string());

        let occurrences = expand_event(&event);
        // February 2025 has 28 days, April 30
        assert_eq!(
            occurrences[1].start_time,
            Utc.with_ymd_and_hms(2025, 2, 28, 12, 0, 0).unwrap()
        );
        assert_eq!(
            occurrences[3].start_time,
            Utc.with_ymd_and_hms(2025, 4, 30, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn monthly_preserves_the_original_duration() {
        let mut event = make_event(
            Utc.with_ymd_and_hms(2024, 5, 10, 8, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 5, 10, 8, 45, 0).unwrap(),
        );
        event.recurrence = Some("monthly".to_string());

        for occurrence in expand_event(&event) {
            assert_eq!(
                occurrence.end_time - occurrence.start_time,
                Duration::minutes(45)
            );
        }
    }

    #[test]
    fn zero_duration_events_expand_to_zero_duration_occurrences() {
        let start = Utc.with_ymd_and_hms(2024, 3, 20, 15, 0, 0).unwrap();
        let mut event = make_event(start, start);
        event.recurrence = Some("daily".to_string());

        let occurrences = expand_event(&event);
        assert_eq!(occurrences.len(), DAILY_OCCURRENCES);
        assert!(occurrences.iter().all(|o| o.start_time == o.end_time));
    }

    #[test]
    fn daily_standup_scenario() {
        let mut event = make_event(
            Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 9, 15, 0).unwrap(),
        );
        event.title = "Standup".to_string();
        event.recurrence = Some("daily".to_string());

        let occurrences = expand_event(&event);
        assert_eq!(occurrences.len(), 100);
        assert_eq!(
            occurrences[4].start_time,
            Utc.with_ymd_and_hms(2024, 1, 5, 9, 0, 0).unwrap()
        );
        assert_eq!(
            occurrences[4].end_time,
            Utc.with_ymd_and_hms(2024, 1, 5, 9, 15, 0).unwrap()
        );
    }
}
