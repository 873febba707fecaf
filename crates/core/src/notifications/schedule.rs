//! Next-occurrence planning for reminder rules.
//!
//! Everything here is evaluated in the device zone: the rule's time of day is
//! device-local, and so are the calendar days it is attached to.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

use super::notifications_model::{NotificationRule, Recurrence};

/// How far ahead a custom weekday mask is searched.
const CUSTOM_LOOKAHEAD_DAYS: u64 = 15;

/// Upper bound for the daily/weekday scan; a full week always contains a hit.
const SCAN_DAYS: u64 = 8;

impl NotificationRule {
    /// Next instant this rule fires after `now`, or `None` if it never will
    /// (disabled rules and one-shot rules that already ran).
    pub fn next_occurrence(
        &self,
        last_run: Option<DateTime<Tz>>,
        now: DateTime<Tz>,
    ) -> Option<DateTime<Tz>> {
        if !self.enabled {
            return None;
        }
        next_occurrence(self.time_of_day, &self.recurrence, last_run, now)
    }
}

/// Plans the next run of a schedule given the previous run and the current
/// instant.
pub fn next_occurrence(
    time_of_day: NaiveTime,
    recurrence: &Recurrence,
    last_run: Option<DateTime<Tz>>,
    now: DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    let tz = now.timezone();
    let today = now.date_naive();
    let at = |date: NaiveDate| fire_at(&tz, date, time_of_day);

    match recurrence {
        Recurrence::Once => {
            if last_run.is_some() {
                return None;
            }
            at(today).filter(|candidate| *candidate > now)
        }
        Recurrence::Daily => {
            let start = start_date(last_run.as_ref(), today);
            scan(start, SCAN_DAYS, |date| at(date).filter(|c| *c > now))
        }
        Recurrence::WeekdayOnly => {
            let start = start_date(last_run.as_ref(), today);
            scan(start, SCAN_DAYS, |date| {
                at(date).filter(|c| *c > now && c.weekday().num_days_from_monday() < 5)
            })
        }
        Recurrence::EveryNDays { every_n } => {
            let step = Days::new(u64::from(*every_n));
            match last_run {
                None => at(today)
                    .filter(|c| *c > now)
                    .or_else(|| today.checked_add_days(step).and_then(at)),
                Some(last) => last.date_naive().checked_add_days(step).and_then(at),
            }
        }
        Recurrence::Custom { weekdays } => {
            let start = last_run
                .as_ref()
                .map(|last| last.date_naive())
                .unwrap_or(today);
            scan(start, CUSTOM_LOOKAHEAD_DAYS, |date| {
                at(date).filter(|c| *c > now && weekdays.contains(c.weekday()))
            })
        }
    }
}

/// Earlier days can never be after `now`, so scanning starts no earlier than today.
fn start_date(last_run: Option<&DateTime<Tz>>, today: NaiveDate) -> NaiveDate {
    last_run
        .map(|last| last.date_naive())
        .filter(|date| *date > today)
        .unwrap_or(today)
}

fn scan<F>(start: NaiveDate, days: u64, mut probe: F) -> Option<DateTime<Tz>>
where
    F: FnMut(NaiveDate) -> Option<DateTime<Tz>>,
{
    (0..days)
        .filter_map(|offset| start.checked_add_days(Days::new(offset)))
        .find_map(&mut probe)
}

/// Local wall-clock instant on `date`. Times skipped by a DST jump have no
/// instant and yield `None`.
fn fire_at(tz: &Tz, date: NaiveDate, time: NaiveTime) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&date.and_time(time)).earliest()
}
