use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::models::{Workout, WorkoutWithExercise};

/// Anything listed in the dated history.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl Dated for Workout {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for WorkoutWithExercise {
    fn date(&self) -> NaiveDate {
        self.workout.date
    }
}

impl<T: Dated> Dated for &T {
    fn date(&self) -> NaiveDate {
        T::date(*self)
    }
}

pub type DateGroups<T> = BTreeMap<NaiveDate, Vec<T>>;

/// Bucket items by date. Items keep their input order inside each bucket.
pub fn group_by_date<T: Dated>(items: impl IntoIterator<Item = T>) -> DateGroups<T> {
    let mut groups: DateGroups<T> = BTreeMap::new();
    for item in items {
        groups.entry(item.date()).or_default().push(item);
    }
    groups
}

/// Group dates, most recent first.
pub fn sorted_date_keys_descending<T>(groups: &DateGroups<T>) -> Vec<NaiveDate> {
    groups.keys().rev().copied().collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLabel {
    Today,
    Yesterday,
    MonthDay { month: u32, day: u32 },
}

impl fmt::Display for DateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateLabel::Today => f.write_str("今天"),
            DateLabel::Yesterday => f.write_str("昨天"),
            DateLabel::MonthDay { month, day } => write!(f, "{}月{}日", month, day),
        }
    }
}

/// Heading for a history group relative to `today`.
pub fn date_label(date: NaiveDate, today: NaiveDate) -> DateLabel {
    if date == today {
        DateLabel::Today
    } else if today.pred_opt() == Some(date) {
        DateLabel::Yesterday
    } else {
        DateLabel::MonthDay {
            month: date.month(),
            day: date.day(),
        }
    }
}
