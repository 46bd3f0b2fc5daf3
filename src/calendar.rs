//! Calendar selection of day schedules.
//!
//! The algorithms take whatever days they are given; these helpers decide
//! which days a report aggregates over.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::schedule::DaySchedule;

/// `true` for Monday through Friday.
pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// A weekday that is not one of `holidays`.
pub fn is_operating_day(date: NaiveDate, holidays: &[NaiveDate]) -> bool {
    is_weekday(date) && !holidays.contains(&date)
}

/// Full English weekday name, e.g. `"Monday"`.
pub fn weekday_name(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

/// `"YYYY-MM"` key used to group days by month.
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Schedules falling on operating days, in input order.
pub fn operating_days<'a, D>(
    schedules: &'a [DaySchedule<D>],
    holidays: &[NaiveDate],
) -> Vec<&'a DaySchedule<D>> {
    schedules
        .iter()
        .filter(|s| is_operating_day(s.day(), holidays))
        .collect()
}

/// Groups schedules by [`month_key`]; months come out in calendar order.
pub fn by_month<'a, D>(
    schedules: impl IntoIterator<Item = &'a DaySchedule<D>>,
) -> BTreeMap<String, Vec<&'a DaySchedule<D>>>
where
    D: 'a,
{
    let mut months: BTreeMap<String, Vec<&'a DaySchedule<D>>> = BTreeMap::new();
    for schedule in schedules {
        months.entry(month_key(schedule.day())).or_default().push(schedule);
    }
    months
}
