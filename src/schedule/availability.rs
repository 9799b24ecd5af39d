use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::schedule;

/// The calendar a schedule is valid for.
///
/// Exception dates only decide whether the schedule runs on a given day;
/// they never influence how its trips are generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    weekdays: BTreeSet<u8>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    exception_dates: BTreeSet<NaiveDate>,
}

impl Availability {
    pub fn builder() -> AvailabilityBuilder {
        AvailabilityBuilder::default()
    }

    /// Monday to Friday between the two dates, both included.
    pub fn working_days(from: NaiveDate, to: NaiveDate) -> Result<Self, schedule::Error> {
        Self::builder()
            .from(from)
            .to(to)
            .on(Weekday::Mon)
            .on(Weekday::Tue)
            .on(Weekday::Wed)
            .on(Weekday::Thu)
            .on(Weekday::Fri)
            .build()
    }

    pub fn weekend_days(from: NaiveDate, to: NaiveDate) -> Result<Self, schedule::Error> {
        Self::builder()
            .from(from)
            .to(to)
            .on(Weekday::Sat)
            .on(Weekday::Sun)
            .build()
    }

    /// Weekdays in calendar order, Monday first.
    pub fn weekdays(&self) -> Vec<Weekday> {
        self.weekdays
            .iter()
            .filter_map(|&day| Weekday::try_from(day).ok())
            .collect()
    }

    pub fn runs_on(&self, weekday: Weekday) -> bool {
        self.weekdays.contains(&day_index(weekday))
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn exception_dates(&self) -> impl Iterator<Item = &NaiveDate> {
        self.exception_dates.iter()
    }

    pub fn is_exception(&self, date: NaiveDate) -> bool {
        self.exception_dates.contains(&date)
    }

    /// Whether a schedule with this availability is in service on `date`.
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        date >= self.start_date
            && date <= self.end_date
            && self.runs_on(date.weekday())
            && !self.is_exception(date)
    }
}

/// Monday is 0, matching `Weekday::try_from(u8)`.
fn day_index(weekday: Weekday) -> u8 {
    weekday.num_days_from_monday() as u8
}

#[derive(Debug, Clone, Default)]
pub struct AvailabilityBuilder {
    weekdays: BTreeSet<u8>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    exception_dates: BTreeSet<NaiveDate>,
}

impl AvailabilityBuilder {
    pub fn from(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn to(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    pub fn on(mut self, weekday: Weekday) -> Self {
        self.weekdays.insert(day_index(weekday));
        self
    }

    pub fn not_on(mut self, weekday: Weekday) -> Self {
        self.weekdays.remove(&day_index(weekday));
        self
    }

    pub fn weekdays(mut self, weekdays: impl IntoIterator<Item = Weekday>) -> Self {
        self.weekdays
            .extend(weekdays.into_iter().map(day_index));
        self
    }

    pub fn exception_dates(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.exception_dates.extend(dates);
        self
    }

    pub fn build(self) -> Result<Availability, schedule::Error> {
        if self.weekdays.is_empty() {
            return Err(schedule::Error::NoWeekdays);
        }
        let start_date = self.start_date.ok_or(schedule::Error::MissingDate("start"))?;
        let end_date = self.end_date.ok_or(schedule::Error::MissingDate("end"))?;
        if end_date < start_date {
            return Err(schedule::Error::EndBeforeStart);
        }
        Ok(Availability {
            weekdays: self.weekdays,
            start_date,
            end_date,
            exception_dates: self.exception_dates,
        })
    }
}
