use super::date_key::DateKey;
use chrono::{Datelike, NaiveDate};

/// Column labels, Sunday first
pub const WEEKDAY_LABELS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// One row of the month grid; `None` cells are padding outside the month
pub type Week = [Option<DateKey>; 7];

/// The month currently shown in the calendar pane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthView {
    pub year: i32,
    /// 1-based month
    pub month: u32,
}

impl MonthView {
    pub fn containing(date: DateKey) -> Self {
        let d = date.date();
        Self {
            year: d.year(),
            month: d.month(),
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    pub fn first_day(&self) -> DateKey {
        // Every (year, month) reachable from a valid date has a day 1
        DateKey::new(NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default())
    }

    pub fn days_in_month(&self) -> u32 {
        let next = self.next();
        NaiveDate::from_ymd_opt(next.year, next.month, 1)
            .and_then(|d| d.pred_opt())
            .map(|d| d.day())
            .unwrap_or(28)
    }

    pub fn contains(&self, date: DateKey) -> bool {
        let d = date.date();
        d.year() == self.year && d.month() == self.month
    }

    /// Title like "October 2026"
    pub fn title(&self) -> String {
        self.first_day().date().format("%B %Y").to_string()
    }

    /// Sunday-first grid of weeks covering the whole month
    pub fn weeks(&self) -> Vec<Week> {
        let first = self.first_day().date();
        let leading = first.weekday().num_days_from_sunday() as usize;
        let days = self.days_in_month() as usize;

        let mut cells: Vec<Option<DateKey>> = vec![None; leading];
        for day in 1..=days {
            cells.push(
                NaiveDate::from_ymd_opt(self.year, self.month, day as u32).map(DateKey::new),
            );
        }
        while cells.len() % 7 != 0 {
            cells.push(None);
        }

        cells
            .chunks(7)
            .map(|chunk| {
                let mut week: Week = [None; 7];
                week.copy_from_slice(chunk);
                week
            })
            .collect()
    }
}
