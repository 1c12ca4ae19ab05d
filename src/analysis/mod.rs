//! Statistics over stored records: price filters, averages, and grouping by
//! weekday or calendar day.

use crate::models::Record;
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeMap;

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[derive(Debug, Clone, Default)]
pub struct Analysis {
    records: Vec<Record>,
}

impl Analysis {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Remove records whose total price is below `min_total`; returns how many went.
    pub fn drop_below(&mut self, min_total: f64) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.total_price() >= min_total);
        before - self.records.len()
    }

    /// Remove records whose total price is above `max_total`; returns how many went.
    pub fn drop_above(&mut self, max_total: f64) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.total_price() <= max_total);
        before - self.records.len()
    }

    fn average(&self, f: impl Fn(&Record) -> f64) -> Option<f64> {
        if self.records.is_empty() {
            return None;
        }
        Some(self.records.iter().map(f).sum::<f64>() / self.records.len() as f64)
    }

    pub fn average_price(&self) -> Option<f64> {
        self.average(|r| r.price)
    }

    pub fn average_shipping(&self) -> Option<f64> {
        self.average(|r| r.shipping)
    }

    pub fn average_total(&self) -> Option<f64> {
        self.average(Record::total_price)
    }

    /// Seven buckets, Monday first.
    pub fn by_weekday(&self) -> [Analysis; 7] {
        let mut buckets: [Analysis; 7] = Default::default();
        for r in &self.records {
            let i = r.date.weekday().num_days_from_monday() as usize;
            buckets[i].records.push(r.clone());
        }
        buckets
    }

    pub fn by_day(&self) -> BTreeMap<NaiveDate, Analysis> {
        let mut days: BTreeMap<NaiveDate, Analysis> = BTreeMap::new();
        for r in &self.records {
            days.entry(r.date).or_default().records.push(r.clone());
        }
        days
    }

    /// Per-weekday deviation from the overall average, in percent.
    pub fn weekday_report(&self) -> Vec<WeekdayRow> {
        let overall_total = self.average_total();
        let per_day = self.records.len() as f64 / 7.0;

        WEEKDAYS
            .iter()
            .zip(self.by_weekday())
            .map(|(day, bucket)| {
                let average_total = bucket.average_total();
                WeekdayRow {
                    weekday: *day,
                    count: bucket.len(),
                    average_total,
                    count_deviation_pct: (per_day > 0.0)
                        .then(|| round2((bucket.len() as f64 / per_day - 1.0) * 100.0)),
                    price_deviation_pct: match (average_total, overall_total) {
                        (Some(a), Some(o)) if o != 0.0 => Some(round2((a / o - 1.0) * 100.0)),
                        _ => None,
                    },
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekdayRow {
    pub weekday: Weekday,
    pub count: usize,
    pub average_total: Option<f64>,
    pub count_deviation_pct: Option<f64>,
    pub price_deviation_pct: Option<f64>,
}

pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
