//! Listing dates written with localised month names.

use super::error::DateError;
use crate::config::LocaleConfig;
use chrono::NaiveDate;

const GERMAN_MONTHS: [&str; 12] = [
    "Jan|Jän|Januar|Jänner",
    "Feb|Februar",
    "Mär|Mrz|März",
    "Apr|April",
    "Mai",
    "Jun|Juni",
    "Jul|Juli",
    "Aug|August",
    "Sep|Sept|September",
    "Okt|Oktober",
    "Nov|November",
    "Dez|Dezember",
];

const ENGLISH_MONTHS: [&str; 12] = [
    "Jan|January",
    "Feb|February",
    "Mar|March",
    "Apr|April",
    "May",
    "Jun|June",
    "Jul|July",
    "Aug|August",
    "Sep|Sept|September",
    "Oct|October",
    "Nov|November",
    "Dec|December",
];

/// Date reader for one locale.
///
/// Month tokens (`%b`, `%B`) in the pattern are resolved against the locale's
/// month table before the rest of the pattern goes to chrono.
#[derive(Debug, Clone)]
pub struct LocaleDates {
    months: Vec<Vec<String>>,
    format: String,
    has_month_name: bool,
}

impl LocaleDates {
    pub fn from_config(cfg: &LocaleConfig) -> Result<Self, DateError> {
        let table: Vec<String> = match &cfg.month_names {
            Some(names) => names.clone(),
            None => builtin_months(&cfg.locale)
                .ok_or_else(|| DateError::UnsupportedLocale(cfg.locale.clone()))?
                .iter()
                .map(|s| s.to_string())
                .collect(),
        };
        if table.len() != 12 {
            return Err(DateError::MonthTable(table.len()));
        }

        let months = table
            .iter()
            .map(|aliases| {
                aliases
                    .split('|')
                    .map(|a| a.trim().to_lowercase())
                    .filter(|a| !a.is_empty())
                    .collect()
            })
            .collect();

        let has_month_name = cfg.date_format.contains("%b") || cfg.date_format.contains("%B");
        let format = cfg.date_format.replace("%b", "%m").replace("%B", "%m");

        Ok(Self {
            months,
            format,
            has_month_name,
        })
    }

    /// 1-based month number for a localised name; case and a trailing `.` are ignored.
    pub fn month_number(&self, name: &str) -> Option<u32> {
        let needle = name.trim_end_matches('.').to_lowercase();
        self.months
            .iter()
            .position(|aliases| aliases.iter().any(|a| *a == needle))
            .map(|i| i as u32 + 1)
    }

    pub fn parse(&self, text: &str) -> Result<NaiveDate, DateError> {
        let text = text.trim();
        let numeric = if self.has_month_name {
            self.replace_month(text)?
        } else {
            text.to_string()
        };

        NaiveDate::parse_from_str(&numeric, &self.format).map_err(|_| DateError::Pattern {
            text: text.to_string(),
            format: self.format.clone(),
        })
    }

    /// Replace the first run of letters naming a month with its number.
    fn replace_month(&self, text: &str) -> Result<String, DateError> {
        let mut start = None;
        for (i, c) in text.char_indices().chain([(text.len(), ' ')]) {
            if c.is_alphabetic() {
                start.get_or_insert(i);
            } else if let Some(s) = start.take() {
                if let Some(month) = self.month_number(&text[s..i]) {
                    return Ok(format!("{}{:02}{}", &text[..s], month, &text[i..]));
                }
            }
        }
        Err(DateError::NoMonth(text.to_string()))
    }
}

fn builtin_months(locale: &str) -> Option<&'static [&'static str; 12]> {
    let language = locale
        .split(['_', '-', '.'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match language.as_str() {
        "de" => Some(&GERMAN_MONTHS),
        "en" => Some(&ENGLISH_MONTHS),
        _ => None,
    }
}
