use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── Record ────────────────────────────────────────────────────────────────────

/// One sold or ended listing extracted from a results page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub title: String,
    #[serde(with = "record_date")]
    pub date: NaiveDate,
    pub price: f64,
    pub shipping: f64,
    pub sold: bool,
}

impl Record {
    pub fn total_price(&self) -> f64 {
        self.price + self.shipping
    }
}

// ── Persisted date format ─────────────────────────────────────────────────────

/// `DD MM YYYY`, e.g. "03 01 2023".
pub mod record_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%d %m %Y";

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDate::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
