pub mod error;
pub mod fields;
pub mod locale;
pub mod locator;
pub mod matcher;
pub mod numeric;

use crate::config::{LocaleConfig, MarkupConfig};
use crate::models::Record;
use scraper::{ElementRef, Html};
use tracing::debug;

use self::error::{DateError, ExtractResult};
use self::fields::FieldExtractors;
use self::locator::ListingLocator;

// ── Document parser ───────────────────────────────────────────────────────────

/// Turns one saved results page into records.
///
/// Built once per run from a single locale; every document it parses is read
/// with that locale's labels and month names.
#[derive(Debug, Clone)]
pub struct DocumentParser {
    locator: ListingLocator,
    fields: FieldExtractors,
}

impl DocumentParser {
    pub fn new(markup: &MarkupConfig, locale: &LocaleConfig) -> Result<Self, DateError> {
        Ok(Self {
            locator: ListingLocator::new(markup),
            fields: FieldExtractors::new(markup, locale)?,
        })
    }

    /// Records in listing order. A listing with any unreadable field is
    /// dropped; only a missing container or an empty one fails the document.
    pub fn parse_document(&self, html: &str) -> ExtractResult<Vec<Record>> {
        let doc = Html::parse_document(html);
        let items = self.locator.items(&doc)?;
        let total = items.len();

        let records: Vec<Record> = items
            .into_iter()
            .enumerate()
            .filter_map(|(i, item)| match self.parse_item(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    debug!("Listing {} dropped: {}", i, e);
                    None
                }
            })
            .collect();

        debug!("Parsed {}/{} listings", records.len(), total);
        Ok(records)
    }

    pub fn parse_item(&self, item: ElementRef<'_>) -> ExtractResult<Record> {
        let title = self.fields.title(item)?;
        let date = self.fields.date(item)?;
        let price = self.fields.price(item)?;
        let shipping = self.fields.shipping(item)?;
        let sold = self.fields.sold(item)?;

        Ok(Record {
            title,
            date,
            price,
            shipping,
            sold,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::error::ExtractError;
    use super::*;
    use chrono::NaiveDate;

    fn parser() -> DocumentParser {
        DocumentParser::new(&MarkupConfig::default(), &LocaleConfig::default()).unwrap()
    }

    fn listing(title: &str, status: &str, label: &str, price: &str, shipping: Option<&str>) -> String {
        let shipping = shipping
            .map(|s| format!(r#"<span class="s-item__shipping s-item__logisticsCost">{}</span>"#, s))
            .unwrap_or_default();
        format!(
            r#"<li class="s-item s-item__pl-on-bottom">
              <div class="s-item__wrapper clearfix">
                <div class="s-item__info clearfix">
                  <div class="s-item__title--tag"><div class="s-item__title--tagblock"><span class="{status}">{label}</span></div></div>
                  <a class="s-item__link"><h3 class="s-item__title">{title}</h3></a>
                  <div class="s-item__details clearfix">
                    <div class="s-item__detail"><span class="s-item__price"><span class="{status}">{price}</span></span></div>
                    <div class="s-item__detail">{shipping}</div>
                  </div>
                </div>
              </div>
            </li>"#
        )
    }

    fn page(items: &[String]) -> String {
        format!(
            r#"<!DOCTYPE html><html><head><title>Suche</title></head><body>
            <div id="srp-river-results"><ul class="srp-results srp-list clearfix">
            <li class="srp-river-answer">Ergebnisse</li>
            {}
            </ul></div></body></html>"#,
            items.join("\n")
        )
    }

    #[test]
    fn test_sold_listing_without_shipping() {
        let html = page(&[listing(
            "Vintage Chair",
            "POSITIVE",
            "Verkauft 03. Jän 2023",
            "120,00 €",
            None,
        )]);
        let records = parser().parse_document(&html).unwrap();
        assert_eq!(
            records,
            vec![Record {
                title: "Vintage Chair".into(),
                date: NaiveDate::from_ymd_opt(2023, 1, 3).unwrap(),
                price: 120.0,
                shipping: 0.0,
                sold: true,
            }]
        );
    }

    #[test]
    fn test_ended_listing_with_shipping() {
        let html = page(&[listing(
            "Eames Lounge",
            "NEGATIVE",
            "Beendet 14. Okt 2022",
            "EUR 1.499,00",
            Some("+EUR 39,90 Versand"),
        )]);
        let records = parser().parse_document(&html).unwrap();
        assert_eq!(records.len(), 1);
        assert!(!records[0].sold);
        assert_eq!(records[0].price, 1499.0);
        assert_eq!(records[0].shipping, 39.9);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2022, 10, 14).unwrap());
    }

    #[test]
    fn test_one_malformed_price_drops_one_listing() {
        let items: Vec<String> = (0..10)
            .map(|i| {
                let price = if i == 4 { "Preis auf Anfrage".to_string() } else { format!("{},50 €", 10 + i) };
                listing(&format!("Item {}", i), "POSITIVE", "Verkauft 2. Mär 2023", &price, None)
            })
            .collect();
        let records = parser().parse_document(&page(&items)).unwrap();
        assert_eq!(records.len(), 9);
        assert!(records.iter().all(|r| r.title != "Item 4"));
        assert_eq!(records[0].title, "Item 0");
        assert_eq!(records[8].title, "Item 9");
    }

    #[test]
    fn test_every_listing_malformed_is_empty_success() {
        let html = page(&[listing("", "POSITIVE", "Verkauft 2. Mär 2023", "5 €", None)]);
        assert!(parser().parse_document(&html).unwrap().is_empty());
    }

    #[test]
    fn test_container_without_items_is_fatal() {
        let html = page(&[]);
        let err = parser().parse_document(&html).unwrap_err();
        assert_eq!(err, ExtractError::NoItemsFound);
        assert!(err.is_fatal());
    }

    #[test]
    fn test_unrelated_page_is_fatal() {
        let err = parser()
            .parse_document("<html><body><p>Keine Treffer</p></body></html>")
            .unwrap_err();
        assert_eq!(err, ExtractError::StructureNotFound);
    }

    #[test]
    fn test_positive_marker_means_sold() {
        let items: Vec<String> = ["1", "2", "3"]
            .iter()
            .map(|d| listing("Lamp", "POSITIVE", &format!("Verkauft {}. Jun 2021", d), "9,99", None))
            .collect();
        let records = parser().parse_document(&page(&items)).unwrap();
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.sold));
    }

    #[test]
    fn test_unclosed_tags_are_tolerated() {
        let html = r#"<html><body><ul class="srp-results srp-list clearfix">
            <li class="s-item"><h3 class="s-item__title">Stool
            <div class="s-item__title--tagblock"><span class="POSITIVE">Verkauft 5. Apr 2023</span></div>
            <span class="s-item__price"><span class="POSITIVE">EUR 15,00</span>
            </li></ul>"#;
        let records = parser().parse_document(html).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].price, 15.0);
        assert!(records[0].title.starts_with("Stool"));
    }
}
