//! Per-listing field extraction.

use super::error::{DateError, ExtractError, ExtractResult};
use super::locale::LocaleDates;
use super::matcher::{
    class_list, find_first, find_map_first, first_child_element, text_of, ClassMatcher, Tag,
};
use super::numeric::{parse_amount, scan_amount};
use crate::config::{LocaleConfig, MarkupConfig};
use chrono::NaiveDate;
use scraper::ElementRef;

/// Sold/ended state carried by a status marker's class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Sold,
    Ended,
}

#[derive(Debug, Clone)]
pub struct FieldExtractors {
    title: ClassMatcher,
    tagblock: ClassMatcher,
    price: ClassMatcher,
    shipping: ClassMatcher,
    positive: String,
    negative: String,
    sold_label: String,
    ended_label: String,
    dates: LocaleDates,
}

impl FieldExtractors {
    pub fn new(markup: &MarkupConfig, locale: &LocaleConfig) -> Result<Self, DateError> {
        Ok(Self {
            title: ClassMatcher::new("h3", &markup.title_class),
            tagblock: ClassMatcher::new("div", &markup.tagblock_class),
            price: ClassMatcher::new("span", &markup.price_class),
            shipping: ClassMatcher::new("span", &markup.shipping_class),
            positive: markup.positive_class.clone(),
            negative: markup.negative_class.clone(),
            sold_label: locale.sold_label.clone(),
            ended_label: locale.ended_label.clone(),
            dates: LocaleDates::from_config(locale)?,
        })
    }

    fn status(&self, marker: &ElementRef<'_>) -> Result<Status, Vec<String>> {
        let classes = class_list(marker);
        if classes.contains(&self.positive) {
            Ok(Status::Sold)
        } else if classes.contains(&self.negative) {
            Ok(Status::Ended)
        } else {
            Err(classes)
        }
    }

    pub fn title(&self, item: ElementRef<'_>) -> ExtractResult<String> {
        let heading = find_first(item, &self.title).ok_or(ExtractError::TitleNotFound)?;
        let title = text_of(&heading);
        if title.is_empty() {
            return Err(ExtractError::TitleEmpty);
        }
        Ok(title)
    }

    /// Date from the status label in the title tag block, e.g. "Verkauft 03. Jän 2023".
    pub fn date(&self, item: ElementRef<'_>) -> ExtractResult<NaiveDate> {
        let (status, label) = find_map_first(item, &self.tagblock, |block| {
            let marker = first_child_element(block)?;
            Some((self.status(&marker), text_of(&marker)))
        })
        .ok_or(ExtractError::DateNotFound)?;

        let prefix = match status {
            Ok(Status::Sold) => &self.sold_label,
            Ok(Status::Ended) => &self.ended_label,
            Err(classes) => return Err(ExtractError::DateFormatUnrecognized(classes)),
        };
        let text = label.strip_prefix(prefix.as_str()).unwrap_or(&label);

        Ok(self.dates.parse(text)?)
    }

    pub fn price(&self, item: ElementRef<'_>) -> ExtractResult<f64> {
        let text = find_map_first(item, &self.price, |node| {
            find_first(node, &Tag("span")).map(|value| text_of(&value))
        })
        .ok_or(ExtractError::PriceNotFound)?;

        match scan_amount(&text) {
            Ok(Some(price)) => Ok(price),
            Ok(None) => Err(ExtractError::PriceNotFound),
            Err(e) => Err(ExtractError::PriceUnparseable(e)),
        }
    }

    /// Zero when the listing advertises no shipping at all.
    pub fn shipping(&self, item: ElementRef<'_>) -> ExtractResult<f64> {
        match find_first(item, &self.shipping) {
            None => Ok(0.0),
            Some(node) => parse_amount(&text_of(&node)).map_err(ExtractError::ShippingNotFound),
        }
    }

    /// Sold flag from the status marker opening the price node.
    pub fn sold(&self, item: ElementRef<'_>) -> ExtractResult<bool> {
        let status = find_map_first(item, &self.price, |node| {
            first_child_element(node).map(|marker| self.status(&marker))
        })
        .ok_or(ExtractError::SoldStatusNotFound)?;

        match status {
            Ok(status) => Ok(status == Status::Sold),
            Err(classes) => Err(ExtractError::SoldStatusAmbiguous(classes)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::error::AmountError;
    use scraper::{Html, Selector};

    fn extractors() -> FieldExtractors {
        FieldExtractors::new(&MarkupConfig::default(), &LocaleConfig::default()).unwrap()
    }

    fn with_item<T>(body: &str, f: impl FnOnce(ElementRef<'_>) -> T) -> T {
        let doc = Html::parse_fragment(&format!(r#"<ul><li class="s-item">{}</li></ul>"#, body));
        let sel = Selector::parse("li.s-item").unwrap();
        f(doc.select(&sel).next().unwrap())
    }

    #[test]
    fn test_title() {
        let ex = extractors();
        let title = with_item(
            r#"<h3 class="other">Ad</h3><h3 class="s-item__title"><span>NEU</span> Vintage Chair</h3>"#,
            |item| ex.title(item),
        );
        assert_eq!(title.unwrap(), "NEU Vintage Chair");
    }

    #[test]
    fn test_title_missing_vs_empty() {
        let ex = extractors();
        assert_eq!(
            with_item(r#"<h3>Chair</h3>"#, |item| ex.title(item)),
            Err(ExtractError::TitleNotFound)
        );
        assert_eq!(
            with_item(r#"<h3 class="s-item__title">  </h3>"#, |item| ex.title(item)),
            Err(ExtractError::TitleEmpty)
        );
    }

    #[test]
    fn test_sold_date() {
        let ex = extractors();
        let date = with_item(
            r#"<div class="s-item__title--tagblock"><span class="POSITIVE">Verkauft  03. Jän 2023</span></div>"#,
            |item| ex.date(item),
        );
        assert_eq!(date.unwrap(), NaiveDate::from_ymd_opt(2023, 1, 3).unwrap());
    }

    #[test]
    fn test_ended_date() {
        let ex = extractors();
        let date = with_item(
            r#"<div class="s-item__title--tagblock"><span class="NEGATIVE">Beendet 28. Feb 2023</span></div>"#,
            |item| ex.date(item),
        );
        assert_eq!(date.unwrap(), NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());
    }

    #[test]
    fn test_date_errors() {
        let ex = extractors();
        assert_eq!(
            with_item(r#"<div class="s-item__info">x</div>"#, |item| ex.date(item)),
            Err(ExtractError::DateNotFound)
        );
        assert_eq!(
            with_item(
                r#"<div class="s-item__title--tagblock"><span class="BOLD">Verkauft 03. Jän 2023</span></div>"#,
                |item| ex.date(item)
            ),
            Err(ExtractError::DateFormatUnrecognized(vec!["BOLD".into()]))
        );
        assert!(matches!(
            with_item(
                r#"<div class="s-item__title--tagblock"><span class="POSITIVE">Verkauft gestern</span></div>"#,
                |item| ex.date(item)
            ),
            Err(ExtractError::DateUnparseable(_))
        ));
    }

    #[test]
    fn test_tagblock_without_marker_is_skipped() {
        let ex = extractors();
        let date = with_item(
            r#"<div class="s-item__title--tagblock">text first</div>
               <div class="s-item__title--tagblock"><span class="NEGATIVE">Beendet 1. Mai 2022</span></div>"#,
            |item| ex.date(item),
        );
        assert_eq!(date.unwrap(), NaiveDate::from_ymd_opt(2022, 5, 1).unwrap());
    }

    #[test]
    fn test_price() {
        let ex = extractors();
        let price = with_item(
            r#"<span class="s-item__price"><span class="POSITIVE">EUR 1.234,56</span></span>"#,
            |item| ex.price(item),
        );
        assert_eq!(price, Ok(1234.56));
    }

    #[test]
    fn test_price_errors() {
        let ex = extractors();
        assert_eq!(
            with_item(r#"<span class="s-item__price">EUR 12,00</span>"#, |item| ex.price(item)),
            Err(ExtractError::PriceNotFound)
        );
        assert_eq!(
            with_item(
                r#"<span class="s-item__price"><span class="POSITIVE">Preis auf Anfrage</span></span>"#,
                |item| ex.price(item)
            ),
            Err(ExtractError::PriceNotFound)
        );
        assert_eq!(
            with_item(
                r#"<span class="s-item__price"><span class="POSITIVE">EUR 12,</span></span>"#,
                |item| ex.price(item)
            ),
            Err(ExtractError::PriceUnparseable(AmountError::TrailingSeparator(
                "12,".into()
            )))
        );
    }

    #[test]
    fn test_shipping() {
        let ex = extractors();
        assert_eq!(with_item("", |item| ex.shipping(item)), Ok(0.0));
        assert_eq!(
            with_item(
                r#"<span class="s-item__shipping s-item__logisticsCost">+EUR 4,99 Versand</span>"#,
                |item| ex.shipping(item)
            ),
            Ok(4.99)
        );
        assert_eq!(
            with_item(
                r#"<span class="s-item__shipping">Kostenloser Versand</span>"#,
                |item| ex.shipping(item)
            ),
            Ok(0.0)
        );
        assert!(matches!(
            with_item(
                r#"<span class="s-item__shipping">+EUR 4. Versand</span>"#,
                |item| ex.shipping(item)
            ),
            Err(ExtractError::ShippingNotFound(_))
        ));
    }

    #[test]
    fn test_sold_status() {
        let ex = extractors();
        let sold = |class: &str| {
            with_item(
                &format!(r#"<span class="s-item__price"><span class="{}">EUR 5</span></span>"#, class),
                |item| ex.sold(item),
            )
        };
        assert_eq!(sold("POSITIVE"), Ok(true));
        assert_eq!(sold("NEGATIVE"), Ok(false));
        assert_eq!(
            sold("STRIKETHROUGH"),
            Err(ExtractError::SoldStatusAmbiguous(vec!["STRIKETHROUGH".into()]))
        );
        assert_eq!(
            with_item(r#"<span class="s-item__price">EUR 5</span>"#, |item| ex.sold(item)),
            Err(ExtractError::SoldStatusNotFound)
        );
    }
}
