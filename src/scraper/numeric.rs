//! Amounts written with locale-dependent separators.

use super::error::AmountError;

fn is_separator(c: char) -> bool {
    c == ',' || c == '.'
}

/// Read the first number in `text`.
///
/// The number starts at the first ASCII digit and runs over digits, `,` and
/// `.`. A single separator is the decimal point; with several, the last one is
/// the decimal point and the others group digits.
///
/// "EUR 1.234,56" → Some(1234.56) | "12,99 €" → Some(12.99) | "Gratis" → None
pub fn scan_amount(text: &str) -> Result<Option<f64>, AmountError> {
    let run: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit() || is_separator(*c))
        .collect();

    if run.is_empty() {
        return Ok(None);
    }
    if run.ends_with(is_separator) {
        return Err(AmountError::TrailingSeparator(run));
    }

    let normalised = run.replace(',', ".");
    let number = match normalised.rsplit_once('.') {
        Some((whole, fraction)) => format!("{}.{}", whole.replace('.', ""), fraction),
        None => normalised,
    };

    match number.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(AmountError::Invalid(run)),
    }
}

/// Like [`scan_amount`], but text without digits reads as zero.
pub fn parse_amount(text: &str) -> Result<f64, AmountError> {
    Ok(scan_amount(text)?.unwrap_or(0.0))
}
