use thiserror::Error;

/// Failure to read a number out of a text fragment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("number '{0}' ends with a separator")]
    TrailingSeparator(String),

    #[error("'{0}' is not a number")]
    Invalid(String),
}

/// Failure to read a listing date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("unsupported locale '{0}' (set month_names)")]
    UnsupportedLocale(String),

    #[error("month_names needs 12 entries, got {0}")]
    MonthTable(usize),

    #[error("no month name in '{0}'")]
    NoMonth(String),

    #[error("'{text}' does not match '{format}'")]
    Pattern { text: String, format: String },
}

/// Extraction errors.
///
/// `StructureNotFound` and `NoItemsFound` are fatal for a document. Every
/// other variant concerns one listing node, which is dropped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
    #[error("results container not found")]
    StructureNotFound,

    #[error("results container holds no listing items")]
    NoItemsFound,

    #[error("title not found")]
    TitleNotFound,

    #[error("title is empty")]
    TitleEmpty,

    #[error("date not found")]
    DateNotFound,

    #[error("unrecognised date label classes: {0:?}")]
    DateFormatUnrecognized(Vec<String>),

    #[error("date unparseable: {0}")]
    DateUnparseable(#[from] DateError),

    #[error("price not found")]
    PriceNotFound,

    #[error("price unparseable: {0}")]
    PriceUnparseable(AmountError),

    #[error("shipping unparseable: {0}")]
    ShippingNotFound(AmountError),

    #[error("sold status not found")]
    SoldStatusNotFound,

    #[error("sold status ambiguous: {0:?}")]
    SoldStatusAmbiguous(Vec<String>),
}

impl ExtractError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::StructureNotFound | Self::NoItemsFound)
    }
}

pub type ExtractResult<T> = Result<T, ExtractError>;
