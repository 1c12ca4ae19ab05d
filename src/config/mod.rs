use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub locale: LocaleConfig,
    #[serde(default)]
    pub markup: MarkupConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Locale used for status labels and listing dates.
///
/// One locale per run: every document handed to a parser built from this
/// value is read with the same labels and month names.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocaleConfig {
    #[serde(default = "default_locale")]
    pub locale: String,

    #[serde(default = "default_sold_label")]
    pub sold_label: String,

    #[serde(default = "default_ended_label")]
    pub ended_label: String,

    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Twelve entries, January first. Aliases for one month are separated by `|`.
    #[serde(default)]
    pub month_names: Option<Vec<String>>,
}

/// Marker classes and tags identifying the parts of a results page
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarkupConfig {
    #[serde(default = "default_container_tag")]
    pub container_tag: String,

    #[serde(default = "default_container_classes")]
    pub container_classes: Vec<String>,

    #[serde(default = "default_item_class")]
    pub item_class: String,

    #[serde(default = "default_title_class")]
    pub title_class: String,

    #[serde(default = "default_tagblock_class")]
    pub tagblock_class: String,

    #[serde(default = "default_price_class")]
    pub price_class: String,

    #[serde(default = "default_shipping_class")]
    pub shipping_class: String,

    #[serde(default = "default_positive_class")]
    pub positive_class: String,

    #[serde(default = "default_negative_class")]
    pub negative_class: String,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    #[serde(default = "default_true")]
    pub overwrite: bool,
}

/// Pipeline configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

/// Price filters applied before statistics are printed
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub min_total: Option<f64>,

    #[serde(default)]
    pub max_total: Option<f64>,
}

// ── Defaults ─────────────────────────────────────────────────────────────────

fn default_locale() -> String {
    "de_DE".to_string()
}
fn default_sold_label() -> String {
    "Verkauft".to_string()
}
fn default_ended_label() -> String {
    "Beendet".to_string()
}
fn default_date_format() -> String {
    "%d. %b %Y".to_string()
}
fn default_container_tag() -> String {
    "ul".to_string()
}
fn default_container_classes() -> Vec<String> {
    vec!["srp-results".into(), "srp-list".into(), "clearfix".into()]
}
fn default_item_class() -> String {
    "s-item".to_string()
}
fn default_title_class() -> String {
    "s-item__title".to_string()
}
fn default_tagblock_class() -> String {
    "s-item__title--tagblock".to_string()
}
fn default_price_class() -> String {
    "s-item__price".to_string()
}
fn default_shipping_class() -> String {
    "s-item__shipping".to_string()
}
fn default_positive_class() -> String {
    "POSITIVE".to_string()
}
fn default_negative_class() -> String {
    "NEGATIVE".to_string()
}
fn default_output_path() -> PathBuf {
    PathBuf::from("items.json")
}
fn default_true() -> bool {
    true
}
fn default_concurrency() -> usize {
    4
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            sold_label: default_sold_label(),
            ended_label: default_ended_label(),
            date_format: default_date_format(),
            month_names: None,
        }
    }
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            container_tag: default_container_tag(),
            container_classes: default_container_classes(),
            item_class: default_item_class(),
            title_class: default_title_class(),
            tagblock_class: default_tagblock_class(),
            price_class: default_price_class(),
            shipping_class: default_shipping_class(),
            positive_class: default_positive_class(),
            negative_class: default_negative_class(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            overwrite: true,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
        }
    }
}

// ── Loader ───────────────────────────────────────────────────────────────────

impl AppConfig {
    /// Load configuration from file + environment overrides
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let cfg = config::Config::builder()
            .add_source(
                config::File::with_name("config/default")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(
                config::File::with_name("config/local")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(config::Environment::with_prefix("SOLD").separator("__"))
            .build()?;

        let app_cfg: AppConfig = cfg.try_deserialize().unwrap_or_else(|e| {
            tracing::warn!("Invalid configuration ({}), using defaults", e);
            AppConfig::default()
        });
        Ok(app_cfg)
    }
}
