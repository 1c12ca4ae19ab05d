//! Record file persistence: a JSON array of records, plus CSV export.

use crate::models::{record_date, Record};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All stored records; an absent file holds none.
    pub fn load(&self) -> Result<Vec<Record>> {
        if !self.path.exists() {
            return Ok(vec![]);
        }
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open {:?}", self.path))?;
        let records: Vec<Record> = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Invalid record file {:?}", self.path))?;
        Ok(records)
    }

    /// Write `records`, replacing the file or appending to what it already holds.
    /// Returns the number of records in the file afterwards.
    pub fn save(&self, records: &[Record], overwrite: bool) -> Result<usize> {
        let mut all = if overwrite { vec![] } else { self.load()? };
        all.extend_from_slice(records);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Could not create dir {:?}", parent))?;
        }

        let file = File::create(&self.path)
            .with_context(|| format!("Failed to create {:?}", self.path))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &all).context("Failed to encode records")?;
        writer.flush()?;

        info!("{} records written to {:?}", all.len(), self.path);
        Ok(all.len())
    }
}

/// `title,date,price,shipping,sold` with the persisted date format.
pub fn export_csv(path: &Path, records: &[Record]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {:?}", path))?;
    writer.write_record(["title", "date", "price", "shipping", "sold"])?;

    for r in records {
        writer.write_record([
            r.title.clone(),
            r.date.format(record_date::FORMAT).to_string(),
            r.price.to_string(),
            r.shipping.to_string(),
            r.sold.to_string(),
        ])?;
    }

    writer.flush()?;
    info!("{} records exported to {:?}", records.len(), path);
    Ok(())
}
