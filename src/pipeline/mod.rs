//! Pipeline orchestrator: ties loader → parser → storage together.
//!
//! Documents are parsed in parallel (bounded by `pipeline.concurrency`) but
//! their records are gathered in the order the paths were given. A document
//! whose results container is missing or empty is skipped and counted; it
//! never stops the batch.

use crate::config::AppConfig;
use crate::loader::load_document;
use crate::models::Record;
use crate::scraper::DocumentParser;
use crate::storage::RecordStore;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

pub struct Pipeline {
    config: AppConfig,
}

impl Pipeline {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse every document and return the records in input order.
    pub async fn collect(&self, paths: &[PathBuf]) -> Result<(Vec<Record>, PipelineStats)> {
        let parser = Arc::new(
            DocumentParser::new(&self.config.markup, &self.config.locale)
                .context("Failed to build document parser")?,
        );

        let sem = Arc::new(Semaphore::new(self.config.pipeline.concurrency.max(1)));
        let mut handles = Vec::new();

        for path in paths {
            let doc_path = path.clone();
            let parser = Arc::clone(&parser);
            let sem = Arc::clone(&sem);

            let handle = tokio::spawn(async move {
                let _permit = sem.acquire().await?;

                let parsed = tokio::task::spawn_blocking(move || -> Result<Option<Vec<Record>>> {
                    let Some(html) = load_document(&doc_path)? else {
                        return Ok(None);
                    };
                    match parser.parse_document(&html) {
                        Ok(records) => {
                            info!("{:?}: {} records", doc_path, records.len());
                            Ok(Some(records))
                        }
                        Err(e) if e.is_fatal() => {
                            warn!("{:?}: {} (skipped)", doc_path, e);
                            Ok(None)
                        }
                        Err(e) => Err(e).with_context(|| format!("{:?}", doc_path)),
                    }
                })
                .await??;

                Ok::<_, anyhow::Error>(parsed)
            });

            handles.push((path.clone(), handle));
        }

        let mut records = Vec::new();
        let mut stats = PipelineStats::default();

        for (path, handle) in handles {
            stats.documents += 1;
            match handle.await {
                Ok(Ok(Some(found))) => records.extend(found),
                Ok(Ok(None)) => stats.skipped += 1,
                Ok(Err(e)) => {
                    warn!("{:?}: {:#}", path, e);
                    stats.skipped += 1;
                }
                Err(e) => {
                    error!("Task panic for {:?}: {}", path, e);
                    stats.skipped += 1;
                }
            }
        }

        stats.records = records.len();
        Ok((records, stats))
    }

    /// Parse every document and persist the records.
    pub async fn run(&self, paths: &[PathBuf]) -> Result<PipelineStats> {
        let (records, stats) = self.collect(paths).await?;

        let store = RecordStore::new(&self.config.storage.output_path);
        let stored = store.save(&records, self.config.storage.overwrite)?;

        info!(
            "=== Done: {} documents | {} skipped | {} records | {} in {:?} ===",
            stats.documents, stats.skipped, stats.records, stored, store.path()
        );
        Ok(stats)
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub documents: usize,
    pub skipped: usize,
    pub records: usize,
}
