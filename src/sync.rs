//! Synchronization: fetch every category document, then rebuild the index
//! from the local cache.
//!
//! A failed download degrades to the cached copy with a warning; a cached
//! document that cannot be read at all aborts the whole rebuild before
//! anything is published. The operation is idempotent and builds a
//! complete new [`Index`] every time.

use std::time::SystemTime;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::{
    data_dir::DataDir,
    error::{Error, Result},
    fetch,
    index::Index,
    source::CategorySource,
};

/// Result of one synchronization run.
#[derive(Debug)]
pub struct SyncOutcome {
    pub index: Index,
    /// Number of documents fetched fresh.
    pub fetched: usize,
    /// Keys of the sources whose download failed (stale cache was used).
    pub failed: Vec<String>,
    pub finished_at: SystemTime,
}

impl SyncOutcome {
    /// Whether the run had to fall back to stale cached documents.
    pub fn is_degraded(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Fetch every source document and rebuild the index.
pub fn synchronize(
    sources: &[CategorySource],
    data_dir: &DataDir,
) -> Result<SyncOutcome> {
    info!("starting synchronization of {} sources", sources.len());
    let pages = data_dir.pages_dir()?;
    let client = fetch::client()?;

    let mut failed: Vec<String> = sources
        .par_iter()
        .filter_map(|source| {
            let dest = pages.join(source.file_name());
            match fetch::download_to_file(&client, &source.raw_url, &dest) {
                Ok(()) => {
                    debug!("fetched {}", source.raw_url);
                    None
                }
                Err(err) => {
                    warn!("could not download {}: {err}", source.raw_url);
                    Some(source.name.clone())
                }
            }
        })
        .collect();
    failed.sort();

    if !failed.is_empty() {
        warn!(
            "{} of {} documents could not be downloaded, using local copies",
            failed.len(),
            sources.len()
        );
    }

    let index = rebuild_from_cache(sources, data_dir)?;
    info!("synchronization finished, {} keys indexed", index.key_count());

    Ok(SyncOutcome {
        index,
        fetched: sources.len() - failed.len(),
        failed,
        finished_at: SystemTime::now(),
    })
}

/// Rebuild the index from the cached documents alone, without touching
/// the network.
///
/// All-or-nothing: a single unreadable document fails the whole rebuild.
pub fn rebuild_from_cache(
    sources: &[CategorySource],
    data_dir: &DataDir,
) -> Result<Index> {
    let pages = data_dir.pages_dir()?;
    let documents = sources
        .iter()
        .map(|source| {
            let path = pages.join(source.file_name());
            let text = std::fs::read_to_string(&path).map_err(|_| {
                Error::SourceUnreadable {
                    category: source.name.clone(),
                    path,
                }
            })?;
            Ok((source.clone(), text))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Index::build(&documents))
}
