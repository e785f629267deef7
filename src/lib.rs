//! wikidex - a keyword lookup service for markdown wiki knowledge bases.
//!
//! wikidex ingests wiki pages that describe named entities (one page per
//! category), extracts one record per entry heading, indexes every record
//! under each of its lowercased identifiers, and resolves
//! free-text messages to the single best-matching record. A message that
//! matches nothing resolves to a built-in help record, never an error.
//!
//! A rebuild produces a complete, immutable [`Index`]; the [`IndexHandle`]
//! publishes it with one atomic swap so concurrent lookups always see a
//! consistent snapshot.
//!
//! # Quick start
//!
//! ```no_run
//! use wikidex::{DataDir, SourceConfig, resolve, sync};
//!
//! let data_dir = DataDir::resolve(None).unwrap();
//! let config = SourceConfig::builtin();
//!
//! let outcome = sync::synchronize(&config.sources, &data_dir).unwrap();
//! let record = resolve::resolve("event give", &outcome.index, &[]);
//! println!("{}", record.title());
//! println!("{}", record.body());
//! ```

pub mod cli;
pub mod data_dir;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod index;
pub mod record;
pub mod resolve;
pub mod source;
pub mod sync;
pub mod text_util;

pub use data_dir::DataDir;
pub use error::{Error, Result};
pub use index::{Index, IndexHandle};
pub use record::Record;
pub use source::{CategorySource, SourceConfig};
