// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod loader;
mod logging;
mod raw;
mod relations;
mod report;
mod resolver;
mod seed;

use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use walletmatrix_model::Catalog;

pub use logging::{IngestEvent, IngestLog, IngestStage};
pub use raw::{RawDetailedValue, RawFeatureDef, RawFeatureValue, RawWalletDoc};
pub use report::IngestReport;
pub use resolver::{FeatureResolver, Resolution};
pub use seed::seed_catalog;

pub const CRATE_NAME: &str = "walletmatrix-ingest";

#[derive(Debug)]
pub struct IngestError(pub String);
impl Display for IngestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::error::Error for IngestError {}

#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub wallets_dir: PathBuf,
    pub features_dir: PathBuf,
    pub max_document_bytes: u64,
}

impl IngestOptions {
    #[must_use]
    pub fn new(wallets_dir: PathBuf, features_dir: PathBuf) -> Self {
        Self {
            wallets_dir,
            features_dir,
            ..Self::default()
        }
    }
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            wallets_dir: PathBuf::new(),
            features_dir: PathBuf::new(),
            max_document_bytes: 1_048_576,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatasetLoad {
    pub catalog: Catalog,
    pub report: IngestReport,
    pub events: Vec<IngestEvent>,
}

/// Outcome of a load attempt. `NoData` means both source directories were
/// absent or empty; the caller decides whether to fall back to the built-in
/// seed dataset.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    Loaded(DatasetLoad),
    NoData,
}

/// Loads wallet and feature documents, resolves feature keys and builds the
/// association set. Best effort throughout: malformed documents, unresolved
/// keys and invalid values are recorded in the report and skipped, never
/// fatal. Only an unreadable existing directory fails the whole load.
pub fn load_dataset(opts: &IngestOptions) -> Result<LoadOutcome, IngestError> {
    let mut log = IngestLog::default();
    let mut report = IngestReport::default();
    log.emit(
        IngestStage::Scan,
        "load.start",
        vec![
            ("wallets_dir", opts.wallets_dir.display().to_string()),
            ("features_dir", opts.features_dir.display().to_string()),
        ],
    );

    let documents = loader::scan_documents(opts, &mut report)?;
    if documents.feature_defs.is_empty() && documents.wallet_docs.is_empty() {
        log.emit(IngestStage::Finalize, "load.no_data", Vec::new());
        return Ok(LoadOutcome::NoData);
    }
    log.emit(
        IngestStage::Decode,
        "load.documents",
        vec![
            ("feature_defs", documents.feature_defs.len().to_string()),
            ("wallet_docs", documents.wallet_docs.len().to_string()),
        ],
    );

    let mut catalog = Catalog::new();
    relations::register_features(&mut catalog, documents.feature_defs, &mut report);

    let (feature_resolver, alias_collisions) = FeatureResolver::build(catalog.features());
    report.alias_collisions = alias_collisions;
    log.emit(
        IngestStage::Resolve,
        "resolver.ready",
        vec![
            ("canonical_keys", feature_resolver.canonical_len().to_string()),
            ("aliases", feature_resolver.alias_len().to_string()),
        ],
    );

    for doc in documents.wallet_docs {
        relations::register_wallet(&mut catalog, &feature_resolver, doc, &mut report);
    }
    log.emit(
        IngestStage::Relate,
        "relations.complete",
        vec![("associations", catalog.association_count().to_string())],
    );

    report.wallets_loaded = catalog.wallet_count() as u64;
    report.features_loaded = catalog.feature_count() as u64;
    report.associations_built = catalog.association_count() as u64;
    log.emit(
        IngestStage::Finalize,
        "load.complete",
        vec![
            ("wallets", catalog.wallet_count().to_string()),
            ("features", catalog.feature_count().to_string()),
            ("associations", catalog.association_count().to_string()),
            ("warnings", report.warning_count().to_string()),
        ],
    );

    Ok(LoadOutcome::Loaded(DatasetLoad {
        catalog,
        report,
        events: log.into_events(),
    }))
}
