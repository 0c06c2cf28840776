// SPDX-License-Identifier: Apache-2.0

use crate::raw::{RawFeatureDef, RawWalletDoc};
use crate::report::IngestReport;
use crate::{IngestError, IngestOptions};
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub(crate) struct ScannedDocuments {
    pub feature_defs: Vec<RawFeatureDef>,
    pub wallet_docs: Vec<RawWalletDoc>,
}

/// Reads every `*.json` document under the two source directories, in file
/// name order. A document that cannot be read or decoded is recorded and
/// skipped; an absent directory simply contributes nothing.
pub(crate) fn scan_documents(
    opts: &IngestOptions,
    report: &mut IngestReport,
) -> Result<ScannedDocuments, IngestError> {
    let mut documents = ScannedDocuments::default();

    for path in json_paths(&opts.features_dir)? {
        let text = match read_document(&path, opts.max_document_bytes, report) {
            Some(text) => text,
            None => continue,
        };
        match serde_json::from_str::<Vec<RawFeatureDef>>(&text) {
            Ok(defs) => documents.feature_defs.extend(defs),
            Err(e) => report
                .skipped_documents
                .push(format!("{}: {e}", path.display())),
        }
    }

    for path in json_paths(&opts.wallets_dir)? {
        let text = match read_document(&path, opts.max_document_bytes, report) {
            Some(text) => text,
            None => continue,
        };
        match serde_json::from_str::<RawWalletDoc>(&text) {
            Ok(doc) => documents.wallet_docs.push(doc),
            Err(e) => report
                .skipped_documents
                .push(format!("{}: {e}", path.display())),
        }
    }

    Ok(documents)
}

fn json_paths(dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let entries = std::fs::read_dir(dir)
        .map_err(|e| IngestError(format!("read dir {}: {e}", dir.display())))?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| IngestError(format!("read dir {}: {e}", dir.display())))?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn read_document(path: &Path, max_bytes: u64, report: &mut IngestReport) -> Option<String> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.len() > max_bytes => {
            report.skipped_documents.push(format!(
                "{}: document exceeds {max_bytes} bytes",
                path.display()
            ));
            return None;
        }
        Ok(_) => {}
        Err(e) => {
            report
                .skipped_documents
                .push(format!("{}: {e}", path.display()));
            return None;
        }
    }
    match std::fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) => {
            report
                .skipped_documents
                .push(format!("{}: {e}", path.display()));
            None
        }
    }
}
