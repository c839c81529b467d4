//! JSON import and export of whole reports.
//!
//! Export is pretty-printed JSON with two-space indentation. Import accepts
//! any JSON document: members that are missing or of the wrong type fall back
//! to empty values, so only unreadable files and invalid JSON are errors.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::TransferError;
use crate::model::Report;

pub fn to_json(report: &Report) -> Result<String, TransferError> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn from_json(text: &str) -> Result<Report, TransferError> {
    let value: Value = serde_json::from_str(text)?;
    Ok(Report::from_value(value))
}

/// `{prefix}-{month}-{year}.json`, with path separators and control
/// characters in the period replaced so the name stays inside the export dir.
pub fn export_file_name(report: &Report, prefix: &str) -> String {
    let clean = |s: &str| -> String {
        s.chars()
            .map(|c| match c {
                '/' | '\\' | ':' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect()
    };
    format!("{}-{}-{}.json", clean(prefix), clean(&report.month), clean(&report.year))
}

pub fn export_to_dir(report: &Report, dir: &Path, prefix: &str) -> Result<PathBuf, TransferError> {
    let path = dir.join(export_file_name(report, prefix));
    let text = to_json(report)?;
    fs::write(&path, text).map_err(|source| TransferError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

pub fn import_file(path: &Path) -> Result<Report, TransferError> {
    let text = fs::read_to_string(path).map_err(|source| TransferError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    from_json(&text)
}

/// Hex SHA-256 of the compact JSON form; tags log records with the report state.
pub fn report_digest(report: &Report) -> String {
    let bytes = serde_json::to_vec(report).unwrap_or_default();
    hex::encode(Sha256::digest(&bytes))
}
