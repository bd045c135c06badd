//! Atomic snapshot writing.
//!
//! Payloads are encoded fully in memory, written to a temporary sibling file,
//! and renamed over the target. A crash mid-write leaves the previous
//! snapshot intact, so consumers of the output directory never observe a
//! truncated file.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::output::json;

/// Encode `payload` and atomically replace `path` with it.
/// Parent directories are created as needed. Returns the byte size written.
pub fn write_snapshot<T: Serialize>(path: &Path, payload: &T, pretty: bool) -> Result<u64> {
    let encoded = json::encode(payload, pretty)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, encoded.as_bytes())?;
    fs::rename(&tmp, path)?;

    let bytes = encoded.len() as u64;
    log::info!("Wrote {} ({} bytes)", path.display(), bytes);
    Ok(bytes)
}
