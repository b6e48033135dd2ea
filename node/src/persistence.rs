//! Snapshot files on disk.
//!
//! Writes go to a sibling temp file that is then renamed over the target, so a
//! reader never observes a half-written snapshot.

use std::fs;
use std::io::Write;
use std::path::Path;

use hqa_registry::RegistrySnapshot;
use tracing::{debug, warn};

use crate::NodeError;

/// Write `snapshot` to `path`, replacing any previous file atomically.
///
/// Every failure, whether encoding or I/O, is reported as
/// [`NodeError::Persistence`] and leaves no temp file behind.
pub fn write_snapshot(path: &Path, snapshot: &RegistrySnapshot) -> Result<(), NodeError> {
    let failed = |step: &str, e: &dyn std::fmt::Display| {
        NodeError::Persistence(format!("{step} {}: {e}", path.display()))
    };

    let bytes = snapshot.to_bytes().map_err(|e| failed("encode", &e))?;
    let dir = path.parent().filter(|d| !d.as_os_str().is_empty());
    if let Some(dir) = dir {
        fs::create_dir_all(dir).map_err(|e| failed("create parent of", &e))?;
    }

    let tmp = path.with_extension("tmp");
    if let Err(e) = write_file(&tmp, &bytes).and_then(|()| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(failed("write", &e));
    }

    // The rename is committed; a failed directory sync only weakens durability.
    #[cfg(unix)]
    {
        let synced = fs::File::open(dir.unwrap_or_else(|| Path::new(".")))
            .and_then(|d| d.sync_all());
        if let Err(e) = synced {
            warn!(path = %path.display(), error = %e, "snapshot directory sync failed");
        }
    }

    debug!(path = %path.display(), bytes = bytes.len(), "snapshot written");
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

/// Read a snapshot from `path`. Returns `Ok(None)` if the file does not exist.
///
/// The snapshot is decoded but not validated; `HousingRegistry::restore` does that.
pub fn read_snapshot(path: &Path) -> Result<Option<RegistrySnapshot>, NodeError> {
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let snapshot = RegistrySnapshot::from_bytes(&bytes)
        .map_err(|e| NodeError::Persistence(format!("{}: {e}", path.display())))?;
    Ok(Some(snapshot))
}
