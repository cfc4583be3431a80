//! Whole-file replacement that readers never observe half-written

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use taskpick_core::{Error, Result};
use uuid::Uuid;

/// Replace `path` with `content`, creating parent directories as needed
///
/// The bytes go to a uniquely named sibling first and are renamed over the
/// target, so a concurrent reader sees either the old or the new file.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Err(Error::configuration(format!(
            "cannot write '{}': no parent directory",
            path.display()
        )));
    };
    fs::create_dir_all(parent).map_err(|e| Error::file_system(parent, "create directory", e))?;

    let staging = parent.join(format!(".{}.tmp", Uuid::new_v4().simple()));
    if let Err(e) = write_synced(&staging, content) {
        let _ = fs::remove_file(&staging);
        return Err(Error::file_system(&staging, "write staging file", e));
    }

    fs::rename(&staging, path).map_err(|e| {
        let _ = fs::remove_file(&staging);
        Error::file_system(path, "replace", e)
    })
}

fn write_synced(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content)?;
    file.sync_all()
}
