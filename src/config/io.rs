use std::fs;
use std::path::Path;
use tracing::{debug, info};
use crate::config::store::ConfigStore;
use crate::error::SshcError;

/// Reads and parses the ssh config at `path`.
pub fn load_store(path: &Path, identity_dir: &str) -> Result<ConfigStore, SshcError> {
    debug!(path = %path.display(), "loading ssh config");
    let content = fs::read_to_string(path).map_err(|source| SshcError::FileUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    ConfigStore::parse_with(&content, identity_dir).map_err(|source| SshcError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Replaces the file at `path` with the serialized store.
///
/// Written to a sibling temp file first, then renamed into place.
pub fn save_store(store: &ConfigStore, path: &Path) -> Result<(), SshcError> {
    let text = store.serialize();
    let mut tmp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_else(|| "config".into());
    tmp_name.push(".sshc.tmp");
    let tmp = path.with_file_name(tmp_name);

    let write_err = |source: std::io::Error| SshcError::Write { path: path.to_path_buf(), source };
    fs::write(&tmp, text).map_err(write_err)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(write_err(e));
    }
    info!(path = %path.display(), hosts = store.len(), "saved ssh config");
    Ok(())
}
