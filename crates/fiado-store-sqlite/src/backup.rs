//! Filesystem implementation of the backup sink.

use std::{
  fs, io,
  path::{Path, PathBuf},
};

use fiado_core::backup::{BackupSink, SnapshotDocument};

/// Writes deletion snapshots as pretty-printed JSON files named
/// `<kind>-<id>-backup-<millis>.json` under one directory, creating the
/// directory on first use.
#[derive(Debug, Clone)]
pub struct FsBackupSink {
  dir: PathBuf,
}

impl FsBackupSink {
  pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: dir.into() } }

  pub fn dir(&self) -> &Path { &self.dir }
}

impl BackupSink for FsBackupSink {
  fn persist(&self, doc: &SnapshotDocument) -> io::Result<PathBuf> {
    fs::create_dir_all(&self.dir)?;

    let (kind, id) = doc.label();
    let mut stamp = doc.deleted_at().timestamp_millis();

    // Bump the stamp rather than clobber an earlier snapshot if two purges
    // land in the same millisecond.
    let path = loop {
      let candidate =
        self.dir.join(format!("{kind}-{id}-backup-{stamp}.json"));
      if !candidate.exists() {
        break candidate;
      }
      stamp += 1;
    };

    let file = fs::File::create(&path)?;
    serde_json::to_writer_pretty(&file, doc).map_err(io::Error::other)?;
    file.sync_all()?;
    Ok(path)
  }
}
