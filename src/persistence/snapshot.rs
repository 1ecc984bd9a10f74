//! Snapshot: save/load a trained (optionally proxy-key sorted) training set.
//!
//! The snapshot file is `[crc32: u32 LE][bincode(TrainedSnapshot)]`. A JSON
//! manifest next to it carries human-readable metadata.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::SearchConfig;
use crate::distance::ByProxyKey;
use crate::error::{Result, SearchError};
use crate::persistence::serialization;
use crate::sample::Sample;
use crate::sequence::Sequence;

/// Serializable training set plus the configuration it was prepared for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedSnapshot {
    pub config: SearchConfig,
    pub samples: Vec<Sample>,
    /// Whether `samples` are in ascending proxy-key order.
    pub sorted: bool,
}

impl TrainedSnapshot {
    /// Capture a training container and its sortedness flag.
    pub fn capture(config: SearchConfig, training: &Sequence<Sample>) -> Self {
        Self {
            config,
            samples: training.as_slice().to_vec(),
            sorted: training.is_sorted(),
        }
    }

    /// Rebuild the container. A sorted claim is re-verified, so a snapshot
    /// whose order does not hold is an `InvalidArgument`.
    pub fn into_sequence(self) -> Result<Sequence<Sample>> {
        if self.sorted {
            Sequence::from_sorted(self.samples, ByProxyKey)
        } else {
            Ok(Sequence::from_vec(self.samples))
        }
    }
}

/// Manages saving and loading trained-set snapshots.
pub struct SnapshotManager {
    dir: PathBuf,
}

impl SnapshotManager {
    /// Create a snapshot manager for the given directory.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn snapshot_path(&self) -> PathBuf {
        self.dir.join("snapshot.bin")
    }

    fn manifest_path(&self) -> PathBuf {
        self.dir.join("manifest.json")
    }

    /// Save a snapshot to disk.
    pub fn save(&self, snapshot: &TrainedSnapshot) -> Result<()> {
        let payload = serialization::to_bincode(snapshot)?;
        fs::write(self.snapshot_path(), serialization::frame_with_checksum(payload))?;

        let manifest = serde_json::json!({
            "sample_count": snapshot.samples.len(),
            "sorted": snapshot.sorted,
            "strategy": snapshot.config.strategy,
            "window": snapshot.config.window,
        });
        let manifest_bytes = serde_json::to_vec_pretty(&manifest)
            .map_err(|e| SearchError::SerializationError(e.to_string()))?;
        fs::write(self.manifest_path(), &manifest_bytes)?;

        info!(dir = %self.dir.display(), len = snapshot.samples.len(), "saved snapshot");
        Ok(())
    }

    /// Load a snapshot from disk, or return None if no snapshot exists.
    pub fn load(&self) -> Result<Option<TrainedSnapshot>> {
        let path = self.snapshot_path();
        if !path.exists() {
            return Ok(None);
        }

        let data = fs::read(&path)?;
        let payload = serialization::unframe_checked(&data)?;
        let snapshot: TrainedSnapshot = serialization::from_bincode(payload)?;
        Ok(Some(snapshot))
    }

    /// Check if a snapshot exists.
    pub fn exists(&self) -> bool {
        self.snapshot_path().exists()
    }
}
