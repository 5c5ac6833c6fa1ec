//! File-based StateRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use rail_core::GameState;

use crate::repository::{RepositoryError, Result, STATE_KEY, StateRepository};

/// Encoding used for the snapshot file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SnapshotFormat {
    /// Human-readable `rail-baron-state.json`.
    #[default]
    Json,
    /// Compact `rail-baron-state.bin`.
    Bincode,
}

impl SnapshotFormat {
    fn extension(self) -> &'static str {
        match self {
            SnapshotFormat::Json => "json",
            SnapshotFormat::Bincode => "bin",
        }
    }
}

/// File-based implementation of StateRepository.
///
/// Stores the game as a single file named after [`STATE_KEY`]. Writes go to
/// a temporary file first and are renamed into place, so a crash mid-save
/// leaves the previous snapshot intact.
pub struct FileStateRepository {
    base_dir: PathBuf,
    format: SnapshotFormat,
}

impl FileStateRepository {
    /// Create a new file-based state repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        Self::with_format(base_dir, SnapshotFormat::default())
    }

    pub fn with_format(base_dir: impl AsRef<Path>, format: SnapshotFormat) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir, format })
    }

    /// Path of the snapshot file.
    pub fn state_path(&self) -> PathBuf {
        self.base_dir
            .join(format!("{}.{}", STATE_KEY, self.format.extension()))
    }

    fn encode(&self, state: &GameState) -> Result<Vec<u8>> {
        match self.format {
            SnapshotFormat::Json => Ok(serde_json::to_vec_pretty(state)?),
            SnapshotFormat::Bincode => {
                bincode::serialize(state).map_err(|e| RepositoryError::Encode(e.to_string()))
            }
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<GameState> {
        match self.format {
            SnapshotFormat::Json => serde_json::from_slice(bytes)
                .map_err(|e| RepositoryError::CorruptedData(e.to_string())),
            SnapshotFormat::Bincode => bincode::deserialize(bytes)
                .map_err(|e| RepositoryError::CorruptedData(e.to_string())),
        }
    }
}

impl StateRepository for FileStateRepository {
    fn save(&self, state: &GameState) -> Result<()> {
        let path = self.state_path();
        let temp_path = path.with_extension(format!("{}.tmp", self.format.extension()));

        let bytes = self.encode(state)?;
        fs::write(&temp_path, bytes)
            .and_then(|()| fs::rename(&temp_path, &path))
            .map_err(|source| RepositoryError::Write {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(
            target: "runtime::repository",
            nonce = state.action_nonce,
            "Saved state to {}",
            path.display()
        );
        Ok(())
    }

    fn load(&self) -> Result<Option<GameState>> {
        let path = self.state_path();
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let state = self.decode(&bytes)?;

        tracing::debug!(
            target: "runtime::repository",
            nonce = state.action_nonce,
            "Loaded state from {}",
            path.display()
        );
        Ok(Some(state))
    }

    fn exists(&self) -> bool {
        self.state_path().exists()
    }

    fn clear(&self) -> Result<()> {
        let path = self.state_path();
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!(target: "runtime::repository", "Deleted {}", path.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rail_content::Tables;
    use rail_core::GameConfig;

    fn game() -> GameState {
        let tables = Tables::standard();
        GameState::new_game(&["Ann", "Ben", "Cy"], &tables.env(), &GameConfig::default()).unwrap()
    }

    #[test]
    fn both_formats_restore_the_saved_game() {
        for format in [SnapshotFormat::Json, SnapshotFormat::Bincode] {
            let dir = tempfile::tempdir().unwrap();
            let repo = FileStateRepository::with_format(dir.path(), format).unwrap();
            assert_eq!(repo.load().unwrap(), None);

            let state = game();
            repo.save(&state).unwrap();
            assert!(repo.exists());
            assert_eq!(repo.load().unwrap(), Some(state));

            repo.clear().unwrap();
            assert!(!repo.exists());
            repo.clear().unwrap();
        }
    }

    #[test]
    fn snapshot_is_named_after_the_state_key() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileStateRepository::new(dir.path()).unwrap();
        repo.save(&game()).unwrap();

        assert!(dir.path().join("rail-baron-state.json").exists());
        assert!(!dir.path().join("rail-baron-state.json.tmp").exists());
    }

    #[test]
    fn garbage_on_disk_is_reported_as_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileStateRepository::new(dir.path()).unwrap();
        fs::write(repo.state_path(), b"{ not json").unwrap();

        assert!(matches!(repo.load(), Err(RepositoryError::CorruptedData(_))));
    }
}
