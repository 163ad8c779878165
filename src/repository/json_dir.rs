//! File-backed repository: one JSON document per actor.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::{ActorId, CombatState};

use super::error::{RepositoryError, Result};
use super::traits::CombatRepository;

/// Stores states as `actor_{id}.json` under a base directory.
///
/// Writes go to a temporary file first and are renamed into place, so a
/// reader never sees a half-written state.
pub struct JsonDirRepository {
    base_dir: PathBuf,
}

impl JsonDirRepository {
    /// Open (creating if needed) a repository rooted at `base_dir`.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn state_path(&self, actor: ActorId) -> PathBuf {
        self.base_dir.join(format!("actor_{}.json", actor.raw()))
    }
}

impl CombatRepository for JsonDirRepository {
    fn load(&self, actor: ActorId) -> Result<Option<CombatState>> {
        let path = self.state_path(actor);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let state = serde_json::from_slice(&bytes).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        debug!(%actor, path = %path.display(), "loaded combat state");
        Ok(Some(state))
    }

    fn save(&self, state: &CombatState) -> Result<()> {
        let path = self.state_path(state.actor);
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(state).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        debug!(actor = %state.actor, path = %path.display(), "saved combat state");
        Ok(())
    }

    fn exists(&self, actor: ActorId) -> bool {
        self.state_path(actor).exists()
    }

    fn actor_ids(&self) -> Result<Vec<ActorId>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            let id = path
                .file_name()
                .and_then(|s| s.to_str())
                .and_then(|name| name.strip_prefix("actor_"))
                .and_then(|rest| rest.strip_suffix(".json"))
                .and_then(|raw| raw.parse::<u32>().ok());
            if let Some(id) = id {
                ids.push(ActorId::new(id));
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }
}
