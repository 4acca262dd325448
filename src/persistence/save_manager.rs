use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::inventory::{Grid, Wallet};

use super::{SaveResult, SaveState};

/// Manages named save slots as JSON files in one directory
#[derive(Debug, Clone)]
pub struct SaveManager {
    saves_dir: PathBuf,
}

impl SaveManager {
    pub fn new(saves_dir: impl Into<PathBuf>) -> Self {
        Self {
            saves_dir: saves_dir.into(),
        }
    }

    fn ensure_saves_dir(&self) -> SaveResult<()> {
        if !self.saves_dir.exists() {
            fs::create_dir_all(&self.saves_dir)?;
        }
        Ok(())
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.saves_dir.join(format!("{}.json", slot))
    }

    pub fn saves_dir(&self) -> &Path {
        &self.saves_dir
    }

    /// Names of all save slots on disk, sorted
    pub fn list_saves(&self) -> SaveResult<Vec<String>> {
        self.ensure_saves_dir()?;
        let mut slots = Vec::new();
        for entry in fs::read_dir(&self.saves_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    slots.push(stem.to_string());
                }
            }
        }
        slots.sort();
        Ok(slots)
    }

    /// Snapshot wallet and both player grids into a slot file
    pub fn save_game(
        &self,
        slot: &str,
        money: Wallet,
        inventory: &Grid,
        equipment: &Grid,
    ) -> SaveResult<()> {
        self.ensure_saves_dir()?;
        let state = SaveState {
            date: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            money,
            inventory: inventory.to_save(),
            equipment: equipment.to_save(),
        };

        let path = self.slot_path(slot);
        fs::write(&path, serde_json::to_string_pretty(&state)?)?;
        info!("game saved to {}", path.display());
        Ok(())
    }

    /// Read a slot file back. The caller restores grids through
    /// `Grid::restore`, which resolves item ids against the catalog.
    pub fn load_game(&self, slot: &str) -> SaveResult<SaveState> {
        let path = self.slot_path(slot);
        let state: SaveState = serde_json::from_str(&fs::read_to_string(&path)?)?;
        info!("game loaded from {}", path.display());
        Ok(state)
    }

    pub fn delete_save(&self, slot: &str) -> SaveResult<()> {
        let path = self.slot_path(slot);
        if path.exists() {
            fs::remove_file(&path)?;
            info!("deleted save {}", path.display());
        }
        Ok(())
    }
}
