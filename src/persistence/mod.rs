//! Saving and loading of session state.
//!
//! The on-disk format follows the original JSON shape: each grid is a
//! `[column][row]` list-of-lists of optional `{id, count}` entries, and the
//! wallet is a plain integer.

pub mod save_manager;

pub use save_manager::SaveManager;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::inventory::Wallet;
use crate::item::CatalogError;

/// Result type for persistence operations
pub type SaveResult<T> = Result<T, SaveError>;

/// Errors that can occur while saving or loading
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed save file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed save data: {0}")]
    Format(String),

    #[error("save references an item missing from the catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// One occupied slot in a saved grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotSave {
    pub id: String,
    pub count: u32,
}

/// A grid serialized `[column][row]`; `None` entries are empty slots
pub type GridSave = Vec<Vec<Option<SlotSave>>>;

/// Everything one save slot captures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveState {
    pub date: String,
    pub money: Wallet,
    pub inventory: GridSave,
    pub equipment: GridSave,
}
