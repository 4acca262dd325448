use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use log::warn;
use serde::Deserialize;
use thiserror::Error;

use super::definition::{Item, ItemKind};
use super::effects::EffectSpec;

/// Catalog lookup and loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown item id '{id}'")]
    NotFound { id: String },

    #[error("failed to read item definitions from {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid item definitions: {0}")]
    Parse(#[from] toml::de::Error),
}

/// On-disk item definition file: a `[[items]]` array of tables
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    items: Vec<Item>,
}

/// Registry of all item definitions, keyed by string id.
///
/// Definitions are registered once at startup and handed out as shared
/// `Arc<Item>` templates from then on.
#[derive(Debug, Default)]
pub struct ItemCatalog {
    items: HashMap<String, Arc<Item>>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
        }
    }

    /// Catalog pre-populated with the stock item set
    pub fn with_default_items() -> Self {
        let mut catalog = Self::new();
        for item in default_items() {
            catalog.register(item);
        }
        catalog
    }

    /// Register a definition. A duplicate id replaces the old entry.
    pub fn register(&mut self, mut item: Item) {
        if item.max_stack == 0 {
            warn!("item '{}' declares max_stack 0, clamping to 1", item.id);
            item.max_stack = 1;
        }
        if self.items.contains_key(&item.id) {
            warn!("duplicate item id '{}', overwriting", item.id);
        }
        self.items.insert(item.id.clone(), Arc::new(item));
    }

    /// Look up a definition by id. Unknown ids are a hard, typed failure;
    /// they never turn into an empty slot downstream.
    pub fn create_item(&self, id: &str) -> Result<Arc<Item>, CatalogError> {
        self.items
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound { id: id.to_string() })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &String> {
        self.items.keys()
    }

    /// Merge definitions from a TOML string. Returns how many were loaded.
    pub fn load_toml_str(&mut self, source: &str) -> Result<usize, CatalogError> {
        let file: CatalogFile = toml::from_str(source)?;
        let count = file.items.len();
        for item in file.items {
            self.register(item);
        }
        Ok(count)
    }

    /// Merge definitions from a TOML file on disk
    pub fn load_toml_file(&mut self, path: &Path) -> Result<usize, CatalogError> {
        let source = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        self.load_toml_str(&source)
    }
}

/// The stock item set the game ships with
fn default_items() -> Vec<Item> {
    vec![
        Item {
            id: "dull_sword".into(),
            name: "Dull Sword".into(),
            description: "A worn-out sword with a dull blade. Thats about it.".into(),
            icon: "items/weapons/swords/dull_sword".into(),
            max_stack: 1,
            price: 50,
            kind: ItemKind::Weapon {
                damage: 5,
                durability: 50,
                range: 1.0,
            },
        },
        Item {
            id: "apple".into(),
            name: "Apple".into(),
            description: "An apple.".into(),
            icon: "items/consumables/food/apple".into(),
            max_stack: 64,
            price: 5,
            kind: ItemKind::Consumable {
                heal_amount: 10,
                effects: vec![EffectSpec::Regeneration {
                    duration: 5.0,
                    amount_per_sec: 2.0,
                }],
            },
        },
        Item {
            id: "small_health_potion".into(),
            name: "Small Health Potion".into(),
            description: "Restores a little health.".into(),
            icon: "items/consumables/potions/small_health".into(),
            max_stack: 16,
            price: 15,
            kind: ItemKind::Consumable {
                heal_amount: 25,
                effects: Vec::new(),
            },
        },
        Item {
            id: "large_health_potion".into(),
            name: "Large Health Potion".into(),
            description: "Restores a lot of health.".into(),
            icon: "items/consumables/potions/large_health".into(),
            max_stack: 16,
            price: 30,
            kind: ItemKind::Consumable {
                heal_amount: 50,
                effects: Vec::new(),
            },
        },
        Item {
            id: "potion_of_confusion".into(),
            name: "Potion of Confusion".into(),
            description: "Why would you drink this?".into(),
            icon: "items/consumables/potions/confusion".into(),
            max_stack: 16,
            price: 20,
            kind: ItemKind::Consumable {
                heal_amount: 0,
                effects: vec![EffectSpec::Confusion { duration: 5.0 }],
            },
        },
        Item {
            id: "moldy_bread".into(),
            name: "Moldy Bread".into(),
            description: "Better than nothing. Probably.".into(),
            icon: "items/consumables/food/moldy_bread".into(),
            max_stack: 32,
            price: 2,
            kind: ItemKind::Consumable {
                heal_amount: 5,
                effects: vec![EffectSpec::Poison {
                    duration: 4.0,
                    damage_per_sec: 1.0,
                }],
            },
        },
    ]
}
