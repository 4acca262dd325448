use serde::{Deserialize, Serialize};

use super::effects::{ActiveEffect, EffectSpec, EffectTarget};

fn default_max_stack() -> u32 {
    64
}

fn default_damage() -> i32 {
    1
}

fn default_durability() -> i32 {
    100
}

fn default_range() -> f32 {
    1.0
}

/// Kind-specific item data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemKind {
    /// Deals damage, wears out
    Weapon {
        #[serde(default = "default_damage")]
        damage: i32,
        #[serde(default = "default_durability")]
        durability: i32,
        #[serde(default = "default_range")]
        range: f32,
    },
    /// Heals and/or applies timed effects when used
    Consumable {
        #[serde(default)]
        heal_amount: i32,
        #[serde(default)]
        effects: Vec<EffectSpec>,
    },
    Armor,
    Generic,
}

/// An immutable item definition.
///
/// Definitions are templates owned by the catalog and shared behind `Arc`;
/// nothing in the inventory mutates them. A purchased item is a fresh copy of
/// the shop's template (see `ShopGrid::buy`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Asset key the host renderer resolves to an image
    #[serde(default)]
    pub icon: String,
    #[serde(default = "default_max_stack")]
    pub max_stack: u32,
    #[serde(default)]
    pub price: i64,
    #[serde(flatten)]
    pub kind: ItemKind,
}

impl Item {
    /// Multi-line tooltip: name, kind-specific stat block, description
    pub fn tooltip_text(&self) -> String {
        match &self.kind {
            ItemKind::Weapon {
                damage, durability, ..
            } => format!(
                "{}\nType: Weapon\nDamage: {}\nDurability: {}\nPrice: ${}\n{}",
                self.name, damage, durability, self.price, self.description
            ),
            ItemKind::Consumable {
                heal_amount,
                effects,
            } => {
                let mut stats = String::from("Type: Consumable");
                if *heal_amount > 0 {
                    stats.push_str(&format!("\nHeal: +{} HP", heal_amount));
                }
                if !effects.is_empty() {
                    stats.push_str("\nEffects:");
                    for effect in effects {
                        stats.push_str(&format!("\n - {}", effect.label()));
                    }
                }
                format!(
                    "{}\n{}\nPrice: ${}\n{}",
                    self.name, stats, self.price, self.description
                )
            }
            ItemKind::Armor | ItemKind::Generic => {
                format!("{}\n{}", self.name, self.description)
            }
        }
    }

    /// Attack damage contributed when this item sits in an equipment slot
    pub fn attack_damage(&self) -> i32 {
        match self.kind {
            ItemKind::Weapon { damage, .. } => damage,
            _ => 0,
        }
    }

    /// Apply this item to a target. Returns true when the item was consumed
    /// and one unit should leave the stack.
    pub fn use_on(&self, target: &mut dyn EffectTarget) -> bool {
        match &self.kind {
            ItemKind::Consumable {
                heal_amount,
                effects,
            } => {
                if *heal_amount > 0 {
                    target.heal(*heal_amount);
                }
                for spec in effects {
                    target.add_effect(ActiveEffect::new(spec.clone()));
                }
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sword() -> Item {
        Item {
            id: "dull_sword".into(),
            name: "Dull Sword".into(),
            description: "A worn-out sword with a dull blade.".into(),
            icon: "items/weapons/dull_sword".into(),
            max_stack: 1,
            price: 50,
            kind: ItemKind::Weapon {
                damage: 5,
                durability: 50,
                range: 1.0,
            },
        }
    }

    #[test]
    fn test_weapon_tooltip_lists_stats() {
        let text = sword().tooltip_text();
        assert!(text.starts_with("Dull Sword\n"));
        assert!(text.contains("Type: Weapon"));
        assert!(text.contains("Damage: 5"));
        assert!(text.contains("Durability: 50"));
        assert!(text.contains("Price: $50"));
        assert!(text.ends_with("A worn-out sword with a dull blade."));
    }

    #[test]
    fn test_consumable_tooltip_lists_effects() {
        let apple = Item {
            id: "apple".into(),
            name: "Apple".into(),
            description: "An apple.".into(),
            icon: String::new(),
            max_stack: 64,
            price: 5,
            kind: ItemKind::Consumable {
                heal_amount: 10,
                effects: vec![EffectSpec::Regeneration {
                    duration: 5.0,
                    amount_per_sec: 2.0,
                }],
            },
        };
        let text = apple.tooltip_text();
        assert!(text.contains("Heal: +10 HP"));
        assert!(text.contains(" - Regeneration (5s)"));
    }

    #[test]
    fn test_attack_damage_only_for_weapons() {
        assert_eq!(sword().attack_damage(), 5);

        let generic = Item {
            id: "rock".into(),
            name: "Rock".into(),
            description: String::new(),
            icon: String::new(),
            max_stack: 64,
            price: 0,
            kind: ItemKind::Generic,
        };
        assert_eq!(generic.attack_damage(), 0);
    }

    #[test]
    fn test_item_deserializes_from_toml() {
        let item: Item = toml::from_str(
            r#"
            id = "apple"
            name = "Apple"
            kind = "consumable"
            heal_amount = 10
            price = 5

            [[effects]]
            type = "regeneration"
            duration = 5.0
            amount_per_sec = 2.0
            "#,
        )
        .expect("item toml should parse");

        assert_eq!(item.max_stack, 64);
        match item.kind {
            ItemKind::Consumable {
                heal_amount,
                ref effects,
            } => {
                assert_eq!(heal_amount, 10);
                assert_eq!(effects.len(), 1);
            }
            _ => panic!("expected consumable"),
        }
    }
}
