//! Minimal character stat block the inventory acts on.
//!
//! Movement, animation and AI live outside this crate; this is just enough
//! of a character to receive healing, damage and timed effects, and to feed
//! the equipment damage aggregation.

use log::info;

use crate::item::{ActiveEffect, EffectTarget};

#[derive(Debug, Default)]
pub struct CharacterStats {
    pub hp: i32,
    pub max_hp: i32,
    pub base_damage: i32,
    pub confused: bool,
    pub dizzy: bool,
    pub death_count: u32,
    effects: Vec<ActiveEffect>,
}

impl CharacterStats {
    pub fn new(max_hp: i32, base_damage: i32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            base_damage,
            ..Default::default()
        }
    }

    pub fn active_effects(&self) -> &[ActiveEffect] {
        &self.effects
    }

    /// Advance every queued effect by `dt`, dropping expired ones
    pub fn tick_effects(&mut self, dt: f32) {
        let mut effects = std::mem::take(&mut self.effects);
        effects.retain_mut(|effect| !effect.update(dt, self));
        // effects queued while ticking (none of the stock ones do, but the
        // trait allows it) land behind the survivors
        effects.append(&mut self.effects);
        self.effects = effects;
    }

    fn die(&mut self) {
        self.death_count += 1;
        self.hp = self.max_hp;
        info!("character died (death #{})", self.death_count);
    }
}

impl EffectTarget for CharacterStats {
    fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    fn damage(&mut self, amount: i32) {
        self.hp -= amount;
        if self.hp <= 0 {
            self.die();
        }
    }

    fn set_confused(&mut self, active: bool) {
        self.confused = active;
    }

    fn set_dizzy(&mut self, active: bool) {
        self.dizzy = active;
    }

    fn add_effect(&mut self, effect: ActiveEffect) {
        self.effects.push(effect);
    }
}
