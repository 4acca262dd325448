use serde::{Deserialize, Serialize};

/// Declarative timed-effect descriptor carried by consumable definitions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EffectSpec {
    /// Restores HP over time
    Regeneration { duration: f32, amount_per_sec: f32 },
    /// Deals damage over time
    Poison { duration: f32, damage_per_sec: f32 },
    /// Inverts the target's controls for the duration
    Confusion { duration: f32 },
    /// Blurs the target's vision for the duration
    Dizziness { duration: f32 },
}

impl EffectSpec {
    pub fn duration(&self) -> f32 {
        match self {
            EffectSpec::Regeneration { duration, .. }
            | EffectSpec::Poison { duration, .. }
            | EffectSpec::Confusion { duration }
            | EffectSpec::Dizziness { duration } => *duration,
        }
    }

    /// Short label used in tooltips, e.g. "Regeneration (5s)"
    pub fn label(&self) -> String {
        let name = match self {
            EffectSpec::Regeneration { .. } => "Regeneration",
            EffectSpec::Poison { .. } => "Poison",
            EffectSpec::Confusion { .. } => "Confusion",
            EffectSpec::Dizziness { .. } => "Dizziness",
        };
        format!("{} ({}s)", name, self.duration())
    }
}

/// The seam between the inventory core and whatever entity an effect acts on
pub trait EffectTarget {
    fn heal(&mut self, amount: i32);
    fn damage(&mut self, amount: i32);
    fn set_confused(&mut self, active: bool);
    fn set_dizzy(&mut self, active: bool);
    /// Queue a timed effect; the target owns ticking it
    fn add_effect(&mut self, effect: ActiveEffect);
}

/// A running effect instance on some target.
///
/// Over-time effects accumulate fractional points and only apply whole ones,
/// keeping the remainder for the next tick.
#[derive(Debug, Clone)]
pub struct ActiveEffect {
    spec: EffectSpec,
    timer: f32,
    accumulator: f32,
    started: bool,
}

impl ActiveEffect {
    pub fn new(spec: EffectSpec) -> Self {
        Self {
            spec,
            timer: 0.0,
            accumulator: 0.0,
            started: false,
        }
    }

    pub fn spec(&self) -> &EffectSpec {
        &self.spec
    }

    pub fn is_finished(&self) -> bool {
        self.timer >= self.spec.duration()
    }

    /// Advance the effect by `dt` seconds. Returns true once the effect has
    /// expired and released the target.
    pub fn update(&mut self, dt: f32, target: &mut dyn EffectTarget) -> bool {
        self.timer += dt;
        if self.timer >= self.spec.duration() {
            self.on_end(target);
            return true;
        }
        self.apply(dt, target);
        false
    }

    fn apply(&mut self, dt: f32, target: &mut dyn EffectTarget) {
        match self.spec {
            EffectSpec::Regeneration { amount_per_sec, .. } => {
                self.accumulator += amount_per_sec * dt;
                if self.accumulator >= 1.0 {
                    let heal = self.accumulator as i32;
                    target.heal(heal);
                    self.accumulator -= heal as f32;
                }
            }
            EffectSpec::Poison { damage_per_sec, .. } => {
                self.accumulator += damage_per_sec * dt;
                if self.accumulator >= 1.0 {
                    let dmg = self.accumulator as i32;
                    target.damage(dmg);
                    self.accumulator -= dmg as f32;
                }
            }
            EffectSpec::Confusion { .. } => {
                if !self.started {
                    target.set_confused(true);
                    self.started = true;
                }
            }
            EffectSpec::Dizziness { .. } => {
                if !self.started {
                    target.set_dizzy(true);
                    self.started = true;
                }
            }
        }
    }

    fn on_end(&mut self, target: &mut dyn EffectTarget) {
        match self.spec {
            EffectSpec::Confusion { .. } => target.set_confused(false),
            EffectSpec::Dizziness { .. } => target.set_dizzy(false),
            _ => {}
        }
    }
}
