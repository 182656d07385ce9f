//! Combat domain: components shared by every combatant.

use std::collections::HashMap;

use bevy::prelude::*;

/// Marker for the player-controlled entity.
#[derive(Component, Debug, Default)]
pub struct Player;

/// Marker for creatures and bosses hostile to the player.
#[derive(Component, Debug, Default)]
pub struct Enemy;

/// Result of applying damage to a [`Health`] pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HealthChange {
    /// Target was already dead; nothing changed.
    Ignored,
    Damaged(f32),
    /// This hit took the target to zero. Reported exactly once per pool.
    Killed(f32),
}

/// Health component for damageable entities
#[derive(Component, Debug, Clone)]
pub struct Health {
    pub current: f32,
    pub max: f32,
    alive: bool,
}

impl Health {
    pub fn new(max: f32) -> Self {
        let max = max.max(0.0);
        Self {
            current: max,
            max,
            alive: max > 0.0,
        }
    }

    /// Apply `amount` damage, clamped to what remains. Negative amounts deal
    /// nothing.
    pub fn take_damage(&mut self, amount: f32) -> HealthChange {
        if !self.alive {
            return HealthChange::Ignored;
        }
        let actual = amount.max(0.0).min(self.current);
        self.current -= actual;
        if self.current <= 0.0 {
            self.current = 0.0;
            self.alive = false;
            HealthChange::Killed(actual)
        } else {
            HealthChange::Damaged(actual)
        }
    }

    /// Restore up to `amount`, never past max and never for the dead.
    /// Returns the amount actually restored.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if !self.alive {
            return 0.0;
        }
        let actual = amount.max(0.0).min(self.max - self.current);
        self.current += actual;
        actual
    }

    /// Bring the pool back to full, reviving it.
    pub fn restore(&mut self) {
        self.current = self.max;
        self.alive = self.max > 0.0;
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_dead(&self) -> bool {
        !self.alive
    }

    pub fn percent(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.current / self.max
        }
    }
}

/// Horizontal heading, as a yaw about +Y where zero looks down +Z.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Facing {
    pub yaw: f32,
}

impl Facing {
    pub fn from_direction(direction: Vec3) -> Self {
        let mut facing = Self::default();
        facing.face(direction);
        facing
    }

    /// Turn toward `direction`. Vertical and zero-length input keeps the
    /// current heading.
    pub fn face(&mut self, direction: Vec3) {
        if direction.x != 0.0 || direction.z != 0.0 {
            self.yaw = direction.x.atan2(direction.z);
        }
    }

    /// Unit planar vector for the current heading.
    pub fn direction(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, self.yaw.cos())
    }
}

/// Presentation opacity: boss invincibility flashing and clone fade-out.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Opacity(pub f32);

impl Default for Opacity {
    fn default() -> Self {
        Self(1.0)
    }
}

/// Attack and resist numbers read by the combat resolver.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct CombatStats {
    pub attack_bonus: f32,
    /// Chance in percent, 0..=100.
    pub crit_rate_percent: f32,
    /// Health restored per landed hit.
    pub lifesteal_flat: f32,
    /// Flat reduction subtracted from incoming damage.
    pub magic_resist: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Necklace,
    Boots,
}

/// Stat contribution of one equipped item.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ItemStats {
    pub attack: f32,
    pub crit_rate: f32,
    pub lifesteal: f32,
    pub magic_resist: f32,
}

/// Items currently worn, one per slot.
#[derive(Component, Debug, Clone, Default)]
pub struct Equipment {
    slots: HashMap<EquipmentSlot, ItemStats>,
}

impl Equipment {
    /// Put `item` in `slot`, handing back whatever it replaced.
    pub fn equip(&mut self, slot: EquipmentSlot, item: ItemStats) -> Option<ItemStats> {
        self.slots.insert(slot, item)
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<ItemStats> {
        self.slots.remove(&slot)
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&ItemStats> {
        self.slots.get(&slot)
    }

    /// Sum every slot on top of the base lifesteal.
    pub fn combat_stats(&self, base_lifesteal: f32) -> CombatStats {
        self.slots.values().fold(
            CombatStats {
                lifesteal_flat: base_lifesteal,
                ..CombatStats::default()
            },
            |stats, item| CombatStats {
                attack_bonus: stats.attack_bonus + item.attack,
                crit_rate_percent: stats.crit_rate_percent + item.crit_rate,
                lifesteal_flat: stats.lifesteal_flat + item.lifesteal,
                magic_resist: stats.magic_resist + item.magic_resist,
            },
        )
    }
}
