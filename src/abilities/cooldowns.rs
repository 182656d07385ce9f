use std::time::Duration;

use bevy::ecs::message::Message;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbilityKind {
    /// Summon a ring of clones around the caster.
    SummonAllies,
    /// Heavy frontal strike against every hostile in the cone.
    AreaStrike,
}

impl AbilityKind {
    pub const ALL: [AbilityKind; 2] = [AbilityKind::SummonAllies, AbilityKind::AreaStrike];
}

/// Host request to activate an ability for the player.
#[derive(Debug, Clone)]
pub struct AbilityRequest {
    pub ability: AbilityKind,
}

impl Message for AbilityRequest {}

/// Remaining cooldown per ability. An ability is usable only at zero.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct AbilityCooldowns {
    summon_allies: Duration,
    area_strike: Duration,
}

impl AbilityCooldowns {
    fn slot_mut(&mut self, ability: AbilityKind) -> &mut Duration {
        match ability {
            AbilityKind::SummonAllies => &mut self.summon_allies,
            AbilityKind::AreaStrike => &mut self.area_strike,
        }
    }

    pub fn remaining(&self, ability: AbilityKind) -> Duration {
        match ability {
            AbilityKind::SummonAllies => self.summon_allies,
            AbilityKind::AreaStrike => self.area_strike,
        }
    }

    pub fn is_ready(&self, ability: AbilityKind) -> bool {
        self.remaining(ability).is_zero()
    }

    pub fn start(&mut self, ability: AbilityKind, cooldown: Duration) {
        *self.slot_mut(ability) = cooldown;
    }

    /// Count every ability down by `delta`, stopping at zero.
    pub fn tick(&mut self, delta: Duration) {
        for ability in AbilityKind::ALL {
            let slot = self.slot_mut(ability);
            *slot = slot.saturating_sub(delta);
        }
    }

    /// Remaining cooldown rounded up to whole seconds, for the HUD.
    pub fn remaining_whole_secs(&self, ability: AbilityKind) -> u64 {
        self.remaining(ability).as_millis().div_ceil(1000) as u64
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
