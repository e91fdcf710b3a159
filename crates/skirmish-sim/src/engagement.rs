//! Engagement scratch map: which enemies each regiment has in range this tick.
//!
//! Stored in `BattleEngine`, NOT as ECS components. Rebuilt from scratch by the
//! combat detection stage every tick and never persisted.

use std::collections::HashMap;

use hecs::Entity;

use skirmish_core::regiment::RegimentId;

/// One enemy inside an attacker's effective range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub entity: Entity,
    pub regiment: RegimentId,
    pub distance: f64,
    /// Attacker's effective range when the contact was detected.
    pub range: f64,
    /// Bearing from the attacker to the enemy (radians).
    pub bearing: f64,
}

/// Contacts per attacker, kept in detection order so resolution is deterministic.
#[derive(Debug, Clone, Default)]
pub struct EngagementMap {
    entries: Vec<(Entity, Vec<Contact>)>,
    index: HashMap<Entity, usize>,
}

impl EngagementMap {
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Record an attacker's contacts. Empty lists are not stored.
    pub fn insert(&mut self, attacker: Entity, contacts: Vec<Contact>) {
        if contacts.is_empty() {
            return;
        }
        if let Some(&slot) = self.index.get(&attacker) {
            self.entries[slot].1 = contacts;
        } else {
            self.index.insert(attacker, self.entries.len());
            self.entries.push((attacker, contacts));
        }
    }

    pub fn contacts(&self, attacker: Entity) -> &[Contact] {
        self.index
            .get(&attacker)
            .map_or(&[], |&slot| self.entries[slot].1.as_slice())
    }

    pub fn is_engaged(&self, entity: Entity) -> bool {
        self.index.contains_key(&entity)
    }

    pub fn engaged_with(&self, entity: Entity) -> Vec<RegimentId> {
        self.contacts(entity).iter().map(|c| c.regiment).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Entity, &[Contact])> {
        self.entries.iter().map(|(e, c)| (*e, c.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
