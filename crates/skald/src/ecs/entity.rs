//! # Entity — Generational Identifiers
//!
//! An [`Entity`] is a handle, not a container: the
//! [`EntityStore`](super::store::EntityStore) maps it to a record holding the
//! actual data. Handles pair a slot index with a generation counter, so a
//! handle kept past its entity's destruction goes *stale* instead of aliasing
//! whatever reuses the slot.
//!
//! That staleness is load-bearing here: transform parent links and the
//! camera's follow target are stored as plain `Entity` values. They are
//! relations, never ownership — when the referenced entity dies, the lookup
//! resolves to "absent" and callers fall back gracefully.

use std::fmt;

/// A lightweight handle to an entity in the store.
///
/// Valid only for the store that issued it, and only while its generation
/// matches the slot's current generation.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl Entity {
    /// Raw slot index. For diagnostics and keying, not for liveness checks.
    pub fn index(self) -> u32 {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}v{})", self.index, self.generation)
    }
}

/// Hands out entity slots and recycles them with bumped generations.
pub(crate) struct EntityAllocator {
    /// Current generation of every slot ever handed out.
    generations: Vec<u32>,
    /// Slots free for reuse.
    free: Vec<u32>,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self {
            generations: Vec::new(),
            free: Vec::new(),
        }
    }

    pub fn allocate(&mut self) -> Entity {
        if let Some(index) = self.free.pop() {
            Entity {
                index,
                generation: self.generations[index as usize],
            }
        } else {
            let index = self.generations.len() as u32;
            self.generations.push(0);
            Entity {
                index,
                generation: 0,
            }
        }
    }

    /// Release an entity's slot. Returns `false` for stale handles.
    pub fn deallocate(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        // Bump so every outstanding handle for this slot goes stale.
        self.generations[entity.index as usize] += 1;
        self.free.push(entity.index);
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.generations
            .get(entity.index as usize)
            .is_some_and(|&generation| generation == entity.generation)
    }

    pub fn alive_count(&self) -> usize {
        self.generations.len() - self.free.len()
    }
}
