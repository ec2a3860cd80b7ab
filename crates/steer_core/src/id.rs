//! Entity identifiers with generational indices

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Handle to an entity owned by the host world.
///
/// The AI never owns entities. It keeps an `EntityId` and asks the host whether
/// the entity still exists before using it, so a stale id simply resolves to
/// nothing once the host recycles the slot with a new generation.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId {
    /// Lower 32 bits: index, Upper 32 bits: generation
    bits: u64,
}

impl EntityId {
    #[inline]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self {
            bits: (generation as u64) << 32 | index as u64,
        }
    }

    #[inline]
    pub const fn index(&self) -> u32 {
        self.bits as u32
    }

    #[inline]
    pub const fn generation(&self) -> u32 {
        (self.bits >> 32) as u32
    }

    /// Same slot, next generation. Used by hosts when a slot is reused.
    #[inline]
    pub const fn next_generation(&self) -> Self {
        Self::new(self.index(), self.generation().wrapping_add(1))
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({}v{})", self.index(), self.generation())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index(), self.generation())
    }
}

/// Hands out fresh entity indices, generation 0
pub struct IdGenerator {
    next: AtomicU32,
}

impl IdGenerator {
    pub const fn new() -> Self {
        Self {
            next: AtomicU32::new(0),
        }
    }

    pub fn next(&self) -> EntityId {
        EntityId::new(self.next.fetch_add(1, Ordering::Relaxed), 0)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
