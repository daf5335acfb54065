//! Fixed-capacity entity pools
//!
//! Every pooled entity is allocated when the world is built. Spawning hands
//! out the first free slot; despawning only flips the slot back to free.
//! Pools never grow or shrink, so the capacity constants below are hard
//! limits: a spawn request against a full pool is dropped.

/// Flappy obstacles per run
pub const OBSTACLE_CAPACITY: usize = 10;
/// Defence projectiles in flight
pub const PROJECTILE_CAPACITY: usize = 20;
/// Defence enemies on screen
pub const ENEMY_CAPACITY: usize = 20;

/// An entity that can live in a [`Pool`]
pub trait Pooled {
    fn is_free(&self) -> bool;
    fn set_free(&mut self, free: bool);
}

/// Fixed-size collection of reusable entities
#[derive(Debug, Clone)]
pub struct Pool<T> {
    items: Vec<T>,
}

impl<T: Pooled> Pool<T> {
    /// Preallocate `capacity` entities, all free
    pub fn new(capacity: usize, mut make: impl FnMut() -> T) -> Self {
        let items = (0..capacity)
            .map(|_| {
                let mut item = make();
                item.set_free(true);
                item
            })
            .collect();
        Self { items }
    }

    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    /// Claim the first free entity, or `None` if every slot is active.
    ///
    /// The returned entity is already marked active; the caller is expected
    /// to initialize it before the next update.
    pub fn acquire(&mut self) -> Option<&mut T> {
        let item = self.items.iter_mut().find(|item| item.is_free())?;
        item.set_free(false);
        Some(item)
    }

    /// Return slot `index` to the pool. No-op if already free or out of range.
    pub fn release(&mut self, index: usize) {
        if let Some(item) = self.items.get_mut(index) {
            if !item.is_free() {
                item.set_free(true);
            }
        }
    }

    pub fn release_all(&mut self) {
        for item in &mut self.items {
            item.set_free(true);
        }
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Every slot, free or not
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn active(&self) -> impl Iterator<Item = &T> {
        self.items.iter().filter(|item| !item.is_free())
    }

    pub fn active_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut().filter(|item| !item.is_free())
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    pub fn free_count(&self) -> usize {
        self.capacity() - self.active_count()
    }

    pub fn is_exhausted(&self) -> bool {
        self.items.iter().all(|item| !item.is_free())
    }
}
