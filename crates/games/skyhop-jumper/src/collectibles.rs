use serde::{Deserialize, Serialize};

use skyhop_core::geometry::Aabb;
use skyhop_core::pool::{Pool, SlotId};

use crate::config::SpawnConfig;
use crate::platforms::{Platform, PlatformId};

/// Handle to a collectible slot in the spawner's pool.
pub type CollectibleId = SlotId;

/// A bonus flower sitting on top of a platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Platform this collectible was spawned above.
    pub attached_to: Option<PlatformId>,
}

impl Collectible {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.x, self.y, self.width, self.height)
    }
}

/// Places collectibles above platforms and recycles them through a pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectibleSpawner {
    pool: Pool<Collectible>,
    width: f32,
    height: f32,
}

impl CollectibleSpawner {
    pub fn new(spawn: &SpawnConfig) -> Self {
        Self {
            pool: Pool::new(),
            width: spawn.collectible_width,
            height: spawn.collectible_height,
        }
    }

    /// Activate a collectible one platform-height above `platform`.
    ///
    /// Returns `None` if the platform already carries an active collectible.
    pub fn attach_above(&mut self, platform: &Platform) -> Option<CollectibleId> {
        if let Some(existing) = self.attached_to(platform.id) {
            tracing::debug!(
                platform = platform.id.0,
                collectible = existing.0,
                "Platform already has a collectible, skipping"
            );
            return None;
        }

        let id = self.pool.acquire(Collectible {
            x: platform.x,
            y: platform.y - platform.height,
            width: self.width,
            height: self.height,
            attached_to: Some(platform.id),
        });
        tracing::debug!(
            platform = platform.id.0,
            collectible = id.0,
            x = platform.x,
            y = platform.y - platform.height,
            "Collectible spawned"
        );
        Some(id)
    }

    /// Return a collectible to the pool. Returns false if it was not active.
    pub fn deactivate(&mut self, id: CollectibleId) -> bool {
        self.pool.release(id)
    }

    /// Deactivate whatever collectible is attached to `platform`.
    pub fn detach_from(&mut self, platform: PlatformId) -> Option<CollectibleId> {
        let id = self.attached_to(platform)?;
        self.pool.release(id);
        Some(id)
    }

    /// Active collectible attached to `platform`, if any.
    pub fn attached_to(&self, platform: PlatformId) -> Option<CollectibleId> {
        self.pool
            .find_active(|c| c.attached_to == Some(platform))
    }

    pub fn get(&self, id: CollectibleId) -> Option<&Collectible> {
        self.pool.get(id)
    }

    pub fn active(&self) -> impl Iterator<Item = (CollectibleId, &Collectible)> {
        self.pool.iter_active()
    }

    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    /// Slots allocated so far, active or not.
    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Deactivate everything for a new run. Allocated slots are kept.
    pub fn reset(&mut self) {
        self.pool.release_all();
    }
}
