use rand::Rng;
use serde::{Deserialize, Serialize};

use skyhop_core::geometry::Aabb;

use crate::collectibles::CollectibleSpawner;
use crate::config::{SpawnConfig, WorldConfig};

/// Stable index of a platform in the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlatformId(pub usize);

/// A static platform the player bounces off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: PlatformId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Platform {
    /// World y of the surface the player lands on.
    pub fn top(&self) -> f32 {
        self.y - self.height / 2.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.x, self.y, self.width, self.height)
    }
}

/// Fixed-size set of platforms, recycled from the bottom of the screen
/// back to the top to fake an endless climb.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformPool {
    platforms: Vec<Platform>,
}

impl PlatformPool {
    /// Lay out `world.platform_count` platforms, `platform_spacing` apart
    /// starting at y = 0, each with an `initial_attach_chance` of carrying
    /// a collectible.
    pub fn initialize<R: Rng + ?Sized>(
        world: &WorldConfig,
        spawn: &SpawnConfig,
        rng: &mut R,
        spawner: &mut CollectibleSpawner,
    ) -> Self {
        let mut platforms = Vec::with_capacity(world.platform_count);
        for i in 0..world.platform_count {
            let platform = Platform {
                id: PlatformId(i),
                x: random_platform_x(world, rng),
                y: world.platform_spacing * i as f32,
                width: world.platform_width,
                height: world.platform_height,
            };
            if rng.random_bool(spawn.initial_attach_chance) {
                spawner.attach_above(&platform);
            }
            platforms.push(platform);
        }
        tracing::debug!(count = platforms.len(), "Platform pool initialized");
        Self { platforms }
    }

    /// Recycle every platform that has scrolled off the bottom. Returns how
    /// many moved.
    pub fn recycle_offscreen<R: Rng + ?Sized>(
        &mut self,
        scroll_y: f32,
        world: &WorldConfig,
        spawn: &SpawnConfig,
        rng: &mut R,
        spawner: &mut CollectibleSpawner,
    ) -> usize {
        let mut recycled = 0;
        for platform in &mut self.platforms {
            if recycle_if_offscreen(platform, scroll_y, world, spawn, rng, spawner) {
                recycled += 1;
            }
        }
        recycled
    }

    /// The platform furthest down the screen (largest y).
    pub fn lowest(&self) -> Option<&Platform> {
        self.platforms.iter().max_by(|a, b| a.y.total_cmp(&b.y))
    }

    pub fn get(&self, id: PlatformId) -> Option<&Platform> {
        self.platforms.get(id.0)
    }

    pub fn get_mut(&mut self, id: PlatformId) -> Option<&mut Platform> {
        self.platforms.get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter()
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }
}

/// Move `platform` back above the screen if it has scrolled past the
/// recycle line, keeping its x. A recycled platform drops any collectible
/// it still carries, then rolls for a new one.
pub fn recycle_if_offscreen<R: Rng + ?Sized>(
    platform: &mut Platform,
    scroll_y: f32,
    world: &WorldConfig,
    spawn: &SpawnConfig,
    rng: &mut R,
    spawner: &mut CollectibleSpawner,
) -> bool {
    if platform.y < scroll_y + world.recycle_threshold {
        return false;
    }

    let jitter = rng.random_range(world.recycle_jitter_min..=world.recycle_jitter_max);
    let old_y = platform.y;
    platform.y = scroll_y - jitter;

    if let Some(orphan) = spawner.detach_from(platform.id) {
        tracing::debug!(
            platform = platform.id.0,
            collectible = orphan.0,
            "Dropped uncollected collectible on recycle"
        );
    }
    if rng.random_bool(spawn.recycle_attach_chance) {
        spawner.attach_above(platform);
    }

    tracing::debug!(
        platform = platform.id.0,
        from = old_y,
        to = platform.y,
        "Platform recycled"
    );
    true
}

/// Random x at least `platform_x_inset` from both screen edges, or the
/// screen center when the screen is too narrow for that.
fn random_platform_x<R: Rng + ?Sized>(world: &WorldConfig, rng: &mut R) -> f32 {
    let lo = world.platform_x_inset;
    let hi = world.screen_width - world.platform_x_inset;
    if lo <= hi {
        rng.random_range(lo..=hi)
    } else {
        world.screen_width / 2.0
    }
}
