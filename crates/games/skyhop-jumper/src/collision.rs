use serde::{Deserialize, Serialize};

use crate::collectibles::{CollectibleId, CollectibleSpawner};
use crate::physics::PlayerState;
use crate::platforms::{Platform, PlatformId, PlatformPool};

/// Contact reported by a collision pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CollisionEvent {
    /// The player's feet crossed a platform top while moving down.
    Landed {
        platform: PlatformId,
        surface_y: f32,
    },
    /// The player overlaps an active collectible.
    Collected { collectible: CollectibleId },
}

/// Check the player against every platform and active collectible.
///
/// Platforms are one-way: they only stop the player from above, so at most
/// one `Landed` is reported per pass (the first platform in pool order).
/// Every overlapped collectible yields its own `Collected`.
pub fn resolve(
    player: &PlayerState,
    platforms: &PlatformPool,
    collectibles: &CollectibleSpawner,
) -> Vec<CollisionEvent> {
    let mut events = Vec::new();

    if let Some(platform) = platforms.iter().find(|p| touches_down(player, p)) {
        events.push(CollisionEvent::Landed {
            platform: platform.id,
            surface_y: platform.top(),
        });
    }

    let body = player.bounds();
    for (id, collectible) in collectibles.active() {
        if body.overlaps(&collectible.bounds()) {
            events.push(CollisionEvent::Collected { collectible: id });
        }
    }

    events
}

/// Whether the player's feet reached `platform`'s top this step.
///
/// Requires downward (or zero) vertical speed, feet at or above the top
/// before the step and at or below it after, and horizontal overlap.
pub fn touches_down(player: &PlayerState, platform: &Platform) -> bool {
    let top = platform.top();
    player.vy >= 0.0
        && player.prev_bottom <= top
        && player.bottom() >= top
        && player.bounds().overlaps_horizontally(&platform.bounds())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PlayerPhysicsConfig, SpawnConfig, WorldConfig};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn world_with_platforms(xs: &[(f32, f32)]) -> (PlatformPool, CollectibleSpawner) {
        let world = WorldConfig {
            platform_count: xs.len(),
            ..WorldConfig::default()
        };
        let spawn = SpawnConfig {
            initial_attach_chance: 0.0,
            ..SpawnConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        let mut spawner = CollectibleSpawner::new(&spawn);
        let mut pool = PlatformPool::initialize(&world, &spawn, &mut rng, &mut spawner);
        for (i, &(x, y)) in xs.iter().enumerate() {
            let p = pool.get_mut(PlatformId(i)).unwrap();
            p.x = x;
            p.y = y;
        }
        (pool, spawner)
    }

    /// Player whose feet moved from `from_bottom` to `to_bottom` this step.
    fn falling_player(x: f32, from_bottom: f32, to_bottom: f32) -> PlayerState {
        let mut player = PlayerState::new(x, 0.0, &PlayerPhysicsConfig::default());
        player.y = to_bottom - player.height / 2.0;
        player.prev_bottom = from_bottom;
        player.vy = 120.0;
        player
    }

    #[test]
    fn crossing_top_lands() {
        let (pool, spawner) = world_with_platforms(&[(500.0, 300.0)]);
        // Platform top is 300 - 14 = 286
        let player = falling_player(500.0, 280.0, 290.0);
        let events = resolve(&player, &pool, &spawner);
        assert_eq!(
            events,
            vec![CollisionEvent::Landed {
                platform: PlatformId(0),
                surface_y: 286.0,
            }]
        );
    }

    #[test]
    fn rising_player_passes_through() {
        let (pool, spawner) = world_with_platforms(&[(500.0, 300.0)]);
        let mut player = falling_player(500.0, 290.0, 282.0);
        player.vy = -250.0;
        assert!(resolve(&player, &pool, &spawner).is_empty());
    }

    #[test]
    fn already_below_top_does_not_land() {
        let (pool, spawner) = world_with_platforms(&[(500.0, 300.0)]);
        let player = falling_player(500.0, 295.0, 305.0);
        assert!(resolve(&player, &pool, &spawner).is_empty());
    }

    #[test]
    fn resting_on_top_counts_as_touching() {
        let (pool, spawner) = world_with_platforms(&[(500.0, 300.0)]);
        let mut player = falling_player(500.0, 286.0, 286.0);
        player.vy = 0.0;
        assert_eq!(resolve(&player, &pool, &spawner).len(), 1);
    }

    #[test]
    fn horizontal_miss() {
        let (pool, spawner) = world_with_platforms(&[(500.0, 300.0)]);
        // Platform spans 440..560, player 60 wide centered at 600 spans 570..630
        let player = falling_player(600.0, 280.0, 290.0);
        assert!(resolve(&player, &pool, &spawner).is_empty());
    }

    #[test]
    fn at_most_one_landing_per_pass() {
        // Two platforms sharing a top surface under the player
        let (pool, spawner) = world_with_platforms(&[(480.0, 300.0), (520.0, 300.0)]);
        let player = falling_player(500.0, 280.0, 290.0);
        let landings = resolve(&player, &pool, &spawner)
            .into_iter()
            .filter(|e| matches!(e, CollisionEvent::Landed { .. }))
            .count();
        assert_eq!(landings, 1);
    }

    #[test]
    fn overlapping_collectibles_each_reported() {
        let (pool, mut spawner) = world_with_platforms(&[(500.0, 300.0), (510.0, 310.0)]);
        let a = spawner.attach_above(pool.get(PlatformId(0)).unwrap()).unwrap();
        let b = spawner.attach_above(pool.get(PlatformId(1)).unwrap()).unwrap();
        // Collectibles sit at y=272 and y=282; put the player on top of both
        let mut player = PlayerState::new(505.0, 270.0, &PlayerPhysicsConfig::default());
        player.vy = -100.0;
        let events = resolve(&player, &pool, &spawner);
        assert!(events.contains(&CollisionEvent::Collected { collectible: a }));
        assert!(events.contains(&CollisionEvent::Collected { collectible: b }));
    }

    #[test]
    fn inactive_collectibles_ignored() {
        let (pool, mut spawner) = world_with_platforms(&[(500.0, 300.0)]);
        let id = spawner.attach_above(pool.get(PlatformId(0)).unwrap()).unwrap();
        spawner.deactivate(id);
        let mut player = PlayerState::new(500.0, 272.0, &PlayerPhysicsConfig::default());
        player.vy = -100.0;
        assert!(resolve(&player, &pool, &spawner).is_empty());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn never_more_than_one_landing(
                px in 0.0f32..1280.0,
                from in 0.0f32..700.0,
                step in 0.0f32..30.0,
                ys in proptest::collection::vec((0.0f32..1280.0, 0.0f32..700.0), 1..12),
            ) {
                let (pool, spawner) = world_with_platforms(&ys);
                let player = falling_player(px, from, from + step);
                let landings = resolve(&player, &pool, &spawner)
                    .into_iter()
                    .filter(|e| matches!(e, CollisionEvent::Landed { .. }))
                    .count();
                prop_assert!(landings <= 1);
            }
        }
    }
}
