//! Level state: terrain grid, live actors and the win/lose outcome
//!
//! The outcome is a one-way latch. `status` starts as `None` and moves once
//! to `Won` or `Lost`; nothing moves it back.

use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId, ActorType};
use super::collision::cell_span;
use super::vector::Vector;
use crate::consts::DEFAULT_FINISH_DELAY;

/// Terrain kind of a grid cell; open cells are `None`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Obstacle {
    Wall,
    Lava,
}

/// Rows of cells; rows may be shorter than the level width
pub type Grid = Vec<Vec<Option<Obstacle>>>;

/// Final outcome of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Won,
    Lost,
}

/// What the player ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Touch {
    Obstacle(Obstacle),
    Actor(ActorType),
}

impl From<Obstacle> for Touch {
    fn from(obstacle: Obstacle) -> Self {
        Touch::Obstacle(obstacle)
    }
}

impl From<ActorType> for Touch {
    fn from(actor_type: ActorType) -> Self {
        Touch::Actor(actor_type)
    }
}

/// A playable level
#[derive(Debug, Clone, Serialize)]
pub struct Level {
    pub grid: Grid,
    /// Live actors in spawn order (row-major for parsed levels)
    pub actors: Vec<Actor>,
    /// First player-typed actor at construction
    player: Option<ActorId>,
    /// Longest row length
    pub width: usize,
    /// Number of rows
    pub height: usize,
    pub status: Option<Status>,
    /// Seconds left before a decided level counts as finished.
    /// The driver counts this down; the level never does.
    pub finish_delay: f64,
}

impl Default for Level {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl Level {
    pub fn new(grid: Grid, actors: Vec<Actor>) -> Self {
        let player = actors
            .iter()
            .find(|a| a.actor_type() == ActorType::Player)
            .map(|a| a.id);
        let height = grid.len();
        let width = grid.iter().map(Vec::len).max().unwrap_or(0);

        Self {
            grid,
            actors,
            player,
            width,
            height,
            status: None,
            finish_delay: DEFAULT_FINISH_DELAY,
        }
    }

    /// Override the post-outcome delay
    pub fn with_finish_delay(mut self, delay: f64) -> Self {
        self.finish_delay = delay;
        self
    }

    pub fn player_id(&self) -> Option<ActorId> {
        self.player
    }

    /// The player, if one was spawned and has not been removed
    pub fn player(&self) -> Option<&Actor> {
        let id = self.player?;
        self.actors.iter().find(|a| a.id == id)
    }

    pub fn player_mut(&mut self) -> Option<&mut Actor> {
        let id = self.player?;
        self.actors.iter_mut().find(|a| a.id == id)
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    /// True once the outcome is decided and the finish delay has run out
    pub fn is_finished(&self) -> bool {
        self.status.is_some() && self.finish_delay < 0.0
    }

    /// First actor (in spawn order) overlapping `actor`
    pub fn actor_at(&self, actor: &Actor) -> Option<&Actor> {
        // A lone actor has nothing to hit
        if self.actors.len() == 1 {
            return None;
        }
        self.actors.iter().find(|other| actor.is_intersect(other))
    }

    /// Terrain blocking a box at `pos` with `size`
    ///
    /// Anything below the bottom edge is lava; any other out-of-bounds
    /// position is wall. Inside the level, the first non-open cell under the
    /// box wins (row-major). Cells past the end of a short row are open.
    pub fn obstacle_at(&self, pos: Vector, size: Vector) -> Option<Obstacle> {
        let width = self.width as f64;
        let height = self.height as f64;

        if pos.y + size.y > height {
            return Some(Obstacle::Lava);
        }
        if pos.x < 0.0 || pos.x + size.x > width || pos.y < 0.0 {
            return Some(Obstacle::Wall);
        }

        let (rows, cols) = cell_span(pos, size);
        for y in rows {
            let Some(row) = self.grid.get(y) else {
                continue;
            };
            for x in cols.clone() {
                if let Some(Some(obstacle)) = row.get(x) {
                    return Some(*obstacle);
                }
            }
        }
        None
    }

    /// Remove the actor with this id; no-op if it is not present
    pub fn remove_actor(&mut self, id: ActorId) -> Option<Actor> {
        let index = self.actors.iter().position(|a| a.id == id)?;
        Some(self.actors.remove(index))
    }

    /// True if no live actor carries the given tag
    pub fn no_more_actors(&self, actor_type: ActorType) -> bool {
        !self.actors.iter().any(|a| a.actor_type() == actor_type)
    }

    /// Feed a player contact into the outcome latch
    ///
    /// Lava and fireballs lose the level. Collecting the last coin wins it.
    /// Once decided, further contacts are ignored.
    pub fn player_touched(&mut self, touch: impl Into<Touch>, actor: Option<ActorId>) {
        if self.status.is_some() {
            return;
        }

        match touch.into() {
            Touch::Obstacle(Obstacle::Lava) | Touch::Actor(ActorType::Fireball) => {
                self.finish(Status::Lost);
            }
            Touch::Actor(ActorType::Coin) => {
                let Some(id) = actor else {
                    return;
                };
                if self.remove_actor(id).is_some() {
                    log::debug!("Coin {} collected", id.get());
                }
                if self.no_more_actors(ActorType::Coin) {
                    self.finish(Status::Won);
                }
            }
            _ => {}
        }
    }

    fn finish(&mut self, status: Status) {
        log::info!("Level {:?}", status);
        self.status = Some(status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    const W: Option<Obstacle> = Some(Obstacle::Wall);
    const L: Option<Obstacle> = Some(Obstacle::Lava);

    fn v(x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }

    fn unit(x: f64, y: f64) -> Actor {
        Actor::new(v(x, y), v(1.0, 1.0), Vector::ZERO).unwrap()
    }

    fn coins(n: usize) -> Vec<Actor> {
        (0..n)
            .map(|i| Actor::coin(v(i as f64, 0.0), 0.0, &Settings::default()))
            .collect()
    }

    #[test]
    fn test_new_level_dimensions() {
        let grid = vec![vec![None; 3], vec![None; 7], vec![W; 5]];
        let level = Level::new(grid, Vec::new());
        assert_eq!(level.height, 3);
        assert_eq!(level.width, 7);
        assert_eq!(level.status, None);
        assert_eq!(level.finish_delay, 1.0);
        assert!(!level.is_finished());
    }

    #[test]
    fn test_empty_level() {
        let level = Level::default();
        assert_eq!((level.width, level.height), (0, 0));
        assert!(level.player().is_none());
        assert!(level.no_more_actors(ActorType::Coin));
    }

    #[test]
    fn test_player_lookup() {
        let player = Actor::player(v(1.0, 1.0), &Settings::default());
        let id = player.id;
        let second = Actor::player(v(2.0, 1.0), &Settings::default());
        let level = Level::new(Vec::new(), vec![unit(0.0, 0.0), player, second]);
        // First player wins
        assert_eq!(level.player().map(|p| p.id), Some(id));
        assert_eq!(level.player_id(), Some(id));
    }

    #[test]
    fn test_is_finished_needs_status_and_expired_delay() {
        let mut level = Level::default();
        level.finish_delay = -0.5;
        assert!(!level.is_finished());

        level.status = Some(Status::Won);
        assert!(level.is_finished());

        level.finish_delay = 0.0;
        assert!(!level.is_finished());
    }

    #[test]
    fn test_actor_at_lone_actor() {
        let only = unit(0.0, 0.0);
        let level = Level::new(vec![vec![None; 3]; 3], vec![only.clone()]);
        assert!(level.actor_at(&only).is_none());
        // Even a foreign overlapping actor finds nothing when the set has one member
        assert!(level.actor_at(&unit(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_actor_at_first_match_wins() {
        let probe = unit(0.0, 0.0);
        let first = unit(0.5, 0.5);
        let second = unit(0.2, 0.2);
        let far = unit(5.0, 5.0);
        let (first_id, second_id) = (first.id, second.id);

        let level = Level::new(
            vec![vec![None; 8]; 8],
            vec![probe.clone(), far, first, second],
        );
        assert_eq!(level.actor_at(&probe).map(|a| a.id), Some(first_id));

        // The later actor still sees the earlier one
        let later = level.actor(second_id).unwrap();
        assert_eq!(level.actor_at(later).map(|a| a.id), Some(probe.id));
    }

    #[test]
    fn test_actor_at_no_overlap() {
        let a = unit(0.0, 0.0);
        let level = Level::new(
            vec![vec![None; 4]; 4],
            vec![a.clone(), unit(1.0, 0.0), unit(3.0, 3.0)],
        );
        // Touching neighbour is not a hit
        assert!(level.actor_at(&a).is_none());
    }

    #[test]
    fn test_obstacle_below_level_is_lava() {
        let level = Level::new(vec![vec![None; 4]; 4], Vec::new());
        assert_eq!(level.obstacle_at(v(1.0, 3.5), v(1.0, 1.0)), Some(Obstacle::Lava));
        // Takes priority over horizontal bounds
        assert_eq!(level.obstacle_at(v(-5.0, 3.5), v(1.0, 1.0)), Some(Obstacle::Lava));
        assert_eq!(level.obstacle_at(v(10.0, 3.5), v(1.0, 1.0)), Some(Obstacle::Lava));
        // Bottom exactly on the edge is inside
        assert_eq!(level.obstacle_at(v(1.0, 3.0), v(1.0, 1.0)), None);
    }

    #[test]
    fn test_obstacle_out_of_bounds_is_wall() {
        let level = Level::new(vec![vec![None; 4]; 4], Vec::new());
        assert_eq!(level.obstacle_at(v(-0.1, 1.0), v(1.0, 1.0)), Some(Obstacle::Wall));
        assert_eq!(level.obstacle_at(v(3.5, 1.0), v(1.0, 1.0)), Some(Obstacle::Wall));
        assert_eq!(level.obstacle_at(v(1.0, -0.1), v(1.0, 1.0)), Some(Obstacle::Wall));
        // Right edge exactly on the boundary is inside
        assert_eq!(level.obstacle_at(v(3.0, 1.0), v(1.0, 1.0)), None);
    }

    #[test]
    fn test_obstacle_grid_scan() {
        let grid = vec![
            vec![None, None, None, None],
            vec![None, W, None, None],
            vec![None, None, None, L],
            vec![W, W, W, W],
        ];
        let level = Level::new(grid, Vec::new());

        assert_eq!(level.obstacle_at(v(0.0, 0.0), v(1.0, 1.0)), None);
        assert_eq!(level.obstacle_at(v(1.0, 1.0), v(1.0, 1.0)), Some(Obstacle::Wall));
        assert_eq!(level.obstacle_at(v(2.5, 2.0), v(0.8, 0.9)), Some(Obstacle::Lava));
        // Fractional box straddling the wall cell
        assert_eq!(level.obstacle_at(v(0.5, 0.5), v(0.8, 0.8)), Some(Obstacle::Wall));
        // Box ending exactly where the wall begins does not touch it
        assert_eq!(level.obstacle_at(v(0.0, 1.0), v(1.0, 1.0)), None);
    }

    #[test]
    fn test_obstacle_row_major_order() {
        // Wall on row 0 beats lava on row 1 even though lava is further left
        let grid = vec![vec![None, W], vec![L, None]];
        let level = Level::new(grid, Vec::new());
        assert_eq!(level.obstacle_at(v(0.0, 0.0), v(2.0, 2.0)), Some(Obstacle::Wall));
    }

    #[test]
    fn test_short_rows_are_open() {
        let grid = vec![vec![None], vec![None, None, None], vec![W, W, W]];
        let level = Level::new(grid, Vec::new());
        assert_eq!(level.width, 3);
        // Column 2 of row 0 does not exist: open, not wall
        assert_eq!(level.obstacle_at(v(2.0, 0.0), v(1.0, 1.0)), None);
    }

    #[test]
    fn test_remove_actor() {
        let a = unit(0.0, 0.0);
        let b = unit(1.0, 0.0);
        let (a_id, b_id) = (a.id, b.id);
        let mut level = Level::new(Vec::new(), vec![a, b]);

        assert_eq!(level.remove_actor(a_id).map(|a| a.id), Some(a_id));
        assert_eq!(level.actors.len(), 1);
        // Already gone
        assert!(level.remove_actor(a_id).is_none());
        assert_eq!(level.actors.len(), 1);
        assert_eq!(level.actors[0].id, b_id);
    }

    #[test]
    fn test_no_more_actors() {
        let level = Level::new(Vec::new(), vec![unit(0.0, 0.0)]);
        assert!(level.no_more_actors(ActorType::Coin));
        assert!(!level.no_more_actors(ActorType::Actor));
    }

    #[test]
    fn test_lava_and_fireball_lose() {
        let mut level = Level::default();
        level.player_touched(Obstacle::Lava, None);
        assert_eq!(level.status, Some(Status::Lost));

        let mut level = Level::default();
        level.player_touched(ActorType::Fireball, None);
        assert_eq!(level.status, Some(Status::Lost));
    }

    #[test]
    fn test_other_contacts_ignored() {
        let mut level = Level::new(Vec::new(), coins(1));
        level.player_touched(Obstacle::Wall, None);
        level.player_touched(ActorType::Player, None);
        level.player_touched(ActorType::Actor, None);
        // Coin without an actor is ignored too
        level.player_touched(ActorType::Coin, None);
        assert_eq!(level.status, None);
        assert_eq!(level.actors.len(), 1);
    }

    #[test]
    fn test_collecting_all_coins_wins() {
        let coins = coins(3);
        let ids: Vec<_> = coins.iter().map(|c| c.id).collect();
        let mut actors = coins;
        actors.push(unit(9.0, 9.0));
        let mut level = Level::new(Vec::new(), actors);

        for (i, id) in ids.iter().enumerate() {
            assert_eq!(level.status, None);
            level.player_touched(ActorType::Coin, Some(*id));
            assert_eq!(level.actors.len(), 4 - (i + 1));
        }
        assert_eq!(level.status, Some(Status::Won));
        assert!(level.no_more_actors(ActorType::Coin));
        assert!(level.actors.iter().all(|a| a.actor_type() != ActorType::Coin));
    }

    #[test]
    fn test_outcome_is_terminal() {
        let coins = coins(2);
        let ids: Vec<_> = coins.iter().map(|c| c.id).collect();
        let mut level = Level::new(Vec::new(), coins);

        level.player_touched(Obstacle::Lava, None);
        assert_eq!(level.status, Some(Status::Lost));

        // Collecting coins after losing changes nothing, not even the actor set
        level.player_touched(ActorType::Coin, Some(ids[0]));
        level.player_touched(ActorType::Coin, Some(ids[1]));
        assert_eq!(level.status, Some(Status::Lost));
        assert_eq!(level.actors.len(), 2);

        let mut won = Level::new(Vec::new(), Vec::new());
        won.status = Some(Status::Won);
        won.player_touched(ActorType::Fireball, None);
        assert_eq!(won.status, Some(Status::Won));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn touch_strategy() -> impl Strategy<Value = Touch> {
            prop_oneof![
                Just(Touch::Obstacle(Obstacle::Wall)),
                Just(Touch::Obstacle(Obstacle::Lava)),
                Just(Touch::Actor(ActorType::Actor)),
                Just(Touch::Actor(ActorType::Player)),
                Just(Touch::Actor(ActorType::Coin)),
                Just(Touch::Actor(ActorType::Fireball)),
            ]
        }

        proptest! {
            #[test]
            fn status_never_changes_once_set(
                touches in proptest::collection::vec((touch_strategy(), 0usize..4), 1..40)
            ) {
                let coins = coins(3);
                let ids: Vec<_> = coins.iter().map(|c| c.id).collect();
                let mut level = Level::new(Vec::new(), coins);
                let mut decided = None;

                for (touch, pick) in touches {
                    let actor = ids.get(pick).copied();
                    level.player_touched(touch, actor);
                    if let Some(status) = decided {
                        prop_assert_eq!(level.status, Some(status));
                    }
                    decided = level.status;
                }
            }

            #[test]
            fn lava_whenever_bottom_below_level(
                x in -20.0f64..20.0,
                overshoot in 0.001f64..10.0,
                h in 0.1f64..3.0,
            ) {
                let level = Level::new(vec![vec![None; 5]; 5], Vec::new());
                let pos = Vector::new(x, 5.0 - h + overshoot);
                prop_assert_eq!(level.obstacle_at(pos, Vector::new(1.0, h)), Some(Obstacle::Lava));
            }
        }
    }
}
