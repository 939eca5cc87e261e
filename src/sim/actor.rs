//! Actors: every moving or collectable thing in a level
//!
//! An actor is an axis-aligned box with a velocity and a variant tag. The
//! variants share all geometry; only `act` and `handle_obstacle` differ.

use std::sync::atomic::{AtomicU32, Ordering};

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Bounds, bounds_overlap};
use super::level::Level;
use super::vector::{Vector, VectorOps, ensure_finite};
use crate::SimError;
use crate::consts::*;
use crate::settings::Settings;

static NEXT_ACTOR_ID: AtomicU32 = AtomicU32::new(1);

/// Identity of an actor, independent of where it is
///
/// Clones of an actor keep its id and therefore count as the same actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActorId(u32);

impl ActorId {
    /// Allocate a fresh, never-reused id
    pub fn next() -> Self {
        Self(NEXT_ACTOR_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

/// Type tag reported to the outcome state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorType {
    Actor,
    Player,
    Coin,
    Fireball,
}

impl ActorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorType::Actor => "actor",
            ActorType::Player => "player",
            ActorType::Coin => "coin",
            ActorType::Fireball => "fireball",
        }
    }
}

/// Sinusoidal bobbing around a fixed anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Spring {
    /// Rest position the coin bobs around
    pub anchor: Vector,
    /// Current phase (radians, unbounded)
    pub phase: f64,
    pub speed: f64,
    pub dist: f64,
}

impl Spring {
    /// Advance the phase by `time` seconds
    pub fn update(&mut self, time: f64) {
        self.phase += self.speed * time;
    }

    /// Vertical offset from the anchor at the current phase
    pub fn offset(&self) -> Vector {
        Vector::new(0.0, self.phase.sin() * self.dist)
    }
}

/// How a fireball moves and what it does when blocked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FireballMotion {
    /// Free velocity, reverses when blocked
    Bouncing,
    /// Patrols left/right
    Horizontal,
    /// Patrols up/down
    Vertical,
    /// Falls and restarts from its spawn point
    Rain,
}

impl FireballMotion {
    /// Whether hitting an obstacle sends the fireball back to its spawn point
    pub fn resets_on_obstacle(self) -> bool {
        matches!(self, FireballMotion::Rain)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Fireball {
    pub motion: FireballMotion,
    /// Spawn position (restart point for rain)
    pub start: Vector,
}

/// Variant-specific state
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ActorKind {
    /// Bare actor with no behaviour
    Plain,
    /// Moved by the driver's controller, never by `act`
    Player,
    Coin(Spring),
    Fireball(Fireball),
}

/// A positioned, sized box with per-variant tick behaviour
#[derive(Debug, Clone, Serialize)]
pub struct Actor {
    pub id: ActorId,
    pub pos: Vector,
    pub size: Vector,
    pub speed: Vector,
    pub kind: ActorKind,
}

impl Default for Actor {
    fn default() -> Self {
        Self {
            id: ActorId::next(),
            pos: Vector::ZERO,
            size: Vector::ONE,
            speed: Vector::ZERO,
            kind: ActorKind::Plain,
        }
    }
}

impl Actor {
    /// Create a plain actor, checking the rectangle is well formed
    pub fn new(pos: Vector, size: Vector, speed: Vector) -> Result<Self, SimError> {
        let pos = ensure_finite("pos", pos)?;
        let size = ensure_finite("size", size)?;
        let speed = ensure_finite("speed", speed)?;
        if size.x <= 0.0 || size.y <= 0.0 {
            return Err(SimError::NonPositiveSize {
                x: size.x,
                y: size.y,
            });
        }

        Ok(Self {
            id: ActorId::next(),
            pos,
            size,
            speed,
            kind: ActorKind::Plain,
        })
    }

    fn with_kind(pos: Vector, size: Vector, speed: Vector, kind: ActorKind) -> Self {
        Self {
            id: ActorId::next(),
            pos,
            size,
            speed,
            kind,
        }
    }

    /// Player standing on the tile at `anchor`
    pub fn player(anchor: Vector, settings: &Settings) -> Self {
        Self::with_kind(
            anchor.plus(PLAYER_SPAWN_OFFSET),
            Vector::new(PLAYER_WIDTH, settings.player_height),
            Vector::ZERO,
            ActorKind::Player,
        )
    }

    /// Coin in the tile at `anchor`, starting at the given spring phase
    pub fn coin(anchor: Vector, phase: f64, settings: &Settings) -> Self {
        let pos = anchor.plus(COIN_SPAWN_OFFSET);
        Self::with_kind(
            pos,
            COIN_SIZE,
            Vector::ZERO,
            ActorKind::Coin(Spring {
                anchor: pos,
                phase,
                speed: settings.coin_spring_speed,
                dist: settings.coin_spring_dist,
            }),
        )
    }

    /// Coin with a phase drawn uniformly from `[0, 2π)`
    pub fn coin_with_rng<R: Rng + ?Sized>(
        anchor: Vector,
        rng: &mut R,
        settings: &Settings,
    ) -> Self {
        let phase = rng.random_range(0.0..std::f64::consts::TAU);
        Self::coin(anchor, phase, settings)
    }

    /// Fireball with an arbitrary velocity that reverses on contact
    pub fn fireball(pos: Vector, speed: Vector) -> Result<Self, SimError> {
        let pos = ensure_finite("pos", pos)?;
        let speed = ensure_finite("speed", speed)?;
        Ok(Self::fireball_with(pos, speed, FireballMotion::Bouncing))
    }

    pub fn horizontal_fireball(pos: Vector, settings: &Settings) -> Self {
        let speed = Vector::new(settings.horizontal_fireball_speed, 0.0);
        Self::fireball_with(pos, speed, FireballMotion::Horizontal)
    }

    pub fn vertical_fireball(pos: Vector, settings: &Settings) -> Self {
        let speed = Vector::new(0.0, settings.vertical_fireball_speed);
        Self::fireball_with(pos, speed, FireballMotion::Vertical)
    }

    pub fn fire_rain(pos: Vector, settings: &Settings) -> Self {
        let speed = Vector::new(0.0, settings.fire_rain_speed);
        Self::fireball_with(pos, speed, FireballMotion::Rain)
    }

    fn fireball_with(pos: Vector, speed: Vector, motion: FireballMotion) -> Self {
        Self::with_kind(
            pos,
            FIREBALL_SIZE,
            speed,
            ActorKind::Fireball(Fireball { motion, start: pos }),
        )
    }

    pub fn actor_type(&self) -> ActorType {
        match self.kind {
            ActorKind::Plain => ActorType::Actor,
            ActorKind::Player => ActorType::Player,
            ActorKind::Coin(_) => ActorType::Coin,
            ActorKind::Fireball(_) => ActorType::Fireball,
        }
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.pos.y + self.size.y
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_pos_size(self.pos, self.size)
    }

    /// True if the two boxes overlap; an actor never collides with itself
    pub fn is_intersect(&self, other: &Actor) -> bool {
        if self.id == other.id {
            return false;
        }
        bounds_overlap(&self.bounds(), &other.bounds())
    }

    /// Where straight-line motion puts the actor after `time` seconds
    pub fn next_position(&self, time: f64) -> Vector {
        self.pos.plus(self.speed.times(time))
    }

    /// React to being blocked: rain restarts, other fireballs reverse
    pub fn handle_obstacle(&mut self) {
        if let ActorKind::Fireball(fireball) = self.kind {
            if fireball.motion.resets_on_obstacle() {
                self.pos = fireball.start;
            } else {
                self.speed = self.speed.times(-1.0);
            }
        }
    }

    /// Advance this actor by `time` seconds
    ///
    /// Only this actor's own `pos`/`speed`/spring change. Players are left
    /// alone; the driver moves them.
    pub fn act(&mut self, time: f64, level: &Level) {
        match self.kind {
            ActorKind::Plain | ActorKind::Player => {}
            ActorKind::Coin(mut spring) => {
                spring.update(time);
                self.pos = spring.anchor.plus(spring.offset());
                self.kind = ActorKind::Coin(spring);
            }
            ActorKind::Fireball(_) => {
                let next = self.next_position(time);
                if level.obstacle_at(next, self.size).is_none() {
                    self.pos = next;
                } else {
                    self.handle_obstacle();
                }
            }
        }
    }
}
