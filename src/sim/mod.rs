//! Deterministic simulation module
//!
//! All gameplay rules live here. This module must stay pure:
//! - Time only enters through `dt`
//! - Seeded RNG only (coin phases)
//! - Stable iteration order (actor spawn order)
//! - No rendering, input or platform dependencies

pub mod actor;
pub mod collision;
pub mod level;
pub mod parser;
pub mod tick;
pub mod vector;

pub use actor::{Actor, ActorId, ActorKind, ActorType, Fireball, FireballMotion, Spring};
pub use collision::{Bounds, bounds_overlap, cell_span};
pub use level::{Grid, Level, Obstacle, Status, Touch};
pub use parser::{LevelParser, Spawn, SymbolTable};
pub use tick::{Controls, Idle, PlayerController, TickInput, advance, tick};
pub use vector::{Vector, VectorOps};
