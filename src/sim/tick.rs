//! Fixed timestep simulation tick
//!
//! Advances every actor once, in actor order, then resolves what the player
//! is touching. How pressed keys move the player belongs to the driver and
//! comes in through [`PlayerController`].

use super::actor::Actor;
use super::level::{Level, Obstacle};
use crate::consts::{MAX_STEP, MAX_SUBSTEPS};

/// Directional keys held during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub up: bool,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub controls: Controls,
}

/// Driver-owned mapping from controls to player motion
pub trait PlayerController {
    /// Update the player's `pos`/`speed`; called on the player's turn
    fn steer(&mut self, player: &mut Actor, controls: Controls, dt: f64, level: &Level);
}

/// Leaves the player where it is
#[derive(Debug, Clone, Copy, Default)]
pub struct Idle;

impl PlayerController for Idle {
    fn steer(&mut self, _player: &mut Actor, _controls: Controls, _dt: f64, _level: &Level) {}
}

impl<F> PlayerController for F
where
    F: FnMut(&mut Actor, Controls, f64, &Level),
{
    fn steer(&mut self, player: &mut Actor, controls: Controls, dt: f64, level: &Level) {
        self(player, controls, dt, level)
    }
}

/// Advance the level by one step of `dt` seconds
pub fn tick<C: PlayerController + ?Sized>(
    level: &mut Level,
    input: &TickInput,
    dt: f64,
    controller: &mut C,
) {
    let player_id = level.player_id();

    // Each actor works on a copy so it can query the level it lives in
    for index in 0..level.actors.len() {
        let mut actor = level.actors[index].clone();
        if Some(actor.id) == player_id {
            controller.steer(&mut actor, input.controls, dt, level);
        }
        actor.act(dt, level);
        level.actors[index] = actor;
    }

    resolve_player_contacts(level);

    if level.status.is_some() {
        level.finish_delay -= dt;
    }
}

/// Feed lava and actor contacts of the player into the outcome latch
fn resolve_player_contacts(level: &mut Level) {
    if level.status.is_some() {
        return;
    }
    let Some(player) = level.player() else {
        return;
    };

    let in_lava = level.obstacle_at(player.pos, player.size) == Some(Obstacle::Lava);
    let contact = level
        .actor_at(player)
        .map(|other| (other.actor_type(), other.id));

    if in_lava {
        level.player_touched(Obstacle::Lava, None);
    } else if let Some((actor_type, id)) = contact {
        level.player_touched(actor_type, Some(id));
    }
}

/// Advance by `elapsed` seconds in steps no longer than `MAX_STEP`
///
/// At most `MAX_SUBSTEPS` steps run per call; leftover time is dropped.
/// Returns whether the level has finished.
pub fn advance<C: PlayerController + ?Sized>(
    level: &mut Level,
    input: &TickInput,
    elapsed: f64,
    controller: &mut C,
) -> bool {
    let mut remaining = elapsed.max(0.0);
    let mut substeps = 0;
    while remaining > 0.0 && substeps < MAX_SUBSTEPS {
        let dt = remaining.min(MAX_STEP);
        tick(level, input, dt, controller);
        remaining -= dt;
        substeps += 1;
    }
    level.is_finished()
}
