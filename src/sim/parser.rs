//! ASCII plan → `Level`
//!
//! A plan is a list of text rows. `x` is wall, `!` is lava, and characters
//! found in the symbol table spawn actors at their cell. Everything else is
//! open space.

use std::collections::HashMap;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::level::{Grid, Level, Obstacle};
use super::vector::Vector;
use crate::SimError;
use crate::consts::DEFAULT_COIN_SEED;
use crate::settings::Settings;

/// Actor variants a plan symbol can spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Spawn {
    Player,
    Coin,
    HorizontalFireball,
    VerticalFireball,
    FireRain,
    /// Mapped symbol that produces no actor (unknown names load as this)
    Inert,
}

impl From<String> for Spawn {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl Spawn {
    pub fn from_name(name: &str) -> Self {
        match name {
            "player" => Spawn::Player,
            "coin" => Spawn::Coin,
            "horizontal_fireball" => Spawn::HorizontalFireball,
            "vertical_fireball" => Spawn::VerticalFireball,
            "fire_rain" => Spawn::FireRain,
            _ => Spawn::Inert,
        }
    }

    /// Construct the actor for the cell at `anchor`
    pub fn build<R: Rng + ?Sized>(
        self,
        anchor: Vector,
        settings: &Settings,
        rng: &mut R,
    ) -> Option<Actor> {
        match self {
            Spawn::Player => Some(Actor::player(anchor, settings)),
            Spawn::Coin => Some(Actor::coin_with_rng(anchor, rng, settings)),
            Spawn::HorizontalFireball => Some(Actor::horizontal_fireball(anchor, settings)),
            Spawn::VerticalFireball => Some(Actor::vertical_fireball(anchor, settings)),
            Spawn::FireRain => Some(Actor::fire_rain(anchor, settings)),
            Spawn::Inert => None,
        }
    }
}

/// Plan symbol → actor variant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolTable(HashMap<char, Spawn>);

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// `@` player, `v` fire rain, `=` horizontal fireball, `o` coin
    pub fn standard() -> Self {
        [
            ('@', Spawn::Player),
            ('v', Spawn::FireRain),
            ('=', Spawn::HorizontalFireball),
            ('o', Spawn::Coin),
        ]
        .into_iter()
        .collect()
    }

    pub fn with(mut self, symbol: char, spawn: Spawn) -> Self {
        self.insert(symbol, spawn);
        self
    }

    pub fn insert(&mut self, symbol: char, spawn: Spawn) -> Option<Spawn> {
        self.0.insert(symbol, spawn)
    }

    pub fn get(&self, symbol: char) -> Option<Spawn> {
        self.0.get(&symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse a JSON object such as `{"@": "player", "o": "coin"}`
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl FromIterator<(char, Spawn)> for SymbolTable {
    fn from_iter<I: IntoIterator<Item = (char, Spawn)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Builds levels from plans; reusable across any number of plans
#[derive(Debug, Clone, Default)]
pub struct LevelParser {
    /// `None` means no actors are ever spawned
    symbols: Option<SymbolTable>,
    settings: Settings,
    /// Seed for coin phases; each parse restarts from it
    seed: u64,
}

impl LevelParser {
    pub fn new(symbols: SymbolTable) -> Self {
        Self {
            symbols: Some(symbols),
            settings: Settings::default(),
            seed: DEFAULT_COIN_SEED,
        }
    }

    /// Parser that only reads terrain
    pub fn without_symbols() -> Self {
        Self {
            symbols: None,
            settings: Settings::default(),
            seed: DEFAULT_COIN_SEED,
        }
    }

    /// Use `settings` for every actor this parser builds, once they pass validation
    pub fn with_settings(mut self, settings: Settings) -> Result<Self, SimError> {
        settings.validate()?;
        self.settings = settings;
        Ok(self)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// `x` → wall, `!` → lava, anything else (or nothing) → open
    pub fn obstacle_from_symbol(symbol: impl Into<Option<char>>) -> Option<Obstacle> {
        match symbol.into() {
            Some('x') => Some(Obstacle::Wall),
            Some('!') => Some(Obstacle::Lava),
            _ => None,
        }
    }

    /// Look up the variant a symbol spawns
    pub fn actor_from_symbol(&self, symbol: impl Into<Option<char>>) -> Option<Spawn> {
        let symbol = symbol.into()?;
        self.symbols.as_ref()?.get(symbol)
    }

    /// One grid row per plan row, one cell per character
    pub fn create_grid<S: AsRef<str>>(&self, plan: &[S]) -> Grid {
        plan.iter()
            .map(|row| row.as_ref().chars().map(|c| Self::obstacle_from_symbol(c)).collect())
            .collect()
    }

    /// Spawn actors in row-major order, at `(column, row)`
    pub fn create_actors<S: AsRef<str>>(&self, plan: &[S]) -> Vec<Actor> {
        if plan.is_empty() || self.symbols.is_none() {
            return Vec::new();
        }

        let mut rng = Pcg32::seed_from_u64(self.seed);
        let mut actors = Vec::new();
        for (y, row) in plan.iter().enumerate() {
            for (x, symbol) in row.as_ref().chars().enumerate() {
                let Some(spawn) = self.actor_from_symbol(symbol) else {
                    continue;
                };
                let anchor = Vector::new(x as f64, y as f64);
                if let Some(actor) = spawn.build(anchor, &self.settings, &mut rng) {
                    actors.push(actor);
                }
            }
        }
        actors
    }

    pub fn parse<S: AsRef<str>>(&self, plan: &[S]) -> Level {
        let grid = self.create_grid(plan);
        let actors = self.create_actors(plan);
        log::debug!("Parsed plan: {} rows, {} actors", grid.len(), actors.len());
        Level::new(grid, actors).with_finish_delay(self.settings.finish_delay)
    }
}
