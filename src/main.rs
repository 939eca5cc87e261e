//! Lava Dash entry point
//!
//! Headless native driver: parses each plan on its own, runs it with a
//! scripted walker until the level finishes, and reports the outcome.
//!
//! Usage: `lava-dash [plans.json] [settings.json]`

mod native {
    use std::time::{SystemTime, UNIX_EPOCH};

    use lava_dash::consts::{DEFAULT_COIN_SEED, SIM_DT};
    use lava_dash::plans::{self, Plan};
    use lava_dash::{Settings, SimError};
    use lava_dash::sim::{
        Actor, Controls, Level, LevelParser, Obstacle, PlayerController, Status, SymbolTable,
        TickInput, Vector, advance,
    };

    /// Horizontal walking speed (tiles/s)
    const WALK_SPEED: f64 = 7.0;
    /// Downward acceleration (tiles/s²)
    const GRAVITY: f64 = 30.0;
    /// Upward speed at the start of a jump (tiles/s)
    const JUMP_SPEED: f64 = 17.0;
    /// Give up after one minute of simulated time
    const MAX_FRAMES: u32 = 60 * 60;

    /// Arcade movement: walls block, lava and open space do not
    #[derive(Debug, Default)]
    pub struct Walker;

    impl PlayerController for Walker {
        fn steer(&mut self, player: &mut Actor, controls: Controls, dt: f64, level: &Level) {
            let mut speed_x = 0.0;
            if controls.left {
                speed_x -= WALK_SPEED;
            }
            if controls.right {
                speed_x += WALK_SPEED;
            }
            player.speed.x = speed_x;

            let next = player.pos + Vector::new(speed_x * dt, 0.0);
            if level.obstacle_at(next, player.size) != Some(Obstacle::Wall) {
                player.pos = next;
            }

            player.speed.y += dt * GRAVITY;
            let next = player.pos + Vector::new(0.0, player.speed.y * dt);
            if level.obstacle_at(next, player.size) == Some(Obstacle::Wall) {
                player.speed.y = if controls.up && player.speed.y > 0.0 {
                    -JUMP_SPEED
                } else {
                    0.0
                };
            } else {
                player.pos = next;
            }
        }
    }

    /// Run one level to completion; returns the outcome and frames used
    pub fn run(level: &mut Level) -> (Option<Status>, u32) {
        let input = TickInput {
            controls: Controls {
                right: true,
                up: true,
                ..Default::default()
            },
        };
        let mut walker = Walker;

        for frame in 0..MAX_FRAMES {
            if advance(level, &input, SIM_DT, &mut walker) {
                return (level.status, frame + 1);
            }
        }
        (level.status, MAX_FRAMES)
    }

    fn load_plans(path: Option<&String>) -> Vec<Plan> {
        let Some(path) = path else {
            return plans::builtin();
        };
        match plans::load(path) {
            Ok(plans) => plans,
            Err(e) => {
                log::error!("Cannot load plans from {}: {}", path, e);
                std::process::exit(1);
            }
        }
    }

    /// Coin phases differ from run to run
    fn run_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or(DEFAULT_COIN_SEED)
    }

    /// Parser for this run: checked settings, coin phases from `seed`
    pub fn build_parser(settings: Settings, seed: u64) -> Result<LevelParser, SimError> {
        Ok(LevelParser::new(SymbolTable::standard())
            .with_settings(settings)?
            .with_seed(seed))
    }

    pub fn main() {
        env_logger::init();
        log::info!("Lava Dash starting...");

        let args: Vec<String> = std::env::args().skip(1).collect();
        let plans = load_plans(args.first());
        let settings = args
            .get(1)
            .map(|path| Settings::load(path))
            .unwrap_or_default();
        log::info!("Using {} preset", settings.preset.as_str());

        let seed = run_seed();
        let parser = match build_parser(settings, seed) {
            Ok(parser) => parser,
            Err(e) => {
                log::error!("Invalid settings: {}", e);
                std::process::exit(1);
            }
        };
        log::info!("Parser initialized with seed: {}", seed);

        for (index, plan) in plans.iter().enumerate() {
            let mut level = parser.parse(plan);
            let (status, frames) = run(&mut level);

            let outcome = match status {
                Some(Status::Won) => "won",
                Some(Status::Lost) => "lost",
                None => "unfinished",
            };
            let seconds = frames as f64 * SIM_DT;
            log::info!("Level {} {} after {} frames", index + 1, outcome, frames);
            println!(
                "Level {}: {} after {:.2}s ({} actors left)",
                index + 1,
                outcome,
                seconds,
                level.actors.len()
            );

            if log::log_enabled!(log::Level::Debug) {
                match serde_json::to_string(&level) {
                    Ok(json) => log::debug!("Final snapshot: {}", json),
                    Err(e) => log::warn!("Snapshot failed: {}", e),
                }
            }
        }
    }
}

fn main() {
    native::main();
}
