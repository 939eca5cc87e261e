//! ASCII level plans
//!
//! A plan is a list of rows. Plan files are JSON arrays of plans:
//! `[["  o ", "@ xx"], [...]]`.

use std::path::Path;

use crate::SimError;

/// One level layout, top row first
pub type Plan = Vec<String>;

const MEADOW: &[&str] = &[
    "            ",
    "        oooo",
    "         xxx",
    "    =       ",
    "     ooo    ",
    "     xxxx   ",
    " @          ",
    "xxxx!!!!!!!!",
    "            ",
];

const RAINFALL: &[&str] = &[
    "        v    ",
    "    v        ",
    "             ",
    "    o o o    ",
    "  o o      x ",
    "@     x      ",
    "xxx          ",
    "!!!!!!!!!!!!!",
];

/// The two bundled plans
pub fn builtin() -> Vec<Plan> {
    [MEADOW, RAINFALL]
        .iter()
        .map(|rows| rows.iter().map(|row| row.to_string()).collect())
        .collect()
}

pub fn from_json(json: &str) -> Result<Vec<Plan>, SimError> {
    Ok(serde_json::from_str(json)?)
}

/// Read a JSON plan file
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Plan>, SimError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let plans = from_json(&json)?;
    log::info!("Loaded {} plans from {}", plans.len(), path.display());
    Ok(plans)
}
