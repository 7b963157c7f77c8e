use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::{
    foundation::{
        core::{Wall, Waypoint},
        error::WalltraceResult,
    },
    input::obstacles::{ParsedObstacles, parse_obstacles},
};

/// Sweep width the planner assumes when the document leaves it out.
pub const DEFAULT_COVERAGE_WIDTH: f64 = 0.15;

fn default_coverage_width() -> f64 {
    DEFAULT_COVERAGE_WIDTH
}

/// One run as entered by a user: wall size, tool width and raw obstacle records.
///
/// The JSON shape is the planner request, so the same document can be sent upstream.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RunConfig {
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_coverage_width")]
    pub coverage_width: f64,
    #[serde(default)]
    pub obstacles: Vec<serde_json::Value>,
}

impl RunConfig {
    pub fn from_path(path: &Path) -> WalltraceResult<Self> {
        let f = File::open(path)
            .with_context(|| format!("open run config '{}'", path.display()))?;
        Ok(serde_json::from_reader(BufReader::new(f))?)
    }

    pub fn from_json_str(json: &str) -> WalltraceResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn wall(&self) -> WalltraceResult<Wall> {
        Wall::new(self.width, self.height)
    }

    pub fn parsed_obstacles(&self) -> ParsedObstacles {
        parse_obstacles(&self.obstacles)
    }
}

/// Read a waypoint list (`[{"x": .., "y": ..}, ..]`) from disk.
pub fn read_waypoints(path: &Path) -> WalltraceResult<Vec<Waypoint>> {
    let f = File::open(path).with_context(|| format!("open waypoints '{}'", path.display()))?;
    Ok(serde_json::from_reader(BufReader::new(f))?)
}

#[cfg(test)]
#[path = "../../tests/unit/input/config.rs"]
mod tests;
