//! Lenient obstacle parsing: bad records are skipped with a warning, good ones survive.

use serde_json::Value;

use crate::foundation::{core::Obstacle, error::WalltraceError};

const FIELDS: [&str; 4] = ["x", "y", "width", "height"];

/// Result of [`parse_obstacles`]: usable obstacles plus one warning per skipped record.
#[derive(Debug, Default)]
pub struct ParsedObstacles {
    pub obstacles: Vec<Obstacle>,
    pub warnings: Vec<WalltraceError>,
}

impl ParsedObstacles {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Turn raw JSON records into obstacles, in input order.
///
/// A record is skipped when it is not an object, misses one of `x`, `y`, `width`, `height`, or
/// holds a non-numeric, non-finite or negative value there.
pub fn parse_obstacles(records: &[Value]) -> ParsedObstacles {
    let mut out = ParsedObstacles::default();
    for (index, record) in records.iter().enumerate() {
        match parse_record(record) {
            Ok(obstacle) => out.obstacles.push(obstacle),
            Err(reason) => {
                tracing::warn!(index, %reason, "skipping malformed obstacle");
                out.warnings
                    .push(WalltraceError::malformed_obstacle(index, reason));
            }
        }
    }
    out
}

fn parse_record(record: &Value) -> Result<Obstacle, String> {
    let Some(map) = record.as_object() else {
        return Err("expected an object with x, y, width, height".to_string());
    };

    let mut values = [0.0f64; 4];
    for (slot, field) in values.iter_mut().zip(FIELDS) {
        let raw = map
            .get(field)
            .ok_or_else(|| format!("missing field '{field}'"))?;
        let v = numeric(raw).ok_or_else(|| format!("field '{field}' is not a number"))?;
        if !v.is_finite() {
            return Err(format!("field '{field}' is not finite"));
        }
        if v < 0.0 {
            return Err(format!("field '{field}' is negative ({v})"));
        }
        *slot = v;
    }

    let [x, y, width, height] = values;
    Ok(Obstacle::new(x, y, width, height))
}

/// Numbers, or strings holding a number (form inputs arrive as text).
fn numeric(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/input/obstacles.rs"]
mod tests;
