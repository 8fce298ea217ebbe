//! Warp records and the coordinates they carry.

use std::fmt;

use serde::Serialize;

/// A point in a world. Coordinates are kept at full `f64` precision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.x, self.y, self.z)
    }
}

/// A world name paired with a position inside it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Location {
    pub world: String,
    pub position: Position,
}

impl Location {
    pub fn new(world: impl Into<String>, position: Position) -> Self {
        Self {
            world: world.into(),
            position,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in world '{}'", self.position, self.world)
    }
}

/// A named, persisted waypoint.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Warp {
    pub name: String,
    pub position: Position,
    pub world: String,
}

impl Warp {
    pub fn location(&self) -> Location {
        Location::new(self.world.clone(), self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_display_is_comma_separated() {
        let pos = Position::new(10.0, 70.5, -5.0);
        assert_eq!(pos.to_string(), "10, 70.5, -5");
    }

    #[test]
    fn non_finite_positions_are_detected() {
        assert!(Position::new(0.0, 64.0, 0.0).is_finite());
        assert!(!Position::new(f64::NAN, 0.0, 0.0).is_finite());
        assert!(!Position::new(0.0, f64::INFINITY, 0.0).is_finite());
    }

    #[test]
    fn warp_serializes_to_json() -> anyhow::Result<()> {
        let warp = Warp {
            name: "spawn".into(),
            position: Position::new(0.0, 64.0, 0.0),
            world: "world".into(),
        };
        let json = serde_json::to_value(&warp)?;
        assert_eq!(json["name"], "spawn");
        assert_eq!(json["position"]["y"], 64.0);
        assert_eq!(json["world"], "world");
        Ok(())
    }
}
