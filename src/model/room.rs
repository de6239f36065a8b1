//! Room and measurement inputs.

use serde::{Deserialize, Serialize};

/// A rectangular room footprint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Optional label used in reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Room width.
    pub width: f64,
    /// Room length.
    pub length: f64,
}

impl Room {
    /// Create an unnamed room.
    pub fn new(width: f64, length: f64) -> Self {
        Self {
            name: None,
            width,
            length,
        }
    }

    /// Attach a label.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Floor (or ceiling) area.
    pub fn area(&self) -> f64 {
        self.width * self.length
    }

    /// Perimeter length.
    pub fn perimeter(&self) -> f64 {
        2.0 * (self.width + self.length)
    }

    /// Label for messages: the name, or the 1-based position.
    pub fn label(&self, index: usize) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("Room {}", index + 1),
        }
    }
}

/// A piece size to check against a panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub width: f64,
    pub length: f64,
}

impl Measurement {
    pub fn new(width: f64, length: f64) -> Self {
        Self {
            label: None,
            width,
            length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_area_and_perimeter() {
        let room = Room::new(3.8, 2.7);
        assert!((room.area() - 10.26).abs() < 1e-9);
        assert!((room.perimeter() - 13.0).abs() < 1e-9);
    }

    #[test]
    fn test_room_label() {
        assert_eq!(Room::new(1.0, 1.0).label(2), "Room 3");
        assert_eq!(Room::new(1.0, 1.0).named("Kitchen").label(0), "Kitchen");
    }

    #[test]
    fn test_room_deserialize_without_name() {
        let room: Room = serde_json::from_str(r#"{"width": 3.8, "length": 2.7}"#).unwrap();
        assert_eq!(room, Room::new(3.8, 2.7));
    }
}
