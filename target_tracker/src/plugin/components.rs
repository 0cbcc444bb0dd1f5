use bevy::prelude::*;

/// A world object the scanner may pick up. `kind` is matched against the
/// configured target kind.
#[derive(Component, Clone, Debug)]
pub struct Trackable {
    pub kind: String,
    pub width: f32,
    pub height: f32,
}

impl Trackable {
    pub fn new(kind: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            kind: kind.into(),
            width,
            height,
        }
    }
}

/// Marks the entity whose transform is the observer's eye. Feet sit
/// `eye_height` below it.
#[derive(Component, Clone, Copy, Debug)]
pub struct Viewpoint {
    pub eye_height: f32,
}

impl Default for Viewpoint {
    fn default() -> Self {
        Self { eye_height: 1.62 }
    }
}
