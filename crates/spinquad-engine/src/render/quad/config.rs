use glam::Vec3;

use crate::paint::Color;

use super::transforms::{DEFAULT_TRANSLATION, ProjectionParams};

/// Tunables of the quad scene. Defaults reproduce the classic demo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadConfig {
    pub clear_color: Color,
    pub projection: ProjectionParams,
    pub translation: Vec3,
}

impl Default for QuadConfig {
    fn default() -> Self {
        Self {
            clear_color: Color::BLACK,
            projection: ProjectionParams::DEFAULT,
            translation: DEFAULT_TRANSLATION,
        }
    }
}
