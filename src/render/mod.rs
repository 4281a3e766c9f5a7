pub mod globe;

#[cfg(test)]
pub(crate) mod recording;

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use crate::catalog::coords::Position;

/// Camera transition length when switching projection, in seconds.
pub const MORPH_DURATION_SECS: f32 = 0.8;
/// Camera flight length when focusing an entity, in seconds.
pub const FLY_TO_DURATION_SECS: f32 = 1.2;

/// Projection used by the map view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProjectionMode {
    /// Flat equirectangular map
    TwoD,
    /// Orthographic globe
    #[default]
    ThreeD,
}

impl ProjectionMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::TwoD => "2D Map",
            Self::ThreeD => "3D Globe",
        }
    }
}

impl fmt::Display for ProjectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TwoD => "2d",
            Self::ThreeD => "3d",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown projection mode {0:?} (expected \"2d\" or \"3d\")")]
pub struct ParseModeError(String);

impl FromStr for ProjectionMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "2d" => Ok(Self::TwoD),
            "3d" => Ok(Self::ThreeD),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

/// Point style for rendered entities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityStyle {
    pub pixel_size: f32,
    pub color: [u8; 3],
    pub outline_color: [u8; 3],
    pub outline_width: f32,
}

impl Default for EntityStyle {
    fn default() -> Self {
        Self {
            pixel_size: 8.0,
            color: [0, 255, 255],
            outline_color: [0, 0, 0],
            outline_width: 1.0,
        }
    }
}

/// Command surface of whatever draws the catalog.
///
/// Commands are fire-and-forget. The only value flowing back is the opaque
/// handle returned by [`RenderTarget::add_entity`]; callers keep their own
/// bookkeeping and never query the target for its entities.
pub trait RenderTarget {
    type Handle: Copy + Eq + Hash + fmt::Debug;

    fn clear_all_entities(&mut self);

    fn add_entity(&mut self, position: Position, label: &str, description: &str) -> Self::Handle;

    fn set_selected_entity(&mut self, handle: Self::Handle);

    fn fly_to_entity(&mut self, handle: Self::Handle, duration_secs: f32);

    fn morph_projection(&mut self, target: ProjectionMode, duration_secs: f32);
}
