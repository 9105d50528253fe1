/// Voxcube Core Library - rigid solids rendered as pseudo-perspective point clouds
///
/// This library provides the geometry, rigid transforms, the world/pixel
/// coordinate grid and the point renderers. Drawing goes through the
/// RenderSurface trait so any raster target can be plugged in.

pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod projection;
pub mod session;
pub mod surface;
pub mod transform;

// Re-export commonly used types
pub use config::SessionConfig;
pub use error::{ConfigError, Result, VoxcubeError};
pub use geometry::{Edge, Offset, Point, Solid, Surface, Topology, CUBE};
pub use grid::{Axis, AxisRange, CoordinateGrid, Resolution, Voxel};
pub use projection::{
    FlatDisc, Palette, PlotStats, PointRenderer, PointStyle, RenderStyle, RendererKind, VoxelSphere,
};
pub use session::{Action, Control, Direction, Session};
pub use surface::{Framebuffer, RenderSurface, Rgb};
pub use transform::{RigidBody, Transform};
