/// Session parameters
use std::time::Duration;

use crate::error::ConfigError;
use crate::geometry::Point;
use crate::grid::{AxisRange, CoordinateGrid, Resolution};
use crate::projection::{FlatDisc, Palette, PointRenderer, RenderStyle, RendererKind, VoxelSphere};

pub const DEFAULT_RESOLUTION: u32 = 1024;
pub const DEFAULT_FPS: u32 = 60;
pub const DEFAULT_EXTENT: f64 = 2.0;
pub const DEFAULT_SCALE_FACTOR: f64 = 1.03;
pub const DEFAULT_SPHERE_RADIUS: i32 = 10;
pub const DEFAULT_DISC_SCALE: f64 = 20.0;
pub const DEFAULT_DISC_FALLOFF: f64 = 1.0 / 512.0;
pub const DEFAULT_CUBE_SIZE: f64 = 1.0;

/// Half-turn approximation used to derive the per-frame rotation step
const HALF_TURN: f64 = 3.141;

/// Everything a session needs besides the platform surface
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub resolution: Resolution,
    pub bounds: [AxisRange; 3],
    pub fps: u32,
    /// Center movement per key press, in pixels (scaled by grid step)
    pub move_speed: f64,
    /// Rotation per key press, in radians
    pub rotation_step: f64,
    pub scale_factor: f64,
    pub sphere_radius: i32,
    pub disc_scale: f64,
    pub disc_falloff: f64,
    pub cube_size: f64,
    pub cube_center: Point,
    pub renderer: RendererKind,
    pub palette: Palette,
}

impl SessionConfig {
    /// Defaults with movement and rotation speeds derived from `fps`
    pub fn for_fps(fps: u32) -> Self {
        Self {
            fps,
            move_speed: move_speed_for(fps),
            rotation_step: rotation_step_for(fps),
            ..Self::default()
        }
    }

    /// Same interval on every axis
    pub fn with_extent(mut self, extent: f64) -> Self {
        self.bounds = [AxisRange::new(-extent, extent); 3];
        self
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.fps.max(1)))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::invalid("fps", "must be at least 1"));
        }
        if !self.scale_factor.is_finite() || self.scale_factor == 0.0 {
            return Err(ConfigError::invalid(
                "scale_factor",
                format!("{} cannot be inverted", self.scale_factor),
            ));
        }
        let largest = self
            .resolution
            .width
            .max(self.resolution.height)
            .max(self.resolution.depth);
        if self.sphere_radius < 0 || i64::from(self.sphere_radius) > i64::from(largest) {
            return Err(ConfigError::invalid(
                "sphere_radius",
                format!("{} is outside 0..={largest}", self.sphere_radius),
            ));
        }
        if self.disc_falloff < 0.0 {
            return Err(ConfigError::invalid(
                "disc_falloff",
                format!("{} is negative", self.disc_falloff),
            ));
        }
        if !(0.0..=f64::from(largest)).contains(&self.disc_scale) {
            return Err(ConfigError::invalid(
                "disc_scale",
                format!("{} is outside 0..={largest}", self.disc_scale),
            ));
        }

        let finite = [
            ("move_speed", self.move_speed),
            ("rotation_step", self.rotation_step),
            ("disc_scale", self.disc_scale),
            ("disc_falloff", self.disc_falloff),
            ("cube_size", self.cube_size),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::invalid(name, format!("{value} is not finite")));
            }
        }
        if !self.cube_center.coords.iter().all(|c| c.is_finite()) {
            return Err(ConfigError::invalid("cube_center", "is not finite"));
        }

        Ok(())
    }

    pub fn grid(&self) -> Result<CoordinateGrid, ConfigError> {
        CoordinateGrid::new(self.bounds, self.resolution)
    }

    pub fn renderer(&self) -> PointRenderer {
        let style = match self.renderer {
            RendererKind::VoxelSphere => {
                RenderStyle::VoxelSphere(VoxelSphere::new(self.sphere_radius, self.resolution))
            }
            RendererKind::FlatDisc => RenderStyle::FlatDisc(FlatDisc::new(
                self.disc_scale,
                self.disc_falloff,
                self.resolution,
            )),
        };
        PointRenderer::new(style, self.palette)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            resolution: Resolution::cubic(DEFAULT_RESOLUTION),
            bounds: [AxisRange::new(-DEFAULT_EXTENT, DEFAULT_EXTENT); 3],
            fps: DEFAULT_FPS,
            move_speed: move_speed_for(DEFAULT_FPS),
            rotation_step: rotation_step_for(DEFAULT_FPS),
            scale_factor: DEFAULT_SCALE_FACTOR,
            sphere_radius: DEFAULT_SPHERE_RADIUS,
            disc_scale: DEFAULT_DISC_SCALE,
            disc_falloff: DEFAULT_DISC_FALLOFF,
            cube_size: DEFAULT_CUBE_SIZE,
            cube_center: Point::origin(),
            renderer: RendererKind::default(),
            palette: Palette::default(),
        }
    }
}

// Integer division: one frame's worth of a 1000-pixel sweep.
fn move_speed_for(fps: u32) -> f64 {
    f64::from(1000 / fps.max(1))
}

fn rotation_step_for(fps: u32) -> f64 {
    HALF_TURN / f64::from(fps.max(1))
}
