/// Interactive session state: the live solid, its grid and renderer
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::error::Result;
use crate::geometry::{Offset, Solid};
use crate::grid::{Axis, CoordinateGrid};
use crate::projection::{PlotStats, PointRenderer};
use crate::surface::RenderSurface;
use crate::transform::RigidBody;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Negative,
    Positive,
}

impl Direction {
    fn sign(self) -> f64 {
        match self {
            Direction::Negative => -1.0,
            Direction::Positive => 1.0,
        }
    }
}

/// A discrete user request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move the world-space center along an axis
    Move(Axis, Direction),
    /// Rotate by one step in the given angle slot
    Rotate(Axis),
    Grow,
    Shrink,
    /// Replace the solid with a fresh default one
    Reset,
    Quit,
}

/// Whether the driver loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    grid: CoordinateGrid,
    solid: Solid,
    renderer: PointRenderer,
}

impl Session {
    /// Validate the configuration and build the initial solid
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        let grid = config.grid()?;
        let renderer = config.renderer();
        let solid = Solid::cube(config.cube_center, config.cube_size);

        info!(
            renderer = ?renderer.style().kind(),
            resolution = ?grid.resolution(),
            "session started"
        );

        Ok(Self {
            config,
            grid,
            solid,
            renderer,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn grid(&self) -> &CoordinateGrid {
        &self.grid
    }

    pub fn solid(&self) -> &Solid {
        &self.solid
    }

    pub fn solid_mut(&mut self) -> &mut Solid {
        &mut self.solid
    }

    pub fn renderer(&self) -> &PointRenderer {
        &self.renderer
    }

    pub fn apply(&mut self, action: Action) -> Control {
        debug!(?action, "applying action");

        match action {
            Action::Move(axis, direction) => {
                // Depth moves reuse the vertical step.
                let step = match axis {
                    Axis::X => self.grid.step(Axis::X),
                    Axis::Y | Axis::Z => self.grid.step(Axis::Y),
                };
                let mut delta = Offset::zeros();
                delta[axis.index()] = direction.sign() * self.config.move_speed * step;
                self.solid.move_center(delta);
            }
            Action::Rotate(axis) => {
                let mut angles = [0.0; 3];
                angles[axis.index()] = self.config.rotation_step;
                self.solid.rotate(angles[0], angles[1], angles[2]);
            }
            Action::Grow => self.solid.enlarge(self.config.scale_factor),
            Action::Shrink => self.solid.enlarge(1.0 / self.config.scale_factor),
            Action::Reset => self.reset(),
            Action::Quit => return Control::Quit,
        }

        Control::Continue
    }

    pub fn reset(&mut self) {
        self.solid = Solid::cube(self.config.cube_center, self.config.cube_size);
        info!("solid reset");
    }

    pub fn render<S: RenderSurface>(
        &self,
        surface: &mut S,
    ) -> std::result::Result<PlotStats, S::Error> {
        self.renderer.render_frame(&self.solid, &self.grid, surface)
    }
}
