/// Bidirectional mapping between a world-space box and pixel/voxel indices
use nalgebra::Vector3;

use crate::error::ConfigError;
use crate::geometry::Point;

/// One of the three world axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Closed world-space interval along one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub start: f64,
    pub end: f64,
}

impl AxisRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

/// Pixel/voxel counts per axis (width, height, depth)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl Resolution {
    pub fn cubic(n: u32) -> Self {
        Self {
            width: n,
            height: n,
            depth: n,
        }
    }

    pub fn along(&self, axis: Axis) -> u32 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
            Axis::Z => self.depth,
        }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::cubic(1024)
    }
}

/// Integer pixel/voxel coordinates; may lie outside the resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Voxel {
    pub i: i32,
    pub j: i32,
    pub k: i32,
}

impl Voxel {
    pub fn new(i: i32, j: i32, k: i32) -> Self {
        Self { i, j, k }
    }
}

/// Immutable world box with eagerly computed step sizes
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateGrid {
    bounds: [AxisRange; 3],
    resolution: Resolution,
    steps: Vector3<f64>,
}

impl CoordinateGrid {
    /// Build a grid, failing when any axis would produce a degenerate step
    pub fn new(bounds: [AxisRange; 3], resolution: Resolution) -> Result<Self, ConfigError> {
        let mut steps = Vector3::zeros();

        for axis in Axis::ALL {
            let range = bounds[axis.index()];
            let n = resolution.along(axis);
            let name = axis_name(axis);

            if n < 2 {
                return Err(ConfigError::invalid(
                    name,
                    format!("resolution {n} leaves no step between pixels"),
                ));
            }
            if !range.start.is_finite() || !range.end.is_finite() {
                return Err(ConfigError::invalid(
                    name,
                    format!("bounds {}..{} are not finite", range.start, range.end),
                ));
            }

            let step = (range.end - range.start) / f64::from(n - 1);
            if step == 0.0 || !step.is_finite() {
                return Err(ConfigError::invalid(
                    name,
                    format!("bounds {}..{} give a step of {step}", range.start, range.end),
                ));
            }
            steps[axis.index()] = step;
        }

        Ok(Self {
            bounds,
            resolution,
            steps,
        })
    }

    /// Same interval on all three axes
    pub fn cubic(start: f64, end: f64, resolution: Resolution) -> Result<Self, ConfigError> {
        let range = AxisRange::new(start, end);
        Self::new([range; 3], resolution)
    }

    pub fn bounds(&self, axis: Axis) -> AxisRange {
        self.bounds[axis.index()]
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn step(&self, axis: Axis) -> f64 {
        self.steps[axis.index()]
    }

    /// Nearest pixel index for a world value. Not clipped to the resolution.
    pub fn value_to_pixel(&self, axis: Axis, value: f64) -> i32 {
        let start = self.bounds(axis).start;
        ((value - start) / self.step(axis)).round() as i32
    }

    /// World value at a pixel index
    pub fn pixel_to_value(&self, axis: Axis, index: i32) -> f64 {
        self.bounds(axis).start + f64::from(index) * self.step(axis)
    }

    pub fn to_voxel(&self, point: &Point) -> Voxel {
        Voxel::new(
            self.value_to_pixel(Axis::X, point.x),
            self.value_to_pixel(Axis::Y, point.y),
            self.value_to_pixel(Axis::Z, point.z),
        )
    }
}

fn axis_name(axis: Axis) -> &'static str {
    match axis {
        Axis::X => "grid.x",
        Axis::Y => "grid.y",
        Axis::Z => "grid.z",
    }
}
