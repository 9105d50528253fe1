/// Command-line options for the terminal front end
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use voxcube_core::config::{DEFAULT_EXTENT, DEFAULT_FPS, DEFAULT_SPHERE_RADIUS};
use voxcube_core::{RendererKind, SessionConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Style {
    /// Voxel ball with per-voxel perspective
    Sphere,
    /// Flat disc with depth-scaled radius
    Disc,
}

impl From<Style> for RendererKind {
    fn from(style: Style) -> Self {
        match style {
            Style::Sphere => RendererKind::VoxelSphere,
            Style::Disc => RendererKind::FlatDisc,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "voxcube-terminal", about = "Rotate a point-cloud cube in the terminal")]
pub struct Cli {
    /// Point style
    #[arg(long, value_enum, default_value_t = Style::Sphere)]
    pub style: Style,

    /// Target frame rate; also sets move and rotation speed
    #[arg(long, default_value_t = DEFAULT_FPS)]
    pub fps: u32,

    /// Sphere radius in voxels
    #[arg(long, default_value_t = DEFAULT_SPHERE_RADIUS)]
    pub radius: i32,

    /// Half-width of the world box on every axis
    #[arg(long, default_value_t = DEFAULT_EXTENT)]
    pub extent: f64,

    /// Write logs here (the terminal itself is used for drawing)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            renderer: self.style.into(),
            sphere_radius: self.radius,
            ..SessionConfig::for_fps(self.fps).with_extent(self.extent)
        }
    }
}
