/// Example: Print a single frame as plain text
///
/// Usage: cargo run --example snapshot -- [sphere|disc]

use anyhow::Result;
use std::env;
use voxcube_core::{Action, Axis, Framebuffer, RendererKind, Session, SessionConfig};
use voxcube_terminal::surface::downsample;

const COLS: usize = 96;
const ROWS: usize = 48;

fn main() -> Result<()> {
    let renderer = match env::args().nth(1).as_deref() {
        Some("disc") => RendererKind::FlatDisc,
        _ => RendererKind::VoxelSphere,
    };

    let mut session = Session::new(SessionConfig {
        renderer,
        ..SessionConfig::default()
    })?;

    // Tilt the cube so all eight corners separate on screen
    for _ in 0..6 {
        session.apply(Action::Rotate(Axis::X));
        session.apply(Action::Rotate(Axis::Y));
    }

    let resolution = session.grid().resolution();
    let mut framebuffer = Framebuffer::new(resolution.width as usize, resolution.height as usize);
    let stats = session.render(&mut framebuffer)?;

    let cells = downsample(&framebuffer, COLS, ROWS);
    for line in cells.chunks(COLS) {
        let text: String = line.iter().map(|cell| cell.ch).collect();
        println!("{}", text.trim_end());
    }
    println!("{} pixels plotted, {} skipped", stats.plotted, stats.skipped);
    Ok(())
}
