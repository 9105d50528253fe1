/// Terminal front end: drives a voxcube session from the keyboard and
/// draws it as character cells
use crossterm::{
    cursor,
    event::{self, Event},
    execute,
    terminal::{self},
};
use std::io::{self, stdout, Stdout};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use voxcube_core::{Control, Session};

pub mod cli;
pub mod input;
pub mod surface;

pub use input::map_key;
pub use surface::TerminalSurface;

/// Main application struct for terminal point-cloud rendering
pub struct TerminalApp {
    session: Session,
    surface: TerminalSurface<Stdout>,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(session: Session) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let resolution = session.grid().resolution();

        Ok(Self {
            surface: TerminalSurface::new(
                stdout(),
                resolution.width as usize,
                resolution.height as usize,
                usize::from(cols),
                usize::from(rows),
            ),
            session,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        info!("terminal app started");

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;
        info!(frames = self.frame_count, "terminal app stopped");

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = self.session.config().frame_duration();

        while self.running {
            let frame_start = Instant::now();

            // Handle every pending event before drawing
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }
            if !self.running {
                break;
            }

            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
                debug!(fps = self.fps, "frame rate");
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                if let Some(action) = map_key(&key) {
                    if self.session.apply(action) == Control::Quit {
                        self.running = false;
                    }
                }
            }
            Event::Resize(cols, rows) => {
                debug!(cols, rows, "terminal resized");
                self.surface.resize(usize::from(cols), usize::from(rows));
            }
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.surface.set_status(format!(
            "Voxcube | FPS: {:.1} | {:?} | WASD/QE=Move X/Y/Z=Rotate Up/Down=Scale Backspace=Reset Esc=Quit",
            self.fps,
            self.session.renderer().style().kind(),
        ));
        self.session.render(&mut self.surface)?;
        Ok(())
    }
}
