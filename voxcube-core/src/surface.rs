/// Raster targets the point renderers draw into
use std::convert::Infallible;

/// An opaque 24-bit colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The four primitives a renderer is allowed to use.
///
/// Plots outside the surface are dropped silently.
pub trait RenderSurface {
    type Error;

    fn clear(&mut self, color: Rgb);
    fn set_draw_color(&mut self, color: Rgb);
    fn plot(&mut self, x: i32, y: i32);
    fn present(&mut self) -> Result<(), Self::Error>;
}

/// In-memory RGB pixel buffer
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
    background: Rgb,
    draw_color: Rgb,
    plot_calls: usize,
    frames: u64,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width * height],
            background: Rgb::BLACK,
            draw_color: Rgb::WHITE,
            plot_calls: 0,
            frames: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Colour last used to clear the buffer
    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Coordinates of every pixel differing from the background
    pub fn lit_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pixels
            .iter()
            .enumerate()
            .filter(move |&(_, c)| *c != self.background)
            .map(move |(idx, _)| (idx % self.width, idx / self.width))
    }

    /// Plot calls received since the last clear, on or off the surface
    pub fn plot_calls(&self) -> usize {
        self.plot_calls
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames
    }
}

impl RenderSurface for Framebuffer {
    type Error = Infallible;

    fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color);
        self.background = color;
        self.plot_calls = 0;
    }

    fn set_draw_color(&mut self, color: Rgb) {
        self.draw_color = color;
    }

    fn plot(&mut self, x: i32, y: i32) {
        self.plot_calls += 1;
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return;
        };
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = self.draw_color;
        }
    }

    fn present(&mut self) -> Result<(), Infallible> {
        self.frames += 1;
        Ok(())
    }
}
