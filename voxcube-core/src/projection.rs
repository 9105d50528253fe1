/// Pseudo-perspective point renderers
///
/// Each world point of a solid is mapped to a voxel through the
/// [`CoordinateGrid`] and drawn as a small cluster of pixels whose size
/// depends on depth. Larger depth indices are nearer to the viewer.
use tracing::trace;

use crate::geometry::Solid;
use crate::grid::{CoordinateGrid, Resolution, Voxel};
use crate::surface::{RenderSurface, Rgb};

/// Which point style a renderer uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RendererKind {
    /// Sample a voxel ball and project every voxel by its own depth
    #[default]
    VoxelSphere,
    /// Draw a flat disc whose radius shrinks with depth
    FlatDisc,
}

/// Foreground and background colours of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub foreground: Rgb,
    pub background: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            foreground: Rgb::WHITE,
            background: Rgb::BLACK,
        }
    }
}

/// Plot bookkeeping for one vertex or one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlotStats {
    pub plotted: usize,
    pub skipped: usize,
}

impl std::ops::AddAssign for PlotStats {
    fn add_assign(&mut self, rhs: Self) {
        self.plotted += rhs.plotted;
        self.skipped += rhs.skipped;
    }
}

/// A way of drawing a single projected vertex
pub trait PointStyle {
    fn draw_vertex<S: RenderSurface>(&self, surface: &mut S, voxel: Voxel) -> PlotStats;
}

/// One voxel of a sampled ball and where it lands on screen.
///
/// `screen` is `None` when the perspective divisor is zero for that voxel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereSample {
    pub offset: Voxel,
    pub screen: Option<(i32, i32)>,
}

/// Voxel-sphere sampling with per-voxel perspective scaling.
///
/// Every integer offset strictly inside `radius` is kept unless it lies at
/// or beyond the far plane. Its horizontal position is scaled about the
/// surface centre by `depth / (2 * depth - dk - k)`; the depth offset only
/// feeds that factor and the two tests.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelSphere {
    radius: i32,
    width: i32,
    height: i32,
    depth: i32,
}

impl VoxelSphere {
    pub fn new(radius: i32, resolution: Resolution) -> Self {
        Self {
            radius,
            width: clamp_dim(resolution.width),
            height: clamp_dim(resolution.height),
            depth: clamp_dim(resolution.depth),
        }
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Perspective factor for a voxel at absolute depth index `k + dk`
    pub fn scale_factor(&self, depth_index: i64) -> Option<f64> {
        let divisor = 2 * i64::from(self.depth) - depth_index;
        if divisor == 0 {
            return None;
        }
        Some(f64::from(self.depth) / divisor as f64)
    }

    /// Screen position of one voxel offset around `voxel`.
    ///
    /// X is truncated after re-centring, Y before re-centring.
    fn project(&self, voxel: Voxel, offset: Voxel) -> Option<(i32, i32)> {
        let s = self.scale_factor(i64::from(voxel.k) + i64::from(offset.k))?;

        let half_w = self.width / 2;
        let half_h = self.height / 2;
        let dx = f64::from(offset.i) + f64::from(voxel.i) - f64::from(half_w);
        let dy = f64::from(offset.j) + f64::from(voxel.j) - f64::from(half_h);

        let x = (dx * s + f64::from(half_w)) as i32;
        let y = ((dy * s) as i32).saturating_add(half_h);
        Some((x, y))
    }

    /// Every voxel offset that survives the sphere and far-plane tests,
    /// in `di`, `dj`, `dk` order
    pub fn samples(&self, voxel: Voxel) -> impl Iterator<Item = SphereSample> + '_ {
        let r = self.radius;
        let r_sq = i64::from(r) * i64::from(r);
        let far = i64::from(self.depth);

        (-r..=r)
            .flat_map(move |di| {
                (-r..=r).flat_map(move |dj| (-r..=r).map(move |dk| Voxel::new(di, dj, dk)))
            })
            .filter(move |o| {
                let dist_sq = i64::from(o.i).pow(2) + i64::from(o.j).pow(2) + i64::from(o.k).pow(2);
                dist_sq < r_sq && i64::from(voxel.k) + i64::from(o.k) < far
            })
            .map(move |offset| SphereSample {
                offset,
                screen: self.project(voxel, offset),
            })
    }
}

impl PointStyle for VoxelSphere {
    fn draw_vertex<S: RenderSurface>(&self, surface: &mut S, voxel: Voxel) -> PlotStats {
        let mut stats = PlotStats::default();
        for sample in self.samples(voxel) {
            match sample.screen {
                Some((x, y)) => {
                    surface.plot(x, y);
                    stats.plotted += 1;
                }
                None => stats.skipped += 1,
            }
        }
        stats
    }
}

/// Flat disc at the unprojected pixel position, radius
/// `scale / (falloff * (depth - k) + 1)`. Vertices at or beyond the far
/// plane are skipped, as with the voxel sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatDisc {
    scale: f64,
    falloff: f64,
    depth: i32,
}

impl FlatDisc {
    pub fn new(scale: f64, falloff: f64, resolution: Resolution) -> Self {
        Self {
            scale,
            falloff,
            depth: clamp_dim(resolution.depth),
        }
    }

    /// Disc radius at depth index `k`, or `None` when the vertex is culled
    /// or the formula breaks down
    pub fn radius(&self, k: i32) -> Option<f64> {
        if k >= self.depth {
            return None;
        }
        let denominator = self.falloff * (f64::from(self.depth) - f64::from(k)) + 1.0;
        if denominator <= 0.0 || !denominator.is_finite() {
            return None;
        }
        let radius = self.scale / denominator;
        (radius.is_finite() && radius >= 0.0).then_some(radius)
    }

    /// Pixels strictly inside the disc around `(voxel.i, voxel.j)`
    pub fn pixels(&self, voxel: Voxel) -> impl Iterator<Item = (i32, i32)> {
        let radius = self.radius(voxel.k).unwrap_or(0.0);
        let extent = radius.ceil() as i32;
        let r_sq = radius * radius;

        (-extent..=extent)
            .flat_map(move |di| (-extent..=extent).map(move |dj| (di, dj)))
            .filter(move |&(di, dj)| f64::from(di * di + dj * dj) < r_sq)
            .map(move |(di, dj)| (voxel.i.saturating_add(di), voxel.j.saturating_add(dj)))
    }
}

impl PointStyle for FlatDisc {
    fn draw_vertex<S: RenderSurface>(&self, surface: &mut S, voxel: Voxel) -> PlotStats {
        if self.radius(voxel.k).is_none() {
            return PlotStats {
                plotted: 0,
                skipped: 1,
            };
        }

        let mut stats = PlotStats::default();
        for (x, y) in self.pixels(voxel) {
            surface.plot(x, y);
            stats.plotted += 1;
        }
        stats
    }
}

/// The interchangeable point styles
#[derive(Debug, Clone, PartialEq)]
pub enum RenderStyle {
    VoxelSphere(VoxelSphere),
    FlatDisc(FlatDisc),
}

impl RenderStyle {
    pub fn kind(&self) -> RendererKind {
        match self {
            RenderStyle::VoxelSphere(_) => RendererKind::VoxelSphere,
            RenderStyle::FlatDisc(_) => RendererKind::FlatDisc,
        }
    }
}

impl PointStyle for RenderStyle {
    fn draw_vertex<S: RenderSurface>(&self, surface: &mut S, voxel: Voxel) -> PlotStats {
        match self {
            RenderStyle::VoxelSphere(style) => style.draw_vertex(surface, voxel),
            RenderStyle::FlatDisc(style) => style.draw_vertex(surface, voxel),
        }
    }
}

/// Stateless frame renderer: clear, draw every vertex in index order, present
#[derive(Debug, Clone, PartialEq)]
pub struct PointRenderer {
    style: RenderStyle,
    palette: Palette,
}

impl PointRenderer {
    pub fn new(style: RenderStyle, palette: Palette) -> Self {
        Self { style, palette }
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// Render one full frame of `solid` and present it
    pub fn render_frame<S: RenderSurface>(
        &self,
        solid: &Solid,
        grid: &CoordinateGrid,
        surface: &mut S,
    ) -> Result<PlotStats, S::Error> {
        surface.clear(self.palette.background);
        surface.set_draw_color(self.palette.foreground);

        let mut stats = PlotStats::default();
        for point in solid.world_points() {
            stats += self.style.draw_vertex(surface, grid.to_voxel(&point));
        }

        trace!(
            kind = ?self.style.kind(),
            plotted = stats.plotted,
            skipped = stats.skipped,
            "frame rendered"
        );
        surface.present()?;
        Ok(stats)
    }
}

fn clamp_dim(n: u32) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::geometry::Point;
    use crate::grid::Axis;
    use crate::session::{Action, Direction, Session};
    use crate::surface::Framebuffer;
    use crate::transform::RigidBody;
    use std::collections::HashSet;

    const DEPTH: i32 = 1024;

    fn ball_volume(r: i32) -> usize {
        let mut count = 0;
        for di in -r..=r {
            for dj in -r..=r {
                for dk in -r..=r {
                    if di * di + dj * dj + dk * dk < r * r {
                        count += 1;
                    }
                }
            }
        }
        count
    }

    fn default_grid() -> CoordinateGrid {
        CoordinateGrid::cubic(-2.0, 2.0, Resolution::default()).unwrap()
    }

    fn sphere_renderer() -> PointRenderer {
        PointRenderer::new(
            RenderStyle::VoxelSphere(VoxelSphere::new(10, Resolution::default())),
            Palette::default(),
        )
    }

    /// 8-connected components of the lit pixels
    fn clusters(fb: &Framebuffer) -> Vec<HashSet<(usize, usize)>> {
        let mut remaining: HashSet<_> = fb.lit_pixels().collect();
        let mut out = Vec::new();
        loop {
            let Some(&seed) = remaining.iter().next() else {
                break;
            };
            remaining.remove(&seed);
            let mut cluster = HashSet::from([seed]);
            let mut stack = vec![seed];
            while let Some((x, y)) = stack.pop() {
                for nx in x.saturating_sub(1)..=x + 1 {
                    for ny in y.saturating_sub(1)..=y + 1 {
                        if remaining.remove(&(nx, ny)) {
                            cluster.insert((nx, ny));
                            stack.push((nx, ny));
                        }
                    }
                }
            }
            out.push(cluster);
        }
        out
    }

    #[test]
    fn test_samples_lie_inside_sphere() {
        let sphere = VoxelSphere::new(10, Resolution::default());
        let samples: Vec<_> = sphere.samples(Voxel::new(500, 500, 500)).collect();
        assert_eq!(samples.len(), ball_volume(10));
        for s in &samples {
            let o = s.offset;
            assert!(o.i * o.i + o.j * o.j + o.k * o.k < 100);
        }
    }

    #[test]
    fn test_far_plane_cull() {
        let sphere = VoxelSphere::new(10, Resolution::default());
        let k = DEPTH - 4;
        let samples: Vec<_> = sphere.samples(Voxel::new(512, 512, k)).collect();

        assert!(!samples.is_empty());
        assert!(samples.iter().all(|s| k + s.offset.k < DEPTH));
        assert!(samples.len() < ball_volume(10));

        let beyond: Vec<_> = sphere.samples(Voxel::new(512, 512, DEPTH + 10)).collect();
        assert!(beyond.is_empty());
    }

    #[test]
    fn test_scale_factor() {
        let sphere = VoxelSphere::new(10, Resolution::default());
        assert_eq!(sphere.scale_factor(0), Some(0.5));
        assert_eq!(sphere.scale_factor(i64::from(DEPTH)), Some(1.0));
        assert!(sphere.scale_factor(900).unwrap() > sphere.scale_factor(100).unwrap());
        assert_eq!(sphere.scale_factor(2 * i64::from(DEPTH)), None);
    }

    #[test]
    fn test_sample_projection() {
        let sphere = VoxelSphere::new(2, Resolution::default());
        let centre = sphere
            .samples(Voxel::new(639, 384, 639))
            .find(|s| s.offset == Voxel::new(0, 0, 0))
            .unwrap();
        let s = 1024.0 / (2048.0 - 639.0);
        let x = (127.0 * s + 512.0) as i32;
        let y = (-128.0 * s) as i32 + 512;
        assert_eq!(centre.screen, Some((x, y)));
    }

    #[test]
    fn test_vertex_at_surface_centre_stays_put() {
        let sphere = VoxelSphere::new(3, Resolution::default());
        for sample in sphere.samples(Voxel::new(512, 512, 700)) {
            if sample.offset.i == 0 && sample.offset.j == 0 {
                assert_eq!(sample.screen, Some((512, 512)));
            }
        }
    }

    #[test]
    fn test_zero_radius_draws_nothing() {
        let sphere = VoxelSphere::new(0, Resolution::default());
        assert_eq!(sphere.samples(Voxel::new(1, 1, 1)).count(), 0);
    }

    #[test]
    fn test_flat_disc_radius() {
        let disc = FlatDisc::new(20.0, 1.0 / 512.0, Resolution::default());
        assert_eq!(disc.radius(512), Some(10.0));
        assert!(disc.radius(1023).unwrap() < 20.0);
        assert!(disc.radius(0).unwrap() < disc.radius(512).unwrap());
        assert_eq!(disc.radius(1024), None);
        assert_eq!(disc.radius(1536), None);
    }

    #[test]
    fn test_flat_disc_culled_at_far_plane() {
        let disc = FlatDisc::new(20.0, 1.0 / 512.0, Resolution::default());
        let nearest = disc.pixels(Voxel::new(512, 512, DEPTH - 1)).count();
        assert!(nearest < 4 * 20 * 20);

        for k in [DEPTH, DEPTH + 1, 1500, 1535, 1536, i32::MAX] {
            assert_eq!(disc.pixels(Voxel::new(512, 512, k)).count(), 0);

            let mut fb = Framebuffer::new(1024, 1024);
            let stats = disc.draw_vertex(&mut fb, Voxel::new(512, 512, k));
            assert_eq!(stats, PlotStats { plotted: 0, skipped: 1 });
        }
    }

    #[test]
    fn test_flat_disc_cube_behind_far_plane_plots_nothing() {
        let mut session = Session::new(SessionConfig {
            renderer: RendererKind::FlatDisc,
            ..SessionConfig::default()
        })
        .unwrap();
        // Far corners land at k = 1535, one short of the degenerate depth.
        for _ in 0..56 {
            session.apply(Action::Move(Axis::Z, Direction::Positive));
        }

        let mut fb = Framebuffer::new(1024, 1024);
        let stats = session.render(&mut fb).unwrap();
        assert_eq!(stats, PlotStats { plotted: 0, skipped: 8 });
        assert_eq!(fb.lit_pixels().count(), 0);
    }

    #[test]
    fn test_flat_disc_is_not_repositioned() {
        let disc = FlatDisc::new(20.0, 1.0 / 512.0, Resolution::default());
        let voxel = Voxel::new(100, 900, 512);
        let pixels: Vec<_> = disc.pixels(voxel).collect();
        assert!(pixels.contains(&(100, 900)));
        for (x, y) in &pixels {
            let (di, dj) = (x - 100, y - 900);
            assert!(di * di + dj * dj < 100);
        }
        assert!(disc.pixels(Voxel::new(100, 900, 1000)).count() > pixels.len());
    }

    #[test]
    fn test_flat_disc_degenerate_depth_is_skipped() {
        let disc = FlatDisc::new(20.0, 1.0 / 512.0, Resolution::default());
        let mut fb = Framebuffer::new(1024, 1024);
        let stats = disc.draw_vertex(&mut fb, Voxel::new(10, 10, 2000));
        assert_eq!(stats, PlotStats { plotted: 0, skipped: 1 });
        assert_eq!(fb.lit_pixels().count(), 0);
    }

    #[test]
    fn test_render_frame_clears_and_presents() {
        let renderer = sphere_renderer();
        let grid = default_grid();
        let mut fb = Framebuffer::new(1024, 1024);
        fb.set_draw_color(Rgb::new(9, 9, 9));
        fb.plot(0, 0);

        renderer.render_frame(&Solid::default(), &grid, &mut fb).unwrap();
        assert_eq!(fb.pixel(0, 0), Some(Rgb::BLACK));
        assert_eq!(fb.frames_presented(), 1);
    }

    #[test]
    fn test_default_cube_renders_eight_spheres() {
        let renderer = sphere_renderer();
        let grid = default_grid();
        let mut cube = Solid::cube(Point::origin(), 1.0);
        cube.rotate(0.0, 0.0, 0.0);

        let mut fb = Framebuffer::new(1024, 1024);
        let stats = renderer.render_frame(&cube, &grid, &mut fb).unwrap();

        assert_eq!(stats.plotted, 8 * ball_volume(10));
        assert_eq!(stats.skipped, 0);
        assert_eq!(fb.plot_calls(), 8 * ball_volume(10));

        let found = clusters(&fb);
        assert_eq!(found.len(), 8);

        let RenderStyle::VoxelSphere(sphere) = renderer.style() else {
            unreachable!()
        };
        for point in cube.world_points() {
            let voxel = grid.to_voxel(&point);
            let expected: HashSet<(usize, usize)> = sphere
                .samples(voxel)
                .filter_map(|s| s.screen)
                .map(|(x, y)| (x as usize, y as usize))
                .collect();
            assert!(found.iter().any(|c| *c == expected));
        }
    }

    #[test]
    fn test_flat_disc_frame() {
        let renderer = PointRenderer::new(
            RenderStyle::FlatDisc(FlatDisc::new(20.0, 1.0 / 512.0, Resolution::default())),
            Palette::default(),
        );
        let grid = default_grid();
        let mut fb = Framebuffer::new(1024, 1024);
        renderer.render_frame(&Solid::default(), &grid, &mut fb).unwrap();

        for (i, j) in [(384, 384), (639, 384), (384, 639), (639, 639)] {
            assert_eq!(fb.pixel(i, j), Some(Rgb::WHITE));
        }
        assert_eq!(clusters(&fb).len(), 4);
    }
}
