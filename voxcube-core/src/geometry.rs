/// Geometry primitives: points, topology tables and the solid aggregate
use nalgebra::{Point3, Vector3};
use tracing::debug;

/// A mutable 3D coordinate in a solid's local frame
pub type Point = Point3<f64>;

/// An additive world-space offset
pub type Offset = Vector3<f64>;

/// Fixed corner/edge/face index tables describing a polyhedron.
///
/// Only coordinate values of a solid ever change; these tables are shared
/// by every solid built from them.
#[derive(Debug, PartialEq, Eq)]
pub struct Topology {
    pub corner_count: usize,
    pub edge_corners: &'static [[usize; 2]],
    pub face_edges: &'static [[usize; 4]],
}

/// The 8-corner, 12-edge, 6-face cube.
///
/// Corner `4 * i + 2 * j + k` sits at the `-`/`+` half-size on each axis
/// for `i`, `j`, `k` of `0`/`1`.
pub const CUBE: Topology = Topology {
    corner_count: 8,
    edge_corners: &[
        [0, 1],
        [0, 2],
        [0, 4],
        [1, 3],
        [3, 7],
        [2, 3],
        [4, 5],
        [5, 7],
        [1, 5],
        [4, 6],
        [2, 6],
        [6, 7],
    ],
    face_edges: &[
        [0, 3, 5, 1],
        [6, 9, 11, 7],
        [0, 8, 6, 2],
        [4, 11, 10, 5],
        [1, 10, 9, 2],
        [3, 8, 7, 4],
    ],
};

/// Two corners of a solid, by point index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub corners: [usize; 2],
}

/// A face of a solid, by edge index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    pub edges: [usize; 4],
}

/// A rigid solid: local-frame points wired by a static topology, plus a
/// world-space `center` that is only added at query time.
#[derive(Debug, Clone, PartialEq)]
pub struct Solid {
    pub points: Vec<Point>,
    pub edges: Vec<Edge>,
    pub surfaces: Vec<Surface>,
    pub center: Point,
    topology: &'static Topology,
}

impl Solid {
    /// Build a solid from explicit local points and a topology
    pub fn from_points(points: Vec<Point>, center: Point, topology: &'static Topology) -> Self {
        debug_assert_eq!(points.len(), topology.corner_count);

        let edges = topology
            .edge_corners
            .iter()
            .map(|&corners| Edge { corners })
            .collect();
        let surfaces = topology
            .face_edges
            .iter()
            .map(|&edges| Surface { edges })
            .collect();

        Self {
            points,
            edges,
            surfaces,
            center,
            topology,
        }
    }

    /// Create an axis-aligned cube of edge length `size` around the local
    /// origin. Zero or negative sizes collapse or invert the cube.
    pub fn cube(center: Point, size: f64) -> Self {
        let half = size / 2.0;
        let mut points = Vec::with_capacity(CUBE.corner_count);

        for i in 0..2i32 {
            let x = f64::from(2 * i - 1) * half;
            for j in 0..2i32 {
                let y = f64::from(2 * j - 1) * half;
                for k in 0..2i32 {
                    let z = f64::from(2 * k - 1) * half;
                    points.push(Point::new(x, y, z));
                }
            }
        }

        debug!(size, ?center, "constructed cube");
        Self::from_points(points, center, &CUBE)
    }

    pub fn topology(&self) -> &'static Topology {
        self.topology
    }

    /// The two local-frame endpoints of an edge
    pub fn edge_points(&self, edge: usize) -> Option<[Point; 2]> {
        let [a, b] = self.edges.get(edge)?.corners;
        Some([self.points[a], self.points[b]])
    }

    /// The edges bounding a face
    pub fn surface_edges(&self, surface: usize) -> Option<[Edge; 4]> {
        let face = self.surfaces.get(surface)?;
        Some(face.edges.map(|e| self.edges[e]))
    }

    /// Every point offset by `center`, in stable index order
    pub fn world_points(&self) -> impl Iterator<Item = Point> + '_ {
        let offset = self.center.coords;
        self.points.iter().map(move |p| p + offset)
    }

    pub fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    /// Move the world offset without touching local coordinates
    pub fn move_center(&mut self, delta: Offset) {
        self.center += delta;
    }
}

impl Default for Solid {
    fn default() -> Self {
        Self::cube(Point::origin(), 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_cube_counts() {
        let cube = Solid::cube(Point::new(3.0, -1.0, 2.0), 7.5);
        assert_eq!(cube.points.len(), 8);
        assert_eq!(cube.edges.len(), 12);
        assert_eq!(cube.surfaces.len(), 6);
    }

    #[test]
    fn test_corner_placement() {
        let cube = Solid::cube(Point::new(10.0, 10.0, 10.0), 2.0);
        assert_eq!(cube.points[0], Point::new(-1.0, -1.0, -1.0));
        assert_eq!(cube.points[1], Point::new(-1.0, -1.0, 1.0));
        assert_eq!(cube.points[2], Point::new(-1.0, 1.0, -1.0));
        assert_eq!(cube.points[4], Point::new(1.0, -1.0, -1.0));
        assert_eq!(cube.points[7], Point::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_edges_and_faces_reference_distinct_indices() {
        let cube = Solid::default();
        for edge in &cube.edges {
            assert_ne!(edge.corners[0], edge.corners[1]);
            assert!(edge.corners.iter().all(|&c| c < 8));
        }
        for face in &cube.surfaces {
            let distinct: HashSet<_> = face.edges.iter().collect();
            assert_eq!(distinct.len(), 4);
            assert!(face.edges.iter().all(|&e| e < 12));
        }
    }

    #[test]
    fn test_edges_have_unit_length() {
        let cube = Solid::default();
        for e in 0..cube.edges.len() {
            let [a, b] = cube.edge_points(e).unwrap();
            assert!(((a - b).norm() - 1.0).abs() < 1e-12);
        }
        assert!(cube.edge_points(12).is_none());
    }

    #[test]
    fn test_topology_is_independent_of_size_and_center() {
        let a = Solid::cube(Point::origin(), 1.0);
        let b = Solid::cube(Point::new(-4.0, 0.5, 9.0), -3.0);
        assert_eq!(a.edges, b.edges);
        assert_eq!(a.surfaces, b.surfaces);
        assert!(std::ptr::eq(a.topology(), b.topology()));
    }

    #[test]
    fn test_each_face_is_a_closed_loop() {
        let cube = Solid::default();
        for f in 0..cube.surfaces.len() {
            let edges = cube.surface_edges(f).unwrap();
            let mut degree = [0usize; 8];
            for edge in edges {
                for c in edge.corners {
                    degree[c] += 1;
                }
            }
            assert_eq!(degree.iter().filter(|&&d| d == 2).count(), 4);
            assert_eq!(degree.iter().filter(|&&d| d == 0).count(), 4);
        }
    }

    #[test]
    fn test_center_is_applied_only_at_query_time() {
        let mut cube = Solid::default();
        cube.move_center(Offset::new(1.0, 2.0, 3.0));
        assert_eq!(cube.points[0], Point::new(-0.5, -0.5, -0.5));
        let world: Vec<_> = cube.world_points().collect();
        assert_eq!(world[0], Point::new(0.5, 1.5, 2.5));

        cube.set_center(Point::origin());
        assert_eq!(cube.world_points().next(), Some(cube.points[0]));
    }

    #[test]
    fn test_zero_size_collapses() {
        let cube = Solid::cube(Point::origin(), 0.0);
        assert!(cube.points.iter().all(|p| p.coords.norm() == 0.0));
    }
}
