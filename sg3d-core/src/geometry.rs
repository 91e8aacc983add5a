/// Geometry accumulators for the rendering pipeline
use nalgebra::{Matrix4, Point3};

/// Ordered point sequence interpreted pairwise: points 0,1 form the first
/// line segment, points 2,3 the second, and so on. Only `add_edge` appends,
/// so the point count is always even.
#[derive(Debug, Clone, Default)]
pub struct EdgeList {
    points: Vec<Point3<f32>>,
}

impl EdgeList {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    pub fn add_edge(&mut self, p0: Point3<f32>, p1: Point3<f32>) {
        self.points.push(p0);
        self.points.push(p1);
    }

    /// Number of line segments held.
    pub fn len(&self) -> usize {
        self.points.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over the segments as endpoint pairs.
    pub fn edges(&self) -> impl Iterator<Item = (Point3<f32>, Point3<f32>)> + '_ {
        self.points.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }

    /// Apply a transform to every point in place.
    pub fn transform(&mut self, matrix: &Matrix4<f32>) {
        for point in &mut self.points {
            *point = matrix.transform_point(point);
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

/// Ordered point sequence interpreted as consecutive triangle vertex
/// triples. Only `add_triangle` appends, so the point count is always a
/// multiple of three.
#[derive(Debug, Clone, Default)]
pub struct PolygonList {
    points: Vec<Point3<f32>>,
}

impl PolygonList {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, p0: Point3<f32>, p1: Point3<f32>, p2: Point3<f32>) {
        self.points.push(p0);
        self.points.push(p1);
        self.points.push(p2);
    }

    /// Number of triangles held.
    pub fn len(&self) -> usize {
        self.points.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over the triangles as vertex triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Point3<f32>; 3]> + '_ {
        self.points
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }

    /// Apply a transform to every point in place.
    pub fn transform(&mut self, matrix: &Matrix4<f32>) {
        for point in &mut self.points {
            *point = matrix.transform_point(point);
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn test_edge_list_pairing() {
        let mut edges = EdgeList::new();
        edges.add_edge(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 2.0, 3.0));
        edges.add_edge(Point3::new(4.0, 5.0, 6.0), Point3::new(7.0, 8.0, 9.0));

        assert_eq!(edges.len(), 2);
        let collected: Vec<_> = edges.edges().collect();
        assert_eq!(collected[0].1, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(collected[1].0, Point3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_identity_transform_is_noop() {
        let mut edges = EdgeList::new();
        edges.add_edge(Point3::new(1.5, -2.0, 0.25), Point3::new(-3.0, 4.0, 5.0));
        let before: Vec<_> = edges.edges().collect();

        edges.transform(&Matrix4::identity());

        for (b, a) in before.iter().zip(edges.edges()) {
            assert!((b.0 - a.0).norm() < 1e-6);
            assert!((b.1 - a.1).norm() < 1e-6);
        }
    }

    #[test]
    fn test_polygon_transform_translates_vertices() {
        let mut polygons = PolygonList::new();
        polygons.add_triangle(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );

        polygons.transform(&Matrix4::new_translation(&Vector3::new(10.0, 0.0, 0.0)));

        let tri = polygons.triangles().next().unwrap();
        assert!((tri[0].x - 10.0).abs() < 1e-6);
        assert!((tri[1].x - 11.0).abs() < 1e-6);
    }

    #[test]
    fn test_clear_empties() {
        let mut polygons = PolygonList::new();
        polygons.add_triangle(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        polygons.clear();
        assert!(polygons.is_empty());
    }
}
