/// Tessellated surface generators: boxes, spheres, and tori
use std::f32::consts::{PI, TAU};

use nalgebra::Point3;

use crate::curve::subdivisions;
use crate::geometry::PolygonList;

/// Append a rectangular prism as 12 triangles (two per face, consistent
/// counter-clockwise winding viewed from outside).
///
/// (x, y, z) is the top-left-front corner; the box extends `width` along
/// +X, `height` along -Y, and `depth` along -Z.
pub fn add_box(
    polygons: &mut PolygonList,
    x: f32,
    y: f32,
    z: f32,
    width: f32,
    height: f32,
    depth: f32,
) {
    let x1 = x + width;
    let y1 = y - height;
    let z1 = z - depth;

    let tlf = Point3::new(x, y, z);
    let trf = Point3::new(x1, y, z);
    let brf = Point3::new(x1, y1, z);
    let blf = Point3::new(x, y1, z);
    let tlb = Point3::new(x, y, z1);
    let trb = Point3::new(x1, y, z1);
    let brb = Point3::new(x1, y1, z1);
    let blb = Point3::new(x, y1, z1);

    // Each face as a counter-clockwise quad split into two triangles.
    let faces = [
        [tlf, blf, brf, trf], // front  (+z)
        [trb, brb, blb, tlb], // back   (-z)
        [tlb, blb, blf, tlf], // left   (-x)
        [trf, brf, brb, trb], // right  (+x)
        [tlb, tlf, trf, trb], // top    (+y)
        [blf, blb, brb, brf], // bottom (-y)
    ];

    for [v0, v1, v2, v3] in faces {
        polygons.add_triangle(v0, v1, v2);
        polygons.add_triangle(v0, v2, v3);
    }
}

/// Latitude/longitude point grid for a sphere: n+1 latitude rows from the
/// south pole (phi = -pi/2) to the north pole (phi = +pi/2), n longitude
/// columns wrapping around. Row index varies slowest.
fn sphere_grid(cx: f32, cy: f32, cz: f32, r: f32, n: usize) -> Vec<Point3<f32>> {
    let mut grid = Vec::with_capacity((n + 1) * n);
    for i in 0..=n {
        let phi = -PI / 2.0 + PI * i as f32 / n as f32;
        for j in 0..n {
            let theta = TAU * j as f32 / n as f32;
            grid.push(Point3::new(
                cx + r * phi.cos() * theta.cos(),
                cy + r * phi.sin(),
                cz + r * phi.cos() * theta.sin(),
            ));
        }
    }
    grid
}

/// Append a sphere of radius `r` centered at (cx, cy, cz), tessellated at
/// `round(1/step)` subdivisions in both latitude and longitude.
///
/// Each grid quad splits on the same diagonal into two triangles; the pole
/// rows collapse to single points, and the triangle that would repeat a
/// pole vertex is skipped there.
pub fn add_sphere(polygons: &mut PolygonList, cx: f32, cy: f32, cz: f32, r: f32, step: f32) {
    let n = subdivisions(step);
    let grid = sphere_grid(cx, cy, cz, r, n);
    let at = |i: usize, j: usize| grid[i * n + j % n];

    for i in 0..n {
        for j in 0..n {
            let a = at(i, j);
            let b = at(i, j + 1);
            let c = at(i + 1, j);
            let d = at(i + 1, j + 1);
            // North pole row: c == d, the first triangle degenerates.
            if i + 1 < n {
                polygons.add_triangle(a, d, c);
            }
            // South pole row: a == b, the second triangle degenerates.
            if i > 0 {
                polygons.add_triangle(a, b, d);
            }
        }
    }
}

/// Point grid for a torus: tube angle phi sweeps the tube circle, theta
/// revolves it about the Y axis through the center. Both directions wrap.
fn torus_grid(cx: f32, cy: f32, cz: f32, r0: f32, r1: f32, n: usize) -> Vec<Point3<f32>> {
    let mut grid = Vec::with_capacity(n * n);
    for i in 0..n {
        let phi = TAU * i as f32 / n as f32;
        let ring = r0 + r1 * phi.cos();
        for j in 0..n {
            let theta = TAU * j as f32 / n as f32;
            grid.push(Point3::new(
                cx + ring * theta.cos(),
                cy + r1 * phi.sin(),
                cz - ring * theta.sin(),
            ));
        }
    }
    grid
}

/// Append a torus centered at (cx, cy, cz): `r0` is the revolution radius
/// from the center to the middle of the tube, `r1` the tube radius.
/// Tessellation wraps in both grid directions, so every quad yields two
/// triangles and there are no degenerate rows.
pub fn add_torus(
    polygons: &mut PolygonList,
    cx: f32,
    cy: f32,
    cz: f32,
    r0: f32,
    r1: f32,
    step: f32,
) {
    let n = subdivisions(step);
    let grid = torus_grid(cx, cy, cz, r0, r1, n);
    let at = |i: usize, j: usize| grid[(i % n) * n + j % n];

    for i in 0..n {
        for j in 0..n {
            let a = at(i, j);
            let b = at(i, j + 1);
            let c = at(i + 1, j);
            let d = at(i + 1, j + 1);
            polygons.add_triangle(a, d, c);
            polygons.add_triangle(a, b, d);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_triangle_count() {
        for (w, h, d) in [(1.0, 1.0, 1.0), (10.0, 0.5, 200.0), (0.0, 0.0, 0.0)] {
            let mut polygons = PolygonList::new();
            add_box(&mut polygons, 3.0, 4.0, 5.0, w, h, d);
            assert_eq!(polygons.len(), 12);
        }
    }

    #[test]
    fn test_box_corner_coverage() {
        let mut polygons = PolygonList::new();
        add_box(&mut polygons, 0.0, 0.0, 0.0, 2.0, 3.0, 4.0);

        // Every vertex must be one of the 8 corners, and all 8 must appear.
        let corners = [
            (0.0, 0.0, 0.0),
            (2.0, 0.0, 0.0),
            (2.0, -3.0, 0.0),
            (0.0, -3.0, 0.0),
            (0.0, 0.0, -4.0),
            (2.0, 0.0, -4.0),
            (2.0, -3.0, -4.0),
            (0.0, -3.0, -4.0),
        ];
        let mut seen = [false; 8];
        for tri in polygons.triangles() {
            for v in tri {
                let idx = corners
                    .iter()
                    .position(|&(x, y, z)| {
                        (v.x - x).abs() < 1e-6 && (v.y - y).abs() < 1e-6 && (v.z - z).abs() < 1e-6
                    })
                    .expect("box vertex is not a corner");
                seen[idx] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_sphere_triangle_count() {
        let mut polygons = PolygonList::new();
        add_sphere(&mut polygons, 0.0, 0.0, 0.0, 10.0, 0.1);
        // n*n quads, minus one skipped degenerate triangle per pole cell.
        assert_eq!(polygons.len(), 2 * 10 * (10 - 1));
    }

    #[test]
    fn test_sphere_points_on_surface() {
        let mut polygons = PolygonList::new();
        add_sphere(&mut polygons, 1.0, 2.0, 3.0, 5.0, 0.1);
        for tri in polygons.triangles() {
            for v in tri {
                let d = (v - Point3::new(1.0, 2.0, 3.0)).norm();
                assert!((d - 5.0).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_sphere_no_degenerate_triangles() {
        let mut polygons = PolygonList::new();
        add_sphere(&mut polygons, 0.0, 0.0, 0.0, 4.0, 0.2);
        for tri in polygons.triangles() {
            assert!((tri[0] - tri[1]).norm() > 1e-6);
            assert!((tri[1] - tri[2]).norm() > 1e-6);
            assert!((tri[2] - tri[0]).norm() > 1e-6);
        }
    }

    #[test]
    fn test_torus_triangle_count() {
        let mut polygons = PolygonList::new();
        add_torus(&mut polygons, 0.0, 0.0, 0.0, 30.0, 8.0, 0.1);
        // Full wraparound in both directions: two triangles per quad.
        assert_eq!(polygons.len(), 2 * 10 * 10);
    }

    #[test]
    fn test_torus_points_within_radial_band() {
        let mut polygons = PolygonList::new();
        add_torus(&mut polygons, 0.0, 0.0, 0.0, 30.0, 8.0, 0.1);
        for tri in polygons.triangles() {
            for v in tri {
                // Distance from the Y axis stays within [r0 - r1, r0 + r1].
                let radial = v.x.hypot(v.z);
                assert!(radial > 30.0 - 8.0 - 1e-3);
                assert!(radial < 30.0 + 8.0 + 1e-3);
                assert!(v.y.abs() <= 8.0 + 1e-3);
            }
        }
    }
}
