/// Parametric curve generators: circles and cubic splines
use std::f32::consts::TAU;

use nalgebra::{Matrix4, Point3, Vector4};

use crate::geometry::EdgeList;

/// Subdivision count for a tessellation step, `round(1/step)` clamped to at
/// least one. Zero, negative, or non-finite steps degrade to a single
/// subdivision instead of looping forever or panicking.
pub(crate) fn subdivisions(step: f32) -> usize {
    if step > 0.0 && step.is_finite() {
        ((1.0 / step).round() as usize).max(1)
    } else {
        1
    }
}

/// Append one line segment.
pub fn add_line(
    edges: &mut EdgeList,
    x0: f32,
    y0: f32,
    z0: f32,
    x1: f32,
    y1: f32,
    z1: f32,
) {
    edges.add_edge(Point3::new(x0, y0, z0), Point3::new(x1, y1, z1));
}

/// Append a circle of radius `r` in the XY plane centered at (cx, cy),
/// tessellated into `round(1/step)` segments. The segment from the last
/// sample wraps back to the first, closing the loop.
pub fn add_circle(edges: &mut EdgeList, cx: f32, cy: f32, r: f32, step: f32) {
    let n = subdivisions(step);
    let points: Vec<Point3<f32>> = (0..n)
        .map(|i| {
            let theta = TAU * i as f32 / n as f32;
            Point3::new(cx + r * theta.cos(), cy + r * theta.sin(), 0.0)
        })
        .collect();

    for i in 0..n {
        edges.add_edge(points[i], points[(i + 1) % n]);
    }
}

/// Hermite basis: maps (p0, p1, m0, m1) to cubic coefficients (a, b, c, d)
/// of at^3 + bt^2 + ct + d.
#[rustfmt::skip]
fn hermite_basis() -> Matrix4<f32> {
    Matrix4::new(
         2.0, -2.0,  1.0,  1.0,
        -3.0,  3.0, -2.0, -1.0,
         0.0,  0.0,  1.0,  0.0,
         1.0,  0.0,  0.0,  0.0,
    )
}

/// Bezier basis: maps the four control points to cubic coefficients.
#[rustfmt::skip]
fn bezier_basis() -> Matrix4<f32> {
    Matrix4::new(
        -1.0,  3.0, -3.0, 1.0,
         3.0, -6.0,  3.0, 0.0,
        -3.0,  3.0,  0.0, 0.0,
         1.0,  0.0,  0.0, 0.0,
    )
}

fn eval_cubic(coef: &Vector4<f32>, t: f32) -> f32 {
    ((coef.x * t + coef.y) * t + coef.z) * t + coef.w
}

/// Sample the cubics for x(t) and y(t) at t = i/n for i in 0..=n and append
/// the n connecting segments. Sampling by index rather than accumulating
/// `step` keeps t = 0 and t = 1 exact, so the curve starts and ends
/// precisely on its endpoints.
fn add_cubic(edges: &mut EdgeList, xcoef: Vector4<f32>, ycoef: Vector4<f32>, step: f32) {
    let n = subdivisions(step);
    let mut prev = Point3::new(eval_cubic(&xcoef, 0.0), eval_cubic(&ycoef, 0.0), 0.0);
    for i in 1..=n {
        let t = i as f32 / n as f32;
        let next = Point3::new(eval_cubic(&xcoef, t), eval_cubic(&ycoef, t), 0.0);
        edges.add_edge(prev, next);
        prev = next;
    }
}

/// Append a Hermite curve from (x0, y0) to (x1, y1) with tangents
/// (rx0, ry0) at the start and (rx1, ry1) at the end.
#[allow(clippy::too_many_arguments)]
pub fn add_hermite(
    edges: &mut EdgeList,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    rx0: f32,
    ry0: f32,
    rx1: f32,
    ry1: f32,
    step: f32,
) {
    let basis = hermite_basis();
    let xcoef = basis * Vector4::new(x0, x1, rx0, rx1);
    let ycoef = basis * Vector4::new(y0, y1, ry0, ry1);
    add_cubic(edges, xcoef, ycoef, step);
}

/// Append a cubic Bezier curve through control points (x0, y0)..(x3, y3).
#[allow(clippy::too_many_arguments)]
pub fn add_bezier(
    edges: &mut EdgeList,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    x3: f32,
    y3: f32,
    step: f32,
) {
    let basis = bezier_basis();
    let xcoef = basis * Vector4::new(x0, x1, x2, x3);
    let ycoef = basis * Vector4::new(y0, y1, y2, y3);
    add_cubic(edges, xcoef, ycoef, step);
}
