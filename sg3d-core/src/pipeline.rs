/// Pipeline driver: executes a command list against a rasterizer
use std::io;

use crate::curve::{add_bezier, add_circle, add_hermite, add_line};
use crate::geometry::{EdgeList, PolygonList};
use crate::script::Command;
use crate::surface::{add_box, add_sphere, add_torus};
use crate::transform::{Transform, TransformStack};

/// Default tessellation step (10 subdivisions per curve or surface sweep).
pub const DEFAULT_STEP: f32 = 0.1;

/// The rasterizer seam. The interpreter guarantees the lists it hands over
/// are well formed (even / triple point counts); the rasterizer owns the
/// pixel representation and the output targets.
pub trait Rasterizer {
    fn draw_lines(&mut self, edges: &EdgeList);
    fn draw_polygons(&mut self, polygons: &PolygonList);
    /// Present the current canvas on screen.
    fn display(&mut self) -> io::Result<()>;
    /// Write the current canvas to a file.
    fn save(&mut self, filename: &str) -> io::Result<()>;
}

/// Executes one script run: owns the transform stack and the geometry
/// accumulators for exactly one command list. Concurrent runs each build
/// their own interpreter; nothing here is shared.
///
/// Shape commands run one full generate -> transform -> draw -> clear
/// cycle; transform commands compose onto the stack top and draw nothing.
pub struct Interpreter {
    stack: TransformStack,
    edges: EdgeList,
    polygons: PolygonList,
    step: f32,
}

impl Interpreter {
    pub fn new() -> Self {
        Self {
            stack: TransformStack::new(),
            edges: EdgeList::new(),
            polygons: PolygonList::new(),
            step: DEFAULT_STEP,
        }
    }

    /// Override the tessellation resolution for this run.
    pub fn with_step(step: f32) -> Self {
        Self {
            step,
            ..Self::new()
        }
    }

    pub fn run<R: Rasterizer>(&mut self, commands: &[Command], canvas: &mut R) -> io::Result<()> {
        for command in commands {
            match *command {
                Command::Push => self.stack.push(),
                Command::Pop => self.stack.pop(),
                Command::Ident => self.stack.reset(),
                Command::Clear => self.edges.clear(),
                Command::Display => canvas.display()?,
                Command::Save { ref filename } => canvas.save(filename)?,
                Command::Quit => break,

                Command::Scale { sx, sy, sz } => {
                    self.stack.apply(&Transform::scaling(sx, sy, sz));
                }
                Command::Move { tx, ty, tz } => {
                    self.stack.apply(&Transform::translation(tx, ty, tz));
                }
                Command::Rotate { axis, degrees } => {
                    self.stack
                        .apply(&Transform::rotation(axis, degrees.to_radians()));
                }

                Command::Line {
                    x0,
                    y0,
                    z0,
                    x1,
                    y1,
                    z1,
                } => {
                    add_line(&mut self.edges, x0, y0, z0, x1, y1, z1);
                    self.flush_edges(canvas);
                }
                Command::Circle { cx, cy, r } => {
                    add_circle(&mut self.edges, cx, cy, r, self.step);
                    self.flush_edges(canvas);
                }
                Command::Hermite {
                    x0,
                    y0,
                    x1,
                    y1,
                    rx0,
                    ry0,
                    rx1,
                    ry1,
                } => {
                    add_hermite(
                        &mut self.edges,
                        x0,
                        y0,
                        x1,
                        y1,
                        rx0,
                        ry0,
                        rx1,
                        ry1,
                        self.step,
                    );
                    self.flush_edges(canvas);
                }
                Command::Bezier {
                    x0,
                    y0,
                    x1,
                    y1,
                    x2,
                    y2,
                    x3,
                    y3,
                } => {
                    add_bezier(
                        &mut self.edges,
                        x0,
                        y0,
                        x1,
                        y1,
                        x2,
                        y2,
                        x3,
                        y3,
                        self.step,
                    );
                    self.flush_edges(canvas);
                }

                Command::Box {
                    x,
                    y,
                    z,
                    width,
                    height,
                    depth,
                } => {
                    add_box(&mut self.polygons, x, y, z, width, height, depth);
                    self.flush_polygons(canvas);
                }
                Command::Sphere { cx, cy, cz, r } => {
                    add_sphere(&mut self.polygons, cx, cy, cz, r, self.step);
                    self.flush_polygons(canvas);
                }
                Command::Torus { cx, cy, cz, r0, r1 } => {
                    add_torus(&mut self.polygons, cx, cy, cz, r0, r1, self.step);
                    self.flush_polygons(canvas);
                }
            }
        }
        Ok(())
    }

    /// Transform by the stack top, hand off to the rasterizer, and clear
    /// for the next command.
    fn flush_edges<R: Rasterizer>(&mut self, canvas: &mut R) {
        self.edges.transform(self.stack.top());
        canvas.draw_lines(&self.edges);
        self.edges.clear();
    }

    fn flush_polygons<R: Rasterizer>(&mut self, canvas: &mut R) {
        self.polygons.transform(self.stack.top());
        canvas.draw_polygons(&self.polygons);
        self.polygons.clear();
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse_script;
    use nalgebra::Point3;

    /// Records everything drawn, for pipeline assertions.
    #[derive(Default)]
    struct Capture {
        line_batches: Vec<Vec<(Point3<f32>, Point3<f32>)>>,
        triangle_batches: Vec<Vec<[Point3<f32>; 3]>>,
        displays: usize,
        saves: Vec<String>,
    }

    impl Rasterizer for Capture {
        fn draw_lines(&mut self, edges: &EdgeList) {
            self.line_batches.push(edges.edges().collect());
        }

        fn draw_polygons(&mut self, polygons: &PolygonList) {
            self.triangle_batches.push(polygons.triangles().collect());
        }

        fn display(&mut self) -> io::Result<()> {
            self.displays += 1;
            Ok(())
        }

        fn save(&mut self, filename: &str) -> io::Result<()> {
            self.saves.push(filename.to_string());
            Ok(())
        }
    }

    fn run(script: &str) -> Capture {
        let commands = parse_script(script).unwrap();
        let mut capture = Capture::default();
        Interpreter::new().run(&commands, &mut capture).unwrap();
        capture
    }

    fn bounding_extent(triangles: &[[Point3<f32>; 3]]) -> (f32, f32) {
        let mut min = Point3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Point3::new(f32::MIN, f32::MIN, f32::MIN);
        for tri in triangles {
            for v in tri {
                min = Point3::new(min.x.min(v.x), min.y.min(v.y), min.z.min(v.z));
                max = Point3::new(max.x.max(v.x), max.y.max(v.y), max.z.max(v.z));
            }
        }
        (max.x - min.x, max.y - min.y)
    }

    #[test]
    fn test_scale_doubles_box_extent() {
        let unit = run("scale\n1 1 1\nbox\n0 0 0 1 1 1\ndisplay\n");
        let doubled = run("scale\n2 2 2\nbox\n0 0 0 1 1 1\ndisplay\n");

        let (w1, h1) = bounding_extent(&unit.triangle_batches[0]);
        let (w2, h2) = bounding_extent(&doubled.triangle_batches[0]);
        assert!((w2 - 2.0 * w1).abs() < 1e-5);
        assert!((h2 - 2.0 * h1).abs() < 1e-5);
        assert_eq!(unit.displays, 1);
    }

    #[test]
    fn test_pop_discards_translation() {
        let capture = run("push\nmove\n5 0 0\ncircle\n0 0 1\npop\ncircle\n0 0 1\n");
        assert_eq!(capture.line_batches.len(), 2);

        let centroid = |batch: &[(Point3<f32>, Point3<f32>)]| {
            let mut sum = nalgebra::Vector3::zeros();
            for (p0, p1) in batch {
                sum += p0.coords + p1.coords;
            }
            sum / (2.0 * batch.len() as f32)
        };

        let moved = centroid(&capture.line_batches[0]);
        let restored = centroid(&capture.line_batches[1]);
        assert!((moved.x - 5.0).abs() < 1e-4);
        assert!(restored.x.abs() < 1e-4);
        assert!(restored.y.abs() < 1e-4);
    }

    #[test]
    fn test_transforms_apply_in_command_order() {
        // move then scale: the scale is innermost, so the drawn line is
        // scaled about the local origin and then moved.
        let capture = run("move\n10 0 0\nscale\n2 2 2\nline\n1 0 0 2 0 0\n");
        let (p0, p1) = capture.line_batches[0][0];
        assert!((p0.x - 12.0).abs() < 1e-4);
        assert!((p1.x - 14.0).abs() < 1e-4);
    }

    #[test]
    fn test_rotate_degrees_conversion() {
        // 90 degrees about z maps (1, 0) to (0, 1).
        let capture = run("rotate\nz 90\nline\n0 0 0 1 0 0\n");
        let (_, p1) = capture.line_batches[0][0];
        assert!(p1.x.abs() < 1e-4);
        assert!((p1.y - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_ident_resets_accumulated_transform() {
        let capture = run("scale\n3 3 3\nident\nline\n0 0 0 1 0 0\n");
        let (_, p1) = capture.line_batches[0][0];
        assert!((p1.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_geometry_cleared_between_commands() {
        let capture = run("line\n0 0 0 1 0 0\nline\n0 0 0 0 1 0\n");
        // Each batch holds only its own command's geometry.
        assert_eq!(capture.line_batches[0].len(), 1);
        assert_eq!(capture.line_batches[1].len(), 1);
    }

    #[test]
    fn test_quit_stops_execution() {
        let capture = run("display\nquit\n");
        assert_eq!(capture.displays, 1);
    }

    #[test]
    fn test_save_passes_filename_through() {
        let capture = run("save\npic.txt\n");
        assert_eq!(capture.saves, vec!["pic.txt".to_string()]);
    }

    #[test]
    fn test_sphere_draws_into_polygon_path() {
        let capture = run("sphere\n0 0 0 10\n");
        assert!(capture.line_batches.is_empty());
        assert_eq!(capture.triangle_batches.len(), 1);
        assert!(!capture.triangle_batches[0].is_empty());
    }
}
