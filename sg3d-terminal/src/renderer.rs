/// ASCII rasterizer backing the script pipeline
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Point3, Vector3};
use std::fs::File;
use std::io::{self, stdout, BufWriter, Write};
use sg3d_core::{EdgeList, PolygonList, Rasterizer};

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Character used for wireframe edges
const LINE_CHAR: char = '#';

/// Character canvas with a depth buffer. Script coordinates are canvas
/// cells with the origin at the bottom-left and y increasing upward;
/// samples falling outside the canvas are dropped.
pub struct AsciiCanvas {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
}

impl AsciiCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        for i in 0..self.depth_buffer.len() {
            self.depth_buffer[i] = f32::INFINITY;
            self.char_buffer[i] = ' ';
        }
    }

    /// Character at a canvas cell (x right, y up). Out of bounds reads as
    /// a blank.
    pub fn at(&self, x: usize, y: usize) -> char {
        if x < self.width && y < self.height {
            self.char_buffer[(self.height - 1 - y) * self.width + x]
        } else {
            ' '
        }
    }

    /// Plot one sample with a depth test. The viewer looks down -Z, so
    /// smaller `-z` wins.
    fn plot(&mut self, x: f32, y: f32, z: f32, character: char) {
        let col = x.round() as i64;
        let row = self.height as i64 - 1 - y.round() as i64;
        if col < 0 || row < 0 || col >= self.width as i64 || row >= self.height as i64 {
            return;
        }
        let idx = row as usize * self.width + col as usize;
        let depth = -z;
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.char_buffer[idx] = character;
        }
    }

    fn draw_segment(&mut self, p0: Point3<f32>, p1: Point3<f32>) {
        let dx = p1.x - p0.x;
        let dy = p1.y - p0.y;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0);

        // DDA walk, one sample per covered cell.
        let n = steps as usize;
        for i in 0..=n {
            let t = i as f32 / steps;
            self.plot(
                p0.x + dx * t,
                p0.y + dy * t,
                p0.z + (p1.z - p0.z) * t,
                LINE_CHAR,
            );
        }
    }

    fn fill_triangle(&mut self, tri: &[Point3<f32>; 3], character: char) {
        let (v0, v1, v2) = (tri[0], tri[1], tri[2]);

        // Bounding box clipped to the canvas.
        let min_x = (v0.x.min(v1.x).min(v2.x).floor() as i64).max(0);
        let max_x = (v0.x.max(v1.x).max(v2.x).ceil() as i64).min(self.width as i64 - 1);
        let min_y = (v0.y.min(v1.y).min(v2.y).floor() as i64).max(0);
        let max_y = (v0.y.max(v1.y).max(v2.y).ceil() as i64).min(self.height as i64 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32;
                let py = y as f32;
                if let Some((w0, w1, w2)) =
                    barycentric((v0.x, v0.y), (v1.x, v1.y), (v2.x, v2.y), (px, py))
                {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        let z = w0 * v0.z + w1 * v1.z + w2 * v2.z;
                        self.plot(px, py, z, character);
                    }
                }
            }
        }
    }

    /// Queue the canvas to a writer with crossterm styling.
    pub fn draw<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.char_buffer[y * self.width + x];

                // Color based on character intensity
                let color = match c {
                    ' ' | '.' | ':' => Color::DarkGrey,
                    '-' | '=' => Color::Grey,
                    '+' | '*' => Color::White,
                    '#' | '%' | '@' => Color::Cyan,
                    _ => Color::White,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            writer.queue(Print('\n'))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Rasterizer for AsciiCanvas {
    fn draw_lines(&mut self, edges: &EdgeList) {
        for (p0, p1) in edges.edges() {
            self.draw_segment(p0, p1);
        }
    }

    fn draw_polygons(&mut self, polygons: &PolygonList) {
        let light_dir = Vector3::new(0.0, 0.0, 1.0);
        for tri in polygons.triangles() {
            let normal = (tri[1] - tri[0]).cross(&(tri[2] - tri[0]));
            // Degenerate triangles rasterize to nothing; skip early.
            if normal.norm() < 1e-9 {
                continue;
            }
            let brightness = normal.normalize().dot(&light_dir).max(0.0);

            let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
            let char_index = char_index.min(LUMINOSITY_RAMP.len() - 1);
            self.fill_triangle(&tri, LUMINOSITY_RAMP[char_index]);
        }
    }

    fn display(&mut self) -> io::Result<()> {
        let mut out = stdout();
        self.draw(&mut out)?;
        out.flush()
    }

    fn save(&mut self, filename: &str) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(filename)?);
        for y in 0..self.height {
            let row: String = self.char_buffer[y * self.width..(y + 1) * self.width]
                .iter()
                .collect();
            writeln!(writer, "{}", row.trim_end())?;
        }
        writer.flush()
    }
}

/// Barycentric coordinates of a point in a triangle, `None` when the
/// triangle is degenerate in screen space.
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
