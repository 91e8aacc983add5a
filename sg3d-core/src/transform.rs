/// Transformation matrix builders and the save/restore transform stack
use nalgebra::{Matrix4, Vector3};

/// Rotation axis named by a script `rotate` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Builders for the elementary affine transforms.
///
/// Every matrix produced here has (0, 0, 0, 1) as its bottom row; there is
/// no perspective component anywhere in the pipeline.
pub struct Transform;

impl Transform {
    /// Create a non-uniform scale matrix.
    pub fn scaling(sx: f32, sy: f32, sz: f32) -> Matrix4<f32> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }

    /// Create a translation matrix.
    pub fn translation(tx: f32, ty: f32, tz: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(tx, ty, tz))
    }

    /// Create a right-handed rotation matrix about one coordinate axis.
    /// The angle is in radians; degree input from scripts is converted at
    /// the interpreter boundary.
    pub fn rotation(axis: Axis, theta: f32) -> Matrix4<f32> {
        let axisangle = match axis {
            Axis::X => Vector3::new(theta, 0.0, 0.0),
            Axis::Y => Vector3::new(0.0, theta, 0.0),
            Axis::Z => Vector3::new(0.0, 0.0, theta),
        };
        Matrix4::new_rotation(axisangle)
    }
}

/// Stack of composed transforms giving scripts nested local coordinate
/// frames. The top is always the net world-to-local transform for whatever
/// the script draws next.
///
/// The stack is never empty: it is seeded with the identity and `pop`
/// refuses to remove the last frame.
#[derive(Debug, Clone)]
pub struct TransformStack {
    frames: Vec<Matrix4<f32>>,
}

impl TransformStack {
    pub fn new() -> Self {
        Self {
            frames: vec![Matrix4::identity()],
        }
    }

    /// The current coordinate frame.
    pub fn top(&self) -> &Matrix4<f32> {
        // frames is non-empty by construction
        self.frames.last().unwrap()
    }

    /// Duplicate the current frame. `Matrix4` is a value type, so the copy
    /// shares nothing with the frame beneath it.
    pub fn push(&mut self) {
        let top = *self.top();
        self.frames.push(top);
    }

    /// Discard the current frame, restoring the one saved beneath it.
    /// Popping the last remaining frame is a no-op.
    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Compose an elementary transform onto the current frame:
    /// `top' = top * matrix`. Right-multiplication makes the newest
    /// transform the innermost one, so transforms written in script order
    /// apply closest-to-the-object last.
    pub fn apply(&mut self, matrix: &Matrix4<f32>) {
        let composed = self.top() * matrix;
        *self.frames.last_mut().unwrap() = composed;
    }

    /// Reset the current frame to the identity (`ident` command).
    pub fn reset(&mut self) {
        *self.frames.last_mut().unwrap() = Matrix4::identity();
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}
