/// SG3D Core Library - script-driven scene building
///
/// This library provides the stateless core of the renderer: the transform
/// stack engine, parametric curve and surface generators, script parsing,
/// and the pipeline driver that feeds a rasterizer.

pub mod curve;
pub mod geometry;
pub mod pipeline;
pub mod script;
pub mod surface;
pub mod transform;

// Re-export commonly used types
pub use geometry::{EdgeList, PolygonList};
pub use pipeline::{Interpreter, Rasterizer, DEFAULT_STEP};
pub use script::{parse_script, Command, ScriptError};
pub use transform::{Axis, Transform, TransformStack};
