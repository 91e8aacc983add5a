/// Terminal-based ASCII rasterizer for the SG3D script pipeline
pub mod renderer;

pub use renderer::AsciiCanvas;
