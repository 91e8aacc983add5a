/// SG3D Terminal - run a scene script and rasterize it as ASCII art
///
/// Reads a line-oriented command script (shapes, transforms, stack
/// operations) and draws the result to the terminal or a text file.
use std::fs;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use sg3d_core::{parse_script, Interpreter, DEFAULT_STEP};
use sg3d_terminal::AsciiCanvas;

#[derive(Debug, Parser)]
#[command(name = "sg3d-terminal")]
#[command(version)]
#[command(about = "Script-driven wireframe and polygon renderer for the terminal", long_about = None)]
struct Args {
    /// The scene script to run.
    script: PathBuf,
    /// Canvas width in character cells.
    #[arg(long, default_value_t = 120)]
    width: usize,
    /// Canvas height in character cells.
    #[arg(long, default_value_t = 60)]
    height: usize,
    /// Tessellation step in (0, 1]; smaller means smoother curves.
    #[arg(long, default_value_t = DEFAULT_STEP)]
    step: f32,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let source = fs::read_to_string(&args.script)?;
    let commands = parse_script(&source)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;

    let mut canvas = AsciiCanvas::new(args.width, args.height);
    Interpreter::with_step(args.step).run(&commands, &mut canvas)?;

    Ok(())
}
