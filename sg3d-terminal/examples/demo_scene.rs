/// Example: render a small scripted scene without an input file
///
/// Usage: cargo run --example demo_scene

use std::io;

use sg3d_core::{parse_script, Interpreter};
use sg3d_terminal::AsciiCanvas;

const SCENE: &str = "\
push
move
60 30 0
rotate
y 30
box
-15 10 10 30 20 20
pop
push
move
25 15 0
circle
0 0 12
pop
bezier
5 5 30 55 70 55 95 5
display
";

fn main() -> io::Result<()> {
    let commands = parse_script(SCENE)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;

    let mut canvas = AsciiCanvas::new(100, 45);
    Interpreter::new().run(&commands, &mut canvas)?;

    Ok(())
}
