/// Script parsing: command tokens, argument lines, and error reporting
use std::error::Error;
use std::fmt;

use nom::{
    character::complete::{alpha1, multispace0, multispace1},
    multi::separated_list1,
    number::complete::float,
    sequence::{delimited, preceded},
    IResult,
};

use crate::transform::Axis;

/// One parsed script command with its typed arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Push,
    Pop,
    Ident,
    Clear,
    Display,
    Quit,
    Line {
        x0: f32,
        y0: f32,
        z0: f32,
        x1: f32,
        y1: f32,
        z1: f32,
    },
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
    },
    Hermite {
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        rx0: f32,
        ry0: f32,
        rx1: f32,
        ry1: f32,
    },
    Bezier {
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        x3: f32,
        y3: f32,
    },
    Box {
        x: f32,
        y: f32,
        z: f32,
        width: f32,
        height: f32,
        depth: f32,
    },
    Sphere {
        cx: f32,
        cy: f32,
        cz: f32,
        r: f32,
    },
    Torus {
        cx: f32,
        cy: f32,
        cz: f32,
        r0: f32,
        r1: f32,
    },
    Scale {
        sx: f32,
        sy: f32,
        sz: f32,
    },
    Move {
        tx: f32,
        ty: f32,
        tz: f32,
    },
    Rotate {
        axis: Axis,
        degrees: f32,
    },
    Save {
        filename: String,
    },
}

/// Script parse failure. Both variants carry the 1-based line number of the
/// offending line and abort the whole run; there is no partial recovery.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptError {
    /// An argument line held a malformed token or the wrong number of
    /// arguments.
    Parse { line: usize, message: String },
    /// A command that needs an argument line sat on the last line of the
    /// script.
    Truncated { line: usize, command: String },
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Parse { line, message } => {
                write!(f, "line {line}: {message}")
            }
            ScriptError::Truncated { line, command } => {
                write!(f, "line {line}: '{command}' is missing its argument line")
            }
        }
    }
}

impl Error for ScriptError {}

/// Parse a whole command script into a command list.
///
/// One command token per line; commands with arguments consume exactly the
/// following line. Unknown command tokens (including blank lines and
/// comments) are skipped, so stray text never aborts a run, but a malformed
/// argument line for a recognized command is fatal. Parsing stops at
/// `quit`; anything after it is never examined.
pub fn parse_script(source: &str) -> Result<Vec<Command>, ScriptError> {
    let lines: Vec<&str> = source.lines().collect();
    let mut commands = Vec::new();
    let mut cursor = 0;

    while cursor < lines.len() {
        let token = lines[cursor].trim();
        let command_line = cursor + 1; // 1-based, for error reporting
        cursor += 1;

        let command = match token {
            "push" => Command::Push,
            "pop" => Command::Pop,
            "ident" => Command::Ident,
            "clear" => Command::Clear,
            "display" => Command::Display,
            "quit" => {
                commands.push(Command::Quit);
                break;
            }
            "line" | "circle" | "hermite" | "bezier" | "box" | "sphere" | "torus" | "scale"
            | "move" | "rotate" | "save" => {
                if cursor >= lines.len() {
                    return Err(ScriptError::Truncated {
                        line: command_line,
                        command: token.to_string(),
                    });
                }
                let args = lines[cursor].trim();
                let arg_line = cursor + 1;
                cursor += 1;
                parse_with_args(token, args, arg_line)?
            }
            // Unrecognized tokens fall through silently.
            _ => continue,
        };
        commands.push(command);
    }

    Ok(commands)
}

fn parse_with_args(token: &str, args: &str, line: usize) -> Result<Command, ScriptError> {
    match token {
        "line" => {
            let v = numbers(args, 6, line)?;
            Ok(Command::Line {
                x0: v[0],
                y0: v[1],
                z0: v[2],
                x1: v[3],
                y1: v[4],
                z1: v[5],
            })
        }
        "circle" => {
            let v = numbers(args, 3, line)?;
            Ok(Command::Circle {
                cx: v[0],
                cy: v[1],
                r: v[2],
            })
        }
        "hermite" => {
            let v = numbers(args, 8, line)?;
            Ok(Command::Hermite {
                x0: v[0],
                y0: v[1],
                x1: v[2],
                y1: v[3],
                rx0: v[4],
                ry0: v[5],
                rx1: v[6],
                ry1: v[7],
            })
        }
        "bezier" => {
            let v = numbers(args, 8, line)?;
            Ok(Command::Bezier {
                x0: v[0],
                y0: v[1],
                x1: v[2],
                y1: v[3],
                x2: v[4],
                y2: v[5],
                x3: v[6],
                y3: v[7],
            })
        }
        "box" => {
            let v = numbers(args, 6, line)?;
            Ok(Command::Box {
                x: v[0],
                y: v[1],
                z: v[2],
                width: v[3],
                height: v[4],
                depth: v[5],
            })
        }
        "sphere" => {
            let v = numbers(args, 4, line)?;
            Ok(Command::Sphere {
                cx: v[0],
                cy: v[1],
                cz: v[2],
                r: v[3],
            })
        }
        "torus" => {
            let v = numbers(args, 5, line)?;
            Ok(Command::Torus {
                cx: v[0],
                cy: v[1],
                cz: v[2],
                r0: v[3],
                r1: v[4],
            })
        }
        "scale" => {
            let v = numbers(args, 3, line)?;
            Ok(Command::Scale {
                sx: v[0],
                sy: v[1],
                sz: v[2],
            })
        }
        "move" => {
            let v = numbers(args, 3, line)?;
            Ok(Command::Move {
                tx: v[0],
                ty: v[1],
                tz: v[2],
            })
        }
        "rotate" => {
            let (axis, degrees) = rotate_args(args, line)?;
            Ok(Command::Rotate { axis, degrees })
        }
        "save" => {
            if args.is_empty() {
                return Err(ScriptError::Parse {
                    line,
                    message: "expected a file name".to_string(),
                });
            }
            Ok(Command::Save {
                filename: args.to_string(),
            })
        }
        _ => unreachable!("parse_with_args called for argument-free command"),
    }
}

fn number_list(input: &str) -> IResult<&str, Vec<f32>> {
    delimited(
        multispace0,
        separated_list1(multispace1, float),
        multispace0,
    )(input)
}

/// Parse an argument line of exactly `expected` whitespace-separated
/// numbers.
fn numbers(input: &str, expected: usize, line: usize) -> Result<Vec<f32>, ScriptError> {
    match number_list(input) {
        Ok(("", values)) if values.len() == expected => Ok(values),
        Ok(("", values)) => Err(ScriptError::Parse {
            line,
            message: format!("expected {expected} numbers, found {}", values.len()),
        }),
        Ok((rest, _)) => Err(ScriptError::Parse {
            line,
            message: format!("malformed numeric argument near '{}'", rest.trim()),
        }),
        Err(_) => Err(ScriptError::Parse {
            line,
            message: format!("malformed numeric argument line '{input}'"),
        }),
    }
}

fn rotate_axis_and_angle(input: &str) -> IResult<&str, (&str, f32)> {
    let (input, letter) = preceded(multispace0, alpha1)(input)?;
    let (input, theta) = delimited(multispace1, float, multispace0)(input)?;
    Ok((input, (letter, theta)))
}

/// Parse the `rotate` argument line: an axis letter and an angle in
/// degrees. Unrecognized axis tokens fall back to the Z axis, matching
/// the reference renderer.
fn rotate_args(input: &str, line: usize) -> Result<(Axis, f32), ScriptError> {
    match rotate_axis_and_angle(input) {
        Ok(("", (letter, degrees))) => {
            let axis = match letter {
                "x" => Axis::X,
                "y" => Axis::Y,
                _ => Axis::Z,
            };
            Ok((axis, degrees))
        }
        Ok((rest, _)) => Err(ScriptError::Parse {
            line,
            message: format!("unexpected trailing text '{}'", rest.trim()),
        }),
        Err(_) => Err(ScriptError::Parse {
            line,
            message: format!("malformed rotate arguments '{input}'"),
        }),
    }
}
