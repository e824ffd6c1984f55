//! Headless front end for scripted edits of `P3` images.
//!
//! Every subcommand goes through the same [`Session`] a UI shell would use.

use std::{path::PathBuf, process::ExitCode};

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::{error, info, LevelFilter};
use prism::*;

fn main() -> ExitCode {
  let options = create_cmd_args().get_matches();
  setup_logger(&options);
  match run(&options) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      error!("{e}");
      ExitCode::FAILURE
    }
  }
}

fn setup_logger(options: &ArgMatches) {
  let log_level = if options.get_flag("trace") {
    LevelFilter::Trace
  } else if options.get_flag("debug") {
    LevelFilter::Debug
  } else {
    LevelFilter::Info
  };
  // RUST_LOG still wins when it's set
  env_logger::Builder::new()
    .filter_level(log_level)
    .parse_default_env()
    .format_timestamp(None)
    .init();
}

fn parse_color(s: &str) -> Result<Rgba, String> {
  let channels = s
    .split(',')
    .map(|c| c.trim().parse::<u8>().map_err(|e| format!("bad channel `{c}`: {e}")))
    .collect::<Result<Vec<u8>, String>>()?;
  match channels.as_slice() {
    [r, g, b] => Ok(Rgba { r: *r, g: *g, b: *b, a: u8::MAX }),
    [r, g, b, a] => Ok(Rgba { r: *r, g: *g, b: *b, a: *a }),
    _ => Err(String::from("expected `r,g,b` or `r,g,b,a`")),
  }
}

fn input_arg() -> Arg {
  Arg::new("in")
    .short('i')
    .long("input")
    .help("PPM file to read")
    .value_parser(value_parser!(PathBuf))
    .required(true)
}

fn output_arg(required: bool) -> Arg {
  Arg::new("out")
    .short('o')
    .long("output")
    .help("PPM file to write")
    .value_parser(value_parser!(PathBuf))
    .required(required)
}

fn position_args() -> [Arg; 2] {
  [
    Arg::new("x")
      .short('x')
      .help("Image column")
      .value_parser(value_parser!(i32))
      .allow_negative_numbers(true)
      .required(true),
    Arg::new("y")
      .short('y')
      .help("Image row")
      .value_parser(value_parser!(i32))
      .allow_negative_numbers(true)
      .required(true),
  ]
}

fn color_arg() -> Arg {
  Arg::new("color")
    .short('c')
    .long("color")
    .help("Paint color as r,g,b or r,g,b,a")
    .value_parser(parse_color)
    .required(true)
}

#[rustfmt::skip]
fn create_cmd_args() -> Command {
  Command::new("prism")
    .about("Create and edit plain text PPM (P3) images")
    .subcommand_required(true)
    .arg(Arg::new("debug")
      .long("debug")
      .action(ArgAction::SetTrue)
      .global(true)
      .help("Display debug information and higher"))
    .arg(Arg::new("trace")
      .long("trace")
      .action(ArgAction::SetTrue)
      .global(true)
      .help("Display very verbose information"))
    .subcommand(Command::new("new")
      .about("Create a blank white image")
      .arg(Arg::new("width").short('W').long("width").value_parser(value_parser!(u32)))
      .arg(Arg::new("height").short('H').long("height").value_parser(value_parser!(u32)))
      .arg(Arg::new("max-color").short('m').long("max-color").value_parser(value_parser!(u32)))
      .arg(output_arg(true)))
    .subcommand(Command::new("fill")
      .about("Bucket fill the region under a pixel")
      .arg(input_arg())
      .args(position_args())
      .arg(color_arg())
      .arg(output_arg(false)))
    .subcommand(Command::new("brush")
      .about("Stamp a round brush centered on a pixel")
      .arg(input_arg())
      .args(position_args())
      .arg(color_arg())
      .arg(Arg::new("radius").short('r').long("radius").value_parser(value_parser!(u32)))
      .arg(output_arg(false)))
    .subcommand(Command::new("info")
      .about("Print the size and color depth of an image")
      .arg(input_arg()))
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Gets an argument that clap should already have made sure is present.
fn required<T: Clone + Send + Sync + 'static>(options: &ArgMatches, id: &str) -> CliResult<T> {
  options.get_one::<T>(id).cloned().ok_or_else(|| format!("missing argument `{id}`").into())
}

fn run(options: &ArgMatches) -> CliResult<()> {
  let mut session = Session::default();
  let config = *session.config();
  match options.subcommand() {
    Some(("new", sub)) => {
      let width = sub.get_one::<u32>("width").copied().unwrap_or(config.new_width);
      let height = sub.get_one::<u32>("height").copied().unwrap_or(config.new_height);
      let max_color = sub.get_one::<u32>("max-color").copied().unwrap_or(config.new_max_color);
      session.new_image(width, height, max_color)?;
      session.save_as(required::<PathBuf>(sub, "out")?)?;
      Ok(())
    }
    Some(("fill", sub)) => edit(&mut session, sub, Tool::Fill),
    Some(("brush", sub)) => {
      if let Some(radius) = sub.get_one::<u32>("radius") {
        session.set_radius(*radius);
      }
      edit(&mut session, sub, Tool::Brush)
    }
    Some(("info", sub)) => {
      let path = required::<PathBuf>(sub, "in")?;
      // only the header is needed, the pixels are never decoded
      let bytes = std::fs::read(&path).map_err(PrismError::from)?;
      let (PpmHeader { width, height, max_color }, _) = ppm_pull_header(&bytes)?;
      println!("{}: {width}x{height}, max color {max_color}", path.display());
      Ok(())
    }
    _ => Ok(()),
  }
}

fn edit(session: &mut Session, sub: &ArgMatches, tool: Tool) -> CliResult<()> {
  session.open(required::<PathBuf>(sub, "in")?)?;
  session.set_tool(tool);
  session.set_color(required::<Rgba>(sub, "color")?);
  let (x, y) = (required::<i32>(sub, "x")?, required::<i32>(sub, "y")?);
  session.apply_at(x, y)?;
  info!("applied {tool:?} at ({x},{y})");
  match sub.get_one::<PathBuf>("out") {
    Some(out) => session.save_as(out)?,
    None => session.save()?,
  }
  Ok(())
}
