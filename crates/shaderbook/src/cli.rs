use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use renderer::{Antialiasing, ColorSpaceMode};

#[derive(Parser, Debug)]
#[command(
    name = "shaderbook",
    author,
    version,
    about = "Step-by-step GLSL lessons on a full-screen plane"
)]
pub struct Cli {
    /// Configuration file to use instead of `<config dir>/shaderbook.toml`.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub run: RunArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the lesson window (the default when no subcommand is given).
    Run(RunArgs),
    /// List built-in and local lessons.
    List(ListArgs),
    /// Print a lesson's shader sources.
    Show(ShowArgs),
    /// Compile lessons offline and report errors without opening a window.
    Check(CheckArgs),
    /// Render one frame of a lesson to a PNG file.
    Export(ExportArgs),
    /// Print resolved configuration and lesson directories.
    Where,
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Lessons to tour: built-in names, `builtin:<name>`, or lesson directories.
    #[arg(value_name = "LESSON")]
    pub lessons: Vec<String>,

    /// Initial window size (e.g. `1280x720`).
    #[arg(long, value_name = "WIDTHxHEIGHT", value_parser = parse_size)]
    pub size: Option<(u32, u32)>,

    /// Frame cap (0 = uncapped).
    #[arg(long, value_name = "FPS", value_parser = parse_fps)]
    pub fps: Option<f32>,

    /// Anti-aliasing policy: `auto`, `off`, or an explicit MSAA sample count (e.g. `4`).
    #[arg(long, value_name = "MODE", value_parser = parse_antialias)]
    pub antialias: Option<Antialiasing>,

    /// Output color space handling: `auto`, `gamma`, or `linear`.
    #[arg(long, value_name = "MODE", value_parser = parse_color_space)]
    pub color_space: Option<ColorSpaceMode>,

    /// Value of `u_color` (e.g. `#ff0000`).
    #[arg(long, value_name = "HEX", value_parser = parse_color)]
    pub color: Option<[f32; 3]>,

    /// Hold `u_time` at this many seconds instead of animating.
    #[arg(long, value_name = "SECONDS", value_parser = parse_seconds)]
    pub still_time: Option<f32>,

    /// Advance to the next lesson after this long (e.g. `30s`, `2m`).
    #[arg(long, value_name = "DURATION", value_parser = parse_dwell)]
    pub tour_dwell: Option<Duration>,

    /// Visit lessons in a random order.
    #[arg(long)]
    pub shuffle: bool,

    /// Seed for `--shuffle`; random when omitted.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Print the catalogue as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    #[arg(value_name = "LESSON")]
    pub lesson: String,

    /// Print the GLSL 450 handed to the GPU instead of the lesson source.
    #[arg(long)]
    pub translated: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Lessons to check; every known lesson when omitted.
    #[arg(value_name = "LESSON")]
    pub lessons: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[arg(value_name = "LESSON")]
    pub lesson: String,

    /// Destination PNG path.
    #[arg(long, short, value_name = "PATH", value_parser = parse_png_path)]
    pub out: PathBuf,

    /// Image size (defaults to the window size).
    #[arg(long, value_name = "WIDTHxHEIGHT", value_parser = parse_size)]
    pub size: Option<(u32, u32)>,

    /// Value of `u_time` in seconds.
    #[arg(long, value_name = "SECONDS", value_parser = parse_seconds, default_value = "0")]
    pub time: f32,

    /// Value of `u_mouse` in pixels from the top-left corner (e.g. `320,240`).
    #[arg(long, value_name = "X,Y", value_parser = parse_mouse)]
    pub mouse: Option<[f32; 2]>,

    #[arg(long, value_name = "HEX", value_parser = parse_color)]
    pub color: Option<[f32; 3]>,

    #[arg(long, value_name = "MODE", value_parser = parse_antialias)]
    pub antialias: Option<Antialiasing>,

    #[arg(long, value_name = "MODE", value_parser = parse_color_space)]
    pub color_space: Option<ColorSpaceMode>,
}

pub fn parse() -> Cli {
    Cli::parse()
}

pub fn parse_size(value: &str) -> Result<(u32, u32), String> {
    settings::parse_size(value)
}

pub fn parse_fps(value: &str) -> Result<f32, String> {
    let fps: f32 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid fps '{value}'"))?;
    if !fps.is_finite() || fps < 0.0 {
        return Err(format!("fps must be >= 0, got {value}"));
    }
    Ok(fps)
}

pub fn parse_antialias(value: &str) -> Result<Antialiasing, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("anti-alias mode must not be empty".to_string());
    }

    let normalized = trimmed.to_ascii_lowercase();
    match normalized.as_str() {
        "auto" | "max" | "default" => Ok(Antialiasing::Auto),
        "off" | "none" | "disable" | "disabled" | "0" => Ok(Antialiasing::Off),
        _ => {
            let samples: u32 = normalized.parse().map_err(|_| {
                format!("invalid anti-alias sample count '{trimmed}'; use auto/off or 2/4/8/16")
            })?;

            if samples == 1 {
                return Ok(Antialiasing::Off);
            }

            if !matches!(samples, 2 | 4 | 8 | 16) {
                return Err(format!(
                    "unsupported sample count {samples}; supported values are 2, 4, 8, or 16"
                ));
            }

            Ok(Antialiasing::Samples(samples))
        }
    }
}

pub fn parse_color_space(value: &str) -> Result<ColorSpaceMode, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("color space must not be empty".to_string());
    }
    trimmed
        .parse::<settings::ColorSpaceSetting>()
        .map(crate::plan::color_space_from_setting)
}

pub fn parse_color(value: &str) -> Result<[f32; 3], String> {
    renderer::parse_hex_color(value).map_err(|err| err.to_string())
}

pub fn parse_seconds(value: &str) -> Result<f32, String> {
    let seconds: f32 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid number of seconds '{value}'"))?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(format!("seconds must be a non-negative number, got {value}"));
    }
    Ok(seconds)
}

pub fn parse_dwell(value: &str) -> Result<Duration, String> {
    let dwell = settings::parse_duration(value)?;
    if dwell.is_zero() {
        return Err("tour dwell must be greater than zero".to_string());
    }
    Ok(dwell)
}

pub fn parse_mouse(value: &str) -> Result<[f32; 2], String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("invalid mouse position '{value}'; expected X,Y"))?;
    let x: f32 = x
        .trim()
        .parse()
        .map_err(|_| format!("invalid mouse x in '{value}'"))?;
    let y: f32 = y
        .trim()
        .parse()
        .map_err(|_| format!("invalid mouse y in '{value}'"))?;
    if !x.is_finite() || !y.is_finite() {
        return Err(format!("mouse position '{value}' must be finite"));
    }
    Ok([x, y])
}

pub fn parse_png_path(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => Ok(path),
        None => Err("export path has no extension; expected .png".to_string()),
        Some(other) => Err(format!(
            "unsupported export format '.{other}'; expected .png"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn antialias_values() {
        assert_eq!(parse_antialias("auto").unwrap(), Antialiasing::Auto);
        assert_eq!(parse_antialias("OFF").unwrap(), Antialiasing::Off);
        assert_eq!(parse_antialias("1").unwrap(), Antialiasing::Off);
        assert_eq!(parse_antialias("4").unwrap(), Antialiasing::Samples(4));
        assert!(parse_antialias("3").is_err());
        assert!(parse_antialias("").is_err());
    }

    #[test]
    fn color_space_values() {
        assert_eq!(parse_color_space("gamma").unwrap(), ColorSpaceMode::Gamma);
        assert_eq!(parse_color_space("srgb").unwrap(), ColorSpaceMode::Linear);
        assert!(parse_color_space("hdr").is_err());
    }

    #[test]
    fn colors_and_mouse() {
        assert_eq!(parse_color("#00ff00").unwrap(), [0.0, 1.0, 0.0]);
        assert!(parse_color("green").is_err());
        assert_eq!(parse_mouse("320, 240").unwrap(), [320.0, 240.0]);
        assert!(parse_mouse("320").is_err());
        assert!(parse_mouse("a,b").is_err());
    }

    #[test]
    fn numbers_and_durations() {
        assert_eq!(parse_seconds("2.5").unwrap(), 2.5);
        assert!(parse_seconds("-1").is_err());
        assert_eq!(parse_fps("0").unwrap(), 0.0);
        assert!(parse_fps("fast").is_err());
        assert_eq!(parse_dwell("45s").unwrap(), Duration::from_secs(45));
        assert!(parse_dwell("0s").is_err());
        assert!(parse_dwell("1e20").is_err());
        assert_eq!(parse_fps("1e-30").unwrap(), 1e-30);
    }

    #[test]
    fn export_path_must_be_png() {
        assert!(parse_png_path("frame.PNG").is_ok());
        assert!(parse_png_path("frame.exr").is_err());
        assert!(parse_png_path("frame").is_err());
    }

    #[test]
    fn bare_lessons_run_without_subcommand() {
        let cli = Cli::try_parse_from(["shaderbook", "circle", "step", "--shuffle"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.run.lessons, vec!["circle", "step"]);
        assert!(cli.run.shuffle);
    }

    #[test]
    fn subcommands_parse() {
        let cli = Cli::try_parse_from(["shaderbook", "list", "--json"]).unwrap();
        assert!(matches!(cli.command, Some(Command::List(ListArgs { json: true }))));

        let cli = Cli::try_parse_from([
            "shaderbook",
            "export",
            "circle",
            "--out",
            "circle.png",
            "--size",
            "64x32",
            "--mouse",
            "10,20",
        ])
        .unwrap();
        let Some(Command::Export(args)) = cli.command else {
            panic!("expected export");
        };
        assert_eq!(args.size, Some((64, 32)));
        assert_eq!(args.mouse, Some([10.0, 20.0]));
        assert_eq!(args.time, 0.0);

        let cli = Cli::try_parse_from(["shaderbook", "--config", "x.toml", "where"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(cli.command, Some(Command::Where)));
    }
}
