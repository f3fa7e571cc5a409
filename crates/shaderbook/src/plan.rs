//! Merges command-line flags with `shaderbook.toml`.
//!
//! Precedence is always flag, then file, then the renderer default.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use lessons::LessonHandle;
use renderer::{
    Antialiasing, ColorSpaceMode, ExportRequest, RenderPolicy, RendererConfig, DEFAULT_COLOR,
};
use settings::{AntialiasSetting, ColorSpaceSetting, ShaderbookConfig};
use tour::TourMode;

use crate::cli::{ExportArgs, RunArgs};

/// Everything `shaderbook run` needs once flags and config are combined.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub renderer: RendererConfig,
    pub handles: Vec<LessonHandle>,
    pub mode: TourMode,
    pub dwell: Option<Duration>,
    pub seed: u64,
}

pub fn plan_run(args: &RunArgs, config: &ShaderbookConfig) -> Result<RunPlan> {
    let window = &config.window;
    let defaults = RendererConfig::default();

    let still_time = args
        .still_time
        .or_else(|| window.still_time.map(|time| time.as_secs_f32()));
    let target_fps = normalize_fps(args.fps.or(window.fps));
    let policy = match still_time {
        Some(time) => RenderPolicy::Still { time },
        None => RenderPolicy::Animate { target_fps },
    };

    let renderer = RendererConfig {
        surface_size: args.size.or(window.size).unwrap_or(defaults.surface_size),
        antialiasing: args
            .antialias
            .or(window.antialias.map(antialias_from_setting))
            .unwrap_or(defaults.antialiasing),
        color_space: args
            .color_space
            .or(window.color_space.map(color_space_from_setting))
            .unwrap_or(defaults.color_space),
        policy,
        color: resolve_color(args.color, config)?,
    };

    let inputs: Vec<&str> = if args.lessons.is_empty() {
        config.tour.lessons.iter().map(String::as_str).collect()
    } else {
        args.lessons.iter().map(String::as_str).collect()
    };
    let handles = if inputs.is_empty() {
        LessonHandle::all_builtins()
    } else {
        inputs.into_iter().map(LessonHandle::from_input).collect()
    };

    let mode = if args.shuffle {
        TourMode::Shuffle
    } else {
        TourMode::from(config.tour.mode)
    };

    Ok(RunPlan {
        renderer,
        handles,
        mode,
        dwell: args.tour_dwell.or(config.tour.dwell),
        seed: args.seed.or(config.tour.seed).unwrap_or_else(seed_from_time),
    })
}

pub fn plan_export(args: &ExportArgs, config: &ShaderbookConfig) -> Result<ExportRequest> {
    let window = &config.window;
    let defaults = RendererConfig::default();
    let size = args.size.or(window.size).unwrap_or(defaults.surface_size);

    let mut request = ExportRequest::new(args.out.clone(), size);
    request.time = args.time;
    // Without a pointer the lesson sees the centre of the image.
    request.mouse = args
        .mouse
        .unwrap_or([size.0 as f32 / 2.0, size.1 as f32 / 2.0]);
    request.antialiasing = args
        .antialias
        .or(window.antialias.map(antialias_from_setting))
        .unwrap_or(defaults.antialiasing);
    request.color_space = args
        .color_space
        .or(window.color_space.map(color_space_from_setting))
        .unwrap_or(defaults.color_space);
    request.color = resolve_color(args.color, config)?;
    Ok(request)
}

fn resolve_color(flag: Option<[f32; 3]>, config: &ShaderbookConfig) -> Result<[f32; 3]> {
    if let Some(color) = flag {
        return Ok(color);
    }
    match config.uniforms.color.as_deref() {
        Some(raw) => renderer::parse_hex_color(raw).context("invalid uniforms.color"),
        None => Ok(DEFAULT_COLOR),
    }
}

pub fn color_space_from_setting(setting: ColorSpaceSetting) -> ColorSpaceMode {
    match setting {
        ColorSpaceSetting::Auto => ColorSpaceMode::Auto,
        ColorSpaceSetting::Gamma => ColorSpaceMode::Gamma,
        ColorSpaceSetting::Linear => ColorSpaceMode::Linear,
    }
}

pub fn antialias_from_setting(setting: AntialiasSetting) -> Antialiasing {
    match setting {
        AntialiasSetting::Auto => Antialiasing::Auto,
        AntialiasSetting::Off => Antialiasing::Off,
        other => other
            .samples()
            .map(Antialiasing::Samples)
            .unwrap_or(Antialiasing::Auto),
    }
}

fn normalize_fps(value: Option<f32>) -> Option<f32> {
    value.and_then(|fps| if fps > 0.0 { Some(fps) } else { None })
}

fn seed_from_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config(toml: &str) -> ShaderbookConfig {
        ShaderbookConfig::from_toml_str(toml).unwrap()
    }

    #[test]
    fn defaults_tour_every_builtin() {
        let plan = plan_run(&RunArgs::default(), &ShaderbookConfig::default()).unwrap();
        assert_eq!(plan.handles, LessonHandle::all_builtins());
        assert_eq!(plan.mode, TourMode::Sequence);
        assert_eq!(plan.dwell, None);
        assert_eq!(plan.renderer.surface_size, (1280, 720));
        assert_eq!(plan.renderer.color, DEFAULT_COLOR);
        assert_eq!(
            plan.renderer.policy,
            RenderPolicy::Animate { target_fps: None }
        );
    }

    #[test]
    fn file_values_apply_when_flags_are_absent() {
        let config = config(
            r##"
[window]
size = "640x480"
fps = 30
antialias = 4
color_space = "linear"

[uniforms]
color = "#0000ff"

[tour]
mode = "shuffle"
dwell = "20s"
seed = 3
lessons = ["circle", "lessons/waves"]
"##,
        );
        let plan = plan_run(&RunArgs::default(), &config).unwrap();
        assert_eq!(plan.renderer.surface_size, (640, 480));
        assert_eq!(
            plan.renderer.policy,
            RenderPolicy::Animate {
                target_fps: Some(30.0)
            }
        );
        assert_eq!(plan.renderer.antialiasing, Antialiasing::Samples(4));
        assert_eq!(plan.renderer.color_space, ColorSpaceMode::Linear);
        assert_eq!(plan.renderer.color, [0.0, 0.0, 1.0]);
        assert_eq!(plan.mode, TourMode::Shuffle);
        assert_eq!(plan.dwell, Some(Duration::from_secs(20)));
        assert_eq!(plan.seed, 3);
        assert_eq!(
            plan.handles,
            vec![
                LessonHandle::Builtin("circle".into()),
                LessonHandle::Local(PathBuf::from("lessons/waves")),
            ]
        );
    }

    #[test]
    fn flags_override_file() {
        let config = config(
            r##"
[window]
size = "640x480"
fps = 30

[uniforms]
color = "#0000ff"

[tour]
dwell = "20s"
lessons = ["circle"]
"##,
        );
        let args = RunArgs {
            lessons: vec!["step".into()],
            size: Some((320, 200)),
            fps: Some(0.0),
            color: Some([0.0, 1.0, 0.0]),
            still_time: Some(1.5),
            tour_dwell: Some(Duration::from_secs(5)),
            shuffle: true,
            seed: Some(11),
            ..RunArgs::default()
        };
        let plan = plan_run(&args, &config).unwrap();
        assert_eq!(plan.renderer.surface_size, (320, 200));
        assert_eq!(plan.renderer.policy, RenderPolicy::Still { time: 1.5 });
        assert_eq!(plan.renderer.color, [0.0, 1.0, 0.0]);
        assert_eq!(plan.handles, vec![LessonHandle::Builtin("step".into())]);
        assert_eq!(plan.dwell, Some(Duration::from_secs(5)));
        assert_eq!(plan.mode, TourMode::Shuffle);
        assert_eq!(plan.seed, 11);
    }

    #[test]
    fn zero_fps_is_uncapped() {
        let args = RunArgs {
            fps: Some(0.0),
            ..RunArgs::default()
        };
        let plan = plan_run(&args, &ShaderbookConfig::default()).unwrap();
        assert_eq!(
            plan.renderer.policy,
            RenderPolicy::Animate { target_fps: None }
        );
    }

    #[test]
    fn bad_config_color_is_an_error() {
        let config = config("[uniforms]\ncolor = \"crimson\"\n");
        let err = plan_run(&RunArgs::default(), &config).unwrap_err();
        assert!(format!("{err:#}").contains("uniforms.color"));
    }

    #[test]
    fn export_defaults_mouse_to_centre() {
        let args = ExportArgs {
            lesson: "mouse-color".into(),
            out: PathBuf::from("out.png"),
            size: Some((200, 100)),
            time: 2.0,
            mouse: None,
            color: None,
            antialias: None,
            color_space: None,
        };
        let request = plan_export(&args, &config("[window]\nantialias = \"off\"\n")).unwrap();
        assert_eq!(request.size, (200, 100));
        assert_eq!(request.mouse, [100.0, 50.0]);
        assert_eq!(request.time, 2.0);
        assert_eq!(request.antialiasing, Antialiasing::Off);
        assert_eq!(request.color, DEFAULT_COLOR);
    }

    #[test]
    fn setting_conversions() {
        assert_eq!(
            antialias_from_setting(AntialiasSetting::Samples8),
            Antialiasing::Samples(8)
        );
        assert_eq!(
            color_space_from_setting(ColorSpaceSetting::Gamma),
            ColorSpaceMode::Gamma
        );
    }
}
