// CLI binary: panicking on unrecoverable errors is standard for CLI tools.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde_json::json;

use texture_studio::model::{presets, Color, Dimensions, NoiseAlgorithm, TextureParams, TextureType};
use texture_studio::settings;
use texture_studio::state::StudioState;
use texture_studio::{engine, paths, telemetry, PixelBuffer, StudioError};

// ── CLI argument parsing ─────────────────────────────────────────

#[derive(Parser)]
#[command(name = "texture-cli", about = "Procedural texture generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config directory holding settings.json
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Output raw JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a texture and report on it
    Generate {
        #[command(flatten)]
        params: ParamArgs,
        #[command(flatten)]
        canvas: CanvasArgs,
        /// Stream the RGBA bytes to stdout; the report goes to stderr
        #[arg(long)]
        raw: bool,
        /// Remember these parameters in settings.json
        #[arg(long)]
        save_settings: bool,
    },
    /// Print the parameters a generate call would use
    Params {
        #[command(flatten)]
        params: ParamArgs,
    },
    /// List built-in presets
    Presets,
    /// List noise algorithms
    Algorithms,
    /// Time repeated renders of the same parameters
    Bench {
        #[command(flatten)]
        params: ParamArgs,
        #[command(flatten)]
        canvas: CanvasArgs,
        /// Number of iterations
        #[arg(long, default_value = "10")]
        iterations: usize,
    },
}

#[derive(Args)]
struct ParamArgs {
    /// Start from a named preset (see `presets`)
    #[arg(long)]
    preset: Option<String>,
    /// Randomize scale, roughness, octaves, persistence and colors
    #[arg(long)]
    random: bool,
    /// Seed for --random
    #[arg(long)]
    seed: Option<u64>,
    /// Texture type (Wood, Stone, Metal, Marble, Fabric, Clouds, Fire, Water, Abstract)
    #[arg(long = "type")]
    texture_type: Option<String>,
    /// Noise algorithm (perlin, simplex, voronoi, fractal)
    #[arg(long)]
    algorithm: Option<String>,
    #[arg(long)]
    scale: Option<f64>,
    #[arg(long)]
    roughness: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    octaves: Option<i32>,
    #[arg(long)]
    persistence: Option<f64>,
    /// First blend color, #RRGGBB
    #[arg(long)]
    color1: Option<String>,
    /// Second blend color, #RRGGBB
    #[arg(long)]
    color2: Option<String>,
}

#[derive(Args)]
struct CanvasArgs {
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,
}

// ── Parameter resolution ─────────────────────────────────────────

/// Saved settings, then preset, then randomization, then explicit flags.
fn resolve_params(base: &TextureParams, args: &ParamArgs) -> Result<TextureParams, StudioError> {
    let mut params = base.clone();

    if let Some(id) = &args.preset {
        let preset = presets::find_preset(id)
            .ok_or_else(|| StudioError::UnknownPreset { id: id.clone() })?;
        preset.apply(&mut params);
    }

    if args.random {
        let mut rng: Box<dyn RngCore> = match args.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(rand::thread_rng()),
        };
        params.randomize(&mut *rng);
    }

    if let Some(name) = &args.texture_type {
        params.texture_type = TextureType::from_name(name);
    }
    if let Some(name) = &args.algorithm {
        params.algorithm = NoiseAlgorithm::from_name(name);
    }
    if let Some(v) = args.scale {
        params.scale = v;
    }
    if let Some(v) = args.roughness {
        params.roughness = v;
    }
    if let Some(v) = args.octaves {
        params.octaves = v;
    }
    if let Some(v) = args.persistence {
        params.persistence = v;
    }
    if let Some(hex) = &args.color1 {
        params.color1 = Color::from_hex(hex);
    }
    if let Some(hex) = &args.color2 {
        params.color2 = Color::from_hex(hex);
    }

    Ok(params)
}

fn resolve_canvas(base: Dimensions, args: &CanvasArgs) -> Dimensions {
    Dimensions::new(args.width.unwrap_or(base.width), args.height.unwrap_or(base.height))
}

/// Per-channel mean over all pixels, or `None` for an empty buffer.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn mean_color(buffer: &PixelBuffer) -> Option<Color> {
    let mut sums = [0u64; 3];
    let mut count = 0u64;
    for px in buffer.pixels() {
        for (sum, &channel) in sums.iter_mut().zip(px) {
            *sum += u64::from(channel);
        }
        count += 1;
    }
    if count == 0 {
        return None;
    }
    let [r, g, b] = sums.map(|sum| (sum as f64 / count as f64).round() as u8);
    Some(Color::rgb(r, g, b))
}

// ── Commands ─────────────────────────────────────────────────────

fn print_value(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

fn run_generate(
    config_dir: &Path,
    state: &StudioState,
    stream: bool,
    save: bool,
    json_out: bool,
) -> Result<(), StudioError> {
    let rendered = state.generate().ok_or(StudioError::Busy)?;

    if save {
        settings::save_settings(config_dir, &state.to_settings())?;
    }

    let report = &rendered.report;
    let mean = mean_color(&rendered.buffer);
    let summary = if json_out {
        serde_json::to_string_pretty(&json!({ "report": report, "meanColor": mean }))?
    } else {
        let (texture, algorithm) =
            state.with_params(|p| (p.texture_type, p.algorithm.display_name()));
        let mut lines = vec![format!(
            "{} {texture} texture ({algorithm}) generated in {}ms",
            format_size(report.width, report.height),
            report.elapsed_ms,
        )];
        if let Some(mean) = mean {
            lines.push(format!("  mean color: {mean}"));
        }
        if report.degraded_samples > 0 {
            lines.push(format!("  {} noise samples were replaced", report.degraded_samples));
        }
        if let Some(reason) = &report.fallback {
            lines.push(format!("  fallback gradient used: {reason}"));
        }
        lines.join("\n")
    };

    if stream {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(rendered.buffer.as_bytes())?;
        stdout.flush()?;
        eprintln!("{summary}");
    } else {
        println!("{summary}");
    }
    Ok(())
}

fn format_size(width: u32, height: u32) -> String {
    format!("{width}x{height}")
}

fn run_params(params: &TextureParams, raw: bool) {
    if raw {
        print_value(&json!(params));
        return;
    }
    println!("type:        {}", params.texture_type);
    println!("algorithm:   {} ({})", params.algorithm.as_str(), params.algorithm.display_name());
    println!("scale:       {}", params.scale);
    println!("roughness:   {} (effective {})", params.roughness, params.effective_roughness());
    println!("octaves:     {} (effective {})", params.octaves, params.effective_octaves());
    println!("persistence: {} (effective {})", params.persistence, params.effective_persistence());
    println!("color1:      {}", params.color1);
    println!("color2:      {}", params.color2);
}

fn run_presets(raw: bool) {
    let all = presets::presets();
    if raw {
        let list: Vec<_> = all
            .iter()
            .map(|(id, preset)| json!({ "id": id, "preset": preset }))
            .collect();
        print_value(&json!(list));
        return;
    }
    for (id, preset) in all {
        println!(
            "{id:<14} {:<8} scale {:<5} roughness {:<4} octaves {} persistence {:<4} {} -> {}",
            preset.texture_type,
            preset.scale,
            preset.roughness,
            preset.octaves,
            preset.persistence,
            preset.color1,
            preset.color2,
        );
    }
}

fn run_algorithms(raw: bool) {
    if raw {
        let list: Vec<_> = NoiseAlgorithm::ALL
            .iter()
            .map(|a| json!({ "id": a, "name": a.display_name() }))
            .collect();
        print_value(&json!(list));
        return;
    }
    for algorithm in NoiseAlgorithm::ALL {
        println!("{:<8} {}", algorithm.as_str(), algorithm.display_name());
    }
}

#[allow(clippy::cast_possible_truncation)]
fn run_bench(params: &TextureParams, canvas: Dimensions, iterations: usize, raw: bool) {
    let iterations = iterations.max(1);
    eprintln!(
        "Benchmarking {iterations} iterations of {} {} / {}...",
        format_size(canvas.width, canvas.height),
        params.texture_type,
        params.algorithm.as_str()
    );

    // Warmup
    std::hint::black_box(engine::generate(params, canvas.width, canvas.height));

    let mut times: Vec<Duration> = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        let start = Instant::now();
        let buffer = engine::generate(params, canvas.width, canvas.height);
        times.push(start.elapsed());
        std::hint::black_box(&buffer);
    }

    times.sort();
    let total: Duration = times.iter().sum();
    let avg = total / iterations as u32;
    let median = times[iterations / 2];
    let min = times[0];
    let max = times[iterations - 1];

    if raw {
        print_value(&json!({
            "iterations": iterations,
            "avg_ms": avg.as_secs_f64() * 1000.0,
            "median_ms": median.as_secs_f64() * 1000.0,
            "min_ms": min.as_secs_f64() * 1000.0,
            "max_ms": max.as_secs_f64() * 1000.0,
        }));
        return;
    }
    println!("Results ({iterations} iterations):");
    println!("  avg:    {avg:>8.2?}");
    println!("  median: {median:>8.2?}");
    println!("  min:    {min:>8.2?}");
    println!("  max:    {max:>8.2?}");
}

// ── Main ─────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    telemetry::init_tracing("info");

    let config_dir = cli.config_dir.clone().unwrap_or_else(paths::default_config_dir);
    let stored = settings::load_settings(&config_dir).unwrap_or_default();
    let raw = cli.json;

    let result = match &cli.command {
        Commands::Generate {
            params,
            canvas,
            raw: stream,
            save_settings,
        } => resolve_params(&stored.params, params).and_then(|resolved| {
            let state = StudioState::new(resolved, resolve_canvas(stored.dimensions(), canvas));
            run_generate(&config_dir, &state, *stream, *save_settings, raw)
        }),
        Commands::Params { params } => {
            resolve_params(&stored.params, params).map(|resolved| run_params(&resolved, raw))
        }
        Commands::Presets => {
            run_presets(raw);
            Ok(())
        }
        Commands::Algorithms => {
            run_algorithms(raw);
            Ok(())
        }
        Commands::Bench {
            params,
            canvas,
            iterations,
        } => resolve_params(&stored.params, params).map(|resolved| {
            run_bench(&resolved, resolve_canvas(stored.dimensions(), canvas), *iterations, raw);
        }),
    };

    if let Err(e) = result {
        if raw {
            print_value(&json!(e));
        } else {
            eprintln!("Error: {e}");
        }
        process::exit(1);
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("texture-cli").chain(argv.iter().copied())).unwrap()
    }

    fn param_args(cli: &Cli) -> &ParamArgs {
        match &cli.command {
            Commands::Generate { params, .. }
            | Commands::Params { params }
            | Commands::Bench { params, .. } => params,
            _ => panic!("command has no params"),
        }
    }

    #[test]
    fn flags_override_preset() {
        let cli = args(&["params", "--preset", "rusted-metal", "--octaves", "-2", "--color2", "#000000"]);
        let p = resolve_params(&TextureParams::default(), param_args(&cli)).unwrap();
        assert_eq!(p.texture_type, TextureType::Metal);
        assert_eq!(p.octaves, -2);
        assert_eq!(p.effective_octaves(), 1);
        assert_eq!(p.color2, Color::BLACK);
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let cli = args(&["params", "--preset", "velvet"]);
        let err = resolve_params(&TextureParams::default(), param_args(&cli)).unwrap_err();
        assert_eq!(err, StudioError::UnknownPreset { id: "velvet".into() });
    }

    #[test]
    fn seeded_random_repeats() {
        let cli = args(&["params", "--random", "--seed", "11", "--type", "fire"]);
        let a = resolve_params(&TextureParams::default(), param_args(&cli)).unwrap();
        let b = resolve_params(&TextureParams::default(), param_args(&cli)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.texture_type, TextureType::Fire);
    }

    #[test]
    fn lenient_names() {
        let cli = args(&["params", "--type", "plasma", "--algorithm", "wavelet"]);
        let p = resolve_params(&TextureParams::default(), param_args(&cli)).unwrap();
        assert_eq!(p.texture_type, TextureType::Abstract);
        assert_eq!(p.algorithm, NoiseAlgorithm::Perlin);
    }

    #[test]
    fn mean_of_uniform_fallback_is_its_color() {
        let params = TextureParams {
            color1: Color::rgb(40, 80, 120),
            color2: Color::rgb(40, 80, 120),
            ..TextureParams::default()
        };
        let buffer = engine::render_fallback(&params, Dimensions::new(5, 3));
        assert_eq!(mean_color(&buffer), Some(Color::rgb(40, 80, 120)));
        assert_eq!(mean_color(&engine::generate(&params, 0, 0)), None);
    }

    #[test]
    fn generate_saves_settings_when_asked() {
        let dir = std::env::temp_dir().join("texture_studio_test_cli_save");
        let _ = std::fs::remove_dir_all(&dir);

        let params = TextureParams {
            texture_type: TextureType::Clouds,
            ..TextureParams::default()
        };
        let state = StudioState::new(params.clone(), Dimensions::new(12, 9));
        run_generate(&dir, &state, false, true, true).unwrap();

        let saved = settings::load_settings(&dir).expect("settings written");
        assert_eq!(saved.params, params);
        assert_eq!(saved.dimensions(), Dimensions::new(12, 9));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn canvas_defaults_to_saved_size() {
        let cli = args(&["generate", "--width", "64"]);
        let Commands::Generate { canvas, .. } = &cli.command else {
            panic!("expected generate");
        };
        assert_eq!(resolve_canvas(Dimensions::new(300, 200), canvas), Dimensions::new(64, 200));
    }
}
