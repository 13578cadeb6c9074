use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};

use runner_terrain::ascii;
use runner_terrain::config::TerrainConfig;
use runner_terrain::generator::SeededGenerator;
use runner_terrain::shared::{SharedTerrain, TerrainSnapshot};

mod runner;

#[derive(Parser, Debug)]
#[command(name = "runner_terrain")]
#[command(about = "Endless-runner terrain generator with a scrolling terminal view")]
struct Args {
    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// TOML configuration file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of visible columns
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Highest row terrain may climb to
    #[arg(long)]
    top: Option<i32>,

    /// Lowest row terrain may sink to
    #[arg(long)]
    bottom: Option<i32>,

    /// Row of the initial flat ground
    #[arg(long)]
    ground_start: Option<i32>,

    /// Exclusive upper bound for slope run lengths
    #[arg(long)]
    max_slope_run: Option<u32>,

    /// Milliseconds between scroll steps
    #[arg(short, long, default_value = "100")]
    tick_ms: u64,

    /// Print this many frames to stdout instead of opening the terminal view
    #[arg(long)]
    headless: Option<u64>,

    /// Write the final strip as JSON (headless mode)
    #[arg(long)]
    export: Option<PathBuf>,

    /// Write the final strip as a text report (headless mode)
    #[arg(long)]
    export_text: Option<PathBuf>,
}

impl Args {
    fn terrain_config(&self) -> Result<TerrainConfig, Box<dyn Error>> {
        let config = match &self.config {
            Some(path) => {
                info!(path = %path.display(), "loading terrain config");
                TerrainConfig::load(path)?
            }
            None => TerrainConfig::default(),
        };
        Ok(self.apply_overrides(config))
    }

    /// Flags given on the command line win over file values.
    fn apply_overrides(&self, mut config: TerrainConfig) -> TerrainConfig {
        if let Some(width) = self.width {
            config.screen_width = width;
        }
        if let Some(top) = self.top {
            config.screen_top = top;
        }
        if let Some(bottom) = self.bottom {
            config.screen_bottom = bottom;
        }
        if let Some(ground_start) = self.ground_start {
            config.ground_start = ground_start;
        }
        if let Some(max_run) = self.max_slope_run {
            config.max_slope_run_length = max_run;
        }
        config
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Logs go to stderr so headless frames on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(|| rand::random());
    let config = args.terrain_config()?;
    info!(seed, width = config.screen_width, "starting terrain generator");

    let generator = SeededGenerator::seeded(config, seed)?;

    match args.headless {
        Some(frames) => run_headless(generator, seed, frames, &args),
        None => {
            if args.export.is_some() || args.export_text.is_some() {
                warn!("--export and --export-text only apply with --headless");
            }
            let tick = Duration::from_millis(args.tick_ms);
            runner::run_terminal(SharedTerrain::new(generator), seed, tick)
        }
    }
}

fn run_headless(mut generator: SeededGenerator, seed: u64, frames: u64, args: &Args) -> Result<(), Box<dyn Error>> {
    println!("Seed: {}", seed);
    let delay = Duration::from_millis(args.tick_ms);

    for frame in 0..frames {
        if frame > 0 {
            generator.advance();
        }
        println!("--- tick {} ---", generator.ticks());
        println!("{}", ascii::render_frame(&TerrainSnapshot::capture(&generator)));
        if !delay.is_zero() && frame + 1 < frames {
            thread::sleep(delay);
        }
    }

    let snapshot = TerrainSnapshot::capture(&generator);
    if let Some(path) = &args.export {
        write_json_export(path, &snapshot)?;
        println!("Exported: {}", path.display());
    }
    if let Some(path) = &args.export_text {
        ascii::export_strip_file(path, &snapshot, seed)?;
        println!("Exported: {}", path.display());
    }
    Ok(())
}

fn write_json_export(path: &Path, snapshot: &TerrainSnapshot) -> Result<(), Box<dyn Error>> {
    fs::write(path, serde_json::to_string_pretty(snapshot)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("runner_terrain_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_flags_override_config_file() {
        let path = temp_path("override.toml");
        fs::write(&path, "screen_width = 12\nscreen_bottom = 7\nground_start = 6\nmax_slope_run_length = 4\n").unwrap();

        let args = Args::parse_from([
            "runner_terrain",
            "--config",
            path.to_str().unwrap(),
            "--width",
            "20",
            "--ground-start",
            "3",
        ]);
        let config = args.terrain_config().unwrap();
        fs::remove_file(&path).unwrap();

        // Flags win
        assert_eq!(config.screen_width, 20);
        assert_eq!(config.ground_start, 3);
        // File values survive where no flag was given
        assert_eq!(config.screen_bottom, 7);
        assert_eq!(config.max_slope_run_length, 4);
        // Defaults fill the rest
        assert_eq!(config.screen_top, 1);
    }

    #[test]
    fn test_no_flags_keeps_config() {
        let args = Args::parse_from(["runner_terrain"]);
        let config = TerrainConfig { screen_width: 9, ..Default::default() };
        assert_eq!(args.apply_overrides(config.clone()), config);
        assert_eq!(args.tick_ms, 100);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let args = Args::parse_from(["runner_terrain", "--config", "/nonexistent/runner_terrain.toml"]);
        assert!(args.terrain_config().is_err());
    }

    #[test]
    fn test_json_export_contents() {
        let mut generator = SeededGenerator::seeded(TerrainConfig { screen_width: 8, ..Default::default() }, 11).unwrap();
        for _ in 0..5 {
            generator.advance();
        }
        let snapshot = TerrainSnapshot::capture(&generator);

        let path = temp_path("export.json");
        write_json_export(&path, &snapshot).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["ticks"], 5);
        assert_eq!(value["screen_top"], 1);
        assert_eq!(value["screen_bottom"], 5);
        let segments = value["segments"].as_array().unwrap();
        assert_eq!(segments.len(), 8);
        for (json, segment) in segments.iter().zip(&snapshot.segments) {
            assert_eq!(json["kind"], segment.kind.name());
            assert_eq!(json["height"], segment.height);
        }
    }
}
