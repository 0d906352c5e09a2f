//! Demo binary that synthesizes planet surface textures and writes PNGs.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI
//! flags. Run with `cargo run -p ecosse-demo` to export color and bump
//! textures for every classification, or
//! `cargo run -p ecosse-demo -- --class gas --seed 0.7` for a single one.

mod export;

use std::time::{Duration, Instant};

use clap::Parser;
use ecosse_config::{CliArgs, Config};
use ecosse_noise::FractalParams;
use ecosse_surface::{
    AsyncSurfaceGenerator, SynthesisParams, SynthesisTask, TerrainClass, TextureKey, TextureKind,
};
use tracing::{error, info, warn};

fn main() {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args.config.clone().unwrap_or_else(|| {
        dirs::config_dir()
            .expect("Failed to resolve config directory")
            .join("ecosse")
    });

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    // File logging only in debug builds; release runs log to the console alone.
    let log_dir = config_dir.join("logs");
    let file_log_dir = cfg!(debug_assertions).then_some(log_dir.as_path());
    ecosse_log::init_logging(Some(&config), file_log_dir);

    let classes: Vec<TerrainClass> = match args.class.as_deref() {
        Some(name) => match TerrainClass::from_name(name) {
            Ok(class) => vec![class],
            Err(err) => {
                error!(%err, "unknown --class value");
                std::process::exit(1);
            }
        },
        None => TerrainClass::ALL.to_vec(),
    };

    let generator = AsyncSurfaceGenerator::with_defaults(synthesis_params(&config));

    let kinds: &[TextureKind] = if config.export.write_bump {
        &[TextureKind::Color, TextureKind::Bump]
    } else {
        &[TextureKind::Color]
    };

    let mut expected = 0;
    for &class in &classes {
        for &kind in kinds {
            let task = SynthesisTask {
                key: TextureKey { class, kind },
                seed: config.noise.seed,
                width: config.surface.width,
                height: config.surface.height,
            };
            match generator.submit(task) {
                Ok(()) => expected += 1,
                Err(err) => error!(%err, "failed to queue synthesis task"),
            }
        }
    }
    info!(
        expected,
        seed = config.noise.seed,
        width = config.surface.width,
        height = config.surface.height,
        "queued synthesis tasks"
    );

    let start = Instant::now();
    let deadline = start + Duration::from_secs(120);
    let mut processed = 0;
    while processed < expected && Instant::now() < deadline {
        for completed in generator.drain_results() {
            let file_name = format!(
                "{}_{}.png",
                completed.key.class.name(),
                completed.key.kind.name()
            );
            let path = config.export.output_dir.join(file_name);
            match export::save_raster(&completed.raster, &path) {
                Ok(()) => info!(
                    path = %path.display(),
                    synthesis_time_us = completed.synthesis_time_us,
                    "exported texture"
                ),
                Err(err) => error!(%err, path = %path.display(), "export failed"),
            }
            processed += 1;
        }
        std::thread::sleep(Duration::from_millis(10));
    }

    if processed < expected {
        warn!(processed, expected, "timed out waiting for synthesis results");
    }
    info!(
        processed,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "done"
    );
}

/// Build pass parameters from the persisted configuration.
fn synthesis_params(config: &Config) -> SynthesisParams {
    SynthesisParams {
        color: FractalParams {
            octaves: config.noise.color_octaves,
            base_scale: config.noise.color_scale,
            ..FractalParams::default()
        },
        threshold: config.noise.threshold,
        bump: FractalParams {
            octaves: config.noise.bump_octaves,
            base_scale: config.noise.bump_scale,
            ..FractalParams::default()
        },
        band_scale: config.noise.band_scale,
    }
}
