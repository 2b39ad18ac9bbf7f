use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{Context, Result};
use clap::Args;
use cubist_core::{Cuboid, GenerationMode, GenerationParameters, Rgb};
use cubist_testkit::{
    GenerationMetrics, GenerationMetricsBuilder, MetricsSink, StructureMetrics, TimingMetrics,
};
use cubist_world::{generate_report, GenerationCounters, GenerationReport, StructureHash, StructureStats};
use tracing::info;

use crate::config::{self, DEFAULT_PARAMS_PATH};

/// Flags for `cubist generate`. Every parameter flag overrides the file value.
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// TOML parameter file (defaults to ./cubist.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Generation mode: additive or subtractive
    #[arg(short, long)]
    pub mode: Option<GenerationMode>,

    /// Random seed
    #[arg(short, long)]
    pub seed: Option<u32>,

    /// Pillar width (subtractive mode)
    #[arg(long)]
    pub width: Option<u32>,

    /// Pillar depth (subtractive mode)
    #[arg(long)]
    pub depth: Option<u32>,

    /// Pillar height (subtractive mode)
    #[arg(long)]
    pub height: Option<u32>,

    /// Target cube count (additive) or removal passes (subtractive)
    #[arg(short, long)]
    pub iterations: Option<u32>,

    /// Smallest cube edge length
    #[arg(long)]
    pub min_size: Option<u32>,

    /// Largest cube edge length
    #[arg(long)]
    pub max_size: Option<u32>,

    /// Cuboid colour as #rrggbb
    #[arg(long)]
    pub color: Option<Rgb>,

    /// Write the cuboid list here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write a metrics report (JSON) here
    #[arg(long)]
    pub metrics: Option<PathBuf>,

    /// Save the effective parameters (TOML) here
    #[arg(long)]
    pub save_config: Option<PathBuf>,
}

impl GenerateArgs {
    /// Base parameters from the config file, then flag overrides.
    pub fn resolve_params(&self) -> Result<GenerationParameters> {
        let mut params = match &self.config {
            Some(path) => config::load_params(path)?,
            None => config::load_params_or_default(Path::new(DEFAULT_PARAMS_PATH)),
        };
        self.apply_overrides(&mut params);
        params.validate().context("Invalid generation parameters")?;
        Ok(params)
    }

    fn apply_overrides(&self, params: &mut GenerationParameters) {
        if let Some(mode) = self.mode {
            params.mode = mode;
        }
        if let Some(seed) = self.seed {
            params.seed = seed;
        }
        if let Some(width) = self.width {
            params.width = width;
        }
        if let Some(depth) = self.depth {
            params.depth = depth;
        }
        if let Some(height) = self.height {
            params.height = height;
        }
        if let Some(iterations) = self.iterations {
            params.iterations = iterations;
        }
        if let Some(min) = self.min_size {
            params.min_cube_size = min;
        }
        if let Some(max) = self.max_size {
            params.max_cube_size = max;
        }
        if let Some(color) = self.color {
            params.color = color;
        }
    }
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let params = args.resolve_params()?;

    let started = Instant::now();
    let report = generate_report(&params);
    let generation_us = started.elapsed().as_micros();

    let stats = StructureStats::from_cuboids(&report.cuboids);
    let hash = StructureHash::of(&report.cuboids);
    info!(
        mode = %params.mode,
        seed = params.seed,
        cuboids = stats.cuboids,
        volume = stats.volume,
        fingerprint = %hash,
        generation_us,
        "structure generated"
    );

    let export_started = Instant::now();
    write_cuboids(&report.cuboids, args.output.as_deref())?;
    let export_us = export_started.elapsed().as_micros();

    if let Some(path) = &args.metrics {
        let metrics = build_metrics(
            &params,
            &report,
            &stats,
            hash,
            TimingMetrics {
                generation_us,
                export_us: Some(export_us),
            },
        );
        MetricsSink::create(path)?.write(&metrics)?;
        info!(path = %path.display(), "wrote generation metrics");
    }

    if let Some(path) = &args.save_config {
        config::save_params(&params, path)?;
        info!(path = %path.display(), "saved parameters");
    }

    Ok(())
}

/// Serialize cuboids as pretty JSON to `output`, or stdout when `None`.
pub fn write_cuboids(cuboids: &[Cuboid], output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(cuboids)?;
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)
                        .with_context(|| format!("Failed to create directory {}", parent.display()))?;
                }
            }
            fs::write(path, json)
                .with_context(|| format!("Failed to write cuboids to {}", path.display()))?;
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(json.as_bytes())?;
            lock.write_all(b"\n")?;
        }
    }
    Ok(())
}

/// Read a cuboid list previously written by [`write_cuboids`].
pub fn read_cuboids(path: &Path) -> Result<Vec<Cuboid>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read cuboids from {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse cuboids in {}", path.display()))
}

fn build_metrics(
    params: &GenerationParameters,
    report: &GenerationReport,
    stats: &StructureStats,
    hash: StructureHash,
    timing: TimingMetrics,
) -> GenerationMetrics {
    let builder = GenerationMetricsBuilder::new(format!("generate-{}", params.mode), params.clone())
        .structure(StructureMetrics {
            cuboids: stats.cuboids,
            volume: stats.volume,
            min_size: stats.min_size,
            max_size: stats.max_size,
            bounds: stats.bounds,
            size_histogram: stats.size_histogram.clone(),
            fingerprint: hash.to_hex(),
        })
        .timing(timing);
    let builder = match report.counters {
        GenerationCounters::Additive {
            attempts,
            abandoned_iterations,
        } => builder
            .counter("attempts", attempts)
            .counter("abandoned_iterations", u64::from(abandoned_iterations)),
        GenerationCounters::Subtractive {
            passes,
            cells_cleared,
            solid_cells,
        } => builder
            .counter("passes", u64::from(passes))
            .counter("cells_cleared", cells_cleared as u64)
            .counter("solid_cells", solid_cells as u64),
    };
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubist_testkit::load_metrics;
    use tempfile::{tempdir, TempDir};

    fn write_config(contents: &str) -> (TempDir, PathBuf) {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("cubist.toml");
        fs::write(&path, contents).expect("write config");
        (dir, path)
    }

    fn args_with_config(path: PathBuf) -> GenerateArgs {
        GenerateArgs {
            config: Some(path),
            ..GenerateArgs::default()
        }
    }

    #[test]
    fn flags_override_file_values() {
        let (_dir, path) = write_config("mode = \"subtractive\"\nseed = 5\nwidth = 8\n");
        let args = GenerateArgs {
            seed: Some(11),
            max_size: Some(4),
            ..args_with_config(path)
        };
        let params = args.resolve_params().expect("resolve");
        assert_eq!(params.mode, GenerationMode::Subtractive);
        assert_eq!(params.seed, 11);
        assert_eq!(params.width, 8);
        assert_eq!(params.max_cube_size, 4);
    }

    #[test]
    fn invalid_overrides_are_rejected() {
        let (_dir, path) = write_config("seed = 1\n");
        let args = GenerateArgs {
            min_size: Some(9),
            max_size: Some(3),
            ..args_with_config(path)
        };
        let err = args.resolve_params().expect_err("inverted range");
        assert!(format!("{err:#}").contains("exceeds maximum"));
    }

    #[test]
    fn oversized_overrides_never_reach_the_generator() {
        let (_dir, path) = write_config("mode = \"subtractive\"\n");
        let args = GenerateArgs {
            width: Some(3_000_000),
            depth: Some(3_000_000),
            height: Some(3_000_000),
            iterations: Some(1),
            ..args_with_config(path.clone())
        };
        let err = args.resolve_params().expect_err("pillar too large");
        assert!(format!("{err:#}").contains("exceeds the limit"), "{err:#}");

        let args = GenerateArgs {
            mode: Some(GenerationMode::Additive),
            max_size: Some(1_000_000),
            ..args_with_config(path)
        };
        let err = args.resolve_params().expect_err("cube size too large");
        assert!(format!("{err:#}").contains("maximum cube size"), "{err:#}");
    }

    #[test]
    fn run_writes_cuboids_metrics_and_params() {
        let (dir, config_path) = write_config(
            "mode = \"subtractive\"\nseed = 1\nwidth = 4\ndepth = 4\nheight = 4\niterations = 1\nmin_cube_size = 2\nmax_cube_size = 2\n",
        );
        let output = dir.path().join("out").join("cuboids.json");
        let metrics = dir.path().join("metrics.json");
        let saved = dir.path().join("saved.toml");

        run(GenerateArgs {
            output: Some(output.clone()),
            metrics: Some(metrics.clone()),
            save_config: Some(saved.clone()),
            ..args_with_config(config_path)
        })
        .expect("generate");

        let cuboids = read_cuboids(&output).expect("cuboids");
        let volume: u64 = cuboids.iter().map(Cuboid::volume).sum();
        assert_eq!(volume, 56);

        let report = load_metrics(&metrics).expect("metrics");
        assert_eq!(report.structure.volume, 56);
        assert_eq!(report.counters.get("cells_cleared"), Some(&8));
        assert_eq!(report.structure.fingerprint, StructureHash::of(&cuboids).to_hex());
        assert_eq!(
            report.structure.size_histogram,
            std::collections::BTreeMap::from([(1, 8), (2, 6)])
        );
        assert_eq!(report.structure.bounds.map(|b| b.extent()), Some((4, 4, 4)));

        let reloaded = config::load_params(&saved).expect("saved params");
        assert_eq!(reloaded.iterations, 1);
    }
}
