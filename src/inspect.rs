use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use cubist_core::{Cuboid, LatticePos};
use cubist_world::{CellCoverage, StructureHash, StructureStats};

use crate::generate::read_cuboids;

/// Flags for `cubist inspect`.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Cuboid list written by `cubist generate`
    pub file: PathBuf,

    /// Print an ASCII map of every z layer
    #[arg(long)]
    pub layers: bool,
}

pub fn run(args: InspectArgs) -> Result<()> {
    let cuboids = read_cuboids(&args.file)?;
    print!("{}", render_summary(&cuboids));
    if args.layers {
        print!("{}", render_layers(&cuboids));
    }
    Ok(())
}

/// Human-readable stats block.
pub fn render_summary(cuboids: &[Cuboid]) -> String {
    let stats = StructureStats::from_cuboids(cuboids);
    let mut out = String::new();
    let _ = writeln!(out, "cuboids:     {}", stats.cuboids);
    let _ = writeln!(out, "volume:      {}", stats.volume);
    if let (Some(min), Some(max)) = (stats.min_size, stats.max_size) {
        let _ = writeln!(out, "sizes:       {min}..={max}");
    }
    if let Some(bounds) = stats.bounds {
        let (w, d, h) = bounds.extent();
        let _ = writeln!(
            out,
            "bounds:      {} .. {} ({w} x {d} x {h})",
            bounds.min, bounds.max
        );
    }
    for (size, count) in &stats.size_histogram {
        let _ = writeln!(out, "  size {size:>3}: {count}");
    }
    let _ = writeln!(out, "fingerprint: {}", StructureHash::of(cuboids));
    out
}

/// One block per z layer, bottom up. `#` is covered, `.` is empty; rows run
/// from the highest y down so the map reads like a plan view.
pub fn render_layers(cuboids: &[Cuboid]) -> String {
    let Some(bounds) = StructureStats::from_cuboids(cuboids).bounds else {
        return String::new();
    };
    let coverage = CellCoverage::from_cuboids(cuboids);
    let mut out = String::new();
    for z in bounds.min.z..bounds.max.z {
        let _ = writeln!(out, "z = {z}");
        for y in (bounds.min.y..bounds.max.y).rev() {
            let row: String = (bounds.min.x..bounds.max.x)
                .map(|x| {
                    if coverage.contains(LatticePos::new(x, y, z)) {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect();
            let _ = writeln!(out, "{row}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubist_core::Rgb;

    fn cube(x: i32, y: i32, z: i32, size: u32) -> Cuboid {
        Cuboid::new(LatticePos::new(x, y, z), size, Rgb::DEFAULT_GREY)
    }

    #[test]
    fn summary_lists_counts_and_histogram() {
        let cuboids = [cube(0, 0, 0, 2), cube(2, 0, 0, 1), cube(2, 1, 0, 1)];
        let summary = render_summary(&cuboids);
        assert!(summary.contains("cuboids:     3"), "{summary}");
        assert!(summary.contains("volume:      10"), "{summary}");
        assert!(summary.contains("sizes:       1..=2"), "{summary}");
        assert!(summary.contains("(3 x 2 x 2)"), "{summary}");
        assert!(summary.contains("size   1: 2"), "{summary}");
        assert!(summary.contains(&StructureHash::of(&cuboids).to_hex()));
    }

    #[test]
    fn layers_draw_plan_view_per_z() {
        let cuboids = [cube(0, 0, 0, 2), cube(2, 1, 0, 1)];
        let layers = render_layers(&cuboids);
        assert_eq!(layers, "z = 0\n###\n##.\nz = 1\n##.\n##.\n");
    }

    #[test]
    fn empty_structure_has_no_layers() {
        assert_eq!(render_layers(&[]), "");
        assert!(render_summary(&[]).contains("cuboids:     0"));
    }
}
