//! Structural comparison of two cuboid lists, keyed by origin.
//!
//! Exit codes:
//! - 0: identical lists (same cuboids in the same order)
//! - 1: lists differ

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use cubist_core::Cuboid;
use cubist_world::StructureHash;

use crate::generate::read_cuboids;

/// Flags for `cubist diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Reference cuboid list
    pub baseline: PathBuf,

    /// Cuboid list to compare against the baseline
    pub current: PathBuf,
}

/// Differences between two cuboid lists.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct StructureDiff {
    pub added: Vec<Cuboid>,
    pub removed: Vec<Cuboid>,
    /// Same origin, different size or colour: (baseline, current).
    pub changed: Vec<(Cuboid, Cuboid)>,
    /// Same cuboids overall but emitted in a different order.
    pub reordered: bool,
    /// Same cuboid at every origin, but repeated origins differ between lists.
    pub multiplicity_changed: bool,
    /// Cuboid counts as (baseline, current).
    pub lengths: (usize, usize),
}

impl StructureDiff {
    pub fn between(baseline: &[Cuboid], current: &[Cuboid]) -> Self {
        let base = first_by_key(baseline);
        let cur = first_by_key(current);

        let mut diff = StructureDiff {
            lengths: (baseline.len(), current.len()),
            ..StructureDiff::default()
        };
        for (key, b) in &base {
            match cur.get(key) {
                None => diff.removed.push(**b),
                Some(c) if c != b => diff.changed.push((**b, **c)),
                Some(_) => {}
            }
        }
        diff.added = cur
            .iter()
            .filter(|(key, _)| !base.contains_key(key))
            .map(|(_, c)| **c)
            .collect();
        if diff.is_set_equal() && baseline != current {
            if sorted(baseline) == sorted(current) {
                diff.reordered = true;
            } else {
                diff.multiplicity_changed = true;
            }
        }
        diff
    }

    fn is_set_equal(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    pub fn is_identical(&self) -> bool {
        self.is_set_equal() && !self.reordered && !self.multiplicity_changed
    }
}

/// First cuboid seen at each origin.
fn first_by_key(cuboids: &[Cuboid]) -> BTreeMap<(i32, i32, i32), &Cuboid> {
    let mut map = BTreeMap::new();
    for cuboid in cuboids {
        map.entry(cuboid.key()).or_insert(cuboid);
    }
    map
}

fn sorted(cuboids: &[Cuboid]) -> Vec<Cuboid> {
    let mut sorted = cuboids.to_vec();
    sorted.sort_by_key(|c| (c.key(), c.size, c.color.r, c.color.g, c.color.b));
    sorted
}

pub fn run(args: DiffArgs) -> Result<bool> {
    let baseline = read_cuboids(&args.baseline)?;
    let current = read_cuboids(&args.current)?;
    let diff = StructureDiff::between(&baseline, &current);

    println!("baseline: {} ({} cuboids)", StructureHash::of(&baseline), baseline.len());
    println!("current:  {} ({} cuboids)", StructureHash::of(&current), current.len());

    for cuboid in &diff.removed {
        println!("- {cuboid} size {}", cuboid.size);
    }
    for cuboid in &diff.added {
        println!("+ {cuboid} size {}", cuboid.size);
    }
    for (before, after) in &diff.changed {
        println!(
            "~ {before} size {} {} -> size {} {}",
            before.size, before.color, after.size, after.color
        );
    }
    if diff.reordered {
        println!("~ same cuboids in a different order");
    }
    if diff.multiplicity_changed {
        println!(
            "~ origins repeated a different number of times ({} vs {} cuboids)",
            diff.lengths.0, diff.lengths.1
        );
    }

    let identical = diff.is_identical();
    println!(
        "{}: {} added, {} removed, {} changed",
        if identical { "IDENTICAL" } else { "DIFFERENT" },
        diff.added.len(),
        diff.removed.len(),
        diff.changed.len()
    );
    Ok(identical)
}
