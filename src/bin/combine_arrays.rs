//! Multiplies two arrays given as JSON descriptors.
//!
//! ```text
//! combine_arrays lhs.json rhs.json > product.json
//! ```

use std::path::Path;

use anyhow::{bail, Context};
use multidim_native::{ArrayDescriptor, MultiDimArray};

fn load(path: &Path) -> anyhow::Result<MultiDimArray<f64>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let descriptor = ArrayDescriptor::from_json(&json)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    MultiDimArray::from_descriptor(&descriptor)
        .with_context(|| format!("failed to build array from {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 2 {
        bail!("usage: combine_arrays <lhs.json> <rhs.json>");
    }

    let lhs = load(Path::new(&args[0]))?;
    let rhs = load(Path::new(&args[1]))?;
    eprintln!(
        "combining {:?} x {:?} ({} elements)",
        lhs.shape(),
        rhs.shape(),
        lhs.len()
    );

    let product = lhs.combine(&rhs).context("arrays cannot be combined")?;
    println!("{}", product.to_descriptor().to_json_pretty()?);
    Ok(())
}
