use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};

use stitchkit::{init_logging, tee, DraftSettings, Measurements, MeasurementSystem};

/// Draft the bundled tee design and emit the pattern document as JSON.
///
/// Usage: stitchkit [measurements.json] [--out FILE] [--paperless]
///                  [--no-complete] [--sa MM] [--imperial] [--strict]
fn main() -> Result<()> {
    init_logging()?;

    let mut measurements_file: Option<PathBuf> = None;
    let mut out_file: Option<PathBuf> = None;
    let mut settings = DraftSettings::default();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" => {
                let value = args.next().context("--out requires a file path")?;
                out_file = Some(PathBuf::from(value));
            }
            "--sa" => {
                let value = args.next().context("--sa requires a value in mm")?;
                settings.sa = value
                    .parse()
                    .with_context(|| format!("Invalid seam allowance '{}'", value))?;
            }
            "--paperless" => settings.paperless = true,
            "--no-complete" => settings.complete = false,
            "--imperial" => settings.units = MeasurementSystem::Imperial,
            "--strict" => settings.strict_store = true,
            other if !other.starts_with("--") => {
                measurements_file = Some(PathBuf::from(other));
            }
            other => anyhow::bail!("Unknown flag '{}'", other),
        }
    }

    let measurements: Measurements = match &measurements_file {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read measurements from {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("Invalid measurements file {}", path.display()))?
        }
        None => {
            tracing::info!("no measurements file given, drafting the sample size");
            tee::sample_measurements()
        }
    };

    let draft = tee::design();
    let doc = draft.run(&measurements, &BTreeMap::new(), &settings)?;

    match out_file {
        Some(path) => {
            doc.save(&path)?;
            tracing::info!(file = %path.display(), "pattern document written");
        }
        None => println!("{}", doc.to_json()?),
    }

    Ok(())
}
