//! The bundled tee design: a basic short-sleeved tee drafted from six
//! torso measurements.
//!
//! Parts run in `[back, front, sleeve]` order. Both torso parts write
//! their armhole length into the draft store; the sleeve reads them to
//! size its cap, which is the canonical cross-part dependency of this
//! design.

mod back;
mod block;
mod front;
mod sleeve;

pub use back::Back;
pub use front::Front;
pub use sleeve::Sleeve;

use stitchkit_draft::{DesignConfig, Draft, Measurements, OptionDef};

/// The tee's required measurements and option surface.
pub fn config() -> DesignConfig {
    DesignConfig::new("tee")
        .with_measurement("neck")
        .with_measurement("chest")
        .with_measurement("shoulderToShoulder")
        .with_measurement("biceps")
        .with_measurement("hpsToWaistBack")
        .with_measurement("waistToHips")
        .with_option(OptionDef::fraction("backNeckCutout", 0.05, 0.02, 0.4))
        .with_option(OptionDef::fraction("frontNeckCutout", 0.2, 0.1, 0.5))
        .with_option(OptionDef::fraction("chestEase", 0.05, 0.0, 0.35))
        .with_option(OptionDef::fraction("bicepsEase", 0.1, 0.0, 0.5))
        .with_option(OptionDef::fraction("lengthBonus", 0.1, -0.2, 0.6))
        .with_option(OptionDef::degrees("shoulderSlope", 13.0, 5.0, 25.0))
        .with_option(OptionDef::fraction("sleevecapHeight", 0.45, 0.3, 0.6))
        .with_option(OptionDef::length("sleeveLengthBonus", 60.0, 0.0, 300.0))
        .with_option(OptionDef::choice("fit", "regular", &["slim", "regular", "loose"]))
}

/// The design wired up in dependency order.
pub fn design() -> Draft {
    Draft::new(config())
        .with_part(Box::new(Back))
        .with_part(Box::new(Front))
        .with_part(Box::new(Sleeve))
}

/// A plausible size-medium set of measurements, used by the CLI when no
/// measurements file is given and by the test suite.
pub fn sample_measurements() -> Measurements {
    Measurements::from([
        ("neck", 380.0),
        ("chest", 1080.0),
        ("shoulderToShoulder", 465.0),
        ("biceps", 335.0),
        ("hpsToWaistBack", 445.0),
        ("waistToHips", 145.0),
    ])
}
