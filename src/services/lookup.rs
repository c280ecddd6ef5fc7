use crate::domain::constants::{FORCED_PHOTOMETRY_ORIGIN, PHOTOMETRY_INSTRUMENT};
use crate::domain::models::{PhotometryPoint, SourceSummary};
use crate::services::angle::{format_angle, AngleKind};
use crate::services::fritz::FritzClient;
use anyhow::Context;

/// Coordinates and latest ZTF magnitude of a source.
///
/// Any upstream failure is returned before the photometry is requested, so a
/// summary always carries real coordinates.
pub fn query_source(fritz: &FritzClient, id: &str) -> anyhow::Result<SourceSummary> {
    let source = fritz
        .source(id)
        .with_context(|| format!("failed to query Fritz for {} coordinates", id))?;
    if !(0.0..=360.0).contains(&source.ra) || !(-90.0..=90.0).contains(&source.dec) {
        anyhow::bail!(
            "Fritz returned coordinates out of range for {}: ra={} dec={}",
            id,
            source.ra,
            source.dec
        );
    }
    let ra = format_angle(source.ra, AngleKind::RightAscension);
    let dec = format_angle(source.dec, AngleKind::Declination);
    log::info!("{} at {} {}", id, ra, dec);

    let photometry = fritz
        .photometry(id)
        .with_context(|| format!("failed to query Fritz for {} photometry", id))?;
    let magnitude = latest_magnitude(&photometry).map(round_one_decimal);
    match magnitude {
        Some(m) => log::info!("{} latest ZTF magnitude {:.1}", id, m),
        None => log::warn!(
            "{} has no qualifying ZTF photometry among {} points",
            id,
            photometry.len()
        ),
    }

    Ok(SourceSummary {
        id: id.to_string(),
        ra,
        dec,
        magnitude,
    })
}

/// Magnitude of the most recent ZTF point that is not alert forced photometry.
/// Ties go to the later point in the list.
pub fn latest_magnitude(points: &[PhotometryPoint]) -> Option<f64> {
    let mut best: Option<(f64, f64)> = None;
    for p in points.iter().filter(|p| qualifies(p)) {
        let (Some(mjd), Some(mag)) = (p.mjd, p.mag) else {
            continue;
        };
        if best.map(|(best_mjd, _)| mjd >= best_mjd).unwrap_or(true) {
            best = Some((mjd, mag));
        }
    }
    best.map(|(_, mag)| mag)
}

fn qualifies(p: &PhotometryPoint) -> bool {
    p.instrument_name.as_deref() == Some(PHOTOMETRY_INSTRUMENT)
        && p.origin.as_deref() != Some(FORCED_PHOTOMETRY_ORIGIN)
        && p.mag.map(f64::is_finite).unwrap_or(false)
}

/// Rounds from the exact binary value, so `18.15` (stored just below) gives
/// `18.1`.
pub fn round_one_decimal(v: f64) -> f64 {
    format!("{:.1}", v).parse().unwrap_or(v)
}
