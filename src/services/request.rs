use crate::cli::SubmitArgs;
use crate::domain::constants::{BINOSPEC_INSTRUMENT_ID, OBSERVATION_TYPE, SLIT_MASKS};
use crate::domain::models::{ObservationRequest, SourceSummary};
use crate::error::AppError;

pub fn mask_id_for(slit_width: &str) -> Result<u32, AppError> {
    SLIT_MASKS
        .iter()
        .find(|(name, _)| *name == slit_width)
        .map(|(_, id)| *id)
        .ok_or_else(|| AppError::UnknownSlitWidth(slit_width.to_string()))
}

/// Assemble the catalog target for `source`.
///
/// `magnitude` is resolved by the caller; the mask id always comes from the
/// slit width.
pub fn build_request(
    source: &SourceSummary,
    magnitude: f64,
    args: &SubmitArgs,
) -> Result<ObservationRequest, AppError> {
    let maskid = mask_id_for(&args.slitwidth)?;
    Ok(ObservationRequest {
        objectid: source.id.clone(),
        ra: source.ra.clone(),
        dec: source.dec.clone(),
        pa: 0,
        exposuretime: args.exptime,
        numberexposures: args.numexp,
        priority: args.prio,
        targetofopportunity: args.too,
        magnitude,
        grating: args.grating,
        centralwavelength: args.centwav,
        observationtype: OBSERVATION_TYPE.to_string(),
        filter: args.filter.clone(),
        slitwidth: args.slitwidth.clone(),
        maskid,
        visits: 1,
        epoch: 2000.0,
        pm_ra: 0.0,
        pm_dec: 0.0,
        instrumentid: BINOSPEC_INSTRUMENT_ID,
        notes: args.notes.clone(),
    })
}

/// Magnitude to submit: the looked-up value, else the explicit override.
pub fn resolve_magnitude(source: &SourceSummary, override_mag: Option<f64>) -> Result<f64, AppError> {
    source
        .magnitude
        .or(override_mag)
        .ok_or_else(|| AppError::MagnitudeUnavailable {
            id: source.id.clone(),
        })
}
