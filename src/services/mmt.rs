//! MMT queue client: catalog target validation, posting and finder upload.

use crate::config::Config;
use crate::domain::constants::{FILTERS, GRATINGS};
use crate::domain::models::{ObservationRequest, QueuedTarget};
use crate::error::AppError;
use crate::services::fritz::{build_http_client, check_status};
use crate::services::request::mask_id_for;
use reqwest::blocking::{multipart, Client};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub struct MmtClient {
    client: Client,
    base_url: String,
    token: String,
}

#[derive(Serialize)]
struct CatalogTargetBody<'a> {
    #[serde(flatten)]
    request: &'a ObservationRequest,
    token: &'a str,
}

#[derive(Deserialize)]
struct CatalogTargetCreated {
    id: u64,
}

impl MmtClient {
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let token = cfg.mmt_token()?.to_string();
        Ok(Self {
            client: build_http_client(cfg.timeout_secs)?,
            base_url: cfg.mmt_url.clone(),
            token,
        })
    }

    /// Posts a request that has already passed [`validate`].
    pub fn post(&self, request: &ObservationRequest) -> anyhow::Result<QueuedTarget> {
        let url = format!("{}/catalogTarget", self.base_url);
        log::debug!("POST {}", url);
        let resp = self
            .client
            .post(url)
            .json(&CatalogTargetBody {
                request,
                token: &self.token,
            })
            .send()?;
        let body = check_status(resp)?.text()?;
        let created: CatalogTargetCreated = serde_json::from_str(&body)
            .map_err(|e| anyhow::anyhow!("unexpected MMT response ({}): {}", e, body))?;
        log::info!("{} posted to MMT queue as target {}", request.objectid, created.id);
        Ok(QueuedTarget {
            id: created.id,
            request: request.clone(),
        })
    }

    pub fn upload_finder(&self, target: &QueuedTarget, finder: &Path) -> anyhow::Result<()> {
        let url = format!("{}/finderchart", self.base_url);
        log::debug!("POST {} ({})", url, finder.display());
        let form = multipart::Form::new()
            .text("catalogtarget", target.id.to_string())
            .text("type", "finding")
            .text("token", self.token.clone())
            .file("finder_chart", finder)?;
        let resp = self.client.post(url).multipart(form).send()?;
        check_status(resp)?;
        log::info!("uploaded finder chart for target {}", target.id);
        Ok(())
    }
}

/// Checks the queue would otherwise reject after a round trip.
pub fn validate(req: &ObservationRequest) -> Result<(), AppError> {
    let invalid = |msg: String| -> Result<(), AppError> { Err(AppError::InvalidRequest(msg)) };
    if req.objectid.trim().is_empty() {
        return invalid("objectid is empty".to_string());
    }
    if !is_sexagesimal(&req.ra, false) {
        return invalid(format!("ra must be HH:MM:SS.ss, got {}", req.ra));
    }
    if !is_sexagesimal(&req.dec, true) {
        return invalid(format!("dec must be +DD:MM:SS.ss, got {}", req.dec));
    }
    if req.exposuretime == 0 || req.numberexposures == 0 {
        return invalid("exposure time and count must be positive".to_string());
    }
    if !(1..=3).contains(&req.priority) {
        return invalid(format!("priority must be 1-3, got {}", req.priority));
    }
    if !GRATINGS.contains(&req.grating) {
        return invalid(format!("grating must be one of {:?}, got {}", GRATINGS, req.grating));
    }
    if !FILTERS.contains(&req.filter.as_str()) {
        return invalid(format!("filter must be one of {:?}, got {}", FILTERS, req.filter));
    }
    if mask_id_for(&req.slitwidth)? != req.maskid {
        return invalid(format!(
            "mask {} does not match slit width {}",
            req.maskid, req.slitwidth
        ));
    }
    if !req.magnitude.is_finite() {
        return invalid("magnitude is not a number".to_string());
    }
    Ok(())
}

fn is_sexagesimal(s: &str, signed: bool) -> bool {
    let body = if signed {
        match s.strip_prefix('+').or_else(|| s.strip_prefix('-')) {
            Some(b) => b,
            None => return false,
        }
    } else {
        s
    };
    let parts: Vec<&str> = body.split(':').collect();
    let [whole, minutes, seconds] = parts[..] else {
        return false;
    };
    let digits = |p: &str, n: usize| p.len() == n && p.chars().all(|c| c.is_ascii_digit());
    let Some((sec, frac)) = seconds.split_once('.') else {
        return false;
    };
    digits(whole, 2) && digits(minutes, 2) && digits(sec, 2) && digits(frac, 2)
}

pub fn describe(req: &ObservationRequest, include_setup: bool) -> String {
    let mut out = format!(
        "{} ({:.1} mag)\n{} {}\n{} request for {}s ({}x{}s)\n{}\n",
        req.objectid,
        req.magnitude,
        req.ra,
        req.dec,
        req.observationtype,
        u64::from(req.numberexposures) * u64::from(req.exposuretime),
        req.numberexposures,
        req.exposuretime,
        req.notes
    );
    if include_setup {
        out.push_str(&format!(
            "{} grating at {} angstroms\n{} filter, {} slit\n",
            req.grating, req.centralwavelength, req.filter, req.slitwidth
        ));
    }
    out
}
