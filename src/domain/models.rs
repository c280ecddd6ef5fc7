use serde::{Deserialize, Serialize, Serializer};

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// Fritz wraps every payload in `{"status": ..., "data": ...}`.
#[derive(Debug, Deserialize)]
pub struct FritzResponse<T> {
    pub data: T,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Source {
    pub ra: f64,
    pub dec: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PhotometryPoint {
    #[serde(default)]
    pub instrument_name: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub mjd: Option<f64>,
    /// Null for non-detections.
    #[serde(default)]
    pub mag: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct Offsets {
    #[serde(default)]
    pub starlist_str: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceSummary {
    pub id: String,
    pub ra: String,
    pub dec: String,
    pub magnitude: Option<f64>,
}

/// Catalog target payload accepted by the MMT queue.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ObservationRequest {
    pub objectid: String,
    pub ra: String,
    pub dec: String,
    pub pa: u32,
    pub exposuretime: u32,
    pub numberexposures: u32,
    pub priority: u8,
    #[serde(serialize_with = "bool_as_int")]
    pub targetofopportunity: bool,
    pub magnitude: f64,
    pub grating: u32,
    pub centralwavelength: u32,
    pub observationtype: String,
    pub filter: String,
    pub slitwidth: String,
    pub maskid: u32,
    pub visits: u32,
    pub epoch: f64,
    pub pm_ra: f64,
    pub pm_dec: f64,
    pub instrumentid: u32,
    pub notes: String,
}

fn bool_as_int<S: Serializer>(v: &bool, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u8(u8::from(*v))
}

/// Handle for a target accepted by the queue.
#[derive(Debug, Serialize, Clone)]
pub struct QueuedTarget {
    pub id: u64,
    pub request: ObservationRequest,
}

#[derive(Serialize)]
pub struct SubmitReport {
    pub dry_run: bool,
    pub target_id: Option<u64>,
    pub request: ObservationRequest,
    pub finder: Option<String>,
    pub finder_uploaded: bool,
    pub description: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct StepStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StepStatus {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            code: None,
            message: None,
        }
    }

    pub fn failed(err: &anyhow::Error) -> Self {
        let out = crate::error::ErrorOut::from(err);
        Self {
            status: "failed".to_string(),
            code: Some(out.code),
            message: Some(out.message),
        }
    }

    pub fn skipped(reason: &str) -> Self {
        Self {
            status: "skipped".to_string(),
            code: None,
            message: Some(reason.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct SourceReport {
    pub id: String,
    pub finder: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finder_path: Option<String>,
    pub starlist: StepStatus,
}

impl SourceReport {
    pub fn succeeded(&self) -> bool {
        self.finder.is_ok() && self.starlist.is_ok()
    }
}

#[derive(Serialize, Debug)]
pub struct BatchReport {
    pub overall: String,
    pub succeeded: usize,
    pub failed: usize,
    pub starlist_path: String,
    pub starlist_entries: usize,
    pub starlist: String,
    pub sources: Vec<SourceReport>,
}
