use crate::config::Config;
use crate::domain::models::{FritzResponse, Offsets, PhotometryPoint, Source};
use crate::error::AppError;
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Query parameters for the finder chart endpoint.
#[derive(Debug, Clone)]
pub struct FinderQuery<'a> {
    pub facility: &'a str,
    pub image_source: &'a str,
    pub use_ztfref: bool,
    pub num_offset_stars: u8,
}

/// Query parameters for the offsets (starlist) endpoint.
#[derive(Debug, Clone)]
pub struct OffsetsQuery<'a> {
    pub facility: &'a str,
    pub use_ztfref: bool,
    pub num_offset_stars: u8,
    pub obstime: &'a str,
}

pub struct FritzClient {
    client: Client,
    base_url: String,
    token: String,
}

impl FritzClient {
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let token = cfg.fritz_token()?.to_string();
        Ok(Self {
            client: build_http_client(cfg.timeout_secs)?,
            base_url: cfg.fritz_url.clone(),
            token,
        })
    }

    fn get(&self, path: &str) -> reqwest::blocking::RequestBuilder {
        let url = format!("{}/api/sources/{}", self.base_url, path);
        log::debug!("GET {}", url);
        self.client
            .get(url)
            .header("Authorization", format!("token {}", self.token))
    }

    pub fn source(&self, id: &str) -> anyhow::Result<Source> {
        let resp = self.get(id).send()?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(AppError::SourceNotFound {
                id: id.to_string(),
                body: resp.text().unwrap_or_default(),
            }
            .into());
        }
        parse_data(resp)
    }

    pub fn photometry(&self, id: &str) -> anyhow::Result<Vec<PhotometryPoint>> {
        let resp = self.get(&format!("{}/photometry", id)).send()?;
        parse_data(resp)
    }

    /// Raw PDF bytes of the rendered finder chart.
    pub fn finder(&self, id: &str, q: &FinderQuery) -> anyhow::Result<Vec<u8>> {
        let resp = self
            .get(&format!("{}/finder", id))
            .query(&[
                ("facility", q.facility.to_string()),
                ("image_source", q.image_source.to_string()),
                ("use_ztfref", q.use_ztfref.to_string()),
                ("num_offset_stars", q.num_offset_stars.to_string()),
            ])
            .send()?;
        let resp = check_status(resp)?;
        Ok(resp.bytes()?.to_vec())
    }

    /// Starlist entry with `&nbsp;` entities already replaced.
    pub fn starlist(&self, id: &str, q: &OffsetsQuery) -> anyhow::Result<String> {
        let resp = self
            .get(&format!("{}/offsets", id))
            .query(&[
                ("facility", q.facility.to_string()),
                ("use_ztfref", q.use_ztfref.to_string()),
                ("num_offset_stars", q.num_offset_stars.to_string()),
                ("obstime", q.obstime.to_string()),
            ])
            .send()?;
        let offsets: Offsets = parse_data(resp)?;
        Ok(starlist_entry(id, &offsets.starlist_str)?)
    }
}

pub fn build_http_client(timeout_secs: Option<u64>) -> anyhow::Result<Client> {
    let mut builder = Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

pub fn check_status(resp: Response) -> anyhow::Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    Err(AppError::Upstream {
        status: status.as_u16(),
        body: resp.text().unwrap_or_default(),
    }
    .into())
}

fn parse_data<T: DeserializeOwned>(resp: Response) -> anyhow::Result<T> {
    let resp = check_status(resp)?;
    let body = resp.text()?;
    let parsed: FritzResponse<T> = serde_json::from_str(&body)
        .map_err(|e| anyhow::anyhow!("unexpected Fritz response ({}): {}", e, body))?;
    Ok(parsed.data)
}

pub fn clean_starlist(raw: &str) -> String {
    raw.replace("&nbsp;", " ")
}

/// A successful response with nothing but blanks in it is still a failure.
fn starlist_entry(id: &str, raw: &str) -> Result<String, AppError> {
    let entry = clean_starlist(raw);
    if entry.trim().is_empty() {
        return Err(AppError::EmptyStarlist { id: id.to_string() });
    }
    Ok(entry)
}
