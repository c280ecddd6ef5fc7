use crate::cli::ChartArgs;
use crate::domain::models::{BatchReport, SourceReport, StepStatus};
use crate::services::fritz::{FinderQuery, FritzClient, OffsetsQuery};
use crate::services::storage::{save_finder_chart, save_starlist};
use std::path::{Path, PathBuf};

/// Download the finder chart for `id` into `output_dir`.
pub fn fetch_finder(
    fritz: &FritzClient,
    id: &str,
    chart: &ChartArgs,
    output_dir: &Path,
) -> anyhow::Result<PathBuf> {
    let query = FinderQuery {
        facility: chart.facility.as_str(),
        image_source: chart.image_source.as_str(),
        use_ztfref: chart.use_ztfref(),
        num_offset_stars: chart.num_offset_stars,
    };
    let pdf = fritz.finder(id, &query)?;
    let path = save_finder_chart(output_dir, id, &pdf)?;
    log::info!("saved finder chart for {} to {}", id, path.display());
    Ok(path)
}

pub fn fetch_starlist(
    fritz: &FritzClient,
    id: &str,
    chart: &ChartArgs,
    obstime: &str,
) -> anyhow::Result<String> {
    let query = OffsetsQuery {
        facility: chart.facility.as_str(),
        use_ztfref: chart.use_ztfref(),
        num_offset_stars: chart.num_offset_stars,
        obstime,
    };
    fritz.starlist(id, &query)
}

/// Fetch charts and starlist entries for every source, one at a time.
///
/// Failures are recorded per source and never stop the loop. The starlist
/// entry is only requested once the chart is saved, so the aggregate holds
/// exactly the sources that succeeded. It is written once, after the last
/// source.
pub fn run_batch(
    fritz: &FritzClient,
    ids: &[String],
    chart: &ChartArgs,
    obstime: &str,
    output_dir: &Path,
) -> anyhow::Result<BatchReport> {
    let mut sources = Vec::with_capacity(ids.len());
    let mut starlist = String::new();
    let mut entries = 0usize;

    for id in ids {
        let (finder, finder_path) = match fetch_finder(fritz, id, chart, output_dir) {
            Ok(p) => (StepStatus::ok(), Some(p.to_string_lossy().to_string())),
            Err(e) => {
                log::warn!("failed to fetch finding chart for {}: {:#}", id, e);
                (StepStatus::failed(&e), None)
            }
        };
        // A source without a chart is left out of the starlist entirely.
        let starlist_status = if !finder.is_ok() {
            StepStatus::skipped("finder chart unavailable")
        } else {
            match fetch_starlist(fritz, id, chart, obstime) {
                Ok(entry) => {
                    starlist.push_str(&entry);
                    starlist.push('\n');
                    entries += 1;
                    StepStatus::ok()
                }
                Err(e) => {
                    log::warn!("failed to fetch starlist for {}: {:#}", id, e);
                    StepStatus::failed(&e)
                }
            }
        };
        sources.push(SourceReport {
            id: id.clone(),
            finder,
            finder_path,
            starlist: starlist_status,
        });
    }

    let path = save_starlist(output_dir, &starlist)?;
    let succeeded = sources.iter().filter(|s| s.succeeded()).count();
    let failed = sources.len() - succeeded;
    let overall = if failed == 0 {
        "ok"
    } else if succeeded > 0 {
        "partial"
    } else {
        "failed"
    }
    .to_string();

    Ok(BatchReport {
        overall,
        succeeded,
        failed,
        starlist_path: path.to_string_lossy().to_string(),
        starlist_entries: entries,
        starlist,
        sources,
    })
}
