use crate::cli::{Cli, SubmitArgs};
use crate::config::Config;
use crate::domain::models::SubmitReport;
use crate::services::finder::fetch_finder;
use crate::services::fritz::FritzClient;
use crate::services::lookup::query_source;
use crate::services::mmt::{describe, validate, MmtClient};
use crate::services::output::print_one;
use crate::services::request::{build_request, resolve_magnitude};

/// Lookup, build, validate, post, then fetch and upload the finder chart.
///
/// Everything up to the post is fatal. Once the target is in the queue a
/// finder problem is only reported.
pub fn handle_submit(cli: &Cli, args: &SubmitArgs, cfg: &Config) -> anyhow::Result<()> {
    let fritz = FritzClient::from_config(cfg)?;
    let mmt = if args.dry_run {
        None
    } else {
        Some(MmtClient::from_config(cfg)?)
    };

    let summary = query_source(&fritz, &args.ztfid)?;
    log::info!("finished querying Fritz for magnitude and coordinates");
    let magnitude = resolve_magnitude(&summary, args.magnitude)?;
    if summary.magnitude.is_none() {
        log::warn!(
            "{} has no usable ZTF photometry, submitting with --magnitude {}",
            summary.id,
            magnitude
        );
    }
    let request = build_request(&summary, magnitude, args)?;
    validate(&request)?;
    log::info!("target created and validated");
    let description = describe(&request, true);

    let mut report = SubmitReport {
        dry_run: args.dry_run,
        target_id: None,
        request,
        finder: None,
        finder_uploaded: false,
        description,
    };

    if let Some(mmt) = mmt {
        let target = mmt.post(&report.request)?;
        report.target_id = Some(target.id);

        if !args.skip_finder {
            match fetch_finder(&fritz, &args.ztfid, &args.chart, &cfg.output_dir) {
                Ok(path) => {
                    report.finder = Some(path.to_string_lossy().to_string());
                    match mmt.upload_finder(&target, &path) {
                        Ok(()) => report.finder_uploaded = true,
                        Err(e) => log::warn!(
                            "failed to upload finder chart for {}: {:#}",
                            args.ztfid,
                            e
                        ),
                    }
                }
                Err(e) => log::warn!(
                    "failed to fetch finding chart for {}: {:#}",
                    args.ztfid,
                    e
                ),
            }
        }
    }

    print_one(cli.json, report, |r| {
        let mut text = r.description.clone();
        match r.target_id {
            Some(id) => text.push_str(&format!("posted to MMT queue as target {}\n", id)),
            None => text.push_str("dry run: nothing posted\n"),
        }
        if let Some(path) = &r.finder {
            let state = if r.finder_uploaded {
                "uploaded"
            } else {
                "not uploaded"
            };
            text.push_str(&format!("finder chart {} ({})\n", path, state));
        }
        text.trim_end().to_string()
    })
}
