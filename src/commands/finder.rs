use crate::cli::{Cli, FinderArgs};
use crate::config::Config;
use crate::domain::constants::OBSTIME_FORMAT;
use crate::error::AppError;
use crate::services::finder::run_batch;
use crate::services::fritz::FritzClient;
use crate::services::output::print_report;

pub fn handle_finder(cli: &Cli, args: &FinderArgs, cfg: &Config) -> anyhow::Result<()> {
    let fritz = FritzClient::from_config(cfg)?;
    let obstime = resolve_obstime(args.obstime.as_deref())?;
    let use_ztfref = args.chart.use_ztfref();
    log::info!("fetching finding charts for {:?}", args.sources);
    log::info!(
        "using {} reference images and {} positions for {} offset stars with a starlist formatted for {}",
        args.chart.image_source.as_str(),
        if use_ztfref { "ztfref" } else { "Gaia DR3" },
        args.chart.num_offset_stars,
        args.chart.facility.as_str()
    );

    let report = run_batch(&fritz, &args.sources, &args.chart, &obstime, &cfg.output_dir)?;
    let failed = report.failed;
    let any_ok = report.succeeded > 0;

    print_report(cli.json, any_ok, report, |r| {
        let mut lines = Vec::new();
        for s in &r.sources {
            lines.push(format!(
                "{}\tfinder={}\tstarlist={}",
                s.id, s.finder.status, s.starlist.status
            ));
        }
        lines.push(format!(
            "wrote {} starlist entries to {}",
            r.starlist_entries, r.starlist_path
        ));
        if !r.starlist.is_empty() {
            lines.push(r.starlist.trim_end().to_string());
        }
        lines.join("\n")
    })?;

    if !any_ok {
        return Err(AppError::BatchFailed { failed }.into());
    }
    Ok(())
}

/// Validates a user supplied time, else the current local time.
fn resolve_obstime(raw: Option<&str>) -> anyhow::Result<String> {
    match raw {
        Some(t) => {
            chrono::NaiveDateTime::parse_from_str(t, OBSTIME_FORMAT)
                .map_err(|e| anyhow::anyhow!("invalid --obstime {} ({}), expected YYYY-MM-DDTHH:MM:SS", t, e))?;
            Ok(t.to_string())
        }
        None => Ok(chrono::Local::now().format(OBSTIME_FORMAT).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::resolve_obstime;

    #[test]
    fn obstime_keeps_valid_input_and_rejects_other_formats() {
        assert_eq!(
            resolve_obstime(Some("2024-06-26T04:30:00")).expect("valid"),
            "2024-06-26T04:30:00"
        );
        assert!(resolve_obstime(Some("2024-06-26 04:30")).is_err());
        let now = resolve_obstime(None).expect("now");
        assert_eq!(now.len(), 19);
        assert_eq!(&now[10..11], "T");
    }
}
