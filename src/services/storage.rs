use crate::domain::constants::STARLIST_FILE;
use std::path::{Path, PathBuf};

pub fn finder_chart_path(output_dir: &Path, id: &str) -> PathBuf {
    output_dir.join(format!("{}_finderchart.pdf", id))
}

pub fn starlist_path(output_dir: &Path) -> PathBuf {
    output_dir.join(STARLIST_FILE)
}

pub fn save_finder_chart(output_dir: &Path, id: &str, pdf: &[u8]) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let path = finder_chart_path(output_dir, id);
    std::fs::write(&path, pdf)?;
    Ok(path)
}

pub fn save_starlist(output_dir: &Path, starlist: &str) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let path = starlist_path(output_dir);
    std::fs::write(&path, starlist)?;
    Ok(path)
}
