use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ztf2mmt",
    version,
    about = "Submit ZTF sources from Fritz to the MMT/Binospec queue"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(long, global = true, help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,
    #[arg(long, global = true, help = "Fritz base URL")]
    pub fritz_url: Option<String>,
    #[arg(long, global = true, help = "MMT queue API base URL")]
    pub mmt_url: Option<String>,
    #[arg(
        long,
        global = true,
        help = "Directory for finder charts and the starlist"
    )]
    pub output_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up a ZTF source on Fritz and submit it to the MMT queue
    Submit(SubmitArgs),
    /// Download finder charts and a starlist for one or more sources
    Finder(FinderArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SubmitArgs {
    #[arg(long, value_parser = parse_source_id, help = "Which ZTF source to send to MMT")]
    pub ztfid: String,
    #[arg(
        long,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Seconds of exposure time per exposure"
    )]
    pub exptime: u32,
    #[arg(
        long,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Number of exposures to execute"
    )]
    pub numexp: u32,
    #[arg(
        long,
        value_parser = clap::value_parser!(u8).range(1..=3),
        help = "Priority of the request - 1 highest, 3 lowest"
    )]
    pub prio: u8,
    #[arg(long, default_value_t = false, help = "Send as target-of-opportunity trigger")]
    pub too: bool,
    #[arg(long, help = "Notes to include in request")]
    pub notes: String,
    #[arg(long, default_value_t = 270, help = "Grating to use [270, 600, 1000]")]
    pub grating: u32,
    #[arg(
        long,
        default_value_t = 6500,
        help = "Central wavelength for grating in angstroms"
    )]
    pub centwav: u32,
    #[arg(
        long,
        default_value = "Longslit1",
        help = "Slit width [Longslit0_75, Longslit1, Longslit1_25, Longslit1_5, Longslit5]"
    )]
    pub slitwidth: String,
    #[arg(long, default_value = "LP3800", help = "Filter to use [LP3800 or LP3500]")]
    pub filter: String,
    #[arg(
        long,
        help = "Magnitude to submit when Fritz has no usable ZTF photometry"
    )]
    pub magnitude: Option<f64>,
    #[arg(long, default_value_t = false, help = "Validate and describe without posting")]
    pub dry_run: bool,
    #[arg(long, default_value_t = false, help = "Do not fetch or upload a finder chart")]
    pub skip_finder: bool,
    #[command(flatten)]
    pub chart: ChartArgs,
}

#[derive(Args, Debug, Clone)]
pub struct FinderArgs {
    #[arg(
        long,
        required = true,
        num_args = 1..,
        value_parser = parse_source_id,
        help = "Which ZTF sources to generate finding charts for"
    )]
    pub sources: Vec<String>,
    #[arg(
        long,
        help = "Observation time for the starlist (YYYY-MM-DDTHH:MM:SS), defaults to now"
    )]
    pub obstime: Option<String>,
    #[command(flatten)]
    pub chart: ChartArgs,
}

/// Source ids end up in URL paths and file names, so only ASCII letters,
/// digits, `_` and `-` are accepted.
fn parse_source_id(s: &str) -> Result<String, String> {
    if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        Ok(s.to_string())
    } else {
        Err(format!(
            "invalid source id '{}': use letters, digits, '_' or '-'",
            s
        ))
    }
}

/// Finder chart and offset star options shared by both commands.
#[derive(Args, Debug, Clone)]
pub struct ChartArgs {
    #[arg(long, value_enum, default_value_t = ImageSource::Ps1)]
    pub image_source: ImageSource,
    #[arg(
        long,
        default_value_t = false,
        help = "Use Gaia DR3 for offset star positions instead of ZTF references"
    )]
    pub use_gaia_pos: bool,
    #[arg(
        long,
        default_value_t = 3,
        value_parser = clap::value_parser!(u8).range(0..=4),
        help = "Number of offset stars to show [0,4]"
    )]
    pub num_offset_stars: u8,
    #[arg(long, value_enum, default_value_t = Facility::Keck)]
    pub facility: Facility,
}

impl ChartArgs {
    pub fn use_ztfref(&self) -> bool {
        !self.use_gaia_pos
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ImageSource {
    Desi,
    Dss,
    Ztfref,
    Ps1,
}

impl ImageSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSource::Desi => "desi",
            ImageSource::Dss => "dss",
            ImageSource::Ztfref => "ztfref",
            ImageSource::Ps1 => "ps1",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Facility {
    #[value(name = "Keck", alias = "keck")]
    Keck,
    #[value(name = "Shane", alias = "shane")]
    Shane,
    #[value(name = "P200", alias = "p200")]
    P200,
    #[value(name = "P200-NGPS", alias = "p200-ngps")]
    P200Ngps,
}

impl Facility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Facility::Keck => "Keck",
            Facility::Shane => "Shane",
            Facility::P200 => "P200",
            Facility::P200Ngps => "P200-NGPS",
        }
    }
}
