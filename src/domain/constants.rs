pub const DEFAULT_FRITZ_URL: &str = "https://fritz.science";
pub const DEFAULT_MMT_URL: &str = "https://scheduler.mmto.arizona.edu/APIv2";
pub const DEFAULT_OUTPUT_DIR: &str = "finders";

pub const FRITZ_API_KEY_VAR: &str = "FRITZAPIKEY";
pub const MMT_API_KEY_VAR: &str = "MMTAPIKEY";
pub const CONFIG_PATH_VAR: &str = "ZTF2MMT_CONFIG";

pub const STARLIST_FILE: &str = "starlist.txt";
pub const OBSTIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Only ZTF photometry counts toward the latest magnitude.
pub const PHOTOMETRY_INSTRUMENT: &str = "ZTF";
/// Origin tag of forced-photometry points derived from alerts.
pub const FORCED_PHOTOMETRY_ORIGIN: &str = "alert_fp";

/// Binospec on the MMT queue.
pub const BINOSPEC_INSTRUMENT_ID: u32 = 16;
pub const OBSERVATION_TYPE: &str = "longslit";
pub const GRATINGS: [u32; 3] = [270, 600, 1000];
pub const FILTERS: [&str; 2] = ["LP3800", "LP3500"];

/// Binospec long-slit masks by slit width.
pub const SLIT_MASKS: [(&str, u32); 5] = [
    ("Longslit0_75", 113),
    ("Longslit1", 111),
    ("Longslit1_25", 131),
    ("Longslit1_5", 114),
    ("Longslit5", 112),
];
