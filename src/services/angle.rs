//! Sexagesimal formatting of equatorial coordinates.

/// Hundredths of a second per hour (or degree).
const CENTI_PER_UNIT: i64 = 3600 * 100;
const CENTI_PER_DAY: i64 = 24 * CENTI_PER_UNIT;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AngleKind {
    RightAscension,
    Declination,
}

pub fn format_angle(deg: f64, kind: AngleKind) -> String {
    match kind {
        AngleKind::RightAscension => format_ra_hms(deg),
        AngleKind::Declination => format_dec_dms(deg),
    }
}

/// `HH:MM:SS.ss`, hours always two digits.
pub fn format_ra_hms(deg: f64) -> String {
    let hours = deg.rem_euclid(360.0) / 15.0;
    let mut total = (hours * CENTI_PER_UNIT as f64).round() as i64;
    if total >= CENTI_PER_DAY {
        total -= CENTI_PER_DAY;
    }
    let (h, m, s, cs) = split_centi(total);
    format!("{:02}:{:02}:{:02}.{:02}", h, m, s, cs)
}

/// `±DD:MM:SS.ss`, sign always present, degrees always two digits.
pub fn format_dec_dms(deg: f64) -> String {
    let total = (deg.abs() * CENTI_PER_UNIT as f64).round() as i64;
    let sign = if deg < 0.0 && total > 0 { '-' } else { '+' };
    let (d, m, s, cs) = split_centi(total);
    format!("{}{:02}:{:02}:{:02}.{:02}", sign, d, m, s, cs)
}

fn split_centi(total: i64) -> (i64, i64, i64, i64) {
    let whole = total / CENTI_PER_UNIT;
    let minutes = (total / 6000) % 60;
    let seconds = (total / 100) % 60;
    (whole, minutes, seconds, total % 100)
}
