use crate::domain::models::JsonOut;
use crate::error::ErrorOut;
use serde::Serialize;

pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    print_report(json, true, data, row)
}

/// `print_one` for reports that carry their own verdict.
pub fn print_report<T: Serialize>(
    json: bool,
    ok: bool,
    data: T,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&JsonOut { ok, data })?);
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}

/// JSON goes to stdout like every other envelope; text goes to stderr.
pub fn print_error(json: bool, err: &anyhow::Error) {
    if json {
        let out = serde_json::json!({
            "ok": false,
            "error": ErrorOut::from(err),
        });
        match serde_json::to_string_pretty(&out) {
            Ok(s) => println!("{}", s),
            Err(_) => println!("{}", out),
        }
    } else {
        eprintln!("error: {:#}", err);
    }
}
