#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::{json, Value};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const FRITZ_KEY: &str = "fritz-test-key";
pub const MMT_KEY: &str = "mmt-test-key";
pub const PDF: &[u8] = b"%PDF-1.4 finder chart";

#[derive(Clone, Debug)]
pub struct Recorded {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or("")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.to_string().into_bytes(),
        }
    }

    pub fn pdf() -> Self {
        Self {
            status: 200,
            content_type: "application/pdf",
            body: PDF.to_vec(),
        }
    }
}

/// One-request-per-connection HTTP/1.1 stub serving Fritz and MMT routes.
pub struct StubServer {
    pub url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl StubServer {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let url = format!("http://{}", listener.local_addr().expect("stub addr"));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);
        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                let _ = serve(stream, &log);
            }
        });
        Self { url, requests }
    }

    pub fn mmt_url(&self) -> String {
        format!("{}/mmt", self.url)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().expect("request log").clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path() == path)
            .collect()
    }
}

/// Records the request before replying so the log is complete once the
/// client has its response.
fn serve(mut stream: TcpStream, log: &Mutex<Vec<Recorded>>) -> Option<()> {
    let mut reader = BufReader::new(stream.try_clone().ok()?);
    let mut line = String::new();
    reader.read_line(&mut line).ok()?;
    let mut parts = line.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?.to_string();

    let mut headers = Vec::new();
    loop {
        let mut h = String::new();
        reader.read_line(&mut h).ok()?;
        let h = h.trim_end();
        if h.is_empty() {
            break;
        }
        if let Some((k, v)) = h.split_once(':') {
            headers.push((k.trim().to_string(), v.trim().to_string()));
        }
    }
    let header = |name: &str| {
        headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.clone())
    };

    let mut body = Vec::new();
    if let Some(len) = header("content-length").and_then(|v| v.parse::<usize>().ok()) {
        body.resize(len, 0);
        reader.read_exact(&mut body).ok()?;
    } else if header("transfer-encoding").map(|v| v.eq_ignore_ascii_case("chunked")) == Some(true) {
        loop {
            let mut size = String::new();
            reader.read_line(&mut size).ok()?;
            let n = usize::from_str_radix(size.trim(), 16).ok()?;
            let mut chunk = vec![0u8; n + 2];
            reader.read_exact(&mut chunk).ok()?;
            if n == 0 {
                break;
            }
            body.extend_from_slice(&chunk[..n]);
        }
    }

    let req = Recorded {
        method,
        target,
        headers,
        body,
    };
    let reply = route(&req);
    log.lock().ok()?.push(req);
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        reply.status,
        if reply.status < 400 { "OK" } else { "Error" },
        reply.content_type,
        reply.body.len()
    );
    stream.write_all(head.as_bytes()).ok()?;
    stream.write_all(&reply.body).ok()?;
    stream.flush().ok()
}

fn not_found() -> Reply {
    Reply::json(404, json!({"status": "error", "message": "Source not found"}))
}

fn photometry(id: &str) -> Option<Value> {
    match id {
        "ZTF24aaozxhx" => Some(json!([
            {"instrument_name": "ZTF", "origin": "science", "mjd": 100.0, "mag": 18.0},
            {"instrument_name": "ZTF", "origin": "alert_fp", "mjd": 200.0, "mag": 17.0},
            {"instrument_name": "ZTF", "origin": "science", "mjd": 150.0, "mag": 17.54},
            {"instrument_name": "ZTF", "origin": null, "mjd": 210.0, "mag": null}
        ])),
        "ZTF24aatbpbr" => Some(json!([
            {"instrument_name": "ZTF", "mjd": 60400.5, "mag": 19.12}
        ])),
        "ZTF24nophotz" => Some(json!([
            {"instrument_name": "ZTF", "origin": "alert_fp", "mjd": 60400.5, "mag": 19.0},
            {"instrument_name": "ATLAS", "mjd": 60401.5, "mag": 18.7}
        ])),
        _ => None,
    }
}

fn coordinates(id: &str) -> Option<Value> {
    match id {
        "ZTF24aaozxhx" => Some(json!({"id": id, "ra": 83.63308, "dec": 22.0145})),
        "ZTF24aatbpbr" => Some(json!({"id": id, "ra": 201.365, "dec": -43.0191})),
        "ZTF24nophotz" => Some(json!({"id": id, "ra": 10.0, "dec": 5.2})),
        "ZTF24nochart" => Some(json!({"id": id, "ra": 150.25, "dec": 2.5})),
        "ZTF24emptyls" => Some(json!({"id": id, "ra": 310.0, "dec": -12.75})),
        _ => None,
    }
}

fn route(req: &Recorded) -> Reply {
    let path = req.path().to_string();

    if let Some(rest) = path.strip_prefix("/mmt/") {
        return match (req.method.as_str(), rest) {
            ("POST", "catalogTarget") => Reply::json(201, json!({"id": 4242})),
            ("POST", "finderchart") => Reply::json(200, json!({"success": true})),
            _ => Reply::json(404, json!({"detail": "Not found."})),
        };
    }

    let Some(rest) = path.strip_prefix("/api/sources/") else {
        return Reply::json(404, json!({"status": "error"}));
    };
    let expected = format!("token {}", FRITZ_KEY);
    if req.header("authorization") != Some(expected.as_str()) {
        return Reply::json(401, json!({"status": "error", "message": "Unauthorized"}));
    }

    let (id, endpoint) = rest.split_once('/').unwrap_or((rest, ""));
    let Some(coords) = coordinates(id) else {
        return not_found();
    };
    match endpoint {
        "" => Reply::json(200, json!({"status": "success", "data": coords})),
        "photometry" => Reply::json(
            200,
            json!({"status": "success", "data": photometry(id).unwrap_or(json!([]))}),
        ),
        "finder" if id == "ZTF24nochart" => {
            Reply::json(404, json!({"status": "error", "message": "Finder chart not available"}))
        }
        "finder" => Reply::pdf(),
        "offsets" if id == "ZTF24emptyls" => Reply::json(
            200,
            json!({"status": "success", "data": {"starlist_str": ""}}),
        ),
        "offsets" => Reply::json(
            200,
            json!({"status": "success", "data": {
                "starlist_str": format!("{}&nbsp;&nbsp;&nbsp;05 34 31.94 +22 00 52.2 2000.0", id)
            }}),
        ),
        _ => not_found(),
    }
}

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub out: PathBuf,
    pub server: StubServer,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        std::fs::create_dir_all(&home).expect("create isolated home");
        let out = tmp.path().join("finders");
        Self {
            _tmp: tmp,
            home,
            out,
            server: StubServer::start(),
        }
    }

    /// Binary wired to the stub with both API keys set.
    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("ztf2mmt");
        cmd.env("HOME", &self.home)
            .env("FRITZAPIKEY", FRITZ_KEY)
            .env("MMTAPIKEY", MMT_KEY)
            .env("NO_PROXY", "127.0.0.1,localhost")
            .env_remove("ZTF2MMT_CONFIG")
            .env_remove("HTTP_PROXY")
            .env_remove("http_proxy")
            .env_remove("HTTPS_PROXY")
            .env_remove("https_proxy")
            .env_remove("ALL_PROXY")
            .env_remove("all_proxy")
            .arg("--fritz-url")
            .arg(&self.server.url)
            .arg("--mmt-url")
            .arg(self.server.mmt_url())
            .arg("--output-dir")
            .arg(&self.out);
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn run_json_failure(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .failure()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("error json output")
    }
}
