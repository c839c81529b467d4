//! Structured logging for report sessions.
//!
//! Records are JSON lines with a run id, a sequence number and a domain, so a
//! session can be replayed from its event log:
//! 1. Level filter (`LOG_LEVEL`, trace → fatal, `off` disables logging)
//! 2. Domain filter (`LOG_DOMAINS`, comma-separated or `all`)
//! 3. Run directory `LOG_DIR/<run_id>` with `events.jsonl`, `trace.jsonl`
//!    and `manifest.json`, created on the first record
//! 4. Optional echo to stderr (`LOG_ECHO`), keeping stdout for slides

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock};

// =============================================================================
// Log Levels
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
}

impl Level {
    /// Minimum level from `LOG_LEVEL`; `None` when logging is switched off.
    pub fn from_env() -> Option<Self> {
        match std::env::var("LOG_LEVEL").as_deref() {
            Ok("off") | Ok("none") => None,
            Ok(name) => Some(Level::parse(name).unwrap_or(Level::Info)),
            Err(_) => Some(Level::Info),
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "trace" => Some(Level::Trace),
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warn" => Some(Level::Warn),
            "error" => Some(Level::Error),
            "fatal" => Some(Level::Fatal),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }
}

// =============================================================================
// Log Domains (categories for filtering)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Entry,    // Field and row edits
    Slides,   // Slide projection and rendering
    Nav,      // Slide index and mode changes
    Transfer, // Import / export
    System,   // Startup, shutdown
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Entry => "entry",
            Domain::Slides => "slides",
            Domain::Nav => "nav",
            Domain::Transfer => "transfer",
            Domain::System => "system",
        }
    }

    pub fn is_enabled(&self) -> bool {
        domain_listed(std::env::var("LOG_DOMAINS").ok().as_deref(), *self)
    }
}

fn domain_listed(filter: Option<&str>, domain: Domain) -> bool {
    match filter {
        None | Some("all") => true,
        Some(domains) => domains.split(',').any(|d| d.trim() == domain.as_str()),
    }
}

// =============================================================================
// Sequence counter and run context
// =============================================================================

static LOG_SEQ: AtomicU64 = AtomicU64::new(0);
static RUN_CONTEXT: OnceLock<RunContext> = OnceLock::new();

fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst)
}

#[derive(Debug)]
struct RunContext {
    run_id: String,
    echo: bool,
    events: Option<Mutex<BufWriter<File>>>,
    trace: Option<Mutex<BufWriter<File>>>,
}

fn open_sink(path: PathBuf) -> Option<Mutex<BufWriter<File>>> {
    match File::create(&path) {
        Ok(file) => Some(Mutex::new(BufWriter::new(file))),
        Err(err) => {
            eprintln!("[log] failed to create {}: {}", path.display(), err);
            None
        }
    }
}

fn ensure_run_context() -> &'static RunContext {
    RUN_CONTEXT.get_or_init(|| {
        let run_id = std::env::var("RUN_ID")
            .unwrap_or_else(|_| format!("r-{}-{}", ts_epoch_ms(), process::id()));
        let base = std::env::var("LOG_DIR").unwrap_or_else(|_| "out/runs".to_string());
        let echo = std::env::var("LOG_ECHO")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        let mut run_dir = PathBuf::from(base);
        run_dir.push(&run_id);
        if let Err(err) = create_dir_all(&run_dir) {
            eprintln!("[log] failed to create run dir: {}", err);
        }

        let _ = std::fs::write(
            run_dir.join("manifest.json"),
            json!({
                "run_id": run_id,
                "ts": ts_now(),
                "pid": process::id(),
                "version": env!("CARGO_PKG_VERSION"),
                "log_dir": run_dir.to_string_lossy(),
            })
            .to_string(),
        );

        RunContext {
            events: open_sink(run_dir.join("events.jsonl")),
            trace: open_sink(run_dir.join("trace.jsonl")),
            run_id,
            echo,
        }
    })
}

fn split_fields(mut fields: Map<String, Value>) -> (Map<String, Value>, Map<String, Value>) {
    let mut top = Map::new();
    for key in ["branch", "list", "slide", "msg"] {
        if let Some(value) = fields.remove(key) {
            top.insert(key.to_string(), value);
        }
    }
    (top, fields)
}

fn write_line(writer: &Option<Mutex<BufWriter<File>>>, line: &str) {
    if let Some(writer) = writer {
        if let Ok(mut w) = writer.lock() {
            let _ = writeln!(w, "{}", line);
        }
    }
}

// =============================================================================
// Core logging functions
// =============================================================================

/// RFC3339 timestamp with milliseconds
pub fn ts_now() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Epoch milliseconds
pub fn ts_epoch_ms() -> u64 {
    Utc::now().timestamp_millis() as u64
}

/// Emit a structured log entry
pub fn log(level: Level, domain: Domain, event: &str, fields: Map<String, Value>) {
    match Level::from_env() {
        Some(min_level) if level >= min_level && domain.is_enabled() => {}
        _ => return,
    }

    let ctx = ensure_run_context();
    let line = render_record(&ctx.run_id, level, domain, event, fields);
    match level {
        Level::Trace | Level::Debug => write_line(&ctx.trace, &line),
        _ => write_line(&ctx.events, &line),
    }
    if ctx.echo {
        eprintln!("{}", line);
    }
}

fn render_record(
    run_id: &str,
    level: Level,
    domain: Domain,
    event: &str,
    fields: Map<String, Value>,
) -> String {
    let (mut top, data) = split_fields(fields);

    let msg = top.remove("msg").unwrap_or(Value::String(String::new()));
    let mut entry = Map::new();
    entry.insert("ts".to_string(), json!(ts_now()));
    entry.insert("run_id".to_string(), json!(run_id));
    entry.insert("seq".to_string(), json!(next_seq()));
    entry.insert("lvl".to_string(), json!(level.as_str().to_uppercase()));
    entry.insert("component".to_string(), json!(domain.as_str()));
    entry.insert("event".to_string(), json!(event));
    entry.insert("msg".to_string(), msg);
    for (k, v) in top {
        entry.insert(k, v);
    }
    entry.insert("data".to_string(), Value::Object(data));
    Value::Object(entry).to_string()
}

/// Flush buffered sinks. Call before the process exits.
pub fn flush() {
    if let Some(ctx) = RUN_CONTEXT.get() {
        for sink in [&ctx.events, &ctx.trace].into_iter().flatten() {
            if let Ok(mut w) = sink.lock() {
                let _ = w.flush();
            }
        }
    }
}

// =============================================================================
// Domain-Specific Logging Helpers
// =============================================================================

/// An applied (or rejected) data-entry edit.
pub fn log_edit(kind: &str, target: &str, branch: Option<&str>, digest: &str, error: Option<&str>) {
    let mut fields = obj(&[
        ("kind", v_str(kind)),
        ("target", v_str(target)),
        ("report_digest", v_str(digest)),
        ("branch", branch.map(v_str).unwrap_or(Value::Null)),
    ]);
    match error {
        Some(err) => {
            fields.insert("msg".to_string(), v_str(err));
            log(Level::Warn, Domain::Entry, "edit_rejected", fields);
        }
        None => log(Level::Debug, Domain::Entry, "edit", fields),
    }
}

pub fn log_navigation(event: &str, current: usize, total: usize, mode: &str) {
    log(
        Level::Debug,
        Domain::Nav,
        event,
        obj(&[
            ("slide", json!(current + 1)),
            ("total", json!(total)),
            ("mode", v_str(mode)),
        ]),
    );
}

pub fn log_slide(slide_id: &str, number: usize, blocks: usize) {
    log(
        Level::Trace,
        Domain::Slides,
        "render",
        obj(&[
            ("slide", v_str(slide_id)),
            ("number", json!(number)),
            ("blocks", json!(blocks)),
        ]),
    );
}

/// Import or export outcome. `error` is set for failures.
pub fn log_transfer(direction: &str, path: &str, digest: Option<&str>, error: Option<&str>) {
    let mut fields = obj(&[
        ("path", v_str(path)),
        ("report_digest", digest.map(v_str).unwrap_or(Value::Null)),
    ]);
    match error {
        Some(err) => {
            fields.insert("msg".to_string(), v_str(err));
            log(Level::Error, Domain::Transfer, &format!("{}_failed", direction), fields);
        }
        None => log(Level::Info, Domain::Transfer, direction, fields),
    }
}

/// Session summary on shutdown
pub fn log_session_summary(edits: u64, rejected: u64, exports: u64, imports: u64, digest: &str) {
    log(
        Level::Info,
        Domain::System,
        "session_summary",
        obj(&[
            ("edits", json!(edits)),
            ("rejected", json!(rejected)),
            ("exports", json!(exports)),
            ("imports", json!(imports)),
            ("report_digest", v_str(digest)),
        ]),
    );
}

// =============================================================================
// Utility Functions
// =============================================================================

pub fn obj(pairs: &[(&str, Value)]) -> Map<String, Value> {
    let mut map = Map::new();
    for (k, v) in pairs {
        map.insert((*k).to_string(), v.clone());
    }
    map
}

pub fn v_str(s: &str) -> Value {
    Value::String(s.to_string())
}

pub fn v_num(n: f64) -> Value {
    json!(n)
}

// =============================================================================
// Tests
// =============================================================================
