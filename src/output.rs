// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal, quiet (CI), and JSON output modes.

use crate::converge::Report;
use crate::types::ZoneListEntry;
use chrono::Utc;
use serde::Serialize;
use std::time::Instant;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Minimal output for CI (only final result)
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    fn duration(&self) -> Option<f64> {
        self.start_time.map(|_| self.elapsed_secs())
    }

    /// Print a progress message (suppressed in quiet/json mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Print the outcome of converging one zone.
    pub fn report(&self, report: &Report) {
        match self.mode {
            OutputMode::Normal => {
                let status = if report.changed { "changed" } else { "ok" };
                println!("  {} {}: {}", status, report.zone, report);
                for warning in &report.warnings {
                    self.warning(&format!("{}: {}", report.zone, warning));
                }
            }
            OutputMode::Quiet => {
                if report.changed {
                    println!("{}: {}", report.zone, report);
                }
            }
            OutputMode::Json => {
                if let Ok(json) = report_json(report) {
                    println!("{json}");
                }
            }
        }
    }

    /// Print a zone listing.
    pub fn zones(&self, zones: &[ZoneListEntry]) {
        match self.mode {
            OutputMode::Normal => print!("{}", zone_table(zones, true)),
            OutputMode::Quiet => print!("{}", zone_table(zones, false)),
            OutputMode::Json => {
                if let Ok(json) = serde_json::to_string(zones) {
                    println!("{json}");
                }
            }
        }
    }

    /// Print a success message with optional timing.
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => {
                let elapsed = self.elapsed_secs();
                if elapsed > 0.0 {
                    println!("{message} ({:.1}s)", elapsed);
                } else {
                    println!("{message}");
                }
            }
            OutputMode::Quiet => {}
            OutputMode::Json => {
                let event = JsonEvent {
                    event: "success",
                    timestamp: Utc::now().to_rfc3339(),
                    message,
                    duration_secs: self.duration(),
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    println!("{json}");
                }
            }
        }
    }

    /// Print a warning message.
    pub fn warning(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => eprintln!("Warning: {message}"),
            OutputMode::Json => {
                let event = JsonEvent {
                    event: "warning",
                    timestamp: Utc::now().to_rfc3339(),
                    message,
                    duration_secs: None,
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    eprintln!("{json}");
                }
            }
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                eprintln!("Error: {message}");
            }
            OutputMode::Json => {
                let event = JsonEvent {
                    event: "error",
                    timestamp: Utc::now().to_rfc3339(),
                    message,
                    duration_secs: self.duration(),
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    eprintln!("{json}");
                }
            }
        }
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    timestamp: String,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}

fn report_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string(&ReportEvent {
        event: "zone",
        timestamp: Utc::now().to_rfc3339(),
        message: report.to_string(),
        report,
    })
}

fn zone_table(zones: &[ZoneListEntry], header: bool) -> String {
    let mut out = String::new();
    if header {
        out.push_str(&format!(
            "{:<5} {:<24} {:<14} {:<10} PATH\n",
            "ID", "NAME", "STATUS", "BRAND"
        ));
    }
    for z in zones {
        let id = z.id.map(|i| i.to_string()).unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:<5} {:<24} {:<14} {:<10} {}\n",
            id,
            z.name,
            z.state,
            z.brand.as_deref().unwrap_or("-"),
            z.path
        ));
    }
    out
}

#[derive(Serialize)]
struct ReportEvent<'a> {
    event: &'a str,
    timestamp: String,
    message: String,
    #[serde(flatten)]
    report: &'a Report,
}
