//! Logger module
//!
//! Logging utilities for the query server:
//! - Server lifecycle logging
//! - Access logging in several formats
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to the access/info log, stdout before `init`
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

/// Write to the error log, stderr before `init`
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("======================================");
    write_info("Record query server started");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Log level: {}", config.logging.level));
    match config.server.workers {
        Some(workers) => write_info(&format!("Worker threads: {workers}")),
        None => write_info("Worker threads: default (CPU cores)"),
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    if !config.query.zero_is_unset {
        write_info("Numeric bounds of 0 are enforced");
    }
    write_info("  - GET /                 (all records)");
    write_info("  - GET /customers        (name, age_min, age_max, address)");
    write_info("  - GET /products         (name, price_min, price_max, category)");
    write_info("  - GET /dataframe        (table as JSON)");
    write_info("  - GET /dataframe/html   (table as HTML)");
    write_info("======================================\n");
}

pub fn log_shutdown(active_connections: usize) {
    write_info(&format!(
        "[Shutdown] Listener closed, {active_connections} connection(s) still finishing"
    ));
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&entry.format(format));
}
