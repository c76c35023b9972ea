use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "RxDesk";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Address the HTTP server binds to when `RXDESK_ADDR` is not set.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8620";

/// Get the application data directory
/// ~/RxDesk/ on all platforms (user-visible, holds the database)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("RxDesk")
}

/// Path of the pharmacy database. Overridable via `RXDESK_DB`.
pub fn database_path() -> PathBuf {
    match std::env::var("RXDESK_DB") {
        Ok(path) => PathBuf::from(path),
        Err(_) => app_data_dir().join("pharmacy.db"),
    }
}

/// Bind address for the HTTP server. Overridable via `RXDESK_ADDR`.
pub fn bind_addr() -> String {
    std::env::var("RXDESK_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
}

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> String {
    format!("info,{}=debug", env!("CARGO_PKG_NAME"))
}
