//! Logging setup.
//!
//! Library code logs through the [`log`] facade. Binaries call [`init`] once
//! at startup to send records to stderr via `env_logger`.
//!
//! ```no_run
//! floatchat::logging::init();
//! log::info!("Exporter ready");
//! ```
//!
//! The default level is `info`; set `RUST_LOG` to override it, e.g.
//! `RUST_LOG=floatchat=debug`.

use env_logger::Env;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Installs the global logger. Calling it again is a no-op.
pub fn init() {
    let initialized = env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .format_timestamp_millis()
        .try_init()
        .is_ok();

    if initialized {
        log::debug!("Logging initialized with default filter '{DEFAULT_FILTER}'");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice() {
        init();
        init();
        log::info!("still logging");
    }
}
