// Copyright (c) 2025 SDS Datasource Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Logging setup for the SDS data source.
//!
//! Installs a `tracing-subscriber` that writes to a file or stderr.
//!
//! ## Configuration priority
//!
//! 1. `logLevel` / `logFile` data source settings (highest)
//! 2. `RUST_LOG` environment variable
//! 3. Default: `sds_datasource=warn`
//!
//! ```bash
//! RUST_LOG=sds_datasource=debug ./host
//! ```

use std::sync::OnceLock;
use tracing_subscriber::{
    fmt::{self, time::SystemTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

static LOGGING_INITIALIZED: OnceLock<()> = OnceLock::new();

const LOG_TARGET: &str = "sds_datasource";

/// Logging options taken from the data source settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogConfig {
    /// "off", "error", "warn", "info", "debug" or "trace", case-insensitive.
    pub level: Option<String>,
    /// Append to this file instead of stderr.
    pub file: Option<String>,
}

impl LogConfig {
    /// Whether logging is switched off entirely.
    pub fn is_off(&self) -> bool {
        self.level
            .as_deref()
            .is_some_and(|level| level.trim().eq_ignore_ascii_case("off"))
    }

    /// Filter directive for an explicit level, if one is configured.
    fn directive(&self) -> Option<String> {
        self.level
            .as_deref()
            .map(str::trim)
            .filter(|level| !level.is_empty())
            .map(|level| format!("{}={}", LOG_TARGET, level.to_lowercase()))
    }

    fn filter(&self) -> EnvFilter {
        match self.directive() {
            Some(directive) => EnvFilter::new(directive),
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("{}=warn", LOG_TARGET))),
        }
    }
}

/// Initialize the tracing subscriber at most once per process.
///
/// The first data source to be constructed decides the configuration; later
/// calls are no-ops. A subscriber installed by the host wins over ours.
pub fn init_logging(config: &LogConfig) {
    LOGGING_INITIALIZED.get_or_init(|| {
        if config.is_off() {
            return;
        }
        let filter = config.filter();

        match config.file.as_deref().filter(|path| !path.is_empty()) {
            Some(path) => {
                let file = match std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                {
                    Ok(f) => f,
                    Err(e) => {
                        eprintln!("sds-datasource: failed to open log file {}: {}", path, e);
                        return;
                    }
                };

                tracing_subscriber::registry()
                    .with(filter)
                    .with(
                        fmt::layer()
                            .with_writer(file)
                            .with_target(false)
                            .with_ansi(false)
                            .with_timer(SystemTime),
                    )
                    .try_init()
                    .ok();
            }
            None => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(
                        fmt::layer()
                            .with_writer(std::io::stderr)
                            .with_target(false)
                            .with_timer(SystemTime),
                    )
                    .try_init()
                    .ok();
            }
        }
    });
}
