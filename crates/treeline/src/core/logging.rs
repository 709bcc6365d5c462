//! Subscriber setup for hosts of the layout engine
//!
//! The engine itself only emits `tracing` spans (`compute_layout`,
//! `regenerate_edges`) and events. Nothing is printed until a host installs
//! a subscriber, typically through [`init_logging`].
//!
//! ```rust,no_run
//! use treeline::core::logging::init_logging;
//!
//! init_logging(Some("debug"), Some("pretty")).unwrap();
//! ```
//!
//! Unset arguments fall back to `TREELINE_LOG_LEVEL` / `RUST_LOG` and
//! `TREELINE_LOG_FORMAT`. Output always goes to stderr so layout JSON on
//! stdout stays clean.
//!
//! ```bash
//! RUST_LOG="info,treeline::layout::placement=trace" treeline layout -i tree.json
//! RUST_LOG="treeline::core::edge_routing=trace" treeline layout -i tree.json
//! ```

use std::fmt;
use std::str::FromStr;

use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
    Registry,
};

const LEVEL_VAR: &str = "TREELINE_LOG_LEVEL";
const FORMAT_VAR: &str = "TREELINE_LOG_FORMAT";
const DEFAULT_LEVEL: &str = "info";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Output shape of the installed fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One line per event, no targets
    #[default]
    Compact,
    /// Multi-line with source locations and span enter/exit
    Pretty,
    /// One JSON object per event, span close timings included
    Json,
}

impl LogFormat {
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }

    fn layer(self) -> BoxedLayer {
        let base = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
        match self {
            LogFormat::Compact => base
                .compact()
                .with_target(false)
                .with_span_events(FmtSpan::NONE)
                .boxed(),
            LogFormat::Pretty => base
                .pretty()
                .with_file(true)
                .with_line_number(true)
                .with_span_events(FmtSpan::ACTIVE)
                .boxed(),
            LogFormat::Json => base
                .json()
                .with_current_span(true)
                .with_span_events(FmtSpan::CLOSE)
                .boxed(),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        };
        f.write_str(name)
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::variants()
            .iter()
            .position(|name| name.eq_ignore_ascii_case(s))
            .map(|i| [LogFormat::Compact, LogFormat::Pretty, LogFormat::Json][i])
            .ok_or_else(|| {
                format!(
                    "Unknown log format: {} (expected one of {})",
                    s,
                    Self::variants().join(", ")
                )
            })
    }
}

/// Level directive and format after applying the fallback chain
#[derive(Debug, Clone, PartialEq, Eq)]
struct LogSettings {
    directive: String,
    format: LogFormat,
}

impl LogSettings {
    fn resolve(
        level: Option<&str>,
        format: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, String> {
        let directive = level
            .map(str::to_owned)
            .or_else(|| env(LEVEL_VAR))
            .or_else(|| env("RUST_LOG"))
            .unwrap_or_else(|| DEFAULT_LEVEL.to_owned());

        let format = match format.map(str::to_owned).or_else(|| env(FORMAT_VAR)) {
            Some(name) => {
                LogFormat::from_str(&name).map_err(|e| format!("Invalid log format: {}", e))?
            }
            None => LogFormat::default(),
        };

        Ok(Self { directive, format })
    }

    /// A malformed directive degrades to the default level instead of failing
    fn filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
    }
}

/// Install the global subscriber.
///
/// `level` takes any `EnvFilter` directive (`debug`, `off`,
/// `info,treeline::layout=trace`). Fails on an unknown format, or when a
/// global subscriber is already set.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = LogSettings::resolve(level, format, |key| std::env::var(key).ok())?;
    Registry::default()
        .with(settings.format.layer().with_filter(settings.filter()))
        .try_init()?;
    tracing::debug!(directive = %settings.directive, format = %settings.format, "Logging initialized");
    Ok(())
}

/// [`init_logging`] with every setting taken from the environment
pub fn init_default_logging() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(None, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_format_names_round_trip() {
        for name in LogFormat::variants() {
            let format = LogFormat::from_str(name).unwrap();
            assert_eq!(format.to_string(), *name);
        }
        assert_eq!(LogFormat::from_str("Pretty").unwrap(), LogFormat::Pretty);
        assert!(LogFormat::from_str("xml").unwrap_err().contains("compact, pretty, json"));
    }

    #[test]
    fn test_defaults_without_environment() {
        let settings = LogSettings::resolve(None, None, no_env).unwrap();
        assert_eq!(settings.directive, "info");
        assert_eq!(settings.format, LogFormat::Compact);
    }

    #[test]
    fn test_arguments_beat_environment() {
        let env = |key: &str| match key {
            LEVEL_VAR => Some("warn".to_owned()),
            FORMAT_VAR => Some("json".to_owned()),
            _ => None,
        };
        let settings = LogSettings::resolve(Some("trace"), Some("pretty"), env).unwrap();
        assert_eq!(settings.directive, "trace");
        assert_eq!(settings.format, LogFormat::Pretty);

        let settings = LogSettings::resolve(None, None, env).unwrap();
        assert_eq!(settings.directive, "warn");
        assert_eq!(settings.format, LogFormat::Json);
    }

    #[test]
    fn test_rust_log_is_last_resort() {
        let env = |key: &str| (key == "RUST_LOG").then(|| "treeline=debug".to_owned());
        let settings = LogSettings::resolve(None, None, env).unwrap();
        assert_eq!(settings.directive, "treeline=debug");
    }

    #[test]
    fn test_bad_format_from_environment_is_rejected() {
        let env = |key: &str| (key == FORMAT_VAR).then(|| "yaml".to_owned());
        let error = LogSettings::resolve(None, None, env).unwrap_err();
        assert!(error.starts_with("Invalid log format"));
    }
}
