use std::env;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "warn,dashcam_timeline=info,dashcam_timeline_core=info";
const DEFAULT_LOG_FILE: &str = "./logs/dashcam-timeline.log";

/// Where and how much the CLI logs, read from `TRACING_LEVEL`, `LOG_FILE_PATH` and `NO_COLOR`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub filter: String,
    pub log_dir: PathBuf,
    pub log_file: String,
    pub ansi: bool,
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let filter = lookup("TRACING_LEVEL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string());

        let path = lookup("LOG_FILE_PATH")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());
        let path = Path::new(&path);
        let log_dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let log_file = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dashcam-timeline.log".to_string());

        // https://no-color.org: any non-empty value disables colour.
        let ansi = lookup("NO_COLOR").map_or(true, |value| value.is_empty());

        Self {
            filter,
            log_dir,
            log_file,
            ansi,
        }
    }
}

/// Console output goes to stderr so `build --json` stays parseable on stdout.
pub fn init_logger() -> impl Drop {
    let settings = LogSettings::from_env();
    let filter_layer = EnvFilter::new(&settings.filter);

    let file_appender = tracing_appender::rolling::never(&settings.log_dir, &settings.log_file);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .pretty()
                .with_file(false)
                .without_time()
                .with_ansi(settings.ansi),
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .with(filter_layer)
        .init();

    info!(
        "Logging at '{}' to stderr and {}",
        settings.filter,
        settings.log_dir.join(&settings.log_file).display()
    );

    guard
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(vars: &[(&str, &str)]) -> LogSettings {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        LogSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let settings = settings_from(&[]);
        assert_eq!(settings.filter, DEFAULT_FILTER);
        assert_eq!(settings.log_dir, PathBuf::from("./logs"));
        assert_eq!(settings.log_file, "dashcam-timeline.log");
        assert!(settings.ansi);
    }

    #[test]
    fn test_overrides_from_environment() {
        let settings = settings_from(&[
            ("TRACING_LEVEL", "dashcam_timeline_core=trace"),
            ("LOG_FILE_PATH", "/var/log/dashcam/run.log"),
            ("NO_COLOR", "1"),
        ]);
        assert_eq!(settings.filter, "dashcam_timeline_core=trace");
        assert_eq!(settings.log_dir, PathBuf::from("/var/log/dashcam"));
        assert_eq!(settings.log_file, "run.log");
        assert!(!settings.ansi);
    }

    #[test]
    fn test_bare_file_name_and_blank_values() {
        let settings = settings_from(&[
            ("TRACING_LEVEL", "  "),
            ("LOG_FILE_PATH", "timeline.log"),
            ("NO_COLOR", ""),
        ]);
        assert_eq!(settings.filter, DEFAULT_FILTER);
        assert_eq!(settings.log_dir, PathBuf::from("."));
        assert_eq!(settings.log_file, "timeline.log");
        assert!(settings.ansi);
    }
}
