/// Environment variable read by [`SchedulerConfig::from_env`].
pub const LOG_PERFORMANCE_ENV: &str = "ONPAINT_LOG_PERFORMANCE";

/// Scheduler settings.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct SchedulerConfig {
    /// Time every callback invocation and send the timings to the reporter.
    pub log_performance: bool,
}

impl SchedulerConfig {
    /// Builds a config from `ONPAINT_LOG_PERFORMANCE`, falling back to defaults.
    pub fn from_env() -> Self {
        let log_performance = std::env::var(LOG_PERFORMANCE_ENV)
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        Self { log_performance }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
