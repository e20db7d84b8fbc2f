use crate::config::Config;
use crate::severity::Severity;

/// Whether a record of `severity` logged at `depth` is written at all.
pub fn should_emit(severity: Severity, depth: i32, config: &Config) -> bool {
    config.trace && within_thresholds(severity, depth, config)
}

/// The level/depth half of [`should_emit`], applied at the sink router
/// after the global enable check has already passed.
pub fn within_thresholds(severity: Severity, depth: i32, config: &Config) -> bool {
    severity.rank() <= config.level && depth <= config.depth
}
