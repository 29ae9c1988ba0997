use std::path::PathBuf;

/// Archive destinations for a purge run. An unset field disables that
/// archive; nothing is written anywhere unless a path is given.
#[derive(Debug, Clone, Default)]
pub struct PurgeOptions {
    pub spec_log_file: Option<PathBuf>,
    pub events_log_file: Option<PathBuf>,
}
