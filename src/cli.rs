use std::path::PathBuf;

use clap::Parser;

use crate::core::options::PurgeOptions;

const ABOUT: &str = "Purges all kubernetes jobs that completed their execution more than x hours \
ago. Optionally writes each job's spec and events to a log file before deleting it.";

#[derive(Debug, Parser)]
#[command(name = "purge-completed-jobs", version, about = ABOUT)]
pub struct Cli {
    /// Namespace in which the operations are to be performed
    #[arg(short = 'n', long = "namespace", default_value = "default")]
    pub namespace: String,

    /// Query and delete jobs that were complete before x hours
    #[arg(short = 'b', long = "before-hours", default_value_t = 1)]
    pub before_hours: i16,

    /// Log file to write the job events to
    #[arg(short = 'e', long = "events-log-file", value_name = "FILE")]
    pub events_log_file: Option<PathBuf>,

    /// Log file to write the job spec to
    #[arg(short = 's', long = "spec-log-file", value_name = "FILE")]
    pub spec_log_file: Option<PathBuf>,
}

impl Cli {
    pub fn purge_options(&self) -> PurgeOptions {
        PurgeOptions {
            spec_log_file: self.spec_log_file.clone(),
            events_log_file: self.events_log_file.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_the_default_namespace_one_hour_back() {
        let cli = Cli::try_parse_from(["purge-completed-jobs"]).unwrap();
        assert_eq!(cli.namespace, "default");
        assert_eq!(cli.before_hours, 1);
        assert!(cli.events_log_file.is_none());
        assert!(cli.spec_log_file.is_none());
    }

    #[test]
    fn each_log_flag_maps_to_its_own_option() {
        let cli = Cli::try_parse_from([
            "purge-completed-jobs",
            "-n",
            "batch",
            "-b",
            "24",
            "-e",
            "/tmp/events.log",
            "-s",
            "/tmp/specs.log",
        ])
        .unwrap();

        let options = cli.purge_options();
        assert_eq!(options.events_log_file, Some(PathBuf::from("/tmp/events.log")));
        assert_eq!(options.spec_log_file, Some(PathBuf::from("/tmp/specs.log")));
    }

    #[test]
    fn negative_thresholds_parse() {
        let cli = Cli::try_parse_from(["purge-completed-jobs", "--before-hours=-2"]).unwrap();
        assert_eq!(cli.before_hours, -2);
    }
}
