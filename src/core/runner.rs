use chrono::{Duration, Utc};
use k8s_openapi::api::batch::v1::Job;
use kube::ResourceExt;
use tracing::{debug, info, warn};

use crate::core::archive;
use crate::core::cluster::ClusterJobs;
use crate::core::error::PurgeError;
use crate::core::filter;
use crate::core::options::PurgeOptions;

/// Outcome of one purge run. `success` is false only when the initial job
/// listing failed; per-job archive and delete failures are folded into
/// `message` and the diagnostic log instead.
#[derive(Debug)]
pub struct PurgeResult {
    pub success: bool,
    pub message: String,
    pub error: Option<PurgeError>,
}

/// Deletes every job in `namespace` that finished more than `before_hours`
/// hours ago, archiving specs and events first when `options` asks for it.
/// A zero or negative threshold is allowed; a negative one moves the cutoff
/// into the future and so widens the eligible set.
pub async fn purge(
    cluster: &impl ClusterJobs,
    namespace: &str,
    before_hours: i16,
    options: &PurgeOptions,
) -> PurgeResult {
    let cutoff = Utc::now() - Duration::hours(i64::from(before_hours));
    info!("Will attempt to delete all jobs that got completed before {cutoff} ({before_hours}h ago)");

    debug!("Getting the eligible jobs to be deleted");
    let jobs = match filter::list_eligible(cluster, namespace, cutoff).await {
        Ok(jobs) => jobs,
        Err(err) => {
            return PurgeResult {
                success: false,
                message: String::new(),
                error: Some(err),
            };
        }
    };

    if jobs.is_empty() {
        debug!("Found no eligible jobs to delete, returning");
        return PurgeResult {
            success: true,
            message: "Found no jobs to delete".to_string(),
            error: None,
        };
    }

    info!("Found {} jobs to delete, will attempt to delete them", jobs.len());
    let message = delete_jobs(cluster, namespace, &jobs, options).await;
    PurgeResult {
        success: true,
        message,
        error: None,
    }
}

/// Deletes the given jobs in order. Archival always runs before the delete
/// call for a job, and an archival or event-query failure never suppresses
/// that delete call.
async fn delete_jobs(
    cluster: &impl ClusterJobs,
    namespace: &str,
    jobs: &[Job],
    options: &PurgeOptions,
) -> String {
    let mut deleted = Vec::new();
    let mut failed = Vec::new();

    for job in jobs {
        let job_name = job.name_any();

        if let Some(path) = options.spec_log_file.as_deref() {
            debug!("Attempting to write spec to file for job: {job_name}");
            if let Err(err) = archive::archive_spec(job, path) {
                warn!("Failed to write spec for the job [{job_name}], error: {err}");
            }
        }

        if let Some(path) = options.events_log_file.as_deref() {
            match cluster.list_job_events(namespace, &job_name).await {
                Ok(events) => {
                    debug!("Attempting to write events to file for job: {job_name}");
                    if let Err(err) = archive::archive_events(job, &events, path) {
                        warn!("Failed to write events for the job [{job_name}], error: {err}");
                    }
                }
                Err(err) => {
                    warn!("Failed to get events for the job [{job_name}], error: {err}");
                }
            }
        }

        info!("Deleting the job: {job_name}");
        match cluster.delete_job(namespace, &job_name).await {
            Ok(()) => deleted.push(job_name),
            Err(err) => {
                warn!("Failed to delete the job [{job_name}], error: {err}");
                failed.push(job_name);
            }
        }
    }

    build_summary(&deleted, &failed)
}

fn build_summary(deleted: &[String], failed: &[String]) -> String {
    let mut summary = String::new();
    if !deleted.is_empty() {
        summary.push_str("\nSuccessfully deleted the following jobs:\n");
        summary.push_str(&deleted.join("\n"));
    }
    if !failed.is_empty() {
        summary.push_str("\nFailed to delete the following jobs:\n");
        summary.push_str(&failed.join("\n"));
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::build_summary;

    #[test]
    fn summary_lists_each_group_under_its_own_header() {
        let deleted = vec!["job-a".to_string(), "job-b".to_string()];
        let failed = vec!["job-c".to_string()];

        let summary = build_summary(&deleted, &failed);
        assert_eq!(
            summary,
            "\nSuccessfully deleted the following jobs:\njob-a\njob-b\
             \nFailed to delete the following jobs:\njob-c"
        );
    }

    #[test]
    fn summary_omits_empty_groups() {
        let summary = build_summary(&["job-a".to_string()], &[]);
        assert!(summary.contains("Successfully deleted"));
        assert!(!summary.contains("Failed to delete"));
    }
}
