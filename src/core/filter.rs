use chrono::{DateTime, Utc};
use k8s_openapi::api::batch::v1::Job;
use kube::ResourceExt;
use tracing::debug;

use crate::core::cluster::ClusterJobs;
use crate::core::error::PurgeError;

/// Fetches every job in the namespace with one unfiltered list call and
/// keeps the ones eligible for deletion. Filtering happens entirely on the
/// client side; the result preserves the listing order.
pub async fn list_eligible(
    cluster: &impl ClusterJobs,
    namespace: &str,
    cutoff: DateTime<Utc>,
) -> Result<Vec<Job>, PurgeError> {
    let all_jobs = cluster.list_jobs(namespace).await?;

    let mut eligible = Vec::new();
    for job in all_jobs {
        if is_eligible(&job, cutoff) {
            debug!("Got an eligible job with name: {}", job.name_any());
            eligible.push(job);
        }
    }
    Ok(eligible)
}

/// A job qualifies when it has no active pods and a completion timestamp
/// strictly earlier than the cutoff. A job that never finished carries no
/// completion timestamp and never qualifies.
pub fn is_eligible(job: &Job, cutoff: DateTime<Utc>) -> bool {
    let Some(status) = job.status.as_ref() else {
        return false;
    };
    if status.active.unwrap_or(0) != 0 {
        return false;
    }
    match status.completion_time.as_ref() {
        Some(completed) => completed.0 < cutoff,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use k8s_openapi::api::batch::v1::JobStatus;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, Time};

    use super::*;

    fn job(name: &str, active: Option<i32>, completed_hours_ago: Option<i64>) -> Job {
        Job {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            status: Some(JobStatus {
                active,
                completion_time: completed_hours_ago
                    .map(|hours| Time(Utc::now() - Duration::hours(hours))),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn keeps_inactive_jobs_completed_before_cutoff() {
        let cutoff = Utc::now() - Duration::hours(24);
        assert!(is_eligible(&job("old", Some(0), Some(48)), cutoff));
        assert!(is_eligible(&job("old", None, Some(48)), cutoff));
    }

    #[test]
    fn rejects_jobs_completed_after_cutoff() {
        let cutoff = Utc::now() - Duration::hours(24);
        assert!(!is_eligible(&job("recent", Some(0), Some(2)), cutoff));
    }

    #[test]
    fn rejects_active_jobs_regardless_of_completion_time() {
        let cutoff = Utc::now() - Duration::hours(1);
        assert!(!is_eligible(&job("busy", Some(1), Some(10)), cutoff));
    }

    #[test]
    fn rejects_jobs_without_a_completion_timestamp() {
        let cutoff = Utc::now() + Duration::hours(1000);
        assert!(!is_eligible(&job("unfinished", Some(0), None), cutoff));
        assert!(!is_eligible(
            &Job {
                metadata: ObjectMeta {
                    name: Some("statusless".to_string()),
                    ..Default::default()
                },
                ..Default::default()
            },
            cutoff
        ));
    }

    #[test]
    fn cutoff_comparison_is_strict() {
        let cutoff = Utc::now();
        let mut finished_exactly_at_cutoff = job("boundary", Some(0), None);
        if let Some(status) = finished_exactly_at_cutoff.status.as_mut() {
            status.completion_time = Some(Time(cutoff));
        }
        assert!(!is_eligible(&finished_exactly_at_cutoff, cutoff));
    }
}
