use async_trait::async_trait;
use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::Event;
use kube::api::{Api, DeleteParams, ListParams};
use kube::Client;
use tracing::debug;

use crate::core::error::PurgeError;

/// The slice of the cluster API this tool consumes: list the jobs in a
/// namespace, list the events attached to one job, delete one job.
#[async_trait]
pub trait ClusterJobs {
    async fn list_jobs(&self, namespace: &str) -> Result<Vec<Job>, PurgeError>;

    async fn list_job_events(
        &self,
        namespace: &str,
        job_name: &str,
    ) -> Result<Vec<Event>, PurgeError>;

    async fn delete_job(&self, namespace: &str, job_name: &str) -> Result<(), PurgeError>;
}

pub struct KubeCluster {
    client: Client,
}

impl KubeCluster {
    /// Builds an authenticated client. In-cluster service-account
    /// credentials are tried first, then the kubeconfig referenced by
    /// `KUBECONFIG` (or `~/.kube/config`). There is no further fallback and
    /// no retry; the caller decides whether the failure ends the process.
    pub async fn connect() -> Result<Self, PurgeError> {
        debug!("Creating the authenticated cluster client");
        let client = Client::try_default()
            .await
            .map_err(|err| PurgeError::Credentials(err.to_string()))?;
        Ok(Self { client })
    }

    fn jobs(&self, namespace: &str) -> Api<Job> {
        Api::namespaced(self.client.clone(), namespace)
    }

    fn events(&self, namespace: &str) -> Api<Event> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait]
impl ClusterJobs for KubeCluster {
    async fn list_jobs(&self, namespace: &str) -> Result<Vec<Job>, PurgeError> {
        debug!("Fetching the jobs in the {namespace} namespace");
        let list = self
            .jobs(namespace)
            .list(&ListParams::default())
            .await
            .map_err(|err| PurgeError::ListJobs {
                namespace: namespace.to_string(),
                reason: err.to_string(),
            })?;
        Ok(list.items)
    }

    async fn list_job_events(
        &self,
        namespace: &str,
        job_name: &str,
    ) -> Result<Vec<Event>, PurgeError> {
        // The API server retains events for a bounded window (one hour by
        // default), so an empty list is a normal outcome here.
        debug!("Fetching the events for the job: {job_name}");
        let params = ListParams::default().fields(&format!("involvedObject.name={job_name}"));
        let list = self
            .events(namespace)
            .list(&params)
            .await
            .map_err(|err| PurgeError::ListEvents {
                job: job_name.to_string(),
                reason: err.to_string(),
            })?;
        Ok(list.items)
    }

    async fn delete_job(&self, namespace: &str, job_name: &str) -> Result<(), PurgeError> {
        self.jobs(namespace)
            .delete(job_name, &DeleteParams::foreground())
            .await
            .map(|_| ())
            .map_err(|err| PurgeError::DeleteJob {
                job: job_name.to_string(),
                reason: err.to_string(),
            })
    }
}
