//! REST client for the CI/automation dispatcher.
//!
//! Prediction runs execute out of process: this client fires a
//! workflow-dispatch call carrying the job id and probability threshold,
//! confirms the 2xx, and reports anything else as an error. It never waits
//! for, or observes, the run itself -- job status transitions are written
//! back by the pipeline.

use std::time::Duration;

use driftnet_core::types::DbId;

/// Errors from the dispatch client.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// No bearer token was configured.
    #[error("Dispatch token not configured")]
    MissingToken,

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The dispatcher returned a non-2xx status code.
    #[error("Dispatcher error ({status}): {body}")]
    Api { status: u16, body: String },
}

/// Where workflow-dispatch calls are sent.
#[derive(Debug, Clone)]
pub struct DispatchTarget {
    /// API base, e.g. `https://api.github.com`.
    pub api_base: String,
    pub owner: String,
    pub repo: String,
    /// Workflow file name, e.g. `predict.yml`.
    pub workflow_id: String,
    /// Branch or tag to run the workflow on.
    pub ref_name: String,
    /// Bearer token; dispatching without one is an error.
    pub token: Option<String>,
}

/// HTTP client for the workflow dispatcher.
pub struct DispatchClient {
    client: reqwest::Client,
    target: DispatchTarget,
}

impl DispatchClient {
    /// Create a client with a bounded request timeout.
    pub fn new(target: DispatchTarget) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("reqwest client construction cannot fail with static options");
        Self { client, target }
    }

    /// Kick off a prediction run for one job.
    ///
    /// The dispatcher replies 204 on acceptance; anything non-2xx is
    /// surfaced as [`DispatchError::Api`]. The job row is not touched here.
    pub async fn trigger(
        &self,
        job_id: DbId,
        probability_threshold: f64,
    ) -> Result<(), DispatchError> {
        let token = self
            .target
            .token
            .as_deref()
            .ok_or(DispatchError::MissingToken)?;

        let url = format!(
            "{}/repos/{}/{}/actions/workflows/{}/dispatches",
            self.target.api_base, self.target.owner, self.target.repo, self.target.workflow_id
        );
        let body = serde_json::json!({
            "ref": self.target.ref_name,
            "inputs": {
                "job_id": job_id.to_string(),
                "probability_threshold": probability_threshold.to_string(),
            },
        });

        let response = self
            .client
            .post(url)
            .header("Accept", "application/vnd.github.v3+json")
            .header("User-Agent", "driftnet-api")
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DispatchError::Api {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(job_id, "Prediction run dispatched");
        Ok(())
    }
}
