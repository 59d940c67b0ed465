use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

/// Everything one run needs: target instance, credentials, and the job to create.
#[derive(Debug, Clone)]
pub struct JobSpec {
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub project_uuid: String,
    pub pipeline_uuid: String,
    pub pipeline_name: String,
    pub job_name: String,
    pub cron_schedule: String,
    pub max_retained_runs: u32,
    pub login_timeout: Duration,
    pub user_agent: String,
}

/// Payload for `POST /catch/api-proxy/api/jobs`. Field names are the wire
/// format the Orchest webserver expects.
#[derive(Debug, Clone, Serialize)]
pub struct JobDraftRequest {
    pub project_uuid: String,
    pub pipeline_uuid: String,
    pub pipeline_name: String,
    pub name: String,
    pub draft: bool,
    pub pipeline_run_spec: PipelineRunSpec,
    pub parameters: Vec<serde_json::Value>,
    pub max_retained_pipeline_runs: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineRunSpec {
    pub run_type: String,
    pub uuids: Vec<String>,
}

/// Payload for `PUT /catch/api-proxy/api/jobs/{job_uuid}` that confirms the
/// draft and puts it on a cron schedule.
#[derive(Debug, Clone, Serialize)]
pub struct JobStartRequest {
    pub confirm_draft: bool,
    pub strategy_json: serde_json::Value,
    pub parameters: Vec<serde_json::Value>,
    pub cron_schedule: String,
}

impl JobDraftRequest {
    pub fn from_spec(spec: &JobSpec) -> Self {
        Self {
            project_uuid: spec.project_uuid.clone(),
            pipeline_uuid: spec.pipeline_uuid.clone(),
            pipeline_name: spec.pipeline_name.clone(),
            name: spec.job_name.clone(),
            draft: true,
            pipeline_run_spec: PipelineRunSpec {
                run_type: "full".to_string(),
                uuids: Vec::new(),
            },
            // One empty parameter set: run the pipeline as-is.
            parameters: vec![json!({})],
            max_retained_pipeline_runs: spec.max_retained_runs,
        }
    }
}

impl JobStartRequest {
    pub fn from_spec(spec: &JobSpec) -> Self {
        Self {
            confirm_draft: true,
            strategy_json: json!({}),
            parameters: vec![json!({})],
            cron_schedule: spec.cron_schedule.clone(),
        }
    }
}

/// The only field we need from the draft-creation response.
#[derive(Debug, Clone, Deserialize)]
pub struct JobDraftResponse {
    pub uuid: String,
}

/// Entry in the `GET /async/projects` response.
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub uuid: String,
    pub path: String,
}

/// Entry in the `GET /async/pipelines/{project_uuid}` result list.
#[derive(Debug, Clone, Deserialize)]
pub struct Pipeline {
    pub uuid: String,
    pub path: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineListResponse {
    pub success: bool,
    pub result: Vec<Pipeline>,
}

/// Machine-readable record of a completed run, printed with `--json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRunReport {
    pub timestamp_utc: String,
    pub base_url: String,
    pub project_uuid: String,
    pub pipeline_uuid: String,
    pub job_uuid: String,
    pub job_name: String,
    pub cron_schedule: String,
}
