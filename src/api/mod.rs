use crate::model::{
    JobDraftRequest, JobDraftResponse, JobRunReport, JobSpec, JobStartRequest, Pipeline,
    PipelineListResponse, Project,
};
use anyhow::{bail, Context, Result};
use reqwest::StatusCode;

/// HTTP client for the Orchest web API. Login stores the session cookie in the
/// underlying reqwest cookie jar, so every later call rides the same session.
pub struct OrchestClient {
    http: reqwest::Client,
    spec: JobSpec,
}

impl OrchestClient {
    pub fn new(spec: &JobSpec) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(&spec.user_agent)
            .cookie_store(true)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            spec: spec.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.spec.base_url.trim_end_matches('/'), path)
    }

    /// Form-encoded login. Only this call carries a timeout; a dead instance
    /// should fail fast instead of hanging the whole run.
    pub async fn login(&self) -> Result<()> {
        let form = [
            ("username", self.spec.username.as_str()),
            ("password", self.spec.password.as_str()),
        ];
        let resp = self
            .http
            .post(self.url("/login"))
            .timeout(self.spec.login_timeout)
            .form(&form)
            .send()
            .await
            .context("login request failed")?;
        if resp.status() != StatusCode::OK {
            bail!("instance login failed (HTTP {})", resp.status());
        }
        Ok(())
    }

    /// Create the job in draft form. Returns the `uuid` the instance assigned.
    pub async fn create_job_draft(&self) -> Result<String> {
        let payload = JobDraftRequest::from_spec(&self.spec);
        let resp = self
            .http
            .post(self.url("/catch/api-proxy/api/jobs"))
            .json(&payload)
            .send()
            .await
            .context("job draft request failed")?;
        if resp.status() != StatusCode::CREATED {
            bail!("failed to create job draft (HTTP {})", resp.status());
        }
        let body: JobDraftResponse = resp
            .json()
            .await
            .context("job draft response was not valid JSON")?;
        Ok(body.uuid)
    }

    /// Confirm the draft and put it on its cron schedule.
    pub async fn start_job(&self, job_uuid: &str) -> Result<()> {
        let payload = JobStartRequest::from_spec(&self.spec);
        let resp = self
            .http
            .put(self.url(&format!("/catch/api-proxy/api/jobs/{}", job_uuid)))
            .json(&payload)
            .send()
            .await
            .context("job start request failed")?;
        if resp.status() != StatusCode::OK {
            bail!("failed to start job {} (HTTP {})", job_uuid, resp.status());
        }
        Ok(())
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let resp = self
            .http
            .get(self.url("/async/projects"))
            .send()
            .await
            .context("project listing request failed")?;
        if resp.status() != StatusCode::OK {
            bail!("failed to list projects (HTTP {})", resp.status());
        }
        resp.json()
            .await
            .context("project listing response was not valid JSON")
    }

    pub async fn list_pipelines(&self, project_uuid: &str) -> Result<Vec<Pipeline>> {
        let resp = self
            .http
            .get(self.url(&format!("/async/pipelines/{}", project_uuid)))
            .send()
            .await
            .context("pipeline listing request failed")?;
        if resp.status() != StatusCode::OK {
            bail!("failed to list pipelines (HTTP {})", resp.status());
        }
        let body: PipelineListResponse = resp
            .json()
            .await
            .context("pipeline listing response was not valid JSON")?;
        if !body.success {
            bail!("instance reported pipeline listing failure");
        }
        Ok(body.result)
    }
}

/// The whole sequential flow: authenticate, create the draft, start it.
/// Any unexpected status aborts the run; the start call is only issued once
/// the draft uuid is in hand.
pub async fn create_and_start_job(spec: &JobSpec) -> Result<JobRunReport> {
    let client = OrchestClient::new(spec)?;

    eprintln!("Logging in to {} ...", spec.base_url);
    client
        .login()
        .await
        .context("failed to create authenticated session")?;

    eprintln!("Creating job draft '{}' ...", spec.job_name);
    let job_uuid = client.create_job_draft().await?;

    eprintln!("Starting job {} ...", job_uuid);
    client.start_job(&job_uuid).await?;

    Ok(JobRunReport {
        timestamp_utc: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| "now".into()),
        base_url: spec.base_url.clone(),
        project_uuid: spec.project_uuid.clone(),
        pipeline_uuid: spec.pipeline_uuid.clone(),
        job_uuid,
        job_name: spec.job_name.clone(),
        cron_schedule: spec.cron_schedule.clone(),
    })
}
