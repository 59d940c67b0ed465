use crate::model::JobSpec;
use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "orchest-job-cli",
    version,
    about = "Create and start a scheduled job on an Orchest instance"
)]
pub struct Cli {
    /// Base URL of the Orchest instance
    #[arg(long, default_value = "http://localorchest.io")]
    pub base_url: String,

    /// Login username (the default is a placeholder)
    #[arg(long, env = "ORCHEST_USERNAME", default_value = "example")]
    pub username: String,

    /// Login password (the default is a placeholder)
    #[arg(
        long,
        env = "ORCHEST_PASSWORD",
        default_value = "example",
        hide_env_values = true
    )]
    pub password: String,

    /// Project UUID (discover with --list-projects)
    #[arg(long, default_value = "84f49b08-11d4-4a13-9c22-11dca7e72e80")]
    pub project_uuid: String,

    /// Pipeline UUID within the project (discover with --list-pipelines)
    #[arg(long, default_value = "0915b350-b929-4cbd-b0d4-763cac0bb69f")]
    pub pipeline_uuid: String,

    /// Pipeline name recorded on the job
    #[arg(long, default_value = "california-housing")]
    pub pipeline_name: String,

    /// Name for the new job
    #[arg(long, default_value = "example-job")]
    pub job_name: String,

    /// Cron expression the job runs on
    #[arg(long, default_value = "0 * * * *")]
    pub cron_schedule: String,

    /// How many pipeline runs the job retains before pruning old ones
    #[arg(long, default_value_t = 50)]
    pub max_retained_runs: u32,

    /// Timeout for the login call
    #[arg(long, default_value = "4s")]
    pub login_timeout: humantime::Duration,

    /// Print a JSON run report instead of the text message
    #[arg(long)]
    pub json: bool,

    /// List the instance's projects and exit without creating anything
    #[arg(long, conflicts_with = "list_pipelines")]
    pub list_projects: bool,

    /// List the selected project's pipelines and exit without creating anything
    #[arg(long)]
    pub list_pipelines: bool,
}

/// Build a `JobSpec` from CLI arguments.
pub fn build_spec(args: &Cli) -> JobSpec {
    JobSpec {
        base_url: args.base_url.clone(),
        username: args.username.clone(),
        password: args.password.clone(),
        project_uuid: args.project_uuid.clone(),
        pipeline_uuid: args.pipeline_uuid.clone(),
        pipeline_name: args.pipeline_name.clone(),
        job_name: args.job_name.clone(),
        cron_schedule: args.cron_schedule.clone(),
        max_retained_runs: args.max_retained_runs,
        login_timeout: Duration::from(args.login_timeout),
        user_agent: format!("orchest-job-cli/{}", env!("CARGO_PKG_VERSION")),
    }
}

pub async fn run(args: Cli) -> Result<()> {
    // The JSON report only exists for the create flow.
    if args.json && (args.list_projects || args.list_pipelines) {
        return Err(anyhow::anyhow!(
            "--json only applies to job creation, not to the list modes"
        ));
    }

    let spec = build_spec(&args);

    if args.list_projects || args.list_pipelines {
        let client = crate::api::OrchestClient::new(&spec)?;
        client
            .login()
            .await
            .context("failed to create authenticated session")?;

        if args.list_projects {
            for p in client.list_projects().await? {
                println!("{}\t{}", p.uuid, p.path);
            }
        } else {
            for p in client.list_pipelines(&spec.project_uuid).await? {
                println!("{}\t{}\t{}", p.uuid, p.path, p.name.unwrap_or_default());
            }
        }
        return Ok(());
    }

    let report = crate::api::create_and_start_job(&spec)
        .await
        .context("failed to create a new job in Orchest")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "Successfully created a new job in Orchest (job uuid: {}).",
            report.job_uuid
        );
    }
    Ok(())
}
