use crate::application::use_cases::report_user_activity::{
    ReportItem, ReportUserActivityInteractor, ReportUserActivityUseCase,
    ReportUserActivityUseCaseInput,
};
use crate::infrastructures::adapters::secondary::external_apis::github::{
    DEFAULT_API_URL, GitHubApiAdapter,
};
use clap::Parser;
use futures_util::{Stream, StreamExt};
use std::io::Write;
use std::num::NonZeroUsize;
use std::pin::pin;
use std::process::ExitCode;
use std::sync::Arc;
use url::Url;

pub const USAGE: &str = "Usage: ./github-activity <username>";

#[derive(Parser, Debug)]
#[command(name = "github-activity", version)]
#[command(about = "Summarise a GitHub user's recent public activity")]
#[command(
    after_help = "Only the first page (100 items) of each listing is read: repositories, \
commits per repository, issues and starred repositories beyond that are not reported."
)]
pub struct Cli {
    /// GitHub user whose activity is summarised
    pub username: Option<String>,

    /// GitHub REST API root
    #[arg(long, env = "GITHUB_ACTIVITY_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: Url,

    /// Report issues and stars even when the repository listing fails
    #[arg(long)]
    pub keep_going: bool,

    /// Commit listings fetched at once (output order is unchanged)
    #[arg(long, default_value = "1")]
    pub concurrency: NonZeroUsize,
}

/// Writes each report item as one line, diagnostics marked with ❌.
pub async fn write_report<S, W>(report: S, out: &mut W) -> std::io::Result<()>
where
    S: Stream<Item = ReportItem>,
    W: Write,
{
    let mut report = pin!(report);
    while let Some(item) = report.next().await {
        match item {
            Ok(activity) => writeln!(out, "{activity}")?,
            Err(e) => writeln!(out, "❌ {e}")?,
        }
        out.flush()?;
    }
    Ok(())
}

pub async fn run<W: Write>(cli: Cli, out: &mut W) -> anyhow::Result<ExitCode> {
    let Some(username) = cli.username else {
        writeln!(out, "{USAGE}")?;
        return Ok(ExitCode::FAILURE);
    };

    let github_api_adapter = Arc::new(GitHubApiAdapter::new(cli.api_url)?);
    let use_case = ReportUserActivityInteractor::new(github_api_adapter);

    let input = ReportUserActivityUseCaseInput {
        username,
        keep_going: cli.keep_going,
        concurrency: cli.concurrency.get(),
    };
    write_report(use_case.execute(input), out).await?;

    Ok(ExitCode::SUCCESS)
}
