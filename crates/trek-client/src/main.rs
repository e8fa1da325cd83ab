mod cli;

use crate::cli::{Args, Command};
use anyhow::Context;
use clap::Parser;
use protocol::ServiceDescriptor;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use trek_client::config::{load_client_config, Settings};
use trek_client::input::collect;
use trek_client::orchestrator::UNREACHABLE_MESSAGE;
use trek_client::present::Presenter;
use trek_client::transport::{HttpTransport, PredictionTransport};
use trek_client::{Orchestrator, SubmitOutcome, View};

const FAILED_EXIT: u8 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let _file_guard = init_logging(&args)?;

    let file_config = match &args.config {
        Some(path) => Some(load_client_config(path)?),
        None => None,
    };
    let settings = Settings::resolve(args.overrides(), file_config, io::stdout().is_terminal())
        .context("invalid client settings")?;
    info!(
        api_base = %settings.api_base,
        predict_path = %settings.predict_path,
        "trek-safety starting"
    );

    let transport = HttpTransport::new(&settings.api_base, &settings.predict_path)
        .context("failed to build http transport")?;
    let presenter = Presenter::new(settings.format, settings.color);

    match args.command {
        Command::Assess { location } => {
            let orchestrator = Orchestrator::new(transport);
            let outcome = submit_and_show(&orchestrator, &presenter, location.as_deref()).await?;
            Ok(exit_code(&outcome))
        }
        Command::Interactive => run_interactive(Orchestrator::new(transport), &presenter).await,
        Command::Health => check_health(&transport).await,
    }
}

fn init_logging(
    args: &Args,
) -> anyhow::Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    trek_client::logging::init_tracing(args.log_dir.as_deref(), args.verbose)
        .context("failed to initialise logging")
}

async fn submit_and_show<T: PredictionTransport>(
    orchestrator: &Orchestrator<T>,
    presenter: &Presenter,
    field: Option<&str>,
) -> anyhow::Result<SubmitOutcome> {
    let request = collect(field);
    let mut updates = orchestrator.subscribe();
    let submit = orchestrator.submit(request);
    tokio::pin!(submit);

    let mut observing = true;
    let outcome = loop {
        tokio::select! {
            outcome = &mut submit => break outcome,
            changed = updates.changed(), if observing => {
                if changed.is_err() {
                    observing = false;
                    continue;
                }
                let in_progress = updates.borrow_and_update().view == View::InProgress;
                if in_progress {
                    emit_progress(&presenter.show(&View::InProgress))?;
                }
            }
        }
    };

    emit(&presenter.show(&orchestrator.view()))?;
    Ok(outcome)
}

async fn run_interactive<T: PredictionTransport>(
    orchestrator: Orchestrator<T>,
    presenter: &Presenter,
) -> anyhow::Result<ExitCode> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last = None;
    loop {
        prompt()?;
        let Some(line) = lines.next_line().await.context("failed to read stdin")? else {
            break;
        };
        last = Some(submit_and_show(&orchestrator, presenter, Some(&line)).await?);
    }
    Ok(last.as_ref().map_or(ExitCode::SUCCESS, exit_code))
}

async fn check_health(transport: &HttpTransport) -> anyhow::Result<ExitCode> {
    let reply = match transport.health().await {
        Ok(reply) => reply,
        Err(err) => {
            tracing::warn!(event = "health.unreachable", error = %err, "health probe failed");
            emit(&format!("{UNREACHABLE_MESSAGE}\n"))?;
            return Ok(ExitCode::from(FAILED_EXIT));
        }
    };
    if !reply.is_success() {
        emit(&format!("service answered with status {}\n", reply.status))?;
        return Ok(ExitCode::from(FAILED_EXIT));
    }
    let descriptor: ServiceDescriptor = serde_json::from_slice(&reply.body).unwrap_or_default();
    let name = descriptor.service.as_deref().unwrap_or("prediction service");
    emit(&format!("{name} is up\n"))?;
    Ok(ExitCode::SUCCESS)
}

fn exit_code(outcome: &SubmitOutcome) -> ExitCode {
    match outcome {
        SubmitOutcome::Failed(_) => ExitCode::from(FAILED_EXIT),
        SubmitOutcome::Succeeded(_) | SubmitOutcome::Ignored => ExitCode::SUCCESS,
    }
}

fn emit(text: &str) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn emit_progress(text: &str) -> anyhow::Result<()> {
    let mut stderr = io::stderr().lock();
    stderr.write_all(text.as_bytes())?;
    Ok(())
}

fn prompt() -> anyhow::Result<()> {
    let mut stderr = io::stderr().lock();
    stderr.write_all(b"Location: ")?;
    stderr.flush()?;
    Ok(())
}
