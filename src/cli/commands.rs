//! Command implementations

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use crate::adapters::AppConfig;
use crate::app::container::AppContainer;
use crate::app::cut_interactor::CutRequest;
use crate::cli::args::{CutArgs, InspectArgs, PreviewArgs};
use crate::cli::LogFormat;
use crate::engine::progress::{
    ConsoleProgressCallback, JsonProgressCallback, NoOpProgressCallback, ProgressCallback,
};
use crate::output::report;

/// Execute the cut command
pub async fn cut(
    container: &dyn AppContainer,
    config: &AppConfig,
    args: CutArgs,
    log_format: LogFormat,
) -> Result<()> {
    info!("Starting cut operation");
    info!("Input: {}", args.input.display());
    info!("Clip length: {}s", config.cut.clip_length);

    let progress: Box<dyn ProgressCallback> = match (args.quiet, log_format) {
        (true, _) => Box::new(NoOpProgressCallback),
        (false, LogFormat::Json) => Box::new(JsonProgressCallback),
        (false, LogFormat::Text) => Box::new(ConsoleProgressCallback::new()),
    };

    let request = CutRequest::new(&args.input, config.cut.clip_length);
    let cut_report = container
        .cut_interactor()
        .execute(request, progress.as_ref())
        .await
        .with_context(|| format!("Failed to cut {}", args.input.display()))?;

    println!("{}", report::render(&cut_report, args.format)?);

    if cut_report.total_failed() > 0 {
        warn!(
            "{} of {} clips failed",
            cut_report.total_failed(),
            cut_report.total_eligible
        );
        if cut_report.total_saved == 0 {
            bail!("None of the {} clips could be encoded", cut_report.total_eligible);
        }
    }
    Ok(())
}

/// Execute the inspect command
pub async fn inspect(container: &dyn AppContainer, args: InspectArgs) -> Result<()> {
    let interactor = container.inspect_interactor();

    if args.status {
        println!("{}", interactor.status_line(&args.input).await);
        return Ok(());
    }

    let response = interactor
        .inspect(&args.input)
        .await
        .with_context(|| format!("Failed to inspect {}", args.input.display()))?;
    print!("{}", response.render(args.format)?);
    Ok(())
}

/// Execute the preview command
pub async fn preview(container: &dyn AppContainer, args: PreviewArgs) -> Result<()> {
    let written = container
        .inspect_interactor()
        .preview(&args.input, args.frame, args.output)
        .await
        .with_context(|| format!("Failed to preview {}", args.input.display()))?;
    println!("{}", written.display());
    Ok(())
}
