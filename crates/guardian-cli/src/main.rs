use anyhow::{Context, Result};
use clap::Parser;

use guardian_core::Inspector;
use guardian_core::config::GuardianConfig;
use guardian_core::report::render;

mod args;
mod logging;
mod server;

use args::{Command, OutputFormat};

/// Rendered output plus whether the underlying report passed.
struct Outcome {
    output: String,
    passed: bool,
}

fn format_report<T: serde::Serialize>(
    format: &OutputFormat,
    report: &T,
    text: impl FnOnce(&T) -> String,
) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(report)?;
            json.push('\n');
            json
        }
        OutputFormat::Text => text(report),
    })
}

fn main() -> Result<()> {
    let args = args::Args::parse();

    let config = GuardianConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    logging::init_tracing(&config.log_filter);

    let inspector = Inspector::from_config(&config);

    let outcome = match args.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("failed to start the async runtime")?;
            let served = runtime.block_on(server::serve(
                inspector,
                tokio::io::stdin(),
                tokio::io::stdout(),
            ));
            // A stdin read may still be parked on a blocking thread.
            runtime.shutdown_background();
            return served;
        }
        Command::Hygiene { repo_path, git } => {
            let report = if git {
                inspector.check_git_hygiene(&repo_path)
            } else {
                inspector.check_repo_hygiene(&repo_path)
            };
            Outcome {
                output: format_report(&args.format, &report, render::render_hygiene_text)?,
                passed: report.ok,
            }
        }
        Command::Versions {
            repo_path,
            expected,
            all_sources,
        } => {
            if all_sources {
                let report = inspector.collect_version_sources(&repo_path, expected.as_deref());
                Outcome {
                    output: format_report(&args.format, &report, render::render_evidence_text)?,
                    passed: report.all_aligned,
                }
            } else {
                let report = inspector.check_version_alignment(&repo_path, expected.as_deref());
                Outcome {
                    output: format_report(&args.format, &report, render::render_alignment_text)?,
                    passed: report.ok,
                }
            }
        }
        Command::Checklist { repo_path, version } => {
            let report = inspector.generate_release_checklist(&repo_path, &version);
            Outcome {
                output: format_report(&args.format, &report, render::render_checklist_text)?,
                passed: true,
            }
        }
    };

    match args.out {
        Some(path) => std::fs::write(&path, &outcome.output)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{}", outcome.output),
    }

    std::process::exit(if outcome.passed { 0 } else { 1 });
}
