//! Project creation command

use anyhow::{bail, Context, Result};
use std::sync::Arc;

use aether_core::types::GitWorkflowConfig;
use aether_core::ConfigLoader;
use aether_projects::bootstrap::{
    BootstrapReport, BootstrapRequest, Bootstrapper, NonInteractivePrompter, OriginOutcome,
    Prompter, PushOutcome,
};

use crate::cli::Cli;
use crate::output;
use crate::prompt::TerminalPrompter;

/// Bootstrap the project described by the command line
pub async fn run(cli: Cli) -> Result<()> {
    let loader = ConfigLoader::new().context("Failed to locate the configuration directory")?;
    let mut config = match &cli.config {
        Some(path) => loader.load_from_file(path),
        None => loader.load(),
    }
    .context("Failed to load configuration")?;

    if let Some(template) = &cli.template {
        config.template_repository = template.clone();
    }

    if cli.destination.exists() {
        bail!("Destination '{}' already exists", cli.destination);
    }

    let request = BootstrapRequest {
        template_url: config.template_repository.clone(),
        destination: cli.destination.clone(),
        selector: cli.selector(),
        git_name: cli.git_name.clone(),
        git_email: cli.git_email.clone(),
    };

    if !cli.quiet {
        output::header("Create Aether Project");
        output::kv("Template", &request.template_url);
        output::kv("Target", &request.selector.resolve().to_string());
        output::kv("Location", request.destination.as_str());
        println!();
    }

    let spinner = (!cli.quiet).then(|| output::spinner("Bootstrapping project..."));
    let prompter: Arc<dyn Prompter> = if cli.yes {
        Arc::new(NonInteractivePrompter)
    } else {
        Arc::new(TerminalPrompter::new(spinner.clone()))
    };

    let workflow = config.git_workflow.clone();
    let result = Bootstrapper::new(config)
        .with_prompter(prompter)
        .run(&request)
        .await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let report = result.context("Bootstrap failed")?;
    print_report(&report, &workflow, cli.quiet);
    Ok(())
}

fn print_report(report: &BootstrapReport, workflow: &GitWorkflowConfig, quiet: bool) {
    output::warnings(&report.warnings);
    if quiet {
        return;
    }

    output::success(&format!("Created project at {}", report.destination));
    if let Some(version) = &report.installed_version {
        output::kv("Installed version", version);
    }
    output::kv("Branch", report.branch.as_deref().unwrap_or("(detached)"));
    if let Some(revision) = &report.revision {
        let short: String = revision.chars().take(12).collect();
        output::kv("Revision", &short);
    }
    for (name, url) in &report.remotes {
        output::kv(&format!("Remote {}", name), url);
    }

    if let OriginOutcome::Added { url, push } = &report.origin {
        output::kv("Origin", url);
        if *push == PushOutcome::Pushed {
            output::success(&format!(
                "Pushed '{}' to {}",
                workflow.integration_branch, workflow.origin_remote
            ));
        }
    }

    let mut steps = vec![format!("cd {}", report.destination)];
    match &report.origin {
        OriginOutcome::Added {
            push: PushOutcome::Pushed,
            ..
        } => {}
        OriginOutcome::Added { .. } => steps.push(format!(
            "git push --set-upstream {} {}",
            workflow.origin_remote, workflow.integration_branch
        )),
        _ => steps.push(format!(
            "git remote add {} <your-repository-url>",
            workflow.origin_remote
        )),
    }
    output::next_steps(&steps);
}
