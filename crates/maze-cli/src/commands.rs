//! Command implementations.

use std::fs;
use std::io::{self, BufRead};
use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use maze_config::{AppConfig, GeneratorSettings, resolve_config};
use maze_core::{MazeController, Presenter, RequestState};
use maze_generator::{CancellationSource, GeneratorBackend, MazeGenerator};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cli::{BuildArgs, GeneratorArgs, InteractiveArgs, ProfilesArgs, TiersArgs};
use crate::presenter::TerminalPresenter;
use crate::summary::{coverage_line, profiles_json, profiles_table, tiers_table};

/// Resolve the configuration named by `--config`, falling back to the user
/// config file and then the built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let (config, source) = resolve_config(path).context("load configuration")?;
    info!(%source, profiles = config.profiles.len(), "configuration loaded");
    Ok(config)
}

/// Apply command-line overrides to the configured generator settings.
pub fn apply_generator_overrides(settings: &mut GeneratorSettings, args: &GeneratorArgs) {
    if let Some(backend) = args.backend {
        settings.backend = backend.into();
    }
    if let Some(program) = &args.program {
        settings.process.program.clone_from(program);
    }
    if !args.args.is_empty() {
        settings.process.args.clone_from(&args.args);
    }
    if let Some(endpoint) = &args.endpoint {
        settings.http.endpoint.clone_from(endpoint);
    }
    if let Some(secs) = args.timeout_secs {
        settings.timeout = Duration::from_secs(secs);
    }
}

fn build_controller<P: Presenter>(
    config: &AppConfig,
    profile: Option<&str>,
    overrides: &GeneratorArgs,
    presenter: P,
) -> Result<MazeController<GeneratorBackend, P>> {
    let profile = config.profile(profile).context("select bounds profile")?.clone();
    let mut settings = config.generator.clone();
    apply_generator_overrides(&mut settings, overrides);
    let backend = settings
        .build_backend()
        .context("set up generator backend")?;
    debug!(
        profile = %profile.name,
        backend = %settings.backend,
        timeout_secs = settings.timeout.as_secs(),
        "controller ready"
    );
    Ok(
        MazeController::new(profile, config.sizer.clone(), backend, presenter)
            .with_timeout(settings.timeout),
    )
}

/// Run one submission. Ctrl-C cancels the in-flight generator call.
pub async fn run_build(config: &AppConfig, args: &BuildArgs) -> Result<RequestState> {
    let controller = build_controller(
        config,
        args.profile.as_deref(),
        &args.generator,
        TerminalPresenter::new(),
    )?;
    let source = CancellationSource::new();
    let token = source.token();

    let submission = controller.submit_with_cancel(&args.width, &args.height, &token);
    tokio::pin!(submission);
    let state = loop {
        tokio::select! {
            state = &mut submission => break state?,
            signal = tokio::signal::ctrl_c(), if !source.is_cancelled() => {
                signal.context("listen for Ctrl-C")?;
                warn!("interrupted, cancelling maze request");
                source.cancel();
            }
        }
    };

    if let (Some(path), RequestState::Success { maze, .. }) = (&args.output, &state) {
        fs::write(path, maze).with_context(|| format!("write maze to {}", path.display()))?;
        info!(path = %path.display(), "maze written");
    }
    Ok(state)
}

/// Outcome counts for an interactive session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub submitted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Read `WIDTH HEIGHT` lines from stdin and submit each through one
/// controller.
///
/// Ctrl-C cancels the request in flight; at the prompt it ends the session,
/// as do end of input and `quit`.
pub async fn run_interactive(config: &AppConfig, args: &InteractiveArgs) -> Result<SessionSummary> {
    let controller = build_controller(
        config,
        args.profile.as_deref(),
        &args.generator,
        TerminalPresenter::new(),
    )?;
    let profile = controller.profile();
    eprintln!(
        "Enter WIDTH HEIGHT (width {}, height {}); Ctrl-D or 'quit' to finish.",
        profile.width, profile.height
    );
    let lines = spawn_stdin_reader().context("start stdin reader")?;
    let summary = run_session(&controller, lines, forward_interrupts()).await?;
    info!(
        profile = %profile.name,
        submitted = summary.submitted,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "interactive session finished"
    );
    Ok(summary)
}

/// Drive `controller` from a stream of input lines.
///
/// Each message on `interrupts` cancels the request in flight, or ends the
/// session when none is. The session also ends when `lines` closes.
pub async fn run_session<G, P>(
    controller: &MazeController<G, P>,
    mut lines: mpsc::Receiver<io::Result<String>>,
    mut interrupts: mpsc::UnboundedReceiver<()>,
) -> Result<SessionSummary>
where
    G: MazeGenerator,
    P: Presenter,
{
    let mut summary = SessionSummary::default();
    loop {
        let line = tokio::select! {
            line = lines.recv() => line.transpose().context("read from stdin")?,
            Some(()) = interrupts.recv() => {
                debug!("interrupted at the prompt");
                None
            }
        };
        let Some(line) = line else { break };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "quit" | "exit") {
            break;
        }
        let Some((width, height)) = split_pair(line) else {
            eprintln!("Expected two values, e.g. '25 10'.");
            continue;
        };

        let source = CancellationSource::new();
        let token = source.token();
        let submission = controller.submit_with_cancel(width, height, &token);
        tokio::pin!(submission);
        let state = loop {
            tokio::select! {
                state = &mut submission => break state?,
                Some(()) = interrupts.recv(), if !source.is_cancelled() => {
                    warn!("interrupted, cancelling maze request");
                    source.cancel();
                }
            }
        };
        summary.submitted += 1;
        if state.is_success() {
            summary.succeeded += 1;
        } else {
            summary.failed += 1;
        }
    }
    Ok(summary)
}

/// Read stdin on its own thread. A blocked read never holds up shutdown;
/// the thread ends with the process.
fn spawn_stdin_reader() -> io::Result<mpsc::Receiver<io::Result<String>>> {
    let (sender, receiver) = mpsc::channel(16);
    thread::Builder::new()
        .name("maze-stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                if sender.blocking_send(line).is_err() {
                    break;
                }
            }
        })?;
    Ok(receiver)
}

/// Forward every Ctrl-C as a message until the receiver goes away.
fn forward_interrupts() -> mpsc::UnboundedReceiver<()> {
    let (sender, receiver) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if sender.send(()).is_err() {
                break;
            }
        }
    });
    receiver
}

/// Split a `WIDTH HEIGHT` line. Whitespace and commas both separate.
pub fn split_pair(line: &str) -> Option<(&str, &str)> {
    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty());
    let width = parts.next()?;
    let height = parts.next()?;
    parts.next().is_none().then_some((width, height))
}

pub fn run_profiles(config: &AppConfig, args: &ProfilesArgs) -> Result<()> {
    if args.json {
        println!("{}", profiles_json(config).context("serialize profiles")?);
    } else {
        println!("{}", profiles_table(config));
    }
    Ok(())
}

pub fn run_tiers(config: &AppConfig, args: &TiersArgs) -> Result<()> {
    let profile = config
        .profile(args.profile.as_deref())
        .context("select bounds profile")?;
    println!("{}", tiers_table(&config.sizer));
    println!("{}", coverage_line(&config.sizer, profile));
    Ok(())
}
