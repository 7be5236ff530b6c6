use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Instant;

use anyhow::{bail, Context};
use shelf_core::{
    resolve_branch, resolve_system, update, Lifecycle, LookupParameters, Msg, Phase, ProgressAnnouncer,
    RequestCoordinator, RequestState, ResultSet, LIBRARY_SYSTEMS,
};
use shelf_engine::{export_csv, ExportRow, ReqwestCollaborator};
use shelf_logging::{set_current_request, shelf_info, shelf_warn};

use super::cli::Cli;
use super::config::AppConfig;
use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::ui::render::{Line, Screen};

pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    if cli.list_libraries {
        print_libraries()?;
        return Ok(ExitCode::SUCCESS);
    }

    let config = AppConfig::load(cli.config.as_deref())?;
    let destination = if cli.verbose {
        LogDestination::Both
    } else {
        LogDestination::File
    };
    logging::initialize(destination, &config.log_file);

    let Some(user_id) = cli.user_id.clone() else {
        bail!("no user id given; pass it as an argument or set SHELF_USER_ID");
    };
    let library = cli.library.clone().unwrap_or_else(|| config.library.clone());
    let branch = cli.branch.clone().unwrap_or_else(|| config.branch.clone());
    let params = LookupParameters::new(
        user_id,
        cli.shelf.clone(),
        resolve_system(&library),
        resolve_branch(&library, &branch),
    );

    let collaborator = ReqwestCollaborator::new(config.collaborator_settings(cli.endpoint.as_deref()));
    shelf_info!("Using endpoint {}", collaborator.settings().endpoint);
    let coordinator = RequestCoordinator::new(
        ProgressAnnouncer::new(config.status_sequence()),
        config.tick_interval(),
    );

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(Arc::new(collaborator), msg_tx.clone());
    spawn_interrupt_listener(msg_tx.clone());

    let started = Instant::now();
    let _ = msg_tx.send(Msg::Submit(params));
    drop(msg_tx);
    let coordinator = run_event_loop(coordinator, msg_rx, &runner)?;
    runner.shutdown();
    shelf_info!("Finished after {:.1}s", started.elapsed().as_secs_f64());

    match coordinator.state() {
        RequestState::Settled {
            outcome: Ok(books), ..
        } => {
            if let Some(path) = &cli.csv {
                write_csv(path, books)?;
            }
            Ok(ExitCode::SUCCESS)
        }
        _ => Ok(ExitCode::FAILURE),
    }
}

/// Dispatches messages until the lookup settles or the session is torn down.
fn run_event_loop(
    mut coordinator: RequestCoordinator,
    msg_rx: mpsc::Receiver<Msg>,
    runner: &EffectRunner,
) -> anyhow::Result<RequestCoordinator> {
    let mut screen = Screen::default();

    while let Ok(msg) = msg_rx.recv() {
        let (next, effects) = update(coordinator, msg);
        coordinator = next;
        if let Some(request_id) = coordinator.state().request_id() {
            set_current_request(request_id);
        }
        runner.enqueue(effects);

        if coordinator.consume_dirty() {
            print_lines(&screen.render(&coordinator.view()))?;
        }

        if coordinator.lifecycle() == Lifecycle::Closed {
            shelf_warn!("Session closed before the lookup settled");
            break;
        }
        if coordinator.view().phase == Phase::Settled {
            break;
        }
    }

    let (coordinator, effects) = update(coordinator, Msg::TearDown);
    runner.enqueue(effects);
    Ok(coordinator)
}

fn spawn_interrupt_listener(msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_io()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                shelf_warn!("Ctrl-C handling unavailable: {}", err);
                return;
            }
        };
        if runtime.block_on(tokio::signal::ctrl_c()).is_ok() {
            let _ = msg_tx.send(Msg::TearDown);
        }
    });
}

fn print_lines(lines: &[Line]) -> io::Result<()> {
    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();
    for line in lines {
        if line.is_progress() {
            writeln!(err, "{line}")?;
        } else {
            writeln!(out, "{line}")?;
        }
    }
    out.flush()
}

fn write_csv(path: &std::path::Path, books: &ResultSet) -> anyhow::Result<()> {
    let rows: Vec<ExportRow> = books
        .iter()
        .map(|book| ExportRow {
            title: book.title.clone(),
            author: book.author.clone(),
            call_number: book.catalog_call_number.clone(),
            link: book.record_link.clone(),
        })
        .collect();
    let summary = export_csv(path, &rows).with_context(|| format!("exporting to {}", path.display()))?;
    eprintln!(
        "Wrote {} books to {}",
        summary.row_count,
        summary.output_path.display()
    );
    Ok(())
}

fn print_libraries() -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for system in LIBRARY_SYSTEMS {
        writeln!(out, "{} ({})", system.name, system.id)?;
        for branch in system.branches {
            writeln!(out, "    {:<24} {}", branch.name, branch.id)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use shelf_core::{ProgressAnnouncer, StatusMessageSequence};
    use shelf_engine::{CatalogBook, Collaborator, LookupFailure, LookupRequest};

    struct SlowCollaborator {
        delay: Duration,
    }

    #[async_trait::async_trait]
    impl Collaborator for SlowCollaborator {
        async fn lookup(&self, _request: &LookupRequest) -> Result<Vec<CatalogBook>, LookupFailure> {
            tokio::time::sleep(self.delay).await;
            Ok(Vec::new())
        }
    }

    fn start(delay: Duration) -> (mpsc::Sender<Msg>, mpsc::Receiver<Msg>, EffectRunner) {
        shelf_logging::initialize_for_tests();
        let (msg_tx, msg_rx) = mpsc::channel();
        let runner = EffectRunner::new(Arc::new(SlowCollaborator { delay }), msg_tx.clone());
        (msg_tx, msg_rx, runner)
    }

    fn coordinator() -> RequestCoordinator {
        RequestCoordinator::new(
            ProgressAnnouncer::new(StatusMessageSequence::default()),
            Duration::from_millis(30),
        )
    }

    fn params() -> LookupParameters {
        LookupParameters::new("1", "to-read", "sfpl", "MAIN")
    }

    #[test]
    fn loop_exits_once_the_lookup_settles() {
        let (msg_tx, msg_rx, runner) = start(Duration::from_millis(120));
        msg_tx.send(Msg::Submit(params())).unwrap();

        let started = Instant::now();
        let coordinator = run_event_loop(coordinator(), msg_rx, &runner).unwrap();
        runner.shutdown();

        assert!(started.elapsed() >= Duration::from_millis(120));
        assert_eq!(
            coordinator.state(),
            &RequestState::Settled {
                request_id: 1,
                outcome: Ok(Vec::new()),
            }
        );
        assert!(!coordinator.announcer().is_running());
        assert_eq!(coordinator.lifecycle(), Lifecycle::Closed);
    }

    #[test]
    fn teardown_while_in_flight_closes_the_loop() {
        let (msg_tx, msg_rx, runner) = start(Duration::from_secs(30));
        msg_tx.send(Msg::Submit(params())).unwrap();
        msg_tx.send(Msg::TearDown).unwrap();

        let started = Instant::now();
        let coordinator = run_event_loop(coordinator(), msg_rx, &runner).unwrap();
        runner.shutdown();

        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(coordinator.state().is_in_flight());
        assert!(!coordinator.announcer().is_running());
        assert_eq!(coordinator.lifecycle(), Lifecycle::Closed);
    }
}
