use rig_agent::{
    Cli, CommandQueueProcessor, MainLoop, ProcessController, SelfHealingPolicy,
    ShutdownCoordinator, StatusProbe, SystemdController, logger, resolve_hostname,
};
use rig_config::Config;
use rig_db::{ClaimScope, DatabaseOptions, StateStore};

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use log::{error, info};
use tokio::signal::unix::{SignalKind, signal};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // Load, override, then validate configuration
    let mut config = Config::load_from(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    // Initialize logger (before any other logging)
    logger::initialize(
        config.logging.level,
        config.logging.file.as_ref().map(PathBuf::from),
        config.logging.colored,
    )?;

    info!("Starting rig-agent v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let hostname = resolve_hostname(config.agent.hostname.as_deref())?;
    info!("Agent hostname: {}", hostname);

    let pool = rig_db::connect(&DatabaseOptions {
        path: PathBuf::from(&config.database.path),
        max_connections: config.database.max_connections,
        busy_timeout: config.database.busy_timeout(),
    })
    .await?;

    let scope = if config.queue.scope_to_host {
        ClaimScope::Host(hostname.clone())
    } else {
        ClaimScope::Any
    };
    let store = StateStore::new(pool.clone()).with_scope(scope);

    let systemd = SystemdController::new(&config.service);
    let probe = StatusProbe::new(&config.probe)?;
    info!("Managing unit {}, probing {}", systemd.unit(), probe.url());
    let controller: Arc<dyn ProcessController> = Arc::new(systemd);

    let processor = CommandQueueProcessor::new(store.clone(), controller.clone(), hostname.as_str())
        .with_max_per_cycle(config.agent.max_commands_per_cycle);
    let policy = SelfHealingPolicy::new(store, hostname.as_str());

    let main_loop = MainLoop::new(processor, probe, controller, policy)
        .with_intervals(config.agent.poll_interval(), config.agent.backoff_interval());

    // Spawn signal handler for graceful shutdown
    let shutdown = ShutdownCoordinator::new();
    let shutdown_for_signal = shutdown.clone();
    let mut sigterm = signal(SignalKind::terminate())?;
    tokio::spawn(async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    error!("Failed to listen for SIGINT: {}", e);
                    return;
                }
                info!("Received SIGINT (Ctrl+C)");
            }
            _ = sigterm.recv() => info!("Received SIGTERM"),
        }
        shutdown_for_signal.shutdown();
    });

    main_loop.run(&shutdown).await;

    pool.close().await;
    info!("rig-agent stopped");

    Ok(())
}
