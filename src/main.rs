use color_eyre::{eyre::eyre, Result};
use joyfocus::config::{Config, LoggingConfig};
use joyfocus::joystick::{GilrsBackend, JoystickManager};
use joyfocus::pump::EventPump;
use joyfocus::state::TraceState;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    setup()?;

    let config_path = Config::resolve_path();
    let created = Config::ensure_default(&config_path)
        .await
        .map_err(|e| eyre!("Failed to prepare config at {}: {}", config_path.display(), e))?;
    let config = Config::load(&config_path).await?;

    setup_logging(&config.logging);
    if created {
        info!("Wrote default config to {}", config_path.display());
    }
    info!("Loaded config from {}", config_path.display());

    let manager = JoystickManager::new(GilrsBackend::new(), TraceState::new());
    let pump = EventPump::create(Box::new(manager), Some(config.pump.clone())).start();

    let shutdown = CancellationToken::new();
    let ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => ctrl_c.cancel(),
            Err(e) => error!("Unable to listen for Ctrl-C: {}", e),
        }
    });

    pump.run(shutdown).await;
    info!("joyfocus stopped");
    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    Ok(())
}

fn setup_logging(logging: &LoggingConfig) {
    FmtSubscriber::builder()
        .with_max_level(logging.max_level())
        .with_target(false)
        .with_thread_ids(logging.thread_ids)
        .with_file(logging.file_and_line)
        .with_line_number(logging.file_and_line)
        .pretty()
        .init();
}
