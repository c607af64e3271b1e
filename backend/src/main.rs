use adminlist::{
    config::{Config, CONFIG_PATH_VAR},
    console::{execute, parse_command, Command},
    registry::StaticRegistry,
    AdminDirectory,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, Duration};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    match std::env::var(CONFIG_PATH_VAR) {
        Ok(path) => {
            info!("📄 Loading config from {}", path);
            Ok(Config::from_file(path)?)
        }
        Err(_) => Ok(Config::from_env()),
    }
}

async fn run_reload_task(directory: AdminDirectory, period: Duration) {
    let mut interval = interval(period);
    // The first tick completes immediately; bootstrap already loaded the cache.
    interval.tick().await;
    info!("🔄 Cache reload service started ({}s)", period.as_secs());

    loop {
        interval.tick().await;
        match directory.reload_all().await {
            Ok(count) => info!("Reloaded {} admins", count),
            Err(e) => error!("Cache reload failed: {}", e),
        }
    }
}

async fn run_console(directory: &AdminDirectory, registry: &StaticRegistry) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match execute(directory, registry, &command).await {
            Ok(reply) => println!("{reply}"),
            Err(e) => {
                warn!("Command {:?} failed: {}", command, e);
                println!("error: {}", e.to_public());
            }
        }

        if command == Command::Quit {
            break;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🚀 Starting admin directory");
    let config = load_config()?;

    let directory = match AdminDirectory::open(&config).await {
        Ok(directory) => directory,
        Err(e) => {
            error!("✗ Startup aborted: {}", e);
            return Err(e.into());
        }
    };
    info!("📋 Directory ready with {} admins", directory.cache().len());

    if let Some(period) = config.reload_interval() {
        tokio::spawn(run_reload_task(directory.clone(), period));
    }

    let registry = StaticRegistry::new(config.admins.iter().cloned());

    tokio::select! {
        result = run_console(&directory, &registry) => result?,
        _ = tokio::signal::ctrl_c() => info!("Interrupted"),
    }

    directory.store().close().await;
    info!("👋 Shut down");
    Ok(())
}
