use clap::Parser;
use rosterctl::config::Command;
use rosterctl::{Application, Config, commands, connect_database, telemetry};

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI args
    let args = rosterctl::config::Args::parse();

    // Load configuration
    let config = Config::load(&args)?;

    // If --validate flag is set, exit successfully after config validation
    if args.validate {
        println!("Configuration is valid.");
        return Ok(());
    }

    // Initialize tracing
    telemetry::init_telemetry()?;

    tracing::debug!("{:?}", args);

    match args.command {
        None | Some(Command::Serve) => {
            // Run the application with graceful shutdown on SIGTERM/Ctrl+C
            let shutdown = shutdown_signal();
            Application::new(config).await?.serve(shutdown).await
        }
        Some(Command::GenerateEmployees { count }) => {
            let pool = connect_database(&config).await?;
            commands::generate_employees(&pool, count).await?;
            pool.close().await;
            Ok(())
        }
        Some(Command::TrainModel { min_samples }) => {
            let pool = connect_database(&config).await?;
            commands::train_model(&pool, &config, min_samples).await?;
            pool.close().await;
            Ok(())
        }
    }
}
