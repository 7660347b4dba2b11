use std::process::exit;
use std::sync::Arc;
use clap::Parser;
use log::{error, info};
use tokio::runtime::Builder;
use clubdata::common::common::setup_logging;
use clubdata::config::structs::configuration::Configuration;
use clubdata::database::structs::database_connector::DatabaseConnector;
use clubdata::structs::Cli;

#[tracing::instrument(level = "debug")]
fn main() -> std::io::Result<()>
{
    let args = Cli::parse();

    let config = match Configuration::load_from_file(&args.config, args.create_config) {
        Ok(config) => Arc::new(config),
        Err(_) => exit(101)
    };

    if let Err(error) = setup_logging(&config) {
        eprintln!("{}", error);
        exit(1);
    }

    info!("{} - Version: {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let connector = match DatabaseConnector::new(config.clone()).await {
                Ok(connector) => connector,
                Err(error) => {
                    error!("[BOOT] No usable database backend: {}", error);
                    exit(1);
                }
            };
            info!("[BOOT] Active backend: {}", connector.engine().engine_name());

            if args.init_schema {
                match connector.init_schema().await {
                    Ok(_) => info!("[BOOT] Schema is up to date for {}", connector.engine().engine_name()),
                    Err(error) => {
                        error!("[BOOT] Schema initialization failed: {}", error);
                        exit(1);
                    }
                }
            }

            if let Err(error) = connector.ping().await {
                error!("[BOOT] Database ping failed: {}", error);
                exit(1);
            }
            info!("[BOOT] Database reachable, {} connection(s) in use", connector.active_connections());
        });

    Ok(())
}
