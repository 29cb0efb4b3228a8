use anyhow::Context;
use clap::Parser;
use small_rack::utils::{logger, validation::Validate};
use small_rack::{CliConfig, ExampleServer, GlobalContext, RackHandler};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        eprintln!("❌ Configuration validation failed: {}", e);
        std::process::exit(1);
    }

    // 初始化日誌
    if config.json_logs() {
        logger::init_json_logger(config.logging.verbose);
    } else {
        logger::init_cli_logger(config.logging.verbose);
    }

    tracing::info!("Starting small-rack ({} app)", config.application.kind);
    tracing::debug!("Config: {:?}", config);

    let context = GlobalContext::new();
    let application = config.application.kind.build(&context);
    let handler = RackHandler::new(application).mounted_at(&config.server.mount)?;

    if config.application.register_global_context {
        handler.init(&context);
    } else {
        tracing::info!("Global context left unregistered");
    }

    let server = ExampleServer::start(handler, config.socket_addr()?)
        .await
        .context("failed to start server")?;
    println!("✅ Listening on {}", server.url("/")?);

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;

    tracing::info!("Shutting down");
    server.stop().await?;

    Ok(())
}
