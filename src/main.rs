use clap::Parser;
use periodic_etl::core::ConfigProvider;
use periodic_etl::utils::{logger, validation::Validate};
use periodic_etl::{AppConfig, CliConfig, EtlEngine, EtlError, EtlPipeline, Scheduler};

fn exit_on_startup_error(context: &str, e: &EtlError) -> ! {
    tracing::error!("❌ {}: {} (Category: {:?})", context, e, e.category());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config: AppConfig = match cli.load_config() {
        Ok(config) => config,
        Err(e) => exit_on_startup_error("Failed to load configuration", &e),
    };

    if let Err(e) = config.validate() {
        exit_on_startup_error("Configuration validation failed", &e);
    }

    if let Err(e) =
        logger::init_file_logger(&config.logging.file, &config.logging.level, cli.verbose)
    {
        exit_on_startup_error("Failed to open log file", &e);
    }

    tracing::info!("🚀 Starting {}", config.pipeline.name);
    if cli.verbose {
        tracing::debug!("Config: {:?}", config);
    }

    let interval = config.run_interval();
    let pipeline = EtlPipeline::from_config(config)?;
    let engine = EtlEngine::new(pipeline);

    if cli.once {
        let summary = engine.run().await;
        tracing::info!("✅ Single run finished: {:?}", summary);
        return Ok(());
    }

    Scheduler::new(engine, interval).run_forever().await;
    Ok(())
}
