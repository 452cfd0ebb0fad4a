use clap::Parser;
use followers_export::config::cli::Command;
use followers_export::utils::error::{ExportError, ErrorSeverity};
use followers_export::utils::{logger, validation::Validate};
use followers_export::{
    CliConfig, ExportConfig, ExportEngine, FreshPipeline, LinkedInClient, LocalStorage,
    ReplayPipeline,
};

async fn run(cli: &CliConfig, config: ExportConfig) -> Result<String, ExportError> {
    let storage = LocalStorage::new(config.pages_dir.clone());

    match cli.command {
        Command::Fetch(_) => {
            config.validate_for_fetch()?;
            let client = LinkedInClient::new(&config)?;
            let pipeline = FreshPipeline::new(storage, client, config)?;
            ExportEngine::new(pipeline).run().await
        }
        Command::Replay(_) => {
            config.validate()?;
            let pipeline = ReplayPipeline::new(storage, config)?;
            ExportEngine::new(pipeline).run().await
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("LinkedIn Followers Export");

    let result = match cli.export_config() {
        Ok(config) => {
            tracing::debug!("Export config: {:?}", config);
            run(&cli, config).await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(output_path) => {
            tracing::info!("✅ Export completed successfully!");
            println!("✅ Followers exported to {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Export failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low | ErrorSeverity::High => 1,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
