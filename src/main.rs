use clap::Parser;
use imessage_filter::utils::{logger, validation::Validate};
use imessage_filter::{
    AvailabilityPipeline, BatchChecker, BatchEngine, CheckError, CliConfig, Credentials,
    HttpAvailabilityClient, LocalStorage, SettingsFile,
};

/// 所有致命錯誤都以 exit code 1 結束，且不會留下部分輸出
fn fail(e: &CheckError) -> ! {
    tracing::error!("❌ {} (Category: {:?})", e, e.category());
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("{}", e.user_friendly_message());
    std::process::exit(1);
}

fn build_engine(
    config: &CliConfig,
) -> Result<BatchEngine<AvailabilityPipeline<LocalStorage, HttpAvailabilityClient>>, CheckError> {
    // 先讀 credentials，缺檔就不必再往下
    let credentials = Credentials::load(&config.credentials_dir)?;
    credentials.validate()?;

    let settings = match &config.config {
        Some(path) => {
            tracing::info!("Loading settings from {}", path.display());
            SettingsFile::from_file(path)?
        }
        None => SettingsFile::default(),
    };
    settings.validate()?;

    let pacing = settings.pacing_policy()?;
    tracing::debug!(
        "Pacing between {:?} and {:?} per number",
        pacing.min_delay(),
        pacing.max_delay()
    );

    let client = HttpAvailabilityClient::new(&credentials, &settings.service_settings())?;
    let checker = BatchChecker::new(client, pacing);
    let pipeline = AvailabilityPipeline::new(
        LocalStorage::current_dir(),
        checker,
        config.input_csv.clone(),
        config.output.clone(),
    );

    Ok(BatchEngine::new(pipeline))
}

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting imessage-filter");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        fail(&e);
    }

    let engine = match build_engine(&config) {
        Ok(engine) => engine,
        Err(e) => fail(&e),
    };

    match engine.run().await {
        Ok(summary) => {
            tracing::info!("✅ Availability check completed");
            println!("Wrote iMessage-enabled numbers to {}", summary.output_path);
        }
        Err(e) => fail(&e),
    }
}
