use clap::Parser;
use store_status::core::refresher::shutdown_signal;
use store_status::core::ConfigProvider;
use store_status::utils::{logger, validation::Validate};
use store_status::{
    build_renderers, CliConfig, Clock, FixedClock, RendererSet, Result, StatusError,
    StatusRefresher, StoreHoursConfig, SystemClock,
};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(config.verbose, config.log_json);

    tracing::info!("Starting store-status CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        fail(&e);
    }

    let hours = match config.store_hours() {
        Ok(hours) => hours,
        Err(e) => fail(&e),
    };

    let renderers = build_renderers(
        config.output_path(),
        !config.quiet,
        config.page.as_deref(),
        config.status_json.as_deref(),
    );
    if renderers.is_empty() {
        tracing::warn!("No renderers enabled, status will only be logged");
    } else {
        tracing::info!("Rendering to: {}", renderers.names().join(", "));
    }

    let result = match &config.at {
        Some(at) => match FixedClock::today_at(at) {
            Ok(clock) => run(&config, hours, clock, renderers).await,
            Err(e) => Err(e),
        },
        None => run(&config, hours, SystemClock, renderers).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Store status failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        fail(&e);
    }
}

async fn run<C: Clock>(
    config: &CliConfig,
    hours: StoreHoursConfig,
    clock: C,
    renderers: RendererSet,
) -> Result<()> {
    let refresher =
        StatusRefresher::new(hours, clock, renderers).with_period(config.refresh_interval())?;

    // 固定時間沒有重新計算的意義，只算一次
    if config.once || config.at.is_some() {
        let snap = refresher.refresh_once().await?;
        tracing::info!(
            "✅ Store is {} ({})",
            snap.status.classification,
            snap.status.display_text
        );
        return Ok(());
    }

    refresher.run_until(shutdown_signal()).await;
    Ok(())
}

fn fail(e: &StatusError) -> ! {
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code().max(1));
}
