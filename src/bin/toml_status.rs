use anyhow::Context;
use clap::Parser;
use store_status::core::refresher::shutdown_signal;
use store_status::core::ConfigProvider;
use store_status::utils::{logger, validation::Validate};
use store_status::{build_renderers, evaluate, StatusRefresher, SystemClock, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-status")]
#[command(about = "Store status badge driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "store-status.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Evaluate once and exit, overriding [refresh].run_once
    #[arg(long)]
    once: bool,

    /// Dry run - show the configuration and today's schedule without rendering
    #[arg(long)]
    dry_run: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_logger(args.verbose, args.log_json);

    tracing::info!("🚀 Starting TOML-based store status");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config file '{}'", args.config))?;

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code().max(1));
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be rendered");
        perform_dry_run(&config)?;
        return Ok(());
    }

    let hours = config.store_hours()?;
    let renderers = build_renderers(
        config.output_path(),
        config.console_enabled(),
        config.render.page.as_deref(),
        config.render.status_json.as_deref(),
    );
    let refresher = StatusRefresher::new(hours, SystemClock, renderers)
        .with_period(config.refresh_interval())?;

    if args.once || config.run_once() {
        let snap = refresher
            .refresh_once()
            .await
            .context("failed to render store status")?;
        tracing::info!(
            "✅ {} is {} ({})",
            config.store_name(),
            snap.status.classification,
            snap.status.display_text
        );
        return Ok(());
    }

    refresher.run_until(shutdown_signal()).await;
    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    let hours = &config.store.hours;
    println!("📋 Configuration Summary:");
    println!("  Store: {}", config.store_name());
    println!("  Hours: {:02}:00 - {:02}:00", hours.open_hour, hours.close_hour);
    match hours.warn_before_close_minutes {
        Some(minutes) => println!("  Closing soon: {} minutes before close", minutes),
        None => println!("  Closing soon: disabled"),
    }
    println!("  Locale: {}", hours.locale);
    println!("  Refresh: every {:?}", config.refresh_interval());
    println!("  Output: {}", config.output_path());

    if let Some(page) = &config.render.page {
        println!("  Page: {}", page);
    }
    if let Some(json) = &config.render.status_json {
        println!("  Status JSON: {}", json);
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

/// 列出今天每個整點的狀態
fn perform_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    let hours = config.store_hours()?;

    println!("🔍 Dry Run Analysis:");
    println!();
    println!("🕒 Hourly schedule:");
    for hour in 0..24 {
        let time = chrono::NaiveTime::from_hms_opt(hour, 0, 0)
            .context("hour out of range")?;
        let status = evaluate(&hours, &time);
        println!(
            "  {:02}:00  {:<13} {}",
            hour,
            status.classification.to_string(),
            status.display_text
        );
    }

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");

    Ok(())
}
