use clap::Parser;
use property_etl::utils::{error::EtlError, logger, validation::Validate};
use property_etl::{
    ConfigProvider, EtlEngine, LocalStorage, PropertyPipeline, RowMapper, TomlConfig,
};

#[derive(Parser)]
#[command(name = "toml-etl")]
#[command(about = "Property CSV export driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "etl-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Extract and transform only; nothing is written
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based property export");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let config = TomlConfig::from_file(&args.config).unwrap_or_else(|e| fail(&e));

    // 驗證配置
    if let Err(e) = config.validate() {
        fail(&e);
    }
    tracing::info!("✅ Configuration loaded and validated successfully");

    let profile = config.resolve_profile().unwrap_or_else(|e| fail(&e));
    display_config_summary(&config, &profile.name, profile.columns.len());

    let mapper = RowMapper::new(profile, config.run_started_at());
    let pipeline = PropertyPipeline::new(LocalStorage::default(), config, mapper);
    let engine = EtlEngine::new(pipeline);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no output will be written");
        let result = engine.preview().unwrap_or_else(|e| fail(&e));
        println!("{}", result.header);
        println!("{} rows would be written", result.row_count());
        return Ok(());
    }

    match engine.run() {
        Ok(report) => {
            tracing::info!("✅ Export completed successfully!");
            println!("✅ Processed {} properties", report.records_processed);
            println!("📁 Output: {}", report.output_path);
        }
        Err(e) => fail(&e),
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, profile: &str, columns: usize) {
    tracing::info!("📋 Pipeline: {}", config.pipeline.name);
    if let Some(description) = &config.pipeline.description {
        tracing::info!("   {}", description);
    }
    tracing::info!("   Input:   {}", config.input_path());
    tracing::info!("   Output:  {}", config.output_path());
    tracing::info!("   Profile: {} ({} columns)", profile, columns);
}

fn fail(e: &EtlError) -> ! {
    tracing::error!(
        "❌ Export failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.exit_code().max(1));
}
