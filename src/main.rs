use anyhow::Context;
use clap::Parser;
use property_etl::utils::{error::EtlError, logger, validation::Validate};
use property_etl::{CliConfig, EtlEngine, LocalStorage, Profile, PropertyPipeline, RowMapper};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    if config.list_profiles {
        for name in Profile::builtin_names() {
            let profile = Profile::builtin(name)
                .with_context(|| format!("missing built-in profile {}", name))?;
            println!(
                "{:<10} {} columns, title from information.{}",
                name,
                profile.columns.len(),
                profile.title_field
            );
        }
        return Ok(());
    }

    tracing::info!("Starting property-etl");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        fail(&e);
    }

    let profile = config.resolve_profile().unwrap_or_else(|e| fail(&e));
    tracing::info!(
        "Using profile '{}' ({} columns)",
        profile.name,
        profile.columns.len()
    );

    // 整個執行只取一次時間戳記
    let mapper = RowMapper::new(profile, config.run_started_at());
    let pipeline = PropertyPipeline::new(LocalStorage::default(), config, mapper);
    let engine = EtlEngine::new(pipeline);

    match engine.run() {
        Ok(report) => {
            tracing::info!("✅ Conversion completed successfully!");
            println!("✅ Processed {} properties", report.records_processed);
            println!("📁 Output: {}", report.output_path);
        }
        Err(e) => fail(&e),
    }

    Ok(())
}

fn fail(e: &EtlError) -> ! {
    tracing::error!(
        "❌ Conversion failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.exit_code().max(1));
}
