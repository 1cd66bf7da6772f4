use clap::Parser;
use suruga_order_sheet::config::LogFormat;
use suruga_order_sheet::core::ConfigProvider;
use suruga_order_sheet::utils::error::ErrorSeverity;
use suruga_order_sheet::utils::{logger, validation::Validate};
use suruga_order_sheet::{
    CliConfig, EtlEngine, LocalStorage, OrderConfig, OrderError, OrderPipeline, Prompter,
};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    tracing::info!("Starting suruga-order-sheet");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 載入並驗證配置
    let config = match cli.load_order_config().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };

    // 使用者輸入
    let inputs = {
        let stdin = std::io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());
        match prompter.collect(
            cli.first_line.as_deref(),
            cli.gbp_paid.as_deref(),
            cli.yen_paid.as_deref(),
        ) {
            Ok(inputs) => inputs,
            Err(e) => exit_with(e),
        }
    };
    tracing::debug!("Inputs: {:?}", inputs);

    if cli.dry_run {
        display_config_summary(&config);
    }

    let storage = LocalStorage::new(".".to_string());
    let pipeline = match OrderPipeline::new(storage, config, inputs) {
        Ok(pipeline) => pipeline,
        Err(e) => exit_with(e),
    };
    let engine = EtlEngine::new(pipeline);

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no file will be written");
        match engine.dry_run_report() {
            Ok(report) => println!("{}", report),
            Err(e) => exit_with(e),
        }
        return Ok(());
    }

    match engine.run() {
        Ok(summary) => {
            println!("\nSuccess! Processed {} items.", summary.item_count);
            println!("File saved as: {}", summary.output_path);
        }
        Err(e) => exit_with(e),
    }

    Ok(())
}

fn exit_with(e: OrderError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("{}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

fn display_config_summary(config: &OrderConfig) {
    println!("📋 Configuration Summary:");
    println!("  Input: {}", config.input_path());
    println!("  Base URL: {}", config.base_url());
    println!("  Currency code: {}", config.currency_code());
    println!("  Output directory: {}", config.output_dir());
    println!("  File prefix: {}", config.file_prefix());
    println!("  Yen adjustment: {}", config.yen_adjustment());
    println!("  🔍 DRY RUN MODE ENABLED");
    println!();
}
