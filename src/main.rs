use clap::Parser;
use hello_bridge::utils::{logger, validation::Validate};
use hello_bridge::{BridgeCaller, BridgeError, BridgeSettings, CliConfig, NoopPrinter};

fn main() {
    let config = CliConfig::parse();

    logger::init_logger(config.log_format, config.verbose);

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config) {
        tracing::error!("Bridge failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

fn run(config: &CliConfig) -> Result<(), BridgeError> {
    config.validate()?;
    let settings: BridgeSettings = config.resolve()?;

    if config.dry_run {
        tracing::info!(
            "Dry run: would call {} in {} ({})",
            settings.symbol,
            settings.module,
            settings.module.file_name().to_string_lossy()
        );
        return BridgeCaller::new(NoopPrinter::new()).print();
    }

    let bridge = BridgeCaller::connect(&settings.module, &settings.symbol)?;
    bridge.print()
}
