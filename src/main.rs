use clap::Parser;
use interest_calc::config::cli::{Cli, Command};
use interest_calc::utils::format::format_currency;
use interest_calc::utils::logger::{self, LogFormat};
use interest_calc::utils::validation::Validate;
use interest_calc::{
    AppConfig, CalcError, CalculationEngine, CalculationResponse, CalculationResult, Engine,
    InterestCalculator,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logger::init(LogFormat::Compact, cli.verbose);

    // file (or defaults), then environment, then --engine
    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => fail(&e),
    };
    tracing::debug!("Loaded config: {:?}", config);

    // bad config never reaches the engine
    if let Err(e) = config.validate() {
        fail(&e);
    }

    let engine = match Engine::from_config(&config) {
        Ok(engine) => engine,
        Err(e) => fail(&e),
    };
    tracing::info!("Using {} engine", engine.name());
    let calculator = InterestCalculator::new(engine);

    // results on stdout, diagnostics on stderr
    match &cli.command {
        Command::Calculate { json, .. } => {
            let raw = cli.command.raw_input().unwrap_or_default();
            match calculator.calculate(&raw).await {
                Ok(result) if *json => {
                    let response = CalculationResponse::from_result(&result, config.display.decimals);
                    println!("{}", serde_json::to_string_pretty(&response)?);
                }
                Ok(result) => print_result(&result, &config),
                Err(e) => fail(&e),
            }
        }
        Command::Verify => match calculator.verify().await {
            Ok(check) if check.ok => println!("✅ {}", check.message),
            Ok(check) => {
                eprintln!("❌ {}", check.message);
                std::process::exit(1);
            }
            Err(e) => fail(&e),
        },
        Command::Health => {
            let report = calculator.health().await;
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.is_healthy() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn print_result(result: &CalculationResult, config: &AppConfig) {
    let symbol = &config.display.currency_symbol;
    let decimals = config.display.decimals;

    println!("Principal:         {}", format_currency(result.principal, symbol, decimals));
    println!("Rate:              {}%", result.rate);
    println!("Time:              {} years", result.time);
    println!("Simple Interest:   {}", format_currency(result.simple_interest, symbol, decimals));
    println!("Compound Interest: {}", format_currency(result.compound_interest, symbol, decimals));
    println!("Total Amount:      {}", format_currency(result.total_amount(), symbol, decimals));
}

fn fail(e: &CalcError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    match e {
        CalcError::ValidationError(errors) => {
            for (field, message) in errors.iter() {
                eprintln!("❌ {}: {}", field, message);
            }
        }
        _ => eprintln!("❌ {}", e.user_friendly_message()),
    }
    eprintln!("💡 {}", e.recovery_suggestion());

    // exit code follows severity
    std::process::exit(e.severity().exit_code());
}
