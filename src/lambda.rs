use interest_calc::utils::logger::{self, LogFormat};
use interest_calc::{AppConfig, Engine, InterestCalculator, ServiceRequest, ServiceResponse};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

async fn function_handler(event: LambdaEvent<ServiceRequest>) -> Result<ServiceResponse, Error> {
    tracing::info!(action = ?event.payload.action, "Handling interest calculator event");

    // config comes from the function's environment only
    let config = AppConfig::from_env();
    config.validate_config()?;

    let engine = Engine::from_config(&config)?;
    let calculator = InterestCalculator::new(engine);

    // validation errors are a normal response; the rest fail the invocation
    match calculator.handle(&event.payload, config.display.decimals).await {
        Ok(response) => Ok(response),
        Err(e) => {
            tracing::error!(
                "Request failed: {} (Category: {:?})",
                e,
                e.category()
            );
            Err(e.into())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init(LogFormat::Json, false);

    run(service_fn(function_handler)).await
}
