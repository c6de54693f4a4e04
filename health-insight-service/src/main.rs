use health_insight_service::{AppState, LogFormat, ServiceConfig, build_router};
use prompt_flow::OpenRouterGenerator;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing from `RUST_LOG` and the configured output format
fn init_tracing(format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "health_insight_service=debug,prompt_flow=debug,tower_http=debug".into()
    });

    match format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true),
                )
                .init();
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match ServiceConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::Json);
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    init_tracing(config.log_format);

    let generator = Arc::new(OpenRouterGenerator::new(&config.openrouter_api_key));
    let app = build_router(AppState::new(generator, config.model_id.clone()));

    let listener = TcpListener::bind(config.bind_address()?).await?;
    let addr = listener.local_addr()?;

    info!("Health Insight Service starting on {}", addr);
    info!(model = %config.model_id, "Using completion model");
    info!("Health check endpoint: http://{}/health", addr);
    info!("Analysis endpoints: POST http://{}/api/analyze-{{activity,medical,symptoms}}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
