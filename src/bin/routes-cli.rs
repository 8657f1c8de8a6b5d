use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;

use axum::http::Request;
use clap::{Parser, Subcommand};
use serde_json::json;

use multi_base_urls::config::{apply_settings, load_settings, watcher::ConfigWatcher};
use multi_base_urls::http::{ApiClient, BaseUrlsInterceptor, BaseUrlsLayer, Intercepted};
use multi_base_urls::observability::{logging, metrics};
use multi_base_urls::routing::{EndpointId, Invocation, RoutingConfig};

#[derive(Parser)]
#[command(name = "routes-cli")]
#[command(about = "Inspect and live-reload base URL routing", long_about = None)]
struct Cli {
    /// Routing file (TOML).
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show where one endpoint call would be sent
    Resolve {
        /// Endpoint id, e.g. "Api::get_mock_result"
        #[arg(short, long)]
        endpoint: String,

        /// Call argument (repeatable, in order)
        #[arg(short, long = "arg")]
        args: Vec<String>,

        /// Client base URL the request is built from
        #[arg(short, long, default_value = "http://localhost/")]
        base_url: String,
    },
    /// Apply the routing file and keep it applied until Ctrl+C
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = load_settings(&cli.config)?;
    logging::init_logging(&settings.observability.log_level);

    let config = RoutingConfig::new();
    apply_settings(&config, &settings);

    match cli.command {
        Commands::Resolve {
            endpoint,
            args,
            base_url,
        } => {
            let endpoints: HashMap<EndpointId, _> = settings
                .endpoints()
                .into_iter()
                .map(|e| (e.id().clone(), e))
                .collect();
            let endpoint = endpoints
                .get(&EndpointId::from(endpoint.as_str()))
                .ok_or_else(|| format!("unknown endpoint {endpoint}"))?;

            let interceptor = BaseUrlsInterceptor::new(config);
            let client = ApiClient::new(&base_url, BaseUrlsLayer::from_interceptor(interceptor.clone()))?;
            let request_url = client.request_url(endpoint, &args)?;

            let mut request = Request::builder()
                .method(endpoint.method().clone())
                .uri(request_url.as_str())
                .extension(Invocation::new(endpoint.clone(), args))
                .body(())?;
            let outcome = interceptor.intercept(&mut request);

            let source = match &outcome {
                Intercepted::Routed(resolution) => resolution.base_url().map(|r| r.url.to_string()),
                _ => None,
            };
            let report = json!({
                "endpoint": endpoint.id().as_str(),
                "outcome": outcome.label(),
                "base_url": source,
                "request_url": request_url.as_str(),
                "routed_url": request.uri().to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Watch => {
            if settings.observability.metrics_enabled {
                match settings.observability.metrics_address.parse::<SocketAddr>() {
                    Ok(addr) => metrics::init_metrics(addr),
                    Err(_) => tracing::error!(
                        metrics_address = %settings.observability.metrics_address,
                        "Failed to parse metrics address"
                    ),
                }
            }

            let _watcher = ConfigWatcher::new(&cli.config, config.clone()).run()?;
            tokio::signal::ctrl_c().await?;
            tracing::info!(base_urls = ?config.base_urls().snapshot(), "Shutdown signal received");
        }
    }

    Ok(())
}
