use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use simgeo::api::create_router;
use simgeo::ScenarioConfig;

/// HTTP server converting coordinates for one scenario
#[derive(Parser)]
#[command(name = "api-server")]
struct Args {
    /// Scenario file (JSON)
    #[arg(short, long)]
    config: PathBuf,

    /// Address to listen on
    #[arg(short, long, default_value = "0.0.0.0:3000")]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(simgeo::logging::env_filter())
        .init();

    let args = Args::parse();
    let scenario = ScenarioConfig::from_path(&args.config)?;
    let pipeline = Arc::new(scenario.build_pipeline()?);
    let app = create_router(pipeline);

    let listener = tokio::net::TcpListener::bind(&args.bind).await?;

    println!("simgeo coordinate API");
    println!("Listening on http://{}", args.bind);
    println!("Scenario: {} (origin {})", args.config.display(), scenario.origin);
    println!();
    println!("Endpoints:");
    println!("  GET  /api/convert?latitude=<lat>&longitude=<lon>&altitude=<m>");
    println!("  GET  /api/inverse?x=<x>&y=<y>&z=<z>");
    println!("  POST /api/upload (multipart/form-data: csv file)");
    println!();

    axum::serve(listener, app).await?;
    Ok(())
}
