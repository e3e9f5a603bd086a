use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use simgeo::{Conversion, Result, ScenarioConfig};

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Converts the destinations of a scenario file into simulator coordinates
#[derive(Parser)]
#[command(name = "simgeo", version)]
struct Args {
    /// Scenario file (JSON)
    #[arg(short, long)]
    config: PathBuf,

    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Serialize)]
struct Report<'a> {
    name: Option<&'a str>,
    conversion: Option<Conversion>,
    error: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(simgeo::logging::env_filter())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let scenario = ScenarioConfig::from_path(&args.config)?;
    let pipeline = scenario.build_pipeline()?;

    let reports: Vec<Report> = scenario
        .destinations
        .iter()
        .map(|waypoint| match pipeline.convert(waypoint.point) {
            Ok(conversion) => Report {
                name: waypoint.name.as_deref(),
                conversion: Some(conversion),
                error: None,
            },
            Err(e) => Report {
                name: waypoint.name.as_deref(),
                conversion: None,
                error: Some(e.to_string()),
            },
        })
        .collect();

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Text => print_text(&scenario, &reports),
    }

    Ok(())
}

fn print_text(scenario: &ScenarioConfig, reports: &[Report]) {
    println!("simgeo - {} -> simulator frame\n", scenario.srid);
    println!("Origin:       {}", scenario.origin);
    println!("Player start: {}", scenario.player_start);
    println!("Units:        {}", scenario.units.name());

    if reports.is_empty() {
        println!("\nNo destinations in scenario.");
        return;
    }

    for (i, report) in reports.iter().enumerate() {
        println!("\n{}", "=".repeat(80));
        println!("{}. {}", i + 1, report.name.unwrap_or("destination"));

        match (&report.conversion, &report.error) {
            (Some(c), _) => {
                println!("   Destination:        {}", c.destination);
                println!("   Bearing / distance: {} / {:.3} m", c.bearing, c.distance);
                println!(
                    "   Corrected:          {} / {:.3} m ({:?} scale)",
                    c.correction.bearing, c.correction.distance, c.correction.window
                );
                println!("   Corrected point:    {}", c.corrected);
                println!("   Projected:          ({:.3}, {:.3}, {:.3})", c.projected.x, c.projected.y, c.projected.z);
                println!("   Offset from start:  {}", c.offset);
                println!("   Simulator coords:   {}", c.sim);
            }
            (None, Some(e)) => println!("   Error: {}", e),
            (None, None) => {}
        }
    }
    println!("{}", "=".repeat(80));
}
