//! Print the heliocentric position of every catalog body at a given instant.
//!
//! Usage:
//!   cargo run --example print_positions -- [--catalog bodies.json] [--at "2025-12-19T00:00:00 UTC"] [--json]
//!   cargo run --example print_positions -- --trail 3I/ATLAS --from -180 --to 365 --step 2
//!
//! Set `RUST_LOG=debug` to see catalog loading and skipped trail samples.
use std::error::Error;
use std::str::FromStr;

use clap::Parser;
use hifitime::Epoch;
use log::info;

use orrery::catalog::BodyId;
use orrery::orrery::Orrery;
use orrery::time::to_continuous_day;

#[derive(Parser)]
#[command(name = "print_positions")]
#[command(about = "Heliocentric positions of planets and comets from orbital elements")]
struct Cli {
    /// JSON catalog of element records (built-in planets and 3I/ATLAS if omitted)
    #[arg(long)]
    catalog: Option<String>,

    /// UTC instant, e.g. "2025-12-19T00:00:00 UTC" (current time if omitted)
    #[arg(long)]
    at: Option<String>,

    /// Emit JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Sample the trail of this body instead of printing every position
    #[arg(long)]
    trail: Option<String>,

    /// Trail start, in days relative to the instant
    #[arg(long, default_value_t = -180.0, allow_negative_numbers = true)]
    from: f64,

    /// Trail end, in days relative to the instant
    #[arg(long, default_value_t = 365.0, allow_negative_numbers = true)]
    to: f64,

    /// Trail step in days
    #[arg(long, default_value_t = 2.0)]
    step: f64,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let orrery = match &cli.catalog {
        Some(path) => Orrery::from_json_file(path)?,
        None => Orrery::builtin(),
    };
    info!("{} bodies in catalog", orrery.catalog().len());

    let instant = match &cli.at {
        Some(text) => Epoch::from_str(text)?,
        None => Epoch::now()?,
    };
    let day = to_continuous_day(&instant);

    if let Some(name) = &cli.trail {
        let id = BodyId::from(name.as_str());
        let trail = orrery.trail(&id, day + cli.from, day + cli.to, cli.step)?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&trail)?);
        } else {
            println!("{} trail, {} samples", id, trail.len());
            for sample in &trail {
                let p = sample.position;
                println!(
                    "  JD {:.3}  x = {:>10.5}  y = {:>10.5}  z = {:>10.5}  r = {:>9.5} AU",
                    sample.day,
                    p.x,
                    p.y,
                    p.z,
                    p.norm()
                );
            }
        }
        return Ok(());
    }

    let positions = orrery.positions_at(&instant);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&positions)?);
        return Ok(());
    }

    println!("Positions at {instant} (JD {day:.5})");
    for body in &positions {
        let name = orrery
            .catalog()
            .get(&body.id)
            .map(|entry| entry.display_name())
            .unwrap_or(body.id.as_str());
        if body.available {
            let p = body.position;
            println!(
                "  {:<10}  x = {:>10.5}  y = {:>10.5}  z = {:>10.5}  r = {:>9.5} AU",
                name,
                p.x,
                p.y,
                p.z,
                p.norm()
            );
        } else {
            println!("  {name:<10}  unavailable");
        }
    }

    if let (Ok(d), Some(entry)) = (
        orrery.distance_between(&"3I/ATLAS".into(), &"earth".into(), &instant),
        orrery.catalog().get(&"3I/ATLAS".into()),
    ) {
        let approach = entry.metadata.closest_approach.as_deref().unwrap_or("unknown");
        println!("3I/ATLAS – Earth distance: {d:.5} AU (closest approach {approach})");
    }

    Ok(())
}
