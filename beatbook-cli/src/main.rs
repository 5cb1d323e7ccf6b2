use anyhow::{bail, Context, Result};
use beatbook_core::{
    distance_km, local_weekday, recovery_score, GeoPoint, Snapshot, Urgency,
};
use beatbook_ingest::ingest;
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod fetch;
mod state;

#[derive(Parser, Debug)]
#[command(name = "beatbook", version, about = "Field-collections beat planner")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the account feed and rebuild the local snapshot
    Fetch {
        /// Feed URL (defaults to the configured one)
        #[arg(long)]
        url: Option<String>,
    },

    /// Show the ranked collection list from the last snapshot
    List {
        /// Limit number of accounts printed (default: 20)
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Show today's beat route with distances
    Route,

    /// Export the ranked list as CSV
    Export {
        /// Output path (default: ./beatbook-ranked.csv)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Write a default ~/.beatbook/config.toml
    InitConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Fetch { url } => fetch_and_build(url).await?,
        Command::List { limit } => list(limit)?,
        Command::Route => route()?,
        Command::Export { out } => {
            export(out.unwrap_or_else(|| PathBuf::from("beatbook-ranked.csv")))?
        }
        Command::InitConfig => config::init_config()?,
    }

    Ok(())
}

/// One refresh cycle: fetch, ingest, assemble, and only then publish to the
/// cache. A failure anywhere leaves the previous snapshot untouched.
async fn fetch_and_build(url: Option<String>) -> Result<()> {
    let cfg = config::load_config()?;
    let url = url.unwrap_or_else(|| cfg.feed.url.clone());

    let text = fetch::fetch_feed(&url).await?;

    let now = Utc::now();
    let beat_day = local_weekday(now, &cfg.agent.timezone)?;
    let records = ingest(&text, &cfg.schema);
    let snapshot = Snapshot::build_with_speed(
        records,
        now,
        beat_day,
        &cfg.calendar,
        cfg.origin(),
        cfg.routing.avg_speed_kmh,
    );

    state::write_snapshot(&snapshot)?;

    println!(
        "Fetched {} accounts; {} on today's ({:?}) beat, {:.1} km loop.",
        snapshot.ranked.len(),
        snapshot.route.len(),
        snapshot.beat_day,
        snapshot.summary.total_distance_km,
    );
    println!("Snapshot: {}", state::snapshot_path()?.display());
    Ok(())
}

fn load_snapshot() -> Result<Snapshot> {
    match state::read_snapshot()? {
        Some(s) => Ok(s),
        None => bail!("No snapshot yet. Run: beatbook fetch"),
    }
}

fn list(limit: usize) -> Result<()> {
    let snap = load_snapshot()?;
    let now = snap.generated_at;

    println!(
        "# Collection priority ({} accounts, snapshot {})\n",
        snap.ranked.len(),
        now.format("%Y-%m-%d %H:%M UTC"),
    );

    for c in snap.ranked.iter().take(limit) {
        println!(
            "{:>7.1} [{:<11}] {} | {} | due {:.0} | {}",
            recovery_score(c, now),
            Urgency::classify(c, now).label(),
            c.name,
            c.area,
            c.due,
            if c.phone.is_empty() { "-" } else { &c.phone },
        );
    }
    Ok(())
}

fn route() -> Result<()> {
    let snap = load_snapshot()?;
    // Render from the origin the snapshot was measured against, not the
    // current config's; the two can drift between fetch and display.
    let origin = snap.origin;

    println!("# Beat for {:?}: {} stops\n", snap.beat_day, snap.route.len());
    if snap.route.is_empty() {
        println!("No areas scheduled today.");
        return Ok(());
    }

    // Same walking rule as the summary: legs only between located stops.
    let mut prev = origin;
    for (i, stop) in snap.route.iter().enumerate() {
        let leg = if stop.has_location() {
            let here = GeoPoint::new(stop.lat, stop.lng);
            let d = distance_km(prev, here);
            prev = here;
            format!("{d:>6.1} km")
        } else {
            "     ? km".to_string()
        };
        println!("{:>2}. {} | {} | {}", i + 1, leg, stop.name, stop.area);
    }
    println!("    {:>6.1} km | back to base", distance_km(prev, origin));

    println!(
        "\nTotal {:.1} km, about {:.1} h on the road.",
        snap.summary.total_distance_km, snap.summary.estimated_travel_hours,
    );
    Ok(())
}

fn export(out: PathBuf) -> Result<()> {
    let snap = load_snapshot()?;
    let now = snap.generated_at;

    let mut wtr = csv::Writer::from_path(&out)
        .with_context(|| format!("create {}", out.display()))?;
    wtr.write_record([
        "score", "urgency", "name", "area", "route", "status", "due", "phone",
        "last_sale_date",
    ])?;
    for c in &snap.ranked {
        wtr.write_record([
            format!("{:.3}", recovery_score(c, now)),
            Urgency::classify(c, now).label().to_string(),
            c.name.clone(),
            c.area.clone(),
            c.route.clone(),
            c.status.label().to_string(),
            format!("{:.2}", c.due),
            c.phone.clone(),
            c.last_sale_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;

    println!("Wrote {} accounts to {}", snap.ranked.len(), out.display());
    Ok(())
}
