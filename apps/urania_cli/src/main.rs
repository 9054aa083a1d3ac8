use anyhow::Context;
use clap::Parser;
use log::info;
use std::fs;
use std::path::PathBuf;
use urania::ephemeris::types::{Body, EphemerisMode};
use urania::ephemeris::EphemerisIngestor;
use urania::{ChartEngine, ChartRequest};

#[derive(Parser, Debug)]
#[command(author, version, about = "Compute an astrological chart and print it as JSON")]
struct Args {
    /// Local civil date, YYYY-MM-DD
    #[arg(long)]
    date: String,

    /// Local civil time, HH:MM or HH:MM:SS
    #[arg(long)]
    time: String,

    /// Geographic latitude in degrees, north positive
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Geographic longitude in degrees, east positive
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// UTC offset (+05:30) or IANA zone name (Europe/Paris)
    #[arg(long)]
    zone: Option<String>,

    /// Comma separated body names; defaults to the configured list
    #[arg(long, value_delimiter = ',')]
    bodies: Option<Vec<String>>,

    #[arg(long)]
    house_system: Option<String>,

    /// Settings file; defaults to configs/urania.toml when present
    #[arg(long)]
    config: Option<PathBuf>,

    /// HORIZONS observer table ($$SOE .. $$EOE) with apparent RA/Dec rows
    #[arg(long)]
    horizons: Option<PathBuf>,

    /// Body the HORIZONS table belongs to
    #[arg(long, default_value = "sun")]
    horizons_body: String,

    /// Single-line JSON instead of pretty printed
    #[arg(long)]
    compact: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => urania_config::load_chart_settings_from(path)?,
        None => urania_config::load_chart_settings()?,
    };

    let ingestor = match &args.horizons {
        Some(path) => {
            let body: Body = args.horizons_body.parse()?;
            let text = fs::read_to_string(path)
                .with_context(|| format!("Could not read HORIZONS table {}", path.display()))?;
            let mut ingestor = EphemerisIngestor::new();
            let rows = ingestor
                .ingest_horizons(body, &text)
                .with_context(|| format!("in {}", path.display()))?;
            info!("Loaded {} rows for {} from {}", rows, body, path.display());
            settings.ephemeris = EphemerisMode::Ingested;
            Some(ingestor)
        }
        None => None,
    };

    let mut engine = ChartEngine::new(settings);
    if let Some(ingestor) = ingestor {
        engine = engine.with_ingestor(ingestor);
    }

    let mut request = ChartRequest::new(&args.date, &args.time, args.lat, args.lon);
    request.zone = args.zone;
    request.bodies = args.bodies;
    request.house_system = args.house_system;

    let chart = engine.calculate(&request)?;
    let json = if args.compact {
        serde_json::to_string(&chart)?
    } else {
        chart.to_json()?
    };
    println!("{}", json);
    Ok(())
}
