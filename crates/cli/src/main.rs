//! Navigator CLI - turn-by-turn navigation simulator.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use navigator_core::{AuthorizationStatus, Coordinate, NavEvent};
use navigator_progress::RegionMatching;
use navigator_services::{
    from_fixtures, FixtureSet, Geocoder, InMemoryGeofence, LogAnnouncer, LogMapSurface,
    RouteProvider, ScriptedLocation,
};
use navigator_session::{NavigationSession, SessionConfig, SessionContext};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "navigator")]
#[command(about = "Turn-by-turn navigation simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Session configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a destination and print the route
    Route {
        /// Fixture file with places and routes
        #[arg(long)]
        fixtures: PathBuf,
        /// Start location as LAT,LON
        #[arg(long)]
        from: Coordinate,
        /// Destination name
        #[arg(long)]
        destination: String,
    },
    /// Drive a route and print every announcement
    Simulate {
        /// Fixture file with places and routes
        #[arg(long)]
        fixtures: PathBuf,
        /// Start location as LAT,LON
        #[arg(long)]
        from: Coordinate,
        /// Destination name
        #[arg(long)]
        destination: String,
        /// Only advance on the current step's region
        #[arg(long)]
        strict_regions: bool,
        /// Geofence radius in meters
        #[arg(long)]
        radius: Option<f64>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => SessionConfig::load(path)
            .await
            .with_context(|| format!("reading config {}", path.display()))?,
        None => SessionConfig::default(),
    };

    match cli.command {
        Commands::Route { fixtures, from, destination } => {
            let set = load_fixtures(&fixtures).await?;
            let (geocoder, routes) = from_fixtures(set);

            let target = geocoder.geocode(&destination).await?;
            let route = routes.request_route(from, target).await?;

            println!("Route to {} ({})", destination.trim(), target);
            for (i, step) in route.steps.iter().enumerate() {
                println!("  {:>2} | {:>8.1} m | {}", i, step.distance_m, step.instruction);
            }
            println!("Total: {:.1} m in {} steps", route.total_distance_m(), route.steps.len());
        }
        Commands::Simulate { fixtures, from, destination, strict_regions, radius } => {
            if strict_regions {
                config.tracker.region_matching = RegionMatching::Strict;
            }
            if let Some(radius) = radius {
                if !(radius > 0.0) {
                    bail!("radius must be positive, got {}", radius);
                }
                config.tracker.geofence_radius_m = radius;
            }
            simulate(config, &fixtures, from, destination).await?;
        }
    }

    Ok(())
}

async fn load_fixtures(path: &Path) -> Result<FixtureSet> {
    FixtureSet::load(path)
        .await
        .with_context(|| format!("loading fixtures {}", path.display()))
}

async fn simulate(
    config: SessionConfig,
    fixtures: &Path,
    from: Coordinate,
    destination: String,
) -> Result<()> {
    let (geocoder, routes) = from_fixtures(load_fixtures(fixtures).await?);
    let geofence = InMemoryGeofence::new();
    let announcer = LogAnnouncer::new();
    let location = ScriptedLocation::authorized_at(from);

    let ctx = SessionContext::new(
        Arc::new(geocoder),
        Arc::new(routes),
        Arc::new(geofence.clone()),
        Arc::new(announcer.clone()),
        Arc::new(LogMapSurface::new()),
        Arc::new(location.clone()),
    );
    let (mut session, _events, mut rx) = NavigationSession::new(ctx, config);

    session
        .handle(NavEvent::AuthorizationChanged(AuthorizationStatus::AuthorizedWhenInUse))
        .await;
    session.handle(NavEvent::DestinationSubmitted(destination)).await;
    if let Some(err) = session.last_error() {
        bail!("{}", err);
    }

    let resolved = rx.recv().await.context("event queue closed")?;
    session.handle(resolved).await;
    if let Some(err) = session.last_error() {
        bail!("{}", err);
    }
    println!("> {}", session.status_text());

    session.handle(NavEvent::StartStopPressed).await;

    // Drive from maneuver to maneuver, reporting every region the device is in.
    let waypoints: Vec<Coordinate> = session
        .route()
        .map(|r| r.steps.iter().map(|s| s.maneuver).collect())
        .unwrap_or_default();
    for point in waypoints {
        location.set_location(Some(point)).await;
        session.handle(NavEvent::LocationUpdated(point)).await;

        for id in geofence.regions_containing(&point).await {
            session.handle(NavEvent::RegionEntered(id)).await;
            println!("> {}", session.status_text());
        }
        if !session.tracker().is_active() {
            break;
        }
    }

    let snapshot = session.snapshot();
    session.handle(NavEvent::Shutdown).await;

    let spoken = announcer.texts().await.len();
    if snapshot.active {
        info!(
            cursor = snapshot.cursor,
            remaining_m = snapshot.remaining_distance_m,
            "Simulation ended before arrival"
        );
        bail!("did not reach the destination ({} announcements)", spoken);
    }
    println!("Arrived after {} announcements", spoken);
    Ok(())
}
