use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use carecall::api::{create_router, AppState};
use carecall::charts::{ChartSlot, TextBackend};
use carecall::config::{Config, LogFormat};
use carecall::controller::{ActionOutcome, DashboardController};
use carecall::store::{HttpVisitStore, VisitStore};
use carecall::view::{PatientCard, VisitHighlights};

#[derive(Parser)]
#[command(name = "carecall")]
#[command(about = "Care-call dashboard: visit analytics and patient views")]
struct Args {
    /// Record store base URL (overrides CARECALL_STORE_URL)
    #[arg(long, global = true)]
    store_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the dashboard headline counts
    Stats,
    /// List patients
    Patients,
    /// Print a patient's visit analytics, charts and recent visits
    Report {
        patient_id: String,
        /// Number of recent visits to list
        #[arg(long, default_value_t = 5)]
        recent: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    let mut config = Config::from_env();
    if let Some(url) = args.store_url {
        config.store.base_url = url;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "carecall=info,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    match config.logging.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }

    config.validate()?;
    let store: Arc<dyn VisitStore> = Arc::new(HttpVisitStore::new(&config.store)?);

    match args.command.unwrap_or(Command::Serve {
        host: None,
        port: None,
    }) {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config, store).await
        }
        Command::Stats => print_stats(store).await,
        Command::Patients => print_patients(store).await,
        Command::Report { patient_id, recent } => print_report(store, &patient_id, recent).await,
    }
}

async fn serve(config: Config, store: Arc<dyn VisitStore>) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!(store = %config.store.base_url, "Using record store");

    let state = AppState::new(config, store);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Server listening on {}", addr);
    tracing::info!("API docs available at http://{}/api/v1/docs", addr);

    let cancel_token = CancellationToken::new();
    tokio::spawn(shutdown_signal(cancel_token.clone()));

    axum::serve(listener, app)
        .with_graceful_shutdown(cancel_token.cancelled_owned())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn print_stats(store: Arc<dyn VisitStore>) -> anyhow::Result<()> {
    let stats = store.dashboard_stats().await?;
    println!("Total patients:     {}", stats.total_patients);
    println!("Total visits:       {}", stats.total_visits);
    println!("Recent visits:      {}", stats.recent_visits);
    println!("Needs follow-up:    {}", stats.needs_follow_up);
    println!("High-risk patients: {}", stats.high_risk_patients);
    Ok(())
}

async fn print_patients(store: Arc<dyn VisitStore>) -> anyhow::Result<()> {
    let patients = store.list_patients().await?;
    for card in patients.iter().map(PatientCard::from) {
        let age = card.age.map(|a| a.to_string()).unwrap_or_else(|| "?".into());
        println!(
            "{:<26} {:<24} age {:>3}  {}",
            card.id,
            card.name,
            age,
            card.conditions.join(", ")
        );
    }
    Ok(())
}

async fn print_report(
    store: Arc<dyn VisitStore>,
    patient_id: &str,
    recent: usize,
) -> anyhow::Result<()> {
    let controller = DashboardController::new(store, TextBackend::default());

    if controller.load_dashboard().await != ActionOutcome::Applied {
        tracing::warn!("Patient list unavailable, reporting by id only");
    }
    if controller.view_visits(patient_id).await != ActionOutcome::Applied {
        anyhow::bail!("Could not load visits for patient {patient_id}");
    }

    let state = controller.snapshot();
    println!("{} ({patient_id})", state.selected_name().unwrap_or("Unknown"));
    println!("Visits: {}", state.visits.len());

    match &state.analytics {
        Some(a) => {
            println!("Average pain:        {:.1}/10", a.avg_pain);
            println!("Medication adherence: {}%", a.medication_adherence);
            println!("Average mood:        {:.1}/5", a.avg_mood);
            println!("Most common food:    {}", a.most_common_food);
            println!("Most common sleep:   {}", a.most_common_sleep);
            println!("High-risk visits:    {}%", a.high_risk_percentage);
            println!("Latest risk:         {}", a.latest_risk_level);
            println!();
            controller.with_charts(|charts| {
                for slot in ChartSlot::ALL {
                    let output = charts
                        .handle(slot)
                        .and_then(|h| charts.backend().output(*h));
                    if let Some(output) = output {
                        println!("{output}");
                    }
                }
            });
        }
        None => println!("Analytics need at least two visits."),
    }

    println!("Recent visits:");
    for visit in state.visits.iter().take(recent) {
        let card = VisitHighlights::build(visit);
        let line: Vec<String> = card
            .highlights
            .iter()
            .map(|h| match h.status {
                Some(status) => format!("{}: {} [{status}]", h.label, h.value),
                None => format!("{}: {}", h.label, h.value),
            })
            .collect();
        println!(
            "  {}  {}",
            card.recorded_at.as_deref().unwrap_or("undated"),
            line.join(" | ")
        );
    }
    Ok(())
}

async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, stopping server...");
    cancel_token.cancel();
}
