//! Single binary web server: REST API over the tournament engine.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, ROSTER_PATH, SEEDING_PATH, SNAPSHOT_DIR, OUTCOME_STRATEGY.

use actix_web::{
    get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use worlds_swiss_sim::{
    advance, create_manual_round, full_reset, load_setup, lock_match_result, partial_reset,
    set_outcome_strategy, simulate_round, Entrant, MatchId, Matchup, OutcomeStrategyKind,
    SeedingConfig, ServiceError, SetupPaths, SnapshotStore, Tournament, TournamentError,
    TournamentId, TournamentService,
};

/// Live tournaments by ID, restored from snapshots on demand.
type AppState = Data<TournamentService>;

/// Roster and seeding loaded at startup; every new tournament starts from these.
struct Setup {
    roster: Vec<Entrant>,
    seeding: SeedingConfig,
    default_strategy: OutcomeStrategyKind,
}

/// Tournaments not accessed for this long are dropped from memory (not from disk).
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);
const EVICTION_INTERVAL: Duration = Duration::from_secs(30 * 60);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    outcome_strategy: Option<OutcomeStrategyKind>,
}

#[derive(Deserialize)]
struct LockBody {
    winner: Option<String>,
}

#[derive(Deserialize)]
struct ManualRoundBody {
    matchups: Vec<Matchup>,
}

#[derive(Deserialize)]
struct StrategyBody {
    outcome_strategy: OutcomeStrategyKind,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and match id (e.g. /api/tournaments/{id}/matches/{match_id}/lock)
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string(), "kind": e.kind() }))
}

/// Map a service result onto the HTTP response.
fn respond(result: Result<Tournament, ServiceError>) -> HttpResponse {
    match result {
        Ok(t) => HttpResponse::Ok().json(&t),
        Err(ServiceError::NotFound(_)) => {
            HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
        }
        Err(ServiceError::Rejected(e)) => error_response(&e),
        Err(e) => {
            log::error!("{}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() }))
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "worlds-swiss-sim",
    })
}

/// Create a new tournament from the loaded roster and seeding (returns it with id).
#[post("/api/tournaments")]
async fn api_create_tournament(
    service: AppState,
    setup: Data<Setup>,
    body: Option<Json<CreateTournamentBody>>,
) -> HttpResponse {
    let strategy = body
        .as_ref()
        .and_then(|b| b.outcome_strategy)
        .unwrap_or(setup.default_strategy);
    match Tournament::new(setup.roster.clone(), setup.seeding.clone(), strategy) {
        Ok(t) => respond(service.insert(t).await),
        Err(e) => error_response(&e),
    }
}

/// Get a tournament by id, restoring it from its snapshot if needed.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(service: AppState, path: Path<TournamentPath>) -> HttpResponse {
    respond(service.get(path.id).await)
}

/// One state machine step (draw a Swiss round, seed or play a knockout round).
#[post("/api/tournaments/{id}/advance")]
async fn api_advance(service: AppState, path: Path<TournamentPath>) -> HttpResponse {
    respond(service.apply(path.id, |t| advance(t, &mut rand::thread_rng())).await)
}

/// Simulate the pending round of the current stage.
#[post("/api/tournaments/{id}/simulate")]
async fn api_simulate(service: AppState, path: Path<TournamentPath>) -> HttpResponse {
    respond(service.apply(path.id, |t| simulate_round(t, &mut rand::thread_rng())).await)
}

/// Lock (`{"winner": "gen"}`) or unlock (`{"winner": null}`) a pending Swiss match.
#[put("/api/tournaments/{id}/matches/{match_id}/lock")]
async fn api_lock_match(
    service: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<LockBody>,
) -> HttpResponse {
    let match_id = path.match_id;
    respond(
        service
            .apply(path.id, |t| lock_match_result(t, match_id, body.winner.as_deref()))
            .await,
    )
}

/// Replace the pending Swiss round, or add the next one, with manual pairings.
#[post("/api/tournaments/{id}/rounds/manual")]
async fn api_manual_round(
    service: AppState,
    path: Path<TournamentPath>,
    body: Json<ManualRoundBody>,
) -> HttpResponse {
    respond(service.apply(path.id, |t| create_manual_round(t, &body.matchups)).await)
}

/// Switch the outcome model for later simulations.
#[put("/api/tournaments/{id}/strategy")]
async fn api_set_strategy(
    service: AppState,
    path: Path<TournamentPath>,
    body: Json<StrategyBody>,
) -> HttpResponse {
    let kind = body.outcome_strategy;
    respond(service.apply(path.id, |t| Ok(set_outcome_strategy(t, kind))).await)
}

/// Rewind to the latest manual or baseline Swiss round.
#[post("/api/tournaments/{id}/reset/partial")]
async fn api_partial_reset(service: AppState, path: Path<TournamentPath>) -> HttpResponse {
    respond(service.apply(path.id, partial_reset).await)
}

/// Start over with the same roster, seeding and id. The new snapshot overwrites the old file.
#[post("/api/tournaments/{id}/reset")]
async fn api_full_reset(service: AppState, path: Path<TournamentPath>) -> HttpResponse {
    respond(service.apply(path.id, full_reset).await)
}

/// Periodically evict idle tournaments; a later request restores them from disk.
fn spawn_cleanup(service: AppState) {
    actix_web::rt::spawn(async move {
        let mut ticker = actix_web::rt::time::interval(EVICTION_INTERVAL);
        loop {
            ticker.tick().await;
            match service.evict_idle(INACTIVITY_TIMEOUT) {
                Ok(0) => {}
                Ok(n) => log::info!("Evicted {} idle tournament(s) from memory", n),
                Err(e) => log::error!("Eviction skipped: {}", e),
            }
        }
    });
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn env_path(key: &str, default: &str) -> PathBuf {
    PathBuf::from(std::env::var(key).unwrap_or_else(|_| default.to_string()))
}

fn default_strategy() -> OutcomeStrategyKind {
    match std::env::var("OUTCOME_STRATEGY").as_deref() {
        Ok("region_weighted") => OutcomeStrategyKind::RegionWeighted,
        _ => OutcomeStrategyKind::Uniform,
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);

    let paths = SetupPaths {
        roster: env_path("ROSTER_PATH", "data/roster.csv"),
        seeding: env_path("SEEDING_PATH", "data/seeding.json"),
    };
    let (roster, seeding) = load_setup(&paths).map_err(|e| {
        log::error!("Cannot load tournament setup: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidData, e)
    })?;
    let setup = Data::new(Setup {
        roster,
        seeding,
        default_strategy: default_strategy(),
    });
    let service = Data::new(TournamentService::new(SnapshotStore::new(env_path(
        "SNAPSHOT_DIR",
        "snapshots",
    ))));
    spawn_cleanup(service.clone());

    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .app_data(setup.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_advance)
            .service(api_simulate)
            .service(api_lock_match)
            .service(api_manual_round)
            .service(api_set_strategy)
            .service(api_partial_reset)
            .service(api_full_reset)
    })
    .bind(bind)?
    .run()
    .await
}
