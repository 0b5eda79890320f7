mod assets;

use std::{
    convert::Infallible,
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::Result;
use axum::{
    extract::State,
    http::header,
    response::{
        sse::{Event, KeepAlive, Sse},
        Html, IntoResponse, Response,
    },
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::broadcast};
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};

use crate::{
    combat::CombatAction,
    event::LogEvent,
    scenario::Scenario,
    session::GameSession,
    snapshot::SessionSnapshot,
};

/// Commands the browser UI can dispatch. Mirrors the session's public
/// operations one-to-one; the UI never reaches into game state directly.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionRequest {
    Move { dx: i64, dy: i64 },
    Gather { index: usize },
    Search,
    Engage { index: usize },
    Combat { action: CombatAction },
    ToggleZoom,
}

#[derive(Serialize)]
pub struct ActionResponse {
    pub events: Vec<LogEvent>,
    pub snapshot: SessionSnapshot,
}

#[derive(Clone)]
struct AppState {
    session: Arc<Mutex<GameSession>>,
    broadcaster: broadcast::Sender<String>,
}

pub struct WebServerConfig {
    pub scenario: Scenario,
    pub host: String,
    pub port: u16,
}

pub async fn run(config: WebServerConfig) -> Result<()> {
    let WebServerConfig { scenario, host, port } = config;

    let scenario_name = scenario.name.clone();
    let session = Arc::new(Mutex::new(GameSession::new(&scenario)));
    let (tx, _) = broadcast::channel::<String>(256);

    let state = Arc::new(AppState {
        session,
        broadcaster: tx,
    });

    let router = Router::new()
        .route("/", get(index))
        .route("/styles.css", get(styles))
        .route("/app.js", get(script))
        .route("/api/state", get(current_state))
        .route("/api/action", post(apply_action))
        .route("/api/events", get(stream_events))
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("invalid address");

    println!(
        "wildgrid '{}' live at http://{}:{} (Ctrl+C to stop)",
        scenario_name, host, port
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    println!("Shutting down wildgrid...");
}

async fn index() -> Html<&'static str> {
    Html(assets::INDEX_HTML)
}

async fn styles() -> impl IntoResponse {
    Response::builder()
        .header(header::CONTENT_TYPE, "text/css; charset=utf-8")
        .body(assets::STYLES_CSS.to_string())
        .unwrap()
}

async fn script() -> impl IntoResponse {
    Response::builder()
        .header(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )
        .body(assets::APP_JS.to_string())
        .unwrap()
}

async fn current_state(State(state): State<Arc<AppState>>) -> Json<SessionSnapshot> {
    let session = state.session.lock().expect("session lock poisoned");
    Json(session.snapshot())
}

/// All actions funnel through the session mutex, so one action completes
/// before the next begins regardless of how many clients are connected.
async fn apply_action(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ActionRequest>,
) -> Json<ActionResponse> {
    let (events, snapshot) = {
        let mut session = state.session.lock().expect("session lock poisoned");
        let events = match request {
            ActionRequest::Move { dx, dy } => session.move_by(dx, dy),
            ActionRequest::Gather { index } => session.gather(index),
            ActionRequest::Search => session.search(),
            ActionRequest::Engage { index } => session.engage(index),
            ActionRequest::Combat { action } => session.combat_action(action),
            ActionRequest::ToggleZoom => session.toggle_map_zoom(),
        };
        (events, session.snapshot())
    };

    if let Ok(payload) = serde_json::to_string(&snapshot) {
        let _ = state.broadcaster.send(payload);
    }

    Json(ActionResponse { events, snapshot })
}

async fn stream_events(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.broadcaster.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|msg| match msg {
        Ok(payload) => Some(Ok(Event::default().data(payload))),
        Err(_) => None,
    });
    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(2))
            .text("keep-alive"),
    )
}
