use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use super::handlers;
use crate::tts::SynthesisHandler;

pub struct AppState {
    pub synthesizer: SynthesisHandler,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/synthesize", post(handlers::synthesize))
        .route("/options", get(handlers::options))
        .route("/health", get(handlers::health));

    let finished = ServeDir::new(state.synthesizer.output_dir());
    let silence = ServeFile::new(state.synthesizer.silence_file());

    Router::new()
        .nest("/api", api_routes)
        .nest_service("/finish", finished)
        .route_service("/silence", silence)
        .fallback_service(ServeDir::new("static").append_index_html_on_directories(true))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
