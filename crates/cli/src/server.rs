use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use prometheus_client::encoding::text::encode;
use prometheus_client::registry::Registry;
use tracing::{error, info};

const OPENMETRICS_CONTENT_TYPE: &str =
    "application/openmetrics-text; version=1.0.0; charset=utf-8";

#[derive(Clone)]
struct AppState {
    registry: Arc<Registry>,
    landing: String,
}

pub async fn start_web_server(
    bind_addr: SocketAddr,
    telemetry_path: String,
    registry: Arc<Registry>,
) -> anyhow::Result<()> {
    info!(
        bind_address = %bind_addr,
        telemetry_path = %telemetry_path,
        "starting web server"
    );

    let app = create_app(&telemetry_path, registry);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn create_app(telemetry_path: &str, registry: Arc<Registry>) -> Router {
    let state = AppState {
        registry,
        landing: landing_page(telemetry_path),
    };

    Router::new()
        .route("/", get(index_handler))
        .route(telemetry_path, get(metrics_handler))
        .with_state(state)
}

async fn index_handler(State(state): State<AppState>) -> Html<String> {
    Html(state.landing.clone())
}

async fn metrics_handler(State(state): State<AppState>) -> Response {
    // Collection does blocking DNS and file I/O; keep it off the async
    // worker threads.
    let registry = state.registry.clone();
    let encoded = tokio::task::spawn_blocking(move || {
        let mut buffer = String::new();
        encode(&mut buffer, &registry).map(|_| buffer)
    })
    .await;

    match encoded {
        Ok(Ok(body)) => (
            [(header::CONTENT_TYPE, OPENMETRICS_CONTENT_TYPE)],
            body,
        )
            .into_response(),
        Ok(Err(err)) => {
            error!(%err, "failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
        Err(err) => {
            error!(%err, "metrics collection task failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn landing_page(telemetry_path: &str) -> String {
    format!(
        "<html>\n\
         <head><title>Masqstat Exporter</title></head>\n\
         <body>\n\
         <h1>Masqstat Exporter</h1>\n\
         <p><a href=\"{}\">Metrics</a></p>\n\
         </body>\n\
         </html>\n",
        telemetry_path
    )
}
