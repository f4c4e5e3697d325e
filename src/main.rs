mod core;
mod features;
mod modules;
mod shared;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{http::StatusCode, middleware::from_fn, routing::get, Router};
use socket2::{Domain, Protocol, Socket, TcpKeepalive, Type};
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::{Config, SwaggerConfig};
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::candidates::{routes as candidates_routes, CandidateService};
use crate::features::dashboard::{routes as dashboard_routes, DashboardService};
use crate::features::sarans::{routes as sarans_routes, SaranService};
use crate::modules::gateway::{DataGateway, PgGateway};
use crate::modules::storage::{MinIOClient, ObjectStorage};

fn main() -> anyhow::Result<()> {
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|n| n.parse().ok())
        .or_else(|| std::thread::available_parallelism().ok().map(|n| n.get()))
        .unwrap_or(2);

    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()?
        .block_on(serve(worker_threads))
}

fn init_tracing() {
    // .env may carry RUST_LOG, so it is read before the subscriber is built
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(worker_threads: usize) -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env().map_err(anyhow::Error::msg)?;
    tracing::info!(
        worker_threads,
        candidate_form = %config.election.candidate_form,
        "Configuration loaded"
    );

    let pool = database::connect(&config.database).await?;
    let gateway: Arc<dyn DataGateway> = Arc::new(PgGateway::new(pool));
    let storage: Arc<dyn ObjectStorage> = Arc::new(
        MinIOClient::new(config.storage.clone())
            .await
            .context("object storage unavailable")?,
    );

    let app = app(&config, gateway, storage);
    let listener = bind(&config.app.server_address())?;

    tracing::info!(
        "Rukun Regensi listening on http://{}, docs at /swagger-ui/",
        config.app.server_address()
    );
    axum::serve(listener, app).await?;

    Ok(())
}

fn app(
    config: &Config,
    gateway: Arc<dyn DataGateway>,
    storage: Arc<dyn ObjectStorage>,
) -> Router {
    let variant = config.election.candidate_form;

    let candidates = Arc::new(CandidateService::new(gateway.clone(), storage, variant));
    let sarans = Arc::new(SaranService::new(gateway.clone()));
    let dashboard = Arc::new(DashboardService::new(gateway, variant));

    Router::new()
        .merge(docs(&config.swagger))
        .route("/health", get(|| async { StatusCode::OK }))
        .merge(candidates_routes::routes(
            candidates,
            config.app.max_request_body_size,
        ))
        .merge(sarans_routes::routes(sarans))
        .merge(dashboard_routes::routes(dashboard))
        .layer(middleware::cors_layer(&config.app.cors_allowed_origins))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Outermost, so the trace span already sees the id
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}

/// Swagger UI, behind basic auth when credentials are configured
fn docs(swagger: &SwaggerConfig) -> Router {
    let mut openapi = ApiDoc::openapi();
    SwaggerInfoModifier {
        title: swagger.title.clone(),
        version: swagger.version.clone(),
        description: swagger.description.clone(),
    }
    .modify(&mut openapi);

    let ui = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi));

    match swagger.credentials() {
        Some(credentials) => ui.layer(from_fn(middleware::basic_auth_middleware(Arc::new(
            credentials,
        )))),
        None => {
            tracing::warn!("SWAGGER_USERNAME/SWAGGER_PASSWORD unset, API docs are public");
            ui
        }
    }
}

fn bind(addr: &str) -> anyhow::Result<tokio::net::TcpListener> {
    let addr: SocketAddr = addr
        .parse()
        .with_context(|| format!("HOST/PORT do not form a socket address: {}", addr))?;

    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;
    socket.set_tcp_keepalive(&TcpKeepalive::new().with_time(Duration::from_secs(60)))?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(256)?;

    Ok(tokio::net::TcpListener::from_std(socket.into())?)
}
