use std::time::Duration;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{HeaderValue, Method, Request, Response, header};
use axum::routing::get;
use axum::{Json, Router};
use personas::Personas;
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::field::Empty;

use crate::config::{AppConfig, CorsConfig};

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// CORS for the configured origins with the methods the persona routes use.
fn cors_layer(cfg: &CorsConfig) -> CorsLayer {
    let origins = if cfg.allows_any_origin() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            cfg.allowed_origins
                .iter()
                .filter_map(|o| HeaderValue::from_str(o).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(cfg.max_age_seconds))
}

/// Assemble the full application router: persona routes, `/health`,
/// request tracing and optional CORS.
pub fn build_router(cfg: &AppConfig, module: &Personas) -> Router {
    let mut router = module
        .register_rest(Router::new())
        .route("/health", get(health))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request<Body>| {
                    tracing::info_span!(
                        "http_request",
                        method = %req.method(),
                        uri = %req.uri().path(),
                        version = ?req.version(),
                        status = Empty,
                        latency_ms = Empty,
                    )
                })
                .on_response(
                    |res: &Response<Body>, latency: Duration, span: &tracing::Span| {
                        span.record("status", res.status().as_u16());
                        span.record("latency_ms", latency.as_millis());
                    },
                ),
        );

    if cfg.cors.enabled {
        if cfg.cors.allows_any_origin() {
            tracing::info!("CORS open to any origin");
        }
        router = router.layer(cors_layer(&cfg.cors));
    }

    router
}

/// Open the database, bind the listener and serve until a shutdown signal.
///
/// # Errors
/// Fails on bad configuration, database errors or bind failures.
pub async fn run(cfg: AppConfig) -> Result<()> {
    cfg.validate()?;
    let addr = cfg.server.socket_addr()?;

    let module = Personas::init(&cfg.database, &cfg.personas).await?;
    let router = build_router(&cfg, &module);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "Personas server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Personas server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM. A handler that cannot be installed never
/// fires, so the other one still stops the server.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = tokio::select! {
        () = ctrl_c => "ctrl_c",
        () = terminate => "sigterm",
    };
    tracing::info!(signal, "Shutdown signal received, draining connections");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use http_body_util::BodyExt;
    use personas::config::DatabaseConfig;
    use tower::ServiceExt;

    async fn app(cfg: &AppConfig) -> Router {
        let module = Personas::init(&DatabaseConfig::in_memory(), &cfg.personas)
            .await
            .unwrap();
        build_router(cfg, &module)
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let resp = app(&AppConfig::default())
            .await
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn persona_routes_are_mounted() {
        let resp = app(&AppConfig::default())
            .await
            .oneshot(Request::get("/api/personas").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn cors_headers_only_when_enabled() {
        let preflight = || {
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/personas")
                .header(header::ORIGIN, "http://localhost:3000")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap()
        };

        let resp = app(&AppConfig::default())
            .await
            .oneshot(preflight())
            .await
            .unwrap();
        let headers = resp.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
        assert!(
            headers
                .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
                .is_none()
        );
        let methods = headers
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(methods.contains("PUT") && methods.contains("DELETE"));

        let mut cfg = AppConfig::default();
        cfg.cors.enabled = false;
        let resp = app(&cfg).await.oneshot(preflight()).await.unwrap();
        assert!(
            resp.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }

    #[tokio::test]
    async fn cors_echoes_only_listed_origins() {
        let mut cfg = AppConfig::default();
        cfg.cors.allowed_origins = vec!["http://localhost:5173".to_owned()];
        let router = app(&cfg).await;

        let request = |origin: &str| {
            Request::get("/api/personas")
                .header(header::ORIGIN, origin)
                .body(Body::empty())
                .unwrap()
        };

        let resp = router
            .clone()
            .oneshot(request("http://localhost:5173"))
            .await
            .unwrap();
        assert_eq!(
            resp.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "http://localhost:5173"
        );

        let resp = router.oneshot(request("http://evil.test")).await.unwrap();
        assert!(
            resp.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }
}
