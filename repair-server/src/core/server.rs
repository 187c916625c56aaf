//! HTTP server
//!
//! HTTP 服务 - 组装 Axum 路由并启动监听。
//! 测试场景通过 `oneshot()` 直接调用路由，无需绑定端口。

use std::net::SocketAddr;
use std::sync::{Arc, RwLock};

use axum::{Router, middleware};
use tower::Service;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use crate::core::{Config, ServerState};
use crate::utils::AppError;

pub type OneshotResult =
    Result<http::Response<axum::body::Body>, Box<dyn std::error::Error + Send + Sync>>;

/// HTTP 请求日志中间件
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(crate::api::health::router())
        .merge(crate::api::bookings::router())
        .merge(crate::api::employee::router())
        .merge(crate::api::engineers::router())
        .merge(crate::api::email_logs::router())
}

#[derive(Clone)]
pub struct Server {
    config: Config,
    state: ServerState,
    router: Arc<RwLock<Option<Router>>>,
}

impl Server {
    pub fn with_state(config: Config, state: ServerState) -> Self {
        let server = Self {
            config,
            state,
            router: Arc::new(RwLock::new(None)),
        };
        server.initialize();
        server
    }

    /// Build the router with state and cache it
    fn initialize(&self) {
        let app = build_app()
            .with_state(self.state.clone())
            // Tower HTTP 中间件
            .layer(CorsLayer::permissive())
            .layer(CompressionLayer::new())
            // HTTP 请求日志中间件
            .layer(middleware::from_fn(log_request));

        let mut router = self.router.write().expect("Failed to lock router");
        *router = Some(app);
    }

    pub fn router(&self) -> Option<Router> {
        self.router.read().expect("Failed to lock router").clone()
    }

    /// Drive a single request through the router without binding a port
    pub async fn oneshot(&self, request: http::Request<axum::body::Body>) -> OneshotResult {
        let router_opt = self.router.read().expect("Failed to lock router").clone();

        match router_opt {
            Some(router) => {
                let mut service = router.clone();
                match service.call(request).await {
                    Ok(response) => Ok(response),
                    Err(_) => Err(AppError::internal("Oneshot call failed").into()),
                }
            }
            None => Err(AppError::internal("Server not initialized").into()),
        }
    }

    /// Start background tasks and serve HTTP until ctrl-c
    pub async fn run(&self) -> Result<(), AppError> {
        self.state.start_background_tasks().await;

        let app = self
            .router()
            .ok_or_else(|| AppError::internal("Server not initialized with router"))?;

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!("🚀 Starting HTTP server on {}", addr);

        let handle = axum_server::Handle::new();

        let handle_clone = handle.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Shutdown signal received");
                handle_clone.graceful_shutdown(Some(std::time::Duration::from_secs(10)));
            }
        });

        axum_server::bind(addr)
            .handle(handle)
            .serve(app.into_make_service())
            .await
            .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

        Ok(())
    }
}
