//! Reservation server creation and serving.
use axum::Router;
use sisly_store::ReservationStore;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Clone)]
pub struct ServerState {
    pub store: ReservationStore,
}

fn make_app() -> Router<ServerState> {
    Router::new()
        .merge(crate::api::router())
        .merge(crate::openapi::router())
        // the booking widget is served from a different origin
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

pub struct Server;

impl Server {
    /// Serves the reservation API on the given listener forever using the
    /// supplied reservation store.
    pub async fn serve(
        listener: std::net::TcpListener,
        state: ServerState,
    ) -> Result<(), crate::Error> {
        info!("starting server");

        listener.set_nonblocking(true)?;
        let listener = tokio::net::TcpListener::from_std(listener)?;
        axum::serve(listener, make_app().with_state(state).into_make_service())
            .with_graceful_shutdown(shutdown())
            .await?;

        Ok(())
    }
}

async fn shutdown() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Cannot install handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutting down the server");
}
