//! HTTP surface of the climate API
//!
//! Maps the fixed and parameterized `/api/v1.0` paths onto query service
//! calls. Handlers only translate shapes; all derivation happens in
//! [`QueryService`].

use crate::app::services::observation_store::ObservationStore;
use crate::app::services::query_service::QueryService;
use crate::constants::{
    ROUTE_PRECIPITATION, ROUTE_STATIONS, ROUTE_STATS_FROM, ROUTE_STATS_RANGE, ROUTE_TOBS,
};
use axum::Router;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use std::sync::Arc;
use tracing::{Instrument, debug, info_span};

pub mod error;
pub mod handlers;
pub mod responses;

#[cfg(test)]
pub mod tests;

/// Shared handler state
pub type AppState<S> = Arc<QueryService<S>>;

/// Build the API router over a query service
///
/// Static paths take precedence over the `{start}` parameter, so
/// `/api/v1.0/stations` never reaches the statistics handler.
pub fn router<S: ObservationStore>(service: QueryService<S>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(ROUTE_PRECIPITATION, get(handlers::precipitation::<S>))
        .route(ROUTE_STATIONS, get(handlers::stations::<S>))
        .route(ROUTE_TOBS, get(handlers::tobs::<S>))
        .route(ROUTE_STATS_FROM, get(handlers::stats_from::<S>))
        .route(ROUTE_STATS_RANGE, get(handlers::stats_range::<S>))
        .fallback(handlers::not_found)
        .layer(middleware::from_fn(trace_request))
        .with_state(Arc::new(service))
}

/// Run each request inside a span carrying its method and path
async fn trace_request(request: Request, next: Next) -> Response {
    let span = info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path()
    );

    async move {
        let response = next.run(request).await;
        debug!("Responded {}", response.status());
        response
    }
    .instrument(span)
    .await
}
