//! Server-sent stream of page revalidation notices

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};

use crate::AppState;

/// Subscribe to revalidation notices. Each event is named `revalidate` and carries
/// `{paths, at}` as JSON.
#[utoipa::path(
    get,
    path = "/api/v1/revalidations",
    tag = "revalidation",
    responses(
        (status = 200, description = "Event stream of revalidation notices", content_type = "text/event-stream", body = crate::services::revalidation::Revalidation)
    )
)]
pub async fn stream_revalidations(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let stream = BroadcastStream::new(state.services.revalidator.subscribe())
        .filter_map(|notice| match notice {
            Ok(notice) => Some(notice),
            Err(e) => {
                tracing::warn!(error = %e, "Revalidation subscriber fell behind");
                None
            }
        })
        .map(|notice| Event::default().event("revalidate").json_data(notice));

    Sse::new(stream).keep_alive(KeepAlive::default())
}
