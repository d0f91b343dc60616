//! Admin reporting endpoints

use api_types::{Envelope, admin::ActivityView};
use axum::{Extension, Json, extract::State};
use ledger::Principal;

use crate::{ServerError, server::ServerState};

pub async fn activity(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
) -> Result<Json<Envelope<Vec<ActivityView>>>, ServerError> {
    let events = state.ledger.recent_activity(&principal).await?;

    Ok(Json(Envelope::new(
        events
            .into_iter()
            .map(|event| ActivityView {
                kind: event.kind.as_str().to_string(),
                record_id: event.record_id,
                created_by: event.created_by,
                duplex_number: event.duplex_number,
                amount_minor: event.amount.minor(),
                occurred_at: event.occurred_at,
                details: event.details,
            })
            .collect(),
    )))
}
