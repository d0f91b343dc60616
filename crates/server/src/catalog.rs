//! Category catalog API endpoints (admin-curated)

use api_types::{
    Ack, Envelope,
    catalog::{PurchaseKindNew, PurchaseKindView, WorkTypeNew, WorkTypeView},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use ledger::{Principal, PurchaseKind, WorkType};

use crate::{ServerError, server::ServerState};

fn kind_view(kind: PurchaseKind) -> PurchaseKindView {
    PurchaseKindView {
        id: kind.id,
        name: kind.name,
        name_ar: kind.name_ar,
        created_at: kind.created_at,
    }
}

fn type_view(work_type: WorkType) -> WorkTypeView {
    WorkTypeView {
        id: work_type.id,
        name: work_type.name,
        created_at: work_type.created_at,
    }
}

pub async fn list_purchase_kinds(
    _principal: Extension<Principal>,
    State(state): State<ServerState>,
) -> Result<Json<Envelope<Vec<PurchaseKindView>>>, ServerError> {
    let kinds = state.ledger.list_purchase_kinds().await?;
    Ok(Json(Envelope::new(
        kinds.into_iter().map(kind_view).collect(),
    )))
}

pub async fn create_purchase_kind(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    Json(payload): Json<PurchaseKindNew>,
) -> Result<(StatusCode, Json<Envelope<PurchaseKindView>>), ServerError> {
    let kind = state
        .ledger
        .create_purchase_kind(&payload.name, &payload.name_ar, &principal)
        .await?;
    Ok((StatusCode::CREATED, Json(Envelope::new(kind_view(kind)))))
}

pub async fn delete_purchase_kind(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<Ack>, ServerError> {
    state.ledger.delete_purchase_kind(id, &principal).await?;
    Ok(Json(Ack::new("Purchase kind deleted successfully")))
}

pub async fn list_work_types(
    _principal: Extension<Principal>,
    State(state): State<ServerState>,
) -> Result<Json<Envelope<Vec<WorkTypeView>>>, ServerError> {
    let types = state.ledger.list_work_types().await?;
    Ok(Json(Envelope::new(
        types.into_iter().map(type_view).collect(),
    )))
}

pub async fn create_work_type(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    Json(payload): Json<WorkTypeNew>,
) -> Result<(StatusCode, Json<Envelope<WorkTypeView>>), ServerError> {
    let work_type = state
        .ledger
        .create_work_type(&payload.name, &principal)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::new(type_view(work_type))),
    ))
}
