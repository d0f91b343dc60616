//! Work project API endpoints

use api_types::{
    Envelope,
    work_payment::WorkPaymentView,
    work_project::{WorkProjectNew, WorkProjectView},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use ledger::{Money, Principal, WorkProjectDraft, WorkProjectSummary};

use crate::{ServerError, server::ServerState, work_payments};

fn view(summary: WorkProjectSummary) -> WorkProjectView {
    let project = summary.project;
    WorkProjectView {
        id: project.id,
        name: project.name,
        total_price_minor: project.total_price.minor(),
        duration_days: project.duration_days,
        start_date: project.start_date,
        notes: project.notes,
        duplex_number: project.duplex_number,
        created_by: project.created_by,
        created_at: project.created_at,
        total_paid_minor: summary.total_paid.minor(),
        remaining_minor: summary.remaining.minor(),
    }
}

pub async fn list(
    _principal: Extension<Principal>,
    State(state): State<ServerState>,
) -> Result<Json<Envelope<Vec<WorkProjectView>>>, ServerError> {
    let projects = state.ledger.list_work_projects().await?;
    Ok(Json(Envelope::new(projects.into_iter().map(view).collect())))
}

pub async fn create(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    Json(payload): Json<WorkProjectNew>,
) -> Result<(StatusCode, Json<Envelope<WorkProjectView>>), ServerError> {
    let draft = WorkProjectDraft {
        name: payload.name,
        total_price: Money::from_minor(payload.total_price_minor),
        duration_days: payload.duration_days,
        start_date: payload.start_date,
        notes: payload.notes,
        duplex_number: payload.duplex_number,
    };
    let project = state.ledger.create_work_project(draft, &principal).await?;
    let summary = state.ledger.work_project(project.id).await?;

    Ok((StatusCode::CREATED, Json(Envelope::new(view(summary)))))
}

pub async fn get_one(
    _principal: Extension<Principal>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<WorkProjectView>>, ServerError> {
    let summary = state.ledger.work_project(id).await?;
    Ok(Json(Envelope::new(view(summary))))
}

pub async fn payments(
    _principal: Extension<Principal>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<Vec<WorkPaymentView>>>, ServerError> {
    let payments = state.ledger.project_payments(id).await?;
    Ok(Json(Envelope::new(
        payments.into_iter().map(work_payments::view).collect(),
    )))
}
