//! Work payment API endpoints

use api_types::{
    Ack, Envelope,
    work_payment::{WorkPaymentListQuery, WorkPaymentNew, WorkPaymentUpdate, WorkPaymentView},
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use ledger::{Money, PaymentFilter, Principal, WorkPayment, WorkPaymentDraft};

use crate::{ServerError, server::ServerState};

pub(crate) fn view(payment: WorkPayment) -> WorkPaymentView {
    WorkPaymentView {
        id: payment.id,
        project_id: payment.project_id,
        project_name: payment.project_name,
        amount_minor: payment.amount.minor(),
        paid_on: payment.paid_on,
        notes: payment.notes,
        duplex_number: payment.duplex_number,
        created_by: payment.created_by,
        created_at: payment.created_at,
        updated_at: payment.updated_at,
        attachment_paths: payment.attachment_paths,
    }
}

pub async fn list(
    _principal: Extension<Principal>,
    State(state): State<ServerState>,
    Query(query): Query<WorkPaymentListQuery>,
) -> Result<Json<Envelope<Vec<WorkPaymentView>>>, ServerError> {
    let filter = PaymentFilter {
        project_id: query.project_id,
        duplex_number: query.duplex_number,
    };
    let payments = state.ledger.list_work_payments(&filter).await?;
    Ok(Json(Envelope::new(payments.into_iter().map(view).collect())))
}

pub async fn create(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    Json(payload): Json<WorkPaymentNew>,
) -> Result<(StatusCode, Json<Envelope<WorkPaymentView>>), ServerError> {
    let draft = WorkPaymentDraft {
        project_id: payload.project_id,
        amount: Money::from_minor(payload.amount_minor),
        paid_on: payload.paid_on,
        notes: payload.notes,
        duplex_number: payload.duplex_number,
    };
    let attachment_paths = payload.attachment_paths.unwrap_or_default();
    let payment = state
        .ledger
        .create_work_payment(draft, &attachment_paths, &principal)
        .await?;

    Ok((StatusCode::CREATED, Json(Envelope::new(view(payment)))))
}

pub async fn update(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<WorkPaymentUpdate>,
) -> Result<Json<Envelope<WorkPaymentView>>, ServerError> {
    let draft = WorkPaymentDraft {
        project_id: payload.project_id,
        amount: Money::from_minor(payload.amount_minor),
        paid_on: payload.paid_on,
        notes: payload.notes,
        duplex_number: payload.duplex_number,
    };
    let attachment_paths = payload.attachment_paths.unwrap_or_default();
    // The client may hand over any creator string here; absent one, the
    // caller's email is used. Purchases never allow this.
    let created_by = payload.created_by.unwrap_or_else(|| principal.email.clone());
    let payment = state
        .ledger
        .update_work_payment(id, draft, &attachment_paths, &created_by)
        .await?;

    Ok(Json(Envelope::new(view(payment))))
}

pub async fn remove(
    _principal: Extension<Principal>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<Ack>, ServerError> {
    state.ledger.delete_work_payment(id).await?;
    Ok(Json(Ack::new("Payment deleted successfully")))
}
