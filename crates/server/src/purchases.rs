//! Purchase API endpoints

use api_types::{
    Ack, Envelope,
    purchase::{PurchaseListQuery, PurchaseView, PurchaseWrite},
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, NaiveDate};
use ledger::{CreatedRange, DayBasis, Money, Principal, Purchase, PurchaseDraft, PurchaseFilter};

use crate::{ServerError, server::ServerState};

pub(crate) fn view(purchase: Purchase) -> PurchaseView {
    PurchaseView {
        id: purchase.id,
        name: purchase.name,
        duplex_number: purchase.duplex_number,
        kind: purchase.kind,
        purchase_date: purchase.purchase_date,
        price_minor: purchase.price.minor(),
        notes: purchase.notes,
        created_by: purchase.created_by,
        created_at: purchase.created_at,
        attachment_paths: purchase.attachment_paths,
    }
}

fn draft(payload: &PurchaseWrite) -> PurchaseDraft {
    PurchaseDraft {
        name: payload.name.clone(),
        duplex_number: payload.duplex_number,
        kind: payload.kind.clone(),
        purchase_date: payload.purchase_date,
        price: Money::from_minor(payload.price_minor),
        notes: payload.notes.clone(),
    }
}

/// Plain `YYYY-MM-DD` bounds select the UTC day of `created_at`; full
/// datetimes switch the comparison to the site-local calendar.
fn parse_range(start: &str, end: &str) -> Result<CreatedRange, ServerError> {
    if let (Ok(start), Ok(end)) = (
        NaiveDate::parse_from_str(start, "%Y-%m-%d"),
        NaiveDate::parse_from_str(end, "%Y-%m-%d"),
    ) {
        return Ok(CreatedRange {
            start,
            end,
            basis: DayBasis::Utc,
        });
    }

    let start = DateTime::parse_from_rfc3339(start)
        .map_err(|_| ServerError::Generic(format!("invalid start_date: {start}")))?;
    let end = DateTime::parse_from_rfc3339(end)
        .map_err(|_| ServerError::Generic(format!("invalid end_date: {end}")))?;
    Ok(CreatedRange {
        start: start.date_naive(),
        end: end.date_naive(),
        basis: DayBasis::SiteLocal,
    })
}

pub async fn list(
    _principal: Extension<Principal>,
    State(state): State<ServerState>,
    Query(query): Query<PurchaseListQuery>,
) -> Result<Json<Envelope<Vec<PurchaseView>>>, ServerError> {
    let range = match (query.start_date.as_deref(), query.end_date.as_deref()) {
        (Some(start), Some(end)) => Some(parse_range(start, end)?),
        _ => None,
    };
    let filter = PurchaseFilter {
        range,
        duplex_number: query.duplex_number,
        kind: query.kind,
    };

    let purchases = state.ledger.list_purchases(&filter).await?;
    Ok(Json(Envelope::new(
        purchases.into_iter().map(view).collect(),
    )))
}

pub async fn create(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    Json(payload): Json<PurchaseWrite>,
) -> Result<(StatusCode, Json<Envelope<PurchaseView>>), ServerError> {
    let attachment_paths = payload.attachment_paths.clone().unwrap_or_default();
    let purchase = state
        .ledger
        .create_purchase(draft(&payload), &attachment_paths, &principal)
        .await?;

    Ok((StatusCode::CREATED, Json(Envelope::new(view(purchase)))))
}

pub async fn update(
    _principal: Extension<Principal>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PurchaseWrite>,
) -> Result<Json<Envelope<PurchaseView>>, ServerError> {
    let attachment_paths = payload.attachment_paths.clone().unwrap_or_default();
    let purchase = state
        .ledger
        .update_purchase(id, draft(&payload), &attachment_paths)
        .await?;

    Ok(Json(Envelope::new(view(purchase))))
}

pub async fn remove(
    _principal: Extension<Principal>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<Ack>, ServerError> {
    state.ledger.delete_purchase(id).await?;
    Ok(Json(Ack::new("Purchase deleted successfully")))
}
