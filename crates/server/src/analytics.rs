//! Analytics API endpoints

use api_types::analytics::{DuplexCostView, MonthlyChangeView, SummaryResponse};
use axum::{Extension, Json, extract::State};
use chrono::Utc;
use ledger::Principal;

use crate::{ServerError, server::ServerState};

/// Number of duplex units the cost table always reports on, active or not.
const DUPLEX_COUNT: i32 = 20;

pub async fn summary(
    _principal: Extension<Principal>,
    State(state): State<ServerState>,
) -> Result<Json<SummaryResponse>, ServerError> {
    let summary = state.ledger.summary(Utc::now()).await?;

    Ok(Json(SummaryResponse {
        total_spending_minor: summary.total_spending.minor(),
        labor_costs_minor: summary.labor_costs.minor(),
        material_costs_minor: summary.material_costs.minor(),
        monthly_change: MonthlyChangeView {
            total_spending: summary.monthly_change.total_spending,
            labor_costs: summary.monthly_change.labor_costs,
            material_costs: summary.monthly_change.material_costs,
        },
    }))
}

pub async fn duplex_costs(
    _principal: Extension<Principal>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<DuplexCostView>>, ServerError> {
    let rows = state.ledger.duplex_costs(1..=DUPLEX_COUNT).await?;

    Ok(Json(
        rows.into_iter()
            .map(|row| DuplexCostView {
                duplex_number: row.duplex_number,
                labor_cost_minor: row.labor_cost.minor(),
                material_cost_minor: row.material_cost.minor(),
                total_minor: row.total.minor(),
                last_updated: row.last_updated,
            })
            .collect(),
    ))
}
