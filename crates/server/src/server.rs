use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, put},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use sea_orm::{DatabaseConnection, EntityTrait};

use std::sync::Arc;

use crate::{admin, analytics, catalog, purchases, users, work_payments, work_projects};
use ledger::{Ledger, Principal, Role};

#[derive(Clone)]
pub struct ServerState {
    pub ledger: Arc<Ledger>,
    pub db: DatabaseConnection,
}

async fn auth(
    TypedHeader(auth_header): TypedHeader<Authorization<Basic>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if auth_header.username().is_empty() || auth_header.password().is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let user = users::Entity::find_by_id(auth_header.username().to_owned())
        .one(&state.db)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let Some(user) = user else {
        return Err(StatusCode::UNAUTHORIZED);
    };
    if user.password != auth_header.password() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let Ok(role) = Role::try_from(user.role.as_str()) else {
        tracing::error!(email = %user.email, "user row carries an unknown role");
        return Err(StatusCode::UNAUTHORIZED);
    };

    request.extensions_mut().insert(Principal {
        email: user.email,
        full_name: user.full_name,
        role,
    });
    Ok(next.run(request).await)
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route(
            "/purchases",
            get(purchases::list).post(purchases::create),
        )
        .route(
            "/purchases/{id}",
            put(purchases::update).delete(purchases::remove),
        )
        .route(
            "/workPayments",
            get(work_payments::list).post(work_payments::create),
        )
        .route(
            "/workPayments/{id}",
            put(work_payments::update).delete(work_payments::remove),
        )
        .route(
            "/workProjects",
            get(work_projects::list).post(work_projects::create),
        )
        .route("/workProjects/{id}", get(work_projects::get_one))
        .route("/workProjects/{id}/payments", get(work_projects::payments))
        .route(
            "/purchaseKinds",
            get(catalog::list_purchase_kinds).post(catalog::create_purchase_kind),
        )
        .route("/purchaseKinds/{id}", delete(catalog::delete_purchase_kind))
        .route(
            "/workTypes",
            get(catalog::list_work_types).post(catalog::create_work_type),
        )
        .route("/analytics/summary", get(analytics::summary))
        .route("/analytics/duplexCosts", get(analytics::duplex_costs))
        .route("/admin/activity", get(admin::activity))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth))
        .with_state(state)
}

pub async fn run(ledger: Ledger, db: DatabaseConnection) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(ledger, db, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    ledger: Ledger,
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        ledger: Arc::new(ledger),
        db,
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    ledger: Ledger,
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(ledger, db, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
