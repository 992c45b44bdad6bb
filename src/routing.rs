//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{delete, get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    customer::{create_customer_endpoint, get_customers_page},
    endpoints,
    home::get_home_page,
    internal_server_error::get_internal_server_error_page,
    ledger::{export_ledger_endpoint, get_ledger_page},
    not_found::get_404_not_found,
    record::{create_record_endpoint, delete_record_endpoint},
    speech::speech_event_endpoint,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let pages = Router::new()
        .route(endpoints::ROOT, get(get_home_page))
        .route(endpoints::LEDGER_VIEW, get(get_ledger_page))
        .route(endpoints::CUSTOMERS_VIEW, get(get_customers_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api = Router::new()
        .route(endpoints::COFFEE, get(get_coffee))
        .route(endpoints::RECORDS_API, post(create_record_endpoint))
        .route(endpoints::DELETE_RECORD, delete(delete_record_endpoint))
        .route(endpoints::CUSTOMERS_API, post(create_customer_endpoint))
        .route(endpoints::SPEECH_API, post(speech_event_endpoint))
        .route(endpoints::LEDGER_EXPORT, get(export_ledger_endpoint));

    pages
        .merge(api)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Attempt to get a cup of coffee from the server.
async fn get_coffee() -> Response {
    (StatusCode::IM_A_TEAPOT, Html("I'm a teapot")).into_response()
}
