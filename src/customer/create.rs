use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState,
    alert::Alert,
    customer::{CreateOutcome, CustomerName, core::CustomerFormData, create_customer},
    endpoints,
};

/// The state needed to add a customer.
#[derive(Debug, Clone)]
pub struct CreateCustomerState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateCustomerState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for adding a customer, redirects to the customers page on
/// success.
///
/// Adding a name that is already in the directory is not an error, the user
/// is told the customer exists instead.
pub async fn create_customer_endpoint(
    State(state): State<CreateCustomerState>,
    Form(form): Form<CustomerFormData>,
) -> Response {
    let name = match CustomerName::new(&form.name) {
        Ok(name) => name,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return crate::Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_customer(name, &connection) {
        Ok(CreateOutcome::Created(customer)) => {
            tracing::info!("added customer \"{}\"", customer.name);
            (
                HxRedirect(endpoints::CUSTOMERS_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Ok(CreateOutcome::AlreadyExists(name)) => Alert::Info {
            message: format!("\"{name}\" पहले से है / \"{name}\" already exists"),
        }
        .into_response(),
        Err(error) => {
            tracing::error!("could not create customer: {error}");
            error.into_alert_response()
        }
    }
}
