//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/records/{record_id}', use [format_endpoint].

/// The home page with the voice entry panel and the selected day's records.
pub const ROOT: &str = "/";
/// The page listing every record with search and filters.
pub const LEDGER_VIEW: &str = "/ledger";
/// The page listing customers and their summaries.
pub const CUSTOMERS_VIEW: &str = "/customers";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to request a cup of coffee (experimental).
pub const COFFEE: &str = "/api/coffee";
/// The route to create records.
pub const RECORDS_API: &str = "/api/records";
/// The route to delete a single record.
pub const DELETE_RECORD: &str = "/api/records/{record_id}";
/// The route to create customers.
pub const CUSTOMERS_API: &str = "/api/customers";
/// The route the browser posts speech capture events to.
pub const SPEECH_API: &str = "/api/speech";
/// The route for downloading the filtered ledger as JSON.
pub const LEDGER_EXPORT: &str = "/api/ledger/export";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/records/{record_id}', '{record_id}'
/// is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::LEDGER_VIEW);
        assert_endpoint_is_valid_uri(endpoints::CUSTOMERS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::INTERNAL_ERROR_VIEW);
        assert_endpoint_is_valid_uri(endpoints::STATIC);

        assert_endpoint_is_valid_uri(endpoints::COFFEE);
        assert_endpoint_is_valid_uri(endpoints::RECORDS_API);
        assert_endpoint_is_valid_uri(endpoints::DELETE_RECORD);
        assert_endpoint_is_valid_uri(endpoints::CUSTOMERS_API);
        assert_endpoint_is_valid_uri(endpoints::SPEECH_API);
        assert_endpoint_is_valid_uri(endpoints::LEDGER_EXPORT);
    }

    #[test]
    fn replaces_record_id() {
        let formatted_path = format_endpoint(endpoints::DELETE_RECORD, 42);

        assert_eq!(formatted_path, "/api/records/42");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", 1);

        assert_eq!(formatted_path, "/hello/world");
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint("/hello/{world}/bye", 1);

        assert_eq!(formatted_path, "/hello/1/bye");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
