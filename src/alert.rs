//! Alert system for displaying success and error messages to users.
//!
//! Alerts are rendered as an out-of-band swap for the `#alert-container`
//! element in the base layout, so they can be sent on their own or appended to
//! any other htmx fragment.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::{Markup, html};

/// A message to show the user after an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// The action succeeded and there is more to say about it.
    Success { message: String, details: String },
    /// The action succeeded.
    SuccessSimple { message: String },
    /// Something the user should know that is not a failure.
    Info { message: String },
    /// The action failed.
    Error { message: String, details: String },
}

impl Alert {
    pub fn into_html(self) -> Markup {
        let (container_style, message, details) = match self {
            Alert::Success { message, details } => (
                "text-green-800 bg-green-50 border-green-300 \
                dark:bg-gray-800 dark:text-green-400 dark:border-green-800",
                message,
                details,
            ),
            Alert::SuccessSimple { message } => (
                "text-green-800 bg-green-50 border-green-300 \
                dark:bg-gray-800 dark:text-green-400 dark:border-green-800",
                message,
                String::new(),
            ),
            Alert::Info { message } => (
                "text-blue-800 bg-blue-50 border-blue-300 \
                dark:bg-gray-800 dark:text-blue-400 dark:border-blue-800",
                message,
                String::new(),
            ),
            Alert::Error { message, details } => (
                "text-red-800 bg-red-50 border-red-300 \
                dark:bg-gray-800 dark:text-red-400 dark:border-red-800",
                message,
                details,
            ),
        };

        html!(
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div
                    role="alert"
                    class={ "flex items-start justify-between gap-4 p-4 rounded-lg border " (container_style) }
                {
                    div
                    {
                        p class="font-medium" { (message) }

                        @if !details.is_empty() {
                            p class="mt-1 text-sm" { (details) }
                        }
                    }

                    button
                        type="button"
                        aria-label="Close"
                        class="text-sm font-semibold"
                        onclick="this.closest('[role=alert]').remove()"
                    {
                        "✕"
                    }
                }
            }
        )
    }

    /// Render the alert as a response with `status_code`.
    pub fn into_response_with_status(self, status_code: StatusCode) -> Response {
        (status_code, Html(self.into_html().into_string())).into_response()
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_response_with_status(StatusCode::OK)
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use scraper::Selector;

    use crate::{
        alert::Alert,
        test_utils::{assert_content_type, assert_valid_html, parse_html_fragment},
    };

    #[tokio::test]
    async fn error_alert_has_message_and_details() {
        let response = Alert::Error {
            message: "Could not save".to_owned(),
            details: "Try again".to_owned(),
        }
        .into_response_with_status(StatusCode::BAD_REQUEST);

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let paragraphs = html
            .select(&Selector::parse("p").unwrap())
            .map(|p| p.text().collect::<String>())
            .collect::<Vec<_>>();
        assert_eq!(paragraphs, vec!["Could not save", "Try again"]);
    }

    #[tokio::test]
    async fn simple_alert_is_out_of_band_swap() {
        let response = Alert::SuccessSimple {
            message: "Saved".to_owned(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        let container = html
            .select(&Selector::parse("#alert-container").unwrap())
            .next()
            .expect("alert container missing");
        assert_eq!(container.value().attr("hx-swap-oob"), Some("true"));
        assert_eq!(html.select(&Selector::parse("p").unwrap()).count(), 1);
    }
}
