//! The boundary with the browser's speech recognition.
//!
//! The browser owns the microphone and the recognizer (see `static/voice.js`).
//! It posts every lifecycle change, transcript and error to
//! [endpoints::SPEECH_API](crate::endpoints::SPEECH_API) as a form, which is
//! turned into a [SpeechEvent] and applied to the entry state one at a time.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::html;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    alert::Alert,
    customer::{CreateOutcome, create_customer, get_all_customers},
    entry::{Effect, EntryEvent, EntryState},
    home::entry_section_view,
};

/// Why speech recognition stopped with an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureErrorKind {
    /// Nothing was said before the recognizer gave up.
    NoSpeech,
    /// The user or browser blocked the microphone.
    PermissionDenied,
    /// Any other recognizer error.
    Other,
}

impl CaptureErrorKind {
    /// Map a Web Speech API error code, e.g. "no-speech", to an error kind.
    pub fn from_browser_code(code: &str) -> Self {
        match code {
            "no-speech" => CaptureErrorKind::NoSpeech,
            "not-allowed" | "service-not-allowed" => CaptureErrorKind::PermissionDenied,
            _ => CaptureErrorKind::Other,
        }
    }
}

/// A message from the browser's speech recognition.
#[derive(Debug, Clone, PartialEq)]
pub enum SpeechEvent {
    /// Recognition started (`true`) or ended (`false`).
    ListeningChanged(bool),
    /// A partial transcript that may still change.
    InterimTranscript(String),
    /// The finished transcript of one utterance.
    FinalTranscript(String),
    /// Recognition failed.
    Error(CaptureErrorKind),
}

/// The form the browser posts for each speech event.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechEventForm {
    /// One of "listening", "interim", "final" or "error".
    pub kind: String,
    /// Set for "listening" events.
    #[serde(default)]
    pub listening: Option<bool>,
    /// Set for "interim" and "final" events.
    #[serde(default)]
    pub transcript: Option<String>,
    /// The browser's error code, set for "error" events.
    #[serde(default)]
    pub error: Option<String>,
}

impl SpeechEventForm {
    /// Convert the form into an event, or `None` if the kind is unknown or a
    /// field it needs is missing.
    ///
    /// An empty final transcript is still a final transcript, since the form
    /// decodes empty fields as missing.
    pub fn into_event(self) -> Option<SpeechEvent> {
        match self.kind.as_str() {
            "listening" => self.listening.map(SpeechEvent::ListeningChanged),
            "interim" => self.transcript.map(SpeechEvent::InterimTranscript),
            "final" => Some(SpeechEvent::FinalTranscript(
                self.transcript.unwrap_or_default(),
            )),
            "error" => Some(SpeechEvent::Error(CaptureErrorKind::from_browser_code(
                self.error.as_deref().unwrap_or_default(),
            ))),
            _ => None,
        }
    }
}

/// The state needed for handling speech events.
#[derive(Debug, Clone)]
pub struct SpeechEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub entry_state: Arc<Mutex<EntryState>>,
}

impl FromRef<AppState> for SpeechEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            entry_state: state.entry_state.clone(),
        }
    }
}

/// Apply a speech event and respond with the re-rendered entry section plus
/// any alerts the event produced.
pub async fn speech_event_endpoint(
    State(state): State<SpeechEndpointState>,
    Form(form): Form<SpeechEventForm>,
) -> Response {
    let Some(event) = form.into_event() else {
        tracing::warn!("received a malformed speech event");
        return Alert::Error {
            message: "आवाज़ की समस्या / Speech recognition error".to_owned(),
            details: "The browser sent an event the server did not understand.".to_owned(),
        }
        .into_response_with_status(StatusCode::BAD_REQUEST);
    };

    tracing::debug!("applying speech event {event:?}");

    let mut entry_state = match state.entry_state.lock() {
        Ok(entry_state) => entry_state,
        Err(error) => {
            tracing::error!("could not acquire entry state lock: {error}");
            return Error::EntryStateLockError.into_alert_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let effects = entry_state.apply(EntryEvent::Speech(event));

    let mut alerts = Vec::new();
    for effect in effects {
        match effect {
            Effect::Notify(notice) if notice.is_error() => alerts.push(Alert::Error {
                message: notice.message().to_owned(),
                details: String::new(),
            }),
            Effect::Notify(notice) => alerts.push(Alert::SuccessSimple {
                message: notice.message().to_owned(),
            }),
            Effect::EnsureCustomer(name) => match create_customer(name, &connection) {
                Ok(CreateOutcome::Created(customer)) => {
                    tracing::info!("added customer \"{}\" from speech", customer.name);
                }
                Ok(CreateOutcome::AlreadyExists(_)) => {}
                Err(error) => {
                    tracing::error!("could not add customer from speech: {error}");
                    alerts.push(Alert::Error {
                        message: "ग्राहक नहीं जोड़ा जा सका / Could not add customer".to_owned(),
                        details: error.to_string(),
                    });
                }
            },
        }
    }

    let customers = match get_all_customers(&connection) {
        Ok(customers) => customers,
        Err(error) => {
            tracing::error!("could not get customers: {error}");
            return error.into_alert_response();
        }
    };

    // Only one alert container exists. The first error wins, otherwise the
    // last alert is shown.
    let shown_alert = match alerts
        .iter()
        .position(|alert| matches!(alert, Alert::Error { .. }))
    {
        Some(index) => Some(alerts.swap_remove(index)),
        None => alerts.pop(),
    };

    let markup = html! {
        (entry_section_view(&entry_state, &customers))
        @if let Some(alert) = shown_alert {
            (alert.into_html())
        }
    };

    Html(markup.into_string()).into_response()
}
