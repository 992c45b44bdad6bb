//! The state behind the home page's entry panel.
//!
//! [EntryState::apply] is the only way the state changes. Each event is
//! applied in full before the next, and any follow up work (telling the user
//! something, adding a customer) is returned as [Effect]s for the caller to
//! carry out.

use time::Date;

use crate::{
    customer::CustomerName,
    entry::{EntryDraft, EntryType},
    speech::{CaptureErrorKind, SpeechEvent},
    transcript::{TranscriptParse, infer_entry_type, parse_transcript},
};

/// Something that happened to the entry panel.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryEvent {
    /// The user picked a day.
    SelectDate(Date),
    /// The user picked milk, payment or absent.
    SelectEntryType(EntryType),
    /// The browser's speech recognition reported something.
    Speech(SpeechEvent),
    /// The draft was saved as a record.
    RecordSaved,
}

/// A message for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// A transcript was understood and copied into the form.
    Parsed,
    /// A transcript did not match any known phrasing.
    NoMatch,
    /// The microphone did not pick up any speech.
    NoSpeech,
    /// The browser was not allowed to use the microphone.
    PermissionDenied,
    /// Speech recognition failed for another reason.
    CaptureFailed,
}

impl Notice {
    /// The bilingual text shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            Notice::Parsed => "रिकॉर्ड पार्स हो गया! / Record parsed successfully!",
            Notice::NoMatch => "समझ नहीं आया। कृपया फिर से बोलें। / Could not understand. Please try again.",
            Notice::NoSpeech => "कुछ सुनाई नहीं दिया / No speech detected",
            Notice::PermissionDenied => "माइक की अनुमति दें / Please allow microphone access",
            Notice::CaptureFailed => "आवाज़ की समस्या / Speech recognition error",
        }
    }

    /// Whether the notice reports a problem.
    pub fn is_error(&self) -> bool {
        !matches!(self, Notice::Parsed)
    }
}

/// Follow up work produced by applying an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Show a message to the user.
    Notify(Notice),
    /// Add this customer to the directory if they are not already in it.
    EnsureCustomer(CustomerName),
}

/// The draft, the selected entry type and day, and what the microphone is
/// doing.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryState {
    /// The values shown in the entry form.
    pub draft: EntryDraft,
    /// Which kind of entry the form is for.
    pub entry_type: EntryType,
    /// The day new records are saved for and the home page shows.
    pub selected_date: Date,
    /// Whether the browser is listening for speech.
    pub is_listening: bool,
    /// The most recent interim or final transcript.
    pub transcript: String,
}

impl EntryState {
    /// An empty milk entry for `today`.
    pub fn new(today: Date) -> Self {
        Self {
            draft: EntryDraft::default(),
            entry_type: EntryType::default(),
            selected_date: today,
            is_listening: false,
            transcript: String::new(),
        }
    }

    /// Apply `event` and return the effects the caller must carry out.
    pub fn apply(&mut self, event: EntryEvent) -> Vec<Effect> {
        match event {
            EntryEvent::SelectDate(date) => {
                self.selected_date = date;
                vec![]
            }
            EntryEvent::SelectEntryType(entry_type) => {
                self.entry_type = entry_type;
                vec![]
            }
            EntryEvent::Speech(speech_event) => self.apply_speech(speech_event),
            EntryEvent::RecordSaved => {
                self.draft = EntryDraft::default();
                self.transcript.clear();
                vec![]
            }
        }
    }

    fn apply_speech(&mut self, event: SpeechEvent) -> Vec<Effect> {
        match event {
            SpeechEvent::ListeningChanged(is_listening) => {
                if is_listening {
                    self.transcript.clear();
                }
                self.is_listening = is_listening;
                vec![]
            }
            SpeechEvent::InterimTranscript(text) => {
                self.transcript = text;
                vec![]
            }
            SpeechEvent::FinalTranscript(text) => {
                let effects = match parse_transcript(&text) {
                    TranscriptParse::Parsed(parsed) => {
                        self.entry_type = infer_entry_type(&text);
                        self.draft = EntryDraft {
                            customer_name: parsed.customer_name.to_string(),
                            quantity: Some(parsed.quantity),
                            amount: Some(parsed.amount),
                            payment_status: parsed.payment_status,
                        };

                        vec![
                            Effect::EnsureCustomer(parsed.customer_name),
                            Effect::Notify(Notice::Parsed),
                        ]
                    }
                    TranscriptParse::NoMatch => vec![Effect::Notify(Notice::NoMatch)],
                };

                self.transcript = text;
                effects
            }
            SpeechEvent::Error(kind) => {
                self.is_listening = false;

                let notice = match kind {
                    CaptureErrorKind::NoSpeech => Notice::NoSpeech,
                    CaptureErrorKind::PermissionDenied => Notice::PermissionDenied,
                    CaptureErrorKind::Other => Notice::CaptureFailed,
                };

                vec![Effect::Notify(notice)]
            }
        }
    }
}

#[cfg(test)]
mod entry_state_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        customer::CustomerName,
        db::initialize,
        entry::{EntryDraft, EntryType, assemble},
        record::{EntryKind, PaymentStatus, create_record},
        speech::{CaptureErrorKind, SpeechEvent},
    };

    use super::{Effect, EntryEvent, EntryState, Notice};

    fn final_transcript(text: &str) -> EntryEvent {
        EntryEvent::Speech(SpeechEvent::FinalTranscript(text.to_owned()))
    }

    #[test]
    fn final_transcript_fills_draft_and_asks_for_customer() {
        let mut state = EntryState::new(date!(2025 - 06 - 01));

        let effects = state.apply(final_transcript("ram ko 5 litre doodh 200 rupees"));

        assert_eq!(
            effects,
            vec![
                Effect::EnsureCustomer(CustomerName::new_unchecked("Ram")),
                Effect::Notify(Notice::Parsed),
            ]
        );
        assert_eq!(
            state.draft,
            EntryDraft {
                customer_name: "Ram".to_owned(),
                quantity: Some(5.0),
                amount: Some(200.0),
                payment_status: PaymentStatus::Due,
            }
        );
        assert_eq!(state.entry_type, EntryType::Milk);
        assert_eq!(state.transcript, "ram ko 5 litre doodh 200 rupees");
    }

    #[test]
    fn paid_transcript_selects_payment() {
        let mut state = EntryState::new(date!(2025 - 06 - 01));

        state.apply(final_transcript("Sita 300 paid"));

        assert_eq!(state.entry_type, EntryType::Payment);
        assert_eq!(state.draft.amount, Some(300.0));
        assert_eq!(state.draft.payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn unmatched_transcript_keeps_draft_and_asks_to_retry() {
        let mut state = EntryState::new(date!(2025 - 06 - 01));
        state.apply(final_transcript("ram 5 litre 200"));
        let draft_before = state.draft.clone();

        let effects = state.apply(final_transcript("hello there"));

        assert_eq!(effects, vec![Effect::Notify(Notice::NoMatch)]);
        assert_eq!(state.draft, draft_before);
        assert_eq!(state.transcript, "hello there");
    }

    #[test]
    fn stopping_after_a_final_transcript_keeps_the_draft() {
        let mut state = EntryState::new(date!(2025 - 06 - 01));
        state.apply(EntryEvent::Speech(SpeechEvent::ListeningChanged(true)));
        state.apply(final_transcript("mohan 500 paid"));

        let effects = state.apply(EntryEvent::Speech(SpeechEvent::ListeningChanged(false)));

        assert!(effects.is_empty());
        assert!(!state.is_listening);
        assert_eq!(state.draft.customer_name, "Mohan");
        assert_eq!(state.transcript, "mohan 500 paid");
    }

    #[test]
    fn starting_to_listen_clears_the_transcript() {
        let mut state = EntryState::new(date!(2025 - 06 - 01));
        state.apply(EntryEvent::Speech(SpeechEvent::InterimTranscript(
            "ram".to_owned(),
        )));

        state.apply(EntryEvent::Speech(SpeechEvent::ListeningChanged(true)));

        assert!(state.is_listening);
        assert!(state.transcript.is_empty());
    }

    #[test]
    fn capture_errors_stop_listening_and_notify() {
        let cases = [
            (CaptureErrorKind::NoSpeech, Notice::NoSpeech),
            (CaptureErrorKind::PermissionDenied, Notice::PermissionDenied),
            (CaptureErrorKind::Other, Notice::CaptureFailed),
        ];

        for (kind, want_notice) in cases {
            let mut state = EntryState::new(date!(2025 - 06 - 01));
            state.apply(EntryEvent::Speech(SpeechEvent::ListeningChanged(true)));

            let effects = state.apply(EntryEvent::Speech(SpeechEvent::Error(kind)));

            assert_eq!(effects, vec![Effect::Notify(want_notice)]);
            assert!(!state.is_listening);
        }
    }

    #[test]
    fn saving_a_record_clears_the_draft_but_keeps_date_and_type() {
        let mut state = EntryState::new(date!(2025 - 06 - 01));
        state.apply(EntryEvent::SelectDate(date!(2025 - 05 - 29)));
        state.apply(final_transcript("mohan 500 paid"));

        state.apply(EntryEvent::RecordSaved);

        assert_eq!(state.draft, EntryDraft::default());
        assert_eq!(state.selected_date, date!(2025 - 05 - 29));
        assert_eq!(state.entry_type, EntryType::Payment);
        assert!(state.transcript.is_empty());
    }

    #[test]
    fn spoken_due_balance_is_saved_as_due() {
        let mut connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let mut state = EntryState::new(date!(2025 - 06 - 01));

        state.apply(final_transcript("radha 200 baaki"));
        let entry = assemble(&state.draft, state.entry_type, state.selected_date).unwrap();
        let record = create_record(entry.record, &mut connection).unwrap();

        assert_eq!(state.entry_type, EntryType::Milk);
        assert_eq!(record.customer_name, CustomerName::new_unchecked("Radha"));
        assert_eq!(record.quantity, 0.0);
        assert_eq!(record.amount, 200.0);
        assert_eq!(record.payment_status, PaymentStatus::Due);
        assert_eq!(record.kind(), EntryKind::Due);
    }
}
