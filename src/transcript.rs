//! Turns a spoken phrase such as "ram ko 5 litre doodh 200 rupees" into the
//! fields of a record.
//!
//! Phrases are matched against a short, ordered list of patterns and the
//! first match wins. The payment status is then decided by looking for
//! keywords anywhere in the phrase, with "paid" keywords taking precedence
//! over "litre" keywords. Phrases that match nothing produce
//! [TranscriptParse::NoMatch] so the user can be asked to try again.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    customer::CustomerName,
    entry::EntryType,
    record::{EntryKind, PaymentStatus},
};

const PAID_KEYWORDS: [&str; 4] = ["paid", "दे दिया", "दिया", "pay"];
const LITRE_KEYWORDS: [&str; 3] = ["litre", "लीटर", "liter"];
const ABSENT_KEYWORDS: [&str; 2] = ["absent", "गैरहाजिर"];

static PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    const NAME: &str = r"(?P<name>\w+)";
    const CURRENCY: &str = r"(?:₹|rupees|रुपए|rs)";
    const QUANTITY: &str = r"(?P<first>[0-9]+(?:\.[0-9]+)?)";
    const LITRE: &str = r"(?:litre|लीटर|liter)";

    [
        format!(
            r"{NAME}\s*(?:ko|को)?\s*{QUANTITY}\s*{LITRE}\s*(?:doodh|दूध|milk)?\s*{CURRENCY}?\s*(?P<second>[0-9]+)"
        ),
        format!(r"{NAME}\s*{QUANTITY}\s*{LITRE}\s*{CURRENCY}?\s*(?P<second>[0-9]+)"),
        format!(r"{NAME}\s*{CURRENCY}?\s*(?P<first>[0-9]+)\s*(?:paid|दे दिया|दिया|pay)"),
        format!(r"{NAME}\s*{CURRENCY}?\s*(?P<first>[0-9]+)\s*(?:remaining|बाकी|baaki|due)"),
    ]
    .map(|pattern| Regex::new(&pattern).expect("transcript patterns are valid regular expressions"))
});

/// The record fields recognised in a transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTranscript {
    /// The customer's name with its first letter capitalised.
    pub customer_name: CustomerName,
    /// Litres of milk, zero for payments and due balances.
    pub quantity: f64,
    /// Rupees.
    pub amount: f64,
    /// Paid if the phrase contains a paid keyword, otherwise due.
    pub payment_status: PaymentStatus,
}

impl ParsedTranscript {
    /// How the parsed values would be classified once saved.
    pub fn entry_kind(&self) -> EntryKind {
        EntryKind::classify(self.quantity, self.amount, self.payment_status)
    }
}

/// The outcome of parsing a transcript.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptParse {
    /// The transcript matched one of the known phrasings.
    Parsed(ParsedTranscript),
    /// The transcript did not match any known phrasing.
    NoMatch,
}

/// Parse a final speech transcript into record fields.
///
/// The transcript is lower-cased and trimmed first, so the result only
/// depends on the text and calling this twice gives the same answer.
pub fn parse_transcript(transcript: &str) -> TranscriptParse {
    let text = transcript.trim().to_lowercase();

    let parsed = PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(&text))
        .and_then(|captures| extract_fields(&text, &captures));

    match parsed {
        Some(parsed) => TranscriptParse::Parsed(parsed),
        None => TranscriptParse::NoMatch,
    }
}

/// Guess the entry type the speaker meant from the words in `transcript`.
///
/// Any paid keyword the parser knows selects a payment, so a phrase parsed as
/// paid is never assembled as milk.
pub fn infer_entry_type(transcript: &str) -> EntryType {
    let text = transcript.to_lowercase();

    if contains_any(&text, &ABSENT_KEYWORDS) {
        EntryType::Absent
    } else if contains_any(&text, &PAID_KEYWORDS) {
        EntryType::Payment
    } else {
        EntryType::Milk
    }
}

fn extract_fields(text: &str, captures: &Captures<'_>) -> Option<ParsedTranscript> {
    let customer_name = CustomerName::new_unchecked(&capitalize_first(&captures["name"]));
    let first = &captures["first"];
    let second = captures.name("second").map(|second| second.as_str());

    // Keyword checks look at the whole phrase, not just the matched groups,
    // so a phrase with both a paid and a litre keyword counts as a payment.
    let (quantity, amount, payment_status) = if contains_any(text, &PAID_KEYWORDS) {
        (0.0, parse_amount(first)?, PaymentStatus::Paid)
    } else if contains_any(text, &LITRE_KEYWORDS) {
        match second {
            Some(second) => (parse_quantity(first)?, parse_amount(second)?, PaymentStatus::Due),
            None => (0.0, parse_amount(first)?, PaymentStatus::Due),
        }
    } else {
        match second {
            Some(second) => (
                parse_quantity(first).unwrap_or(0.0),
                parse_amount(second)?,
                PaymentStatus::Due,
            ),
            None => (0.0, parse_amount(first)?, PaymentStatus::Due),
        }
    };

    Some(ParsedTranscript {
        customer_name,
        quantity,
        amount,
        payment_status,
    })
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

fn parse_quantity(digits: &str) -> Option<f64> {
    digits.parse::<f64>().ok().filter(|quantity| quantity.is_finite())
}

/// Amounts are whole rupees, anything after a decimal point is dropped.
fn parse_amount(digits: &str) -> Option<f64> {
    let whole = digits.split('.').next().unwrap_or(digits);

    whole.parse::<f64>().ok().filter(|amount| amount.is_finite())
}

fn capitalize_first(name: &str) -> String {
    let mut graphemes = name.graphemes(true);

    match graphemes.next() {
        Some(first) => format!("{}{}", first.to_uppercase(), graphemes.as_str()),
        None => String::new(),
    }
}

#[cfg(test)]
mod parse_transcript_tests {
    use crate::{
        customer::CustomerName,
        record::{EntryKind, PaymentStatus},
    };

    use super::{ParsedTranscript, TranscriptParse, parse_transcript};

    #[track_caller]
    fn assert_parsed(
        transcript: &str,
        name: &str,
        quantity: f64,
        amount: f64,
        payment_status: PaymentStatus,
    ) {
        assert_eq!(
            parse_transcript(transcript),
            TranscriptParse::Parsed(ParsedTranscript {
                customer_name: CustomerName::new_unchecked(name),
                quantity,
                amount,
                payment_status,
            }),
            "unexpected parse for {transcript:?}"
        );
    }

    #[test]
    fn milk_sale_with_connector_and_currency() {
        assert_parsed(
            "ram ko 5 litre doodh 200 rupees",
            "Ram",
            5.0,
            200.0,
            PaymentStatus::Due,
        );
        assert_parsed("Ram ko 5 litre ₹200", "Ram", 5.0, 200.0, PaymentStatus::Due);
    }

    #[test]
    fn milk_sale_without_connector() {
        assert_parsed("shyam 2.5 liter 100", "Shyam", 2.5, 100.0, PaymentStatus::Due);
    }

    #[test]
    fn milk_sale_in_devanagari() {
        assert_parsed("राम को 3 लीटर दूध 150", "राम", 3.0, 150.0, PaymentStatus::Due);
    }

    #[test]
    fn payment_without_quantity() {
        assert_parsed("mohan 500 paid", "Mohan", 0.0, 500.0, PaymentStatus::Paid);
        assert_parsed("mohan ₹500 दिया", "Mohan", 0.0, 500.0, PaymentStatus::Paid);
        assert_parsed("Sita rupees 300 दे दिया", "Sita", 0.0, 300.0, PaymentStatus::Paid);
    }

    #[test]
    fn due_balance() {
        assert_parsed("radha 200 baaki", "Radha", 0.0, 200.0, PaymentStatus::Due);
        assert_parsed("radha rs 200 remaining", "Radha", 0.0, 200.0, PaymentStatus::Due);
    }

    #[test]
    fn paid_keyword_wins_over_litre_keyword() {
        // The first numeric group is used as the amount.
        assert_parsed("ram 5 litre 200 paid", "Ram", 0.0, 5.0, PaymentStatus::Paid);
    }

    #[test]
    fn unrecognised_phrases_do_not_match() {
        assert_eq!(parse_transcript("hello there"), TranscriptParse::NoMatch);
        assert_eq!(parse_transcript(""), TranscriptParse::NoMatch);
        assert_eq!(parse_transcript("mohan absent"), TranscriptParse::NoMatch);
        assert_eq!(parse_transcript("5 litre"), TranscriptParse::NoMatch);
    }

    #[test]
    fn only_the_first_letter_is_capitalised() {
        assert_parsed("rAM 500 paid", "Ram", 0.0, 500.0, PaymentStatus::Paid);
        assert_parsed("  GOPAL 1 litre 60  ", "Gopal", 1.0, 60.0, PaymentStatus::Due);
    }

    #[test]
    fn parsing_is_repeatable() {
        let transcript = "ram ko 5 litre doodh 200 rupees";

        assert_eq!(parse_transcript(transcript), parse_transcript(transcript));
    }

    #[test]
    fn parsed_values_have_an_entry_kind() {
        let TranscriptParse::Parsed(milk) = parse_transcript("ram 5 litre 200") else {
            panic!("want a parsed transcript");
        };
        let TranscriptParse::Parsed(payment) = parse_transcript("mohan 500 paid") else {
            panic!("want a parsed transcript");
        };
        let TranscriptParse::Parsed(due) = parse_transcript("radha 200 baaki") else {
            panic!("want a parsed transcript");
        };

        assert_eq!(milk.entry_kind(), EntryKind::MilkSale);
        assert_eq!(payment.entry_kind(), EntryKind::Payment);
        assert_eq!(due.entry_kind(), EntryKind::Due);
    }
}
