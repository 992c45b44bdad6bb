use maud::{DOCTYPE, Markup, html};

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

// Link styles
pub const LINK_STYLE: &str = "text-orange-600 hover:text-orange-500 \
    dark:text-orange-400 dark:hover:text-orange-300 underline";

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-3 text-lg bg-orange-500
    dark:bg-orange-600 disabled:bg-orange-700 hover:enabled:bg-orange-600 \
    hover:enabled:dark:bg-orange-700 text-white rounded";

pub const BUTTON_SECONDARY_STYLE: &str = "py-2 px-3 text-sm font-medium \
    text-gray-900 bg-white rounded border border-gray-200 hover:bg-gray-100 \
    hover:text-orange-700 focus:z-10 dark:bg-gray-800 dark:text-gray-400 \
    dark:border-gray-600 dark:hover:text-white dark:hover:bg-gray-700";

pub const BUTTON_DELETE_STYLE: &str = "text-red-600 hover:text-red-500 \
    dark:text-red-500 dark:hover:text-red-400 underline bg-transparent \
    border-none cursor-pointer";

// Form styles
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-orange-600 focus:border-orange-600 \
    focus:dark:border-orange-500 focus:dark:ring-orange-500";
pub const FORM_RADIO_GROUP_STYLE: &str = "grid grid-cols-3 gap-2";
pub const FORM_RADIO_INPUT_STYLE: &str = "peer sr-only";
pub const FORM_RADIO_LABEL_STYLE: &str = "block text-center rounded border \
    border-gray-300 dark:border-gray-600 bg-white dark:bg-gray-700 px-3 py-2 \
    text-xs font-medium text-gray-700 dark:text-white cursor-pointer transition \
    hover:border-gray-400 hover:bg-gray-50 peer-checked:border-orange-600 \
    peer-checked:bg-orange-50 peer-checked:text-orange-700 \
    peer-checked:dark:bg-orange-600/20 peer-checked:dark:text-orange-200";

// Card styles
pub const CARD_STYLE: &str = "w-full p-6 rounded-lg shadow-sm bg-white \
    dark:bg-gray-800 border border-gray-200 dark:border-gray-700";
pub const CARD_TITLE_STYLE: &str = "text-lg font-semibold text-gray-800 dark:text-white mb-4";

// Table styles
pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub const TABLE_CELL_STYLE: &str = "px-3 py-3";

// Badge styles
pub const PAID_BADGE_STYLE: &str = "inline-flex items-center px-2 py-1 \
    text-xs font-medium rounded-full bg-green-100 text-green-800";
pub const DUE_BADGE_STYLE: &str = "inline-flex items-center px-2 py-1 \
    text-xs font-medium rounded-full bg-red-100 text-red-800";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center gap-6 px-4 py-8 mx-auto max-w-md text-gray-900 dark:text-white";

pub enum HeadElement {
    /// The file path or URL to a JavaScript script.
    ScriptLink(String),
}

pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="hi"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Dairy Boli" }
                link href="/static/main.css" rel="stylesheet";

                script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                script src="https://unpkg.com/htmx.org@2.0.8/dist/htmx.min.js" {}
                script src="https://unpkg.com/htmx-ext-response-targets@2.0.4/response-targets.js" {}

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::ScriptLink(path) => script src=(path) defer {}
                    }
                }
            }

            body
                hx-ext="response-targets"
                class="container max-w-full min-h-screen bg-gradient-to-br from-orange-50 to-green-50 dark:from-gray-900 dark:to-gray-900"
            {
                (content)

                // Alert container for out-of-band swaps
                div
                    id="alert-container"
                    class="hidden w-full max-w-md px-4"
                    style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
                {}
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    let content = html!(
        section
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-orange-600 dark:text-orange-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-orange-600
                            hover:bg-orange-800 font-medium rounded text-sm px-5
                            py-2.5 text-center my-4"
                    {
                        "वापस / Back to Home"
                    }
                }
            }
        }
    );

    base(title, &[], &content)
}

/// A "delete" button that asks for confirmation and removes `hx_target` when
/// the server responds.
pub fn delete_button(delete_url: &str, confirm_message: &str, hx_target: &str) -> Markup {
    html!(
        button
            type="button"
            hx-delete=(delete_url)
            hx-confirm=(confirm_message)
            hx-target=(hx_target)
            hx-target-error="#alert-container"
            hx-swap="delete"
            class=(BUTTON_DELETE_STYLE)
        {
            "हटाएं / Delete"
        }
    )
}

/// Format an amount of rupees, e.g. "₹1,200" or "₹12.50".
///
/// Whole amounts are shown without decimals since that is how amounts are
/// spoken and entered.
pub fn format_rupees(amount: f64) -> String {
    static WHOLE_FMT: OnceLock<Formatter> = OnceLock::new();
    static FRACTION_FMT: OnceLock<Formatter> = OnceLock::new();

    let whole_fmt = WHOLE_FMT.get_or_init(|| {
        Formatter::currency("₹")
            .unwrap()
            .precision(Precision::Decimals(0))
    });
    let fraction_fmt = FRACTION_FMT.get_or_init(|| {
        Formatter::currency("₹")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    let sign = if amount < 0.0 { "-" } else { "" };
    let amount = (amount.abs() * 100.0).round() / 100.0;

    if amount == 0.0 {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        return "₹0".to_owned();
    }

    if amount.fract() == 0.0 {
        return format!("{sign}{}", whole_fmt.fmt_string(amount));
    }

    let mut formatted_string = fraction_fmt.fmt_string(amount);

    // numfmt omits the last trailing zero, so we must add it ourselves
    // For example, "12.30" is rendered as "12.3" so we append "0".
    if formatted_string.as_bytes()[formatted_string.len() - 3] != b'.' {
        formatted_string = format!("{formatted_string}0");
    }

    format!("{sign}{formatted_string}")
}

/// Format a quantity of milk, e.g. "5L" or "2.5L".
pub fn format_litres(quantity: f64) -> String {
    let quantity = (quantity * 100.0).round() / 100.0;

    format!("{quantity}L")
}

#[cfg(test)]
mod tests {
    use super::{format_litres, format_rupees};

    #[test]
    fn formats_whole_rupees_without_decimals() {
        assert_eq!(format_rupees(200.0), "₹200");
        assert_eq!(format_rupees(0.0), "₹0");
    }

    #[test]
    fn formats_fractional_rupees_with_two_decimals() {
        assert_eq!(format_rupees(12.5), "₹12.50");
        assert_eq!(format_rupees(0.25), "₹0.25");
    }

    #[test]
    fn formats_litres_without_trailing_zeros() {
        assert_eq!(format_litres(5.0), "5L");
        assert_eq!(format_litres(2.5), "2.5L");
        assert_eq!(format_litres(0.1 + 0.2), "0.3L");
    }
}
