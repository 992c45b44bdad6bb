use scraper::{ElementRef, Html, Selector};

/// Get the first form matching `selector`, e.g. `"form[hx-post]"`.
#[track_caller]
pub(crate) fn must_get_form<'a>(html: &'a Html, selector: &str) -> ElementRef<'a> {
    html.select(&Selector::parse(selector).unwrap())
        .next()
        .unwrap_or_else(|| panic!("no form matching {selector:?}"))
}

#[track_caller]
pub(crate) fn assert_hx_endpoint(form: &ElementRef<'_>, endpoint: &str, attribute: &str) {
    let got = form
        .value()
        .attr(attribute)
        .unwrap_or_else(|| panic!("{attribute} attribute missing"));

    assert_eq!(
        got, endpoint,
        "want form with {attribute}=\"{endpoint}\", got {got:?}"
    );
}

/// Assert that `form` has a required input called `name` of type `type_`.
#[track_caller]
pub(crate) fn assert_form_input(form: &ElementRef<'_>, name: &str, type_: &str) {
    let selector = Selector::parse(&format!("input[name=\"{name}\"]")).unwrap();
    let input = form
        .select(&selector)
        .next()
        .unwrap_or_else(|| panic!("no input named {name:?}"));

    assert_eq!(input.value().attr("type"), Some(type_), "input {name:?}");
    assert!(
        input.value().attr("required").is_some(),
        "want input {name:?} to be required"
    );
}

#[track_caller]
pub(crate) fn assert_form_submit_button(form: &ElementRef<'_>) {
    let submit_buttons = form
        .select(&Selector::parse("button[type=submit]").unwrap())
        .count();

    assert_eq!(submit_buttons, 1, "want one submit button, got {submit_buttons}");
}
