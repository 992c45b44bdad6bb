//! The navigation bar shown at the top of every page.

use maud::{Markup, html};

use crate::endpoints;

/// A link in the navigation bar.
///
/// It will change appearance if `is_current` is set to
/// `true`. Only one link should be set as active at any one time.
#[derive(Clone)]
struct Link<'a> {
    url: &'a str,
    title: &'a str,
    is_current: bool,
}

pub struct NavBar<'a> {
    links: Vec<Link<'a>>,
}

impl NavBar<'_> {
    /// Get the navigation bar.
    ///
    /// If a link matches `active_endpoint`, then that link will be
    /// marked as active and displayed differently in the HTML.
    pub fn new(active_endpoint: &str) -> NavBar<'_> {
        let links = [
            (endpoints::ROOT, "आज / Today"),
            (endpoints::LEDGER_VIEW, "खाता / Ledger"),
            (endpoints::CUSTOMERS_VIEW, "ग्राहक / Customers"),
        ]
        .into_iter()
        .map(|(url, title)| Link {
            url,
            title,
            is_current: active_endpoint == url,
        })
        .collect();

        NavBar { links }
    }

    pub fn into_html(self) -> Markup {
        let link_class = |is_current: bool| -> &'static str {
            if is_current {
                "flex w-full items-center justify-center rounded-lg bg-orange-100 \
                px-3 py-2 text-sm font-semibold text-orange-700 shadow-sm \
                dark:bg-orange-900/30 dark:text-orange-200"
            } else {
                "flex w-full items-center justify-center rounded-lg px-3 py-2 \
                text-sm font-semibold text-gray-600 hover:bg-orange-50 \
                hover:text-orange-700 dark:text-gray-300 dark:hover:bg-orange-900/20"
            }
        };

        html!(
            nav class="bg-white/90 border-b border-gray-200 dark:bg-gray-900 dark:border-gray-700"
            {
                div class="max-w-md mx-auto px-4 py-3"
                {
                    a href=(endpoints::ROOT) class="block text-center mb-2"
                    {
                        span class="text-2xl font-bold text-orange-600 dark:text-orange-400"
                        {
                            "डेयरी बोली"
                        }
                        span class="ml-2 text-sm text-gray-500 dark:text-gray-400"
                        {
                            "Dairy Boli"
                        }
                    }

                    ul class="grid grid-cols-3 gap-2" aria-label="Primary"
                    {
                        @for link in self.links {
                            li {
                                a
                                    href=(link.url)
                                    class=(link_class(link.is_current))
                                    aria-current=[link.is_current.then_some("page")]
                                {
                                    (link.title)
                                }
                            }
                        }
                    }
                }
            }
        )
    }
}

#[cfg(test)]
mod nav_bar_tests {
    use std::collections::HashMap;

    use crate::{endpoints, navigation::NavBar};

    #[test]
    fn set_active_endpoint() {
        let mut cases = HashMap::new();
        cases.insert(endpoints::ROOT, true);
        cases.insert(endpoints::LEDGER_VIEW, true);
        cases.insert(endpoints::CUSTOMERS_VIEW, true);

        cases.insert(endpoints::COFFEE, false);
        cases.insert(endpoints::INTERNAL_ERROR_VIEW, false);
        cases.insert(endpoints::RECORDS_API, false);
        cases.insert(endpoints::SPEECH_API, false);

        for (endpoint, should_be_active) in cases {
            let nav_bar = NavBar::new(endpoint);

            assert_link_active(nav_bar, endpoint, should_be_active);
        }
    }

    #[track_caller]
    fn assert_link_active(nav_bar: NavBar<'_>, endpoint: &str, should_be_active: bool) {
        for link in nav_bar.links {
            if link.url == endpoint {
                assert_eq!(
                    link.is_current, should_be_active,
                    "link for {endpoint} should have is_current={should_be_active}"
                );
            } else {
                assert!(
                    !link.is_current,
                    "link for {} should be inactive when {endpoint} is active",
                    link.url
                );
            }
        }
    }
}
