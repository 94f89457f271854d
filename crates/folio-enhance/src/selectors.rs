//! Selectors the enhancers scan for

use std::sync::LazyLock;

use folio_dom::SelectorList;

fn parse(selector: &'static str) -> SelectorList {
    SelectorList::parse(selector).expect("static selector is valid")
}

/// Images with deferred loading: skeleton-wrapped and lazily fetched
pub static LAZY_IMAGES: LazyLock<SelectorList> = LazyLock::new(|| parse(r#"img[loading="lazy"]"#));

/// Controls that show a busy state when clicked
pub static BUSY_BUTTONS: LazyLock<SelectorList> = LazyLock::new(|| {
    parse(r#"button[type="submit"], .primary-button, .footer-button, .nav-button"#)
});

/// Submit controls inside a form
pub static SUBMIT_CONTROLS: LazyLock<SelectorList> =
    LazyLock::new(|| parse(r#"button[type="submit"], input[type="submit"]"#));

pub static FORMS: LazyLock<SelectorList> = LazyLock::new(|| parse("form"));

/// Elements hidden behind a generic placeholder until revealed
pub static SKELETON_TARGETS: LazyLock<SelectorList> = LazyLock::new(|| parse("[data-skeleton]"));

pub static LOADING_OVERLAY: LazyLock<SelectorList> = LazyLock::new(|| parse(".loading-overlay"));
