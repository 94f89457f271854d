//! Loading state coordinator tests
//!
//! Image skeleton lifecycle, busy buttons, data-skeleton placeholders and
//! overlays against a small page.

use std::time::Duration;

use folio_dom::{Document, Fragment, FragmentNode, NodeId, SelectorList};
use folio_enhance::{EnhanceError, LoadingConfig, LoadingStates, PageEvent, TrackedKind, VisualState};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn page(content: Vec<FragmentNode>) -> Document {
    let mut doc = Document::new("https://example.com/");
    let body = doc.body();
    doc.append_fragment(body, &content.into_iter().collect()).unwrap();
    doc
}

fn by_id(doc: &Document, id: &str) -> NodeId {
    let sel = SelectorList::parse(&format!("#{id}")).unwrap();
    doc.query_selector_all(&sel)[0]
}

fn count(doc: &Document, selector: &str) -> usize {
    doc.query_selector_all(&SelectorList::parse(selector).unwrap()).len()
}

fn lazy_img(id: &str) -> FragmentNode {
    FragmentNode::element("img")
        .attr("id", id)
        .attr("loading", "lazy")
        .attr("src", &format!("/img/{id}.avif"))
}

fn coordinator(doc: &mut Document) -> LoadingStates {
    let mut states = LoadingStates::new(LoadingConfig::default());
    states.initialize(doc).unwrap();
    states
}

// ============================================================================
// IMAGE SKELETONS
// ============================================================================

#[test]
fn test_lazy_image_gets_wrapped() {
    let mut doc = page(vec![lazy_img("hero").attr("width", "640").attr("height", "480")]);
    let states = coordinator(&mut doc);
    let img = by_id(&doc, "hero");

    assert_eq!(states.state(img), Some(VisualState::SkeletonShown));
    assert_eq!(
        doc.inner_html(doc.body()),
        concat!(
            r#"<div class="image-loading-wrapper" style="position: relative; display: inline-block; width: 640px; height: 480px;">"#,
            r#"<img id="hero" loading="lazy" src="/img/hero.avif" width="640" height="480" class="fade-in">"#,
            r#"<div class="image-skeleton" style="position: absolute; top: 0; left: 0; right: 0; bottom: 0; z-index: 1;"></div>"#,
            "</div>"
        )
    );
}

#[test]
fn test_eager_images_are_left_alone() {
    let mut doc = page(vec![FragmentNode::element("img").attr("src", "/logo.svg")]);
    let _states = coordinator(&mut doc);
    assert_eq!(count(&doc, ".image-loading-wrapper"), 0);
}

#[test]
fn test_complete_image_never_shows_skeleton() {
    let mut doc = page(vec![lazy_img("cached")]);
    let img = by_id(&doc, "cached");
    doc.set_complete(img, true).unwrap();

    let states = coordinator(&mut doc);

    assert_eq!(states.state(img), Some(VisualState::Loaded));
    assert_eq!(states.placeholder(img), None);
    assert_eq!(count(&doc, ".image-skeleton"), 0);
    assert_eq!(doc.tree().parent(img), Some(doc.body()));
}

#[test]
fn test_load_success_fades_then_removes_placeholder() {
    let mut doc = page(vec![lazy_img("hero")]);
    let mut states = coordinator(&mut doc);
    let img = by_id(&doc, "hero");
    let skeleton = states.placeholder(img).unwrap();

    states.handle_event(&mut doc, PageEvent::Load(img)).unwrap();
    assert_eq!(states.state(img), Some(VisualState::Loaded));
    assert!(doc.has_class(img, "loaded"));
    assert_eq!(doc.style_property(skeleton, "opacity").as_deref(), Some("0"));

    // Still in the tree during the fade
    states.advance(&mut doc, ms(299));
    assert!(doc.tree().is_connected(skeleton));

    states.advance(&mut doc, ms(1));
    assert!(!doc.tree().is_connected(skeleton));
    assert_eq!(states.state(img), None);
    assert_eq!(states.pending_timers(), 0);
}

#[test]
fn test_load_success_is_idempotent() {
    let mut doc = page(vec![lazy_img("hero")]);
    let mut states = coordinator(&mut doc);
    let img = by_id(&doc, "hero");

    states.on_load_success(&mut doc, img).unwrap();
    states.on_load_success(&mut doc, img).unwrap();
    assert_eq!(states.pending_timers(), 1);

    states.advance(&mut doc, ms(300));
    states.on_load_success(&mut doc, img).unwrap();
    states.advance(&mut doc, ms(300));

    assert_eq!(count(&doc, ".image-skeleton"), 0);
    assert_eq!(count(&doc, ".image-loading-wrapper"), 1);
}

#[test]
fn test_load_failure_is_terminal() {
    let mut doc = page(vec![lazy_img("broken")]);
    let mut states = coordinator(&mut doc);
    let img = by_id(&doc, "broken");
    let skeleton = states.placeholder(img).unwrap();

    states.handle_event(&mut doc, PageEvent::Error(img)).unwrap();
    assert_eq!(states.state(img), Some(VisualState::Error));
    assert!(doc.inner_html(skeleton).contains("Failed to load"));

    // A late load event cannot flip it to loaded
    states.handle_event(&mut doc, PageEvent::Load(img)).unwrap();
    states.advance(&mut doc, ms(10_000));
    assert_eq!(states.state(img), Some(VisualState::Error));
    assert!(!doc.has_class(img, "loaded"));
    assert!(doc.tree().is_connected(skeleton));
}

#[test]
fn test_error_after_load_is_ignored() {
    let mut doc = page(vec![lazy_img("hero")]);
    let mut states = coordinator(&mut doc);
    let img = by_id(&doc, "hero");
    let skeleton = states.placeholder(img).unwrap();

    states.on_load_success(&mut doc, img).unwrap();
    states.on_load_failure(&mut doc, img).unwrap();

    assert_eq!(states.state(img), Some(VisualState::Loaded));
    assert_eq!(doc.inner_html(skeleton), "");
}

#[test]
fn test_failure_is_local_to_one_image() {
    let mut doc = page(vec![lazy_img("a"), lazy_img("b")]);
    let mut states = coordinator(&mut doc);
    let (a, b) = (by_id(&doc, "a"), by_id(&doc, "b"));

    states.handle_event(&mut doc, PageEvent::Error(a)).unwrap();
    states.handle_event(&mut doc, PageEvent::Load(b)).unwrap();

    assert_eq!(states.state(a), Some(VisualState::Error));
    assert_eq!(states.state(b), Some(VisualState::Loaded));
}

#[test]
fn test_wrap_twice_is_rejected() {
    let mut doc = page(vec![lazy_img("hero")]);
    let mut states = coordinator(&mut doc);
    let img = by_id(&doc, "hero");

    let err = states.wrap_with_skeleton(&mut doc, img).unwrap_err();
    assert!(matches!(err, EnhanceError::AlreadyWrapped(id) if id == img));
    assert_eq!(count(&doc, ".image-skeleton"), 1);
}

#[test]
fn test_reinitialize_skips_wrapped_images() {
    let mut doc = page(vec![lazy_img("hero")]);
    let mut states = coordinator(&mut doc);
    states.initialize(&mut doc).unwrap();

    let mut fresh = LoadingStates::default();
    fresh.initialize(&mut doc).unwrap();

    assert_eq!(count(&doc, ".image-loading-wrapper"), 1);
}

#[test]
fn test_unknown_events_are_ignored() {
    let mut doc = page(vec![FragmentNode::element("p").attr("id", "text")]);
    let mut states = coordinator(&mut doc);
    let p = by_id(&doc, "text");

    for event in [PageEvent::Load(p), PageEvent::Error(p), PageEvent::Click(p), PageEvent::Submit(p)] {
        states.handle_event(&mut doc, event).unwrap();
    }
    assert_eq!(states.state(p), None);
}

// ============================================================================
// BUSY BUTTONS
// ============================================================================

#[test]
fn test_busy_roundtrip_restores_markup() {
    let contents: Vec<Fragment> = vec![
        Fragment::default(),
        FragmentNode::text("Send message").into(),
        [
            FragmentNode::element("svg").class("icon").child(FragmentNode::element("path").attr("d", "M0 0h24")),
            FragmentNode::element("span").child(FragmentNode::element("b").with_text("Send & go")),
            FragmentNode::text(" now"),
        ]
        .into_iter()
        .collect(),
    ];

    for content in contents {
        let mut doc = page(vec![FragmentNode::element("button").attr("id", "send").attr("class", "primary-button")]);
        let button = by_id(&doc, "send");
        doc.set_content(button, &content).unwrap();
        let before = doc.inner_html(button);

        let mut states = coordinator(&mut doc);
        states.show_button_busy(&mut doc, button).unwrap();
        assert_eq!(doc.inner_html(button), r#"<span class="loading-spinner"></span>Loading..."#);
        assert!(doc.has_class(button, "btn-loading"));
        assert!(doc.get_attribute(button, "disabled").is_some());

        states.hide_button_busy(&mut doc, button).unwrap();
        assert_eq!(doc.inner_html(button), before);
        assert!(!doc.has_class(button, "btn-loading"));
        assert!(doc.get_attribute(button, "disabled").is_none());
    }
}

#[test]
fn test_original_content_captured_once() {
    let mut doc = page(vec![FragmentNode::element("button").attr("id", "send").with_text("Send")]);
    let button = by_id(&doc, "send");
    let mut states = coordinator(&mut doc);

    states.show_button_busy(&mut doc, button).unwrap();
    states.show_button_busy(&mut doc, button).unwrap();
    states.hide_button_busy(&mut doc, button).unwrap();
    assert_eq!(doc.inner_html(button), "Send");

    states.show_button_busy(&mut doc, button).unwrap();
    states.hide_button_busy(&mut doc, button).unwrap();
    assert_eq!(doc.inner_html(button), "Send");
}

#[test]
fn test_link_styled_button_keeps_content() {
    let mut doc = page(vec![FragmentNode::element("form").child(
        FragmentNode::element("a").attr("id", "go").attr("class", "nav-button").with_text("Next"),
    )]);
    let link = by_id(&doc, "go");
    let mut states = coordinator(&mut doc);

    states.handle_event(&mut doc, PageEvent::Click(link)).unwrap();
    assert!(states.is_busy(link));
    assert!(doc.has_class(link, "btn-loading"));
    assert_eq!(doc.inner_html(link), "Next");
}

#[test]
fn test_text_button_class_gets_spinner() {
    let mut doc = page(vec![FragmentNode::element("form").child(
        FragmentNode::element("a").attr("id", "go").attr("class", "primary-button text-button").with_text("Go"),
    )]);
    let link = by_id(&doc, "go");
    let mut states = coordinator(&mut doc);

    states.handle_event(&mut doc, PageEvent::Click(link)).unwrap();
    assert_eq!(doc.inner_html(link), r#"<span class="loading-spinner"></span>Loading..."#);
}

#[test]
fn test_navigation_link_outside_form_never_busy() {
    let mut doc = page(vec![
        FragmentNode::element("nav").child(
            FragmentNode::element("a")
                .attr("id", "contact")
                .attr("href", "/contact.html")
                .attr("class", "nav-button")
                .with_text("Contact"),
        ),
    ]);
    let link = by_id(&doc, "contact");
    let mut states = coordinator(&mut doc);

    states.handle_event(&mut doc, PageEvent::Click(link)).unwrap();

    assert!(!states.is_busy(link));
    assert!(!doc.has_class(link, "btn-loading"));
    assert_eq!(states.pending_timers(), 0);
}

#[test]
fn test_click_on_descendant_reaches_button() {
    let mut doc = page(vec![FragmentNode::element("button")
        .attr("id", "send")
        .attr("class", "footer-button")
        .child(FragmentNode::element("span").attr("id", "label").with_text("Send"))]);
    let button = by_id(&doc, "send");
    let label = by_id(&doc, "label");
    let mut states = coordinator(&mut doc);

    states.handle_event(&mut doc, PageEvent::Click(label)).unwrap();
    assert!(states.is_busy(button));
}

#[test]
fn test_click_busy_auto_clears() {
    let mut doc = page(vec![FragmentNode::element("button")
        .attr("id", "send")
        .attr("class", "primary-button")
        .with_text("Send")]);
    let button = by_id(&doc, "send");
    let mut states = coordinator(&mut doc);

    states.handle_event(&mut doc, PageEvent::Click(button)).unwrap();
    states.advance(&mut doc, ms(2999));
    assert!(states.is_busy(button));

    states.advance(&mut doc, ms(1));
    assert!(!states.is_busy(button));
    assert_eq!(doc.inner_html(button), "Send");
}

#[test]
fn test_early_completion_cancels_auto_clear() {
    let mut doc = page(vec![FragmentNode::element("form")
        .attr("id", "contact")
        .child(FragmentNode::element("button").attr("id", "send").attr("type", "submit").with_text("Send"))]);
    let form = by_id(&doc, "contact");
    let button = by_id(&doc, "send");
    let mut states = coordinator(&mut doc);

    states.handle_event(&mut doc, PageEvent::Click(button)).unwrap();
    states.advance(&mut doc, ms(1000));
    states.complete_submission(&mut doc, form).unwrap();
    assert!(!states.is_busy(button));
    assert_eq!(states.pending_timers(), 0);

    // A second submission must not be cleared by the first click's timer
    states.advance(&mut doc, ms(1000));
    states.handle_event(&mut doc, PageEvent::Click(button)).unwrap();
    states.advance(&mut doc, ms(1000));
    assert!(states.is_busy(button));

    states.advance(&mut doc, ms(2000));
    assert!(!states.is_busy(button));
}

#[test]
fn test_busy_timeout_can_be_disabled() {
    let mut doc = page(vec![FragmentNode::element("button").attr("id", "send").attr("type", "submit")]);
    let button = by_id(&doc, "send");
    let mut states = LoadingStates::new(LoadingConfig { busy_timeout: None, ..LoadingConfig::default() });
    states.initialize(&mut doc).unwrap();

    states.handle_event(&mut doc, PageEvent::Click(button)).unwrap();
    states.advance(&mut doc, ms(60_000));
    assert!(states.is_busy(button));
}

#[test]
fn test_submit_marks_submit_control() {
    let mut doc = page(vec![FragmentNode::element("form")
        .attr("id", "contact")
        .child(FragmentNode::element("input").attr("name", "email"))
        .child(FragmentNode::element("input").attr("id", "go").attr("type", "submit").attr("value", "Send"))]);
    let form = by_id(&doc, "contact");
    let submit = by_id(&doc, "go");
    let mut states = coordinator(&mut doc);

    states.handle_event(&mut doc, PageEvent::Submit(form)).unwrap();
    assert!(states.is_busy(submit));
    assert!(doc.get_attribute(submit, "disabled").is_some());

    states.complete_submission(&mut doc, form).unwrap();
    assert!(!states.is_busy(submit));
    assert_eq!(doc.get_attribute(submit, "value"), Some("Send"));
}

// ============================================================================
// DATA-SKELETON PLACEHOLDERS
// ============================================================================

#[test]
fn test_data_skeleton_kinds() {
    let mut doc = page(vec![
        FragmentNode::element("h2").attr("id", "title").attr("data-skeleton", "text-short"),
        FragmentNode::element("p").attr("id", "body").attr("data-skeleton", "text"),
        FragmentNode::element("figure").attr("id", "figure").attr("data-skeleton", "image"),
        FragmentNode::element("section").attr("id", "card").attr("data-skeleton", "card"),
    ]);
    let figure = by_id(&doc, "figure");
    doc.set_layout_box(figure, folio_dom::DOMRect::from_xywh(0.0, 0.0, 300.0, 180.0));

    let states = coordinator(&mut doc);

    assert_eq!(
        doc.inner_html(doc.body()),
        concat!(
            r#"<div class="text-skeleton short"></div><h2 id="title" data-skeleton="text-short" style="display: none;"></h2>"#,
            r#"<div class="text-skeleton"></div><p id="body" data-skeleton="text" style="display: none;"></p>"#,
            r#"<div class="image-skeleton" style="height: 180px;"></div><figure id="figure" data-skeleton="image" style="display: none;"></figure>"#,
            r#"<div class="skeleton"></div><section id="card" data-skeleton="card" style="display: none;"></section>"#,
        )
    );
    assert_eq!(states.state(figure), Some(VisualState::SkeletonShown));
}

#[test]
fn test_reveal_removes_own_placeholder_only() {
    let mut doc = page(vec![
        FragmentNode::element("p").attr("id", "first").attr("data-skeleton", "text"),
        FragmentNode::element("p").attr("id", "second").attr("data-skeleton", "text"),
    ]);
    let mut states = coordinator(&mut doc);
    let (first, second) = (by_id(&doc, "first"), by_id(&doc, "second"));
    let first_placeholder = states.placeholder(first).unwrap();
    let second_placeholder = states.placeholder(second).unwrap();

    assert!(states.reveal_tracked(&mut doc, second).unwrap());

    assert!(doc.tree().is_connected(first_placeholder));
    assert!(!doc.tree().is_connected(second_placeholder));
    assert_eq!(doc.style_property(second, "display"), None);
    assert!(doc.has_class(second, "fade-in") && doc.has_class(second, "loaded"));
    assert_eq!(doc.style_property(first, "display").as_deref(), Some("none"));

    // Nothing left to reveal
    assert!(!states.reveal_tracked(&mut doc, second).unwrap());
}

#[test]
fn test_reveal_ignores_untracked() {
    let mut doc = page(vec![FragmentNode::element("p").attr("id", "plain")]);
    let mut states = coordinator(&mut doc);
    let plain = by_id(&doc, "plain");

    assert!(!states.reveal_tracked(&mut doc, plain).unwrap());
    assert!(!doc.has_class(plain, "loaded"));
}

#[test]
fn test_load_events_do_not_reveal_data_skeleton() {
    let mut doc = page(vec![FragmentNode::element("img").attr("id", "pic").attr("src", "/pic.avif").attr("data-skeleton", "image")]);
    let mut states = coordinator(&mut doc);
    let pic = by_id(&doc, "pic");
    let placeholder = states.placeholder(pic).unwrap();

    states.handle_event(&mut doc, PageEvent::Load(pic)).unwrap();
    states.handle_event(&mut doc, PageEvent::Error(pic)).unwrap();
    states.advance(&mut doc, ms(300));

    assert_eq!(states.state(pic), Some(VisualState::SkeletonShown));
    assert!(doc.tree().is_connected(placeholder));
    assert_eq!(doc.inner_html(placeholder), "");
    assert!(!doc.has_class(pic, "loaded"));
    assert_eq!(states.pending_timers(), 0);

    // The element still comes back the regular way
    assert!(states.reveal_tracked(&mut doc, pic).unwrap());
    assert!(!doc.tree().is_connected(placeholder));
    assert_eq!(doc.style_property(pic, "display"), None);
    assert!(doc.has_class(pic, "loaded"));
}

#[test]
fn test_lazy_image_with_data_skeleton_is_wrapped_not_hidden() {
    let mut doc = page(vec![lazy_img("hero").attr("data-skeleton", "image")]);
    let mut states = coordinator(&mut doc);
    let img = by_id(&doc, "hero");

    // Only the image skeleton; the element is never hidden
    assert_eq!(count(&doc, ".image-skeleton"), 1);
    assert_eq!(count(&doc, ".image-loading-wrapper"), 1);
    assert_eq!(doc.style_property(img, "display"), None);
    assert_eq!(states.tracked(img).map(|t| t.kind), Some(TrackedKind::Image));
    assert!(!states.reveal_tracked(&mut doc, img).unwrap());

    states.handle_event(&mut doc, PageEvent::Load(img)).unwrap();
    states.advance(&mut doc, ms(300));

    assert_eq!(count(&doc, ".image-skeleton"), 0);
    assert!(doc.has_class(img, "loaded"));
    assert_eq!(states.state(img), None);
}

#[test]
fn test_reveal_restores_inline_display() {
    let mut doc = page(vec![FragmentNode::element("ul")
        .attr("id", "nav")
        .attr("style", "display: flex; gap: 8px;")
        .attr("data-skeleton", "text")]);
    let mut states = coordinator(&mut doc);
    let nav = by_id(&doc, "nav");
    assert_eq!(doc.style_property(nav, "display").as_deref(), Some("none"));

    assert!(states.reveal_tracked(&mut doc, nav).unwrap());

    assert_eq!(doc.style_property(nav, "display").as_deref(), Some("flex"));
    assert_eq!(doc.style_property(nav, "gap").as_deref(), Some("8px"));
}

// ============================================================================
// OVERLAYS
// ============================================================================

#[test]
fn test_overlay_forces_positioning_context() {
    let mut doc = page(vec![FragmentNode::element("div").attr("id", "card").with_text("Pricing")]);
    let card = by_id(&doc, "card");
    let mut states = coordinator(&mut doc);

    let overlay = states.attach_overlay(&mut doc, card, true).unwrap();

    assert_eq!(doc.style_property(card, "position").as_deref(), Some("relative"));
    assert_eq!(doc.tree().parent(overlay), Some(card));
    assert_eq!(
        doc.outer_html(overlay),
        r#"<div class="loading-overlay dark"><div class="loading-spinner"></div></div>"#
    );

    assert!(states.detach_overlay(&mut doc, card));
    assert!(!states.detach_overlay(&mut doc, card));
    assert_eq!(doc.inner_html(card), "Pricing");
}

#[test]
fn test_overlay_keeps_explicit_position() {
    let mut doc = page(vec![FragmentNode::element("div").attr("id", "modal").attr("style", "position: fixed;")]);
    let modal = by_id(&doc, "modal");
    let mut states = coordinator(&mut doc);

    let overlay = states.attach_overlay(&mut doc, modal, false).unwrap();

    assert_eq!(doc.style_property(modal, "position").as_deref(), Some("fixed"));
    assert_eq!(doc.get_attribute(overlay, "class"), Some("loading-overlay"));
}

// ============================================================================
// TIMING CONFIGURATION
// ============================================================================

#[test]
fn test_immediate_config_runs_on_next_advance() {
    let mut doc = page(vec![lazy_img("hero")]);
    let mut states = LoadingStates::new(LoadingConfig::immediate());
    states.initialize(&mut doc).unwrap();
    let img = by_id(&doc, "hero");

    states.on_load_success(&mut doc, img).unwrap();
    states.advance(&mut doc, Duration::ZERO);

    assert_eq!(count(&doc, ".image-skeleton"), 0);
}
