use super::*;
use crate::doc::{ElementId, MemoryDocument, ReadyState};

// =============================================================
// Helpers
// =============================================================

fn page_with(classes: &[&str]) -> (MemoryDocument, Vec<ElementId>) {
    let mut doc = MemoryDocument::new();
    let ids = classes.iter().map(|c| doc.append(c)).collect();
    (doc, ids)
}

fn new_binder() -> Rc<Binder<MemoryDocument>> {
    Rc::new(Binder::new(BinderConfig::default()).unwrap())
}

/// Bind through the same path the page uses and return the shared binder.
fn attached(doc: &MemoryDocument) -> Rc<Binder<MemoryDocument>> {
    let binder = new_binder();
    binder.bind_when_ready(Some(doc)).unwrap();
    binder
}

fn click_n(doc: &mut MemoryDocument, id: ElementId, n: usize) {
    for _ in 0..n {
        doc.click(&id);
    }
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_rejects_invalid_config() {
    let config = BinderConfig { marker_class: String::new(), ..Default::default() };
    assert!(Binder::<MemoryDocument>::new(config).is_err());
}

#[test]
fn new_binder_is_unbound() {
    let binder = new_binder();
    assert!(!binder.is_bound());
    assert!(binder.bound().is_empty());
    assert_eq!(binder.config().marker_class, "toggle-image");
}

// =============================================================
// Readiness
// =============================================================

#[test]
fn loading_document_binds_nothing_until_ready() {
    let mut doc = MemoryDocument::loading();
    let first = doc.append("toggle-image");

    let binder = attached(&doc);

    assert!(!binder.is_bound());
    assert_eq!(doc.pending_ready(), 1);
    assert_eq!(doc.click_listeners(&first), 0);
    assert_eq!(doc.click(&first), 0);
    assert_eq!(doc.class_attr(&first).as_deref(), Some("toggle-image"));
}

#[test]
fn ready_binds_every_marker_element_parsed_by_then() {
    let mut doc = MemoryDocument::loading();
    let first = doc.append("toggle-image");
    let binder = attached(&doc);
    let second = doc.append("toggle-image");
    doc.append("video-player");

    assert_eq!(doc.fire_ready(), 1);

    assert_eq!(doc.ready_state(), ReadyState::Interactive);
    assert_eq!(binder.bound(), &[first, second]);
    assert_eq!(doc.click_listeners(&first), 1);
    assert_eq!(doc.click_listeners(&second), 1);

    doc.click(&second);
    assert_eq!(doc.class_attrs(), ["toggle-image", "toggle-image expanded", "video-player"]);
}

#[test]
fn ready_fires_only_once() {
    let mut doc = MemoryDocument::loading();
    let id = doc.append("toggle-image");
    attached(&doc);

    assert_eq!(doc.fire_ready(), 1);
    assert_eq!(doc.fire_ready(), 0);
    assert_eq!(doc.click_listeners(&id), 1);
}

#[test]
fn parsed_document_binds_immediately() {
    let (doc, ids) = page_with(&["toggle-image"]);
    let binder = attached(&doc);

    assert!(binder.is_bound());
    assert_eq!(doc.pending_ready(), 0);
    assert_eq!(doc.click_listeners(&ids[0]), 1);
}

#[test]
fn missing_document_is_noop() {
    let binder = new_binder();
    assert!(binder.bind_when_ready(None).is_ok());
    assert!(!binder.is_bound());
}

// =============================================================
// Bind
// =============================================================

#[test]
fn bind_selects_marker_elements_only() {
    let (doc, ids) = page_with(&["toggle-image", "video-player", "toggle-image"]);
    let binder = attached(&doc);
    assert_eq!(binder.bound(), &[ids[0], ids[2]]);
    assert_eq!(doc.click_listeners(&ids[1]), 0);
}

#[test]
fn bind_with_no_matches_is_silent_noop() {
    let (doc, _) = page_with(&["post", "reply-link"]);
    let before = doc.class_attrs();

    let binder = attached(&doc);

    assert!(binder.is_bound());
    assert!(binder.bound().is_empty());
    assert_eq!(doc.class_attrs(), before);
}

#[test]
fn bind_on_empty_document() {
    let doc = MemoryDocument::new();
    let binder = attached(&doc);
    assert!(binder.bound().is_empty());
}

#[test]
fn second_bind_neither_reselects_nor_double_registers() {
    let (mut doc, ids) = page_with(&["toggle-image"]);
    let binder = attached(&doc);
    let late = doc.append("toggle-image");

    binder.bind_when_ready(Some(&doc)).unwrap();
    assert_eq!(binder.attach(&doc).unwrap(), 1);

    assert_eq!(binder.bound(), &[ids[0]]);
    assert_eq!(doc.click_listeners(&ids[0]), 1);
    assert_eq!(doc.click_listeners(&late), 0);

    doc.click(&ids[0]);
    assert_eq!(doc.class_attr(&ids[0]).as_deref(), Some("toggle-image expanded"));
}

#[test]
fn bind_twice_while_loading_registers_once() {
    let mut doc = MemoryDocument::loading();
    let id = doc.append("toggle-image");
    let binder = attached(&doc);
    binder.bind_when_ready(Some(&doc)).unwrap();

    assert_eq!(doc.fire_ready(), 2);
    assert_eq!(doc.click_listeners(&id), 1);
}

#[test]
fn custom_classes_are_used() {
    let mut doc = MemoryDocument::new();
    let zoom = doc.append("zoomable");
    let plain = doc.append("toggle-image");

    let config = BinderConfig::from_json(r#"{"marker_class": "zoomable", "expanded_class": "big"}"#).unwrap();
    let binder = Rc::new(Binder::new(config).unwrap());
    binder.bind_when_ready(Some(&doc)).unwrap();

    assert_eq!(doc.click(&zoom), 1);
    assert_eq!(doc.click(&plain), 0);
    assert_eq!(doc.class_attr(&zoom).as_deref(), Some("zoomable big"));
    assert_eq!(doc.class_attr(&plain).as_deref(), Some("toggle-image"));
}

// =============================================================
// Click
// =============================================================

#[test]
fn single_element_click_twice() {
    let (mut doc, ids) = page_with(&["toggle-image"]);
    attached(&doc);

    doc.click(&ids[0]);
    assert_eq!(doc.class_attr(&ids[0]).as_deref(), Some("toggle-image expanded"));

    doc.click(&ids[0]);
    assert_eq!(doc.class_attr(&ids[0]).as_deref(), Some("toggle-image"));
}

#[test]
fn on_click_reports_new_state() {
    let (mut doc, ids) = page_with(&["toggle-image"]);
    let binder = new_binder();
    binder.bind(&doc).unwrap();

    assert_eq!(binder.on_click(&mut doc, &ids[0]).unwrap(), Action::Toggled(ToggleState::Expanded));
    assert_eq!(binder.on_click(&mut doc, &ids[0]).unwrap(), Action::Toggled(ToggleState::Collapsed));
}

#[test]
fn clicking_second_of_three_twice_restores_all() {
    let (mut doc, ids) = page_with(&["toggle-image", "toggle-image", "toggle-image"]);
    let before = doc.class_attrs();
    attached(&doc);

    click_n(&mut doc, ids[1], 2);

    assert_eq!(doc.class_attrs(), before);
}

#[test]
fn click_never_touches_other_elements() {
    let (mut doc, ids) = page_with(&["toggle-image", "toggle-image", "toggle-image"]);
    let binder = attached(&doc);

    doc.click(&ids[1]);

    assert_eq!(binder.state_of(&doc, &ids[0]), Some(ToggleState::Collapsed));
    assert_eq!(binder.state_of(&doc, &ids[1]), Some(ToggleState::Expanded));
    assert_eq!(binder.state_of(&doc, &ids[2]), Some(ToggleState::Collapsed));
}

#[test]
fn click_parity_decides_state() {
    let (mut doc, ids) = page_with(&["toggle-image"]);
    let binder = attached(&doc);

    for n in 1..=6 {
        doc.click(&ids[0]);
        let expected = if n % 2 == 1 { ToggleState::Expanded } else { ToggleState::Collapsed };
        assert_eq!(binder.state_of(&doc, &ids[0]), Some(expected), "after {n} clicks");
    }
}

#[test]
fn initially_expanded_markup_is_respected() {
    let (mut doc, ids) = page_with(&["toggle-image expanded"]);
    let binder = attached(&doc);

    assert_eq!(binder.state_of(&doc, &ids[0]), Some(ToggleState::Expanded));
    doc.click(&ids[0]);
    assert_eq!(doc.class_attr(&ids[0]).as_deref(), Some("toggle-image"));
}

#[test]
fn element_added_after_bind_is_ignored() {
    let (mut doc, _) = page_with(&["toggle-image"]);
    let binder = attached(&doc);
    let late = doc.append("toggle-image");

    assert_eq!(doc.click(&late), 0);
    assert_eq!(binder.on_click(&mut doc, &late).unwrap(), Action::Ignored);
    assert_eq!(binder.state_of(&doc, &late), None);
    assert_eq!(doc.class_attr(&late).as_deref(), Some("toggle-image"));
}

#[test]
fn click_before_bind_is_ignored() {
    let (mut doc, ids) = page_with(&["toggle-image"]);
    let binder = new_binder();

    assert_eq!(binder.on_click(&mut doc, &ids[0]).unwrap(), Action::Ignored);
    assert_eq!(doc.class_attr(&ids[0]).as_deref(), Some("toggle-image"));
}

#[test]
fn bound_element_losing_marker_still_toggles() {
    let (mut doc, ids) = page_with(&["toggle-image"]);
    attached(&doc);

    doc.toggle_class(&ids[0], "toggle-image").unwrap();
    doc.click(&ids[0]);

    assert_eq!(doc.class_attr(&ids[0]).as_deref(), Some("expanded"));
}

// =============================================================
// ToggleState
// =============================================================

#[test]
fn toggle_state_from_present() {
    assert_eq!(ToggleState::from_present(true), ToggleState::Expanded);
    assert_eq!(ToggleState::from_present(false), ToggleState::Collapsed);
}
