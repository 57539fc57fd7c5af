//! Unit tests for the stroke store.

use bevy::prelude::*;

use super::*;
use crate::annotation::{ShapeKind, Stroke};

fn line(x: f32) -> Stroke {
    Stroke::shape(
        ShapeKind::Line,
        Vec2::new(x, 0.0),
        Vec2::new(x, 10.0),
        Color::BLACK,
        2.0,
    )
}

#[test]
fn test_add_returns_index() {
    let mut store = PageAnnotations::new();

    assert_eq!(store.add_stroke(1, line(0.0)), 0);
    assert_eq!(store.add_stroke(1, line(1.0)), 1);
    assert_eq!(store.add_stroke(2, line(2.0)), 0);
    assert_eq!(store.stroke_count(), 3);
    assert_eq!(store.pages().collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn test_insert_clamps_and_keeps_order() {
    let mut store = PageAnnotations::new();
    let a = line(0.0);
    let b = line(1.0);
    let c = line(2.0);
    store.add_stroke(1, a.clone());
    store.add_stroke(1, c.clone());

    assert_eq!(store.insert_stroke_at(1, 1, b.clone()), 1);
    let ids: Vec<_> = store.strokes(1).iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![a.id, b.id, c.id]);

    assert_eq!(store.insert_stroke_at(1, 99, line(3.0)), 3);
}

#[test]
fn test_remove_drops_empty_page() {
    let mut store = PageAnnotations::new();
    let stroke = line(0.0);
    store.add_stroke(3, stroke.clone());

    assert!(store.remove_stroke_at(3, 1).is_none());
    assert_eq!(store.remove_stroke_at(3, 0), Some(stroke));
    assert!(store.is_empty());
    assert!(store.strokes(3).is_empty());
}

#[test]
fn test_replace_and_find_by_id() {
    let mut store = PageAnnotations::new();
    let first = line(0.0);
    let second = line(1.0);
    store.add_stroke(1, first.clone());
    store.add_stroke(1, second.clone());

    let replacement = line(5.0);
    let previous = store.replace_stroke_at(1, 0, replacement.clone());
    assert_eq!(previous, Some(first.clone()));
    assert_eq!(store.find_by_id(1, replacement.id), Some(0));
    assert_eq!(store.find_by_id(1, first.id), None);
    assert_eq!(store.find_by_id(2, second.id), None);

    assert!(store.replace_stroke_at(1, 7, line(0.0)).is_none());
}

#[test]
fn test_remove_by_id_reports_index() {
    let mut store = PageAnnotations::new();
    let a = line(0.0);
    let b = line(1.0);
    store.add_stroke(1, a);
    store.add_stroke(1, b.clone());

    assert_eq!(store.remove_by_id(1, b.id), Some((1, b)));
}

#[test]
fn test_clear_all_snapshot_restores() {
    let mut store = PageAnnotations::new();
    store.add_stroke(1, line(0.0));
    store.add_stroke(4, line(1.0));
    let before = store.clone();

    let snapshot = store.clear_all();
    assert!(store.is_empty());
    assert_eq!(snapshot, before);

    store.restore(snapshot);
    assert_eq!(store, before);
}

#[test]
fn test_deleted_pages_active_and_original() {
    let mut deleted = DeletedPages::default();
    assert!(deleted.delete(2));
    assert!(!deleted.delete(2));
    deleted.delete(4);

    assert_eq!(deleted.active_pages(5), vec![1, 3, 5]);
    assert_eq!(deleted.original_page_number(2, 5), Some(3));
    assert_eq!(deleted.original_page_number(3, 5), Some(5));
    assert_eq!(deleted.original_page_number(4, 5), None);
    assert_eq!(deleted.original_page_number(0, 5), None);

    assert_eq!(deleted.visible_page_number(5), Some(3));
    assert_eq!(deleted.visible_page_number(4), None);

    assert!(deleted.restore(2));
    assert_eq!(deleted.active_pages(5), vec![1, 2, 3, 5]);
}

#[test]
fn test_document_serializes_page_keys() {
    let mut document = AnnotationDocument::default();
    document.strokes.add_stroke(2, line(0.0));
    document.deleted_pages.delete(3);

    let json = serde_json::to_value(&document).unwrap();
    assert!(json["strokes"]["2"].is_array());
    assert_eq!(json["deleted_pages"], serde_json::json!([3]));

    let parsed: AnnotationDocument = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, document);
}
