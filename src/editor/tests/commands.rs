use super::*;

fn selected_pen(h: &mut Harness) -> Stroke {
    let stroke = pen_line(Vec2::new(10.0, 10.0), Vec2::new(40.0, 10.0), Color::BLACK);
    h.load(1, vec![stroke.clone()]);
    h.set_tool(Tool::Select);
    h.click(20.0, 10.0);
    assert!(h.editor.selection().contains(stroke.id));
    stroke
}

#[test]
fn test_highlight_selection_merges_per_page() {
    let mut h = Harness::new();
    h.host.text_rects = vec![
        Rect::new(10.0, 10.0, 50.0, 20.0),
        Rect::new(50.0, 10.0, 90.0, 20.0),
        Rect::new(10.0, 30.0, 40.0, 40.0),
        // Page 2
        Rect::new(10.0, 230.0, 60.0, 240.0),
    ];
    h.set_tool(Tool::Highlight);
    h.click(20.0, 15.0);

    let page_one = h.strokes(1);
    assert_eq!(page_one.len(), 1);
    let StrokeKind::Highlight { rects, color } = &page_one[0].kind else {
        panic!("expected a highlight");
    };
    assert_eq!(rects.len(), 2);
    assert_eq!(rects[0].to_rect(), Rect::new(10.0, 10.0, 90.0, 20.0));
    assert_eq!(*color, h.editor.settings().highlight_color);

    let page_two = h.strokes(2);
    let StrokeKind::Highlight { rects, .. } = &page_two[0].kind else {
        panic!("expected a highlight");
    };
    assert_eq!(rects[0].to_rect(), Rect::new(10.0, 10.0, 60.0, 20.0));

    assert_eq!(h.history().len(), 2);
    assert!(h.host.text_selection_cleared);
}

#[test]
fn test_highlight_without_text_selection_does_nothing() {
    let mut h = Harness::new();
    assert_eq!(h.with(|editor, ctx| editor.highlight_selection(ctx)), 0);
    assert!(h.history().is_empty());
}

#[test]
fn test_color_preview_stays_out_of_history() {
    let mut h = Harness::new();
    let original = selected_pen(&mut h);
    let red = Color::srgb(1.0, 0.0, 0.0);
    let green = Color::srgb(0.0, 1.0, 0.0);

    h.with(|editor, ctx| editor.preview_color(ctx, red));
    assert_eq!(h.strokes(1)[0].color(), Some(red));
    assert!(h.history().is_temporary());
    h.with(|editor, ctx| editor.preview_color(ctx, green));
    assert_eq!(h.strokes(1)[0].color(), Some(green));
    assert!(h.host.changes.is_empty());

    h.with(|editor, ctx| editor.end_preview(ctx, false));
    assert_eq!(h.strokes(1)[0], original);
    assert!(!h.history().is_temporary());
    assert!(h.history().is_empty());
    assert!(h.host.changes.is_empty());

    h.with(|editor, ctx| editor.preview_color(ctx, red));
    h.with(|editor, ctx| editor.end_preview(ctx, true));
    assert_eq!(h.strokes(1)[0].color(), Some(red));
    assert_eq!(h.history().len(), 1);
    assert_eq!(h.host.changes, vec!["Change color"]);
    assert_eq!(h.history().undo_label(), Some("Change color"));

    assert!(h.undo());
    assert_eq!(h.strokes(1)[0], original);
}

#[test]
fn test_set_color_updates_settings_and_selection() {
    let mut h = Harness::new();
    selected_pen(&mut h);
    let red = Color::srgb(1.0, 0.0, 0.0);

    h.with(|editor, ctx| editor.set_color(ctx, red));
    assert_eq!(h.editor.settings().color, red);
    assert_eq!(h.strokes(1)[0].color(), Some(red));
    assert_eq!(h.host.changes, vec!["Change color"]);

    // Same color again changes nothing
    h.with(|editor, ctx| editor.set_color(ctx, red));
    assert_eq!(h.history().len(), 1);
}

#[test]
fn test_set_thickness_skips_strokes_without_width() {
    let mut h = Harness::new();
    let pen = pen_line(Vec2::new(10.0, 10.0), Vec2::new(40.0, 10.0), Color::BLACK);
    let text = Stroke::text(Vec2::new(100.0, 100.0), "note", 16.0, Color::BLACK);
    h.load(1, vec![pen, text]);
    h.set_tool(Tool::RectSelect);
    h.drag((0.0, 0.0), (199.0, 199.0));
    assert_eq!(h.editor.selection().len(), 2);

    h.with(|editor, ctx| editor.set_thickness(ctx, 5.0));
    assert_eq!(h.strokes(1)[0].thickness(), Some(5.0));
    assert_eq!(h.history().len(), 1);
    assert_eq!(h.host.changes, vec!["Change thickness"]);

    h.with(|editor, ctx| editor.set_thickness(ctx, f32::NAN));
    assert_eq!(h.editor.settings().thickness, 5.0);
}

#[test]
fn test_edit_text_records_text_change() {
    let mut h = Harness::new();
    let text = Stroke::text(Vec2::new(100.0, 100.0), "note", 16.0, Color::BLACK);
    h.load(1, vec![text.clone()]);

    assert!(h.with(|editor, ctx| editor.edit_text(ctx, 1, text.id, "memo")));
    let StrokeKind::Text { text: content, .. } = &h.strokes(1)[0].kind else {
        panic!("expected text");
    };
    assert_eq!(content, "memo");
    assert_eq!(h.history().undo_label(), Some("Edit text"));

    assert!(!h.with(|editor, ctx| editor.edit_text(ctx, 1, text.id, "  ")));
    assert!(!h.with(|editor, ctx| editor.edit_text(ctx, 2, text.id, "elsewhere")));
    assert!(h.undo());
    assert_eq!(h.strokes(1)[0], text);
}

#[test]
fn test_shortcuts_only_reach_the_active_document() {
    let mut h = Harness::new();
    h.drag((10.0, 10.0), (30.0, 30.0));
    assert_eq!(h.strokes(1).len(), 1);

    let other = FileId::new();
    h.sessions.start_session(other);
    assert!(!h.with(|editor, ctx| editor.handle_shortcut(ctx, Shortcut::Undo)));
    assert_eq!(h.strokes(1).len(), 1);

    assert!(h.sessions.activate(h.file));
    assert!(h.with(|editor, ctx| editor.handle_shortcut(ctx, Shortcut::Undo)));
    assert!(h.strokes(1).is_empty());
    assert!(h.with(|editor, ctx| editor.handle_shortcut(ctx, Shortcut::Redo)));
    assert_eq!(h.strokes(1).len(), 1);
}

#[test]
fn test_shortcuts_wait_for_open_text_box() {
    let mut h = Harness::new();
    h.drag((10.0, 10.0), (30.0, 30.0));
    h.set_tool(Tool::Text);
    h.down(100.0, 100.0);

    assert!(!h.with(|editor, ctx| editor.handle_shortcut(ctx, Shortcut::Undo)));
    assert_eq!(h.strokes(1).len(), 1);

    assert!(h.with(|editor, ctx| editor.handle_shortcut(ctx, Shortcut::Escape)));
    assert!(h.editor.pending_text().is_none());
}

#[test]
fn test_select_tool_shortcut_resets_state() {
    let mut h = Harness::new();
    selected_pen(&mut h);

    let tool = Tool::Shape(ShapeKind::Circle);
    assert!(h.with(|editor, ctx| editor.handle_shortcut(ctx, Shortcut::SelectTool(tool))));
    assert_eq!(h.editor.tool(), tool);
    assert!(h.editor.selection().is_empty());
}

#[test]
fn test_escape_mid_drag_restores_strokes() {
    let mut h = Harness::new();
    let original = selected_pen(&mut h);

    h.down(20.0, 10.0);
    h.move_to(60.0, 10.0);
    assert_ne!(h.strokes(1)[0], original);

    assert!(h.with(|editor, ctx| editor.handle_shortcut(ctx, Shortcut::Escape)));
    assert_eq!(h.strokes(1)[0], original);
    assert!(h.editor.gesture().is_idle());
    assert!(h.editor.selection().is_empty());
    assert_eq!(h.host.released, vec![1, 1]);
}

#[test]
fn test_clear_all_is_one_undoable_step() {
    let mut h = Harness::new();
    h.drag((10.0, 10.0), (30.0, 30.0));
    h.drag((10.0, 230.0), (30.0, 250.0));

    assert!(h.with(|editor, ctx| editor.clear_all(ctx)));
    assert!(h.editor.strokes().is_empty());
    assert_eq!(h.history().undo_label(), Some("Clear all"));

    assert!(h.undo());
    assert_eq!(h.strokes(1).len(), 1);
    assert_eq!(h.strokes(2).len(), 1);
}

#[test]
fn test_clear_all_on_empty_document_is_noop() {
    let mut h = Harness::new();
    assert!(!h.with(|editor, ctx| editor.clear_all(ctx)));
    assert!(h.history().is_empty());
}

#[test]
fn test_delete_page_and_undo() {
    let mut h = Harness::new();
    assert!(h.with(|editor, ctx| editor.delete_page(ctx, 2)));
    assert!(h.editor.is_page_deleted(2));
    assert!(!h.with(|editor, ctx| editor.delete_page(ctx, 2)));
    assert!(!h.with(|editor, ctx| editor.delete_page(ctx, 9)));

    assert!(h.undo());
    assert!(!h.editor.is_page_deleted(2));
}

#[test]
fn test_last_visible_page_cannot_be_deleted() {
    let mut h = Harness::with_host(MockHost::new(1));
    assert!(!h.with(|editor, ctx| editor.delete_page(ctx, 1)));
    assert!(h.history().is_empty());
}
