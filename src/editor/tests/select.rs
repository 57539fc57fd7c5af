use super::*;
use crate::editor::events::BUTTON_SECONDARY;
use crate::geometry::compute_bounds;

fn short_pen(x: f32, y: f32) -> Stroke {
    pen_line(Vec2::new(x, y), Vec2::new(x + 10.0, y + 10.0), Color::BLACK)
}

fn ctrl_click(h: &mut Harness, x: f32, y: f32) {
    let event = at(x, y).with_modifiers(Modifiers {
        ctrl: true,
        shift: false,
    });
    h.send_down(event);
    h.send_up(event);
}

#[test]
fn test_click_selects_topmost_stroke() {
    let mut h = Harness::new();
    let bottom = short_pen(10.0, 10.0);
    let top = short_pen(10.0, 10.0);
    h.load(1, vec![bottom, top.clone()]);
    h.set_tool(Tool::Select);

    h.click(15.0, 15.0);
    let entry = h.editor.selection().single().expect("one selected");
    assert_eq!(entry.id, top.id);
    assert_eq!(entry.index, 1);
    assert!(h.history().is_empty());
}

#[test]
fn test_ctrl_click_toggles_membership() {
    let mut h = Harness::new();
    let a = short_pen(10.0, 10.0);
    let b = short_pen(100.0, 100.0);
    h.load(1, vec![a.clone(), b.clone()]);
    h.set_tool(Tool::Select);

    h.click(15.0, 15.0);
    ctrl_click(&mut h, 105.0, 105.0);
    assert_eq!(h.editor.selection().len(), 2);
    assert_eq!(h.editor.selection().primary().map(|e| e.id), Some(b.id));

    ctrl_click(&mut h, 105.0, 105.0);
    assert_eq!(h.editor.selection().len(), 1);
    assert!(h.editor.selection().contains(a.id));
}

#[test]
fn test_click_on_empty_space_clears_selection() {
    let mut h = Harness::new();
    h.load(1, vec![short_pen(10.0, 10.0)]);
    h.set_tool(Tool::Select);

    h.click(15.0, 15.0);
    assert_eq!(h.editor.selection().len(), 1);
    h.click(150.0, 150.0);
    assert!(h.editor.selection().is_empty());
    assert!(h.editor.gesture().is_idle());
}

#[test]
fn test_marquee_selects_overlapping_strokes() {
    let mut h = Harness::new();
    let a = short_pen(10.0, 10.0);
    let b = short_pen(100.0, 100.0);
    let c = short_pen(170.0, 170.0);
    h.load(1, vec![a.clone(), b.clone(), c.clone()]);
    h.set_tool(Tool::RectSelect);

    h.drag((0.0, 0.0), (120.0, 120.0));

    let selection = h.editor.selection();
    assert_eq!(selection.len(), 2);
    assert!(selection.contains(a.id));
    assert!(selection.contains(b.id));
    assert!(!selection.contains(c.id));
    // Later in the array means on top
    assert_eq!(selection.primary().map(|e| e.id), Some(b.id));
}

#[test]
fn test_marquee_on_select_tool_empty_space() {
    let mut h = Harness::new();
    let a = short_pen(50.0, 50.0);
    h.load(1, vec![a.clone()]);
    h.set_tool(Tool::Select);

    h.drag((40.0, 40.0), (90.0, 90.0));
    assert!(h.editor.selection().contains(a.id));
}

#[test]
fn test_multi_drag_records_one_move_per_stroke() {
    let mut h = Harness::new();
    let a = short_pen(10.0, 10.0);
    let b = short_pen(40.0, 40.0);
    h.load(1, vec![a.clone(), b.clone()]);
    h.set_tool(Tool::Select);
    h.click(15.0, 15.0);
    ctrl_click(&mut h, 45.0, 45.0);

    h.down(15.0, 15.0);
    h.move_to(25.0, 15.0);
    h.move_to(45.0, 15.0);
    h.up(45.0, 15.0);

    let moved = h.strokes(1);
    let delta = Vec2::new(30.0, 0.0);
    assert_eq!(
        compute_bounds(&moved[0], 0.0).min,
        compute_bounds(&a, 0.0).min + delta
    );
    assert_eq!(
        compute_bounds(&moved[1], 0.0).min,
        compute_bounds(&b, 0.0).min + delta
    );
    assert_eq!(h.history().len(), 2);
    assert_eq!(h.host.changes, vec!["Move", "Move"]);

    // One undo reverts only the most recent move
    assert!(h.undo());
    let after_undo = h.strokes(1);
    assert_eq!(after_undo[1], b);
    assert_eq!(after_undo[0], moved[0]);
}

#[test]
fn test_small_drag_is_not_recorded() {
    let mut h = Harness::new();
    let a = short_pen(10.0, 10.0);
    h.load(1, vec![a.clone()]);
    h.set_tool(Tool::Select);
    h.click(15.0, 15.0);

    // Below the drag start distance: nothing moves
    h.drag((15.0, 15.0), (18.0, 15.0));
    assert_eq!(h.strokes(1), vec![a.clone()]);

    // Dragged, then brought back within a pixel: snapped back
    h.down(15.0, 15.0);
    h.move_to(30.0, 15.0);
    assert_ne!(h.strokes(1), vec![a.clone()]);
    h.up(15.5, 15.0);

    assert_eq!(h.strokes(1), vec![a]);
    assert!(h.history().is_empty());
}

#[test]
fn test_pressing_unselected_stroke_selects_and_drags_it() {
    let mut h = Harness::new();
    let a = short_pen(10.0, 10.0);
    let b = short_pen(100.0, 100.0);
    h.load(1, vec![a.clone(), b.clone()]);
    h.set_tool(Tool::Select);
    h.click(15.0, 15.0);

    h.drag((105.0, 105.0), (125.0, 105.0));
    assert_eq!(h.editor.selection().single().map(|e| e.id), Some(b.id));
    assert_eq!(h.strokes(1)[0], a);
    assert_eq!(h.history().len(), 1);
}

#[test]
fn test_right_click_opens_context_menu() {
    let mut h = Harness::new();
    let a = short_pen(10.0, 10.0);
    h.load(1, vec![a.clone()]);
    h.set_tool(Tool::Select);

    let right = at(15.0, 15.0).with_buttons(BUTTON_SECONDARY);
    h.send_down(right);
    h.send_up(right);

    let menu = *h.editor.context_menu().expect("menu open");
    assert_eq!(menu.page, 1);
    assert_eq!(menu.client, Vec2::new(15.0, 15.0));
    assert!(h.editor.selection().contains(a.id));

    h.with(|editor, ctx| editor.context_action(ctx, ContextAction::Delete));
    assert!(h.strokes(1).is_empty());
    assert!(h.editor.context_menu().is_none());
}

#[test]
fn test_right_click_outside_select_tools_does_nothing() {
    let mut h = Harness::new();
    h.load(1, vec![short_pen(10.0, 10.0)]);

    let right = at(15.0, 15.0).with_buttons(BUTTON_SECONDARY);
    h.send_down(right);
    h.send_up(right);

    assert!(h.editor.context_menu().is_none());
    assert_eq!(h.strokes(1).len(), 1);
}

#[test]
fn test_cursor_hints_follow_selection() {
    let mut h = Harness::new();
    let rect = rectangle(Vec2::new(50.0, 50.0), Vec2::new(150.0, 100.0));
    h.load(1, vec![rect]);
    h.set_tool(Tool::Select);
    assert_eq!(h.editor.cursor_at(&h.host, Vec2::new(75.0, 100.0)), CursorHint::Default);

    h.click(75.0, 100.0);
    assert_eq!(h.editor.cursor_at(&h.host, Vec2::new(75.0, 100.0)), CursorHint::Move);
    assert_eq!(h.editor.cursor_at(&h.host, Vec2::new(156.0, 44.0)), CursorHint::Rotate);
    assert_eq!(
        h.editor.cursor_at(&h.host, Vec2::new(156.0, 106.0)),
        CursorHint::Resize(crate::geometry::Handle::SE)
    );

    h.set_tool(Tool::Hand);
    assert_eq!(h.editor.cursor_at(&h.host, Vec2::new(10.0, 10.0)), CursorHint::Grab);
}
