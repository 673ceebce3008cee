//! Row/column layout through the public API.

use panelkit_core::{Insets, Rect};
use panelkit_ui::{Frame, LayoutStyle, RowColumnState, RowColumnStyle, ViewId, ViewTree};

fn with_children(state: RowColumnState, rect: Rect, sizes: &[(f64, f64)]) -> (ViewTree, ViewId, Vec<ViewId>) {
    let mut tree = ViewTree::new(Rect::from_size(1000.0, 1000.0));
    let rc = tree.create_row_column(rect, state);
    tree.add_view(tree.root(), rc).unwrap();
    let children = sizes
        .iter()
        .map(|(w, h)| {
            let view = tree.create_view(Rect::from_size(*w, *h));
            tree.add_view(rc, view).unwrap();
            view
        })
        .collect();
    (tree, rc, children)
}

#[test]
fn test_row_center_equally() {
    let state = RowColumnState::new(RowColumnStyle::Row)
        .with_spacing(5.0)
        .with_layout_style(LayoutStyle::CenterEqually);
    let (tree, _, children) = with_children(
        state,
        Rect::from_size(200.0, 80.0),
        &[(10.0, 10.0), (20.0, 20.0), (30.0, 30.0)],
    );

    let rects: Vec<Rect> = children.iter().map(|c| tree.view_size(*c).unwrap()).collect();
    assert_eq!(rects.iter().map(|r| r.left).collect::<Vec<_>>(), vec![0.0, 15.0, 40.0]);
    for rect in &rects {
        assert_eq!(rect.center().y, 40.0);
    }
}

#[test]
fn test_column_stretch_size_to_fit() {
    let state = RowColumnState::new(RowColumnStyle::Column).with_layout_style(LayoutStyle::StretchEqually);
    let (mut tree, rc, children) = with_children(
        state,
        Rect::from_size(100.0, 10.0),
        &[(50.0, 10.0), (30.0, 20.0), (40.0, 30.0)],
    );

    assert!(tree.row_column_mut(rc).unwrap().size_to_fit());
    let container = tree.view_size(rc).unwrap();
    assert_eq!(container.height(), 60.0);
    for child in &children {
        assert_eq!(tree.view_size(*child).unwrap().width(), container.width());
    }
    assert_eq!(tree.view_size(children[2]).map(|r| r.top), Some(30.0));
}

#[test]
fn test_size_to_fit_without_children_keeps_margins() {
    let state = RowColumnState::new(RowColumnStyle::Row).with_margin(Insets::new(2.0, 3.0, 4.0, 5.0));
    let (mut tree, rc, _) = with_children(state, Rect::new(10.0, 10.0, 110.0, 110.0), &[]);

    assert!(tree.row_column_mut(rc).unwrap().size_to_fit());
    assert_eq!(tree.view_size(rc), Some(Rect::new(10.0, 10.0, 16.0, 18.0)));
    // Already tight: nothing changes and there are no children.
    assert!(!tree.row_column_mut(rc).unwrap().size_to_fit());
}

#[test]
fn test_layout_follows_every_mutation() {
    let (mut tree, rc, children) = with_children(
        RowColumnState::new(RowColumnStyle::Row),
        Rect::from_size(200.0, 50.0),
        &[(10.0, 10.0), (20.0, 10.0), (30.0, 10.0)],
    );
    let left = |tree: &ViewTree, view: ViewId| tree.view_size(view).map(|r| r.left);

    tree.row_column_mut(rc).unwrap().set_spacing(4.0);
    assert_eq!(left(&tree, children[2]), Some(38.0));

    tree.remove_view(children[1]).unwrap();
    assert_eq!(left(&tree, children[2]), Some(14.0));

    tree.row_column_mut(rc).unwrap().set_margin(Insets::uniform(1.0));
    assert_eq!(left(&tree, children[2]), Some(15.0));

    tree.row_column_mut(rc).unwrap().set_style(RowColumnStyle::Column);
    assert_eq!(tree.view_size(children[2]), Some(Rect::new(1.0, 15.0, 31.0, 25.0)));
}

#[test]
fn test_stretch_follows_container_resize() {
    let state = RowColumnState::new(RowColumnStyle::Row).with_layout_style(LayoutStyle::StretchEqually);
    let (mut tree, rc, children) = with_children(state, Rect::from_size(100.0, 40.0), &[(10.0, 5.0)]);
    assert_eq!(tree.view_size(children[0]).map(|r| r.height()), Some(40.0));

    tree.set_view_size(rc, Rect::from_size(100.0, 70.0));
    assert_eq!(tree.view_size(children[0]).map(|r| r.height()), Some(70.0));
}

#[test]
fn test_layout_is_idempotent() {
    let state = RowColumnState::new(RowColumnStyle::Column)
        .with_layout_style(LayoutStyle::BottomCenter)
        .with_spacing(3.0);
    let (mut tree, rc, children) = with_children(
        state,
        Rect::from_size(120.0, 200.0),
        &[(10.0, 10.0), (40.0, 15.0), (25.0, 5.0)],
    );
    let first: Vec<Option<Rect>> = children.iter().map(|c| tree.view_size(*c)).collect();
    tree.row_column_mut(rc).unwrap().layout_views();
    let second: Vec<Option<Rect>> = children.iter().map(|c| tree.view_size(*c)).collect();
    assert_eq!(first, second);
}

#[test]
fn test_animated_resizing_through_frame() {
    let mut frame = Frame::new(Rect::from_size(300.0, 300.0));
    let rc = frame.create_row_column(Rect::from_size(200.0, 40.0), RowColumnStyle::Row);
    frame
        .tree_mut()
        .row_column_mut(rc)
        .unwrap()
        .set_animate_view_resizing(true);
    frame.add_view(frame.root(), rc).unwrap();

    let a = frame.tree_mut().create_view(Rect::from_size(10.0, 10.0));
    let b = frame.tree_mut().create_view(Rect::from_size(10.0, 10.0));
    frame.add_view(rc, a).unwrap();
    frame.add_view(rc, b).unwrap();

    assert!(frame.is_running(b, panelkit_ui::row_column::ROW_COLUMN_RESIZE_ANIMATION));
    assert_eq!(frame.tree().view_size(b), Some(Rect::from_size(10.0, 10.0)));

    frame.tick(0);
    frame.tick(100);
    assert_eq!(frame.tree().view_size(b), Some(Rect::new(5.0, 0.0, 15.0, 10.0)));
    frame.tick(200);
    assert_eq!(frame.tree().view_size(b), Some(Rect::new(10.0, 0.0, 20.0, 10.0)));
    assert!(!frame.has_animations());
}
