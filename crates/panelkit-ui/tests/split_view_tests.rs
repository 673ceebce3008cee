//! Split view behavior through the public API: separator dragging,
//! container resizing and controller persistence.

use panelkit_core::{Point, Rect};
use panelkit_test_utils::MemorySplitViewController;
use panelkit_ui::{
    CursorType, Frame, MouseButtons, ResizeMethod, SizeConstraint, SplitStyle,
    SplitViewController, SplitViewState, ViewId, ViewTree,
};
use std::cell::RefCell;
use std::rc::Rc;

struct Split {
    tree: ViewTree,
    split: ViewId,
    views: Vec<ViewId>,
}

impl Split {
    fn separator(&self, index: usize) -> ViewId {
        self.tree.children(self.split)[index * 2 + 1]
    }

    fn rect(&self, view: ViewId) -> Rect {
        self.tree.view_size(view).unwrap()
    }

    fn request(&mut self, separator: ViewId, proposed: Rect) -> bool {
        self.tree
            .split_view_mut(self.split)
            .unwrap()
            .request_new_separator_size(separator, proposed)
    }
}

fn build(width: f64, state: SplitViewState, widths: &[f64]) -> Split {
    let mut tree = ViewTree::new(Rect::from_size(1000.0, 1000.0));
    let split = tree.create_split_view(Rect::from_size(width, 100.0), state);
    tree.add_view(tree.root(), split).unwrap();
    let views = widths
        .iter()
        .map(|w| {
            let view = tree.create_view(Rect::from_size(*w, 100.0));
            tree.add_view(split, view).unwrap();
            view
        })
        .collect();
    Split { tree, split, views }
}

fn with_controller(controller: &Rc<RefCell<MemorySplitViewController>>) -> SplitViewState {
    let shared: Rc<RefCell<dyn SplitViewController>> = controller.clone();
    SplitViewState::new(SplitStyle::Horizontal).with_controller(shared)
}

#[test]
fn test_drag_separator_without_constraints() {
    let mut s = build(310.0, SplitViewState::new(SplitStyle::Horizontal), &[100.0, 200.0]);
    let separator = s.separator(0);
    let before = s.rect(separator);

    let proposed = before.translated(Point::new(20.0, 0.0));
    assert!(s.request(separator, proposed));

    assert_eq!(s.rect(s.views[0]).width(), 120.0);
    assert_eq!(s.rect(s.views[1]).width(), 180.0);
    assert_eq!(s.rect(separator), before.translated(Point::new(20.0, 0.0)));
    let total = s.rect(s.views[0]).width() + s.rect(separator).width() + s.rect(s.views[1]).width();
    assert_eq!(total, 310.0);
}

#[test]
fn test_min_size_rejects_request() {
    let controller = Rc::new(RefCell::new(
        MemorySplitViewController::new().with_constraint(0, SizeConstraint::min(50.0)),
    ));
    let mut s = build(310.0, with_controller(&controller), &[100.0, 200.0]);
    let separator = s.separator(0);
    let rects: Vec<Rect> = s.tree.children(s.split).iter().map(|v| s.rect(*v)).collect();

    let proposed = Rect::new(40.0, 0.0, 50.0, 100.0);
    assert!(!s.request(separator, proposed));

    let after: Vec<Rect> = s.tree.children(s.split).iter().map(|v| s.rect(*v)).collect();
    assert_eq!(rects, after);
}

#[test]
fn test_max_size_rejects_request() {
    let controller = Rc::new(RefCell::new(
        MemorySplitViewController::new().with_constraint(0, SizeConstraint::max(150.0)),
    ));
    let mut s = build(310.0, with_controller(&controller), &[100.0, 200.0]);
    let separator = s.separator(0);

    assert!(s.request(separator, Rect::new(150.0, 0.0, 160.0, 100.0)));
    assert!(!s.request(separator, Rect::new(151.0, 0.0, 161.0, 100.0)));
    assert_eq!(s.rect(s.views[0]).width(), 150.0);
}

fn resized(method: ResizeMethod) -> Split {
    let mut s = build(
        100.0,
        SplitViewState::new(SplitStyle::Horizontal).with_resize_method(method),
        &[50.0, 40.0],
    );
    s.tree.set_view_size(s.split, Rect::from_size(120.0, 130.0));
    s
}

#[test]
fn test_resize_first_view() {
    let s = resized(ResizeMethod::First);
    assert_eq!(s.rect(s.views[0]), Rect::new(0.0, 0.0, 70.0, 130.0));
    assert_eq!(s.rect(s.separator(0)), Rect::new(70.0, 0.0, 80.0, 130.0));
    assert_eq!(s.rect(s.views[1]), Rect::new(80.0, 0.0, 120.0, 130.0));
}

#[test]
fn test_resize_second_view() {
    let s = resized(ResizeMethod::Second);
    assert_eq!(s.rect(s.views[0]), Rect::new(0.0, 0.0, 50.0, 130.0));
    assert_eq!(s.rect(s.separator(0)), Rect::new(50.0, 0.0, 60.0, 130.0));
    assert_eq!(s.rect(s.views[1]), Rect::new(60.0, 0.0, 120.0, 130.0));
}

#[test]
fn test_resize_last_view() {
    let s = resized(ResizeMethod::Last);
    assert_eq!(s.rect(s.views[0]), Rect::new(0.0, 0.0, 50.0, 130.0));
    assert_eq!(s.rect(s.separator(0)), Rect::new(50.0, 0.0, 60.0, 130.0));
    assert_eq!(s.rect(s.views[1]), Rect::new(60.0, 0.0, 120.0, 130.0));
}

#[test]
fn test_resize_all_views() {
    let s = resized(ResizeMethod::All);
    assert_eq!(s.rect(s.views[0]), Rect::new(0.0, 0.0, 60.0, 130.0));
    assert_eq!(s.rect(s.separator(0)), Rect::new(60.0, 0.0, 70.0, 130.0));
    assert_eq!(s.rect(s.views[1]), Rect::new(70.0, 0.0, 120.0, 130.0));
}

#[test]
fn test_resize_second_view_shifts_followers() {
    let mut s = build(
        320.0,
        SplitViewState::new(SplitStyle::Horizontal).with_resize_method(ResizeMethod::Second),
        &[100.0, 100.0, 100.0],
    );
    s.tree.set_view_size(s.split, Rect::from_size(340.0, 100.0));
    assert_eq!(s.rect(s.views[0]), Rect::new(0.0, 0.0, 100.0, 100.0));
    assert_eq!(s.rect(s.views[1]), Rect::new(110.0, 0.0, 230.0, 100.0));
    assert_eq!(s.rect(s.separator(1)), Rect::new(230.0, 0.0, 240.0, 100.0));
    assert_eq!(s.rect(s.views[2]), Rect::new(240.0, 0.0, 340.0, 100.0));
}

#[test]
fn test_remove_keeps_alternation() {
    let mut s = build(
        400.0,
        SplitViewState::new(SplitStyle::Horizontal),
        &[100.0, 100.0, 100.0],
    );
    s.tree.remove_view(s.views[1]).unwrap();
    let children = s.tree.children(s.split).to_vec();
    assert_eq!(children.len(), 3);
    assert_eq!(children[0], s.views[0]);
    assert_eq!(children[2], s.views[2]);
    assert!(s.tree.separator(children[1]).is_some());
}

#[test]
fn test_controller_stores_on_detach_and_restores_on_attach() {
    let controller = Rc::new(RefCell::new(MemorySplitViewController::new()));
    let mut s = build(310.0, with_controller(&controller), &[100.0, 200.0]);
    let separator = s.separator(0);

    assert!(s.request(separator, Rect::new(150.0, 0.0, 160.0, 100.0)));
    s.tree.detach_view(s.split).unwrap();
    assert_eq!(controller.borrow().stores(), &[(0, 150.0), (1, 150.0)]);

    // Move it back while detached; attaching restores the stored sizes.
    assert!(s.request(separator, Rect::new(100.0, 0.0, 110.0, 100.0)));
    assert_eq!(s.rect(s.views[0]).width(), 100.0);

    let root = s.tree.root();
    s.tree.add_view(root, s.split).unwrap();
    assert_eq!(s.rect(s.views[0]), Rect::new(0.0, 0.0, 150.0, 100.0));
    assert_eq!(s.rect(separator), Rect::new(150.0, 0.0, 160.0, 100.0));
    assert_eq!(s.rect(s.views[1]), Rect::new(160.0, 0.0, 310.0, 100.0));
}

#[test]
fn test_seeded_sizes_apply_on_first_attach() {
    let controller = Rc::new(RefCell::new(MemorySplitViewController::new().with_size(0, 80.0)));
    let shared: Rc<RefCell<dyn SplitViewController>> = controller.clone();
    let mut tree = ViewTree::new(Rect::from_size(500.0, 500.0));
    let split = tree.create_split_view(
        Rect::from_size(310.0, 100.0),
        SplitViewState::new(SplitStyle::Horizontal).with_controller(shared),
    );
    let a = tree.create_view(Rect::from_size(100.0, 100.0));
    let b = tree.create_view(Rect::from_size(200.0, 100.0));
    tree.add_view(split, a).unwrap();
    tree.add_view(split, b).unwrap();
    assert_eq!(tree.view_size(a).map(|r| r.width()), Some(100.0));

    tree.add_view(tree.root(), split).unwrap();
    assert_eq!(tree.view_size(a).map(|r| r.width()), Some(80.0));
    assert_eq!(tree.view_size(b), Some(Rect::new(90.0, 0.0, 290.0, 100.0)));
}

#[test]
fn test_frame_drag_and_hover() {
    let mut frame = Frame::new(Rect::from_size(400.0, 200.0));
    let split = frame.create_split_view(Rect::new(20.0, 10.0, 330.0, 110.0), SplitStyle::Horizontal);
    frame.add_view(frame.root(), split).unwrap();
    let a = frame.tree_mut().create_view(Rect::from_size(100.0, 100.0));
    let b = frame.tree_mut().create_view(Rect::from_size(200.0, 100.0));
    frame.add_view(split, a).unwrap();
    frame.add_view(split, b).unwrap();

    // Separator covers x 120..130 in root coordinates.
    frame.on_mouse_moved(Point::new(125.0, 50.0), MouseButtons::empty());
    assert_eq!(frame.tree().cursor(), CursorType::ResizeHorizontal);

    assert!(frame.on_mouse_down(Point::new(125.0, 50.0), MouseButtons::LEFT).is_handled());
    assert!(frame.on_mouse_moved(Point::new(145.0, 50.0), MouseButtons::LEFT).is_handled());
    assert!(frame.on_mouse_up(Point::new(145.0, 50.0), MouseButtons::LEFT).is_handled());

    assert_eq!(frame.tree().view_size(a).map(|r| r.width()), Some(120.0));
    assert_eq!(frame.tree().view_size(b).map(|r| r.width()), Some(180.0));

    frame.on_mouse_moved(Point::new(300.0, 50.0), MouseButtons::empty());
    assert_eq!(frame.tree().cursor(), CursorType::Default);
}

#[test]
fn test_drag_is_pinned_at_min_size() {
    let controller = Rc::new(RefCell::new(
        MemorySplitViewController::new().with_constraint(0, SizeConstraint::min(50.0)),
    ));
    let shared: Rc<RefCell<dyn SplitViewController>> = controller.clone();
    let mut frame = Frame::new(Rect::from_size(400.0, 200.0));
    let split = frame.create_split_view(Rect::from_size(310.0, 100.0), SplitStyle::Horizontal);
    frame
        .tree_mut()
        .split_view_mut(split)
        .unwrap()
        .set_controller(Some(shared));
    frame.add_view(frame.root(), split).unwrap();
    let a = frame.tree_mut().create_view(Rect::from_size(100.0, 100.0));
    let b = frame.tree_mut().create_view(Rect::from_size(200.0, 100.0));
    frame.add_view(split, a).unwrap();
    frame.add_view(split, b).unwrap();

    frame.on_mouse_down(Point::new(105.0, 50.0), MouseButtons::LEFT);
    frame.on_mouse_moved(Point::new(10.0, 50.0), MouseButtons::LEFT);
    frame.on_mouse_up(Point::new(10.0, 50.0), MouseButtons::LEFT);

    assert_eq!(frame.tree().view_size(a).map(|r| r.width()), Some(50.0));
}

#[test]
fn test_click_on_separator_child_does_not_drag() {
    let mut frame = Frame::new(Rect::from_size(400.0, 200.0));
    let split = frame.create_split_view(Rect::from_size(310.0, 100.0), SplitStyle::Horizontal);
    frame.add_view(frame.root(), split).unwrap();
    let a = frame.tree_mut().create_view(Rect::from_size(100.0, 100.0));
    let b = frame.tree_mut().create_view(Rect::from_size(200.0, 100.0));
    frame.add_view(split, a).unwrap();
    frame.add_view(split, b).unwrap();

    let grip = frame.tree_mut().create_view(Rect::new(0.0, 0.0, 10.0, 20.0));
    let added = frame
        .tree_mut()
        .split_view_mut(split)
        .unwrap()
        .add_view_to_separator(0, grip);
    assert_eq!(added, Ok(true));

    assert!(!frame.on_mouse_down(Point::new(105.0, 10.0), MouseButtons::LEFT).is_handled());
    assert!(frame.on_mouse_down(Point::new(105.0, 50.0), MouseButtons::LEFT).is_handled());
    assert!(!frame.on_mouse_down(Point::new(105.0, 50.0), MouseButtons::RIGHT).is_handled());
}

#[test]
fn test_vertical_split_requests_vertical_cursor() {
    let mut frame = Frame::new(Rect::from_size(200.0, 400.0));
    let split = frame.create_split_view(Rect::from_size(200.0, 310.0), SplitStyle::Vertical);
    frame.add_view(frame.root(), split).unwrap();
    for height in [100.0, 200.0] {
        let view = frame.tree_mut().create_view(Rect::from_size(200.0, height));
        frame.add_view(split, view).unwrap();
    }
    frame.on_mouse_moved(Point::new(50.0, 105.0), MouseButtons::empty());
    assert_eq!(frame.tree().cursor(), CursorType::ResizeVertical);
}
