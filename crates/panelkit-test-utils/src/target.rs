//! Custom animation target that logs its callbacks.

use panelkit_ui::animation::AnimationTargetHandler;
use panelkit_ui::{ViewId, ViewTree};
use parking_lot::Mutex;
use std::sync::Arc;

/// One recorded callback.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetEvent {
    Start { view: ViewId, name: String },
    Tick { view: ViewId, name: String, position: f32 },
    Finished { view: ViewId, name: String, canceled: bool },
}

/// Log shared between a target handed to the animator and the test.
pub type TargetLog = Arc<Mutex<Vec<TargetEvent>>>;

/// Animation target that only records what the animator asks of it.
///
/// # Example
///
/// ```rust
/// use panelkit_core::Rect;
/// use panelkit_test_utils::RecordingAnimationTarget;
/// use panelkit_ui::animation::{AnimationTarget, Animator, LinearTimingFunction};
/// use panelkit_ui::ViewTree;
///
/// let mut tree = ViewTree::new(Rect::from_size(10.0, 10.0));
/// let root = tree.root();
/// let target = RecordingAnimationTarget::new();
/// let log = target.log();
///
/// let mut animator = Animator::new();
/// animator.add_animation(&mut tree, root, "recorded", AnimationTarget::custom(target), LinearTimingFunction::new(10));
/// animator.tick(&mut tree, 0);
/// animator.tick(&mut tree, 10);
/// assert_eq!(RecordingAnimationTarget::positions(&log), vec![0.0, 1.0]);
/// ```
#[derive(Debug, Default)]
pub struct RecordingAnimationTarget {
    log: TargetLog,
}

impl RecordingAnimationTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records into an existing log, so several targets can share one.
    pub fn with_log(log: TargetLog) -> Self {
        Self { log }
    }

    pub fn log(&self) -> TargetLog {
        self.log.clone()
    }

    /// Positions of all recorded ticks, in order.
    pub fn positions(log: &TargetLog) -> Vec<f32> {
        log.lock()
            .iter()
            .filter_map(|event| match event {
                TargetEvent::Tick { position, .. } => Some(*position),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded `animation_finished` calls.
    pub fn finish_count(log: &TargetLog) -> usize {
        log.lock()
            .iter()
            .filter(|event| matches!(event, TargetEvent::Finished { .. }))
            .count()
    }
}

impl AnimationTargetHandler for RecordingAnimationTarget {
    fn animation_start(&mut self, _tree: &mut ViewTree, view: ViewId, name: &str) {
        self.log.lock().push(TargetEvent::Start {
            view,
            name: name.to_string(),
        });
    }

    fn animation_tick(&mut self, _tree: &mut ViewTree, view: ViewId, name: &str, position: f32) {
        self.log.lock().push(TargetEvent::Tick {
            view,
            name: name.to_string(),
            position,
        });
    }

    fn animation_finished(&mut self, _tree: &mut ViewTree, view: ViewId, name: &str, canceled: bool) {
        self.log.lock().push(TargetEvent::Finished {
            view,
            name: name.to_string(),
            canceled,
        });
    }
}
