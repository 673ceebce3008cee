use super::targets::{AnimationTarget, ViewSizeAnimation};
use super::timing::{LinearTimingFunction, TimingFunction};
use crate::tree::{ViewId, ViewTree};
use panelkit_core::profiling::profile_function;

/// Passed to a completion callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finished {
    pub view: ViewId,
    pub name: String,
    /// `true` when the animation was removed or replaced before its end.
    pub canceled: bool,
}

/// Completion callback of an animation.
///
/// Runs after the target has finished. The animator and tree are handed in
/// so a callback can chain further animations or restructure views.
pub type DoneFunction = Box<dyn FnOnce(&mut Animator, &mut ViewTree, &Finished)>;

struct Animation {
    serial: u64,
    view: ViewId,
    name: String,
    target: AnimationTarget,
    timing: Box<dyn TimingFunction>,
    on_done: Option<DoneFunction>,
    start_time: Option<u64>,
    last_position: Option<f32>,
}

/// Runs animations keyed by `(view, name)`.
///
/// The animator has no clock of its own: the owner calls [`tick`](Self::tick)
/// once per frame with the current time in milliseconds. Animations are
/// ticked in the order they were added.
pub struct Animator {
    animations: Vec<Animation>,
    next_serial: u64,
}

impl Animator {
    pub fn new() -> Self {
        Self {
            animations: Vec::new(),
            next_serial: 0,
        }
    }

    /// Starts an animation, canceling any running one with the same view
    /// and name first.
    pub fn add_animation(
        &mut self,
        tree: &mut ViewTree,
        view: ViewId,
        name: impl Into<String>,
        target: impl Into<AnimationTarget>,
        timing: impl TimingFunction + 'static,
    ) {
        self.insert(tree, view, name.into(), target.into(), Box::new(timing), None);
    }

    /// Like [`add_animation`](Self::add_animation), calling `on_done` when the
    /// animation completes or is canceled.
    pub fn add_animation_with_done(
        &mut self,
        tree: &mut ViewTree,
        view: ViewId,
        name: impl Into<String>,
        target: impl Into<AnimationTarget>,
        timing: impl TimingFunction + 'static,
        on_done: impl FnOnce(&mut Animator, &mut ViewTree, &Finished) + 'static,
    ) {
        self.insert(
            tree,
            view,
            name.into(),
            target.into(),
            Box::new(timing),
            Some(Box::new(on_done)),
        );
    }

    fn insert(
        &mut self,
        tree: &mut ViewTree,
        view: ViewId,
        name: String,
        mut target: AnimationTarget,
        timing: Box<dyn TimingFunction>,
        on_done: Option<DoneFunction>,
    ) {
        self.remove_animation(tree, view, &name);

        if !tree.contains(view) {
            tracing::warn!("Ignoring animation '{}' on unknown view {}", name, view);
            return;
        }

        target.start(tree, view, &name);
        tracing::debug!("Animation '{}' added on {}", name, view);

        let serial = self.next_serial;
        self.next_serial += 1;
        self.animations.push(Animation {
            serial,
            view,
            name,
            target,
            timing,
            on_done,
            start_time: None,
            last_position: None,
        });
    }

    /// Cancels the animation `(view, name)`. Unknown pairs are ignored.
    pub fn remove_animation(&mut self, tree: &mut ViewTree, view: ViewId, name: &str) {
        if let Some(index) = self
            .animations
            .iter()
            .position(|a| a.view == view && a.name == name)
        {
            let animation = self.animations.remove(index);
            self.finish(tree, animation, true);
        }
    }

    /// Cancels every animation running on `view`.
    ///
    /// Animations that done callbacks add meanwhile keep running.
    pub fn remove_animations(&mut self, tree: &mut ViewTree, view: ViewId) {
        let serials: Vec<u64> = self
            .animations
            .iter()
            .filter(|a| a.view == view)
            .map(|a| a.serial)
            .collect();
        self.cancel_serials(tree, serials);
    }

    /// Cancels everything running when called.
    pub fn remove_all(&mut self, tree: &mut ViewTree) {
        let serials: Vec<u64> = self.animations.iter().map(|a| a.serial).collect();
        self.cancel_serials(tree, serials);
    }

    fn cancel_serials(&mut self, tree: &mut ViewTree, serials: Vec<u64>) {
        for serial in serials {
            if let Some(index) = self.animations.iter().position(|a| a.serial == serial) {
                let animation = self.animations.remove(index);
                self.finish(tree, animation, true);
            }
        }
    }

    pub fn is_running(&self, view: ViewId, name: &str) -> bool {
        self.animations
            .iter()
            .any(|a| a.view == view && a.name == name)
    }

    pub fn has_animations(&self) -> bool {
        !self.animations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Advances every running animation to `now_ms`.
    ///
    /// Each animation starts counting at the first tick that sees it.
    /// Animations added while this runs are first ticked by the next call.
    pub fn tick(&mut self, tree: &mut ViewTree, now_ms: u64) {
        profile_function!();

        self.flush_tree_events(tree);

        let serials: Vec<u64> = self.animations.iter().map(|a| a.serial).collect();
        for serial in serials {
            // Callbacks may have removed it already.
            let Some(index) = self.animations.iter().position(|a| a.serial == serial) else {
                continue;
            };

            let animation = &mut self.animations[index];
            let start = *animation.start_time.get_or_insert(now_ms);
            let elapsed = now_ms.saturating_sub(start).min(u32::MAX as u64) as u32;

            let position = animation.timing.position(elapsed);
            if animation.last_position != Some(position) {
                animation.last_position = Some(position);
                animation
                    .target
                    .tick(tree, animation.view, &animation.name, position);
            }

            if animation.timing.is_done(elapsed) {
                let animation = self.animations.remove(index);
                self.finish(tree, animation, false);
            }
        }

        self.flush_tree_events(tree);
    }

    /// Applies what the tree queued since the last call: animations of
    /// detached or destroyed views are canceled and animated resizes are
    /// started.
    pub fn flush_tree_events(&mut self, tree: &mut ViewTree) {
        while tree.has_pending_events() {
            for view in tree.take_detached() {
                self.remove_animations(tree, view);
            }
            for view in tree.take_destroyed() {
                self.remove_animations(tree, view);
            }
            for resize in tree.take_pending_resizes() {
                self.add_animation(
                    tree,
                    resize.view,
                    resize.name,
                    ViewSizeAnimation::new(resize.target, false),
                    LinearTimingFunction::new(resize.duration_ms),
                );
            }
        }
    }

    fn finish(&mut self, tree: &mut ViewTree, mut animation: Animation, canceled: bool) {
        animation
            .target
            .finished(tree, animation.view, &animation.name, canceled);

        if canceled {
            tracing::debug!("Animation '{}' on {} canceled", animation.name, animation.view);
        } else {
            tracing::trace!("Animation '{}' on {} finished", animation.name, animation.view);
        }

        if let Some(on_done) = animation.on_done.take() {
            let finished = Finished {
                view: animation.view,
                name: animation.name,
                canceled,
            };
            on_done(self, tree, &finished);
        }
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Animator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animator")
            .field("animations", &self.animations.len())
            .finish()
    }
}
