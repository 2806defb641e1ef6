//! Screens and the navigation stack.

use crate::error::Result;
use crate::tree::ViewTree;
use crate::view::ViewId;
use cgmath::{Vector2, Zero};
use core::fmt;

/// A screen of the application.
///
/// Lifecycle: `on_create` once, then `on_start` each time the activity becomes the top of its
/// [`ActivityStack`], `on_stop` when another activity covers it, and `on_destroy` once when it is
/// finished.
pub trait Activity: fmt::Debug {
    /// Builds the content, typically with [`Window::set_content_view`].
    fn on_create(&mut self, window: &mut Window) -> Result<()>;

    fn on_start(&mut self, window: &mut Window) {
        let _ = window;
    }

    fn on_stop(&mut self, window: &mut Window) {
        let _ = window;
    }

    fn on_destroy(&mut self, window: &mut Window) {
        let _ = window;
    }
}

/// The surface an activity draws into: a title, a size and a view tree.
#[derive(Debug)]
pub struct Window {
    title: String,
    size: Vector2<f64>,
    tree: ViewTree,
    content: Option<ViewId>,
    shown: bool,
    finish_requested: bool,
}

impl Default for Window {
    fn default() -> Self {
        Window::new()
    }
}

impl Window {
    pub fn new() -> Window {
        Window::with_tree(ViewTree::new())
    }

    pub fn with_tree(tree: ViewTree) -> Window {
        Window {
            title: "Title".into(),
            size: Vector2::zero(),
            tree,
            content: None,
            shown: false,
            finish_requested: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// The requested size. Zero means the surface decides.
    pub fn size(&self) -> Vector2<f64> {
        self.size
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.size = Vector2::new(width.max(0.), height.max(0.));
    }

    pub fn tree(&self) -> &ViewTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ViewTree {
        &mut self.tree
    }

    pub fn content(&self) -> Option<ViewId> {
        self.content
    }

    /// Makes `view` the window's content, replacing the previous content.
    pub fn set_content_view(&mut self, view: ViewId) -> Result<()> {
        let root = self.tree.root();
        if let Some(previous) = self.content.take() {
            if self.tree.superview(previous) == Some(root) {
                self.tree.remove_view(root, previous)?;
            }
        }
        self.tree.add_view(root, view)?;
        self.content = Some(view);
        Ok(())
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Asks the owning stack to finish this window's activity. Honored only while the activity
    /// is on top.
    pub fn finish(&mut self) {
        self.finish_requested = true;
    }

    fn show(&mut self) {
        self.shown = true;
        let root = self.tree.root();
        self.tree.request_layout(root);
    }

    fn close(&mut self) {
        self.shown = false;
        let root = self.tree.root();
        if let Some(content) = self.content.take() {
            if self.tree.superview(content) == Some(root) {
                let _ = self.tree.remove_view(root, content);
            }
        }
    }
}

#[derive(Debug)]
struct Entry {
    activity: Box<dyn Activity>,
    window: Window,
}

/// The navigation stack. Only the top activity is started.
#[derive(Debug, Default)]
pub struct ActivityStack {
    entries: Vec<Entry>,
}

impl ActivityStack {
    pub fn new() -> ActivityStack {
        ActivityStack::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The window of the top activity.
    pub fn current_window(&self) -> Option<&Window> {
        self.entries.last().map(|entry| &entry.window)
    }

    pub fn current_window_mut(&mut self) -> Option<&mut Window> {
        self.entries.last_mut().map(|entry| &mut entry.window)
    }

    /// Stops the current activity and starts `activity` on top of it.
    ///
    /// If `on_create` fails, the new activity is dropped and the previous one restarted.
    pub fn start<A: Activity + 'static>(&mut self, activity: A) -> Result<()> {
        if let Some(top) = self.entries.last_mut() {
            top.activity.on_stop(&mut top.window);
            top.window.finish_requested = false;
            tracing::debug!(activity = ?top.activity, "stopped");
        }

        let mut entry = Entry {
            activity: Box::new(activity),
            window: Window::new(),
        };
        if let Err(err) = entry.activity.on_create(&mut entry.window) {
            tracing::warn!(activity = ?entry.activity, %err, "failed to create activity");
            self.restart_top();
            return Err(err);
        }
        tracing::debug!(activity = ?entry.activity, "created");
        self.entries.push(entry);
        self.restart_top();
        Ok(())
    }

    /// Destroys the top activity and restarts the one below it. Returns false if the stack was
    /// empty.
    pub fn finish(&mut self) -> bool {
        let mut entry = match self.entries.pop() {
            Some(entry) => entry,
            None => return false,
        };
        entry.activity.on_destroy(&mut entry.window);
        entry.window.close();
        tracing::debug!(activity = ?entry.activity, "destroyed");
        self.restart_top();
        true
    }

    /// Navigates back: finishes the top activity.
    pub fn back(&mut self) -> bool {
        self.finish()
    }

    fn restart_top(&mut self) {
        if let Some(top) = self.entries.last_mut() {
            top.activity.on_start(&mut top.window);
            top.window.show();
            tracing::debug!(activity = ?top.activity, "started");
            if top.window.finish_requested {
                top.window.finish_requested = false;
                self.finish();
            }
        }
    }

    /// Finishes the top activity if its window asked to be finished.
    pub fn process_finish_requests(&mut self) {
        let requested = self
            .entries
            .last_mut()
            .map_or(false, |top| std::mem::take(&mut top.window.finish_requested));
        if requested {
            self.finish();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::view::View;
    use parking_lot::Mutex;
    use std::sync::Arc;

    type Journal = Arc<Mutex<Vec<String>>>;

    #[derive(Debug)]
    struct Screen {
        name: &'static str,
        journal: Journal,
        finish_on_start: bool,
    }

    impl Screen {
        fn new(name: &'static str, journal: &Journal) -> Screen {
            Screen {
                name,
                journal: Arc::clone(journal),
                finish_on_start: false,
            }
        }

        fn log(&self, event: &str) {
            self.journal.lock().push(format!("{} {}", self.name, event));
        }
    }

    impl Activity for Screen {
        fn on_create(&mut self, window: &mut Window) -> Result<()> {
            self.log("create");
            window.set_title(self.name);
            let content = window.tree_mut().create(View::new());
            window.set_content_view(content)
        }

        fn on_start(&mut self, window: &mut Window) {
            self.log("start");
            if self.finish_on_start {
                window.finish();
            }
        }

        fn on_stop(&mut self, _window: &mut Window) {
            self.log("stop");
        }

        fn on_destroy(&mut self, _window: &mut Window) {
            self.log("destroy");
        }
    }

    #[derive(Debug)]
    struct Broken;

    impl Activity for Broken {
        fn on_create(&mut self, _window: &mut Window) -> Result<()> {
            Err(Error::Configuration("broken".into()))
        }
    }

    #[test]
    fn lifecycle_order() {
        let journal = Journal::default();
        let mut stack = ActivityStack::new();
        stack.start(Screen::new("a", &journal)).unwrap();
        stack.start(Screen::new("b", &journal)).unwrap();
        assert_eq!(stack.current_window().map(|w| w.title()), Some("b"));
        assert!(stack.back());
        assert_eq!(stack.current_window().map(|w| w.title()), Some("a"));
        assert!(stack.finish());
        assert!(!stack.finish());

        assert_eq!(
            *journal.lock(),
            vec![
                "a create", "a start", "a stop", "b create", "b start", "b destroy", "a start",
                "a destroy",
            ]
        );
    }

    #[test]
    fn content_is_attached_while_shown() {
        let journal = Journal::default();
        let mut stack = ActivityStack::new();
        stack.start(Screen::new("a", &journal)).unwrap();
        let window = stack.current_window().unwrap();
        assert!(window.is_shown());
        let content = window.content().unwrap();
        assert!(window.tree().view(content).unwrap().is_attached());
    }

    #[test]
    fn failed_create_restarts_previous() {
        let journal = Journal::default();
        let mut stack = ActivityStack::new();
        stack.start(Screen::new("a", &journal)).unwrap();
        assert!(stack.start(Broken).is_err());
        assert_eq!(stack.len(), 1);
        assert_eq!(*journal.lock(), vec!["a create", "a start", "a stop", "a start"]);
    }

    #[test]
    fn window_finish_request() {
        let journal = Journal::default();
        let mut stack = ActivityStack::new();
        stack.start(Screen::new("a", &journal)).unwrap();
        stack.start(Screen {
            finish_on_start: true,
            ..Screen::new("b", &journal)
        })
        .unwrap();
        assert_eq!(stack.len(), 1);

        if let Some(window) = stack.current_window_mut() {
            window.finish();
        }
        stack.process_finish_requests();
        assert!(stack.is_empty());
    }
}
