//! Swappable pieces of UI hosted in a container view.

use crate::error::Result;
use crate::tree::ViewTree;
use crate::view::ViewId;
use core::fmt;

/// A piece of UI that can be shown in a container and recreated on demand.
pub trait Fragment: fmt::Debug {
    /// Creates the fragment's view hierarchy and returns its top view, which must be detached.
    fn on_create_view(&mut self, tree: &mut ViewTree) -> Result<ViewId>;

    /// Called before the view created by `on_create_view` is removed and destroyed.
    fn on_destroy_view(&mut self, tree: &mut ViewTree, view: ViewId) {
        let _ = (tree, view);
    }
}

#[derive(Debug)]
struct Entry {
    fragment: Box<dyn Fragment>,
    view: Option<ViewId>,
}

/// A fragment back stack bound to a container view. Only the top fragment has a view.
#[derive(Debug)]
pub struct FragmentManager {
    container: ViewId,
    stack: Vec<Entry>,
}

impl FragmentManager {
    pub fn new(container: ViewId) -> FragmentManager {
        FragmentManager {
            container,
            stack: Vec::new(),
        }
    }

    pub fn container(&self) -> ViewId {
        self.container
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// The view of the top fragment.
    pub fn current_view(&self) -> Option<ViewId> {
        self.stack.last().and_then(|entry| entry.view)
    }

    /// Replaces the top fragment, dropping it from the stack.
    pub fn replace<F: Fragment + 'static>(&mut self, tree: &mut ViewTree, fragment: F) -> Result<()> {
        if let Some(mut top) = self.stack.pop() {
            self.destroy_view(tree, &mut top)?;
            tracing::debug!(fragment = ?top.fragment, "replaced");
        }
        self.show(tree, Box::new(fragment))
    }

    /// Pushes a fragment. The previous top stays on the stack but loses its view.
    pub fn push<F: Fragment + 'static>(&mut self, tree: &mut ViewTree, fragment: F) -> Result<()> {
        if let Some(mut top) = self.stack.pop() {
            let destroyed = self.destroy_view(tree, &mut top);
            self.stack.push(top);
            destroyed?;
        }
        self.show(tree, Box::new(fragment))
    }

    /// Pops the top fragment and recreates the view of the one below.
    ///
    /// The last fragment is never popped; returns false in that case.
    pub fn pop(&mut self, tree: &mut ViewTree) -> Result<bool> {
        if self.stack.len() <= 1 {
            return Ok(false);
        }
        if let Some(mut old) = self.stack.pop() {
            self.destroy_view(tree, &mut old)?;
            tracing::debug!(fragment = ?old.fragment, "popped");
        }
        if let Some(mut top) = self.stack.pop() {
            let created = self.create_view(tree, &mut top);
            self.stack.push(top);
            created?;
        }
        Ok(true)
    }

    fn show(&mut self, tree: &mut ViewTree, fragment: Box<dyn Fragment>) -> Result<()> {
        let mut entry = Entry {
            fragment,
            view: None,
        };
        let created = self.create_view(tree, &mut entry);
        self.stack.push(entry);
        created
    }

    fn create_view(&self, tree: &mut ViewTree, entry: &mut Entry) -> Result<()> {
        let view = entry.fragment.on_create_view(tree)?;
        tree.add_view(self.container, view)?;
        entry.view = Some(view);
        tracing::debug!(fragment = ?entry.fragment, %view, "created fragment view");
        Ok(())
    }

    fn destroy_view(&self, tree: &mut ViewTree, entry: &mut Entry) -> Result<()> {
        if let Some(view) = entry.view.take() {
            entry.fragment.on_destroy_view(tree, view);
            tree.remove_all_views(self.container)?;
            if tree.contains(view) {
                tree.destroy(view)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FrameLayout;
    use crate::view::View;
    use crate::widgets::TextView;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Debug)]
    struct Page {
        label: &'static str,
        destroyed: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Fragment for Page {
        fn on_create_view(&mut self, tree: &mut ViewTree) -> Result<ViewId> {
            Ok(tree.create(View::widget(TextView::new(self.label))))
        }

        fn on_destroy_view(&mut self, _tree: &mut ViewTree, _view: ViewId) {
            self.destroyed.lock().push(self.label);
        }
    }

    fn label(tree: &ViewTree, manager: &FragmentManager) -> Option<String> {
        let view = manager.current_view()?;
        tree.widget::<TextView>(view).map(|text| text.text.clone())
    }

    #[test]
    fn push_pop_and_replace() {
        let destroyed = Arc::new(Mutex::new(Vec::new()));
        let page = |label| Page {
            label,
            destroyed: Arc::clone(&destroyed),
        };

        let mut tree = ViewTree::new();
        let container = tree.create(View::container(FrameLayout));
        tree.add_view(tree.root(), container).unwrap();
        let mut manager = FragmentManager::new(container);

        manager.push(&mut tree, page("home")).unwrap();
        let home_view = manager.current_view().unwrap();
        manager.push(&mut tree, page("detail")).unwrap();
        assert_eq!(manager.len(), 2);
        assert_eq!(label(&tree, &manager).as_deref(), Some("detail"));
        assert_eq!(tree.child_count(container), 1);
        assert!(!tree.contains(home_view));

        assert_eq!(manager.pop(&mut tree), Ok(true));
        assert_eq!(label(&tree, &manager).as_deref(), Some("home"));
        assert_eq!(manager.pop(&mut tree), Ok(false));
        assert_eq!(manager.len(), 1);

        manager.replace(&mut tree, page("settings")).unwrap();
        assert_eq!(manager.len(), 1);
        assert_eq!(label(&tree, &manager).as_deref(), Some("settings"));
        assert_eq!(tree.child_count(container), 1);
        assert!(tree.view(manager.current_view().unwrap()).unwrap().is_attached());

        assert_eq!(*destroyed.lock(), vec!["home", "detail", "home"]);
    }
}
