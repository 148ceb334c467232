//! A presenter that logs what a real UI layer would do.

use std::collections::{BTreeMap, HashMap};

use parking_lot::Mutex;
use tracing::info;
use waypost::{Completion, Presenter, Screen, ScreenHandle, View};

/// Content of every simulated screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Title registered for the route.
    pub title: String,
    /// Query parameters the factory received.
    pub params: BTreeMap<String, String>,
}

impl Page {
    /// A page without parameters.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            params: BTreeMap::new(),
        }
    }

    /// `Title(k=v, ...)`, or just the title without parameters.
    pub fn label(&self) -> String {
        if self.params.is_empty() {
            return self.title.clone();
        }
        let params: Vec<String> = self
            .params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        format!("{}({})", self.title, params.join(", "))
    }
}

/// Labels of rendered screens.
#[derive(Default)]
struct ConsoleState {
    /// Last allocated handle.
    next: u64,
    /// Label per rendered screen.
    labels: HashMap<ScreenHandle, String>,
}

/// Presenter that records screen labels and logs every operation.
#[derive(Default)]
pub struct ConsolePresenter {
    /// Rendered screens.
    state: Mutex<ConsoleState>,
}

impl ConsolePresenter {
    /// An empty presenter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Label for `screen`, or `#n` for screens this presenter never rendered.
    pub fn label(&self, screen: ScreenHandle) -> String {
        self.state
            .lock()
            .labels
            .get(&screen)
            .cloned()
            .unwrap_or_else(|| format!("#{}", screen.raw()))
    }

    /// Labels for `screens`, in order.
    pub fn labels(&self, screens: &[ScreenHandle]) -> Vec<String> {
        screens.iter().map(|s| self.label(*s)).collect()
    }
}

impl Presenter for ConsolePresenter {
    fn render(&self, view: View) -> ScreenHandle {
        let label = view
            .content::<Page>()
            .map(Page::label)
            .unwrap_or_else(|| view.content_type().to_string());
        let mut st = self.state.lock();
        st.next += 1;
        let handle = ScreenHandle::new(st.next);
        info!(screen = handle.raw(), label = %label, "render");
        st.labels.insert(handle, label);
        handle
    }

    fn push(&self, screen: &Screen, animated: bool) {
        info!(screen = %self.label(screen.handle()), animated, "push");
    }

    fn pop(&self, screen: ScreenHandle, animated: bool) {
        info!(screen = %self.label(screen), animated, "pop");
    }

    fn pop_to_root(&self, popped: &[ScreenHandle], animated: bool) {
        info!(popped = ?self.labels(popped), animated, "pop_to_root");
    }

    fn set_stack(&self, root: &Screen, discarded: &[ScreenHandle], animated: bool) {
        info!(
            root = %self.label(root.handle()),
            discarded = ?self.labels(discarded),
            animated,
            "set_stack"
        );
    }

    fn present(&self, screen: &Screen, animated: bool) {
        info!(
            screen = %self.label(screen.handle()),
            style = ?screen.modal_style(),
            transition = ?screen.transition(),
            animated,
            "present"
        );
    }

    fn dismiss(&self, dismissed: &[ScreenHandle], animated: bool, on_complete: Completion) {
        info!(dismissed = ?self.labels(dismissed), animated, "dismiss");
        on_complete();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_include_parameters() {
        let mut page = Page::titled("Detail");
        assert_eq!(page.label(), "Detail");
        page.params.insert("id".into(), "7".into());
        page.params.insert("tab".into(), "info".into());
        assert_eq!(page.label(), "Detail(id=7, tab=info)");
    }

    #[test]
    fn render_assigns_fresh_handles() {
        let presenter = ConsolePresenter::new();
        let a = presenter.render(View::new(Page::titled("A")));
        let b = presenter.render(View::new(42_u8));
        assert_ne!(a, b);
        assert_eq!(presenter.label(a), "A");
        assert_eq!(presenter.label(b), "u8");
        assert_eq!(presenter.label(ScreenHandle::new(99)), "#99");
    }
}
