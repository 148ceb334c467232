//! Execute a script against a router and the console presenter.

use std::{
    fmt::{self, Display, Formatter},
    sync::Arc,
};

use tracing::{debug, info};
use waypost::{PathContext, PresentationState, Router, View};

use crate::{
    console::{ConsolePresenter, Page},
    error::Result,
    script::{Script, Step},
};

/// State after one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// Step label.
    pub step: String,
    /// Whether the step changed anything.
    pub applied: bool,
    /// Stack labels, root first.
    pub stack: Vec<String>,
    /// Modal labels, in presentation order.
    pub modals: Vec<String>,
}

impl Display for StepReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let marker = if self.applied { "" } else { " (no-op)" };
        write!(
            f,
            "{}{marker}\n  stack:  [{}]\n  modals: [{}]",
            self.step,
            self.stack.join(", "),
            self.modals.join(", ")
        )
    }
}

/// Register the script's routes, mount its root and run every step.
pub fn run(script: &Script) -> Result<Vec<StepReport>> {
    script.validate()?;
    let presenter = Arc::new(ConsolePresenter::new());
    let router = Router::with_config(presenter.clone(), script.config.clone());
    for spec in &script.routes {
        let title = spec.title.clone();
        router.register(&spec.pattern, move |ctx: &PathContext| {
            View::new(Page {
                title: title.clone(),
                params: ctx.params().clone(),
            })
        })?;
    }
    let root = script.root.clone();
    let mount = router.mount(move |_| View::new(Page::titled(root)));
    let nav = router.navigator(mount.id());
    info!(routes = script.routes.len(), steps = script.steps.len(), "script_start");

    let mut last: Option<PresentationState> = None;
    let mut reports = Vec::with_capacity(script.steps.len());
    for step in &script.steps {
        let applied = match step {
            Step::Route {
                path,
                mode,
                animated,
                transition,
                user_data,
            } => {
                let mut builder = nav.builder().route(path.as_str()).presentation(*mode);
                if let Some(animated) = animated {
                    builder = builder.animated(*animated);
                }
                if let Some(transition) = transition {
                    builder = builder.transition(*transition);
                }
                for (name, value) in user_data {
                    builder = builder.user_data(name.as_str(), value.clone());
                }
                let state = builder.submit();
                let applied = state.is_some();
                if state.is_some() {
                    last = state;
                }
                applied
            }
            Step::Pop => nav.pop(script.config.default_animated).is_some(),
            Step::PopToRoot => !nav.pop_to_root(script.config.default_animated).is_empty(),
            Step::DismissTop => nav.dismiss_top(script.config.default_animated),
            Step::DismissLast => match last.take() {
                Some(state) => {
                    let was_visible = state.is_visible();
                    state.dismiss(script.config.default_animated);
                    was_visible
                }
                None => false,
            },
        };
        let report = StepReport {
            step: step.label(),
            applied,
            stack: presenter.labels(&nav.stack()),
            modals: presenter.labels(&nav.modals()),
        };
        debug!(step = %report.step, applied, depth = report.stack.len(), "step_done");
        reports.push(report);
    }

    mount.unmount();
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Script with two routes, a `Home` root and `steps`.
    fn script(steps: &str) -> Script {
        Script::from_ron(&format!(
            r#"(
                root: "Home",
                routes: [
                    (pattern: "app://detail", title: "Detail"),
                    (pattern: "app://settings", title: "Settings"),
                ],
                steps: [{steps}],
            )"#
        ))
        .unwrap()
    }

    #[test]
    fn pushes_and_pops() {
        let reports = run(&script(
            r#"route(path: "app://detail?id=1", mode: push), pop, pop"#,
        ))
        .unwrap();
        assert_eq!(reports[0].stack, vec!["Home", "Detail(id=1)"]);
        assert!(reports[1].applied);
        assert_eq!(reports[1].stack, vec!["Home"]);
        assert!(!reports[2].applied);
    }

    #[test]
    fn modals_and_dismiss_last() {
        let reports = run(&script(
            r#"route(path: "app://settings", mode: sheet), dismiss_last, dismiss_last"#,
        ))
        .unwrap();
        assert_eq!(reports[0].modals, vec!["Settings"]);
        assert!(reports[1].applied);
        assert!(reports[1].modals.is_empty());
        assert!(!reports[2].applied);
    }

    #[test]
    fn replace_collapses_the_stack() {
        let reports = run(&script(
            r#"route(path: "app://detail", mode: push),
               route(path: "app://detail?id=2", mode: push),
               route(path: "app://settings", mode: replace)"#,
        ))
        .unwrap();
        assert_eq!(reports[1].stack.len(), 3);
        assert_eq!(reports[2].stack, vec!["Settings"]);
    }

    #[test]
    fn unregistered_routes_are_no_ops() {
        let reports = run(&script(r#"route(path: "app://nowhere", mode: push)"#)).unwrap();
        assert!(!reports[0].applied);
        assert_eq!(reports[0].stack, vec!["Home"]);
    }

    #[test]
    fn report_renders_no_op_marker() {
        let report = StepReport {
            step: "pop".into(),
            applied: false,
            stack: vec!["Home".into()],
            modals: Vec::new(),
        };
        assert_eq!(
            report.to_string(),
            "pop (no-op)\n  stack:  [Home]\n  modals: []"
        );
    }
}
