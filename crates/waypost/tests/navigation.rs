use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use waypost::{
    ModalStyle, NavOptions, Navigator, PresentationMode, RootMount, Router, RouterConfig,
    TransitionStyle, View,
    mock::{CollectingSink, MockPresenter},
};

/// Content used by every test view.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Page(&'static str);

/// Router over a mock presenter with a mounted root.
fn setup() -> (Router, Arc<MockPresenter>, RootMount) {
    let presenter = Arc::new(MockPresenter::new());
    let router = Router::with_parts(
        presenter.clone(),
        RouterConfig::default(),
        Arc::new(CollectingSink::new()),
    );
    let mount = router.mount(|_| View::new(Page("root")));
    (router, presenter, mount)
}

/// A view showing `name`.
fn page(name: &'static str) -> View {
    View::new(Page(name))
}

/// Hit counter plus a factory for completions that bump it.
fn counter() -> (Arc<AtomicUsize>, impl Fn() -> Box<dyn FnOnce() + Send>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let make = {
        let hits = hits.clone();
        move || {
            let hits = hits.clone();
            Box::new(move || {
                hits.fetch_add(1, Ordering::SeqCst);
            }) as Box<dyn FnOnce() + Send>
        }
    };
    (hits, make)
}

#[test]
fn mount_installs_an_invisible_root() {
    let (_router, presenter, mount) = setup();
    let nav = mount.navigator().unwrap();
    assert_eq!(nav.depth(), 1);
    assert_eq!(presenter.calls(), vec!["render", "set_stack"]);
    assert_eq!(presenter.stack(), nav.stack());
    assert_eq!(presenter.animation_flags(), vec![false]);

    let root = nav.root().unwrap();
    let state = presenter
        .with_view(root, |v| v.env().presentation())
        .unwrap();
    assert_eq!(state.mode(), PresentationMode::None);
    assert!(!state.is_visible());
}

#[test]
fn push_and_pop_round_trip() {
    let (_router, presenter, mount) = setup();
    let nav = mount.navigator().unwrap();
    let root = nav.root();

    for name in ["a", "b", "c"] {
        nav.push(page(name), NavOptions::new());
    }
    assert_eq!(nav.depth(), 4);
    assert_eq!(presenter.stack(), nav.stack());

    for _ in 0..3 {
        assert!(nav.pop(true).is_some());
    }
    assert_eq!(nav.depth(), 1);
    assert_eq!(nav.top(), root);
    assert_eq!(presenter.stack(), nav.stack());

    assert_eq!(nav.pop(true), None);
    assert_eq!(nav.depth(), 1);
    assert_eq!(presenter.count("pop"), 3);
}

#[test]
fn pop_to_root_keeps_only_the_root() {
    let (_router, presenter, mount) = setup();
    let nav = mount.navigator().unwrap();
    nav.push(page("a"), NavOptions::new());
    nav.push(page("b"), NavOptions::new());

    let popped = nav.pop_to_root(false);
    assert_eq!(popped.len(), 2);
    assert_eq!(nav.depth(), 1);
    assert!(presenter.calls_contains("pop_to_root"));
    assert!(nav.pop_to_root(false).is_empty());
    assert_eq!(presenter.count("pop_to_root"), 1);
}

#[test]
fn pushed_state_is_visible_only_on_top() {
    let (_router, _presenter, mount) = setup();
    let nav = mount.navigator().unwrap();
    let first = nav.push(page("a"), NavOptions::new());
    assert!(first.is_visible());

    let second = nav.push(page("b"), NavOptions::new());
    assert!(!first.is_visible());
    assert!(second.is_visible());

    second.dismiss(true);
    assert!(!second.is_visible());
    assert!(first.is_visible());
    assert_eq!(nav.depth(), 2);
}

#[test]
fn dismissing_a_buried_push_pops_the_top() {
    let (_router, _presenter, mount) = setup();
    let nav = mount.navigator().unwrap();
    let buried = nav.push(page("a"), NavOptions::new());
    let top = nav.push(page("b"), NavOptions::new());

    buried.dismiss(true);
    assert_eq!(nav.depth(), 2);
    assert_eq!(nav.top(), buried.screen());
    assert!(!top.is_visible());
}

#[test]
fn push_dismiss_runs_completion_even_when_already_gone() {
    let (_router, presenter, mount) = setup();
    let nav = mount.navigator().unwrap();
    let state = nav.push(page("a"), NavOptions::new());
    let (hits, make) = counter();

    state.dismiss_then(true, make());
    state.dismiss_then(true, make());

    assert_eq!(hits.load(Ordering::SeqCst), 2);
    assert_eq!(presenter.count("pop"), 1);
    assert_eq!(nav.depth(), 1);
}

#[test]
fn replace_collapses_the_stack() {
    let (_router, presenter, mount) = setup();
    let nav = mount.navigator().unwrap();
    for name in ["a", "b", "c", "d"] {
        nav.push(page(name), NavOptions::new());
    }
    assert_eq!(nav.depth(), 5);

    let state = nav.replace(page("fresh"), NavOptions::new());
    assert_eq!(nav.depth(), 1);
    assert_eq!(nav.stack(), vec![state.screen().unwrap()]);
    assert_eq!(presenter.stack(), nav.stack());
    assert!(state.is_visible());
}

#[test]
fn replaced_root_cannot_be_dismissed() {
    let (_router, presenter, mount) = setup();
    let nav = mount.navigator().unwrap();
    let state = nav.replace(page("fresh"), NavOptions::new());
    let (hits, make) = counter();
    presenter.clear_calls();

    state.dismiss_then(true, make());
    assert!(presenter.calls().is_empty());
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert!(state.is_visible());
}

#[test]
fn replace_leaves_modals_alone() {
    let (_router, _presenter, mount) = setup();
    let nav = mount.navigator().unwrap();
    let sheet = nav.sheet(page("sheet"), NavOptions::new());
    nav.replace(page("fresh"), NavOptions::new());
    assert!(sheet.is_visible());
    assert_eq!(nav.modals().len(), 1);
}

#[test]
fn modal_dismiss_is_idempotent() {
    let (_router, presenter, mount) = setup();
    let nav = mount.navigator().unwrap();
    let state = nav.sheet(page("sheet"), NavOptions::new());
    assert!(state.is_visible());
    let (hits, make) = counter();

    state.dismiss_then(true, make());
    state.dismiss_then(true, make());

    assert!(!state.is_visible());
    assert_eq!(presenter.count("dismiss"), 1);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
    assert!(nav.modals().is_empty());
}

#[test]
fn dismissing_a_modal_takes_the_ones_above_it() {
    let (_router, presenter, mount) = setup();
    let nav = mount.navigator().unwrap();
    let lower = nav.sheet(page("lower"), NavOptions::new());
    let upper = nav.full_screen(page("upper"), NavOptions::new());
    assert_eq!(nav.modals().len(), 2);

    lower.dismiss(false);
    assert!(!lower.is_visible());
    assert!(!upper.is_visible());
    assert!(presenter.modals().is_empty());
    assert_eq!(nav.depth(), 1);
}

#[test]
fn modal_screens_carry_style_and_transition() {
    let (_router, presenter, mount) = setup();
    let nav = mount.navigator().unwrap();
    let cases = [
        (PresentationMode::Sheet, ModalStyle::PageSheet),
        (PresentationMode::FullScreen, ModalStyle::FullScreen),
        (PresentationMode::OverFullScreen, ModalStyle::OverFullScreen),
        (PresentationMode::FormSheet, ModalStyle::FormSheet),
        (PresentationMode::CurrentContext, ModalStyle::CurrentContext),
        (
            PresentationMode::OverCurrentContext,
            ModalStyle::OverCurrentContext,
        ),
    ];
    for (mode, style) in cases {
        let opts = NavOptions::new().transition(TransitionStyle::FlipHorizontal);
        let state = nav.show(page("modal"), mode, opts).unwrap();
        assert_eq!(state.mode(), mode);
        let screen = presenter.last_attached().unwrap();
        assert_eq!(screen.modal_style(), Some(style));
        assert_eq!(screen.transition(), TransitionStyle::FlipHorizontal);
    }
    assert_eq!(nav.modals().len(), 6);
    assert_eq!(nav.depth(), 1);
}

#[test]
fn pushed_screens_have_no_modal_style() {
    let (_router, presenter, mount) = setup();
    let nav = mount.navigator().unwrap();
    nav.push(page("a"), NavOptions::new().transition(TransitionStyle::PartialCurl));
    let screen = presenter.last_attached().unwrap();
    assert_eq!(screen.modal_style(), None);
    assert_eq!(screen.transition(), TransitionStyle::CoverVertical);
}

#[test]
fn show_with_none_attaches_nothing() {
    let (_router, presenter, mount) = setup();
    presenter.clear_calls();
    let nav = mount.navigator().unwrap();
    assert!(nav.show(page("x"), PresentationMode::None, NavOptions::new()).is_none());
    assert!(presenter.calls().is_empty());
}

#[test]
fn configure_hook_runs_before_attach() {
    let (_router, presenter, mount) = setup();
    let nav = mount.navigator().unwrap();
    let opts = NavOptions::new().configure(|screen| {
        screen.set_title("Details");
        screen.set_attr("accent", "blue");
    });
    nav.push(page("a"), opts);
    let screen = presenter.last_attached().unwrap();
    assert_eq!(screen.title(), Some("Details"));
    assert_eq!(screen.attr("accent"), Some("blue"));
}

#[test]
fn animation_flag_reaches_the_presenter() {
    let (_router, presenter, mount) = setup();
    let nav = mount.navigator().unwrap();
    nav.push(page("a"), NavOptions::instant());
    nav.sheet(page("b"), NavOptions::new());
    nav.pop(true);
    assert_eq!(presenter.animation_flags(), vec![false, false, true, true]);
}

#[test]
fn content_sees_its_navigator_and_state() {
    let (_router, presenter, mount) = setup();
    let nav = mount.navigator().unwrap();
    let state = nav.push(page("a"), NavOptions::new());
    let handle = state.screen().unwrap();

    let (found, own) = presenter
        .with_view(handle, |v| {
            let found = v.env().navigator();
            (found, v.env().presentation())
        })
        .unwrap();
    assert!(found.is_some_and(|n: Navigator| n.ptr_eq(&nav)));
    assert_eq!(own.screen(), Some(handle));

    own.dismiss(true);
    assert_eq!(nav.depth(), 1);
}

#[test]
fn content_closures_are_evaluated_eagerly() {
    let (_router, presenter, mount) = setup();
    let nav = mount.navigator().unwrap();
    let state = nav.sheet_with(NavOptions::new(), || page("lazy"));
    let content = presenter
        .with_view(state.screen().unwrap(), |v| v.content::<Page>().cloned())
        .unwrap();
    assert_eq!(content, Some(Page("lazy")));

    nav.push_with(NavOptions::new(), || page("pushed"));
    nav.replace_with(NavOptions::new(), || page("replaced"));
    nav.full_screen_with(NavOptions::new(), || page("full"));
    nav.over_full_screen_with(NavOptions::new(), || page("over"));
    nav.form_sheet_with(NavOptions::new(), || page("form"));
    nav.current_context_with(NavOptions::new(), || page("ctx"));
    nav.over_current_context_with(NavOptions::new(), || page("over_ctx"));
    assert_eq!(nav.depth(), 1);
    assert_eq!(nav.modals().len(), 6);
}

#[test]
fn dismiss_top_unwinds_modals_in_order() {
    let (_router, _presenter, mount) = setup();
    let nav = mount.navigator().unwrap();
    let lower = nav.sheet(page("lower"), NavOptions::new());
    let upper = nav.form_sheet(page("upper"), NavOptions::new());

    assert!(nav.dismiss_top(true));
    assert!(!upper.is_visible());
    assert!(lower.is_visible());
    assert!(nav.dismiss_top(true));
    assert!(!nav.dismiss_top(true));
}

#[test]
fn completion_may_navigate_again() {
    let (_router, _presenter, mount) = setup();
    let nav = mount.navigator().unwrap();
    let state = nav.sheet(page("sheet"), NavOptions::new());
    let follow = nav.clone();
    state.dismiss_then(true, move || {
        follow.push(View::new(Page("after")), NavOptions::new());
    });
    assert!(nav.modals().is_empty());
    assert_eq!(nav.depth(), 2);
}
