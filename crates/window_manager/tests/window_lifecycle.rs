use std::rc::Rc;

use pretty_assertions::assert_eq;
use window_manager::{
    reduce_window_manager, ManualClock, OpenWindowRequest, PointerPosition, Position, Size,
    Transition, Viewport, WindowAction, WindowId, WindowManager, WindowManagerConfig,
};

#[derive(Debug, Clone, PartialEq)]
struct AppHandle(&'static str);

fn setup() -> (WindowManager<AppHandle>, ManualClock) {
    let clock = ManualClock::new(0);
    let manager = WindowManager::with_clock(WindowManagerConfig::default(), Rc::new(clock.clone()));
    (manager, clock)
}

fn id(raw: &str) -> WindowId {
    WindowId::new(raw)
}

fn open(manager: &mut WindowManager<AppHandle>, raw: &str) {
    manager.open(OpenWindowRequest::new(raw, raw, AppHandle("app")));
}

fn assert_invariants(manager: &WindowManager<AppHandle>) {
    let active: Vec<_> = manager.windows().iter().filter(|w| w.is_active).collect();
    assert!(active.len() <= 1, "more than one active window: {active:?}");
    assert!(manager
        .windows()
        .iter()
        .all(|w| !(w.is_minimized && w.is_active)));

    let mut ids: Vec<_> = manager.windows().iter().map(|w| w.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), manager.len());

    let min = manager.config().min_size;
    assert!(manager
        .windows()
        .iter()
        .all(|w| w.size.width >= min.width && w.size.height >= min.height));
}

#[test]
fn cascade_scenario_from_an_empty_desktop() {
    let (mut wm, _) = setup();

    open(&mut wm, "notepad-1");
    assert_eq!(wm.window(&id("notepad-1")).unwrap().position, Position::new(100, 100));

    open(&mut wm, "calc-2");
    assert_eq!(wm.window(&id("calc-2")).unwrap().position, Position::new(130, 130));

    wm.focus(&id("notepad-1"));
    let notepad = wm.window(&id("notepad-1")).unwrap();
    let top = wm.windows().iter().map(|w| w.z_index).max().unwrap();
    assert_eq!(notepad.z_index, top);
    assert!(notepad.is_active);
    assert!(!wm.window(&id("calc-2")).unwrap().is_active);
    assert_invariants(&wm);
}

#[test]
fn opening_an_open_id_focuses_instead_of_duplicating() {
    let (mut wm, _) = setup();
    open(&mut wm, "x");
    open(&mut wm, "y");
    let z_before = wm.window(&id("x")).unwrap().z_index;

    assert!(!wm.open(OpenWindowRequest::new("x", "replacement", AppHandle("other"))));

    assert_eq!(wm.windows().iter().filter(|w| w.id == id("x")).count(), 1);
    let x = wm.window(&id("x")).unwrap();
    assert_eq!(x.title, "x");
    assert_eq!(x.content, AppHandle("app"));
    assert!(x.is_active);
    assert!(x.z_index > z_before);
    assert_invariants(&wm);
}

#[test]
fn refocusing_moves_a_window_back_above_later_ones() {
    let (mut wm, _) = setup();
    open(&mut wm, "a");
    open(&mut wm, "b");

    wm.focus(&id("a"));
    wm.focus(&id("b"));
    wm.focus(&id("a"));

    let a = wm.window(&id("a")).unwrap().z_index;
    let b = wm.window(&id("b")).unwrap().z_index;
    assert!(a > b);
}

#[test]
fn focusing_the_active_window_still_raises_it() {
    let (mut wm, _) = setup();
    open(&mut wm, "a");
    let before = wm.window(&id("a")).unwrap().z_index;
    wm.focus(&id("a"));
    assert_eq!(wm.window(&id("a")).unwrap().z_index, before + 1);
}

#[test]
fn minimize_clears_activity_and_restore_does_not_focus() {
    let (mut wm, _) = setup();
    open(&mut wm, "a");

    wm.minimize(&id("a"));
    let a = wm.window(&id("a")).unwrap();
    assert!(a.is_minimized);
    assert!(!a.is_active);
    assert_eq!(a.transition, Some(Transition::Minimizing));
    assert!(wm.visible_windows().is_empty());
    assert_invariants(&wm);

    wm.minimize(&id("a"));
    let a = wm.window(&id("a")).unwrap();
    assert!(!a.is_minimized);
    assert!(!a.is_active);
    assert_eq!(a.transition, Some(Transition::Reopening));
    assert_eq!(wm.active_window_id(), None);
}

#[test]
fn restore_focuses_when_configured() {
    let clock = ManualClock::new(0);
    let config = WindowManagerConfig {
        restore_focuses: true,
        ..WindowManagerConfig::default()
    };
    let mut wm = WindowManager::with_clock(config, Rc::new(clock));
    open(&mut wm, "a");
    wm.minimize(&id("a"));
    wm.minimize(&id("a"));
    assert_eq!(wm.active_window_id(), Some(&id("a")));
}

#[test]
fn focusing_a_minimized_window_is_ignored() {
    let (mut wm, _) = setup();
    open(&mut wm, "a");
    wm.minimize(&id("a"));
    let z = wm.window(&id("a")).unwrap().z_index;

    assert!(!wm.focus(&id("a")));
    let a = wm.window(&id("a")).unwrap();
    assert!(!a.is_active);
    assert_eq!(a.z_index, z);
}

#[test]
fn drag_overflow_shrinks_instead_of_repositioning() {
    let (mut wm, _) = setup();
    let viewport = Viewport::new(1600, 1000);
    wm.set_viewport(viewport);
    wm.open(
        OpenWindowRequest::new("a", "A", AppHandle("app"))
            .with_position(Position::new(100, 100))
            .with_size(Size::new(800, 600)),
    );

    wm.begin_drag(&id("a"), PointerPosition::new(0, 0));
    wm.update_drag(PointerPosition::new(viewport.width - 600, 0));
    wm.end_drag();

    let a = wm.window(&id("a")).unwrap();
    assert_eq!(a.position, Position::new(viewport.width - 500, 100));
    assert!(a.position.x + a.size.width <= viewport.width - 20);
    assert_eq!(a.size, Size::new(480, 600));
}

#[test]
fn drag_near_the_right_edge_stops_shrinking_at_the_minimum() {
    let (mut wm, _) = setup();
    let viewport = Viewport::new(1600, 1000);
    wm.set_viewport(viewport);
    wm.open(
        OpenWindowRequest::new("a", "A", AppHandle("app"))
            .with_position(Position::new(100, 100))
            .with_size(Size::new(800, 600)),
    );

    wm.begin_drag(&id("a"), PointerPosition::new(0, 0));
    wm.update_drag(PointerPosition::new(viewport.width - 150, 0));
    wm.end_drag();

    let a = wm.window(&id("a")).unwrap();
    assert_eq!(a.position.x, viewport.width - 50);
    assert_eq!(a.size.width, 300);
    assert_invariants(&wm);
}

#[test]
fn close_is_deferred_until_the_timer_elapses() {
    let (mut wm, clock) = setup();
    open(&mut wm, "a");

    wm.close(&id("a"));
    assert!(wm.contains(&id("a")));
    assert_eq!(wm.window(&id("a")).unwrap().transition, Some(Transition::Closing));

    clock.advance(299);
    wm.run_due_timers();
    assert!(wm.contains(&id("a")));

    clock.advance(1);
    assert_eq!(wm.run_due_timers(), vec![id("a")]);
    assert!(!wm.contains(&id("a")));
}

#[test]
fn a_closed_id_can_be_opened_again_after_removal() {
    let (mut wm, clock) = setup();
    open(&mut wm, "a");
    wm.close(&id("a"));
    clock.advance(300);
    wm.run_due_timers();

    assert!(wm.open(OpenWindowRequest::new("a", "again", AppHandle("app"))));
    assert_eq!(wm.window(&id("a")).unwrap().transition, Some(Transition::Opening));
}

#[test]
fn interactions_on_a_removed_window_write_nothing() {
    let (mut wm, clock) = setup();
    open(&mut wm, "a");
    open(&mut wm, "b");

    wm.begin_drag(&id("b"), PointerPosition::new(0, 0));
    wm.close(&id("b"));
    clock.advance(300);
    wm.run_due_timers();

    assert!(!wm.update_drag(PointerPosition::new(40, 40)));
    assert!(!wm.end_drag());
    assert!(wm.interaction().is_none());
    assert!(!wm.update_position(&id("b"), Position::new(1, 1)));
    assert_eq!(wm.len(), 1);
    assert_invariants(&wm);
}

#[test]
fn saturated_windows_stack_in_creation_order() {
    let (mut wm, _) = setup();
    for n in 0..60 {
        let raw = format!("w-{n}");
        wm.open(OpenWindowRequest::new(raw.as_str(), raw.as_str(), AppHandle("app")));
        wm.focus(&id(&raw));
    }

    assert_eq!(wm.next_z_index(), 99);
    let saturated: Vec<_> = wm
        .visible_windows()
        .into_iter()
        .filter(|w| w.z_index == 99)
        .map(|w| w.id.as_str().to_string())
        .collect();
    assert!(saturated.len() > 1);
    let mut sorted = saturated.clone();
    sorted.sort_by_key(|raw| raw[2..].parse::<u32>().unwrap());
    assert_eq!(saturated, sorted);
    assert_invariants(&wm);
}

#[test]
fn reducer_drives_a_full_lifecycle() {
    let (mut wm, clock) = setup();
    let window_id = id("notepad-1");
    let actions = vec![
        WindowAction::Open(OpenWindowRequest::new(
            window_id.clone(),
            "Notepad",
            AppHandle("notepad"),
        )),
        WindowAction::BeginDrag {
            window_id: window_id.clone(),
            pointer: PointerPosition::new(120, 110),
        },
        WindowAction::UpdateDrag {
            pointer: PointerPosition::new(220, 160),
        },
        WindowAction::EndDrag,
        WindowAction::Minimize {
            window_id: window_id.clone(),
        },
        WindowAction::ToggleFromTaskbar {
            window_id: window_id.clone(),
        },
        WindowAction::Close {
            window_id: window_id.clone(),
        },
    ];
    for action in actions {
        reduce_window_manager(&mut wm, action);
        assert_invariants(&wm);
    }

    assert_eq!(wm.window(&window_id).unwrap().position, Position::new(200, 150));
    clock.advance(300);
    reduce_window_manager(&mut wm, WindowAction::RunDueTimers);
    assert!(wm.is_empty());
}
