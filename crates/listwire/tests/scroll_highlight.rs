//! scroll-to-last and the timed highlight

use listwire::headless::{HeadlessRuntime, ScriptEvent};
use listwire::memory::ItemSpec;

#[test]
fn scrolls_last_item_and_clears_highlight_after_delay() {
    let mut runtime = HeadlessRuntime::with_ids(&["1", "2", "3", "4"]);

    runtime.dispatch(&ScriptEvent::ScrollToLast).unwrap();

    let last = runtime.list().find("4").unwrap();
    assert_eq!(runtime.list().scrolled_to(), [last]);
    assert_eq!(runtime.snapshot().highlighted, ["4"]);

    runtime.advance(1_999);
    assert_eq!(runtime.snapshot().highlighted, ["4"]);

    runtime.advance(1);
    assert!(runtime.snapshot().highlighted.is_empty());
    assert_eq!(runtime.now_ms(), 2_000);
}

#[test]
fn appended_item_is_scrolled_to() {
    let mut runtime = HeadlessRuntime::with_ids(&["1"]);

    runtime
        .dispatch(&ScriptEvent::Append {
            item: ItemSpec::new("2", "fresh"),
            scroll: true,
        })
        .unwrap();

    assert_eq!(runtime.snapshot().order, ["1", "2"]);
    assert_eq!(runtime.snapshot().highlighted, ["2"]);
}

#[test]
fn empty_list_does_nothing() {
    let mut runtime = HeadlessRuntime::with_ids(&[]);

    runtime.dispatch(&ScriptEvent::ScrollToLast).unwrap();
    runtime.advance(5_000);

    assert!(runtime.list().scrolled_to().is_empty());
}

#[test]
fn highlight_timer_tolerates_removed_item() {
    let mut runtime = HeadlessRuntime::with_ids(&["1", "2"]);
    runtime.dispatch(&ScriptEvent::ScrollToLast).unwrap();
    let highlighted = runtime.list().find("2").unwrap();

    runtime
        .dispatch(&ScriptEvent::Swap {
            items: vec![ItemSpec::new("1", "only")],
            replace_container: false,
        })
        .unwrap();
    runtime.advance(2_000);

    assert!(!runtime.list().has_class(highlighted, "highlight"));
    assert!(runtime.snapshot().highlighted.is_empty());
}

#[test]
fn configured_delay_is_honoured() {
    let config = listwire::ControllerConfig {
        highlight_ms: 500,
        ..Default::default()
    };
    let mut runtime = HeadlessRuntime::new(config, listwire::memory::MemoryList::with_ids(&["1"]));

    runtime.dispatch(&ScriptEvent::ScrollToLast).unwrap();
    runtime.advance(499);
    assert_eq!(runtime.snapshot().highlighted, ["1"]);
    runtime.advance(1);
    assert!(runtime.snapshot().highlighted.is_empty());
}
