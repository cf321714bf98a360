//! Runtime loop tests: queue draining, stop conditions and cross-thread
//! command posting.

use std::thread;

use tether_app::{BridgeError, BridgeEvent, HostError, Runtime};
use tether_core::{KeyAction, KeyCode, LifecycleEvent, LifecycleState, SetupError};
use tether_harness::{HostCall, NativeCall, SimHost, SimNative, sim_config};

fn lifecycle(event: LifecycleEvent) -> BridgeEvent {
    BridgeEvent::Lifecycle(event)
}

#[tokio::test]
async fn run_stops_after_destroy() {
    let dir = tempfile::tempdir().unwrap();
    let (mut runtime, sender) = Runtime::new(SimNative::new(), SimHost::new(sim_config(dir.path())));

    sender.send(lifecycle(LifecycleEvent::Create));
    sender.send(lifecycle(LifecycleEvent::Resume));
    sender.command_poster().post("toast", "hello");
    sender.send(lifecycle(LifecycleEvent::Destroy));
    sender.send(BridgeEvent::Key { device: None, code: KeyCode(62), action: KeyAction::Down });

    runtime.run().await.unwrap();

    let bridge = runtime.bridge();
    assert_eq!(bridge.lifecycle_state(), LifecycleState::Destroyed);
    assert!(bridge.host().calls().contains(&HostCall::Toast("hello".into())));
    // The key queued after destroy is never processed.
    assert_eq!(bridge.native().count(|c| matches!(c, NativeCall::KeyDown { .. })), 0);
}

#[tokio::test]
async fn run_returns_when_senders_are_gone() {
    let dir = tempfile::tempdir().unwrap();
    let (mut runtime, sender) = Runtime::new(SimNative::new(), SimHost::new(sim_config(dir.path())));

    sender.send(lifecycle(LifecycleEvent::Create));
    drop(sender);

    runtime.run().await.unwrap();
    assert_eq!(runtime.bridge().lifecycle_state(), LifecycleState::Initialized);
}

#[tokio::test]
async fn run_propagates_fatal_setup_error() {
    let (mut runtime, sender) =
        Runtime::new(SimNative::new(), SimHost::failing(HostError::Unavailable("window".into())));

    sender.send(lifecycle(LifecycleEvent::Create));

    let error = runtime.run().await.unwrap_err();
    assert!(matches!(error, BridgeError::Setup(SetupError::HostUnavailable(_))));
}

#[test]
fn pump_after_fatal_error_delivers_nothing() {
    let (mut runtime, sender) =
        Runtime::new(SimNative::new(), SimHost::failing(HostError::Unavailable("window".into())));

    sender.send(lifecycle(LifecycleEvent::Create));
    sender.send(BridgeEvent::Key { device: None, code: KeyCode(62), action: KeyAction::Down });
    sender.send(lifecycle(LifecycleEvent::Resume));

    assert!(runtime.pump().unwrap_err().is_fatal());
    assert_eq!(runtime.pump().unwrap(), 2);

    assert_eq!(runtime.bridge().lifecycle_state(), LifecycleState::Destroyed);
    assert!(runtime.bridge().native().calls().is_empty());
}

#[test]
fn pump_absorbs_lifecycle_errors() {
    let dir = tempfile::tempdir().unwrap();
    let (mut runtime, sender) = Runtime::new(SimNative::new(), SimHost::new(sim_config(dir.path())));

    sender.send(lifecycle(LifecycleEvent::Resume));
    sender.send(lifecycle(LifecycleEvent::Create));
    sender.send(lifecycle(LifecycleEvent::Resume));

    assert_eq!(runtime.pump().unwrap(), 3);
    assert_eq!(runtime.bridge().lifecycle_state(), LifecycleState::Resumed);
    assert_eq!(runtime.pump().unwrap(), 0);
}

#[test]
fn commands_posted_from_another_thread_run_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let (mut runtime, sender) = Runtime::new(SimNative::new(), SimHost::new(sim_config(dir.path())));
    sender.send(lifecycle(LifecycleEvent::Create));

    let poster = sender.command_poster();
    thread::spawn(move || {
        for n in 0..5 {
            poster.post("toast", n.to_string());
        }
    })
    .join()
    .unwrap();

    runtime.pump().unwrap();

    let toasts: Vec<_> = runtime
        .bridge()
        .host()
        .calls()
        .iter()
        .filter_map(|c| match c {
            HostCall::Toast(text) => Some(text.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(toasts, vec!["0", "1", "2", "3", "4"]);
}

#[test]
fn prompt_round_trip_through_queue() {
    let dir = tempfile::tempdir().unwrap();
    let (mut runtime, sender) = Runtime::new(SimNative::new(), SimHost::new(sim_config(dir.path())));
    sender.send(lifecycle(LifecycleEvent::Create));
    sender.command_poster().post("inputbox", "Nickname:anon");
    runtime.pump().unwrap();

    let (request, responder) = runtime.bridge_mut().host_mut().take_prompt().unwrap();
    assert_eq!(request.default_text, "anon");
    responder.confirm("ferris");
    runtime.pump().unwrap();

    assert_eq!(runtime.bridge().native().messages(), vec![(
        "inputbox_completed".to_owned(),
        "ferris".to_owned()
    )]);
}

#[test]
fn destroy_abandons_open_prompts_silently() {
    let dir = tempfile::tempdir().unwrap();
    let (mut runtime, sender) = Runtime::new(SimNative::new(), SimHost::new(sim_config(dir.path())));
    sender.send(lifecycle(LifecycleEvent::Create));
    sender.command_poster().post("inputbox", "Nickname:");
    runtime.pump().unwrap();
    assert_eq!(runtime.bridge().pending_prompts(), 1);

    sender.send(lifecycle(LifecycleEvent::Destroy));
    runtime.pump().unwrap();

    assert_eq!(runtime.bridge().pending_prompts(), 0);
    assert!(runtime.bridge().native().messages().is_empty());
}
