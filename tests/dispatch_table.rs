mod common;

use std::sync::Arc;

use anyhow::Result;
use serde_json::json;
use tokio::sync::Notify;

use common::{MockSimulator, Reply, log_contains, with_session};
use memsim::dispatch::{Dispatcher, FormState, Trigger, parse_command, shortcut};
use memsim::error::{CommandError, Outcome};
use memsim::monitor::{Monitor, MonitorConfig};

#[tokio::test]
async fn shortcuts_hit_the_same_endpoints_as_commands() -> Result<()> {
    let mock = MockSimulator::spawn().await?;
    let d = Dispatcher::new(mock.coordinator());
    let form = FormState::default();

    d.dispatch(shortcut('r').expect("reset"), &form).await?;
    d.dispatch(shortcut('m').expect("allocate"), &form).await?;
    d.dispatch(shortcut('g').expect("gc"), &form).await?;

    assert_eq!(mock.hits("POST /api/reset"), 1);
    assert_eq!(mock.hits("POST /api/allocate"), 1);
    assert_eq!(mock.hits("POST /api/garbage-collect"), 1);
    assert_eq!(
        mock.last("POST /api/allocate").map(|r| r.body),
        Some("size=1&algorithm=first".to_string())
    );
    Ok(())
}

#[tokio::test]
async fn shortcuts_share_the_command_gate() -> Result<()> {
    let mock = MockSimulator::spawn().await?;
    let release = Arc::new(Notify::new());
    mock.reply(
        "POST /api/page-replacement",
        Reply::json(json!({"pageFrames": common::frames([1, -1, -1, -1])})).held(release.clone()),
    );
    let d = Dispatcher::new(mock.coordinator());
    let form = FormState::default();

    let pending = {
        let d = d.clone();
        let form = form.clone();
        tokio::spawn(async move { d.dispatch(Trigger::PageReplacement, &form).await })
    };
    mock.wait_for_hits("POST /api/page-replacement", 1).await;

    assert_eq!(
        d.dispatch(shortcut('g').expect("gc"), &form).await?,
        Outcome::Skipped
    );
    assert_eq!(mock.hits("POST /api/garbage-collect"), 0);

    release.notify_one();
    pending.await??;
    Ok(())
}

#[tokio::test]
async fn unparsable_form_values_are_rejected_locally() -> Result<()> {
    let mock = MockSimulator::spawn().await?;
    let d = Dispatcher::new(mock.coordinator());
    let form = FormState {
        memory_size: "lots".into(),
        process_name: "editor".into(),
        process_size: "0".into(),
        ..FormState::default()
    };

    let alloc = d.dispatch(Trigger::Allocate, &form).await.expect_err("size");
    assert!(matches!(alloc, CommandError::InvalidInput(_)));
    let create = d
        .dispatch(Trigger::CreateProcess, &form)
        .await
        .expect_err("process size");
    assert!(matches!(create, CommandError::InvalidInput(_)));
    assert_eq!(mock.total_hits(), 0);
    Ok(())
}

#[tokio::test]
async fn typed_commands_fill_the_form_before_dispatch() -> Result<()> {
    let mock = MockSimulator::spawn().await?;
    let d = Dispatcher::new(mock.coordinator());
    let mut form = FormState::default();

    let trigger = parse_command("swap-in 4", &mut form).map_err(anyhow::Error::msg)?;
    d.dispatch(trigger, &form).await?;
    assert_eq!(
        mock.last("POST /api/swap/in").and_then(|r| r.query),
        Some("processId=4".to_string())
    );

    let trigger = parse_command("deallocate 2", &mut form).map_err(anyhow::Error::msg)?;
    d.dispatch(trigger, &form).await?;
    assert_eq!(
        mock.last("POST /api/deallocate").map(|r| r.body),
        Some("blockId=2".to_string())
    );
    Ok(())
}

#[tokio::test]
async fn refresh_and_reconnect_reload_from_the_simulator() -> Result<()> {
    let mock = MockSimulator::spawn().await?;
    let c = mock.coordinator();
    let d = Dispatcher::new(c.clone());
    let form = FormState::default();

    d.dispatch(Trigger::Refresh, &form).await?;
    assert_eq!(mock.hits("GET /api/memory-stats"), 1);
    assert_eq!(mock.hits("GET /api/memory-blocks"), 0);

    // Without a monitor, reconnect reloads inline.
    d.dispatch(Trigger::Reconnect, &form).await?;
    assert_eq!(mock.hits("GET /api/memory-blocks"), 1);
    with_session(&c, |s| assert_eq!(s.store().memory_blocks().len(), 3));
    Ok(())
}

#[tokio::test]
async fn reconnect_goes_through_the_monitor_when_running() -> Result<()> {
    let mock = MockSimulator::spawn().await?;
    let c = mock.coordinator();
    let never = std::time::Duration::from_secs(3600);
    let monitor = Monitor::spawn(
        c.clone(),
        MonitorConfig {
            stats_period: never,
            probe_period: never,
        },
    );
    let d = Dispatcher::new(c.clone()).with_signals(monitor.signal_sender());

    d.dispatch(Trigger::Reconnect, &FormState::default()).await?;
    mock.wait_for_hits("GET /api/memory-blocks", 1).await;
    assert!(log_contains(&c, "Network connection restored"));
    Ok(())
}
