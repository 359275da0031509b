use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use djsportscli::polling::{BackoffState, Poller, PollerConfig, ProbeError};

fn config(base_ms: u64, max_ms: u64) -> PollerConfig {
    PollerConfig::new("test", Duration::from_millis(base_ms))
        .with_max_interval(Duration::from_millis(max_ms))
        .with_backoff_multiplier(1.5)
}

fn probe_error() -> ProbeError {
    "probe failed".into()
}

#[test]
fn test_backoff_starts_at_base_interval() {
    let config = config(3000, 15000);
    let state = BackoffState::new(&config);

    assert_eq!(state.current_interval(), Duration::from_millis(3000));
    assert_eq!(state.consecutive_errors(), 0);
}

#[test]
fn test_first_failure_keeps_base_interval() {
    let config = config(3000, 15000);
    let mut state = BackoffState::new(&config);

    state.record_failure(&config);

    // A single failure is tolerated without slowing down
    assert_eq!(state.consecutive_errors(), 1);
    assert_eq!(state.current_interval(), Duration::from_millis(3000));
}

#[test]
fn test_backoff_grows_geometrically_from_second_failure() {
    let config = config(3000, 15000);
    let mut state = BackoffState::new(&config);

    state.record_failure(&config);
    state.record_failure(&config);
    assert_eq!(state.current_interval(), Duration::from_millis(4500));

    state.record_failure(&config);
    assert_eq!(state.current_interval(), Duration::from_millis(6750));

    state.record_failure(&config);
    assert_eq!(state.current_interval(), Duration::from_millis(10125));
    assert_eq!(state.consecutive_errors(), 4);
}

#[test]
fn test_backoff_is_capped_at_max_interval() {
    let config = config(3000, 15000);
    let mut state = BackoffState::new(&config);

    for _ in 0..20 {
        state.record_failure(&config);
    }

    assert_eq!(state.current_interval(), Duration::from_millis(15000));
}

#[test]
fn test_success_resets_backoff() {
    let config = config(3000, 15000);
    let mut state = BackoffState::new(&config);

    for _ in 0..5 {
        state.record_failure(&config);
    }
    assert!(state.current_interval() > Duration::from_millis(3000));

    state.record_success(&config);

    assert_eq!(state.consecutive_errors(), 0);
    assert_eq!(state.current_interval(), Duration::from_millis(3000));
}

#[test]
fn test_interval_trace_over_mixed_outcomes() {
    let config = config(3000, 15000);
    let mut state = BackoffState::new(&config);

    let outcomes = [true, false, false, false, true];
    let expected_ms = [3000, 3000, 4500, 6750, 3000];

    for (outcome, expected) in outcomes.iter().zip(expected_ms) {
        if *outcome {
            state.record_success(&config);
        } else {
            state.record_failure(&config);
        }
        assert_eq!(state.current_interval(), Duration::from_millis(expected));
    }
}

#[test]
fn test_invalid_multiplier_is_normalized() {
    let config = PollerConfig::new("test", Duration::from_millis(1000)).with_backoff_multiplier(0.5);
    let mut state = BackoffState::new(&config);

    state.record_failure(&config);
    state.record_failure(&config);

    // The interval never shrinks below the base
    assert!(state.current_interval() >= Duration::from_millis(1000));
}

/// Scripted probe: fails for the first `failures` calls, then pends forever
/// so the poller's state stays frozen for inspection.
fn failing_probe(
    failures: usize,
    calls: Arc<AtomicUsize>,
) -> impl FnMut() -> std::pin::Pin<Box<dyn Future<Output = Result<(), ProbeError>> + Send>> + Send {
    move || {
        let call = calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            if call < failures {
                Err(probe_error())
            } else {
                std::future::pending::<()>().await;
                Ok(())
            }
        }) as std::pin::Pin<Box<dyn Future<Output = Result<(), ProbeError>> + Send>>
    }
}

async fn wait_for_calls(calls: &Arc<AtomicUsize>, at_least: usize) {
    while calls.load(Ordering::SeqCst) < at_least {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
}

#[tokio::test(start_paused = true)]
async fn test_poller_backs_off_while_failing() {
    let calls = Arc::new(AtomicUsize::new(0));
    let poller = Poller::spawn(config(3000, 15000), failing_probe(4, Arc::clone(&calls)), None);

    // Wait until the fifth probe is in flight and pending
    wait_for_calls(&calls, 5).await;

    let stats = poller.stats();
    assert_eq!(stats.consecutive_errors, 4);
    assert_eq!(stats.current_interval, Duration::from_millis(10125));

    poller.disable();
}

#[tokio::test(start_paused = true)]
async fn test_poller_success_resets_interval() {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_in_probe = Arc::clone(&calls);

    // ok, fail, fail, fail, ok, then pend forever
    let script = [true, false, false, false, true];
    let probe = move || {
        let call = calls_in_probe.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            match script.get(call) {
                Some(true) => Ok(()),
                Some(false) => Err(probe_error()),
                None => {
                    std::future::pending::<()>().await;
                    Ok(())
                }
            }
        }) as std::pin::Pin<Box<dyn Future<Output = Result<(), ProbeError>> + Send>>
    };

    let poller = Poller::spawn(config(3000, 15000), probe, None);

    wait_for_calls(&calls, 6).await;

    // The trailing success reset the backoff
    let stats = poller.stats();
    assert_eq!(stats.consecutive_errors, 0);
    assert_eq!(stats.current_interval, Duration::from_millis(3000));
    assert!(stats.in_flight);

    poller.disable();
}

#[tokio::test(start_paused = true)]
async fn test_probes_never_overlap() {
    let concurrent = Arc::new(AtomicUsize::new(0));
    let max_seen = Arc::new(AtomicUsize::new(0));
    let calls = Arc::new(AtomicUsize::new(0));

    let probe = {
        let concurrent = Arc::clone(&concurrent);
        let max_seen = Arc::clone(&max_seen);
        let calls = Arc::clone(&calls);
        move || {
            let concurrent = Arc::clone(&concurrent);
            let max_seen = Arc::clone(&max_seen);
            let calls = Arc::clone(&calls);
            Box::pin(async move {
                calls.fetch_add(1, Ordering::SeqCst);
                let now = concurrent.fetch_add(1, Ordering::SeqCst) + 1;
                max_seen.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(50)).await;
                concurrent.fetch_sub(1, Ordering::SeqCst);
                Ok(())
            }) as std::pin::Pin<Box<dyn Future<Output = Result<(), ProbeError>> + Send>>
        }
    };

    let poller = Poller::spawn(config(1000, 15000), probe, None);

    wait_for_calls(&calls, 10).await;
    poller.disable();

    assert_eq!(max_seen.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_disable_stops_future_probes() {
    let calls = Arc::new(AtomicUsize::new(0));
    let poller = Poller::spawn(config(1000, 15000), failing_probe(0, Arc::clone(&calls)), None);

    wait_for_calls(&calls, 1).await;
    poller.disable();
    assert!(!poller.is_active());

    let seen = calls.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(calls.load(Ordering::SeqCst), seen);
}

#[tokio::test(start_paused = true)]
async fn test_disable_discards_in_flight_probe_result() {
    let started = Arc::new(tokio::sync::Notify::new());
    let release = Arc::new(tokio::sync::Notify::new());
    let calls = Arc::new(AtomicUsize::new(0));
    let errors = Arc::new(AtomicUsize::new(0));

    // Probe that announces itself, blocks until released, then fails
    let probe = {
        let started = Arc::clone(&started);
        let release = Arc::clone(&release);
        let calls = Arc::clone(&calls);
        move || {
            let started = Arc::clone(&started);
            let release = Arc::clone(&release);
            let calls = Arc::clone(&calls);
            Box::pin(async move {
                calls.fetch_add(1, Ordering::SeqCst);
                started.notify_one();
                release.notified().await;
                Err(probe_error())
            }) as std::pin::Pin<Box<dyn Future<Output = Result<(), ProbeError>> + Send>>
        }
    };

    let errors_in_cb = Arc::clone(&errors);
    let on_error: Box<dyn FnMut(ProbeError) + Send> = Box::new(move |_| {
        errors_in_cb.fetch_add(1, Ordering::SeqCst);
    });

    let poller = Poller::spawn(config(3000, 15000), probe, Some(on_error));

    started.notified().await;
    assert!(poller.stats().in_flight);

    // Disable while the probe is mid-flight, then let it complete
    poller.disable();
    release.notify_waiters();
    tokio::time::sleep(Duration::from_secs(30)).await;

    // The failure result was discarded: no backoff, no error callback
    let stats = poller.stats();
    assert!(!stats.in_flight);
    assert_eq!(stats.consecutive_errors, 0);
    assert_eq!(stats.current_interval, Duration::from_millis(3000));
    assert_eq!(errors.load(Ordering::SeqCst), 0);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_errors_reach_the_callback() {
    let calls = Arc::new(AtomicUsize::new(0));
    let errors = Arc::new(AtomicUsize::new(0));
    let errors_in_cb = Arc::clone(&errors);

    let on_error: Box<dyn FnMut(ProbeError) + Send> = Box::new(move |_| {
        errors_in_cb.fetch_add(1, Ordering::SeqCst);
    });

    let poller = Poller::spawn(
        config(1000, 15000),
        failing_probe(3, Arc::clone(&calls)),
        Some(on_error),
    );

    wait_for_calls(&calls, 4).await;
    poller.disable();

    assert_eq!(errors.load(Ordering::SeqCst), 3);
}
