use csim_core::{BlockState, Lcg64, SimConfig, SimSession, Strategy};

#[test]
fn quick_simulation_crashes_and_recovers_a_default_disk() {
    let mut session =
        SimSession::with_entropy(SimConfig::default(), Box::new(Lcg64::from_seed(0xDECAF)));
    let report = session
        .quick_simulation()
        .expect("quick simulation should produce a report");

    assert_eq!(session.disk().len(), 64);
    assert_eq!(session.disk().count(BlockState::Corrupted), 0);
    assert_eq!(
        session.disk().count(BlockState::Recovered),
        report.recovered_blocks
    );
    assert!(report.recovered_blocks + report.lost_blocks >= 1);
    assert!(report.metrics.fragmentation_percent <= 100);
    assert!(report.metrics.read_ms >= 4.0);
    assert!(report.metrics.write_ms >= 5.0);
    assert_eq!(session.last_report(), Some(&report));
}

#[test]
fn quick_simulation_applies_the_session_strategy() {
    let mut session = SimSession::with_entropy(
        SimConfig {
            strategy: Strategy::Best,
            ..SimConfig::default()
        },
        Box::new(Lcg64::from_seed(0xBEEF)),
    );
    let report = session.quick_simulation().expect("quick run succeeds");
    assert_eq!(report.strategy, Strategy::Best);

    // Best-sorted layout: tiers never decrease left to right.
    let tiers: Vec<u8> = session.disk().states().iter().map(|s| s.tier()).collect();
    assert!(tiers.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn identical_seeds_replay_identical_runs() {
    let mut first =
        SimSession::with_entropy(SimConfig::default(), Box::new(Lcg64::from_seed(1234)));
    let mut second =
        SimSession::with_entropy(SimConfig::default(), Box::new(Lcg64::from_seed(1234)));

    let report_a = first.quick_simulation().expect("first run");
    let report_b = second.quick_simulation().expect("second run");

    assert_eq!(first.disk().states(), second.disk().states());
    assert_eq!(report_a.recovered_blocks, report_b.recovered_blocks);
    assert_eq!(report_a.lost_blocks, report_b.lost_blocks);
    assert_eq!(report_a.metrics, report_b.metrics);
}

#[test]
fn event_log_tells_the_whole_story_in_order() {
    let mut session =
        SimSession::with_entropy(SimConfig::default(), Box::new(Lcg64::from_seed(99)));
    session.quick_simulation().expect("quick run succeeds");

    let messages: Vec<&str> = session
        .event_log()
        .iter()
        .map(|entry| entry.message.as_str())
        .collect();
    let quick = messages
        .iter()
        .position(|m| m.starts_with("quick simulation"))
        .expect("quick marker logged");
    let crash = messages
        .iter()
        .position(|m| m.starts_with("crash simulated"))
        .expect("crash logged");
    let recovery = messages
        .iter()
        .position(|m| m.starts_with("recovery finished"))
        .expect("recovery logged");
    assert!(quick < crash && crash < recovery);
}
