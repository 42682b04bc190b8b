use super::*;

#[test]
fn default_cadence_is_ten() {
    let p = CapturePolicy::default();
    assert_eq!(p.cadence, 10);
    assert!(p.on_cadence(Iteration(0)));
    assert!(p.on_cadence(Iteration(30)));
    assert!(!p.on_cadence(Iteration(31)));
}

#[test]
fn zero_cadence_is_rejected() {
    assert!(CapturePolicy::every(0).validate().is_err());
    assert!(CapturePolicy::every(1).validate().is_ok());
}

#[test]
fn stop_condition_thresholds() {
    let none = StopCondition::default();
    assert!(!none.should_stop(Iteration(1_000_000), 0.0));

    let s = StopCondition {
        max_iteration: Some(50),
        loss_below: Some(0.1),
    };
    assert!(!s.should_stop(Iteration(49), 0.5));
    assert!(s.should_stop(Iteration(50), 0.5));
    assert!(s.should_stop(Iteration(3), 0.05));
}

#[test]
fn non_finite_loss_threshold_is_rejected() {
    let p = CapturePolicy {
        cadence: 5,
        stop: StopCondition {
            max_iteration: None,
            loss_below: Some(f64::NAN),
        },
    };
    assert!(p.validate().is_err());
}

#[test]
fn policy_deserializes_with_defaults() {
    let p: CapturePolicy = serde_json::from_str("{}").unwrap();
    assert_eq!(p, CapturePolicy::default());
    let p: CapturePolicy =
        serde_json::from_str(r#"{ "cadence": 25, "stop": { "loss_below": 0.5 } }"#).unwrap();
    assert_eq!(p.cadence, 25);
    assert_eq!(p.stop.loss_below, Some(0.5));
}
