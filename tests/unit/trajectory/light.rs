use super::*;

#[test]
fn ramp_interpolates_and_clamps() {
    let r = IntensityRamp::new(0.0, 2.0, 1.0, 6.0).unwrap();
    assert_eq!(r.intensity(2.0), 0.0);
    assert_eq!(r.intensity(4.0), 0.5);
    assert_eq!(r.intensity(6.0), 1.0);
    assert_eq!(r.intensity(0.0), 0.0);
    assert_eq!(r.intensity(9.0), 1.0);
}

#[test]
fn ramp_rejects_reversed_span() {
    assert!(IntensityRamp::new(0.0, 3.0, 1.0, 2.0).is_err());
}

#[test]
fn strobe_is_on_for_first_half_of_each_period() {
    let s = StrobeTrajectory {
        ramp: IntensityRamp::new(1.0, 0.0, 1.0, 4.0).unwrap(),
        bps: 2.0,
    };
    assert!(s.is_on(0.0));
    assert!(s.is_on(0.2));
    assert!(!s.is_on(0.3));
    assert!(s.is_on(0.55));
    assert_eq!(s.intensity(0.3), 0.0);
    assert_eq!(s.intensity(0.1), 1.0);
}

#[test]
fn strobe_without_rate_is_always_on() {
    let s = StrobeTrajectory {
        ramp: IntensityRamp::new(0.0, 0.0, 1.0, 1.0).unwrap(),
        bps: 0.0,
    };
    assert!(s.is_on(0.75));
    assert_eq!(s.intensity(0.5), 0.5);
}

#[test]
fn light_trajectory_reports_domain() {
    let l = LightTrajectory::Strobe(StrobeTrajectory {
        ramp: IntensityRamp::new(0.0, 1.0, 1.0, 3.0).unwrap(),
        bps: 1.0,
    });
    assert_eq!(l.start_time(), 1.0);
    assert_eq!(l.end_time(), 3.0);
    assert_eq!(serde_json::to_value(&l).unwrap()["kind"], "strobe");
}
