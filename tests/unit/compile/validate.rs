use super::*;
use crate::routine::action::{ActionKind, EmptyAction, LightAction, MotionAction};
use crate::trajectory::light::{IntensityRamp, LightTrajectory};
use crate::trajectory::motion::LinearTrajectory;

fn line(from: Point, to: Point, t0: f64, t1: f64) -> Action {
    MotionAction::new(
        VehicleId(0),
        ActionKind::Line,
        LinearTrajectory::new(from, t0, to, t1).unwrap(),
    )
    .into()
}

#[test]
fn contiguous_timeline_is_clean() {
    let a = Point::new(2.0, 0.0, 0.0);
    let actions = [
        line(Point::zeros(), a, 0.0, 2.0),
        line(a + Point::new(0.05, 0.0, 0.0), Point::zeros(), 2.05, 4.0),
    ];
    let v = ContinuityValidator::default().validate_vehicle(VehicleId(0), &Point::zeros(), &actions);
    assert!(v.is_empty(), "{v:?}");
}

#[test]
fn first_action_is_checked_against_home_and_zero() {
    let actions = [line(Point::new(5.0, 0.0, 0.0), Point::zeros(), 1.0, 2.0)];
    let v = ContinuityValidator::default().validate_vehicle(VehicleId(0), &Point::zeros(), &actions);
    assert_eq!(v.len(), 2);
    assert!(v[0].is_temporal());
    assert!(v[1].is_spatial());
    assert_eq!(
        v[0].kind,
        ViolationKind::Temporal {
            expected: 0.0,
            actual: 1.0
        }
    );
}

#[test]
fn all_violations_are_accumulated_without_cascading() {
    let actions = [
        line(Point::zeros(), Point::new(1.0, 0.0, 0.0), 0.0, 1.0),
        // Jumps in space and time.
        line(Point::new(9.0, 0.0, 0.0), Point::new(9.0, 1.0, 0.0), 3.0, 4.0),
        // Joins its own predecessor, so nothing new to report.
        line(Point::new(9.0, 1.0, 0.0), Point::zeros(), 4.0, 5.0),
        // Late start only.
        line(Point::zeros(), Point::zeros(), 6.0, 7.0),
    ];
    let v = ContinuityValidator::default().validate_vehicle(VehicleId(0), &Point::zeros(), &actions);
    let times: Vec<_> = v.iter().map(|v| (v.time, v.is_temporal())).collect();
    assert_eq!(times, [(3.0, true), (3.0, false), (6.0, true)]);
}

#[test]
fn light_actions_are_ignored_and_placeholders_checked_in_time_only() {
    let actions = [
        Action::Light(LightAction {
            vehicle: VehicleId(0),
            trajectory: LightTrajectory::Light(IntensityRamp::new(0.0, 7.0, 1.0, 9.0).unwrap()),
        }),
        Action::Empty(EmptyAction {
            vehicle: VehicleId(0),
            start_time: 0.0,
            end_time: 2.0,
        }),
        line(Point::new(3.0, 0.0, 0.0), Point::zeros(), 2.0, 3.0),
    ];
    let v = ContinuityValidator::default().validate_vehicle(VehicleId(0), &Point::zeros(), &actions);
    // The placeholder has no position, so the next motion is compared to home.
    assert_eq!(v.len(), 1);
    assert!(v[0].is_spatial());
}

#[test]
fn tolerances_come_from_options() {
    let opts = CompileOptions {
        time_tolerance: 1.0,
        space_tolerance: 0.5,
        ..CompileOptions::default()
    };
    let validator = ContinuityValidator::from_options(&opts);
    let actions = [line(Point::new(0.4, 0.0, 0.0), Point::zeros(), 0.9, 2.0)];
    assert!(validator
        .validate_vehicle(VehicleId(0), &Point::zeros(), &actions)
        .is_empty());
}

#[test]
fn validate_routine_reports_vehicles_in_order() {
    use crate::compile::compiler::Compiler;
    use serde_json::json;

    // Vehicle 1 jumps at t=2, vehicle 0 starts late at t=1.
    let doc = json!({
        "units": { "length": "meters", "angle": "radians" },
        "repeat": 1,
        "drones": [ { "startPosition": [0, 0, 0] }, { "startPosition": [5, 0, 0] } ],
        "chor": [
            { "time": 0, "action": [
                { "type": "hover", "duration": 2, "drones": [ { "id": 1 } ],
                  "data": { "hoverPoint": [5, 0, 0] } },
            ] },
            { "time": 1, "action": [
                { "type": "hover", "duration": 1, "drones": [ { "id": 0 } ],
                  "data": { "hoverPoint": [0, 0, 0] } },
            ] },
            { "time": 2, "action": [
                { "type": "hover", "duration": 1, "drones": [ { "id": 1 } ],
                  "data": { "hoverPoint": [9, 0, 0] } },
            ] },
        ],
    });
    let compiled = Compiler::compile(&doc, &CompileOptions::default()).unwrap();

    let v = ContinuityValidator::default().validate(&compiled.routine);
    let got: Vec<_> = v.iter().map(|v| (v.vehicle, v.time, v.is_temporal())).collect();
    assert_eq!(got, [(VehicleId(0), 1.0, true), (VehicleId(1), 2.0, false)]);

    let reported: Vec<_> = compiled.report.violations().cloned().collect();
    assert_eq!(v, reported);

    let loose = ContinuityValidator {
        time_tolerance: 2.0,
        space_tolerance: 5.0,
    };
    assert!(loose.validate(&compiled.routine).is_empty());
}
