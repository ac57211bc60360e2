use super::*;
use crate::trajectory::motion::Trajectory;
use serde_json::{Value, json};

fn doc(units: (&str, &str), repeat: u32, chor: Value) -> Value {
    json!({
        "units": { "length": units.0, "angle": units.1 },
        "repeat": repeat,
        "drones": [ { "startPosition": [0, 0, 0] }, { "startPosition": [1, 0, 0] } ],
        "chor": chor,
    })
}

fn line_slot(time: f64, duration: f64, from: [f64; 3], to: [f64; 3]) -> Value {
    json!({
        "time": time,
        "action": [ {
            "type": "line",
            "duration": duration,
            "drones": [ { "id": 0, "startOffset": [0, 0, 0], "endOffset": [0, 0, 0] } ],
            "data": { "startPoint": from, "endPoint": to },
        } ],
    })
}

fn load(d: &Value) -> (LoadedDocument, CompileReport) {
    let mut report = CompileReport::default();
    let loaded = load_document(d, 1.0, &mut report).unwrap();
    (loaded, report)
}

#[test]
fn feet_line_is_converted_once() {
    let d = doc(
        ("feet", "degrees"),
        1,
        json!([line_slot(0.0, 5.0, [0.0, 0.0, 0.0], [10.0, 0.0, 0.0])]),
    );
    let (loaded, report) = load(&d);
    assert!(report.is_clean());
    assert!(loaded.units.length_in_feet);
    assert!(loaded.units.angle_in_degrees);
    assert_eq!(loaded.homes[1], Point::new(0.3048, 0.0, 0.0));

    let actions = &loaded.actions[0];
    assert_eq!(actions.len(), 1);
    let m = actions[0].as_motion().unwrap();
    assert_eq!(m.kind, ActionKind::Line);
    assert_eq!((m.start_time(), m.end_time()), (0.0, 5.0));
    assert!((m.end_point() - Point::new(3.048, 0.0, 0.0)).norm() < 1e-9);
    assert!(loaded.actions[1].is_empty());
}

#[test]
fn circle_radius_and_angles_are_converted() {
    let d = doc(
        ("feet", "degrees"),
        1,
        json!([{
            "time": 0,
            "action": [ {
                "type": "circle",
                "duration": 4,
                "drones": [ { "id": 0, "startOffset": [1, 0, 0], "endOffset": [0, 0, 0] } ],
                "data": { "originPoint": [0, 0, 10], "radius": 10, "theta1": 0, "theta2": 180 },
            } ],
        }]),
    );
    let (loaded, _) = load(&d);
    let m = loaded.actions[0][0].as_motion().unwrap();
    let Trajectory::Circular(c) = &m.trajectory else {
        panic!("expected a circle, got {:?}", m.trajectory);
    };
    assert!((c.radius - 3.048).abs() < 1e-6);
    assert!((c.theta2 - std::f64::consts::PI).abs() < 1e-12);
    assert!((c.origin - Point::new(0.3048, 0.0, 3.048)).norm() < 1e-9);
}

#[test]
fn hover_offsets_form_a_segment() {
    let d = doc(
        ("meters", "radians"),
        1,
        json!([{
            "time": 2,
            "action": [ {
                "type": "hover",
                "duration": 3,
                "drones": [ { "id": 1, "startOffset": [0, 0, 0], "endOffset": [0, 0, 2] } ],
                "data": { "hoverPoint": [1, 1, 1] },
            } ],
        }]),
    );
    let (loaded, _) = load(&d);
    let m = loaded.actions[1][0].as_motion().unwrap();
    assert_eq!(m.kind, ActionKind::Hover);
    assert_eq!(m.start_point(), Point::new(1.0, 1.0, 1.0));
    assert_eq!(m.end_point(), Point::new(1.0, 1.0, 3.0));
    assert_eq!((m.start_time(), m.end_time()), (2.0, 5.0));
}

#[test]
fn repeat_shifts_second_pass_by_pass_length() {
    let d = doc(
        ("meters", "radians"),
        2,
        json!([line_slot(0.0, 5.0, [0.0, 0.0, 0.0], [1.0, 0.0, 0.0])]),
    );
    let (loaded, _) = load(&d);
    let times: Vec<_> = loaded.actions[0]
        .iter()
        .map(|a| (a.start_time(), a.end_time()))
        .collect();
    assert_eq!(times, [(0.0, 5.0), (5.0, 10.0)]);
}

#[test]
fn only_last_slot_advances_the_base() {
    // Slots are relative to the pass start, so the second pass starts at the last slot's end.
    let d = doc(
        ("meters", "radians"),
        2,
        json!([
            line_slot(0.0, 4.0, [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
            line_slot(4.0, 2.0, [1.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
        ]),
    );
    let (loaded, _) = load(&d);
    let starts: Vec<_> = loaded.actions[0].iter().map(Action::start_time).collect();
    assert_eq!(starts, [0.0, 4.0, 6.0, 10.0]);
}

#[test]
fn last_slot_end_is_longest_motion_and_ignores_lights() {
    // Last slot: line of 2s (vehicle 0), hover of 3s (vehicle 1), strobe of 5s (vehicle 0).
    let d = doc(
        ("meters", "radians"),
        3,
        json!([
            line_slot(0.0, 8.0, [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
            { "time": 8, "action": [
                { "type": "line", "duration": 2, "drones": [ { "id": 0 } ],
                  "data": { "startPoint": [1, 0, 0], "endPoint": [0, 0, 0] } },
                { "type": "hover", "duration": 3, "drones": [ { "id": 1 } ],
                  "data": { "hoverPoint": [1, 0, 0] } },
                { "type": "strobe", "duration": 5, "drones": [ { "id": 0 } ],
                  "data": { "startIntensity": 0, "endIntensity": 1, "bps": 2 } },
            ] },
        ]),
    );
    let (loaded, _) = load(&d);
    let starts: Vec<_> = loaded.actions[0].iter().map(Action::start_time).collect();
    assert_eq!(starts, [0.0, 8.0, 11.0, 19.0, 22.0, 30.0]);
    let hovers: Vec<_> = loaded.actions[1].iter().map(Action::start_time).collect();
    assert_eq!(hovers, [8.0, 19.0, 30.0]);
    // The strobe still runs its full length on the light timeline.
    let strobes: Vec<_> = loaded.light_actions[0]
        .iter()
        .map(|l| (l.start_time(), l.end_time()))
        .collect();
    assert_eq!(strobes, [(8.0, 13.0), (19.0, 24.0), (30.0, 35.0)]);
}

#[test]
fn light_only_last_slot_does_not_move_the_base() {
    let d = doc(
        ("meters", "radians"),
        2,
        json!([
            line_slot(0.0, 4.0, [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
            { "time": 4, "action": [
                { "type": "light", "duration": 6, "drones": [ { "id": 0 } ],
                  "data": { "startIntensity": 1, "endIntensity": 0 } },
            ] },
        ]),
    );
    let (loaded, _) = load(&d);
    let starts: Vec<_> = loaded.actions[0].iter().map(Action::start_time).collect();
    assert_eq!(starts, [0.0, 4.0]);
}

#[test]
fn transitions_become_placeholders_and_lights_go_elsewhere() {
    let d = doc(
        ("meters", "radians"),
        1,
        json!([{
            "time": 0,
            "action": [
                { "type": "transition", "duration": 2, "drones": [ { "id": 0 } ] },
                { "type": "strobe", "duration": 6, "drones": [ { "id": 0 }, { "id": 1 } ],
                  "data": { "startIntensity": 0, "endIntensity": 1, "bps": 4 } },
            ],
        }]),
    );
    let (loaded, _) = load(&d);
    assert_eq!(loaded.actions[0].len(), 1);
    assert!(!loaded.actions[0][0].is_resolved());
    assert_eq!(loaded.actions[0][0].end_time(), 2.0);
    assert_eq!(loaded.light_actions[0].len(), 1);
    assert_eq!(loaded.light_actions[1][0].kind(), ActionKind::Strobe);
    assert_eq!(loaded.light_actions[1][0].end_time(), 6.0);
}

#[test]
fn unknown_type_is_reported_once_and_skipped() {
    let d = doc(
        ("meters", "radians"),
        3,
        json!([{
            "time": 0,
            "action": [
                { "type": "spiral", "drones": [ { "id": 0 } ] },
                { "type": "hover", "duration": 1, "drones": [ { "id": 0 } ],
                  "data": { "hoverPoint": [0, 0, 0] } },
            ],
        }]),
    );
    let (loaded, report) = load(&d);
    let starts: Vec<_> = loaded.actions[0].iter().map(Action::start_time).collect();
    assert_eq!(starts, [0.0, 1.0, 2.0]);
    assert_eq!(report.diagnostics().len(), 1);
    assert_eq!(
        report.diagnostics()[0],
        Diagnostic::UnknownActionType {
            slot: 0,
            action: 0,
            type_tag: "spiral".to_string(),
        }
    );
}

#[test]
fn missing_breakpoints_yield_empty_list() {
    let d = doc(("meters", "radians"), 1, json!([]));
    let (loaded, _) = load(&d);
    assert!(loaded.breakpoints.is_empty());
    assert!(loaded.volume.is_none());
}

#[test]
fn breakpoints_and_volume_are_read() {
    let mut d = doc(("feet", "radians"), 1, json!([]));
    d["breakpoints"] = json!([
        { "name": "intro", "number": 1, "startTime": 0 },
        { "name": "drop", "number": 2, "startTime": 12.5 },
    ]);
    d["theater_volume"] = json!({ "min": [-10, -10, 0], "max": [10, 10, 10] });
    let (loaded, _) = load(&d);
    assert_eq!(loaded.breakpoints.by_name("drop").map(|b| b.time_offset), Some(12.5));
    let v = loaded.volume.unwrap();
    assert!((v.max.z - 3.048).abs() < 1e-12);
}

#[test]
fn malformed_documents_are_fatal() {
    let mut report = CompileReport::default();

    let mut d = doc(("meters", "radians"), 1, json!([]));
    d.as_object_mut().unwrap().remove("units");
    let err = load_document(&d, 1.0, &mut report).unwrap_err();
    assert_eq!(err.to_string(), "malformed document at $.units: missing required field");

    let d = doc(("meters", "radians"), 0, json!([]));
    assert!(load_document(&d, 1.0, &mut report).unwrap_err().is_malformed());

    let d = doc(
        ("meters", "radians"),
        1,
        json!([{ "time": 0, "action": [
            { "type": "line", "duration": 1, "drones": [ { "id": 7 } ],
              "data": { "startPoint": [0, 0, 0], "endPoint": [1, 0, 0] } },
        ] }]),
    );
    let err = load_document(&d, 1.0, &mut report).unwrap_err();
    assert!(err.to_string().contains("$.chor[0].action[0].drones[0].id"), "{err}");

    let d = doc(
        ("meters", "radians"),
        1,
        json!([{ "time": 0, "action": [
            { "type": "line", "duration": 1, "drones": [ { "id": 0 } ],
              "data": { "startPoint": [0, 0], "endPoint": [1, 0, 0] } },
        ] }]),
    );
    let err = load_document(&d, 1.0, &mut report).unwrap_err();
    assert!(err.to_string().contains("$.chor[0].action[0].data.startPoint"), "{err}");
}

#[test]
fn inverted_volume_is_reported_once_at_section_path() {
    let mut d = doc(("meters", "radians"), 1, json!([]));
    d["theater_volume"] = json!({ "min": [0, 0, 5], "max": [1, 1, 1] });
    let mut report = CompileReport::default();
    let err = load_document(&d, 1.0, &mut report).unwrap_err();
    assert_eq!(
        err.to_string(),
        "malformed document at $.theater_volume: min exceeds max on axis 2 (5 > 1)"
    );
}

#[test]
fn zero_length_transition_is_rejected() {
    let d = doc(
        ("meters", "radians"),
        1,
        json!([{ "time": 0, "action": [
            { "type": "transition", "duration": 0, "drones": [ { "id": 0 } ] },
        ] }]),
    );
    let mut report = CompileReport::default();
    let err = load_document(&d, 1.0, &mut report).unwrap_err();
    assert!(err.to_string().contains("duration"), "{err}");
}

#[test]
fn scale_multiplies_every_length() {
    let d = doc(
        ("meters", "radians"),
        1,
        json!([line_slot(0.0, 1.0, [1.0, 2.0, 3.0], [2.0, 2.0, 3.0])]),
    );
    let mut report = CompileReport::default();
    let loaded = load_document(&d, 2.0, &mut report).unwrap();
    assert_eq!(loaded.homes[1], Point::new(2.0, 0.0, 0.0));
    assert_eq!(loaded.actions[0][0].start_point(), Some(Point::new(2.0, 4.0, 6.0)));
    assert_eq!(loaded.units.scale, 2.0);
}
