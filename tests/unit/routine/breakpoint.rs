use super::*;

fn sample() -> Breakpoints {
    Breakpoints::new(vec![
        Breakpoint {
            name: "intro".to_string(),
            number: 1,
            time_offset: 0.0,
        },
        Breakpoint {
            name: "chorus".to_string(),
            number: 2,
            time_offset: 12.5,
        },
        Breakpoint {
            name: "finale".to_string(),
            number: 3,
            time_offset: 30.0,
        },
    ])
}

#[test]
fn lookup_by_name_and_number() {
    let b = sample();
    assert_eq!(b.by_name("chorus").map(|b| b.number), Some(2));
    assert_eq!(b.by_number(3).map(|b| b.name.as_str()), Some("finale"));
    assert!(b.by_name("bridge").is_none());
    assert!(b.by_number(9).is_none());
}

#[test]
fn next_after_is_strict() {
    let b = sample();
    assert_eq!(b.next_after(0.0).map(|b| b.number), Some(2));
    assert_eq!(b.next_after(12.5).map(|b| b.number), Some(3));
    assert!(b.next_after(30.0).is_none());
}

#[test]
fn preserves_document_order() {
    let b = sample();
    let names: Vec<_> = b.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["intro", "chorus", "finale"]);
    assert_eq!(b.len(), 3);
    assert_eq!((&b).into_iter().count(), 3);
}

#[test]
fn default_is_empty() {
    let b = Breakpoints::default();
    assert!(b.is_empty());
    assert!(b.as_slice().is_empty());
    assert_eq!(serde_json::to_string(&b).unwrap(), "[]");
}
