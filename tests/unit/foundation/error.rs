use super::*;

#[test]
fn display_prefixes_are_stable() {
    let e = ChorusError::malformed("$.chor[0].time", "missing required field");
    assert_eq!(
        e.to_string(),
        "malformed document at $.chor[0].time: missing required field"
    );
    assert!(e.is_malformed());

    assert_eq!(
        ChorusError::trajectory("x").to_string(),
        "trajectory error: x"
    );
    assert_eq!(
        ChorusError::rejected("1 error(s)").to_string(),
        "compilation rejected: 1 error(s)"
    );
    assert_eq!(
        ChorusError::serde("bad json").to_string(),
        "serialization error: bad json"
    );
}

#[test]
fn anyhow_errors_convert_transparently() {
    let e: ChorusError = anyhow::anyhow!("disk on fire").into();
    assert_eq!(e.to_string(), "disk on fire");
    assert!(!e.is_malformed());
}
