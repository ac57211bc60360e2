use super::*;

#[test]
fn defaults_are_valid() {
    let o = CompileOptions::default();
    o.validate().unwrap();
    assert_eq!(o.scale, 1.0);
    assert_eq!(o.time_tolerance, DEFAULT_TIME_TOLERANCE);
    assert!(!o.parallel);
}

#[test]
fn with_scale_keeps_other_defaults() {
    let o = CompileOptions::with_scale(2.5);
    assert_eq!(o.scale, 2.5);
    assert_eq!(o.bounds_samples, DEFAULT_BOUNDS_SAMPLES);
}

#[test]
fn invalid_values_name_the_option() {
    let err = CompileOptions::with_scale(0.0).validate().unwrap_err();
    assert!(err.to_string().contains("$options.scale"), "{err}");

    let o = CompileOptions {
        space_tolerance: f64::NAN,
        ..CompileOptions::default()
    };
    assert!(o.validate().unwrap_err().to_string().contains("space_tolerance"));

    let o = CompileOptions {
        threads: Some(0),
        ..CompileOptions::default()
    };
    assert!(o.validate().is_err());

    let o = CompileOptions {
        bounds_samples: 0,
        ..CompileOptions::default()
    };
    assert!(o.validate().is_err());
}

#[test]
fn partial_json_fills_defaults() {
    let o: CompileOptions = serde_json::from_str(r#"{ "parallel": true, "threads": 2 }"#).unwrap();
    assert!(o.parallel);
    assert_eq!(o.threads, Some(2));
    assert_eq!(o.scale, 1.0);
}

#[test]
fn thread_pool_honours_thread_count() {
    let pool = build_thread_pool(Some(2)).unwrap();
    assert_eq!(pool.current_num_threads(), 2);
}
