use super::*;

#[test]
fn reference_settings_per_dimensionality() {
    let two = ReducerParams::default();
    assert_eq!(two.dim, Dim::Two);
    assert_eq!(two.perplexity, 300.0);
    assert_eq!(two.learning_rate, 300.0);
    assert_eq!(two.max_iterations, 300);
    assert_eq!(two.pca_components, Some(50));

    let three = ReducerParams::for_dim(Dim::Three);
    assert_eq!(three.perplexity, 500.0);
    assert_eq!(three.learning_rate, 500.0);
    assert_eq!(three.max_iterations, 300);
    assert_eq!(three.pca_components, Some(100));
}

#[test]
fn non_finite_hyperparameters_are_rejected() {
    let mut p = ReducerParams::default();
    p.perplexity = f64::NAN;
    assert!(p.validate().is_err());
    let mut p = ReducerParams::default();
    p.learning_rate = -1.0;
    assert!(p.validate().is_err());
    let mut p = ReducerParams::default();
    p.pca_components = Some(0);
    assert!(p.validate().is_err());
    assert!(ReducerParams::default().validate().is_ok());
}

#[test]
fn missing_fields_take_defaults() {
    let p: ReducerParams = serde_json::from_str(r#"{"perplexity": 30.0}"#).unwrap();
    assert_eq!(p.perplexity, 30.0);
    assert_eq!(p.learning_rate, 300.0);
    assert_eq!(p.dim, Dim::Two);
}

#[test]
fn missing_fields_follow_the_requested_dimensionality() {
    let p: ReducerParams = serde_json::from_str(r#"{"dim": 3}"#).unwrap();
    assert_eq!(p, ReducerParams::for_dim(Dim::Three));

    let p: ReducerParams = serde_json::from_str(r#"{"dim": 3, "max_iterations": 50}"#).unwrap();
    assert_eq!(p.max_iterations, 50);
    assert_eq!(p.perplexity, 500.0);
    assert_eq!(p.pca_components, Some(100));
}

#[test]
fn explicit_null_disables_preprocessing() {
    let p: ReducerParams = serde_json::from_str(r#"{"dim": 3, "pca_components": null}"#).unwrap();
    assert_eq!(p.pca_components, None);
    let p: ReducerParams = serde_json::from_str(r#"{"pca_components": 20}"#).unwrap();
    assert_eq!(p.pca_components, Some(20));
}

#[test]
fn serialized_params_read_back_unchanged() {
    let mut p = ReducerParams::for_dim(Dim::Three);
    p.pca_components = None;
    let json = serde_json::to_string(&p).unwrap();
    assert_eq!(serde_json::from_str::<ReducerParams>(&json).unwrap(), p);
}
