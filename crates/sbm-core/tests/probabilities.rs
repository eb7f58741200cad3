use sbm_core::{EdgeProbabilities, ModelKind};

#[test]
fn row_major_values_build_full_matrix() {
    let p = EdgeProbabilities::from_row_major(&[0.9, 0.1, 0.1, 0.8], 2).unwrap();
    assert_eq!(p.block_count(), Some(2));
    assert_eq!(p.get(0, 0), 0.9);
    assert_eq!(p.get(0, 1), 0.1);
    assert_eq!(p.get(1, 1), 0.8);
    assert!(!p.is_planted());
}

#[test]
fn out_of_range_entries_are_rejected() {
    for bad in [0.0, 1.0, -0.2, 1.5, f64::NAN] {
        let err = EdgeProbabilities::planted(bad, 0.1).unwrap_err();
        assert_eq!(err.code(), "probability-out-of-range");
    }
    let err = EdgeProbabilities::full(vec![vec![0.5, 1.0], vec![1.0, 0.5]]).unwrap_err();
    assert_eq!(err.code(), "probability-out-of-range");
}

#[test]
fn shape_and_symmetry_are_checked() {
    let err = EdgeProbabilities::from_row_major(&[0.5, 0.5, 0.5], 2).unwrap_err();
    assert_eq!(err.code(), "matrix-shape");

    let err = EdgeProbabilities::full(vec![vec![0.5, 0.2], vec![0.5]]).unwrap_err();
    assert_eq!(err.code(), "matrix-shape");

    let err = EdgeProbabilities::full(vec![vec![0.5, 0.2], vec![0.3, 0.5]]).unwrap_err();
    assert_eq!(err.code(), "asymmetric-matrix");

    let err = EdgeProbabilities::full(Vec::new()).unwrap_err();
    assert_eq!(err.code(), "empty-matrix");
}

#[test]
fn planted_pair_materializes_to_matrix() {
    let p = EdgeProbabilities::planted(0.7, 0.05).unwrap();
    assert_eq!(p.in_out(), (0.7, 0.05));
    assert_eq!(p.block_count(), None);
    let matrix = p.to_matrix(3);
    for (r, row) in matrix.iter().enumerate() {
        for (s, &value) in row.iter().enumerate() {
            assert_eq!(value, if r == s { 0.7 } else { 0.05 });
        }
    }
}

#[test]
fn compatibility_checks_block_count_and_model() {
    let full = EdgeProbabilities::full(vec![vec![0.9, 0.1], vec![0.1, 0.8]]).unwrap();
    assert!(full.check_compatible(ModelKind::Sbm, 2).is_ok());
    assert_eq!(
        full.check_compatible(ModelKind::Sbm, 3).unwrap_err().code(),
        "block-count-mismatch"
    );
    assert_eq!(
        full.check_compatible(ModelKind::Ppm, 2).unwrap_err().code(),
        "ppm-requires-planted"
    );

    let planted_matrix = EdgeProbabilities::full(vec![vec![0.9, 0.1], vec![0.1, 0.9]]).unwrap();
    assert!(planted_matrix.check_compatible(ModelKind::Ppm, 2).is_ok());

    let planted = EdgeProbabilities::planted(0.9, 0.1).unwrap();
    assert!(planted.check_compatible(ModelKind::Ppm, 5).is_ok());
    assert!(planted.check_compatible(ModelKind::Sbm, 5).is_ok());
}

#[test]
fn deserialized_values_are_validated_on_demand() {
    let p: EdgeProbabilities =
        serde_json::from_str(r#"{"type":"planted","p_in":1.2,"p_out":0.1}"#).unwrap();
    assert_eq!(p.validate().unwrap_err().code(), "probability-out-of-range");
}
