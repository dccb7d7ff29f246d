use ng_core::{IntMatrix, NgError};
use ng_graph::{construct_graph, StructureConfig};

fn zeros(rows: usize, cols: usize) -> IntMatrix {
    IntMatrix::zeros(rows, cols)
}

fn assert_margins(matrix: &IntMatrix, out_degree: &[i64], in_degree: &[i64]) {
    assert_eq!(matrix.row_sums(), out_degree);
    assert_eq!(matrix.col_sums(), in_degree);
}

#[test]
fn two_by_two_unit_degrees_give_a_permutation() {
    let matrix = construct_graph(&[1, 1], &[1, 1], &zeros(2, 2), &StructureConfig::default())
        .unwrap();
    assert_margins(&matrix, &[1, 1], &[1, 1]);
    assert!(matrix.is_binary());
}

#[test]
fn concentrated_out_degree_has_a_unique_completion() {
    let expected = IntMatrix::from_rows(&[vec![1, 1], vec![0, 0]]).unwrap();
    let free = construct_graph(&[2, 0], &[1, 1], &zeros(2, 2), &StructureConfig::default())
        .unwrap();
    assert_eq!(free, expected);

    let pinned = IntMatrix::from_rows(&[vec![1, 0], vec![0, 0]]).unwrap();
    let with_fixed =
        construct_graph(&[2, 0], &[1, 1], &pinned, &StructureConfig::default()).unwrap();
    assert_eq!(with_fixed, expected);
}

#[test]
fn mismatched_totals_are_infeasible() {
    let err = construct_graph(&[1], &[2], &zeros(1, 1), &StructureConfig::default()).unwrap_err();
    match err {
        NgError::Infeasible(info) => {
            assert_eq!(info.code, "degree-sum-mismatch");
            assert_eq!(info.context.get("out_total"), Some(&"1".to_string()));
            assert_eq!(info.context.get("in_total"), Some(&"2".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn saturated_cell_capacity_reports_unmet_demand() {
    let err =
        construct_graph(&[2, 0], &[2, 0], &zeros(2, 2), &StructureConfig::default()).unwrap_err();
    match err {
        NgError::Infeasible(info) => {
            assert_eq!(info.code, "unsatisfied-demand");
            assert_eq!(info.context.get("demand"), Some(&"2".to_string()));
            assert_eq!(info.context.get("flow"), Some(&"1".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn fixed_cells_beyond_degree_are_infeasible() {
    let fixed = IntMatrix::from_rows(&[vec![1, 1], vec![0, 0]]).unwrap();
    let err = construct_graph(&[1, 1], &[1, 1], &fixed, &StructureConfig::default()).unwrap_err();
    match err {
        NgError::Infeasible(info) => {
            assert_eq!(info.code, "fixed-exceeds-degree");
            assert_eq!(info.context.get("row"), Some(&"0".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn fixed_cells_are_honoured() {
    let fixed = IntMatrix::from_rows(&[vec![0, 1, 0], vec![0, 0, 0], vec![1, 0, 0]]).unwrap();
    let out_degree = [2, 1, 1];
    let in_degree = [1, 2, 1];
    let matrix =
        construct_graph(&out_degree, &in_degree, &fixed, &StructureConfig::default()).unwrap();
    assert_margins(&matrix, &out_degree, &in_degree);
    assert_eq!(matrix.get(0, 1), 1);
    assert_eq!(matrix.get(2, 0), 1);
}

#[test]
fn loopless_structure_avoids_the_diagonal() {
    let matrix =
        construct_graph(&[1, 1], &[1, 1], &zeros(2, 2), &StructureConfig::loopless()).unwrap();
    assert_eq!(
        matrix,
        IntMatrix::from_rows(&[vec![0, 1], vec![1, 0]]).unwrap()
    );
}

#[test]
fn rectangular_inputs_are_supported() {
    let out_degree = [2, 1];
    let in_degree = [1, 1, 1];
    let matrix =
        construct_graph(&out_degree, &in_degree, &zeros(2, 3), &StructureConfig::loopless())
            .unwrap();
    assert_margins(&matrix, &out_degree, &in_degree);
}

#[test]
fn shape_mismatch_is_a_shape_error() {
    let err = construct_graph(&[1, 1], &[2], &zeros(2, 2), &StructureConfig::default())
        .unwrap_err();
    match err {
        NgError::InputShape(info) => assert_eq!(info.code, "degree-shape"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn negative_degrees_are_range_errors() {
    let err = construct_graph(&[1, -1], &[0, 0], &zeros(2, 2), &StructureConfig::default())
        .unwrap_err();
    match err {
        NgError::InputRange(info) => {
            assert_eq!(info.code, "negative-degree");
            assert_eq!(info.context.get("vector"), Some(&"out_degree".to_string()));
            assert_eq!(info.context.get("index"), Some(&"1".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn non_binary_fixed_entries_are_range_errors() {
    let fixed = IntMatrix::from_rows(&[vec![2, 0], vec![0, 0]]).unwrap();
    let err = construct_graph(&[1, 1], &[1, 1], &fixed, &StructureConfig::default()).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.info().code, "non-binary-fixed");
}

#[test]
fn fixed_diagonal_conflicts_with_loopless_structure() {
    let fixed = IntMatrix::from_rows(&[vec![1, 0], vec![0, 0]]).unwrap();
    let err = construct_graph(&[1, 1], &[1, 1], &fixed, &StructureConfig::loopless()).unwrap_err();
    match err {
        NgError::InputRange(info) => {
            assert_eq!(info.code, "fixed-disallowed-cell");
            assert!(info.hint.is_some());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn validation_precedes_feasibility() {
    // Totals differ, but the shape error must win.
    let err = construct_graph(&[5], &[1, 1], &zeros(2, 2), &StructureConfig::default())
        .unwrap_err();
    assert!(matches!(err, NgError::InputShape(_)));
}

#[test]
fn degree_totals_beyond_i64_are_infeasible() {
    let err = construct_graph(
        &[i64::MAX, 1],
        &[i64::MAX, 1],
        &zeros(2, 2),
        &StructureConfig::default(),
    )
    .unwrap_err();
    match err {
        NgError::Infeasible(info) => {
            assert_eq!(info.code, "degree-overflow");
            assert_eq!(info.context.get("vector"), Some(&"out_degree".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn degrees_above_eligible_cell_count_are_infeasible() {
    let err = construct_graph(&[3, 0], &[2, 1], &zeros(2, 2), &StructureConfig::default())
        .unwrap_err();
    match err {
        NgError::Infeasible(info) => {
            assert_eq!(info.code, "degree-exceeds-capacity");
            assert_eq!(info.context.get("row"), Some(&"0".to_string()));
            assert_eq!(info.context.get("cells"), Some(&"2".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let err = construct_graph(&[1, 1], &[2, 0], &zeros(2, 2), &StructureConfig::loopless())
        .unwrap_err();
    match err {
        NgError::Infeasible(info) => {
            assert_eq!(info.code, "degree-exceeds-capacity");
            assert_eq!(info.context.get("col"), Some(&"0".to_string()));
            assert_eq!(info.context.get("cells"), Some(&"1".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
