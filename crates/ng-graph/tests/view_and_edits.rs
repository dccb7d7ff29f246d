use ng_core::{IntMatrix, NgError};
use ng_graph::diagnostics::{format_edge, format_matrix, format_vertex};
use ng_graph::{
    apply_edit, apply_edit_dry_run, check_seed_matrix, CellDelta, CycleScratch, CycleTracker,
    Edit, EditDryRun, EditLimits, GraphView, StructureConfig,
};

fn sample_matrix() -> IntMatrix {
    IntMatrix::from_rows(&[vec![0, 1, 1], vec![1, 0, 0], vec![0, 1, 0]]).unwrap()
}

fn expect_code(result: Result<impl std::fmt::Debug, NgError>, code: &str) {
    match result {
        Err(NgError::InputRange(info)) => assert_eq!(info.code, code),
        other => panic!("expected {code}, got {other:?}"),
    }
}

#[test]
fn view_lists_match_the_matrix() {
    let matrix = sample_matrix();
    let fixed = IntMatrix::from_rows(&[vec![0, 1, 0], vec![0, 0, 0], vec![0, 0, 0]]).unwrap();
    let view = GraphView::build(&matrix, &fixed, &StructureConfig::loopless());

    assert_eq!(view.edges().len(), 6);
    assert!(view.edge_at(0, 0).is_none());
    assert!(view.edge_at(0, 5).is_none());
    assert!(view.edge_at(3, 0).is_none());

    for vertex in view.vertices() {
        let index = vertex.index();
        assert_eq!(vertex.out_degree() as i64, matrix.row_sums()[index]);
        assert_eq!(vertex.in_degree() as i64, matrix.col_sums()[index]);
        for id in vertex.out_edges() {
            let edge = view.edge(*id);
            assert_eq!(edge.tail(), index);
            assert!(edge.weight(&matrix) > 0);
        }
        for id in vertex.in_edges() {
            assert_eq!(view.edge(*id).head(), index);
        }
        for id in vertex.not_out_edges() {
            let edge = view.edge(*id);
            assert_eq!(edge.weight(&matrix), 0);
            assert!(!edge.is_fixed());
            assert_ne!(edge.tail(), edge.head());
        }
    }

    let pinned = view.edge(view.edge_at(0, 1).unwrap());
    assert!(pinned.is_fixed());
    assert!(!view.free_present_edges().contains(&view.edge_at(0, 1).unwrap()));
    assert_eq!(view.free_present_edges().len(), 3);
}

#[test]
fn edge_weights_alias_matrix_cells() {
    let mut matrix = sample_matrix();
    let fixed = IntMatrix::zeros(3, 3);
    let view = GraphView::build(&matrix, &fixed, &StructureConfig::default());
    let id = view.edge_at(1, 0).unwrap();
    matrix.set(1, 0, 4);
    assert_eq!(view.edge(id).weight(&matrix), 4);
    assert_eq!(view.edge(id).cell(), matrix.cell_index(1, 0));
}

#[test]
fn rectangle_edit_keeps_margins_and_reports_topology() {
    let mut matrix = IntMatrix::from_rows(&[vec![1, 0], vec![0, 1]]).unwrap();
    let fixed = IntMatrix::zeros(2, 2);
    let structure = StructureConfig::default();
    let limits = EditLimits { ceiling: Some(1) };

    let edit = Edit::rectangle(0, 1, 1, 0, 1);
    match apply_edit_dry_run(&matrix, &fixed, &structure, limits, &edit) {
        EditDryRun::Valid { topology_changed } => assert!(topology_changed),
        EditDryRun::Invalid(err) => panic!("unexpected rejection: {err}"),
    }
    let outcome = apply_edit(&mut matrix, &fixed, &structure, limits, &edit).unwrap();
    assert!(outcome.topology_changed);
    assert_eq!(matrix, IntMatrix::from_rows(&[vec![0, 1], vec![1, 0]]).unwrap());
}

#[test]
fn weight_only_edit_keeps_topology() {
    let mut matrix = IntMatrix::from_rows(&[vec![2, 1], vec![1, 2]]).unwrap();
    let fixed = IntMatrix::zeros(2, 2);
    let edit = Edit::rectangle(0, 0, 1, 1, 1);
    let outcome = apply_edit(
        &mut matrix,
        &fixed,
        &StructureConfig::default(),
        EditLimits::default(),
        &edit,
    )
    .unwrap();
    assert!(!outcome.topology_changed);
    assert_eq!(matrix, IntMatrix::from_rows(&[vec![3, 0], vec![0, 3]]).unwrap());
}

#[test]
fn rejected_edits_leave_the_matrix_untouched() {
    let original = IntMatrix::from_rows(&[vec![1, 0], vec![0, 1]]).unwrap();
    let structure = StructureConfig::default();
    let binary = EditLimits { ceiling: Some(1) };
    let free = IntMatrix::zeros(2, 2);

    let mut matrix = original.clone();
    expect_code(
        apply_edit(&mut matrix, &free, &structure, binary, &Edit::rectangle(0, 0, 1, 1, 1)),
        "edit-above-ceiling",
    );
    expect_code(
        apply_edit(&mut matrix, &free, &structure, binary, &Edit::rectangle(0, 1, 1, 0, -1)),
        "edit-negative-cell",
    );
    let pinned = IntMatrix::from_rows(&[vec![1, 0], vec![0, 0]]).unwrap();
    expect_code(
        apply_edit(&mut matrix, &pinned, &structure, binary, &Edit::rectangle(0, 1, 1, 0, 1)),
        "edit-fixed-cell",
    );
    expect_code(
        apply_edit(
            &mut matrix,
            &free,
            &StructureConfig::loopless(),
            binary,
            &Edit::rectangle(0, 1, 1, 0, 1),
        ),
        "edit-ineligible-cell",
    );
    expect_code(
        apply_edit(&mut matrix, &free, &structure, binary, &Edit::rectangle(0, 1, 2, 0, 1)),
        "edit-out-of-bounds",
    );
    let unbalanced = Edit::new(vec![CellDelta {
        row: 0,
        col: 1,
        delta: 1,
    }]);
    expect_code(
        apply_edit(&mut matrix, &free, &structure, binary, &unbalanced),
        "edit-row-margin",
    );
    let twice = Edit::new(vec![
        CellDelta {
            row: 0,
            col: 1,
            delta: 1,
        },
        CellDelta {
            row: 0,
            col: 1,
            delta: -1,
        },
    ]);
    expect_code(
        apply_edit(&mut matrix, &free, &structure, binary, &twice),
        "edit-duplicate-cell",
    );
    assert_eq!(matrix, original);
}

#[test]
fn empty_edit_is_a_noop() {
    let mut matrix = sample_matrix();
    let fixed = IntMatrix::zeros(3, 3);
    let before = GraphView::build(&matrix, &fixed, &StructureConfig::default());
    let edit = Edit::rectangle(0, 1, 1, 0, 0);
    assert!(edit.is_empty());
    let outcome = apply_edit(
        &mut matrix,
        &fixed,
        &StructureConfig::default(),
        EditLimits::default(),
        &edit,
    )
    .unwrap();
    assert!(!outcome.topology_changed);
    assert_eq!(matrix, sample_matrix());
    assert_eq!(GraphView::build(&matrix, &fixed, &StructureConfig::default()), before);
}

#[test]
fn seed_matrix_checks_cover_shape_sign_and_structure() {
    let structure = StructureConfig::default();
    let fixed = IntMatrix::zeros(2, 2);

    let wrong = IntMatrix::zeros(2, 3);
    assert!(matches!(
        check_seed_matrix(&wrong, &fixed, &structure, false),
        Err(NgError::InputShape(_))
    ));

    let negative = IntMatrix::from_rows(&[vec![-1, 0], vec![0, 0]]).unwrap();
    expect_code(
        check_seed_matrix(&negative, &fixed, &structure, false),
        "negative-cell",
    );

    let heavy = IntMatrix::from_rows(&[vec![2, 0], vec![0, 0]]).unwrap();
    assert!(check_seed_matrix(&heavy, &fixed, &structure, false).is_ok());
    expect_code(
        check_seed_matrix(&heavy, &fixed, &structure, true),
        "non-binary-cell",
    );

    let looped = IntMatrix::from_rows(&[vec![0, 1], vec![0, 1]]).unwrap();
    expect_code(
        check_seed_matrix(&looped, &fixed, &StructureConfig::loopless(), false),
        "disallowed-cell",
    );
}

#[test]
fn diagnostics_render_one_based_indices() {
    let matrix = IntMatrix::from_rows(&[vec![1, 0], vec![0, 1]]).unwrap();
    let fixed = IntMatrix::zeros(2, 2);
    let view = GraphView::build(&matrix, &fixed, &StructureConfig::default());

    let rendered = format_matrix(&matrix);
    assert_eq!(rendered.lines().count(), 2);

    let edge = view.edge_at(1, 0).unwrap();
    let text = format_edge(&view, &matrix, edge, None);
    assert!(text.starts_with("Edge: 2->1"));
    assert!(text.contains("Weight: 0"));
    assert!(!text.contains("even:"));

    let mut scratch = CycleScratch::new();
    CycleTracker::new(&view, &matrix).trace_from(0, &mut scratch, None, |_| false);
    let text = format_edge(&view, &matrix, edge, Some(&scratch));
    assert!(text.contains("even: 0 odd: 1"));

    let text = format_vertex(&view, &matrix, 0, Some(&scratch));
    assert!(text.contains("VERTEX 1"));
    assert!(text.contains("Not Out Edges"));
    assert!(text.contains("tail: visits=2"));
    assert!(text.contains("head: visits=1"));
}
