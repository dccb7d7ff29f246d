use ng_core::{NgError, RngHandle};
use ng_graph::{construct_graph, gen_feasible_instance, StructureConfig};
use proptest::prelude::*;

proptest! {
    #[test]
    fn generated_instances_are_reconstructed(
        seed in any::<u64>(),
        rows in 1usize..8,
        cols in 1usize..8,
        density in 0.0f64..1.0,
        fixed_fraction in 0.0f64..0.6,
        loops in any::<bool>(),
    ) {
        let structure = StructureConfig { allow_self_loops: loops };
        let mut rng = RngHandle::from_seed(seed);
        let instance =
            gen_feasible_instance(rows, cols, density, fixed_fraction, &structure, &mut rng)
                .unwrap();
        let matrix = construct_graph(
            &instance.out_degree,
            &instance.in_degree,
            &instance.fixed,
            &structure,
        )
        .unwrap();

        prop_assert_eq!(matrix.row_sums(), instance.out_degree.clone());
        prop_assert_eq!(matrix.col_sums(), instance.in_degree.clone());
        prop_assert!(matrix.is_binary());
        for row in 0..rows {
            for col in 0..cols {
                if instance.fixed.get(row, col) == 1 {
                    prop_assert_eq!(matrix.get(row, col), 1);
                }
                if !structure.is_eligible((rows, cols), row, col) {
                    prop_assert_eq!(matrix.get(row, col), 0);
                }
            }
        }
    }

    #[test]
    fn unequal_totals_never_yield_a_matrix(
        seed in any::<u64>(),
        rows in 1usize..6,
        cols in 1usize..6,
        bump in 1i64..4,
    ) {
        let structure = StructureConfig::default();
        let mut rng = RngHandle::from_seed(seed);
        let instance = gen_feasible_instance(rows, cols, 0.5, 0.0, &structure, &mut rng).unwrap();
        let mut out_degree = instance.out_degree.clone();
        out_degree[0] += bump;
        let err = construct_graph(&out_degree, &instance.in_degree, &instance.fixed, &structure)
            .unwrap_err();
        prop_assert!(matches!(err, NgError::Infeasible(_)));
    }
}
