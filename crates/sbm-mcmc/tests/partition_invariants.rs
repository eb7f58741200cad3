use proptest::prelude::*;
use sbm_core::RngHandle;
use sbm_graph::Graph;
use sbm_mcmc::BlockModel;

const VERTICES: usize = 12;

fn check_invariants(model: &BlockModel<'_>) {
    let graph = model.graph();
    assert_eq!(model.block_sizes().iter().sum::<usize>(), model.vertex_count());
    for v in 0..model.vertex_count() {
        assert_eq!(model.block_degree(v).iter().sum::<usize>(), graph.degree(v));
    }
    let mut fresh = model.clone();
    fresh.recompute_block_degrees();
    for v in 0..model.vertex_count() {
        assert_eq!(model.block_degree(v), fresh.block_degree(v));
    }

    let counts = model.edge_count_matrix();
    let mut total = 0;
    for r in 0..model.block_count() {
        total += counts[r][r];
        for s in 0..model.block_count() {
            assert_eq!(counts[r][s], counts[s][r]);
            total += counts[r][s];
        }
    }
    assert_eq!(total, 2 * graph.edge_count());
}

fn partition_strategy() -> impl Strategy<Value = (usize, Vec<usize>)> {
    (1usize..5).prop_flat_map(|blocks| {
        (
            Just(blocks),
            proptest::collection::vec(0..blocks, VERTICES),
        )
    })
}

#[test]
fn edge_counts_on_a_path() {
    let graph = Graph::from_edges(4, [(0, 1), (1, 2), (2, 3)]).unwrap();
    let model = BlockModel::new(&graph, vec![0, 0, 1, 1], 2).unwrap();
    let counts = model.edge_count_matrix();
    assert_eq!(counts, vec![vec![1, 1], vec![1, 1]]);
    let sum: usize = counts.iter().flatten().sum();
    let trace: usize = (0..2).map(|r| counts[r][r]).sum();
    assert_eq!(sum, 4);
    assert_ne!(sum, 2 * graph.edge_count());
    assert_eq!(sum + trace, 2 * graph.edge_count());
    assert_eq!(model.block_degree(1), &[1, 1]);
    assert_eq!(model.block_degree(2), &[1, 1]);
}

#[test]
fn shuffle_keeps_block_sizes() {
    let graph = Graph::from_edges(6, [(0, 1), (1, 2), (3, 4), (4, 5), (2, 3)]).unwrap();
    let mut model = BlockModel::from_block_sizes(&graph, &[1, 2, 3]).unwrap();
    let mut rng = RngHandle::from_seed(5);
    model.shuffle(&mut rng);
    assert_eq!(model.block_sizes(), &[1, 2, 3]);
    check_invariants(&model);
}

proptest! {
    #[test]
    fn aggregates_track_random_move_sequences(
        edges in proptest::collection::vec((0usize..VERTICES, 0usize..VERTICES), 0..40),
        (blocks, membership) in partition_strategy(),
        seed in any::<u64>(),
    ) {
        let simple: Vec<_> = edges.into_iter().filter(|(u, v)| u != v).collect();
        let graph = Graph::from_edges(VERTICES, simple).unwrap();
        let mut model = BlockModel::new(&graph, membership, blocks).unwrap();
        check_invariants(&model);

        let mut rng = RngHandle::from_seed(seed);
        for round in 0..30 {
            let moves = if round % 2 == 0 {
                model.propose_single_vertex(&mut rng)
            } else {
                model.propose_swap(&mut rng)
            };
            model.apply_moves(&moves);
        }
        check_invariants(&model);
    }

    #[test]
    fn connectivity_is_symmetric(
        edges in proptest::collection::vec((0usize..VERTICES, 0usize..VERTICES), 0..40),
    ) {
        let simple: Vec<_> = edges.into_iter().filter(|(u, v)| u != v).collect();
        let graph = Graph::from_edges(VERTICES, simple).unwrap();
        let model = BlockModel::new(&graph, vec![0; VERTICES], 1).unwrap();
        for u in 0..VERTICES {
            for v in 0..VERTICES {
                prop_assert_eq!(model.connected(u, v), model.connected(v, u));
            }
        }
    }
}
