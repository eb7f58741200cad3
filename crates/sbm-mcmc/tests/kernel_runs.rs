use sbm_core::{EdgeProbabilities, ModelKind, ProposalKind, RngHandle};
use sbm_graph::{canonical_hash, gen_planted_partition, Graph};
use sbm_mcmc::{
    membership_hash, run, BlockModel, CoolingSchedule, RunConfig, RunManifest, RunMode,
};
use tempfile::tempdir;

fn sample_graph() -> Graph {
    let mut rng = RngHandle::from_seed(8);
    gen_planted_partition(&[8, 8, 8], 0.7, 0.05, &mut rng).unwrap()
}

fn marginalize_config() -> RunConfig {
    let mut config = RunConfig::default();
    config.mode = RunMode::Marginalize {
        burn_in: 100,
        sample_every: 4,
        samples: 50,
    };
    config.randomize = true;
    config.record_trajectory = true;
    config
}

#[test]
fn repeated_runs_with_same_seed_match() {
    let graph = sample_graph();
    let p = EdgeProbabilities::planted(0.7, 0.05).unwrap();
    let config = marginalize_config();

    let first = run(
        &config,
        BlockModel::from_block_sizes(&graph, &[8, 8, 8]).unwrap(),
        &p,
    )
    .unwrap();
    let second = run(
        &config,
        BlockModel::from_block_sizes(&graph, &[8, 8, 8]).unwrap(),
        &p,
    )
    .unwrap();
    assert_eq!(first, second);

    let marginals = first.marginals.as_ref().unwrap();
    assert_eq!(first.membership, marginals.argmax());
    assert_eq!(first.trajectory.len(), 50);
    assert_eq!(first.block_sizes, vec![8, 8, 8]);
    assert_eq!(first.acceptance_rate, marginals.acceptance_rate);
}

#[test]
fn different_seeds_diverge() {
    let graph = sample_graph();
    let p = EdgeProbabilities::planted(0.7, 0.05).unwrap();
    let mut config = marginalize_config();
    let first = run(
        &config,
        BlockModel::from_block_sizes(&graph, &[8, 8, 8]).unwrap(),
        &p,
    )
    .unwrap();
    config.seed_policy.master_seed += 1;
    let second = run(
        &config,
        BlockModel::from_block_sizes(&graph, &[8, 8, 8]).unwrap(),
        &p,
    )
    .unwrap();
    assert_ne!(first.trajectory, second.trajectory);
}

#[test]
fn maximize_reports_final_state() {
    let graph = sample_graph();
    let p = EdgeProbabilities::from_row_major(
        &[0.7, 0.05, 0.05, 0.05, 0.7, 0.05, 0.05, 0.05, 0.7],
        3,
    )
    .unwrap();
    let mut config = RunConfig::default();
    config.mode = RunMode::Maximize {
        duration: 400,
        schedule: CoolingSchedule::Exponential { t0: 1.0, alpha: 0.99 },
    };
    config.proposal = ProposalKind::SingleVertex;
    config.model = ModelKind::Ppm;

    let summary = run(
        &config,
        BlockModel::from_block_sizes(&graph, &[8, 8, 8]).unwrap(),
        &p,
    )
    .unwrap();
    assert!(summary.marginals.is_none());
    assert_eq!(summary.membership, summary.final_membership);
    assert!(summary.trajectory.is_empty());
    assert_eq!(summary.block_sizes.iter().sum::<usize>(), 24);
    let edges: usize = summary.edge_counts.iter().flatten().sum::<usize>()
        + (0..3).map(|r| summary.edge_counts[r][r]).sum::<usize>();
    assert_eq!(edges, 2 * graph.edge_count());
}

#[test]
fn invalid_configuration_is_rejected() {
    let graph = sample_graph();
    let p = EdgeProbabilities::planted(0.7, 0.05).unwrap();
    let mut config = RunConfig::default();
    config.mode = RunMode::Maximize {
        duration: 10,
        schedule: CoolingSchedule::Constant { temperature: 0.0 },
    };
    let err = run(
        &config,
        BlockModel::from_block_sizes(&graph, &[8, 8, 8]).unwrap(),
        &p,
    )
    .unwrap_err();
    assert_eq!(err.code(), "invalid-schedule-parameter");
}

#[test]
fn manifest_roundtrip() {
    let graph = sample_graph();
    let p = EdgeProbabilities::planted(0.7, 0.05).unwrap();
    let mut config = marginalize_config();
    config.seed_policy.label = Some("manifest-test".to_string());
    let summary = run(
        &config,
        BlockModel::from_block_sizes(&graph, &[8, 8, 8]).unwrap(),
        &p,
    )
    .unwrap();

    let manifest = summary.manifest(&config, canonical_hash(&graph));
    assert_eq!(manifest.membership_hash, membership_hash(&summary.membership));
    assert_eq!(manifest.seed_label.as_deref(), Some("manifest-test"));

    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("manifest.json");
    manifest.write(&path).unwrap();
    let loaded = RunManifest::load(&path).unwrap();
    assert_eq!(loaded, manifest);
}

#[test]
fn membership_hash_is_order_sensitive() {
    assert_eq!(membership_hash(&[0, 1, 1]), membership_hash(&[0, 1, 1]));
    assert_ne!(membership_hash(&[0, 1, 1]), membership_hash(&[1, 0, 1]));
    assert_ne!(membership_hash(&[0]), membership_hash(&[0, 0]));
}
