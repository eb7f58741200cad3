use criterion::{criterion_group, criterion_main, Criterion};
use sbm_core::{EdgeProbabilities, ModelKind, ProposalKind, RngHandle};
use sbm_graph::{gen_stochastic_block, Graph};
use sbm_mcmc::{BlockModel, CoolingSchedule, MhEngine};

const SIZES: [usize; 4] = [50, 50, 50, 50];

fn sample_graph(p: &EdgeProbabilities) -> Graph {
    let mut rng = RngHandle::from_seed(42);
    gen_stochastic_block(&SIZES, p, &mut rng).unwrap()
}

fn bench_sweep(c: &mut Criterion) {
    let p = EdgeProbabilities::planted(0.2, 0.02).unwrap();
    let graph = sample_graph(&p);

    for (name, proposal, model) in [
        ("marginalize_swap_sbm", ProposalKind::Swap, ModelKind::Sbm),
        ("marginalize_swap_ppm", ProposalKind::Swap, ModelKind::Ppm),
        ("marginalize_single_sbm", ProposalKind::SingleVertex, ModelKind::Sbm),
    ] {
        let engine = MhEngine::new(proposal, model);
        c.bench_function(name, |b| {
            b.iter(|| {
                let mut state = BlockModel::from_block_sizes(&graph, &SIZES).unwrap();
                let mut rng = RngHandle::from_seed(7);
                engine
                    .marginalize(&mut state, &p, 200, 10, 100, &mut rng)
                    .unwrap()
            })
        });
    }

    let engine = MhEngine::new(ProposalKind::Swap, ModelKind::Sbm);
    let schedule = CoolingSchedule::default();
    c.bench_function("anneal_swap_sbm", |b| {
        b.iter(|| {
            let mut state = BlockModel::from_block_sizes(&graph, &SIZES).unwrap();
            let mut rng = RngHandle::from_seed(7);
            engine
                .anneal(&mut state, &p, &schedule, 1000, &mut rng)
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_sweep);
criterion_main!(benches);
