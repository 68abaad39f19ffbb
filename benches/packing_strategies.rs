use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use cubpack::prelude::*;

fn random_cuboids(seed: u64, count: usize, max_side: i64) -> Vec<(i64, i64, i64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            (
                rng.gen_range(1..=max_side),
                rng.gen_range(1..=max_side),
                rng.gen_range(1..=max_side),
            )
        })
        .collect()
}

fn make_guillotine(w: i64, h: i64, d: i64, rot: bool) -> GuillotineBin<i64, String> {
    GuillotineBin::new(w, h, d, rot, GuillotineSelector::Bssf, GuillotineSplitRule::Sas)
}

fn make_maxcubs(w: i64, h: i64, d: i64, rot: bool) -> MaxCubsBin<i64, String> {
    MaxCubsBin::new(w, h, d, rot, MaxCubsSelector::Bssf)
}

fn bench_single_bin_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_bin_fill");
    let items = random_cuboids(7, 200, 12);

    group.bench_function(BenchmarkId::new("guillotine", "bssf_sas"), |b| {
        b.iter(|| {
            let mut bin = make_guillotine(64, 64, 64, true);
            for &(w, h, d) in &items {
                bin.add_cub(w, h, d, None);
            }
        });
    });

    group.bench_function(BenchmarkId::new("maxcubs", "bssf"), |b| {
        b.iter(|| {
            let mut bin = make_maxcubs(64, 64, 64, true);
            for &(w, h, d) in &items {
                bin.add_cub(w, h, d, None);
            }
        });
    });

    group.finish();
}

fn bench_multi_bin_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("multi_bin_dispatch");
    let items = random_cuboids(11, 150, 8);

    for bin_algo in [BinAlgo::Bnf, BinAlgo::Bff, BinAlgo::Bbf, BinAlgo::Global] {
        let mode = if bin_algo == BinAlgo::Global {
            Mode::Offline
        } else {
            Mode::Offline
        };
        let cfg = PackerConfig {
            mode,
            bin_algo,
            sort_order: SortOrder::Volume,
            rotation: true,
        };

        group.bench_function(BenchmarkId::new("dispatch", format!("{bin_algo:?}")), |b| {
            b.iter(|| {
                let mut packer = new_packer(&cfg, make_guillotine).unwrap();
                packer.add_bin(20, 20, 20, 20);
                for &(w, h, d) in &items {
                    packer.queue_cub(w, h, d, None).unwrap();
                }
                packer.pack().unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_bin_algorithms, bench_multi_bin_dispatch);
criterion_main!(benches);
