use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use listsort::{Queue, SortStrategy, all_strategies, scramble, strategy_name};

const BENCH_SIZES: [usize; 3] = [1024, 16384, 131072];
const FEW_UNIQUE_DISTINCT: u64 = 16;

#[derive(Clone, Copy)]
enum Shape {
    Random,
    Presorted,
    Reversed,
    FewUnique,
    AdversarialSplit,
}

impl Shape {
    fn label(self) -> &'static str {
        match self {
            Shape::Random => "random",
            Shape::Presorted => "presorted",
            Shape::Reversed => "reversed",
            Shape::FewUnique => "few_unique",
            Shape::AdversarialSplit => "adversarial_split",
        }
    }

    fn build(self, size: usize, stream: u64) -> Queue<u64> {
        match self {
            Shape::Random => bench::random_keys(size, stream).into_iter().collect(),
            Shape::Presorted => bench::sorted_keys(size).into_iter().collect(),
            Shape::Reversed => bench::reversed_keys(size).into_iter().collect(),
            Shape::FewUnique => bench::few_unique_keys(size, FEW_UNIQUE_DISTINCT, stream)
                .into_iter()
                .collect(),
            Shape::AdversarialSplit => {
                let mut queue: Queue<u64> = bench::sorted_keys(size).into_iter().collect();
                scramble::worst_case(&mut queue);
                queue
            }
        }
    }
}

const SHAPES: [Shape; 5] = [
    Shape::Random,
    Shape::Presorted,
    Shape::Reversed,
    Shape::FewUnique,
    Shape::AdversarialSplit,
];

fn bench_sort(c: &mut Criterion) {
    for shape in SHAPES {
        let mut group = c.benchmark_group(format!("list_sort/{}", shape.label()));

        for &strategy in all_strategies() {
            for (stream, &size) in BENCH_SIZES.iter().enumerate() {
                bench::configure_group(&mut group, bench::profile_for_len(size));
                let base = shape.build(size, stream as u64);

                group.bench_function(BenchmarkId::new(strategy_name(strategy), size), |b| {
                    b.iter_batched(
                        || base.clone(),
                        |mut queue| {
                            queue.sort(strategy, false);
                            black_box(queue);
                        },
                        BatchSize::LargeInput,
                    );
                });
            }
        }
        group.finish();
    }
}

fn bench_shuffle(c: &mut Criterion) {
    let mut group = c.benchmark_group("scramble/shuffle");
    for &size in &BENCH_SIZES {
        bench::configure_group(&mut group, bench::profile_for_len(size));
        let base: Queue<u64> = bench::sorted_keys(size).into_iter().collect();

        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = bench::seeded_rng(size as u64);
            b.iter_batched(
                || base.clone(),
                |mut queue| {
                    scramble::shuffle(&mut queue, &mut rng);
                    black_box(queue);
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sort, bench_shuffle);
criterion_main!(benches);
