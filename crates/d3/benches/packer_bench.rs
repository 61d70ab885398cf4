//! Benchmarks for 3D box packing.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use u_packing_d3::{
    expand_items, Config, ContainerCatalog, Dimensions, FfdAllocator, Item, Packer3D, Solver,
    StackHint,
};

fn mixed_items() -> Vec<Item> {
    expand_items(vec![
        (Dimensions::new(30.0, 20.0, 10.0), 10),
        (Dimensions::new(12.0, 12.0, 12.0), 10),
        (Dimensions::new(20.0, 8.0, 5.0), 20),
    ])
}

fn packer_benchmark(c: &mut Criterion) {
    let items: Vec<Item> = expand_items(vec![(Dimensions::new(10.0, 10.0, 10.0), 20)]);
    let container = Dimensions::new(50.0, 40.0, 20.0);
    let packer = Packer3D::default_config();

    c.bench_function("pack_20_uniform_boxes", |b| {
        b.iter(|| {
            let result = packer.solve(black_box(&items), black_box(&container));
            black_box(result)
        })
    });

    let hinted = Packer3D::default_config().with_hint(StackHint);
    c.bench_function("pack_20_uniform_boxes_stack_hint", |b| {
        b.iter(|| {
            let result = hinted.solve(black_box(&items), black_box(&container));
            black_box(result)
        })
    });
}

fn allocator_benchmark(c: &mut Criterion) {
    let items = mixed_items();
    let catalog = ContainerCatalog::standard();

    let sequential = FfdAllocator::default_config();
    c.bench_function("ffd_40_mixed_sequential", |b| {
        b.iter(|| {
            let result = sequential.solve(black_box(&items), black_box(&catalog));
            black_box(result)
        })
    });

    let parallel = FfdAllocator::new(Config::default().with_parallel(true));
    c.bench_function("ffd_40_mixed_parallel", |b| {
        b.iter(|| {
            let result = parallel.solve(black_box(&items), black_box(&catalog));
            black_box(result)
        })
    });
}

criterion_group!(benches, packer_benchmark, allocator_benchmark);
criterion_main!(benches);
