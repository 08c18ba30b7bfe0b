use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use funq::*;
use std::rc::Rc;

// ===== Micro Benchmarks =====

fn bench_container_hit(c: &mut Criterion) {
    let container = Container::new();
    container.register::<u64, _>(|_| Ok(Rc::new(42))).reused_within(ReuseScope::Container);
    container.configure().unwrap();

    // Prime the cache
    let _ = container.resolve::<u64>().unwrap();

    c.bench_function("container_hit_u64", |b| {
        b.iter(|| {
            let v = container.resolve::<u64>().unwrap();
            black_box(v);
        })
    });
}

fn bench_cold_resolution(c: &mut Criterion) {
    struct ExpensiveToCreate {
        data: Vec<u64>,
    }

    c.bench_function("container_cold_expensive", |b| {
        b.iter_batched(
            || {
                let container = Container::new();
                container
                    .register::<ExpensiveToCreate, _>(|_| {
                        Ok(Rc::new(ExpensiveToCreate { data: (0..1000).collect() }))
                    })
                    .reused_within(ReuseScope::Container);
                container.configure().unwrap();
                container
            },
            |container| {
                let v = container.resolve::<ExpensiveToCreate>().unwrap();
                black_box(v.data.len());
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_reuse_scopes(c: &mut Criterion) {
    struct Service {
        data: [u8; 64],
    }

    let mut group = c.benchmark_group("reuse_scopes");

    for scope in [ReuseScope::NoReuse, ReuseScope::Container, ReuseScope::Hierarchy] {
        let root = Container::new();
        root.register::<Service, _>(|_| Ok(Rc::new(Service { data: [0; 64] })))
            .reused_within(scope);
        root.configure().unwrap();
        let child = root.create_child_container();
        let _ = child.resolve::<Service>().unwrap();

        group.bench_with_input(BenchmarkId::new("from_child", format!("{:?}", scope)), &scope, |b, _| {
            b.iter(|| {
                let v = child.resolve::<Service>().unwrap();
                black_box(&v.data);
            })
        });
    }

    group.finish();
}

fn bench_arguments_and_names(c: &mut Criterion) {
    let container = Container::new();
    container.register_with::<String, _, _>(|_, (n, flag): (u32, bool)| Ok(Rc::new(format!("{}-{}", n, flag))));
    container.register::<String, _>(|_| Ok(Rc::new("named".to_string()))).named("primary");
    container.configure().unwrap();

    let mut group = c.benchmark_group("key_dimensions");
    group.bench_function("with_args", |b| {
        b.iter(|| black_box(container.resolve_with::<String, _>((7u32, true)).unwrap()))
    });
    group.bench_function("named", |b| {
        b.iter(|| black_box(container.resolve_named::<String>("primary").unwrap()))
    });
    group.finish();
}

fn bench_chain_depth(c: &mut Criterion) {
    fn resolve_at_depth(container: &Container<'_>, depth: usize) -> Rc<u64> {
        if depth == 0 {
            return container.resolve::<u64>().unwrap();
        }
        let child = container.create_child_container();
        resolve_at_depth(&child, depth - 1)
    }

    let root = Container::new();
    root.register::<u64, _>(|_| Ok(Rc::new(1))).reused_within(ReuseScope::Hierarchy);
    root.configure().unwrap();

    let mut group = c.benchmark_group("chain_depth");
    for depth in [1usize, 4, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| black_box(resolve_at_depth(&root, depth)))
        });
    }
    group.finish();
}

fn bench_disposal(c: &mut Criterion) {
    struct Handle;

    impl Dispose for Handle {
        fn dispose(&self) {}
    }

    let root = Container::new();
    root.register_disposable::<Handle, _>(|_| Ok(Rc::new(Handle)));
    root.configure().unwrap();

    c.bench_function("child_scope_with_100_disposables", |b| {
        b.iter(|| {
            root.with_child(|request| {
                let handles: Vec<_> = (0..100).map(|_| request.resolve::<Handle>().unwrap()).collect();
                black_box(handles.len())
            })
        })
    });
}

// ===== Macro Benchmarks =====

fn bench_large_registry(c: &mut Criterion) {
    macro_rules! register_types {
        ($container:expr, $($ty:ident),+) => {
            $(
                struct $ty;
                $container.register::<$ty, _>(|_| Ok(Rc::new($ty)));
            )+
        };
    }

    let container = Container::new();
    register_types!(container, T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12, T13, T14, T15);
    for i in 0..500u32 {
        container.register::<u32, _>(move |_| Ok(Rc::new(i))).named(format!("value-{}", i));
    }
    container.configure().unwrap();

    c.bench_function("large_registry_lookup", |b| {
        b.iter(|| {
            black_box(container.resolve::<T15>().unwrap());
            black_box(container.resolve_named::<u32>("value-499").unwrap());
        })
    });
}

criterion_group!(
    micro_benches,
    bench_container_hit,
    bench_cold_resolution,
    bench_reuse_scopes,
    bench_arguments_and_names,
    bench_chain_depth,
    bench_disposal
);

criterion_group!(macro_benches, bench_large_registry);

criterion_main!(micro_benches, macro_benches);
