use compose_navigation::{
    EntryResourcesFactory, FrameTransition, InstantTransition, NavController, NavHost,
    NavHostState, NoScope,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const DEPTHS: &[usize] = &[4, 16, 64, 256];

type BenchHost = NavHost<usize, NoScope, EntryResourcesFactory>;

fn host_with_depth(depth: usize) -> BenchHost {
    NavHost::new(NavHostState::new(
        NavController::new(0..depth),
        EntryResourcesFactory,
    ))
}

fn bench_push_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_pop_instant");
    for &depth in DEPTHS {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            let mut host = host_with_depth(depth);
            host.frame(&mut InstantTransition);
            b.iter(|| {
                host.update_backstack(|controller| controller.navigate(depth));
                black_box(host.frame(&mut InstantTransition));
                host.update_backstack(|controller| controller.pop());
                black_box(host.frame(&mut InstantTransition));
            });
        });
    }
    group.finish();
}

fn bench_animated_push_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_pop_animated");
    for &depth in DEPTHS {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            let mut host = host_with_depth(depth);
            let mut transition = FrameTransition::new(8);
            host.frame(&mut transition);
            b.iter(|| {
                host.update_backstack(|controller| controller.navigate(depth));
                for _ in 0..10 {
                    black_box(host.frame(&mut transition));
                }
                host.update_backstack(|controller| controller.pop());
                for _ in 0..10 {
                    black_box(host.frame(&mut transition));
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_push_pop, bench_animated_push_pop);
criterion_main!(benches);
