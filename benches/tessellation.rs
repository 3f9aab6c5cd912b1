use criterion::{black_box, criterion_group, criterion_main, Criterion};
use voroplane::{BoundingBox, DEFAULT_TOLERANCE, Site, Tessellation, fully_contained};

fn jittered_grid(n: usize) -> Vec<Site> {
    let mut sites = Vec::with_capacity(n * n);
    for x in 0..n {
        for y in 0..n {
            let i = (x * n + y) as f64;
            sites.push(Site::new(
                x as f64 + 0.3 * (i * 0.7).sin(),
                y as f64 + 0.3 * (i * 1.3).cos(),
                0.05 * (i * 0.4).sin(),
            ));
        }
    }
    sites
}

fn benchmark_calculate(c: &mut Criterion) {
    let tess = Tessellation::new(jittered_grid(32));

    c.bench_function("calculate_1024", |b| {
        b.iter(|| {
            black_box(tess.calculate());
        })
    });
}

fn benchmark_containment_filter(c: &mut Criterion) {
    let tess = Tessellation::new(jittered_grid(32));
    let diagram = tess.calculate();
    let window = BoundingBox::window([4.0, 4.0], [27.0, 27.0]).unwrap();

    c.bench_function("fully_contained_1024", |b| {
        b.iter(|| {
            black_box(fully_contained(diagram.cells(), &window, DEFAULT_TOLERANCE).unwrap());
        })
    });
}

criterion_group!(benches, benchmark_calculate, benchmark_containment_filter);
criterion_main!(benches);
