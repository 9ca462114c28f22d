use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tapkit_core::{MaterialProfile, ScaleRequest, Template};
use tapkit_processor::{process, sanitize};

/// Zig-zag contour with a rapid and a stale dwell every 50 moves
fn synthetic_program(moves: usize) -> String {
    let mut out = String::from("G90\nF600\n");
    for i in 0..moves {
        if i % 50 == 0 {
            out.push_str("G00 X0 Y0\nG04 P0.5\n");
        }
        let x = (i % 97) as f64 * 1.7;
        let y = (i / 97) as f64 * 12.5;
        out.push_str(&format!("N{} G01 X{x:.3} Y{y:.3} F600\n", i + 1));
    }
    out
}

fn bench_process(c: &mut Criterion) {
    let template = Template::default();
    let material = MaterialProfile::eps_t1();
    let mut group = c.benchmark_group("process");

    for moves in [100usize, 1_000, 10_000] {
        let program = synthetic_program(moves);
        group.bench_with_input(BenchmarkId::from_parameter(moves), &program, |b, program| {
            b.iter(|| process(black_box(program), &template, "bench.tap", &material, None))
        });
    }

    group.finish();
}

fn bench_process_scaled(c: &mut Criterion) {
    let template = Template::default();
    let material = MaterialProfile::eps_t1();
    let program = synthetic_program(1_000);
    let scale = ScaleRequest::new(1000.0, 1500.0);

    c.bench_function("process_scaled_1000", |b| {
        b.iter(|| {
            process(
                black_box(&program),
                &template,
                "bench.tap",
                &material,
                Some(&scale),
            )
        })
    });
}

fn bench_sanitize(c: &mut Criterion) {
    let program = synthetic_program(10_000);
    c.bench_function("sanitize_10000", |b| b.iter(|| sanitize(black_box(&program))));
}

criterion_group!(benches, bench_process, bench_process_scaled, bench_sanitize);
criterion_main!(benches);
