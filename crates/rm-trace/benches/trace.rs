use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rm_core::Image;
use rm_trace::trace_boundaries;

fn synthetic_mask(width: usize, height: usize) -> Image<u8> {
    let mut img = Image::new_fill(width, height, 0u8);

    // Grid of blobs with a punched hole in each, plenty of borders to follow.
    for by in (8..height.saturating_sub(40)).step_by(40) {
        for bx in (8..width.saturating_sub(40)).step_by(40) {
            for y in by..by + 28 {
                for x in bx..bx + 28 {
                    *img.get_mut(x, y).expect("in bounds") = 255;
                }
            }
            for y in by + 10..by + 18 {
                for x in bx + 10..bx + 18 {
                    *img.get_mut(x, y).expect("in bounds") = 0;
                }
            }
        }
    }

    img
}

fn bench_trace(c: &mut Criterion) {
    let mask = synthetic_mask(1280, 1024);

    c.bench_function("rm_trace_boundaries_1280x1024", |b| {
        b.iter(|| {
            let bounds = trace_boundaries(black_box(&mask));
            black_box((bounds.outer.len(), bounds.holes.len()));
        });
    });
}

criterion_group!(benches, bench_trace);
criterion_main!(benches);
