//! Benchmarks for file view rendering.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use bed::prelude::*;

fn numbered_view(lines: usize) -> FileView {
    let text: Vec<Vec<u8>> = (0..lines)
        .map(|i| format!("{i:>6} the quick brown fox jumps over the lazy dog").into_bytes())
        .collect();
    FileView::new(LineBuffer::new(text), Viewport::new(0, 1, 120, 48))
}

fn bench_full_render(c: &mut Criterion) {
    c.bench_function("full_render", |b| {
        let mut surface = RecordingSurface::new(120, 50);
        let mut view = numbered_view(10_000);
        b.iter(|| {
            view.invalidate_all();
            black_box(view.render(&mut surface).unwrap())
        });
    });
}

fn bench_scroll_and_render(c: &mut Criterion) {
    c.bench_function("wheel_scroll_render", |b| {
        let mut surface = RecordingSurface::new(120, 50);
        let mut view = numbered_view(10_000);
        view.render(&mut surface).unwrap();
        let mut down = true;
        b.iter(|| {
            if view.scroll() == 0 {
                down = true;
            } else if view.scroll() >= 9_000 {
                down = false;
            }
            let key = if down { Key::WheelDown } else { Key::WheelUp };
            view.handle_input(&mut surface, KeyEvent::key(key)).unwrap();
            black_box(view.render(&mut surface).unwrap())
        });
    });
}

criterion_group!(benches, bench_full_render, bench_scroll_and_render);
criterion_main!(benches);
