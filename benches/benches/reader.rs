// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use folio_layout::FixedPages;
use folio_reader::{Reader, ReaderConfig};
use kurbo::{Point, Size};

fn reader(pages: usize) -> Reader<FixedPages> {
    let mut reader = Reader::new(
        FixedPages::new(pages, Size::new(600.0, 800.0)),
        ReaderConfig::default().with_cache_limit(Some(16)),
    )
    .expect("default config is valid");
    reader.set_view_size(1080.0, 1920.0);
    reader
}

fn bench_reader(c: &mut Criterion) {
    let mut group = c.benchmark_group("folio_reader");
    group.sample_size(50);

    // One full drag-and-turn gesture, animated to rest at 60 fps.
    group.bench_function("page_turn_gesture", |b| {
        b.iter_batched(
            || reader(100),
            |mut reader| {
                reader.touch_down();
                for _ in 0..10 {
                    reader.pan(-40.0, 0.0);
                }
                reader.release(0);
                let mut now = 0;
                while reader.tick(now) {
                    now += 16;
                }
                black_box(reader.drain_events().count());
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("pinch_frame", |b| {
        let mut reader = reader(100);
        let focus = Point::new(540.0, 960.0);
        reader.begin_zoom();
        let mut grow = true;
        b.iter(|| {
            grow = !grow;
            reader.zoom(if grow { 1.01 } else { 1.0 / 1.01 }, focus);
            black_box(reader.view().scale());
        });
    });

    group.bench_function("visible_slots", |b| {
        let mut reader = reader(100);
        b.iter(|| black_box(reader.visible_slots().len()));
    });

    group.finish();
}

criterion_group!(benches, bench_reader);
criterion_main!(benches);
