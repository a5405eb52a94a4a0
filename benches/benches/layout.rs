// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use folio_layout::{
    FixedPages, LayoutManager, Orientation, PageArrangement, PopulateHelper, SizedPage,
};
use folio_view::ViewContext;
use kurbo::{Point, Size};

const VIEW: Size = Size::new(1080.0, 1920.0);

fn setup(
    orientation: Orientation,
    arrangement: PageArrangement,
    pages: usize,
) -> (ViewContext, LayoutManager<SizedPage>, FixedPages) {
    let mut manager = LayoutManager::new(orientation, arrangement);
    manager.set_view_size(VIEW);
    manager.set_page_count(pages);
    manager.set_cache_limit(Some(16));
    let mut ctx = ViewContext::new(VIEW);
    manager.init_view_context(&mut ctx);
    let origin = manager.initial_origin();
    ctx.offset_to(origin.x, origin.y, None);
    (ctx, manager, FixedPages::new(pages, Size::new(600.0, 800.0)))
}

fn bench_obtain_visible(c: &mut Criterion) {
    let mut group = c.benchmark_group("folio_layout");
    group.sample_size(50);

    for &(name, orientation, arrangement) in &[
        ("ltr_single", Orientation::HorizontalLtr, PageArrangement::Single),
        (
            "rtl_double",
            Orientation::HorizontalRtl,
            PageArrangement::Double { spread: true },
        ),
        ("vertical_single", Orientation::Vertical, PageArrangement::Single),
    ] {
        // Walk the whole document slot by slot, as a reader paging through it.
        group.bench_function(format!("obtain_visible_walk({name},n=1000)"), |b| {
            b.iter_batched(
                || setup(orientation, arrangement, 1_000),
                |(mut ctx, mut manager, mut pages)| {
                    let mut total = 0_usize;
                    for slot in 0..manager.count() {
                        if let Some(rect) = manager.slot_rect(slot) {
                            ctx.offset_to(rect.x0, rect.y0, None);
                        }
                        total += manager.obtain_visible(&ctx, &mut pages).len();
                    }
                    black_box(total);
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_function(format!("obtain_visible_cached({name})"), |b| {
            let (ctx, mut manager, mut pages) = setup(orientation, arrangement, 1_000);
            manager.obtain_visible(&ctx, &mut pages);
            b.iter(|| black_box(manager.obtain_visible(&ctx, &mut pages).len()));
        });
    }

    group.finish();
}

fn bench_populate(c: &mut Criterion) {
    let mut group = c.benchmark_group("folio_layout");

    group.bench_function("decide_page_turn", |b| {
        let (mut ctx, mut manager, mut pages) =
            setup(Orientation::HorizontalLtr, PageArrangement::Single, 100);
        ctx.offset_to(300.0, 0.0, None);
        manager.obtain_visible(&ctx, &mut pages);
        let helper = PopulateHelper::Horizontal;
        b.iter(|| black_box(helper.decide(&ctx, &mut manager, 16.0)));
    });

    group.bench_function("scale_to_with_bounds", |b| {
        let (mut ctx, mut manager, mut pages) =
            setup(Orientation::HorizontalLtr, PageArrangement::Single, 100);
        manager.obtain_visible(&ctx, &mut pages);
        let bounds = manager
            .current_page_layout(&ctx)
            .map(|layout| layout.scroll_area());
        let focus = Point::new(540.0, 960.0);
        let mut zoomed = false;
        b.iter(|| {
            zoomed = !zoomed;
            let scale = if zoomed { 2.5 } else { 1.0 };
            black_box(ctx.scale_to(scale, focus, bounds));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_obtain_visible, bench_populate);
criterion_main!(benches);
