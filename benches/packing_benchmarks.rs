use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use crypto_workspace_wasm::domain::market_data::Symbol;
use crypto_workspace_wasm::domain::workspace::{
    Breakpoint, GridLayoutProvider, LayoutEntry, Layouts, ResponsiveGrid, WidgetId, WidgetInstance, WidgetSize,
    WidgetType, append_placement, grid_placement, repack,
};
use std::hint::black_box;
use std::time::Duration;

/// Board of `count` tiles with mixed spans, laid out row by row on 20 columns
fn generate_layout(count: u32) -> (Vec<WidgetId>, Vec<LayoutEntry>) {
    let ids: Vec<WidgetId> = (1..=count).map(WidgetId::numbered).collect();
    let mut entries = Vec::with_capacity(count as usize);
    for id in &ids {
        let size = WidgetSize::new(3 + entries.len() as u32 % 4, 2 + entries.len() as u32 % 3);
        let entry = append_placement(&entries, id.clone(), size, 20);
        entries.push(entry);
    }
    (ids, entries)
}

fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("append_placement");
    group.measurement_time(Duration::from_secs(5));

    for count in [10u32, 50, 200].iter() {
        let (_, entries) = generate_layout(*count);
        group.bench_with_input(BenchmarkId::new("existing", count), &entries, |b, entries| {
            b.iter(|| append_placement(black_box(entries), WidgetId::from("new"), WidgetSize::new(3, 3), 20))
        });
    }
    group.finish();
}

fn bench_filtered_repack(c: &mut Criterion) {
    let mut group = c.benchmark_group("filtered_repack");
    group.measurement_time(Duration::from_secs(5));

    for count in [10u32, 50, 200].iter() {
        let (ids, entries) = generate_layout(*count);
        let visible: Vec<WidgetId> = ids.iter().step_by(3).cloned().collect();
        group.bench_with_input(BenchmarkId::new("items", count), &entries, |b, entries| {
            b.iter(|| repack(black_box(&visible), entries, &[], WidgetSize::new(3, 3), 12))
        });
    }
    group.finish();
}

fn bench_drag_reconcile(c: &mut Criterion) {
    let grid = ResponsiveGrid::default();
    let (ids, lg) = generate_layout(50);
    let items: Vec<WidgetInstance> = ids
        .iter()
        .map(|id| WidgetInstance::new(id.clone(), WidgetType::Price, Symbol::from("BTC")))
        .collect();
    let mut current = Layouts::new();
    current.insert(Breakpoint::Lg, lg);
    let mut incoming = current.clone();
    if let Some(entry) = incoming.get_mut(&Breakpoint::Lg).and_then(|entries| entries.first_mut()) {
        entry.y += 4;
    }

    c.bench_function("on_drag_end_50", |b| {
        b.iter(|| grid.on_drag_end(black_box(&items), &current, incoming.clone()))
    });
    c.bench_function("grid_placement_50", |b| b.iter(|| grid_placement(black_box(&ids), WidgetSize::new(5, 3), 4)));
}

criterion_group!(benches, bench_append, bench_filtered_repack, bench_drag_reconcile);
criterion_main!(benches);
