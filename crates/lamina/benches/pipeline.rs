use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use lamina::graph::{Graph, Rect};
use lamina::{GraphLayout, HierarchicalLayout, LayoutConfig};
use std::hint::black_box;
use std::time::Duration;

#[derive(Debug, Clone)]
struct GraphSpec {
    vertex_ids: Vec<String>,
    edges: Vec<(usize, usize)>,
}

impl GraphSpec {
    fn build(&self) -> Graph {
        let mut g = Graph::new();
        for (i, id) in self.vertex_ids.iter().enumerate() {
            let width = 40.0 + (i % 5) as f64 * 10.0;
            // Building from generated ids cannot collide.
            let _ = g.add_vertex(id.clone(), Rect::sized(width, 30.0));
        }
        for (k, &(from, to)) in self.edges.iter().enumerate() {
            let _ = g.add_edge(
                format!("e{k}"),
                self.vertex_ids[from].clone(),
                self.vertex_ids[to].clone(),
            );
        }
        g
    }
}

fn build_spec(name: &str, vertex_count: usize, fanout: usize) -> GraphSpec {
    let vertex_ids: Vec<String> = (0..vertex_count).map(|i| format!("{name}_v{i}")).collect();
    let mut edges: Vec<(usize, usize)> = Vec::new();

    // A spine to guarantee connectivity.
    for i in 0..vertex_count.saturating_sub(1) {
        edges.push((i, i + 1));
    }

    for i in 0..vertex_count {
        // Forward edges create crossing pressure.
        for k in 2..=(fanout + 1) {
            let to = i + k;
            if to >= vertex_count {
                break;
            }
            edges.push((i, to));
        }
        // Occasional back edges exercise cycle removal.
        if i >= 7 && i % 7 == 0 {
            edges.push((i, i - 7));
        }
        // Duplicates are merged into parallel edges.
        if i % 11 == 0 && i + 1 < vertex_count {
            edges.push((i, i + 1));
        }
    }

    GraphSpec { vertex_ids, edges }
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.measurement_time(Duration::from_secs(10));

    let cases = [
        ("g_50_f2", 50usize, 2usize),
        ("g_200_f3", 200usize, 3usize),
        ("g_400_f3", 400usize, 3usize),
    ];

    let layout = HierarchicalLayout::new(LayoutConfig::default());
    for (name, vertices, fanout) in cases {
        let spec = build_spec(name, vertices, fanout);
        group.bench_with_input(BenchmarkId::new("run", name), &spec, |b, spec| {
            b.iter_batched(
                || spec.build(),
                |g| {
                    let result = layout.run(black_box(&g), None);
                    black_box(result.map(|r| r.vertices.len()).unwrap_or_default());
                },
                BatchSize::LargeInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("execute", name), &spec, |b, spec| {
            b.iter_batched(
                || spec.build(),
                |mut g| {
                    let _ = layout.execute(black_box(&mut g), None);
                    black_box(g.vertex_count());
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
