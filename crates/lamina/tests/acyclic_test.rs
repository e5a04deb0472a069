use lamina::graph::{Graph, Rect};
use lamina::{LayoutConfig, acyclic, build, rank};

fn graph(vertices: &[&str], edges: &[(&str, &str, &str)]) -> Graph {
    let mut g = Graph::new();
    for v in vertices {
        g.add_vertex(*v, Rect::sized(40.0, 20.0)).unwrap();
    }
    for (id, s, t) in edges {
        g.add_edge(*id, *s, *t).unwrap();
    }
    g
}

fn inverted(model: &lamina::HierarchyModel) -> Vec<String> {
    model
        .edges()
        .iter()
        .filter(|e| e.inverted)
        .flat_map(|e| e.edges.iter().map(|m| m.cell.clone()))
        .collect()
}

#[test]
fn acyclic_run_does_not_change_an_already_acyclic_graph() {
    let g = graph(
        &["a", "b", "c", "d"],
        &[("ab", "a", "b"), ("ac", "a", "c"), ("bd", "b", "d"), ("cd", "c", "d")],
    );
    let mut model = build(&g, None, &LayoutConfig::default()).unwrap();
    acyclic::run(&mut model);
    assert!(inverted(&model).is_empty());
    assert!(model.topological_order().is_some());
}

#[test]
fn acyclic_run_breaks_a_three_cycle_with_one_inversion() {
    let g = graph(
        &["a", "b", "c"],
        &[("ab", "a", "b"), ("bc", "b", "c"), ("ca", "c", "a")],
    );
    let mut model = build(&g, None, &LayoutConfig::default()).unwrap();
    assert!(model.roots().is_empty());
    assert!(model.topological_order().is_none());

    acyclic::run(&mut model);
    assert_eq!(inverted(&model), vec!["ca".to_string()]);
    assert!(model.topological_order().is_some());

    rank::run(&mut model).unwrap();
    assert_eq!(model.layer_of("a"), Some(0));
    assert_eq!(model.layer_of("b"), Some(1));
    assert_eq!(model.layer_of("c"), Some(2));
}

#[test]
fn acyclic_run_starts_from_explicit_roots() {
    let g = graph(
        &["a", "b", "c"],
        &[("ab", "a", "b"), ("bc", "b", "c"), ("ca", "c", "a")],
    );
    let config = LayoutConfig {
        roots: Some(vec!["c".to_string()]),
        ..Default::default()
    };
    let mut model = build(&g, None, &config).unwrap();
    acyclic::run(&mut model);
    assert_eq!(inverted(&model), vec!["bc".to_string()]);

    rank::run(&mut model).unwrap();
    assert_eq!(model.layer_of("c"), Some(0));
    assert_eq!(model.layer_of("a"), Some(1));
    assert_eq!(model.layer_of("b"), Some(2));
}

#[test]
fn acyclic_run_visits_every_rootless_component() {
    let g = graph(
        &["x", "y", "p", "q", "r", "lonely"],
        &[
            ("xy", "x", "y"),
            ("yx", "y", "x"),
            ("pq", "p", "q"),
            ("qr", "q", "r"),
            ("rp", "r", "p"),
        ],
    );
    let mut model = build(&g, None, &LayoutConfig::default()).unwrap();
    acyclic::run(&mut model);

    assert!(model.topological_order().is_some());
    assert_eq!(inverted(&model), vec!["rp".to_string()]);
    // `x`/`y` share one merged edge, so there is nothing left to invert there.
    assert_eq!(model.edge(model.edge_of("yx").unwrap()).weight(), 2);
    assert!(model.nodes().iter().all(|n| !n.on_stack()));
}

#[test]
fn inverting_an_edge_twice_restores_its_roles() {
    let g = graph(&["a", "b"], &[("ab", "a", "b")]);
    let mut model = build(&g, None, &LayoutConfig::default()).unwrap();
    let e = model.edge_of("ab").unwrap();
    let (a, b) = (model.node_of("a").unwrap(), model.node_of("b").unwrap());

    model.invert_edge(e);
    assert_eq!((model.edge(e).source, model.edge(e).target), (b, a));
    assert!(model.edge(e).inverted);
    assert_eq!(model.node(a).connects_as_target, vec![e]);
    assert!(model.node(a).connects_as_source.is_empty());

    model.invert_edge(e);
    assert_eq!((model.edge(e).source, model.edge(e).target), (a, b));
    assert!(!model.edge(e).inverted);
    assert_eq!(model.node(a).connects_as_source, vec![e]);
    assert_eq!(model.node(b).connects_as_target, vec![e]);
    assert!(model.node(b).connects_as_source.is_empty());
}
