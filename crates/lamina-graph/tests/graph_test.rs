use lamina_graph::{Change, Graph, GraphError, Point, Rect};
use std::cell::RefCell;
use std::rc::Rc;

fn sample() -> Graph {
    let mut g = Graph::new();
    g.add_vertex("a", Rect::sized(40.0, 20.0)).unwrap();
    g.add_vertex("b", Rect::sized(40.0, 20.0)).unwrap();
    g.add_edge("e1", "a", "b").unwrap();
    g
}

fn recorder(g: &mut Graph) -> Rc<RefCell<Vec<Vec<Change>>>> {
    let batches: Rc<RefCell<Vec<Vec<Change>>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = batches.clone();
    g.on_change(move |changes| sink.borrow_mut().push(changes.to_vec()));
    batches
}

#[test]
fn vertices_and_edges_keep_insertion_order() {
    let mut g = Graph::new();
    for id in ["c", "a", "b"] {
        g.add_vertex(id, Rect::default()).unwrap();
    }
    g.add_edge("z", "c", "a").unwrap();
    g.add_edge("y", "a", "b").unwrap();

    let vs: Vec<&str> = g.vertices().map(|v| v.id()).collect();
    let es: Vec<&str> = g.edges().map(|e| e.id()).collect();
    assert_eq!(vs, vec!["c", "a", "b"]);
    assert_eq!(es, vec!["z", "y"]);
}

#[test]
fn add_edge_rejects_missing_endpoints_and_duplicates() {
    let mut g = sample();
    assert_eq!(
        g.add_edge("e2", "a", "nope").unwrap_err(),
        GraphError::MissingEndpoint {
            edge_id: "e2".to_string(),
            vertex_id: "nope".to_string()
        }
    );
    assert_eq!(
        g.add_edge("e1", "a", "b").unwrap_err(),
        GraphError::DuplicateEdge {
            id: "e1".to_string()
        }
    );
    assert!(matches!(
        g.add_vertex("a", Rect::default()),
        Err(GraphError::DuplicateVertex { .. })
    ));
}

#[test]
fn set_parent_moves_children_between_groups() {
    let mut g = sample();
    g.add_vertex("lane1", Rect::default()).unwrap();
    g.add_vertex("lane2", Rect::default()).unwrap();
    g.set_parent("a", "lane1").unwrap();
    g.set_parent("b", "lane1").unwrap();
    g.set_parent("b", "lane2").unwrap();

    assert_eq!(g.children(Some("lane1")), vec!["a"]);
    assert_eq!(g.children(Some("lane2")), vec!["b"]);
    assert_eq!(g.children(None), vec!["lane1", "lane2"]);
    assert!(g.is_group("lane1"));
    assert!(!g.is_group("a"));
    assert_eq!(g.vertex("b").unwrap().parent(), Some("lane2"));
}

#[test]
fn set_parent_rejects_containment_cycles() {
    let mut g = sample();
    g.set_parent("b", "a").unwrap();
    assert!(matches!(
        g.set_parent("a", "b"),
        Err(GraphError::ContainmentCycle { .. })
    ));
    assert!(matches!(
        g.set_parent("a", "a"),
        Err(GraphError::ContainmentCycle { .. })
    ));
}

#[test]
fn changes_outside_a_batch_notify_immediately() {
    let mut g = sample();
    let batches = recorder(&mut g);

    g.set_geometry("a", Rect::new(1.0, 2.0, 40.0, 20.0)).unwrap();
    g.set_points("e1", vec![Point::new(5.0, 5.0)]).unwrap();

    assert_eq!(batches.borrow().len(), 2);
}

#[test]
fn nested_updates_notify_once_with_every_change() {
    let mut g = sample();
    let batches = recorder(&mut g);

    g.begin_update();
    g.set_geometry("a", Rect::new(1.0, 2.0, 40.0, 20.0)).unwrap();
    g.begin_update();
    g.set_geometry("b", Rect::new(3.0, 4.0, 40.0, 20.0)).unwrap();
    g.end_update();
    assert!(batches.borrow().is_empty());
    g.set_points("e1", vec![Point::new(5.0, 5.0)]).unwrap();
    g.end_update();

    let batches = batches.borrow();
    assert_eq!(batches.len(), 1);
    let ids: Vec<&str> = batches[0].iter().map(|c| c.id()).collect();
    assert_eq!(ids, vec!["a", "b", "e1"]);
}

#[test]
fn unchanged_values_are_not_recorded() {
    let mut g = sample();
    let batches = recorder(&mut g);

    let geometry = g.vertex("a").unwrap().geometry();
    g.set_geometry("a", geometry).unwrap();
    g.set_points("e1", Vec::new()).unwrap();

    assert!(batches.borrow().is_empty());
}

#[test]
fn batch_guard_closes_the_scope_on_early_return() {
    fn failing(g: &mut Graph) -> Result<(), GraphError> {
        let mut txn = g.batch();
        txn.set_geometry("a", Rect::new(9.0, 9.0, 40.0, 20.0))?;
        txn.set_geometry("missing", Rect::default())?;
        Ok(())
    }

    let mut g = sample();
    let batches = recorder(&mut g);

    assert!(failing(&mut g).is_err());
    assert_eq!(g.update_level(), 0);
    assert_eq!(batches.borrow().len(), 1);
    assert_eq!(g.vertex("a").unwrap().geometry().x, 9.0);
}

#[test]
fn unbalanced_end_update_is_ignored() {
    let mut g = sample();
    g.end_update();
    assert_eq!(g.update_level(), 0);
}

#[test]
fn incident_edges_lists_self_loops_once() {
    let mut g = sample();
    g.add_edge("loop", "a", "a").unwrap();
    let ids: Vec<&str> = g.incident_edges("a").iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec!["e1", "loop"]);
    assert!(g.edge("loop").unwrap().is_loop());
}
