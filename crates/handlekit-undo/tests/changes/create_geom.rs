use handlekit_core::{Color, DVec3, TreeItem, TreeItemRef, Value, Xfo};
use handlekit_undo::{
    Change, ChangeContext, ChangeRegistry, ChangeUpdate, CreateGeomChange, GeomKind, GeomShape,
    UndoRedoManager,
};
use std::rc::Rc;

fn parent_with_children(names: &[&str]) -> TreeItemRef {
    let root = TreeItem::new("root");
    for name in names {
        root.add_child(TreeItem::new(*name)).unwrap();
    }
    root
}

fn names(item: &TreeItemRef) -> Vec<String> {
    item.children().iter().map(|c| c.name()).collect()
}

#[test]
fn test_undo_and_redo_of_third_child() {
    let root = parent_with_children(&["A", "B"]);
    let mut manager = UndoRedoManager::new();
    let change =
        CreateGeomChange::new(GeomKind::Line, root.clone(), Xfo::IDENTITY, Color::default())
            .unwrap();
    manager.add_change(Box::new(change)).unwrap();
    assert_eq!(root.child_count(), 3);

    manager.undo().unwrap();
    assert_eq!(names(&root), vec!["A", "B"]);

    manager.redo().unwrap();
    assert_eq!(root.child_count(), 3);
    assert_eq!(root.child(2).unwrap().name(), "Line");
}

#[test]
fn test_redo_reinserts_at_captured_index() {
    let root = parent_with_children(&["A", "B"]);
    let mut manager = UndoRedoManager::new();
    let change =
        CreateGeomChange::new(GeomKind::Cuboid, root.clone(), Xfo::IDENTITY, Color::default())
            .unwrap();
    assert_eq!(change.index(), 2);
    let created = change.item().unwrap().clone();
    manager.add_change(Box::new(change)).unwrap();

    // Another item lands after the created one
    root.add_child(TreeItem::new("C")).unwrap();
    assert_eq!(names(&root), vec!["A", "B", "Cuboid", "C"]);

    manager.undo().unwrap();
    assert_eq!(names(&root), vec!["A", "B", "C"]);
    assert!(created.parent().is_none());

    manager.redo().unwrap();
    assert_eq!(names(&root), vec!["A", "B", "Cuboid", "C"]);
    assert!(Rc::ptr_eq(&root.child(2).unwrap(), &created));
}

#[test]
fn test_redo_clamps_index_when_parent_shrank() {
    let root = parent_with_children(&["A", "B", "C"]);
    let mut change =
        CreateGeomChange::new(GeomKind::Sphere, root.clone(), Xfo::IDENTITY, Color::default())
            .unwrap();
    change.undo();
    root.remove_child(0).unwrap();
    root.remove_child(0).unwrap();

    change.redo();
    assert_eq!(names(&root), vec!["C", "Sphere"]);
}

#[test]
fn test_created_item_is_placed_at_global_xfo() {
    let root = TreeItem::new("root");
    let group = TreeItem::new("Group");
    root.add_child(group.clone()).unwrap();
    group.set_local_xfo(Xfo::from_translation(DVec3::new(5.0, 0.0, 0.0)));

    let target = Xfo::from_translation(DVec3::new(6.0, 2.0, 0.0));
    let change =
        CreateGeomChange::new(GeomKind::Circle, group.clone(), target, Color::rgb(0.7, 0.2, 0.2))
            .unwrap();
    let item = change.item().unwrap();
    assert!(item.global_xfo().approx_eq(&target, 1e-12));
    assert_eq!(
        item.parameter("Color").map(|p| p.value()),
        Some(Value::Color(Color::rgb(0.7, 0.2, 0.2)))
    );
}

#[test]
fn test_unique_names() {
    let root = TreeItem::new("root");
    for _ in 0..3 {
        CreateGeomChange::new(GeomKind::Line, root.clone(), Xfo::IDENTITY, Color::default())
            .unwrap();
    }
    assert_eq!(names(&root), vec!["Line", "Line1", "Line2"]);
}

#[test]
fn test_cuboid_translation_update() {
    let root = TreeItem::new("root");
    let mut change =
        CreateGeomChange::new(GeomKind::Cuboid, root.clone(), Xfo::IDENTITY, Color::default())
            .unwrap();
    change
        .update(&ChangeUpdate::Geometry(GeomShape::Cuboid {
            base_size: [2.0, 1.0],
            height: 0.5,
            tr: Some(DVec3::new(1.0, 0.5, 0.0)),
        }))
        .unwrap();

    let item = change.item().unwrap();
    assert_eq!(item.local_xfo().tr, DVec3::new(1.0, 0.5, 0.0));
    assert_eq!(
        item.parameter("SizeZ").map(|p| p.value()),
        Some(Value::Number(0.5))
    );
}

#[test]
fn test_record_round_trip_for_each_kind() {
    let registry = ChangeRegistry::with_builtin();
    for kind in GeomKind::ALL {
        let root = TreeItem::new("root");
        let change =
            CreateGeomChange::new(kind, root.clone(), Xfo::IDENTITY, Color::default()).unwrap();
        let record = change.to_record().unwrap();
        assert_eq!(record.type_name, kind.type_name());

        let fresh = TreeItem::new("root");
        let loaded = registry
            .load(&record, &ChangeContext::new(fresh.clone()))
            .unwrap();
        assert!(!loaded.is_inert());
        assert_eq!(names(&fresh), vec![kind.label()]);
    }
}

#[test]
fn test_load_with_missing_parent_is_inert() {
    let root = TreeItem::new("root");
    let group = TreeItem::new("Group");
    root.add_child(group.clone()).unwrap();
    let change =
        CreateGeomChange::new(GeomKind::Rect, group, Xfo::IDENTITY, Color::default()).unwrap();
    let record = change.to_record().unwrap();

    let fresh = TreeItem::new("root");
    let loaded = ChangeRegistry::with_builtin()
        .load(&record, &ChangeContext::new(fresh.clone()))
        .unwrap();
    assert!(loaded.is_inert());
    assert_eq!(fresh.child_count(), 0);
}

#[test]
fn test_record_describes_item_as_created() {
    let root = TreeItem::new("root");
    let change =
        CreateGeomChange::new(GeomKind::Sphere, root.clone(), Xfo::IDENTITY, Color::default())
            .unwrap();
    let item = change.item().unwrap().clone();
    item.set_name("Ball");
    item.set_local_xfo(Xfo::from_translation(DVec3::new(0.0, 0.0, 3.0)));

    let record = change.to_record().unwrap();
    assert_eq!(record.get::<String>("geomItemName").unwrap(), "Sphere");
    assert_eq!(record.get::<Xfo>("geomItemXfo").unwrap(), Xfo::IDENTITY);
}
