use handlekit_core::{Color, Parameter, ParameterRef, TreeItem, TreeItemRef, Value, Xfo};
use handlekit_undo::{
    ChangeContext, ChangeRegistry, CreateGeomChange, GeomKind, HistoryFile, NameValueChange,
    ParameterValueChange, PersistenceError, UndoRedoManager, HISTORY_VERSION,
};
use tempfile::TempDir;

fn scene() -> (TreeItemRef, TreeItemRef, ParameterRef) {
    let root = TreeItem::new("root");
    let sphere = TreeItem::new("Sphere");
    root.add_child(sphere.clone()).unwrap();
    let radius = sphere.add_parameter(Parameter::new("Radius", 1.0));
    (root, sphere, radius)
}

fn edit(manager: &mut UndoRedoManager, root: &TreeItemRef, sphere: &TreeItemRef, radius: &ParameterRef) {
    let change = ParameterValueChange::new(radius.clone(), Some(Value::Number(4.0))).unwrap();
    manager.add_change(Box::new(change)).unwrap();
    let change =
        CreateGeomChange::new(GeomKind::Cuboid, root.clone(), Xfo::IDENTITY, Color::default())
            .unwrap();
    manager.add_change(Box::new(change)).unwrap();
    let change = NameValueChange::new(sphere.clone(), Some("Ball".to_string())).unwrap();
    manager.add_change(Box::new(change)).unwrap();
}

#[test]
fn test_save_and_restore_session() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("history.json");

    let (root, sphere, radius) = scene();
    let mut manager = UndoRedoManager::new();
    edit(&mut manager, &root, &sphere, &radius);
    let file = HistoryFile::from_manager(&manager).unwrap();
    assert_eq!(file.version, HISTORY_VERSION);
    assert_eq!(file.changes.len(), 3);
    file.save(&path).unwrap();

    let loaded = HistoryFile::load(&path).unwrap();
    assert_eq!(loaded.changes, file.changes);

    let (fresh_root, fresh_sphere, fresh_radius) = scene();
    let mut fresh_manager = UndoRedoManager::new();
    let report = loaded
        .restore(
            &mut fresh_manager,
            &ChangeRegistry::with_builtin(),
            &ChangeContext::new(fresh_root.clone()),
        )
        .unwrap();
    assert_eq!(report.applied, 3);
    assert!(report.inert.is_empty());
    assert_eq!(fresh_radius.value(), Value::Number(4.0));
    assert_eq!(fresh_sphere.name(), "Ball");
    assert_eq!(fresh_root.child_count(), 2);

    // The restored history undoes back to the fresh scene
    while fresh_manager.undo().unwrap() {}
    assert_eq!(fresh_radius.value(), Value::Number(1.0));
    assert_eq!(fresh_sphere.name(), "Sphere");
    assert_eq!(fresh_root.child_count(), 1);
}

#[test]
fn test_restore_reports_inert_changes() {
    let (root, sphere, radius) = scene();
    let mut manager = UndoRedoManager::new();
    edit(&mut manager, &root, &sphere, &radius);
    let file = HistoryFile::from_manager(&manager).unwrap();

    // A scene without the sphere
    let bare_root = TreeItem::new("root");
    let mut fresh_manager = UndoRedoManager::new();
    let report = file
        .restore(
            &mut fresh_manager,
            &ChangeRegistry::with_builtin(),
            &ChangeContext::new(bare_root.clone()),
        )
        .unwrap();
    assert_eq!(report.applied, 1);
    assert_eq!(report.inert, vec!["Radius Changed", "Sphere Name Changed"]);
    assert_eq!(fresh_manager.undo_count(), 1);
    assert_eq!(bare_root.child(0).unwrap().name(), "Cuboid");
}

#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = HistoryFile::load(&temp_dir.path().join("missing.json"));
    assert!(matches!(result, Err(PersistenceError::Io(_))));
}

#[test]
fn test_load_invalid_json() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        HistoryFile::load(&path),
        Err(PersistenceError::Json(_))
    ));
}
