use handlekit_core::{DVec3, Parameter, TreeItem, TreeItemRef, Xfo};
use handlekit_handles::{
    ControllerId, CreateGeomTool, CreateStage, PointerButton, PointerEvent, Propagation, Tool,
    ToolError,
};
use handlekit_settings::ToolSettings;
use handlekit_undo::{GeomKind, ParameterValueChange, TransactionError, UndoRedoManager};

fn number(item: &TreeItemRef, name: &str) -> f64 {
    item.parameter(name).unwrap().value().as_number().unwrap()
}

fn mouse(button: PointerButton, pos: DVec3) -> PointerEvent {
    PointerEvent::mouse(button, pos)
}

fn drag_out(tool: &mut CreateGeomTool, manager: &mut UndoRedoManager, from: DVec3, to: DVec3) {
    tool.on_pointer_down(manager, &mut mouse(PointerButton::Primary, from))
        .unwrap();
    tool.on_pointer_move(manager, &mut mouse(PointerButton::Primary, to))
        .unwrap();
    tool.on_pointer_up(manager, &mut mouse(PointerButton::Primary, to))
        .unwrap();
}

#[test]
fn test_sphere_press_drag_release() {
    let root = TreeItem::new("root");
    let mut manager = UndoRedoManager::new();
    let mut tool = CreateGeomTool::new(GeomKind::Sphere, root.clone(), &ToolSettings::default());

    drag_out(
        &mut tool,
        &mut manager,
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(1.0, 2.0, 0.0),
    );

    assert_eq!(tool.stage(), CreateStage::Idle);
    assert_eq!(manager.undo_count(), 1);
    let sphere = root.child(0).unwrap();
    assert_eq!(sphere.name(), "Sphere");
    assert!((number(&sphere, "Radius") - 2.0).abs() < 1e-12);
    assert!(sphere
        .global_xfo()
        .tr
        .abs_diff_eq(DVec3::new(1.0, 0.0, 0.0), 1e-12));

    manager.undo().unwrap();
    assert_eq!(root.child_count(), 0);
    manager.redo().unwrap();
    assert_eq!(root.child_count(), 1);
}

#[test]
fn test_click_without_drag_creates_nothing() {
    let root = TreeItem::new("root");
    let mut manager = UndoRedoManager::new();
    let mut tool = CreateGeomTool::new(GeomKind::Circle, root.clone(), &ToolSettings::default());

    drag_out(&mut tool, &mut manager, DVec3::ZERO, DVec3::ZERO);

    assert_eq!(root.child_count(), 0);
    assert_eq!(manager.undo_count(), 0);
    assert!(!manager.is_transaction_open());
}

#[test]
fn test_secondary_button_cancels() {
    let root = TreeItem::new("root");
    let mut manager = UndoRedoManager::new();
    let mut tool = CreateGeomTool::new(GeomKind::Sphere, root.clone(), &ToolSettings::default());

    tool.on_pointer_down(&mut manager, &mut mouse(PointerButton::Primary, DVec3::ZERO))
        .unwrap();
    tool.on_pointer_move(&mut manager, &mut mouse(PointerButton::Primary, DVec3::X))
        .unwrap();
    assert_eq!(tool.stage(), CreateStage::Base);

    let mut right = mouse(PointerButton::Secondary, DVec3::X);
    tool.on_pointer_down(&mut manager, &mut right).unwrap();
    assert!(!right.is_propagating());
    assert_eq!(tool.stage(), CreateStage::Idle);
    assert_eq!(root.child_count(), 0);
    assert_eq!(manager.undo_count(), 0);

    // A release after cancelling is ignored
    tool.on_pointer_up(&mut manager, &mut mouse(PointerButton::Primary, DVec3::X))
        .unwrap();
    assert_eq!(manager.undo_count(), 0);
}

#[test]
fn test_alt_click_is_left_to_the_camera() {
    let root = TreeItem::new("root");
    let mut manager = UndoRedoManager::new();
    let mut tool = CreateGeomTool::new(GeomKind::Sphere, root.clone(), &ToolSettings::default());

    let mut event = mouse(PointerButton::Primary, DVec3::ZERO).with_alt();
    tool.on_pointer_down(&mut manager, &mut event).unwrap();
    assert!(event.is_propagating());
    assert_eq!(tool.stage(), CreateStage::Idle);
    assert!(!manager.is_transaction_open());
}

#[test]
fn test_rect_grows_about_press_point() {
    let root = TreeItem::new("root");
    let mut manager = UndoRedoManager::new();
    let mut tool = CreateGeomTool::new(GeomKind::Rect, root.clone(), &ToolSettings::default());

    drag_out(&mut tool, &mut manager, DVec3::ZERO, DVec3::new(1.0, -2.0, 0.0));

    let rect = root.child(0).unwrap();
    assert!((number(&rect, "SizeX") - 2.0).abs() < 1e-12);
    assert!((number(&rect, "SizeY") - 4.0).abs() < 1e-12);
}

#[test]
fn test_cuboid_base_then_height() {
    let root = TreeItem::new("root");
    let mut manager = UndoRedoManager::new();
    let mut tool = CreateGeomTool::new(GeomKind::Cuboid, root.clone(), &ToolSettings::default());

    let corner = DVec3::new(2.0, 1.0, 0.0);
    drag_out(&mut tool, &mut manager, DVec3::ZERO, corner);
    assert_eq!(tool.stage(), CreateStage::Height);
    assert!(manager.is_transaction_open());

    let cuboid = root.child(0).unwrap();
    assert!((number(&cuboid, "SizeX") - 2.0).abs() < 1e-12);
    assert!((number(&cuboid, "SizeY") - 1.0).abs() < 1e-12);
    assert!(cuboid
        .local_xfo()
        .tr
        .abs_diff_eq(DVec3::new(1.0, 0.5, 0.0), 1e-12));

    let top = corner + DVec3::new(0.0, 0.0, 3.0);
    tool.on_pointer_move(&mut manager, &mut mouse(PointerButton::Primary, top))
        .unwrap();
    assert!((number(&cuboid, "SizeZ") - 3.0).abs() < 1e-12);

    tool.on_pointer_down(&mut manager, &mut mouse(PointerButton::Primary, top))
        .unwrap();
    tool.on_pointer_up(&mut manager, &mut mouse(PointerButton::Primary, top))
        .unwrap();
    assert_eq!(tool.stage(), CreateStage::Idle);
    assert_eq!(manager.undo_count(), 1);
    assert!((number(&cuboid, "SizeZ") - 3.0).abs() < 1e-12);
}

#[test]
fn test_redo_reinserts_at_original_index() {
    let root = TreeItem::new("root");
    root.add_child(TreeItem::new("A")).unwrap();
    let mut manager = UndoRedoManager::new();
    let mut tool = CreateGeomTool::new(GeomKind::Sphere, root.clone(), &ToolSettings::default());

    drag_out(&mut tool, &mut manager, DVec3::ZERO, DVec3::X);
    manager.undo().unwrap();
    root.add_child(TreeItem::new("B")).unwrap();
    manager.redo().unwrap();

    let names: Vec<String> = root.children().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["A", "Sphere", "B"]);
}

#[test]
fn test_controller_draws_line() {
    let root = TreeItem::new("root");
    let mut manager = UndoRedoManager::new();
    let settings = ToolSettings {
        line_thickness: 0.05,
        ..ToolSettings::default()
    };
    let mut tool = CreateGeomTool::new(GeomKind::Line, root.clone(), &settings);
    let right = ControllerId(0);
    let left = ControllerId(1);
    let tip = |z: f64| Xfo::from_translation(DVec3::new(0.0, 1.0, z));

    tool.on_pointer_down(
        &mut manager,
        &mut PointerEvent::controller(right, PointerButton::Primary, tip(0.0)),
    )
    .unwrap();
    tool.on_pointer_move(
        &mut manager,
        &mut PointerEvent::controller(right, PointerButton::Primary, tip(2.0)),
    )
    .unwrap();

    // The other hand does not steer the line
    let mut other = PointerEvent::controller(left, PointerButton::Primary, tip(9.0));
    tool.on_pointer_move(&mut manager, &mut other).unwrap();
    tool.on_pointer_up(&mut manager, &mut other).unwrap();
    assert!(other.is_propagating());
    assert_eq!(tool.stage(), CreateStage::Base);

    tool.on_pointer_up(
        &mut manager,
        &mut PointerEvent::controller(right, PointerButton::Primary, tip(2.0)),
    )
    .unwrap();

    let line = root.child(0).unwrap();
    let p1 = line.parameter("P1").unwrap().value().as_vec3().unwrap();
    assert!(p1.abs_diff_eq(DVec3::new(0.0, 0.0, 2.0), 1e-12));
    assert!((number(&line, "LineThickness") - 0.05).abs() < 1e-12);
    assert_eq!(manager.undo_count(), 1);
}

#[test]
fn test_start_while_placing_is_rejected() {
    let root = TreeItem::new("root");
    let mut manager = UndoRedoManager::new();
    let mut tool = CreateGeomTool::new(GeomKind::Sphere, root.clone(), &ToolSettings::default());

    tool.create_start(&mut manager, Xfo::IDENTITY).unwrap();
    assert!(matches!(
        tool.create_start(&mut manager, Xfo::IDENTITY),
        Err(ToolError::AlreadyCreating { .. })
    ));
    assert!(tool.cancel(&mut manager).unwrap());
    assert!(!tool.cancel(&mut manager).unwrap());
}

#[test]
fn test_create_start_during_open_transaction_leaves_scene_untouched() {
    let root = TreeItem::new("root");
    let radius = Parameter::new("Radius", 1.0);
    let mut manager = UndoRedoManager::new();
    let _drag = manager
        .begin_transaction(Box::new(ParameterValueChange::new(radius, None).unwrap()))
        .unwrap();
    let mut tool = CreateGeomTool::new(GeomKind::Cuboid, root.clone(), &ToolSettings::default());

    let result = tool.create_start(&mut manager, Xfo::IDENTITY);
    assert!(matches!(
        result,
        Err(ToolError::Transaction(TransactionError::TransactionOpen { .. }))
    ));
    assert_eq!(root.child_count(), 0);
    assert_eq!(tool.stage(), CreateStage::Idle);
    assert_eq!(manager.undo_count(), 1);
}
