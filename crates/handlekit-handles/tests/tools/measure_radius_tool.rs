use handlekit_core::{Color, DQuat, DVec3, Parameter, TreeItem, TreeItemRef, Value, Xfo};
use handlekit_handles::{
    radial_feature, MeasureRadiusTool, PointerButton, PointerEvent, Propagation, Tool,
    SURFACE_TYPE_PARAM,
};
use handlekit_settings::ToolSettings;
use handlekit_undo::{Change, ChangeUpdate, CreateGeomChange, GeomKind, GeomShape, UndoRedoManager};
use std::f64::consts::FRAC_PI_2;

fn circle(root: &TreeItemRef, at: DVec3, radius: f64) -> TreeItemRef {
    let xfo = Xfo::from_translation(at);
    let mut change =
        CreateGeomChange::new(GeomKind::Circle, root.clone(), xfo, Color::default()).unwrap();
    change
        .update(&ChangeUpdate::Geometry(GeomShape::Circle { radius }))
        .unwrap();
    change.item().unwrap().clone()
}

fn over(item: &TreeItemRef, pos: DVec3) -> PointerEvent {
    PointerEvent::mouse(PointerButton::Primary, pos).with_hit(item.clone())
}

#[test]
fn test_click_on_circle_measures_radius() {
    let root = TreeItem::new("root");
    let ring = circle(&root, DVec3::new(1.0, 0.0, 0.0), 0.5);
    let mut manager = UndoRedoManager::new();
    let mut tool = MeasureRadiusTool::new(root.clone(), &ToolSettings::default());

    let hit = DVec3::new(1.0, 2.0, 0.0);
    tool.on_pointer_move(&mut manager, &mut over(&ring, hit))
        .unwrap();
    assert!(tool.highlighted().is_some());

    let mut press = over(&ring, hit);
    tool.on_pointer_down(&mut manager, &mut press).unwrap();
    assert!(!press.is_propagating());
    assert!(tool.highlighted().is_none());
    assert_eq!(manager.undo_count(), 1);

    let measure = root.child_by_name("MeasureDistance").unwrap();
    assert_eq!(
        measure.parameter("StartPos").unwrap().value(),
        Value::Vec3(DVec3::new(1.0, 0.0, 0.0))
    );
    assert_eq!(
        measure.parameter("EndPos").unwrap().value(),
        Value::Vec3(DVec3::new(1.0, 0.5, 0.0))
    );

    manager.undo().unwrap();
    assert!(root.child_by_name("MeasureDistance").is_none());
}

#[test]
fn test_cylinder_is_radial() {
    let cylinder = TreeItem::new("Shaft");
    cylinder.add_parameter(Parameter::new(SURFACE_TYPE_PARAM, "Cylinder".to_string()));
    cylinder.add_parameter(Parameter::new("Radius", 0.25));
    cylinder.set_local_xfo(Xfo::from_rotation(DQuat::from_rotation_y(FRAC_PI_2)));
    let root = TreeItem::new("root");
    root.add_child(cylinder.clone()).unwrap();
    assert!(radial_feature(&cylinder).is_some());

    let mut manager = UndoRedoManager::new();
    let mut tool = MeasureRadiusTool::new(root.clone(), &ToolSettings::default());
    let measured = tool
        .measure(&mut manager, &cylinder, DVec3::new(3.0, 0.0, 1.0))
        .unwrap();
    assert!(measured);
    let measure = root.child_by_name("MeasureDistance").unwrap();
    let end = measure.parameter("EndPos").unwrap().value();
    assert!(matches!(end, Value::Vec3(p) if p.abs_diff_eq(DVec3::new(3.0, 0.0, 0.25), 1e-12)));
}

#[test]
fn test_non_radial_items_are_not_measured() {
    let root = TreeItem::new("root");
    let block = TreeItem::new("Block");
    root.add_child(block.clone()).unwrap();
    let mut manager = UndoRedoManager::new();
    let mut tool = MeasureRadiusTool::new(root.clone(), &ToolSettings::default());

    tool.on_pointer_move(&mut manager, &mut over(&block, DVec3::X))
        .unwrap();
    assert!(tool.highlighted().is_none());

    let mut press = over(&block, DVec3::X);
    tool.on_pointer_down(&mut manager, &mut press).unwrap();
    assert!(press.is_propagating());
    assert_eq!(manager.undo_count(), 0);
}

#[test]
fn test_alt_and_secondary_are_ignored() {
    let root = TreeItem::new("root");
    let ring = circle(&root, DVec3::ZERO, 1.0);
    let mut manager = UndoRedoManager::new();
    let mut tool = MeasureRadiusTool::new(root.clone(), &ToolSettings::default());
    tool.on_pointer_move(&mut manager, &mut over(&ring, DVec3::X))
        .unwrap();

    let mut alt = over(&ring, DVec3::X).with_alt();
    tool.on_pointer_down(&mut manager, &mut alt).unwrap();
    let mut right =
        PointerEvent::mouse(PointerButton::Secondary, DVec3::X).with_hit(ring.clone());
    tool.on_pointer_down(&mut manager, &mut right).unwrap();

    assert!(alt.is_propagating());
    assert!(right.is_propagating());
    assert_eq!(manager.undo_count(), 0);
}
