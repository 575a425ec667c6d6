//! A small scene and a scripted editing session over it.
//!
//! The session drives every kind of change through the same entry points an
//! interactive host would use, so its history exercises the whole stack and
//! can be saved and replayed against a fresh [`demo_scene`].

use anyhow::Context;
use handlekit_core::{shared, DVec3, Parameter, TreeItem, TreeItemRef, Value, Xfo};
use handlekit_handles::{
    AxialRotationHandle, CreateGeomTool, DragEvent, Handle, LinearMovementHandle, PointerButton,
    PointerEvent, SelectionGroup, ToolManager,
};
use handlekit_settings::Config;
use handlekit_undo::{
    ChangeContext, ChangeRegistry, GeomKind, HistoryFile, NameValueChange, ParameterValueChange,
    RestoreReport, UndoRedoManager,
};

/// Name of the sphere's radius parameter
pub const RADIUS_PARAM: &str = "Radius";

/// Root with a sphere above the origin and a cube beside it
pub fn demo_scene() -> TreeItemRef {
    let root = TreeItem::new("root");

    let sphere = TreeItem::new("Sphere");
    sphere.add_parameter(Parameter::new(RADIUS_PARAM, 1.0));
    sphere.set_local_xfo(Xfo::from_translation(DVec3::new(0.0, 0.0, 1.0)));

    let cube = TreeItem::new("Cube");
    cube.set_local_xfo(Xfo::from_translation(DVec3::new(2.0, 0.0, 0.0)));

    // Fresh items always attach
    let _ = root.add_child(sphere);
    let _ = root.add_child(cube);
    root
}

fn item(root: &TreeItemRef, name: &str) -> anyhow::Result<TreeItemRef> {
    root.child_by_name(name)
        .with_context(|| format!("Demo scene has no item '{}'", name))
}

fn drag<H: Handle>(
    handle: &mut H,
    manager: &mut UndoRedoManager,
    path: &[DVec3],
) -> anyhow::Result<()> {
    let (first, rest) = path.split_first().context("Empty drag path")?;
    handle.on_drag_start(manager, &DragEvent::at(*first))?;
    for pos in rest {
        handle.on_drag(manager, &DragEvent::at(*pos))?;
    }
    let last = rest.last().unwrap_or(first);
    handle.on_drag_end(manager, &DragEvent::at(*last))?;
    Ok(())
}

fn click(
    tools: &mut ToolManager,
    manager: &mut UndoRedoManager,
    from: DVec3,
    to: DVec3,
) -> anyhow::Result<()> {
    let event = |pos| PointerEvent::mouse(PointerButton::Primary, pos);
    tools.on_pointer_down(manager, &mut event(from))?;
    tools.on_pointer_move(manager, &mut event(to))?;
    tools.on_pointer_up(manager, &mut event(to))?;
    Ok(())
}

/// Edit `root` (a [`demo_scene`]) through handles, tools and direct changes.
///
/// Leaves six changes on the undo stack of `manager`.
pub fn run_demo_session(
    root: &TreeItemRef,
    manager: &mut UndoRedoManager,
    config: &Config,
) -> anyhow::Result<()> {
    let sphere = item(root, "Sphere")?;
    let cube = item(root, "Cube")?;

    let radius = sphere.require_parameter(RADIUS_PARAM)?;
    let change = ParameterValueChange::new(radius, Some(Value::Number(2.5)))?;
    manager.add_change(Box::new(change))?;

    let mut lift = LinearMovementHandle::new("Lift");
    lift.base_mut()
        .set_target_param(sphere.local_xfo_param(), true)?;
    let grab = sphere.global_xfo().tr;
    drag(
        &mut lift,
        manager,
        &[grab, grab + DVec3::Z * 0.5, grab + DVec3::Z * 1.5],
    )?;

    let mut turn = AxialRotationHandle::new("Turn", &config.handles);
    let group = SelectionGroup::from_items([sphere.clone(), cube.clone()]);
    turn.base_mut().set_selection_group(Some(shared(group)));
    let centre = turn.base().xfo().tr;
    drag(
        &mut turn,
        manager,
        &[
            centre + DVec3::X,
            centre + DVec3::new(1.0, 1.0, 0.0),
            centre + DVec3::Y,
        ],
    )?;

    let mut tools = ToolManager::new();
    for kind in [GeomKind::Sphere, GeomKind::Cuboid] {
        let tool = CreateGeomTool::new(kind, root.clone(), &config.tools);
        tools.register_tool(kind.label(), Box::new(tool));
    }
    tools.push_tool(GeomKind::Sphere.label())?;
    click(&mut tools, manager, DVec3::new(-3.0, 0.0, 0.0), DVec3::new(-3.0, 0.5, 0.0))?;
    tools.pop_tool(manager)?;

    tools.push_tool(GeomKind::Cuboid.label())?;
    let corner = DVec3::new(4.0, 1.0, 0.0);
    click(&mut tools, manager, DVec3::new(3.0, 0.0, 0.0), corner)?;
    click(&mut tools, manager, corner, corner + DVec3::Z * 2.0)?;
    tools.pop_tool(manager)?;

    let change = NameValueChange::new(cube, Some("Crate".to_string()))?;
    manager.add_change(Box::new(change))?;

    tracing::info!("Demo session recorded {} changes", manager.undo_count());
    Ok(())
}

/// Restore `history` onto a fresh [`demo_scene`], honouring the configured
/// history depth.
pub fn replay_onto_demo_scene(
    history: &HistoryFile,
    config: &Config,
) -> anyhow::Result<(TreeItemRef, UndoRedoManager, RestoreReport)> {
    let root = demo_scene();
    let mut manager = UndoRedoManager::with_depth(config.history.max_depth);
    let report = history.restore(
        &mut manager,
        ChangeRegistry::global(),
        &ChangeContext::new(root.clone()),
    )?;
    Ok((root, manager, report))
}
