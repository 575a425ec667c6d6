use handlekit_core::{DVec3, Parameter, Value, Xfo};
use handlekit_handles::{
    DragEvent, DragState, Handle, HandleError, LinearMovementHandle, GLOBAL_XFO_PARAM,
};
use handlekit_undo::UndoRedoManager;

fn tracked_handle(start: Xfo) -> (LinearMovementHandle, handlekit_core::ParameterRef) {
    let param = Parameter::new("GlobalXfo", start);
    let mut handle = LinearMovementHandle::new("Move Z");
    handle
        .base_mut()
        .set_target_param(param.clone(), true)
        .unwrap();
    (handle, param)
}

#[test]
fn test_drag_without_start_is_rejected() {
    let mut manager = UndoRedoManager::new();
    let mut handle = LinearMovementHandle::new("Move Z");
    let event = DragEvent::at(DVec3::Z);

    assert!(matches!(
        handle.on_drag(&mut manager, &event),
        Err(HandleError::NotDragging)
    ));
    assert!(matches!(
        handle.on_drag_end(&mut manager, &event),
        Err(HandleError::NotDragging)
    ));
    assert_eq!(manager.undo_count(), 0);
}

#[test]
fn test_second_start_is_rejected() {
    let mut manager = UndoRedoManager::new();
    let (mut handle, _param) = tracked_handle(Xfo::IDENTITY);

    handle
        .on_drag_start(&mut manager, &DragEvent::at(DVec3::ZERO))
        .unwrap();
    assert_eq!(handle.drag_state(), DragState::Dragging);
    assert!(matches!(
        handle.on_drag_start(&mut manager, &DragEvent::at(DVec3::ZERO)),
        Err(HandleError::AlreadyDragging)
    ));

    // The first drag is unaffected
    handle
        .on_drag(&mut manager, &DragEvent::at(DVec3::Z))
        .unwrap();
    handle
        .on_drag_end(&mut manager, &DragEvent::at(DVec3::Z))
        .unwrap();
    assert_eq!(manager.undo_count(), 1);
    assert_eq!(handle.drag_state(), DragState::Idle);
}

#[test]
fn test_drag_that_moves_nothing_leaves_no_history() {
    let mut manager = UndoRedoManager::new();
    let (mut handle, param) = tracked_handle(Xfo::IDENTITY);

    handle
        .on_drag_start(&mut manager, &DragEvent::at(DVec3::ZERO))
        .unwrap();
    // Off-axis movement projects to nothing
    handle
        .on_drag(&mut manager, &DragEvent::at(DVec3::X))
        .unwrap();
    handle
        .on_drag_end(&mut manager, &DragEvent::at(DVec3::X))
        .unwrap();

    assert_eq!(manager.undo_count(), 0);
    assert!(!manager.is_transaction_open());
    assert_eq!(param.value(), Value::Xfo(Xfo::IDENTITY));
}

#[test]
fn test_commit_then_undo_restores_target() {
    let mut manager = UndoRedoManager::new();
    let start = Xfo::from_translation(DVec3::new(1.0, 2.0, 3.0));
    let (mut handle, param) = tracked_handle(start);

    handle
        .on_drag_start(&mut manager, &DragEvent::at(DVec3::new(1.0, 2.0, 3.0)))
        .unwrap();
    assert!(manager.is_transaction_open());
    for z in 1..=5 {
        let pos = DVec3::new(1.0, 2.0, 3.0 + z as f64);
        handle.on_drag(&mut manager, &DragEvent::at(pos)).unwrap();
    }
    handle
        .on_drag_end(&mut manager, &DragEvent::at(DVec3::new(1.0, 2.0, 8.0)))
        .unwrap();

    let moved = param.value().as_xfo().unwrap();
    assert!(moved.tr.abs_diff_eq(DVec3::new(1.0, 2.0, 8.0), 1e-12));
    assert_eq!(manager.undo_count(), 1);

    manager.undo().unwrap();
    assert!(param.value().as_xfo().unwrap().approx_eq(&start, 1e-12));

    manager.redo().unwrap();
    assert!(param.value().as_xfo().unwrap().approx_eq(&moved, 1e-12));
}

#[test]
fn test_tracking_handle_follows_undo() {
    let mut manager = UndoRedoManager::new();
    let (mut handle, _param) = tracked_handle(Xfo::IDENTITY);

    handle
        .on_drag_start(&mut manager, &DragEvent::at(DVec3::ZERO))
        .unwrap();
    handle
        .on_drag(&mut manager, &DragEvent::at(DVec3::new(0.0, 0.0, 2.0)))
        .unwrap();
    assert!(handle.base().xfo().tr.abs_diff_eq(DVec3::new(0.0, 0.0, 2.0), 1e-12));
    handle
        .on_drag_end(&mut manager, &DragEvent::at(DVec3::new(0.0, 0.0, 2.0)))
        .unwrap();

    manager.undo().unwrap();
    assert!(handle.base().xfo().approx_eq(&Xfo::IDENTITY, 1e-12));
}

#[test]
fn test_untargeted_handle_moves_itself() {
    let mut manager = UndoRedoManager::new();
    let mut handle = LinearMovementHandle::new("Move Z");
    assert_eq!(handle.base().target_param().name(), GLOBAL_XFO_PARAM);

    handle
        .on_drag_start(&mut manager, &DragEvent::at(DVec3::ZERO))
        .unwrap();
    handle
        .on_drag(&mut manager, &DragEvent::at(DVec3::new(0.0, 0.0, -1.5)))
        .unwrap();
    handle
        .on_drag_end(&mut manager, &DragEvent::at(DVec3::new(0.0, 0.0, -1.5)))
        .unwrap();

    assert!(handle.base().xfo().tr.abs_diff_eq(DVec3::new(0.0, 0.0, -1.5), 1e-12));
    manager.undo().unwrap();
    assert_eq!(handle.base().xfo(), Xfo::IDENTITY);
}

#[test]
fn test_open_drag_blocks_undo() {
    let mut manager = UndoRedoManager::new();
    let (mut handle, _param) = tracked_handle(Xfo::IDENTITY);

    handle
        .on_drag_start(&mut manager, &DragEvent::at(DVec3::ZERO))
        .unwrap();
    assert!(manager.undo().is_err());
    handle
        .on_drag_end(&mut manager, &DragEvent::at(DVec3::ZERO))
        .unwrap();
    assert!(!manager.undo().unwrap());
}
