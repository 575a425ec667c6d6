use handlekit_core::{DVec3, Parameter, ParameterRef, Xfo};
use handlekit_handles::{DragEvent, Handle, LinearScaleHandle};
use handlekit_settings::HandleSettings;
use handlekit_undo::UndoRedoManager;

fn setup(start: Xfo) -> (LinearScaleHandle, ParameterRef) {
    let param = Parameter::new("GlobalXfo", start);
    let mut handle = LinearScaleHandle::new("Scale", &HandleSettings::default());
    handle
        .base_mut()
        .set_target_param(param.clone(), false)
        .unwrap();
    (handle, param)
}

#[test]
fn test_scale_is_ratio_of_distances() {
    let mut manager = UndoRedoManager::new();
    let (mut handle, param) = setup(Xfo::IDENTITY);

    handle
        .on_drag_start(&mut manager, &DragEvent::at(DVec3::new(0.0, 0.0, 1.0)))
        .unwrap();
    handle
        .on_drag(&mut manager, &DragEvent::at(DVec3::new(0.3, 0.0, 2.0)))
        .unwrap();
    assert_eq!(handle.scale(), Some(2.0));
    handle
        .on_drag_end(&mut manager, &DragEvent::at(DVec3::new(0.0, 0.0, 2.0)))
        .unwrap();

    let scaled = param.value().as_xfo().unwrap();
    assert!(scaled.sc.abs_diff_eq(DVec3::splat(2.0), 1e-12));
    assert!(scaled.tr.abs_diff_eq(DVec3::ZERO, 1e-12));

    manager.undo().unwrap();
    assert_eq!(param.value().as_xfo(), Some(Xfo::IDENTITY));
}

#[test]
fn test_scale_below_minimum_is_skipped() {
    let mut manager = UndoRedoManager::new();
    let (mut handle, param) = setup(Xfo::IDENTITY);

    handle
        .on_drag_start(&mut manager, &DragEvent::at(DVec3::new(0.0, 0.0, 1.0)))
        .unwrap();
    handle
        .on_drag(&mut manager, &DragEvent::at(DVec3::new(0.0, 0.0, 0.5)))
        .unwrap();
    // Crossing the pivot would invert the target
    handle
        .on_drag(&mut manager, &DragEvent::at(DVec3::new(0.0, 0.0, -1.0)))
        .unwrap();
    assert_eq!(handle.scale(), Some(0.5));
    handle
        .on_drag_end(&mut manager, &DragEvent::at(DVec3::new(0.0, 0.0, -1.0)))
        .unwrap();

    let scaled = param.value().as_xfo().unwrap();
    assert!(scaled.sc.abs_diff_eq(DVec3::splat(0.5), 1e-12));
}

#[test]
fn test_grab_at_pivot_never_scales() {
    let mut manager = UndoRedoManager::new();
    let (mut handle, param) = setup(Xfo::IDENTITY);

    handle
        .on_drag_start(&mut manager, &DragEvent::at(DVec3::ZERO))
        .unwrap();
    handle
        .on_drag(&mut manager, &DragEvent::at(DVec3::Z))
        .unwrap();
    handle
        .on_drag_end(&mut manager, &DragEvent::at(DVec3::Z))
        .unwrap();

    assert_eq!(manager.undo_count(), 0);
    assert_eq!(param.value().as_xfo(), Some(Xfo::IDENTITY));
}

#[test]
fn test_scale_about_offset_pivot() {
    let mut manager = UndoRedoManager::new();
    let param = Parameter::new("GlobalXfo", Xfo::from_translation(DVec3::new(1.0, 0.0, 0.0)));
    let mut handle = LinearScaleHandle::new("Scale", &HandleSettings::default());
    // Handle sits at the origin, the target one unit away
    handle
        .base_mut()
        .set_target_param(param.clone(), false)
        .unwrap();

    handle
        .on_drag_start(&mut manager, &DragEvent::at(DVec3::Z))
        .unwrap();
    handle
        .on_drag(&mut manager, &DragEvent::at(DVec3::new(0.0, 0.0, 3.0)))
        .unwrap();
    handle
        .on_drag_end(&mut manager, &DragEvent::at(DVec3::new(0.0, 0.0, 3.0)))
        .unwrap();

    let scaled = param.value().as_xfo().unwrap();
    assert!(scaled.tr.abs_diff_eq(DVec3::new(3.0, 0.0, 0.0), 1e-12));
    assert!(scaled.sc.abs_diff_eq(DVec3::splat(3.0), 1e-12));
}
