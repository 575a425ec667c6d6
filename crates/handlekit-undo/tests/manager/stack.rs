use handlekit_core::{Parameter, ParameterRef, Value};
use handlekit_undo::{ParameterValueChange, UndoRedoManager};

fn set(param: &ParameterRef, value: f64) -> Box<ParameterValueChange> {
    Box::new(ParameterValueChange::new(param.clone(), Some(Value::Number(value))).unwrap())
}

#[test]
fn test_manager_creation() {
    let manager = UndoRedoManager::new();
    assert!(!manager.can_undo());
    assert!(!manager.can_redo());
    assert_eq!(manager.undo_count(), 0);
    assert_eq!(manager.redo_count(), 0);
    assert_eq!(manager.max_depth(), 100);
}

#[test]
fn test_empty_stack_operations_are_no_ops() {
    let mut manager = UndoRedoManager::new();
    assert_eq!(manager.undo(), Ok(false));
    assert_eq!(manager.redo(), Ok(false));
    assert!(!manager.cancel());
    assert!(!manager
        .update_change(handlekit_undo::ChangeUpdate::Value(Value::Number(1.0)))
        .unwrap());
}

#[test]
fn test_undo_then_redo_round_trip() {
    let param = Parameter::new("Opacity", 0.25);
    let mut manager = UndoRedoManager::new();
    manager.add_change(set(&param, 0.75)).unwrap();

    assert!(manager.undo().unwrap());
    assert_eq!(param.value(), Value::Number(0.25));
    assert!(manager.redo().unwrap());
    assert_eq!(param.value(), Value::Number(0.75));
}

#[test]
fn test_undo_restores_exact_bits() {
    let initial = 0.1 + 0.2;
    let param = Parameter::new("Offset", initial);
    let mut manager = UndoRedoManager::new();
    manager.add_change(set(&param, 1.0 / 3.0)).unwrap();
    manager.undo().unwrap();

    let restored = param.value().as_number().unwrap();
    assert_eq!(restored.to_bits(), initial.to_bits());
}

#[test]
fn test_add_clears_redo() {
    let param = Parameter::new("Width", 1.0);
    let mut manager = UndoRedoManager::new();
    manager.add_change(set(&param, 2.0)).unwrap();
    manager.undo().unwrap();
    assert!(manager.can_redo());

    manager.add_change(set(&param, 3.0)).unwrap();
    assert!(!manager.can_redo());
    assert_eq!(manager.redo(), Ok(false));
    assert_eq!(param.value(), Value::Number(3.0));
}

#[test]
fn test_cancel_bypasses_redo() {
    let param = Parameter::new("Width", 1.0);
    let mut manager = UndoRedoManager::new();
    manager.add_change(set(&param, 2.0)).unwrap();

    assert!(manager.cancel());
    assert_eq!(param.value(), Value::Number(1.0));
    assert_eq!(manager.undo_count(), 0);
    assert_eq!(manager.redo_count(), 0);
    assert_eq!(manager.redo(), Ok(false));
}

#[test]
fn test_two_changes_undo_undo_redo() {
    let a = Parameter::new("A", 0.0);
    let b = Parameter::new("B", 0.0);
    let mut manager = UndoRedoManager::new();
    manager.add_change(set(&a, 1.0)).unwrap();
    manager.add_change(set(&b, 1.0)).unwrap();

    manager.undo().unwrap();
    manager.undo().unwrap();
    manager.redo().unwrap();

    assert_eq!(a.value(), Value::Number(1.0));
    assert_eq!(b.value(), Value::Number(0.0));
    let redo = manager.redo_history();
    assert_eq!(redo.len(), 1);
    assert_eq!(redo[0].name, "B Changed");
    assert!(!redo[0].done);
}

#[test]
fn test_max_depth_limit() {
    let param = Parameter::new("Step", 0.0);
    let mut manager = UndoRedoManager::with_depth(3);
    for i in 1..=5 {
        manager.add_change(set(&param, i as f64)).unwrap();
    }
    assert_eq!(manager.undo_count(), 3);

    while manager.undo().unwrap() {}
    // The two oldest changes were evicted, so their effect stays
    assert_eq!(param.value(), Value::Number(2.0));
}

#[test]
fn test_zero_depth_is_unbounded() {
    let param = Parameter::new("Step", 0.0);
    let mut manager = UndoRedoManager::with_depth(0);
    for i in 0..250 {
        manager.add_change(set(&param, i as f64)).unwrap();
    }
    assert_eq!(manager.undo_count(), 250);

    manager.set_max_depth(10);
    assert_eq!(manager.undo_count(), 10);
}

#[test]
fn test_clear_history() {
    let param = Parameter::new("Step", 0.0);
    let mut manager = UndoRedoManager::new();
    manager.add_change(set(&param, 1.0)).unwrap();
    manager.add_change(set(&param, 2.0)).unwrap();
    manager.undo().unwrap();

    manager.clear();
    assert!(!manager.can_undo());
    assert!(!manager.can_redo());
    // Clearing does not touch the scene
    assert_eq!(param.value(), Value::Number(1.0));
}

#[test]
fn test_history_and_top() {
    let param = Parameter::new("Radius", 1.0);
    let mut manager = UndoRedoManager::new();
    assert!(manager.top().is_none());

    manager.add_change(set(&param, 2.0)).unwrap();
    let history = manager.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].type_name, "ParameterValueChange");
    assert_eq!(history[0].to_string(), "Radius Changed (ParameterValueChange)");
    assert_eq!(manager.top().map(|c| c.name()), Some("Radius Changed"));
}
