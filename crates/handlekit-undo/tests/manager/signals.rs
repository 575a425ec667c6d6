use handlekit_core::{Parameter, Value};
use handlekit_undo::{ChangeUpdate, ParameterValueChange, UndoRedoManager};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_notifications_follow_stack_mutations() {
    let param = Parameter::new("Radius", 1.0);
    let mut manager = UndoRedoManager::new();
    let log = Rc::new(RefCell::new(Vec::<String>::new()));

    let l = log.clone();
    manager
        .change_added()
        .subscribe(move |s| l.borrow_mut().push(format!("added {}", s.name)));
    let l = log.clone();
    manager.change_updated().subscribe(move |u| {
        let value = match &u.update {
            ChangeUpdate::Value(v) => v.as_number().unwrap_or_default(),
            _ => f64::NAN,
        };
        l.borrow_mut().push(format!("updated {} {}", u.change.name, value))
    });
    let l = log.clone();
    manager
        .change_undone()
        .subscribe(move |s| l.borrow_mut().push(format!("undone {} {}", s.name, s.done)));
    let l = log.clone();
    manager
        .change_redone()
        .subscribe(move |s| l.borrow_mut().push(format!("redone {} {}", s.name, s.done)));
    let l = log.clone();
    manager
        .change_cancelled()
        .subscribe(move |s| l.borrow_mut().push(format!("cancelled {}", s.name)));

    let change = ParameterValueChange::new(param.clone(), None).unwrap();
    manager.add_change(Box::new(change)).unwrap();
    manager
        .update_change(ChangeUpdate::Value(Value::Number(4.0)))
        .unwrap();
    manager.undo().unwrap();
    manager.redo().unwrap();
    manager.cancel();

    assert_eq!(
        *log.borrow(),
        vec![
            "added Radius Changed",
            "updated Radius Changed 4",
            "undone Radius Changed false",
            "redone Radius Changed true",
            "cancelled Radius Changed",
        ]
    );
}

#[test]
fn test_unsubscribed_observer_is_not_called() {
    let mut manager = UndoRedoManager::new();
    let calls = Rc::new(RefCell::new(0));
    let c = calls.clone();
    let id = manager.change_added().subscribe(move |_| *c.borrow_mut() += 1);

    let change = ParameterValueChange::new(Parameter::new("A", 0.0), None).unwrap();
    manager.add_change(Box::new(change)).unwrap();
    assert!(manager.change_added().unsubscribe(id));

    let change = ParameterValueChange::new(Parameter::new("B", 0.0), None).unwrap();
    manager.add_change(Box::new(change)).unwrap();
    assert_eq!(*calls.borrow(), 1);
}
