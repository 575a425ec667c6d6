use handlekit_core::{ChildEvent, Parameter, TreeItem, Value};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_child_signals_report_index_and_name() {
    let root = TreeItem::new("root");
    let events = Rc::new(RefCell::new(Vec::new()));

    let added = events.clone();
    root.child_added()
        .subscribe(move |e: &ChildEvent| added.borrow_mut().push(("added", e.clone())));
    let removed = events.clone();
    root.child_removed()
        .subscribe(move |e: &ChildEvent| removed.borrow_mut().push(("removed", e.clone())));

    root.add_child(TreeItem::new("Line")).unwrap();
    root.insert_child(0, TreeItem::new("Sphere")).unwrap();
    root.remove_child(1).unwrap();

    let events = events.borrow();
    assert_eq!(events.len(), 3);
    assert_eq!(
        events[1],
        (
            "added",
            ChildEvent {
                index: 0,
                child_name: "Sphere".to_string()
            }
        )
    );
    assert_eq!(
        events[2],
        (
            "removed",
            ChildEvent {
                index: 1,
                child_name: "Line".to_string()
            }
        )
    );
}

#[test]
fn test_handler_can_read_parameter_during_emit() {
    let param = Parameter::new("Radius", 1.0);
    let seen = Rc::new(RefCell::new(None));

    let seen_clone = seen.clone();
    let param_clone = param.clone();
    param.value_changed().subscribe(move |_| {
        *seen_clone.borrow_mut() = param_clone.value().as_number();
    });

    param.set_value(Value::Number(4.0)).unwrap();
    assert_eq!(*seen.borrow(), Some(4.0));
}

#[test]
fn test_rename_notifies() {
    let item = TreeItem::new("Cuboid");
    let names = Rc::new(RefCell::new(Vec::new()));
    let names_clone = names.clone();
    item.name_changed()
        .subscribe(move |name: &String| names_clone.borrow_mut().push(name.clone()));

    item.set_name("Box");
    assert_eq!(item.name(), "Box");
    assert_eq!(*names.borrow(), vec!["Box".to_string()]);
}
