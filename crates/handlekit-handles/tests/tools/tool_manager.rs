use handlekit_core::{shared, DVec3, Shared, TreeItem};
use handlekit_handles::{
    CreateGeomTool, PointerButton, PointerEvent, Propagation, Tool, ToolError, ToolManager,
    ToolResult,
};
use handlekit_settings::ToolSettings;
use handlekit_undo::{GeomKind, UndoRedoManager};

struct RecordingTool {
    name: &'static str,
    consume: bool,
    log: Shared<Vec<String>>,
}

impl RecordingTool {
    fn boxed(name: &'static str, consume: bool, log: &Shared<Vec<String>>) -> Box<dyn Tool> {
        Box::new(Self {
            name,
            consume,
            log: log.clone(),
        })
    }
}

impl Tool for RecordingTool {
    fn activate(&mut self) {
        self.log.borrow_mut().push(format!("{} activate", self.name));
    }

    fn deactivate(&mut self, _manager: &mut UndoRedoManager) -> ToolResult<()> {
        self.log.borrow_mut().push(format!("{} deactivate", self.name));
        Ok(())
    }

    fn on_pointer_down(
        &mut self,
        _manager: &mut UndoRedoManager,
        event: &mut PointerEvent,
    ) -> ToolResult<()> {
        self.log.borrow_mut().push(format!("{} down", self.name));
        if self.consume {
            event.stop_propagation();
        }
        Ok(())
    }
}

fn click() -> PointerEvent {
    PointerEvent::mouse(PointerButton::Primary, DVec3::ZERO)
}

#[test]
fn test_events_reach_top_tool_first() {
    let log = shared(Vec::new());
    let mut manager = UndoRedoManager::new();
    let mut tools = ToolManager::new();
    tools.register_tool("lower", RecordingTool::boxed("lower", false, &log));
    tools.register_tool("upper", RecordingTool::boxed("upper", false, &log));
    tools.push_tool("lower").unwrap();
    tools.push_tool("upper").unwrap();

    let consumed = tools.on_pointer_down(&mut manager, &mut click()).unwrap();
    assert!(!consumed);
    assert_eq!(
        *log.borrow(),
        vec!["lower activate", "upper activate", "upper down", "lower down"]
    );
}

#[test]
fn test_consumed_event_stops_descending() {
    let log = shared(Vec::new());
    let mut manager = UndoRedoManager::new();
    let mut tools = ToolManager::new();
    tools.register_tool("lower", RecordingTool::boxed("lower", false, &log));
    tools.register_tool("upper", RecordingTool::boxed("upper", true, &log));
    tools.push_tool("lower").unwrap();
    tools.push_tool("upper").unwrap();
    log.borrow_mut().clear();

    let mut event = click();
    assert!(tools.on_pointer_down(&mut manager, &mut event).unwrap());
    assert!(!event.is_propagating());
    assert_eq!(*log.borrow(), vec!["upper down"]);
}

#[test]
fn test_stack_bookkeeping() {
    let log = shared(Vec::new());
    let mut manager = UndoRedoManager::new();
    let mut tools = ToolManager::new();
    tools.register_tool("only", RecordingTool::boxed("only", false, &log));

    assert!(matches!(
        tools.push_tool("missing"),
        Err(ToolError::ToolNotFound { .. })
    ));
    tools.push_tool("only").unwrap();
    assert_eq!(tools.active_tool_name(), Some("only"));
    assert_eq!(tools.stack_depth(), 1);

    assert_eq!(tools.pop_tool(&mut manager).unwrap(), "only");
    assert!(log.borrow().contains(&"only deactivate".to_string()));
    assert!(matches!(
        tools.pop_tool(&mut manager),
        Err(ToolError::StackEmpty)
    ));
    assert!(tools.active_tool_name().is_none());
}

#[test]
fn test_popping_creation_tool_discards_placement() {
    let root = TreeItem::new("root");
    let mut manager = UndoRedoManager::new();
    let mut tools = ToolManager::new();
    tools.register_tool(
        "sphere",
        Box::new(CreateGeomTool::new(
            GeomKind::Sphere,
            root.clone(),
            &ToolSettings::default(),
        )),
    );
    tools.push_tool("sphere").unwrap();

    tools.on_pointer_down(&mut manager, &mut click()).unwrap();
    assert!(manager.is_transaction_open());
    assert_eq!(root.child_count(), 1);

    tools.pop_tool(&mut manager).unwrap();
    assert!(!manager.is_transaction_open());
    assert_eq!(root.child_count(), 0);
    assert_eq!(manager.undo_count(), 0);
}
