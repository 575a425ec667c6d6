//! Stack of active tools with top-down event propagation.

use super::event::{PointerEvent, PoseEvent, Propagation};
use super::Tool;
use crate::error::{ToolError, ToolResult};
use handlekit_undo::UndoRedoManager;
use std::collections::HashMap;

/// Registered tools plus the stack of active ones.
///
/// Events go to the top of the stack first and continue downwards until a
/// tool stops their propagation.
#[derive(Default)]
pub struct ToolManager {
    tools: HashMap<String, Box<dyn Tool>>,
    stack: Vec<String>,
}

impl ToolManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `tool` under `name`, replacing any tool of that name
    pub fn register_tool(&mut self, name: impl Into<String>, tool: Box<dyn Tool>) {
        let name = name.into();
        if self.tools.insert(name.clone(), tool).is_some() {
            tracing::warn!("Tool '{}' replaced", name);
        }
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Activate a registered tool on top of the stack
    pub fn push_tool(&mut self, name: &str) -> ToolResult<()> {
        let tool = self
            .tools
            .get_mut(name)
            .ok_or_else(|| ToolError::ToolNotFound {
                name: name.to_string(),
            })?;
        tool.activate();
        self.stack.push(name.to_string());
        tracing::debug!("Pushed tool '{}'", name);
        Ok(())
    }

    /// Deactivate and remove the top tool, returning its name
    pub fn pop_tool(&mut self, manager: &mut UndoRedoManager) -> ToolResult<String> {
        let name = self.stack.pop().ok_or(ToolError::StackEmpty)?;
        if let Some(tool) = self.tools.get_mut(&name) {
            tool.deactivate(manager)?;
        }
        tracing::debug!("Popped tool '{}'", name);
        Ok(name)
    }

    pub fn active_tool_name(&self) -> Option<&str> {
        self.stack.last().map(String::as_str)
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns true if a tool consumed the event
    pub fn on_pointer_down(
        &mut self,
        manager: &mut UndoRedoManager,
        event: &mut PointerEvent,
    ) -> ToolResult<bool> {
        self.dispatch(event, |tool, event| tool.on_pointer_down(manager, event))
    }

    pub fn on_pointer_move(
        &mut self,
        manager: &mut UndoRedoManager,
        event: &mut PointerEvent,
    ) -> ToolResult<bool> {
        self.dispatch(event, |tool, event| tool.on_pointer_move(manager, event))
    }

    pub fn on_pointer_up(
        &mut self,
        manager: &mut UndoRedoManager,
        event: &mut PointerEvent,
    ) -> ToolResult<bool> {
        self.dispatch(event, |tool, event| tool.on_pointer_up(manager, event))
    }

    pub fn on_pose_changed(
        &mut self,
        manager: &mut UndoRedoManager,
        event: &mut PoseEvent,
    ) -> ToolResult<bool> {
        self.dispatch(event, |tool, event| tool.on_pose_changed(manager, event))
    }

    fn dispatch<E, F>(&mut self, event: &mut E, mut deliver: F) -> ToolResult<bool>
    where
        E: Propagation,
        F: FnMut(&mut dyn Tool, &mut E) -> ToolResult<()>,
    {
        for name in self.stack.iter().rev() {
            let Some(tool) = self.tools.get_mut(name) else {
                continue;
            };
            deliver(tool.as_mut(), event)?;
            if !event.is_propagating() {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl std::fmt::Debug for ToolManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.tools.keys().collect();
        names.sort();
        f.debug_struct("ToolManager")
            .field("tools", &names)
            .field("stack", &self.stack)
            .finish()
    }
}
