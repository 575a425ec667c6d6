//! Grabbing and moving items with VR controllers.

use super::event::{ControllerId, PointerButton, PointerEvent, PointerSource, PoseEvent, Propagation};
use super::Tool;
use crate::error::ToolResult;
use handlekit_core::{DQuat, DVec3, TreeItemRef, Xfo};
use handlekit_settings::ToolSettings;
use handlekit_undo::{ChangeUpdate, HoldObjectsChange, Transaction, UndoRedoManager};
use std::collections::HashMap;
use std::rc::Rc;

/// Transform of the grip formed by one or two controller tips.
///
/// One tip grips with its own transform. Two tips grip at their midpoint
/// with the averaged orientation turned so its X axis runs along the line
/// between them; pulling the hands apart or twisting them rotates the grip.
/// Tips past the second are ignored.
pub fn compute_grab_xfo(tips: &[Xfo]) -> Option<Xfo> {
    match tips {
        [] => None,
        [tip] => Some(*tip),
        [a, b, ..] => {
            let mut ori_b = b.ori;
            if a.ori.dot(ori_b) < 0.0 {
                ori_b = -ori_b;
            }
            let tr = a.tr.lerp(b.tr, 0.5);
            let mut ori = a.ori.lerp(ori_b, 0.5).normalize();

            let mut vec0 = (b.tr - a.tr).normalize_or_zero();
            let vec1 = ori * DVec3::X;
            if vec0.dot(vec1) < 0.0 {
                vec0 = -vec0;
            }
            let angle = vec1.angle_between(vec0);
            let axis = vec1.cross(vec0).normalize_or_zero();
            if vec0 != DVec3::ZERO && angle > 0.0 && axis != DVec3::ZERO {
                ori = DQuat::from_axis_angle(axis, angle) * ori;
            }
            Some(Xfo::new(tr, ori, DVec3::ONE))
        }
    }
}

#[derive(Debug)]
struct HeldItem {
    item: TreeItemRef,
    /// Controllers gripping the item, in the order they grabbed it
    refs: Vec<ControllerId>,
    /// Item transform relative to the grip
    offset: Xfo,
}

/// Moves items while controllers hold them.
///
/// Each held item occupies a slot of one [`HoldObjectsChange`]. The change
/// opens with the first grab and commits once every controller has let go,
/// so grabbing, passing between hands and releasing is a single undo step.
#[derive(Debug)]
pub struct HoldObjectsTool {
    raycast_dist: f64,
    tree_walk_steps: usize,
    tips: HashMap<ControllerId, Xfo>,
    targeted: HashMap<ControllerId, TreeItemRef>,
    held: Vec<Option<HeldItem>>,
    /// Item of every slot opened this session, including released ones
    slot_items: Vec<TreeItemRef>,
    slots: HashMap<ControllerId, usize>,
    transaction: Option<Transaction>,
}

impl HoldObjectsTool {
    pub fn new(settings: &ToolSettings) -> Self {
        Self {
            raycast_dist: settings.hold_raycast_dist,
            tree_walk_steps: 1,
            tips: HashMap::new(),
            targeted: HashMap::new(),
            held: Vec::new(),
            slot_items: Vec::new(),
            slots: HashMap::new(),
            transaction: None,
        }
    }

    /// Distance the host's ray cast should reach when looking for items
    pub fn raycast_dist(&self) -> f64 {
        self.raycast_dist
    }

    pub fn tree_walk_steps(&self) -> usize {
        self.tree_walk_steps
    }

    /// How many levels above the pointed-at item are grabbed. The root is
    /// never grabbed.
    pub fn set_tree_walk_steps(&mut self, steps: usize) {
        self.tree_walk_steps = steps;
    }

    pub fn held_count(&self) -> usize {
        self.held.iter().flatten().count()
    }

    pub fn is_holding(&self) -> bool {
        self.transaction.is_some()
    }

    /// Item gripped by `controller`
    pub fn held_item(&self, controller: ControllerId) -> Option<&TreeItemRef> {
        let index = self.slots.get(&controller)?;
        self.held
            .get(*index)
            .and_then(Option::as_ref)
            .map(|held| &held.item)
    }

    /// Item `controller` would grab if pressed now
    pub fn targeted_item(&self, controller: ControllerId) -> Option<&TreeItemRef> {
        self.targeted.get(&controller)
    }

    fn grab_target(&self, item: &TreeItemRef) -> TreeItemRef {
        let mut target = item.clone();
        for _ in 0..self.tree_walk_steps {
            match target.parent() {
                Some(parent) if parent.parent().is_some() => target = parent,
                _ => break,
            }
        }
        target
    }

    fn grip(&self, held: &HeldItem) -> Option<Xfo> {
        let tips: Vec<Xfo> = held
            .refs
            .iter()
            .filter_map(|id| self.tips.get(id).copied())
            .collect();
        compute_grab_xfo(&tips)
    }

    /// Re-anchor every held item to its current grip
    fn init_action(&mut self) {
        let grips: Vec<Option<Xfo>> = self
            .held
            .iter()
            .map(|slot| slot.as_ref().and_then(|held| self.grip(held)))
            .collect();
        for (slot, grip) in self.held.iter_mut().zip(grips) {
            if let (Some(held), Some(grip)) = (slot, grip) {
                held.offset = grip.inverse().multiply(&held.item.global_xfo());
            }
        }
    }

    fn grab(
        &mut self,
        manager: &mut UndoRedoManager,
        id: ControllerId,
        item: TreeItemRef,
    ) -> ToolResult<()> {
        let existing = self
            .slot_items
            .iter()
            .position(|held| Rc::ptr_eq(held, &item));

        let index = match existing {
            Some(index) => {
                if let Some(slot) = self.held.get_mut(index) {
                    match slot {
                        Some(held) => held.refs.push(id),
                        None => {
                            tracing::debug!("{} grabbed '{}' again", id, item.name());
                            *slot = Some(HeldItem {
                                item,
                                refs: vec![id],
                                offset: Xfo::IDENTITY,
                            });
                        }
                    }
                }
                index
            }
            None => {
                let index = self.held.len();
                match &self.transaction {
                    Some(tx) => tx.update(
                        manager,
                        ChangeUpdate::HoldNewItem {
                            index,
                            item: item.clone(),
                        },
                    )?,
                    None => {
                        let change = HoldObjectsChange::with_item(index, item.clone());
                        self.transaction = Some(manager.begin_transaction(Box::new(change))?);
                    }
                }
                tracing::debug!("{} grabbed '{}'", id, item.name());
                self.slot_items.push(item.clone());
                self.held.push(Some(HeldItem {
                    item,
                    refs: vec![id],
                    offset: Xfo::IDENTITY,
                }));
                index
            }
        };
        self.slots.insert(id, index);
        self.init_action();
        Ok(())
    }

    fn release(&mut self, manager: &mut UndoRedoManager, id: ControllerId) -> ToolResult<()> {
        let Some(index) = self.slots.remove(&id) else {
            return Ok(());
        };
        if let Some(slot) = self.held.get_mut(index) {
            let emptied = slot.as_mut().is_some_and(|held| {
                held.refs.retain(|r| *r != id);
                held.refs.is_empty()
            });
            if emptied {
                if let Some(held) = slot.take() {
                    tracing::debug!("{} released '{}'", id, held.item.name());
                }
            }
        }
        self.init_action();

        if self.held.iter().all(Option::is_none) {
            self.held.clear();
            self.slot_items.clear();
            if let Some(tx) = self.transaction.take() {
                tx.commit(manager)?;
            }
        }
        Ok(())
    }

    /// Aim controllers that are not gripping anything
    fn update_targets(&mut self, event: &PoseEvent) {
        for pose in event.controllers.iter().filter(|p| !self.slots.contains_key(&p.id)) {
            match &pose.item_at_tip {
                Some(item) => {
                    let target = self.grab_target(item);
                    self.targeted.insert(pose.id, target);
                }
                None => {
                    self.targeted.remove(&pose.id);
                }
            }
        }
    }
}

impl Tool for HoldObjectsTool {
    fn deactivate(&mut self, manager: &mut UndoRedoManager) -> ToolResult<()> {
        self.slots.clear();
        self.held.clear();
        self.slot_items.clear();
        if let Some(tx) = self.transaction.take() {
            tx.commit(manager)?;
        }
        Ok(())
    }

    fn on_pointer_down(
        &mut self,
        manager: &mut UndoRedoManager,
        event: &mut PointerEvent,
    ) -> ToolResult<()> {
        let PointerSource::Controller { id, tip_xfo } = event.source else {
            return Ok(());
        };
        if event.button != PointerButton::Primary || self.slots.contains_key(&id) {
            return Ok(());
        }
        self.tips.insert(id, tip_xfo);
        let Some(item) = self.targeted.get(&id).cloned() else {
            return Ok(());
        };
        self.grab(manager, id, item)?;
        event.stop_propagation();
        Ok(())
    }

    fn on_pointer_up(
        &mut self,
        manager: &mut UndoRedoManager,
        event: &mut PointerEvent,
    ) -> ToolResult<()> {
        let PointerSource::Controller { id, tip_xfo } = event.source else {
            return Ok(());
        };
        if !self.slots.contains_key(&id) {
            return Ok(());
        }
        self.tips.insert(id, tip_xfo);
        self.release(manager, id)?;
        event.stop_propagation();
        Ok(())
    }

    fn on_pose_changed(
        &mut self,
        manager: &mut UndoRedoManager,
        event: &mut PoseEvent,
    ) -> ToolResult<()> {
        for pose in &event.controllers {
            self.tips.insert(pose.id, pose.tip_xfo);
        }
        self.update_targets(event);
        if self.transaction.is_none() {
            return Ok(());
        }

        let xfos: Vec<(usize, Xfo)> = self
            .held
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                let held = slot.as_ref()?;
                let grip = self.grip(held)?;
                Some((index, grip.multiply(&held.offset)))
            })
            .collect();
        if let Some(tx) = &self.transaction {
            tx.update(manager, ChangeUpdate::HoldXfos(xfos))?;
        }
        event.stop_propagation();
        Ok(())
    }
}
