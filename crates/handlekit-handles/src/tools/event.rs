//! Input events delivered to tools.

use handlekit_core::{DVec3, TreeItemRef, Xfo};

/// Identity of a VR controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControllerId(pub u32);

impl std::fmt::Display for ControllerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "controller {}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left mouse button, touch contact or controller trigger
    Primary,
    Middle,
    /// Right mouse button
    Secondary,
}

/// Device an event came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerSource {
    Mouse,
    Touch,
    Controller { id: ControllerId, tip_xfo: Xfo },
}

/// Events that can be consumed by one tool
pub trait Propagation {
    fn is_propagating(&self) -> bool;

    fn stop_propagation(&mut self);
}

/// A pointer press, move or release.
///
/// `position` is the point the host resolved for the pointer: a hit on the
/// scene or the construction plane for mice and touches, the tip of the
/// controller for VR. `hit_item` is the scene item under the pointer, if any.
#[derive(Debug, Clone)]
pub struct PointerEvent {
    pub source: PointerSource,
    pub button: PointerButton,
    pub position: DVec3,
    pub hit_item: Option<TreeItemRef>,
    pub alt_key: bool,
    pub shift_key: bool,
    propagating: bool,
}

impl PointerEvent {
    pub fn new(source: PointerSource, button: PointerButton, position: DVec3) -> Self {
        Self {
            source,
            button,
            position,
            hit_item: None,
            alt_key: false,
            shift_key: false,
            propagating: true,
        }
    }

    pub fn mouse(button: PointerButton, position: DVec3) -> Self {
        Self::new(PointerSource::Mouse, button, position)
    }

    pub fn touch(position: DVec3) -> Self {
        Self::new(PointerSource::Touch, PointerButton::Primary, position)
    }

    pub fn controller(id: ControllerId, button: PointerButton, tip_xfo: Xfo) -> Self {
        Self::new(
            PointerSource::Controller { id, tip_xfo },
            button,
            tip_xfo.tr,
        )
    }

    pub fn with_hit(mut self, item: TreeItemRef) -> Self {
        self.hit_item = Some(item);
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt_key = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift_key = true;
        self
    }

    /// The controller behind this event, if any
    pub fn controller_id(&self) -> Option<ControllerId> {
        match self.source {
            PointerSource::Controller { id, .. } => Some(id),
            _ => None,
        }
    }
}

impl Propagation for PointerEvent {
    fn is_propagating(&self) -> bool {
        self.propagating
    }

    fn stop_propagation(&mut self) {
        self.propagating = false;
    }
}

/// Where one controller is and what its pointer ray hits
#[derive(Debug, Clone)]
pub struct ControllerPose {
    pub id: ControllerId,
    pub tip_xfo: Xfo,
    pub item_at_tip: Option<TreeItemRef>,
}

impl ControllerPose {
    pub fn new(id: ControllerId, tip_xfo: Xfo) -> Self {
        Self {
            id,
            tip_xfo,
            item_at_tip: None,
        }
    }

    pub fn pointing_at(mut self, item: TreeItemRef) -> Self {
        self.item_at_tip = Some(item);
        self
    }
}

/// Poses of every tracked controller
#[derive(Debug, Clone)]
pub struct PoseEvent {
    pub controllers: Vec<ControllerPose>,
    propagating: bool,
}

impl PoseEvent {
    pub fn new(controllers: Vec<ControllerPose>) -> Self {
        Self {
            controllers,
            propagating: true,
        }
    }
}

impl Propagation for PoseEvent {
    fn is_propagating(&self) -> bool {
        self.propagating
    }

    fn stop_propagation(&mut self) {
        self.propagating = false;
    }
}
