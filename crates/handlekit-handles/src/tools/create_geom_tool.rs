//! Interactive creation of primitives.

use super::event::{ControllerId, PointerButton, PointerEvent, PointerSource, Propagation};
use super::Tool;
use crate::error::{ToolError, ToolResult};
use handlekit_core::{Color, DVec3, TreeItemRef, Xfo};
use handlekit_settings::ToolSettings;
use handlekit_undo::{
    ChangeUpdate, CreateGeomChange, GeomKind, GeomShape, Transaction, UndoRedoManager,
};

/// Where a creation is in its press/drag/release cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateStage {
    Idle,
    /// Dragging out the primitive's base (or its only dimension)
    Base,
    /// Cuboids only: raising the height after the base was released
    Height,
}

#[derive(Debug)]
struct Placement {
    transaction: Transaction,
    origin: Xfo,
    /// `origin` in the parent's frame
    local_origin: Xfo,
    shape: GeomShape,
    height_from: Option<DVec3>,
}

/// Creates one primitive per press/drag/release.
///
/// Pressing starts a [`CreateGeomChange`] at the construction point, moving
/// updates its dimensions and releasing commits it. A primitive released
/// with no extent is cancelled and leaves no history. The secondary button
/// cancels a creation in progress.
///
/// Dimensions per kind, measured from the press point:
/// - line: the segment to the pointer
/// - sphere and circle: the distance to the pointer as radius
/// - rect: grows symmetrically about the press point
/// - cuboid: the base spans press point to pointer; after release the
///   distance from the release point sets the height until the next release
#[derive(Debug)]
pub struct CreateGeomTool {
    kind: GeomKind,
    parent: TreeItemRef,
    color: Color,
    line_thickness: f64,
    construction_plane: Xfo,
    placement: Option<Placement>,
    active_controller: Option<ControllerId>,
}

impl CreateGeomTool {
    pub fn new(kind: GeomKind, parent: TreeItemRef, settings: &ToolSettings) -> Self {
        Self {
            kind,
            parent,
            color: Color::from_array(settings.default_color),
            line_thickness: settings.line_thickness,
            construction_plane: Xfo::IDENTITY,
            placement: None,
            active_controller: None,
        }
    }

    pub fn kind(&self) -> GeomKind {
        self.kind
    }

    pub fn stage(&self) -> CreateStage {
        match &self.placement {
            None => CreateStage::Idle,
            Some(p) if p.height_from.is_some() => CreateStage::Height,
            Some(_) => CreateStage::Base,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn line_thickness(&self) -> f64 {
        self.line_thickness
    }

    pub fn set_line_thickness(&mut self, thickness: f64) {
        self.line_thickness = thickness;
    }

    /// Orientation given to created items; only its rotation is used
    pub fn set_construction_plane(&mut self, plane: Xfo) {
        self.construction_plane = plane;
    }

    /// Dimensions of the primitive being placed
    pub fn shape(&self) -> Option<GeomShape> {
        self.placement.as_ref().map(|p| p.shape)
    }

    /// Create the item at `xfo` and open its transaction
    pub fn create_start(&mut self, manager: &mut UndoRedoManager, xfo: Xfo) -> ToolResult<()> {
        if self.placement.is_some() {
            return Err(ToolError::AlreadyCreating {
                kind: self.kind.label().to_string(),
            });
        }
        let change = CreateGeomChange::new(self.kind, self.parent.clone(), xfo, self.color)?;
        let transaction = manager.begin_transaction(Box::new(change))?;
        let local_origin = self.parent.global_xfo().inverse().multiply(&xfo);
        let mut placement = Placement {
            transaction,
            origin: xfo,
            local_origin,
            shape: self.kind.default_shape(),
            height_from: None,
        };
        placement.shape = self.shape_at(&placement, xfo.tr);
        placement
            .transaction
            .update(manager, ChangeUpdate::Geometry(placement.shape))?;
        tracing::debug!("Creating {} at {:?}", self.kind, xfo.tr);
        self.placement = Some(placement);
        Ok(())
    }

    /// Resize the primitive towards `pt`. Ignored while idle.
    pub fn create_move(&mut self, manager: &mut UndoRedoManager, pt: DVec3) -> ToolResult<()> {
        let Some(placement) = &self.placement else {
            return Ok(());
        };
        let shape = self.shape_at(placement, pt);
        placement
            .transaction
            .update(manager, ChangeUpdate::Geometry(shape))?;
        if let Some(placement) = &mut self.placement {
            placement.shape = shape;
        }
        Ok(())
    }

    /// Finish the current stage at `pt`
    pub fn create_release(&mut self, manager: &mut UndoRedoManager, pt: DVec3) -> ToolResult<()> {
        if self.placement.is_none() {
            return Ok(());
        }
        self.create_move(manager, pt)?;
        let Some(placement) = self.placement.take() else {
            return Ok(());
        };

        let degenerate = placement.shape.is_degenerate();
        if self.kind == GeomKind::Cuboid && placement.height_from.is_none() && !degenerate {
            self.placement = Some(Placement {
                height_from: Some(pt),
                ..placement
            });
            return Ok(());
        }

        if degenerate {
            placement.transaction.cancel(manager)?;
            tracing::debug!("Discarded empty {}", self.kind);
        } else {
            placement.transaction.commit(manager)?;
            tracing::debug!("Created {}", self.kind);
        }
        Ok(())
    }

    /// Drop the primitive being placed. Returns false if idle.
    pub fn cancel(&mut self, manager: &mut UndoRedoManager) -> ToolResult<bool> {
        self.active_controller = None;
        match self.placement.take() {
            Some(placement) => {
                placement.transaction.cancel(manager)?;
                tracing::debug!("Cancelled {} creation", self.kind);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn start_xfo(&self, pos: DVec3) -> Xfo {
        Xfo {
            tr: pos,
            ..self.construction_plane
        }
    }

    fn shape_at(&self, placement: &Placement, pt: DVec3) -> GeomShape {
        let local = placement.origin.inverse().transform_point(pt);
        let radius = pt.distance(placement.origin.tr);
        match self.kind {
            GeomKind::Line => GeomShape::Line {
                p1: local,
                thickness: self.line_thickness,
            },
            GeomKind::Sphere => GeomShape::Sphere { radius },
            GeomKind::Circle => GeomShape::Circle { radius },
            GeomKind::Rect => GeomShape::Rect {
                base_size: [local.x.abs() * 2.0, local.y.abs() * 2.0],
            },
            GeomKind::Cuboid => match (placement.height_from, placement.shape) {
                (
                    Some(from),
                    GeomShape::Cuboid {
                        base_size, tr, ..
                    },
                ) => GeomShape::Cuboid {
                    base_size,
                    height: pt.distance(from),
                    tr,
                },
                _ => {
                    let centre = DVec3::new(local.x * 0.5, local.y * 0.5, 0.0);
                    GeomShape::Cuboid {
                        base_size: [local.x.abs(), local.y.abs()],
                        height: 0.0,
                        tr: Some(placement.local_origin.transform_point(centre)),
                    }
                }
            },
        }
    }
}

impl Tool for CreateGeomTool {
    fn deactivate(&mut self, manager: &mut UndoRedoManager) -> ToolResult<()> {
        self.cancel(manager)?;
        Ok(())
    }

    fn on_pointer_down(
        &mut self,
        manager: &mut UndoRedoManager,
        event: &mut PointerEvent,
    ) -> ToolResult<()> {
        match event.source {
            PointerSource::Controller { id, tip_xfo } => {
                if event.button == PointerButton::Primary
                    && self.active_controller.is_none()
                    && self.placement.is_none()
                {
                    self.active_controller = Some(id);
                    self.create_start(manager, self.start_xfo(tip_xfo.tr))?;
                }
                event.stop_propagation();
            }
            PointerSource::Mouse | PointerSource::Touch => {
                // Alt leaves the event to the camera
                if event.alt_key {
                    return Ok(());
                }
                let primary = event.button == PointerButton::Primary
                    || event.source == PointerSource::Touch;
                if self.placement.is_none() {
                    if primary {
                        self.create_start(manager, self.start_xfo(event.position))?;
                    }
                } else if event.button == PointerButton::Secondary {
                    self.cancel(manager)?;
                }
                event.stop_propagation();
            }
        }
        Ok(())
    }

    fn on_pointer_move(
        &mut self,
        manager: &mut UndoRedoManager,
        event: &mut PointerEvent,
    ) -> ToolResult<()> {
        if self.placement.is_none() {
            return Ok(());
        }
        if let Some(id) = event.controller_id() {
            if self.active_controller != Some(id) {
                return Ok(());
            }
        }
        self.create_move(manager, event.position)?;
        event.stop_propagation();
        Ok(())
    }

    fn on_pointer_up(
        &mut self,
        manager: &mut UndoRedoManager,
        event: &mut PointerEvent,
    ) -> ToolResult<()> {
        if self.placement.is_none() {
            return Ok(());
        }
        if let Some(id) = event.controller_id() {
            if self.active_controller != Some(id) {
                return Ok(());
            }
        }
        self.create_release(manager, event.position)?;
        if self.placement.is_none() {
            self.active_controller = None;
        }
        event.stop_propagation();
        Ok(())
    }
}
