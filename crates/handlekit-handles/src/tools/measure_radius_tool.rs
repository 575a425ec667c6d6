//! Measuring the radius of circles and cylinders.

use super::event::{PointerButton, PointerEvent, PointerSource, Propagation};
use super::Tool;
use crate::error::ToolResult;
use handlekit_core::{measure_radius, Color, DVec3, RadialFeature, TreeItemRef, Value};
use handlekit_settings::ToolSettings;
use handlekit_undo::{Measurement, MeasurementChange, UndoRedoManager, CURVE_TYPE_PARAM};

/// Names the surface an item is, e.g. `"Cylinder"`
pub const SURFACE_TYPE_PARAM: &str = "SurfaceType";

/// The radial feature `item` is, with its radius.
///
/// Circles carry `CurveType = "Circle"`, cylinders `SurfaceType = "Cylinder"`;
/// both need a numeric `Radius`.
pub fn radial_feature(item: &TreeItemRef) -> Option<(RadialFeature, f64)> {
    let is = |param: &str, value: &str| {
        item.parameter(param)
            .is_some_and(|p| p.value() == Value::String(value.to_string()))
    };
    let feature = if is(CURVE_TYPE_PARAM, "Circle") {
        RadialFeature::Circle
    } else if is(SURFACE_TYPE_PARAM, "Cylinder") {
        RadialFeature::Cylinder
    } else {
        return None;
    };
    let radius = item.parameter("Radius")?.value().as_number()?;
    Some((feature, radius))
}

/// Adds a radius measurement where a circle or cylinder is clicked.
///
/// Moving over a radial item highlights it; pressing on it adds a distance
/// measurement from its axis to its rim under the scene root, one undo
/// step per click.
#[derive(Debug)]
pub struct MeasureRadiusTool {
    root: TreeItemRef,
    color: Color,
    highlighted: Option<TreeItemRef>,
}

impl MeasureRadiusTool {
    pub fn new(root: TreeItemRef, settings: &ToolSettings) -> Self {
        Self {
            root,
            color: Color::from_array(settings.measure_color),
            highlighted: None,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Item a press would measure
    pub fn highlighted(&self) -> Option<&TreeItemRef> {
        self.highlighted.as_ref()
    }

    /// Measure `item` at `hit` and record the measurement.
    ///
    /// Returns false when `item` is not radial or `hit` lies on its axis.
    pub fn measure(
        &mut self,
        manager: &mut UndoRedoManager,
        item: &TreeItemRef,
        hit: DVec3,
    ) -> ToolResult<bool> {
        let Some((feature, radius)) = radial_feature(item) else {
            return Ok(false);
        };
        let Some((start, end)) = measure_radius(feature, &item.global_xfo(), radius, hit) else {
            tracing::debug!("No radius at the axis of '{}'", item.name());
            return Ok(false);
        };
        let measurement = Measurement::Distance { start, end };
        let change = MeasurementChange::new(self.root.clone(), measurement, self.color)?;
        manager.add_change(Box::new(change))?;
        Ok(true)
    }

    /// Alt leaves the event to the camera; mice measure with the primary button only
    fn ignores(event: &PointerEvent) -> bool {
        event.alt_key
            || (event.source == PointerSource::Mouse && event.button != PointerButton::Primary)
    }
}

impl Tool for MeasureRadiusTool {
    fn deactivate(&mut self, _manager: &mut UndoRedoManager) -> ToolResult<()> {
        self.highlighted = None;
        Ok(())
    }

    fn on_pointer_down(
        &mut self,
        manager: &mut UndoRedoManager,
        event: &mut PointerEvent,
    ) -> ToolResult<()> {
        if Self::ignores(event) || event.hit_item.is_none() {
            return Ok(());
        }
        let Some(item) = self.highlighted.clone() else {
            return Ok(());
        };
        if self.measure(manager, &item, event.position)? {
            self.highlighted = None;
            event.stop_propagation();
        }
        Ok(())
    }

    fn on_pointer_move(
        &mut self,
        _manager: &mut UndoRedoManager,
        event: &mut PointerEvent,
    ) -> ToolResult<()> {
        if Self::ignores(event) {
            return Ok(());
        }
        match &event.hit_item {
            Some(item) if radial_feature(item).is_some() => {
                self.highlighted = Some(item.clone());
            }
            Some(_) => {}
            None => self.highlighted = None,
        }
        Ok(())
    }
}
