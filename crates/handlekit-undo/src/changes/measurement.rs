//! Measurements placed in the scene.
//!
//! A measurement is an ordinary child item carrying its end points and the
//! measured value as parameters. Adding it is the change: undo detaches the
//! item and redo puts the same item back.

use crate::change::{Change, ChangeUpdate};
use crate::changes::create_geom::COLOR_PARAM;
use crate::error::{ChangeError, ChangeResult};
use crate::record::{ChangeContext, ChangeRecord};
use handlekit_core::{
    measure_angle, Color, DVec3, Parameter, ScenePath, TreeItem, TreeItemRef, Value, Xfo,
};
use serde::{Deserialize, Serialize};

pub const MEASUREMENT_CHANGE: &str = "MeasurementChange";

/// What was measured, in global coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Measurement {
    /// Straight distance between two points, also used for radii
    Distance { start: DVec3, end: DVec3 },
    /// Angle between two faces given by a point and a normal (Z) each
    Angle {
        #[serde(rename = "xfoA")]
        xfo_a: Xfo,
        #[serde(rename = "xfoB")]
        xfo_b: Xfo,
    },
}

impl Measurement {
    /// Base name of measurement items
    pub fn label(&self) -> &'static str {
        match self {
            Measurement::Distance { .. } => "MeasureDistance",
            Measurement::Angle { .. } => "MeasureAngle",
        }
    }

    /// Distance in scene units or angle in degrees. Angles between
    /// parallel faces have no value.
    pub fn value(&self) -> Option<f64> {
        match self {
            Measurement::Distance { start, end } => Some(start.distance(*end)),
            Measurement::Angle { xfo_a, xfo_b } => {
                measure_angle(xfo_a, xfo_b).map(|m| m.angle.to_degrees())
            }
        }
    }

    /// The value as it is labelled in the scene
    pub fn text(&self) -> String {
        match (self, self.value()) {
            (Measurement::Distance { .. }, Some(d)) => format!("{:.3}", d),
            (Measurement::Angle { .. }, Some(a)) => format!("{:.3} °", a),
            (_, None) => "-".to_string(),
        }
    }

    fn parameters(&self) -> Vec<(&'static str, Value)> {
        let mut params = match *self {
            Measurement::Distance { start, end } => {
                vec![("StartPos", Value::Vec3(start)), ("EndPos", Value::Vec3(end))]
            }
            Measurement::Angle { xfo_a, xfo_b } => {
                let label_pos = measure_angle(&xfo_a, &xfo_b)
                    .map(|m| m.label_pos)
                    .unwrap_or(xfo_a.tr);
                vec![
                    ("XfoA", Value::Xfo(xfo_a)),
                    ("XfoB", Value::Xfo(xfo_b)),
                    ("LabelPos", Value::Vec3(label_pos)),
                ]
            }
        };
        params.push(("Text", Value::String(self.text())));
        params
    }

    fn same_kind(&self, other: &Measurement) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Adds one measurement item under a parent.
#[derive(Debug, Default)]
pub struct MeasurementChange {
    name: String,
    parent: Option<TreeItemRef>,
    item: Option<TreeItemRef>,
    index: usize,
    measurement: Option<Measurement>,
    parent_path: ScenePath,
    item_name: String,
    color: Color,
    done: bool,
}

impl MeasurementChange {
    /// Add an item showing `measurement` under `parent`
    pub fn new(parent: TreeItemRef, measurement: Measurement, color: Color) -> ChangeResult<Self> {
        let (item, index) = Self::build(&parent, measurement.label(), &measurement, color)?;
        tracing::debug!("Measured {} = {}", item.name(), measurement.text());
        Ok(Self {
            name: "Add Measurement".to_string(),
            parent_path: parent.path(),
            item_name: item.name(),
            parent: Some(parent),
            item: Some(item),
            index,
            measurement: Some(measurement),
            color,
            done: true,
        })
    }

    pub fn inert() -> Self {
        Self::default()
    }

    /// The measurement item
    pub fn item(&self) -> Option<&TreeItemRef> {
        self.item.as_ref()
    }

    pub fn measurement(&self) -> Option<&Measurement> {
        self.measurement.as_ref()
    }

    fn build(
        parent: &TreeItemRef,
        base_name: &str,
        measurement: &Measurement,
        color: Color,
    ) -> ChangeResult<(TreeItemRef, usize)> {
        let item = TreeItem::new(parent.generate_unique_name(base_name));
        item.add_parameter(Parameter::new(COLOR_PARAM, color));
        for (name, value) in measurement.parameters() {
            item.add_parameter(Parameter::new(name, value));
        }
        let index = parent.add_child(item.clone())?;
        Ok((item, index))
    }

    fn apply_measurement(&mut self, measurement: Measurement) -> ChangeResult<()> {
        let Some(item) = &self.item else {
            return Ok(());
        };
        for (name, value) in measurement.parameters() {
            item.require_parameter(name)?.set_value(value)?;
        }
        self.measurement = Some(measurement);
        Ok(())
    }
}

impl Change for MeasurementChange {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &str {
        MEASUREMENT_CHANGE
    }

    fn is_done(&self) -> bool {
        self.done
    }

    fn set_done(&mut self, done: bool) {
        self.done = done;
    }

    fn is_inert(&self) -> bool {
        self.item.is_none()
    }

    fn revert(&mut self) {
        if let (Some(parent), Some(item)) = (&self.parent, &self.item) {
            if let Err(e) = parent.remove_child_item(item) {
                tracing::warn!("Undo of '{}' could not detach item: {}", self.name, e);
            }
        }
    }

    fn reapply(&mut self) {
        if let (Some(parent), Some(item)) = (&self.parent, &self.item) {
            let index = self.index.min(parent.child_count());
            if let Err(e) = parent.insert_child(index, item.clone()) {
                tracing::warn!("Redo of '{}' could not reattach item: {}", self.name, e);
            }
        }
    }

    fn update(&mut self, update: &ChangeUpdate) -> ChangeResult<()> {
        match (update, &self.measurement) {
            (ChangeUpdate::Measure(next), Some(current)) if current.same_kind(next) => {
                self.apply_measurement(*next)
            }
            (other, _) => Err(ChangeError::UnsupportedUpdate {
                change: MEASUREMENT_CHANGE.to_string(),
                update: other.kind_name(),
            }),
        }
    }

    fn to_record(&self) -> ChangeResult<ChangeRecord> {
        let Some(measurement) = &self.measurement else {
            return Err(ChangeError::Inert {
                type_name: MEASUREMENT_CHANGE.to_string(),
            });
        };
        ChangeRecord::new(MEASUREMENT_CHANGE, &self.name)
            .with("parentItemPath", &self.parent_path)?
            .with("measurementName", &self.item_name)?
            .with("color", self.color)?
            .with("measurement", measurement)
    }

    fn from_record(&mut self, record: &ChangeRecord, context: &ChangeContext) -> ChangeResult<()> {
        record.expect_type(MEASUREMENT_CHANGE)?;
        let parent_path: ScenePath = record.path("parentItemPath")?;
        let item_name: String = record.get("measurementName")?;
        let color: Color = record.get("color")?;
        let measurement: Measurement = record.get("measurement")?;
        self.name = record.name.clone();

        let parent = match context.root.resolve_item(&parent_path) {
            Ok(parent) => parent,
            Err(e) => {
                tracing::warn!("Loaded '{}' is inert: {}", self.name, e);
                return Ok(());
            }
        };

        let (item, index) = Self::build(&parent, &item_name, &measurement, color)?;
        self.parent_path = parent_path;
        self.item_name = item.name();
        self.parent = Some(parent);
        self.item = Some(item);
        self.index = index;
        self.measurement = Some(measurement);
        self.color = color;
        self.done = true;
        Ok(())
    }
}
