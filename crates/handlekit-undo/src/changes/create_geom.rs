//! Creation of a primitive item under a parent.
//!
//! The forward effect is the existence of the new child. Undo detaches it,
//! redo puts the same item back at the index it was first inserted at.
//! Records describe the item as created: later renames and moves are
//! changes of their own.

use crate::change::{Change, ChangeUpdate};
use crate::error::{ChangeError, ChangeResult};
use crate::record::{ChangeContext, ChangeRecord};
use handlekit_core::{Color, DVec3, Parameter, ScenePath, TreeItem, TreeItemRef, Value, Xfo};
use serde::{Deserialize, Serialize};

/// Name of the colour parameter every created item carries
pub const COLOR_PARAM: &str = "Color";

/// Names the curve a created circle is, for tools that measure curves
pub const CURVE_TYPE_PARAM: &str = "CurveType";

/// Primitive kinds that can be created interactively
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeomKind {
    Line,
    Cuboid,
    Sphere,
    Circle,
    Rect,
}

impl GeomKind {
    pub const ALL: [GeomKind; 5] = [
        GeomKind::Line,
        GeomKind::Cuboid,
        GeomKind::Sphere,
        GeomKind::Circle,
        GeomKind::Rect,
    ];

    /// Registered change type name for this kind
    pub fn type_name(self) -> &'static str {
        match self {
            GeomKind::Line => "CreateLineChange",
            GeomKind::Cuboid => "CreateCuboidChange",
            GeomKind::Sphere => "CreateSphereChange",
            GeomKind::Circle => "CreateCircleChange",
            GeomKind::Rect => "CreateRectChange",
        }
    }

    pub fn from_type_name(type_name: &str) -> Option<GeomKind> {
        Self::ALL.into_iter().find(|k| k.type_name() == type_name)
    }

    /// Base name of created items
    pub fn label(self) -> &'static str {
        match self {
            GeomKind::Line => "Line",
            GeomKind::Cuboid => "Cuboid",
            GeomKind::Sphere => "Sphere",
            GeomKind::Circle => "Circle",
            GeomKind::Rect => "Rect",
        }
    }

    /// Dimensions of a freshly placed primitive
    pub fn default_shape(self) -> GeomShape {
        match self {
            GeomKind::Line => GeomShape::Line {
                p1: DVec3::ZERO,
                thickness: 0.01,
            },
            GeomKind::Cuboid => GeomShape::Cuboid {
                base_size: [0.0, 0.0],
                height: 0.0,
                tr: None,
            },
            GeomKind::Sphere => GeomShape::Sphere { radius: 0.0 },
            GeomKind::Circle => GeomShape::Circle { radius: 0.0 },
            GeomKind::Rect => GeomShape::Rect {
                base_size: [0.0, 0.0],
            },
        }
    }
}

impl std::fmt::Display for GeomKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Dimensions of a created primitive, in the item's local frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GeomShape {
    /// Segment from the item origin to `p1`
    Line { p1: DVec3, thickness: f64 },
    /// Box standing on its base; `tr` moves the item when set
    Cuboid {
        #[serde(rename = "baseSize")]
        base_size: [f64; 2],
        height: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tr: Option<DVec3>,
    },
    Sphere { radius: f64 },
    Circle { radius: f64 },
    Rect {
        #[serde(rename = "baseSize")]
        base_size: [f64; 2],
    },
}

impl GeomShape {
    pub fn kind(&self) -> GeomKind {
        match self {
            GeomShape::Line { .. } => GeomKind::Line,
            GeomShape::Cuboid { .. } => GeomKind::Cuboid,
            GeomShape::Sphere { .. } => GeomKind::Sphere,
            GeomShape::Circle { .. } => GeomKind::Circle,
            GeomShape::Rect { .. } => GeomKind::Rect,
        }
    }

    /// Whether the primitive has no extent worth keeping
    pub fn is_degenerate(&self) -> bool {
        match self {
            GeomShape::Line { p1, .. } => p1.length() == 0.0,
            GeomShape::Cuboid { base_size, .. } | GeomShape::Rect { base_size } => {
                base_size[0] == 0.0 || base_size[1] == 0.0
            }
            GeomShape::Sphere { radius } | GeomShape::Circle { radius } => *radius == 0.0,
        }
    }

    /// Parameter values describing this shape
    fn parameters(&self) -> Vec<(&'static str, Value)> {
        match *self {
            GeomShape::Line { p1, thickness } => {
                vec![("P1", Value::Vec3(p1)), ("LineThickness", Value::Number(thickness))]
            }
            GeomShape::Cuboid {
                base_size, height, ..
            } => vec![
                ("SizeX", Value::Number(base_size[0])),
                ("SizeY", Value::Number(base_size[1])),
                ("SizeZ", Value::Number(height)),
            ],
            GeomShape::Sphere { radius } => vec![("Radius", Value::Number(radius))],
            GeomShape::Circle { radius } => vec![
                ("Radius", Value::Number(radius)),
                (CURVE_TYPE_PARAM, Value::String("Circle".to_string())),
            ],
            GeomShape::Rect { base_size } => vec![
                ("SizeX", Value::Number(base_size[0])),
                ("SizeY", Value::Number(base_size[1])),
            ],
        }
    }
}

/// Adds one primitive item to the scene.
#[derive(Debug)]
pub struct CreateGeomChange {
    kind: GeomKind,
    name: String,
    parent: Option<TreeItemRef>,
    item: Option<TreeItemRef>,
    index: usize,
    shape: GeomShape,
    created: Option<Created>,
    done: bool,
}

/// How the item looked when it was created
#[derive(Debug, Clone)]
struct Created {
    parent_path: ScenePath,
    item_name: String,
    local_xfo: Xfo,
    color: Color,
}

impl CreateGeomChange {
    /// Create the item under `parent` with global transform `xfo`
    pub fn new(kind: GeomKind, parent: TreeItemRef, xfo: Xfo, color: Color) -> ChangeResult<Self> {
        let shape = kind.default_shape();
        let (item, index) = Self::build(&parent, kind.label(), color, &shape)?;
        item.set_global_xfo(xfo);
        tracing::debug!("Created '{}' at {} under '{}'", item.name(), index, parent.name());
        let created = Created {
            parent_path: parent.path(),
            item_name: item.name(),
            local_xfo: item.local_xfo(),
            color,
        };
        Ok(Self {
            kind,
            name: format!("Create {}", kind.label()),
            parent: Some(parent),
            item: Some(item),
            index,
            shape,
            created: Some(created),
            done: true,
        })
    }

    pub fn inert(kind: GeomKind) -> Self {
        Self {
            kind,
            name: format!("Create {}", kind.label()),
            parent: None,
            item: None,
            index: 0,
            shape: kind.default_shape(),
            created: None,
            done: false,
        }
    }

    pub fn kind(&self) -> GeomKind {
        self.kind
    }

    /// The created item
    pub fn item(&self) -> Option<&TreeItemRef> {
        self.item.as_ref()
    }

    pub fn parent(&self) -> Option<&TreeItemRef> {
        self.parent.as_ref()
    }

    /// Index the item was first inserted at
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn shape(&self) -> &GeomShape {
        &self.shape
    }

    fn build(
        parent: &TreeItemRef,
        base_name: &str,
        color: Color,
        shape: &GeomShape,
    ) -> ChangeResult<(TreeItemRef, usize)> {
        let item = TreeItem::new(parent.generate_unique_name(base_name));
        item.add_parameter(Parameter::new(COLOR_PARAM, color));
        for (name, value) in shape.parameters() {
            item.add_parameter(Parameter::new(name, value));
        }
        let index = parent.add_child(item.clone())?;
        Ok((item, index))
    }

    fn apply_shape(&mut self, shape: GeomShape) -> ChangeResult<()> {
        let Some(item) = &self.item else {
            return Ok(());
        };
        for (name, value) in shape.parameters() {
            item.require_parameter(name)?.set_value(value)?;
        }
        if let GeomShape::Cuboid { tr: Some(tr), .. } = shape {
            let mut xfo = item.local_xfo();
            xfo.tr = tr;
            item.set_local_xfo(xfo);
            if let Some(created) = &mut self.created {
                created.local_xfo = xfo;
            }
        }
        self.shape = shape;
        Ok(())
    }
}

impl Change for CreateGeomChange {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &str {
        self.kind.type_name()
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
        match update {
            ChangeUpdate::Geometry(shape) if shape.kind() == self.kind => self.apply_shape(*shape),
            other => Err(ChangeError::UnsupportedUpdate {
                change: self.kind.type_name().to_string(),
                update: other.kind_name(),
            }),
        }
    }

    fn to_record(&self) -> ChangeResult<ChangeRecord> {
        let Some(created) = &self.created else {
            return Err(ChangeError::Inert {
                type_name: self.kind.type_name().to_string(),
            });
        };
        ChangeRecord::new(self.kind.type_name(), &self.name)
            .with("parentItemPath", &created.parent_path)?
            .with("geomItemName", &created.item_name)?
            .with("geomItemXfo", created.local_xfo)?
            .with("color", created.color)?
            .with("shape", self.shape)
    }

    fn from_record(&mut self, record: &ChangeRecord, context: &ChangeContext) -> ChangeResult<()> {
        record.expect_type(self.kind.type_name())?;
        let parent_path: ScenePath = record.path("parentItemPath")?;
        let item_name: String = record.get("geomItemName")?;
        let xfo: Xfo = record.get("geomItemXfo")?;
        let color: Color = record.get("color")?;
        let shape: GeomShape = record.get("shape")?;
        if shape.kind() != self.kind {
            return Err(ChangeError::RecordTypeMismatch {
                expected: self.kind.label().to_string(),
                found: shape.kind().label().to_string(),
            });
        }
        self.name = record.name.clone();

        let parent = match context.root.resolve_item(&parent_path) {
            Ok(parent) => parent,
            Err(e) => {
                tracing::warn!("Loaded '{}' is inert: {}", self.name, e);
                return Ok(());
            }
        };

        let (item, index) = Self::build(&parent, &item_name, color, &self.kind.default_shape())?;
        item.set_local_xfo(xfo);
        self.created = Some(Created {
            parent_path,
            item_name: item.name(),
            local_xfo: xfo,
            color,
        });
        self.parent = Some(parent);
        self.item = Some(item);
        self.index = index;
        self.apply_shape(shape)?;
        self.done = true;
        Ok(())
    }
}
