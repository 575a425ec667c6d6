//! Concrete change types.

pub mod create_geom;
pub mod hold_objects;
pub mod measurement;
pub mod name_value;
pub mod parameter_value;
pub mod selection_xfo;

pub use create_geom::{CreateGeomChange, GeomKind, GeomShape, COLOR_PARAM, CURVE_TYPE_PARAM};
pub use hold_objects::{HoldObjectsChange, HOLD_OBJECTS_CHANGE};
pub use measurement::{Measurement, MeasurementChange, MEASUREMENT_CHANGE};
pub use name_value::{NameValueChange, NAME_VALUE_CHANGE};
pub use parameter_value::{ParameterValueChange, PARAMETER_VALUE_CHANGE};
pub use selection_xfo::{SelectionXfoChange, SELECTION_XFO_CHANGE};
