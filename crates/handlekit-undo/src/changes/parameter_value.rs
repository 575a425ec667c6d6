//! Change of a single parameter's value.

use crate::change::{Change, ChangeUpdate};
use crate::error::{ChangeError, ChangeResult};
use crate::record::{ChangeContext, ChangeRecord};
use crate::snapshot::Snapshot;
use handlekit_core::{ParameterRef, Value};

pub const PARAMETER_VALUE_CHANGE: &str = "ParameterValueChange";

/// Records the value of one parameter before and after an edit.
///
/// Handles open one of these on drag start and update it on every drag
/// event; undo writes the captured value back exactly.
#[derive(Debug, Default)]
pub struct ParameterValueChange {
    name: String,
    snapshot: Option<Snapshot<ParameterRef>>,
    done: bool,
}

impl ParameterValueChange {
    /// Capture `param` and, if given, apply `value` to it.
    pub fn new(param: ParameterRef, value: Option<Value>) -> ChangeResult<Self> {
        let name = format!("{} Changed", param.name());
        let mut snapshot = Snapshot::capture(param);
        if let Some(value) = value {
            snapshot.apply(value)?;
        }
        Ok(Self {
            name,
            snapshot: Some(snapshot),
            done: true,
        })
    }

    /// A change with no target, to be filled by [`Change::from_record`]
    pub fn inert() -> Self {
        Self::default()
    }

    pub fn param(&self) -> Option<&ParameterRef> {
        self.snapshot.as_ref().map(Snapshot::target)
    }

    pub fn prev_value(&self) -> Option<&Value> {
        self.snapshot.as_ref().map(Snapshot::prev)
    }

    pub fn next_value(&self) -> Option<&Value> {
        self.snapshot.as_ref().map(Snapshot::next)
    }
}

impl Change for ParameterValueChange {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &str {
        PARAMETER_VALUE_CHANGE
    }

    fn is_done(&self) -> bool {
        self.done
    }

    fn set_done(&mut self, done: bool) {
        self.done = done;
    }

    fn is_inert(&self) -> bool {
        self.snapshot.is_none()
    }

    fn revert(&mut self) {
        if let Some(snapshot) = &self.snapshot {
            snapshot.restore();
        }
    }

    fn reapply(&mut self) {
        if let Some(snapshot) = &self.snapshot {
            snapshot.reapply();
        }
    }

    fn update(&mut self, update: &ChangeUpdate) -> ChangeResult<()> {
        let ChangeUpdate::Value(value) = update else {
            return Err(ChangeError::UnsupportedUpdate {
                change: PARAMETER_VALUE_CHANGE.to_string(),
                update: update.kind_name(),
            });
        };
        match &mut self.snapshot {
            Some(snapshot) => Ok(snapshot.apply(value.clone())?),
            None => Ok(()),
        }
    }

    fn to_record(&self) -> ChangeResult<ChangeRecord> {
        let snapshot = self.snapshot.as_ref().ok_or_else(|| ChangeError::Inert {
            type_name: PARAMETER_VALUE_CHANGE.to_string(),
        })?;
        ChangeRecord::new(PARAMETER_VALUE_CHANGE, &self.name)
            .with("paramPath", snapshot.path())?
            .with("value", snapshot.next().to_json())
    }

    fn from_record(&mut self, record: &ChangeRecord, context: &ChangeContext) -> ChangeResult<()> {
        record.expect_type(PARAMETER_VALUE_CHANGE)?;
        let path = record.path("paramPath")?;
        let raw = record.field("value")?;
        self.name = record.name.clone();

        let param = match context.root.resolve_parameter(&path) {
            Ok(param) => param,
            Err(e) => {
                tracing::warn!("Loaded '{}' is inert: {}", self.name, e);
                return Ok(());
            }
        };

        let value = Value::from_json(param.kind(), raw)?;
        let mut snapshot = Snapshot::capture(param);
        snapshot.apply(value)?;
        self.snapshot = Some(snapshot);
        self.done = true;
        Ok(())
    }
}
