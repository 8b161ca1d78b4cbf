//! Object capability used by path traversal.

use super::array::Array;
use super::key::Key;
use super::value::Value;
use crate::error::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// ObjectAccess exposes named members of an object to path traversal.
///
/// Traversal resolves a key ending in `()` with [`call_method`], then tries
/// [`static_property`], then falls back to [`property`]. Errors returned by
/// an implementation propagate to the caller unchanged.
///
/// [`call_method`]: ObjectAccess::call_method
/// [`static_property`]: ObjectAccess::static_property
/// [`property`]: ObjectAccess::property
pub trait ObjectAccess: fmt::Debug + Send + Sync {
    /// Name of the object's class, used in error messages.
    fn class_name(&self) -> &str;

    /// Resolves a class-level property shared by all instances.
    fn static_property(&self, _name: &str) -> Option<Value> {
        None
    }

    /// Resolves an instance property.
    ///
    /// A missing ordinary property is [`Error::PropertyResolution`]; a
    /// dynamic property that reports no value is [`Error::InvalidArgument`].
    fn property(&self, name: &str) -> Result<Value>;

    /// Calls a zero-argument method.
    fn call_method(&self, name: &str) -> Result<Value>;
}

/// Method is a zero-argument accessor registered on a [`Record`].
pub type Method = Arc<dyn Fn(&Record) -> Value + Send + Sync>;

/// DynamicGetter resolves properties not declared on a [`Record`].
/// Returning `None` signals that no value is available.
pub type DynamicGetter = Arc<dyn Fn(&str) -> Option<Value> + Send + Sync>;

/// Record is a general purpose [`ObjectAccess`] implementation built from
/// named fields, static fields, methods and an optional dynamic getter.
#[derive(Clone)]
pub struct Record {
    class: String,
    fields: Array,
    statics: Array,
    methods: Vec<(String, Method)>,
    dynamic: Option<DynamicGetter>,
}

impl Record {
    /// Creates an empty record of the given class.
    pub fn new(class: impl Into<String>) -> Self {
        Record {
            class: class.into(),
            fields: Array::new(),
            statics: Array::new(),
            methods: Vec::new(),
            dynamic: None,
        }
    }

    /// Adds a public field.
    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name, value.into());
        self
    }

    /// Adds a static field.
    pub fn with_static(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.statics.insert(name, value.into());
        self
    }

    /// Adds a zero-argument method.
    pub fn with_method(
        mut self,
        name: impl Into<String>,
        method: impl Fn(&Record) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.methods.push((name.into(), Arc::new(method)));
        self
    }

    /// Installs a getter for properties that are not declared as fields.
    pub fn with_dynamic(
        mut self,
        getter: impl Fn(&str) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        self.dynamic = Some(Arc::new(getter));
        self
    }

    /// Returns the declared fields.
    pub fn fields(&self) -> &Array {
        &self.fields
    }

    /// Returns a declared field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(&Key::from(name))
    }
}

impl ObjectAccess for Record {
    fn class_name(&self) -> &str {
        &self.class
    }

    fn static_property(&self, name: &str) -> Option<Value> {
        self.statics.get(&Key::from(name)).cloned()
    }

    fn property(&self, name: &str) -> Result<Value> {
        if let Some(value) = self.field(name) {
            return Ok(value.clone());
        }
        match &self.dynamic {
            Some(getter) => getter(name).ok_or_else(|| {
                Error::invalid_argument(format!(
                    "no value available for dynamic property {}::{}",
                    self.class, name
                ))
            }),
            None => Err(Error::property_resolution(&self.class, name)),
        }
    }

    fn call_method(&self, name: &str) -> Result<Value> {
        self.methods
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, method)| method(self))
            .ok_or_else(|| Error::property_resolution(&self.class, format!("{}()", name)))
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("class", &self.class)
            .field("fields", &self.fields)
            .field("statics", &self.statics)
            .field(
                "methods",
                &self.methods.iter().map(|(n, _)| n.as_str()).collect::<Vec<_>>(),
            )
            .field("dynamic", &self.dynamic.is_some())
            .finish()
    }
}
