//! Computed style layout of the inspected element
//!
//! A layout is an ordered list of `property -> value` declarations as
//! returned by the host inspector. Declaration order is preserved so issue
//! lists come out in the order the panel shows properties.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Key the host inspector uses for its own bookkeeping; never a CSS property
pub const RESERVED_LAYOUT_KEY: &str = "from";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StyleLayout {
    declarations: IndexMap<String, String>,
}

impl StyleLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a declaration, replacing the value of an existing property in place
    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.declarations.insert(property.into(), value.into());
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations.get(property).map(String::as_str)
    }

    /// Declarations in layout order, including the reserved key if present
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(p, v)| (p.as_str(), v.as_str()))
    }

    /// Declarations that name CSS properties
    pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().filter(|(p, _)| *p != RESERVED_LAYOUT_KEY)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StyleLayout {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut layout = StyleLayout::new();
        for (property, value) in iter {
            layout.insert(property, value);
        }
        layout
    }
}

impl<'de> Deserialize<'de> for StyleLayout {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(LayoutVisitor)
    }
}

struct LayoutVisitor;

impl<'de> Visitor<'de> for LayoutVisitor {
    type Value = StyleLayout;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object of CSS property names to values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut layout = StyleLayout::new();

        while let Some((property, value)) =
            access.next_entry::<String, serde_json::Value>()?
        {
            // Hosts report numeric lengths and the like as JSON numbers
            let value = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                _ => continue,
            };
            layout.insert(property, value);
        }

        Ok(layout)
    }
}
