//! Device information document (`query/device-info`)
//!
//! The field set differs between players, TVs and firmware versions, so the
//! document is kept as an open map rather than a fixed struct.

use std::collections::BTreeMap;

use serde::Serialize;
use xmltree::Element;

use crate::error::Result;
use crate::xml::{child_elements, parse_document};

/// One device-info value: `true`/`false` become flags, everything else stays text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum InfoValue {
    Text(String),
    Flag(bool),
}

impl InfoValue {
    /// Coerce a wire value. Only the exact lowercase literals are booleans.
    fn from_wire(value: &str) -> Self {
        match value {
            "true" => InfoValue::Flag(true),
            "false" => InfoValue::Flag(false),
            other => InfoValue::Text(other.to_string()),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            InfoValue::Text(text) => Some(text),
            InfoValue::Flag(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            InfoValue::Flag(flag) => Some(*flag),
            InfoValue::Text(_) => None,
        }
    }
}

/// Device information keyed by camelCase field name, e.g. `serialNumber`, `isTv`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DeviceInfo(BTreeMap<String, InfoValue>);

impl DeviceInfo {
    fn from_element(root: &Element) -> Self {
        let fields = child_elements(root)
            .map(|child| {
                let text = child.get_text().unwrap_or_default();
                (to_camel_case(&child.name), InfoValue::from_wire(&text))
            })
            .collect();
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&InfoValue> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(InfoValue::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(InfoValue::as_bool)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &InfoValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Decode `query/device-info`
pub(crate) fn parse_device_info(xml: &str) -> Result<DeviceInfo> {
    let root = parse_document(xml, "device-info")?;
    Ok(DeviceInfo::from_element(&root))
}

/// `serial-number` -> `serialNumber`, `is_tv` -> `isTv`
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;

    for c in name.chars() {
        if c == '-' || c == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
