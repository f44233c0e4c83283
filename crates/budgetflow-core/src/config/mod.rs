//! Layered diagram configuration.
//!
//! The effective configuration is a JSON object built from a [`ScreenProfile`] preset with caller
//! overrides deep-merged on top. Typed views ([`LayoutConfig`], [`ViewportConfig`]) are
//! deserialized from their sections; missing keys fall back to the built-in defaults.

mod profile;
mod typed;

pub use profile::ScreenProfile;
pub use typed::{LayoutConfig, ViewportConfig, ZoomStep};

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct FlowConfig(Value);

impl Default for FlowConfig {
    fn default() -> Self {
        Self::empty_object()
    }
}

impl FlowConfig {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Preset for `profile` with `overrides` merged on top.
    pub fn for_profile(profile: ScreenProfile, overrides: Option<&Value>) -> Self {
        let mut cfg = Self::from_value(profile.preset());
        if let Some(overrides) = overrides {
            cfg.deep_merge(overrides);
        }
        cfg
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }

    pub fn layout(&self) -> Result<LayoutConfig> {
        Ok(self.section::<LayoutConfig>("layout")?.sanitized())
    }

    pub fn viewport(&self) -> Result<ViewportConfig> {
        Ok(self.section::<ViewportConfig>("viewport")?.sanitized())
    }

    fn section<T: DeserializeOwned + Default>(&self, name: &str) -> Result<T> {
        match self.0.get(name) {
            None | Some(Value::Null) => Ok(T::default()),
            Some(v) => serde_json::from_value(v.clone()).map_err(|e| Error::Config {
                section: name.to_string(),
                message: e.to_string(),
            }),
        }
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}
