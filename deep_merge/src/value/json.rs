//! [`DeepMerge`] for [`serde_json::Value`].

use serde_json::{Map, Value};

use crate::traverse::{MapEntries, merge_map, merge_sequence};
use crate::{DeepMerge, MergeContext, MergeResult, Shape, merge_leaf};

impl MapEntries for Map<String, Value> {
    type Key = String;
    type Value = Value;

    fn entries(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.iter()
    }

    fn entry_mut(&mut self, key: &String) -> Option<&mut Value> {
        self.get_mut(key)
    }

    fn put(&mut self, key: String, value: Value) {
        self.insert(key, value);
    }
}

impl DeepMerge for Value {
    fn shape(&self) -> Shape {
        match self {
            Self::Null => Shape::Optional,
            Self::Array(_) => Shape::Sequence,
            Self::Object(_) => Shape::Mapping,
            Self::Bool(_) | Self::Number(_) | Self::String(_) => Shape::Scalar,
        }
    }

    fn is_empty_value(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(flag) => !flag,
            Self::Number(number) => number.as_f64().is_some_and(|n| n == 0.0),
            Self::String(text) => text.is_empty(),
            Self::Array(items) => items.is_empty(),
            Self::Object(entries) => entries.is_empty(),
        }
    }

    fn deep_merge(&mut self, src: &Self, ctx: &mut MergeContext<'_>) -> MergeResult<()> {
        match (self, src) {
            (_, Self::Null) => Ok(()),
            (Self::Object(into), Self::Object(from)) => merge_map(into, from, ctx),
            (Self::Array(into), Self::Array(from)) => merge_sequence(into, from, ctx),
            (target, _) => {
                merge_leaf(target, src, ctx);
                Ok(())
            }
        }
    }

    fn key_text(&self) -> Option<String> {
        match self {
            Self::String(text) => Some(text.clone()),
            Self::Number(number) => Some(number.to_string()),
            Self::Bool(flag) => Some(flag.to_string()),
            Self::Null | Self::Array(_) | Self::Object(_) => None,
        }
    }

    fn list_key(&self, key: &str) -> Option<String> {
        match self {
            Self::Object(entries) => entries.get(key).and_then(DeepMerge::key_text),
            _ => None,
        }
    }
}
