//! [`DeepMerge`] for [`toml::Value`].

use toml::{Table, Value};

use crate::traverse::{MapEntries, merge_map, merge_sequence};
use crate::{DeepMerge, MergeContext, MergeResult, Shape, merge_leaf};

impl MapEntries for Table {
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
            Self::Array(_) => Shape::Sequence,
            Self::Table(_) => Shape::Mapping,
            Self::String(_)
            | Self::Integer(_)
            | Self::Float(_)
            | Self::Boolean(_)
            | Self::Datetime(_) => Shape::Scalar,
        }
    }

    fn is_empty_value(&self) -> bool {
        match self {
            Self::String(text) => text.is_empty(),
            Self::Integer(number) => *number == 0,
            Self::Float(number) => *number == 0.0,
            Self::Boolean(flag) => !flag,
            Self::Datetime(_) => false,
            Self::Array(items) => items.is_empty(),
            Self::Table(entries) => entries.is_empty(),
        }
    }

    fn deep_merge(&mut self, src: &Self, ctx: &mut MergeContext<'_>) -> MergeResult<()> {
        match (self, src) {
            (Self::Table(into), Self::Table(from)) => merge_map(into, from, ctx),
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
            Self::Integer(number) => Some(number.to_string()),
            Self::Float(number) => Some(number.to_string()),
            Self::Boolean(flag) => Some(flag.to_string()),
            Self::Datetime(stamp) => Some(stamp.to_string()),
            Self::Array(_) | Self::Table(_) => None,
        }
    }

    fn list_key(&self, key: &str) -> Option<String> {
        match self {
            Self::Table(entries) => entries.get(key).and_then(DeepMerge::key_text),
            _ => None,
        }
    }
}
