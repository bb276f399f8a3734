//! Leaf implementations for primitive and text types.

use std::path::PathBuf;
use std::time::Duration;

use super::{DeepMerge, MergeContext, Shape, merge_leaf};
use crate::MergeResult;

macro_rules! impl_scalar {
    ($($ty:ty => |$value:ident| $empty:expr;)*) => {
        $(
            impl DeepMerge for $ty {
                fn shape(&self) -> Shape {
                    Shape::Scalar
                }

                fn is_empty_value(&self) -> bool {
                    let $value = self;
                    $empty
                }

                fn deep_merge(&mut self, src: &Self, ctx: &mut MergeContext<'_>) -> MergeResult<()> {
                    merge_leaf(self, src, ctx);
                    Ok(())
                }

                fn key_text(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

impl_scalar! {
    i8 => |v| *v == 0;
    i16 => |v| *v == 0;
    i32 => |v| *v == 0;
    i64 => |v| *v == 0;
    i128 => |v| *v == 0;
    isize => |v| *v == 0;
    u8 => |v| *v == 0;
    u16 => |v| *v == 0;
    u32 => |v| *v == 0;
    u64 => |v| *v == 0;
    u128 => |v| *v == 0;
    usize => |v| *v == 0;
    f32 => |v| *v == 0.0;
    f64 => |v| *v == 0.0;
    bool => |v| !*v;
    char => |v| *v == '\0';
    String => |v| v.is_empty();
}

impl DeepMerge for PathBuf {
    fn shape(&self) -> Shape {
        Shape::Scalar
    }

    fn is_empty_value(&self) -> bool {
        self.as_os_str().is_empty()
    }

    fn deep_merge(&mut self, src: &Self, ctx: &mut MergeContext<'_>) -> MergeResult<()> {
        merge_leaf(self, src, ctx);
        Ok(())
    }

    fn key_text(&self) -> Option<String> {
        Some(self.to_string_lossy().into_owned())
    }
}

impl DeepMerge for Duration {
    fn shape(&self) -> Shape {
        Shape::Scalar
    }

    fn is_empty_value(&self) -> bool {
        self.is_zero()
    }

    fn deep_merge(&mut self, src: &Self, ctx: &mut MergeContext<'_>) -> MergeResult<()> {
        merge_leaf(self, src, ctx);
        Ok(())
    }
}

impl DeepMerge for () {
    fn shape(&self) -> Shape {
        Shape::Scalar
    }

    fn is_empty_value(&self) -> bool {
        true
    }

    fn deep_merge(&mut self, _src: &Self, _ctx: &mut MergeContext<'_>) -> MergeResult<()> {
        Ok(())
    }
}
