//! The `Fixture` trait: the seam every generatable type plugs into.

use std::any::Any;
use std::rc::Rc;
use std::sync::Arc;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::context::GenContext;
use crate::error::InitError;
use crate::scalar::ScalarKind;
use crate::shape::Shape;

/// A type that can synthesize a fully populated, process-unique instance of
/// itself.
///
/// Scalars draw from the context's scalar source, containers fan out into
/// child contexts, abstract slots resolve through the mapping table, and
/// composites (via `#[derive(Fixture)]`) populate their fields recursively.
pub trait Fixture: Sized + 'static {
    /// Shape tag used for classification and mapping validation
    fn shape() -> Shape;

    /// Produce one fully populated unique instance
    fn unique(ctx: &GenContext) -> Result<Self, InitError>;

    /// Zero value taken by excluded fields and exhausted recursion.
    ///
    /// Shapes without a representable absence keep the default, which
    /// surfaces the exclusion as a generation error.
    fn vacant() -> Result<Self, InitError> {
        Err(InitError::vacant_unsupported::<Self>())
    }
}

macro_rules! impl_scalar_fixture {
    ($($t:ty => $kind:ident, $method:ident, $vacant:expr;)*) => {
        $(
            impl Fixture for $t {
                fn shape() -> Shape {
                    Shape::Scalar(ScalarKind::$kind)
                }

                fn unique(ctx: &GenContext) -> Result<Self, InitError> {
                    Ok(ctx.scalars().$method())
                }

                fn vacant() -> Result<Self, InitError> {
                    Ok($vacant)
                }
            }
        )*
    };
}

impl_scalar_fixture! {
    i64 => Long, unique_long, 0;
    i32 => Integer, unique_integer, 0;
    i16 => Short, unique_short, 0;
    i8 => Byte, unique_byte, 0;
    f64 => Double, unique_double, 0.0;
    f32 => Float, unique_float, 0.0;
    bool => Boolean, unique_boolean, false;
    char => Character, unique_character, '\0';
    i128 => BigInteger, unique_big_integer, 0;
    String => Text, unique_string, String::new();
    Decimal => BigDecimal, unique_big_decimal, Decimal::ZERO;
    Uuid => Uuid, unique_uuid, Uuid::nil();
}

impl Fixture for DateTime<Utc> {
    fn shape() -> Shape {
        Shape::Scalar(ScalarKind::Date)
    }

    fn unique(ctx: &GenContext) -> Result<Self, InitError> {
        Ok(ctx.scalars().unique_date())
    }

    fn vacant() -> Result<Self, InitError> {
        Ok(DateTime::UNIX_EPOCH)
    }
}

impl Fixture for SystemTime {
    fn shape() -> Shape {
        Shape::Scalar(ScalarKind::Instant)
    }

    fn unique(ctx: &GenContext) -> Result<Self, InitError> {
        Ok(ctx.scalars().unique_instant())
    }

    fn vacant() -> Result<Self, InitError> {
        Ok(std::time::UNIX_EPOCH)
    }
}

// Unsigned and pointer-width integers reuse the matching signed derivation.
macro_rules! impl_cast_scalar_fixture {
    ($($t:ty => $kind:ident, $method:ident;)*) => {
        $(
            impl Fixture for $t {
                fn shape() -> Shape {
                    Shape::Scalar(ScalarKind::$kind)
                }

                fn unique(ctx: &GenContext) -> Result<Self, InitError> {
                    Ok(ctx.scalars().$method() as $t)
                }

                fn vacant() -> Result<Self, InitError> {
                    Ok(0)
                }
            }
        )*
    };
}

impl_cast_scalar_fixture! {
    u64 => Long, unique_long;
    u32 => Integer, unique_integer;
    u16 => Short, unique_short;
    u8 => Byte, unique_byte;
    u128 => BigInteger, unique_big_integer;
    usize => Long, unique_long;
    isize => Long, unique_long;
}

/// The absence carrier: `None` once recursion depth is exhausted, the
/// cycle-breaker for self-referential types.
impl<T: Fixture> Fixture for Option<T> {
    fn shape() -> Shape {
        T::shape()
    }

    fn unique(ctx: &GenContext) -> Result<Self, InitError> {
        if ctx.depth_exhausted() {
            return Ok(None);
        }
        T::unique(ctx).map(Some)
    }

    fn vacant() -> Result<Self, InitError> {
        Ok(None)
    }
}

impl<T: Fixture> Fixture for Box<T> {
    fn shape() -> Shape {
        T::shape()
    }

    fn unique(ctx: &GenContext) -> Result<Self, InitError> {
        T::unique(ctx).map(Box::new)
    }

    fn vacant() -> Result<Self, InitError> {
        T::vacant().map(Box::new)
    }
}

impl<T: Fixture> Fixture for Rc<T> {
    fn shape() -> Shape {
        T::shape()
    }

    fn unique(ctx: &GenContext) -> Result<Self, InitError> {
        T::unique(ctx).map(Rc::new)
    }

    fn vacant() -> Result<Self, InitError> {
        T::vacant().map(Rc::new)
    }
}

impl<T: Fixture> Fixture for Arc<T> {
    fn shape() -> Shape {
        T::shape()
    }

    fn unique(ctx: &GenContext) -> Result<Self, InitError> {
        T::unique(ctx).map(Arc::new)
    }

    fn vacant() -> Result<Self, InitError> {
        T::vacant().map(Arc::new)
    }
}

/// Universal top type: an unconstrained `Box<dyn Any>` slot materializes as
/// a unique long.
impl Fixture for Box<dyn Any> {
    fn shape() -> Shape {
        Shape::Any
    }

    fn unique(ctx: &GenContext) -> Result<Self, InitError> {
        Ok(Box::new(ctx.scalars().unique_long()) as Box<dyn Any>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::unique_object;
    use crate::sequencer::Sequencer;

    #[test]
    fn test_scalar_shapes() {
        assert_eq!(i64::shape(), Shape::Scalar(ScalarKind::Long));
        assert_eq!(String::shape(), Shape::Scalar(ScalarKind::Text));
        assert_eq!(Uuid::shape(), Shape::Scalar(ScalarKind::Uuid));
        assert_eq!(<Box<dyn Any>>::shape(), Shape::Any);
    }

    #[test]
    fn test_option_is_transparent_within_depth() {
        let value = unique_object::<Option<i64>>().generate().unwrap();
        assert!(value.is_some());
        assert!(value.unwrap() > 0);
    }

    #[test]
    fn test_option_terminates_on_exhausted_depth() {
        let value = unique_object::<Option<i64>>()
            .with_nesting_depth(-1)
            .generate()
            .unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_boxed_scalar_delegates() {
        let value = unique_object::<Box<i32>>().generate().unwrap();
        assert!(*value > 0);
    }

    #[test]
    fn test_any_falls_back_to_long() {
        let value = unique_object::<Box<dyn Any>>().generate().unwrap();
        let long = value.downcast_ref::<i64>().expect("fallback scalar is a long");
        assert!(*long > 0);
    }

    #[test]
    fn test_vacant_values() {
        assert_eq!(i32::vacant().unwrap(), 0);
        assert_eq!(String::vacant().unwrap(), "");
        assert_eq!(Option::<String>::vacant().unwrap(), None);
        assert_eq!(Uuid::vacant().unwrap(), Uuid::nil());
    }

    #[test]
    fn test_isolated_source_yields_predictable_values() {
        let source = Arc::new(crate::scalar::Unique::new(Arc::new(Sequencer::new())));
        let value = unique_object::<i64>()
            .with_scalar_source(source)
            .generate()
            .unwrap();
        assert_eq!(value, 1);
    }
}
