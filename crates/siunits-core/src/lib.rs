//! Dimensional analysis over the seven SI base quantities.
//!
//! - [`Dimension`] - exponents of length, mass, time, current, temperature,
//!   amount and luminous intensity
//! - [`Unit`] - a named unit, either standing on its own or fixed to an
//!   expression of other units
//! - [`ComplexUnit`] - a product of unit powers with an overall scale
//! - [`Quantity`] - a number tagged with a unit
//!
//! Units are created through a [`UnitRegistry`], which deduplicates
//! identical definitions. Arithmetic between all of these types is available
//! through `std::ops` and, for operands only known at runtime, through the
//! [`ops`] dispatcher. Operations that can fail (adding mismatched
//! dimensions, dividing by zero) return [`Result`].

pub mod complex;
pub mod dimension;
pub mod error;
pub mod exponent_map;
pub mod format;
pub mod ops;
pub mod quantity;
pub mod registry;
pub mod unit;

pub use complex::ComplexUnit;
pub use dimension::Dimension;
pub use error::{Result, UnitError};
pub use exponent_map::ExponentMap;
pub use format::{FormatOptions, FormatStyle};
pub use ops::{BinaryOp, Operand, Value};
pub use quantity::Quantity;
pub use registry::UnitRegistry;
pub use unit::{FixedDef, Unit, UnitDef, UnitKind};
