use std::cmp::Ordering;
use std::fmt;

use crate::complex::ComplexUnit;
use crate::dimension::Dimension;
use crate::error::{Result, UnitError};
use crate::format::{self, FormatOptions};

/// Relative tolerance used when comparing quantities through their SI values.
const COMPARE_EPSILON: f64 = 8.0 * f64::EPSILON;

/// A number tagged with a unit.
///
/// The scale of the unit is always carried by `value`: the stored unit has
/// multiplier 1.
#[derive(Clone, Debug)]
pub struct Quantity {
    value: f64,
    unit: ComplexUnit,
}

impl Quantity {
    pub fn new(value: f64, unit: impl Into<ComplexUnit>) -> Self {
        let unit = unit.into();
        Self {
            value: value * unit.multiplier(),
            unit: unit.with_multiplier(1.0),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> &ComplexUnit {
        &self.unit
    }

    pub fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }

    /// The unit with the value as its multiplier.
    pub fn to_complex_unit(&self) -> ComplexUnit {
        self.unit.with_multiplier(self.value)
    }

    /// The same quantity expressed in base units.
    pub fn si(&self) -> Quantity {
        Quantity::new(1.0, self.to_complex_unit().si())
    }

    /// The numeric value once expressed in base units.
    pub fn si_value(&self) -> f64 {
        self.to_complex_unit().si().multiplier()
    }

    /// One level of the unit's definition expanded.
    pub fn expand(&self) -> Quantity {
        Quantity::new(1.0, self.to_complex_unit().expand())
    }

    /// The same quantity counted in `target`.
    pub fn to(&self, target: impl Into<ComplexUnit>) -> Result<Quantity> {
        let target = target.into().with_multiplier(1.0);
        let converted = self.to_complex_unit().to(&target)?;
        Ok(Quantity::new(1.0, converted))
    }

    pub fn abs(&self) -> Quantity {
        Quantity {
            value: self.value.abs(),
            unit: self.unit.clone(),
        }
    }

    pub fn powf(&self, exponent: f64) -> Quantity {
        Quantity::new(1.0, self.to_complex_unit().powf(exponent))
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0.0
    }

    /// Physical equality: both sides are reduced to SI before comparing.
    pub fn try_eq(&self, other: &Quantity) -> Result<bool> {
        Ok(self.try_cmp(other)? == Ordering::Equal)
    }

    /// Orders two quantities of the same dimension by their SI values.
    /// Values within a small relative tolerance compare equal.
    pub fn try_cmp(&self, other: &Quantity) -> Result<Ordering> {
        if self.unit.is_affine() || other.unit.is_affine() {
            return Err(UnitError::AffineUnsupported { op: "compare" });
        }
        UnitError::check_dimensions(
            self.dimension(),
            other.dimension(),
            "Cannot compare quantities with different dimensions",
        )?;
        let (a, b) = (self.si_value(), other.si_value());
        if (a - b).abs() <= COMPARE_EPSILON * a.abs().max(b.abs()) {
            return Ok(Ordering::Equal);
        }
        Ok(a.partial_cmp(&b).unwrap_or(Ordering::Equal))
    }

    pub fn to_string_with(&self, options: &FormatOptions) -> String {
        format::format_quantity(self.value, &self.unit, options)
    }

    pub fn to_latex(&self) -> String {
        self.to_string_with(&FormatOptions::latex())
    }
}

impl std::ops::Neg for Quantity {
    type Output = Quantity;
    fn neg(self) -> Self::Output {
        Quantity {
            value: -self.value,
            unit: self.unit,
        }
    }
}

impl std::ops::Neg for &Quantity {
    type Output = Quantity;
    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

/// False when the dimensions differ.
impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.try_eq(other).unwrap_or(false)
    }
}

/// `None` when the dimensions differ.
impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(&FormatOptions::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::UnitRegistry;
    use crate::unit::{FixedDef, Unit};

    struct Mass {
        kg: Unit,
        g: Unit,
    }

    fn mass(reg: &mut UnitRegistry) -> Mass {
        let kg = reg.unit("kg", Dimension::MASS);
        let g = reg.intern_fixed(FixedDef::new("g", &kg).multiplier(1e-3));
        Mass { kg, g }
    }

    #[test]
    fn test_value_absorbs_unit_multiplier() {
        let mut reg = UnitRegistry::new();
        let Mass { kg, .. } = mass(&mut reg);
        let q = Quantity::new(3.0, kg.to_complex().with_multiplier(2.0));
        assert_eq!(q.value(), 6.0);
        assert_eq!(q.unit().multiplier(), 1.0);
        assert_eq!(q.to_complex_unit(), kg.to_complex().with_multiplier(6.0));
    }

    #[test]
    fn test_same_physical_quantity_is_equal() {
        let mut reg = UnitRegistry::new();
        let Mass { kg, g } = mass(&mut reg);
        let a = Quantity::new(5.0, &kg);
        let b = Quantity::new(5000.0, &g);
        assert_eq!(a, b);
        assert!(a.try_eq(&b).unwrap());
        assert_eq!(a.partial_cmp(&b), Some(Ordering::Equal));
    }

    #[test]
    fn test_ordering() {
        let mut reg = UnitRegistry::new();
        let Mass { kg, g } = mass(&mut reg);
        assert!(Quantity::new(1.0, &kg) > Quantity::new(999.0, &g));
        assert!(Quantity::new(1.0, &kg) < Quantity::new(1001.0, &g));
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut reg = UnitRegistry::new();
        let Mass { kg, .. } = mass(&mut reg);
        let m = reg.unit("m", Dimension::LENGTH);
        let a = Quantity::new(1.0, &kg);
        let b = Quantity::new(1.0, &m);
        assert_ne!(a, b);
        assert_eq!(a.partial_cmp(&b), None);
        assert_eq!(
            a.try_cmp(&b).unwrap_err().to_string(),
            "Cannot compare quantities with different dimensions: M and L"
        );
    }

    #[test]
    fn test_conversion() {
        let mut reg = UnitRegistry::new();
        let Mass { kg, g } = mass(&mut reg);
        let q = Quantity::new(2.5, &kg).to(&g).unwrap();
        assert!((q.value() - 2500.0).abs() < 1e-9);
        assert_eq!(q.unit(), &g.to_complex());
        assert!((q.si_value() - 2.5).abs() < 1e-12);

        let back = q.si();
        assert_eq!(back.unit(), &kg.to_complex());
        assert!((back.value() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_expand() {
        let mut reg = UnitRegistry::new();
        let Mass { kg, g } = mass(&mut reg);
        let q = Quantity::new(2.0, &g).expand();
        assert_eq!(q.unit(), &kg.to_complex());
        assert!((q.value() - 2e-3).abs() < 1e-15);
    }

    #[test]
    fn test_abs_neg_and_powf() {
        let mut reg = UnitRegistry::new();
        let m = reg.unit("m", Dimension::LENGTH);
        let q = Quantity::new(-3.0, &m);
        assert_eq!(q.abs().value(), 3.0);
        assert_eq!((-&q).value(), 3.0);
        let sq = q.powf(2.0);
        assert_eq!(sq.value(), 9.0);
        assert_eq!(sq.dimension(), Dimension::LENGTH * 2.0);
    }

    #[test]
    fn test_display() {
        let mut reg = UnitRegistry::new();
        let Mass { kg, .. } = mass(&mut reg);
        let s = reg.unit("s", Dimension::TIME);
        let q = Quantity::new(1.5, kg.to_complex().product(&s.to_complex(), -1.0));
        assert_eq!(q.to_string(), "1.5 kg\u{2009}/\u{2009}s");
        insta::assert_snapshot!(q.to_latex(), @r"$\mathrm {1.5 \, \dfrac{kg}{s}}$");
        assert_eq!(Quantity::new(2.0, ComplexUnit::dimensionless()).to_string(), "2");
    }
}
