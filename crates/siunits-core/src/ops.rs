//! Arithmetic between units, quantities and plain numbers.
//!
//! Every combination goes through the same few rules:
//!
//! * unit ⊗ unit gives a [`ComplexUnit`];
//! * as soon as a quantity or a number takes part the result is a
//!   [`Quantity`] (numbers only multiply and divide);
//! * a sequence of numbers is applied element-wise and gives one quantity
//!   per element.
//!
//! The [`Operand`]/[`Value`] pair exposes those rules to callers that only
//! know their operand kinds at runtime. The `std::ops` impls below cover the
//! statically typed combinations and share the same helpers.

use std::ops::{Add, Div, Mul, Sub};

use crate::complex::ComplexUnit;
use crate::error::{Result, UnitError};
use crate::quantity::Quantity;
use crate::unit::Unit;

#[derive(Clone, Debug)]
pub enum Operand {
    Unit(Unit),
    Complex(ComplexUnit),
    Quantity(Quantity),
    Scalar(f64),
    Sequence(Vec<f64>),
}

impl Operand {
    pub fn kind(&self) -> &'static str {
        match self {
            Operand::Unit(u) if u.is_fixed() => "fixed unit",
            Operand::Unit(_) => "unit",
            Operand::Complex(_) => "complex unit",
            Operand::Quantity(_) => "quantity",
            Operand::Scalar(_) => "number",
            Operand::Sequence(_) => "sequence",
        }
    }

    /// The operand as a unit expression; numbers become a bare multiplier.
    fn term(&self) -> Option<ComplexUnit> {
        match self {
            Operand::Unit(u) => Some(u.term()),
            Operand::Complex(c) => Some(c.term()),
            Operand::Quantity(q) => Some(q.term()),
            Operand::Scalar(x) => Some(x.term()),
            Operand::Sequence(_) => None,
        }
    }

    fn is_unit(&self) -> bool {
        matches!(self, Operand::Unit(_) | Operand::Complex(_))
    }
}

impl From<Unit> for Operand {
    fn from(u: Unit) -> Self {
        Operand::Unit(u)
    }
}

impl From<&Unit> for Operand {
    fn from(u: &Unit) -> Self {
        Operand::Unit(u.clone())
    }
}

impl From<ComplexUnit> for Operand {
    fn from(c: ComplexUnit) -> Self {
        Operand::Complex(c)
    }
}

impl From<&ComplexUnit> for Operand {
    fn from(c: &ComplexUnit) -> Self {
        Operand::Complex(c.clone())
    }
}

impl From<Quantity> for Operand {
    fn from(q: Quantity) -> Self {
        Operand::Quantity(q)
    }
}

impl From<&Quantity> for Operand {
    fn from(q: &Quantity) -> Self {
        Operand::Quantity(q.clone())
    }
}

impl From<f64> for Operand {
    fn from(x: f64) -> Self {
        Operand::Scalar(x)
    }
}

impl From<Vec<f64>> for Operand {
    fn from(xs: Vec<f64>) -> Self {
        Operand::Sequence(xs)
    }
}

impl From<&[f64]> for Operand {
    fn from(xs: &[f64]) -> Self {
        Operand::Sequence(xs.to_vec())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Complex(ComplexUnit),
    Quantity(Quantity),
    Quantities(Vec<Quantity>),
    Bool(bool),
}

impl Value {
    pub fn as_complex(&self) -> Option<&ComplexUnit> {
        match self {
            Value::Complex(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_quantity(&self) -> Option<&Quantity> {
        match self {
            Value::Quantity(q) => Some(q),
            _ => None,
        }
    }

    pub fn as_quantities(&self) -> Option<&[Quantity]> {
        match self {
            Value::Quantities(qs) => Some(qs),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<ComplexUnit> for Value {
    fn from(c: ComplexUnit) -> Self {
        Value::Complex(c)
    }
}

impl From<Quantity> for Value {
    fn from(q: Quantity) -> Self {
        Value::Quantity(q)
    }
}

impl From<Vec<Quantity>> for Value {
    fn from(qs: Vec<Quantity>) -> Self {
        Value::Quantities(qs)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "==",
        }
    }

    fn is_additive(self) -> bool {
        matches!(self, BinaryOp::Add | BinaryOp::Sub)
    }
}

/// Applies `op` to any pair of operands.
pub fn apply(op: BinaryOp, lhs: Operand, rhs: Operand) -> Result<Value> {
    if op == BinaryOp::Eq {
        return equals(&lhs, &rhs).map(Value::Bool);
    }

    let unsupported = || UnitError::UnsupportedOperands {
        op: op.symbol(),
        lhs: lhs.kind(),
        rhs: rhs.kind(),
    };

    match (&lhs, &rhs) {
        (Operand::Sequence(_), Operand::Sequence(_) | Operand::Scalar(_))
        | (Operand::Scalar(_), Operand::Sequence(_) | Operand::Scalar(_)) => Err(unsupported()),
        (Operand::Sequence(_), _) | (_, Operand::Sequence(_)) if op.is_additive() => {
            Err(unsupported())
        }
        (Operand::Sequence(xs), other) => {
            let b = other.term().ok_or_else(unsupported)?;
            xs.iter()
                .map(|x| quantity(op, &x.term(), &b))
                .collect::<Result<Vec<_>>>()
                .map(Value::Quantities)
        }
        (other, Operand::Sequence(xs)) => {
            let a = other.term().ok_or_else(unsupported)?;
            xs.iter()
                .map(|x| quantity(op, &a, &x.term()))
                .collect::<Result<Vec<_>>>()
                .map(Value::Quantities)
        }
        (Operand::Scalar(_), _) | (_, Operand::Scalar(_)) if op.is_additive() => {
            Err(unsupported())
        }
        _ => {
            let (Some(a), Some(b)) = (lhs.term(), rhs.term()) else {
                return Err(unsupported());
            };
            if lhs.is_unit() && rhs.is_unit() {
                combine(op, &a, &b).map(Value::Complex)
            } else {
                quantity(op, &a, &b).map(Value::Quantity)
            }
        }
    }
}

pub fn add(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Result<Value> {
    apply(BinaryOp::Add, lhs.into(), rhs.into())
}

pub fn sub(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Result<Value> {
    apply(BinaryOp::Sub, lhs.into(), rhs.into())
}

pub fn mul(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Result<Value> {
    apply(BinaryOp::Mul, lhs.into(), rhs.into())
}

pub fn div(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Result<Value> {
    apply(BinaryOp::Div, lhs.into(), rhs.into())
}

pub fn eq(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Result<bool> {
    equals(&lhs.into(), &rhs.into())
}

pub fn pow(base: impl Into<Operand>, exponent: f64) -> Result<Value> {
    match base.into() {
        Operand::Unit(u) => Ok(Value::Complex(u.powf(exponent))),
        Operand::Complex(c) => Ok(Value::Complex(c.powf(exponent))),
        Operand::Quantity(q) => Ok(Value::Quantity(q.powf(exponent))),
        other => Err(UnitError::UnsupportedOperands {
            op: "**",
            lhs: other.kind(),
            rhs: "number",
        }),
    }
}

/// Units compare structurally; anything involving a quantity compares
/// physically. A quantity or composite equals the number 0 when it is zero.
fn equals(lhs: &Operand, rhs: &Operand) -> Result<bool> {
    let unsupported = || UnitError::UnsupportedOperands {
        op: BinaryOp::Eq.symbol(),
        lhs: lhs.kind(),
        rhs: rhs.kind(),
    };
    match (lhs, rhs) {
        (a, b) if a.is_unit() && b.is_unit() => Ok(a.term() == b.term()),
        (Operand::Quantity(a), Operand::Quantity(b)) => a.try_eq(b),
        (Operand::Quantity(q), u) | (u, Operand::Quantity(q)) if u.is_unit() => {
            let unit = u.term().ok_or_else(unsupported)?;
            q.try_eq(&Quantity::new(1.0, unit))
        }
        (Operand::Quantity(q), Operand::Scalar(x)) | (Operand::Scalar(x), Operand::Quantity(q))
            if *x == 0.0 =>
        {
            Ok(q.is_zero())
        }
        (Operand::Complex(c), Operand::Scalar(x)) | (Operand::Scalar(x), Operand::Complex(c))
            if *x == 0.0 =>
        {
            Ok(c.is_zero())
        }
        _ => Err(unsupported()),
    }
}

fn combine(op: BinaryOp, a: &ComplexUnit, b: &ComplexUnit) -> Result<ComplexUnit> {
    match op {
        BinaryOp::Add => a.sum(b, 1.0),
        BinaryOp::Sub => a.sum(b, -1.0),
        BinaryOp::Mul => Ok(a.product(b, 1.0)),
        BinaryOp::Div => quotient(a, b),
        BinaryOp::Eq => Err(UnitError::UnsupportedOperands {
            op: op.symbol(),
            lhs: "complex unit",
            rhs: "complex unit",
        }),
    }
}

fn quantity(op: BinaryOp, a: &ComplexUnit, b: &ComplexUnit) -> Result<Quantity> {
    combine(op, a, b).map(|c| Quantity::new(1.0, c))
}

fn quotient(a: &ComplexUnit, b: &ComplexUnit) -> Result<ComplexUnit> {
    if b.is_zero() {
        return Err(UnitError::DivisionByZero);
    }
    Ok(a.product(b, -1.0))
}

/// Anything that can stand in a unit expression.
pub(crate) trait Term {
    fn term(&self) -> ComplexUnit;
}

impl Term for Unit {
    fn term(&self) -> ComplexUnit {
        self.to_complex()
    }
}

impl Term for ComplexUnit {
    fn term(&self) -> ComplexUnit {
        self.clone()
    }
}

impl Term for Quantity {
    fn term(&self) -> ComplexUnit {
        self.to_complex_unit()
    }
}

impl Term for f64 {
    fn term(&self) -> ComplexUnit {
        ComplexUnit::scalar(*self)
    }
}

macro_rules! additive {
    ($lhs:ty, $rhs:ty => $out:ty, $wrap:expr) => {
        impl Add<$rhs> for $lhs {
            type Output = Result<$out>;
            fn add(self, rhs: $rhs) -> Self::Output {
                self.term().sum(&rhs.term(), 1.0).map($wrap)
            }
        }

        impl Sub<$rhs> for $lhs {
            type Output = Result<$out>;
            fn sub(self, rhs: $rhs) -> Self::Output {
                self.term().sum(&rhs.term(), -1.0).map($wrap)
            }
        }
    };
}

macro_rules! multiplicative {
    ($lhs:ty, $rhs:ty => $out:ty, $wrap:expr) => {
        impl Mul<$rhs> for $lhs {
            type Output = $out;
            fn mul(self, rhs: $rhs) -> Self::Output {
                ($wrap)(self.term().product(&rhs.term(), 1.0))
            }
        }

        impl Div<$rhs> for $lhs {
            type Output = Result<$out>;
            fn div(self, rhs: $rhs) -> Self::Output {
                quotient(&self.term(), &rhs.term()).map($wrap)
            }
        }
    };
}

/// Expands `$mac` for every owned/borrowed combination of the two operands.
macro_rules! by_ref {
    ($mac:ident, $lhs:ty, $rhs:ty => $out:ty, $wrap:expr) => {
        $mac!($lhs, $rhs => $out, $wrap);
        $mac!(&$lhs, $rhs => $out, $wrap);
        $mac!($lhs, &$rhs => $out, $wrap);
        $mac!(&$lhs, &$rhs => $out, $wrap);
    };
}

macro_rules! unit_pair {
    ($lhs:ty, $rhs:ty) => {
        by_ref!(additive, $lhs, $rhs => ComplexUnit, |c| c);
        by_ref!(multiplicative, $lhs, $rhs => ComplexUnit, |c| c);
    };
}

macro_rules! quantity_pair {
    ($lhs:ty, $rhs:ty) => {
        by_ref!(additive, $lhs, $rhs => Quantity, |c| Quantity::new(1.0, c));
        by_ref!(multiplicative, $lhs, $rhs => Quantity, |c| Quantity::new(1.0, c));
    };
}

macro_rules! scalar_pair {
    ($lhs:ty, $rhs:ty) => {
        by_ref!(multiplicative, $lhs, $rhs => Quantity, |c| Quantity::new(1.0, c));
    };
}

unit_pair!(Unit, Unit);
unit_pair!(Unit, ComplexUnit);
unit_pair!(ComplexUnit, Unit);
unit_pair!(ComplexUnit, ComplexUnit);

quantity_pair!(Quantity, Quantity);
quantity_pair!(Quantity, Unit);
quantity_pair!(Unit, Quantity);
quantity_pair!(Quantity, ComplexUnit);
quantity_pair!(ComplexUnit, Quantity);

scalar_pair!(Unit, f64);
scalar_pair!(f64, Unit);
scalar_pair!(ComplexUnit, f64);
scalar_pair!(f64, ComplexUnit);
scalar_pair!(Quantity, f64);
scalar_pair!(f64, Quantity);

/// Element-wise products and quotients with a sequence of numbers.
macro_rules! sequence_ops {
    ($($unit:ty),*) => {$(
        impl Mul<Vec<f64>> for $unit {
            type Output = Vec<Quantity>;
            fn mul(self, rhs: Vec<f64>) -> Self::Output {
                let unit = self.term();
                rhs.iter().map(|x| Quantity::new(*x, unit.clone())).collect()
            }
        }

        impl Div<Vec<f64>> for $unit {
            type Output = Result<Vec<Quantity>>;
            fn div(self, rhs: Vec<f64>) -> Self::Output {
                let unit = self.term();
                rhs.iter()
                    .map(|x| quotient(&unit, &x.term()).map(|c| Quantity::new(1.0, c)))
                    .collect()
            }
        }

        impl Mul<$unit> for Vec<f64> {
            type Output = Vec<Quantity>;
            fn mul(self, rhs: $unit) -> Self::Output {
                rhs * self
            }
        }

        impl Div<$unit> for Vec<f64> {
            type Output = Result<Vec<Quantity>>;
            fn div(self, rhs: $unit) -> Self::Output {
                let unit = rhs.term();
                self.iter()
                    .map(|x| quotient(&x.term(), &unit).map(|c| Quantity::new(1.0, c)))
                    .collect()
            }
        }
    )*};
}

sequence_ops!(Unit, &Unit, ComplexUnit, &ComplexUnit, Quantity, &Quantity);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::Dimension;
    use crate::registry::UnitRegistry;
    use crate::unit::FixedDef;

    struct Units {
        kg: Unit,
        g: Unit,
        m: Unit,
        s: Unit,
    }

    fn units(reg: &mut UnitRegistry) -> Units {
        let kg = reg.unit("kg", Dimension::MASS);
        let g = reg.intern_fixed(FixedDef::new("g", &kg).multiplier(1e-3));
        Units {
            kg,
            g,
            m: reg.unit("m", Dimension::LENGTH),
            s: reg.unit("s", Dimension::TIME),
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_unit_by_unit() {
        let mut reg = UnitRegistry::new();
        let u = units(&mut reg);
        let area = &u.m * &u.m;
        assert_eq!(area, u.m.powf(2.0));
        assert_eq!(&u.m * &u.s, &u.s * &u.m);
        assert_eq!((&u.m / &u.m).unwrap(), ComplexUnit::dimensionless());
        assert_eq!((&u.m + &u.m).unwrap(), u.m.to_complex().with_multiplier(2.0));
        assert!((&u.m - &u.m).unwrap().is_zero());
        assert!(matches!(
            &u.m + &u.s,
            Err(UnitError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_mixed_unit_and_complex() {
        let mut reg = UnitRegistry::new();
        let u = units(&mut reg);
        let speed = (&u.m / &u.s).unwrap();
        let accel = (&speed / &u.s).unwrap();
        assert_eq!(accel, (&u.m / &u.s.powf(2.0)).unwrap());
        assert_eq!(&accel * &u.s, speed);
        assert_eq!(
            (&u.s * &speed - &u.m).unwrap(),
            u.m.to_complex().with_multiplier(0.0)
        );
    }

    #[test]
    fn test_scalar_makes_quantity() {
        let mut reg = UnitRegistry::new();
        let u = units(&mut reg);
        let q = 5.0 * &u.kg;
        assert_eq!(q.value(), 5.0);
        assert_eq!(q.unit(), &u.kg.to_complex());
        assert_eq!(&u.kg * 5.0, q);

        let half = (&u.kg / 2.0).unwrap();
        assert_eq!(half.value(), 0.5);
        assert!(matches!(&u.kg / 0.0, Err(UnitError::DivisionByZero)));

        let freq = (2.0 / &u.s).unwrap();
        assert_eq!(freq.value(), 2.0);
        assert_eq!(freq.dimension(), -Dimension::TIME);
    }

    #[test]
    fn test_quantity_arithmetic() {
        let mut reg = UnitRegistry::new();
        let u = units(&mut reg);
        let total = ((2.0 * &u.kg) + (500.0 * &u.g)).unwrap();
        assert!(approx(total.value(), 2.5));
        assert_eq!(total.unit(), &u.kg.to_complex());

        let diff = ((1.0 * &u.kg) - &u.g).unwrap();
        assert!(approx(diff.value(), 0.999));

        let work = (3.0 * &u.m) * (2.0 * &u.kg);
        assert_eq!(work.value(), 6.0);
        assert_eq!(work.dimension(), Dimension::LENGTH + Dimension::MASS);

        let rate = ((6.0 * &u.m) / (3.0 * &u.s)).unwrap();
        assert_eq!(rate.value(), 2.0);
        assert!(matches!(
            (1.0 * &u.m) / (0.0 * &u.s),
            Err(UnitError::DivisionByZero)
        ));

        assert_eq!(((4.0 * &u.m) * 0.5).value(), 2.0);
        assert_eq!((8.0 / (2.0 * &u.s)).unwrap().value(), 4.0);
        assert!(matches!(
            (1.0 * &u.m) + (1.0 * &u.s),
            Err(UnitError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_sequences() {
        let mut reg = UnitRegistry::new();
        let u = units(&mut reg);
        let qs = &u.m * vec![1.0, 2.0, 3.0];
        let values: Vec<_> = qs.iter().map(Quantity::value).collect();
        assert_eq!(values, [1.0, 2.0, 3.0]);
        assert!(qs.iter().all(|q| q.unit() == &u.m.to_complex()));

        let inv = (vec![2.0, 4.0] / &u.s).unwrap();
        assert_eq!(inv[1].value(), 4.0);
        assert_eq!(inv[1].dimension(), -Dimension::TIME);

        assert!(matches!(
            &u.s / vec![1.0, 0.0],
            Err(UnitError::DivisionByZero)
        ));
    }

    #[test]
    fn test_dispatch_result_kinds() {
        let mut reg = UnitRegistry::new();
        let u = units(&mut reg);

        assert!(mul(&u.m, &u.s).unwrap().as_complex().is_some());
        assert!(mul(&u.m, 2.0).unwrap().as_quantity().is_some());
        assert!(mul(3.0, u.m.to_complex()).unwrap().as_quantity().is_some());
        assert!(add(5.0 * &u.kg, &u.g).unwrap().as_quantity().is_some());

        let qs = mul(vec![1.0, 2.0], &u.m).unwrap();
        assert_eq!(qs.as_quantities().map(<[_]>::len), Some(2));

        let qs = div(1.0 * &u.m, vec![2.0, 4.0]).unwrap();
        let values: Vec<_> = qs.as_quantities().unwrap().iter().map(Quantity::value).collect();
        assert_eq!(values, [0.5, 0.25]);

        assert_eq!(
            apply(BinaryOp::Eq, (&u.m).into(), (&u.m).into()).unwrap(),
            Value::Bool(true)
        );
        assert!(matches!(pow(&u.m, 3.0).unwrap(), Value::Complex(c) if c == u.m.powf(3.0)));
        assert!(matches!(pow(2.0 * &u.m, 2.0).unwrap(), Value::Quantity(q) if q.value() == 4.0));
    }

    #[test]
    fn test_dispatch_unsupported() {
        let mut reg = UnitRegistry::new();
        let u = units(&mut reg);

        let err = add(&u.m, 1.0).unwrap_err();
        assert_eq!(
            err,
            UnitError::UnsupportedOperands {
                op: "+",
                lhs: "unit",
                rhs: "number"
            }
        );
        assert_eq!(
            err.to_string(),
            "Unsupported operand types for +: unit and number"
        );
        assert!(matches!(
            sub(2.0, &u.g),
            Err(UnitError::UnsupportedOperands { rhs: "fixed unit", .. })
        ));
        assert!(add(1.0, 2.0).is_err());
        assert!(mul(2.0, vec![1.0]).is_err());
        assert!(sub(vec![1.0], &u.m).is_err());
        assert!(pow(2.0, 2.0).is_err());
    }

    #[test]
    fn test_equality_rules() {
        let mut reg = UnitRegistry::new();
        let u = units(&mut reg);

        assert!(eq(&u.m, u.m.to_complex()).unwrap());
        assert!(!eq(&u.m, &u.s).unwrap());
        assert!(eq(5.0 * &u.kg, 5000.0 * &u.g).unwrap());
        assert!(eq(1000.0 * &u.g, &u.kg).unwrap());
        assert!(eq(0.0 * &u.m, 0.0).unwrap());
        assert!(eq((&u.m - &u.m).unwrap(), 0.0).unwrap());
        assert!(matches!(
            eq(1.0 * &u.kg, 1.0 * &u.m),
            Err(UnitError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            eq(1.0 * &u.kg, 1.0),
            Err(UnitError::UnsupportedOperands { .. })
        ));
    }
}
