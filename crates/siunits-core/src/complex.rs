use std::cmp::Ordering;
use std::fmt;

use log::trace;

use crate::dimension::{Dimension, cmp_f64};
use crate::error::{Result, UnitError};
use crate::exponent_map::ExponentMap;
use crate::format::{self, FormatOptions};
use crate::unit::Unit;

/// A product of powers of units, e.g. `kg⋅m / s^2`, with an overall scale.
///
/// The multiplier of every unit in `records` is folded into `multiplier`
/// when the unit is first brought in, so inside `records` a unit only
/// contributes its symbol, dimension and definition. Values are never
/// modified after construction; every operation returns a new one.
#[derive(Clone, Debug)]
pub struct ComplexUnit {
    records: ExponentMap<Unit>,
    dimension: Dimension,
    offset: f64,
    multiplier: f64,
    depth: usize,
}

impl ComplexUnit {
    /// Builds a composite from `records`, folding each unit's multiplier
    /// (raised to its exponent) into `multiplier`.
    pub fn new(records: ExponentMap<Unit>, offset: f64, multiplier: f64) -> Self {
        let multiplier = records
            .iter()
            .fold(multiplier, |acc, (unit, exp)| acc * unit.multiplier().powf(exp));
        Self::from_parts(records, offset, multiplier)
    }

    /// Builds a composite whose records are already folded.
    pub(crate) fn from_parts(records: ExponentMap<Unit>, offset: f64, multiplier: f64) -> Self {
        let dimension: Dimension = records
            .iter()
            .map(|(unit, exp)| unit.dimension() * exp)
            .sum();
        let depth = records
            .keys()
            .map(|unit| unit.depth() + 1)
            .max()
            .unwrap_or(0);
        Self {
            records,
            dimension,
            offset,
            multiplier,
            depth,
        }
    }

    /// No records, multiplier 1.
    pub fn dimensionless() -> Self {
        Self::scalar(1.0)
    }

    /// No records, the given multiplier.
    pub fn scalar(multiplier: f64) -> Self {
        Self::from_parts(ExponentMap::new(), 0.0, multiplier)
    }

    pub fn records(&self) -> &ExponentMap<Unit> {
        &self.records
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn with_multiplier(&self, multiplier: f64) -> Self {
        Self {
            multiplier,
            ..self.clone()
        }
    }

    pub fn is_zero(&self) -> bool {
        self.multiplier == 0.0
    }

    pub fn is_dimensionless(&self) -> bool {
        self.dimension.is_dimensionless()
    }

    /// True when the composite or any of its units carries an offset.
    pub fn is_affine(&self) -> bool {
        self.offset != 0.0 || self.records.keys().any(Unit::is_affine)
    }

    /// Equal in everything except the multiplier.
    pub fn eq_except_multiplier(&self, other: &Self) -> bool {
        self.dimension == other.dimension
            && self.offset == other.offset
            && self.records == other.records
    }

    /// Replaces the deepest fixed unit by its definition.
    ///
    /// When several units share the maximal depth the first one in display
    /// order is expanded. Returns an unchanged copy once only base units
    /// remain.
    pub fn expand(&self) -> Self {
        let deepest = self
            .records
            .iter()
            .fold(None::<(&Unit, f64)>, |best, (unit, exp)| match best {
                Some((b, _)) if b.depth() >= unit.depth() => best,
                _ => Some((unit, exp)),
            });
        let Some((unit, exp, base)) =
            deepest.and_then(|(unit, exp)| unit.base().map(|base| (unit, exp, base)))
        else {
            return self.clone();
        };

        let mut records = self.records.clone();
        records.remove(unit);
        merge_into(&mut records, base.records(), exp);
        let multiplier = self.multiplier * base.multiplier().powf(exp);
        trace!("expanded {unit}^{exp} into {base}");
        Self::from_parts(records, self.offset, multiplier)
    }

    /// Total order agreeing with `==`: multiplier, offset, dimension, then
    /// the records in display order.
    pub(crate) fn structural_cmp(&self, other: &Self) -> Ordering {
        cmp_f64(self.multiplier, other.multiplier)
            .then_with(|| cmp_f64(self.offset, other.offset))
            .then_with(|| self.dimension.cmp(&other.dimension))
            .then_with(|| {
                let mut rhs = other.records.iter();
                for (unit, exp) in self.records.iter() {
                    let Some((other_unit, other_exp)) = rhs.next() else {
                        return Ordering::Greater;
                    };
                    let ord = unit.cmp(other_unit).then_with(|| cmp_f64(exp, other_exp));
                    if ord.is_ne() {
                        return ord;
                    }
                }
                if rhs.next().is_some() {
                    Ordering::Less
                } else {
                    Ordering::Equal
                }
            })
    }

    /// Expands until only base units remain.
    pub fn expand_all(&self) -> Self {
        let mut current = self.clone();
        while current.records.keys().any(Unit::is_fixed) {
            current = current.expand();
        }
        current
    }

    /// Fully reduced to base units, with the combined scale as multiplier.
    pub fn si(&self) -> Self {
        let mut records = ExponentMap::new();
        let mut multiplier = self.multiplier;
        for (unit, exp) in self.records.iter() {
            match unit.base() {
                Some(base) => {
                    let reduced = base.si();
                    merge_into(&mut records, reduced.records(), exp);
                    multiplier *= reduced.multiplier().powf(exp);
                }
                None => merge_into(&mut records, &ExponentMap::single(unit.clone(), exp), 1.0),
            }
        }
        Self::from_parts(records, self.offset, multiplier)
    }

    /// Expresses `self` as a count of `target`: the result has `target`'s
    /// records and a multiplier of `self.si() / target.si()`.
    pub fn to(&self, target: &ComplexUnit) -> Result<Self> {
        if self.is_affine() || target.is_affine() {
            return Err(UnitError::AffineUnsupported { op: "convert" });
        }
        UnitError::check_dimensions(
            self.dimension,
            target.dimension,
            "Cannot convert units with different dimensions",
        )?;
        let target_scale = target.si().multiplier;
        if target_scale == 0.0 {
            return Err(UnitError::DivisionByZero);
        }
        let factor = self.si().multiplier / target_scale;
        trace!("conversion factor from {self} to {target}: {factor}");
        Ok(target.with_multiplier(factor))
    }

    pub fn powf(&self, exponent: f64) -> Self {
        Self::from_parts(
            self.records.scaled(exponent),
            self.offset,
            self.multiplier.powf(exponent),
        )
    }

    /// `self + rhs` (`sign` 1) or `self - rhs` (`sign` -1).
    ///
    /// The result keeps the records of `self`. The right-hand side is
    /// counted in those records: directly when both share their records,
    /// through the ratio of their SI scales otherwise.
    pub(crate) fn sum(&self, rhs: &Self, sign: f64) -> Result<Self> {
        let (op, context) = if sign < 0.0 {
            ("subtract", "Cannot subtract units with different dimensions")
        } else {
            ("add", "Cannot add units with different dimensions")
        };
        if self.is_affine() || rhs.is_affine() {
            return Err(UnitError::AffineUnsupported { op });
        }
        UnitError::check_dimensions(self.dimension, rhs.dimension, context)?;

        let rhs_count = if self.eq_except_multiplier(rhs) {
            rhs.multiplier
        } else {
            let anchor = self.with_multiplier(1.0).si().multiplier;
            if anchor == 0.0 {
                return Err(UnitError::DivisionByZero);
            }
            let count = rhs.si().multiplier / anchor;
            trace!("{op}: {rhs} counts as {count} of {}", self.with_multiplier(1.0));
            count
        };
        Ok(Self::from_parts(
            self.records.clone(),
            self.offset,
            self.multiplier + sign * rhs_count,
        ))
    }

    /// `self * rhs` (`sign` 1) or `self / rhs` (`sign` -1).
    pub(crate) fn product(&self, rhs: &Self, sign: f64) -> Self {
        let mut records = self.records.clone();
        merge_into(&mut records, &rhs.records, sign);
        Self::from_parts(
            records,
            self.offset,
            self.multiplier * rhs.multiplier.powf(sign),
        )
    }

    pub fn to_latex(&self) -> String {
        format::format_latex(self)
    }

    pub fn to_string_with(&self, options: &FormatOptions) -> String {
        format::format_unit(self, options)
    }
}

/// Adds `other` scaled by `factor` into `records`.
///
/// Units that differ from an existing key only by their (already folded)
/// multiplier are merged into whichever of the two sorts first, so the
/// result does not depend on the order of the operands.
fn merge_into(records: &mut ExponentMap<Unit>, other: &ExponentMap<Unit>, factor: f64) {
    for (unit, exp) in other.iter() {
        let delta = exp * factor;
        if records.contains_key(unit) {
            records.add(unit.clone(), delta);
            continue;
        }
        let sibling = records.keys().find(|k| k.same_family(unit)).cloned();
        match sibling {
            Some(existing) if existing < *unit => records.add(existing, delta),
            Some(existing) => {
                let current = records.remove(&existing).unwrap_or(0.0);
                records.add(unit.clone(), current + delta);
            }
            None => records.add(unit.clone(), delta),
        }
    }
}

impl PartialEq for ComplexUnit {
    fn eq(&self, other: &Self) -> bool {
        self.eq_except_multiplier(other) && self.multiplier == other.multiplier
    }
}

/// `{unit: 1}` with the unit's multiplier.
impl PartialEq<Unit> for ComplexUnit {
    fn eq(&self, other: &Unit) -> bool {
        self.offset == other.offset()
            && self.multiplier == other.multiplier()
            && self.records.len() == 1
            && self.records.get(other) == 1.0
    }
}

impl PartialEq<ComplexUnit> for Unit {
    fn eq(&self, other: &ComplexUnit) -> bool {
        other == self
    }
}

impl fmt::Display for ComplexUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format::format_plain(self, None))
    }
}
