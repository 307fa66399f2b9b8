use std::collections::HashMap;

use log::debug;

use crate::complex::ComplexUnit;
use crate::dimension::Dimension;
use crate::error::{Result, UnitError};
use crate::ops::Operand;
use crate::unit::{FixedDef, Unit, UnitDef};

/// Owns every unit created through it and hands out shared handles.
///
/// Defining the same unit twice returns the handle created the first time;
/// non-identifying details such as the LaTeX symbol keep their first value.
/// Units are kept in creation order.
#[derive(Clone, Debug, Default)]
pub struct UnitRegistry {
    index: HashMap<Unit, usize>,
    units: Vec<Unit>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern_unit(&mut self, def: UnitDef) -> Unit {
        self.intern(Unit::from_base(def))
    }

    /// Interns a fixed unit. Its identity includes its own offset and the
    /// base expression once the definition's multiplier has been folded in.
    pub fn intern_fixed(&mut self, def: FixedDef) -> Unit {
        self.intern(Unit::from_fixed(def))
    }

    /// A base unit with offset 0 and multiplier 1.
    pub fn unit(&mut self, symbol: &str, dimension: Dimension) -> Unit {
        self.intern_unit(UnitDef::new(symbol, dimension))
    }

    /// A fixed unit standing for `base` as is.
    pub fn fixed(&mut self, symbol: &str, base: impl Into<ComplexUnit>) -> Unit {
        self.intern_fixed(FixedDef::new(symbol, base))
    }

    fn intern(&mut self, candidate: Unit) -> Unit {
        if let Some(&idx) = self.index.get(&candidate) {
            return self.units[idx].clone();
        }
        debug!("interned {candidate:?}");
        self.index.insert(candidate.clone(), self.units.len());
        self.units.push(candidate.clone());
        candidate
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Units in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Unit> + '_ {
        self.units.iter()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.units.iter().any(|u| u.symbol() == symbol)
    }

    /// The first unit created with `symbol`.
    pub fn find(&self, symbol: &str) -> Result<Unit> {
        self.units
            .iter()
            .find(|u| u.symbol() == symbol)
            .cloned()
            .ok_or_else(|| UnitError::NotFound {
                symbol: symbol.to_string(),
            })
    }

    /// Every unit created with `symbol`, oldest first.
    pub fn find_all(&self, symbol: &str) -> Result<Vec<Unit>> {
        let found: Vec<Unit> = self
            .units
            .iter()
            .filter(|u| u.symbol() == symbol)
            .cloned()
            .collect();
        if found.is_empty() {
            return Err(UnitError::NotFound {
                symbol: symbol.to_string(),
            });
        }
        Ok(found)
    }

    /// Defines `symbol` as a fixed unit standing for `value`.
    ///
    /// A quantity contributes its value as the scale, a fixed unit its own
    /// definition and a base unit itself. Plain numbers have no unit to
    /// stand for.
    pub fn set(&mut self, symbol: &str, value: impl Into<Operand>) -> Result<Unit> {
        self.set_with(symbol, value, |def| def)
    }

    /// Like [`set`](Self::set), with a chance to adjust the definition
    /// (offset, multiplier, LaTeX symbol) before it is interned.
    pub fn set_with(
        &mut self,
        symbol: &str,
        value: impl Into<Operand>,
        configure: impl FnOnce(FixedDef) -> FixedDef,
    ) -> Result<Unit> {
        let operand = value.into();
        let base = match &operand {
            Operand::Quantity(q) => q.to_complex_unit(),
            Operand::Complex(c) => c.clone(),
            Operand::Unit(u) => match u.base() {
                Some(base) => base.clone(),
                None => u.to_complex(),
            },
            Operand::Scalar(_) | Operand::Sequence(_) => {
                return Err(UnitError::UnsupportedOperands {
                    op: "set",
                    lhs: "symbol",
                    rhs: operand.kind(),
                });
            }
        };
        debug!("set {symbol} = {base}");
        Ok(self.intern_fixed(configure(FixedDef::new(symbol, base))))
    }
}
