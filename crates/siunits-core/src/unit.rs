use std::cmp::{Ordering, Reverse};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::complex::ComplexUnit;
use crate::dimension::{Dimension, cmp_f64, f64_key};
use crate::error::Result;
use crate::exponent_map::ExponentMap;

/// An atomic, named unit.
///
/// `Unit` is a handle: cloning it is cheap and all clones share the same
/// immutable definition. Handles are handed out by
/// [`UnitRegistry`](crate::UnitRegistry), which guarantees that a given
/// definition is created only once.
#[derive(Clone)]
pub struct Unit(Arc<UnitData>);

struct UnitData {
    symbol: String,
    latex_symbol: String,
    dimension: Dimension,
    offset: f64,
    multiplier: f64,
    depth: usize,
    kind: UnitKind,
}

#[derive(Clone, Debug)]
pub enum UnitKind {
    /// Stands on its own; depth 0.
    Base,
    /// A name for a composite expression, e.g. `N` for `kg⋅m / s^2`. The
    /// expression carries the whole scale, so the unit's own multiplier is 1.
    Fixed(ComplexUnit),
}

impl Unit {
    pub(crate) fn from_base(def: UnitDef) -> Self {
        let latex_symbol = def.latex_symbol.unwrap_or_else(|| def.symbol.clone());
        Self(Arc::new(UnitData {
            symbol: def.symbol,
            latex_symbol,
            dimension: def.dimension,
            offset: def.offset,
            multiplier: def.multiplier,
            depth: 0,
            kind: UnitKind::Base,
        }))
    }

    pub(crate) fn from_fixed(def: FixedDef) -> Self {
        let base = def.folded_base();
        let latex_symbol = def.latex_symbol.unwrap_or_else(|| def.symbol.clone());
        Self(Arc::new(UnitData {
            symbol: def.symbol,
            latex_symbol,
            dimension: base.dimension(),
            offset: def.offset,
            multiplier: 1.0,
            depth: base.depth() + 1,
            kind: UnitKind::Fixed(base),
        }))
    }

    pub fn symbol(&self) -> &str {
        &self.0.symbol
    }

    pub fn latex_symbol(&self) -> &str {
        &self.0.latex_symbol
    }

    pub fn dimension(&self) -> Dimension {
        self.0.dimension
    }

    pub fn offset(&self) -> f64 {
        self.0.offset
    }

    pub fn multiplier(&self) -> f64 {
        self.0.multiplier
    }

    pub fn depth(&self) -> usize {
        self.0.depth
    }

    pub fn kind(&self) -> &UnitKind {
        &self.0.kind
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self.0.kind, UnitKind::Fixed(_))
    }

    /// The expression a fixed unit stands for.
    pub fn base(&self) -> Option<&ComplexUnit> {
        match &self.0.kind {
            UnitKind::Base => None,
            UnitKind::Fixed(base) => Some(base),
        }
    }

    /// True when this unit, or anything it is defined in terms of, has a
    /// nonzero offset.
    pub fn is_affine(&self) -> bool {
        self.0.offset != 0.0 || self.base().is_some_and(ComplexUnit::is_affine)
    }

    pub fn powf(&self, exponent: f64) -> ComplexUnit {
        ComplexUnit::new(ExponentMap::single(self.clone(), exponent), 0.0, 1.0)
    }

    /// `self` raised to the first power.
    pub fn to_complex(&self) -> ComplexUnit {
        self.powf(1.0)
    }

    /// One level of definition: the base expression of a fixed unit, the
    /// unit itself otherwise.
    pub fn expand(&self) -> ComplexUnit {
        match &self.0.kind {
            UnitKind::Base => self.to_complex(),
            UnitKind::Fixed(base) => base.clone(),
        }
    }

    /// Fully reduced to base units.
    pub fn si(&self) -> ComplexUnit {
        match &self.0.kind {
            UnitKind::Base => self.to_complex(),
            UnitKind::Fixed(base) => base.si(),
        }
    }

    /// How many `target`s make up one `self`.
    pub fn to(&self, target: &ComplexUnit) -> Result<ComplexUnit> {
        self.to_complex().to(target)
    }

    pub fn to_latex(&self) -> String {
        format!("$\\mathrm{{{}}}$", self.0.latex_symbol)
    }

    /// Base units with the same symbol, dimension and offset; only the scale
    /// may differ. Fixed units are never merged this way.
    pub(crate) fn same_family(&self, other: &Unit) -> bool {
        matches!(
            (&self.0.kind, &other.0.kind),
            (UnitKind::Base, UnitKind::Base)
        ) && self.0.symbol == other.0.symbol
            && self.0.dimension == other.0.dimension
            && self.0.offset == other.0.offset
    }

    fn sort_key(&self) -> (Reverse<usize>, bool, &str) {
        let symbol = self.0.symbol.as_str();
        let lowercase_first = !symbol.chars().next().is_some_and(char::is_uppercase);
        (Reverse(symbol.chars().count()), lowercase_first, symbol)
    }
}

/// Two units are equal when they share symbol, dimension, offset and scale
/// and, for fixed units, the same definition. The LaTeX symbol does not
/// take part.
impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Unit {}

impl Hash for Unit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.is_fixed().hash(state);
        self.0.symbol.hash(state);
        self.0.dimension.hash(state);
        f64_key(self.0.offset).hash(state);
        f64_key(self.0.multiplier).hash(state);
        if let Some(base) = self.base() {
            f64_key(base.multiplier()).hash(state);
            base.records().len().hash(state);
        }
    }
}

impl PartialOrd for Unit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Display order: longer symbols first, then symbols starting with an
/// uppercase letter, then alphabetical. Units sharing a symbol are ordered by
/// ascending multiplier, then base units before fixed ones.
impl Ord for Unit {
    fn cmp(&self, other: &Self) -> Ordering {
        if Arc::ptr_eq(&self.0, &other.0) {
            return Ordering::Equal;
        }
        self.sort_key()
            .cmp(&other.sort_key())
            .then_with(|| cmp_f64(self.0.multiplier, other.0.multiplier))
            .then_with(|| self.0.dimension.cmp(&other.0.dimension))
            .then_with(|| cmp_f64(self.0.offset, other.0.offset))
            .then_with(|| match (self.base(), other.base()) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (Some(a), Some(b)) => a.structural_cmp(b),
            })
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.symbol)
    }
}

impl fmt::Debug for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(if self.is_fixed() { "FixedUnit" } else { "Unit" });
        s.field("symbol", &self.0.symbol)
            .field("dimension", &self.0.dimension.to_string());
        if self.0.offset != 0.0 {
            s.field("offset", &self.0.offset);
        }
        if self.0.multiplier != 1.0 {
            s.field("multiplier", &self.0.multiplier);
        }
        s.finish()
    }
}

/// Definition of a base unit, interned with
/// [`UnitRegistry::intern_unit`](crate::UnitRegistry::intern_unit).
#[derive(Clone, Debug)]
pub struct UnitDef {
    pub(crate) symbol: String,
    pub(crate) dimension: Dimension,
    pub(crate) offset: f64,
    pub(crate) multiplier: f64,
    pub(crate) latex_symbol: Option<String>,
}

impl UnitDef {
    pub fn new(symbol: impl Into<String>, dimension: Dimension) -> Self {
        Self {
            symbol: symbol.into(),
            dimension,
            offset: 0.0,
            multiplier: 1.0,
            latex_symbol: None,
        }
    }

    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Scale relative to the SI unit of the same dimension.
    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn latex(mut self, latex_symbol: impl Into<String>) -> Self {
        self.latex_symbol = Some(latex_symbol.into());
        self
    }
}

/// Definition of a fixed unit, interned with
/// [`UnitRegistry::intern_fixed`](crate::UnitRegistry::intern_fixed).
///
/// `multiplier` scales the base expression: `g` is `kg` with multiplier
/// `1e-3`.
#[derive(Clone, Debug)]
pub struct FixedDef {
    pub(crate) symbol: String,
    pub(crate) base: ComplexUnit,
    pub(crate) offset: f64,
    pub(crate) multiplier: f64,
    pub(crate) latex_symbol: Option<String>,
}

impl FixedDef {
    pub fn new(symbol: impl Into<String>, base: impl Into<ComplexUnit>) -> Self {
        Self {
            symbol: symbol.into(),
            base: base.into(),
            offset: 0.0,
            multiplier: 1.0,
            latex_symbol: None,
        }
    }

    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn latex(mut self, latex_symbol: impl Into<String>) -> Self {
        self.latex_symbol = Some(latex_symbol.into());
        self
    }

    /// The base expression with the definition's multiplier folded in.
    pub(crate) fn folded_base(&self) -> ComplexUnit {
        self.base.with_multiplier(self.base.multiplier() * self.multiplier)
    }
}

impl From<Unit> for ComplexUnit {
    fn from(unit: Unit) -> Self {
        unit.to_complex()
    }
}

impl From<&Unit> for ComplexUnit {
    fn from(unit: &Unit) -> Self {
        unit.to_complex()
    }
}
