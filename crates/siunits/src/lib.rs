//! SI units and quantities with dimension-checked arithmetic.
//!
//! ```
//! use siunits::UnitSystem;
//!
//! let si = UnitSystem::new();
//! let u = si.units();
//! let mass = (5.0 * &u.kilogram + 500.0 * &u.gram).unwrap();
//! assert!((mass.value() - 5.5).abs() < 1e-12);
//! ```

pub mod predefined;

pub use predefined::Predefined;
pub use siunits_core::*;

use log::debug;

/// A registry populated with the [`Predefined`] table, plus handles to
/// those units.
#[derive(Clone, Debug)]
pub struct UnitSystem {
    registry: UnitRegistry,
    units: Predefined,
}

impl UnitSystem {
    pub fn new() -> Self {
        let mut registry = UnitRegistry::new();
        let units = Predefined::bootstrap(&mut registry);
        debug!("unit system ready with {} units", registry.len());
        Self { registry, units }
    }

    pub fn units(&self) -> &Predefined {
        &self.units
    }

    pub fn registry(&self) -> &UnitRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut UnitRegistry {
        &mut self.registry
    }

    pub fn find(&self, symbol: &str) -> Result<Unit> {
        self.registry.find(symbol)
    }

    pub fn find_all(&self, symbol: &str) -> Result<Vec<Unit>> {
        self.registry.find_all(symbol)
    }

    /// Defines `symbol` in terms of an existing unit, expression or quantity.
    pub fn set(&mut self, symbol: &str, value: impl Into<Operand>) -> Result<Unit> {
        self.registry.set(symbol, value)
    }

    pub fn set_with(
        &mut self,
        symbol: &str,
        value: impl Into<Operand>,
        configure: impl FnOnce(FixedDef) -> FixedDef,
    ) -> Result<Unit> {
        self.registry.set_with(symbol, value, configure)
    }
}

impl Default for UnitSystem {
    fn default() -> Self {
        Self::new()
    }
}
