use siunits_core::{Dimension, FixedDef, Unit, UnitRegistry};

/// The SI base units and the common derived units built on them.
#[derive(Clone, Debug)]
pub struct Predefined {
    pub kilogram: Unit,
    pub gram: Unit,
    pub milligram: Unit,
    pub metre: Unit,
    pub centimetre: Unit,
    pub millimetre: Unit,
    pub second: Unit,
    pub ampere: Unit,
    pub kelvin: Unit,
    pub mole: Unit,
    pub candela: Unit,
    pub minute: Unit,
    pub hour: Unit,
    pub newton: Unit,
    pub pascal: Unit,
    pub atmosphere: Unit,
    pub litre: Unit,
    pub joule: Unit,
    pub calorie: Unit,
    pub angstrom: Unit,
    pub watt: Unit,
    pub coulomb: Unit,
    pub volt: Unit,
    pub farad: Unit,
    pub ohm: Unit,
    pub weber: Unit,
    pub tesla: Unit,
    pub henry: Unit,
}

impl Predefined {
    /// Defines the table in `registry`. Calling this again on the same
    /// registry returns the units created the first time.
    pub fn bootstrap(registry: &mut UnitRegistry) -> Self {
        let kilogram = registry.unit("kg", Dimension::MASS);
        let gram = registry.intern_fixed(FixedDef::new("g", &kilogram).multiplier(1e-3));
        let milligram = registry.intern_fixed(FixedDef::new("mg", &kilogram).multiplier(1e-6));

        let metre = registry.unit("m", Dimension::LENGTH);
        let centimetre = registry.intern_fixed(FixedDef::new("cm", &metre).multiplier(1e-2));
        let millimetre = registry.intern_fixed(FixedDef::new("mm", &metre).multiplier(1e-3));

        let second = registry.unit("s", Dimension::TIME);
        let ampere = registry.unit("A", Dimension::CURRENT);
        let kelvin = registry.unit("K", Dimension::TEMPERATURE);
        let mole = registry.unit("mol", Dimension::AMOUNT);
        let candela = registry.unit("cd", Dimension::INTENSITY);

        let minute = registry.intern_fixed(FixedDef::new("min", &second).multiplier(60.0));
        let hour = registry.intern_fixed(FixedDef::new("h", &second).multiplier(3600.0));

        let newton = registry.fixed("N", &kilogram * &metre * second.powf(-2.0));
        let pascal = registry.fixed("Pa", &newton * metre.powf(-2.0));
        let atmosphere = registry.intern_fixed(FixedDef::new("atm", &pascal).multiplier(101325.0));
        let litre = registry.intern_fixed(FixedDef::new("L", centimetre.powf(3.0)).multiplier(1000.0));
        let joule = registry.fixed("J", &newton * &metre);
        let calorie = registry.intern_fixed(FixedDef::new("cal", &joule).multiplier(4.184));
        let angstrom = registry.intern_fixed(
            FixedDef::new("Å", &metre)
                .multiplier(1e-10)
                .latex(r"\r{A}"),
        );

        let watt = registry.fixed("W", &joule * second.powf(-1.0));
        let coulomb = registry.fixed("C", &ampere * &second);
        let volt = registry.fixed("V", &joule * coulomb.powf(-1.0));
        let farad = registry.fixed("F", &coulomb * volt.powf(-1.0));
        let ohm = registry.intern_fixed(FixedDef::new("Ω", &volt * ampere.powf(-1.0)).latex(r"\Omega"));
        let weber = registry.fixed("Wb", &volt * &second);
        let tesla = registry.fixed("T", &weber * metre.powf(-2.0));
        let henry = registry.fixed("H", &weber * ampere.powf(-1.0));

        Self {
            kilogram,
            gram,
            milligram,
            metre,
            centimetre,
            millimetre,
            second,
            ampere,
            kelvin,
            mole,
            candela,
            minute,
            hour,
            newton,
            pascal,
            atmosphere,
            litre,
            joule,
            calorie,
            angstrom,
            watt,
            coulomb,
            volt,
            farad,
            ohm,
            weber,
            tesla,
            henry,
        }
    }

    /// Every unit of the table, base units first.
    pub fn all(&self) -> [&Unit; 28] {
        [
            &self.kilogram,
            &self.metre,
            &self.second,
            &self.ampere,
            &self.kelvin,
            &self.mole,
            &self.candela,
            &self.centimetre,
            &self.millimetre,
            &self.gram,
            &self.milligram,
            &self.minute,
            &self.hour,
            &self.newton,
            &self.pascal,
            &self.atmosphere,
            &self.litre,
            &self.joule,
            &self.calorie,
            &self.angstrom,
            &self.watt,
            &self.coulomb,
            &self.volt,
            &self.farad,
            &self.ohm,
            &self.weber,
            &self.tesla,
            &self.henry,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_is_idempotent() {
        let mut registry = UnitRegistry::new();
        let first = Predefined::bootstrap(&mut registry);
        let count = registry.len();
        assert_eq!(count, 28);
        let second = Predefined::bootstrap(&mut registry);
        assert_eq!(registry.len(), count);
        assert_eq!(first.henry, second.henry);
    }

    #[test]
    fn test_dimensions() {
        let mut registry = UnitRegistry::new();
        let u = Predefined::bootstrap(&mut registry);
        let force = Dimension::MASS + Dimension::LENGTH - Dimension::TIME * 2.0;
        assert_eq!(u.newton.dimension(), force);
        assert_eq!(u.pascal.dimension(), force - Dimension::LENGTH * 2.0);
        assert_eq!(u.joule.dimension(), force + Dimension::LENGTH);
        assert_eq!(u.litre.dimension(), Dimension::LENGTH * 3.0);
        assert_eq!(
            u.ohm.dimension(),
            u.volt.dimension() - Dimension::CURRENT
        );
        assert_eq!(u.tesla.dimension(), u.weber.dimension() - Dimension::LENGTH * 2.0);
    }

    #[test]
    fn test_latex_symbols() {
        let mut registry = UnitRegistry::new();
        let u = Predefined::bootstrap(&mut registry);
        assert_eq!(u.angstrom.latex_symbol(), r"\r{A}");
        assert_eq!(u.ohm.latex_symbol(), r"\Omega");
        assert_eq!(u.newton.latex_symbol(), "N");
    }
}
