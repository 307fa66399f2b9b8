mod common;

use common::{approx, system};
use siunits::{Dimension, FixedDef, Quantity};

#[test]
fn test_kilogram_plus_gram() {
    let si = system();
    let u = si.units();

    let sum = (&u.kilogram + &u.gram).unwrap();
    assert_eq!(sum.dimension(), Dimension::MASS);
    assert_eq!(sum.records(), u.kilogram.to_complex().records());
    assert!(approx(sum.multiplier(), 1.001));
    assert!(approx(sum.si().multiplier(), 1.001));

    // anchored on grams, the same mass reads 1001 g
    let sum = (&u.gram + &u.kilogram).unwrap();
    assert_eq!(sum.records(), u.gram.to_complex().records());
    assert!(approx(sum.multiplier(), 1001.0));
    assert!(approx(sum.si().multiplier(), 1.001));
}

#[test]
fn test_grams_plus_megagrams() {
    let mut si = system();
    let gram = si.units().gram.clone();
    let megagram = si
        .registry_mut()
        .intern_fixed(FixedDef::new("Mg", &gram).multiplier(1e6));

    let total = ((2.0 * &gram) + (3.0 * &megagram)).unwrap();
    assert_eq!(total.unit(), &gram.to_complex());
    assert!(approx(total.value(), 3_000_002.0));
}

#[test]
fn test_atmosphere_in_si() {
    let si = system();
    let u = si.units();

    let atm = u.atmosphere.si();
    assert_eq!(atm, u.pascal.si().with_multiplier(101325.0));
    assert_eq!(
        atm.dimension(),
        Dimension::MASS - Dimension::LENGTH - Dimension::TIME * 2.0
    );
    assert_eq!(Quantity::new(1.0, &u.atmosphere), Quantity::new(101325.0, &u.pascal));
}

#[test]
fn test_newton_expands_to_base_units() {
    let si = system();
    let u = si.units();

    let expected = (&u.kilogram * &u.metre / u.second.powf(2.0)).unwrap();
    let expanded = u.newton.expand();
    assert_eq!(expanded, expected);
    assert_eq!(expanded.multiplier(), 1.0);
}

#[test]
fn test_joule_in_si() {
    let si = system();
    let u = si.units();

    let expected = &u.kilogram * u.metre.powf(2.0) * u.second.powf(-2.0);
    let joule = u.joule.si();
    assert_eq!(joule, expected);
    assert_eq!(joule.multiplier(), 1.0);
}

#[test]
fn test_same_mass_in_different_units() {
    let si = system();
    let u = si.units();

    assert_eq!(Quantity::new(5.0, &u.kilogram), Quantity::new(5000.0, &u.gram));
    assert!(Quantity::new(5.0, &u.kilogram).try_eq(&Quantity::new(5000.0, &u.gram)).unwrap());
    assert_ne!(Quantity::new(5.0, &u.kilogram), Quantity::new(5.0, &u.gram));
}
