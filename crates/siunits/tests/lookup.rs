mod common;

use common::system;
use siunits::{Dimension, FixedDef, Quantity, UnitError};

#[test]
fn test_find_predefined() {
    let si = system();
    let u = si.units();
    assert_eq!(si.find("N").unwrap(), u.newton);
    assert_eq!(si.find("Ω").unwrap(), u.ohm);
    assert_eq!(si.find_all("kg").unwrap(), vec![u.kilogram.clone()]);
    assert_eq!(si.registry().len(), u.all().len());
}

#[test]
fn test_find_unknown_symbol() {
    let si = system();
    let err = si.find("furlong").unwrap_err();
    assert_eq!(err, UnitError::NotFound { symbol: "furlong".into() });
    assert_eq!(err.to_string(), "No unit with symbol 'furlong'");
}

#[test]
fn test_set_new_units() {
    let mut si = system();
    let u = si.units().clone();

    let inch = si.set("in", Quantity::new(2.54, &u.centimetre)).unwrap();
    assert!(inch.is_fixed());
    assert_eq!(inch.dimension(), Dimension::LENGTH);
    assert_eq!(si.find("in").unwrap(), inch);

    let foot = si.set("ft", 12.0 * &inch).unwrap();
    let q = Quantity::new(1.0, &foot).to(&u.centimetre).unwrap();
    assert!((q.value() - 30.48).abs() < 1e-9);

    let speed = si.set("kn", (&u.metre / &u.second).unwrap()).unwrap();
    assert_eq!(speed.dimension(), Dimension::LENGTH - Dimension::TIME);

    assert!(si.set("two", 2.0).is_err());
}

#[test]
fn test_shadowed_symbols() {
    let mut si = system();
    let u = si.units().clone();
    let tonne = si
        .registry_mut()
        .intern_fixed(FixedDef::new("t", &u.kilogram).multiplier(1e3));
    let ton = si
        .registry_mut()
        .intern_fixed(FixedDef::new("t", &u.kilogram).multiplier(907.18474));

    assert_ne!(tonne, ton);
    assert_eq!(si.find("t").unwrap(), tonne);
    assert_eq!(si.find_all("t").unwrap(), vec![tonne.clone(), ton.clone()]);

    let sum = (&tonne + &ton).unwrap();
    assert!((sum.si().multiplier() - 1907.18474).abs() < 1e-9);

    let product = &tonne * &ton;
    assert_eq!(product.records().len(), 2);
    assert!((product.si().multiplier() - 907184.74).abs() < 1e-6);
    assert_eq!(product.dimension(), Dimension::MASS * 2.0);
}
