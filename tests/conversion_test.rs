use calckit::app::conversion::cooking::{convert_kitchen, oven_temperature, Ingredient, OvenScale};
use calckit::app::conversion::number_scale::{convert_scale, ScaleUnit};
use calckit::app::conversion::units::{convert, units_in, Category};
use calckit::CalcError;

fn assert_round_trip(value: f64, from: &str, to: &str) {
    let there = convert(value, from, to).unwrap();
    let back = convert(there, to, from).unwrap();
    let tolerance = 1e-9 * value.abs().max(1.0);
    assert!(
        (back - value).abs() <= tolerance,
        "{} {} -> {} -> {} gave {}",
        value,
        from,
        to,
        from,
        back
    );
}

#[test]
fn test_round_trip_across_categories() {
    for category in [
        Category::Length,
        Category::Mass,
        Category::Volume,
        Category::Temperature,
        Category::Data,
    ] {
        let units: Vec<_> = units_in(category).map(|u| u.symbol).collect();
        for from in &units {
            for to in &units {
                for value in [0.0, 1.0, -17.5, 98_765.4321] {
                    assert_round_trip(value, from, to);
                }
            }
        }
    }
}

#[test]
fn test_names_are_case_insensitive() {
    let a = convert(5.0, "KM", "Mile").unwrap();
    let b = convert(5.0, "km", "mi").unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_cross_category_is_rejected() {
    let err = convert(1.0, "cup", "kg").unwrap_err();
    assert!(matches!(err, CalcError::IncompatibleUnits { .. }));
}

#[test]
fn test_kitchen_round_trip_through_density() {
    for ingredient in [
        Ingredient::AllPurposeFlour,
        Ingredient::Honey,
        Ingredient::Butter,
        Ingredient::Water,
    ] {
        let grams = convert_kitchen(2.5, "cup", "g", Some(ingredient)).unwrap();
        let cups = convert_kitchen(grams, "g", "cup", Some(ingredient)).unwrap();
        assert!((cups - 2.5).abs() < 1e-9);
    }
}

#[test]
fn test_oven_scales_agree() {
    let from_gas = oven_temperature(6.0, OvenScale::GasMark);
    assert_eq!(from_gas.fahrenheit, 400.0);
    let from_f = oven_temperature(from_gas.fahrenheit, OvenScale::Fahrenheit);
    let from_c = oven_temperature(from_gas.celsius, OvenScale::Celsius);
    assert_eq!(from_f.gas_mark, 6.0);
    assert!((from_c.fahrenheit - 400.0).abs() < 1e-9);
}

#[test]
fn test_million_billion_round_trip() {
    let crore = convert_scale(2.5, ScaleUnit::Billion, ScaleUnit::Crore);
    assert!((crore - 250.0).abs() < 1e-9);
    let back = convert_scale(crore, ScaleUnit::Crore, ScaleUnit::Billion);
    assert!((back - 2.5).abs() < 1e-12);
}
