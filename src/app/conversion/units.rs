//! General unit conversion. Every unit maps onto its category's base unit
//! through `base = value × scale + offset`; only temperatures use an offset.

use crate::domain::model::Report;
use crate::domain::ports::Reportable;
use crate::utils::error::{CalcError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Length,
    Mass,
    Volume,
    Area,
    Speed,
    Time,
    Data,
    Energy,
    Pressure,
    Temperature,
}

#[derive(Debug)]
pub struct UnitDef {
    pub symbol: &'static str,
    pub aliases: &'static [&'static str],
    pub category: Category,
    pub scale: f64,
    pub offset: f64,
}

impl UnitDef {
    pub fn to_base(&self, value: f64) -> f64 {
        value * self.scale + self.offset
    }

    pub fn from_base(&self, base: f64) -> f64 {
        (base - self.offset) / self.scale
    }

    fn matches(&self, name: &str) -> bool {
        self.symbol.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(name))
    }
}

const fn unit(
    symbol: &'static str,
    aliases: &'static [&'static str],
    category: Category,
    scale: f64,
) -> UnitDef {
    UnitDef {
        symbol,
        aliases,
        category,
        scale,
        offset: 0.0,
    }
}

use Category::*;

static UNITS: &[UnitDef] = &[
    // length → metre
    unit("um", &["micrometer", "micrometre", "micron"], Length, 1e-6),
    unit("mm", &["millimeter", "millimetre"], Length, 0.001),
    unit("cm", &["centimeter", "centimetre"], Length, 0.01),
    unit("m", &["meter", "metre"], Length, 1.0),
    unit("km", &["kilometer", "kilometre"], Length, 1000.0),
    unit("in", &["inch", "inches"], Length, 0.0254),
    unit("ft", &["foot", "feet"], Length, 0.3048),
    unit("yd", &["yard", "yards"], Length, 0.9144),
    unit("mi", &["mile", "miles"], Length, 1609.344),
    unit("nmi", &["nautical mile", "nautical_mile"], Length, 1852.0),
    // mass → kilogram
    unit("mg", &["milligram"], Mass, 1e-6),
    unit("g", &["gram", "grams"], Mass, 0.001),
    unit("kg", &["kilogram", "kilograms"], Mass, 1.0),
    unit("t", &["tonne", "metric ton"], Mass, 1000.0),
    unit("oz", &["ounce", "ounces"], Mass, 0.028_349_523_125),
    unit("lb", &["lbs", "pound", "pounds"], Mass, 0.453_592_37),
    unit("st", &["stone"], Mass, 6.350_293_18),
    // volume → litre
    unit("ml", &["milliliter", "millilitre"], Volume, 0.001),
    unit("l", &["liter", "litre", "liters", "litres"], Volume, 1.0),
    unit("m3", &["cubic meter", "cubic metre"], Volume, 1000.0),
    unit("tsp", &["teaspoon", "teaspoons"], Volume, 0.004_928_921_593_75),
    unit("tbsp", &["tablespoon", "tablespoons"], Volume, 0.014_786_764_781_25),
    unit("floz", &["fl oz", "fluid ounce", "fl_oz"], Volume, 0.029_573_529_562_5),
    unit("cup", &["cups"], Volume, 0.236_588_236_5),
    unit("pt", &["pint", "pints"], Volume, 0.473_176_473),
    unit("qt", &["quart", "quarts"], Volume, 0.946_352_946),
    unit("gal", &["gallon", "gallons"], Volume, 3.785_411_784),
    unit("impgal", &["imperial gallon", "imp gal"], Volume, 4.546_09),
    // area → square metre
    unit("mm2", &["square millimeter"], Area, 1e-6),
    unit("cm2", &["square centimeter"], Area, 1e-4),
    unit("m2", &["square meter", "square metre", "sqm"], Area, 1.0),
    unit("ha", &["hectare", "hectares"], Area, 1e4),
    unit("km2", &["square kilometer"], Area, 1e6),
    unit("in2", &["square inch"], Area, 0.000_645_16),
    unit("ft2", &["square foot", "square feet", "sqft"], Area, 0.092_903_04),
    unit("yd2", &["square yard"], Area, 0.836_127_36),
    unit("acre", &["acres"], Area, 4_046.856_422_4),
    unit("mi2", &["square mile"], Area, 2_589_988.110_336),
    // speed → metre per second
    unit("m/s", &["mps"], Speed, 1.0),
    unit("km/h", &["kph", "kmh"], Speed, 1.0 / 3.6),
    unit("mph", &["mi/h"], Speed, 0.447_04),
    unit("kn", &["knot", "knots"], Speed, 1852.0 / 3600.0),
    unit("ft/s", &["fps"], Speed, 0.3048),
    // time → second
    unit("ms", &["millisecond", "milliseconds"], Time, 0.001),
    unit("s", &["sec", "second", "seconds"], Time, 1.0),
    unit("min", &["minute", "minutes"], Time, 60.0),
    unit("h", &["hr", "hour", "hours"], Time, 3600.0),
    unit("day", &["days", "d"], Time, 86_400.0),
    unit("week", &["weeks", "wk"], Time, 604_800.0),
    unit("year", &["years", "yr"], Time, 31_557_600.0),
    // data → byte
    unit("bit", &["bits"], Data, 0.125),
    unit("byte", &["bytes"], Data, 1.0),
    unit("kb", &["kilobyte"], Data, 1e3),
    unit("mb", &["megabyte"], Data, 1e6),
    unit("gb", &["gigabyte"], Data, 1e9),
    unit("tb", &["terabyte"], Data, 1e12),
    unit("kib", &["kibibyte"], Data, 1024.0),
    unit("mib", &["mebibyte"], Data, 1_048_576.0),
    unit("gib", &["gibibyte"], Data, 1_073_741_824.0),
    unit("tib", &["tebibyte"], Data, 1_099_511_627_776.0),
    // energy → joule
    unit("j", &["joule", "joules"], Energy, 1.0),
    unit("kj", &["kilojoule", "kilojoules"], Energy, 1000.0),
    unit("cal", &["calorie", "calories"], Energy, 4.184),
    unit("kcal", &["kilocalorie", "kilocalories"], Energy, 4184.0),
    unit("wh", &["watt hour"], Energy, 3600.0),
    unit("kwh", &["kilowatt hour"], Energy, 3.6e6),
    unit("btu", &[], Energy, 1_055.055_852_62),
    // pressure → pascal
    unit("pa", &["pascal"], Pressure, 1.0),
    unit("kpa", &["kilopascal"], Pressure, 1000.0),
    unit("bar", &[], Pressure, 1e5),
    unit("psi", &[], Pressure, 6_894.757_293_168),
    unit("atm", &["atmosphere"], Pressure, 101_325.0),
    unit("mmhg", &["torr"], Pressure, 133.322_387_415),
    // temperature → kelvin
    UnitDef {
        symbol: "c",
        aliases: &["celsius", "°c", "degc"],
        category: Temperature,
        scale: 1.0,
        offset: 273.15,
    },
    UnitDef {
        symbol: "f",
        aliases: &["fahrenheit", "°f", "degf"],
        category: Temperature,
        scale: 5.0 / 9.0,
        offset: 459.67 * 5.0 / 9.0,
    },
    UnitDef {
        symbol: "k",
        aliases: &["kelvin"],
        category: Temperature,
        scale: 1.0,
        offset: 0.0,
    },
    UnitDef {
        symbol: "r",
        aliases: &["rankine", "°r"],
        category: Temperature,
        scale: 5.0 / 9.0,
        offset: 0.0,
    },
];

pub fn find_unit(name: &str) -> Result<&'static UnitDef> {
    let name = name.trim();
    UNITS
        .iter()
        .find(|u| u.matches(name))
        .ok_or_else(|| CalcError::UnknownUnit {
            unit: name.to_string(),
        })
}

pub fn units_in(category: Category) -> impl Iterator<Item = &'static UnitDef> {
    UNITS.iter().filter(move |u| u.category == category)
}

pub fn convert(value: f64, from: &str, to: &str) -> Result<f64> {
    let from_unit = find_unit(from)?;
    let to_unit = find_unit(to)?;
    if from_unit.category != to_unit.category {
        return Err(CalcError::IncompatibleUnits {
            from: from_unit.symbol.to_string(),
            to: to_unit.symbol.to_string(),
        });
    }
    Ok(to_unit.from_base(from_unit.to_base(value)))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub value: f64,
    pub from: String,
    pub to: String,
    pub result: f64,
}

pub fn conversion(value: f64, from: &str, to: &str) -> Result<Conversion> {
    let result = convert(value, from, to)?;
    Ok(Conversion {
        value,
        from: find_unit(from)?.symbol.to_string(),
        to: find_unit(to)?.symbol.to_string(),
        result,
    })
}

impl Reportable for Conversion {
    fn to_report(&self) -> Report {
        Report::new("Unit Conversion")
            .line_with_unit("input", self.value, self.from.clone())
            .line_with_unit("result", self.result, self.to.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_known_factors() {
        assert!(close(convert(1.0, "mi", "km").unwrap(), 1.609344));
        assert!(close(convert(1.0, "lb", "g").unwrap(), 453.59237));
        assert!(close(convert(1.0, "gal", "cup").unwrap(), 16.0));
        assert!(close(convert(1.0, "GiB", "MiB").unwrap(), 1024.0));
        assert!(close(convert(1.0, "kWh", "kJ").unwrap(), 3600.0));
        assert!(close(convert(1.0, "atm", "kpa").unwrap(), 101.325));
        assert!(close(convert(36.0, "km/h", "m/s").unwrap(), 10.0));
    }

    #[test]
    fn test_temperature_is_affine() {
        assert!(close(convert(100.0, "C", "F").unwrap(), 212.0));
        assert!(close(convert(32.0, "fahrenheit", "celsius").unwrap(), 0.0));
        assert!(close(convert(0.0, "k", "c").unwrap(), -273.15));
        assert!(close(convert(491.67, "r", "f").unwrap(), 32.0));
        assert!(close(convert(-40.0, "c", "f").unwrap(), -40.0));
    }

    #[test]
    fn test_round_trip_every_pair() {
        let categories = [
            Length, Mass, Volume, Area, Speed, Time, Data, Energy, Pressure, Temperature,
        ];
        for category in categories {
            let units: Vec<_> = units_in(category).collect();
            for a in &units {
                for b in &units {
                    let there = convert(123.456, a.symbol, b.symbol).unwrap();
                    let back = convert(there, b.symbol, a.symbol).unwrap();
                    assert!(close(back, 123.456), "{} -> {} -> {}", a.symbol, b.symbol, a.symbol);
                }
            }
        }
    }

    #[test]
    fn test_unknown_and_incompatible_units() {
        assert!(matches!(
            convert(1.0, "furlong", "m"),
            Err(CalcError::UnknownUnit { .. })
        ));
        assert!(matches!(
            convert(1.0, "kg", "m"),
            Err(CalcError::IncompatibleUnits { .. })
        ));
    }

    #[test]
    fn test_aliases_resolve_to_symbol() {
        let c = conversion(2.0, "Pounds", "kilogram").unwrap();
        assert_eq!(c.from, "lb");
        assert_eq!(c.to, "kg");
    }

    #[test]
    fn test_bare_b_is_not_a_byte() {
        assert!(matches!(find_unit("b"), Err(CalcError::UnknownUnit { .. })));
        assert!(close(convert(8.0, "bit", "byte").unwrap(), 1.0));
        assert!(close(convert(1.0, "mb", "bytes").unwrap(), 1e6));
    }
}
