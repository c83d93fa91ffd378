//! Fixed tables: canonical standard-level depths and the WOD variable-code
//! vocabulary.

/// Canonical standard-level depths in meters.
///
/// Standard-level stations do not encode per-level depths; each level's depth
/// is this table's entry at the level index.
pub const STANDARD_LEVEL_DEPTHS: [f64; 40] = [
    0.0, 10.0, 20.0, 30.0, 50.0, 75.0, 100.0, 125.0, 150.0, 200.0, 250.0, 300.0, 400.0, 500.0,
    600.0, 700.0, 800.0, 900.0, 1000.0, 1100.0, 1200.0, 1300.0, 1400.0, 1500.0, 1750.0, 2000.0,
    2500.0, 3000.0, 3500.0, 4000.0, 4500.0, 5000.0, 5500.0, 6000.0, 6500.0, 7000.0, 7500.0, 8000.0,
    8500.0, 9000.0,
];

/// Short label for a WOD variable code (e.g. 1 = "Temp", 2 = "Sal").
pub fn variable_label(code: i64) -> Option<&'static str> {
    Some(match code {
        1 => "Temp",
        2 => "Sal",
        3 => "Oxy",
        4 => "Phos",
        6 => "Silic",
        7 => "Nitri",
        8 => "Nitra",
        9 => "pH",
        11 => "Chlor",
        17 => "Alka",
        25 => "Pres",
        _ => return None,
    })
}

/// Measurement units for a WOD variable code.
pub fn variable_units(code: i64) -> Option<&'static str> {
    Some(match code {
        1 => "deg C",
        2 => "ppt",
        3 => "ml/l",
        4 | 6 | 7 | 8 => "micromolar",
        9 => "unitless",
        11 => "ug/l",
        17 => "meq/l",
        25 => "dbars",
        _ => return None,
    })
}
