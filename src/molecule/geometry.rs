use super::units::Units;
use crate::error::{DriverError, Result};
use nalgebra::Vector3;
use periodic_table_on_an_enum::Element;

/// One parsed atom: element and position in the units it was given in.
#[derive(Debug, Clone)]
pub struct AtomSpec {
    pub element: Element,
    pub position: Vector3<f64>,
}

impl AtomSpec {
    pub fn symbol(&self) -> &'static str {
        self.element.get_symbol()
    }

    pub fn atomic_number(&self) -> u32 {
        self.element.get_atomic_number() as u32
    }

    /// Copy of this atom with its position converted from `units` to Bohr.
    pub fn in_bohr(&self, units: Units) -> AtomSpec {
        AtomSpec {
            element: self.element.clone(),
            position: self.position.map(|c| units.to_bohr(c)),
        }
    }
}

/// Parse a molecule string of the form `"H 0.0 0.0 0.0; H 0.0 0.0 0.735"`.
///
/// Entries are separated by `;` and each must hold exactly one element
/// symbol followed by three coordinates. Symbols are case-insensitive.
pub fn parse_atoms(atoms: &str) -> Result<Vec<AtomSpec>> {
    if atoms.trim().is_empty() {
        return Err(DriverError::parse(atoms, "no atoms specified"));
    }

    atoms.split(';').map(|entry| parse_atom(entry.trim())).collect()
}

fn parse_atom(entry: &str) -> Result<AtomSpec> {
    if entry.is_empty() {
        return Err(DriverError::parse(entry, "empty atom entry"));
    }

    let parts: Vec<&str> = entry.split_whitespace().collect();
    let [symbol, x, y, z] = parts.as_slice() else {
        return Err(DriverError::parse(
            entry,
            format!(
                "expected '<symbol> <x> <y> <z>' but found {} fields",
                parts.len()
            ),
        ));
    };

    let symbol = normalize_symbol(symbol);
    let element = Element::from_symbol(&symbol)
        .ok_or_else(|| DriverError::parse(entry, format!("unknown element symbol '{}'", symbol)))?;

    let position = Vector3::new(
        parse_coordinate(entry, x)?,
        parse_coordinate(entry, y)?,
        parse_coordinate(entry, z)?,
    );

    Ok(AtomSpec { element, position })
}

fn parse_coordinate(entry: &str, raw: &str) -> Result<f64> {
    let value: f64 = raw
        .parse()
        .map_err(|_| DriverError::parse(entry, format!("coordinate '{}' is not a number", raw)))?;
    if !value.is_finite() {
        return Err(DriverError::parse(
            entry,
            format!("coordinate '{}' is not finite", raw),
        ));
    }
    Ok(value)
}

/// `"cL"` -> `"Cl"`
fn normalize_symbol(raw: &str) -> String {
    let lower = raw.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
