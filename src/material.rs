use std::collections::BTreeMap;

use crate::error::TraceError;

/// Wavelength at which registry indices are measured.
pub const REFERENCE_WAVELENGTH: f64 = 1000.0;

/// Refractive index of `base` shifted linearly by wavelength.
///
/// Longer wavelengths get a larger index: `base * 0.91` at 100, `base` at 1000, `base * 1.1` at 2000.
pub fn dispersion_adjusted(base: f64, wavelength: f64) -> f64 {
    base * (1.0 + (wavelength - REFERENCE_WAVELENGTH) / 10000.0)
}

/// Base refractive indices by material name.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialRegistry {
    indices: BTreeMap<String, f64>,
}

impl MaterialRegistry {
    pub fn empty() -> Self {
        MaterialRegistry { indices: BTreeMap::new() }
    }

    pub fn insert(&mut self, name: impl Into<String>, index: f64) -> Result<(), TraceError> {
        let name = name.into();
        if !index.is_finite() || index <= 0.0 {
            return Err(TraceError::InvalidIndex { name, index });
        }
        self.indices.insert(name, index);
        Ok(())
    }

    pub fn index_of(&self, name: &str) -> Result<f64, TraceError> {
        self.indices
            .get(name)
            .copied()
            .ok_or_else(|| TraceError::UnknownMaterial(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }

    /// Materials in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.indices.iter().map(|(name, index)| (name.as_str(), *index))
    }
}

impl Default for MaterialRegistry {
    fn default() -> Self {
        let indices = [
            ("germanium", 4.1),
            ("cinnabar", 3.02),
            ("diamond", 2.42),
            ("glass", 1.5),
            ("water", 1.33),
            ("air", 1.0),
        ]
        .into_iter()
        .map(|(name, index)| (name.to_owned(), index))
        .collect();

        MaterialRegistry { indices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispersion_reference_points() {
        let base = 2.42;
        assert!((dispersion_adjusted(base, 100.0) - base * 0.91).abs() < 1e-12);
        assert_eq!(dispersion_adjusted(base, 1000.0), base);
        assert!((dispersion_adjusted(base, 2000.0) - base * 1.1).abs() < 1e-12);
    }

    #[test]
    fn test_dispersion_grows_with_wavelength() {
        let base = 1.5;
        let short = dispersion_adjusted(base, 100.0);
        let reference = dispersion_adjusted(base, 1000.0);
        let long = dispersion_adjusted(base, 2000.0);
        assert!(short < reference && reference < long);
    }

    #[test]
    fn test_default_registry() {
        let registry = MaterialRegistry::default();
        assert_eq!(registry.index_of("diamond"), Ok(2.42));
        assert_eq!(registry.index_of("air"), Ok(1.0));
        assert_eq!(registry.iter().count(), 6);
    }

    #[test]
    fn test_unknown_material_is_an_error() {
        let registry = MaterialRegistry::default();
        assert_eq!(
            registry.index_of("unobtainium"),
            Err(TraceError::UnknownMaterial("unobtainium".into()))
        );
    }

    #[test]
    fn test_insert_validates_index() {
        let mut registry = MaterialRegistry::empty();
        assert!(registry.insert("vacuum", 1.0).is_ok());
        assert!(registry.insert("void", 0.0).is_err());
        assert!(registry.insert("nan", f64::NAN).is_err());
        assert!(registry.contains("vacuum"));
        assert!(!registry.contains("void"));
    }

    #[test]
    fn test_iter_is_name_ordered() {
        let registry = MaterialRegistry::default();
        let names: Vec<_> = registry.iter().map(|(name, _)| name).collect();
        assert_eq!(names.first(), Some(&"air"));
        assert_eq!(names.last(), Some(&"water"));
    }
}
