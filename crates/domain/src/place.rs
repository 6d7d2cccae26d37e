//! Geographic primitives shared by the Places gateway and the address
//! shortener.

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate pair, in the upstream provider's `{lat, lng}` shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// One entry of an upstream `address_components` list.
///
/// Components arrive ordered from most to least specific; each carries a
/// set of type tags (`locality`, `sublocality_level_1`, ...) plus a long
/// and a short rendering of the name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddressComponent {
    #[serde(default)]
    pub long_name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

impl AddressComponent {
    /// The preferred rendering: short name when present, long name otherwise.
    pub fn preferred_name(&self) -> &str {
        if self.short_name.is_empty() {
            &self.long_name
        } else {
            &self.short_name
        }
    }

    /// True when this component carries any of the given type tags.
    pub fn has_any_type(&self, wanted: &[&str]) -> bool {
        self.types.iter().any(|t| wanted.contains(&t.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferred_name_falls_back_to_long() {
        let c = AddressComponent {
            long_name: "港区".into(),
            short_name: String::new(),
            types: vec!["locality".into()],
        };
        assert_eq!(c.preferred_name(), "港区");
    }

    #[test]
    fn has_any_type_matches_one_of_several() {
        let c = AddressComponent {
            long_name: "赤坂".into(),
            short_name: "赤坂".into(),
            types: vec!["sublocality_level_2".into(), "political".into()],
        };
        assert!(c.has_any_type(&["sublocality", "sublocality_level_2"]));
        assert!(!c.has_any_type(&["locality"]));
    }
}
