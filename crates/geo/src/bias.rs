//! Location-bias encoding for upstream Places calls.
//!
//! The wire form is `circle:{radius_meters}@{lat},{lng}`. Radius precedence
//! is `radius` > `radius_m` > `radius_km * 1000`, defaulting to 8 km, and
//! the final value is clipped to `[1, 50000]` meters.

/// Default bias radius when coordinates are present but no radius field is.
pub const DEFAULT_RADIUS_M: i64 = 8_000;

/// Upstream maximum bias radius.
pub const MAX_RADIUS_M: i64 = 50_000;

/// An optional geographic hint. Encodes to the upstream `circle:` form only
/// when both coordinates are present.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocationBias {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    /// Radius in meters; highest precedence.
    pub radius: Option<i64>,
    /// Radius in meters.
    pub radius_m: Option<i64>,
    /// Radius in kilometers; lowest precedence.
    pub radius_km: Option<f64>,
}

impl LocationBias {
    /// A bias centered on a point with the default radius.
    pub fn from_point(lat: f64, lng: f64) -> Self {
        Self {
            lat: Some(lat),
            lng: Some(lng),
            ..Self::default()
        }
    }

    /// The effective radius in meters after precedence and clipping.
    pub fn effective_radius_m(&self) -> i64 {
        self.radius
            .or(self.radius_m)
            .or(self.radius_km.map(|km| (km * 1000.0) as i64))
            .unwrap_or(DEFAULT_RADIUS_M)
            .clamp(1, MAX_RADIUS_M)
    }

    /// Encode to `circle:{r}@{lat},{lng}`, or `None` when either coordinate
    /// is absent. Coordinates keep their input precision.
    pub fn encode(&self) -> Option<String> {
        let (lat, lng) = (self.lat?, self.lng?);
        Some(format!("circle:{}@{},{}", self.effective_radius_m(), lat, lng))
    }

    /// Parse a `circle:{r}@{lat},{lng}` string back into a bias. Used when
    /// the request carries a pre-encoded `locationbias` and nothing else.
    pub fn parse(s: &str) -> Option<Self> {
        let rest = s.trim().strip_prefix("circle:")?;
        let (radius, point) = rest.split_once('@')?;
        let (lat, lng) = point.split_once(',')?;
        Some(Self {
            lat: Some(lat.trim().parse().ok()?),
            lng: Some(lng.trim().parse().ok()?),
            radius: Some(radius.trim().parse().ok()?),
            radius_m: None,
            radius_km: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_literal_form() {
        let bias = LocationBias {
            lat: Some(35.6812),
            lng: Some(139.7671),
            radius: Some(5_000),
            ..Default::default()
        };
        assert_eq!(bias.encode().as_deref(), Some("circle:5000@35.6812,139.7671"));
    }

    #[test]
    fn radius_km_converts_to_meters() {
        let bias = LocationBias {
            lat: Some(35.6812),
            lng: Some(139.7671),
            radius_km: Some(5.0),
            ..Default::default()
        };
        assert_eq!(bias.encode().as_deref(), Some("circle:5000@35.6812,139.7671"));
    }

    #[test]
    fn radius_precedence_radius_over_radius_m_over_km() {
        let bias = LocationBias {
            lat: Some(35.0),
            lng: Some(139.0),
            radius: Some(1_000),
            radius_m: Some(2_000),
            radius_km: Some(3.0),
        };
        assert_eq!(bias.effective_radius_m(), 1_000);

        let bias = LocationBias {
            radius: None,
            ..bias
        };
        assert_eq!(bias.effective_radius_m(), 2_000);

        let bias = LocationBias {
            radius_m: None,
            ..bias
        };
        assert_eq!(bias.effective_radius_m(), 3_000);
    }

    #[test]
    fn default_radius_is_8km() {
        let bias = LocationBias::from_point(35.0, 139.0);
        assert_eq!(bias.encode().as_deref(), Some("circle:8000@35,139"));
    }

    #[test]
    fn radius_clipped_high_and_low() {
        let bias = LocationBias {
            lat: Some(35.6812),
            lng: Some(139.7671),
            radius_m: Some(60_000),
            ..Default::default()
        };
        assert_eq!(
            bias.encode().as_deref(),
            Some("circle:50000@35.6812,139.7671")
        );

        let bias = LocationBias {
            radius_m: Some(0),
            ..bias
        };
        assert_eq!(bias.effective_radius_m(), 1);
    }

    #[test]
    fn missing_coordinate_encodes_to_none() {
        let bias = LocationBias {
            lat: Some(35.0),
            ..Default::default()
        };
        assert!(bias.encode().is_none());
        assert!(LocationBias::default().encode().is_none());
    }

    #[test]
    fn parse_round_trips() {
        let bias = LocationBias::parse("circle:5000@35.6812,139.7671").unwrap();
        assert_eq!(bias.lat, Some(35.6812));
        assert_eq!(bias.lng, Some(139.7671));
        assert_eq!(bias.encode().as_deref(), Some("circle:5000@35.6812,139.7671"));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(LocationBias::parse("rectangle:1@2,3").is_none());
        assert!(LocationBias::parse("circle:5000").is_none());
        assert!(LocationBias::parse("circle:x@1,2").is_none());
    }
}
