/// A city location in the plane.
///
/// Instances are conventionally restricted to the unit square; the
/// solvers accept any finite coordinates. With the `serde` feature a city
/// serializes as a two-element array `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[f64; 2]", into = "[f64; 2]")
)]
pub struct City {
    pub x: f64,
    pub y: f64,
}

impl City {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &City) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for City {
    fn from([x, y]: [f64; 2]) -> Self {
        City { x, y }
    }
}

impl From<City> for [f64; 2] {
    fn from(c: City) -> Self {
        [c.x, c.y]
    }
}

impl From<(f64, f64)> for City {
    fn from((x, y): (f64, f64)) -> Self {
        City { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_345() {
        let a = City::new(0.0, 0.0);
        let b = City::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
        assert!((b.distance(&a) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite() {
        assert!(!City::new(f64::NAN, 0.0).is_finite());
        assert!(!City::new(0.0, f64::INFINITY).is_finite());
        assert!(City::new(0.5, 0.5).is_finite());
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_pair_representation() {
        let c: City = serde_json::from_str("[0.25, 0.75]").unwrap();
        assert_eq!(c, City::new(0.25, 0.75));
        assert_eq!(serde_json::to_string(&c).unwrap(), "[0.25,0.75]");
    }
}
