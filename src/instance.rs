//! Problem instances: random generation and JSON files.
//!
//! An instance file is a JSON array of `[x, y]` pairs, one per city.

use crate::error::{Result, TspError};
use crate::model::City;
use rand::Rng;

/// Lower bound of each generated coordinate.
pub const COORDINATE_MIN: f64 = 0.01;
/// Upper bound of each generated coordinate.
pub const COORDINATE_MAX: f64 = 0.99;
/// Minimum distance between any two generated cities.
pub const MIN_SEPARATION: f64 = 0.01;

/// Consecutive rejected candidates after which the square is considered full.
const MAX_REJECTIONS: usize = 100_000;

/// Generates `count` cities uniformly in `[0.01, 0.99]²`, no two closer
/// than [`MIN_SEPARATION`].
///
/// # Errors
/// [`TspError::Input`] if `count` is zero or the square cannot hold
/// `count` separated cities.
pub fn generate<R: Rng>(count: usize, rng: &mut R) -> Result<Vec<City>> {
    if count == 0 {
        return Err(TspError::input("count must be a positive integer"));
    }

    let mut cities: Vec<City> = Vec::with_capacity(count);
    let mut rejected = 0usize;
    while cities.len() < count {
        let candidate = City::new(
            rng.random_range(COORDINATE_MIN..COORDINATE_MAX),
            rng.random_range(COORDINATE_MIN..COORDINATE_MAX),
        );
        if cities.iter().all(|c| c.distance(&candidate) >= MIN_SEPARATION) {
            cities.push(candidate);
            rejected = 0;
        } else {
            rejected += 1;
            if rejected >= MAX_REJECTIONS {
                return Err(TspError::input(format!(
                    "could only place {} of {count} cities at separation {MIN_SEPARATION}",
                    cities.len()
                )));
            }
        }
    }
    Ok(cities)
}

/// Reads a city list from a JSON file.
#[cfg(feature = "json")]
pub fn load_json(path: impl AsRef<std::path::Path>) -> Result<Vec<City>> {
    let file = std::fs::File::open(path.as_ref())?;
    let cities: Vec<City> = serde_json::from_reader(std::io::BufReader::new(file))?;
    if let Some(i) = cities.iter().position(|c| !c.is_finite()) {
        return Err(TspError::input(format!("city {i} has a non-finite coordinate")));
    }
    Ok(cities)
}

/// Writes a city list to a new JSON file.
///
/// # Errors
/// [`TspError::Input`] if `path` already exists.
#[cfg(feature = "json")]
pub fn save_json(path: impl AsRef<std::path::Path>, cities: &[City]) -> Result<()> {
    use std::io::Write;

    let path = path.as_ref();
    let file = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
    {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            return Err(TspError::input(format!(
                "output file '{}' exists",
                path.display()
            )));
        }
        Err(e) => return Err(e.into()),
    };
    let mut writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, cities)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_generate_bounds_and_separation() {
        let mut rng = create_rng(42);
        let cities = generate(200, &mut rng).unwrap();
        assert_eq!(cities.len(), 200);
        for c in &cities {
            assert!((COORDINATE_MIN..COORDINATE_MAX).contains(&c.x));
            assert!((COORDINATE_MIN..COORDINATE_MAX).contains(&c.y));
        }
        for (i, a) in cities.iter().enumerate() {
            for b in &cities[i + 1..] {
                assert!(a.distance(b) >= MIN_SEPARATION);
            }
        }
    }

    #[test]
    fn test_generate_zero_rejected() {
        let mut rng = create_rng(1);
        assert!(matches!(generate(0, &mut rng), Err(TspError::Input(_))));
    }

    #[test]
    fn test_generate_reproducible() {
        let a = generate(20, &mut create_rng(7)).unwrap();
        let b = generate(20, &mut create_rng(7)).unwrap();
        assert_eq!(a, b);
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cities.json");
        let cities = generate(10, &mut create_rng(3)).unwrap();
        save_json(&path, &cities).unwrap();
        assert_eq!(load_json(&path).unwrap(), cities);
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_save_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cities.json");
        std::fs::write(&path, "[]").unwrap();
        let err = save_json(&path, &[City::new(0.5, 0.5)]).unwrap_err();
        assert!(matches!(err, TspError::Input(_)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_load_reads_pair_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("square.json");
        std::fs::write(&path, "[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]").unwrap();
        let cities = load_json(&path).unwrap();
        assert_eq!(cities.len(), 4);
        assert_eq!(cities[2], City::new(1.0, 1.0));
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_load_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{\"x\": 1}").unwrap();
        assert!(matches!(load_json(&path), Err(TspError::Json(_))));
        assert!(matches!(
            load_json(dir.path().join("missing.json")),
            Err(TspError::Io(_))
        ));
    }
}
