//! Placeholder positions derived from an object identifier.
//!
//! There is no propagation here: the identifier's characters are folded into
//! a seed and the seed is spread over latitude, longitude and a synthetic
//! orbital shell. The same identifier always lands on the same spot.

use super::SatcatNumber;

/// Base of the synthetic shell, in meters.
pub const SHELL_BASE_ALTITUDE_M: f64 = 20_000_000.0;
/// Altitude spread above the shell base, in meters.
pub const SHELL_SPREAD_M: u64 = 5_000_000;

/// Geodetic position of a rendered entity. Altitude in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

/// Positional weighted sum of code points: `Σ codepoint(c_i) * (i + 1)`.
fn seed(identifier: &str) -> u64 {
    identifier
        .chars()
        .enumerate()
        .fold(0u64, |acc, (i, c)| {
            acc.wrapping_add(u64::from(c as u32).wrapping_mul(i as u64 + 1))
        })
}

/// Derive the placeholder position for an identifier string.
pub fn derive(identifier: &str) -> Position {
    let seed = seed(identifier);
    // (seed * 7) mod 360 without overflowing the product
    let lon_bucket = ((seed % 360) * 7) % 360;
    Position {
        latitude: (seed % 180) as f64 - 90.0,
        longitude: lon_bucket as f64 - 180.0,
        altitude: SHELL_BASE_ALTITUDE_M + (seed % SHELL_SPREAD_M) as f64,
    }
}

/// [`derive`] keyed by a catalog number.
pub fn derive_for(id: &SatcatNumber) -> Position {
    derive(id.as_str())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::catalog::strategy::identifier;

    #[test]
    fn empty_identifier_is_the_origin_corner() {
        assert_eq!(
            derive(""),
            Position {
                latitude: -90.0,
                longitude: -180.0,
                altitude: 20_000_000.0,
            }
        );
    }

    #[test]
    fn known_seed() {
        // '1'=49, '0'=48: 49*1 + 48*2 + 48*3 = 289
        let p = derive("100");
        assert_eq!(p.latitude, (289 % 180) as f64 - 90.0);
        assert_eq!(p.longitude, ((289 * 7) % 360) as f64 - 180.0);
        assert_eq!(p.altitude, 20_000_289.0);
    }

    proptest! {
        #[test]
        fn deterministic_and_in_range(id in prop_oneof![identifier(), any::<String>(), "x{300,600}"]) {
            let a = derive(&id);
            prop_assert_eq!(a, derive(&id));
            prop_assert!((-90.0..90.0).contains(&a.latitude), "{:?}: {:?}", id, a);
            prop_assert!((-180.0..180.0).contains(&a.longitude), "{:?}: {:?}", id, a);
            prop_assert!(a.altitude >= SHELL_BASE_ALTITUDE_M);
            prop_assert!(a.altitude < SHELL_BASE_ALTITUDE_M + SHELL_SPREAD_M as f64);
        }

        #[test]
        fn catalog_number_and_string_agree(id in identifier()) {
            prop_assert_eq!(derive_for(&SatcatNumber::new(id.clone())), derive(&id));
        }
    }

    #[test]
    fn keyed_by_catalog_number() {
        assert_eq!(derive_for(&SatcatNumber::from(25544u32)), derive("25544"));
    }
}
