//! Bundled reference almanac.
//!
//! A small, fixed set of well-known objects with synthesized two-line
//! elements. Doubles as the catalog-size reference and as an offline
//! [`RsoSource`] when no API is reachable.

use crate::catalog::RsoRecord;

use super::{FetchError, RsoSource};

struct Entry {
    name: &'static str,
    satcat: &'static str,
    designator: &'static str,
    inclination: f64,
    mean_motion: f64,
    aliases: &'static [&'static str],
    tags: &'static [&'static str],
}

const fn entry(
    name: &'static str,
    satcat: &'static str,
    designator: &'static str,
    inclination: f64,
    mean_motion: f64,
    aliases: &'static [&'static str],
    tags: &'static [&'static str],
) -> Entry {
    Entry {
        name,
        satcat,
        designator,
        inclination,
        mean_motion,
        aliases,
        tags,
    }
}

const GPS: &[&str] = &["gps", "navigation"];
const NOAA: &[&str] = &["noaa", "weather"];
const GOES: &[&str] = &["goes", "geostationary", "weather"];

const ALMANAC: &[Entry] = &[
    entry("GPS III SV01 (USA-289)", "43073", "2018-079A", 55.0, 2.0056, &["GPS III-1", "Navstar 74", "PRN 04"], &["gps", "navigation", "m-code"]),
    entry("GPS III SV02 (USA-293)", "44402", "2019-029A", 55.0, 2.0056, &["GPS III-2", "Navstar 75", "PRN 05"], GPS),
    entry("GPS III SV03 (USA-304)", "44873", "2019-079A", 55.0, 2.0056, &["GPS III-3", "Navstar 76", "PRN 07"], GPS),
    entry("GPS III SV04 (USA-309)", "46450", "2020-067A", 55.0, 2.0056, &["GPS III-4", "Navstar 77", "PRN 13"], GPS),
    entry("GPS III SV05 (USA-334)", "48274", "2021-041A", 55.0, 2.0056, &["GPS III-5", "Navstar 78", "PRN 18"], GPS),
    entry("GPS III SV06 (USA-345)", "49678", "2023-006A", 55.0, 2.0056, &["GPS III-6", "Navstar 80", "PRN 16"], GPS),
    entry("GPS IIF SV-1 (USA-232)", "36585", "2010-019A", 55.0, 2.0056, &["GPS IIF-1", "Navstar 66", "PRN 25"], GPS),
    entry("GPS IIF SV-3 (USA-239)", "38833", "2012-053A", 55.0, 2.0056, &["GPS IIF-3", "Navstar 68", "PRN 24"], GPS),
    entry("GPS IIF SV-5 (USA-248)", "40105", "2014-068A", 55.0, 2.0056, &["GPS IIF-5", "Navstar 70", "PRN 30"], GPS),
    entry("GPS IIF SV-7 (USA-261)", "40730", "2015-013A", 55.0, 2.0056, &["GPS IIF-7", "Navstar 72", "PRN 09"], GPS),
    entry("GPS IIF SV-9 (USA-265)", "41024", "2015-024A", 55.0, 2.0056, &["GPS IIF-9", "Navstar 73", "PRN 01"], GPS),
    entry("GPS IIF SV-10 (USA-266)", "41328", "2015-062A", 55.0, 2.0056, &["GPS IIF-10", "Navstar 71", "PRN 27"], GPS),
    entry("NOAA-15", "25338", "1998-030A", 98.7, 14.25, &["NOAA-K"], &["noaa", "weather", "polar-orbiting"]),
    entry("NOAA-18", "28654", "2005-018A", 99.0, 14.12, &["NOAA-N"], NOAA),
    entry("NOAA-19", "33591", "2009-005A", 99.1, 14.12, &["NOAA-N Prime"], NOAA),
    entry("NOAA-20 (JPSS-1)", "43013", "2017-071A", 98.7, 14.23, &["JPSS-1", "NOAA/NASA Joint Polar Satellite System-1"], &["noaa", "weather", "jp"]),
    entry("NOAA-21 (JPSS-2)", "54240", "2022-146A", 98.7, 14.23, &["JPSS-2"], NOAA),
    entry("GOES-15", "36411", "2010-008A", 0.1, 1.0027, &["GOES-P"], GOES),
    entry("GOES-16 (GOES-R)", "41866", "2016-071A", 0.0, 1.0027, &["GOES-East"], GOES),
    entry("GOES-17 (GOES-S)", "43226", "2018-022A", 0.0, 1.0027, &["GOES-West"], GOES),
    entry("GOES-18 (GOES-T)", "49384", "2022-057A", 0.0, 1.0027, &["GOES-West prime"], GOES),
    entry("GOES-U (GOES-19)", "59000", "2024-900A", 0.0, 1.0027, &["GOES-U", "GOES-19"], GOES),
    entry("WSF-M", "59500", "2024-901A", 98.7, 14.2, &["Weather System Follow-on Microwave"], &["wsf-m", "weather", "us-space-force"]),
    entry("WindSat / Coriolis", "27640", "2003-006A", 98.7, 14.2, &["Coriolis", "WindSat"], &["windsat", "weather"]),
    entry("International Space Station", "25544", "1998-067A", 51.64, 15.495, &["ISS", "Zarya"], &["iss", "human-spaceflight"]),
    entry("Hubble Space Telescope", "20580", "1990-037B", 28.47, 15.091, &["HST"], &["science", "observatory"]),
    entry("James Webb Space Telescope", "50463", "2021-130A", 0.0, 1.0027, &["JWST", "Webb"], &["science", "observatory", "l2"]),
];

/// Two-line element text with the catalog number, inclination and mean
/// motion filled in; every other element is a fixed placeholder.
pub fn tle_template(satcat: &str, inclination: f64, mean_motion: f64) -> String {
    let digits: String = satcat.chars().filter(char::is_ascii_digit).collect();
    let sat_num: u64 = digits.parse().unwrap_or(0);
    format!(
        "1 {sat_num:05}U 24001A   24123.00000000  .00000000  00000-0  00000-0 0  9991\n\
         2 {sat_num:05} {inclination:8.4} 123.4567 0001000 120.1234 240.5678 {mean_motion:11.8}    05"
    )
}

/// The almanac in definition order.
pub fn load_almanac() -> Vec<RsoRecord> {
    ALMANAC
        .iter()
        .map(|e| {
            RsoRecord::new(e.satcat, e.name, e.designator)
                .with_aliases(e.aliases.iter().copied())
                .with_tags(e.tags.iter().copied())
                .with_tle(tle_template(e.satcat, e.inclination, e.mean_motion))
        })
        .collect()
}

/// Offline source backed by the bundled almanac.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticCatalog;

impl RsoSource for StaticCatalog {
    /// Sorted by display name, case-insensitively, like the API's list endpoint.
    fn fetch_all_records(&self) -> Result<Vec<RsoRecord>, FetchError> {
        let mut records = load_almanac();
        records.sort_by_cached_key(|r| r.display_name.to_lowercase());
        Ok(records)
    }

    fn fetch_catalog_size(&self) -> Result<usize, FetchError> {
        Ok(ALMANAC.len())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn almanac_identifiers_are_unique() {
        let records = load_almanac();
        let ids: HashSet<_> = records.iter().map(|r| r.satcat_number.clone()).collect();
        assert_eq!(ids.len(), records.len());
        assert_eq!(records.len(), 27);
    }

    #[test]
    fn tle_lines_carry_the_catalog_number() {
        let tle = tle_template("25544", 51.64, 15.495);
        let lines: Vec<&str> = tle.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("1 25544U "));
        assert!(lines[1].starts_with("2 25544  51.6400 "));
        assert!(lines[1].contains("15.49500000"));
    }

    #[test]
    fn non_numeric_satcat_pads_zero() {
        assert!(tle_template("", 0.0, 1.0).starts_with("1 00000U"));
    }

    #[test]
    fn static_source_sorts_by_name() {
        let records = StaticCatalog.fetch_all_records().unwrap();
        let names: Vec<_> = records.iter().map(|r| r.display_name.to_lowercase()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(StaticCatalog.fetch_catalog_size().unwrap(), records.len());
    }
}
