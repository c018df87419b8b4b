//! Closed vocabularies for the ATIS template grammar.

pub const LOCATIONS: &[&str] = &[
    "La Guardia",
    "Denver international",
    "Miami international",
    "Kuala Lumpur international",
    "Hong Kong international",
    "Philadelphia International",
    "London city",
];

pub const PREAMBLES: &[&str] = &["Arrival", "Arrival ATIS"];

/// ICAO spelling alphabet used for the information letter
pub const PHONETIC_ALPHABET: &[&str] = &[
    "Alpha", "Bravo", "Charlie", "Delta", "Echo", "Foxtrot", "Golf", "Hotel", "India",
    "Juliett", "Kilo", "Lima", "Mike", "November", "Oscar", "Papa", "Quebec", "Romeo",
    "Sierra", "Tango", "Uniform", "Victor", "Whiskey", "X-ray", "Yankee", "Zulu",
];

/// Statute miles
pub const VISIBILITY: &[&str] = &["10", "5", "2"];

pub const CLOUD_CONDITIONS: &[&str] = &[
    "Scattered",
    "Overcast",
    "Vertical visibility",
    "Sky clear",
    "Few clouds",
];

pub const ADVISORY_PHRASES: &[&str] = &["you have", "ATIS"];
