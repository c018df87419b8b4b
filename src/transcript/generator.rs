use rand::Rng;
use rand_distr::StandardNormal;
use std::fmt;

use super::vocabulary::{
    ADVISORY_PHRASES, CLOUD_CONDITIONS, LOCATIONS, PHONETIC_ALPHABET, PREAMBLES, VISIBILITY,
};

/// Probability that each optional clause is present
const CLAUSE_PROBABILITY: f64 = 0.8;

const WIND_SPEED_MEAN: f64 = 10.0;
const WIND_SPEED_STD: f64 = 5.0;

pub const TEMPERATURE_RANGE: (i32, i32) = (-20, 35);
/// Dew point is drawn from `[temperature - DEW_POINT_SPREAD, temperature]`
pub const DEW_POINT_SPREAD: i32 = 15;
pub const ALTIMETER_RANGE: (u32, u32) = (2800, 3200);

/// Wind and visibility clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindClause {
    /// Tens of degrees, 1..=36
    pub direction: u8,
    /// Knots
    pub speed: u32,
    pub visibility: &'static str,
}

/// Two cloud layers; levels are in thousands of feet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudClause {
    pub lower_level: u8,
    pub lower_condition: &'static str,
    pub upper_level: u8,
    pub upper_condition: &'static str,
}

/// One generated broadcast. `Display` renders the transcript text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtisReport {
    pub location: &'static str,
    pub preamble: &'static str,
    pub letter: &'static str,
    pub hour: u8,
    pub minute: u8,
    pub wind: Option<WindClause>,
    pub clouds: Option<CloudClause>,
    pub temperature: i32,
    pub dew_point: i32,
    pub altimeter: u32,
    pub advisory: &'static str,
}

impl fmt::Display for AtisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} airport {} information {}. {:02}{:02} Zulu.",
            self.location, self.preamble, self.letter, self.hour, self.minute
        )?;

        if let Some(wind) = &self.wind {
            write!(
                f,
                " Wind {:02}0 at {}. Visibility {}.",
                wind.direction, wind.speed, wind.visibility
            )?;
        }

        if let Some(clouds) = &self.clouds {
            write!(
                f,
                " {} at {},000. {},000 {}.",
                clouds.lower_condition, clouds.lower_level, clouds.upper_level, clouds.upper_condition
            )?;
        }

        write!(
            f,
            " Temperature {}. Dew point {}. Altimeter {}.",
            self.temperature, self.dew_point, self.altimeter
        )?;
        write!(
            f,
            " Advise on initial contact, {} information {}.",
            self.advisory, self.letter
        )
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, items: &[&'static str]) -> &'static str {
    items[rng.gen_range(0..items.len())]
}

/// Draw a random ATIS broadcast.
pub fn generate_transcript<R: Rng + ?Sized>(rng: &mut R) -> AtisReport {
    let location = pick(rng, LOCATIONS);
    let preamble = pick(rng, PREAMBLES);
    let letter = pick(rng, PHONETIC_ALPHABET);

    let hour = rng.gen_range(0..=23);
    let minute = rng.gen_range(0..=59);

    let wind = rng.gen_bool(CLAUSE_PROBABILITY).then(|| {
        let direction = rng.gen_range(1..=36);
        let z: f64 = rng.sample(StandardNormal);
        let speed = (WIND_SPEED_MEAN + WIND_SPEED_STD * z).round().max(0.0) as u32;
        let visibility = pick(rng, VISIBILITY);
        WindClause { direction, speed, visibility }
    });

    let clouds = rng.gen_bool(CLAUSE_PROBABILITY).then(|| {
        let lower_level = rng.gen_range(1..=9);
        let upper_level = rng.gen_range(10..=19);
        CloudClause {
            lower_level,
            lower_condition: pick(rng, CLOUD_CONDITIONS),
            upper_level,
            upper_condition: pick(rng, CLOUD_CONDITIONS),
        }
    });

    let temperature = rng.gen_range(TEMPERATURE_RANGE.0..=TEMPERATURE_RANGE.1);
    let dew_point = rng.gen_range(temperature - DEW_POINT_SPREAD..=temperature);
    let altimeter = rng.gen_range(ALTIMETER_RANGE.0..=ALTIMETER_RANGE.1);
    let advisory = pick(rng, ADVISORY_PHRASES);

    AtisReport {
        location,
        preamble,
        letter,
        hour,
        minute,
        wind,
        clouds,
        temperature,
        dew_point,
        altimeter,
        advisory,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_report() -> AtisReport {
        AtisReport {
            location: "Denver international",
            preamble: "Arrival ATIS",
            letter: "Bravo",
            hour: 9,
            minute: 5,
            wind: Some(WindClause { direction: 27, speed: 12, visibility: "10" }),
            clouds: Some(CloudClause {
                lower_level: 3,
                lower_condition: "Scattered",
                upper_level: 15,
                upper_condition: "Overcast",
            }),
            temperature: -4,
            dew_point: -10,
            altimeter: 2992,
            advisory: "you have",
        }
    }

    #[test]
    fn test_full_report_rendering() {
        assert_eq!(
            sample_report().to_string(),
            "Denver international airport Arrival ATIS information Bravo. 0905 Zulu. \
             Wind 270 at 12. Visibility 10. Scattered at 3,000. 15,000 Overcast. \
             Temperature -4. Dew point -10. Altimeter 2992. \
             Advise on initial contact, you have information Bravo."
        );
    }

    #[test]
    fn test_optional_clauses_omitted() {
        let report = AtisReport { wind: None, clouds: None, ..sample_report() };
        assert_eq!(
            report.to_string(),
            "Denver international airport Arrival ATIS information Bravo. 0905 Zulu. \
             Temperature -4. Dew point -10. Altimeter 2992. \
             Advise on initial contact, you have information Bravo."
        );
    }

    #[test]
    fn test_single_digit_direction_is_padded() {
        let report = AtisReport {
            wind: Some(WindClause { direction: 3, speed: 0, visibility: "2" }),
            ..sample_report()
        };
        assert!(report.to_string().contains(" Wind 030 at 0. Visibility 2."));
    }

    #[test]
    fn test_generated_fields_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2000 {
            let r = generate_transcript(&mut rng);
            assert!(LOCATIONS.contains(&r.location));
            assert!(PREAMBLES.contains(&r.preamble));
            assert!(PHONETIC_ALPHABET.contains(&r.letter));
            assert!(ADVISORY_PHRASES.contains(&r.advisory));
            assert!(r.hour <= 23 && r.minute <= 59);
            assert!((TEMPERATURE_RANGE.0..=TEMPERATURE_RANGE.1).contains(&r.temperature));
            assert!(r.dew_point <= r.temperature);
            assert!(r.dew_point >= r.temperature - DEW_POINT_SPREAD);
            assert!((ALTIMETER_RANGE.0..=ALTIMETER_RANGE.1).contains(&r.altimeter));
            if let Some(w) = &r.wind {
                assert!((1..=36).contains(&w.direction));
                assert!(VISIBILITY.contains(&w.visibility));
            }
            if let Some(c) = &r.clouds {
                assert!((1..=9).contains(&c.lower_level));
                assert!((10..=19).contains(&c.upper_level));
                assert!(CLOUD_CONDITIONS.contains(&c.lower_condition));
                assert!(CLOUD_CONDITIONS.contains(&c.upper_condition));
            }
        }
    }

    #[test]
    fn test_optional_clauses_appear_roughly_eighty_percent() {
        let mut rng = StdRng::seed_from_u64(11);
        let n = 5000;
        let reports: Vec<_> = (0..n).map(|_| generate_transcript(&mut rng)).collect();
        let winds = reports.iter().filter(|r| r.wind.is_some()).count() as f64 / n as f64;
        let clouds = reports.iter().filter(|r| r.clouds.is_some()).count() as f64 / n as f64;
        assert!((0.75..0.85).contains(&winds), "wind ratio {}", winds);
        assert!((0.75..0.85).contains(&clouds), "cloud ratio {}", clouds);
    }

    #[test]
    fn test_same_seed_same_transcript() {
        let a = generate_transcript(&mut StdRng::seed_from_u64(42));
        let b = generate_transcript(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_transcript_is_single_line_and_terminated() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let text = generate_transcript(&mut rng).to_string();
            assert!(!text.contains('\n'));
            assert!(text.ends_with('.'));
            assert!(text.contains(" Zulu."));
        }
    }
}
