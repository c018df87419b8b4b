use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    /// `3,000` and `15,000` style altitudes
    static ref THOUSANDS: Regex = Regex::new(r"\b(\d{1,2}),000\b").expect("valid thousands pattern");

    /// (negative, positive) patterns for digit runs of length 4, 3 and 2, in
    /// that order. Longest first so a 4-digit number is never split as a
    /// 3-digit tail.
    static ref DIGIT_RUNS: Vec<(Regex, Regex)> = (2..=4usize)
        .rev()
        .map(|len| {
            let negative = Regex::new(&format!(r"-\d{{{}}}\b", len - 1)).expect("valid negative pattern");
            let positive = Regex::new(&format!(r"\d{{{}}}\b", len)).expect("valid positive pattern");
            (negative, positive)
        })
        .collect();
}

fn spell_digits(digits: &str) -> String {
    digits
        .chars()
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Rewrite a transcript so a literal-digit TTS voice reads every number
/// digit by digit.
///
/// `3,000` becomes `3 thousand`, `15,000` becomes `1 5 thousand`, runs of two
/// to four digits are split with spaces (keeping a leading minus attached),
/// and every `9` is finally spoken as `Niner`.
pub fn to_speech_script(transcript: &str) -> String {
    let mut script = THOUSANDS
        .replace_all(transcript, |caps: &Captures| format!("{} thousand", spell_digits(&caps[1])))
        .into_owned();

    for (negative, positive) in DIGIT_RUNS.iter() {
        script = negative
            .replace_all(&script, |caps: &Captures| format!("-{}", spell_digits(&caps[0][1..])))
            .into_owned();
        script = positive
            .replace_all(&script, |caps: &Captures| spell_digits(&caps[0]))
            .into_owned();
    }

    script.replace('9', "Niner")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands() {
        assert_eq!(to_speech_script("3,000"), "3 thousand");
        assert_eq!(to_speech_script("15,000"), "1 5 thousand");
        assert_eq!(to_speech_script("Scattered at 9,000."), "Scattered at Niner thousand.");
    }

    #[test]
    fn test_digit_runs() {
        assert_eq!(to_speech_script("1445"), "1 4 4 5");
        assert_eq!(to_speech_script("1945"), "1 Niner 4 5");
        assert_eq!(to_speech_script("Wind 270 at 12."), "Wind 2 7 0 at 1 2.");
        assert_eq!(to_speech_script("Visibility 5."), "Visibility 5.");
    }

    #[test]
    fn test_negative_numbers() {
        assert_eq!(to_speech_script("-10"), "-1 0");
        assert_eq!(to_speech_script("Temperature -4."), "Temperature -4.");
        assert_eq!(to_speech_script("Dew point -19."), "Dew point -1 Niner.");
    }

    #[test]
    fn test_no_digits_is_identity() {
        let text = "Advise on initial contact, you have information Alpha.";
        assert_eq!(to_speech_script(text), text);
    }

    #[test]
    fn test_niner_inside_words_is_verbatim() {
        assert_eq!(to_speech_script("A9B"), "ANinerB");
    }

    #[test]
    fn test_full_transcript() {
        let transcript = "La Guardia airport Arrival information Alpha. 0930 Zulu. \
                          Wind 090 at 8. Visibility 10. Overcast at 2,000. 19,000 Few clouds. \
                          Temperature -12. Dew point -20. Altimeter 2992. \
                          Advise on initial contact, ATIS information Alpha.";
        assert_eq!(
            to_speech_script(transcript),
            "La Guardia airport Arrival information Alpha. 0 Niner 3 0 Zulu. \
             Wind 0 Niner 0 at 8. Visibility 1 0. Overcast at 2 thousand. 1 Niner thousand Few clouds. \
             Temperature -1 2. Dew point -2 0. Altimeter 2 Niner Niner 2. \
             Advise on initial contact, ATIS information Alpha."
        );
    }

    #[test]
    fn test_deterministic() {
        let text = "Altimeter 3012. Temperature -7.";
        assert_eq!(to_speech_script(text), to_speech_script(text));
    }
}
