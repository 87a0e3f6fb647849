// crates/pitchreel-core/src/genre.rs
//
// The one piece of real decision logic in the app: map a free-text brief to
// one of four genres, each bound at compile time to a static sample video.
// Priority order matters — action beats drama beats comedy beats default —
// and is encoded by the order of the `classify` checks.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Drama,
    Comedy,
    Default,
}

/// Trigger words per genre, checked as plain substrings of the lowercased
/// title + description. First family with any hit wins.
const ACTION_TERMS: &[&str] = &["action", "adventure", "fight", "battle"];
const DRAMA_TERMS:  &[&str] = &["drama", "emotional", "serious"];
const COMEDY_TERMS: &[&str] = &["comedy", "funny", "humor"];

impl Genre {
    /// Classify a brief. Total — always returns a genre, never errors.
    pub fn classify(title: &str, description: &str) -> Genre {
        let input = format!("{title} {description}").to_lowercase();
        let hit = |terms: &[&str]| terms.iter().any(|t| input.contains(t));

        if hit(ACTION_TERMS) {
            Genre::Action
        } else if hit(DRAMA_TERMS) {
            Genre::Drama
        } else if hit(COMEDY_TERMS) {
            Genre::Comedy
        } else {
            Genre::Default
        }
    }

    /// The static sample video bound to this genre.
    pub fn sample_url(self) -> &'static str {
        match self {
            Genre::Action  => "https://storage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4",
            Genre::Drama   => "https://storage.googleapis.com/gtv-videos-bucket/sample/TearsOfSteel.mp4",
            Genre::Comedy  => "https://storage.googleapis.com/gtv-videos-bucket/sample/Sintel.mp4",
            Genre::Default => "https://storage.googleapis.com/gtv-videos-bucket/sample/ElephantsDream.mp4",
        }
    }

    /// Nominal runtime of the sample in seconds. The samples are the four
    /// Blender open-movie shorts; published lengths, since nothing here
    /// decodes media to measure them.
    pub fn sample_duration(self) -> f64 {
        match self {
            Genre::Action  => 596.0, // Big Buck Bunny
            Genre::Drama   => 734.0, // Tears of Steel
            Genre::Comedy  => 888.0, // Sintel
            Genre::Default => 653.0, // Elephants Dream
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Genre::Action  => "Action",
            Genre::Drama   => "Drama",
            Genre::Comedy  => "Comedy",
            Genre::Default => "Feature",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_terms_win_regardless_of_case() {
        assert_eq!(Genre::classify("Epic BATTLE", ""), Genre::Action);
        assert_eq!(Genre::classify("", "a daring Adventure"), Genre::Action);
        assert_eq!(Genre::classify("FIGHT night", ""), Genre::Action);
    }

    #[test]
    fn placement_in_title_or_description_is_equivalent() {
        assert_eq!(Genre::classify("drama queen", ""), Genre::Drama);
        assert_eq!(Genre::classify("", "drama queen"), Genre::Drama);
    }

    #[test]
    fn action_beats_comedy_when_both_match() {
        assert_eq!(
            Genre::classify("funny action movie", "humor and battles"),
            Genre::Action,
        );
    }

    #[test]
    fn drama_beats_comedy() {
        assert_eq!(Genre::classify("", "an emotional yet funny story"), Genre::Drama);
    }

    #[test]
    fn no_trigger_words_falls_back_to_default() {
        assert_eq!(Genre::classify("Sunset", "a quiet film about tides"), Genre::Default);
    }

    #[test]
    fn trigger_matches_inside_larger_words() {
        // Plain substring semantics: "action-packed" contains "action".
        assert_eq!(Genre::classify("", "an action-packed thriller"), Genre::Action);
    }

    #[test]
    fn classifies_sample_briefs() {
        assert_eq!(
            Genre::classify("Epic Action Adventure", "An action-packed thriller"),
            Genre::Action,
        );
        assert_eq!(
            Genre::classify("Funny Times", "A humor-filled comedy"),
            Genre::Comedy,
        );
    }

    #[test]
    fn every_genre_has_a_distinct_sample() {
        let urls = [
            Genre::Action.sample_url(),
            Genre::Drama.sample_url(),
            Genre::Comedy.sample_url(),
            Genre::Default.sample_url(),
        ];
        for (i, a) in urls.iter().enumerate() {
            for b in &urls[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
