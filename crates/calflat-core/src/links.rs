//! Conference link extraction.
//!
//! Events often carry their meeting URL only inside free text. The finder
//! scans description and location text against an ordered list of provider
//! patterns and returns the first match.
//!
//! Pattern order is a contract, not an implementation detail: for text that
//! mentions more than one provider, reordering the list changes the output.
//! The built-in order is Google Meet, then Zoom, then Microsoft Teams.

use regex::Regex;

/// The built-in provider patterns, in match-priority order.
pub const DEFAULT_LINK_PATTERNS: [&str; 3] = [
    r"https?://meet\.google\.com/[a-zA-Z0-9_-]+",
    r"https?://[a-zA-Z0-9-]+\.zoom\.us/j/[a-zA-Z0-9_.-]+",
    r"https?://teams\.microsoft\.com/l/meetup-join/[a-zA-Z0-9_.-]+",
];

/// First-match scanner over an ordered set of provider URL patterns.
#[derive(Debug)]
pub struct ConferenceFinder {
    patterns: Vec<Regex>,
}

impl ConferenceFinder {
    /// Builds a finder from custom pattern strings, preserving their order.
    pub fn from_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Self, regex::Error> {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Returns the first provider URL found in the text, trying patterns in
    /// order.
    pub fn find_first(&self, text: &str) -> Option<String> {
        self.patterns
            .iter()
            .find_map(|pattern| pattern.find(text))
            .map(|m| m.as_str().to_string())
    }
}

impl Default for ConferenceFinder {
    fn default() -> Self {
        Self::from_patterns(&DEFAULT_LINK_PATTERNS).expect("built-in patterns are valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_google_meet_link() {
        let finder = ConferenceFinder::default();
        let text = "Join here: https://meet.google.com/abc-defg-hij thanks";
        assert_eq!(
            finder.find_first(text),
            Some("https://meet.google.com/abc-defg-hij".to_string())
        );
    }

    #[test]
    fn finds_zoom_link_with_subdomain() {
        let finder = ConferenceFinder::default();
        let text = "https://company.zoom.us/j/123456789 is the room";
        assert_eq!(
            finder.find_first(text),
            Some("https://company.zoom.us/j/123456789".to_string())
        );
    }

    #[test]
    fn finds_teams_link() {
        let finder = ConferenceFinder::default();
        let text = "meetup: https://teams.microsoft.com/l/meetup-join/19.meeting_abc";
        assert_eq!(
            finder.find_first(text),
            Some("https://teams.microsoft.com/l/meetup-join/19.meeting_abc".to_string())
        );
    }

    #[test]
    fn pattern_order_wins_over_text_position() {
        // Zoom appears first in the text, but Meet is first in the pattern
        // list and therefore wins.
        let finder = ConferenceFinder::default();
        let text = "https://us02.zoom.us/j/999 or https://meet.google.com/abc-defg-hij";
        assert_eq!(
            finder.find_first(text),
            Some("https://meet.google.com/abc-defg-hij".to_string())
        );
    }

    #[test]
    fn no_match_yields_none() {
        let finder = ConferenceFinder::default();
        assert_eq!(finder.find_first("lunch at the cafeteria"), None);
    }

    #[test]
    fn custom_patterns_replace_defaults() {
        let finder = ConferenceFinder::from_patterns(&[r"https://webex\.example\.com/\w+"])
            .expect("valid pattern");
        let text = "https://meet.google.com/abc and https://webex.example.com/room1";
        assert_eq!(
            finder.find_first(text),
            Some("https://webex.example.com/room1".to_string())
        );
    }

    #[test]
    fn invalid_custom_pattern_is_rejected() {
        assert!(ConferenceFinder::from_patterns(&["https://(unclosed"]).is_err());
    }
}
