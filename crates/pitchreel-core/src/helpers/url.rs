// crates/pitchreel-core/src/helpers/url.rs
//
// Freshness-token handling and download-name synthesis.
//
// The "freshness token" is a `?t=<epoch millis>` query parameter appended to
// a resolved sample URL purely to defeat client-side caching of the same
// static resource. Downloads always use the stripped base URL.

/// Append the freshness token to a bare sample URL.
pub fn with_freshness_token(base: &str, millis: u64) -> String {
    format!("{base}?t={millis}")
}

/// Strip any query string, recovering the base URL byte-identical to the one
/// the token was appended to.
pub fn strip_freshness_token(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

/// Synthesise the download filename from the brief's title:
/// `<title>-trailer.mp4`, with a generic stem when the title is empty.
/// Characters that are path separators or illegal in common filesystems are
/// replaced so the name is always a plain file name.
pub fn trailer_file_name(title: &str) -> String {
    let stem = if title.is_empty() { "movie" } else { title };
    let stem: String = stem
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect();
    format!("{stem}-trailer.mp4")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genre::Genre;

    #[test]
    fn strip_recovers_the_exact_base_url() {
        let base = Genre::Action.sample_url();
        let tokened = with_freshness_token(base, 1_700_000_000_000);
        assert!(tokened.contains("?t=1700000000000"));
        assert_eq!(strip_freshness_token(&tokened), base);
    }

    #[test]
    fn strip_is_a_no_op_without_a_query() {
        let base = Genre::Default.sample_url();
        assert_eq!(strip_freshness_token(base), base);
    }

    #[test]
    fn filename_from_title() {
        assert_eq!(trailer_file_name("Epic Action Adventure"), "Epic Action Adventure-trailer.mp4");
    }

    #[test]
    fn empty_title_falls_back_to_generic_stem() {
        assert_eq!(trailer_file_name(""), "movie-trailer.mp4");
    }

    #[test]
    fn hostile_characters_are_replaced() {
        assert_eq!(trailer_file_name("a/b:c?"), "a_b_c_-trailer.mp4");
    }
}
