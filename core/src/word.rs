use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // A tag (possibly unterminated) or a run of letters. Tags are matched
    // only so their contents can be skipped.
    static ref RE: Regex = Regex::new(r"<[^>]*>?|[A-Za-z]+").expect("valid regex");
}

/// Lower-case the alphabetic characters of `word` in place.
pub fn normalize_word(word: &mut String) {
    word.make_ascii_lowercase();
}

/// Content words of an html document: every run of ASCII letters outside
/// of tags, normalized. Short words are yielded too; callers decide what
/// to keep.
pub fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    RE.find_iter(text).filter(|m| !m.as_str().starts_with('<')).map(|m| {
        let mut word = m.as_str().to_string();
        normalize_word(&mut word);
        word
    })
}

/// The first character that is neither a letter nor whitespace, if any.
pub fn first_invalid_char(text: &str) -> Option<char> {
    text.chars().find(|c| !c.is_ascii_alphabetic() && !c.is_whitespace())
}
