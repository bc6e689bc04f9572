//! String predicates used by the filtering scenario.

/// Whether `input` contains every one of `needles` as a substring.
///
/// An empty needle list matches every input.
///
/// ```
/// use klotho::contains_all;
///
/// assert!(contains_all("abgzhw", &["a", "w", "gz"]));
/// assert!(!contains_all("abc", &["a", "z"]));
/// ```
pub fn contains_all<S: AsRef<str>>(input: &str, needles: &[S]) -> bool {
    needles.iter().all(|needle| input.contains(needle.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_needles_match() {
        let none: [&str; 0] = [];
        assert!(contains_all("anything", &none));
        assert!(contains_all("", &none));
    }

    #[test]
    fn test_every_needle_required() {
        let needles = vec!["a".to_string(), "b".to_string()];
        assert!(contains_all("cab", &needles));
        assert!(!contains_all("cat", &needles));
        assert!(!contains_all("", &needles));
    }

    #[test]
    fn test_multi_letter_needles() {
        assert!(contains_all("hocuspocus", &["pocus", "hoc"]));
        assert!(!contains_all("hocuspocus", &["abra"]));
    }
}
