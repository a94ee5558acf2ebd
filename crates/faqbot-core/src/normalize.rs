/// Canonical form of a question, applied to corpus entries and queries alike.
///
/// ASCII punctuation is dropped, the text is lowercased, whitespace runs
/// collapse to one space and the ends are trimmed. Punctuation goes first so
/// that `"a - b"` collapses to `"a b"` and the function stays idempotent.
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .flat_map(char::to_lowercase)
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn strips_punctuation_and_case() {
        assert_eq!(normalize("What are the library hours?"), "what are the library hours");
        assert_eq!(normalize("Does WIT accept JEE score?"), "does wit accept jee score");
        assert_eq!(normalize("What's the fee-payment procedure!!"), "whats the feepayment procedure");
    }

    #[test]
    fn collapses_and_trims_whitespace() {
        assert_eq!(normalize("  library\t\thours \n today  "), "library hours today");
        assert_eq!(normalize("a - b"), "a b");
    }

    #[test]
    fn empty_and_punctuation_only_inputs() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("?!.,;:"), "");
    }

    #[test]
    fn idempotent() {
        let samples = [
            "",
            "Hello,   World!",
            "a - b -- c",
            "  Tabs\tand\nnewlines  ",
            "ÀÉÎ Unicode — dashes…",
            "10th & 12th marksheets",
            "https://www.wit.ac.in/",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "normalize not idempotent for {s:?}");
        }
    }
}
