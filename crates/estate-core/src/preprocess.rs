use unicode_normalization::UnicodeNormalization;

pub trait TextCleaner {
    // Default cleanup for titles and addresses
    fn clean(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Unicode normalization (NFKC) folds fancy quotes, full-width digits, nbsp
        let text: String = text.nfkc().collect();

        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

pub struct DefaultCleaner;
impl TextCleaner for DefaultCleaner {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_and_folds_width() {
        let cleaned = DefaultCleaner.clean("  Mid\u{00a0}Century\n\n Estate  Sale １ ");
        assert_eq!(cleaned, "Mid Century Estate Sale 1");
    }

    #[test]
    fn blank_stays_blank() {
        assert_eq!(DefaultCleaner.clean(" \n\t "), "");
    }
}
