// src/utils/text.rs

/// Joins per-page text in page order, one newline between pages.
pub fn join_pages(pages: &[String]) -> String {
    pages.join("\n")
}

/// True when the text has nothing but whitespace in it.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Returns at most the first `max_chars` characters of `text`.
///
/// Counts Unicode scalar values, so a multi-byte character is never split.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Case-sensitive `.pdf` suffix check; the content itself is not sniffed.
pub fn is_pdf_filename(filename: &str) -> bool {
    filename.ends_with(".pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_are_joined_with_newlines() {
        let pages = vec!["first".to_string(), String::new(), "third".to_string()];
        assert_eq!(join_pages(&pages), "first\n\nthird");
    }

    #[test]
    fn whitespace_only_text_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank(" \n\t\n "));
        assert!(!is_blank("  a  "));
    }

    #[test]
    fn truncation_keeps_short_text_intact() {
        assert_eq!(truncate_chars("abc", 3000), "abc");
        assert_eq!(truncate_chars("abc", 3), "abc");
    }

    #[test]
    fn truncation_cuts_at_character_count() {
        let text = "a".repeat(3005);
        assert_eq!(truncate_chars(&text, 3000).len(), 3000);
    }

    #[test]
    fn truncation_respects_multibyte_characters() {
        let text = "ééééé";
        let cut = truncate_chars(text, 2);
        assert_eq!(cut, "éé");
        assert_eq!(cut.chars().count(), 2);
    }

    #[test]
    fn pdf_extension_check() {
        assert!(is_pdf_filename("notes.pdf"));
        assert!(is_pdf_filename("archive.tar.pdf"));
        assert!(is_pdf_filename(".pdf"));
        assert!(!is_pdf_filename("NOTES.PDF"));
        assert!(!is_pdf_filename("notes.Pdf"));
        assert!(!is_pdf_filename("notes.txt"));
        assert!(!is_pdf_filename("pdf"));
        assert!(!is_pdf_filename("notes.pdf.exe"));
        assert!(!is_pdf_filename(""));
    }
}
