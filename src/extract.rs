use scraper::{Html, Selector};
use tracing::{debug, warn};
use unicode_normalization::UnicodeNormalization;

/// Pull word tokens out of the `<p>` elements of an HTML page.
///
/// Paragraph texts are joined with newlines and split on whitespace. Each token
/// is NFKD-decomposed and reduced to its ASCII letters, so "café," becomes
/// "cafe" and "die—to" becomes "dieto". Tokens can end up empty; the stopword
/// set removes those.
pub fn extract_words(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    let p = match Selector::parse("p") {
        Ok(s) => s,
        Err(e) => {
            warn!("Paragraph selector rejected - {}", e);
            return Vec::new();
        }
    };

    let paragraphs: Vec<String> = doc
        .select(&p)
        .map(|el| el.text().collect::<String>())
        .collect();

    let words: Vec<String> = paragraphs
        .join("\n")
        .split_whitespace()
        .map(letters_only)
        .collect();

    debug!(
        "Extraction - paragraphs={}, tokens={}",
        paragraphs.len(),
        words.len()
    );
    words
}

fn letters_only(token: &str) -> String {
    token.nfkd().filter(char::is_ascii_alphabetic).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_paragraph_text_is_used() {
        let html = r#"<html><head><title>Sunday Service</title></head>
            <body><h1>Welcome</h1><p>Grace and peace</p><div>skip me</div><p>to you</p></body></html>"#;
        assert_eq!(extract_words(html), vec!["Grace", "and", "peace", "to", "you"]);
    }

    #[test]
    fn punctuation_is_stripped_and_may_leave_empty_tokens() {
        let html = "<p>To die\u{2014}to sleep, 'tis \u{2014} heart-ache!</p>";
        assert_eq!(extract_words(html), vec!["To", "dieto", "sleep", "tis", "", "heartache"]);
    }

    #[test]
    fn nested_inline_markup_keeps_words_whole() {
        let html = "<p>Blessed <em>are</em> the <a href='#'>meek</a>.</p>";
        assert_eq!(extract_words(html), vec!["Blessed", "are", "the", "meek"]);
    }

    #[test]
    fn accents_and_ligatures_fold_to_ascii() {
        let html = "<p>Caf\u{e9} \u{fb01}nal na\u{ef}ve</p>";
        assert_eq!(extract_words(html), vec!["Cafe", "final", "naive"]);
    }

    #[test]
    fn document_without_paragraphs_has_no_words() {
        assert!(extract_words("<div>Nothing here</div>").is_empty());
        assert!(extract_words("").is_empty());
    }
}
