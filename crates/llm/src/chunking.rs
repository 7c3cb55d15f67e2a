use docpipe_common::{DocpipeError, Result};
use unicode_segmentation::UnicodeSegmentation;

use crate::llm_trait::SentenceSegmenter;

/// Number of whitespace-delimited words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Sentence segmenter based on Unicode sentence boundaries (UAX #29)
///
/// Sentences are trimmed; whitespace-only pieces are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSentenceSegmenter;

impl SentenceSegmenter for UnicodeSentenceSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<String>> {
        if text.trim().is_empty() {
            return Err(DocpipeError::segmentation("cannot segment empty text"));
        }

        let sentences: Vec<String> = text
            .split_sentence_bounds()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if sentences.is_empty() {
            return Err(DocpipeError::segmentation(
                "no sentence boundaries found in non-empty text",
            ));
        }

        Ok(sentences)
    }
}

/// Ordered run of consecutive sentences
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    /// Sentences in document order
    pub sentences: Vec<String>,

    /// Combined word count of `sentences`
    pub word_count: usize,
}

impl TextChunk {
    /// Chunk text, sentences joined by single spaces
    pub fn text(&self) -> String {
        self.sentences.join(" ")
    }
}

/// Greedily pack sentences into chunks of at most `max_words` words
///
/// A sentence is appended while the running count stays within `max_words`;
/// otherwise the current chunk is closed and the sentence opens the next one.
/// A sentence longer than `max_words` ends up alone in its own chunk. Nothing
/// is dropped, split or reordered.
pub fn pack_sentences<I, S>(sentences: I, max_words: usize) -> Vec<TextChunk>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut chunks = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_words = 0;

    for sentence in sentences {
        let sentence = sentence.into();
        let words = word_count(&sentence);

        if !current.is_empty() && current_words + words > max_words {
            chunks.push(TextChunk {
                sentences: std::mem::take(&mut current),
                word_count: current_words,
            });
            current_words = 0;
        }

        current_words += words;
        current.push(sentence);
    }

    if !current.is_empty() {
        chunks.push(TextChunk {
            sentences: current,
            word_count: current_words,
        });
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(words: usize) -> String {
        let mut s = vec!["word"; words].join(" ");
        s.push('.');
        s
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("  one\ttwo\nthree  "), 3);
    }

    #[test]
    fn test_segment_sentences() {
        let segmenter = UnicodeSentenceSegmenter;
        let sentences = segmenter
            .segment("First sentence. Second one?  Third!\n")
            .unwrap();
        assert_eq!(sentences, vec!["First sentence.", "Second one?", "Third!"]);
    }

    #[test]
    fn test_segment_text_without_terminator() {
        let segmenter = UnicodeSentenceSegmenter;
        let sentences = segmenter.segment("no terminal punctuation here").unwrap();
        assert_eq!(sentences, vec!["no terminal punctuation here"]);
    }

    #[test]
    fn test_segment_empty_fails() {
        let segmenter = UnicodeSentenceSegmenter;
        assert!(matches!(
            segmenter.segment("   \n"),
            Err(DocpipeError::Segmentation(_))
        ));
    }

    #[test]
    fn test_pack_closes_chunk_before_overflow() {
        let chunks = pack_sentences(vec![sentence(4), sentence(4), sentence(4)], 10);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].word_count, 8);
        assert_eq!(chunks[0].sentences.len(), 2);
        assert_eq!(chunks[1].word_count, 4);
    }

    #[test]
    fn test_pack_exact_threshold_stays_in_chunk() {
        let chunks = pack_sentences(vec![sentence(5), sentence(5)], 10);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].word_count, 10);
    }

    #[test]
    fn test_pack_oversized_sentence_is_alone() {
        let chunks = pack_sentences(vec![sentence(3), sentence(25), sentence(3)], 10);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[1].sentences, vec![sentence(25)]);
        assert_eq!(chunks[1].word_count, 25);
    }

    #[test]
    fn test_pack_empty_input() {
        let chunks = pack_sentences(Vec::<String>::new(), 10);
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_chunk_text_joins_with_spaces() {
        let chunks = pack_sentences(vec!["A b.", "C d."], 10);
        assert_eq!(chunks[0].text(), "A b. C d.");
    }
}
