//! Property tests for sentence packing and chunk planning

use docpipe_common::Result;
use docpipe_llm::{
    pack_sentences, word_count, ChunkedSummarizer, ChunkingPolicy, SentenceSegmenter,
    SummarizationPrimitive, UnicodeSentenceSegmenter,
};
use proptest::prelude::*;
use std::sync::Arc;

struct EchoPrimitive;

#[async_trait::async_trait]
impl SummarizationPrimitive for EchoPrimitive {
    async fn summarize(&self, _text: &str, _max_length: usize, _min_length: usize) -> Result<String> {
        Ok("summary".to_string())
    }

    fn model(&self) -> &str {
        "echo"
    }
}

fn sentence(words: usize) -> String {
    let mut s = String::from("Lorem");
    for _ in 1..words {
        s.push_str(" ipsum");
    }
    s.push('.');
    s
}

proptest! {
    #[test]
    fn packing_is_an_ordered_partition(sizes in prop::collection::vec(1usize..60, 0..80), limit in 1usize..120) {
        let sentences: Vec<String> = sizes.iter().map(|&n| sentence(n)).collect();

        let chunks = pack_sentences(sentences.clone(), limit);

        let rebuilt: Vec<String> = chunks.iter().flat_map(|c| c.sentences.clone()).collect();
        prop_assert_eq!(rebuilt, sentences);
        for chunk in &chunks {
            prop_assert!(!chunk.sentences.is_empty());
            prop_assert!(chunk.word_count <= limit || chunk.sentences.len() == 1);
            prop_assert_eq!(chunk.word_count, word_count(&chunk.text()));
        }
    }

    #[test]
    fn packing_is_greedy(sizes in prop::collection::vec(1usize..60, 1..80), limit in 1usize..120) {
        let sentences: Vec<String> = sizes.iter().map(|&n| sentence(n)).collect();

        let chunks = pack_sentences(sentences, limit);

        // the next chunk's first sentence did not fit into the previous chunk
        for pair in chunks.windows(2) {
            let first_next = word_count(&pair[1].sentences[0]);
            prop_assert!(pair[0].word_count + first_next > limit);
        }
    }

    #[test]
    fn planned_chunks_cover_the_document(sizes in prop::collection::vec(1usize..400, 1..40)) {
        let text = sizes.iter().map(|&n| sentence(n)).collect::<Vec<_>>().join(" ");
        let summarizer = ChunkedSummarizer::new(Arc::new(EchoPrimitive), ChunkingPolicy::default());

        let chunks = summarizer.plan_chunks(&text).unwrap();

        let rebuilt: Vec<String> = chunks.into_iter().flat_map(|c| c.sentences).collect();
        prop_assert_eq!(rebuilt, UnicodeSentenceSegmenter.segment(&text).unwrap());
    }
}
