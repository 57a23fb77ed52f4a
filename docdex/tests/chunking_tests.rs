//! Unit and property tests for fixed-size chunking.

use docdex::chunking::{Chunker, FixedSizeChunker};
use docdex::error::DocdexError;
use proptest::prelude::*;

#[test]
fn fifteen_chars_with_size_ten_overlap_five_yields_three_chunks() {
    let chunker = FixedSizeChunker::new(10, 5).unwrap();
    let chunks = chunker.chunk("AAAAABBBBBCCCCC");

    let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["AAAAABBBBB", "BBBBBCCCCC", "CCCCC"]);

    let indices: Vec<usize> = chunks.iter().map(|c| c.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn empty_text_yields_no_chunks() {
    let chunker = FixedSizeChunker::new(10, 5).unwrap();
    assert!(chunker.chunk("").is_empty());
}

#[test]
fn whitespace_only_text_yields_no_chunks() {
    let chunker = FixedSizeChunker::new(10, 5).unwrap();
    assert!(chunker.chunk("   \n\t  \n   ").is_empty());
}

#[test]
fn whitespace_windows_are_dropped_and_indices_stay_sequential() {
    // Windows: "AAAAA", "     ", "BBBBB". The middle one is dropped but
    // the window still advances, so "BBBBB" gets index 1, not 2.
    let chunker = FixedSizeChunker::new(5, 0).unwrap();
    let chunks = chunker.chunk("AAAAA     BBBBB");

    assert_eq!(chunks.len(), 2);
    assert_eq!((chunks[0].index, chunks[0].text.as_str()), (0, "AAAAA"));
    assert_eq!((chunks[1].index, chunks[1].text.as_str()), (1, "BBBBB"));
}

#[test]
fn multibyte_text_splits_on_character_boundaries() {
    let chunker = FixedSizeChunker::new(4, 1).unwrap();
    let chunks = chunker.chunk("déjà-vu-héhé");

    for chunk in &chunks {
        assert!(chunk.text.chars().count() <= 4);
    }
}

#[test]
fn overlap_equal_to_chunk_size_is_rejected() {
    let err = FixedSizeChunker::new(5, 5).unwrap_err();
    assert!(matches!(err, DocdexError::InvalidConfiguration(_)));
}

#[test]
fn overlap_greater_than_chunk_size_is_rejected() {
    assert!(FixedSizeChunker::new(5, 8).is_err());
}

#[test]
fn zero_chunk_size_is_rejected() {
    assert!(FixedSizeChunker::new(0, 0).is_err());
}

/// **Property: overlap-removed concatenation reconstructs the input.**
/// For any text with no whitespace-only window (so the filter retains
/// every window) and any valid geometry, the first chunk followed by each
/// subsequent chunk minus its leading `overlap` characters reproduces the
/// original text exactly, and no chunk exceeds `chunk_size` characters.
mod prop_reconstruction {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn chunks_reconstruct_text_and_respect_max_size(
            text in "[a-z0-9àé]{0,120}",
            chunk_size in 1usize..40,
            overlap_frac in 0usize..40,
        ) {
            let overlap = overlap_frac % chunk_size;
            let chunker = FixedSizeChunker::new(chunk_size, overlap).unwrap();
            let chunks = chunker.chunk(&text);

            for chunk in &chunks {
                prop_assert!(chunk.text.chars().count() <= chunk_size);
            }

            let mut rebuilt = String::new();
            for (i, chunk) in chunks.iter().enumerate() {
                if i == 0 {
                    rebuilt.push_str(&chunk.text);
                } else {
                    rebuilt.extend(chunk.text.chars().skip(overlap));
                }
            }
            prop_assert_eq!(rebuilt, text);
        }
    }
}
