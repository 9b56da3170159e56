mod beamsearch;
mod greedy;

pub use beamsearch::BeamSearchDecoder;
pub use greedy::GreedyDecoder;

use thiserror::Error;

use crate::{ProbMatrix, SymbolTable};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("probability matrix has no class rows")]
    EmptyInput,
    #[error("symbol table is empty")]
    EmptyVocabulary,
    #[error("symbol table holds {symbols} symbols but the matrix has {classes} classes")]
    VocabularySize { symbols: usize, classes: usize },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DecodedResult {
    /// Score of this path. Lower is more probable.
    pub score: f32,
    /// Decoded text, with blank and repeated labels resolved.
    pub text: String,
    /// The collapsed label indices behind `text`.
    pub labels: Vec<usize>,
}

/// Decoder is a trait for decoding a ctc sequence of class scores.
pub trait Decoder {
    /// Decodes one score matrix into candidate results ordered by ascending
    /// score, most probable first. The inputs are only borrowed for the call.
    fn decode(
        &self,
        matrix: &ProbMatrix,
        symbols: &SymbolTable,
    ) -> Result<Vec<DecodedResult>, DecodeError>;
}

pub(crate) fn validate(matrix: &ProbMatrix, symbols: &SymbolTable) -> Result<(), DecodeError> {
    if matrix.classes() == 0 {
        return Err(DecodeError::EmptyInput);
    }
    if symbols.is_empty() {
        return Err(DecodeError::EmptyVocabulary);
    }
    if symbols.len() < matrix.classes() {
        return Err(DecodeError::VocabularySize {
            symbols: symbols.len(),
            classes: matrix.classes(),
        });
    }
    Ok(())
}

/// Returns the label sequence where blank and consecutive repeated labels have
/// been resolved. A blank resets repeat suppression, so the same label on both
/// sides of a blank is emitted twice.
pub fn collapse(raw: &[usize], blank: usize) -> Vec<usize> {
    let mut output = Vec::new();
    let mut last = blank;
    for &label in raw {
        if last != label && label != blank {
            output.push(label);
        }
        last = label;
    }
    output
}

#[cfg(test)]
mod tests {
    use super::collapse;

    #[test]
    fn collapse_merges_consecutive_repeats() {
        assert_eq!(collapse(&[0, 0, 1, 1, 1, 2], 3), vec![0, 1, 2]);
    }

    #[test]
    fn collapse_emits_again_after_blank() {
        assert_eq!(collapse(&[0, 3, 0], 3), vec![0, 0]);
        assert_eq!(collapse(&[0, 0], 3), vec![0]);
    }

    #[test]
    fn collapse_drops_a_blank_only_path() {
        assert!(collapse(&[3, 3, 3], 3).is_empty());
    }

    #[test]
    fn collapse_keeps_a_clean_sequence_unchanged() {
        assert_eq!(collapse(&[1, 0, 2, 0], 3), vec![1, 0, 2, 0]);
    }

    #[test]
    fn collapse_of_empty_is_empty() {
        assert!(collapse(&[], 3).is_empty());
    }
}
