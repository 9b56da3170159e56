use super::{collapse, validate, DecodeError, DecodedResult, Decoder};
use crate::{ProbMatrix, SymbolTable};

/// Argmax decoding: considers only the most probable class at each timestep.
#[derive(Debug, Clone, Default)]
pub struct GreedyDecoder;

impl Decoder for GreedyDecoder {
    fn decode(
        &self,
        matrix: &ProbMatrix,
        symbols: &SymbolTable,
    ) -> Result<Vec<DecodedResult>, DecodeError> {
        validate(matrix, symbols)?;

        let mut raw = Vec::with_capacity(matrix.steps());
        let mut score = 0.0f32;
        for t in 0..matrix.steps() {
            let (class, prob) = find_max_index(matrix.step_scores(t));
            score -= prob;
            raw.push(class);
        }

        let labels = collapse(&raw, symbols.len() - 1);
        Ok(vec![DecodedResult {
            score,
            text: symbols.render(&labels),
            labels,
        }])
    }
}

/// The first index wins on exact ties, matching the beam search tie-break.
fn find_max_index(vs: impl Iterator<Item = f32>) -> (usize, f32) {
    let mut max_index = 0usize;
    let mut max_value = f32::NEG_INFINITY;
    for (i, v) in vs.enumerate() {
        if v > max_value {
            max_index = i;
            max_value = v;
        }
    }
    (max_index, max_value)
}
