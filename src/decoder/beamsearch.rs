use log::debug;
use ordered_float::OrderedFloat;

use super::{collapse, validate, DecodeError, DecodedResult, Decoder};
use crate::{ProbMatrix, SymbolTable};

/// A raw search candidate: an alignment over class indices and its running
/// score, accumulated as `score - probability` at every timestep.
#[derive(Clone, Debug, PartialEq)]
struct BeamPath {
    labels: Vec<usize>,
    score: f32,
}

impl BeamPath {
    fn root() -> Self {
        Self {
            labels: Vec::new(),
            score: 0.0,
        }
    }

    /// A new owned path with `class` appended; the parent is left untouched.
    fn extend(&self, class: usize, prob: f32) -> Self {
        let mut labels = Vec::with_capacity(self.labels.len() + 1);
        labels.extend_from_slice(&self.labels);
        labels.push(class);
        Self {
            labels,
            score: self.score - prob,
        }
    }

    fn appended(&self) -> usize {
        self.labels.last().copied().unwrap_or(0)
    }
}

/// Beam search over raw alignments. Paths that collapse to the same text are
/// tracked and reported independently; there is no merging across alignments.
#[derive(Clone, Debug)]
pub struct BeamSearchDecoder {
    beam_width: usize,
}

impl BeamSearchDecoder {
    /// Creates a decoder keeping at most `beam_width` paths per timestep.
    /// A width of zero degenerates to an empty beam and an empty result.
    pub fn new(beam_width: usize) -> Self {
        Self { beam_width }
    }

    pub fn beam_width(&self) -> usize {
        self.beam_width
    }
}

impl Decoder for BeamSearchDecoder {
    fn decode(
        &self,
        matrix: &ProbMatrix,
        symbols: &SymbolTable,
    ) -> Result<Vec<DecodedResult>, DecodeError> {
        validate(matrix, symbols)?;
        debug!(
            "beam decode: {} classes, {} steps, width {}",
            matrix.classes(),
            matrix.steps(),
            self.beam_width
        );

        let classes = matrix.classes();
        let mut beams = vec![BeamPath::root()];
        let mut frame = Vec::with_capacity(classes);
        for t in 0..matrix.steps() {
            frame.clear();
            frame.extend(matrix.step_scores(t));

            let mut candidates = Vec::with_capacity(beams.len() * classes);
            for beam in &beams {
                for (class, &prob) in frame.iter().enumerate() {
                    candidates.push(beam.extend(class, prob));
                }
            }
            // Candidates are generated parent-major, so the stable sort breaks
            // exact score ties by appended class index, then by parent rank.
            candidates.sort_by_key(|path| (OrderedFloat(path.score), path.appended()));
            candidates.truncate(self.beam_width);
            beams = candidates;
        }

        let blank = symbols.len() - 1;
        Ok(beams
            .into_iter()
            .map(|beam| {
                let labels = collapse(&beam.labels, blank);
                DecodedResult {
                    score: beam.score,
                    text: symbols.render(&labels),
                    labels,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        let matrix = ProbMatrix::from_rows(&[
            [1.0, 1.0, 0.0],
            [0.0, 0.0, 2.0],
            [0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0],
        ])
        .unwrap();
        let symbols = SymbolTable::from_symbols(["a", "b", "c", "_"]).unwrap();

        let outputs = BeamSearchDecoder::new(1).decode(&matrix, &symbols).unwrap();
        assert_eq!(outputs.len(), 1);
        assert_eq!(
            outputs[0],
            DecodedResult {
                score: -4.0,
                text: "ab".to_string(),
                labels: vec![0, 1],
            }
        );
    }

    #[test]
    fn a_zero_width_beam_decodes_to_nothing() {
        let matrix = ProbMatrix::from_rows(&[[0.5, 0.5], [0.5, 0.5]]).unwrap();
        let symbols = SymbolTable::from_symbols(["a", "_"]).unwrap();

        let outputs = BeamSearchDecoder::new(0).decode(&matrix, &symbols).unwrap();
        assert!(outputs.is_empty());
    }
}
