use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("row {row} holds {len} scores, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("flat buffer holds {len} scores, expected {classes} x {steps}")]
    Shape {
        len: usize,
        classes: usize,
        steps: usize,
    },
}

/// A dense class-major score matrix: one row per class, one column per
/// timestep. The decoder reads it through [`ProbMatrix::step_scores`] and
/// never mutates it.
///
/// NaN or infinite scores are not rejected; decoding behavior on such input
/// is unspecified.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProbMatrix {
    data: Vec<f32>,
    classes: usize,
    steps: usize,
}

impl ProbMatrix {
    /// Builds a matrix from per-class rows. Rows must all have the same length.
    pub fn from_rows<R: AsRef<[f32]>>(rows: &[R]) -> Result<Self, MatrixError> {
        let steps = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * steps);
        for (row, scores) in rows.iter().enumerate() {
            let scores = scores.as_ref();
            if scores.len() != steps {
                return Err(MatrixError::Ragged {
                    row,
                    len: scores.len(),
                    expected: steps,
                });
            }
            data.extend_from_slice(scores);
        }
        Ok(Self {
            data,
            classes: rows.len(),
            steps,
        })
    }

    /// Takes ownership of an already flat class-major buffer laid out as
    /// `data[class * steps + t]`.
    pub fn from_flat(classes: usize, steps: usize, data: Vec<f32>) -> Result<Self, MatrixError> {
        if data.len() != classes * steps {
            return Err(MatrixError::Shape {
                len: data.len(),
                classes,
                steps,
            });
        }
        Ok(Self {
            data,
            classes,
            steps,
        })
    }

    pub fn classes(&self) -> usize {
        self.classes
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Score of `class` at timestep `t`.
    pub fn score(&self, class: usize, t: usize) -> f32 {
        debug_assert!(class < self.classes && t < self.steps);
        self.data[class * self.steps + t]
    }

    /// Per-class scores of one timestep, in class order.
    pub fn step_scores(&self, t: usize) -> impl Iterator<Item = f32> + '_ {
        (0..self.classes).map(move |class| self.score(class, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_rejects_ragged_rows() {
        let err = ProbMatrix::from_rows(&[vec![0.1, 0.2], vec![0.3]]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::Ragged {
                row: 1,
                len: 1,
                expected: 2,
            }
        );
    }

    #[test]
    fn it_rejects_a_misshapen_flat_buffer() {
        let err = ProbMatrix::from_flat(2, 3, vec![0.0; 5]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::Shape {
                len: 5,
                classes: 2,
                steps: 3,
            }
        );
    }

    #[test]
    fn step_scores_reads_one_column_across_classes() {
        let matrix = ProbMatrix::from_rows(&[[0.1, 0.2], [0.3, 0.4]]).unwrap();
        assert_eq!(matrix.classes(), 2);
        assert_eq!(matrix.steps(), 2);
        assert_eq!(matrix.score(1, 0), 0.3);
        assert_eq!(matrix.step_scores(1).collect::<Vec<_>>(), vec![0.2, 0.4]);
    }
}
