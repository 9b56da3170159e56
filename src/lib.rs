mod decoder;
mod matrix;
mod symbols;

pub use decoder::{
    collapse, BeamSearchDecoder, DecodeError, DecodedResult, Decoder, GreedyDecoder,
};
pub use matrix::{MatrixError, ProbMatrix};
pub use symbols::{SymbolTable, SymbolTableError};
