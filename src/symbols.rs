use rustc_hash::FxHashMap;
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SymbolTableError {
    #[error("duplicate symbol in table: {0}")]
    DuplicateSymbol(String),
    #[error("missing index in table: {0}")]
    MissingIndex(usize),
    #[error("missing symbol in table: {0}")]
    MissingSymbol(String),
    #[error("failed to load symbol table")]
    Load(#[from] std::io::Error),
}

/// An ordered list of class labels. The last entry is reserved as the blank.
///
/// The table may hold more symbols than the matrix being decoded has classes;
/// raw labels then never reach the blank slot and blank suppression is a
/// no-op during collapsing.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct SymbolTable {
    symbols: Vec<String>,
    index: FxHashMap<String, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_symbols<I, S>(symbols: I) -> Result<Self, SymbolTableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for symbol in symbols {
            table.add_symbol(symbol.into())?;
        }
        Ok(table)
    }

    /// Reads a table from a file holding one symbol per line.
    pub fn read<P: AsRef<Path>>(p: P) -> Result<Self, SymbolTableError> {
        let file = File::open(p)?;
        Self::parse(file)
    }

    pub fn parse(p: impl Read) -> Result<Self, SymbolTableError> {
        let mut table = Self::new();
        let buf = BufReader::new(p);
        for line in buf.lines() {
            let line = line?;
            table.add_symbol(line.trim().to_owned())?;
        }
        Ok(table)
    }

    pub fn len(&self) -> usize {
        debug_assert!(self.index.len() == self.symbols.len());
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a symbol, returning its class index.
    pub fn add_symbol(&mut self, symbol: String) -> Result<usize, SymbolTableError> {
        if self.index.contains_key(&symbol) {
            return Err(SymbolTableError::DuplicateSymbol(symbol));
        }
        let idx = self.symbols.len();
        self.index.insert(symbol.clone(), idx);
        self.symbols.push(symbol);
        Ok(idx)
    }

    pub fn symbol(&self, idx: usize) -> Result<&str, SymbolTableError> {
        match self.symbols.get(idx) {
            Some(symbol) => Ok(symbol),
            None => Err(SymbolTableError::MissingIndex(idx)),
        }
    }

    pub fn index(&self, symbol: &str) -> Result<usize, SymbolTableError> {
        match self.index.get(symbol) {
            Some(&idx) => Ok(idx),
            None => Err(SymbolTableError::MissingSymbol(symbol.to_owned())),
        }
    }

    /// Index of the blank symbol, the last entry. `None` for an empty table.
    pub fn blank(&self) -> Option<usize> {
        self.len().checked_sub(1)
    }

    /// Concatenates the symbols behind a collapsed label sequence.
    /// Out-of-range labels are skipped.
    pub fn render(&self, labels: &[usize]) -> String {
        labels
            .iter()
            .filter_map(|&idx| self.symbols.get(idx))
            .map(String::as_str)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }
}
