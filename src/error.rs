use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CError {
    #[error("empty formula")]
    EmptyFormula,
    #[error("unbalanced parenthesis at position {position}")]
    UnbalancedParenthesis { position: usize },
    #[error("unexpected symbol `{symbol}` at position {position}")]
    UnexpectedSymbol { symbol: char, position: usize },
    #[error("unknown element: `{0}`")]
    UnknownElement(String),
    #[error("formula expands to {count} atoms, but at most {limit} are allowed")]
    TooManyAtoms { count: usize, limit: usize },
}
