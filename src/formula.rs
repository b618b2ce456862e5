// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use std::fmt;

use crate::element;
use crate::error::CError;

/// Element counts of a formula, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composition(Vec<(String, usize)>);

impl Composition {
    pub fn new() -> Self {
        Composition(Vec::new())
    }

    /// Add `count` atoms of `symbol`, summing with any previous occurrence.
    pub fn add(&mut self, symbol: &str, count: usize) {
        if count == 0 {
            return;
        }
        match self.0.iter_mut().find(|(s, _)| s == symbol) {
            Some((_, n)) => *n = n.saturating_add(count),
            None => self.0.push((symbol.to_string(), count)),
        }
    }

    /// Merge every count of `other`, multiplied by `factor`.
    pub fn merge_scaled(&mut self, other: &Composition, factor: usize) {
        for (symbol, count) in other.iter() {
            self.add(symbol, count.saturating_mul(factor));
        }
    }

    pub fn get(&self, symbol: &str) -> Option<usize> {
        self.0.iter().find(|(s, _)| s == symbol).map(|(_, n)| *n)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(s, n)| (s.as_str(), *n))
    }

    /// Number of distinct elements
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of atoms described by this composition
    pub fn total_atoms(&self) -> usize {
        self.0.iter().fold(0, |acc, (_, n)| acc.saturating_add(*n))
    }
}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, count) in self.iter() {
            f.write_str(symbol)?;
            if count > 1 {
                write!(f, "{count}")?;
            }
        }
        Ok(())
    }
}

/// Parser for `Symbol[count]` and `(group)[count]` tokens.
///
/// Open groups are kept on an explicit stack, so the nesting depth is only
/// bounded by memory. In lenient mode, characters that do not start a token
/// are skipped, a stray `)` is ignored and an unclosed `(` extends to the
/// end of the input. In strict mode all of these are errors.
pub struct FormulaParser<'a> {
    formula: &'a str,
    pos: usize,
    strict: bool,
}

impl<'a> FormulaParser<'a> {
    pub fn new(formula: &'a str) -> Self {
        FormulaParser {
            formula,
            pos: 0,
            strict: false,
        }
    }

    pub fn strict(formula: &'a str) -> Self {
        FormulaParser {
            formula,
            pos: 0,
            strict: true,
        }
    }

    pub fn parse(&mut self) -> Result<Composition, CError> {
        self.pos = 0;

        // byte offset of every open `(`, with the counts read before it
        let mut open: Vec<(usize, Composition)> = Vec::new();
        let mut current = Composition::new();

        while let Some(c) = self.peek() {
            match c {
                '(' => {
                    open.push((self.pos, std::mem::take(&mut current)));
                    self.bump();
                }
                ')' => match open.pop() {
                    Some((_, outer)) => {
                        self.bump();
                        let group = std::mem::replace(&mut current, outer);
                        let multiplier = self.read_count().unwrap_or(1);
                        current.merge_scaled(&group, multiplier);
                    }
                    None if self.strict => {
                        return Err(CError::UnbalancedParenthesis { position: self.pos });
                    }
                    None => {
                        self.bump();
                    }
                },
                c if c.is_ascii_uppercase() => {
                    let symbol = self.read_symbol();
                    let count = self.read_count().unwrap_or(1);
                    current.add(symbol, count);
                }
                c if c.is_whitespace() => {
                    self.bump();
                }
                symbol => {
                    if self.strict {
                        return Err(CError::UnexpectedSymbol {
                            symbol,
                            position: self.pos,
                        });
                    }
                    self.bump();
                }
            }
        }

        if self.strict {
            if let Some(&(position, _)) = open.last() {
                return Err(CError::UnbalancedParenthesis { position });
            }
        }
        while let Some((_, outer)) = open.pop() {
            let group = std::mem::replace(&mut current, outer);
            current.merge_scaled(&group, 1);
        }
        Ok(current)
    }

    fn peek(&self) -> Option<char> {
        self.formula[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn read_symbol(&mut self) -> &'a str {
        let start = self.pos;
        self.bump();
        while self.peek().is_some_and(|c| c.is_ascii_lowercase()) {
            self.bump();
        }
        &self.formula[start..self.pos]
    }

    fn read_count(&mut self) -> Option<usize> {
        let mut count: Option<usize> = None;
        while let Some(digit) = self.peek().and_then(|c| c.to_digit(10)) {
            self.bump();
            let value = count.unwrap_or(0);
            count = Some(value.saturating_mul(10).saturating_add(digit as usize));
        }
        count
    }
}

/// Parse `formula` into element counts.
///
/// This never fails: malformed parts of the input are skipped, and the
/// result may be empty.
pub fn parse(formula: &str) -> Composition {
    FormulaParser::new(formula)
        .parse()
        .unwrap_or_default()
}

/// Parse `formula`, rejecting malformed input and elements missing from
/// the properties table.
///
/// # Errors
///
/// Returns an error if the formula is empty, has unbalanced parentheses,
/// contains a character that does not start a token, or names an unknown
/// element.
pub fn parse_strict(formula: &str) -> Result<Composition, CError> {
    if formula.trim().is_empty() {
        return Err(CError::EmptyFormula);
    }

    let composition = FormulaParser::strict(formula).parse()?;
    if let Some((symbol, _)) = composition.iter().find(|(s, _)| !element::is_known(s)) {
        return Err(CError::UnknownElement(symbol.to_string()));
    }
    if composition.is_empty() {
        return Err(CError::EmptyFormula);
    }
    Ok(composition)
}
