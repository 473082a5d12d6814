//! Query Parser
//!
//! Turns query text into a [`QueryNode`] tree. Splitting is depth-aware: a
//! separator only splits when the bracket-nesting counter is zero, so
//! `blue|[orange sky]` is one OR piece and one grouped piece. Operands that
//! still contain operator characters are re-parsed recursively.

use super::ast::QueryNode;
use thiserror::Error;

/// Characters with structural meaning in the query language.
const SPECIAL: [char; 5] = [' ', '|', '!', '[', ']'];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("query contains disallowed character {0:?}")]
    InvalidCharacter(char),
    #[error("query cannot be empty")]
    Empty,
    #[error("NOT takes exactly one operand")]
    NotOperand,
    #[error("unbalanced brackets in query")]
    UnbalancedBrackets,
    #[error("operator in unexpected position: {0:?}")]
    Malformed(String),
}

/// Compile query text into an AST.
///
/// The grammar is case-insensitive; the input is lowercased up front so term
/// leaves come out ready for stemming.
pub fn parse(input: &str) -> Result<QueryNode, QueryError> {
    let text = input.trim().to_lowercase();
    build_node(&text)
}

fn is_special(c: char) -> bool {
    SPECIAL.contains(&c)
}

fn has_special(text: &str) -> bool {
    text.chars().any(is_special)
}

/// Split `text` at every depth-0 occurrence of `sep`, validating characters
/// and bracket balance along the way. Empty pieces are dropped.
fn split_depth0(text: &str, sep: char) -> Result<Vec<String>, QueryError> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut depth: u32 = 0;

    for c in text.chars() {
        if !c.is_ascii_alphabetic() && !is_special(c) {
            return Err(QueryError::InvalidCharacter(c));
        }
        match c {
            '[' => {
                depth += 1;
                current.push(c);
            }
            ']' => {
                depth = depth.checked_sub(1).ok_or(QueryError::UnbalancedBrackets)?;
                current.push(c);
            }
            _ if c == sep && depth == 0 => {
                if !current.is_empty() {
                    pieces.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }
    if depth != 0 {
        return Err(QueryError::UnbalancedBrackets);
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    Ok(pieces)
}

/// Determine the single operator kind governing `text` and build the node.
fn build_node(text: &str) -> Result<QueryNode, QueryError> {
    let and_pieces = split_depth0(text, ' ')?;
    if and_pieces.is_empty() {
        return Err(QueryError::Empty);
    }
    if and_pieces.len() > 1 {
        let children = and_pieces
            .iter()
            .map(|piece| operand(piece))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(QueryNode::And(children));
    }

    let piece = &and_pieces[0];

    let or_pieces = split_depth0(piece, '|')?;
    if or_pieces.len() > 1 {
        let children = or_pieces
            .iter()
            .map(|piece| operand(piece))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(QueryNode::Or(children));
    }

    if piece.starts_with('!') {
        let not_pieces = split_depth0(piece, '!')?;
        if not_pieces.is_empty() {
            // "!" with nothing to negate
            return Err(QueryError::Empty);
        }
        if not_pieces.len() > 1 {
            return Err(QueryError::NotOperand);
        }
        return Ok(QueryNode::Not(Box::new(operand(&not_pieces[0])?)));
    }

    // A single piece: either a fully bracketed group to unwrap, a bare term,
    // or an operator stuck inside a token context.
    if let Some(inner) = strip_group(piece) {
        return build_node(inner);
    }
    if has_special(piece) {
        return Err(QueryError::Malformed(piece.clone()));
    }
    Ok(QueryNode::Term(piece.clone()))
}

/// One operand of an AND/OR/NOT node. A full bracketed group loses its
/// enclosing punctuation; anything still containing an operator is a nested
/// query, the rest are term leaves.
fn operand(piece: &str) -> Result<QueryNode, QueryError> {
    let text = strip_group(piece).unwrap_or(piece);
    if text.is_empty() {
        return Err(QueryError::Empty);
    }
    if has_special(text) {
        return build_node(text);
    }
    Ok(QueryNode::Term(text.to_string()))
}

/// `Some(inner)` when the piece is syntactically a full bracketed group.
fn strip_group(piece: &str) -> Option<&str> {
    if piece.len() >= 2 && piece.starts_with('[') && piece.ends_with(']') {
        Some(&piece[1..piece.len() - 1])
    } else {
        None
    }
}
