//! Query Abstract Syntax Tree
//!
//! A query is a tree of tagged variants, built once by the parser and
//! consumed top-down by the evaluator. Exhaustive matching replaces any
//! stringly-typed dispatch on node kind.

/// One node of a parsed boolean query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryNode {
    /// A bare term leaf, already lowercased by the parser.
    Term(String),
    /// Intersection of all children.
    And(Vec<QueryNode>),
    /// Union of all children.
    Or(Vec<QueryNode>),
    /// Global document universe minus the single child.
    Not(Box<QueryNode>),
}

impl QueryNode {
    /// Number of term leaves in the tree. Used for logging.
    pub fn term_count(&self) -> usize {
        match self {
            QueryNode::Term(_) => 1,
            QueryNode::And(children) | QueryNode::Or(children) => {
                children.iter().map(QueryNode::term_count).sum()
            }
            QueryNode::Not(child) => child.term_count(),
        }
    }
}
