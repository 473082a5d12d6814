//! Query Language Module
//!
//! Compiles the boolean mini-language into an abstract syntax tree.
//!
//! ## Syntax
//! - Whitespace is an implicit AND: `blue dog`
//! - `|` is OR: `light|blue`
//! - `!` is unary NOT: `light !surpass`
//! - `[...]` groups a subexpression: `blue dog ![red|purple]`
//!
//! Terms are ASCII letters only; any other character is rejected before
//! evaluation starts.
//!
//! ## Submodules
//! - **`ast`**: The `QueryNode` sum type produced by the parser.
//! - **`parser`**: Depth-tracking splitter that builds the tree.

pub mod ast;
pub mod parser;
