//! # addlint
//!
//! A lint over Rust's `syn` AST that reports additions of two integer
//! literals, such as `3 + 4`, which could simply be written as `7`.
//!
//! ## Architecture
//!
//! - **Rule**: [`AddCheck`] walks one parsed file and yields [`Diagnostic`]s
//! - **Types**: a [`TypeLookup`] answers what type an operand has
//! - **Renderer**: prints the matched expression in canonical form
//! - **Driver**: finds `.rs` files, parses them and runs the rule per file
//!
//! ## Example
//!
//! ```
//! use addlint::{evaluate, CheckContext, LiteralTypes};
//!
//! let file = syn::parse_file("const N: u32 = 3 + 4;").unwrap();
//! let diags: Vec<_> = evaluate(&file, &LiteralTypes, &CheckContext::new())
//!     .unwrap()
//!     .collect();
//! assert_eq!(diags.len(), 1);
//! assert_eq!(diags[0].message, "integer addition found \"3 + 4\"");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analyzer;
pub mod check;
pub mod context;
pub mod diagnostic;
pub mod driver;
pub mod error;
pub mod render;
pub mod types;

// Re-export main types
pub use analyzer::Analyzer;
pub use check::{check_binary, evaluate, evaluate_expr, AddCheck};
pub use context::CheckContext;
pub use diagnostic::{Diagnostic, Diagnostics, Position};
pub use error::{AddlintError, Result};
pub use render::render_expr;
pub use types::{LiteralTypes, TypeDescriptor, TypeKind, TypeLookup, TypeTable};

/// addlint version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
