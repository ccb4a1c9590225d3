//! Analyzer interface for addlint
//!
//! A driver holds analyzers as plain values and passes them by reference;
//! there is no process-wide registry.
//!
//! ```text
//! Source → [Driver: syn::parse_file] → syn::File → [Analyzer] → Diagnostics
//! ```

use crate::context::CheckContext;
use crate::diagnostic::Diagnostics;
use crate::error::Result;
use crate::types::TypeLookup;

/// A single rule run over one parsed file at a time.
///
/// Implementations keep no state between calls, so one value can serve any
/// number of files, from any number of threads.
pub trait Analyzer: Send + Sync {
    /// Short identifier, e.g. `addlint`.
    fn name(&self) -> &str;

    /// One-line description of what the rule reports.
    fn doc(&self) -> &str;

    /// Run the rule over one file.
    ///
    /// # Errors
    ///
    /// Fails only on internal invariant violations or interruption; a node
    /// whose type is unknown is simply not reported.
    fn run(&self, file: &syn::File, types: &dyn TypeLookup, ctx: &CheckContext)
        -> Result<Diagnostics>;
}
