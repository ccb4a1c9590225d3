//! The integer-addition rule
//!
//! Walks a file pre-order, left to right, and reports every `a + b` where `a`
//! and `b` are both literal tokens of integer type. Only the immediate
//! operands count: `1 + 2 + 3` parses as `(1 + 2) + 3`, so only `1 + 2` is
//! reported, and `(1 + 2) + 3` reports `1 + 2` alone.

use log::{debug, trace};
use syn::parse::ParseStream;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::visit::{self, Visit};

use crate::analyzer::Analyzer;
use crate::context::CheckContext;
use crate::diagnostic::{Diagnostic, Diagnostics, Position};
use crate::error::{AddlintError, Result};
use crate::render::render_expr;
use crate::types::TypeLookup;

/// Reports additions of two integer literals.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddCheck;

impl AddCheck {
    /// Create the rule.
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for AddCheck {
    fn name(&self) -> &str {
        "addlint"
    }

    fn doc(&self) -> &str {
        "reports integer additions"
    }

    fn run(
        &self,
        file: &syn::File,
        types: &dyn TypeLookup,
        ctx: &CheckContext,
    ) -> Result<Diagnostics> {
        evaluate(file, types, ctx)
    }
}

/// Run the rule over one file.
///
/// The interrupt flag in `ctx` is checked before each top-level item.
///
/// # Errors
///
/// - [`AddlintError::Render`] if a matched expression cannot be printed
/// - [`AddlintError::Interrupted`] if the context was interrupted
pub fn evaluate(
    file: &syn::File,
    types: &dyn TypeLookup,
    ctx: &CheckContext,
) -> Result<Diagnostics> {
    let mut finder = AdditionFinder::new(types, ctx);

    for attr in &file.attrs {
        finder.visit_attribute(attr);
    }
    for item in &file.items {
        if ctx.is_interrupted() {
            return Err(AddlintError::Interrupted);
        }
        finder.visit_item(item);
    }

    finder.finish()
}

/// Run the rule over a single expression.
///
/// Handy for callers that already hold an expression rather than a file.
pub fn evaluate_expr(
    expr: &syn::Expr,
    types: &dyn TypeLookup,
    ctx: &CheckContext,
) -> Result<Diagnostics> {
    let mut finder = AdditionFinder::new(types, ctx);
    finder.visit_expr(expr);
    finder.finish()
}

/// Check one binary node, without looking at its children.
///
/// Returns the diagnostic for a match, `None` otherwise.
pub fn check_binary(
    bin: &syn::ExprBinary,
    types: &dyn TypeLookup,
) -> Result<Option<Diagnostic>> {
    if !matches!(bin.op, syn::BinOp::Add(_)) {
        return Ok(None);
    }

    if !is_literal(&bin.left) || !is_literal(&bin.right) {
        return Ok(None);
    }

    let is_integer = |expr: &syn::Expr| types.lookup(expr).is_some_and(|ty| ty.is_integer());
    if !is_integer(&bin.left) || !is_integer(&bin.right) {
        return Ok(None);
    }

    // Synthesized nodes (`parse_quote!`, call-site spans) have no source text
    // and no real position
    let span = bin.span();
    if span.source_text().is_none() {
        return Ok(None);
    }
    let position = Position::of(span);

    let rendered = render_expr(&syn::Expr::Binary(bin.clone()))?;
    debug!("integer addition at {}: {}", position, rendered);
    Ok(Some(Diagnostic::new(
        position,
        format!("integer addition found {:?}", rendered),
    )))
}

fn is_literal(expr: &syn::Expr) -> bool {
    matches!(expr, syn::Expr::Lit(_))
}

/// Builtin and common macros that take tokens without evaluating them.
const TOKEN_MACROS: &[&str] = &[
    "stringify",
    "concat",
    "concat_idents",
    "quote",
    "quote_spanned",
    "parse_quote",
    "parse_quote_spanned",
    "macro_rules",
    "include",
    "include_str",
    "include_bytes",
    "env",
    "option_env",
    "compile_error",
    "cfg",
    "module_path",
    "file",
    "line",
    "column",
];

fn is_token_macro(mac: &syn::Macro) -> bool {
    mac.path
        .segments
        .last()
        .is_some_and(|seg| TOKEN_MACROS.iter().any(|name| seg.ident == name))
}

/// Parse a macro body as the expressions it evaluates: either a comma list
/// (`println!("{}", x)`) or a repeat (`vec![x; n]`).
fn macro_args(mac: &syn::Macro) -> syn::Result<Vec<syn::Expr>> {
    mac.parse_body_with(Punctuated::<syn::Expr, syn::Token![,]>::parse_terminated)
        .map(|args| args.into_iter().collect())
        .or_else(|_| mac.parse_body_with(parse_repeat))
}

fn parse_repeat(input: ParseStream) -> syn::Result<Vec<syn::Expr>> {
    let elem: syn::Expr = input.parse()?;
    input.parse::<syn::Token![;]>()?;
    let len: syn::Expr = input.parse()?;
    Ok(vec![elem, len])
}

struct AdditionFinder<'a> {
    types: &'a dyn TypeLookup,
    ctx: &'a CheckContext,
    found: Vec<Diagnostic>,
    error: Option<AddlintError>,
}

impl<'a> AdditionFinder<'a> {
    fn new(types: &'a dyn TypeLookup, ctx: &'a CheckContext) -> Self {
        Self {
            types,
            ctx,
            found: Vec::new(),
            error: None,
        }
    }

    fn finish(self) -> Result<Diagnostics> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(Diagnostics::new(self.found)),
        }
    }
}

impl<'ast> Visit<'ast> for AdditionFinder<'_> {
    fn visit_expr_binary(&mut self, node: &'ast syn::ExprBinary) {
        if self.error.is_some() {
            return;
        }
        if self.ctx.trace {
            trace!("binary expression at {}", Position::of(node.span()));
        }

        match check_binary(node, self.types) {
            Ok(Some(diag)) => self.found.push(diag),
            Ok(None) => {}
            Err(err) => {
                self.error = Some(err);
                return;
            }
        }

        visit::visit_expr_binary(self, node);
    }

    // Macro bodies are opaque to syn; most call-like macros take an
    // expression list, so try that and walk whatever parses.
    fn visit_macro(&mut self, mac: &'ast syn::Macro) {
        visit::visit_macro(self, mac);

        if is_token_macro(mac) {
            trace!("skipping token macro at {}", Position::of(mac.span()));
            return;
        }

        match macro_args(mac) {
            Ok(args) => {
                for arg in &args {
                    self.visit_expr(arg);
                }
            }
            Err(err) => trace!(
                "skipping body of macro at {}: {}",
                Position::of(mac.span()),
                err
            ),
        }
    }
}
