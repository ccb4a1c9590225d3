//! Canonical pretty-printing of expressions
//!
//! The output is rebuilt from the tree, not sliced from the source, so
//! `1+2`, `1 +  2` and `1 + 2` all render as `1 + 2`.

use quote::ToTokens;

use crate::error::{AddlintError, Result};

/// Render an expression subtree to canonical text.
///
/// # Errors
///
/// Returns [`AddlintError::Render`] for `syn::Expr::Verbatim`, which holds
/// tokens `syn` itself could not interpret.
pub fn render_expr(expr: &syn::Expr) -> Result<String> {
    let mut out = String::new();
    write_expr(&mut out, expr)?;
    Ok(out)
}

fn write_expr(out: &mut String, expr: &syn::Expr) -> Result<()> {
    match expr {
        syn::Expr::Lit(lit) => out.push_str(&tokens(&lit.lit)),

        syn::Expr::Binary(bin) => {
            write_expr(out, &bin.left)?;
            out.push(' ');
            out.push_str(&tokens(&bin.op));
            out.push(' ');
            write_expr(out, &bin.right)?;
        }

        syn::Expr::Unary(un) => {
            out.push_str(&tokens(&un.op));
            write_expr(out, &un.expr)?;
        }

        syn::Expr::Paren(paren) => {
            out.push('(');
            write_expr(out, &paren.expr)?;
            out.push(')');
        }

        // Invisible delimiters from macro expansion
        syn::Expr::Group(group) => write_expr(out, &group.expr)?,

        syn::Expr::Path(path) if path.qself.is_none() => write_path(out, &path.path),

        syn::Expr::Call(call) => {
            write_expr(out, &call.func)?;
            write_list(out, "(", call.args.iter(), ")")?;
        }

        syn::Expr::MethodCall(call) => {
            write_expr(out, &call.receiver)?;
            out.push('.');
            out.push_str(&call.method.to_string());
            if let Some(turbofish) = &call.turbofish {
                out.push_str(&tokens(turbofish));
            }
            write_list(out, "(", call.args.iter(), ")")?;
        }

        syn::Expr::Field(field) => {
            write_expr(out, &field.base)?;
            out.push('.');
            match &field.member {
                syn::Member::Named(ident) => out.push_str(&ident.to_string()),
                syn::Member::Unnamed(index) => out.push_str(&index.index.to_string()),
            }
        }

        syn::Expr::Index(index) => {
            write_expr(out, &index.expr)?;
            out.push('[');
            write_expr(out, &index.index)?;
            out.push(']');
        }

        syn::Expr::Cast(cast) => {
            write_expr(out, &cast.expr)?;
            out.push_str(" as ");
            out.push_str(&tokens(&cast.ty));
        }

        syn::Expr::Reference(reference) => {
            out.push('&');
            if reference.mutability.is_some() {
                out.push_str("mut ");
            }
            write_expr(out, &reference.expr)?;
        }

        syn::Expr::Array(array) => write_list(out, "[", array.elems.iter(), "]")?,

        syn::Expr::Tuple(tuple) => {
            write_list(out, "(", tuple.elems.iter(), "")?;
            if tuple.elems.len() == 1 {
                out.push(',');
            }
            out.push(')');
        }

        syn::Expr::Verbatim(_) => {
            return Err(AddlintError::Render {
                kind: "verbatim".to_string(),
            });
        }

        // Blocks, closures, control flow: proc-macro2's token printer
        other => out.push_str(&tokens(other)),
    }
    Ok(())
}

fn write_list<'a>(
    out: &mut String,
    open: &str,
    items: impl Iterator<Item = &'a syn::Expr>,
    close: &str,
) -> Result<()> {
    out.push_str(open);
    for (i, item) in items.enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_expr(out, item)?;
    }
    out.push_str(close);
    Ok(())
}

fn write_path(out: &mut String, path: &syn::Path) {
    if path.leading_colon.is_some() {
        out.push_str("::");
    }
    for (i, segment) in path.segments.iter().enumerate() {
        if i > 0 {
            out.push_str("::");
        }
        out.push_str(&segment.ident.to_string());
        if !segment.arguments.is_empty() {
            out.push_str(&tokens(&segment.arguments));
        }
    }
}

fn tokens(node: &impl ToTokens) -> String {
    node.to_token_stream().to_string()
}
