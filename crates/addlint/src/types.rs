//! Type lookup for expression operands
//!
//! The rule never asks a node for its type directly. It goes through a
//! [`TypeLookup`], so a caller with a real type checker can hand its results
//! in as a side table, while the default [`LiteralTypes`] answers from the
//! literal tokens alone.

use std::collections::HashMap;
use std::fmt;

use syn::spanned::Spanned;

use crate::diagnostic::Position;

/// Basic classification of a resolved type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Any signed or unsigned integer width, or an untyped integer constant
    Integer,
    /// `f32`, `f64`, or an untyped float constant
    Float,
    /// `bool`
    Bool,
    /// `char`
    Char,
    /// String-like literals (`&str`, byte strings, C strings)
    String,
    /// Anything else a type checker may know about
    Other,
}

/// A resolved type: its name as written, and its kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    /// Type name, e.g. `u8` or `{integer}`
    pub name: String,

    /// Classification used by the rule
    pub kind: TypeKind,
}

impl TypeDescriptor {
    /// Create a new descriptor.
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Untyped integer constant.
    pub fn untyped_int() -> Self {
        Self::new("{integer}", TypeKind::Integer)
    }

    /// Untyped float constant.
    pub fn untyped_float() -> Self {
        Self::new("{float}", TypeKind::Float)
    }

    /// Whether the underlying representation is a whole number.
    pub fn is_integer(&self) -> bool {
        self.kind == TypeKind::Integer
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Maps an expression node to its resolved type.
///
/// `None` means the type is unknown. Implementations must never panic on
/// nodes they know nothing about.
pub trait TypeLookup {
    /// Resolve the type of `expr`.
    fn lookup(&self, expr: &syn::Expr) -> Option<TypeDescriptor>;
}

impl<T: TypeLookup + ?Sized> TypeLookup for &T {
    fn lookup(&self, expr: &syn::Expr) -> Option<TypeDescriptor> {
        (**self).lookup(expr)
    }
}

/// Types every literal from its token; everything else is unknown.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralTypes;

impl LiteralTypes {
    /// Create a new literal lookup.
    pub fn new() -> Self {
        Self
    }
}

impl TypeLookup for LiteralTypes {
    fn lookup(&self, expr: &syn::Expr) -> Option<TypeDescriptor> {
        match expr {
            syn::Expr::Lit(lit) => lit_type(&lit.lit),
            _ => None,
        }
    }
}

/// Resolve the type of a literal token.
pub fn lit_type(lit: &syn::Lit) -> Option<TypeDescriptor> {
    match lit {
        syn::Lit::Int(i) => Some(int_type(i.suffix())),
        syn::Lit::Float(f) => Some(match f.suffix() {
            "" => TypeDescriptor::untyped_float(),
            suffix => TypeDescriptor::new(suffix, TypeKind::Float),
        }),
        syn::Lit::Byte(_) => Some(TypeDescriptor::new("u8", TypeKind::Integer)),
        syn::Lit::Char(_) => Some(TypeDescriptor::new("char", TypeKind::Char)),
        syn::Lit::Bool(_) => Some(TypeDescriptor::new("bool", TypeKind::Bool)),
        syn::Lit::Str(_) => Some(TypeDescriptor::new("&str", TypeKind::String)),
        syn::Lit::ByteStr(_) => Some(TypeDescriptor::new("&[u8]", TypeKind::String)),
        syn::Lit::CStr(_) => Some(TypeDescriptor::new("&CStr", TypeKind::String)),
        _ => None,
    }
}

fn int_type(suffix: &str) -> TypeDescriptor {
    match suffix {
        "" => TypeDescriptor::untyped_int(),
        "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
        | "u128" | "usize" => TypeDescriptor::new(suffix, TypeKind::Integer),
        // `1f32` lexes as an integer literal with a float suffix
        "f32" | "f64" => TypeDescriptor::new(suffix, TypeKind::Float),
        other => TypeDescriptor::new(other, TypeKind::Other),
    }
}

/// Side table of types keyed by the start position of an expression.
///
/// Entries win over the wrapped fallback lookup, if any.
pub struct TypeTable<'a> {
    entries: HashMap<Position, Option<TypeDescriptor>>,
    fallback: Option<Box<dyn TypeLookup + 'a>>,
}

impl<'a> TypeTable<'a> {
    /// Create an empty table with no fallback.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            fallback: None,
        }
    }

    /// Create an empty table layered over another lookup.
    pub fn over(fallback: impl TypeLookup + 'a) -> Self {
        Self {
            entries: HashMap::new(),
            fallback: Some(Box::new(fallback)),
        }
    }

    /// Record the type of the expression starting at `position`.
    pub fn insert(&mut self, position: Position, ty: TypeDescriptor) {
        self.entries.insert(position, Some(ty));
    }

    /// Record that the expression starting at `position` has no known type.
    pub fn mark_unknown(&mut self, position: Position) {
        self.entries.insert(position, None);
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TypeTable<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeLookup for TypeTable<'_> {
    fn lookup(&self, expr: &syn::Expr) -> Option<TypeDescriptor> {
        match self.entries.get(&Position::of(expr.span())) {
            Some(entry) => entry.clone(),
            None => self.fallback.as_ref().and_then(|f| f.lookup(expr)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr(src: &str) -> syn::Expr {
        syn::parse_str(src).expect("parse failed")
    }

    #[test]
    fn test_untyped_integer() {
        let ty = LiteralTypes.lookup(&expr("42")).unwrap();
        assert_eq!(ty, TypeDescriptor::untyped_int());
        assert!(ty.is_integer());
    }

    #[test]
    fn test_integer_suffixes() {
        for src in ["1i8", "1i32", "1u64", "1usize", "0xffu8", "1_000i128"] {
            let ty = LiteralTypes.lookup(&expr(src)).unwrap();
            assert!(ty.is_integer(), "{} should be an integer", src);
        }
        assert_eq!(LiteralTypes.lookup(&expr("7u16")).unwrap().name, "u16");
    }

    #[test]
    fn test_float_forms() {
        assert_eq!(
            LiteralTypes.lookup(&expr("1.0")).unwrap(),
            TypeDescriptor::untyped_float()
        );
        assert_eq!(LiteralTypes.lookup(&expr("1.5f32")).unwrap().kind, TypeKind::Float);
        assert_eq!(LiteralTypes.lookup(&expr("1f64")).unwrap().kind, TypeKind::Float);
    }

    #[test]
    fn test_byte_is_integer_char_is_not() {
        assert!(LiteralTypes.lookup(&expr("b'a'")).unwrap().is_integer());
        assert_eq!(LiteralTypes.lookup(&expr("'a'")).unwrap().kind, TypeKind::Char);
    }

    #[test]
    fn test_other_literals() {
        assert_eq!(LiteralTypes.lookup(&expr("\"a\"")).unwrap().kind, TypeKind::String);
        assert_eq!(LiteralTypes.lookup(&expr("b\"ab\"")).unwrap().kind, TypeKind::String);
        assert_eq!(LiteralTypes.lookup(&expr("true")).unwrap().kind, TypeKind::Bool);
    }

    #[test]
    fn test_non_literal_is_unknown() {
        assert!(LiteralTypes.lookup(&expr("x")).is_none());
        assert!(LiteralTypes.lookup(&expr("f(1)")).is_none());
        assert!(LiteralTypes.lookup(&expr("-1")).is_none());
    }

    #[test]
    fn test_table_without_fallback() {
        let e = expr("x");
        let mut table = TypeTable::new();
        assert!(table.lookup(&e).is_none());
        table.insert(Position::of(e.span()), TypeDescriptor::new("i32", TypeKind::Integer));
        assert_eq!(table.lookup(&e).unwrap().name, "i32");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_table_overrides_fallback() {
        let e = expr("3");
        let mut table = TypeTable::over(LiteralTypes);
        assert!(table.lookup(&e).unwrap().is_integer());

        table.mark_unknown(Position::of(e.span()));
        assert!(table.lookup(&e).is_none());

        table.insert(Position::of(e.span()), TypeDescriptor::untyped_float());
        assert_eq!(table.lookup(&e).unwrap().kind, TypeKind::Float);
    }
}
