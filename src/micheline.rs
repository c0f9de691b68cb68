//! Schemas from Micheline type expressions
//!
//! Contract storage and parameter types are published as Micheline
//! expressions, e.g.
//!
//! ```text
//! pair (nat %counter) (list %entries (pair address mutez string))
//! ```
//!
//! This module lowers such an expression ([`TypeExpr`]) into the
//! [`SchemaNode`] tree consumed by the builder, assigning every node its
//! absolute comb path on the way. Right-nested, un-annotated pairs are
//! flattened into a single record, so the `pair address mutez string`
//! above becomes a three-field record whose fields sit at `[0]`, `[1, 0]`
//! and `[1, 1]` relative to the list element (itself at `[1, 0]` within
//! the storage).
//!
//! Keywords that are not recognized are passed through as
//! [`Kind::Other`], and are rejected once the schema is built.

use crate::error::{Arity, ArityError, BuildResult};
use crate::path::{right_comb, Path, LEFT, RIGHT};
use crate::schema::{Kind, SchemaNode};

/// Placeholder name of an un-annotated record
pub const ANONYMOUS_PAIR: &str = "@pair";

/// Micheline type expression: a primitive applied to type arguments,
/// with optional annotations
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeExpr {
    pub prim: String,
    pub args: Vec<TypeExpr>,
    /// Raw annotations, including their sigil (`%field`, `:type`, `@var`)
    pub annots: Vec<String>,
}

impl TypeExpr {
    /// Constructs a bare primitive with no arguments
    #[must_use]
    pub fn prim(prim: impl Into<String>) -> Self {
        Self {
            prim: prim.into(),
            args: Vec::new(),
            annots: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_args(prim: impl Into<String>, args: Vec<TypeExpr>) -> Self {
        Self {
            args,
            ..Self::prim(prim)
        }
    }

    /// Adds a raw annotation, e.g. `"%owner"`
    #[must_use]
    pub fn annotated(mut self, annot: impl Into<String>) -> Self {
        self.annots.push(annot.into());
        self
    }

    /// Name given to this expression by its annotations, preferring field
    /// annotations (`%`) over type annotations (`:`).
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.annotation('%').or_else(|| self.annotation(':'))
    }

    fn annotation(&self, sigil: char) -> Option<&str> {
        self.annots
            .iter()
            .find_map(|a| a.strip_prefix(sigil))
            .filter(|a| !a.is_empty())
    }

    /// Lowers this expression into a schema rooted at the empty path
    pub fn to_schema(&self) -> BuildResult<SchemaNode> {
        let name = self.name().unwrap_or_default().to_owned();
        lower(self, Path::new(), name)
    }
}

/// Members of the comb rooted at `expr`, a `pair`, with every un-annotated
/// `pair` in last position spliced into its parent.
fn comb_members(expr: &TypeExpr) -> BuildResult<Vec<&TypeExpr>> {
    ArityError::check("pair", Arity::AtLeast(2), expr.args.len())?;
    let mut members: Vec<&TypeExpr> = expr.args.iter().collect();
    while let Some(last) = members.last().copied() {
        if last.prim != "pair" || !last.annots.is_empty() {
            break;
        }
        ArityError::check("pair", Arity::AtLeast(2), last.args.len())?;
        members.pop();
        members.extend(last.args.iter());
    }
    Ok(members)
}

fn lower(expr: &TypeExpr, path: Path, name: String) -> BuildResult<SchemaNode> {
    let kind = match expr.prim.as_str() {
        "pair" => {
            let members = comb_members(expr)?;
            let arity = members.len();
            let children = members
                .into_iter()
                .enumerate()
                .map(|(i, m)| {
                    let field = m.name().map_or_else(|| i.to_string(), str::to_owned);
                    lower(m, right_comb(&path, i, arity), field)
                })
                .collect::<BuildResult<Vec<_>>>()?;
            let name = if name.is_empty() {
                ANONYMOUS_PAIR.to_owned()
            } else {
                name
            };
            return Ok(SchemaNode {
                children,
                ..SchemaNode::new(Kind::Struct).named(name).at(path)
            });
        }
        "option" => {
            ArityError::check("option", Arity::Exactly(1), expr.args.len())?;
            let inner = &expr.args[0];
            let name = if name.is_empty() {
                inner.name().unwrap_or_default().to_owned()
            } else {
                name
            };
            let node = lower(inner, path.clone(), String::new())?;
            let node = if node.optional {
                SchemaNode::with_children(Kind::Option, vec![node])
            } else {
                SchemaNode {
                    optional: true,
                    ..node
                }
            };
            return Ok(node.named(name).at(path));
        }
        "or" => Kind::Union,
        other => Kind::from_keyword(other),
    };

    let children = match kind {
        Kind::Union | Kind::Map | Kind::BigMap | Kind::Lambda => {
            ArityError::check(&expr.prim, Arity::Exactly(2), expr.args.len())?;
            vec![
                lower_child(&expr.args[0], path.child(LEFT))?,
                lower_child(&expr.args[1], path.child(RIGHT))?,
            ]
        }
        Kind::List | Kind::Set => {
            ArityError::check(&expr.prim, Arity::Exactly(1), expr.args.len())?;
            vec![lower_child(&expr.args[0], path.child(LEFT))?]
        }
        _ => Vec::new(),
    };
    Ok(SchemaNode {
        children,
        ..SchemaNode::new(kind).named(name).at(path)
    })
}

fn lower_child(expr: &TypeExpr, path: Path) -> BuildResult<SchemaNode> {
    let name = expr.name().unwrap_or_default().to_owned();
    lower(expr, path, name)
}
