//! Structural type identity.
//!
//! [`encode`] turns a type into a canonical string; interned, that string
//! is the type's id, and two types are identical iff their ids are the
//! same [`crate::Sym`].
//!
//! ```text
//! int                     i
//! &int / mut&int          &i / Mi
//! [4]u8                   [4]B
//! (int, bool)             (ib)
//! struct{a int; b bool}   {ib}
//! fun(int) bool           ^(i)b
//! fun()                   ^()0
//! ```
//!
//! Field names are not part of a struct's id: identity is structural.
//!
//! The encoder keeps its own work stack instead of recursing, so
//! arbitrarily deep types (a function returning a function returning ...)
//! are encoded in constant call-stack space.

use std::fmt;
use std::fmt::Write as _;

use tracing::trace;

use crate::ast::NodeData;
use crate::{NodeArena, NodeId, NodeKind, Sym, TypeCode};

/// Error encoding a type id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeIdError {
    /// The node is not a type.
    NotAType { kind: NodeKind },
    /// A named type that was never resolved.
    Unresolved { name: String },
    /// A struct field without a type.
    MissingFieldType { field: String },
    /// A link to a node that does not exist.
    Dangling { id: NodeId },
}

impl fmt::Display for TypeIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeIdError::NotAType { kind } => write!(f, "{kind} is not a type"),
            TypeIdError::Unresolved { name } => write!(f, "unresolved type {name}"),
            TypeIdError::MissingFieldType { field } => {
                write!(f, "field {field} has no type")
            }
            TypeIdError::Dangling { id } => write!(f, "dangling type link {id:?}"),
        }
    }
}

impl std::error::Error for TypeIdError {}

enum Work {
    Type(NodeId),
    Mark(char),
}

/// Canonical type-id string of `ty`.
///
/// Types that already carry a cached id emit it verbatim.
pub fn encode(arena: &NodeArena, ty: NodeId) -> Result<String, TypeIdError> {
    let mut out = String::new();
    let mut work = vec![Work::Type(ty)];

    while let Some(item) = work.pop() {
        let id = match item {
            Work::Mark(c) => {
                out.push(c);
                continue;
            }
            Work::Type(id) => id,
        };
        let node = arena.get(id).ok_or(TypeIdError::Dangling { id })?;

        if let NodeData::BasicType(t) = &node.data {
            out.push(t.code.encoding());
            continue;
        }
        if let Some(tid) = node.tid() {
            out.push_str(&tid.as_str());
            continue;
        }

        match &node.data {
            NodeData::AliasType(t) => work.push(Work::Type(t.elem)),
            NodeData::RefType(t) => {
                let marker = if t.is_mut {
                    TypeCode::MutRef
                } else {
                    TypeCode::Ref
                };
                out.push(marker.encoding());
                work.push(Work::Type(t.elem));
            }
            NodeData::ArrayType(t) => {
                out.push(TypeCode::Array.encoding());
                let _ = write!(out, "{}", t.size);
                out.push(TypeCode::ArrayEnd.encoding());
                work.push(Work::Type(t.elem));
            }
            NodeData::TupleType(t) => {
                out.push(TypeCode::Tuple.encoding());
                work.push(Work::Mark(TypeCode::TupleEnd.encoding()));
                work.extend(t.elems.iter().rev().map(|&e| Work::Type(e)));
            }
            NodeData::StructType(t) => {
                out.push(TypeCode::Struct.encoding());
                work.push(Work::Mark(TypeCode::StructEnd.encoding()));
                for &f in t.fields.iter().rev() {
                    let field = arena.get(f).ok_or(TypeIdError::Dangling { id: f })?;
                    let fty = field.ty.ok_or_else(|| TypeIdError::MissingFieldType {
                        field: field_name(field.as_field().and_then(|fd| fd.name.as_ref())),
                    })?;
                    work.push(Work::Type(fty));
                }
            }
            NodeData::FunType(t) => {
                out.push(TypeCode::Fun.encoding());
                out.push(TypeCode::Tuple.encoding());
                match t.result {
                    Some(r) => work.push(Work::Type(r)),
                    None => work.push(Work::Mark(TypeCode::Nil.encoding())),
                }
                work.push(Work::Mark(TypeCode::TupleEnd.encoding()));
                work.extend(t.params.iter().rev().map(|&p| Work::Type(p)));
            }
            NodeData::NamedType(t) => {
                return Err(TypeIdError::Unresolved {
                    name: field_name(t.name.as_ref()),
                });
            }
            NodeData::TypeType(_) => {
                // the type of types has a fixed identity
                out.push_str("type");
            }
            other => return Err(TypeIdError::NotAType { kind: other.kind() }),
        }
    }

    trace!(?ty, tid = %out, "encoded type id");
    Ok(out)
}

fn field_name(name: Option<&Sym>) -> String {
    name.map_or_else(|| "_".to_owned(), |s| s.as_str().into_owned())
}
