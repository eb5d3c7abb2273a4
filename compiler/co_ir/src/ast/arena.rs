use std::fmt::Write as _;
use std::ops::{Index, IndexMut};

use co_stack::ensure_sufficient_stack;

use super::{Node, NodeData, NodeId, NodeKind};
use crate::{AllocError, Sym};

/// Owns every node of a build.
///
/// Nodes are addressed by [`NodeId`] and never freed individually; the
/// whole arena is dropped at once.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        NodeArena { nodes: Vec::new() }
    }

    /// Arena whose first ids hold copies of `prototypes`.
    pub fn from_prototypes(prototypes: &[Node]) -> Self {
        NodeArena {
            nodes: prototypes.to_vec(),
        }
    }

    /// Append `node` and return its id.
    pub fn alloc(&mut self, node: Node) -> Result<NodeId, AllocError> {
        self.nodes.try_reserve(1).map_err(AllocError::on("node"))?;
        let index = u32::try_from(self.nodes.len()).map_err(|_| AllocError::new("node id"))?;
        let id = NodeId::new(index);
        self.nodes.push(node);
        Ok(id)
    }

    /// Append a zero-initialized node of `kind`.
    pub fn alloc_kind(&mut self, kind: NodeKind) -> Result<NodeId, AllocError> {
        self.alloc(Node::new(kind))
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.get(id).map(Node::kind)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Cache a type id on a type node. Returns false if `id` is not a type.
    pub fn set_tid(&mut self, id: NodeId, tid: Sym) -> bool {
        self.get_mut(id).is_some_and(|n| n.data.set_tid(tid))
    }

    /// Short printable description of a node, for diagnostics.
    ///
    /// Types render as type syntax (`&int`, `[4]u8`, `(int, bool)`);
    /// expressions render as their value or kind plus operator.
    pub fn describe(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.describe_into(id, &mut out);
        out
    }

    fn describe_into(&self, id: NodeId, out: &mut String) {
        ensure_sufficient_stack(|| {
            let Some(node) = self.get(id) else {
                out.push_str("<invalid>");
                return;
            };
            match &node.data {
                NodeData::BasicType(t) => out.push_str(t.code.name()),
                NodeData::TypeType(_) => out.push_str("type"),
                NodeData::NamedType(t) => push_name(out, t.name.as_ref()),
                NodeData::AliasType(t) => push_name(out, t.name.as_ref()),
                NodeData::RefType(t) => {
                    out.push_str(if t.is_mut { "mut&" } else { "&" });
                    self.describe_into(t.elem, out);
                }
                NodeData::ArrayType(t) => {
                    if t.size > 0 {
                        let _ = write!(out, "[{}]", t.size);
                    } else {
                        out.push_str("[]");
                    }
                    self.describe_into(t.elem, out);
                }
                NodeData::TupleType(t) => {
                    out.push('(');
                    self.describe_list(&t.elems, ", ", out);
                    out.push(')');
                }
                NodeData::StructType(t) => {
                    if let Some(name) = &t.name {
                        out.push_str(&name.as_str());
                        return;
                    }
                    out.push_str("struct{");
                    for (i, &f) in t.fields.iter().enumerate() {
                        if i > 0 {
                            out.push_str("; ");
                        }
                        let field = self.get(f);
                        let name = field.and_then(Node::as_field).and_then(|f| f.name.as_ref());
                        push_name(out, name);
                        if let Some(ty) = field.and_then(|n| n.ty) {
                            out.push(' ');
                            self.describe_into(ty, out);
                        }
                    }
                    out.push('}');
                }
                NodeData::FunType(t) => {
                    out.push_str("fun(");
                    self.describe_list(&t.params, ", ", out);
                    out.push(')');
                    if let Some(result) = t.result {
                        out.push(' ');
                        self.describe_into(result, out);
                    }
                }
                NodeData::Nil => out.push_str("nil"),
                NodeData::BoolLit(v) => {
                    let _ = write!(out, "{v}");
                }
                NodeData::IntLit(v) => {
                    let _ = write!(out, "{v}");
                }
                NodeData::FloatLit(v) => {
                    let _ = write!(out, "{v}");
                }
                NodeData::StrLit(s) => {
                    let _ = write!(out, "{s:?}");
                }
                NodeData::Id(ident) => push_name(out, ident.name.as_ref()),
                NodeData::BinOp(op) => {
                    let _ = write!(out, "binop {}", op.op);
                }
                NodeData::PrefixOp(op) => {
                    let _ = write!(out, "prefixop {}", op.op);
                }
                NodeData::PostfixOp(op) => {
                    let _ = write!(out, "postfixop {}", op.op);
                }
                NodeData::Var(v) => {
                    out.push_str("var ");
                    push_name(out, v.name.as_ref());
                }
                NodeData::Field(f) => {
                    out.push_str("field ");
                    push_name(out, f.name.as_ref());
                }
                NodeData::Fun(f) => {
                    out.push_str("fun");
                    if let Some(name) = &f.name {
                        out.push(' ');
                        out.push_str(&name.as_str());
                    }
                }
                other => out.push_str(&other.kind().name().to_ascii_lowercase()),
            }
        });
    }

    fn describe_list(&self, ids: &[NodeId], sep: &str, out: &mut String) {
        for (i, &id) in ids.iter().enumerate() {
            if i > 0 {
                out.push_str(sep);
            }
            self.describe_into(id, out);
        }
    }
}

fn push_name(out: &mut String, name: Option<&Sym>) {
    match name {
        Some(name) => out.push_str(&name.as_str()),
        None => out.push('_'),
    }
}

/// Indexing shorthand for tests and tools working on known-good ids.
///
/// # Panics
///
/// Panics if `id` was not allocated by this arena. Compiler passes use
/// [`NodeArena::get`] instead.
impl Index<NodeId> for NodeArena {
    type Output = Node;

    #[inline]
    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

/// # Panics
///
/// Panics if `id` was not allocated by this arena. Compiler passes use
/// [`NodeArena::get_mut`] instead.
impl IndexMut<NodeId> for NodeArena {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }
}
