//! The universe: everything a Co program can name without declaring it.
//!
//! Built once per process and shared by every [`crate::BuildContext`]
//! through `Arc`. Each build's symbol pool chains to the universe pool,
//! and each build's node arena starts with copies of the universe nodes,
//! so the fixed ids below are valid in every build.
//!
//! ```text
//!   NodeId(0)  ..= NodeId(17)   BasicType, one per basic TypeCode
//!   NodeId(18)                  TypeType
//!   NodeId(19) ..= NodeId(21)   nil, true, false
//! ```

use std::sync::Arc;

use tracing::debug;

use co_ir::ast::data::{BasicType, TypeType};
use co_ir::{
    Node, NodeData, NodeFlags, NodeId, Scope, Sym, SymError, SymPool, TypeCode, KEYWORDS,
};

/// Predeclared symbols, nodes and bindings.
pub struct Universe {
    syms: Arc<SymPool>,
    nodes: Vec<Node>,
    scope: Arc<Scope>,
    underscore: Sym,
}

impl Universe {
    pub const TYPE_TYPE: NodeId = NodeId::new(TypeCode::BASIC_END as u32);
    pub const NIL: NodeId = NodeId::new(TypeCode::BASIC_END as u32 + 1);
    pub const TRUE: NodeId = NodeId::new(TypeCode::BASIC_END as u32 + 2);
    pub const FALSE: NodeId = NodeId::new(TypeCode::BASIC_END as u32 + 3);

    pub fn new() -> Result<Universe, SymError> {
        let pool = SymPool::new();
        for (i, &(text, tok)) in KEYWORDS.iter().enumerate() {
            debug_assert_eq!(usize::from(tok.keyword_index()), i + 1);
            pool.add_flagged(text, tok.keyword_index())?;
        }

        let mut nodes = Vec::with_capacity(TypeCode::BASIC.len() + 4);
        let mut names = Vec::with_capacity(TypeCode::BASIC.len());
        for code in TypeCode::BASIC {
            let mut buf = [0; 4];
            let tid = pool.get(code.encoding().encode_utf8(&mut buf))?;
            let name = pool.get(code.name())?;
            names.push((code, name.clone()));
            nodes.push(Node::with_data(NodeData::BasicType(BasicType {
                tid: Some(tid),
                code,
                name: Some(name),
            })));
        }

        nodes.push(Node::with_data(NodeData::TypeType(TypeType {
            tid: Some(pool.get("type")?),
        })));
        nodes.push(constant(NodeData::Nil, TypeCode::Nil));
        nodes.push(constant(NodeData::BoolLit(true), TypeCode::Bool));
        nodes.push(constant(NodeData::BoolLit(false), TypeCode::Bool));
        debug_assert_eq!(nodes.len(), Universe::FALSE.index() + 1);

        let nil = pool.get("nil")?;
        let true_ = pool.get("true")?;
        let false_ = pool.get("false")?;
        let underscore = pool.get("_")?;
        pool.get("to_rawptr")?;

        let mut scope = Scope::new();
        for (code, name) in names {
            if let Some(id) = basic_id(code).filter(|_| code.is_public()) {
                scope.assign(name, id)?;
            }
        }
        scope.assign(nil, Universe::NIL)?;
        scope.assign(true_, Universe::TRUE)?;
        scope.assign(false_, Universe::FALSE)?;

        debug!(
            syms = pool.len(),
            nodes = nodes.len(),
            bindings = scope.len(),
            "universe ready"
        );

        Ok(Universe {
            syms: Arc::new(pool),
            nodes,
            scope: Arc::new(scope),
            underscore,
        })
    }

    /// Pool holding keywords and predeclared names.
    pub fn syms(&self) -> &Arc<SymPool> {
        &self.syms
    }

    /// Nodes every build arena starts with.
    pub fn prototypes(&self) -> &[Node] {
        &self.nodes
    }

    /// Root scope of every package.
    pub fn scope(&self) -> &Arc<Scope> {
        &self.scope
    }

    /// `_`, the placeholder name.
    pub fn underscore(&self) -> &Sym {
        &self.underscore
    }

    /// Id of the BasicType node for `code`.
    pub fn basic_type(code: TypeCode) -> Option<NodeId> {
        basic_id(code)
    }

    /// Node bound to `name` in the root scope.
    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.syms.find(name).and_then(|sym| self.scope.lookup(&sym))
    }
}

fn basic_id(code: TypeCode) -> Option<NodeId> {
    code.is_basic().then(|| NodeId::new(u32::from(code.code())))
}

fn constant(data: NodeData, code: TypeCode) -> Node {
    let mut node = Node::with_data(data);
    node.ty = basic_id(code);
    node.flags = NodeFlags::CONST;
    node
}
