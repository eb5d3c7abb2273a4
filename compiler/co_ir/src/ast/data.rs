//! Per-kind node payloads.
//!
//! Each payload is a plain struct whose `Default` is the zeroed state a
//! freshly allocated node starts in. Child links that are always present
//! once parsed are `NodeId` (zeroed to [`NodeId::INVALID`]); optional ones
//! are `Option<NodeId>`.

use std::sync::Arc;

use smallvec::SmallVec;

use super::{NodeId, NodeKind, NodeList};
use crate::{Scope, Sym, Tok, TypeCode};

/// Pkg and File.
#[derive(Clone, Debug, Default)]
pub struct CUnit {
    pub name: Option<Sym>,
    pub scope: Option<Arc<Scope>>,
    pub decls: NodeList,
}

/// A source comment, kept when the parser runs with comments enabled.
///
/// The origin comes from the node's `pos`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CommentData {
    pub offset: u32,
    pub len: u32,
}

#[derive(Clone, Debug, Default)]
pub struct Field {
    pub name: Option<Sym>,
    pub init: Option<NodeId>,
    pub nrefs: u32,
    /// Argument index or struct index.
    pub index: u32,
}

#[derive(Clone, Debug, Default)]
pub struct Ident {
    pub name: Option<Sym>,
    pub target: Option<NodeId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BinOp {
    pub op: Tok,
    pub left: NodeId,
    pub right: NodeId,
}

impl Default for BinOp {
    fn default() -> Self {
        BinOp {
            op: Tok::None,
            left: NodeId::INVALID,
            right: NodeId::INVALID,
        }
    }
}

/// PrefixOp and PostfixOp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnaryOp {
    pub op: Tok,
    pub expr: NodeId,
}

impl Default for UnaryOp {
    fn default() -> Self {
        UnaryOp {
            op: Tok::None,
            expr: NodeId::INVALID,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Assign {
    /// Var, Tuple or Index.
    pub dst: NodeId,
    pub val: NodeId,
}

#[derive(Clone, Debug, Default)]
pub struct Fun {
    /// Tuple of Var nodes, `None` without params.
    pub params: Option<NodeId>,
    /// Result type; a TupleType for multiple results.
    pub result: Option<NodeId>,
    /// `None` for lambdas.
    pub name: Option<Sym>,
    /// `None` for declarations.
    pub body: Option<NodeId>,
}

#[derive(Clone, Debug, Default)]
pub struct Macro {
    pub name: Option<Sym>,
    pub params: Option<NodeId>,
    pub template: NodeId,
}

/// Call and TypeCast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Call {
    /// Type, Fun or Id.
    pub receiver: NodeId,
    /// Tuple of arguments.
    pub args: Option<NodeId>,
}

#[derive(Clone, Debug, Default)]
pub struct Var {
    pub name: Option<Sym>,
    pub init: Option<NodeId>,
    pub nrefs: u32,
    /// Parameter index.
    pub index: u32,
    pub is_const: bool,
}

#[derive(Clone, Debug, Default)]
pub struct NamedArg {
    pub name: Option<Sym>,
    pub value: NodeId,
}

/// `operand.member`, with the resolved GEP index path.
#[derive(Clone, Debug, Default)]
pub struct Selector {
    pub operand: NodeId,
    pub member: Option<Sym>,
    pub indices: SmallVec<[u32; 4]>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Index {
    pub operand: NodeId,
    pub indexexpr: NodeId,
    /// Constant index, or [`Index::NOT_CONST`].
    pub index: u32,
}

impl Index {
    pub const NOT_CONST: u32 = u32::MAX;
}

impl Default for Index {
    fn default() -> Self {
        Index {
            operand: NodeId::INVALID,
            indexexpr: NodeId::INVALID,
            index: Index::NOT_CONST,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Slice {
    pub operand: NodeId,
    pub start: Option<NodeId>,
    pub end: Option<NodeId>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct If {
    pub cond: NodeId,
    pub thenb: NodeId,
    pub elseb: Option<NodeId>,
}

// === Types ===
//
// Every type payload carries `tid`: its interned type id, computed lazily
// (basic types have theirs set by the universe).

#[derive(Clone, Debug, Default)]
pub struct TypeType {
    pub tid: Option<Sym>,
}

/// A type name not yet resolved.
#[derive(Clone, Debug, Default)]
pub struct NamedType {
    pub tid: Option<Sym>,
    pub name: Option<Sym>,
}

/// `type foo int`
#[derive(Clone, Debug, Default)]
pub struct AliasType {
    pub tid: Option<Sym>,
    pub name: Option<Sym>,
    pub elem: NodeId,
}

#[derive(Clone, Debug, Default)]
pub struct RefType {
    pub tid: Option<Sym>,
    pub elem: NodeId,
    pub is_mut: bool,
}

#[derive(Clone, Debug)]
pub struct BasicType {
    pub tid: Option<Sym>,
    pub code: TypeCode,
    pub name: Option<Sym>,
}

impl Default for BasicType {
    fn default() -> Self {
        BasicType {
            tid: None,
            code: TypeCode::Nil,
            name: None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ArrayType {
    pub tid: Option<Sym>,
    /// 0 until `sizeexpr` is resolved.
    pub size: u32,
    /// `None` for inferred sizes.
    pub sizeexpr: Option<NodeId>,
    pub elem: NodeId,
}

#[derive(Clone, Debug, Default)]
pub struct TupleType {
    pub tid: Option<Sym>,
    pub elems: NodeList,
}

#[derive(Clone, Debug, Default)]
pub struct StructType {
    pub tid: Option<Sym>,
    /// `None` for anonymous structs.
    pub name: Option<Sym>,
    /// Field nodes.
    pub fields: NodeList,
}

#[derive(Clone, Debug, Default)]
pub struct FunType {
    pub tid: Option<Sym>,
    /// Parameter types in order.
    pub params: NodeList,
    pub result: Option<NodeId>,
}

/// Node payload, one variant per [`NodeKind`].
#[derive(Clone, Debug)]
pub enum NodeData {
    Bad,
    Field(Field),

    Pkg(CUnit),
    File(CUnit),
    Comment(CommentData),

    Nil,
    BoolLit(bool),
    IntLit(u64),
    FloatLit(f64),
    StrLit(Box<str>),

    Id(Ident),
    BinOp(BinOp),
    PrefixOp(UnaryOp),
    PostfixOp(UnaryOp),
    Return(Option<NodeId>),
    Assign(Assign),
    Tuple(NodeList),
    Array(NodeList),
    Block(NodeList),
    Fun(Fun),
    Macro(Macro),
    Call(Call),
    /// Destination type is the node's `ty`.
    TypeCast(NodeId),
    Var(Var),
    Ref(NodeId),
    NamedArg(NamedArg),
    Selector(Selector),
    Index(Index),
    Slice(Slice),
    If(If),

    TypeType(TypeType),
    NamedType(NamedType),
    AliasType(AliasType),
    RefType(RefType),
    BasicType(BasicType),
    ArrayType(ArrayType),
    TupleType(TupleType),
    StructType(StructType),
    FunType(FunType),
}

impl NodeData {
    /// The zero-initialized payload for `kind`.
    pub fn zeroed(kind: NodeKind) -> NodeData {
        match kind {
            NodeKind::Bad => NodeData::Bad,
            NodeKind::Field => NodeData::Field(Field::default()),
            NodeKind::Pkg => NodeData::Pkg(CUnit::default()),
            NodeKind::File => NodeData::File(CUnit::default()),
            NodeKind::Comment => NodeData::Comment(CommentData::default()),
            NodeKind::Nil => NodeData::Nil,
            NodeKind::BoolLit => NodeData::BoolLit(false),
            NodeKind::IntLit => NodeData::IntLit(0),
            NodeKind::FloatLit => NodeData::FloatLit(0.0),
            NodeKind::StrLit => NodeData::StrLit(Box::default()),
            NodeKind::Id => NodeData::Id(Ident::default()),
            NodeKind::BinOp => NodeData::BinOp(BinOp::default()),
            NodeKind::PrefixOp => NodeData::PrefixOp(UnaryOp::default()),
            NodeKind::PostfixOp => NodeData::PostfixOp(UnaryOp::default()),
            NodeKind::Return => NodeData::Return(None),
            NodeKind::Assign => NodeData::Assign(Assign::default()),
            NodeKind::Tuple => NodeData::Tuple(NodeList::new()),
            NodeKind::Array => NodeData::Array(NodeList::new()),
            NodeKind::Block => NodeData::Block(NodeList::new()),
            NodeKind::Fun => NodeData::Fun(Fun::default()),
            NodeKind::Macro => NodeData::Macro(Macro::default()),
            NodeKind::Call => NodeData::Call(Call::default()),
            NodeKind::TypeCast => NodeData::TypeCast(NodeId::INVALID),
            NodeKind::Var => NodeData::Var(Var::default()),
            NodeKind::Ref => NodeData::Ref(NodeId::INVALID),
            NodeKind::NamedArg => NodeData::NamedArg(NamedArg::default()),
            NodeKind::Selector => NodeData::Selector(Selector::default()),
            NodeKind::Index => NodeData::Index(Index::default()),
            NodeKind::Slice => NodeData::Slice(Slice::default()),
            NodeKind::If => NodeData::If(If::default()),
            NodeKind::TypeType => NodeData::TypeType(TypeType::default()),
            NodeKind::NamedType => NodeData::NamedType(NamedType::default()),
            NodeKind::AliasType => NodeData::AliasType(AliasType::default()),
            NodeKind::RefType => NodeData::RefType(RefType::default()),
            NodeKind::BasicType => NodeData::BasicType(BasicType::default()),
            NodeKind::ArrayType => NodeData::ArrayType(ArrayType::default()),
            NodeKind::TupleType => NodeData::TupleType(TupleType::default()),
            NodeKind::StructType => NodeData::StructType(StructType::default()),
            NodeKind::FunType => NodeData::FunType(FunType::default()),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Bad => NodeKind::Bad,
            NodeData::Field(_) => NodeKind::Field,
            NodeData::Pkg(_) => NodeKind::Pkg,
            NodeData::File(_) => NodeKind::File,
            NodeData::Comment(_) => NodeKind::Comment,
            NodeData::Nil => NodeKind::Nil,
            NodeData::BoolLit(_) => NodeKind::BoolLit,
            NodeData::IntLit(_) => NodeKind::IntLit,
            NodeData::FloatLit(_) => NodeKind::FloatLit,
            NodeData::StrLit(_) => NodeKind::StrLit,
            NodeData::Id(_) => NodeKind::Id,
            NodeData::BinOp(_) => NodeKind::BinOp,
            NodeData::PrefixOp(_) => NodeKind::PrefixOp,
            NodeData::PostfixOp(_) => NodeKind::PostfixOp,
            NodeData::Return(_) => NodeKind::Return,
            NodeData::Assign(_) => NodeKind::Assign,
            NodeData::Tuple(_) => NodeKind::Tuple,
            NodeData::Array(_) => NodeKind::Array,
            NodeData::Block(_) => NodeKind::Block,
            NodeData::Fun(_) => NodeKind::Fun,
            NodeData::Macro(_) => NodeKind::Macro,
            NodeData::Call(_) => NodeKind::Call,
            NodeData::TypeCast(_) => NodeKind::TypeCast,
            NodeData::Var(_) => NodeKind::Var,
            NodeData::Ref(_) => NodeKind::Ref,
            NodeData::NamedArg(_) => NodeKind::NamedArg,
            NodeData::Selector(_) => NodeKind::Selector,
            NodeData::Index(_) => NodeKind::Index,
            NodeData::Slice(_) => NodeKind::Slice,
            NodeData::If(_) => NodeKind::If,
            NodeData::TypeType(_) => NodeKind::TypeType,
            NodeData::NamedType(_) => NodeKind::NamedType,
            NodeData::AliasType(_) => NodeKind::AliasType,
            NodeData::RefType(_) => NodeKind::RefType,
            NodeData::BasicType(_) => NodeKind::BasicType,
            NodeData::ArrayType(_) => NodeKind::ArrayType,
            NodeData::TupleType(_) => NodeKind::TupleType,
            NodeData::StructType(_) => NodeKind::StructType,
            NodeData::FunType(_) => NodeKind::FunType,
        }
    }

    /// Cached type id of a type payload.
    pub fn tid(&self) -> Option<&Sym> {
        match self {
            NodeData::TypeType(t) => t.tid.as_ref(),
            NodeData::NamedType(t) => t.tid.as_ref(),
            NodeData::AliasType(t) => t.tid.as_ref(),
            NodeData::RefType(t) => t.tid.as_ref(),
            NodeData::BasicType(t) => t.tid.as_ref(),
            NodeData::ArrayType(t) => t.tid.as_ref(),
            NodeData::TupleType(t) => t.tid.as_ref(),
            NodeData::StructType(t) => t.tid.as_ref(),
            NodeData::FunType(t) => t.tid.as_ref(),
            _ => None,
        }
    }

    fn tid_slot(&mut self) -> Option<&mut Option<Sym>> {
        match self {
            NodeData::TypeType(t) => Some(&mut t.tid),
            NodeData::NamedType(t) => Some(&mut t.tid),
            NodeData::AliasType(t) => Some(&mut t.tid),
            NodeData::RefType(t) => Some(&mut t.tid),
            NodeData::BasicType(t) => Some(&mut t.tid),
            NodeData::ArrayType(t) => Some(&mut t.tid),
            NodeData::TupleType(t) => Some(&mut t.tid),
            NodeData::StructType(t) => Some(&mut t.tid),
            NodeData::FunType(t) => Some(&mut t.tid),
            _ => None,
        }
    }

    /// Store the type id. Returns false for non-type payloads.
    pub fn set_tid(&mut self, tid: Sym) -> bool {
        match self.tid_slot() {
            Some(slot) => {
                *slot = Some(tid);
                true
            }
            None => false,
        }
    }
}
