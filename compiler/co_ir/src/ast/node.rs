use super::data::{
    AliasType, ArrayType, Assign, BasicType, BinOp, CUnit, Call, CommentData, Field, Fun,
    FunType, Ident, If, Index, Macro, NamedArg, NamedType, RefType, Selector, Slice,
    StructType, TupleType, UnaryOp, Var,
};
use super::{NodeData, NodeFlags, NodeId, NodeKind, NodeList};
use crate::{Pos, PosSpan, Sym};

/// An AST node: a common head followed by the kind-specific payload.
///
/// The kind is not stored separately; it is derived from [`Node::data`],
/// so a node can never disagree with its payload.
#[derive(Clone, Debug)]
pub struct Node {
    pub pos: Pos,
    /// [`Pos::NONE`] means "only use `pos`".
    pub endpos: Pos,
    /// Value type of expressions and fields. `None` if unknown.
    pub ty: Option<NodeId>,
    pub flags: NodeFlags,
    pub data: NodeData,
}

macro_rules! accessors {
    ($($as:ident, $as_mut:ident => $variant:ident($t:ty);)*) => {
        $(
            #[inline]
            pub fn $as(&self) -> Option<&$t> {
                match &self.data {
                    NodeData::$variant(v) => Some(v),
                    _ => None,
                }
            }

            #[inline]
            pub fn $as_mut(&mut self) -> Option<&mut $t> {
                match &mut self.data {
                    NodeData::$variant(v) => Some(v),
                    _ => None,
                }
            }
        )*
    };
}

impl Node {
    /// A zero-initialized node of `kind`.
    pub fn new(kind: NodeKind) -> Node {
        Node::with_data(NodeData::zeroed(kind))
    }

    pub fn with_data(data: NodeData) -> Node {
        Node {
            pos: Pos::NONE,
            endpos: Pos::NONE,
            ty: None,
            flags: NodeFlags::empty(),
            data,
        }
    }

    #[must_use]
    pub fn at(mut self, pos: Pos) -> Node {
        self.pos = pos;
        self
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    #[inline]
    pub fn is_type(&self) -> bool {
        self.kind().is_type()
    }

    #[inline]
    pub fn is_expr(&self) -> bool {
        self.kind().is_expr()
    }

    pub fn span(&self) -> PosSpan {
        PosSpan::new(self.pos, self.endpos)
    }

    /// Cached type id, for type nodes that have one.
    #[inline]
    pub fn tid(&self) -> Option<&Sym> {
        self.data.tid()
    }

    /// Elements of Tuple, Array and Block nodes.
    pub fn as_list(&self) -> Option<&NodeList> {
        match &self.data {
            NodeData::Tuple(l) | NodeData::Array(l) | NodeData::Block(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut NodeList> {
        match &mut self.data {
            NodeData::Tuple(l) | NodeData::Array(l) | NodeData::Block(l) => Some(l),
            _ => None,
        }
    }

    /// Pkg and File payload.
    pub fn as_cunit(&self) -> Option<&CUnit> {
        match &self.data {
            NodeData::Pkg(c) | NodeData::File(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_cunit_mut(&mut self) -> Option<&mut CUnit> {
        match &mut self.data {
            NodeData::Pkg(c) | NodeData::File(c) => Some(c),
            _ => None,
        }
    }

    /// PrefixOp and PostfixOp payload.
    pub fn as_unary_op(&self) -> Option<&UnaryOp> {
        match &self.data {
            NodeData::PrefixOp(u) | NodeData::PostfixOp(u) => Some(u),
            _ => None,
        }
    }

    pub fn as_int_lit(&self) -> Option<u64> {
        match self.data {
            NodeData::IntLit(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_float_lit(&self) -> Option<f64> {
        match self.data {
            NodeData::FloatLit(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool_lit(&self) -> Option<bool> {
        match self.data {
            NodeData::BoolLit(v) => Some(v),
            _ => None,
        }
    }

    accessors! {
        as_field, as_field_mut => Field(Field);
        as_comment, as_comment_mut => Comment(CommentData);
        as_id, as_id_mut => Id(Ident);
        as_binop, as_binop_mut => BinOp(BinOp);
        as_assign, as_assign_mut => Assign(Assign);
        as_fun, as_fun_mut => Fun(Fun);
        as_macro, as_macro_mut => Macro(Macro);
        as_call, as_call_mut => Call(Call);
        as_var, as_var_mut => Var(Var);
        as_named_arg, as_named_arg_mut => NamedArg(NamedArg);
        as_selector, as_selector_mut => Selector(Selector);
        as_index, as_index_mut => Index(Index);
        as_slice, as_slice_mut => Slice(Slice);
        as_if, as_if_mut => If(If);
        as_named_type, as_named_type_mut => NamedType(NamedType);
        as_alias_type, as_alias_type_mut => AliasType(AliasType);
        as_ref_type, as_ref_type_mut => RefType(RefType);
        as_basic_type, as_basic_type_mut => BasicType(BasicType);
        as_array_type, as_array_type_mut => ArrayType(ArrayType);
        as_tuple_type, as_tuple_type_mut => TupleType(TupleType);
        as_struct_type, as_struct_type_mut => StructType(StructType);
        as_fun_type, as_fun_type_mut => FunType(FunType);
    }
}
