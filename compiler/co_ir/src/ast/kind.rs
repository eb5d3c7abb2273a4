//! Node kinds, grouped into bands.
//!
//! Kinds of one category are numbered contiguously so that band membership
//! is a single range check. Band bounds are half-open: `BEG <= k < END`.
//!
//! | Range | Band                                  |
//! |-------|---------------------------------------|
//! | 0-1   | Bad, Field                            |
//! | 2-4   | Statements (compilation units: 2-3)   |
//! | 5-29  | Expressions (literals: 5-9)           |
//! | 30-38 | Types                                 |

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum NodeKind {
    /// Filler for invalid syntax.
    Bad = 0,
    Field = 1,

    // === Statements ===
    Pkg = 2,
    File = 3,
    Comment = 4,

    // === Expressions: literals ===
    Nil = 5,
    BoolLit = 6,
    IntLit = 7,
    FloatLit = 8,
    StrLit = 9,

    // === Expressions ===
    Id = 10,
    BinOp = 11,
    PrefixOp = 12,
    PostfixOp = 13,
    Return = 14,
    Assign = 15,
    Tuple = 16,
    Array = 17,
    Block = 18,
    Fun = 19,
    Macro = 20,
    Call = 21,
    TypeCast = 22,
    Var = 23,
    Ref = 24,
    NamedArg = 25,
    Selector = 26,
    Index = 27,
    Slice = 28,
    If = 29,

    // === Types ===
    TypeType = 30,
    NamedType = 31,
    AliasType = 32,
    RefType = 33,
    BasicType = 34,
    ArrayType = 35,
    TupleType = 36,
    StructType = 37,
    FunType = 38,
}

impl NodeKind {
    pub const STMT_BEG: u8 = NodeKind::Pkg as u8;
    pub const STMT_END: u8 = NodeKind::Comment as u8 + 1;
    pub const CUNIT_BEG: u8 = NodeKind::Pkg as u8;
    pub const CUNIT_END: u8 = NodeKind::File as u8 + 1;
    pub const EXPR_BEG: u8 = NodeKind::Nil as u8;
    pub const EXPR_END: u8 = NodeKind::If as u8 + 1;
    pub const LIT_BEG: u8 = NodeKind::Nil as u8;
    pub const LIT_END: u8 = NodeKind::StrLit as u8 + 1;
    pub const UNARY_BEG: u8 = NodeKind::PrefixOp as u8;
    pub const UNARY_END: u8 = NodeKind::PostfixOp as u8 + 1;
    pub const LIST_BEG: u8 = NodeKind::Tuple as u8;
    pub const LIST_END: u8 = NodeKind::Array as u8 + 1;
    pub const TYPE_BEG: u8 = NodeKind::TypeType as u8;
    pub const TYPE_END: u8 = NodeKind::FunType as u8 + 1;

    /// Every kind, indexed by its numeric value.
    pub const ALL: [NodeKind; 39] = [
        NodeKind::Bad,
        NodeKind::Field,
        NodeKind::Pkg,
        NodeKind::File,
        NodeKind::Comment,
        NodeKind::Nil,
        NodeKind::BoolLit,
        NodeKind::IntLit,
        NodeKind::FloatLit,
        NodeKind::StrLit,
        NodeKind::Id,
        NodeKind::BinOp,
        NodeKind::PrefixOp,
        NodeKind::PostfixOp,
        NodeKind::Return,
        NodeKind::Assign,
        NodeKind::Tuple,
        NodeKind::Array,
        NodeKind::Block,
        NodeKind::Fun,
        NodeKind::Macro,
        NodeKind::Call,
        NodeKind::TypeCast,
        NodeKind::Var,
        NodeKind::Ref,
        NodeKind::NamedArg,
        NodeKind::Selector,
        NodeKind::Index,
        NodeKind::Slice,
        NodeKind::If,
        NodeKind::TypeType,
        NodeKind::NamedType,
        NodeKind::AliasType,
        NodeKind::RefType,
        NodeKind::BasicType,
        NodeKind::ArrayType,
        NodeKind::TupleType,
        NodeKind::StructType,
        NodeKind::FunType,
    ];

    #[inline]
    pub fn from_u8(k: u8) -> Option<NodeKind> {
        NodeKind::ALL.get(usize::from(k)).copied()
    }

    #[inline]
    const fn in_band(self, beg: u8, end: u8) -> bool {
        let k = self as u8;
        beg <= k && k < end
    }

    #[inline]
    pub const fn is_stmt(self) -> bool {
        self.in_band(Self::STMT_BEG, Self::STMT_END)
    }

    #[inline]
    pub const fn is_cunit(self) -> bool {
        self.in_band(Self::CUNIT_BEG, Self::CUNIT_END)
    }

    #[inline]
    pub const fn is_expr(self) -> bool {
        self.in_band(Self::EXPR_BEG, Self::EXPR_END)
    }

    #[inline]
    pub const fn is_lit(self) -> bool {
        self.in_band(Self::LIT_BEG, Self::LIT_END)
    }

    #[inline]
    pub const fn is_unary_op(self) -> bool {
        self.in_band(Self::UNARY_BEG, Self::UNARY_END)
    }

    #[inline]
    pub const fn is_list_expr(self) -> bool {
        self.in_band(Self::LIST_BEG, Self::LIST_END)
    }

    #[inline]
    pub const fn is_type(self) -> bool {
        self.in_band(Self::TYPE_BEG, Self::TYPE_END)
    }

    pub const fn name(self) -> &'static str {
        match self {
            NodeKind::Bad => "Bad",
            NodeKind::Field => "Field",
            NodeKind::Pkg => "Pkg",
            NodeKind::File => "File",
            NodeKind::Comment => "Comment",
            NodeKind::Nil => "Nil",
            NodeKind::BoolLit => "BoolLit",
            NodeKind::IntLit => "IntLit",
            NodeKind::FloatLit => "FloatLit",
            NodeKind::StrLit => "StrLit",
            NodeKind::Id => "Id",
            NodeKind::BinOp => "BinOp",
            NodeKind::PrefixOp => "PrefixOp",
            NodeKind::PostfixOp => "PostfixOp",
            NodeKind::Return => "Return",
            NodeKind::Assign => "Assign",
            NodeKind::Tuple => "Tuple",
            NodeKind::Array => "Array",
            NodeKind::Block => "Block",
            NodeKind::Fun => "Fun",
            NodeKind::Macro => "Macro",
            NodeKind::Call => "Call",
            NodeKind::TypeCast => "TypeCast",
            NodeKind::Var => "Var",
            NodeKind::Ref => "Ref",
            NodeKind::NamedArg => "NamedArg",
            NodeKind::Selector => "Selector",
            NodeKind::Index => "Index",
            NodeKind::Slice => "Slice",
            NodeKind::If => "If",
            NodeKind::TypeType => "TypeType",
            NodeKind::NamedType => "NamedType",
            NodeKind::AliasType => "AliasType",
            NodeKind::RefType => "RefType",
            NodeKind::BasicType => "BasicType",
            NodeKind::ArrayType => "ArrayType",
            NodeKind::TupleType => "TupleType",
            NodeKind::StructType => "StructType",
            NodeKind::FunType => "FunType",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const _: () = assert!(NodeKind::ALL.len() == NodeKind::TYPE_END as usize);
const _: () = assert!(NodeKind::STMT_END == NodeKind::EXPR_BEG);
const _: () = assert!(NodeKind::EXPR_END == NodeKind::TYPE_BEG);
