//! Token vocabulary shared by the scanner and parser.
//!
//! | Range       | Category                                   |
//! |-------------|--------------------------------------------|
//! | 0-3         | None and separators                        |
//! | 4-26        | Primitive operators (between sentinels)    |
//! | 27-38       | Assignment operators                       |
//! | 39-48       | Brackets, logical operators, arrow, dot    |
//! | 49-51       | Identifier and literals                    |
//! | 0x100-      | Keywords                                   |
//!
//! Primitive operators sit in one contiguous run, and comparisons in one
//! contiguous sub-run, so both classifications are a single range check.
//!
//! Keywords are numbered from [`Tok::KEYWORDS_START`]. A keyword's offset
//! from that start is stored in the 5-bit flag field of its interned
//! [`Sym`], so at most 31 keywords fit (0 means "not a keyword").

use std::fmt;

use crate::Sym;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum Tok {
    None = 0,
    Comma = 1,
    Semi = 2,
    Colon = 3,

    // === Primitive operators ===
    PrimOpsStart = 4,
    Plus = 5,
    Minus = 6,
    Star = 7,
    Slash = 8,
    Percent = 9,
    Shl = 10,
    Shr = 11,
    And = 12,
    Pipe = 13,
    Hat = 14,
    Tilde = 15,
    Excalm = 16,
    // comparisons: Eq must be first, GEq last
    Eq = 17,
    NEq = 18,
    Lt = 19,
    LEq = 20,
    Gt = 21,
    GEq = 22,
    PlusPlus = 23,
    MinusMinus = 24,
    PrimOpsEnd = 25,

    // === Assignment ===
    Assign = 27,
    ShlAssign = 28,
    ShrAssign = 29,
    PlusAssign = 30,
    MinusAssign = 31,
    StarAssign = 32,
    SlashAssign = 33,
    PercentAssign = 34,
    AndAssign = 35,
    PipeAssign = 36,
    TildeAssign = 37,
    HatAssign = 38,

    // === Punctuation ===
    LParen = 39,
    RParen = 40,
    LBrace = 41,
    RBrace = 42,
    LBrack = 43,
    RBrack = 44,
    AndAnd = 45,
    PipePipe = 46,
    RArr = 47,
    Dot = 48,

    // === Names and literals ===
    Id = 49,
    IntLit = 50,
    FloatLit = 51,

    // === Keywords ===
    As = 0x101,
    Auto = 0x102,
    Break = 0x103,
    Continue = 0x104,
    Defer = 0x105,
    Else = 0x106,
    Enum = 0x107,
    For = 0x108,
    Fun = 0x109,
    If = 0x10A,
    Import = 0x10B,
    In = 0x10C,
    Nil = 0x10D,
    Return = 0x10E,
    Struct = 0x10F,
    Switch = 0x110,
    Type = 0x111,
    Const = 0x112,
    Mut = 0x113,
    Var = 0x114,
}

/// Keyword spellings and tokens, in keyword-index order (index 1 first).
pub const KEYWORDS: &[(&str, Tok)] = &[
    ("as", Tok::As),
    ("auto", Tok::Auto),
    ("break", Tok::Break),
    ("continue", Tok::Continue),
    ("defer", Tok::Defer),
    ("else", Tok::Else),
    ("enum", Tok::Enum),
    ("for", Tok::For),
    ("fun", Tok::Fun),
    ("if", Tok::If),
    ("import", Tok::Import),
    ("in", Tok::In),
    ("nil", Tok::Nil),
    ("return", Tok::Return),
    ("struct", Tok::Struct),
    ("switch", Tok::Switch),
    ("type", Tok::Type),
    ("const", Tok::Const),
    ("mut", Tok::Mut),
    ("var", Tok::Var),
];

const _: () = assert!(
    KEYWORDS.len() <= crate::SYM_FLAGS_MAX as usize,
    "keyword index must fit the 5-bit sym flag field"
);

impl Tok {
    /// Keyword index 0 is "not a keyword"; keyword `i` is `KEYWORDS_START + i`.
    pub const KEYWORDS_START: u16 = 0x100;

    #[inline]
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Operator that maps directly to an IR operation.
    #[inline]
    pub const fn is_prim_op(self) -> bool {
        let c = self as u16;
        c > Tok::PrimOpsStart as u16 && c < Tok::PrimOpsEnd as u16
    }

    /// One of `== != < <= > >=`.
    #[inline]
    pub const fn is_comparison(self) -> bool {
        let c = self as u16;
        c >= Tok::Eq as u16 && c <= Tok::GEq as u16
    }

    /// `=` or a compound assignment.
    #[inline]
    pub const fn is_assign(self) -> bool {
        let c = self as u16;
        c >= Tok::Assign as u16 && c <= Tok::HatAssign as u16
    }

    #[inline]
    pub const fn is_keyword(self) -> bool {
        self as u16 > Tok::KEYWORDS_START
    }

    /// 1-based keyword index, or 0 for non-keywords.
    #[inline]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "keyword offsets are below 32"
    )]
    pub const fn keyword_index(self) -> u8 {
        if self.is_keyword() {
            (self as u16 - Tok::KEYWORDS_START) as u8
        } else {
            0
        }
    }

    /// Keyword token for a 1-based keyword index.
    pub fn from_keyword_index(index: u8) -> Option<Tok> {
        let i = usize::from(index).checked_sub(1)?;
        KEYWORDS.get(i).map(|&(_, tok)| tok)
    }

    /// The binary operator a compound assignment applies, e.g. `+=` to `+`.
    pub const fn assign_op(self) -> Option<Tok> {
        match self {
            Tok::ShlAssign => Some(Tok::Shl),
            Tok::ShrAssign => Some(Tok::Shr),
            Tok::PlusAssign => Some(Tok::Plus),
            Tok::MinusAssign => Some(Tok::Minus),
            Tok::StarAssign => Some(Tok::Star),
            Tok::SlashAssign => Some(Tok::Slash),
            Tok::PercentAssign => Some(Tok::Percent),
            Tok::AndAssign => Some(Tok::And),
            Tok::PipeAssign => Some(Tok::Pipe),
            Tok::TildeAssign => Some(Tok::Tilde),
            Tok::HatAssign => Some(Tok::Hat),
            _ => None,
        }
    }

    /// Printable spelling.
    pub const fn name(self) -> &'static str {
        match self {
            Tok::None => "TNone",
            Tok::Comma => ",",
            Tok::Semi => ";",
            Tok::Colon => ":",
            Tok::PrimOpsStart | Tok::PrimOpsEnd => "",
            Tok::Plus => "+",
            Tok::Minus => "-",
            Tok::Star => "*",
            Tok::Slash => "/",
            Tok::Percent => "%",
            Tok::Shl => "<<",
            Tok::Shr => ">>",
            Tok::And => "&",
            Tok::Pipe => "|",
            Tok::Hat => "^",
            Tok::Tilde => "~",
            Tok::Excalm => "!",
            Tok::Eq => "==",
            Tok::NEq => "!=",
            Tok::Lt => "<",
            Tok::LEq => "<=",
            Tok::Gt => ">",
            Tok::GEq => ">=",
            Tok::PlusPlus => "++",
            Tok::MinusMinus => "--",
            Tok::Assign => "=",
            Tok::ShlAssign => "<<=",
            Tok::ShrAssign => ">>=",
            Tok::PlusAssign => "+=",
            Tok::MinusAssign => "-=",
            Tok::StarAssign => "*=",
            Tok::SlashAssign => "/=",
            Tok::PercentAssign => "%=",
            Tok::AndAssign => "&=",
            Tok::PipeAssign => "|=",
            Tok::TildeAssign => "~=",
            Tok::HatAssign => "^=",
            Tok::LParen => "(",
            Tok::RParen => ")",
            Tok::LBrace => "{",
            Tok::RBrace => "}",
            Tok::LBrack => "[",
            Tok::RBrack => "]",
            Tok::AndAnd => "&&",
            Tok::PipePipe => "||",
            Tok::RArr => "->",
            Tok::Dot => ".",
            Tok::Id => "identifier",
            Tok::IntLit => "int",
            Tok::FloatLit => "float",
            Tok::As => "as",
            Tok::Auto => "auto",
            Tok::Break => "break",
            Tok::Continue => "continue",
            Tok::Defer => "defer",
            Tok::Else => "else",
            Tok::Enum => "enum",
            Tok::For => "for",
            Tok::Fun => "fun",
            Tok::If => "if",
            Tok::Import => "import",
            Tok::In => "in",
            Tok::Nil => "nil",
            Tok::Return => "return",
            Tok::Struct => "struct",
            Tok::Switch => "switch",
            Tok::Type => "type",
            Tok::Const => "const",
            Tok::Mut => "mut",
            Tok::Var => "var",
        }
    }
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The token `sym` spells in source: a keyword, or [`Tok::Id`].
#[inline]
pub fn langtok(sym: &Sym) -> Tok {
    match sym.flags() {
        0 => Tok::Id,
        index => Tok::from_keyword_index(index).unwrap_or(Tok::Id),
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::Tok;
    crate::static_assert_size!(Tok, 2);
}

#[cfg(test)]
mod tests;
