//! Type codes and their type-id encoding characters.
//!
//! The basic codes come first and are numbered densely from zero, so a
//! universe [`crate::NodeArena`] can keep the `BasicType` node for code `c`
//! at `NodeId(c)`. Composite markers follow; they only appear inside type
//! ids and never as a `BasicType`.
//!
//! Signed and unsigned integers of one width are adjacent, signed first.

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum TypeCode {
    // === Basic (public names) ===
    Bool = 0,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    I128,
    U128,
    F32,
    F64,
    Int,
    Uint,

    // === Basic (internal) ===
    Nil,
    /// Type of an untyped constant literal.
    Ideal,
    /// Inferred.
    Auto,

    // === Composite markers ===
    Ref,
    MutRef,
    Fun,
    Array,
    ArrayEnd,
    Struct,
    StructEnd,
    Tuple,
    TupleEnd,
}

impl TypeCode {
    /// Every code that a `BasicType` node may carry, in numeric order.
    pub const BASIC: [TypeCode; 18] = [
        TypeCode::Bool,
        TypeCode::I8,
        TypeCode::U8,
        TypeCode::I16,
        TypeCode::U16,
        TypeCode::I32,
        TypeCode::U32,
        TypeCode::I64,
        TypeCode::U64,
        TypeCode::I128,
        TypeCode::U128,
        TypeCode::F32,
        TypeCode::F64,
        TypeCode::Int,
        TypeCode::Uint,
        TypeCode::Nil,
        TypeCode::Ideal,
        TypeCode::Auto,
    ];

    /// One past the last basic code.
    pub const BASIC_END: u8 = TypeCode::Ref as u8;

    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Basic code for a numeric value, if there is one.
    pub fn from_basic(code: u8) -> Option<TypeCode> {
        TypeCode::BASIC.get(usize::from(code)).copied()
    }

    #[inline]
    pub const fn is_basic(self) -> bool {
        (self as u8) < TypeCode::BASIC_END
    }

    /// Character used for this code in type ids.
    pub const fn encoding(self) -> char {
        match self {
            TypeCode::Bool => 'b',
            TypeCode::I8 => 'c',
            TypeCode::U8 => 'B',
            TypeCode::I16 => 's',
            TypeCode::U16 => 'S',
            TypeCode::I32 => 'w',
            TypeCode::U32 => 'W',
            TypeCode::I64 => 'd',
            TypeCode::U64 => 'D',
            TypeCode::I128 => 'e',
            TypeCode::U128 => 'E',
            TypeCode::F32 => 'f',
            TypeCode::F64 => 'F',
            TypeCode::Int => 'i',
            TypeCode::Uint => 'u',
            TypeCode::Nil => '0',
            TypeCode::Ideal => '*',
            TypeCode::Auto => 'a',
            TypeCode::Ref => '&',
            TypeCode::MutRef => 'M',
            TypeCode::Fun => '^',
            TypeCode::Array => '[',
            TypeCode::ArrayEnd => ']',
            TypeCode::Struct => '{',
            TypeCode::StructEnd => '}',
            TypeCode::Tuple => '(',
            TypeCode::TupleEnd => ')',
        }
    }

    /// Source name, as bound in the universe scope.
    pub const fn name(self) -> &'static str {
        match self {
            TypeCode::Bool => "bool",
            TypeCode::I8 => "i8",
            TypeCode::U8 => "u8",
            TypeCode::I16 => "i16",
            TypeCode::U16 => "u16",
            TypeCode::I32 => "i32",
            TypeCode::U32 => "u32",
            TypeCode::I64 => "i64",
            TypeCode::U64 => "u64",
            TypeCode::I128 => "i128",
            TypeCode::U128 => "u128",
            TypeCode::F32 => "f32",
            TypeCode::F64 => "f64",
            TypeCode::Int => "int",
            TypeCode::Uint => "uint",
            TypeCode::Nil => "nil",
            TypeCode::Ideal => "ideal",
            TypeCode::Auto => "auto",
            TypeCode::Ref => "ref",
            TypeCode::MutRef => "mutref",
            TypeCode::Fun => "fun",
            TypeCode::Array => "array",
            TypeCode::ArrayEnd => "arrayEnd",
            TypeCode::Struct => "struct",
            TypeCode::StructEnd => "structEnd",
            TypeCode::Tuple => "tuple",
            TypeCode::TupleEnd => "tupleEnd",
        }
    }

    /// Whether the name is bound in the universe scope.
    pub const fn is_public(self) -> bool {
        (self as u8) <= TypeCode::Uint as u8 || matches!(self, TypeCode::Auto)
    }

    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            TypeCode::I8
                | TypeCode::U8
                | TypeCode::I16
                | TypeCode::U16
                | TypeCode::I32
                | TypeCode::U32
                | TypeCode::I64
                | TypeCode::U64
                | TypeCode::I128
                | TypeCode::U128
                | TypeCode::Int
                | TypeCode::Uint
        )
    }

    pub const fn is_float(self) -> bool {
        matches!(self, TypeCode::F32 | TypeCode::F64)
    }

    /// Signed integers and floats.
    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            TypeCode::I8
                | TypeCode::I16
                | TypeCode::I32
                | TypeCode::I64
                | TypeCode::I128
                | TypeCode::Int
                | TypeCode::F32
                | TypeCode::F64
        )
    }

    /// Storage size in bytes; 0 for host-sized and unsized codes.
    pub const fn size(self) -> u8 {
        match self {
            TypeCode::Bool | TypeCode::I8 | TypeCode::U8 => 1,
            TypeCode::I16 | TypeCode::U16 => 2,
            TypeCode::I32 | TypeCode::U32 | TypeCode::F32 => 4,
            TypeCode::I64 | TypeCode::U64 | TypeCode::F64 => 8,
            TypeCode::I128 | TypeCode::U128 => 16,
            _ => 0,
        }
    }

    /// Fixed-width integer code of `size` bytes.
    pub const fn int_of_size(size: u8, signed: bool) -> Option<TypeCode> {
        Some(match (size, signed) {
            (1, true) => TypeCode::I8,
            (1, false) => TypeCode::U8,
            (2, true) => TypeCode::I16,
            (2, false) => TypeCode::U16,
            (4, true) => TypeCode::I32,
            (4, false) => TypeCode::U32,
            (8, true) => TypeCode::I64,
            (8, false) => TypeCode::U64,
            (16, true) => TypeCode::I128,
            (16, false) => TypeCode::U128,
            _ => return None,
        })
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const _: () = assert!(TypeCode::BASIC_END as usize == TypeCode::BASIC.len());
const _: () = assert!(TypeCode::I8 as u8 + 1 == TypeCode::U8 as u8);
const _: () = assert!(TypeCode::I128 as u8 + 1 == TypeCode::U128 as u8);
const _: () = assert!(TypeCode::BASIC_END <= 32);

#[cfg(test)]
mod tests;
