//! Compile-time evaluation of constant expressions.
//!
//! [`eval`] folds literals combined with arithmetic operators into a new
//! literal node. Integer arithmetic wraps at the width of the operand
//! type; `int` and `uint` take the widths configured for the build.
//!
//! ```text
//!   BinOp(+)                         IntLit 7 : int
//!   ├─ IntLit 3 : int      ──eval──▶
//!   └─ Id x ─▶ Var x = IntLit 4 : int
//! ```

use std::fmt;

use bitflags::bitflags;
use tracing::trace;

use co_ir::ast::data::{BinOp, UnaryOp};
use co_ir::{Node, NodeData, NodeFlags, NodeId, PosSpan, Tok, TypeCode};
use co_stack::{ensure_sufficient_stack, remaining_stack};

use crate::{BuildContext, Universe};

bitflags! {
    /// Options for [`eval`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct EvalFlags: u8 {
        /// Report an error when the expression cannot be evaluated.
        const MUST_SUCCEED = 1 << 0;
    }
}

/// Evaluate `expr` at compile time.
///
/// Returns the resulting literal node, or `None` if `expr` is not a
/// constant expression. With `target`, the result is implicitly converted
/// to that type; a failed conversion is always reported.
pub fn eval(
    ctx: &mut BuildContext,
    expr: NodeId,
    target: Option<NodeId>,
    flags: EvalFlags,
) -> Option<NodeId> {
    trace!(?expr, ?target, remaining_stack = ?remaining_stack(), "eval");
    Evaluator { ctx, flags }.eval(target, expr)
}

/// Evaluate `expr` as a `uint`, e.g. an array size.
pub fn eval_uint(ctx: &mut BuildContext, expr: NodeId) -> Option<u64> {
    let uint = Universe::basic_type(TypeCode::Uint)?;
    let value = eval(ctx, expr, Some(uint), EvalFlags::MUST_SUCCEED)?;
    ctx.arena.get(value)?.as_int_lit()
}

enum FoldError {
    Unsupported,
    DivisionByZero,
}

/// What to do with a node, copied out of the arena.
enum Step {
    Follow(NodeId),
    Value,
    Binary(BinOp),
    Prefix(UnaryOp),
    NotConst,
}

#[derive(Clone, Copy)]
enum Lit {
    Int(u64),
    Float(f64),
    Other,
}

struct Evaluator<'a> {
    ctx: &'a mut BuildContext,
    flags: EvalFlags,
}

impl Evaluator<'_> {
    fn eval(&mut self, target: Option<NodeId>, id: NodeId) -> Option<NodeId> {
        ensure_sufficient_stack(|| self.eval_node(target, id))
    }

    fn eval_node(&mut self, target: Option<NodeId>, id: NodeId) -> Option<NodeId> {
        let step = match &self.ctx.arena.get(id)?.data {
            NodeData::Id(ident) => ident.target.map_or(Step::NotConst, Step::Follow),
            NodeData::Var(var) => var.init.map_or(Step::NotConst, Step::Follow),
            NodeData::Nil
            | NodeData::BoolLit(_)
            | NodeData::IntLit(_)
            | NodeData::FloatLit(_)
            | NodeData::StrLit(_) => Step::Value,
            NodeData::BinOp(op) => Step::Binary(*op),
            NodeData::PrefixOp(op) => Step::Prefix(*op),
            _ => Step::NotConst,
        };

        let value = match step {
            Step::Follow(next) => return self.eval(target, next),
            Step::Value => id,
            Step::Binary(op) => {
                let left = self.eval(target, op.left)?;
                let right = self.eval(target, op.right)?;
                self.binop(id, op.op, left, right)?
            }
            Step::Prefix(op) => {
                let operand = self.eval(target, op.expr)?;
                self.prefixop(id, op.op, operand)?
            }
            Step::NotConst => {
                let what = self.text(id);
                self.fail(id, format_args!("{what} is not a compile-time expression"));
                return None;
            }
        };

        match target {
            Some(t) => self.convert(value, t),
            None => Some(value),
        }
    }

    fn binop(&mut self, id: NodeId, op: Tok, left: NodeId, right: NodeId) -> Option<NodeId> {
        let (l, r) = (self.ctx.arena.get(left)?, self.ctx.arena.get(right)?);
        let (lkind, rkind) = (l.kind(), r.kind());
        let (lty, rty) = (l.ty, r.ty);
        let (x, y) = (lit(l), lit(r));

        let ty = match (lty, rty) {
            (Some(a), Some(b)) if lkind == rkind && self.ctx.typeeq(a, b) => a,
            _ => {
                let what = self.text(id);
                self.fail(id, format_args!("mixed types in operation {what}"));
                return None;
            }
        };

        let code = self.concrete_code(ty);
        let folded = match (x, y) {
            (Lit::Int(x), Lit::Int(y)) => code
                .map_or(Err(FoldError::Unsupported), |c| int_binop(op, c, x, y))
                .map(NodeData::IntLit),
            (Lit::Float(x), Lit::Float(y)) => code
                .and_then(|c| float_binop(op, c, x, y))
                .map(NodeData::FloatLit)
                .ok_or(FoldError::Unsupported),
            _ => Err(FoldError::Unsupported),
        };
        self.finish(id, ty, folded)
    }

    fn prefixop(&mut self, id: NodeId, op: Tok, operand: NodeId) -> Option<NodeId> {
        let node = self.ctx.arena.get(operand)?;
        let x = lit(node);
        let Some(ty) = node.ty else {
            let what = self.text(id);
            self.fail(id, format_args!("{what} is not a compile-time expression"));
            return None;
        };

        let code = self.concrete_code(ty);
        let folded = match x {
            Lit::Int(x) => code
                .map_or(Err(FoldError::Unsupported), |c| int_prefixop(op, c, x))
                .map(NodeData::IntLit),
            Lit::Float(x) => code
                .and_then(|c| float_prefixop(op, c, x))
                .map(NodeData::FloatLit)
                .ok_or(FoldError::Unsupported),
            Lit::Other => Err(FoldError::Unsupported),
        };
        self.finish(id, ty, folded)
    }

    fn finish(
        &mut self,
        id: NodeId,
        ty: NodeId,
        folded: Result<NodeData, FoldError>,
    ) -> Option<NodeId> {
        match folded {
            Ok(data) => self.make_lit(id, data, ty),
            Err(FoldError::DivisionByZero) => {
                self.fail(id, format_args!("division by zero"));
                None
            }
            Err(FoldError::Unsupported) => {
                let what = self.text(id);
                let tyname = self.ctx.arena.describe(ty);
                self.fail(
                    id,
                    format_args!("unsupported compile-time operation {what} on type {tyname}"),
                );
                None
            }
        }
    }

    /// Implicitly convert the literal `value` to `target`.
    fn convert(&mut self, value: NodeId, target: NodeId) -> Option<NodeId> {
        let node = self.ctx.arena.get(value)?;
        let (x, vty) = (lit(node), node.ty);
        if let Some(vty) = vty {
            if self.ctx.typeeq(vty, target) {
                return Some(value);
            }
        }

        // untyped integer literals are taken as i64
        let from = vty
            .and_then(|t| self.concrete_code(t))
            .unwrap_or(TypeCode::I64);
        let converted = match (x, self.concrete_code(target)) {
            (Lit::Int(x), Some(to)) if to.is_integer() => {
                int_convert(x, from, to).map(NodeData::IntLit)
            }
            (Lit::Float(x), Some(TypeCode::F32)) => {
                Some(NodeData::FloatLit(f64::from(narrow_f32(x))))
            }
            (Lit::Float(x), Some(TypeCode::F64)) => Some(NodeData::FloatLit(x)),
            _ => None,
        };

        if let Some(data) = converted {
            return self.make_lit(value, data, target);
        }
        let span = self.span(value);
        let what = self.ctx.arena.describe(value);
        let tyname = self.ctx.arena.describe(target);
        self.ctx
            .errf(span, format_args!("cannot convert {what} to {tyname}"));
        None
    }

    /// New constant literal at the position of `origin`.
    fn make_lit(&mut self, origin: NodeId, data: NodeData, ty: NodeId) -> Option<NodeId> {
        let (pos, endpos) = self
            .ctx
            .arena
            .get(origin)
            .map(|n| (n.pos, n.endpos))?;
        let mut node = Node::with_data(data).at(pos);
        node.endpos = endpos;
        node.ty = Some(ty);
        node.flags = NodeFlags::CONST;
        match self.ctx.arena.alloc(node) {
            Ok(id) => Some(id),
            Err(e) => {
                let span = self.span(origin);
                self.ctx.errf(span, format_args!("{e}"));
                None
            }
        }
    }

    /// Basic type code of `ty`, with `int` and `uint` made concrete.
    fn concrete_code(&self, ty: NodeId) -> Option<TypeCode> {
        let code = self.ctx.arena.get(ty)?.as_basic_type()?.code;
        Some(match code {
            TypeCode::Int => self.ctx.config.sint_type,
            TypeCode::Uint => self.ctx.config.uint_type,
            other => other,
        })
    }

    fn fail(&mut self, id: NodeId, msg: fmt::Arguments<'_>) {
        if self.flags.contains(EvalFlags::MUST_SUCCEED) {
            let span = self.span(id);
            self.ctx.errf(span, msg);
        }
    }

    fn span(&self, id: NodeId) -> PosSpan {
        self.ctx.arena.get(id).map_or(PosSpan::NONE, Node::span)
    }

    /// Operator expressions as source text, e.g. `1 + 2.0`.
    fn text(&self, id: NodeId) -> String {
        let arena = &self.ctx.arena;
        match arena.get(id).map(|n| &n.data) {
            Some(NodeData::BinOp(op)) => format!(
                "{} {} {}",
                arena.describe(op.left),
                op.op,
                arena.describe(op.right)
            ),
            Some(NodeData::PrefixOp(op)) => format!("{}{}", op.op, arena.describe(op.expr)),
            _ => arena.describe(id),
        }
    }
}

fn lit(node: &Node) -> Lit {
    match node.data {
        NodeData::IntLit(x) => Lit::Int(x),
        NodeData::FloatLit(x) => Lit::Float(x),
        _ => Lit::Other,
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "f32 constants are rounded to f32 precision"
)]
fn narrow_f32(x: f64) -> f32 {
    x as f32
}

// Integer values are stored in a u64: signed results sign-extended,
// unsigned results zero-extended.
macro_rules! int_folds {
    ($($code:ident: $t:ty => $wide:ty),* $(,)?) => {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_possible_wrap,
            clippy::cast_sign_loss,
            clippy::unnecessary_cast,
            reason = "operands are reinterpreted at the width of their type"
        )]
        fn int_binop(op: Tok, code: TypeCode, x: u64, y: u64) -> Result<u64, FoldError> {
            match code {
                $(TypeCode::$code => {
                    let (a, b) = (x as $t, y as $t);
                    let r = match op {
                        Tok::Star => a.wrapping_mul(b),
                        Tok::Slash | Tok::Percent if b == 0 => {
                            return Err(FoldError::DivisionByZero)
                        }
                        Tok::Slash => a.wrapping_div(b),
                        Tok::Percent => a.wrapping_rem(b),
                        Tok::Shl => a.wrapping_shl(y as u32),
                        Tok::Shr => a.wrapping_shr(y as u32),
                        Tok::Plus => a.wrapping_add(b),
                        Tok::Minus => a.wrapping_sub(b),
                        Tok::Hat => a ^ b,
                        Tok::And => a & b,
                        Tok::Pipe => a | b,
                        _ => return Err(FoldError::Unsupported),
                    };
                    Ok(r as $wide as u64)
                })*
                _ => Err(FoldError::Unsupported),
            }
        }

        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_possible_wrap,
            clippy::cast_sign_loss,
            clippy::unnecessary_cast,
            reason = "operands are reinterpreted at the width of their type"
        )]
        fn int_prefixop(op: Tok, code: TypeCode, x: u64) -> Result<u64, FoldError> {
            match code {
                $(TypeCode::$code => {
                    let a = x as $t;
                    let r = match op {
                        Tok::Plus => a,
                        Tok::Minus => a.wrapping_neg(),
                        _ => return Err(FoldError::Unsupported),
                    };
                    Ok(r as $wide as u64)
                })*
                _ => Err(FoldError::Unsupported),
            }
        }
    };
}

int_folds! {
    I8: i8 => i64,
    U8: u8 => u64,
    I16: i16 => i64,
    U16: u16 => u64,
    I32: i32 => i64,
    U32: u32 => u64,
    I64: i64 => i64,
    U64: u64 => u64,
}

fn float_binop(op: Tok, code: TypeCode, x: f64, y: f64) -> Option<f64> {
    match code {
        TypeCode::F32 => {
            let (a, b) = (narrow_f32(x), narrow_f32(y));
            let r = match op {
                Tok::Star => a * b,
                Tok::Slash => a / b,
                Tok::Plus => a + b,
                Tok::Minus => a - b,
                _ => return None,
            };
            Some(f64::from(r))
        }
        TypeCode::F64 => match op {
            Tok::Star => Some(x * y),
            Tok::Slash => Some(x / y),
            Tok::Plus => Some(x + y),
            Tok::Minus => Some(x - y),
            _ => None,
        },
        _ => None,
    }
}

fn float_prefixop(op: Tok, code: TypeCode, x: f64) -> Option<f64> {
    if !code.is_float() {
        return None;
    }
    match op {
        Tok::Plus => Some(x),
        Tok::Minus => Some(-x),
        _ => None,
    }
}

/// `x` of type `from` as a value of integer type `to`, if it fits.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    reason = "range is checked before narrowing"
)]
fn int_convert(x: u64, from: TypeCode, to: TypeCode) -> Option<u64> {
    let bits = u32::from(to.size()) * 8;
    if bits == 0 || bits > 64 {
        return None;
    }
    let v = if from.is_signed() {
        i128::from(x as i64)
    } else {
        i128::from(x)
    };
    let (min, max) = if to.is_signed() {
        (-(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1)
    } else {
        (0, (1i128 << bits) - 1)
    };
    if !(min..=max).contains(&v) {
        return None;
    }
    Some(if to.is_signed() {
        v as i64 as u64
    } else {
        v as u64
    })
}
