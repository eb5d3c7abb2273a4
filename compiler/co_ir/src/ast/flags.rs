//! Node attribute flags.

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Attributes of a node, set by the parser and the resolver.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct NodeFlags: u16 {
        /// Contains unresolved references. Must be bit 0.
        const UNRESOLVED = 1 << 0;
        /// Value known at compile time.
        const CONST = 1 << 1;
        /// [Field] the field is a base of its struct.
        const BASE = 1 << 2;
        /// Resolved as an rvalue.
        const RVALUE = 1 << 3;
        /// [Var] function parameter.
        const PARAM = 1 << 4;
        /// [Var] macro parameter.
        const MACRO_PARAM = 1 << 5;
        /// [Var] never referenced.
        const UNUSED = 1 << 6;
        /// [Var|Fun] exported from its package.
        const PUBLIC = 1 << 7;
        /// [Tuple used as args] has a named argument.
        const NAMED = 1 << 8;
        /// Type resolver should visit even if the node is typed.
        const PARTIAL_TYPE = 1 << 9;
        /// [StructType] has fields with non-zero initializers.
        const CUSTOM_INIT = 1 << 10;
    }
}

impl NodeFlags {
    /// Parent becomes unresolved if the child is.
    #[inline]
    pub fn transfer_unresolved(&mut self, child: NodeFlags) {
        *self |= child & NodeFlags::UNRESOLVED;
    }

    /// Union of two children's unresolved state.
    #[inline]
    pub fn transfer_unresolved2(&mut self, c1: NodeFlags, c2: NodeFlags) {
        *self |= (c1 | c2) & NodeFlags::UNRESOLVED;
    }

    /// Parent becomes const if the child is.
    #[inline]
    pub fn transfer_const(&mut self, child: NodeFlags) {
        *self |= child & NodeFlags::CONST;
    }

    /// Parent stays const only if the child is const too.
    #[inline]
    pub fn transfer_mut(&mut self, child: NodeFlags) {
        let keep = self.contains(NodeFlags::CONST) && child.contains(NodeFlags::CONST);
        self.set(NodeFlags::CONST, keep);
    }

    /// Parent stays const only if both children are const.
    #[inline]
    pub fn transfer_mut2(&mut self, c1: NodeFlags, c2: NodeFlags) {
        let keep = self.contains(NodeFlags::CONST)
            && c1.contains(NodeFlags::CONST)
            && c2.contains(NodeFlags::CONST);
        self.set(NodeFlags::CONST, keep);
    }

    #[inline]
    pub fn transfer_custom_init(&mut self, child: NodeFlags) {
        *self |= child & NodeFlags::CUSTOM_INIT;
    }

    #[inline]
    pub fn transfer_partial_type2(&mut self, c1: NodeFlags, c2: NodeFlags) {
        *self |= (c1 | c2) & NodeFlags::PARTIAL_TYPE;
    }
}

/// Lowercase flag names joined by `|`, e.g. `unresolved|const`.
impl fmt::Display for NodeFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(NodeFlags, &str); 11] = [
            (NodeFlags::UNRESOLVED, "unresolved"),
            (NodeFlags::CONST, "const"),
            (NodeFlags::BASE, "base"),
            (NodeFlags::RVALUE, "rvalue"),
            (NodeFlags::PARAM, "param"),
            (NodeFlags::MACRO_PARAM, "macroparam"),
            (NodeFlags::UNUSED, "unused"),
            (NodeFlags::PUBLIC, "public"),
            (NodeFlags::NAMED, "named"),
            (NodeFlags::PARTIAL_TYPE, "partialtype"),
            (NodeFlags::CUSTOM_INIT, "custominit"),
        ];
        if self.is_empty() {
            return f.write_str("0");
        }
        let mut first = true;
        for (flag, name) in NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}
