//! Per-package build state.
//!
//! A [`BuildContext`] owns everything one package build produces: the
//! package's symbol pool (chained to the universe pool), the node arena,
//! the loaded sources and the type table. Diagnostics flow through
//! [`BuildContext::diag`], which is the only place failures turn into
//! user-visible messages.

use std::collections::VecDeque;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use co_diagnostic::{DiagLevel, Diagnostic};
use co_ir::{
    typeid, AllocError, NodeArena, NodeId, NodeKind, PosMap, PosSpan, Source, SourceError, Sym,
    SymError, SymPool, TypeCode, TypeIdError,
};
use co_parse::ParseFlags;

use crate::Universe;

/// Error setting up or feeding a build.
#[derive(Debug)]
pub enum BuildError {
    /// A directory could not be listed.
    Io { path: PathBuf, error: io::Error },
    /// A source could not be opened or read.
    Source(SourceError),
    /// A name could not be interned.
    Sym(SymError),
    /// A type id could not be computed.
    TypeId(TypeIdError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::Io { path, error } => write!(f, "{}: {error}", path.display()),
            BuildError::Source(e) => write!(f, "{e}"),
            BuildError::Sym(e) => write!(f, "{e}"),
            BuildError::TypeId(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::Io { error, .. } => Some(error),
            BuildError::Source(e) => Some(e),
            BuildError::Sym(e) => Some(e),
            BuildError::TypeId(e) => Some(e),
        }
    }
}

impl From<SourceError> for BuildError {
    fn from(e: SourceError) -> Self {
        BuildError::Source(e)
    }
}

impl From<SymError> for BuildError {
    fn from(e: SymError) -> Self {
        BuildError::Sym(e)
    }
}

impl From<TypeIdError> for BuildError {
    fn from(e: TypeIdError) -> Self {
        BuildError::TypeId(e)
    }
}

/// Build options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildConfig {
    /// Optimize: the parser may drop nodes that only matter for debugging.
    pub opt: bool,
    /// Include debug information.
    pub debug: bool,
    /// Insert runtime safety checks.
    pub safe: bool,
    /// Concrete type of `int`.
    pub sint_type: TypeCode,
    /// Concrete type of `uint`.
    pub uint_type: TypeCode,
    /// Least severe level that is reported.
    pub diag_level: DiagLevel,
}

impl Default for BuildConfig {
    fn default() -> Self {
        let (sint_type, uint_type) = host_int_types();
        BuildConfig {
            opt: false,
            debug: false,
            safe: true,
            sint_type,
            uint_type,
            diag_level: DiagLevel::Note,
        }
    }
}

/// `int` and `uint` are pointer-sized on the host.
fn host_int_types() -> (TypeCode, TypeCode) {
    if cfg!(target_pointer_width = "16") {
        (TypeCode::I16, TypeCode::U16)
    } else if cfg!(target_pointer_width = "32") {
        (TypeCode::I32, TypeCode::U32)
    } else {
        (TypeCode::I64, TypeCode::U64)
    }
}

type DiagHandler = Box<dyn FnMut(&Diagnostic)>;

/// State of one package build.
pub struct BuildContext {
    universe: Arc<Universe>,
    pub config: BuildConfig,
    /// Package identifier, e.g. `"main"`.
    pub pkgid: Sym,
    pub syms: SymPool,
    pub arena: NodeArena,
    pub posmap: PosMap,
    /// Newest first.
    sources: VecDeque<Arc<Source>>,
    /// Canonical type node per type id.
    types: FxHashMap<Sym, NodeId>,
    diags: Vec<Diagnostic>,
    handler: Option<DiagHandler>,
    errcount: u32,
}

impl BuildContext {
    pub fn new(
        universe: &Arc<Universe>,
        config: BuildConfig,
        pkgid: &str,
    ) -> Result<BuildContext, BuildError> {
        let syms = SymPool::with_base(Arc::clone(universe.syms()));
        let pkgid = syms.get(pkgid)?;
        debug!(%pkgid, ?config, "new build");
        Ok(BuildContext {
            universe: Arc::clone(universe),
            config,
            pkgid,
            syms,
            arena: NodeArena::from_prototypes(universe.prototypes()),
            posmap: PosMap::new(),
            sources: VecDeque::new(),
            types: FxHashMap::default(),
            diags: Vec::new(),
            handler: None,
            errcount: 0,
        })
    }

    pub fn universe(&self) -> &Arc<Universe> {
        &self.universe
    }

    /// Flags the parser runs with for this build.
    pub fn parse_flags(&self) -> ParseFlags {
        let mut flags = ParseFlags::empty();
        flags.set(ParseFlags::OPT, self.config.opt);
        flags
    }

    // === Sources ===

    /// Add `source` in front of the sources added so far.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn add_source(&mut self, source: Arc<Source>) {
        trace!(filename = source.filename(), "add source");
        self.posmap.origin(&source);
        self.sources.push_front(source);
    }

    /// Open `path` and add it as a source.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn add_file(&mut self, path: impl AsRef<Path>) -> Result<Arc<Source>, BuildError> {
        let source = Arc::new(Source::open_file(path)?);
        self.add_source(Arc::clone(&source));
        Ok(source)
    }

    /// Add every `.co` file in `dir`, returning how many were added.
    ///
    /// Hidden files, subdirectories and special files (FIFOs, sockets,
    /// devices) are skipped. Stops at the first file that fails to open;
    /// files added before it stay added.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn add_dir(&mut self, dir: impl AsRef<Path>) -> Result<usize, BuildError> {
        let dir = dir.as_ref();
        let io_err = |error| BuildError::Io {
            path: dir.to_path_buf(),
            error,
        };

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            // an unknown file type may still be a regular file
            if let Ok(ft) = entry.file_type() {
                if !ft.is_file() && !ft.is_symlink() {
                    continue;
                }
            }
            if entry.file_name().to_str().is_some_and(is_source_name) {
                paths.push(entry.path());
            }
        }
        // directory order is unspecified; keep builds reproducible
        paths.sort();

        for path in &paths {
            self.add_file(path)?;
        }
        debug!(dir = %dir.display(), count = paths.len(), "added source directory");
        Ok(paths.len())
    }

    /// Sources, newest first.
    pub fn sources(&self) -> impl Iterator<Item = &Arc<Source>> + '_ {
        self.sources.iter()
    }

    // === Nodes ===

    /// Allocate a zero-initialized node of `kind`.
    pub fn mknode(&mut self, kind: NodeKind) -> Result<NodeId, AllocError> {
        self.arena.alloc_kind(kind)
    }

    // === Diagnostics ===

    /// Install the function that receives reported diagnostics.
    ///
    /// Without a handler, diagnostics are dropped (errors are still
    /// counted).
    pub fn set_handler(&mut self, handler: impl FnMut(&Diagnostic) + 'static) {
        self.handler = Some(Box::new(handler));
    }

    /// Report a diagnostic.
    pub fn diag(&mut self, level: DiagLevel, span: impl Into<PosSpan>, msg: impl Into<String>) {
        if level <= DiagLevel::Error {
            self.errcount = self.errcount.saturating_add(1);
        }
        if level > self.config.diag_level || self.handler.is_none() {
            return;
        }
        self.diags.push(Diagnostic::new(level, span, msg));
        if let (Some(handler), Some(d)) = (self.handler.as_mut(), self.diags.last()) {
            handler(d);
        }
    }

    pub fn errf(&mut self, span: impl Into<PosSpan>, msg: fmt::Arguments<'_>) {
        self.diag(DiagLevel::Error, span, msg.to_string());
    }

    pub fn warnf(&mut self, span: impl Into<PosSpan>, msg: fmt::Arguments<'_>) {
        self.diag(DiagLevel::Warn, span, msg.to_string());
    }

    pub fn notef(&mut self, span: impl Into<PosSpan>, msg: fmt::Arguments<'_>) {
        self.diag(DiagLevel::Note, span, msg.to_string());
    }

    /// Diagnostics recorded so far, oldest first.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diags
    }

    /// Errors reported so far, including filtered ones.
    pub fn errcount(&self) -> u32 {
        self.errcount
    }

    // === Types ===

    /// Type id of `ty`, computed and cached on first use.
    ///
    /// On failure an error is reported at `ty` and `_` is returned.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn typeid(&mut self, ty: NodeId) -> Sym {
        match self.try_typeid(ty) {
            Ok(tid) => tid,
            Err(e) => {
                self.report_type_error(ty, &e);
                self.universe.underscore().clone()
            }
        }
    }

    /// Like [`BuildContext::typeid`] but returns the failure.
    pub fn try_typeid(&mut self, ty: NodeId) -> Result<Sym, BuildError> {
        if let Some(tid) = self.arena.get(ty).and_then(|n| n.tid()) {
            return Ok(tid.clone());
        }
        let encoded = typeid::encode(&self.arena, ty)?;
        let tid = self.syms.get(&encoded)?;
        self.arena.set_tid(ty, tid.clone());
        Ok(tid)
    }

    /// Whether `x` and `y` denote the same type.
    pub fn typeeq(&mut self, x: NodeId, y: NodeId) -> bool {
        if x == y {
            return true;
        }
        let (Some(kx), Some(ky)) = (self.arena.kind(x), self.arena.kind(y)) else {
            return false;
        };
        if kx != ky {
            return false;
        }
        match (self.try_typeid(x), self.try_typeid(y)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    /// Canonical node for the type of `ty`, registering `ty` if it is
    /// the first of its kind.
    ///
    /// If the type id cannot be computed, an error is reported and `ty`
    /// is returned unregistered.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn intern_type(&mut self, ty: NodeId) -> NodeId {
        let tid = match self.try_typeid(ty) {
            Ok(tid) => tid,
            Err(e) => {
                self.report_type_error(ty, &e);
                return ty;
            }
        };
        *self.types.entry(tid).or_insert(ty)
    }

    /// Number of distinct types registered by [`BuildContext::intern_type`].
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    fn report_type_error(&mut self, ty: NodeId, e: &BuildError) {
        let span = self.arena.get(ty).map_or(PosSpan::NONE, co_ir::Node::span);
        let what = self.arena.describe(ty);
        self.errf(span, format_args!("invalid type {what}: {e}"));
    }
}

impl Drop for BuildContext {
    fn drop(&mut self) {
        // diagnostics refer to positions, and positions to the posmap
        self.diags.clear();
        self.types.clear();
        self.posmap = PosMap::new();
    }
}

fn is_source_name(name: &str) -> bool {
    name.len() >= 4 && !name.starts_with('.') && name.ends_with(".co")
}
