use std::collections::VecDeque;
use std::sync::Arc;

use co_ir::{Pos, PosMap, Source};

/// A scanned comment: a byte range of one source.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Comment {
    /// [`PosMap`] origin of the source.
    pub origin: u32,
    pub offset: u32,
    pub len: u32,
}

impl Comment {
    /// The comment text, read from `source`.
    pub fn bytes<'s>(&self, source: &'s Source) -> Option<&'s [u8]> {
        let body = source.body().ok()?;
        let start = self.offset as usize;
        body.get(start..start + self.len as usize)
    }

    /// Source of the comment in `posmap`.
    pub fn source<'m>(&self, posmap: &'m PosMap) -> Option<&'m Source> {
        posmap
            .source(Pos::new(self.origin, 0, 0, 0))
            .map(Arc::as_ref)
    }
}

/// Comments in the order they were scanned.
#[derive(Clone, Debug, Default)]
pub struct CommentQueue {
    queue: VecDeque<Comment>,
}

impl CommentQueue {
    pub fn new() -> Self {
        CommentQueue::default()
    }

    pub fn push(&mut self, comment: Comment) {
        self.queue.push_back(comment);
    }

    /// Remove and return the least recently scanned comment.
    pub fn pop(&mut self) -> Option<Comment> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
