// Copyright contributors to the cqasm-parser project
// SPDX-License-Identifier: Apache-2.0

// Position-indexed token list over a full source text. Whitespace and
// comments are dropped during construction; newlines survive because they
// terminate statements. Byte offsets are kept per token so the parser can
// compute line/column locations, check token adjacency (`c-x`, `**`), and
// re-synchronize after scanning a raw JSON span.

use cq1_lexer::{tokenize, TokenKind};
use cq1_tree::SourceLocation;

pub(crate) struct Tokens<'a> {
    src: &'a str,
    kinds: Vec<TokenKind>,
    starts: Vec<u32>,
    ends: Vec<u32>,
    line_starts: Vec<u32>,
    pos: usize,
    last_end: u32,
}

impl<'a> Tokens<'a> {
    pub(crate) fn new(src: &'a str) -> Tokens<'a> {
        let mut kinds = Vec::new();
        let mut starts = Vec::new();
        let mut ends = Vec::new();
        let mut offset = 0u32;
        for token in tokenize(src) {
            let end = offset + token.len;
            match token.kind {
                TokenKind::Whitespace | TokenKind::LineComment => {}
                kind => {
                    kinds.push(kind);
                    starts.push(offset);
                    ends.push(end);
                }
            }
            offset = end;
        }
        let mut line_starts = vec![0u32];
        for (pos, byte) in src.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(pos as u32 + 1);
            }
        }
        Tokens {
            src,
            kinds,
            starts,
            ends,
            line_starts,
            pos: 0,
            last_end: 0,
        }
    }

    pub(crate) fn src(&self) -> &'a str {
        self.src
    }

    pub(crate) fn current(&self) -> TokenKind {
        self.nth(0)
    }

    /// The kind of the token `n` positions ahead, or `Eof` past the end.
    pub(crate) fn nth(&self, n: usize) -> TokenKind {
        self.kinds
            .get(self.pos + n)
            .copied()
            .unwrap_or(TokenKind::Eof)
    }

    pub(crate) fn bump(&mut self) {
        if self.pos < self.kinds.len() {
            self.last_end = self.ends[self.pos];
            self.pos += 1;
        }
    }

    /// Source text of the current token. Empty at the end of input.
    pub(crate) fn text(&self) -> &'a str {
        if self.pos < self.kinds.len() {
            &self.src[self.starts[self.pos] as usize..self.ends[self.pos] as usize]
        } else {
            ""
        }
    }

    /// Byte offset where the current token starts.
    pub(crate) fn current_start(&self) -> u32 {
        self.starts
            .get(self.pos)
            .copied()
            .unwrap_or(self.src.len() as u32)
    }

    /// Byte offset just past the most recently consumed token.
    pub(crate) fn last_end(&self) -> u32 {
        self.last_end
    }

    /// Whether the token `n` ahead starts exactly where its predecessor
    /// ends, with no trivia between them.
    pub(crate) fn glued(&self, n: usize) -> bool {
        let index = self.pos + n;
        index > 0 && index < self.kinds.len() && self.starts[index] == self.ends[index - 1]
    }

    /// Skips tokens whose start lies before `end`. Used after a raw JSON
    /// span was measured directly on the source text.
    pub(crate) fn resync_to(&mut self, end: u32) {
        while self.pos < self.kinds.len() && self.starts[self.pos] < end {
            self.bump();
        }
    }

    /// 1-based line and column of a byte offset.
    pub(crate) fn line_col(&self, offset: u32) -> (u32, u32) {
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let col = offset - self.line_starts[line - 1] + 1;
        (line as u32, col)
    }

    pub(crate) fn location(&self, file_name: &str, start: u32, end: u32) -> SourceLocation {
        let (first_line, first_column) = self.line_col(start);
        let (last_line, last_column) = self.line_col(end.max(start));
        SourceLocation::new(file_name, first_line, first_column, last_line, last_column)
    }
}
