//! Indentation stack.

/// Columns a tab advances to (the next multiple of this width).
pub(crate) const TAB_WIDTH: u32 = 4;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum IndentChange {
    Same,
    Indent,
    /// `consistent` is false when the new width lies between two open levels.
    Dedent { count: usize, consistent: bool },
}

/// Stack of open indentation widths. The bottom entry is always `0`.
#[derive(Debug)]
pub(crate) struct IndentStack {
    levels: Vec<u32>,
}

impl IndentStack {
    pub(crate) fn new() -> Self {
        IndentStack { levels: vec![0] }
    }

    /// Width and byte length of the leading spaces and tabs in `bytes`.
    pub(crate) fn measure(bytes: &[u8]) -> (u32, usize) {
        let mut width = 0u32;
        let mut len = 0usize;
        for &b in bytes {
            match b {
                b' ' => width += 1,
                b'\t' => width = (width / TAB_WIDTH + 1) * TAB_WIDTH,
                _ => break,
            }
            len += 1;
        }
        (width, len)
    }

    #[inline]
    fn top(&self) -> u32 {
        self.levels.last().copied().unwrap_or(0)
    }

    /// Compare a new line's width against the stack and update it.
    pub(crate) fn change(&mut self, width: u32) -> IndentChange {
        let top = self.top();
        if width > top {
            self.levels.push(width);
            return IndentChange::Indent;
        }
        if width == top {
            return IndentChange::Same;
        }
        let mut count = 0;
        while self.levels.len() > 1 && self.top() > width {
            self.levels.pop();
            count += 1;
        }
        IndentChange::Dedent {
            count,
            consistent: self.top() == width,
        }
    }

    /// Pop every open level, returning how many dedents that takes.
    pub(crate) fn unwind(&mut self) -> usize {
        let open = self.levels.len() - 1;
        self.levels.truncate(1);
        open
    }
}
