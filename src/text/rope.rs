//! Rope data structure for efficient text storage and manipulation
//!
//! Offsets are character (Unicode scalar value) indices. Each node caches
//! its character and newline counts so lookups and newline searches can skip
//! whole subtrees.

use std::fmt;

/// Maximum size of a leaf node in bytes
const MAX_LEAF_SIZE: usize = 1024;

/// Rope data structure for efficient text editing
#[derive(Clone)]
pub struct Rope {
    root: RopeNode,
}

#[derive(Clone, Default)]
enum RopeNode {
    /// Internal node with two children
    Branch {
        left: Box<RopeNode>,
        right: Box<RopeNode>,
        /// Total characters in left subtree
        left_chars: usize,
        /// Total newlines in left subtree
        left_lines: usize,
    },
    /// Leaf node containing actual text
    Leaf {
        text: String,
        chars: usize,
        line_count: usize,
    },
    #[default]
    Empty,
}

impl Default for Rope {
    fn default() -> Self {
        Self::new()
    }
}

impl Rope {
    /// Create a new empty rope
    pub fn new() -> Self {
        Self {
            root: RopeNode::Empty,
        }
    }

    /// Create a rope from a string
    pub fn from_str(s: &str) -> Self {
        if s.is_empty() {
            return Self::new();
        }

        Self {
            root: Self::build_tree(Self::chunk_leaves(s)),
        }
    }

    /// Split text into leaves of at most `MAX_LEAF_SIZE` bytes on char boundaries
    fn chunk_leaves(s: &str) -> Vec<RopeNode> {
        let mut leaves = Vec::with_capacity(s.len() / MAX_LEAF_SIZE + 1);
        let mut rest = s;

        while !rest.is_empty() {
            let mut split = rest.len().min(MAX_LEAF_SIZE);
            while !rest.is_char_boundary(split) {
                split -= 1;
            }
            // A single char wider than the leaf size still gets its own leaf
            if split == 0 {
                split = rest.chars().next().map_or(rest.len(), char::len_utf8);
            }
            let (chunk, tail) = rest.split_at(split);
            leaves.push(RopeNode::leaf(chunk.to_string()));
            rest = tail;
        }

        leaves
    }

    /// Build a balanced tree from leaf nodes
    fn build_tree(mut nodes: Vec<RopeNode>) -> RopeNode {
        if nodes.is_empty() {
            return RopeNode::Empty;
        }

        while nodes.len() > 1 {
            let mut paired = Vec::with_capacity((nodes.len() + 1) / 2);
            let mut iter = nodes.into_iter();

            while let Some(left) = iter.next() {
                match iter.next() {
                    Some(right) => paired.push(RopeNode::branch(left, right)),
                    None => paired.push(left),
                }
            }

            nodes = paired;
        }

        nodes.remove(0)
    }

    /// Total length in characters
    pub fn len(&self) -> usize {
        self.root.len()
    }

    /// Total length in bytes
    pub fn byte_len(&self) -> usize {
        self.root.byte_len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.len() == 0
    }

    /// Number of newline characters
    pub fn line_count(&self) -> usize {
        self.root.line_count()
    }

    /// Insert text at the given character offset (clamped to the end)
    pub fn insert(&mut self, offset: usize, text: &str) {
        if text.is_empty() {
            return;
        }

        let offset = offset.min(self.len());
        let new_node = Self::build_tree(Self::chunk_leaves(text));
        self.root = Self::insert_node(std::mem::take(&mut self.root), offset, new_node);
        self.rebalance_if_needed();
    }

    fn insert_node(node: RopeNode, offset: usize, new_node: RopeNode) -> RopeNode {
        match node {
            RopeNode::Empty => new_node,
            RopeNode::Leaf { text, .. } => {
                let chars = text.chars().count();
                if offset == 0 {
                    RopeNode::branch(new_node, RopeNode::leaf(text))
                } else if offset >= chars {
                    RopeNode::branch(RopeNode::leaf(text), new_node)
                } else {
                    let split = char_to_byte(&text, offset);
                    let (left_text, right_text) = text.split_at(split);
                    let left = RopeNode::branch(RopeNode::leaf(left_text.to_string()), new_node);
                    RopeNode::branch(left, RopeNode::leaf(right_text.to_string()))
                }
            }
            RopeNode::Branch {
                left,
                right,
                left_chars,
                ..
            } => {
                if offset <= left_chars {
                    RopeNode::branch(Self::insert_node(*left, offset, new_node), *right)
                } else {
                    RopeNode::branch(*left, Self::insert_node(*right, offset - left_chars, new_node))
                }
            }
        }
    }

    /// Delete the characters in `start..end`
    pub fn delete(&mut self, start: usize, end: usize) {
        if start >= end || start >= self.len() {
            return;
        }

        let end = end.min(self.len());
        self.root = Self::delete_range(std::mem::take(&mut self.root), start, end);
        self.rebalance_if_needed();
    }

    fn delete_range(node: RopeNode, start: usize, end: usize) -> RopeNode {
        match node {
            RopeNode::Empty => RopeNode::Empty,
            RopeNode::Leaf { text, .. } => {
                let start_byte = char_to_byte(&text, start);
                let end_byte = char_to_byte(&text, end);
                let mut new_text = String::with_capacity(text.len() - (end_byte - start_byte));
                new_text.push_str(&text[..start_byte]);
                new_text.push_str(&text[end_byte..]);

                if new_text.is_empty() {
                    RopeNode::Empty
                } else {
                    RopeNode::leaf(new_text)
                }
            }
            RopeNode::Branch {
                left,
                right,
                left_chars,
                ..
            } => {
                if end <= left_chars {
                    Self::merge_nodes(Self::delete_range(*left, start, end), *right)
                } else if start >= left_chars {
                    Self::merge_nodes(
                        *left,
                        Self::delete_range(*right, start - left_chars, end - left_chars),
                    )
                } else {
                    let new_left = Self::delete_range(*left, start, left_chars);
                    let new_right = Self::delete_range(*right, 0, end - left_chars);
                    Self::merge_nodes(new_left, new_right)
                }
            }
        }
    }

    fn merge_nodes(left: RopeNode, right: RopeNode) -> RopeNode {
        match (&left, &right) {
            (RopeNode::Empty, _) => right,
            (_, RopeNode::Empty) => left,
            _ => RopeNode::branch(left, right),
        }
    }

    /// Text of the characters in `start..end`
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.len());
        let mut result = String::new();
        if start < end {
            self.root.collect_range(start, end, &mut result);
        }
        result
    }

    /// Character offset of the first `'\n'` at or after `from`
    pub fn next_line_break(&self, from: usize) -> Option<usize> {
        self.root.find_newline(from)
    }

    fn rebalance_if_needed(&mut self) {
        let height = self.root.height();
        let optimal_height = (self.byte_len() as f64 / MAX_LEAF_SIZE as f64)
            .log2()
            .ceil()
            .max(0.0) as usize
            + 1;

        if height > optimal_height * 2 {
            let mut leaves = Vec::new();
            let root = std::mem::take(&mut self.root);
            root.collect_leaves(&mut leaves);
            self.root = Self::build_tree(leaves);
        }
    }
}

impl RopeNode {
    fn leaf(text: String) -> Self {
        let chars = text.chars().count();
        let line_count = text.chars().filter(|c| *c == '\n').count();
        RopeNode::Leaf {
            text,
            chars,
            line_count,
        }
    }

    fn branch(left: RopeNode, right: RopeNode) -> Self {
        let left_chars = left.len();
        let left_lines = left.line_count();
        RopeNode::Branch {
            left: Box::new(left),
            right: Box::new(right),
            left_chars,
            left_lines,
        }
    }

    fn len(&self) -> usize {
        match self {
            RopeNode::Empty => 0,
            RopeNode::Leaf { chars, .. } => *chars,
            RopeNode::Branch {
                left_chars, right, ..
            } => left_chars + right.len(),
        }
    }

    fn byte_len(&self) -> usize {
        match self {
            RopeNode::Empty => 0,
            RopeNode::Leaf { text, .. } => text.len(),
            RopeNode::Branch { left, right, .. } => left.byte_len() + right.byte_len(),
        }
    }

    fn line_count(&self) -> usize {
        match self {
            RopeNode::Empty => 0,
            RopeNode::Leaf { line_count, .. } => *line_count,
            RopeNode::Branch {
                left_lines, right, ..
            } => left_lines + right.line_count(),
        }
    }

    fn height(&self) -> usize {
        match self {
            RopeNode::Empty | RopeNode::Leaf { .. } => 1,
            RopeNode::Branch { left, right, .. } => 1 + left.height().max(right.height()),
        }
    }

    fn find_newline(&self, from: usize) -> Option<usize> {
        match self {
            RopeNode::Empty => None,
            RopeNode::Leaf {
                text, line_count, ..
            } => {
                if *line_count == 0 {
                    return None;
                }
                text.chars()
                    .enumerate()
                    .skip(from)
                    .find(|(_, c)| *c == '\n')
                    .map(|(i, _)| i)
            }
            RopeNode::Branch {
                left,
                right,
                left_chars,
                left_lines,
            } => {
                if from < *left_chars && *left_lines > 0 {
                    if let Some(found) = left.find_newline(from) {
                        return Some(found);
                    }
                }
                right
                    .find_newline(from.saturating_sub(*left_chars))
                    .map(|i| i + left_chars)
            }
        }
    }

    fn collect_leaves(self, leaves: &mut Vec<RopeNode>) {
        match self {
            RopeNode::Empty => {}
            RopeNode::Leaf { .. } => leaves.push(self),
            RopeNode::Branch { left, right, .. } => {
                left.collect_leaves(leaves);
                right.collect_leaves(leaves);
            }
        }
    }

    fn collect_range(&self, start: usize, end: usize, result: &mut String) {
        if start >= end {
            return;
        }

        match self {
            RopeNode::Empty => {}
            RopeNode::Leaf { text, .. } => {
                let s = char_to_byte(text, start);
                let e = char_to_byte(text, end);
                result.push_str(&text[s..e]);
            }
            RopeNode::Branch {
                left,
                right,
                left_chars,
                ..
            } => {
                if start < *left_chars {
                    left.collect_range(start, end.min(*left_chars), result);
                }
                if end > *left_chars {
                    right.collect_range(start.saturating_sub(*left_chars), end - left_chars, result);
                }
            }
        }
    }

    fn collect_all(&self, result: &mut String) {
        match self {
            RopeNode::Empty => {}
            RopeNode::Leaf { text, .. } => result.push_str(text),
            RopeNode::Branch { left, right, .. } => {
                left.collect_all(result);
                right.collect_all(result);
            }
        }
    }
}

/// Byte index of the `char_index`-th character, or the end of the text
fn char_to_byte(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map_or(text.len(), |(byte, _)| byte)
}

impl fmt::Display for Rope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut result = String::with_capacity(self.byte_len());
        self.root.collect_all(&mut result);
        f.write_str(&result)
    }
}

impl fmt::Debug for Rope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rope({:?})", self.to_string())
    }
}
