//! The stack/queue chain every instruction operates on.
//!
//! Nodes live in an arena and link to each other by index. The chain itself
//! only remembers the head index, so reaching the tail is a walk over the
//! links, the same way `rotl`, `rotr` and queue-mode `pop` are described.

use std::fmt;

use tracing::trace;

use crate::error::{Error, Result};

/// Chain-wide pop discipline.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Mode {
    /// Pop removes the head (LIFO).
    #[default]
    Stack,
    /// Pop removes the tail (FIFO).
    Queue,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Stack => write!(f, "stack"),
            Mode::Queue => write!(f, "queue"),
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    value: i32,
    prev: Option<usize>, // towards the head
    next: Option<usize>, // towards the tail
}

/// Doubly-linked sequence of integers with a shared mode tag.
#[derive(Debug, Default)]
pub struct Chain {
    nodes: Vec<Option<Node>>, // arena, `None` marks a free slot
    free: Vec<usize>,         // reusable slots
    head: Option<usize>,
    len: usize,
    mode: Mode,
}

impl Chain {
    /// An empty chain in `Stack` mode.
    pub fn new() -> Self {
        Self::with_mode(Mode::Stack)
    }

    /// An empty chain in the given mode.
    pub fn with_mode(mode: Mode) -> Self {
        Chain {
            nodes: Vec::new(),
            free: Vec::new(),
            head: None,
            len: 0,
            mode,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch pops to LIFO. Node order is untouched.
    pub fn to_stack_mode(&mut self) {
        self.mode = Mode::Stack;
    }

    /// Switch pops to FIFO. Node order is untouched.
    pub fn to_queue_mode(&mut self) {
        self.mode = Mode::Queue;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Value at the head.
    pub fn front(&self) -> Option<i32> {
        self.head.map(|idx| self.node(idx).value)
    }

    /// Values from head to tail.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            chain: self,
            cursor: self.head,
        }
    }

    /// Insert a value in front of the head.
    pub fn push_front(&mut self, value: i32) -> Result<()> {
        let node = Node {
            value,
            prev: None,
            next: self.head,
        };
        let idx = self.alloc(node)?;

        if let Some(old_head) = self.head {
            self.node_mut(old_head).prev = Some(idx);
        }
        self.head = Some(idx);
        self.len += 1;

        trace!(value, len = self.len, "push");
        Ok(())
    }

    /// Remove the head and return its value.
    pub fn pop_front(&mut self) -> Option<i32> {
        let idx = self.head?;
        let node = self.dealloc(idx);

        self.head = node.next;
        if let Some(new_head) = node.next {
            self.node_mut(new_head).prev = None;
        }
        self.len -= 1;

        trace!(value = node.value, len = self.len, "pop head");
        Some(node.value)
    }

    /// Remove the tail and return its value.
    pub fn pop_back(&mut self) -> Option<i32> {
        let idx = self.tail()?;
        let node = self.dealloc(idx);

        match node.prev {
            Some(prev) => self.node_mut(prev).next = None,
            None => self.head = None,
        }
        self.len -= 1;

        trace!(value = node.value, len = self.len, "pop tail");
        Some(node.value)
    }

    /// Remove one value from the end the current mode pops from.
    pub fn pop(&mut self) -> Option<i32> {
        match self.mode {
            Mode::Stack => self.pop_front(),
            Mode::Queue => self.pop_back(),
        }
    }

    /// Exchange the values of the first two nodes. Returns `false` when the
    /// chain is too short.
    pub fn swap_front(&mut self) -> bool {
        let (first, second) = match self.front_pair() {
            Some(pair) => pair,
            None => return false,
        };

        let a = self.node(first).value;
        let b = self.node(second).value;
        self.node_mut(first).value = b;
        self.node_mut(second).value = a;
        true
    }

    /// Overwrite the head value.
    pub fn set_front(&mut self, value: i32) -> bool {
        match self.head {
            Some(idx) => {
                self.node_mut(idx).value = value;
                true
            }
            None => false,
        }
    }

    /// Values of the head and the node after it, as `(head, second)`.
    pub fn peek_two(&self) -> Option<(i32, i32)> {
        let (first, second) = self.front_pair()?;
        Some((self.node(first).value, self.node(second).value))
    }

    /// Move the head node to the tail. No-op below two nodes.
    pub fn rotate_left(&mut self) {
        let (top, new_head) = match self.front_pair() {
            Some(pair) => pair,
            None => return,
        };

        self.node_mut(new_head).prev = None;
        self.head = Some(new_head);

        let bottom = self.last_from(new_head);
        self.node_mut(bottom).next = Some(top);

        let node = self.node_mut(top);
        node.prev = Some(bottom);
        node.next = None;

        trace!(len = self.len, "rotl");
    }

    /// Move the tail node to the head. No-op below two nodes.
    pub fn rotate_right(&mut self) {
        let top = match self.front_pair() {
            Some((top, _)) => top,
            None => return,
        };

        let bottom = self.last_from(top);
        // At least two nodes, so the tail always has a predecessor.
        if let Some(before) = self.node(bottom).prev {
            self.node_mut(before).next = None;
        }

        let node = self.node_mut(bottom);
        node.prev = None;
        node.next = Some(top);
        self.node_mut(top).prev = Some(bottom);
        self.head = Some(bottom);

        trace!(len = self.len, "rotr");
    }

    /// Drop every node, head to tail. Safe to call repeatedly.
    pub fn release(&mut self) {
        let mut cursor = self.head.take();
        while let Some(idx) = cursor {
            cursor = self.dealloc(idx).next;
        }
        self.nodes.clear();
        self.free.clear();
        self.len = 0;
    }

    fn front_pair(&self) -> Option<(usize, usize)> {
        let first = self.head?;
        let second = self.node(first).next?;
        Some((first, second))
    }

    fn tail(&self) -> Option<usize> {
        self.head.map(|head| self.last_from(head))
    }

    fn last_from(&self, mut idx: usize) -> usize {
        while let Some(next) = self.node(idx).next {
            idx = next;
        }
        idx
    }

    fn alloc(&mut self, node: Node) -> Result<usize> {
        if let Some(idx) = self.free.pop() {
            self.nodes[idx] = Some(node);
            return Ok(idx);
        }

        self.nodes.try_reserve(1).map_err(|_| Error::Allocation)?;
        self.nodes.push(Some(node));
        Ok(self.nodes.len() - 1)
    }

    fn dealloc(&mut self, idx: usize) -> Node {
        let node = self.nodes[idx].take();
        self.free.push(idx);
        node.unwrap_or_else(|| unreachable!("slot {} linked but free", idx))
    }

    fn node(&self, idx: usize) -> &Node {
        self.nodes[idx]
            .as_ref()
            .unwrap_or_else(|| unreachable!("slot {} linked but free", idx))
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node {
        self.nodes[idx]
            .as_mut()
            .unwrap_or_else(|| unreachable!("slot {} linked but free", idx))
    }

    /// Walk the links in both directions and check they agree.
    #[cfg(test)]
    pub(crate) fn links_consistent(&self) -> bool {
        let mut prev = None;
        let mut cursor = self.head;
        let mut count = 0;
        while let Some(idx) = cursor {
            let node = self.node(idx);
            if node.prev != prev {
                return false;
            }
            prev = Some(idx);
            cursor = node.next;
            count += 1;
        }
        count == self.len
    }
}

/// Head-to-tail iterator over chain values.
pub struct Iter<'a> {
    chain: &'a Chain,
    cursor: Option<usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        let idx = self.cursor?;
        let node = self.chain.node(idx);
        self.cursor = node.next;
        Some(node.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_of(values: &[i32]) -> Chain {
        // `values` is head first, so push in reverse
        let mut chain = Chain::new();
        for &v in values.iter().rev() {
            chain.push_front(v).unwrap();
        }
        chain
    }

    fn values(chain: &Chain) -> Vec<i32> {
        chain.iter().collect()
    }

    #[test]
    fn push_inserts_at_head() {
        let mut chain = Chain::new();
        chain.push_front(1).unwrap();
        chain.push_front(2).unwrap();
        chain.push_front(3).unwrap();

        assert_eq!(values(&chain), vec![3, 2, 1]);
        assert_eq!(chain.front(), Some(3));
        assert_eq!(chain.len(), 3);
        assert!(chain.links_consistent());
    }

    #[test]
    fn pop_follows_mode() {
        let mut chain = chain_of(&[3, 2, 1]);
        assert_eq!(chain.pop(), Some(3));

        chain.to_queue_mode();
        assert_eq!(chain.pop(), Some(1));
        assert_eq!(values(&chain), vec![2]);
        assert!(chain.links_consistent());

        assert_eq!(chain.pop(), Some(2));
        assert_eq!(chain.pop(), None);
        assert!(chain.is_empty());
    }

    #[test]
    fn mode_switch_keeps_order() {
        let mut chain = chain_of(&[1, 2, 3]);
        chain.to_queue_mode();
        assert_eq!(chain.mode(), Mode::Queue);
        assert_eq!(values(&chain), vec![1, 2, 3]);
        chain.to_stack_mode();
        assert_eq!(chain.mode(), Mode::Stack);
        assert_eq!(values(&chain), vec![1, 2, 3]);
    }

    #[test]
    fn mode_on_empty_chain_is_kept() {
        let mut chain = Chain::new();
        chain.to_queue_mode();
        chain.push_front(1).unwrap();
        chain.push_front(2).unwrap();
        assert_eq!(chain.pop(), Some(1));
    }

    #[test]
    fn swap() {
        let mut chain = chain_of(&[1, 2, 3]);
        assert!(chain.swap_front());
        assert_eq!(values(&chain), vec![2, 1, 3]);

        let mut short = chain_of(&[1]);
        assert!(!short.swap_front());
        assert_eq!(values(&short), vec![1]);
    }

    #[test]
    fn rotate_left() {
        let mut chain = chain_of(&[1, 2, 3, 4]);
        chain.rotate_left();
        assert_eq!(values(&chain), vec![2, 3, 4, 1]);
        assert!(chain.links_consistent());

        let mut pair = chain_of(&[1, 2]);
        pair.rotate_left();
        assert_eq!(values(&pair), vec![2, 1]);
        assert!(pair.links_consistent());
    }

    #[test]
    fn rotate_right() {
        let mut chain = chain_of(&[1, 2, 3, 4]);
        chain.rotate_right();
        assert_eq!(values(&chain), vec![4, 1, 2, 3]);
        assert!(chain.links_consistent());

        let mut pair = chain_of(&[1, 2]);
        pair.rotate_right();
        assert_eq!(values(&pair), vec![2, 1]);
        assert!(pair.links_consistent());
    }

    #[test]
    fn rotate_short_chain_is_noop() {
        let mut empty = Chain::new();
        empty.rotate_left();
        empty.rotate_right();
        assert!(empty.is_empty());

        let mut single = chain_of(&[9]);
        single.rotate_left();
        single.rotate_right();
        assert_eq!(values(&single), vec![9]);
    }

    #[test]
    fn slots_are_reused() {
        let mut chain = chain_of(&[1, 2, 3]);
        chain.pop_front();
        chain.pop_back();
        chain.push_front(7).unwrap();
        chain.push_front(8).unwrap();
        assert_eq!(values(&chain), vec![8, 7, 2]);
        assert_eq!(chain.nodes.len(), 3);
        assert!(chain.links_consistent());
    }

    #[test]
    fn arena_grows_only_past_live_nodes() {
        let mut chain = Chain::new();
        for round in 0..5 {
            for v in 0..100 {
                chain.push_front(v).unwrap();
            }
            while chain.pop().is_some() {}
            if round % 2 == 0 {
                chain.to_queue_mode();
            } else {
                chain.to_stack_mode();
            }
        }
        assert_eq!(chain.nodes.len(), 100);
        assert_eq!(chain.free.len(), 100);
        assert!(chain.is_empty());
    }

    #[test]
    fn release() {
        let mut chain = chain_of(&[1, 2, 3]);
        chain.release();
        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);
        assert_eq!(chain.front(), None);

        // second release on an empty chain
        chain.release();
        assert!(chain.is_empty());
    }
}
