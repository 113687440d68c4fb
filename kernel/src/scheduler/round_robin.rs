//! Round-robin ready queue.
//!
//! A fixed-capacity circular buffer of process handles with strict FIFO
//! order. The buffer never grows; a push onto a full queue is refused.

use alloc::vec;
use alloc::vec::Vec;

use crate::error::QueueFull;
use crate::process::Pid;

/// Circular FIFO of Ready processes.
pub struct ReadyQueue {
    /// Backing ring; `None` marks a free cell.
    slots: Vec<Option<Pid>>,
    /// Index of the oldest entry.
    head: usize,
    /// Number of queued entries.
    len: usize,
}

impl ReadyQueue {
    /// Create an empty queue holding at most `capacity` handles.
    pub fn new(capacity: usize) -> Self {
        ReadyQueue {
            slots: vec![None; capacity],
            head: 0,
            len: 0,
        }
    }

    /// Add a process to the end of the queue.
    pub fn push(&mut self, pid: Pid) -> Result<(), QueueFull> {
        if self.len == self.capacity() {
            return Err(QueueFull);
        }
        let tail = self.index(self.len);
        self.slots[tail] = Some(pid);
        self.len += 1;
        Ok(())
    }

    /// Remove and return the process at the front of the queue.
    pub fn pop(&mut self) -> Option<Pid> {
        if self.len == 0 {
            return None;
        }
        let pid = self.slots[self.head].take();
        self.head = self.index(1);
        self.len -= 1;
        pid
    }

    /// Peek at the process at the front without removing it.
    pub fn peek(&self) -> Option<Pid> {
        if self.len == 0 {
            None
        } else {
            self.slots[self.head]
        }
    }

    /// Remove a specific process, keeping the order of the others.
    pub fn remove(&mut self, pid: Pid) -> bool {
        let Some(pos) = self.iter().position(|p| p == pid) else {
            return false;
        };
        for i in pos..self.len - 1 {
            let (dst, src) = (self.index(i), self.index(i + 1));
            self.slots[dst] = self.slots[src];
        }
        let last = self.index(self.len - 1);
        self.slots[last] = None;
        self.len -= 1;
        true
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.iter().any(|p| p == pid)
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Queued handles from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = Pid> + '_ {
        (0..self.len).filter_map(move |i| self.slots[self.index(i)])
    }

    /// Ring index of the `offset`-th entry after the head.
    fn index(&self, offset: usize) -> usize {
        (self.head + offset) % self.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(slot: usize) -> Pid {
        Pid::new(slot, 1)
    }

    #[test]
    fn test_fifo_order() {
        let mut q = ReadyQueue::new(4);
        assert!(q.is_empty());
        assert_eq!(q.pop(), None);

        for s in 0..3 {
            q.push(pid(s)).unwrap();
        }
        assert_eq!(q.peek(), Some(pid(0)));
        assert_eq!(q.pop(), Some(pid(0)));
        assert_eq!(q.pop(), Some(pid(1)));
        assert_eq!(q.pop(), Some(pid(2)));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn test_push_on_full_queue_is_refused() {
        let mut q = ReadyQueue::new(2);
        q.push(pid(0)).unwrap();
        q.push(pid(1)).unwrap();
        assert!(q.is_full());
        assert_eq!(q.push(pid(2)), Err(QueueFull));
        assert_eq!(q.len(), 2);
        assert_eq!(q.iter().collect::<Vec<_>>(), [pid(0), pid(1)]);
    }

    #[test]
    fn test_wraparound() {
        let mut q = ReadyQueue::new(3);
        for round in 0..10 {
            q.push(pid(round)).unwrap();
            q.push(pid(round + 100)).unwrap();
            assert_eq!(q.pop(), Some(pid(round)));
            assert_eq!(q.pop(), Some(pid(round + 100)));
        }
        assert!(q.is_empty());
    }

    #[test]
    fn test_remove_keeps_order_across_wrap() {
        let mut q = ReadyQueue::new(4);
        // Move the head so the live entries straddle the end of the ring.
        q.push(pid(9)).unwrap();
        q.push(pid(9)).unwrap();
        q.pop();
        q.pop();
        for s in 0..4 {
            q.push(pid(s)).unwrap();
        }
        assert!(q.remove(pid(1)));
        assert!(!q.remove(pid(1)));
        assert_eq!(q.iter().collect::<Vec<_>>(), [pid(0), pid(2), pid(3)]);
        q.push(pid(4)).unwrap();
        assert_eq!(q.iter().collect::<Vec<_>>(), [pid(0), pid(2), pid(3), pid(4)]);
        assert!(q.contains(pid(4)));
    }

    #[test]
    fn test_distinguishes_generations() {
        let mut q = ReadyQueue::new(2);
        q.push(Pid::new(0, 1)).unwrap();
        assert!(!q.contains(Pid::new(0, 2)));
        assert!(!q.remove(Pid::new(0, 2)));
        assert_eq!(q.len(), 1);
    }
}
