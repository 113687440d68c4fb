//! Process Table
//!
//! Fixed-size table of process control blocks. A process lives in the slot
//! it was allocated and its [`Pid`] carries that slot index, so lookup is a
//! bounds check plus a generation compare.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::error::ProcessError;
use crate::text;

/// Process ID type.
///
/// `slot` is the table index; `generation` counts how many times the slot
/// has been allocated, so a handle kept across a kill and a reallocation of
/// the same slot no longer resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pid {
    slot: usize,
    generation: u32,
}

impl Pid {
    /// Create a Pid from its parts.
    pub const fn new(slot: usize, generation: u32) -> Self {
        Pid { slot, generation }
    }

    /// Table index of the process.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Allocation count of the slot when this handle was issued.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Prints the slot number, which is what the operator types at the shell.
impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slot)
    }
}

/// Process state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    /// Process is waiting in the ready queue
    Ready,
    /// Process owns the CPU
    Running,
    /// Process has finished or was killed; the slot is free
    Terminated,
}

impl ProcessState {
    /// Label used by `ps`.
    pub fn as_str(self) -> &'static str {
        match self {
            ProcessState::Ready => "READY",
            ProcessState::Running => "RUNNING",
            ProcessState::Terminated => "TERMINATED",
        }
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Process control block.
#[derive(Debug, Clone)]
pub struct Pcb {
    pid: Pid,
    name: String,
    pub(crate) state: ProcessState,
    /// Time units left in the current slice.
    pub(crate) quantum_remaining: i32,
    /// Time units left before the process completes.
    pub(crate) work_remaining: i32,
}

impl Pcb {
    fn unused(slot: usize) -> Self {
        Self {
            pid: Pid::new(slot, 0),
            name: String::new(),
            state: ProcessState::Terminated,
            quantum_remaining: 0,
            work_remaining: 0,
        }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn quantum_remaining(&self) -> i32 {
        self.quantum_remaining
    }

    pub fn work_remaining(&self) -> i32 {
        self.work_remaining
    }

    pub fn is_alive(&self) -> bool {
        self.state != ProcessState::Terminated
    }

    /// Force the process into `Terminated`; its slot becomes free.
    pub(crate) fn terminate(&mut self) {
        self.state = ProcessState::Terminated;
        self.work_remaining = 0;
    }
}

/// Lightweight snapshot of a process (for `ps` and other reports).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInfo {
    pub pid: Pid,
    pub name: String,
    pub state: ProcessState,
    pub work_remaining: i32,
}

impl From<&Pcb> for ProcessInfo {
    fn from(pcb: &Pcb) -> Self {
        ProcessInfo {
            pid: pcb.pid,
            name: pcb.name.clone(),
            state: pcb.state,
            work_remaining: pcb.work_remaining,
        }
    }
}

/// Fixed-size process table.
pub struct ProcessTable {
    slots: Vec<Pcb>,
    max_name_len: usize,
}

impl ProcessTable {
    /// Create a table of `capacity` unused slots.
    pub fn new(capacity: usize, max_name_len: usize) -> Self {
        Self {
            slots: (0..capacity).map(Pcb::unused).collect(),
            max_name_len,
        }
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Claim the lowest free slot for a new Ready process.
    pub fn allocate(
        &mut self,
        name: &str,
        work_units: i32,
        quantum: i32,
    ) -> Result<Pid, ProcessError> {
        let max_name_len = self.max_name_len;
        let pcb = self
            .slots
            .iter_mut()
            .find(|p| !p.is_alive())
            .ok_or(ProcessError::TableFull)?;

        pcb.pid = Pid::new(pcb.pid.slot, pcb.pid.generation.wrapping_add(1));
        pcb.name.clear();
        pcb.name.push_str(text::truncate(name, max_name_len));
        pcb.state = ProcessState::Ready;
        pcb.quantum_remaining = quantum;
        pcb.work_remaining = work_units;
        Ok(pcb.pid)
    }

    /// Look up a process by handle. Terminated processes still resolve
    /// until their slot is reallocated.
    pub fn get(&self, pid: Pid) -> Option<&Pcb> {
        self.slots
            .get(pid.slot)
            .filter(|p| p.pid.generation == pid.generation)
    }

    pub(crate) fn get_mut(&mut self, pid: Pid) -> Option<&mut Pcb> {
        self.slots
            .get_mut(pid.slot)
            .filter(|p| p.pid.generation == pid.generation)
    }

    /// Handle of the live process occupying `slot`, if any.
    pub fn pid_at(&self, slot: usize) -> Option<Pid> {
        self.slots
            .get(slot)
            .filter(|p| p.is_alive())
            .map(|p| p.pid)
    }

    /// False for out-of-range, stale or terminated handles.
    pub fn is_alive(&self, pid: Pid) -> bool {
        self.get(pid).map_or(false, Pcb::is_alive)
    }

    /// Number of live processes.
    pub fn count_active(&self) -> usize {
        self.slots.iter().filter(|p| p.is_alive()).count()
    }

    /// Live processes in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Pcb> {
        self.slots.iter().filter(|p| p.is_alive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_lowest_free_slot() {
        let mut table = ProcessTable::new(4, 31);
        let a = table.allocate("a", 3, 3).unwrap();
        let b = table.allocate("b", 3, 3).unwrap();
        assert_eq!((a.slot(), b.slot()), (0, 1));

        table.get_mut(a).unwrap().terminate();
        let c = table.allocate("c", 1, 1).unwrap();
        assert_eq!(c.slot(), 0);
        assert_ne!(c, a);
        assert_eq!(c.generation(), a.generation() + 1);
    }

    #[test]
    fn test_full_table_is_unchanged_on_failure() {
        let mut table = ProcessTable::new(2, 31);
        table.allocate("a", 1, 1).unwrap();
        table.allocate("b", 1, 1).unwrap();
        assert_eq!(table.allocate("c", 1, 1), Err(ProcessError::TableFull));
        assert_eq!(table.count_active(), 2);
        let names: Vec<&str> = table.iter().map(Pcb::name).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_stale_handle_does_not_resolve() {
        let mut table = ProcessTable::new(1, 31);
        let old = table.allocate("old", 5, 5).unwrap();
        table.get_mut(old).unwrap().terminate();
        assert!(!table.is_alive(old));
        // Still visible as terminated until the slot is reused.
        assert_eq!(table.get(old).map(Pcb::state), Some(ProcessState::Terminated));

        let new = table.allocate("new", 5, 5).unwrap();
        assert!(table.get(old).is_none());
        assert!(!table.is_alive(old));
        assert!(table.is_alive(new));
        assert_eq!(table.pid_at(0), Some(new));
    }

    #[test]
    fn test_out_of_range_handle() {
        let table = ProcessTable::new(2, 31);
        assert!(table.get(Pid::new(7, 1)).is_none());
        assert!(!table.is_alive(Pid::new(7, 1)));
        assert_eq!(table.pid_at(7), None);
        // Never-used slots are not alive either.
        assert_eq!(table.pid_at(0), None);
        assert_eq!(table.count_active(), 0);
    }

    #[test]
    fn test_name_is_truncated() {
        let mut table = ProcessTable::new(1, 4);
        let pid = table.allocate("longname", 1, 1).unwrap();
        assert_eq!(table.get(pid).unwrap().name(), "long");
    }

    #[test]
    fn test_terminate_zeroes_work() {
        let mut table = ProcessTable::new(1, 31);
        let pid = table.allocate("a", 9, 5).unwrap();
        let pcb = table.get_mut(pid).unwrap();
        pcb.terminate();
        assert_eq!(pcb.work_remaining(), 0);
        assert_eq!(pcb.state(), ProcessState::Terminated);
    }

    #[test]
    fn test_pid_display_is_slot() {
        assert_eq!(alloc::format!("{}", Pid::new(3, 9)), "3");
        assert_eq!(ProcessState::Running.as_str(), "RUNNING");
    }
}
