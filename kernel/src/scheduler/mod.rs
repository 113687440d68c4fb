//! Kernel scheduler module.
//!
//! A cooperative round-robin scheduler over a fixed-size process table.
//! Nothing here runs on a timer: every scheduling step is an explicit
//! [`Scheduler::tick`] call, made by the polling loop or, when
//! `step_on_mutation` is set, by `create` and `kill` themselves.
//!
//! "Running" a process for one step means charging it one unit of work and
//! one unit of quantum. There is no machine context to switch.

pub mod round_robin;

use alloc::vec::Vec;

use crate::config::{KernelConfig, QuantumPolicy};
use crate::console::Console;
use crate::error::ProcessError;
use crate::process::{Pcb, Pid, ProcessInfo, ProcessState, ProcessTable};

pub use round_robin::ReadyQueue;

/// What a scheduling step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// No process to run.
    Idle,
    /// The current process was charged one unit and keeps the CPU.
    Continued(Pid),
    /// The CPU was idle and this process was dispatched.
    Dispatched(Pid),
    /// The current process finished; `next` was dispatched in its place.
    Terminated { pid: Pid, next: Option<Pid> },
    /// The current process used up its quantum and was requeued.
    Preempted { pid: Pid, next: Option<Pid> },
}

/// Process table, ready queue and the current process, owned together.
pub struct Scheduler {
    table: ProcessTable,
    ready: ReadyQueue,
    /// The Running process, if any.
    current: Option<Pid>,
    default_quantum: i32,
    quantum_policy: QuantumPolicy,
    step_on_mutation: bool,
    /// Scheduling steps taken since boot.
    ticks: u64,
}

impl Scheduler {
    /// Create a scheduler with an empty table and queue.
    pub fn new(config: &KernelConfig) -> Self {
        log::info!(
            "scheduler: {} slots, queue {}, quantum {}, policy {:?}",
            config.max_processes,
            config.queue_capacity(),
            config.default_quantum,
            config.quantum_policy
        );
        Scheduler {
            table: ProcessTable::new(config.max_processes, config.max_name_len),
            ready: ReadyQueue::new(config.queue_capacity()),
            current: None,
            default_quantum: config.default_quantum,
            quantum_policy: config.quantum_policy,
            step_on_mutation: config.step_on_mutation,
            ticks: 0,
        }
    }

    /// Create a Ready process and queue it.
    ///
    /// With `step_on_mutation`, one scheduling step runs before returning,
    /// so the new process may already be Running.
    pub fn create(
        &mut self,
        name: &str,
        work_units: i32,
        out: &mut dyn Console,
    ) -> Result<Pid, ProcessError> {
        let quantum = match self.quantum_policy {
            QuantumPolicy::Clamped => work_units.min(self.default_quantum),
            QuantumPolicy::Verbatim => work_units,
        };
        if self.table.count_active() == self.table.capacity() {
            return Err(ProcessError::TableFull);
        }
        // A refused create leaves the table untouched.
        if self.ready.is_full() {
            log::warn!("scheduler: admission of '{}' refused: ready queue full", name);
            return Err(ProcessError::AdmissionFailure);
        }
        let pid = self.table.allocate(name, work_units, quantum)?;
        self.ready.push(pid)?;
        log::debug!("scheduler: created '{}' as pid {:?}, work {}", name, pid, work_units);

        if self.step_on_mutation {
            self.tick(out);
        }
        Ok(pid)
    }

    /// Terminate a process.
    ///
    /// Killing the current process frees the CPU and, with
    /// `step_on_mutation`, runs one scheduling step.
    pub fn kill(&mut self, pid: Pid, out: &mut dyn Console) -> Result<(), ProcessError> {
        let pcb = self
            .table
            .get_mut(pid)
            .filter(|p| p.is_alive())
            .ok_or(ProcessError::InvalidHandle)?;
        pcb.terminate();
        self.ready.remove(pid);
        log::debug!("scheduler: killed pid {:?}", pid);

        if self.current == Some(pid) {
            self.current = None;
            if self.step_on_mutation {
                self.tick(out);
            }
        }
        Ok(())
    }

    /// Run one scheduling step.
    pub fn tick(&mut self, out: &mut dyn Console) -> Step {
        self.ticks += 1;

        let mut finished = None;
        let mut preempted = None;

        if let Some(pid) = self.current {
            let default_quantum = self.default_quantum;
            let Some(pcb) = self.table.get_mut(pid) else {
                // Unreachable while kill() clears `current`; recover anyway.
                log::error!("scheduler: current pid {:?} vanished", pid);
                self.current = None;
                return self.dispatch(out).map_or(Step::Idle, Step::Dispatched);
            };

            if pcb.work_remaining <= 0 {
                pcb.terminate();
                crate::console_println!(out, "Process terminated: {}", pcb.name());
                log::debug!("scheduler: pid {:?} finished", pid);
                self.current = None;
                finished = Some(pid);
            } else if pcb.quantum_remaining <= 0 {
                pcb.quantum_remaining = default_quantum;
                pcb.state = ProcessState::Ready;
                log::trace!("scheduler: pid {:?} quantum expired", pid);
                self.current = None;

                if self.ready.is_full() {
                    // Hand the CPU to the head first; that frees the cell
                    // the preempted process goes into.
                    let next = self.dispatch(out);
                    self.requeue(pid);
                    return Step::Preempted { pid, next };
                }
                self.requeue(pid);
                preempted = Some(pid);
            } else {
                pcb.quantum_remaining -= 1;
                pcb.work_remaining -= 1;
                return Step::Continued(pid);
            }
        }

        let next = self.dispatch(out);
        match (finished, preempted) {
            (Some(pid), _) => Step::Terminated { pid, next },
            (None, Some(pid)) => Step::Preempted { pid, next },
            (None, None) => next.map_or(Step::Idle, Step::Dispatched),
        }
    }

    /// Put a preempted process at the tail of the ready queue.
    fn requeue(&mut self, pid: Pid) {
        if self.ready.push(pid).is_ok() {
            return;
        }
        // Only a zero-capacity queue gets here, and config rejects those.
        log::error!("scheduler: no room to requeue pid {:?}, it keeps the CPU", pid);
        if let Some(pcb) = self.table.get_mut(pid) {
            pcb.state = ProcessState::Running;
            self.current = Some(pid);
        }
    }

    /// Hand the idle CPU to the head of the ready queue.
    fn dispatch(&mut self, out: &mut dyn Console) -> Option<Pid> {
        while let Some(pid) = self.ready.pop() {
            let Some(pcb) = self.table.get_mut(pid).filter(|p| p.is_alive()) else {
                log::warn!("scheduler: dropping dead pid {:?} from ready queue", pid);
                continue;
            };
            pcb.state = ProcessState::Running;
            crate::console_println!(out, "Running process: {}", pcb.name());
            self.current = Some(pid);
            return Some(pid);
        }
        None
    }

    pub fn is_alive(&self, pid: Pid) -> bool {
        self.table.is_alive(pid)
    }

    pub fn count_active(&self) -> usize {
        self.table.count_active()
    }

    /// The Running process, if any.
    pub fn current(&self) -> Option<Pid> {
        self.current
    }

    /// Resolve a slot number to the live process occupying it.
    pub fn pid_at(&self, slot: usize) -> Option<Pid> {
        self.table.pid_at(slot)
    }

    pub fn get(&self, pid: Pid) -> Option<&Pcb> {
        self.table.get(pid)
    }

    pub fn table(&self) -> &ProcessTable {
        &self.table
    }

    pub fn ready_queue(&self) -> &ReadyQueue {
        &self.ready
    }

    pub fn default_quantum(&self) -> i32 {
        self.default_quantum
    }

    /// Scheduling steps taken since boot.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Current process first, then every other live process in table order.
    pub fn snapshot(&self) -> Vec<ProcessInfo> {
        let current = self.current.and_then(|pid| self.table.get(pid));
        current
            .into_iter()
            .chain(self.table.iter().filter(|p| Some(p.pid()) != self.current))
            .map(ProcessInfo::from)
            .collect()
    }
}
