//! One spinner line per showcase entry that is still resolving.

use std::collections::HashMap;
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

const TICK: Duration = Duration::from_millis(100);

/// A fixed pool of spinner lines, claimed and released by entry index.
pub(crate) struct SpinnerPool {
    _mp: MultiProgress,
    spinners: Vec<ProgressBar>,
    slot_assignments: HashMap<usize, usize>,
    free_slots: Vec<usize>,
}

impl SpinnerPool {
    /// Create a pool with `n` lines. All lines are hidden when `quiet`.
    pub(crate) fn new(n: usize, quiet: bool) -> Self {
        let mp = if quiet {
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
        } else {
            MultiProgress::new()
        };

        let style = ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .expect("static pattern")
            .tick_chars("/-\\|");

        let spinners = (0..n)
            .map(|_| {
                let pb = mp.add(ProgressBar::new_spinner());
                pb.set_style(style.clone());
                pb
            })
            .collect();

        Self {
            _mp: mp,
            spinners,
            slot_assignments: HashMap::new(),
            free_slots: (0..n).rev().collect(),
        }
    }

    /// Start a spinner for entry `key`. No-op when the pool is exhausted.
    pub(crate) fn claim(&mut self, key: usize, msg: String) {
        if let Some(slot) = self.free_slots.pop() {
            let pb = &self.spinners[slot];
            pb.reset();
            pb.enable_steady_tick(TICK);
            pb.set_message(msg);
            self.slot_assignments.insert(key, slot);
        }
    }

    pub(crate) fn update(&self, key: usize, msg: String) {
        if let Some(&slot) = self.slot_assignments.get(&key) {
            self.spinners[slot].set_message(msg);
        }
    }

    /// Stop and clear the spinner for `key`, returning its line to the pool.
    pub(crate) fn release(&mut self, key: usize) {
        if let Some(slot) = self.slot_assignments.remove(&key) {
            let pb = &self.spinners[slot];
            pb.disable_steady_tick();
            pb.set_message("");
            pb.finish_and_clear();
            self.free_slots.push(slot);
        }
    }

    pub(crate) fn clear_all(&mut self) {
        for pb in &self.spinners {
            pb.disable_steady_tick();
            pb.finish_and_clear();
        }
        self.slot_assignments.clear();
        self.free_slots = (0..self.spinners.len()).rev().collect();
    }
}
