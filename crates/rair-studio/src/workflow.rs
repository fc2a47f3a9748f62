//! Navigation requests raised by the offer step, drained by the app each frame.

use std::sync::{Arc, Mutex};

use rair_offers_core::{ChainInfo, WorkflowPort};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationRequests {
    pub next_steps: usize,
    pub switch_to: Option<&'static ChainInfo>,
    pub step_number: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct WorkflowSignals {
    pending: Arc<Mutex<NavigationRequests>>,
}

impl WorkflowSignals {
    pub fn drain(&self) -> NavigationRequests {
        self.pending
            .lock()
            .map(|mut g| std::mem::take(&mut *g))
            .unwrap_or_default()
    }
}

impl WorkflowPort for WorkflowSignals {
    fn goto_next_step(&self) {
        if let Ok(mut g) = self.pending.lock() {
            g.next_steps += 1;
        }
    }

    fn switch_blockchain(&self, chain: &ChainInfo) {
        if let Ok(mut g) = self.pending.lock() {
            g.switch_to = rair_offers_core::chain_info(chain.key);
        }
    }

    fn set_step_number(&self, step_number: usize) {
        if let Ok(mut g) = self.pending.lock() {
            g.step_number = Some(step_number);
        }
    }
}
