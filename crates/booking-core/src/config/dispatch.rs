//! Vehicle status dispatch configuration.

use serde::{Deserialize, Serialize};

/// Sizing of the best-effort vehicle status queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Maximum number of queued status updates before new ones are dropped.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Number of failed updates retained for inspection.
    #[serde(default = "default_dead_letter_capacity")]
    pub dead_letter_capacity: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
            dead_letter_capacity: default_dead_letter_capacity(),
        }
    }
}

fn default_queue_capacity() -> usize {
    1024
}

fn default_dead_letter_capacity() -> usize {
    256
}
