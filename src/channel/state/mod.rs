//! Channel lifecycle states
//!
//! This module defines the channel lifecycle as a state machine with four discrete states:
//! - Open: Channel is active and can process transfers
//! - Disputed: A signed state claim has been posted and the dispute window is running
//! - Settling: Channel was cooperatively closed, awaiting settlement confirmation
//! - Closed: Channel is permanently closed, no further transitions allowed
//!
//! Each state is represented by a separate type that enforces its invariants.

use serde::{Deserialize, Serialize};

pub mod closed;
pub mod disputed;
pub mod open;
pub mod settling;

pub use closed::{CloseReason, Closed};
pub use disputed::{Disputed, DisputedParams};
pub use open::Open;
pub use settling::Settling;

/// Channel lifecycle enum
///
/// This enum tags snapshots with the state machine position. At runtime,
/// use the concrete state types (Open, Disputed, Settling, Closed).
///
/// State transitions:
/// - Open → Open (via transfer transition)
/// - Open → Settling (via cooperative_close transition)
/// - Settling → Closed (via settlement confirmation)
/// - Open → Disputed (via dispute transition)
/// - Disputed → Disputed (via dispute update with a higher-nonce claim)
/// - Disputed → Closed (via dispute timeout, once the window elapses)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelLifecycle {
    /// Channel is active and can process transfers
    Open,
    /// Channel is under dispute, waiting for the window to elapse
    Disputed,
    /// Channel was cooperatively closed, awaiting settlement confirmation
    Settling,
    /// Channel is permanently closed, no further transitions allowed
    Closed,
}
