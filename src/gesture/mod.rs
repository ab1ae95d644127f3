pub mod action;
pub mod actions;
pub mod dispatcher;
pub mod hand;
pub mod script;
pub mod simulated;

pub use action::{Action, ActionContext, HandSlot};
pub use dispatcher::{DispatchReport, Dispatcher, TrackingState};
pub use hand::{classify, summarize, Gesture, HandLandmarks, HandSummary, Handedness};
pub use script::{GestureScript, ScriptFrame, ScriptedHand};
pub use simulated::{SimKey, SimulatedHands};
