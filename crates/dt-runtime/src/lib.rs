mod conversation_log;
mod engine;
mod interpolate;
mod observer;
mod variables;

pub use conversation_log::ConversationLog;
pub use engine::{ConversationEngine, ConversationEngineOptions, EngineState};
pub use interpolate::{interpolate, placeholder_keys};
pub use observer::{ConversationObserver, NoopObserver, ObserverSet};
pub use variables::VariableStore;
