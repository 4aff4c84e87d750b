pub mod bridge;
pub mod orchestrator;

pub use bridge::UiBridge;
pub use orchestrator::Orchestrator;
