pub mod workflow;

pub use workflow::{ActionPayload, WorkflowService};
