//! Travel assistant adapters. OpenAI-compatible chat completions plus a mock
//! used when no API key is configured.

pub mod mock_adapter;
pub mod nim_adapter;

pub use mock_adapter::MockAssistant;
pub use nim_adapter::NimAdapter;
