//! Analysis Engine Adapters

mod http_engine;
mod stub_engine;

pub use http_engine::{HttpAnalysisEngine, HttpAnalysisEngineConfig};
pub use stub_engine::{StubAnalysisEngine, StubAnalysisEngineConfig};
