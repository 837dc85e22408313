//! Page Components

mod harness;

pub use harness::HarnessPage;
