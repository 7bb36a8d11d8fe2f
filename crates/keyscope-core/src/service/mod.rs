//! Business logic services (use cases).
//!
//! Services orchestrate store calls and input validation. They depend on the
//! store trait (port) -- never on concrete infrastructure implementations.

pub mod console;
