//! SOS alert endpoints. Alert handling is simulated: no alert rows are
//! persisted and no real dispatch happens, but the caller and their
//! emergency contacts are resolved from the stores.

pub mod handlers;
