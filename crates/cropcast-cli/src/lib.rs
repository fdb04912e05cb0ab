//! Library surface for the `cropcast` binary, exposed for integration
//! tests.
pub mod predict;
pub mod train;
