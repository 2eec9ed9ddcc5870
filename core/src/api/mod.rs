//! Endpoint operations, one module per API area.
//!
//! Each function takes the client as its first argument, assembles the query
//! for one remote operation and returns the executor's result untouched.

pub mod domains;
pub mod geo;
pub mod groups;
pub mod hostnames;
pub mod records;
pub mod xfr;
