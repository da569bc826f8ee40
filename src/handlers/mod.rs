//! Request handlers module

pub mod hierarchy;
pub mod oplog;
