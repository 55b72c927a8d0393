//! Abstract syntax tree module for the compiler front end.
//!
//! This module contains the node arena and the kinds of nodes the parser
//! produces, the dual-stack node builder the parser drives, and the
//! datatype representation for declarations. It handles:
//!
//! - Index-based node storage so nodes can reference each other cheaply
//! - The working/result stacks used while assembling trees
//! - Datatype flags, primitive sizes and pointer depth

pub mod builder;
pub mod datatype;
pub mod node;
