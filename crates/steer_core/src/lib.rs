//! # steer_core - Bot AI Core Primitives
//!
//! Zero-dependency identifiers shared by the AI core and any engine adapter
//! that hosts it:
//! - [`EntityId`]: generational handle to an entity owned by the host world
//! - [`Tag`]: hashed name used to classify entities (e.g. `"player"`)

pub mod id;
pub mod tag;

pub use id::*;
pub use tag::*;
