// src/domain/mod.rs
pub mod basket;
pub mod core;
pub mod events;
pub mod lots;
pub mod observable;
pub mod orders;

pub use self::basket::*;
pub use self::core::*;
pub use self::events::*;
pub use self::lots::*;
pub use self::observable::*;
pub use self::orders::*;
