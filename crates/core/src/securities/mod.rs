//! Securities module - the security directory boundary.
//!
//! Ticker/name search is answered by an external directory behind
//! [`SecurityDirectoryTrait`]; the core only owns query validation and
//! the ticker scheme (symbol + series, e.g. "GMEXICO" + "B").

mod securities_model;
mod securities_service;
mod securities_traits;


pub use securities_model::SecurityProfile;
pub use securities_service::SecurityService;
pub use securities_traits::{SecurityDirectoryTrait, SecurityServiceTrait};
