pub mod backend;
pub mod collection;
pub mod flows;
pub mod memory;
pub mod notifications;
