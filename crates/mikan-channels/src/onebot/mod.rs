pub mod convert;
pub mod identity;
pub mod wire;
