pub mod boxer;
pub mod random;
pub mod registry;
pub mod ring;
