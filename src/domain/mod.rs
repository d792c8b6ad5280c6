// Domain layer - Core types, failures and policies

pub mod errors;
pub mod model;
pub mod rules;
