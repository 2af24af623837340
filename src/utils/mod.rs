pub mod geo;
pub mod token_store;
pub mod validate;
