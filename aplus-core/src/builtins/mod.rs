pub mod function;
pub mod object;
pub mod object_builder;
pub mod promise;
mod resolution;
