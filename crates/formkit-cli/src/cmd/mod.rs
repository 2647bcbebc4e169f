pub mod check;
pub mod demo;
pub mod render;
pub mod serve;
pub mod source;
pub mod validate;
