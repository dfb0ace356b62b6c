pub mod cart;
pub mod gateway;
pub mod rails;
