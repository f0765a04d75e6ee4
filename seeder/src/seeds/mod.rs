pub mod encounter;
pub mod member;
pub mod unit;
pub mod unit_counselor;
pub mod user;
