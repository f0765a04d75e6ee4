pub mod encounter;
pub mod member;
pub mod presence;
pub mod unit;
pub mod unit_counselor;
pub mod user;
