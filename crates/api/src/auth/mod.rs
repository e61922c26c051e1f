//! Authentication building blocks (JWT claims and validation).

pub mod jwt;
