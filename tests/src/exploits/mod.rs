//! Attack simulations. Every test here expects the attack to fail.

pub mod forgery;
