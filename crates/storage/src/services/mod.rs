pub mod engagement;
pub mod scoring;
pub mod validation;
