pub mod cli;
pub mod errors;
pub mod fees;
pub mod pricing;
pub mod rules;
pub mod store;
pub mod util;
