pub mod check;
pub mod estimate;
pub mod questions;
pub mod run;
pub mod schema;
