pub mod generate_suggestions;

pub use generate_suggestions::{run, JobReport};
