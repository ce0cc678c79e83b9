pub mod prediction;
pub mod results;
pub mod selection;
