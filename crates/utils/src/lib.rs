pub mod token;
pub mod path;
pub mod size;

pub use token::*;
pub use path::*;
pub use size::*;
