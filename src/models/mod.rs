// Re-export all model types
pub use self::dish::*;
pub use self::enums::*;
pub use self::errors::*;
pub use self::feedback::*;
pub use self::validation::*;

mod dish;
mod enums;
mod errors;
mod feedback;
mod validation;
