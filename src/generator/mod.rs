pub mod question;
pub mod random;

pub use question::{Operator, Question};
pub use random::{RandomSource, SeededRandom};
