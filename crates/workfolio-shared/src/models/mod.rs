mod education;
mod experience;
mod user;

pub use education::*;
pub use experience::*;
pub use user::*;
