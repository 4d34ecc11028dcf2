pub mod course;
pub mod enrollment;
pub mod news;
pub mod user;

pub use course::*;
pub use enrollment::*;
pub use news::*;
pub use user::*;
