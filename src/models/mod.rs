mod book;
mod forms;
mod review;

pub use book::{Book, Category};
pub use forms::{Credentials, RegistrationDraft};
pub use review::{Review, Reviewer};
