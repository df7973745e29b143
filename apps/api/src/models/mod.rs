pub mod diagnosis;
pub mod document;
pub mod session;
