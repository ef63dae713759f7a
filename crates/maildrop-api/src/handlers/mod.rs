pub mod admin;
pub mod contact;
