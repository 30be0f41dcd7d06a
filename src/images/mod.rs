pub mod services;

pub use services::{allowed_file, classify, secure_filename};
