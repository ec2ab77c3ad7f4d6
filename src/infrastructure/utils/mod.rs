pub mod valid_email;
