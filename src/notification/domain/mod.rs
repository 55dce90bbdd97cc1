//! Domain values for outbound email.

mod email;

pub use email::{is_valid_email, EmailMessage, EmailValidationError};
