//! Reusable view pieces.

mod alert;
mod toast;

pub use alert::Alert;
pub use toast::Toast;
