/// Admin endpoints for managing stored submissions
pub mod admin;
/// Public contact submission endpoint
pub mod contact;
