mod submissions;

pub use submissions::{NewSubmission, Submission, SubmissionRepo};
