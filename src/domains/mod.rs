// Business domains

pub mod accounts;
pub mod meetings;
pub mod reviews;
