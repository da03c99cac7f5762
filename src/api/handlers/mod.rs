pub mod health;
pub mod vehicle;
pub mod customer;
pub mod test_drive;
pub mod blocked_slot;
pub mod submission;
pub mod transaction;
pub mod dashboard;
pub mod cron;
