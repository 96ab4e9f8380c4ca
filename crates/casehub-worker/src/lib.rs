//! Scheduled background tasks for CaseHub sharing.
//!
//! This crate provides:
//! - A cron scheduler for periodic maintenance tasks
//! - The expired-invite sweep job

pub mod jobs;
pub mod scheduler;

pub use jobs::InviteSweepJob;
pub use scheduler::CronScheduler;
