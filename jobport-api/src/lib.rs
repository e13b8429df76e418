//! Jobport API - typed client for the portal's CRUD surfaces
//!
//! The backend serializes rows with Vietnamese column names and
//! inconsistent key casing (`NTDID` vs `ntdID` vs `id`). This crate is the
//! one place that deals with it: every payload shape gets a single
//! explicit parsing/validation step at the client boundary, and the rest
//! of the application only sees the typed models in [`models`]. The same
//! discipline the session store applies to the auth envelope, applied to
//! everything else.

pub mod client;
pub mod models;
pub mod status;

pub use client::PortalClient;
pub use models::{
    CandidateApplication, CandidateProfile, CandidateProfileDraft, EmployerApplication,
    EmployerDraft, EmployerProfile, EmployerStats, Interview, JobDraft, JobPage, JobPosting,
    JobQuery, MonthlyApplications, Notification, StatsOverview,
};
pub use status::{ApplicationStatus, InterviewStatus};
