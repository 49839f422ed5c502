pub mod attendance_record;
pub mod attendance_session;
pub mod challenge;
pub mod class;
pub mod department;
pub mod schedule;
pub mod user;
