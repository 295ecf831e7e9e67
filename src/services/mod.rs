pub mod admin_service;
pub mod attendance_service;
pub mod auth_service;
pub mod student_service;
