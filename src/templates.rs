// src/templates.rs
use crate::models::attendance::AttendanceEntry;
use askama::Template;

#[derive(Template)]
#[template(path = "admin_login.html")]
pub struct LoginPage {
    pub error: Option<String>,
    pub success: Option<String>,
}

#[derive(Template)]
#[template(path = "admin_register.html")]
pub struct RegisterPage {
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "attendance.html")]
pub struct AttendancePage<'a> {
    pub selected_date: &'a str,
    pub entries: &'a [AttendanceEntry],
}
