pub mod attendance_form;
pub mod summary;
