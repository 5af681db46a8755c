pub mod report;
pub mod reverse;
pub mod schedule;
pub mod tax;
pub mod validation;
