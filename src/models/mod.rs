pub mod appointment;
pub mod department;
pub mod enums;
pub mod patient;
pub mod session;

pub use appointment::Appointment;
pub use department::{find_department, Department, DEPARTMENTS};
pub use enums::AppointmentStatus;
pub use patient::{Patient, PatientUpdate};
pub use session::Session;
