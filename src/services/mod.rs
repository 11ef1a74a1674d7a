//! Business logic services.

pub mod avatar;
pub mod faculty;
pub mod roll_call;
pub mod storage;
pub mod student;

pub use avatar::AvatarService;
pub use faculty::FacultyService;
pub use roll_call::{ConsoleRollCall, RollCall};
pub use storage::AvatarStorage;
pub use student::StudentService;
