//! Teacher id → name directory.
//!
//! The upstream site treats the teacher roster as effectively static, so the
//! full table is bootstrapped once per process and shared by reference for
//! the remaining lifetime.

mod directory;

pub use directory::TeacherDirectory;
