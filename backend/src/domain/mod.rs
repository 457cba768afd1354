// Domain layer - sessions, enrollments, courses and their value objects
// No dependencies on other layers

pub mod entities;
pub mod value_objects;
