// Application layer - use cases organized by persona
// Orchestrates domain logic, depends on domain layer only

pub mod admin;
pub mod instructor;
pub mod ports;
pub mod student;

#[cfg(test)]
pub(crate) mod test_support;
