//! Types and navigation logic shared by the server and its clients.

pub mod access;
pub mod client;
pub mod navigation;
pub mod protocol;

pub use access::{resolve, AccessContext, AccessState, Destination, EnrollmentLookup, EntryPoints, LookupFailure, Resolution, SessionAccess};
pub use navigation::{ClientIdentity, NavigationOutcome, Navigator};
