//! Data models for Rosetta API records.
//!
//! These are pass-through DTOs: a few well-known fields are typed, and
//! everything else the API returns is kept in each record's `attributes` map.
//!
//! - `Me`, `Identity`, `Person`, `Account`, `Employee`, `Student`: people data
//! - `Group`, `Organization`, `Role`, `College`, `Major`, `BaseProfile`,
//!   `EmploymentStatus`, `Entitlement`, `StudentAssociation`: reference data
//! - `flexible`: string/object/array normalization for collection fields

pub mod flexible;
pub mod person;
pub mod reference;

pub use flexible::{collect_records, normalize_collection};
pub use person::{Account, Employee, Identity, Me, Person, Student};
pub use reference::{
    BaseProfile, College, EmploymentStatus, Entitlement, Group, Major, Organization, Role,
    StudentAssociation,
};
