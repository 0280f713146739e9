//! Data models for randomuser.me records.
//!
//! - `UserRecord`: one generated user with name, contact, location and pictures
//! - `UsersResponse`: the API envelope carrying the `results` array
//! - `RecordId`: stable position of a record in the loaded list

pub mod user;

pub use user::{
    Dob, Location, Name, Picture, RecordId, ResponseInfo, Street, UserRecord,
    UsersResponse,
};
