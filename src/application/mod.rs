//! Application layer
//!
//! Use cases that sit between the HTTP adapter and the invoice domain service.
//! They turn loosely typed commands into domain input and domain records into
//! response DTOs.

pub mod invoice;
