#![deny(warnings)]

pub mod config;
pub mod consistency;
pub mod schema;
pub mod util;
pub mod validate;

#[cfg(test)]
mod fixtures;

pub use consistency::{check_consistency, ConsistencyWarning, WarningKind};
pub use validate::{
    parse_payload, validate_dimension, validate_dimension_with, validate_payload,
    validate_payload_with, validate_report, validate_report_with, ReportError, ValidationErrors,
    Violation, ViolationKind,
};
