//! Stateless generators for plausible form values.
//!
//! Every generator returns an owned `String`, never fails and is random in value but
//! fixed in shape. Callers must not rely on reproducibility.

pub mod date;
pub mod email;
pub mod name;
pub mod phone;
pub mod snils;

use serde::{Deserialize, Serialize};

pub use date::{generate_date_display, generate_date_only, generate_date_time_local, RecentDate};
pub use email::generate_email;
pub use name::{generate_first_name, generate_last_name, generate_patronymic};
pub use phone::generate_phone;
pub use snils::{generate_snils, snils_checksum};

/// Semantic content category a text field is guessed to hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    LastName,
    FirstName,
    Patronymic,
    Email,
    Phone,
    Snils,
    Date,
    Generic,
}

/// Fallback text for fields nothing more specific is known about.
pub const GENERIC_VALUE: &str = "Test value";

/// Produce a value for the given category.
pub fn generate(kind: ValueKind) -> String {
    match kind {
        ValueKind::LastName => generate_last_name(),
        ValueKind::FirstName => generate_first_name(),
        ValueKind::Patronymic => generate_patronymic(),
        ValueKind::Email => generate_email(),
        ValueKind::Phone => generate_phone(),
        ValueKind::Snils => generate_snils(),
        ValueKind::Date => generate_date_display(),
        ValueKind::Generic => GENERIC_VALUE.to_string(),
    }
}
