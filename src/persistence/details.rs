//! Contact details captured once per profile

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// A required field of the details form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailsField {
    Name,
    Email,
    Phone,
}

impl DetailsField {
    pub const ALL: [DetailsField; 3] = [DetailsField::Name, DetailsField::Email, DetailsField::Phone];

    /// Form input id
    pub fn input_id(&self) -> &'static str {
        match self {
            DetailsField::Name => "we-name",
            DetailsField::Email => "we-email",
            DetailsField::Phone => "we-phone",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DetailsField::Name => "Name",
            DetailsField::Email => "Email",
            DetailsField::Phone => "Phone",
        }
    }
}

impl fmt::Display for DetailsField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl UserDetails {
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    pub fn field(&self, field: DetailsField) -> &str {
        match field {
            DetailsField::Name => &self.name,
            DetailsField::Email => &self.email,
            DetailsField::Phone => &self.phone,
        }
    }

    /// Trim every field and reject the first one left empty
    pub fn validate(&self) -> Result<UserDetails> {
        if let Some(missing) = DetailsField::ALL
            .into_iter()
            .find(|&f| self.field(f).trim().is_empty())
        {
            return Err(GameError::InvalidDetails(missing));
        }

        Ok(UserDetails::new(
            self.name.trim(),
            self.email.trim(),
            self.phone.trim(),
        ))
    }
}
