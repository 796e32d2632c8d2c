//! src/domain/submission.rs

/// Message returned to the client when a required field is missing.
pub const INVALID_INPUT: &str = "invalid input";

/// One contact-form entry.
///
/// Values built through [`Submission::parse`] always have four non-empty
/// fields. Records read back from the backing file are taken as they were
/// written.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Submission {
    first_name: String,
    last_name: String,
    email: String,
    phone_number: String,
}

impl Submission {
    pub fn parse(
        first_name: String,
        last_name: String,
        email: String,
        phone_number: String,
    ) -> Result<Submission, String> {
        // only emptiness is checked, the email is stored as typed.
        let any_missing = [&first_name, &last_name, &email, &phone_number]
            .iter()
            .any(|field| field.is_empty());

        if any_missing {
            return Err(INVALID_INPUT.to_string());
        }

        Ok(Self {
            first_name,
            last_name,
            email,
            phone_number,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }
}
