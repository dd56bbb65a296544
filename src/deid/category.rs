//! Pseudonym categories and replacement value generation
//!
//! Replacement values are generated with the `fake` crate, but seeded from a
//! SHA-256 hash of (category label, original value). The same original value
//! therefore always maps to the same replacement, in any call order and
//! across separate runs, without a persisted mapping table.

use fake::faker::{address, internet, name, phone_number};
use fake::Fake;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Category of identifying value a pseudonym replaces
///
/// The category determines the shape of the generated replacement: a
/// `GivenName` looks like a first name, an `AddressLine` looks like a street
/// address, and so on. The category is also half of the cache key, so the
/// same original string pseudonymized as a city and as a family name yields
/// two independent replacements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PseudonymCategory {
    /// First/middle name parts
    GivenName,
    /// Family name parts
    FamilyName,
    /// Full display names ("Dr. Jane Smith" on a reference label)
    PersonName,
    /// Street address lines
    AddressLine,
    /// City names
    CityName,
    /// Postal/ZIP codes
    PostalCode,
    /// Telephone numbers
    Phone,
    /// E-mail addresses
    Email,
    /// Organization and facility names
    OrganizationName,
}

impl PseudonymCategory {
    /// Stable label used in cache keys, seeds, and audit output
    pub fn label(&self) -> &'static str {
        match self {
            Self::GivenName => "given-name",
            Self::FamilyName => "family-name",
            Self::PersonName => "person-name",
            Self::AddressLine => "address-line",
            Self::CityName => "city-name",
            Self::PostalCode => "postal-code",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::OrganizationName => "organization-name",
        }
    }

    /// Generate a replacement value shaped like this category
    ///
    /// Deterministic: the RNG is seeded from the category label and the
    /// original value, never from entropy.
    pub(crate) fn generate(&self, original: &str) -> String {
        let mut rng = seeded_rng(self.label(), original);
        match self {
            Self::GivenName => name::en::FirstName().fake_with_rng(&mut rng),
            Self::FamilyName => name::en::LastName().fake_with_rng(&mut rng),
            Self::PersonName => {
                let given: String = name::en::FirstName().fake_with_rng(&mut rng);
                let family: String = name::en::LastName().fake_with_rng(&mut rng);
                format!("{given} {family}")
            }
            Self::AddressLine => {
                let number: String = address::en::BuildingNumber().fake_with_rng(&mut rng);
                let street: String = address::en::StreetName().fake_with_rng(&mut rng);
                format!("{number} {street}")
            }
            Self::CityName => address::en::CityName().fake_with_rng(&mut rng),
            Self::PostalCode => address::en::ZipCode().fake_with_rng(&mut rng),
            Self::Phone => phone_number::en::PhoneNumber().fake_with_rng(&mut rng),
            Self::Email => internet::en::SafeEmail().fake_with_rng(&mut rng),
            Self::OrganizationName => {
                let city: String = address::en::CityName().fake_with_rng(&mut rng);
                format!("{city} Medical Center")
            }
        }
    }
}

/// RNG seeded from SHA-256 of `label:original`
fn seeded_rng(label: &str, original: &str) -> StdRng {
    let mut hasher = Sha256::new();
    hasher.update(label.as_bytes());
    hasher.update(b":");
    hasher.update(original.as_bytes());
    StdRng::from_seed(hasher.finalize().into())
}
