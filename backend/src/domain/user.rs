//! User record model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum allowed length for a first name.
pub const FIRST_NAME_MIN: usize = 2;
/// Maximum allowed length for a first name.
pub const FIRST_NAME_MAX: usize = 20;
/// Minimum allowed length for a last name.
pub const LAST_NAME_MIN: usize = 2;
/// Maximum allowed length for a last name.
pub const LAST_NAME_MAX: usize = 20;
/// Minimum allowed length for a biography.
pub const BIOGRAPHY_MIN: usize = 20;
/// Maximum allowed length for a biography.
pub const BIOGRAPHY_MAX: usize = 450;

/// Validation errors returned by [`UserProfile::try_new`].
///
/// Rules are checked in declaration order and the first failure wins, so
/// every field is tested for emptiness before any length is measured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyFirstName,
    EmptyLastName,
    EmptyBiography,
    FirstNameLength { min: usize, max: usize },
    LastNameLength { min: usize, max: usize },
    BiographyLength { min: usize, max: usize },
}

impl UserValidationError {
    /// Numeric code of the violated rule, `1..=6` in evaluation order.
    ///
    /// # Examples
    /// ```
    /// use user_registry::domain::UserValidationError;
    ///
    /// assert_eq!(UserValidationError::EmptyBiography.code(), 3);
    /// ```
    pub fn code(&self) -> u8 {
        match self {
            Self::EmptyFirstName => 1,
            Self::EmptyLastName => 2,
            Self::EmptyBiography => 3,
            Self::FirstNameLength { .. } => 4,
            Self::LastNameLength { .. } => 5,
            Self::BiographyLength { .. } => 6,
        }
    }
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFirstName => write!(f, "empty first name"),
            Self::EmptyLastName => write!(f, "empty last name"),
            Self::EmptyBiography => write!(f, "empty biography"),
            Self::FirstNameLength { min, max } => {
                write!(f, "first name must be between {min} and {max} characters")
            }
            Self::LastNameLength { min, max } => {
                write!(f, "last name must be between {min} and {max} characters")
            }
            Self::BiographyLength { min, max } => {
                write!(f, "biography must be between {min} and {max} characters")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Raised when identifier text is not a UUID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("user id must be a valid UUID, got {raw:?}")]
pub struct InvalidUserId {
    raw: String,
}

/// Stable user identifier backed by a random UUID.
///
/// Serialises as the hyphenated UUID string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Parse an identifier from its textual form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, InvalidUserId> {
        let raw = id.as_ref();
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| InvalidUserId {
                raw: raw.to_owned(),
            })
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = InvalidUserId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = InvalidUserId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unvalidated write payload for create and replace operations.
///
/// Missing fields decode as empty strings so they fail validation with the
/// matching "empty" rule. Unknown fields, `id` included, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserDraft {
    /// Requested first name.
    pub first_name: String,
    /// Requested last name.
    pub last_name: String,
    /// Requested biography.
    pub biography: String,
}

/// Validated user content, everything but the identifier.
///
/// ## Invariants
/// - every field is non-empty;
/// - lengths, counted in characters, sit inside the inclusive bounds
///   declared by the `*_MIN`/`*_MAX` constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    first_name: String,
    last_name: String,
    biography: String,
}

fn within(value: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&value.chars().count())
}

impl UserProfile {
    /// Validate the three text fields in rule order.
    ///
    /// # Examples
    /// ```
    /// use user_registry::domain::{UserProfile, UserValidationError};
    ///
    /// let err = UserProfile::try_new("", "Bo", "").expect_err("empty names fail");
    /// assert_eq!(err, UserValidationError::EmptyFirstName);
    /// ```
    pub fn try_new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        biography: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let first_name = first_name.into();
        let last_name = last_name.into();
        let biography = biography.into();

        if first_name.is_empty() {
            return Err(UserValidationError::EmptyFirstName);
        }
        if last_name.is_empty() {
            return Err(UserValidationError::EmptyLastName);
        }
        if biography.is_empty() {
            return Err(UserValidationError::EmptyBiography);
        }

        if !within(&first_name, FIRST_NAME_MIN, FIRST_NAME_MAX) {
            return Err(UserValidationError::FirstNameLength {
                min: FIRST_NAME_MIN,
                max: FIRST_NAME_MAX,
            });
        }
        if !within(&last_name, LAST_NAME_MIN, LAST_NAME_MAX) {
            return Err(UserValidationError::LastNameLength {
                min: LAST_NAME_MIN,
                max: LAST_NAME_MAX,
            });
        }
        if !within(&biography, BIOGRAPHY_MIN, BIOGRAPHY_MAX) {
            return Err(UserValidationError::BiographyLength {
                min: BIOGRAPHY_MIN,
                max: BIOGRAPHY_MAX,
            });
        }

        Ok(Self {
            first_name,
            last_name,
            biography,
        })
    }

    /// Validated first name.
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    /// Validated last name.
    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }

    /// Validated biography.
    pub fn biography(&self) -> &str {
        self.biography.as_str()
    }
}

impl TryFrom<UserDraft> for UserProfile {
    type Error = UserValidationError;

    fn try_from(value: UserDraft) -> Result<Self, Self::Error> {
        let UserDraft {
            first_name,
            last_name,
            biography,
        } = value;
        Self::try_new(first_name, last_name, biography)
    }
}

/// Stored user record.
///
/// Serialises flat as `{"id","firstName","lastName","biography"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: UserId,
    profile: UserProfile,
}

impl User {
    /// Build a record from validated components.
    pub fn new(id: UserId, profile: UserProfile) -> Self {
        Self { id, profile }
    }

    /// Stable identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Validated content.
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Replace the content wholesale, keeping the identifier.
    #[must_use]
    pub fn with_profile(self, profile: UserProfile) -> Self {
        Self {
            id: self.id,
            profile,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    id: UserId,
    first_name: String,
    last_name: String,
    biography: String,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User { id, profile } = value;
        let UserProfile {
            first_name,
            last_name,
            biography,
        } = profile;
        Self {
            id,
            first_name,
            last_name,
            biography,
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        let profile = UserProfile::try_new(value.first_name, value.last_name, value.biography)?;
        Ok(Self::new(value.id, profile))
    }
}
