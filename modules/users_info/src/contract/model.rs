use serde::{Deserialize, Deserializer, Serialize};

/// Store-assigned identifier. Positive once assigned.
pub type UserId = i64;

/// Registered account as seen by other modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// `None` until the store persists the record for the first time.
    pub id: Option<UserId>,
    pub username: String,
    pub email: String,
    pub active: bool,
}

impl User {
    /// A user that has not been persisted yet.
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            username: username.into(),
            email: email.into(),
            active: true,
        }
    }

    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

/// Data for creating a new user. New users always start active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
}

impl NewUser {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }
}

/// Any `id` or `active` flag on the incoming user is ignored on creation.
impl From<User> for NewUser {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            email: user.email,
        }
    }
}

/// One field of a partial update.
///
/// Distinguishes a field the caller did not touch from one the caller
/// explicitly cleared. In JSON a missing key is `Omitted`, `null` is
/// `Cleared` and any other value is `Set`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(untagged)]
pub enum PatchField<T> {
    #[default]
    Omitted,
    Cleared,
    Set(T),
}

impl<T> PatchField<T> {
    pub fn is_omitted(&self) -> bool {
        matches!(self, Self::Omitted)
    }

}

impl<T> From<Option<T>> for PatchField<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Omitted, Self::Set)
    }
}

impl<'de, T> Deserialize<'de> for PatchField<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only reached when the key is present; a missing key falls back to
        // `Default` through `#[serde(default)]` on the containing struct.
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(value) => Self::Set(value),
            None => Self::Cleared,
        })
    }
}

/// Partial update data for a user. Omitted fields keep their current value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "PatchField::is_omitted")]
    pub username: PatchField<String>,
    #[serde(default, skip_serializing_if = "PatchField::is_omitted")]
    pub email: PatchField<String>,
}

impl UserPatch {
    pub fn username(value: impl Into<String>) -> Self {
        Self {
            username: PatchField::Set(value.into()),
            ..Self::default()
        }
    }

    pub fn email(value: impl Into<String>) -> Self {
        Self {
            email: PatchField::Set(value.into()),
            ..Self::default()
        }
    }

    pub fn with_username(mut self, value: impl Into<String>) -> Self {
        self.username = PatchField::Set(value.into());
        self
    }

    pub fn with_email(mut self, value: impl Into<String>) -> Self {
        self.email = PatchField::Set(value.into());
        self
    }

    pub fn clear_username(mut self) -> Self {
        self.username = PatchField::Cleared;
        self
    }

    pub fn clear_email(mut self) -> Self {
        self.email = PatchField::Cleared;
        self
    }
}
