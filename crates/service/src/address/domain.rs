use serde::{Deserialize, Serialize};

/// An address book entry.
///
/// `id` is assigned by the store on first save and never changes afterwards.
/// It is `None` (or zero, for clients that send `0`) on a record that has not
/// been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(rename = "phoneNumber", alias = "phonenumber")]
    pub phone_number: String,
}

impl Address {
    pub fn new(name: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self { id: None, name: name.into(), phone_number: phone_number.into() }
    }

    /// The store-assigned id, if this record has been persisted.
    pub fn persisted_id(&self) -> Option<i64> {
        self.id.filter(|id| *id != 0)
    }

    /// Overwrite the mutable fields, leaving `id` untouched.
    pub fn apply(&mut self, patch: AddressPatch) {
        self.name = patch.name;
        self.phone_number = patch.phone_number;
    }
}

/// The mutable fields of an address, as accepted by an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressPatch {
    pub name: String,
    #[serde(rename = "phoneNumber", alias = "phonenumber")]
    pub phone_number: String,
}

impl AddressPatch {
    pub fn new(name: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self { name: name.into(), phone_number: phone_number.into() }
    }
}

impl From<models::address::Model> for Address {
    fn from(m: models::address::Model) -> Self {
        Self { id: Some(m.id), name: m.name, phone_number: m.phone_number }
    }
}
