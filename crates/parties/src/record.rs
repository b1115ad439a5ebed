//! Stored records behind the person service.
//!
//! Every person owns exactly one party. The party carries the display name
//! and lifecycle status; the person carries contact details.

use chrono::NaiveDate;

use contractkit_core::{Entity, PartyId, PersonId};
use contractkit_models::{PartyOut, PartyStatus, PersonResponse};

/// `party_type` of every party created through the person service.
pub const PERSON_PARTY_TYPE: &str = "person";

/// Directory entry shared by every kind of party.
#[derive(Debug, Clone, PartialEq)]
pub struct PartyRecord {
    id: PartyId,
    party_type: &'static str,
    display_name: String,
    status: PartyStatus,
}

impl PartyRecord {
    pub fn person(display_name: String) -> Self {
        Self {
            id: PartyId::new(),
            party_type: PERSON_PARTY_TYPE,
            display_name,
            status: PartyStatus::Active,
        }
    }

    fn to_out(&self) -> PartyOut {
        PartyOut {
            id: self.id.to_string(),
            party_type: self.party_type.to_string(),
            display_name: self.display_name.clone(),
            status: self.status,
        }
    }
}

impl Entity for PartyRecord {
    type Id = PartyId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn is_live(&self) -> bool {
        self.status == PartyStatus::Active
    }
}

/// A person and the party it is linked to.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonRecord {
    id: PersonId,
    party: PartyRecord,
    first_name: String,
    last_name: String,
    date_of_birth: Option<NaiveDate>,
    email: String,
    phone: Option<String>,
    is_active: bool,
}

impl PersonRecord {
    /// Build an active person; names are stored trimmed.
    pub fn new(
        first_name: &str,
        last_name: &str,
        date_of_birth: Option<NaiveDate>,
        email: &str,
        phone: Option<String>,
    ) -> Self {
        let first_name = first_name.trim().to_string();
        let last_name = last_name.trim().to_string();
        let party = PartyRecord::person(display_name(&first_name, &last_name));
        Self {
            id: PersonId::new(),
            party,
            first_name,
            last_name,
            date_of_birth,
            email: email.trim().to_string(),
            phone,
            is_active: true,
        }
    }

    /// Case-insensitive email comparison, Unicode included.
    pub fn has_email(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.trim().to_lowercase()
    }

    pub fn rename(&mut self, first_name: Option<&str>, last_name: Option<&str>) {
        if first_name.is_none() && last_name.is_none() {
            return;
        }
        if let Some(first) = first_name {
            self.first_name = first.trim().to_string();
        }
        if let Some(last) = last_name {
            self.last_name = last.trim().to_string();
        }
        self.party.display_name = display_name(&self.first_name, &self.last_name);
    }

    pub fn set_email(&mut self, email: &str) {
        self.email = email.trim().to_string();
    }

    pub fn set_date_of_birth(&mut self, date_of_birth: NaiveDate) {
        self.date_of_birth = Some(date_of_birth);
    }

    pub fn set_phone(&mut self, phone: String) {
        self.phone = Some(phone);
    }

    /// Soft delete: the record stays, reads stop seeing it.
    pub fn archive(&mut self) {
        self.is_active = false;
        self.party.status = PartyStatus::Archived;
    }

    pub fn to_response(&self) -> PersonResponse {
        PersonResponse {
            id: self.id.to_string(),
            party: self.party.to_out(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            date_of_birth: self.date_of_birth,
            email: self.email.clone(),
            phone: self.phone.clone(),
            is_active: self.is_active,
        }
    }
}

impl Entity for PersonRecord {
    type Id = PersonId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn is_live(&self) -> bool {
        self.is_active
    }
}

fn display_name(first_name: &str, last_name: &str) -> String {
    format!("{first_name} {last_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> PersonRecord {
        PersonRecord::new("  Jane ", "Smith", None, "Jane.Smith@Example.com", None)
    }

    #[test]
    fn new_person_is_active_with_trimmed_names() {
        let p = jane();
        assert_eq!(p.first_name, "Jane");
        assert_eq!(p.party.display_name, "Jane Smith");
        assert_eq!(p.party.party_type, "person");
        assert_eq!(p.party.status, PartyStatus::Active);
        assert!(p.is_live());
        assert!(p.party.is_live());
    }

    #[test]
    fn email_match_ignores_case() {
        let p = jane();
        assert!(p.has_email("jane.smith@example.com"));
        assert!(!p.has_email("jane@example.com"));
    }

    #[test]
    fn email_match_folds_non_ascii_letters() {
        let p = PersonRecord::new("Émile", "Zola", None, "Émile@example.com", None);
        assert!(p.has_email("émile@example.com"));
        assert!(p.has_email("ÉMILE@EXAMPLE.COM"));
        assert!(!p.has_email("emile@example.com"));
    }

    #[test]
    fn rename_refreshes_display_name() {
        let mut p = jane();
        p.rename(None, Some(" Doe "));
        assert_eq!(p.last_name, "Doe");
        assert_eq!(p.party.display_name, "Jane Doe");

        p.rename(None, None);
        assert_eq!(p.party.display_name, "Jane Doe");
    }

    #[test]
    fn archive_hides_person_and_party() {
        let mut p = jane();
        p.archive();
        assert!(!p.is_live());
        assert!(!p.party.is_live());

        let r = p.to_response();
        assert!(!r.is_active);
        assert_eq!(r.party.status, PartyStatus::Archived);
    }

    #[test]
    fn response_links_person_to_party() {
        let p = jane();
        let r = p.to_response();
        assert_eq!(r.id, p.id().to_string());
        assert_eq!(r.party.id, p.party.id().to_string());
        assert_ne!(r.id, r.party.id);
    }
}
