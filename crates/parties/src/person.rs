//! Person service: CRUD over people and their linked parties.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

use contractkit_core::{DomainError, Entity, PersonId};
use contractkit_models::{PersonCreate, PersonResponse, PersonUpdate, Validate};

use crate::record::PersonRecord;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PersonServiceError {
    /// Another active person already uses the email.
    #[error("Email already exists")]
    DuplicateEmail,

    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The backing store cannot be used (e.g. a poisoned lock).
    #[error("person directory unavailable: {0}")]
    Unavailable(String),
}

/// Business operations behind the `/parties/people` routes.
///
/// Reads only ever see active people; `None`/`false` means "no such active person".
#[async_trait]
pub trait PersonService: Send + Sync {
    async fn create_person(&self, input: PersonCreate) -> Result<PersonResponse, PersonServiceError>;

    async fn get_person(&self, id: PersonId) -> Result<Option<PersonResponse>, PersonServiceError>;

    /// Active people in creation order.
    async fn list_people(
        &self,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<PersonResponse>, PersonServiceError>;

    /// Partial update: absent fields keep their value.
    async fn update_person(
        &self,
        id: PersonId,
        input: PersonUpdate,
    ) -> Result<Option<PersonResponse>, PersonServiceError>;

    /// Soft delete. `false` when there was no active person to delete.
    async fn delete_person(&self, id: PersonId) -> Result<bool, PersonServiceError>;
}

#[derive(Debug, Default)]
struct Directory {
    /// Insertion order; archived records stay in place.
    people: Vec<PersonRecord>,
    index: HashMap<PersonId, usize>,
}

impl Directory {
    fn live(&self) -> impl Iterator<Item = &PersonRecord> {
        self.people.iter().filter(|p| p.is_live())
    }

    fn live_mut(&mut self, id: &PersonId) -> Option<&mut PersonRecord> {
        let idx = *self.index.get(id)?;
        self.people.get_mut(idx).filter(|p| p.is_live())
    }

    fn email_taken(&self, email: &str, except: Option<&PersonId>) -> bool {
        self.live()
            .any(|p| p.has_email(email) && Some(p.id()) != except)
    }

    fn insert(&mut self, person: PersonRecord) {
        self.index.insert(*person.id(), self.people.len());
        self.people.push(person);
    }
}

/// Process-memory implementation; contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryPersonService {
    inner: RwLock<Directory>,
}

impl InMemoryPersonService {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Directory>, PersonServiceError> {
        self.inner
            .read()
            .map_err(|e| PersonServiceError::Unavailable(e.to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Directory>, PersonServiceError> {
        self.inner
            .write()
            .map_err(|e| PersonServiceError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl PersonService for InMemoryPersonService {
    async fn create_person(&self, input: PersonCreate) -> Result<PersonResponse, PersonServiceError> {
        ensure_valid(&input)?;

        let mut dir = self.write()?;
        if dir.email_taken(&input.email, None) {
            return Err(PersonServiceError::DuplicateEmail);
        }

        let person = PersonRecord::new(
            &input.first_name,
            &input.last_name,
            input.date_of_birth,
            &input.email,
            input.phone,
        );
        let response = person.to_response();
        dir.insert(person);

        info!(person_id = %response.id, party_id = %response.party.id, "person created");
        Ok(response)
    }

    async fn get_person(&self, id: PersonId) -> Result<Option<PersonResponse>, PersonServiceError> {
        let dir = self.read()?;
        let found = dir
            .index
            .get(&id)
            .and_then(|&idx| dir.people.get(idx))
            .filter(|p| p.is_live())
            .map(PersonRecord::to_response);
        debug!(person_id = %id, found = found.is_some(), "person lookup");
        Ok(found)
    }

    async fn list_people(
        &self,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<PersonResponse>, PersonServiceError> {
        let dir = self.read()?;
        Ok(dir
            .live()
            .skip(skip)
            .take(limit)
            .map(PersonRecord::to_response)
            .collect())
    }

    async fn update_person(
        &self,
        id: PersonId,
        input: PersonUpdate,
    ) -> Result<Option<PersonResponse>, PersonServiceError> {
        ensure_valid(&input)?;

        let mut dir = self.write()?;
        if dir.live_mut(&id).is_none() {
            return Ok(None);
        }
        if let Some(email) = &input.email {
            if dir.email_taken(email, Some(&id)) {
                return Err(PersonServiceError::DuplicateEmail);
            }
        }

        let Some(person) = dir.live_mut(&id) else {
            return Ok(None);
        };
        person.rename(input.first_name.as_deref(), input.last_name.as_deref());
        if let Some(email) = &input.email {
            person.set_email(email);
        }
        if let Some(date_of_birth) = input.date_of_birth {
            person.set_date_of_birth(date_of_birth);
        }
        if let Some(phone) = input.phone {
            person.set_phone(phone);
        }

        info!(person_id = %id, "person updated");
        Ok(Some(person.to_response()))
    }

    async fn delete_person(&self, id: PersonId) -> Result<bool, PersonServiceError> {
        let mut dir = self.write()?;
        let Some(person) = dir.live_mut(&id) else {
            return Ok(false);
        };
        person.archive();
        info!(person_id = %id, "person archived");
        Ok(true)
    }
}

/// Re-run the contract checks so direct callers (seeding, other services)
/// get the same guarantees as HTTP requests.
pub(crate) fn ensure_valid(input: &impl Validate) -> Result<(), DomainError> {
    let violations = input.validate();
    if violations.is_empty() {
        return Ok(());
    }
    let msg = violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ");
    Err(DomainError::validation(msg))
}
