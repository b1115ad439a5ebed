//! Sample people for local development.

use chrono::NaiveDate;
use tracing::{debug, info};

use contractkit_models::PersonCreate;

use crate::person::{PersonService, PersonServiceError};

/// Outcome of a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub created: usize,
    /// Already present (same email).
    pub skipped: usize,
}

const SAMPLE_PEOPLE: [(&str, &str, &str, Option<(i32, u32, u32)>, Option<&str>); 10] = [
    ("John", "Doe", "john.doe@example.com", Some((1985, 3, 12)), Some("+1-555-0101")),
    ("Jane", "Smith", "jane.smith@example.com", Some((1990, 7, 24)), Some("+1-555-0102")),
    ("Alice", "Johnson", "alice.johnson@example.com", Some((1978, 11, 2)), None),
    ("Bob", "Williams", "bob.williams@example.com", None, Some("+1-555-0104")),
    ("Carol", "Brown", "carol.brown@example.com", Some((1995, 1, 30)), Some("+1-555-0105")),
    ("David", "Jones", "david.jones@example.com", Some((1982, 5, 17)), None),
    ("Eve", "Garcia", "eve.garcia@example.com", None, None),
    ("Frank", "Miller", "frank.miller@example.com", Some((1970, 9, 8)), Some("+1-555-0108")),
    ("Grace", "Davis", "grace.davis@example.com", Some((1988, 12, 19)), Some("+1-555-0109")),
    ("Henry", "Wilson", "henry.wilson@example.com", Some((1993, 4, 5)), None),
];

/// Insert the sample people, skipping any whose email is already taken.
pub async fn seed_people(service: &dyn PersonService) -> Result<SeedReport, PersonServiceError> {
    let mut report = SeedReport::default();

    for (first, last, email, born, phone) in SAMPLE_PEOPLE {
        let input = PersonCreate {
            first_name: first.to_string(),
            last_name: last.to_string(),
            date_of_birth: born.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            email: email.to_string(),
            phone: phone.map(str::to_string),
        };
        match service.create_person(input).await {
            Ok(_) => report.created += 1,
            Err(PersonServiceError::DuplicateEmail) => {
                debug!(email, "seed person already present");
                report.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    info!(created = report.created, skipped = report.skipped, "seeded people");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryPersonService;

    #[tokio::test]
    async fn seeding_twice_skips_existing_people() {
        let svc = InMemoryPersonService::new();

        let first = seed_people(&svc).await.unwrap();
        assert_eq!(first, SeedReport { created: 10, skipped: 0 });

        let second = seed_people(&svc).await.unwrap();
        assert_eq!(second, SeedReport { created: 0, skipped: 10 });

        assert_eq!(svc.list_people(0, 100).await.unwrap().len(), 10);
    }

    #[tokio::test]
    async fn seeded_people_keep_listing_order() {
        let svc = InMemoryPersonService::new();
        seed_people(&svc).await.unwrap();

        let people = svc.list_people(0, 2).await.unwrap();
        assert_eq!(people[0].party.display_name, "John Doe");
        assert_eq!(people[1].party.display_name, "Jane Smith");
    }
}
