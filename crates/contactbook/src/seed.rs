//! Sample data for an empty contact store.
//!
//! [`seed_if_empty`] runs once at startup. It inserts [`sample_contacts`]
//! only when the store holds no contacts, so restarting never duplicates or
//! alters existing records.

use tracing::info;

use crate::contact::ContactFields;
use crate::error::Result;
use crate::storage::ContactStore;

/// What the seed step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store was empty and this many samples were inserted.
    Inserted(usize),
    /// The store already held contacts; nothing was written.
    Skipped {
        /// Number of contacts already present.
        existing: i64,
    },
}

/// The fixed sample dataset.
#[must_use]
pub fn sample_contacts() -> Vec<ContactFields> {
    vec![
        ContactFields::new(
            "John",
            "Doe",
            "john.doe@example.com",
            "1234567890",
            "TechCorp",
            "Software Engineer",
        ),
        ContactFields::new(
            "Jane",
            "Smith",
            "jane.smith@example.com",
            "9876543210",
            "BizInc",
            "Project Manager",
        ),
        ContactFields::new(
            "Emily",
            "Johnson",
            "emily.johnson@example.com",
            "5555555555",
            "HealthCare Solutions",
            "Data Scientist",
        ),
        ContactFields::new(
            "Michael",
            "Brown",
            "michael.brown@example.com",
            "4444444444",
            "BuildIt",
            "Architect",
        ),
        ContactFields::new(
            "Sarah",
            "Davis",
            "sarah.davis@example.com",
            "3333333333",
            "GreenWorld",
            "Environmental Specialist",
        ),
    ]
}

/// Insert the sample contacts if the store is empty.
///
/// # Errors
///
/// Returns an error if counting or inserting fails. A failed insert leaves
/// the store empty.
pub fn seed_if_empty(store: &ContactStore) -> Result<SeedOutcome> {
    let existing = store.count()?;
    if existing > 0 {
        info!("Store already holds {} contacts, skipping seed", existing);
        return Ok(SeedOutcome::Skipped { existing });
    }

    let inserted = store.insert_many(&sample_contacts())?;
    info!("Seeded {} sample contacts", inserted);
    Ok(SeedOutcome::Inserted(inserted))
}
