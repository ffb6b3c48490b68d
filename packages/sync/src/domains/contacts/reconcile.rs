//! Contact reconciliation decisions.
//!
//! Given an enriched profile and what the record store knows about its
//! email, decide which writes the three downstream systems receive. Nothing
//! here performs IO; [`super::actions::sync_record`] executes the plan.
//!
//! ```text
//! EnrichedProfile + StoreLookup
//!     │
//!     └─► plan_record()
//!             ├─► StoreOp    (Create | Update first match | Skip)
//!             ├─► OutreachLead
//!             └─► CrmContact
//! ```

use super::models::{ContactFields, ContactRecord, CrmContact, EnrichedProfile, OutreachLead};

/// What the record store returned for an email.
#[derive(Debug, Clone)]
pub enum StoreLookup {
    Matches(Vec<ContactRecord>),
    /// The lookup call failed; the store cannot be written safely.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    Create(ContactFields),
    Update {
        record_id: String,
        fields: ContactFields,
    },
    Skip,
}

/// The full set of writes for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPlan {
    pub email: String,
    pub store_op: StoreOp,
    pub outreach: OutreachLead,
    pub crm: CrmContact,
}

/// Decide the writes for a profile whose primary email is `email`.
///
/// The store branch depends only on whether the lookup matched; the outreach
/// and CRM writes are always planned.
pub fn plan_record(email: &str, profile: &EnrichedProfile, lookup: &StoreLookup) -> RecordPlan {
    let store_op = match lookup {
        StoreLookup::Matches(matches) => match matches.first() {
            // First match wins; the store decides the order
            Some(existing) => StoreOp::Update {
                record_id: existing.id.clone(),
                fields: update_fields(email, profile),
            },
            None => StoreOp::Create(create_fields(email, profile)),
        },
        StoreLookup::Failed => StoreOp::Skip,
    };

    RecordPlan {
        email: email.to_string(),
        store_op,
        outreach: outreach_lead(email, profile),
        crm: crm_contact(email, profile),
    }
}

/// Fields for a new contact, including its display name.
pub fn create_fields(email: &str, profile: &EnrichedProfile) -> ContactFields {
    ContactFields {
        name: Some(profile.full_name.clone()),
        ..update_fields(email, profile)
    }
}

/// Fields refreshed on an existing contact.
///
/// The display name is never overwritten: an existing contact keeps the name
/// it was created or edited with.
pub fn update_fields(email: &str, profile: &EnrichedProfile) -> ContactFields {
    ContactFields {
        name: None,
        email: email.to_string(),
        phone: profile.phone.clone(),
        linkedin: Some(profile.linkedin_url.clone()),
        account: profile.company.clone(),
        company_website: profile.website.clone(),
    }
}

pub fn outreach_lead(email: &str, profile: &EnrichedProfile) -> OutreachLead {
    OutreachLead {
        email: email.to_string(),
        first_name: profile.first_name.clone(),
        last_name: profile.last_name.clone(),
        company_name: profile.company.clone(),
    }
}

pub fn crm_contact(email: &str, profile: &EnrichedProfile) -> CrmContact {
    CrmContact {
        email: email.to_string(),
        first_name: profile.first_name.clone(),
        last_name: profile.last_name.clone(),
        company: profile.company.clone(),
        phone: profile.phone.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::contacts::models::EmailAddress;

    fn ada() -> EnrichedProfile {
        EnrichedProfile {
            full_name: "Ada Lovelace".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            emails: vec![EmailAddress {
                email: "ada@example.com".into(),
            }],
            phone: Some("+44 20 7946 0000".into()),
            linkedin_url: "https://linkedin.example/ada".into(),
            company: Some("Example Ltd".into()),
            website: Some("https://example.com".into()),
        }
    }

    fn record(id: &str) -> ContactRecord {
        ContactRecord {
            id: id.into(),
            fields: ContactFields {
                email: "ada@example.com".into(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_no_match_plans_create_with_name() {
        let plan = plan_record("ada@example.com", &ada(), &StoreLookup::Matches(vec![]));

        match plan.store_op {
            StoreOp::Create(fields) => {
                assert_eq!(fields.name.as_deref(), Some("Ada Lovelace"));
                assert_eq!(fields.email, "ada@example.com");
                assert_eq!(fields.account.as_deref(), Some("Example Ltd"));
                assert_eq!(fields.company_website.as_deref(), Some("https://example.com"));
                assert_eq!(fields.linkedin.as_deref(), Some("https://linkedin.example/ada"));
                assert_eq!(fields.phone.as_deref(), Some("+44 20 7946 0000"));
            }
            other => panic!("expected create, got {:?}", other),
        }
    }

    #[test]
    fn test_match_plans_update_of_first_record_without_name() {
        let lookup = StoreLookup::Matches(vec![record("rec123"), record("rec456")]);
        let plan = plan_record("ada@example.com", &ada(), &lookup);

        match plan.store_op {
            StoreOp::Update { record_id, fields } => {
                assert_eq!(record_id, "rec123");
                assert!(fields.name.is_none());
                assert_eq!(fields.email, "ada@example.com");
                assert_eq!(fields.account.as_deref(), Some("Example Ltd"));
            }
            other => panic!("expected update, got {:?}", other),
        }
    }

    #[test]
    fn test_failed_lookup_skips_store_but_keeps_fan_out() {
        let plan = plan_record("ada@example.com", &ada(), &StoreLookup::Failed);

        assert_eq!(plan.store_op, StoreOp::Skip);
        assert_eq!(plan.outreach.email, "ada@example.com");
        assert_eq!(plan.crm.email, "ada@example.com");
    }

    #[test]
    fn test_fan_out_payloads_do_not_depend_on_branch() {
        let created = plan_record("ada@example.com", &ada(), &StoreLookup::Matches(vec![]));
        let updated = plan_record(
            "ada@example.com",
            &ada(),
            &StoreLookup::Matches(vec![record("rec123")]),
        );

        assert_eq!(created.outreach, updated.outreach);
        assert_eq!(created.crm, updated.crm);
        assert_eq!(
            created.outreach,
            OutreachLead {
                email: "ada@example.com".into(),
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                company_name: Some("Example Ltd".into()),
            }
        );
        assert_eq!(created.crm.phone.as_deref(), Some("+44 20 7946 0000"));
        assert_eq!(created.crm.company.as_deref(), Some("Example Ltd"));
    }
}
