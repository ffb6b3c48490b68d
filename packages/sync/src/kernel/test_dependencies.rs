// TestDependencies - mock implementations for testing
//
// Spy adapters that record every call into a shared journal, so tests can
// assert both how often each system was called and in which order.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::{
    BaseContactStore, BaseCrmService, BaseEngagementFeed, BaseEnrichmentService,
    BaseOutreachService, SyncDeps,
};
use crate::domains::contacts::models::{
    ContactFields, ContactRecord, CrmContact, EmailAddress, EnrichedProfile, OutreachLead,
    RawEngagementRecord,
};

// =============================================================================
// Call Journal
// =============================================================================

/// One call made to a mock adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FetchCommenters,
    FetchLikers,
    TriggerNext,
    Enrich(String),
    FindByEmail(String),
    Create(ContactFields),
    Update(String, ContactFields),
    AddLead(OutreachLead),
    UpsertContact(CrmContact),
}

/// Ordered record of every mock call, shared by all mocks of a TestDependencies
#[derive(Debug, Clone, Default)]
pub struct CallJournal {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl CallJournal {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    /// All calls in the order they were made
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls matching a predicate
    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| predicate(c)).count()
    }

    /// Position of the first matching call
    pub fn position(&self, predicate: impl Fn(&Call) -> bool) -> Option<usize> {
        self.calls.lock().unwrap().iter().position(|c| predicate(c))
    }

    /// Position of the last matching call
    pub fn last_position(&self, predicate: impl Fn(&Call) -> bool) -> Option<usize> {
        self.calls.lock().unwrap().iter().rposition(|c| predicate(c))
    }

    pub fn creates(&self) -> Vec<ContactFields> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Create(fields) => Some(fields),
                _ => None,
            })
            .collect()
    }

    pub fn updates(&self) -> Vec<(String, ContactFields)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Update(id, fields) => Some((id, fields)),
                _ => None,
            })
            .collect()
    }

    /// Store, outreach and CRM writes (lookups excluded)
    pub fn downstream_writes(&self) -> usize {
        self.count(|c| {
            matches!(
                c,
                Call::Create(_) | Call::Update(..) | Call::AddLead(_) | Call::UpsertContact(_)
            )
        })
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

// =============================================================================
// Mock Engagement Feed
// =============================================================================

pub struct MockFeed {
    journal: CallJournal,
    commenters: Mutex<Vec<RawEngagementRecord>>,
    likers: Mutex<Vec<RawEngagementRecord>>,
    fail_commenters: AtomicUsize,
    fail_likers: AtomicBool,
    trigger_result: AtomicBool,
}

impl MockFeed {
    pub fn new(journal: CallJournal) -> Self {
        Self {
            journal,
            commenters: Mutex::new(Vec::new()),
            likers: Mutex::new(Vec::new()),
            fail_commenters: AtomicUsize::new(0),
            fail_likers: AtomicBool::new(false),
            trigger_result: AtomicBool::new(true),
        }
    }

    pub fn with_commenters(self, commenters: Vec<RawEngagementRecord>) -> Self {
        *self.commenters.lock().unwrap() = commenters;
        self
    }

    pub fn with_likers(self, likers: Vec<RawEngagementRecord>) -> Self {
        *self.likers.lock().unwrap() = likers;
        self
    }

    /// Fail the next `times` commenter fetches
    pub fn failing_commenters(self, times: usize) -> Self {
        self.fail_commenters.store(times, Ordering::SeqCst);
        self
    }

    pub fn failing_likers(self) -> Self {
        self.fail_likers.store(true, Ordering::SeqCst);
        self
    }

    /// Make `trigger_next` report that nothing was triggered
    pub fn not_triggering(self) -> Self {
        self.trigger_result.store(false, Ordering::SeqCst);
        self
    }
}

#[async_trait]
impl BaseEngagementFeed for MockFeed {
    async fn fetch_commenters(&self) -> Result<Vec<RawEngagementRecord>> {
        self.journal.push(Call::FetchCommenters);

        let remaining = self.fail_commenters.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_commenters.store(remaining - 1, Ordering::SeqCst);
            anyhow::bail!("mock feed unavailable");
        }
        Ok(self.commenters.lock().unwrap().clone())
    }

    async fn fetch_likers(&self) -> Result<Vec<RawEngagementRecord>> {
        self.journal.push(Call::FetchLikers);

        if self.fail_likers.load(Ordering::SeqCst) {
            anyhow::bail!("mock feed unavailable");
        }
        Ok(self.likers.lock().unwrap().clone())
    }

    async fn trigger_next(&self) -> Result<bool> {
        self.journal.push(Call::TriggerNext);
        Ok(self.trigger_result.load(Ordering::SeqCst))
    }
}

// =============================================================================
// Mock Enrichment
// =============================================================================

/// Resolves `<first>.<last>@example.com` (lowercased) unless told otherwise
pub struct MockEnrichment {
    journal: CallJournal,
    profiles: Mutex<HashMap<String, EnrichedProfile>>,
    unresolved: Mutex<Vec<String>>,
    failing: AtomicBool,
}

impl MockEnrichment {
    pub fn new(journal: CallJournal) -> Self {
        Self {
            journal,
            profiles: Mutex::new(HashMap::new()),
            unresolved: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    /// Return this profile for the given profile URL
    pub fn with_profile(self, profile_url: &str, profile: EnrichedProfile) -> Self {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile_url.to_string(), profile);
        self
    }

    /// Resolve the given profile URL to this email
    pub fn with_email(self, record: &RawEngagementRecord, email: &str) -> Self {
        let mut profile = default_profile(record);
        profile.emails = vec![EmailAddress {
            email: email.to_string(),
        }];
        self.with_profile(&record.profile_url, profile)
    }

    /// Find no email for the given profile URL
    pub fn without_email(self, profile_url: &str) -> Self {
        self.unresolved.lock().unwrap().push(profile_url.to_string());
        self
    }

    /// Every enrichment call returns an error
    pub fn failing(self) -> Self {
        self.failing.store(true, Ordering::SeqCst);
        self
    }
}

fn default_profile(record: &RawEngagementRecord) -> EnrichedProfile {
    let email = format!("{}.{}@example.com", record.first_name, record.last_name).to_lowercase();
    EnrichedProfile {
        full_name: record.full_name(),
        first_name: record.first_name.clone(),
        last_name: record.last_name.clone(),
        emails: vec![EmailAddress { email }],
        phone: Some("+1 555 0100".to_string()),
        linkedin_url: record.profile_url.clone(),
        company: Some("Acme Corp".to_string()),
        website: Some("https://acme.example".to_string()),
    }
}

#[async_trait]
impl BaseEnrichmentService for MockEnrichment {
    async fn enrich(&self, record: &RawEngagementRecord) -> Result<EnrichedProfile> {
        self.journal.push(Call::Enrich(record.profile_url.clone()));

        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("mock enrichment unavailable");
        }
        if self.unresolved.lock().unwrap().contains(&record.profile_url) {
            return Ok(EnrichedProfile::unresolved(record));
        }
        if let Some(profile) = self.profiles.lock().unwrap().get(&record.profile_url) {
            return Ok(profile.clone());
        }
        Ok(default_profile(record))
    }
}

// =============================================================================
// Mock Contact Store
// =============================================================================

/// In-memory record store keyed by exact email equality
pub struct MockContactStore {
    journal: CallJournal,
    records: Mutex<Vec<ContactRecord>>,
    next_id: AtomicUsize,
    fail_lookups: AtomicBool,
    fail_writes: AtomicBool,
}

impl MockContactStore {
    pub fn new(journal: CallJournal) -> Self {
        Self {
            journal,
            records: Mutex::new(Vec::new()),
            next_id: AtomicUsize::new(1),
            fail_lookups: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Seed an existing record
    pub fn with_record(self, id: &str, fields: ContactFields) -> Self {
        self.records.lock().unwrap().push(ContactRecord {
            id: id.to_string(),
            fields,
        });
        self
    }

    /// Seed an existing record holding only a name and an email
    pub fn with_contact(self, id: &str, name: &str, email: &str) -> Self {
        self.with_record(
            id,
            ContactFields {
                name: Some(name.to_string()),
                email: email.to_string(),
                ..Default::default()
            },
        )
    }

    pub fn failing_lookups(self) -> Self {
        self.fail_lookups.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_writes(self) -> Self {
        self.fail_writes.store(true, Ordering::SeqCst);
        self
    }

    /// Current contents of the store
    pub fn records(&self) -> Vec<ContactRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseContactStore for MockContactStore {
    async fn find_by_email(&self, email: &str) -> Result<Vec<ContactRecord>> {
        self.journal.push(Call::FindByEmail(email.to_string()));

        if self.fail_lookups.load(Ordering::SeqCst) {
            anyhow::bail!("mock store lookup failed");
        }
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.fields.email == email)
            .cloned()
            .collect())
    }

    async fn create(&self, fields: &ContactFields) -> Result<ContactRecord> {
        self.journal.push(Call::Create(fields.clone()));

        if self.fail_writes.load(Ordering::SeqCst) {
            anyhow::bail!("mock store write failed");
        }
        let id = format!("rec{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let record = ContactRecord {
            id,
            fields: fields.clone(),
        };
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update(&self, record_id: &str, fields: &ContactFields) -> Result<ContactRecord> {
        self.journal
            .push(Call::Update(record_id.to_string(), fields.clone()));

        if self.fail_writes.load(Ordering::SeqCst) {
            anyhow::bail!("mock store write failed");
        }
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| anyhow::anyhow!("record {} not found", record_id))?;

        // PATCH semantics: a missing name keeps the stored one
        let name = fields.name.clone().or_else(|| record.fields.name.clone());
        record.fields = ContactFields {
            name,
            ..fields.clone()
        };
        Ok(record.clone())
    }
}

// =============================================================================
// Mock Outreach / CRM
// =============================================================================

/// Outcome a mock write reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockWrite {
    Succeed,
    /// Return `Ok(false)`
    Reject,
    /// Return an error
    Fail,
}

impl MockWrite {
    fn result(self, system: &str) -> Result<bool> {
        match self {
            MockWrite::Succeed => Ok(true),
            MockWrite::Reject => Ok(false),
            MockWrite::Fail => anyhow::bail!("mock {} unavailable", system),
        }
    }
}

pub struct MockOutreach {
    journal: CallJournal,
    outcome: Mutex<MockWrite>,
}

impl MockOutreach {
    pub fn new(journal: CallJournal) -> Self {
        Self {
            journal,
            outcome: Mutex::new(MockWrite::Succeed),
        }
    }

    pub fn with_outcome(self, outcome: MockWrite) -> Self {
        *self.outcome.lock().unwrap() = outcome;
        self
    }
}

#[async_trait]
impl BaseOutreachService for MockOutreach {
    async fn add_lead(&self, lead: &OutreachLead) -> Result<bool> {
        self.journal.push(Call::AddLead(lead.clone()));
        let outcome = *self.outcome.lock().unwrap();
        outcome.result("outreach")
    }
}

pub struct MockCrm {
    journal: CallJournal,
    outcome: Mutex<MockWrite>,
}

impl MockCrm {
    pub fn new(journal: CallJournal) -> Self {
        Self {
            journal,
            outcome: Mutex::new(MockWrite::Succeed),
        }
    }

    pub fn with_outcome(self, outcome: MockWrite) -> Self {
        *self.outcome.lock().unwrap() = outcome;
        self
    }
}

#[async_trait]
impl BaseCrmService for MockCrm {
    async fn upsert_contact(&self, contact: &CrmContact) -> Result<bool> {
        self.journal.push(Call::UpsertContact(contact.clone()));
        let outcome = *self.outcome.lock().unwrap();
        outcome.result("crm")
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Mock adapters sharing one journal.
///
/// Configure with the `mock_*` setters, then call [`TestDependencies::deps`]
/// and keep this value around to inspect the journal and the store.
pub struct TestDependencies {
    pub journal: CallJournal,
    pub feed: Arc<MockFeed>,
    pub enrichment: Arc<MockEnrichment>,
    pub contact_store: Arc<MockContactStore>,
    pub outreach: Arc<MockOutreach>,
    pub crm: Arc<MockCrm>,
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDependencies {
    pub fn new() -> Self {
        let journal = CallJournal::new();
        Self {
            feed: Arc::new(MockFeed::new(journal.clone())),
            enrichment: Arc::new(MockEnrichment::new(journal.clone())),
            contact_store: Arc::new(MockContactStore::new(journal.clone())),
            outreach: Arc::new(MockOutreach::new(journal.clone())),
            crm: Arc::new(MockCrm::new(journal.clone())),
            journal,
        }
    }

    /// Configure the feed mock
    pub fn mock_feed(mut self, configure: impl FnOnce(MockFeed) -> MockFeed) -> Self {
        self.feed = Arc::new(configure(MockFeed::new(self.journal.clone())));
        self
    }

    /// Configure the enrichment mock
    pub fn mock_enrichment(
        mut self,
        configure: impl FnOnce(MockEnrichment) -> MockEnrichment,
    ) -> Self {
        self.enrichment = Arc::new(configure(MockEnrichment::new(self.journal.clone())));
        self
    }

    /// Configure the contact store mock
    pub fn mock_store(
        mut self,
        configure: impl FnOnce(MockContactStore) -> MockContactStore,
    ) -> Self {
        self.contact_store = Arc::new(configure(MockContactStore::new(self.journal.clone())));
        self
    }

    /// Set the outcome of every outreach write
    pub fn mock_outreach(mut self, outcome: MockWrite) -> Self {
        self.outreach = Arc::new(MockOutreach::new(self.journal.clone()).with_outcome(outcome));
        self
    }

    /// Set the outcome of every CRM write
    pub fn mock_crm(mut self, outcome: MockWrite) -> Self {
        self.crm = Arc::new(MockCrm::new(self.journal.clone()).with_outcome(outcome));
        self
    }

    /// Dependency container backed by these mocks
    pub fn deps(&self) -> SyncDeps {
        SyncDeps::new(
            self.feed.clone(),
            self.enrichment.clone(),
            self.contact_store.clone(),
            self.outreach.clone(),
            self.crm.clone(),
        )
    }
}
