use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use crate::common::MeetingId;
use crate::domains::accounts::models::User;
use crate::error::StoreError;
use crate::loader::BatchFn;
use crate::store::Datastore;

use super::models::Meeting;

/// Batches meeting lookups by id.
pub struct MeetingLoader {
    pub db: Arc<dyn Datastore>,
}

impl MeetingLoader {
    pub fn new(db: Arc<dyn Datastore>) -> Self {
        Self { db }
    }
}

impl BatchFn<MeetingId, Meeting> for MeetingLoader {
    fn load(
        &mut self,
        keys: &[MeetingId],
    ) -> impl Future<Output = Result<HashMap<MeetingId, Meeting>, StoreError>> + Send {
        let db = self.db.clone();
        let keys = keys.to_vec();
        async move {
            let meetings = db.meetings_by_ids(&keys).await?;
            Ok(meetings.into_iter().map(|m| (m.id, m)).collect())
        }
    }
}

/// Batches participant-list lookups by meeting id.
pub struct MeetingParticipantsLoader {
    pub db: Arc<dyn Datastore>,
}

impl MeetingParticipantsLoader {
    pub fn new(db: Arc<dyn Datastore>) -> Self {
        Self { db }
    }
}

impl BatchFn<MeetingId, Vec<User>> for MeetingParticipantsLoader {
    fn load(
        &mut self,
        keys: &[MeetingId],
    ) -> impl Future<Output = Result<HashMap<MeetingId, Vec<User>>, StoreError>> + Send {
        let db = self.db.clone();
        let keys = keys.to_vec();
        async move {
            let rows = db.users_for_meetings(&keys).await?;

            let mut map: HashMap<MeetingId, Vec<User>> = HashMap::new();
            for (meeting_id, user) in rows {
                map.entry(meeting_id).or_default().push(user);
            }

            // Ensure every requested key has an entry
            for id in &keys {
                map.entry(*id).or_default();
            }

            Ok(map)
        }
    }
}

/// Batches registration counts by meeting id.
pub struct ParticipantCountLoader {
    pub db: Arc<dyn Datastore>,
}

impl ParticipantCountLoader {
    pub fn new(db: Arc<dyn Datastore>) -> Self {
        Self { db }
    }
}

impl BatchFn<MeetingId, i64> for ParticipantCountLoader {
    fn load(
        &mut self,
        keys: &[MeetingId],
    ) -> impl Future<Output = Result<HashMap<MeetingId, i64>, StoreError>> + Send {
        let db = self.db.clone();
        let keys = keys.to_vec();
        async move {
            let rows = db.participant_counts(&keys).await?;

            let mut map: HashMap<MeetingId, i64> = rows.into_iter().collect();

            // Ensure every requested key has an entry
            for id in &keys {
                map.entry(*id).or_insert(0);
            }

            Ok(map)
        }
    }
}
