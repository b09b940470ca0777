// Datastore abstraction

pub mod memory;

use crate::domains::accounts::AccountStore;
use crate::domains::meetings::MeetingStore;
use crate::domains::reviews::ReviewStore;

/// Everything a backend must provide for the services and loaders.
///
/// Blanket-implemented for any type covering the per-domain store traits, so
/// services hold a single `Arc<dyn Datastore>`.
pub trait Datastore: MeetingStore + ReviewStore + AccountStore {}

impl<T: MeetingStore + ReviewStore + AccountStore> Datastore for T {}
