use std::{collections::HashMap, sync::Arc};

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::gifts::GiftService;
use crate::identity::PrincipalProvider;
use crate::pagination::Pagination;
use crate::storage::SnapshotStore;
use models::{Gift, GiftInput};

/// In-memory gift collection, optionally mirrored to a snapshot.
///
/// The map is authoritative. The snapshot is imported once by [`GiftStore::open`]
/// and, when `persistent` is set, rewritten in full after every successful
/// mutation. Exports are serialized and each one copies the map inside the
/// critical section, so the snapshot never ends up older than the map's
/// last committed change. A failed export is returned to the caller but the in-memory
/// change stands; the next successful export catches the snapshot up.
#[derive(Clone)]
pub struct GiftStore {
    index: Arc<RwLock<HashMap<String, Gift>>>,
    snapshot: Arc<dyn SnapshotStore<Gift>>,
    export_lock: Arc<Mutex<()>>,
    principal: Arc<dyn PrincipalProvider>,
    persistent: bool,
}

impl GiftStore {
    /// Build the store and seed it from the snapshot.
    pub async fn open(
        snapshot: Arc<dyn SnapshotStore<Gift>>,
        principal: Arc<dyn PrincipalProvider>,
        persistent: bool,
    ) -> Result<Arc<Self>, ServiceError> {
        let gifts = snapshot.import_json().await?;
        let total = gifts.len();
        let mut index = HashMap::with_capacity(total);
        for gift in gifts {
            if gift.id.is_empty() {
                warn!(title = %gift.title, "skipping imported gift without id");
                continue;
            }
            index.insert(gift.id.clone(), gift);
        }
        info!(imported = index.len(), read = total, persistent, "gifts imported");
        Ok(Arc::new(Self {
            index: Arc::new(RwLock::new(index)),
            snapshot,
            export_lock: Arc::new(Mutex::new(())),
            principal,
            persistent,
        }))
    }

    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    pub async fn len(&self) -> usize {
        self.index.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.index.read().await.is_empty()
    }

    async fn sorted(&self) -> Vec<Gift> {
        let map = self.index.read().await;
        let mut gifts: Vec<Gift> = map.values().cloned().collect();
        drop(map);
        gifts.sort_by(Gift::cmp_by_title);
        gifts
    }

    /// Write the whole collection to the snapshot, regardless of the
    /// persistence flag.
    pub async fn save(&self) -> Result<(), ServiceError> {
        let _guard = self.export_lock.lock().await;
        let gifts = self.sorted().await;
        self.snapshot.export_json(&gifts).await
    }

    async fn persist(&self) -> Result<(), ServiceError> {
        if self.persistent {
            self.save().await?;
        }
        Ok(())
    }

    /// Sorted page `[position, position + size)`. `query_type` and `query`
    /// are accepted for interface compatibility and do not filter.
    pub async fn list(
        &self,
        query_type: Option<&str>,
        query: Option<&str>,
        position: usize,
        size: usize,
    ) -> Vec<Gift> {
        let page = Pagination::new(position, size);
        let selection = page.window(&self.sorted().await);
        info!(
            query = query.unwrap_or_default(),
            query_type = query_type.unwrap_or_default(),
            position,
            size,
            count = selection.len(),
            "list gifts"
        );
        selection
    }

    pub async fn create(&self, input: GiftInput) -> Result<Gift, ServiceError> {
        debug!(payload = ?input, "create gift");
        let mut map = self.index.write().await;
        if let Some(client_id) = input.client_id() {
            if map.contains_key(client_id) {
                return Err(ServiceError::duplicate(client_id));
            }
            return Err(ServiceError::Validation(format!(
                "gift <{client_id}> contains an ID generated on the client; this is not allowed"
            )));
        }
        input.validate_title()?;

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let principal = self.principal.current_principal();
        let gift = Gift {
            id: id.clone(),
            title: input.title,
            description: input.description,
            created_at: now,
            created_by: principal.clone(),
            modified_at: now,
            modified_by: principal,
        };
        map.insert(id, gift.clone());
        drop(map);

        info!(id = %gift.id, title = %gift.title, "gift created");
        self.persist().await?;
        Ok(gift)
    }

    pub async fn read(&self, id: &str) -> Result<Gift, ServiceError> {
        let gift = self.index.read().await.get(id).cloned().ok_or_else(|| ServiceError::not_found(id))?;
        debug!(%id, title = %gift.title, "gift read");
        Ok(gift)
    }

    /// Overwrite title and description. Client values for `created_*` are
    /// logged and ignored.
    pub async fn update(&self, id: &str, input: GiftInput) -> Result<Gift, ServiceError> {
        let mut map = self.index.write().await;
        let existing = map.get_mut(id).ok_or_else(|| ServiceError::not_found(id))?;
        input.validate_title()?;

        if let Some(created_at) = input.created_at.filter(|at| *at != existing.created_at) {
            warn!(%id, %created_at, "ignoring createdAt value set on the client");
        }
        if let Some(created_by) = input.created_by.as_deref().filter(|by| !by.eq_ignore_ascii_case(&existing.created_by)) {
            warn!(%id, created_by, "ignoring createdBy value set on the client");
        }

        existing.title = input.title;
        existing.description = input.description;
        existing.modified_at = Utc::now().max(existing.modified_at);
        existing.modified_by = self.principal.current_principal();
        let updated = existing.clone();
        drop(map);

        info!(%id, title = %updated.title, "gift updated");
        self.persist().await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let mut map = self.index.write().await;
        if !map.contains_key(id) {
            return Err(ServiceError::not_found(id));
        }
        if map.remove(id).is_none() {
            return Err(ServiceError::Internal(format!(
                "gift <{id}> can not be removed, because it does not exist in the index"
            )));
        }
        drop(map);

        info!(%id, "gift deleted");
        self.persist().await
    }
}

#[async_trait::async_trait]
impl GiftService for GiftStore {
    async fn list(&self, query_type: Option<&str>, query: Option<&str>, position: usize, size: usize) -> Vec<Gift> {
        self.list(query_type, query, position, size).await
    }
    async fn create(&self, input: GiftInput) -> Result<Gift, ServiceError> { self.create(input).await }
    async fn read(&self, id: &str) -> Result<Gift, ServiceError> { self.read(id).await }
    async fn update(&self, id: &str, input: GiftInput) -> Result<Gift, ServiceError> { self.update(id, input).await }
    async fn delete(&self, id: &str) -> Result<(), ServiceError> { self.delete(id).await }
}
