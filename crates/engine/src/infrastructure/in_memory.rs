//! In-memory repositories with real commit/rollback, for tests.
//!
//! A session works on a private copy of the tables and publishes it on commit, so
//! tests can observe exactly what a failed unit of work left behind. The tables
//! enforce the same references as the Postgres schema. Faults can be injected per
//! operation.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use omega_domain::{
    Dinosaur, DinosaurId, DinosaurName, Health, HealthMultiplier, Melee, MeleeMultiplier,
    UniqueDinosaur, UniqueDinosaurId, UniqueName, UniqueVariants, Variant, VariantGroup,
    VariantGroupId, VariantGroupName, VariantId, VariantName, UNIQUE_VARIANT_COUNT,
};

use crate::infrastructure::ports::{
    CreateDinosaur, CreateUniqueDinosaur, DinosaurCommandRepo, RepoError, Transactioner,
    TxSession, UniqueCommandRepo, UniqueQueryRepo, UniqueRepositories, UniqueVariantLinks,
    UniqueVariantsCommandRepo, UpdateDinosaur, UpdateUniqueDinosaur, VariantGroupRepo,
    VariantRepo,
};

/// Repository operations a fault can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    InsertDinosaur,
    UpdateDinosaur,
    DeleteDinosaur,
    InsertUnique,
    UpdateUnique,
    DeleteUnique,
    InsertUniqueVariants,
    ReplaceUniqueVariants,
    DeleteUniqueVariants,
    GetUnique,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Return `RepoError::Database`.
    Error,
    Panic,
    /// Never finish (sleeps for an hour).
    Hang,
}

#[derive(Debug, Clone)]
struct StoredDinosaur {
    name: DinosaurName,
    health: Health,
    melee: Melee,
}

#[derive(Debug, Clone)]
struct StoredUnique {
    dinosaur_id: DinosaurId,
    name: UniqueName,
    health_multiplier: HealthMultiplier,
    damage_multiplier: MeleeMultiplier,
}

#[derive(Debug, Clone, Default)]
struct Tables {
    next_id: i32,
    groups: BTreeMap<i32, VariantGroupName>,
    variants: BTreeMap<i32, (i32, VariantName)>,
    dinosaurs: BTreeMap<i32, StoredDinosaur>,
    uniques: BTreeMap<i32, StoredUnique>,
    unique_variants: BTreeMap<i32, [VariantId; UNIQUE_VARIANT_COUNT]>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn variant(&self, id: VariantId) -> Result<Variant, RepoError> {
        let (group_id, name) = self
            .variants
            .get(&id.value())
            .ok_or_else(|| RepoError::not_found("Variant", id))?;
        let group = self
            .groups
            .get(group_id)
            .ok_or_else(|| RepoError::not_found("VariantGroup", group_id))?;
        Ok(Variant::new(id, group.clone(), name.clone()))
    }

    fn unique(&self, id: UniqueDinosaurId) -> Result<UniqueDinosaur, RepoError> {
        let unique = self
            .uniques
            .get(&id.value())
            .ok_or_else(|| RepoError::not_found("UniqueDinosaur", id))?;
        let pair = self
            .unique_variants
            .get(&id.value())
            .ok_or_else(|| RepoError::not_found("UniqueDinosaur", id))?;
        let base = self
            .dinosaurs
            .get(&unique.dinosaur_id.value())
            .ok_or_else(|| RepoError::not_found("Dinosaur", unique.dinosaur_id))?;

        Ok(UniqueDinosaur::new(
            Dinosaur::new(
                unique.dinosaur_id,
                base.name.clone(),
                base.health,
                base.melee,
            ),
            id,
            unique.name.clone(),
            unique.health_multiplier,
            unique.damage_multiplier,
            UniqueVariants::new([self.variant(pair[0])?, self.variant(pair[1])?]),
        ))
    }

    fn check_variants_exist(&self, ids: &[VariantId]) -> Result<(), RepoError> {
        match ids.iter().find(|id| !self.variants.contains_key(&id.value())) {
            Some(missing) => Err(RepoError::constraint(format!(
                "unique_variants.variant_id references missing variant {missing}"
            ))),
            None => Ok(()),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Default)]
struct Counters {
    begins: usize,
    commits: usize,
    rollbacks: usize,
}

/// Shared in-memory database. Clones share the same committed state.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    committed: Arc<Mutex<Tables>>,
    faults: Arc<Mutex<HashMap<Operation, Fault>>>,
    counters: Arc<Mutex<Counters>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inject(&self, operation: Operation, fault: Fault) {
        lock(&self.faults).insert(operation, fault);
    }

    fn repo(&self, tables: Arc<Mutex<Tables>>) -> InMemoryRepo {
        InMemoryRepo {
            tables,
            faults: Arc::clone(&self.faults),
        }
    }

    fn bundle(&self, tables: Arc<Mutex<Tables>>) -> UniqueRepositories {
        let repo = Arc::new(self.repo(tables));
        UniqueRepositories {
            dinosaurs: repo.clone(),
            uniques: repo.clone(),
            unique_variants: repo.clone(),
            query: repo,
        }
    }

    /// Repositories that write straight to committed state.
    pub fn unique_repositories(&self) -> UniqueRepositories {
        self.bundle(Arc::clone(&self.committed))
    }

    pub fn variant_repo(&self) -> Arc<dyn VariantRepo> {
        Arc::new(self.repo(Arc::clone(&self.committed)))
    }

    pub fn variant_group_repo(&self) -> Arc<dyn VariantGroupRepo> {
        Arc::new(self.repo(Arc::clone(&self.committed)))
    }

    pub fn transactioner(&self) -> Arc<dyn Transactioner<UniqueRepositories>> {
        Arc::new(self.clone())
    }

    /// Insert a group and a variant in it, returning the variant id.
    pub fn seed_variant(&self, group: &str, name: &str) -> VariantId {
        let mut tables = lock(&self.committed);
        let group_name = VariantGroupName::new(group).unwrap_or_else(|e| panic!("{e}"));
        let group_id = match tables.groups.iter().find(|(_, g)| **g == group_name) {
            Some((id, _)) => *id,
            None => {
                let id = tables.next_id();
                tables.groups.insert(id, group_name);
                id
            }
        };
        let id = tables.next_id();
        let name = VariantName::new(name).unwrap_or_else(|e| panic!("{e}"));
        tables.variants.insert(id, (group_id, name));
        VariantId::from_i32(id)
    }

    pub fn dinosaur_count(&self) -> usize {
        lock(&self.committed).dinosaurs.len()
    }

    pub fn unique_count(&self) -> usize {
        lock(&self.committed).uniques.len()
    }

    pub fn unique_variant_count(&self) -> usize {
        lock(&self.committed).unique_variants.len()
    }

    pub fn commits(&self) -> usize {
        lock(&self.counters).commits
    }

    pub fn rollbacks(&self) -> usize {
        lock(&self.counters).rollbacks
    }

    pub fn begins(&self) -> usize {
        lock(&self.counters).begins
    }
}

#[async_trait]
impl Transactioner<UniqueRepositories> for InMemoryStore {
    async fn begin(&self) -> Result<Box<dyn TxSession<UniqueRepositories>>, RepoError> {
        lock(&self.counters).begins += 1;
        let snapshot = lock(&self.committed).clone();
        Ok(Box::new(InMemorySession {
            store: self.clone(),
            working: Arc::new(Mutex::new(snapshot)),
        }))
    }
}

struct InMemorySession {
    store: InMemoryStore,
    working: Arc<Mutex<Tables>>,
}

#[async_trait]
impl TxSession<UniqueRepositories> for InMemorySession {
    fn repositories(&self) -> UniqueRepositories {
        self.store.bundle(Arc::clone(&self.working))
    }

    async fn commit(self: Box<Self>) -> Result<(), RepoError> {
        let working = lock(&self.working).clone();
        *lock(&self.store.committed) = working;
        lock(&self.store.counters).commits += 1;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), RepoError> {
        lock(&self.store.counters).rollbacks += 1;
        Ok(())
    }
}

struct InMemoryRepo {
    tables: Arc<Mutex<Tables>>,
    faults: Arc<Mutex<HashMap<Operation, Fault>>>,
}

impl InMemoryRepo {
    async fn trip(&self, operation: Operation) -> Result<(), RepoError> {
        let fault = lock(&self.faults).get(&operation).copied();
        match fault {
            None => Ok(()),
            Some(Fault::Error) => Err(RepoError::database(
                "in_memory",
                format!("{operation:?} failed"),
            )),
            Some(Fault::Panic) => panic!("{operation:?} panicked"),
            Some(Fault::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(RepoError::timeout("in_memory"))
            }
        }
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        lock(&self.tables)
    }
}

// =============================================================================
// Unique creature repositories
// =============================================================================

#[async_trait]
impl DinosaurCommandRepo for InMemoryRepo {
    async fn insert(&self, dinosaur: &CreateDinosaur) -> Result<DinosaurId, RepoError> {
        self.trip(Operation::InsertDinosaur).await?;
        let mut tables = self.tables();
        let id = tables.next_id();
        tables.dinosaurs.insert(
            id,
            StoredDinosaur {
                name: dinosaur.name.clone(),
                health: dinosaur.health,
                melee: dinosaur.melee,
            },
        );
        Ok(DinosaurId::from_i32(id))
    }

    async fn update(&self, dinosaur: &UpdateDinosaur) -> Result<(), RepoError> {
        self.trip(Operation::UpdateDinosaur).await?;
        let mut tables = self.tables();
        let stored = tables
            .dinosaurs
            .get_mut(&dinosaur.id.value())
            .ok_or_else(|| RepoError::not_found("Dinosaur", dinosaur.id))?;
        stored.name = dinosaur.name.clone();
        stored.health = dinosaur.health;
        stored.melee = dinosaur.melee;
        Ok(())
    }

    async fn delete(&self, id: DinosaurId) -> Result<(), RepoError> {
        self.trip(Operation::DeleteDinosaur).await?;
        let mut tables = self.tables();
        if tables.uniques.values().any(|u| u.dinosaur_id == id) {
            return Err(RepoError::constraint(format!(
                "dinosaur {id} is still referenced by a unique"
            )));
        }
        tables.dinosaurs.remove(&id.value());
        Ok(())
    }
}

#[async_trait]
impl UniqueCommandRepo for InMemoryRepo {
    async fn insert(&self, unique: &CreateUniqueDinosaur) -> Result<UniqueDinosaurId, RepoError> {
        self.trip(Operation::InsertUnique).await?;
        let mut tables = self.tables();
        if !tables.dinosaurs.contains_key(&unique.dinosaur_id.value()) {
            return Err(RepoError::constraint(format!(
                "uniques.dinosaur_id references missing dinosaur {}",
                unique.dinosaur_id
            )));
        }
        let id = tables.next_id();
        tables.uniques.insert(
            id,
            StoredUnique {
                dinosaur_id: unique.dinosaur_id,
                name: unique.name.clone(),
                health_multiplier: unique.health_multiplier,
                damage_multiplier: unique.damage_multiplier,
            },
        );
        Ok(UniqueDinosaurId::from_i32(id))
    }

    async fn update(&self, unique: &UpdateUniqueDinosaur) -> Result<(), RepoError> {
        self.trip(Operation::UpdateUnique).await?;
        let mut tables = self.tables();
        let stored = tables
            .uniques
            .get_mut(&unique.id.value())
            .ok_or_else(|| RepoError::not_found("UniqueDinosaur", unique.id))?;
        stored.dinosaur_id = unique.dinosaur_id;
        stored.name = unique.name.clone();
        stored.health_multiplier = unique.health_multiplier;
        stored.damage_multiplier = unique.damage_multiplier;
        Ok(())
    }

    async fn delete(&self, id: UniqueDinosaurId) -> Result<(), RepoError> {
        self.trip(Operation::DeleteUnique).await?;
        let mut tables = self.tables();
        tables.uniques.remove(&id.value());
        tables.unique_variants.remove(&id.value());
        Ok(())
    }
}

#[async_trait]
impl UniqueVariantsCommandRepo for InMemoryRepo {
    async fn insert(&self, links: &UniqueVariantLinks) -> Result<(), RepoError> {
        self.trip(Operation::InsertUniqueVariants).await?;
        let mut tables = self.tables();
        if !tables.uniques.contains_key(&links.unique_id.value()) {
            return Err(RepoError::constraint(format!(
                "unique_variants.unique_id references missing unique {}",
                links.unique_id
            )));
        }
        if tables.unique_variants.contains_key(&links.unique_id.value()) {
            return Err(RepoError::constraint(format!(
                "unique {} already has variants",
                links.unique_id
            )));
        }
        tables.check_variants_exist(&links.variant_ids)?;
        tables
            .unique_variants
            .insert(links.unique_id.value(), links.variant_ids);
        Ok(())
    }

    async fn replace(&self, links: &UniqueVariantLinks) -> Result<(), RepoError> {
        self.trip(Operation::ReplaceUniqueVariants).await?;
        let mut tables = self.tables();
        tables.check_variants_exist(&links.variant_ids)?;
        tables
            .unique_variants
            .insert(links.unique_id.value(), links.variant_ids);
        Ok(())
    }

    async fn delete(&self, unique_id: UniqueDinosaurId) -> Result<(), RepoError> {
        self.trip(Operation::DeleteUniqueVariants).await?;
        self.tables().unique_variants.remove(&unique_id.value());
        Ok(())
    }
}

#[async_trait]
impl UniqueQueryRepo for InMemoryRepo {
    async fn get(&self, id: UniqueDinosaurId) -> Result<UniqueDinosaur, RepoError> {
        self.trip(Operation::GetUnique).await?;
        self.tables().unique(id)
    }

    async fn list(&self) -> Result<Vec<UniqueDinosaur>, RepoError> {
        let tables = self.tables();
        tables
            .uniques
            .keys()
            .filter(|id| tables.unique_variants.contains_key(*id))
            .map(|id| tables.unique(UniqueDinosaurId::from_i32(*id)))
            .collect()
    }
}

// =============================================================================
// Variant catalog repositories
// =============================================================================

#[async_trait]
impl VariantGroupRepo for InMemoryRepo {
    async fn get(&self, id: VariantGroupId) -> Result<VariantGroup, RepoError> {
        self.tables()
            .groups
            .get(&id.value())
            .map(|name| VariantGroup::new(id, name.clone()))
            .ok_or_else(|| RepoError::not_found("VariantGroup", id))
    }

    async fn list(&self) -> Result<Vec<VariantGroup>, RepoError> {
        Ok(self
            .tables()
            .groups
            .iter()
            .map(|(id, name)| VariantGroup::new(VariantGroupId::from_i32(*id), name.clone()))
            .collect())
    }

    async fn insert(&self, name: &VariantGroupName) -> Result<VariantGroupId, RepoError> {
        let mut tables = self.tables();
        if tables.groups.values().any(|existing| existing == name) {
            return Err(RepoError::constraint(format!("group {name} already exists")));
        }
        let id = tables.next_id();
        tables.groups.insert(id, name.clone());
        Ok(VariantGroupId::from_i32(id))
    }

    async fn update(&self, group: &VariantGroup) -> Result<(), RepoError> {
        let mut tables = self.tables();
        let stored = tables
            .groups
            .get_mut(&group.id().value())
            .ok_or_else(|| RepoError::not_found("VariantGroup", group.id()))?;
        *stored = group.name().clone();
        Ok(())
    }

    async fn delete(&self, id: VariantGroupId) -> Result<(), RepoError> {
        let mut tables = self.tables();
        if tables.variants.values().any(|(group_id, _)| *group_id == id.value()) {
            return Err(RepoError::constraint(format!(
                "group {id} is still referenced by a variant"
            )));
        }
        tables.groups.remove(&id.value());
        Ok(())
    }
}

#[async_trait]
impl VariantRepo for InMemoryRepo {
    async fn get(&self, id: VariantId) -> Result<Variant, RepoError> {
        self.tables().variant(id)
    }

    async fn list(&self) -> Result<Vec<Variant>, RepoError> {
        let tables = self.tables();
        tables
            .variants
            .keys()
            .map(|id| tables.variant(VariantId::from_i32(*id)))
            .collect()
    }

    async fn insert(
        &self,
        group_id: VariantGroupId,
        name: &VariantName,
    ) -> Result<VariantId, RepoError> {
        let mut tables = self.tables();
        if !tables.groups.contains_key(&group_id.value()) {
            return Err(RepoError::constraint(format!(
                "variants.group_id references missing group {group_id}"
            )));
        }
        let id = tables.next_id();
        tables.variants.insert(id, (group_id.value(), name.clone()));
        Ok(VariantId::from_i32(id))
    }

    async fn update(
        &self,
        id: VariantId,
        group_id: VariantGroupId,
        name: &VariantName,
    ) -> Result<(), RepoError> {
        let mut tables = self.tables();
        if !tables.groups.contains_key(&group_id.value()) {
            return Err(RepoError::constraint(format!(
                "variants.group_id references missing group {group_id}"
            )));
        }
        let stored = tables
            .variants
            .get_mut(&id.value())
            .ok_or_else(|| RepoError::not_found("Variant", id))?;
        *stored = (group_id.value(), name.clone());
        Ok(())
    }

    async fn delete(&self, id: VariantId) -> Result<(), RepoError> {
        let mut tables = self.tables();
        if tables
            .unique_variants
            .values()
            .any(|pair| pair.contains(&id))
        {
            return Err(RepoError::constraint(format!(
                "variant {id} is still referenced by a unique"
            )));
        }
        tables.variants.remove(&id.value());
        Ok(())
    }
}
