use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use super::{check_reused_item, AvailabilityRepository, PriceRepository, RoomRepository};
use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{
    AvailabilityItem, AvailabilityRuleList, ItemDraft, NewAvailabilityList, NewPriceList, NewRoom,
    PriceItem, PriceRuleList, Room,
};

struct StoredAvailabilityList {
    room_id: i64,
    effective_from: NaiveDateTime,
    item_ids: Vec<i64>,
}

struct StoredPriceList {
    room_id: i64,
    effective_from: NaiveDateTime,
    base_price: i64,
    per_guest: bool,
    item_ids: Vec<i64>,
}

/// Id sequences, one per table
#[derive(Default)]
struct Sequences {
    room: i64,
    availability_item: i64,
    availability_list: i64,
    price_item: i64,
    price_list: i64,
}

fn next(seq: &mut i64) -> i64 {
    *seq += 1;
    *seq
}

#[derive(Default)]
struct Arena {
    seq: Sequences,
    rooms: BTreeMap<i64, Room>,
    availability_items: HashMap<i64, (i64, AvailabilityItem)>,
    availability_lists: BTreeMap<i64, StoredAvailabilityList>,
    price_items: HashMap<i64, (i64, PriceItem)>,
    price_lists: BTreeMap<i64, StoredPriceList>,
}

impl Arena {
    fn availability_list(&self, id: i64) -> RepositoryResult<Option<AvailabilityRuleList>> {
        let stored = match self.availability_lists.get(&id) {
            Some(stored) => stored,
            None => return Ok(None),
        };

        let mut items = Vec::with_capacity(stored.item_ids.len());
        for item_id in &stored.item_ids {
            let (_, item) = self.availability_items.get(item_id).ok_or_else(|| {
                RepositoryError::Storage(format!("Dangling availability item {} in list {}", item_id, id))
            })?;
            items.push(item.clone());
        }

        Ok(Some(AvailabilityRuleList {
            id,
            room_id: stored.room_id,
            effective_from: stored.effective_from,
            items,
        }))
    }

    fn price_list(&self, id: i64) -> RepositoryResult<Option<PriceRuleList>> {
        let stored = match self.price_lists.get(&id) {
            Some(stored) => stored,
            None => return Ok(None),
        };

        let mut items = Vec::with_capacity(stored.item_ids.len());
        for item_id in &stored.item_ids {
            let (_, item) = self.price_items.get(item_id).ok_or_else(|| {
                RepositoryError::Storage(format!("Dangling price item {} in list {}", item_id, id))
            })?;
            items.push(item.clone());
        }

        Ok(Some(PriceRuleList {
            id,
            room_id: stored.room_id,
            effective_from: stored.effective_from,
            base_price: stored.base_price,
            per_guest: stored.per_guest,
            items,
        }))
    }

    /// List ids of a room ordered newest first
    fn availability_list_ids(&self, room_id: i64) -> Vec<i64> {
        let mut ids: Vec<(NaiveDateTime, i64)> = self
            .availability_lists
            .iter()
            .filter(|(_, list)| list.room_id == room_id)
            .map(|(id, list)| (list.effective_from, *id))
            .collect();
        ids.sort_unstable_by(|a, b| b.cmp(a));
        ids.into_iter().map(|(_, id)| id).collect()
    }

    fn price_list_ids(&self, room_id: i64) -> Vec<i64> {
        let mut ids: Vec<(NaiveDateTime, i64)> = self
            .price_lists
            .iter()
            .filter(|(_, list)| list.room_id == room_id)
            .map(|(id, list)| (list.effective_from, *id))
            .collect();
        ids.sort_unstable_by(|a, b| b.cmp(a));
        ids.into_iter().map(|(_, id)| id).collect()
    }

    fn ensure_room(&self, room_id: i64) -> RepositoryResult<()> {
        if self.rooms.contains_key(&room_id) {
            Ok(())
        } else {
            Err(RepositoryError::NotFound(format!("Room {} not found", room_id)))
        }
    }
}

/// Process-local store implementing every repository trait.
///
/// All tables sit behind one lock, so a list commit (items, list, room
/// pointer) is atomic with respect to every reader.
#[derive(Default)]
pub struct InMemoryStore {
    arena: RwLock<Arena>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for InMemoryStore {
    async fn create(&self, room: NewRoom) -> RepositoryResult<Room> {
        if room.min_guests < 1 || room.max_guests < room.min_guests {
            return Err(RepositoryError::ConstraintViolation(format!(
                "Invalid guest range {}..={}",
                room.min_guests, room.max_guests
            )));
        }

        let mut arena = self.arena.write().await;
        let id = next(&mut arena.seq.room);
        let created = Room {
            id,
            host_id: room.host_id,
            name: room.name,
            description: room.description,
            address: room.address,
            min_guests: room.min_guests,
            max_guests: room.max_guests,
            photos: room.photos,
            commodities: room.commodities,
            availability_list_id: None,
            price_list_id: None,
            deleted: false,
            created_at: Utc::now().naive_utc(),
        };
        arena.rooms.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Room>> {
        Ok(self.arena.read().await.rooms.get(&id).cloned())
    }

    async fn find_by_host(&self, host_id: i64) -> RepositoryResult<Vec<Room>> {
        let arena = self.arena.read().await;
        Ok(arena
            .rooms
            .values()
            .filter(|room| room.host_id == host_id)
            .cloned()
            .collect())
    }

    async fn find_by_filters(&self, guests: u32, address: &str) -> RepositoryResult<Vec<Room>> {
        let arena = self.arena.read().await;
        Ok(arena
            .rooms
            .values()
            .filter(|room| !room.deleted && room.fits_guests(guests) && room.address_contains(address))
            .cloned()
            .collect())
    }

    async fn soft_delete_by_host(&self, host_id: i64) -> RepositoryResult<u64> {
        let mut arena = self.arena.write().await;
        let mut touched = 0;
        for room in arena
            .rooms
            .values_mut()
            .filter(|room| room.host_id == host_id && !room.deleted)
        {
            room.deleted = true;
            touched += 1;
        }
        Ok(touched)
    }
}

#[async_trait]
impl AvailabilityRepository for InMemoryStore {
    async fn create_list(&self, list: NewAvailabilityList) -> RepositoryResult<AvailabilityRuleList> {
        let mut arena = self.arena.write().await;
        arena.ensure_room(list.room_id)?;

        // Check every reused id before writing anything
        for draft in &list.items {
            if let ItemDraft::Existing(id) = draft {
                let owner = arena.availability_items.get(id).map(|(room_id, _)| *room_id);
                check_reused_item("Availability", *id, owner, list.room_id)?;
            }
        }

        let mut item_ids = Vec::with_capacity(list.items.len());
        for draft in list.items {
            let item_id = match draft {
                ItemDraft::Existing(id) => id,
                ItemDraft::New(item) => {
                    let id = next(&mut arena.seq.availability_item);
                    let row = AvailabilityItem {
                        id,
                        date_from: item.date_from,
                        date_to: item.date_to,
                        available: item.available,
                    };
                    arena.availability_items.insert(id, (list.room_id, row));
                    id
                }
            };
            item_ids.push(item_id);
        }

        let list_id = next(&mut arena.seq.availability_list);
        arena.availability_lists.insert(
            list_id,
            StoredAvailabilityList {
                room_id: list.room_id,
                effective_from: list.effective_from,
                item_ids,
            },
        );
        if let Some(room) = arena.rooms.get_mut(&list.room_id) {
            room.availability_list_id = Some(list_id);
        }

        arena
            .availability_list(list_id)?
            .ok_or_else(|| RepositoryError::Storage(format!("Availability list {} vanished", list_id)))
    }

    async fn find_list_by_id(&self, id: i64) -> RepositoryResult<Option<AvailabilityRuleList>> {
        self.arena.read().await.availability_list(id)
    }

    async fn find_lists_by_room(&self, room_id: i64) -> RepositoryResult<Vec<AvailabilityRuleList>> {
        let arena = self.arena.read().await;
        let mut lists = Vec::new();
        for id in arena.availability_list_ids(room_id) {
            if let Some(list) = arena.availability_list(id)? {
                lists.push(list);
            }
        }
        Ok(lists)
    }

    async fn find_current_for_room(&self, room_id: i64) -> RepositoryResult<Option<AvailabilityRuleList>> {
        let arena = self.arena.read().await;
        match arena.availability_list_ids(room_id).first() {
            Some(id) => arena.availability_list(*id),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl PriceRepository for InMemoryStore {
    async fn create_list(&self, list: NewPriceList) -> RepositoryResult<PriceRuleList> {
        if list.base_price < 0 {
            return Err(RepositoryError::ConstraintViolation("Negative base price".into()));
        }

        let mut arena = self.arena.write().await;
        arena.ensure_room(list.room_id)?;

        for draft in &list.items {
            match draft {
                ItemDraft::Existing(id) => {
                    let owner = arena.price_items.get(id).map(|(room_id, _)| *room_id);
                    check_reused_item("Price", *id, owner, list.room_id)?;
                }
                ItemDraft::New(item) if item.price < 0 => {
                    return Err(RepositoryError::ConstraintViolation("Negative item price".into()));
                }
                ItemDraft::New(_) => {}
            }
        }

        let mut item_ids = Vec::with_capacity(list.items.len());
        for draft in list.items {
            let item_id = match draft {
                ItemDraft::Existing(id) => id,
                ItemDraft::New(item) => {
                    let id = next(&mut arena.seq.price_item);
                    let row = PriceItem {
                        id,
                        date_from: item.date_from,
                        date_to: item.date_to,
                        price: item.price,
                    };
                    arena.price_items.insert(id, (list.room_id, row));
                    id
                }
            };
            item_ids.push(item_id);
        }

        let list_id = next(&mut arena.seq.price_list);
        arena.price_lists.insert(
            list_id,
            StoredPriceList {
                room_id: list.room_id,
                effective_from: list.effective_from,
                base_price: list.base_price,
                per_guest: list.per_guest,
                item_ids,
            },
        );
        if let Some(room) = arena.rooms.get_mut(&list.room_id) {
            room.price_list_id = Some(list_id);
        }

        arena
            .price_list(list_id)?
            .ok_or_else(|| RepositoryError::Storage(format!("Price list {} vanished", list_id)))
    }

    async fn find_list_by_id(&self, id: i64) -> RepositoryResult<Option<PriceRuleList>> {
        self.arena.read().await.price_list(id)
    }

    async fn find_lists_by_room(&self, room_id: i64) -> RepositoryResult<Vec<PriceRuleList>> {
        let arena = self.arena.read().await;
        let mut lists = Vec::new();
        for id in arena.price_list_ids(room_id) {
            if let Some(list) = arena.price_list(id)? {
                lists.push(list);
            }
        }
        Ok(lists)
    }

    async fn find_current_for_room(&self, room_id: i64) -> RepositoryResult<Option<PriceRuleList>> {
        let arena = self.arena.read().await;
        match arena.price_list_ids(room_id).first() {
            Some(id) => arena.price_list(*id),
            None => Ok(None),
        }
    }
}
