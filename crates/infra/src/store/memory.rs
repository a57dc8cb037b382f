//! In-memory store implementations (tests/dev and the default wiring).

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;

use stockroom_auth::{User, UserRole, UserSettings};
use stockroom_catalog::Product;
use stockroom_core::{NotificationId, ProductId, UserId};
use stockroom_inventory::InventoryHistoryRecord;
use stockroom_notifications::Notification;

use super::{
    InventoryHistoryStore, NotificationStore, Page, ProductQuery, ProductStore, StoreError,
    StoreResult, UserSettingsStore, UserStore,
};

fn poisoned<T>(_: T) -> StoreError {
    StoreError::unavailable("lock poisoned")
}

#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for InMemoryUserStore {
    fn insert(&self, user: User) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(poisoned)?;
        map.insert(user.id, user);
        Ok(())
    }

    fn get(&self, id: &UserId) -> StoreResult<Option<User>> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.get(id).cloned())
    }

    fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.values().find(|u| u.username == username).cloned())
    }

    fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> StoreResult<Option<User>> {
        let email = email.to_lowercase();
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map
            .values()
            .find(|u| u.username == username || u.email == email)
            .cloned())
    }

    fn update(&self, user: User) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(poisoned)?;
        map.insert(user.id, user);
        Ok(())
    }

    fn list_by_role(&self, role: UserRole) -> StoreResult<Vec<User>> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.values().filter(|u| u.role == role).cloned().collect())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryUserSettingsStore {
    inner: RwLock<HashMap<UserId, UserSettings>>,
}

impl InMemoryUserSettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserSettingsStore for InMemoryUserSettingsStore {
    fn get(&self, user_id: &UserId) -> StoreResult<Option<UserSettings>> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.get(user_id).cloned())
    }

    fn get_or_default(&self, user_id: UserId) -> StoreResult<UserSettings> {
        let mut map = self.inner.write().map_err(poisoned)?;
        Ok(map
            .entry(user_id)
            .or_insert_with(|| UserSettings::defaults_for(user_id))
            .clone())
    }

    fn upsert(&self, settings: UserSettings) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(poisoned)?;
        map.insert(settings.user_id, settings);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: RwLock<HashMap<ProductId, Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_search(product: &Product, needle: &str) -> bool {
    product.name.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
        || product.category.to_lowercase().contains(needle)
        || product.tags.iter().any(|t| t.to_lowercase().contains(needle))
}

fn sort_products(items: &mut [Product], sort: Option<&str>) {
    let (field, descending) = match sort {
        Some(s) => match s.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (s, false),
        },
        // Default: newest first.
        None => ("created_at", true),
    };

    items.sort_by(|a, b| {
        let ord = match field {
            "name" => a.name.cmp(&b.name),
            "price" => a.price.cmp(&b.price),
            "quantity" => a.quantity.cmp(&b.quantity),
            _ => a.created_at.cmp(&b.created_at),
        };
        // Id as tiebreak keeps pagination stable across requests.
        let ord = ord.then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()));
        if descending { ord.reverse() } else { ord }
    });
}

impl ProductStore for InMemoryProductStore {
    fn insert(&self, product: Product) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(poisoned)?;
        map.insert(product.id, product);
        Ok(())
    }

    fn get(&self, id: &ProductId) -> StoreResult<Option<Product>> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.get(id).cloned())
    }

    fn update(&self, product: Product) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(poisoned)?;
        map.insert(product.id, product);
        Ok(())
    }

    fn delete(&self, id: &ProductId) -> StoreResult<bool> {
        let mut map = self.inner.write().map_err(poisoned)?;
        Ok(map.remove(id).is_some())
    }

    fn set_quantity(
        &self,
        id: &ProductId,
        quantity: i64,
    ) -> StoreResult<Option<(i64, Product)>> {
        let mut map = self.inner.write().map_err(poisoned)?;
        let Some(product) = map.get_mut(id) else {
            return Ok(None);
        };

        let previous = product.quantity;
        product.quantity = quantity;
        product.updated_at = Utc::now();
        Ok(Some((previous, product.clone())))
    }

    fn query(&self, query: &ProductQuery) -> StoreResult<Page<Product>> {
        let needle = query.search.as_ref().map(|s| s.to_lowercase());
        let map = self.inner.read().map_err(poisoned)?;

        let mut items: Vec<Product> = map
            .values()
            .filter(|p| {
                query
                    .category
                    .as_ref()
                    .is_none_or(|c| p.category.eq_ignore_ascii_case(c))
                    && query.min_price.is_none_or(|m| p.price >= m)
                    && query.max_price.is_none_or(|m| p.price <= m)
                    && query.featured.is_none_or(|f| p.featured == f)
                    && needle.as_ref().is_none_or(|n| matches_search(p, n))
            })
            .cloned()
            .collect();

        sort_products(&mut items, query.sort.as_deref());

        let limit = if query.limit == 0 {
            ProductQuery::DEFAULT_LIMIT
        } else {
            query.limit
        };
        Ok(Page::slice(items, query.page, limit))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    inner: RwLock<Vec<InventoryHistoryRecord>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InventoryHistoryStore for InMemoryHistoryStore {
    fn append(&self, record: InventoryHistoryRecord) -> StoreResult<()> {
        let mut records = self.inner.write().map_err(poisoned)?;
        records.push(record);
        Ok(())
    }

    fn for_product(&self, product_id: &ProductId) -> StoreResult<Vec<InventoryHistoryRecord>> {
        let records = self.inner.read().map_err(poisoned)?;
        // Append order is chronological; reverse for newest-first.
        Ok(records
            .iter()
            .rev()
            .filter(|r| r.product_id == *product_id)
            .cloned()
            .collect())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryNotificationStore {
    inner: RwLock<HashMap<NotificationId, Notification>>,
}

impl InMemoryNotificationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(a: &Notification, b: &Notification) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.as_uuid().cmp(a.id.as_uuid()))
}

impl NotificationStore for InMemoryNotificationStore {
    fn insert(&self, notification: Notification) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(poisoned)?;
        map.insert(notification.id, notification);
        Ok(())
    }

    fn get(&self, id: &NotificationId) -> StoreResult<Option<Notification>> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.get(id).cloned())
    }

    fn update(&self, notification: Notification) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(poisoned)?;
        map.insert(notification.id, notification);
        Ok(())
    }

    fn delete(&self, id: &NotificationId) -> StoreResult<bool> {
        let mut map = self.inner.write().map_err(poisoned)?;
        Ok(map.remove(id).is_some())
    }

    fn for_user(
        &self,
        user_id: &UserId,
        read: Option<bool>,
        page: u64,
        limit: u64,
    ) -> StoreResult<Page<Notification>> {
        let map = self.inner.read().map_err(poisoned)?;
        let mut items: Vec<Notification> = map
            .values()
            .filter(|n| n.user_id == *user_id && read.is_none_or(|r| n.read == r))
            .cloned()
            .collect();
        items.sort_by(newest_first);
        Ok(Page::slice(items, page, limit))
    }

    fn unread_count(&self, user_id: &UserId) -> StoreResult<u64> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map
            .values()
            .filter(|n| n.user_id == *user_id && !n.read)
            .count() as u64)
    }

    fn mark_all_read(&self, user_id: &UserId) -> StoreResult<u64> {
        let mut map = self.inner.write().map_err(poisoned)?;
        let mut flipped = 0;
        for n in map.values_mut() {
            if n.user_id == *user_id && !n.read {
                n.read = true;
                flipped += 1;
            }
        }
        Ok(flipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_catalog::NewProduct;

    fn product(name: &str, price: u64, quantity: i64, featured: bool) -> Product {
        Product::create(NewProduct {
            name: name.to_string(),
            description: format!("{name} description"),
            price,
            category: "general".to_string(),
            tags: vec![],
            quantity,
            low_stock_threshold: None,
            featured,
        })
        .unwrap()
    }

    #[test]
    fn set_quantity_returns_previous_value() {
        let store = InMemoryProductStore::new();
        let p = product("Widget", 100, 10, false);
        let id = p.id;
        store.insert(p).unwrap();

        let (previous, updated) = store.set_quantity(&id, 3).unwrap().unwrap();
        assert_eq!(previous, 10);
        assert_eq!(updated.quantity, 3);

        assert_eq!(store.set_quantity(&ProductId::new(), 1).unwrap(), None);
    }

    #[test]
    fn query_filters_and_paginates() {
        let store = InMemoryProductStore::new();
        store.insert(product("Hammer", 500, 10, true)).unwrap();
        store.insert(product("Nail", 10, 500, false)).unwrap();
        store.insert(product("Saw", 900, 2, true)).unwrap();

        let page = store
            .query(&ProductQuery {
                featured: Some(true),
                sort: Some("price".to_string()),
                page: 1,
                limit: 1,
                ..ProductQuery::default()
            })
            .unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(page.pages, 2);
        assert_eq!(page.items[0].name, "Hammer");

        let found = store
            .query(&ProductQuery {
                search: Some("saw".to_string()),
                limit: 20,
                page: 1,
                ..ProductQuery::default()
            })
            .unwrap();
        assert_eq!(found.total, 1);
        assert_eq!(found.items[0].name, "Saw");
    }

    #[test]
    fn query_price_range() {
        let store = InMemoryProductStore::new();
        store.insert(product("Hammer", 500, 10, false)).unwrap();
        store.insert(product("Nail", 10, 500, false)).unwrap();

        let page = store
            .query(&ProductQuery {
                min_price: Some(100),
                max_price: Some(1000),
                page: 1,
                limit: 20,
                ..ProductQuery::default()
            })
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name, "Hammer");
    }

    #[test]
    fn notifications_mark_all_read_counts_flips() {
        use stockroom_notifications::{Notification, NotificationType};

        let store = InMemoryNotificationStore::new();
        let user = UserId::new();
        for i in 0..3 {
            store
                .insert(Notification::new(
                    user,
                    NotificationType::System,
                    format!("t{i}"),
                    "m",
                    serde_json::Value::Null,
                ))
                .unwrap();
        }

        assert_eq!(store.unread_count(&user).unwrap(), 3);
        assert_eq!(store.mark_all_read(&user).unwrap(), 3);
        assert_eq!(store.mark_all_read(&user).unwrap(), 0);
        assert_eq!(store.unread_count(&user).unwrap(), 0);

        let unread = store.for_user(&user, Some(false), 1, 20).unwrap();
        assert_eq!(unread.total, 0);
    }
}
