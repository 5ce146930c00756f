//! Customer browsing sessions
//!
//! A session is created when a customer scans a table QR and carries the
//! restaurant/table context, the cart, and the customer identity once
//! known. Sessions live in process memory behind a DashMap and expire on a
//! fixed TTL from creation. Scanning a different table issues a fresh
//! token with an empty cart; the old session simply ages out.

use crate::orders::Cart;
use crate::utils::now_millis;
use dashmap::DashMap;
use shared::{AppError, AppResult};
use uuid::Uuid;

/// Customer identity attached to a session after first checkout
#[derive(Debug, Clone)]
pub struct SessionCustomer {
    /// "user:key" form
    pub id: String,
    pub phone: String,
    pub name: String,
}

/// One customer's browsing session
#[derive(Debug, Clone)]
pub struct CustomerSession {
    pub token: String,
    /// "restaurant:key" form
    pub restaurant_id: String,
    pub restaurant_slug: String,
    pub restaurant_name: String,
    /// "dining_table:key" form
    pub table_id: String,
    pub table_number: String,
    pub cart: Cart,
    pub customer: Option<SessionCustomer>,
    /// Epoch milliseconds
    pub created_at: i64,
}

/// 无锁并发的 session 存储
///
/// TTL 从创建时刻起计算，过期的 session 在访问时惰性移除。
#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<String, CustomerSession>,
    ttl_millis: i64,
}

impl SessionStore {
    pub fn new(ttl_hours: u64) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl_millis: (ttl_hours as i64) * 60 * 60 * 1000,
        }
    }

    /// Create a session bound to a restaurant and table, empty cart
    pub fn create(
        &self,
        restaurant_id: String,
        restaurant_slug: String,
        restaurant_name: String,
        table_id: String,
        table_number: String,
    ) -> CustomerSession {
        let session = CustomerSession {
            token: Uuid::new_v4().simple().to_string(),
            restaurant_id,
            restaurant_slug,
            restaurant_name,
            table_id,
            table_number,
            cart: Cart::new(),
            customer: None,
            created_at: now_millis(),
        };
        self.sessions.insert(session.token.clone(), session.clone());
        session
    }

    fn is_expired(&self, session: &CustomerSession) -> bool {
        now_millis() - session.created_at > self.ttl_millis
    }

    /// Snapshot of a live session
    ///
    /// Expired sessions are removed on access and reported as absent.
    pub fn get(&self, token: &str) -> Option<CustomerSession> {
        let expired = match self.sessions.get(token) {
            Some(entry) => {
                if self.is_expired(&entry) {
                    true
                } else {
                    return Some(entry.clone());
                }
            }
            None => return None,
        };
        if expired {
            self.sessions.remove(token);
        }
        None
    }

    /// Mutate a live session in place and return the updated snapshot
    pub fn update<F>(&self, token: &str, f: F) -> AppResult<CustomerSession>
    where
        F: FnOnce(&mut CustomerSession),
    {
        let mut entry = self
            .sessions
            .get_mut(token)
            .ok_or_else(AppError::session_expired)?;
        if self.is_expired(&entry) {
            drop(entry);
            self.sessions.remove(token);
            return Err(AppError::session_expired());
        }
        f(&mut entry);
        Ok(entry.clone())
    }

    /// Drop every expired session
    pub fn purge_expired(&self) {
        self.sessions.retain(|_, s| now_millis() - s.created_at <= self.ttl_millis);
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SessionStore {
        SessionStore::new(24)
    }

    fn create_session(store: &SessionStore) -> CustomerSession {
        store.create(
            "restaurant:r1".to_string(),
            "golden-dragon".to_string(),
            "Golden Dragon".to_string(),
            "dining_table:t5".to_string(),
            "5".to_string(),
        )
    }

    #[test]
    fn test_create_and_get() {
        let store = store();
        let session = create_session(&store);
        let fetched = store.get(&session.token).unwrap();
        assert_eq!(fetched.restaurant_slug, "golden-dragon");
        assert_eq!(fetched.table_number, "5");
        assert!(fetched.cart.is_empty());
        assert!(fetched.customer.is_none());
    }

    #[test]
    fn test_unknown_token() {
        let store = store();
        assert!(store.get("nope").is_none());
        assert!(store.update("nope", |_| {}).is_err());
    }

    #[test]
    fn test_update_mutates_cart() {
        let store = store();
        let session = create_session(&store);
        let updated = store
            .update(&session.token, |s| {
                s.cart.add_item("menu_item:a", "X", 2.0, 3, "").unwrap();
            })
            .unwrap();
        assert_eq!(updated.cart.items.len(), 1);
        assert!((store.get(&session.token).unwrap().cart.total - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_expired_session_is_gone() {
        let store = SessionStore::new(0); // expires immediately
        let session = create_session(&store);
        // created_at is now; ttl 0 means anything older than this instant
        // is expired, so nudge the clock by backdating the session
        store
            .sessions
            .get_mut(&session.token)
            .unwrap()
            .created_at -= 10;
        assert!(store.get(&session.token).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_new_entry_starts_fresh_cart() {
        let store = store();
        let first = create_session(&store);
        store
            .update(&first.token, |s| {
                s.cart.add_item("menu_item:a", "X", 2.0, 1, "").unwrap();
            })
            .unwrap();

        // Scanning another table issues a new token with an empty cart
        let second = create_session(&store);
        assert_ne!(first.token, second.token);
        assert!(store.get(&second.token).unwrap().cart.is_empty());
    }

    #[test]
    fn test_purge_expired() {
        let store = SessionStore::new(0);
        let session = create_session(&store);
        store
            .sessions
            .get_mut(&session.token)
            .unwrap()
            .created_at -= 10;
        store.purge_expired();
        assert!(store.is_empty());
    }
}
