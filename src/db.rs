use std::{collections::BTreeSet, sync::Arc};

use serde::{Deserialize, Serialize};
use time::{Duration, Month, OffsetDateTime};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult, MIN_PASSWORD_LEN},
    storage::{load_json, save_json, KeyValueStore, LOGS_KEY, USERS_KEY},
};

pub const DEMO_USER_ID: Uuid = Uuid::from_u128(1);
pub const DEMO_USER_NAME: &str = "Demo User";
pub const DEMO_USER_EMAIL: &str = "demo@smartfarm.com";
pub const DEMO_USER_PASSWORD: &str = "demo123";

/// Dashboard shows at most this many recent entries.
pub const RECENT_LOGS_LIMIT: usize = 10;

/// Registered user. The password is kept in plain text and compared verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(with = "time::serde::rfc3339")]
    pub join_date: OffsetDateTime,
}

/// One logged pesticide application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageLogEntry {
    pub id: Uuid,
    pub user_id: Uuid, // weak reference, lookup only
    pub plant_name: String,
    pub pesticide: String,
    pub amount: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    #[serde(default)]
    pub notes: String,
}

/// Owns the user and usage-log collections and mirrors every mutation to the
/// durable store.
pub struct DataModel {
    store: Arc<dyn KeyValueStore>,
    users: Vec<User>,
    logs: Vec<UsageLogEntry>,
}

impl DataModel {
    /// Hydrate from the durable store, seeding demo data for missing keys.
    pub fn initialize(store: Arc<dyn KeyValueStore>) -> AppResult<Self> {
        let now = OffsetDateTime::now_utc();

        let users = match load_json::<Vec<User>>(store.as_ref(), USERS_KEY)? {
            Some(users) => users,
            None => {
                let seeded = vec![User {
                    id: DEMO_USER_ID,
                    name: DEMO_USER_NAME.into(),
                    email: DEMO_USER_EMAIL.into(),
                    password: DEMO_USER_PASSWORD.into(),
                    join_date: now,
                }];
                save_json(store.as_ref(), USERS_KEY, &seeded)?;
                info!("seeded demo user");
                seeded
            }
        };

        let logs = match load_json::<Vec<UsageLogEntry>>(store.as_ref(), LOGS_KEY)? {
            Some(logs) => logs,
            None => {
                let seeded = vec![UsageLogEntry {
                    id: Uuid::new_v4(),
                    user_id: DEMO_USER_ID,
                    plant_name: "Tomato".into(),
                    pesticide: "Neem Oil".into(),
                    amount: "2ml per liter".into(),
                    date: now - Duration::hours(24),
                    notes: String::new(),
                }];
                save_json(store.as_ref(), LOGS_KEY, &seeded)?;
                info!("seeded demo usage log");
                seeded
            }
        };

        info!(users = users.len(), logs = logs.len(), "data model loaded");
        Ok(Self { store, users, logs })
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    #[cfg(test)]
    pub(crate) fn find_user(&self, id: Uuid) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn find_user_by_credentials(&self, email: &str, password: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|u| u.email == email && u.password == password)
    }

    pub fn email_exists(&self, email: &str) -> bool {
        self.users.iter().any(|u| u.email == email)
    }

    /// Validates its inputs even though the signup form already did.
    pub fn create_user(&mut self, name: &str, email: &str, password: &str) -> AppResult<User> {
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AppError::MissingFields);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::WeakPassword);
        }
        if self.email_exists(email) {
            warn!(email, "email already registered");
            return Err(AppError::DuplicateEmail);
        }

        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            join_date: OffsetDateTime::now_utc(),
        };
        self.users.push(user.clone());
        if let Err(e) = save_json(self.store.as_ref(), USERS_KEY, &self.users) {
            self.users.pop();
            return Err(e.into());
        }
        info!(user_id = %user.id, email = %user.email, users = self.user_count(), "user created");
        Ok(user)
    }

    pub fn append_usage_log(
        &mut self,
        user_id: Uuid,
        plant_name: &str,
        pesticide: &str,
        amount: &str,
    ) -> AppResult<UsageLogEntry> {
        let entry = UsageLogEntry {
            id: Uuid::new_v4(),
            user_id,
            plant_name: plant_name.to_string(),
            pesticide: pesticide.to_string(),
            amount: amount.to_string(),
            date: OffsetDateTime::now_utc(),
            notes: String::new(),
        };
        self.logs.push(entry.clone());
        if let Err(e) = save_json(self.store.as_ref(), LOGS_KEY, &self.logs) {
            self.logs.pop();
            return Err(e.into());
        }
        info!(%user_id, log_id = %entry.id, plant = %entry.plant_name, "usage logged");
        Ok(entry)
    }

    fn user_logs(&self, user_id: Uuid) -> impl DoubleEndedIterator<Item = &UsageLogEntry> {
        self.logs.iter().filter(move |l| l.user_id == user_id)
    }

    /// Newest first, capped at [`RECENT_LOGS_LIMIT`]. Ties on timestamp put the
    /// most recently appended entry first.
    pub fn logs_for_user(&self, user_id: Uuid) -> Vec<UsageLogEntry> {
        let mut logs: Vec<&UsageLogEntry> = self.user_logs(user_id).rev().collect();
        logs.sort_by(|a, b| b.date.cmp(&a.date));
        logs.into_iter().take(RECENT_LOGS_LIMIT).cloned().collect()
    }

    pub fn total_count_for_user(&self, user_id: Uuid) -> usize {
        self.user_logs(user_id).count()
    }

    pub fn distinct_plants_for_user(&self, user_id: Uuid) -> BTreeSet<String> {
        self.user_logs(user_id)
            .map(|l| l.plant_name.clone())
            .collect()
    }

    /// Month and year are taken from the UTC timestamp.
    pub fn monthly_count_for_user(&self, user_id: Uuid, month: Month, year: i32) -> usize {
        self.user_logs(user_id)
            .filter(|l| l.date.month() == month && l.date.year() == year)
            .count()
    }
}

#[cfg(test)]
mod db_tests {
    use super::*;
    use crate::storage::{MemoryStore, StoreError};

    fn fresh() -> (Arc<MemoryStore>, DataModel) {
        let store = Arc::new(MemoryStore::new());
        let model = DataModel::initialize(store.clone()).expect("initialize");
        (store, model)
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(Some("[]".into()))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("read-only".into()))
        }
        fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[test]
    fn initialize_seeds_demo_data_and_persists_it() {
        let (store, model) = fresh();
        assert_eq!(model.user_count(), 1);
        assert!(model.email_exists(DEMO_USER_EMAIL));

        let logs = model.logs_for_user(DEMO_USER_ID);
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].plant_name, "Tomato");
        assert_eq!(logs[0].pesticide, "Neem Oil");
        assert_eq!(logs[0].amount, "2ml per liter");

        let users: Vec<User> = load_json(&*store, USERS_KEY).unwrap().unwrap();
        assert_eq!(users[0].id, DEMO_USER_ID);
        let stored: Vec<UsageLogEntry> = load_json(&*store, LOGS_KEY).unwrap().unwrap();
        assert_eq!(stored[0].user_id, DEMO_USER_ID);
    }

    #[test]
    fn initialize_does_not_reseed_existing_collections() {
        let store = Arc::new(MemoryStore::new());
        store.set(USERS_KEY, "[]").unwrap();
        store.set(LOGS_KEY, "[]").unwrap();
        let model = DataModel::initialize(store.clone()).expect("initialize");
        assert_eq!(model.user_count(), 0);
        assert_eq!(store.get(USERS_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn initialize_surfaces_corrupt_store() {
        let store = Arc::new(MemoryStore::new());
        store.set(USERS_KEY, "not json").unwrap();
        let err = DataModel::initialize(store).err().expect("should fail");
        assert!(matches!(err, AppError::Storage(StoreError::Corrupt { .. })));
    }

    #[test]
    fn create_user_then_find_by_credentials() {
        let (_, mut model) = fresh();
        let user = model.create_user("A", "a@x.com", "abcdef").expect("create");
        assert!(model.email_exists("a@x.com"));
        let found = model.find_user_by_credentials("a@x.com", "abcdef").expect("found");
        assert_eq!(found.id, user.id);
        assert_eq!(found.name, "A");
        assert_eq!(model.find_user(user.id).map(|u| u.email.as_str()), Some("a@x.com"));
        assert!(model.find_user_by_credentials("a@x.com", "abcdeF").is_none());
        assert!(model.find_user_by_credentials("A@x.com", "abcdef").is_none());
    }

    #[test]
    fn create_user_rejects_duplicate_email_without_change() {
        let (_, mut model) = fresh();
        let before = model.user_count();
        let err = model.create_user("Other", DEMO_USER_EMAIL, "secret1").unwrap_err();
        assert!(matches!(err, AppError::DuplicateEmail));
        assert_eq!(model.user_count(), before);
    }

    #[test]
    fn create_user_rejects_short_password_and_empty_fields() {
        let (_, mut model) = fresh();
        let before = model.user_count();
        assert!(matches!(
            model.create_user("B", "b@x.com", "12345"),
            Err(AppError::WeakPassword)
        ));
        assert!(matches!(
            model.create_user("", "b@x.com", "123456"),
            Err(AppError::MissingFields)
        ));
        assert_eq!(model.user_count(), before);
        assert!(!model.email_exists("b@x.com"));
    }

    #[test]
    fn created_user_survives_reload() {
        let (store, mut model) = fresh();
        model.create_user("A", "a@x.com", "abcdef").expect("create");
        let reloaded = DataModel::initialize(store).expect("reload");
        assert_eq!(reloaded.user_count(), 2);
        assert!(reloaded.find_user_by_credentials("a@x.com", "abcdef").is_some());
    }

    #[test]
    fn append_puts_new_entry_first() {
        let (_, mut model) = fresh();
        let before = model.logs_for_user(DEMO_USER_ID).len();
        let entry = model
            .append_usage_log(DEMO_USER_ID, "Wheat", "Malathion", "1ml per liter")
            .expect("append");
        let logs = model.logs_for_user(DEMO_USER_ID);
        assert_eq!(logs.len(), before + 1);
        assert_eq!(logs[0].id, entry.id);
        assert!(logs[0].notes.is_empty());
    }

    #[test]
    fn back_to_back_appends_keep_newest_first() {
        let (_, mut model) = fresh();
        let first = model.append_usage_log(DEMO_USER_ID, "Rice", "Chlorpyrifos", "1.5ml per liter").unwrap();
        let second = model.append_usage_log(DEMO_USER_ID, "Corn", "Atrazine", "2.5ml per liter").unwrap();
        let logs = model.logs_for_user(DEMO_USER_ID);
        assert_eq!(logs[0].id, second.id);
        assert_eq!(logs[1].id, first.id);
    }

    #[test]
    fn stored_entries_with_equal_dates_list_later_append_first() {
        let store = Arc::new(MemoryStore::new());
        let date = OffsetDateTime::now_utc() - Duration::days(2);
        let entry = |plant: &str| UsageLogEntry {
            id: Uuid::new_v4(),
            user_id: DEMO_USER_ID,
            plant_name: plant.into(),
            pesticide: "Neem Oil".into(),
            amount: "2ml per liter".into(),
            date,
            notes: String::new(),
        };
        let (earlier, later) = (entry("Tomato"), entry("Potato"));
        save_json(&*store, LOGS_KEY, &vec![earlier.clone(), later.clone()]).unwrap();

        let model = DataModel::initialize(store).expect("initialize");
        let logs = model.logs_for_user(DEMO_USER_ID);
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].id, later.id);
        assert_eq!(logs[1].id, earlier.id);
    }

    #[test]
    fn logs_for_user_is_capped_and_scoped() {
        let (_, mut model) = fresh();
        let other = model.create_user("A", "a@x.com", "abcdef").unwrap();
        for i in 0..15 {
            model
                .append_usage_log(other.id, &format!("Plant {i}"), "Neem Oil", "2ml per liter")
                .unwrap();
        }
        let logs = model.logs_for_user(other.id);
        assert_eq!(logs.len(), RECENT_LOGS_LIMIT);
        assert!(logs.iter().all(|l| l.user_id == other.id));
        assert_eq!(logs[0].plant_name, "Plant 14");
        assert_eq!(model.total_count_for_user(other.id), 15);
        assert_eq!(model.logs_for_user(DEMO_USER_ID).len(), 1);
    }

    #[test]
    fn distinct_plants_deduplicates() {
        let (_, mut model) = fresh();
        let user = model.create_user("A", "a@x.com", "abcdef").unwrap();
        model.append_usage_log(user.id, "Tomato", "Neem Oil", "2ml").unwrap();
        model.append_usage_log(user.id, "Potato", "Copper Sulfate", "3ml").unwrap();
        model.append_usage_log(user.id, "Tomato", "Neem Oil", "2ml").unwrap();
        let plants = model.distinct_plants_for_user(user.id);
        assert_eq!(plants.len(), 2);
        assert!(plants.contains("Tomato") && plants.contains("Potato"));
    }

    #[test]
    fn monthly_count_matches_calendar_month() {
        let (_, mut model) = fresh();
        let user = model.create_user("A", "a@x.com", "abcdef").unwrap();
        let entry = model.append_usage_log(user.id, "Cotton", "Bt Spray", "5ml").unwrap();
        let (month, year) = (entry.date.month(), entry.date.year());
        assert_eq!(model.monthly_count_for_user(user.id, month, year), 1);
        assert_eq!(model.monthly_count_for_user(user.id, month, year - 1), 0);
        assert_eq!(model.monthly_count_for_user(user.id, month.next(), year), 0);
    }

    #[test]
    fn failed_persist_rolls_back() {
        let mut model = DataModel::initialize(Arc::new(FailingStore)).expect("initialize");
        let err = model.create_user("A", "a@x.com", "abcdef").unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        assert_eq!(model.user_count(), 0);

        let err = model
            .append_usage_log(DEMO_USER_ID, "Tomato", "Neem Oil", "2ml")
            .unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        assert_eq!(model.total_count_for_user(DEMO_USER_ID), 0);
    }
}
