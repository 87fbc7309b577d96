//! In-memory stores used by service and handler tests.
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use uuid::Uuid;

use super::*;
use crate::models::{Franchise, Gym, History, KodeGym, Makanan, Token, User};

pub fn stores() -> Stores {
    Stores {
        users: Arc::new(MemoryUsers::default()),
        gyms: Arc::new(MemoryGyms::default()),
        kode_gyms: Arc::new(MemoryKodeGyms::default()),
        franchises: Arc::new(MemoryFranchises::default()),
        makanan: Arc::new(MemoryMakanan::default()),
        histories: Arc::new(MemoryHistories::default()),
        tokens: Arc::new(MemoryTokens::default()),
    }
}

type Table<K, V> = Mutex<HashMap<K, V>>;

fn find<K, V: Clone>(table: &Table<K, V>, pred: impl Fn(&V) -> bool) -> Option<V> {
    table.lock().unwrap().values().find(|v| pred(v)).cloned()
}

fn all<K, V: Clone>(table: &Table<K, V>) -> Vec<V> {
    table.lock().unwrap().values().cloned().collect()
}

fn replace<K: std::hash::Hash + Eq, V>(table: &Table<K, V>, key: K, value: V) -> Result<(), RepoError> {
    let mut rows = table.lock().unwrap();
    match rows.get_mut(&key) {
        Some(slot) => {
            *slot = value;
            Ok(())
        }
        None => Err(RepoError::NotFound),
    }
}

fn remove<K: std::hash::Hash + Eq, V>(table: &Table<K, V>, key: &K) -> Result<(), RepoError> {
    table.lock().unwrap().remove(key).map(|_| ()).ok_or(RepoError::NotFound)
}

#[derive(Default)]
pub struct MemoryUsers(Table<Uuid, User>);

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.0.lock().unwrap().get(&id).cloned())
    }
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(find(&self.0, |u| u.email == email))
    }
    async fn get_by_username(&self, full_name: &str) -> Result<Option<User>, RepoError> {
        Ok(find(&self.0, |u| u.full_name == full_name))
    }
    async fn get_by_referral_code(&self, code: &str) -> Result<Option<User>, RepoError> {
        Ok(find(&self.0, |u| u.referral_code == code))
    }
    async fn get_all(&self) -> Result<Vec<User>, RepoError> {
        Ok(all(&self.0))
    }
    async fn create(&self, user: &User) -> Result<(), RepoError> {
        let mut rows = self.0.lock().unwrap();
        if rows.values().any(|u| u.email == user.email) {
            return Err(RepoError::Other("duplicate email".into()));
        }
        rows.insert(user.id, user.clone());
        Ok(())
    }
    async fn update(&self, user: &User) -> Result<(), RepoError> {
        replace(&self.0, user.id, user.clone())
    }
    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        remove(&self.0, &id)
    }
}

#[derive(Default)]
pub struct MemoryGyms(Table<Uuid, Gym>);

#[async_trait]
impl GymRepository for MemoryGyms {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Gym>, RepoError> {
        Ok(self.0.lock().unwrap().get(&id).cloned())
    }
    async fn get_all(&self) -> Result<Vec<Gym>, RepoError> {
        Ok(all(&self.0))
    }
    async fn create(&self, gym: &Gym) -> Result<(), RepoError> {
        self.0.lock().unwrap().insert(gym.id, gym.clone());
        Ok(())
    }
    async fn update(&self, gym: &Gym) -> Result<(), RepoError> {
        replace(&self.0, gym.id, gym.clone())
    }
    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        remove(&self.0, &id)
    }
}

#[derive(Default)]
pub struct MemoryKodeGyms(Table<Uuid, KodeGym>);

#[async_trait]
impl KodeGymRepository for MemoryKodeGyms {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<KodeGym>, RepoError> {
        Ok(self.0.lock().unwrap().get(&id).cloned())
    }
    async fn get_by_code(&self, code: &str) -> Result<Option<KodeGym>, RepoError> {
        Ok(find(&self.0, |k| k.code == code))
    }
    async fn get_by_gym(&self, gym_id: Uuid) -> Result<Vec<KodeGym>, RepoError> {
        Ok(all(&self.0).into_iter().filter(|k| k.gym_id == gym_id).collect())
    }
    async fn get_all(&self) -> Result<Vec<KodeGym>, RepoError> {
        Ok(all(&self.0))
    }
    async fn create(&self, kode: &KodeGym) -> Result<(), RepoError> {
        self.0.lock().unwrap().insert(kode.id, kode.clone());
        Ok(())
    }
    async fn update(&self, kode: &KodeGym) -> Result<(), RepoError> {
        replace(&self.0, kode.id, kode.clone())
    }
    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        remove(&self.0, &id)
    }
}

#[derive(Default)]
pub struct MemoryFranchises(Table<Uuid, Franchise>);

#[async_trait]
impl FranchiseRepository for MemoryFranchises {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Franchise>, RepoError> {
        Ok(self.0.lock().unwrap().get(&id).cloned())
    }
    async fn get_by_email(&self, email: &str) -> Result<Option<Franchise>, RepoError> {
        Ok(find(&self.0, |f| f.email == email))
    }
    async fn get_all(&self) -> Result<Vec<Franchise>, RepoError> {
        Ok(all(&self.0))
    }
    async fn create(&self, franchise: &Franchise) -> Result<(), RepoError> {
        self.0.lock().unwrap().insert(franchise.id, franchise.clone());
        Ok(())
    }
    async fn update(&self, franchise: &Franchise) -> Result<(), RepoError> {
        replace(&self.0, franchise.id, franchise.clone())
    }
    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        remove(&self.0, &id)
    }
}

#[derive(Default)]
pub struct MemoryMakanan(Table<String, Makanan>);

#[async_trait]
impl MakananRepository for MemoryMakanan {
    async fn get_by_id(&self, id: &str) -> Result<Option<Makanan>, RepoError> {
        Ok(self.0.lock().unwrap().get(id).cloned())
    }
    async fn get_all(&self) -> Result<Vec<Makanan>, RepoError> {
        Ok(all(&self.0))
    }
    async fn create(&self, makanan: &Makanan) -> Result<(), RepoError> {
        self.0.lock().unwrap().insert(makanan.id.clone(), makanan.clone());
        Ok(())
    }
    async fn update(&self, makanan: &Makanan) -> Result<(), RepoError> {
        replace(&self.0, makanan.id.clone(), makanan.clone())
    }
    async fn delete(&self, id: &str) -> Result<(), RepoError> {
        remove(&self.0, &id.to_string())
    }
}

#[derive(Default)]
pub struct MemoryHistories(Table<Uuid, History>);

#[async_trait]
impl HistoryRepository for MemoryHistories {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<History>, RepoError> {
        Ok(self.0.lock().unwrap().get(&id).cloned())
    }
    async fn get_by_user_and_date(
        &self,
        user_id: Uuid,
        day: NaiveDateTime,
    ) -> Result<Option<History>, RepoError> {
        Ok(find(&self.0, |h| h.user_id == user_id && h.created_at == day))
    }
    async fn get_by_user(&self, user_id: Uuid) -> Result<Vec<History>, RepoError> {
        Ok(all(&self.0).into_iter().filter(|h| h.user_id == user_id).collect())
    }
    async fn create(&self, history: &History) -> Result<(), RepoError> {
        self.0.lock().unwrap().insert(history.id, history.clone());
        Ok(())
    }
    async fn update(&self, history: &History) -> Result<(), RepoError> {
        replace(&self.0, history.id, history.clone())
    }
    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        remove(&self.0, &id)
    }
}

#[derive(Default)]
pub struct MemoryTokens(Table<Uuid, Token>);

#[async_trait]
impl TokenRepository for MemoryTokens {
    async fn get_all(&self) -> Result<Vec<Token>, RepoError> {
        Ok(all(&self.0))
    }
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Token>, RepoError> {
        Ok(self.0.lock().unwrap().get(&id).cloned())
    }
    async fn get_by_refresh_token(&self, refresh_token: &str) -> Result<Option<Token>, RepoError> {
        Ok(find(&self.0, |t| t.refresh_token == refresh_token))
    }
    async fn create(&self, token: &Token) -> Result<(), RepoError> {
        self.0.lock().unwrap().insert(token.id, token.clone());
        Ok(())
    }
    async fn update(&self, token: &Token) -> Result<(), RepoError> {
        replace(&self.0, token.id, token.clone())
    }
    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        remove(&self.0, &id)
    }
}
