//! In-memory stores backed by `DashMap`.
//!
//! Records live for the lifetime of the process. Every record carries an
//! insertion sequence number so listings come back in insertion order like
//! the PostgreSQL backend.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Doctor, NewDoctor, NewUser, UpdateDoctor, User};
use crate::repositories::{DoctorStore, UserStore};

#[derive(Default)]
pub struct MemoryUserStore {
    users: DashMap<Uuid, User>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.value().email == email)
            .map(|entry| entry.value().clone()))
    }

    async fn insert(&self, new_user: NewUser) -> AppResult<User> {
        let user = new_user.into_user(Uuid::new_v4());
        self.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[derive(Default)]
pub struct MemoryDoctorStore {
    doctors: DashMap<Uuid, (u64, Doctor)>,
    sequence: AtomicU64,
}

impl MemoryDoctorStore {
    /// Matching doctors in insertion order.
    fn collect_where(&self, predicate: impl Fn(&Doctor) -> bool) -> Vec<(u64, Doctor)> {
        let mut matches: Vec<(u64, Doctor)> = self
            .doctors
            .iter()
            .filter(|entry| predicate(&entry.value().1))
            .map(|entry| entry.value().clone())
            .collect();
        matches.sort_by_key(|(seq, _)| *seq);
        matches
    }
}

#[async_trait]
impl DoctorStore for MemoryDoctorStore {
    async fn find_all(&self) -> AppResult<Vec<Doctor>> {
        Ok(self
            .collect_where(|_| true)
            .into_iter()
            .map(|(_, doctor)| doctor)
            .collect())
    }

    async fn find_latest(&self, limit: usize) -> AppResult<Vec<Doctor>> {
        let mut doctors = self.collect_where(|_| true);
        // Newest first; later inserts win ties
        doctors.sort_by(|(a_seq, a), (b_seq, b)| {
            b.created_at
                .to_jiff()
                .cmp(&a.created_at.to_jiff())
                .then_with(|| b_seq.cmp(a_seq))
        });
        Ok(doctors
            .into_iter()
            .take(limit)
            .map(|(_, doctor)| doctor)
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Doctor>> {
        Ok(self.doctors.get(&id).map(|entry| entry.value().1.clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Doctor>> {
        Ok(self
            .collect_where(|doctor| doctor.email == email)
            .into_iter()
            .next()
            .map(|(_, doctor)| doctor))
    }

    async fn find_by_specialty(&self, specialty: &str) -> AppResult<Vec<Doctor>> {
        Ok(self
            .collect_where(|doctor| doctor.specialty == specialty)
            .into_iter()
            .map(|(_, doctor)| doctor)
            .collect())
    }

    async fn insert(&self, new_doctor: NewDoctor) -> AppResult<Doctor> {
        let doctor = new_doctor.into_doctor(Uuid::new_v4());
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        self.doctors.insert(doctor.id, (seq, doctor.clone()));
        Ok(doctor)
    }

    async fn update(&self, id: Uuid, changes: UpdateDoctor) -> AppResult<usize> {
        match self.doctors.get_mut(&id) {
            Some(mut entry) => {
                changes.apply_to(&mut entry.value_mut().1);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<usize> {
        Ok(self.doctors.remove(&id).map_or(0, |_| 1))
    }
}
