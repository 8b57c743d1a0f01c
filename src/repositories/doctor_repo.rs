//! Doctor repository for async database operations.
//!
//! Provides CRUD operations for the doctors table using diesel_async.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppResult, DatabaseErrorConverter};
use crate::models::{Doctor, NewDoctor, UpdateDoctor};
use crate::repositories::DoctorStore;

#[derive(Clone)]
pub struct DoctorRepository {
    pool: AsyncDbPool,
}

impl DoctorRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DoctorStore for DoctorRepository {
    async fn find_all(&self) -> AppResult<Vec<Doctor>> {
        use crate::schema::doctors::dsl::*;
        let mut conn = self.pool.get().await?;

        doctors
            .order((created_at.asc(), id.asc()))
            .select(Doctor::as_select())
            .load(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "list doctors"))
    }

    async fn find_latest(&self, limit: usize) -> AppResult<Vec<Doctor>> {
        use crate::schema::doctors::dsl::*;
        let mut conn = self.pool.get().await?;

        doctors
            .order(created_at.desc())
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .select(Doctor::as_select())
            .load(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "list latest doctors"))
    }

    async fn find_by_id(&self, doctor_id: Uuid) -> AppResult<Option<Doctor>> {
        use crate::schema::doctors::dsl::*;
        let mut conn = self.pool.get().await?;

        doctors
            .filter(id.eq(doctor_id))
            .select(Doctor::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "find doctor by id"))
    }

    async fn find_by_email(&self, doctor_email: &str) -> AppResult<Option<Doctor>> {
        use crate::schema::doctors::dsl::*;
        let mut conn = self.pool.get().await?;

        doctors
            .filter(email.eq(doctor_email))
            .select(Doctor::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "find doctor by email"))
    }

    async fn find_by_specialty(&self, doctor_specialty: &str) -> AppResult<Vec<Doctor>> {
        use crate::schema::doctors::dsl::*;
        let mut conn = self.pool.get().await?;

        doctors
            .filter(specialty.eq(doctor_specialty))
            .order((created_at.asc(), id.asc()))
            .select(Doctor::as_select())
            .load(&mut conn)
            .await
            .map_err(|e| {
                DatabaseErrorConverter::convert_diesel_error(e, "list doctors by specialty")
            })
    }

    async fn insert(&self, new_doctor: NewDoctor) -> AppResult<Doctor> {
        use crate::schema::doctors::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(doctors)
            .values(&new_doctor)
            .returning(Doctor::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "insert doctor"))
    }

    async fn update(&self, doctor_id: Uuid, changes: UpdateDoctor) -> AppResult<usize> {
        use crate::schema::doctors::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(doctors.filter(id.eq(doctor_id)))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "update doctor"))
    }

    async fn delete(&self, doctor_id: Uuid) -> AppResult<usize> {
        use crate::schema::doctors::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::delete(doctors.filter(id.eq(doctor_id)))
            .execute(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "delete doctor"))
    }
}
