use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::doctors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
    pub email: String,
    pub phone: String,
    /// `None` when the submitted value had no leading integer
    pub experience: Option<i64>,
    pub bio: String,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert payload; both timestamps are stamped by the caller.
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::doctors)]
pub struct NewDoctor {
    pub name: String,
    pub specialty: String,
    pub email: String,
    pub phone: String,
    pub experience: Option<i64>,
    pub bio: String,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl NewDoctor {
    pub fn into_doctor(self, id: Uuid) -> Doctor {
        Doctor {
            id,
            name: self.name,
            specialty: self.specialty,
            email: self.email,
            phone: self.phone,
            experience: self.experience,
            bio: self.bio,
            image_url: self.image_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Partial update. `None` leaves a column untouched; for the nullable
/// columns `Some(None)` writes NULL.
#[derive(Debug, AsChangeset, Clone)]
#[diesel(table_name = crate::schema::doctors)]
pub struct UpdateDoctor {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub experience: Option<Option<i64>>,
    pub bio: Option<String>,
    pub image_url: Option<Option<String>>,
    pub updated_at: Timestamp,
}

impl UpdateDoctor {
    /// Apply the changes to an in-memory record.
    pub fn apply_to(self, doctor: &mut Doctor) {
        if let Some(name) = self.name {
            doctor.name = name;
        }
        if let Some(specialty) = self.specialty {
            doctor.specialty = specialty;
        }
        if let Some(email) = self.email {
            doctor.email = email;
        }
        if let Some(phone) = self.phone {
            doctor.phone = phone;
        }
        if let Some(experience) = self.experience {
            doctor.experience = experience;
        }
        if let Some(bio) = self.bio {
            doctor.bio = bio;
        }
        if let Some(image_url) = self.image_url {
            doctor.image_url = image_url;
        }
        doctor.updated_at = self.updated_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff_diesel::ToDiesel;

    fn sample_doctor() -> Doctor {
        let created = jiff::Timestamp::UNIX_EPOCH.to_diesel();
        NewDoctor {
            name: "Dr. Rahman".to_string(),
            specialty: "Cardiology".to_string(),
            email: "rahman@example.com".to_string(),
            phone: "+880100000000".to_string(),
            experience: Some(12),
            bio: "Heart specialist".to_string(),
            image_url: Some("https://img.example.com/r.png".to_string()),
            created_at: created,
            updated_at: created,
        }
        .into_doctor(Uuid::new_v4())
    }

    #[test]
    fn test_apply_to_only_touches_supplied_fields() {
        let mut doctor = sample_doctor();
        let before = doctor.clone();
        let now = jiff::Timestamp::from_second(60).unwrap().to_diesel();

        UpdateDoctor {
            name: None,
            specialty: None,
            email: None,
            phone: None,
            experience: None,
            bio: Some("new".to_string()),
            image_url: None,
            updated_at: now,
        }
        .apply_to(&mut doctor);

        assert_eq!(doctor.bio, "new");
        assert_eq!(doctor.updated_at, now);
        assert_eq!(doctor.name, before.name);
        assert_eq!(doctor.experience, before.experience);
        assert_eq!(doctor.image_url, before.image_url);
        assert_eq!(doctor.created_at, before.created_at);
    }

    #[test]
    fn test_apply_to_clears_nullable_columns() {
        let mut doctor = sample_doctor();

        UpdateDoctor {
            name: None,
            specialty: None,
            email: None,
            phone: None,
            experience: Some(None),
            bio: None,
            image_url: Some(None),
            updated_at: doctor.updated_at,
        }
        .apply_to(&mut doctor);

        assert!(doctor.experience.is_none());
        assert!(doctor.image_url.is_none());
    }
}
