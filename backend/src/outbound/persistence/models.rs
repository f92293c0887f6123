//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    EmailAddress, PasswordHash, PaymentStatus, PhoneNumber, PinCode, ReferCode, School,
    SchoolDraft, SchoolId, Student, StudentDraft, StudentId,
};

use super::schema::{schools, students};

/// Row struct for reading from the schools table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = schools)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SchoolRow {
    pub id: Uuid,
    pub name: String,
    pub affiliation_code: String,
    pub phone: String,
    pub email: String,
    pub city: String,
    pub pin_code: String,
    pub password_hash: String,
    pub refer_code: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new school records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schools)]
pub(crate) struct NewSchoolRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub affiliation_code: &'a str,
    pub phone: &'a str,
    pub email: &'a str,
    pub city: &'a str,
    pub pin_code: &'a str,
    pub password_hash: &'a str,
    pub refer_code: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a School> for NewSchoolRow<'a> {
    fn from(school: &'a School) -> Self {
        Self {
            id: *school.id().as_uuid(),
            name: school.name(),
            affiliation_code: school.affiliation_code(),
            phone: school.phone().as_str(),
            email: school.email().as_str(),
            city: school.city(),
            pin_code: school.pin_code().as_str(),
            password_hash: school.password_hash().as_str(),
            refer_code: school.refer_code().as_str(),
            created_at: school.created_at(),
        }
    }
}

impl TryFrom<SchoolRow> for School {
    type Error = String;

    fn try_from(row: SchoolRow) -> Result<Self, Self::Error> {
        Ok(School::new(SchoolDraft {
            id: SchoolId::from_uuid(row.id),
            name: row.name,
            affiliation_code: row.affiliation_code,
            phone: PhoneNumber::parse(&row.phone).map_err(|e| e.to_string())?,
            email: EmailAddress::parse(&row.email).map_err(|e| e.to_string())?,
            city: row.city,
            pin_code: PinCode::parse(&row.pin_code).map_err(|e| e.to_string())?,
            password_hash: PasswordHash::new(row.password_hash),
            refer_code: ReferCode::parse(&row.refer_code).map_err(|e| e.to_string())?,
            created_at: row.created_at,
        }))
    }
}

/// Row struct for reading from the students table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudentRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub class_label: String,
    pub phone: String,
    pub school_refer_code: String,
    pub payment_status: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new student records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = students)]
pub(crate) struct NewStudentRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub class_label: &'a str,
    pub phone: &'a str,
    pub school_refer_code: &'a str,
    pub payment_status: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Student> for NewStudentRow<'a> {
    fn from(student: &'a Student) -> Self {
        Self {
            id: *student.id().as_uuid(),
            name: student.name(),
            email: student.email().as_str(),
            class_label: student.class_label(),
            phone: student.phone().as_str(),
            school_refer_code: student.refer_code().as_str(),
            payment_status: student.payment_status().as_str(),
            created_at: student.created_at(),
        }
    }
}

impl TryFrom<StudentRow> for Student {
    type Error = String;

    fn try_from(row: StudentRow) -> Result<Self, Self::Error> {
        Ok(Student::new(StudentDraft {
            id: StudentId::from_uuid(row.id),
            name: row.name,
            email: EmailAddress::parse(&row.email).map_err(|e| e.to_string())?,
            class_label: row.class_label,
            phone: PhoneNumber::parse(&row.phone).map_err(|e| e.to_string())?,
            refer_code: ReferCode::parse(&row.school_refer_code).map_err(|e| e.to_string())?,
            payment_status: row
                .payment_status
                .parse::<PaymentStatus>()
                .map_err(|e| e.to_string())?,
            created_at: row.created_at,
        }))
    }
}
