use crate::schema;
use crate::ConnectionPool;
use crate::Error;
use chrono::{SecondsFormat, Utc};
use diesel::prelude::*;
use diesel::sql_function;
use diesel::sql_types::{Date, Integer, Text};
use std::borrow::BorrowMut;
use validator::Validate;

sql_function!(fn date(value: Text) -> Date);
sql_function!(fn substr(string: Text, start: Integer, count: Integer) -> Text);

#[derive(Queryable, Selectable, serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = schema::reservations)]
pub struct Reservation {
    pub id: i32,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: Option<String>,
    pub check_in: String,
    pub check_out: String,
    pub check_in_time: Option<String>,
    pub check_out_time: Option<String>,
    pub room_type: String,
    pub room_count: i32,
    pub adults: i32,
    pub children: i32,
    pub total_price: f64,
    pub payment_status: String,
    pub special_requests: Option<String>,
    pub experiences: Option<String>,
    pub created_at: String,
}

/// Guest-supplied fields of a booking. `id` and `created_at` are assigned
/// by the store on insert.
#[derive(serde::Deserialize, Validate, Debug, Clone)]
pub struct NewReservation {
    pub guest_name: String,
    #[validate(email)]
    pub guest_email: String,
    pub guest_phone: Option<String>,
    pub check_in: String,
    pub check_out: String,
    pub check_in_time: Option<String>,
    pub check_out_time: Option<String>,
    pub room_type: String,
    pub room_count: i32,
    pub adults: i32,
    pub children: i32,
    pub total_price: f64,
    pub payment_status: String,
    pub special_requests: Option<String>,
    pub experiences: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = schema::reservations)]
struct ReservationRow<'a> {
    guest_name: &'a str,
    guest_email: &'a str,
    guest_phone: Option<&'a str>,
    check_in: &'a str,
    check_out: &'a str,
    check_in_time: Option<&'a str>,
    check_out_time: Option<&'a str>,
    room_type: &'a str,
    room_count: i32,
    adults: i32,
    children: i32,
    total_price: f64,
    payment_status: &'a str,
    special_requests: Option<&'a str>,
    experiences: &'a str,
    created_at: &'a str,
}

/// Staff-editable subset of a reservation.
///
/// `payment_status` only takes effect when non-empty, while the two
/// free-text fields apply whenever they are supplied at all, empty string
/// included. Existing admin clients rely on the asymmetry.
#[derive(serde::Deserialize, Debug, Clone, Default)]
pub struct ReservationPatch {
    pub payment_status: Option<String>,
    pub special_requests: Option<String>,
    pub experiences: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupSummary {
    /// Matching rows counted before the delete ran.
    pub to_delete: i64,
    pub deleted: usize,
}

pub struct ReservationRepository {
    pool: ConnectionPool,
}

impl ReservationRepository {
    pub(crate) fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    pub fn add(&self, new: &NewReservation) -> Result<Reservation, Error> {
        new.validate()?;

        let mut conn = self.pool.get()?;
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        let row = ReservationRow {
            guest_name: &new.guest_name,
            guest_email: &new.guest_email,
            guest_phone: new.guest_phone.as_deref(),
            check_in: &new.check_in,
            check_out: &new.check_out,
            check_in_time: new.check_in_time.as_deref(),
            check_out_time: new.check_out_time.as_deref(),
            room_type: &new.room_type,
            room_count: new.room_count,
            adults: new.adults,
            children: new.children,
            total_price: new.total_price,
            payment_status: &new.payment_status,
            special_requests: new.special_requests.as_deref(),
            experiences: new.experiences.as_deref().unwrap_or(""),
            created_at: &created_at,
        };
        Ok(diesel::insert_into(schema::reservations::table)
            .values(&row)
            .returning(Reservation::as_returning())
            .get_result(conn.borrow_mut())?)
    }

    pub fn list(&self) -> Result<Vec<Reservation>, Error> {
        use schema::reservations::dsl::*;

        let mut conn = self.pool.get()?;
        Ok(reservations
            .select(Reservation::as_select())
            .order(created_at.desc())
            .load(conn.borrow_mut())?)
    }

    pub fn get(&self, reservation_id: i32) -> Result<Reservation, Error> {
        use schema::reservations::dsl::*;

        let mut conn = self.pool.get()?;
        reservations
            .find(reservation_id)
            .select(Reservation::as_select())
            .first(conn.borrow_mut())
            .optional()?
            .ok_or(Error::NotFound)
    }

    pub fn update(&self, reservation_id: i32, patch: ReservationPatch) -> Result<Reservation, Error> {
        use schema::reservations::dsl::*;

        let mut conn = self.pool.get()?;
        let current: Reservation = reservations
            .find(reservation_id)
            .select(Reservation::as_select())
            .first(conn.borrow_mut())
            .optional()?
            .ok_or(Error::NotFound)?;

        let new_payment_status = patch
            .payment_status
            .filter(|s| !s.is_empty())
            .unwrap_or(current.payment_status);
        let new_special_requests = patch.special_requests.or(current.special_requests);
        let new_experiences = patch.experiences.or(current.experiences);

        Ok(diesel::update(reservations.find(reservation_id))
            .set((
                payment_status.eq(new_payment_status),
                special_requests.eq(new_special_requests),
                experiences.eq(new_experiences),
            ))
            .returning(Reservation::as_returning())
            .get_result(conn.borrow_mut())?)
    }

    pub fn delete(&self, reservation_id: i32) -> Result<(), Error> {
        use schema::reservations::dsl::*;

        let mut conn = self.pool.get()?;
        let affected =
            diesel::delete(reservations.find(reservation_id)).execute(conn.borrow_mut())?;
        if affected == 0 {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    /// Deletes every reservation whose check-out date lies strictly before
    /// today. Only the first 10 characters of `check_out` are considered, so
    /// `2025-06-11 14:00` and `2025-06-11` compare the same. The count is
    /// taken before the delete and is purely informational; the two
    /// statements do not run in one transaction.
    pub fn cleanup_expired(&self) -> Result<CleanupSummary, Error> {
        use schema::reservations::dsl::*;

        let mut conn = self.pool.get()?;
        let to_delete: i64 = reservations
            .filter(date(substr(check_out, 1, 10)).lt(date("now")))
            .count()
            .get_result(conn.borrow_mut())?;
        let deleted = diesel::delete(
            reservations.filter(date(substr(check_out, 1, 10)).lt(date("now"))),
        )
        .execute(conn.borrow_mut())?;

        Ok(CleanupSummary { to_delete, deleted })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ReservationStore, Update};
    use chrono::{DateTime, Duration};

    fn make_store() -> ReservationStore {
        let store = ReservationStore::open_in_memory().unwrap();
        store.update().unwrap();
        store
    }

    fn booking() -> NewReservation {
        NewReservation {
            guest_name: "Ada Lovelace".into(),
            guest_email: "ada@example.com".into(),
            guest_phone: Some("+44 20 7946 0000".into()),
            check_in: "2031-07-01".into(),
            check_out: "2031-07-08".into(),
            check_in_time: Some("14:00".into()),
            check_out_time: None,
            room_type: "suite".into(),
            room_count: 1,
            adults: 2,
            children: 0,
            total_price: 1299.5,
            payment_status: "pending".into(),
            special_requests: Some("sea view".into()),
            experiences: None,
        }
    }

    #[test]
    fn add_assigns_increasing_ids_and_stamps_created_at() {
        let repo = make_store().reservations();

        let first = repo.add(&booking()).unwrap();
        let second = repo.add(&booking()).unwrap();

        assert!(second.id > first.id);
        assert!(DateTime::parse_from_rfc3339(&first.created_at).is_ok());
    }

    #[test]
    fn add_rejects_malformed_email_without_persisting() {
        let store = make_store();
        let repo = store.reservations();
        let mut new = booking();
        new.guest_email = "not-an-email".into();

        assert!(matches!(repo.add(&new), Err(Error::Validation(_))));
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn add_defaults_experiences_to_empty_string() {
        let repo = make_store().reservations();

        let created = repo.add(&booking()).unwrap();

        assert_eq!(created.experiences.as_deref(), Some(""));
    }

    #[test]
    fn get_returns_the_stored_fields() {
        let repo = make_store().reservations();
        let created = repo.add(&booking()).unwrap();

        let fetched = repo.get(created.id).unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.guest_name, "Ada Lovelace");
        assert_eq!(fetched.special_requests.as_deref(), Some("sea view"));
    }

    #[test]
    fn get_unknown_id_is_not_found() {
        let repo = make_store().reservations();

        assert!(matches!(repo.get(999), Err(Error::NotFound)));
    }

    #[test]
    fn list_orders_newest_first() {
        let repo = make_store().reservations();
        for _ in 0..3 {
            repo.add(&booking()).unwrap();
        }

        let all = repo.list().unwrap();

        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[test]
    fn update_replaces_only_supplied_fields() {
        let repo = make_store().reservations();
        let created = repo.add(&booking()).unwrap();

        let updated = repo
            .update(
                created.id,
                ReservationPatch {
                    payment_status: Some("paid".into()),
                    special_requests: None,
                    experiences: None,
                },
            )
            .unwrap();

        assert_eq!(updated.payment_status, "paid");
        assert_eq!(updated.special_requests.as_deref(), Some("sea view"));
        assert_eq!(updated.guest_name, created.guest_name);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[test]
    fn update_ignores_empty_payment_status() {
        let repo = make_store().reservations();
        let created = repo.add(&booking()).unwrap();

        let updated = repo
            .update(
                created.id,
                ReservationPatch {
                    payment_status: Some("".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.payment_status, "pending");
    }

    #[test]
    fn update_applies_empty_special_requests() {
        let repo = make_store().reservations();
        let created = repo.add(&booking()).unwrap();

        let updated = repo
            .update(
                created.id,
                ReservationPatch {
                    special_requests: Some("".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.special_requests.as_deref(), Some(""));
        assert_eq!(updated.payment_status, "pending");
        assert_eq!(updated.experiences.as_deref(), Some(""));
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let repo = make_store().reservations();

        assert!(matches!(
            repo.update(42, ReservationPatch::default()),
            Err(Error::NotFound)
        ));
    }

    #[test]
    fn delete_removes_the_reservation() {
        let repo = make_store().reservations();
        let created = repo.add(&booking()).unwrap();

        repo.delete(created.id).unwrap();

        assert!(matches!(repo.get(created.id), Err(Error::NotFound)));
    }

    #[test]
    fn delete_unknown_id_is_not_found_and_changes_nothing() {
        let repo = make_store().reservations();
        repo.add(&booking()).unwrap();

        assert!(matches!(repo.delete(999), Err(Error::NotFound)));
        assert_eq!(repo.list().unwrap().len(), 1);
    }

    #[test]
    fn cleanup_deletes_only_past_checkouts() {
        let repo = make_store().reservations();
        let today = Utc::now();
        let yesterday = (today - Duration::days(1)).format("%Y-%m-%d").to_string();
        let tomorrow = (today + Duration::days(1)).format("%Y-%m-%d").to_string();

        let mut past = booking();
        // time suffix exercises the 10-character date prefix rule
        past.check_out = format!("{yesterday} 11:30");
        let past = repo.add(&past).unwrap();
        let mut upcoming = booking();
        upcoming.check_out = tomorrow;
        let upcoming = repo.add(&upcoming).unwrap();

        let summary = repo.cleanup_expired().unwrap();

        assert_eq!(summary.to_delete, 1);
        assert_eq!(summary.deleted, 1);
        assert!(matches!(repo.get(past.id), Err(Error::NotFound)));
        assert!(repo.get(upcoming.id).is_ok());
    }

    #[test]
    fn cleanup_keeps_reservations_checking_out_today() {
        let repo = make_store().reservations();
        let mut new = booking();
        new.check_out = Utc::now().format("%Y-%m-%d").to_string();
        repo.add(&new).unwrap();

        let summary = repo.cleanup_expired().unwrap();

        assert_eq!(summary.to_delete, 0);
        assert_eq!(summary.deleted, 0);
        assert_eq!(repo.list().unwrap().len(), 1);
    }

    #[test]
    fn cleanup_on_empty_store_reports_zero() {
        let repo = make_store().reservations();

        let summary = repo.cleanup_expired().unwrap();

        assert_eq!(summary.to_delete, 0);
        assert_eq!(summary.deleted, 0);
    }
}
