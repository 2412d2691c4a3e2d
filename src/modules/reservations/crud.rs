use axum::http::StatusCode;

use crate::config::DbPool;

use super::conflict;
use super::model::Reservation;

#[derive(Debug, thiserror::Error)]
pub enum ReservationError {
    #[error("The room is already reserved in the selected time slot. Occupied times: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ReservationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub struct ReservationCrud {
    pool: DbPool,
}

impl ReservationCrud {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Reservation>, sqlx::Error> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn list(&self) -> Result<Vec<Reservation>, sqlx::Error> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<Reservation>, sqlx::Error> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE user_id = ?")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn list_by_room(&self, room_id: &str) -> Result<Vec<Reservation>, sqlx::Error> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE room_id = ?")
            .bind(room_id)
            .fetch_all(&self.pool)
            .await
    }

    /// Conflict-check and insert in one transaction, so a concurrent booking
    /// of the same slot cannot interleave between the check and the write.
    pub async fn create(&self, reservation: &Reservation) -> Result<(), ReservationError> {
        let mut tx = self.pool.begin().await?;

        // Cancelled rows are out of the candidate set: cancelling frees the
        // slot immediately.
        let candidates = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT * FROM reservations
            WHERE room_id = ? AND date = ? AND status != 'cancelled'
            "#,
        )
        .bind(&reservation.room_id)
        .bind(&reservation.date)
        .fetch_all(&mut *tx)
        .await?;

        let hits = conflict::conflicting(
            &candidates,
            &reservation.start_time,
            &reservation.end_time,
        );
        if !hits.is_empty() {
            return Err(ReservationError::Conflict(conflict::occupied_ranges(&hits)));
        }

        sqlx::query(
            r#"
            INSERT INTO reservations (
                id, user_id, room_id, date, start_time, end_time, status,
                total_price, payment_status, payment_method, card_last_digits
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&reservation.id)
        .bind(&reservation.user_id)
        .bind(&reservation.room_id)
        .bind(&reservation.date)
        .bind(&reservation.start_time)
        .bind(&reservation.end_time)
        .bind(&reservation.status)
        .bind(reservation.total_price)
        .bind(&reservation.payment_status)
        .bind(&reservation.payment_method)
        .bind(&reservation.card_last_digits)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Persist a merged reservation. When the time window moved, the same
    /// conflict check as creation runs first, excluding the row itself.
    pub async fn update(
        &self,
        reservation: &Reservation,
        check_conflicts: bool,
    ) -> Result<(), ReservationError> {
        let mut tx = self.pool.begin().await?;

        if check_conflicts {
            let candidates = sqlx::query_as::<_, Reservation>(
                r#"
                SELECT * FROM reservations
                WHERE room_id = ? AND date = ? AND status != 'cancelled' AND id != ?
                "#,
            )
            .bind(&reservation.room_id)
            .bind(&reservation.date)
            .bind(&reservation.id)
            .fetch_all(&mut *tx)
            .await?;

            let hits = conflict::conflicting(
                &candidates,
                &reservation.start_time,
                &reservation.end_time,
            );
            if !hits.is_empty() {
                return Err(ReservationError::Conflict(conflict::occupied_ranges(&hits)));
            }
        }

        sqlx::query(
            r#"
            UPDATE reservations
            SET date = ?, start_time = ?, end_time = ?, status = ?
            WHERE id = ?
            "#,
        )
        .bind(&reservation.date)
        .bind(&reservation.start_time)
        .bind(&reservation.end_time)
        .bind(&reservation.status)
        .bind(&reservation.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Cancellation frees a slot; it never needs a conflict check.
    pub async fn set_status(&self, id: &str, status: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE reservations SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM reservations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
