use crate::config::DbPool;

use super::model::Room;

pub struct RoomCrud {
    pool: DbPool,
}

impl RoomCrud {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, room: &Room) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO rooms (id, company_id, name, capacity, status, description, price)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&room.id)
        .bind(&room.company_id)
        .bind(&room.name)
        .bind(room.capacity)
        .bind(&room.status)
        .bind(&room.description)
        .bind(room.price)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Room>, sqlx::Error> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn list(&self) -> Result<Vec<Room>, sqlx::Error> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn list_by_company(&self, company_id: &str) -> Result<Vec<Room>, sqlx::Error> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE company_id = ?")
            .bind(company_id)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn update(&self, room: &Room) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE rooms
            SET name = ?, capacity = ?, status = ?, description = ?, price = ?
            WHERE id = ?
            "#,
        )
        .bind(&room.name)
        .bind(room.capacity)
        .bind(&room.status)
        .bind(&room.description)
        .bind(room.price)
        .bind(&room.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM rooms WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
