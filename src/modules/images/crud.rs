use crate::config::DbPool;

use super::model::Image;

pub struct ImageCrud {
    pool: DbPool,
}

impl ImageCrud {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, image: &Image) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO images (id, name, data) VALUES (?, ?, ?)")
            .bind(&image.id)
            .bind(&image.name)
            .bind(&image.data)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Image>, sqlx::Error> {
        sqlx::query_as::<_, Image>("SELECT * FROM images WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Image>, sqlx::Error> {
        sqlx::query_as::<_, Image>("SELECT * FROM images WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn update(&self, image: &Image) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE images SET name = ?, data = ? WHERE id = ?")
            .bind(&image.name)
            .bind(&image.data)
            .bind(&image.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<Image>, sqlx::Error> {
        sqlx::query_as::<_, Image>("SELECT * FROM images")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM images WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
